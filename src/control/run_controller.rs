use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::controls::Parameters;
use crate::constants::TICK_INTERVAL_MS;
use crate::errors::SimulationResult;
use crate::telemetry_system::plot::{curve_label, Plot};
use crate::telemetry_system::results::{ResultRow, ResultsTable};
use crate::telemetry_system::sinks::TrajectorySink;
use crate::trajectory_system::batch::{compute_trajectory, BatchOutcome};
use crate::trajectory_system::state::SimulationState;
use crate::trajectory_system::trajectory::Trajectory;
use crate::utils::vector2d::Vector2D;

use super::scheduler::{CancellationToken, TickSchedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No run in flight; nothing was computed.
    Idle,
    Continue,
    Finished(ResultRow),
}

struct ActiveRun {
    params: Parameters,
    state: SimulationState,
    schedule: TickSchedule,
}

/// Owns the simulation state of the current run and feeds the plot and the results table.
pub struct RunController {
    active: Option<ActiveRun>,
    trajectory: Trajectory,
    plot: Plot,
    table: ResultsTable,
    sinks: Vec<Box<dyn TrajectorySink>>,
    tick_interval: Duration,
}

impl RunController {
    pub fn new() -> Self {
        RunController::with_tick_interval(Duration::from_millis(TICK_INTERVAL_MS))
    }

    pub fn with_tick_interval(tick_interval: Duration) -> Self {
        RunController {
            active: None,
            trajectory: Trajectory::new(),
            plot: Plot::new(),
            table: ResultsTable::new(),
            sinks: Vec::new(),
            tick_interval,
        }
    }

    /// Extra consumers that mirror every curve drawn on the plot.
    pub fn add_sink(&mut self, sink: Box<dyn TrajectorySink>) {
        debug!(sink = sink.name(), "sink attached");
        self.sinks.push(sink);
    }

    pub fn run_state(&self) -> RunState {
        if self.active.is_some() {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn plot(&self) -> &Plot {
        &self.plot
    }

    pub fn table(&self) -> &ResultsTable {
        &self.table
    }

    /// Samples of the run in flight, or of the most recent run.
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn simulation_state(&self) -> Option<&SimulationState> {
        self.active.as_ref().map(|run| &run.state)
    }

    pub fn cancellation_token(&self) -> Option<CancellationToken> {
        self.active.as_ref().map(|run| run.schedule.token())
    }

    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.active.as_ref().and_then(|run| run.schedule.time_until(now))
    }

    /// Begins an animated run. Returns `false` and changes nothing if one is already running.
    pub fn start(&mut self, params: Parameters, now: Instant) -> SimulationResult<bool> {
        if self.is_running() {
            warn!("start ignored: a run is already in progress");
            return Ok(false);
        }

        let state = SimulationState::from_parameters(&params);
        debug!(?params, drag_factor = state.drag_factor, "animated run started");

        let mut schedule = TickSchedule::new(self.tick_interval);
        schedule.arm(now);
        self.trajectory = Trajectory::new();
        self.begin_curve(&curve_label(params.time_step))?;
        self.active = Some(ActiveRun {
            params,
            state,
            schedule,
        });
        Ok(true)
    }

    /// Ticks only when the schedule says the next tick is due.
    pub fn poll(&mut self, now: Instant) -> SimulationResult<TickOutcome> {
        let due = match &self.active {
            Some(run) => run.schedule.due(now),
            None => return Ok(TickOutcome::Idle),
        };
        if !due {
            return Ok(TickOutcome::Continue);
        }

        let outcome = self.tick()?;
        if let (TickOutcome::Continue, Some(run)) = (outcome, self.active.as_mut()) {
            run.schedule.reschedule(now);
        }
        Ok(outcome)
    }

    /// One animation frame: sample, step, draw, then decide whether the flight is over.
    pub fn tick(&mut self) -> SimulationResult<TickOutcome> {
        let cancelled = match &self.active {
            Some(run) => run.schedule.is_cancelled(),
            None => return Ok(TickOutcome::Idle),
        };
        if cancelled {
            self.stop()?;
            return Ok(TickOutcome::Idle);
        }

        let (sample, landed, dt) = match self.active.as_mut() {
            Some(run) => {
                let dt = run.params.time_step;
                let sample = run.state.position;
                run.state.record_height();
                run.state.step(dt);
                // t > 0 keeps a launch from y0 = 0 alive on the first frame.
                let landed = run.state.is_on_or_below_ground() && run.state.time > 0.0;
                if !landed {
                    run.state.time += dt;
                }
                (sample, landed, dt)
            }
            None => return Ok(TickOutcome::Idle),
        };

        self.trajectory.push(sample);
        self.push_sample(sample)?;

        if !landed {
            return Ok(TickOutcome::Continue);
        }

        let Some(mut run) = self.active.take() else {
            return Ok(TickOutcome::Idle);
        };
        run.schedule.cancel();
        let row = ResultRow::from_state(dt, &run.state);
        info!(
            samples = self.trajectory.len(),
            flight_time = run.state.time,
            "animated run finished"
        );
        self.table.record(row);

        // The row is kept even when a sink fails to close its curve.
        self.finish_curve()?;
        Ok(TickOutcome::Finished(row))
    }

    /// Cancels the pending tick. Records nothing; the partial curve stays on the plot.
    pub fn stop(&mut self) -> SimulationResult<()> {
        if let Some(mut run) = self.active.take() {
            run.schedule.cancel();
            info!(samples = self.trajectory.len(), "animated run stopped");
            self.finish_curve()?;
        }
        Ok(())
    }

    /// Computes and draws a full trajectory at once. Ignored while an animated run is active.
    pub fn plot_now(&mut self, params: Parameters) -> SimulationResult<Option<BatchOutcome>> {
        if self.is_running() {
            debug!("plot ignored: a run is already in progress");
            return Ok(None);
        }

        let outcome = compute_trajectory(&params);
        let label = curve_label(params.time_step);
        self.plot.add_trajectory(label.clone(), &outcome.trajectory);
        self.table.record(outcome.result);
        self.trajectory = outcome.trajectory.clone();

        let samples = outcome.trajectory.samples();
        self.for_each_sink(|sink| {
            sink.begin_curve(&label)?;
            for sample in samples {
                sink.push_sample(*sample)?;
            }
            sink.finish_curve()
        })?;
        Ok(Some(outcome))
    }

    pub fn clear(&mut self) -> SimulationResult<()> {
        let stopped = self.stop();
        self.plot.clear()?;
        self.table.clear();
        self.trajectory = Trajectory::new();
        let cleared = self.for_each_sink(|sink| sink.clear());
        stopped.and(cleared)
    }

    /// Sinks first, so a failing sink leaves no orphan curve on the plot.
    fn begin_curve(&mut self, label: &str) -> SimulationResult<()> {
        self.for_each_sink(|sink| sink.begin_curve(label))?;
        self.plot.begin_curve(label)
    }

    fn push_sample(&mut self, sample: Vector2D) -> SimulationResult<()> {
        self.plot.push_sample(sample)?;
        self.for_each_sink(|sink| sink.push_sample(sample))
    }

    fn finish_curve(&mut self) -> SimulationResult<()> {
        self.plot.finish_curve()?;
        self.for_each_sink(|sink| sink.finish_curve())
    }

    /// Visits every sink, even after one fails, and returns the first error.
    fn for_each_sink<F>(&mut self, mut f: F) -> SimulationResult<()>
    where
        F: FnMut(&mut dyn TrajectorySink) -> SimulationResult<()>,
    {
        let mut first_error = None;
        for sink in self.sinks.iter_mut() {
            if let Err(e) = f(sink.as_mut()) {
                warn!(sink = sink.name(), error = %e, "sink failed");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Default for RunController {
    fn default() -> Self {
        RunController::new()
    }
}
