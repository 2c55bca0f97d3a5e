//! Interactive terminal front end.
//!
//! One loop serves both user commands and animation ticks: it blocks on the
//! command channel until the next tick is due, then runs that tick. The reader
//! thread only forwards lines and never touches simulation state.

use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::controls::{Parameters, CONTROLS};
use crate::errors::{SimulationError, SimulationResult};

use super::run_controller::{RunController, TickOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set { key: String, value: f64 },
    Show,
    Start,
    Stop,
    Plot,
    Clear,
    Table,
    Help,
    Close,
}

impl Command {
    pub fn parse(line: &str) -> SimulationResult<Command> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(SimulationError::CommandError("empty command".to_string()));
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "set" => {
                let key = words
                    .next()
                    .ok_or_else(|| SimulationError::CommandError("usage: set <field> <value>".into()))?;
                let raw = words
                    .next()
                    .ok_or_else(|| SimulationError::CommandError("usage: set <field> <value>".into()))?;
                let value = raw.parse::<f64>().map_err(|_| {
                    SimulationError::CommandError(format!("not a number: {}", raw))
                })?;
                Command::Set {
                    key: key.to_string(),
                    value,
                }
            }
            "show" => Command::Show,
            "start" => Command::Start,
            "stop" => Command::Stop,
            "plot" => Command::Plot,
            "clear" => Command::Clear,
            "table" => Command::Table,
            "help" => Command::Help,
            "close" | "quit" | "exit" => Command::Close,
            other => {
                return Err(SimulationError::CommandError(format!(
                    "unknown command: {}",
                    other
                )))
            }
        };

        if let Some(extra) = words.next() {
            return Err(SimulationError::CommandError(format!(
                "unexpected argument: {}",
                extra
            )));
        }
        Ok(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    Close,
    EndOfInput,
}

pub struct Session<W: Write> {
    params: Parameters,
    controller: RunController,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(params: Parameters, controller: RunController, out: W) -> Self {
        Session {
            params,
            controller,
            out,
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn controller(&self) -> &RunController {
        &self.controller
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn run(&mut self, commands: Receiver<String>) -> SimulationResult<SessionExit> {
        loop {
            let event = match self.controller.time_until_next_tick(Instant::now()) {
                Some(wait) => commands.recv_timeout(wait),
                None => commands
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };

            match event {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match Command::parse(&line) {
                        Ok(command) => {
                            if let Some(exit) = self.execute(command)? {
                                return Ok(exit);
                            }
                        }
                        Err(e) => writeln!(self.out, "error: {}", e)?,
                    }
                }
                Err(RecvTimeoutError::Timeout) => self.on_tick(Instant::now())?,
                Err(RecvTimeoutError::Disconnected) => {
                    self.finish_active_run()?;
                    return Ok(SessionExit::EndOfInput);
                }
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> SimulationResult<Option<SessionExit>> {
        debug!(?command, "command");
        match command {
            Command::Set { key, value } => match self.params.set(&key, value) {
                Ok(()) => writeln!(self.out, "{} = {}", key, value)?,
                Err(e) => writeln!(self.out, "error: {}", e)?,
            },
            Command::Show => self.show()?,
            Command::Start => {
                if self.controller.start(self.params, Instant::now())? {
                    writeln!(self.out, "running with dt={}", self.params.time_step)?;
                } else {
                    writeln!(self.out, "already running")?;
                }
            }
            Command::Stop => {
                let was_running = self.controller.is_running();
                self.controller.stop()?;
                if was_running {
                    writeln!(self.out, "stopped")?;
                }
            }
            Command::Plot => match self.controller.plot_now(self.params)? {
                Some(outcome) => {
                    writeln!(
                        self.out,
                        "plotted {} samples in {} steps",
                        outcome.trajectory.len(),
                        outcome.steps
                    )?;
                    write!(self.out, "{}", self.controller.table().render())?;
                }
                None => writeln!(self.out, "stop the running simulation first")?,
            },
            Command::Clear => {
                self.controller.clear()?;
                writeln!(self.out, "cleared")?;
            }
            Command::Table => write!(self.out, "{}", self.controller.table().render())?,
            Command::Help => self.help()?,
            Command::Close => {
                self.controller.stop()?;
                return Ok(Some(SessionExit::Close));
            }
        }
        self.out.flush()?;
        Ok(None)
    }

    fn on_tick(&mut self, now: Instant) -> SimulationResult<()> {
        if let TickOutcome::Finished(row) = self.controller.poll(now)? {
            writeln!(
                self.out,
                "landed: range {:.2} m, max height {:.2} m, final speed {:.2} m/s",
                row.range, row.max_height, row.terminal_speed
            )?;
            write!(self.out, "{}", self.controller.table().render())?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Input ran out while a run is in flight; let it land on schedule.
    fn finish_active_run(&mut self) -> SimulationResult<()> {
        while let Some(wait) = self.controller.time_until_next_tick(Instant::now()) {
            if wait > Duration::ZERO {
                thread::sleep(wait);
            }
            self.on_tick(Instant::now())?;
        }
        Ok(())
    }

    fn show(&mut self) -> SimulationResult<()> {
        for spec in &CONTROLS {
            let value = self.params.value(spec.key).unwrap_or(spec.default);
            writeln!(
                self.out,
                "{:<6} {:>10} [{} .. {}]  {}",
                spec.key, value, spec.min, spec.max, spec.label
            )?;
        }
        Ok(())
    }

    fn help(&mut self) -> SimulationResult<()> {
        writeln!(self.out, "commands:")?;
        writeln!(self.out, "  set <field> <value>   change a launch parameter (see `show`)")?;
        writeln!(self.out, "  show                  list launch parameters")?;
        writeln!(self.out, "  start                 animate a flight")?;
        writeln!(self.out, "  stop                  abort the animated flight")?;
        writeln!(self.out, "  plot                  compute a whole flight now")?;
        writeln!(self.out, "  clear                 drop all curves and results")?;
        writeln!(self.out, "  table                 print the results table")?;
        writeln!(self.out, "  close                 quit")?;
        Ok(())
    }
}

/// Forwards lines from `reader` until it is exhausted or the receiver goes away.
pub fn spawn_line_reader<R: BufRead + Send + 'static>(reader: R) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in reader.lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
