use std::io;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use projectile_simulation::control::session::spawn_line_reader;
use projectile_simulation::*;

#[derive(Parser)]
#[command(name = "drag-sim")]
#[command(version, about = "Projectile flight with quadratic air drag")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute whole trajectories at once and print the results table
    Plot {
        #[command(flatten)]
        form: FormArgs,

        /// Time steps to compare, one row each (replaces --dt)
        #[arg(long = "compare", num_args = 1..)]
        compare: Vec<f64>,

        /// Also print every trajectory sample as CSV
        #[arg(long)]
        samples: bool,
    },

    /// Animate one flight, printing samples as they are computed
    Animate {
        #[command(flatten)]
        form: FormArgs,

        /// Wall-clock delay between frames (ms)
        #[arg(long, default_value_t = TICK_INTERVAL_MS)]
        interval_ms: u64,
    },

    /// Batch-run random in-range launch parameters
    Sweep {
        /// Number of runs
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,

        /// RNG seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Interactive session (type `help` for commands)
    Session {
        #[command(flatten)]
        form: FormArgs,

        /// Wall-clock delay between frames (ms)
        #[arg(long, default_value_t = TICK_INTERVAL_MS)]
        interval_ms: u64,
    },
}

#[derive(Args, Debug, Clone, Copy)]
struct FormArgs {
    /// Initial speed (m/s)
    #[arg(long, default_value_t = 30.0)]
    v0: f64,

    /// Launch angle (degrees)
    #[arg(short = 'a', long, default_value_t = 40.0)]
    angle: f64,

    /// Initial height (m)
    #[arg(long, default_value_t = 0.0)]
    y0: f64,

    /// Cross-section area (m²)
    #[arg(short = 's', long, default_value_t = 0.1)]
    area: f64,

    /// Mass (kg)
    #[arg(short = 'm', long, default_value_t = 1.5)]
    mass: f64,

    /// Time step (s)
    #[arg(long, default_value_t = 0.1)]
    dt: f64,
}

impl FormArgs {
    fn parameters(&self) -> SimulationResult<Parameters> {
        Parameters::new(self.v0, self.angle, self.y0, self.area, self.mass, self.dt).validated()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plot {
            form,
            compare,
            samples,
        } => {
            let base = form.parameters()?;
            let mut controller = RunController::new();
            if samples {
                controller.add_sink(Box::new(CsvSink::new(io::stdout())));
            }

            let time_steps = if compare.is_empty() {
                vec![base.time_step]
            } else {
                compare
            };
            for dt in time_steps {
                let mut params = base;
                params.set("dt", dt)?;
                controller.plot_now(params)?;
            }
            print!("{}", controller.table().render());
        }
        Commands::Animate { form, interval_ms } => {
            let params = form.parameters()?;
            let mut controller = RunController::with_tick_interval(Duration::from_millis(interval_ms));
            controller.add_sink(Box::new(CsvSink::new(io::stdout())));
            controller.add_sink(Box::new(TracingSink::new()));

            controller.start(params, Instant::now())?;
            while let Some(wait) = controller.time_until_next_tick(Instant::now()) {
                if wait > Duration::ZERO {
                    thread::sleep(wait);
                }
                controller.poll(Instant::now())?;
            }
            print!("{}", controller.table().render());
        }
        Commands::Sweep { count, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let mut controller = RunController::new();
            for _ in 0..count {
                let params = Parameters::sample(&mut rng);
                tracing::info!(?params, "sweep run");
                controller.plot_now(params)?;
            }
            print!("{}", controller.table().render());
        }
        Commands::Session { form, interval_ms } => {
            let params = form.parameters()?;
            let controller = RunController::with_tick_interval(Duration::from_millis(interval_ms));
            let mut session = Session::new(params, controller, io::stdout());
            println!("type `help` for commands");

            let input = spawn_line_reader(io::BufReader::new(io::stdin()));
            if session.run(input)? == SessionExit::Close {
                // Close bypasses normal shutdown.
                std::process::exit(0);
            }
        }
    }

    Ok(())
}
