use clap::Parser;
use miette::{IntoDiagnostic, Result};
use relaygate::application::config::TimingConfig;
use relaygate::application::control_loop::ControlLoop;
use relaygate::domain::ports::MessageSourceBox;
use relaygate::infrastructure::clock::MonotonicClock;
use relaygate::infrastructure::relays::InMemoryRelayBank;
use relaygate::interfaces::console::{self, StdinSource};
use relaygate::interfaces::script::reader::ScenarioReader;
use relaygate::interfaces::script::runner::ScenarioRunner;
use relaygate::interfaces::serial::reporter::LineReporter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenario CSV file (`at,kind,value`) replayed against a simulated
    /// clock. Without it the controller runs live on stdin.
    scenario: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut control = ControlLoop::new(
        TimingConfig::default(),
        InMemoryRelayBank::new(),
        LineReporter::new(stdout.lock()),
    );
    control.boot().into_diagnostic()?;

    if let Some(path) = cli.scenario {
        let file = File::open(path).into_diagnostic()?;
        let reader = ScenarioReader::new(file);

        let mut steps = Vec::new();
        for step_result in reader.steps() {
            match step_result {
                Ok(step) => steps.push(step),
                Err(e) => warn!("Error reading scenario row: {e}"),
            }
        }

        ScenarioRunner::new(&mut control, steps)
            .run()
            .into_diagnostic()?;
    } else {
        let source: MessageSourceBox = Box::new(StdinSource::new());
        let clock = MonotonicClock::new();
        console::run_console(&mut control, source, &clock)
            .await
            .into_diagnostic()?;
    }

    Ok(())
}
