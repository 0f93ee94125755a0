pub mod booking_flow;
pub mod cli;
pub mod diagnostics;
pub mod dispatch;
pub mod prompt;
pub mod render;

use anyhow::Result;
use clap::Parser;
use tvmount_app::{App, load_settings};
use tvmount_core::clock::{Clock, FixedClock, SystemClock};
use tvmount_core::notifier::LogNotifier;
use tvmount_core::payment_gateway::MockPaymentGateway;

use crate::cli::{Cli, Command};
use crate::diagnostics::DiagnosticsSession;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let diagnostics = DiagnosticsSession::initialize(cli.diagnostics)?;
    if let Some(path) = diagnostics.path() {
        eprintln!("Diagnostics log: {}", path.display());
    }
    tracing::debug!(command = ?cli.command, today = ?cli.today, "tvmount starting");

    // Doctor has to run even when the config is broken.
    if matches!(cli.command, Command::Doctor) {
        return dispatch::run_doctor_command();
    }

    let settings = load_settings()?;
    let clock: Box<dyn Clock> = match cli.today {
        Some(today) => Box::new(FixedClock::new(today)),
        None => Box::new(SystemClock::new()),
    };
    let notifier = LogNotifier::new();
    let gateway = MockPaymentGateway::new();
    let app = App::new(&settings.catalog, clock.as_ref(), &notifier, &gateway)
        .with_horizon_days(settings.horizon_days);

    dispatch::run_with_deps(cli.command, &app)
}
