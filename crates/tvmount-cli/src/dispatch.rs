use std::io::{self, Write};

use anyhow::Result;
use tvmount_app::App;
use tvmount_core::availability::time_slots;
use tvmount_core::clock::format_iso_date;
use tvmount_core::compatibility::recommended_mount;
use tvmount_core::doctor::{DoctorReport, run_doctor};
use tvmount_core::session::TvConfiguration;

use crate::booking_flow::run_booking;
use crate::cli::{Command, QuoteArgs};
use crate::prompt::InquirePromptDriver;
use crate::render;

pub fn run_with_deps(command: Command, app: &App<'_>) -> Result<()> {
    match command {
        Command::Catalog => run_catalog_command(app),
        Command::Mounts { size } => run_mounts_command(app, size),
        Command::Quote(args) => run_quote_command(app, args),
        Command::Availability => run_availability_command(app),
        Command::Book => run_book_command(app),
        Command::Doctor => run_doctor_command(),
    }
}

fn run_catalog_command(app: &App<'_>) -> Result<()> {
    println!("TV sizes");
    println!("{}", render::size_table(app.catalog));
    println!("\nWall mounts");
    let mounts: Vec<_> = app.catalog.mount_types().iter().collect();
    println!("{}", render::mount_table(&mounts, None));
    println!("\nWall surfaces");
    println!("{}", render::surface_table(app.catalog));
    Ok(())
}

fn run_mounts_command(app: &App<'_>, inches: u32) -> Result<()> {
    let mounts = app.compatible_mounts(inches)?;
    if mounts.is_empty() {
        println!("No wall mount fits a {inches}\" TV; the customer has to provide one.");
        return Ok(());
    }

    println!("{}", render::mount_table(&mounts, Some(recommended_mount(inches))));
    Ok(())
}

fn run_quote_command(app: &App<'_>, args: QuoteArgs) -> Result<()> {
    let configuration = TvConfiguration {
        size: Some(args.size),
        brand: String::new(),
        mount: args.mount,
        custom_mount: args.custom_mount,
        surface: Some(args.surface),
    };

    let quote = app.quote(&configuration, args.plan)?;
    let mount_label = match configuration.effective_mount() {
        Some(kind) => app.catalog.find_mount(kind)?.name.clone(),
        None => "Customer-provided mount".to_string(),
    };

    println!("{}", render::quote_table(&quote, &mount_label));
    Ok(())
}

fn run_availability_command(app: &App<'_>) -> Result<()> {
    let dates = app.available_dates();
    println!(
        "Bookable dates after {} (next {} days, closed Sundays)",
        format_iso_date(app.clock.today()),
        app.horizon_days
    );
    println!("{}", render::availability_table(&dates));
    println!("{}", render::time_slot_table(time_slots()));
    Ok(())
}

fn run_book_command(app: &App<'_>) -> Result<()> {
    let mut prompt = InquirePromptDriver::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_booking(app, &mut prompt, &mut out)?;
    out.flush()?;
    Ok(())
}

pub fn run_doctor_command() -> Result<()> {
    let report = run_doctor();
    print_doctor_report(&report);
    Ok(())
}

fn print_doctor_report(report: &DoctorReport) {
    println!("{}", render::doctor_table(report));
    println!("{}", report.summary());
}
