use clap::{Args, Parser, Subcommand};
use time::Date;
use tvmount_core::catalog::{MountKind, SurfaceKind};
use tvmount_core::clock::parse_iso_date;
use tvmount_core::pricing::PaymentPlan;

#[derive(Debug, Parser)]
#[command(name = "tvmount")]
#[command(bin_name = "tvmount")]
#[command(version)]
#[command(about = "Quote, schedule and book TV wall-mounting appointments")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Write a diagnostics log under the tvmount config directory"
    )]
    pub diagnostics: bool,
    /// Pins "today" for availability and scheduling.
    #[arg(long, global = true, hide = true, value_name = "YYYY-MM-DD", value_parser = parse_today)]
    pub today: Option<Date>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Show TV sizes, wall mounts and wall surfaces")]
    Catalog,
    #[command(about = "List wall mounts that fit a TV size")]
    Mounts {
        #[arg(long, value_name = "INCHES")]
        size: u32,
    },
    #[command(about = "Price an installation and its payment split")]
    Quote(QuoteArgs),
    #[command(about = "Show bookable dates and time slots")]
    Availability,
    #[command(about = "Book an installation interactively")]
    Book,
    #[command(about = "Run configuration and catalog checks")]
    Doctor,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    #[arg(long, value_name = "INCHES")]
    pub size: u32,
    #[arg(
        long,
        value_name = "KIND",
        required_unless_present = "custom_mount",
        conflicts_with = "custom_mount"
    )]
    pub mount: Option<MountKind>,
    #[arg(long, help = "Customer provides their own mount")]
    pub custom_mount: bool,
    #[arg(long, value_name = "KIND", default_value = "drywall")]
    pub surface: SurfaceKind,
    #[arg(long, value_name = "PLAN", default_value = "downpayment")]
    pub plan: PaymentPlan,
}

fn parse_today(value: &str) -> Result<Date, String> {
    parse_iso_date(value).map_err(|error| format!("expected YYYY-MM-DD: {error}"))
}
