mod error;
mod settings;
mod wizard;

use tvmount_core::availability::{AvailableDate, DEFAULT_HORIZON_DAYS, next_available_dates};
use tvmount_core::catalog::{Catalog, WallMountType};
use tvmount_core::clock::Clock;
use tvmount_core::compatibility::{compatible_mounts, is_compatible};
use tvmount_core::notifier::Notifier;
use tvmount_core::payment_gateway::PaymentGateway;
use tvmount_core::pricing::{PaymentPlan, Quote, quote};
use tvmount_core::session::TvConfiguration;

pub use error::BookingError;
pub use settings::{Settings, load_settings, load_settings_from};
pub use wizard::{Advance, GuardFailure, Wizard};

/// Collaborators shared by every booking in this process.
#[derive(Clone, Copy)]
pub struct App<'a> {
    pub catalog: &'a Catalog,
    pub clock: &'a dyn Clock,
    pub notifier: &'a dyn Notifier,
    pub gateway: &'a dyn PaymentGateway,
    pub horizon_days: u32,
}

impl<'a> App<'a> {
    pub fn new(
        catalog: &'a Catalog,
        clock: &'a dyn Clock,
        notifier: &'a dyn Notifier,
        gateway: &'a dyn PaymentGateway,
    ) -> Self {
        Self {
            catalog,
            clock,
            notifier,
            gateway,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    pub fn with_horizon_days(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    /// Starts a fresh session at the landing stage.
    pub fn begin_booking(&self) -> Wizard<'a> {
        Wizard::new(*self)
    }

    pub fn available_dates(&self) -> Vec<AvailableDate> {
        next_available_dates(self.clock.today(), self.horizon_days)
    }

    pub fn compatible_mounts(&self, inches: u32) -> Result<Vec<&'a WallMountType>, BookingError> {
        self.catalog.find_size(inches)?;
        Ok(compatible_mounts(self.catalog, inches))
    }

    /// Prices a configuration outside of any session.
    pub fn quote(
        &self,
        configuration: &TvConfiguration,
        plan: PaymentPlan,
    ) -> Result<Quote, BookingError> {
        if let (Some(inches), Some(kind), false) = (
            configuration.size,
            configuration.mount,
            configuration.custom_mount,
        ) {
            let mount = self.catalog.find_mount(kind)?;
            if !is_compatible(mount, inches) {
                return Err(BookingError::IncompatibleMount { kind, inches });
            }
        }

        Ok(quote(self.catalog, configuration, plan)?)
    }
}
