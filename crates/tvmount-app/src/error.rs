use thiserror::Error;
use tvmount_core::catalog::{CatalogError, MountKind};
use tvmount_core::pricing::PricingError;
use tvmount_core::session::Stage;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error("cannot {action} during the {current} stage; it belongs to the {expected} stage")]
    WrongStage {
        action: &'static str,
        expected: Stage,
        current: Stage,
    },
    #[error("{kind} mount does not fit a {inches}\" TV")]
    IncompatibleMount { kind: MountKind, inches: u32 },
    #[error("no wall mount fits a {inches}\" TV; the customer has to provide one")]
    NoCompatibleMount { inches: u32 },
    #[error("payment was declined: {reason}")]
    PaymentDeclined { reason: String },
    #[error("payment gateway failed: {message}")]
    PaymentGateway { message: String },
}
