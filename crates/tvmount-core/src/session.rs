use std::fmt;

use time::Date;

use crate::availability::TimeSlot;
use crate::catalog::{MountKind, SurfaceKind};
use crate::money::Money;
use crate::pricing::{PaymentPlan, PaymentSplit, PriceBreakdown};

pub const DEFAULT_SIZE_INCHES: u32 = 55;
pub const DEFAULT_MOUNT: MountKind = MountKind::Tilting;
pub const DEFAULT_SURFACE: SurfaceKind = SurfaceKind::Drywall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Stage {
    #[default]
    Landing,
    Configuration,
    Scheduling,
    Payment,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Self::Landing,
        Self::Configuration,
        Self::Scheduling,
        Self::Payment,
    ];

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Landing => Some(Self::Configuration),
            Self::Configuration => Some(Self::Scheduling),
            Self::Scheduling => Some(Self::Payment),
            Self::Payment => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Landing => None,
            Self::Configuration => Some(Self::Landing),
            Self::Scheduling => Some(Self::Configuration),
            Self::Payment => Some(Self::Scheduling),
        }
    }

    /// One-based position, as shown by a progress indicator.
    pub fn step_number(self) -> usize {
        match self {
            Self::Landing => 1,
            Self::Configuration => 2,
            Self::Scheduling => 3,
            Self::Payment => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Landing => "Welcome",
            Self::Configuration => "Configure your TV setup",
            Self::Scheduling => "Schedule your appointment",
            Self::Payment => "Payment & confirmation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Landing => "landing",
            Self::Configuration => "configuration",
            Self::Scheduling => "scheduling",
            Self::Payment => "payment",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TvConfiguration {
    pub size: Option<u32>,
    pub brand: String,
    pub mount: Option<MountKind>,
    /// When set, `mount` is ignored for pricing and display.
    pub custom_mount: bool,
    pub surface: Option<SurfaceKind>,
}

impl TvConfiguration {
    pub fn effective_mount(&self) -> Option<MountKind> {
        if self.custom_mount { None } else { self.mount }
    }

    pub fn mount_description(&self) -> String {
        match self.effective_mount() {
            Some(kind) => format!("{kind} wall mount"),
            None if self.custom_mount => "customer-provided mount".to_string(),
            None => "no mount selected".to_string(),
        }
    }
}

impl Default for TvConfiguration {
    fn default() -> Self {
        Self {
            size: Some(DEFAULT_SIZE_INCHES),
            brand: String::new(),
            mount: Some(DEFAULT_MOUNT),
            custom_mount: false,
            surface: Some(DEFAULT_SURFACE),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentRequest {
    pub date: Option<Date>,
    pub time: Option<TimeSlot>,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub notes: Option<String>,
}

/// Opaque token handed over by whatever collects card details.
#[derive(Clone, PartialEq, Eq)]
pub struct PaymentMethod {
    token: String,
}

impl PaymentMethod {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into().trim().to_string(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_present(&self) -> bool {
        !self.token.is_empty()
    }

    /// Last four characters only, for logs and receipts.
    pub fn masked(&self) -> String {
        let count = self.token.chars().count();
        let tail: String = self.token.chars().skip(count.saturating_sub(4)).collect();
        format!("****{tail}")
    }
}

impl fmt::Debug for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentMethod")
            .field("token", &self.masked())
            .finish()
    }
}

/// `total_amount` and `amount_due_now` are always derived from the configuration,
/// never edited directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentSelection {
    pub plan: PaymentPlan,
    pub amount_due_now: Money,
    pub total_amount: Money,
    pub method: Option<PaymentMethod>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingSession {
    pub stage: Stage,
    pub configuration: TvConfiguration,
    pub appointment: AppointmentRequest,
    pub payment: PaymentSelection,
}

impl BookingSession {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything handed to the notifier once a booking has been charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedBooking {
    pub configuration: TvConfiguration,
    pub appointment: AppointmentRequest,
    pub plan: PaymentPlan,
    pub breakdown: PriceBreakdown,
    pub split: PaymentSplit,
    pub charge_reference: String,
}
