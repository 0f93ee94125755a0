use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::money::Money;
use crate::session::TvConfiguration;

pub const DEPOSIT_PERCENT: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentPlan {
    Full,
    #[default]
    Downpayment,
}

impl PaymentPlan {
    pub const ALL: [PaymentPlan; 2] = [Self::Downpayment, Self::Full];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Downpayment => "downpayment",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Full => "Full payment",
            Self::Downpayment => "25% down payment",
        }
    }
}

impl fmt::Display for PaymentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment plan '{value}'; expected one of: full, downpayment")]
pub struct ParsePlanError {
    pub value: String,
}

impl FromStr for PaymentPlan {
    type Err = ParsePlanError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "downpayment" | "down-payment" | "deposit" => Ok(Self::Downpayment),
            _ => Err(ParsePlanError {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub installation: Money,
    pub mount: Money,
    pub surface_fee: Money,
    pub total: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentSplit {
    pub amount_due_now: Money,
    pub remaining: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub breakdown: PriceBreakdown,
    pub plan: PaymentPlan,
    pub split: PaymentSplit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("configuration is missing {field}")]
    Incomplete { field: &'static str },
}

/// Base price of the size, plus the mount unless the customer brings one, plus
/// the surface fee. A size, mount or surface missing from the catalog is an error,
/// never a silent default.
pub fn price_breakdown(
    catalog: &Catalog,
    configuration: &TvConfiguration,
) -> Result<PriceBreakdown, PricingError> {
    let inches = configuration
        .size
        .ok_or(PricingError::Incomplete { field: "TV size" })?;
    let surface = configuration
        .surface
        .ok_or(PricingError::Incomplete {
            field: "wall surface",
        })?;

    let installation = catalog.find_size(inches)?.base_price;
    let mount = if configuration.custom_mount {
        Money::ZERO
    } else {
        let kind = configuration
            .mount
            .ok_or(PricingError::Incomplete { field: "wall mount" })?;
        catalog.find_mount(kind)?.price
    };
    let surface_fee = catalog.find_surface(surface)?.additional_fee;

    Ok(PriceBreakdown {
        installation,
        mount,
        surface_fee,
        total: installation + mount + surface_fee,
    })
}

pub fn installation_total(
    catalog: &Catalog,
    configuration: &TvConfiguration,
) -> Result<Money, PricingError> {
    Ok(price_breakdown(catalog, configuration)?.total)
}

pub fn payment_split(total: Money, plan: PaymentPlan) -> PaymentSplit {
    let amount_due_now = match plan {
        PaymentPlan::Full => total,
        PaymentPlan::Downpayment => total.percent_ceil(DEPOSIT_PERCENT),
    };

    PaymentSplit {
        amount_due_now,
        remaining: total.saturating_sub(amount_due_now),
    }
}

pub fn quote(
    catalog: &Catalog,
    configuration: &TvConfiguration,
    plan: PaymentPlan,
) -> Result<Quote, PricingError> {
    let breakdown = price_breakdown(catalog, configuration)?;
    Ok(Quote {
        breakdown,
        plan,
        split: payment_split(breakdown.total, plan),
    })
}
