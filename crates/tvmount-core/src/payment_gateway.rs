use std::sync::atomic::{AtomicU32, Ordering};

use crate::money::Money;
use crate::session::PaymentMethod;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeOutcome {
    Approved { reference: String },
    Declined { reason: String },
}

pub trait PaymentGateway {
    fn charge(&self, amount: Money, method: &PaymentMethod) -> anyhow::Result<ChargeOutcome>;
}

const DECLINE_PREFIX: &str = "decline";

/// Approves every charge except tokens starting with `decline`. No money moves.
#[derive(Debug, Default)]
pub struct MockPaymentGateway {
    issued: AtomicU32,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaymentGateway for MockPaymentGateway {
    fn charge(&self, amount: Money, method: &PaymentMethod) -> anyhow::Result<ChargeOutcome> {
        if method
            .token()
            .to_ascii_lowercase()
            .starts_with(DECLINE_PREFIX)
        {
            return Ok(ChargeOutcome::Declined {
                reason: format!("card {} was declined", method.masked()),
            });
        }

        let sequence = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(%amount, method = %method.masked(), sequence, "mock charge approved");

        Ok(ChargeOutcome::Approved {
            reference: format!("mock-{sequence:06}"),
        })
    }
}
