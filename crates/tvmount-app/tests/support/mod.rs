use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::anyhow;
use time::{Date, Month};
use tvmount_core::money::Money;
use tvmount_core::notifier::Notifier;
use tvmount_core::payment_gateway::{ChargeOutcome, PaymentGateway};
use tvmount_core::session::{ConfirmedBooking, PaymentMethod};

/// 2026-03-02 is a Monday.
pub fn monday() -> Date {
    date(2026, Month::March, 2)
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid date")
}

#[derive(Default)]
pub struct RecordingNotifier {
    bookings: Mutex<Vec<ConfirmedBooking>>,
}

impl RecordingNotifier {
    pub fn bookings(&self) -> Vec<ConfirmedBooking> {
        self.bookings.lock().expect("bookings lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_booking_confirmed(&self, booking: &ConfirmedBooking) -> anyhow::Result<()> {
        self.bookings
            .lock()
            .expect("bookings lock")
            .push(booking.clone());
        Ok(())
    }
}

pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify_booking_confirmed(&self, _booking: &ConfirmedBooking) -> anyhow::Result<()> {
        Err(anyhow!("smtp relay unreachable"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charge {
    pub amount: Money,
    pub token: String,
}

/// Replays queued outcomes in order and records every charge attempt.
#[derive(Default)]
pub struct ScriptedGateway {
    outcomes: Mutex<VecDeque<anyhow::Result<ChargeOutcome>>>,
    charges: Mutex<Vec<Charge>>,
}

impl ScriptedGateway {
    pub fn new(outcomes: Vec<anyhow::Result<ChargeOutcome>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            charges: Mutex::new(Vec::new()),
        }
    }

    pub fn charges(&self) -> Vec<Charge> {
        self.charges.lock().expect("charges lock").clone()
    }
}

impl PaymentGateway for ScriptedGateway {
    fn charge(&self, amount: Money, method: &PaymentMethod) -> anyhow::Result<ChargeOutcome> {
        self.charges.lock().expect("charges lock").push(Charge {
            amount,
            token: method.token().to_string(),
        });

        self.outcomes
            .lock()
            .expect("outcomes lock")
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("missing scripted charge outcome")))
    }
}

pub fn approved(reference: &str) -> anyhow::Result<ChargeOutcome> {
    Ok(ChargeOutcome::Approved {
        reference: reference.to_string(),
    })
}

pub fn declined(reason: &str) -> anyhow::Result<ChargeOutcome> {
    Ok(ChargeOutcome::Declined {
        reason: reason.to_string(),
    })
}
