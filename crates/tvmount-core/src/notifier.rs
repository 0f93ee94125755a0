use crate::clock::format_iso_date;
use crate::session::ConfirmedBooking;

pub trait Notifier {
    fn notify_booking_confirmed(&self, booking: &ConfirmedBooking) -> anyhow::Result<()>;
}

/// Stands in for email/SMS delivery by emitting a structured log event.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for LogNotifier {
    fn notify_booking_confirmed(&self, booking: &ConfirmedBooking) -> anyhow::Result<()> {
        let date = booking
            .appointment
            .date
            .map(format_iso_date)
            .unwrap_or_default();
        let slot = booking
            .appointment
            .time
            .map(|slot| slot.label())
            .unwrap_or_default();

        tracing::info!(
            customer = %booking.appointment.name,
            phone = %booking.appointment.phone,
            date = %date,
            slot = %slot,
            total = %booking.breakdown.total,
            paid_now = %booking.split.amount_due_now,
            reference = %booking.charge_reference,
            "booking confirmed"
        );
        Ok(())
    }
}
