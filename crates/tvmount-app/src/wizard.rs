use std::fmt;

use time::Date;
use tvmount_core::availability::{AvailableDate, TimeSlot, is_bookable, time_slots};
use tvmount_core::catalog::{MountKind, SurfaceKind, WallMountType};
use tvmount_core::compatibility::{
    MountResolution, compatible_mounts, is_compatible, recommended_mount, resolve_mount_for_size,
};
use tvmount_core::payment_gateway::ChargeOutcome;
use tvmount_core::pricing::{PaymentPlan, PriceBreakdown, PricingError, Quote, quote};
use tvmount_core::session::{BookingSession, ConfirmedBooking, PaymentMethod, Stage};

use crate::App;
use crate::error::BookingError;

/// Why the forward action is currently disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardFailure {
    MissingSize,
    MissingMount,
    MissingSurface,
    MissingDate,
    DateUnavailable,
    MissingTime,
    MissingName,
    MissingAddress,
    MissingPhone,
    MissingPaymentMethod,
}

impl GuardFailure {
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingSize => "choose a TV size",
            Self::MissingMount => "choose a compatible wall mount or provide your own",
            Self::MissingSurface => "choose a wall surface",
            Self::MissingDate => "choose an appointment date",
            Self::DateUnavailable => "the chosen date is not bookable",
            Self::MissingTime => "choose a time slot",
            Self::MissingName => "enter your full name",
            Self::MissingAddress => "enter the installation address",
            Self::MissingPhone => "enter a phone number",
            Self::MissingPaymentMethod => "enter a payment method",
        }
    }
}

impl fmt::Display for GuardFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Moved { from: Stage, to: Stage },
    Blocked(Vec<GuardFailure>),
    /// Payment went through; the wizard is back at a fresh landing stage.
    Completed(Box<ConfirmedBooking>),
}

/// Linear booking flow: landing, configuration, scheduling, payment.
///
/// Owns the one [`BookingSession`] for a customer interaction. Dropping the wizard
/// abandons the session; nothing is persisted.
pub struct Wizard<'a> {
    app: App<'a>,
    session: BookingSession,
}

impl<'a> Wizard<'a> {
    pub(crate) fn new(app: App<'a>) -> Self {
        Self {
            app,
            session: BookingSession::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.session.stage
    }

    pub fn session(&self) -> &BookingSession {
        &self.session
    }

    pub fn price_breakdown(&self) -> Result<PriceBreakdown, BookingError> {
        Ok(self.quote()?.breakdown)
    }

    pub fn quote(&self) -> Result<Quote, BookingError> {
        Ok(quote(
            self.app.catalog,
            &self.session.configuration,
            self.session.payment.plan,
        )?)
    }

    pub fn compatible_mounts(&self) -> Vec<&'a WallMountType> {
        match self.session.configuration.size {
            Some(inches) => compatible_mounts(self.app.catalog, inches),
            None => Vec::new(),
        }
    }

    pub fn recommended_mount(&self) -> Option<MountKind> {
        self.session.configuration.size.map(recommended_mount)
    }

    pub fn available_dates(&self) -> Vec<AvailableDate> {
        self.app.available_dates()
    }

    pub fn time_slots(&self) -> &'static [TimeSlot] {
        time_slots()
    }

    pub fn set_size(&mut self, inches: u32) -> Result<(), BookingError> {
        self.require_stage(Stage::Configuration, "change the TV size")?;
        self.app.catalog.find_size(inches)?;

        let configuration = &mut self.session.configuration;
        configuration.size = Some(inches);

        match resolve_mount_for_size(self.app.catalog, inches, configuration.mount) {
            MountResolution::Keep(_) => {}
            MountResolution::Replace { previous, next } => {
                tracing::debug!(inches, ?previous, %next, "mount replaced after size change");
                configuration.mount = Some(next);
            }
            MountResolution::ForceCustom => {
                tracing::debug!(inches, "no compatible mount, forcing custom mount");
                configuration.mount = None;
                configuration.custom_mount = true;
            }
        }

        self.refresh_payment()
    }

    pub fn set_brand(&mut self, brand: impl Into<String>) -> Result<(), BookingError> {
        self.require_stage(Stage::Configuration, "change the TV brand")?;
        self.session.configuration.brand = brand.into().trim().to_string();
        Ok(())
    }

    /// Only mounts from [`Wizard::compatible_mounts`] are accepted.
    pub fn select_mount(&mut self, kind: MountKind) -> Result<(), BookingError> {
        self.require_stage(Stage::Configuration, "choose a wall mount")?;
        let mount = self.app.catalog.find_mount(kind)?;

        if let Some(inches) = self.session.configuration.size {
            if !is_compatible(mount, inches) {
                return Err(BookingError::IncompatibleMount { kind, inches });
            }
        }

        self.session.configuration.mount = Some(kind);
        self.refresh_payment()
    }

    pub fn set_custom_mount(&mut self, custom_mount: bool) -> Result<(), BookingError> {
        self.require_stage(Stage::Configuration, "change the custom mount option")?;

        if !custom_mount {
            if let Some(inches) = self.session.configuration.size {
                let current = self.session.configuration.mount;
                match resolve_mount_for_size(self.app.catalog, inches, current) {
                    MountResolution::Keep(_) => {}
                    MountResolution::Replace { next, .. } => {
                        self.session.configuration.mount = Some(next);
                    }
                    MountResolution::ForceCustom => {
                        return Err(BookingError::NoCompatibleMount { inches });
                    }
                }
            }
        }

        self.session.configuration.custom_mount = custom_mount;
        self.refresh_payment()
    }

    pub fn set_surface(&mut self, kind: SurfaceKind) -> Result<(), BookingError> {
        self.require_stage(Stage::Configuration, "choose a wall surface")?;
        self.app.catalog.find_surface(kind)?;
        self.session.configuration.surface = Some(kind);
        self.refresh_payment()
    }

    /// Any date is stored; bookability is checked by the scheduling guard.
    pub fn set_date(&mut self, date: Date) -> Result<(), BookingError> {
        self.require_stage(Stage::Scheduling, "choose a date")?;
        self.session.appointment.date = Some(date);
        Ok(())
    }

    pub fn set_time_slot(&mut self, slot: TimeSlot) -> Result<(), BookingError> {
        self.require_stage(Stage::Scheduling, "choose a time slot")?;
        self.session.appointment.time = Some(slot);
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), BookingError> {
        self.require_stage(Stage::Scheduling, "enter a name")?;
        self.session.appointment.name = name.into();
        Ok(())
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> Result<(), BookingError> {
        self.require_stage(Stage::Scheduling, "enter a phone number")?;
        self.session.appointment.phone = phone.into();
        Ok(())
    }

    pub fn set_address(&mut self, address: impl Into<String>) -> Result<(), BookingError> {
        self.require_stage(Stage::Scheduling, "enter an address")?;
        self.session.appointment.address = address.into();
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<(), BookingError> {
        self.require_stage(Stage::Scheduling, "enter notes")?;
        let notes = notes.into();
        self.session.appointment.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        Ok(())
    }

    pub fn choose_plan(&mut self, plan: PaymentPlan) -> Result<(), BookingError> {
        self.require_stage(Stage::Payment, "choose a payment plan")?;
        self.session.payment.plan = plan;
        self.refresh_payment()
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), BookingError> {
        self.require_stage(Stage::Payment, "enter a payment method")?;
        self.session.payment.method = Some(method);
        Ok(())
    }

    pub fn guard_failures(&self) -> Vec<GuardFailure> {
        match self.session.stage {
            Stage::Landing => Vec::new(),
            Stage::Configuration => self.configuration_failures(),
            Stage::Scheduling => self.scheduling_failures(),
            Stage::Payment => self.payment_failures(),
        }
    }

    pub fn can_advance(&self) -> bool {
        self.guard_failures().is_empty()
    }

    /// Moves one stage forward, or completes the booking from the payment stage.
    ///
    /// A failed guard is reported as [`Advance::Blocked`] and leaves the stage
    /// untouched. Errors are reserved for catalog problems and payment failures.
    pub fn advance(&mut self) -> Result<Advance, BookingError> {
        let failures = self.guard_failures();
        if !failures.is_empty() {
            tracing::debug!(stage = %self.session.stage, ?failures, "advance blocked");
            return Ok(Advance::Blocked(failures));
        }

        let from = self.session.stage;
        let Some(to) = from.next() else {
            return self.complete().map(|booking| Advance::Completed(Box::new(booking)));
        };

        // Amounts first: a failed refresh must leave the stage where it was.
        self.refresh_payment()?;
        self.session.stage = to;
        tracing::info!(%from, %to, "booking stage advanced");
        Ok(Advance::Moved { from, to })
    }

    /// Steps back one stage without re-validating. Returns false at the landing stage.
    pub fn retreat(&mut self) -> bool {
        let from = self.session.stage;
        match from.previous() {
            Some(to) => {
                self.session.stage = to;
                tracing::info!(%from, %to, "booking stage retreated");
                true
            }
            None => false,
        }
    }

    fn complete(&mut self) -> Result<ConfirmedBooking, BookingError> {
        let quote = self.quote()?;
        let Some(method) = self.session.payment.method.clone() else {
            return Err(BookingError::WrongStage {
                action: "complete the booking",
                expected: Stage::Payment,
                current: self.session.stage,
            });
        };

        let amount = quote.split.amount_due_now;
        let reference = match self.app.gateway.charge(amount, &method) {
            Ok(ChargeOutcome::Approved { reference }) => reference,
            Ok(ChargeOutcome::Declined { reason }) => {
                tracing::warn!(%amount, method = %method.masked(), %reason, "charge declined");
                return Err(BookingError::PaymentDeclined { reason });
            }
            Err(error) => {
                tracing::warn!(%amount, error = %format!("{error:#}"), "payment gateway failed");
                return Err(BookingError::PaymentGateway {
                    message: format!("{error:#}"),
                });
            }
        };

        let booking = ConfirmedBooking {
            configuration: self.session.configuration.clone(),
            appointment: self.session.appointment.clone(),
            plan: quote.plan,
            breakdown: quote.breakdown,
            split: quote.split,
            charge_reference: reference,
        };

        if let Err(error) = self.app.notifier.notify_booking_confirmed(&booking) {
            tracing::warn!(
                reference = %booking.charge_reference,
                error = %format!("{error:#}"),
                "booking notification failed"
            );
        }

        self.session = BookingSession::new();
        tracing::info!(
            reference = %booking.charge_reference,
            charged = %amount,
            "booking completed, session reset"
        );

        Ok(booking)
    }

    fn configuration_failures(&self) -> Vec<GuardFailure> {
        let configuration = &self.session.configuration;
        let mut failures = Vec::new();

        let size = configuration
            .size
            .filter(|inches| self.app.catalog.find_size(*inches).is_ok());
        if size.is_none() {
            failures.push(GuardFailure::MissingSize);
        }

        if !configuration.custom_mount {
            let mount_fits = match (configuration.mount, size) {
                (Some(kind), Some(inches)) => self
                    .app
                    .catalog
                    .find_mount(kind)
                    .is_ok_and(|mount| is_compatible(mount, inches)),
                (Some(kind), None) => self.app.catalog.find_mount(kind).is_ok(),
                (None, _) => false,
            };
            if !mount_fits {
                failures.push(GuardFailure::MissingMount);
            }
        }

        let surface_known = configuration
            .surface
            .is_some_and(|kind| self.app.catalog.find_surface(kind).is_ok());
        if !surface_known {
            failures.push(GuardFailure::MissingSurface);
        }

        failures
    }

    fn scheduling_failures(&self) -> Vec<GuardFailure> {
        let appointment = &self.session.appointment;
        let mut failures = Vec::new();

        match appointment.date {
            None => failures.push(GuardFailure::MissingDate),
            Some(date) => {
                if !is_bookable(date, self.app.clock.today(), self.app.horizon_days) {
                    failures.push(GuardFailure::DateUnavailable);
                }
            }
        }

        if appointment.time.is_none() {
            failures.push(GuardFailure::MissingTime);
        }
        if appointment.name.trim().is_empty() {
            failures.push(GuardFailure::MissingName);
        }
        if appointment.address.trim().is_empty() {
            failures.push(GuardFailure::MissingAddress);
        }
        if appointment.phone.trim().is_empty() {
            failures.push(GuardFailure::MissingPhone);
        }

        failures
    }

    fn payment_failures(&self) -> Vec<GuardFailure> {
        let has_method = self
            .session
            .payment
            .method
            .as_ref()
            .is_some_and(PaymentMethod::is_present);

        if has_method {
            Vec::new()
        } else {
            vec![GuardFailure::MissingPaymentMethod]
        }
    }

    fn require_stage(&self, expected: Stage, action: &'static str) -> Result<(), BookingError> {
        let current = self.session.stage;
        if current == expected {
            Ok(())
        } else {
            Err(BookingError::WrongStage {
                action,
                expected,
                current,
            })
        }
    }

    /// Keeps the derived amounts in step with the configuration and plan.
    fn refresh_payment(&mut self) -> Result<(), BookingError> {
        let payment = &mut self.session.payment;
        match quote(self.app.catalog, &self.session.configuration, payment.plan) {
            Ok(quote) => {
                payment.total_amount = quote.breakdown.total;
                payment.amount_due_now = quote.split.amount_due_now;
            }
            Err(PricingError::Incomplete { .. }) => {
                payment.total_amount = Default::default();
                payment.amount_due_now = Default::default();
            }
            Err(error) => return Err(error.into()),
        }

        tracing::debug!(
            total = %payment.total_amount,
            due_now = %payment.amount_due_now,
            plan = %payment.plan,
            "payment amounts recomputed"
        );
        Ok(())
    }
}
