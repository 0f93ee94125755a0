use std::io::Write;

use anyhow::{Result, bail};
use tvmount_app::{Advance, App, BookingError, GuardFailure, Wizard};
use tvmount_core::catalog::Catalog;
use tvmount_core::clock::format_iso_date;
use tvmount_core::pricing::{PaymentPlan, payment_split};
use tvmount_core::session::{ConfirmedBooking, PaymentMethod, Stage};

use crate::prompt::PromptDriver;
use crate::render::quote_table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Navigation {
    Continue,
    Edit,
    Back,
    Cancel,
}

/// Walks one customer through the four booking stages.
///
/// Returns `None` when the customer declines to start or cancels part way.
pub fn run_booking(
    app: &App<'_>,
    prompt: &mut dyn PromptDriver,
    out: &mut dyn Write,
) -> Result<Option<ConfirmedBooking>> {
    let mut wizard = app.begin_booking();

    loop {
        let stage = wizard.stage();
        if stage != Stage::Landing {
            writeln!(out, "\nStep {} of 4: {}", stage.step_number(), stage.title())?;
        }

        let navigation = match stage {
            Stage::Landing => {
                writeln!(out, "Professional TV wall mounting, booked in four steps.")?;
                if !prompt.confirm("Start a new booking?", true)? {
                    return Ok(None);
                }
                Navigation::Continue
            }
            Stage::Configuration => {
                configure(&mut wizard, app.catalog, prompt, out)?;
                navigate(prompt, "Continue to scheduling")?
            }
            Stage::Scheduling => {
                schedule(&mut wizard, prompt, out)?;
                navigate(prompt, "Continue to payment")?
            }
            Stage::Payment => {
                collect_payment(&mut wizard, prompt, out)?;
                navigate(prompt, "Pay and confirm")?
            }
        };

        match navigation {
            Navigation::Continue => match wizard.advance() {
                Ok(Advance::Moved { .. }) => {}
                Ok(Advance::Blocked(failures)) => print_blocked(out, &failures)?,
                Ok(Advance::Completed(booking)) => {
                    print_confirmation(out, &booking)?;
                    return Ok(Some(*booking));
                }
                Err(BookingError::PaymentDeclined { reason }) => {
                    writeln!(out, "Payment declined: {reason}. Try another payment method.")?;
                }
                Err(BookingError::PaymentGateway { message }) => {
                    writeln!(
                        out,
                        "Payment could not be processed: {message}. Nothing was charged; try again."
                    )?;
                }
                Err(error) => return Err(error.into()),
            },
            Navigation::Edit => {}
            Navigation::Back => {
                wizard.retreat();
            }
            Navigation::Cancel => {
                writeln!(out, "Booking cancelled; nothing was charged.")?;
                return Ok(None);
            }
        }
    }
}

fn navigate(prompt: &mut dyn PromptDriver, forward: &str) -> Result<Navigation> {
    let options = vec![
        forward.to_string(),
        "Change these details".to_string(),
        "Back".to_string(),
        "Cancel booking".to_string(),
    ];
    Ok(match prompt.select("What next?", &options)? {
        0 => Navigation::Continue,
        1 => Navigation::Edit,
        2 => Navigation::Back,
        _ => Navigation::Cancel,
    })
}

fn configure(
    wizard: &mut Wizard<'_>,
    catalog: &Catalog,
    prompt: &mut dyn PromptDriver,
    out: &mut dyn Write,
) -> Result<()> {
    let sizes = catalog.size_classes();
    let size_options: Vec<String> = sizes
        .iter()
        .map(|size| {
            format!(
                "{} TV ({} installation, {})",
                size.label(),
                size.base_price,
                size.weight_range
            )
        })
        .collect();
    let size_index = prompt.select("TV size", &size_options)?;
    if let Some(size) = sizes.get(size_index) {
        wizard.set_size(size.inches)?;
    }

    wizard.set_brand(prompt.input("TV brand (optional)")?)?;

    let mounts = wizard.compatible_mounts();
    if mounts.is_empty() {
        writeln!(
            out,
            "No wall mount we stock fits this TV; please have your own mount ready."
        )?;
    } else {
        let recommended = wizard.recommended_mount();
        let mut options: Vec<String> = mounts
            .iter()
            .map(|mount| {
                let marker = if Some(mount.kind) == recommended {
                    " (recommended)"
                } else {
                    ""
                };
                format!("{}{marker}: {} - {}", mount.name, mount.price, mount.description)
            })
            .collect();
        options.push("I'll provide my own mount".to_string());

        let choice = prompt.select("Wall mount", &options)?;
        match mounts.get(choice) {
            Some(mount) => {
                wizard.set_custom_mount(false)?;
                wizard.select_mount(mount.kind)?;
            }
            None => wizard.set_custom_mount(true)?,
        }
    }

    let surfaces = catalog.surface_types();
    let surface_options: Vec<String> = surfaces
        .iter()
        .map(|surface| format!("{} (+{}): {}", surface.kind, surface.additional_fee, surface.note))
        .collect();
    let surface_index = prompt.select("Wall surface", &surface_options)?;
    if let Some(surface) = surfaces.get(surface_index) {
        wizard.set_surface(surface.kind)?;
    }

    print_quote(wizard, out)
}

fn schedule(wizard: &mut Wizard<'_>, prompt: &mut dyn PromptDriver, out: &mut dyn Write) -> Result<()> {
    let dates = wizard.available_dates();
    if dates.is_empty() {
        bail!("no bookable dates in the scheduling window");
    }
    let date_options: Vec<String> = dates.iter().map(|date| date.label.clone()).collect();
    let date_index = prompt.select("Appointment date", &date_options)?;
    if let Some(available) = dates.get(date_index) {
        wizard.set_date(available.date)?;
    }

    let slots = wizard.time_slots();
    let slot_options: Vec<String> = slots.iter().map(|slot| slot.label()).collect();
    let slot_index = prompt.select("Time slot", &slot_options)?;
    if let Some(slot) = slots.get(slot_index) {
        wizard.set_time_slot(*slot)?;
    }

    wizard.set_name(prompt.input("Full name")?)?;
    wizard.set_phone(prompt.input("Phone number")?)?;
    wizard.set_address(prompt.input("Installation address")?)?;
    wizard.set_notes(prompt.input("Notes for the technician (optional)")?)?;

    let appointment = &wizard.session().appointment;
    if let (Some(date), Some(slot)) = (appointment.date, appointment.time) {
        writeln!(out, "Appointment: {} at {slot}", format_iso_date(date))?;
    }
    Ok(())
}

fn collect_payment(
    wizard: &mut Wizard<'_>,
    prompt: &mut dyn PromptDriver,
    out: &mut dyn Write,
) -> Result<()> {
    let total = wizard.session().payment.total_amount;
    let plan_options: Vec<String> = PaymentPlan::ALL
        .iter()
        .map(|plan| {
            let split = payment_split(total, *plan);
            match plan {
                PaymentPlan::Full => format!("{}: {} now", plan.title(), split.amount_due_now),
                PaymentPlan::Downpayment => format!(
                    "{}: {} now, {} at installation",
                    plan.title(),
                    split.amount_due_now,
                    split.remaining
                ),
            }
        })
        .collect();
    let plan_index = prompt.select("Payment plan", &plan_options)?;
    if let Some(plan) = PaymentPlan::ALL.get(plan_index) {
        wizard.choose_plan(*plan)?;
    }

    let token = prompt.input("Card token")?;
    wizard.set_payment_method(PaymentMethod::new(token))?;

    print_quote(wizard, out)
}

fn print_quote(wizard: &Wizard<'_>, out: &mut dyn Write) -> Result<()> {
    let quote = wizard.quote()?;
    let mount_label = capitalize(&wizard.session().configuration.mount_description());
    writeln!(out, "{}", quote_table(&quote, &mount_label))?;
    Ok(())
}

fn print_blocked(out: &mut dyn Write, failures: &[GuardFailure]) -> Result<()> {
    writeln!(out, "Cannot continue yet:")?;
    for failure in failures {
        writeln!(out, "  - {failure}")?;
    }
    Ok(())
}

fn print_confirmation(out: &mut dyn Write, booking: &ConfirmedBooking) -> Result<()> {
    writeln!(out, "\nBooking confirmed (reference {}).", booking.charge_reference)?;
    writeln!(
        out,
        "Charged {} today; {} due at installation.",
        booking.split.amount_due_now, booking.split.remaining
    )?;
    if let (Some(date), Some(slot)) = (booking.appointment.date, booking.appointment.time) {
        writeln!(
            out,
            "Technician visit: {} at {slot}, {}.",
            format_iso_date(date),
            booking.appointment.address
        )?;
    }
    Ok(())
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use time::{Date, Month};
    use tvmount_core::catalog::Catalog;
    use tvmount_core::clock::FixedClock;
    use tvmount_core::money::Money;
    use tvmount_core::notifier::LogNotifier;
    use tvmount_core::payment_gateway::{ChargeOutcome, MockPaymentGateway, PaymentGateway};

    use super::*;
    use crate::prompt::{ScriptedPromptDriver, ScriptedPromptResponse};

    use ScriptedPromptResponse::{Confirm, Input, Select};

    fn input(value: &str) -> ScriptedPromptResponse {
        Input(value.to_string())
    }

    fn monday() -> Date {
        Date::from_calendar_date(2026, Month::March, 2).expect("date")
    }

    fn sixty_five_inch_tilting() -> Vec<ScriptedPromptResponse> {
        vec![Select(3), input("Sony"), Select(1), Select(0), Select(0)]
    }

    fn appointment(name: &str) -> Vec<ScriptedPromptResponse> {
        vec![
            Select(0),
            Select(1),
            input(name),
            input("555-0100"),
            input("12 Elm Street"),
            input(""),
        ]
    }

    /// Fails the first charge as if the processor timed out, then approves.
    #[derive(Default)]
    struct TimeoutOnceGateway {
        calls: AtomicU32,
    }

    impl PaymentGateway for TimeoutOnceGateway {
        fn charge(&self, _amount: Money, _method: &PaymentMethod) -> anyhow::Result<ChargeOutcome> {
            if self.calls.fetch_add(1, Ordering::Relaxed) == 0 {
                return Err(anyhow::anyhow!("gateway timeout"));
            }
            Ok(ChargeOutcome::Approved {
                reference: "ch_after_timeout".to_string(),
            })
        }
    }

    type FlowOutcome = (Result<Option<ConfirmedBooking>>, String, usize);

    fn run(responses: Vec<ScriptedPromptResponse>) -> FlowOutcome {
        run_with_gateway(responses, &MockPaymentGateway::new())
    }

    fn run_with_gateway(
        responses: Vec<ScriptedPromptResponse>,
        gateway: &dyn PaymentGateway,
    ) -> FlowOutcome {
        let catalog = Catalog::standard();
        let clock = FixedClock::new(monday());
        let notifier = LogNotifier::new();
        let app = App::new(&catalog, &clock, &notifier, gateway);

        let mut prompt = ScriptedPromptDriver::new(responses);
        let mut out = Vec::new();
        let result = run_booking(&app, &mut prompt, &mut out);
        (
            result,
            String::from_utf8(out).expect("utf8 output"),
            prompt.remaining(),
        )
    }

    #[test]
    fn books_a_sixty_five_inch_tv_with_a_deposit() {
        let mut responses = vec![Confirm(true)];
        responses.extend(sixty_five_inch_tilting());
        responses.extend(appointment("Jane Doe"));
        responses.push(Select(0));
        responses.extend([Select(0), input("tok_visa_4242"), Select(0)]);

        let (result, output, remaining) = run(responses);
        let booking = result.expect("flow").expect("booking");

        assert_eq!(remaining, 0);
        assert_eq!(booking.charge_reference, "mock-000001");
        assert_eq!(booking.configuration.size, Some(65));
        assert_eq!(booking.configuration.brand, "Sony");
        assert_eq!(booking.breakdown.total, Money::new(258));
        assert_eq!(booking.split.amount_due_now, Money::new(65));
        assert_eq!(booking.split.remaining, Money::new(193));
        assert_eq!(
            booking.appointment.date,
            Some(Date::from_calendar_date(2026, Month::March, 3).expect("date"))
        );
        assert_eq!(booking.appointment.notes, None);
        assert!(output.contains("Step 2 of 4: Configure your TV setup"));
        assert!(output.contains("Tilting wall mount"));
        assert!(output.contains("Charged $65 today; $193 due at installation."));
    }

    #[test]
    fn missing_name_blocks_until_corrected_then_cancel_charges_nothing() {
        let mut responses = vec![Confirm(true)];
        responses.extend(sixty_five_inch_tilting());
        responses.extend(appointment("  "));
        responses.push(Select(0));
        responses.extend(appointment("Jane Doe"));
        responses.push(Select(0));
        responses.extend([Select(1), input("tok_visa_4242"), Select(3)]);

        let (result, output, remaining) = run(responses);

        assert_eq!(result.expect("flow"), None);
        assert_eq!(remaining, 0);
        assert!(output.contains("Cannot continue yet:\n  - enter your full name"));
        assert!(output.contains("Booking cancelled; nothing was charged."));
    }

    #[test]
    fn declined_card_asks_for_payment_again() {
        let mut responses = vec![Confirm(true)];
        responses.extend(sixty_five_inch_tilting());
        responses.extend(appointment("Jane Doe"));
        responses.push(Select(0));
        responses.extend([Select(1), input("decline-0002"), Select(0)]);
        responses.extend([Select(1), input("tok_visa_4242"), Select(0)]);

        let (result, output, _) = run(responses);
        let booking = result.expect("flow").expect("booking");

        assert!(output.contains("Payment declined: card ****0002 was declined."));
        assert_eq!(booking.plan, PaymentPlan::Full);
        assert_eq!(booking.split.amount_due_now, Money::new(258));
        assert_eq!(booking.charge_reference, "mock-000001");
    }

    #[test]
    fn custom_mount_option_skips_mount_price() {
        let mut responses = vec![Confirm(true)];
        responses.extend([Select(0), input(""), Select(3), Select(1), Select(3)]);

        let (result, output, _) = run(responses);

        assert_eq!(result.expect("flow"), None);
        assert!(output.contains("Customer-provided mount"));
        assert!(output.contains("$149"));
    }

    #[test]
    fn declining_to_start_returns_nothing() {
        let (result, _, remaining) = run(vec![Confirm(false)]);
        assert_eq!(result.expect("flow"), None);
        assert_eq!(remaining, 0);
    }

    #[test]
    fn gateway_failure_keeps_the_booking_open_for_a_retry() {
        let mut responses = vec![Confirm(true)];
        responses.extend(sixty_five_inch_tilting());
        responses.extend(appointment("Jane Doe"));
        responses.push(Select(0));
        responses.extend([Select(0), input("tok_visa_4242"), Select(0)]);
        responses.extend([Select(0), input("tok_visa_4242"), Select(0)]);

        let gateway = TimeoutOnceGateway::default();
        let (result, output, remaining) = run_with_gateway(responses, &gateway);
        let booking = result.expect("flow").expect("booking");

        assert_eq!(remaining, 0);
        assert_eq!(gateway.calls.load(Ordering::Relaxed), 2);
        assert!(output.contains("Payment could not be processed: gateway timeout."));
        assert_eq!(booking.charge_reference, "ch_after_timeout");
        assert_eq!(booking.appointment.name, "Jane Doe");
        assert_eq!(booking.split.amount_due_now, Money::new(65));
    }
}
