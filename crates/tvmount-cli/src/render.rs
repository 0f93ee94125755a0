use comfy_table::{Cell, ContentArrangement, Table};
use tvmount_core::availability::{AvailableDate, TimeSlot};
use tvmount_core::catalog::{Catalog, MountKind, WallMountType};
use tvmount_core::clock::format_iso_date;
use tvmount_core::doctor::{CheckState, DoctorReport};
use tvmount_core::pricing::{PaymentPlan, Quote};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

pub fn size_table(catalog: &Catalog) -> Table {
    let mut table = new_table(vec!["Size", "Installation", "Typical weight"]);
    for size in catalog.size_classes() {
        table.add_row(vec![
            Cell::new(size.label()),
            Cell::new(size.base_price),
            Cell::new(size.weight_range.as_str()),
        ]);
    }
    table
}

pub fn mount_table(mounts: &[&WallMountType], recommended: Option<MountKind>) -> Table {
    let mut table = new_table(vec![
        "Mount",
        "Kind",
        "Price",
        "Max size",
        "Max weight",
        "Description",
    ]);
    for mount in mounts {
        let name = if Some(mount.kind) == recommended {
            format!("{} (recommended)", mount.name)
        } else {
            mount.name.clone()
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(mount.kind),
            Cell::new(mount.price),
            Cell::new(format!("{}\"", mount.max_size)),
            Cell::new(format!("{} lbs", mount.max_weight_lbs)),
            Cell::new(mount.description.as_str()),
        ]);
    }
    table
}

pub fn surface_table(catalog: &Catalog) -> Table {
    let mut table = new_table(vec!["Surface", "Additional fee", "Note"]);
    for surface in catalog.surface_types() {
        table.add_row(vec![
            Cell::new(surface.kind),
            Cell::new(surface.additional_fee),
            Cell::new(surface.note.as_str()),
        ]);
    }
    table
}

pub fn quote_table(quote: &Quote, mount_label: &str) -> Table {
    let breakdown = &quote.breakdown;
    let mut table = new_table(vec!["Item", "Amount"]);
    table.add_row(vec![Cell::new("Installation"), Cell::new(breakdown.installation)]);
    table.add_row(vec![Cell::new(mount_label), Cell::new(breakdown.mount)]);
    table.add_row(vec![Cell::new("Surface fee"), Cell::new(breakdown.surface_fee)]);
    table.add_row(vec![Cell::new("Total"), Cell::new(breakdown.total)]);
    table.add_row(vec![
        Cell::new(format!("Due now ({})", quote.plan.title())),
        Cell::new(quote.split.amount_due_now),
    ]);
    if quote.plan == PaymentPlan::Downpayment {
        table.add_row(vec![
            Cell::new("Due at installation"),
            Cell::new(quote.split.remaining),
        ]);
    }
    table
}

pub fn availability_table(dates: &[AvailableDate]) -> Table {
    let mut table = new_table(vec!["Date", "Day"]);
    for available in dates {
        table.add_row(vec![
            Cell::new(format_iso_date(available.date)),
            Cell::new(available.label.as_str()),
        ]);
    }
    table
}

pub fn time_slot_table(slots: &[TimeSlot]) -> Table {
    let mut table = new_table(vec!["Time slot"]);
    for slot in slots {
        table.add_row(vec![Cell::new(slot.label())]);
    }
    table
}

pub fn doctor_table(report: &DoctorReport) -> Table {
    let mut table = new_table(vec!["Check", "Status", "Details"]);
    for check in &report.checks {
        let status = match check.state {
            CheckState::Pass => "PASS",
            CheckState::Fail => "FAIL",
        };

        table.add_row(vec![
            Cell::new(check.name.as_str()),
            Cell::new(status),
            Cell::new(check.details.as_str()),
        ]);
    }
    table
}
