use std::fmt;
use std::path::Path;

use crate::catalog::Catalog;
use crate::compatibility::compatible_mounts;
use crate::config::{load_config, resolve_config_path};
use crate::money::Money;
use crate::pricing::{PaymentPlan, payment_split, price_breakdown};
use crate::session::TvConfiguration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Pass,
    Fail,
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCheck {
    pub name: String,
    pub state: CheckState,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    pub checks: Vec<DoctorCheck>,
}

impl DoctorReport {
    pub fn has_failures(&self) -> bool {
        self.checks
            .iter()
            .any(|check| check.state == CheckState::Fail)
    }

    pub fn summary(&self) -> String {
        let passed = self
            .checks
            .iter()
            .filter(|check| check.state == CheckState::Pass)
            .count();
        let failed = self.checks.len().saturating_sub(passed);
        format!("{passed} passed, {failed} failed")
    }
}

pub fn run_doctor() -> DoctorReport {
    match resolve_config_path() {
        Ok(path) => run_doctor_at(&path),
        Err(error) => {
            let mut checks = vec![fail_check("config path resolves", error.to_string())];
            push_skipped_checks(
                &mut checks,
                &["config parses and validates"],
                "config path could not be resolved",
            );
            checks.extend(check_catalog(&Catalog::standard()));
            DoctorReport { checks }
        }
    }
}

pub fn run_doctor_at(config_path: &Path) -> DoctorReport {
    let mut checks = Vec::new();

    if !config_path.exists() {
        checks.push(pass_check(
            "config file",
            format!(
                "no file at {}, using the standard catalog",
                config_path.display()
            ),
        ));
        checks.push(pass_check("config parses and validates", "defaults apply"));
        checks.extend(check_catalog(&Catalog::standard()));
        return DoctorReport { checks };
    }

    checks.push(pass_check(
        "config file",
        format!("found at {}", config_path.display()),
    ));

    match load_config(config_path) {
        Ok(config) => {
            checks.push(pass_check("config parses and validates", "config is valid"));
            checks.extend(check_catalog(&config.catalog()));
        }
        Err(error) => {
            checks.push(fail_check("config parses and validates", error.to_string()));
            push_skipped_checks(
                &mut checks,
                &[
                    "every size has a compatible mount",
                    "default booking prices",
                    "deposit never under-collects",
                ],
                "config is invalid",
            );
        }
    }

    DoctorReport { checks }
}

pub fn check_catalog(catalog: &Catalog) -> Vec<DoctorCheck> {
    vec![
        check_compatible_coverage(catalog),
        check_default_booking_prices(catalog),
        check_deposit_rounding(catalog),
    ]
}

fn check_compatible_coverage(catalog: &Catalog) -> DoctorCheck {
    let uncovered: Vec<String> = catalog
        .size_classes()
        .iter()
        .filter(|size| compatible_mounts(catalog, size.inches).is_empty())
        .map(|size| size.label())
        .collect();

    if uncovered.is_empty() {
        pass_check(
            "every size has a compatible mount",
            format!("{} sizes covered", catalog.size_classes().len()),
        )
    } else {
        fail_check(
            "every size has a compatible mount",
            format!(
                "customers must bring their own mount for: {}",
                uncovered.join(", ")
            ),
        )
    }
}

fn check_default_booking_prices(catalog: &Catalog) -> DoctorCheck {
    match price_breakdown(catalog, &TvConfiguration::default()) {
        Ok(breakdown) => pass_check(
            "default booking prices",
            format!("default configuration totals {}", breakdown.total),
        ),
        Err(error) => fail_check("default booking prices", error.to_string()),
    }
}

fn check_deposit_rounding(catalog: &Catalog) -> DoctorCheck {
    let mut totals: Vec<Money> = Vec::new();
    for size in catalog.size_classes() {
        for mount in catalog.mount_types() {
            for surface in catalog.surface_types() {
                totals.push(size.base_price + mount.price + surface.additional_fee);
                totals.push(size.base_price + surface.additional_fee);
            }
        }
    }

    let short = totals.iter().find(|total| {
        let split = payment_split(**total, PaymentPlan::Downpayment);
        split.amount_due_now + split.remaining != **total
            || u64::from(split.amount_due_now.units()) * 4 < u64::from(total.units())
    });

    match short {
        None => pass_check(
            "deposit never under-collects",
            format!("{} price combinations checked", totals.len()),
        ),
        Some(total) => fail_check(
            "deposit never under-collects",
            format!("deposit for {total} does not cover a quarter of the total"),
        ),
    }
}

fn pass_check(name: &str, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        state: CheckState::Pass,
        details: details.into(),
    }
}

fn fail_check(name: &str, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        state: CheckState::Fail,
        details: details.into(),
    }
}

fn skipped_check(name: &str, reason: &str) -> DoctorCheck {
    fail_check(name, format!("skipped because {reason}"))
}

fn push_skipped_checks(checks: &mut Vec<DoctorCheck>, names: &[&str], reason: &str) {
    checks.extend(
        names
            .iter()
            .copied()
            .map(|name| skipped_check(name, reason)),
    );
}
