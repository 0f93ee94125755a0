pub mod availability;
pub mod catalog;
pub mod clock;
pub mod compatibility;
pub mod config;
pub mod doctor;
pub mod money;
pub mod notifier;
pub mod payment_gateway;
pub mod pricing;
pub mod session;
