//! Domain report building.

mod builder;
mod types;

pub use builder::{build_domain_report, AuditContext, ProbeOptions};
pub use types::DomainReport;
