//! # Valuebridge Baseline Resolver
//!
//! Upstream extraction hands us figures under whatever names the accounts used
//! (`turnover` or `revenue`, `cash_at_bank` or `cash`), and sometimes not at all.
//! This crate owns every "try A, else B, else derive from C" rule so the engine
//! crates only ever see a resolved `BaselineMetrics`.
//!
//! Each resolved field records where it came from, so a report can say which
//! figures were supplied and which were derived or estimated.

pub mod error;
pub mod provenance;
pub mod raw;
pub mod resolver;

pub use error::ResolverError;
pub use provenance::{FieldProvenance, Provenance};
pub use raw::RawFinancials;
pub use resolver::{BaselineResolver, ResolvedBaseline};
