//! Core Kernel - Foundational types for SmartClaim
//!
//! This crate provides the building blocks shared by the domain crates:
//! - Non-negative claim amounts with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - Business dates and clocks
//! - Port traits and errors for external adapters

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Amount, MoneyError, MAX_CLAIM_AMOUNT};
pub use temporal::{
    Clock, FixedClock, SystemClock, Timezone, TemporalError,
    format_form_date, format_title_date,
};
pub use identifiers::{ClaimItemId, ExtractionTicket};
pub use ports::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
pub use error::CoreError;
