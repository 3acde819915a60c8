//! Claims Capture Domain
//!
//! This crate covers everything between a receipt photo and a confirmed
//! expense claim: the extraction port, the verify form, the capture state
//! machine, and the ordered claim store with its running totals.
//!
//! # Capture Flow
//!
//! ```text
//! Idle -> Processing -> Awaiting Confirmation -> Idle (claim appended)
//!   \______ manual entry ______/
//! ```

pub mod claim;
pub mod store;
pub mod totals;
pub mod extraction;
pub mod ports;
pub mod form;
pub mod capture;
pub mod session;
pub mod error;

pub use claim::{ClaimItem, NewClaimItem, PaymentMethod};
pub use store::ClaimStore;
pub use totals::PaymentTotals;
pub use extraction::{ExtractedReceiptData, ReceiptImage};
pub use ports::{ReceiptExtractionPort, ReceiptExtractionPortExt};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockReceiptExtractor;
pub use form::ClaimForm;
pub use capture::{CaptureFlow, CapturePhase, CaptureState};
pub use session::{ClaimSession, SessionContext};
pub use error::ClaimError;
