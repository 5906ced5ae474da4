//! Structured logging for Roster
//!
//! - [`init`] installs the process-wide subscriber for a [`Profile`]
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` mark operation
//!   boundaries with the canonical `component`/`op`/`event` fields
//! - [`test_capture`] records events in memory for assertions
//!
//! Boundary events belong to the engine and HTTP layers. Stores log at
//! `debug` only.
//!
//! ```rust
//! use roster_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
