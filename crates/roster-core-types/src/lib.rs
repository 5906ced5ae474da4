//! Types shared by the Roster logging, error and HTTP layers
//!
//! - [`RequestId`] for request correlation
//! - [`schema`] field keys and lifecycle event names

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
