//! Field keys and event names shared by every log line
//!
//! The logging macros and the test capture layer both read these, so a
//! rename here is a rename everywhere.

/// Structured field keys
pub mod field {
    /// Module path of the emitting code
    pub const COMPONENT: &str = "component";
    /// Operation name, e.g. `employee_create`, `sync_export`
    pub const OP: &str = "op";
    /// Lifecycle marker, one of [`super::event`]
    pub const EVENT: &str = "event";
    pub const DURATION_MS: &str = "duration_ms";
    pub const REQUEST_ID: &str = "request_id";

    pub const EMPLOYEE_ID: &str = "employee_id";

    pub const ROW_COUNT: &str = "row_count";
    /// Commit ticket the written artifact covers
    pub const EXPORT_VERSION: &str = "export_version";
    pub const COMMIT_TICKET: &str = "commit_ticket";

    pub const ERR_KIND: &str = "err.kind";
    pub const ERR_CODE: &str = "err.code";
    pub const ERR_MESSAGE: &str = "err.message";
}

/// Operation lifecycle events
pub mod event {
    pub const START: &str = "start";
    pub const END: &str = "end";
    pub const END_ERROR: &str = "end_error";
}
