//! Operation lifecycle macros
//!
//! Every operation boundary emits the same three keys (`component`, `op`,
//! `event`) from [`schema`](crate::roster_core_types::schema), followed by
//! whatever fields the call site adds.

#[doc(hidden)]
#[macro_export]
macro_rules! __roster_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use roster_core::log_op_start;
/// log_op_start!("employee_create");
/// log_op_start!("sync_export", commit_ticket = 7u64);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__roster_op_event!(
            info,
            $op,
            $crate::roster_core_types::schema::event::START
            $(, $($field)*)?
        )
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use roster_core::log_op_end;
/// log_op_end!("sync_export", duration_ms = 42u64, row_count = 3usize);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__roster_op_event!(
            info,
            $op,
            $crate::roster_core_types::schema::event::END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Log a failed operation
///
/// `err` is anything convertible into [`ExError`](crate::errors::ExError);
/// its kind, code and rendered message become `err.*` fields.
///
/// # Example
///
/// ```
/// # use roster_core::{log_op_error, errors::RosterError};
/// let err = RosterError::EmployeeNotFound { employee_id: "e1".to_string() };
/// log_op_error!("employee_update", err, duration_ms = 10u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__roster_op_event!(
            error,
            $op,
            $crate::roster_core_types::schema::event::END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = %ex_err
            $(, $($field)*)?
        )
    }};
}
