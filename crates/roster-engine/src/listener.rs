//! Post-commit mutation hook

use roster_core::model::Employee;

/// Receives store mutations after they have committed
///
/// Implementations must not fail the mutation: by the time a callback runs
/// the change is durable and the caller has a successful result.
pub trait MutationListener: Send + Sync {
    fn on_employee_created(&self, employee: &Employee);

    fn on_employee_updated(&self, employee: &Employee);

    fn on_employee_deleted(&self, employee_id: &str);
}

/// Listener that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl MutationListener for NoopListener {
    fn on_employee_created(&self, _employee: &Employee) {}

    fn on_employee_updated(&self, _employee: &Employee) {}

    fn on_employee_deleted(&self, _employee_id: &str) {}
}
