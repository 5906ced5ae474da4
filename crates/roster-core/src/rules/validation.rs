use crate::errors::{Result, RosterError};
use crate::model::{EmployeePatch, NewEmployee};

fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

fn check_salary(salary: Option<f64>) -> Result<()> {
    match salary {
        Some(value) if !value.is_finite() => Err(RosterError::InvalidSalary {
            reason: format!("{} is not a finite number", value),
        }),
        _ => Ok(()),
    }
}

/// Validate a creation payload
///
/// # Errors
/// `MissingRequiredField` when `name` or `email` is absent or blank,
/// `InvalidSalary` when the salary is NaN or infinite.
pub fn validate_new_employee(new: &NewEmployee) -> Result<()> {
    if is_blank(new.name.as_deref()) {
        return Err(RosterError::MissingRequiredField { field: "name" });
    }
    if is_blank(new.email.as_deref()) {
        return Err(RosterError::MissingRequiredField { field: "email" });
    }
    check_salary(new.salary)
}

/// Validate a patch
///
/// A patch may omit `name`/`email` but may not blank or null them.
///
/// # Errors
/// Same taxonomy as [`validate_new_employee`].
pub fn validate_patch(patch: &EmployeePatch) -> Result<()> {
    if let Some(name) = &patch.name {
        if is_blank(name.as_deref()) {
            return Err(RosterError::MissingRequiredField { field: "name" });
        }
    }
    if let Some(email) = &patch.email {
        if is_blank(email.as_deref()) {
            return Err(RosterError::MissingRequiredField { field: "email" });
        }
    }
    check_salary(patch.salary.flatten())
}
