use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Employee - a single record in the roster
///
/// `name` and `email` are non-empty for every record held by a store; the
/// creation and patch validators in [`crate::rules::validation`] enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Store-assigned identifier (UUID v7), immutable and never exported
    pub id: String,

    pub name: String,

    pub email: String,

    #[serde(default)]
    pub position: Option<String>,

    #[serde(default)]
    pub department: Option<String>,

    #[serde(default)]
    pub salary: Option<f64>,
}

impl Employee {
    /// Materialize a creation payload under a store-assigned id
    ///
    /// The payload must already have passed `validate_new_employee`.
    pub fn from_new(id: String, new: NewEmployee) -> Self {
        Self {
            id,
            name: new.name.unwrap_or_default(),
            email: new.email.unwrap_or_default(),
            position: new.position,
            department: new.department,
            salary: new.salary,
        }
    }

    /// Apply a validated patch in place
    ///
    /// Absent fields are left untouched; `Some(None)` clears an optional field.
    pub fn apply_patch(&mut self, patch: &EmployeePatch) {
        if let Some(Some(name)) = &patch.name {
            self.name = name.clone();
        }
        if let Some(Some(email)) = &patch.email {
            self.email = email.clone();
        }
        if let Some(position) = &patch.position {
            self.position = position.clone();
        }
        if let Some(department) = &patch.department {
            self.department = department.clone();
        }
        if let Some(salary) = patch.salary {
            self.salary = salary;
        }
    }
}

/// Generate a fresh employee id
pub fn new_employee_id() -> String {
    Uuid::now_v7().to_string()
}

/// Creation payload
///
/// `name` and `email` are optional at the type level so that a request body
/// missing them reaches validation (and its error message) instead of
/// failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
}

impl NewEmployee {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_salary(mut self, salary: f64) -> Self {
        self.salary = Some(salary);
        self
    }
}

/// Partial update
///
/// Outer `None` = field absent from the request; `Some(None)` = explicit
/// `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeePatch {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub department: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub salary: Option<Option<f64>>,
}

impl EmployeePatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(Some(name.into()));
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(Some(email.into()));
        self
    }

    pub fn position(mut self, position: Option<String>) -> Self {
        self.position = Some(position);
        self
    }

    pub fn department(mut self, department: Option<String>) -> Self {
        self.department = Some(department);
        self
    }

    pub fn salary(mut self, salary: Option<f64>) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.position.is_none()
            && self.department.is_none()
            && self.salary.is_none()
    }
}

// A present key (even `null`) deserializes to `Some(..)`; a missing key falls
// back to `#[serde(default)]`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
