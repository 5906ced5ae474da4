use thiserror::Error;

/// Result type alias using RosterError
pub type Result<T> = std::result::Result<T, RosterError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used by tests, log assertions and
/// the HTTP error body. The HTTP layer maps kinds to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    NotFound,

    // Record store
    /// A store mutation or full scan failed
    StoreFailure,

    // Export
    /// Persisting the export artifact failed; the previous artifact is intact
    WriteFailure,

    // Integration/IO
    Io,
    Serialization,
    Concurrency,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::StoreFailure => "ERR_STORE_FAILURE",
            ExErrorKind::WriteFailure => "ERR_WRITE_FAILURE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus context for
/// debugging. Built with the `with_*` methods.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for Roster operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    /// Employee not found in the record store
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound { employee_id: String },

    /// Name or email missing or blank
    #[error("Name and Email are required")]
    MissingRequiredField { field: &'static str },

    /// Salary is not a finite number
    #[error("Invalid salary: {reason}")]
    InvalidSalary { reason: String },

    /// The export artifact has never been written
    #[error("Excel file not found")]
    ExportNotFound { path: String },
}

/// Conversion from RosterError to ExError
impl From<RosterError> for ExError {
    fn from(err: RosterError) -> Self {
        let message = err.to_string();
        match err {
            RosterError::EmployeeNotFound { employee_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(employee_id)
                .with_message("Employee not found"),

            RosterError::MissingRequiredField { field } => ExError::new(ExErrorKind::InvalidInput)
                .with_op(format!("validate_{}", field))
                .with_message(message),

            RosterError::InvalidSalary { .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("validate_salary")
                .with_message(message),

            RosterError::ExportNotFound { path } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(path)
                .with_op("open_export")
                .with_message(message),
        }
    }
}
