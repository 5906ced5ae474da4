use roster_core::errors::{ExError, ExErrorKind, RosterError};

#[test]
fn test_employee_not_found_verifiable_by_kind() {
    let err = RosterError::EmployeeNotFound {
        employee_id: "unknown".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::NotFound);
    assert_eq!(ex_err.code(), "ERR_NOT_FOUND");
    assert_eq!(ex_err.entity_id(), Some("unknown"));
}

#[test]
fn test_missing_field_keeps_client_message() {
    let ex_err: ExError = RosterError::MissingRequiredField { field: "email" }.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.message(), "Name and Email are required");
    assert_eq!(ex_err.op(), Some("validate_email"));
}

#[test]
fn test_export_not_found_distinct_from_store_failure() {
    let missing: ExError = RosterError::ExportNotFound {
        path: "/tmp/employee_dataset.xlsx".to_string(),
    }
    .into();
    let store = ExError::new(ExErrorKind::StoreFailure)
        .with_op("scan_all")
        .with_message("database is locked");

    assert_eq!(missing.kind(), ExErrorKind::NotFound);
    assert_eq!(missing.message(), "Excel file not found");
    assert_eq!(store.kind(), ExErrorKind::StoreFailure);
    assert_eq!(store.op(), Some("scan_all"));
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
        (ExErrorKind::StoreFailure, "ERR_STORE_FAILURE"),
        (ExErrorKind::WriteFailure, "ERR_WRITE_FAILURE"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Concurrency, "ERR_CONCURRENCY"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_invalid_salary_is_client_error() {
    let ex_err: ExError = RosterError::InvalidSalary {
        reason: "salary must be finite".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.op(), Some("validate_salary"));
    assert!(ex_err.message().contains("salary must be finite"));
}
