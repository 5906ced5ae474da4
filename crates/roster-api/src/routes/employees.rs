//! `/api/employees` handlers

use crate::error::ApiError;
use crate::routes::blocking;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roster_core::model::{Employee, EmployeePatch, NewEmployee};
use roster_engine::commands::employee_query::{employee_get, employee_list};
use roster_engine::{apply_employee_command, EmployeeCommand};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = blocking(move || employee_list(state.store.as_ref())).await?;
    Ok(Json(employees))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    let employee = blocking(move || employee_get(state.store.as_ref(), &id)).await?;
    Ok(Json(employee))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewEmployee>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let Json(new) = body?;
    let result = blocking(move || {
        apply_employee_command(
            EmployeeCommand::Create(new),
            state.store.as_ref(),
            state.listener.as_ref(),
        )
    })
    .await?;
    Ok((StatusCode::CREATED, Json(result.employee().clone())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<EmployeePatch>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Json(patch) = body?;
    let result = blocking(move || {
        apply_employee_command(
            EmployeeCommand::Update { id, patch },
            state.store.as_ref(),
            state.listener.as_ref(),
        )
    })
    .await?;
    Ok(Json(result.employee().clone()))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    blocking(move || {
        apply_employee_command(
            EmployeeCommand::Delete { id },
            state.store.as_ref(),
            state.listener.as_ref(),
        )
    })
    .await?;
    Ok(Json(MessageBody {
        message: "Employee deleted",
    }))
}
