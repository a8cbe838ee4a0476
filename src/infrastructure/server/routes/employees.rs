use super::super::dto::ErrorResponse;
use super::super::error::ApiError;
use super::super::state::ServerState;
use crate::domain::employee::Employee;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::info;

#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "employees",
    request_body = Employee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Body is not a valid employee", body = ErrorResponse),
        (status = 409, description = "Employee id already in use", body = ErrorResponse)
    )
)]
pub async fn create_employee(
    State(state): State<Arc<ServerState>>,
    employee: Result<Json<Employee>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let Json(employee) = employee?;
    let created = state.employees().create(employee).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "employees",
    responses((status = 200, description = "All employees", body = [Employee]))
)]
pub async fn list_employees(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = state.employees().list().await?;
    info!(count = employees.len(), "Retrieved employees");
    Ok(Json(employees))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "employees",
    params(("id" = String, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    )
)]
pub async fn get_employee(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    Ok(Json(state.employees().get(&id).await?))
}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = "employees",
    params(("id" = String, Path, description = "Employee id")),
    request_body = Employee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Body is malformed or path and body ids differ", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    )
)]
pub async fn update_employee(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    employee: Result<Json<Employee>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Json(employee) = employee?;
    Ok(Json(state.employees().update(&id, employee).await?))
}

#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "employees",
    params(("id" = String, Path, description = "Employee id")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    )
)]
pub async fn delete_employee(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.employees().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
