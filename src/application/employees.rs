//! Employee records over the document store.

use crate::domain::employee::{EMPLOYEE_COLLECTION, Employee};
use crate::infrastructure::store::{DocumentStore, Filter, StoreError, filter_eq};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

const ID_FIELD: &str = "employeeId";

#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("employee '{0}' not found")]
    NotFound(String),
    #[error("employee '{0}' already exists")]
    Conflict(String),
    #[error("employee id '{body}' in body does not match '{path}' in path")]
    IdMismatch { path: String, body: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EmployeeError {
    pub fn user_message(&self) -> String {
        match self {
            EmployeeError::NotFound(_) => "Employee not found".to_string(),
            EmployeeError::Conflict(_) => "Employee already exists".to_string(),
            EmployeeError::IdMismatch { .. } => {
                "ID in URL does not match ID in request body".to_string()
            }
            EmployeeError::Store(_) => "Failed to access employee records".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn DocumentStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn by_id(id: &str) -> Filter {
        filter_eq(ID_FIELD, id)
    }

    pub async fn create(&self, employee: Employee) -> Result<Employee, EmployeeError> {
        let filter = Self::by_id(&employee.employee_id);
        let Some(inserted) = self
            .store
            .insert_unique(EMPLOYEE_COLLECTION, &filter, encode(&employee)?)
            .await?
        else {
            return Err(EmployeeError::Conflict(employee.employee_id));
        };
        info!(
            employee_id = employee.employee_id.as_str(),
            document = inserted.inserted_id.as_str(),
            "Employee created"
        );
        Ok(employee)
    }

    pub async fn list(&self) -> Result<Vec<Employee>, EmployeeError> {
        let documents = self
            .store
            .find_many(EMPLOYEE_COLLECTION, &Filter::new())
            .await?;
        let employees = documents
            .into_iter()
            .map(decode)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = employees.len(), "Employees listed");
        Ok(employees)
    }

    pub async fn get(&self, id: &str) -> Result<Employee, EmployeeError> {
        let document = self
            .store
            .find_one(EMPLOYEE_COLLECTION, &Self::by_id(id))
            .await?
            .ok_or_else(|| EmployeeError::NotFound(id.to_string()))?;
        Ok(decode(document)?)
    }

    /// Replace the record stored under `id` with `employee`.
    pub async fn update(&self, id: &str, employee: Employee) -> Result<Employee, EmployeeError> {
        if employee.employee_id != id {
            return Err(EmployeeError::IdMismatch {
                path: id.to_string(),
                body: employee.employee_id,
            });
        }
        let Value::Object(fields) = encode(&employee)? else {
            return Err(StoreError::NotAnObject {
                collection: EMPLOYEE_COLLECTION.to_string(),
            }
            .into());
        };
        let result = self
            .store
            .update_one(EMPLOYEE_COLLECTION, &Self::by_id(id), fields)
            .await?;
        if result.matched == 0 {
            return Err(EmployeeError::NotFound(id.to_string()));
        }
        info!(employee_id = id, modified = result.modified, "Employee updated");
        Ok(employee)
    }

    pub async fn delete(&self, id: &str) -> Result<(), EmployeeError> {
        let result = self
            .store
            .delete_one(EMPLOYEE_COLLECTION, &Self::by_id(id))
            .await?;
        if result.deleted == 0 {
            return Err(EmployeeError::NotFound(id.to_string()));
        }
        info!(employee_id = id, "Employee deleted");
        Ok(())
    }
}

fn encode(employee: &Employee) -> Result<Value, StoreError> {
    serde_json::to_value(employee).map_err(|source| StoreError::Encode {
        collection: EMPLOYEE_COLLECTION.to_string(),
        source,
    })
}

fn decode(document: Value) -> Result<Employee, StoreError> {
    serde_json::from_value(document).map_err(|source| StoreError::Decode {
        collection: EMPLOYEE_COLLECTION.to_string(),
        source,
    })
}
