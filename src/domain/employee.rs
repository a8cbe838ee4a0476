//! Employee records as stored in the `Employee` collection.
//!
//! Field names follow the camelCase document layout used by the chat front
//! end and the seeded collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const EMPLOYEE_COLLECTION: &str = "Employee";
pub const JOB_COLLECTION: &str = "Job";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_name: Option<String>,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub social_security_number: String,
    #[serde(default)]
    pub personal_details: Option<PersonalDetails>,
    #[serde(default)]
    pub job_history: Vec<JobHistory>,
    #[serde(default)]
    pub status_history: Vec<StatusHistory>,
    #[serde(default)]
    pub compensation_details: Vec<CompensationDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_gender: Option<String>,
    pub date_of_birth: DateTime<Utc>,
    pub gender: String,
    pub marital_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
    pub address: Address,
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub relation: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobHistory {
    pub job_id: String,
    pub title: String,
    pub department: String,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub location: String,
    pub employment_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<Manager>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistory {
    pub status: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompensationDetails {
    pub effective_date: DateTime<Utc>,
    pub salary: f64,
    pub currency: String,
    pub pay_frequency: String,
    #[serde(default)]
    pub bonuses: i64,
    #[serde(default)]
    pub allowances: Vec<Allowance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Allowance {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
}

impl Employee {
    pub fn full_name(&self) -> String {
        let first = self.preferred_name.as_deref().unwrap_or(&self.first_name);
        format!("{first} {}", self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_minimal_document() {
        let raw = r#"{
            "employeeId": "E-100",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com"
        }"#;
        let employee: Employee = serde_json::from_str(raw).expect("valid employee");
        assert_eq!(employee.employee_id, "E-100");
        assert!(employee.job_history.is_empty());
        assert_eq!(employee.full_name(), "Ada Lovelace");
    }

    #[test]
    fn preferred_name_wins_in_full_name() {
        let raw = r#"{
            "employeeId": "E-7",
            "preferredName": "Bob",
            "firstName": "Robert",
            "lastName": "Tables",
            "email": "bob@example.com",
            "statusHistory": [{"status": "active", "date": "2024-01-02T00:00:00Z"}]
        }"#;
        let employee: Employee = serde_json::from_str(raw).expect("valid employee");
        assert_eq!(employee.full_name(), "Bob Tables");
        assert_eq!(employee.status_history[0].status, "active");
    }
}
