use super::dto::{ChatRequest, ChatResponse, ErrorResponse};
use super::routes;
use crate::application::orchestrator::{ExecutionPlan, StepReport, StepStatus, ToolResponse};
use crate::application::tools::{DisplayMarkup, MathResult, ToolName, ToolOutput};
use crate::domain::employee::{
    Address, Allowance, CompensationDetails, EmergencyContact, Employee, JobHistory, Manager,
    PersonalDetails, StatusHistory,
};
use crate::types::{ChatMessage, FunctionCall, MessageRole, ToolCall};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::chat::chat_handler,
        routes::diagnostics::execution_plan_handler,
        routes::diagnostics::use_tool_handler,
        routes::diagnostics::math_handler,
        routes::employees::create_employee,
        routes::employees::list_employees,
        routes::employees::get_employee,
        routes::employees::update_employee,
        routes::employees::delete_employee
    ),
    components(
        schemas(
            ChatRequest,
            ChatResponse,
            ErrorResponse,
            ChatMessage,
            MessageRole,
            ToolCall,
            FunctionCall,
            ToolResponse,
            ExecutionPlan,
            StepReport,
            StepStatus,
            ToolName,
            ToolOutput,
            MathResult,
            DisplayMarkup,
            Employee,
            PersonalDetails,
            Address,
            EmergencyContact,
            JobHistory,
            Manager,
            StatusHistory,
            CompensationDetails,
            Allowance
        )
    ),
    tags(
        (name = "chat", description = "Conversations handled by the tool orchestrator"),
        (name = "diagnostics", description = "Single orchestration stages"),
        (name = "employees", description = "Employee records")
    )
)]
pub(super) struct ApiDoc;
