// HTTP route tests - exercising the router in-process
//
// Requests go through `tower::ServiceExt::oneshot`; the completion gateway is
// a scripted stub so no network access is needed.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use hcm_assistant::application::employees::EmployeeService;
use hcm_assistant::application::orchestrator::Orchestrator;
use hcm_assistant::application::tools::ToolRegistry;
use hcm_assistant::config::{PlanPolicy, PromptSet, ServerSettings};
use hcm_assistant::infrastructure::gateway::{
    Completion, CompletionGateway, CompletionRequest, GatewayError,
};
use hcm_assistant::infrastructure::server::{ServerState, build_router};
use hcm_assistant::infrastructure::store::MemoryStore;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

struct CannedGateway {
    responses: Mutex<Vec<String>>,
}

#[async_trait]
impl CompletionGateway for CannedGateway {
    fn default_model(&self) -> &str {
        "canned"
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<Completion, GatewayError> {
        let mut responses = self
            .responses
            .lock()
            .map_err(|_| GatewayError::invalid_response("poisoned"))?;
        if responses.is_empty() {
            return Err(GatewayError::invalid_response("no canned response left"));
        }
        Ok(Completion::single(responses.remove(0)))
    }
}

fn app(responses: &[&str]) -> Router {
    let gateway: Arc<dyn CompletionGateway> = Arc::new(CannedGateway {
        responses: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
    });
    let orchestrator = Orchestrator::new(
        gateway,
        PromptSet::default(),
        ToolRegistry::new(),
        PlanPolicy::Advisory,
    );
    let settings = ServerSettings {
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
        ..ServerSettings::default()
    };
    let state = ServerState::new(
        Arc::new(orchestrator),
        EmployeeService::new(Arc::new(MemoryStore::new())),
        settings,
    );
    build_router(Arc::new(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

fn employee(id: &str, first_name: &str) -> Value {
    json!({
        "employeeId": id,
        "firstName": first_name,
        "lastName": "Doe",
        "email": format!("{first_name}@example.com"),
    })
}

#[tokio::test]
async fn employee_crud_round_trip() {
    let app = app(&[]);

    let (status, created) =
        send(&app, json_request("POST", "/api/employees", employee("E1", "jane"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["employeeId"], "E1");

    let (status, _) =
        send(&app, json_request("POST", "/api/employees", employee("E1", "jane"))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, list) = send(&app, get("/api/employees")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    let (status, body) = send(
        &app,
        json_request("PUT", "/api/employees/E2", employee("E1", "janet")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ID in URL does not match ID in request body");

    let (status, updated) = send(
        &app,
        json_request("PUT", "/api/employees/E1", employee("E1", "janet")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["firstName"], "janet");

    let (status, fetched) = send(&app, get("/api/employees/E1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["firstName"], "janet");

    let delete = Request::builder()
        .method("DELETE")
        .uri("/api/employees/E1")
        .body(Body::empty())
        .expect("request");
    let (status, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, get("/api/employees/E1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Employee not found");
}

#[tokio::test]
async fn chat_answers_directly_when_no_tool_is_needed() {
    let app = app(&[r#"{"useTool": false, "context": "greeting"}"#, "Hello!"]);
    let request = json_request(
        "POST",
        "/api/chat",
        json!({"messages": [
            {"role": "System", "content": "Connected"},
            {"role": "You", "content": "hi"}
        ]}),
    );

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Hello!");
    assert_eq!(body["decision"]["useTool"], false);
    assert_eq!(body["plan"], Value::Null);
    assert_eq!(body["steps"], json!([]));
}

#[tokio::test]
async fn chat_reports_skipped_steps_and_missing_result() {
    let app = app(&[
        r#"{"useTool": true, "context": "needs tools"}"#,
        r#"{"tools": ["fetchDatabase"], "context": "look it up"}"#,
    ]);
    let request = json_request(
        "POST",
        "/api/chat",
        json!({"messages": [{"role": "user", "content": "who is E1?"}]}),
    );

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn chat_rejects_empty_conversation() {
    let app = app(&[]);
    let (status, body) = send(
        &app,
        json_request("POST", "/api/chat", json!({"messages": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_bodies_and_queries_are_bad_requests_with_error_body() {
    let app = app(&[]);

    let (status, body) = send(
        &app,
        json_request("POST", "/api/chat", json!({"messages": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .is_some_and(|error| error.starts_with("invalid request body"))
    );

    let not_json = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{messages"))
        .expect("request");
    let (status, body) = send(&app, not_json).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        json_request("POST", "/api/employees", json!({"employeeId": 7})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, get("/api/execution-plan")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .is_some_and(|error| error.starts_with("invalid query string"))
    );
}

#[tokio::test]
async fn diagnostics_validate_and_run_single_stages() {
    let app = app(&[r#"{"tools": ["generateOutput"], "context": "just answer"}"#]);

    let (status, _) = send(&app, get("/api/use-tool?prompt=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, plan) = send(&app, get("/api/execution-plan?prompt=hello")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["tools"], json!(["generateOutput"]));

    let (status, _) = send(&app, get("/api/math?expression=1%2B1")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn websocket_rejects_foreign_origin() {
    let app = app(&[]);
    let request = Request::builder()
        .uri("/ws")
        .header(header::HOST, "localhost:8080")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .expect("request");

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "origin not allowed");
}

#[tokio::test]
async fn serves_openapi_and_static_page() {
    let app = app(&[]);

    let (status, doc) = send(&app, get("/api-doc/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/chat"].is_object());
    assert!(doc["paths"]["/api/employees/{id}"].is_object());

    let (status, page) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.as_str().is_some_and(|html| html.contains("HCM Assistant")));
}
