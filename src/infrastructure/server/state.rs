use crate::application::employees::EmployeeService;
use crate::application::orchestrator::Orchestrator;
use crate::config::ServerSettings;
use std::sync::Arc;

pub struct ServerState {
    orchestrator: Arc<Orchestrator>,
    employees: EmployeeService,
    settings: ServerSettings,
}

impl ServerState {
    pub fn new(
        orchestrator: Arc<Orchestrator>,
        employees: EmployeeService,
        settings: ServerSettings,
    ) -> Self {
        Self {
            orchestrator,
            employees,
            settings,
        }
    }

    pub fn orchestrator(&self) -> Arc<Orchestrator> {
        Arc::clone(&self.orchestrator)
    }

    pub fn employees(&self) -> &EmployeeService {
        &self.employees
    }

    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }
}
