use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateContractRequest {
    pub name: String,
    pub details: Option<String>,
    pub project_id: Uuid,
}
