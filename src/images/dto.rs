use serde::Deserialize;
use uuid::Uuid;

/// Images are stored as reference URLs; the file itself lives elsewhere.
#[derive(Debug, Deserialize)]
pub struct CreateImageRequest {
    pub project_id: Uuid,
    pub image_url: String,
    pub description: Option<String>,
}
