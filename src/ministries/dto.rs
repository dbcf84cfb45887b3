use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateMinistryRequest {
    pub name: String,
    pub description: Option<String>,
    pub contact_info: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}
