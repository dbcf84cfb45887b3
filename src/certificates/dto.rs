use serde::Deserialize;
use time::OffsetDateTime;

/// Issuer and issue date are fixed at creation; certificates have no
/// update operation.
#[derive(Debug, Deserialize)]
pub struct CreateCertificateRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date_issued: OffsetDateTime,
    pub issuer: String,
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
