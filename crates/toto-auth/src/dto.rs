use serde::Deserialize;
use serde::Serialize;

#[derive(Deserialize)]
pub struct LaunchRequest {
    #[serde(rename = "initData")]
    pub init_data: Option<String>,
}

#[derive(Serialize)]
pub struct LaunchResponse {
    pub status: &'static str,
    pub authenticated: bool,
    pub token: Option<String>,
    pub is_admin: bool,
    pub user_data: serde_json::Value,
}
