use reqwest::StatusCode;

use super::{
    client::ApiClient,
    types::{ApiError, EmployeeResponse},
};

impl ApiClient {
    /// `GET /api/employees/actifs`
    pub async fn list_active_employees(&self) -> Result<Vec<EmployeeResponse>, ApiError> {
        let url = self.url("/api/employees/actifs").await;
        let reply = self.send(self.http_client().get(url)).await?;
        Self::map_json_response(reply)
    }

    /// `GET /health`; transport failures are errors, any answer is a status.
    pub async fn check_health(&self) -> Result<StatusCode, ApiError> {
        let url = self.url("/health").await;
        let reply = self.send(self.http_client().get(url)).await?;
        Ok(reply.status)
    }
}
