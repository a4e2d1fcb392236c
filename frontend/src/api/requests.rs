use super::{
    client::ApiClient,
    types::{ApiError, CreateHrRequest},
};

pub const SUBMIT_FALLBACK_MESSAGE: &str = "Erreur lors de la soumission";

impl ApiClient {
    /// `POST /api/demandes`
    pub async fn create_hr_request(&self, request: &CreateHrRequest) -> Result<(), ApiError> {
        log::info!(
            "submitting {} request for employee {}",
            request.type_demande.as_str(),
            request.employe_id
        );
        self.post_ack("/api/demandes", request, SUBMIT_FALLBACK_MESSAGE)
            .await
    }
}
