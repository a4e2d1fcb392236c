use super::{
    client::ApiClient,
    types::{ApiError, GenerateDocumentRequest, WorkCertificateRequest},
};

pub const DOCUMENT_FALLBACK_MESSAGE: &str = "Erreur lors de la génération du document";

impl ApiClient {
    /// `POST /api/generer-attestation`
    pub async fn generate_document(&self, request: &GenerateDocumentRequest) -> Result<(), ApiError> {
        log::info!(
            "requesting {} for employee {}",
            request.type_document.as_str(),
            request.employe_id
        );
        self.post_ack("/api/generer-attestation", request, DOCUMENT_FALLBACK_MESSAGE)
            .await
    }

    /// `POST /api/demandes/attestation-travail`
    pub async fn request_work_certificate(
        &self,
        request: &WorkCertificateRequest,
    ) -> Result<(), ApiError> {
        log::info!("requesting work certificate for employee {}", request.employe_id);
        self.post_ack(
            "/api/demandes/attestation-travail",
            request,
            DOCUMENT_FALLBACK_MESSAGE,
        )
        .await
    }
}
