use crate::api::{ApiClient, ApiError};
use std::rc::Rc;

use super::types::DocumentPayload;

#[derive(Clone)]
pub struct DocumentsRepository {
    client: Rc<ApiClient>,
}

impl DocumentsRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn submit(&self, payload: DocumentPayload) -> Result<(), ApiError> {
        match payload {
            DocumentPayload::Generate(request) => self.client.generate_document(&request).await,
            DocumentPayload::Certificate(request) => {
                self.client.request_work_certificate(&request).await
            }
        }
    }
}
