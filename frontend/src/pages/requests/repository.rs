use crate::api::{ApiClient, ApiError, CreateHrRequest};
use std::rc::Rc;

#[derive(Clone)]
pub struct RequestsRepository {
    client: Rc<ApiClient>,
}

impl RequestsRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn submit_request(&self, payload: CreateHrRequest) -> Result<(), ApiError> {
        self.client.create_hr_request(&payload).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::api::{EmployeeId, RequestVariant};
    use serde_json::json;

    fn resignation() -> CreateHrRequest {
        CreateHrRequest {
            employe_id: EmployeeId::Text("emp-9".into()),
            type_demande: RequestVariant::Resignation,
            titre: "Nouveau projet".into(),
            date_depart: None,
            date_retour: None,
            heure_depart: None,
            heure_retour: None,
            demi_journee: false,
            type_conge: None,
            type_conge_autre: None,
            frais_deplacement: None,
        }
    }

    #[tokio::test]
    async fn submit_request_posts_to_demandes() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/demandes");
            then.status(201).json_body(json!({}));
        });
        let repo = RequestsRepository::new(ApiClient::new_with_base_url(server.url("")));
        repo.submit_request(resignation()).await.unwrap();

        let received = server.received();
        assert_eq!(server.hits(&POST, "/api/demandes"), 1);
        let body = received[0].body.clone().unwrap();
        assert_eq!(body["employe_id"], json!("emp-9"));
        assert_eq!(body["type_demande"], json!("demission"));
        assert_eq!(body["date_depart"], serde_json::Value::Null);
    }
}
