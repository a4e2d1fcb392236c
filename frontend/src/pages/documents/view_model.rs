use crate::api::{ApiClient, ApiError, DocumentType};
use crate::pages::documents::{
    repository::DocumentsRepository,
    types::{DocumentDraft, DocumentFormKind, DocumentPayload},
    utils::DocumentForm,
};
use crate::pages::requests::utils::{MessageState, SubmissionPhase};
use crate::state::backend::{use_backend_health, BackendHealth};
use crate::state::directory::{Employee, EmployeeSearchState};
use crate::utils::timer::ConfirmationTimer;
use leptos::*;
use std::time::Duration;

#[derive(Clone, Copy)]
pub struct DocumentsViewModel {
    pub form: RwSignal<DocumentForm>,
    pub search: EmployeeSearchState,
    pub message: RwSignal<MessageState>,
    pub submit_action: Action<DocumentPayload, Result<(), ApiError>>,
    pub health: BackendHealth,
    timer: StoredValue<Option<ConfirmationTimer>>,
}

fn apply_document_outcome(
    result: &Result<(), ApiError>,
    form: RwSignal<DocumentForm>,
    message: RwSignal<MessageState>,
) -> bool {
    form.update(|form| form.finish_submit(result));
    match result {
        Ok(()) => {
            log::info!("document request accepted");
            message.update(|msg| msg.clear());
            true
        }
        Err(err) => {
            log::warn!("document request failed ({}): {}", err.code, err.error);
            message.update(|msg| msg.set_error(err.clone()));
            false
        }
    }
}

fn reset_documents(
    form: RwSignal<DocumentForm>,
    search: EmployeeSearchState,
    message: RwSignal<MessageState>,
) {
    form.update(|form| form.complete_confirmation());
    search.reset();
    message.update(|msg| msg.clear());
}

impl DocumentsViewModel {
    pub fn new(api: ApiClient, health: BackendHealth, confirmation_delay: Duration) -> Self {
        let repository = store_value(DocumentsRepository::new(api));
        let form = create_rw_signal(DocumentForm::default());
        let search = EmployeeSearchState::default();
        let message = create_rw_signal(MessageState::default());
        let timer = store_value(None::<ConfirmationTimer>);

        let submit_action = create_action(move |payload: &DocumentPayload| {
            let repo = repository.get_value();
            let payload = payload.clone();
            async move {
                let result = repo.submit(payload).await;
                if apply_document_outcome(&result, form, message) {
                    let handle = ConfirmationTimer::start(confirmation_delay, move || {
                        reset_documents(form, search, message);
                    });
                    let _ = timer.try_update_value(|slot| *slot = Some(handle));
                }
                result
            }
        });

        on_cleanup(move || {
            let _ = timer.try_update_value(|slot| {
                if let Some(pending) = slot.take() {
                    pending.cancel();
                }
            });
        });

        Self {
            form,
            search,
            message,
            submit_action,
            health,
            timer,
        }
    }

    pub fn phase(&self) -> Signal<SubmissionPhase> {
        let form = self.form;
        Signal::derive(move || form.with(|form| form.phase))
    }

    pub fn kind(&self) -> Signal<DocumentFormKind> {
        let form = self.form;
        Signal::derive(move || form.with(|form| form.kind))
    }

    pub fn draft_value<T: 'static>(&self, read: fn(&DocumentDraft) -> T) -> Signal<T> {
        let form = self.form;
        Signal::derive(move || form.with(|form| read(&form.draft)))
    }

    pub fn submitting(&self) -> Signal<bool> {
        let pending = self.submit_action.pending();
        let phase = self.phase();
        Signal::derive(move || pending.get() || phase.get() == SubmissionPhase::Submitting)
    }

    pub fn can_submit(&self) -> Signal<bool> {
        let phase = self.phase();
        let pending = self.submit_action.pending();
        let status = self.health.status();
        Signal::derive(move || {
            phase.get() == SubmissionPhase::Editing
                && !pending.get()
                && status.get().allows_submission()
        })
    }

    pub fn select_kind(&self, kind: DocumentFormKind) {
        self.form.update(|form| form.select_kind(kind));
        self.message.update(|msg| msg.clear());
    }

    pub fn select_document_type(&self, document_type: Option<DocumentType>) {
        if let Some(document_type) = document_type {
            self.form.update(|form| form.set_document_type(document_type));
        }
    }

    pub fn edit(&self, apply: impl FnOnce(&mut DocumentDraft)) {
        self.form.update(|form| apply(&mut form.draft));
    }

    pub fn search_input(&self, value: String) {
        self.search.input(value);
    }

    pub fn select_employee(&self, employee: &Employee) {
        self.search.select(employee);
        self.form.update(|form| form.employee_picked(employee));
    }

    pub fn submit(&self) {
        if let Some(err) = self.health.status_now().unavailable_error() {
            log::warn!("document submission blocked: {}", err.error);
            self.message.update(|msg| msg.set_error(err));
            return;
        }
        if self.submit_action.pending().get_untracked() {
            return;
        }
        let selected = self.search.selected();
        let mut outcome = Ok(None);
        self.form
            .update(|form| outcome = form.begin_submit(selected.as_ref()));
        match outcome {
            Ok(Some(payload)) => {
                log::debug!("sending document request for employee {}", payload.employee_id());
                self.message.update(|msg| msg.clear());
                self.submit_action.dispatch(payload);
            }
            Ok(None) => log::debug!("document submit ignored"),
            Err(err) => {
                log::debug!("document form invalid: {}", err.error);
                self.message.update(|msg| msg.set_error(err));
            }
        }
    }

    pub fn complete_confirmation(&self) {
        let _ = self.timer.try_update_value(|slot| {
            if let Some(pending) = slot.take() {
                pending.cancel();
            }
        });
        reset_documents(self.form, self.search, self.message);
    }
}

pub fn use_documents_view_model() -> DocumentsViewModel {
    match use_context::<DocumentsViewModel>() {
        Some(vm) => vm,
        None => {
            let api = use_context::<ApiClient>().unwrap_or_default();
            let vm = DocumentsViewModel::new(
                api,
                use_backend_health(),
                crate::config::current().confirmation_delay,
            );
            provide_context(vm);
            vm
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::api::DOCUMENT_FALLBACK_MESSAGE;
    use crate::pages::documents::types::{MSG_ROLE_REQUIRED, MSG_SELECT_NAME};
    use crate::state::backend::BackendStatus;
    use crate::test_support::helpers::employee;
    use crate::test_support::ssr::{wait_until, with_local_runtime_async, with_runtime};
    use serde_json::json;

    fn view_model(server: &MockServer) -> DocumentsViewModel {
        let api = ApiClient::new_with_base_url(server.url(""));
        let health = BackendHealth::new(api.clone(), false);
        DocumentsViewModel::new(api, health, Duration::from_millis(4_000))
    }

    #[test]
    fn apply_document_outcome_keeps_form_on_failure() {
        with_runtime(|| {
            let form = create_rw_signal(DocumentForm {
                phase: SubmissionPhase::Submitting,
                ..DocumentForm::default()
            });
            let message = create_rw_signal(MessageState::default());
            assert!(!apply_document_outcome(
                &Err(ApiError::application(DOCUMENT_FALLBACK_MESSAGE)),
                form,
                message
            ));
            assert_eq!(form.get().phase, SubmissionPhase::Editing);
            assert_eq!(
                message.get().error.map(|err| err.error),
                Some(DOCUMENT_FALLBACK_MESSAGE.to_string())
            );
        });
    }

    #[test]
    fn missing_name_is_reported_without_request() {
        with_runtime(|| {
            let server = MockServer::start();
            let vm = view_model(&server);
            vm.submit();
            assert_eq!(
                vm.message.get().error.map(|err| err.error),
                Some(MSG_SELECT_NAME.to_string())
            );
            assert!(server.received().is_empty());
        });
    }

    #[test]
    fn picking_employee_fills_role_for_certificate() {
        with_runtime(|| {
            let server = MockServer::start();
            let vm = view_model(&server);
            vm.select_kind(DocumentFormKind::Certificate);
            vm.select_employee(&employee(1, "Martin", "Paul", "Technicien"));
            assert_eq!(vm.draft_value(|d| d.role.clone()).get(), "Technicien");

            vm.edit(|d| {
                d.hire_date = "2021-04-12".into();
                d.role = String::new();
            });
            vm.submit();
            assert_eq!(
                vm.message.get().error.map(|err| err.error),
                Some(MSG_ROLE_REQUIRED.to_string())
            );
            assert!(server.received().is_empty());
        });
    }

    #[test]
    fn offline_backend_blocks_documents() {
        with_local_runtime_async(|| async {
            let runtime = create_runtime();
            let server = MockServer::start();
            server.mock(|when, then| {
                when.method(GET).path("/health");
                then.status(503).json_body(json!({}));
            });
            let api = ApiClient::new_with_base_url(server.url(""));
            let health = BackendHealth::new(api.clone(), true);
            let vm = DocumentsViewModel::new(api, health, Duration::from_millis(10));
            assert!(
                wait_until(|| health.status_now() == BackendStatus::Error).await,
                "probe should report an error status"
            );
            vm.select_employee(&employee(1, "Martin", "Paul", "Technicien"));
            vm.submit();
            assert_eq!(
                vm.message.get().error.map(|err| err.code),
                Some(crate::api::BACKEND_UNAVAILABLE.to_string())
            );
            assert_eq!(server.hits(&POST, "/api/generer-attestation"), 0);
            runtime.dispose();
        });
    }

    #[test]
    fn certificate_request_confirms_then_resets() {
        with_local_runtime_async(|| async {
            let runtime = create_runtime();
            let server = MockServer::start();
            server.mock(|when, then| {
                when.method(POST).path("/api/demandes/attestation-travail");
                then.status(201).json_body(json!({ "message": "ok" }));
            });
            let vm = view_model(&server);
            vm.select_kind(DocumentFormKind::Certificate);
            vm.select_employee(&employee(2, "Durand", "Marie", "Comptable"));
            vm.edit(|d| d.hire_date = "2019-09-02".into());
            vm.submit();

            assert!(
                wait_until(|| vm.phase().get() == SubmissionPhase::Succeeded).await,
                "certificate request should succeed"
            );
            let body = server.received()[0].body.clone().unwrap();
            assert_eq!(
                body,
                json!({ "employe_id": 2, "date_embauche": "2019-09-02", "poste": "Comptable" })
            );
            assert_eq!(
                vm.form.get().submitted_kind,
                Some(DocumentFormKind::Certificate)
            );

            vm.complete_confirmation();
            assert_eq!(vm.phase().get(), SubmissionPhase::Editing);
            assert_eq!(vm.kind().get(), DocumentFormKind::Certificate);
            assert_eq!(vm.form.get().draft, DocumentDraft::default());
            assert!(vm.search.selected().is_none());
            runtime.dispose();
        });
    }

    #[test]
    fn disposing_the_view_cancels_pending_confirmation() {
        with_local_runtime_async(|| async {
            let runtime = create_runtime();
            let server = MockServer::start();
            server.mock(|when, then| {
                when.method(POST).path("/api/generer-attestation");
                then.status(200).json_body(json!({}));
            });
            let vm = view_model(&server);
            vm.select_employee(&employee(1, "Martin", "Paul", "Technicien"));
            vm.submit();
            assert!(
                wait_until(|| vm.phase().get() == SubmissionPhase::Succeeded).await,
                "generation should succeed"
            );
            let watch = vm
                .timer
                .with_value(|slot| slot.as_ref().map(ConfirmationTimer::watch))
                .expect("timer armed after success");
            assert!(watch.is_armed());

            runtime.dispose();
            assert!(!watch.is_armed());
            assert!(!watch.fire(), "a disposed view must not be reset");
        });
    }

    #[test]
    fn generation_failure_shows_fallback() {
        with_local_runtime_async(|| async {
            let runtime = create_runtime();
            let server = MockServer::start();
            server.mock(|when, then| {
                when.method(POST).path("/api/generer-attestation");
                then.status(500).json_body(json!({ "error": "" }));
            });
            let vm = view_model(&server);
            vm.select_employee(&employee(1, "Martin", "Paul", "Technicien"));
            vm.select_document_type(DocumentType::parse("attestation_salaire"));
            vm.submit();
            assert!(
                wait_until(|| vm.submit_action.value().get().is_some()).await,
                "generation should finish"
            );
            assert_eq!(vm.phase().get(), SubmissionPhase::Editing);
            assert_eq!(
                vm.message.get().error.map(|err| err.error),
                Some(DOCUMENT_FALLBACK_MESSAGE.to_string())
            );
            assert_eq!(
                vm.form.get().draft.document_type,
                DocumentType::SalaryCertificate
            );
            runtime.dispose();
        });
    }
}
