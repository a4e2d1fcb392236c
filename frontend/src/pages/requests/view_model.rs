use crate::api::{ApiClient, ApiError, CreateHrRequest, LeaveKind, RequestVariant};
use crate::pages::requests::{
    repository::RequestsRepository,
    types::{applies, RequestDraft, RequestField},
    utils::{MessageState, RequestForm, SubmissionPhase, SubmitBlocked},
};
use crate::state::backend::{use_backend_health, BackendHealth};
use crate::state::directory::{Employee, EmployeeSearchState};
use crate::utils::timer::ConfirmationTimer;
use leptos::*;
use std::time::Duration;

#[derive(Clone, Copy)]
pub struct RequestFormViewModel {
    pub form: RwSignal<RequestForm>,
    pub search: EmployeeSearchState,
    pub message: RwSignal<MessageState>,
    pub submit_action: Action<CreateHrRequest, Result<(), ApiError>>,
    pub health: BackendHealth,
    timer: StoredValue<Option<ConfirmationTimer>>,
}

/// Folds a submission outcome into the form. Returns `true` when the request
/// was accepted and the confirmation interval should start.
fn apply_submit_outcome(
    result: &Result<(), ApiError>,
    form: RwSignal<RequestForm>,
    message: RwSignal<MessageState>,
) -> bool {
    form.update(|form| form.finish_submit(result));
    match result {
        Ok(()) => {
            log::info!("hr request accepted");
            message.update(|msg| msg.clear());
            true
        }
        Err(err) => {
            log::warn!("hr request failed ({}): {}", err.code, err.error);
            message.update(|msg| msg.set_error(err.clone()));
            false
        }
    }
}

fn reset_after_confirmation(
    form: RwSignal<RequestForm>,
    search: EmployeeSearchState,
    message: RwSignal<MessageState>,
) {
    form.update(|form| form.complete_confirmation());
    search.reset();
    message.update(|msg| msg.clear());
}

impl RequestFormViewModel {
    pub fn new(api: ApiClient, health: BackendHealth, confirmation_delay: Duration) -> Self {
        let repository = store_value(RequestsRepository::new(api));
        let form = create_rw_signal(RequestForm::default());
        let search = EmployeeSearchState::default();
        let message = create_rw_signal(MessageState::default());
        let timer = store_value(None::<ConfirmationTimer>);

        let submit_action = create_action(move |payload: &CreateHrRequest| {
            let repo = repository.get_value();
            let payload = payload.clone();
            async move {
                let result = repo.submit_request(payload).await;
                if apply_submit_outcome(&result, form, message) {
                    let handle = ConfirmationTimer::start(confirmation_delay, move || {
                        reset_after_confirmation(form, search, message);
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

    pub fn variant(&self) -> Signal<Option<RequestVariant>> {
        let form = self.form;
        Signal::derive(move || form.with(|form| form.draft.variant))
    }

    pub fn shows(&self, field: RequestField) -> Signal<bool> {
        let form = self.form;
        Signal::derive(move || form.with(|form| applies(form.draft.variant, field)))
    }

    pub fn field_error(&self, field: RequestField) -> Signal<Option<String>> {
        let form = self.form;
        Signal::derive(move || form.with(|form| form.errors.get(field).map(str::to_string)))
    }

    /// Reactive read of one draft value.
    pub fn draft_value<T: 'static>(&self, read: fn(&RequestDraft) -> T) -> Signal<T> {
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

    pub fn select_variant(&self, variant: Option<RequestVariant>) {
        log::debug!(
            "request variant changed to {}",
            variant.map(RequestVariant::as_str).unwrap_or("-")
        );
        self.form.update(|form| form.select_variant(variant));
    }

    pub fn edit(&self, field: RequestField, apply: impl FnOnce(&mut RequestDraft)) {
        self.form.update(|form| form.edit(field, apply));
    }

    pub fn set_leave_kind(&self, kind: LeaveKind) {
        self.form.update(|form| form.set_leave_kind(kind));
    }

    pub fn search_input(&self, value: String) {
        if self.search.input(value) {
            self.form.update(|form| form.select_employee(None));
        }
    }

    pub fn select_employee(&self, employee: &Employee) {
        let selected = self.search.select(employee);
        self.form.update(|form| form.select_employee(Some(&selected)));
    }

    pub fn submit(&self) {
        if let Some(err) = self.health.status_now().unavailable_error() {
            log::warn!("submission blocked: {}", err.error);
            self.message.update(|msg| msg.set_error(err));
            return;
        }
        if self.submit_action.pending().get_untracked() {
            log::debug!("submission already in flight");
            return;
        }
        let selected = self.search.selected();
        let mut outcome = Err(SubmitBlocked::InFlight);
        self.form
            .update(|form| outcome = form.begin_submit(selected.as_ref()));
        match outcome {
            Ok(payload) => {
                self.message.update(|msg| msg.clear());
                self.submit_action.dispatch(payload);
            }
            Err(SubmitBlocked::Invalid(errors)) => {
                log::debug!("request form invalid: {}", errors.to_json());
            }
            Err(blocked) => log::debug!("submit ignored: {:?}", blocked),
        }
    }

    /// Ends the confirmation interval early (also what the timer calls).
    pub fn complete_confirmation(&self) {
        let _ = self.timer.try_update_value(|slot| {
            if let Some(pending) = slot.take() {
                pending.cancel();
            }
        });
        reset_after_confirmation(self.form, self.search, self.message);
    }
}

pub fn use_request_form_view_model() -> RequestFormViewModel {
    match use_context::<RequestFormViewModel>() {
        Some(vm) => vm,
        None => {
            let api = use_context::<ApiClient>().unwrap_or_default();
            let vm = RequestFormViewModel::new(
                api,
                use_backend_health(),
                crate::config::current().confirmation_delay,
            );
            provide_context(vm);
            vm
        }
    }
}
