use crate::api::{ApiError, CreateHrRequest, LeaveKind, RequestVariant};
use crate::state::directory::SelectedEmployee;

use super::types::{
    apply_variant_change, clear_variant_errors, normalize, FieldErrors, RequestDraft,
    RequestField, MSG_EMPLOYEE_REQUIRED,
};

/// Lifecycle of the request form. Validation runs synchronously inside
/// [`RequestForm::begin_submit`]; a failed submission returns to `Editing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Editing,
    Submitting,
    Succeeded,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitBlocked {
    /// A submission is already in flight.
    InFlight,
    /// The confirmation view is showing.
    Confirming,
    Invalid(FieldErrors),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestForm {
    pub draft: RequestDraft,
    pub errors: FieldErrors,
    pub phase: SubmissionPhase,
    /// Variant of the last accepted request, drives the confirmation copy.
    pub submitted_variant: Option<RequestVariant>,
}

impl RequestForm {
    pub fn select_variant(&mut self, variant: Option<RequestVariant>) {
        self.draft = apply_variant_change(&self.draft, variant);
        clear_variant_errors(&mut self.errors, variant);
        self.errors.clear(RequestField::Variant);
    }

    /// Applies an edit and clears the error attached to `field`.
    pub fn edit(&mut self, field: RequestField, apply: impl FnOnce(&mut RequestDraft)) {
        apply(&mut self.draft);
        self.errors.clear(field);
    }

    /// A detail is only kept for `LeaveKind::Other`.
    pub fn set_leave_kind(&mut self, kind: LeaveKind) {
        self.draft.leave_kind = Some(kind);
        self.errors.clear(RequestField::LeaveKind);
        if kind != LeaveKind::Other {
            self.draft.leave_kind_detail.clear();
            self.errors.clear(RequestField::LeaveKindDetail);
        }
    }

    pub fn select_employee(&mut self, selected: Option<&SelectedEmployee>) {
        self.draft.employee_id = selected.map(|employee| employee.id.clone());
        if selected.is_some() {
            self.errors.clear(RequestField::EmployeeId);
        }
    }

    /// Validates and moves to `Submitting`. The caller sends the returned
    /// payload and reports back through [`RequestForm::finish_submit`].
    pub fn begin_submit(
        &mut self,
        selected: Option<&SelectedEmployee>,
    ) -> Result<CreateHrRequest, SubmitBlocked> {
        match self.phase {
            SubmissionPhase::Submitting => return Err(SubmitBlocked::InFlight),
            SubmissionPhase::Succeeded => return Err(SubmitBlocked::Confirming),
            SubmissionPhase::Editing => {}
        }
        let Some(selected) = selected else {
            self.errors.insert(RequestField::EmployeeId, MSG_EMPLOYEE_REQUIRED);
            return Err(SubmitBlocked::Invalid(self.errors.clone()));
        };
        self.draft.employee_id = Some(selected.id.clone());

        match normalize(&self.draft) {
            Ok(payload) => {
                self.errors = FieldErrors::default();
                self.phase = SubmissionPhase::Submitting;
                Ok(payload)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(SubmitBlocked::Invalid(errors))
            }
        }
    }

    pub fn finish_submit(&mut self, result: &Result<(), ApiError>) {
        if self.phase != SubmissionPhase::Submitting {
            return;
        }
        match result {
            Ok(()) => {
                self.submitted_variant = self.draft.variant;
                self.phase = SubmissionPhase::Succeeded;
            }
            Err(_) => self.phase = SubmissionPhase::Editing,
        }
    }

    /// End of the confirmation interval: back to a blank form.
    pub fn complete_confirmation(&mut self) {
        if self.phase == SubmissionPhase::Succeeded {
            *self = RequestForm::default();
        }
    }
}

pub struct ConfirmationCopy {
    pub title: &'static str,
    pub body: &'static str,
}

pub fn confirmation_copy(variant: Option<RequestVariant>) -> ConfirmationCopy {
    match variant {
        Some(RequestVariant::Resignation) => ConfirmationCopy {
            title: "Démission enregistrée !",
            body: "Votre lettre de démission a été générée et vous a été envoyée par email. \
                   Elle sera transmise à l'administration.",
        },
        _ => ConfirmationCopy {
            title: "Demande envoyée !",
            body: "Votre demande a été transmise à votre responsable hiérarchique. \
                   Vous recevrez une notification par email.",
        },
    }
}

/// Form-level error shown above a form (field errors live in `FieldErrors`).
#[derive(Clone, Default, Debug, PartialEq)]
pub struct MessageState {
    pub error: Option<ApiError>,
}

impl MessageState {
    pub fn set_error(&mut self, msg: ApiError) {
        self.error = Some(msg);
    }

    pub fn clear(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::EmployeeId;

    fn paul() -> SelectedEmployee {
        SelectedEmployee {
            id: EmployeeId::Number(1),
            full_name: "Martin Paul".into(),
            last_name: "Martin".into(),
            first_name: "Paul".into(),
        }
    }

    fn filled_leave() -> RequestForm {
        let mut form = RequestForm::default();
        form.select_variant(Some(RequestVariant::Leave));
        form.edit(RequestField::Reason, |d| d.reason = "Vacances".into());
        form.edit(RequestField::DepartureDate, |d| d.departure_date = "2024-07-01".into());
        form.edit(RequestField::ReturnDate, |d| d.return_date = "2024-07-12".into());
        form.set_leave_kind(LeaveKind::Annual);
        form
    }

    #[test]
    fn leaving_other_leave_kind_drops_detail_and_its_error() {
        let mut form = filled_leave();
        form.set_leave_kind(LeaveKind::Other);
        assert!(form.begin_submit(Some(&paul())).is_err());
        assert!(form.errors.contains(RequestField::LeaveKindDetail));

        form.edit(RequestField::LeaveKindDetail, |d| {
            d.leave_kind_detail = "Mariage".into()
        });
        form.set_leave_kind(LeaveKind::Other);
        assert_eq!(form.draft.leave_kind_detail, "Mariage");

        form.edit(RequestField::LeaveKindDetail, |d| d.leave_kind_detail.clear());
        assert!(form.begin_submit(Some(&paul())).is_err());
        form.set_leave_kind(LeaveKind::Annual);
        assert_eq!(form.draft.leave_kind, Some(LeaveKind::Annual));
        assert_eq!(form.draft.leave_kind_detail, "");
        assert!(!form.errors.contains(RequestField::LeaveKindDetail));
        assert!(!form.errors.contains(RequestField::LeaveKind));
        assert!(form.begin_submit(Some(&paul())).is_ok());
    }

    #[test]
    fn submit_without_employee_reports_employee_field() {
        let mut form = filled_leave();
        let blocked = form.begin_submit(None).unwrap_err();
        assert!(matches!(blocked, SubmitBlocked::Invalid(ref errors) if errors.contains(RequestField::EmployeeId)));
        assert_eq!(form.errors.get(RequestField::EmployeeId), Some(MSG_EMPLOYEE_REQUIRED));
        assert_eq!(form.phase, SubmissionPhase::Editing);

        form.select_employee(Some(&paul()));
        assert!(form.errors.is_empty());
    }

    #[test]
    fn invalid_draft_stays_in_editing_with_errors() {
        let mut form = RequestForm::default();
        assert!(form.begin_submit(Some(&paul())).is_err());
        assert!(form.errors.contains(RequestField::Variant));
        assert!(form.errors.contains(RequestField::Reason));
        assert!(!form.errors.contains(RequestField::EmployeeId));
        assert_eq!(form.phase, SubmissionPhase::Editing);
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut form = RequestForm::default();
        let _ = form.begin_submit(Some(&paul()));
        form.edit(RequestField::Reason, |d| d.reason = "x".into());
        assert!(!form.errors.contains(RequestField::Reason));
        assert!(form.errors.contains(RequestField::DepartureDate));
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut form = filled_leave();
        let payload = form.begin_submit(Some(&paul())).unwrap();
        assert_eq!(payload.employe_id, EmployeeId::Number(1));
        assert_eq!(form.phase, SubmissionPhase::Submitting);
        assert_eq!(form.begin_submit(Some(&paul())), Err(SubmitBlocked::InFlight));
    }

    #[test]
    fn failure_keeps_draft_and_success_resets_after_confirmation() {
        let mut form = filled_leave();
        form.begin_submit(Some(&paul())).unwrap();
        form.finish_submit(&Err(ApiError::connectivity()));
        assert_eq!(form.phase, SubmissionPhase::Editing);
        assert_eq!(form.draft.reason, "Vacances");

        form.begin_submit(Some(&paul())).unwrap();
        form.finish_submit(&Ok(()));
        assert_eq!(form.phase, SubmissionPhase::Succeeded);
        assert_eq!(form.submitted_variant, Some(RequestVariant::Leave));
        assert_eq!(form.begin_submit(Some(&paul())), Err(SubmitBlocked::Confirming));

        form.complete_confirmation();
        assert_eq!(form, RequestForm::default());
    }

    #[test]
    fn resignation_has_its_own_confirmation() {
        let resignation = confirmation_copy(Some(RequestVariant::Resignation));
        assert!(resignation.body.contains("lettre de démission"));
        let regular = confirmation_copy(Some(RequestVariant::Mission));
        assert_eq!(regular.title, "Demande envoyée !");
    }
}
