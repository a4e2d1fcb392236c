use crate::api::{ApiError, DocumentType};
use crate::pages::requests::utils::{ConfirmationCopy, SubmissionPhase};
use crate::state::directory::{Employee, SelectedEmployee};

use super::types::{build_payload, DocumentDraft, DocumentFormKind, DocumentPayload};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentForm {
    pub kind: DocumentFormKind,
    pub draft: DocumentDraft,
    pub phase: SubmissionPhase,
    pub submitted_kind: Option<DocumentFormKind>,
}

impl DocumentForm {
    pub fn select_kind(&mut self, kind: DocumentFormKind) {
        if self.phase == SubmissionPhase::Editing {
            self.kind = kind;
        }
    }

    pub fn set_document_type(&mut self, document_type: DocumentType) {
        self.draft.document_type = document_type;
    }

    /// Picking an employee pre-fills the role; the user may still edit it.
    pub fn employee_picked(&mut self, employee: &Employee) {
        self.draft.role = employee.role.clone();
    }

    /// `Ok(None)` means the call is ignored (already sending or confirming).
    pub fn begin_submit(
        &mut self,
        selected: Option<&SelectedEmployee>,
    ) -> Result<Option<DocumentPayload>, ApiError> {
        if self.phase != SubmissionPhase::Editing {
            return Ok(None);
        }
        let payload = build_payload(self.kind, &self.draft, selected)?;
        self.phase = SubmissionPhase::Submitting;
        Ok(Some(payload))
    }

    pub fn finish_submit(&mut self, result: &Result<(), ApiError>) {
        if self.phase != SubmissionPhase::Submitting {
            return;
        }
        match result {
            Ok(()) => {
                self.submitted_kind = Some(self.kind);
                self.phase = SubmissionPhase::Succeeded;
            }
            Err(_) => self.phase = SubmissionPhase::Editing,
        }
    }

    pub fn complete_confirmation(&mut self) {
        if self.phase == SubmissionPhase::Succeeded {
            *self = DocumentForm {
                kind: self.kind,
                ..DocumentForm::default()
            };
        }
    }
}

pub fn document_confirmation_copy(kind: Option<DocumentFormKind>) -> ConfirmationCopy {
    match kind {
        Some(DocumentFormKind::Certificate) => ConfirmationCopy {
            title: "Demande d'attestation envoyée !",
            body: "Votre demande d'attestation de travail a été transmise au service RH. \
                   Vous serez informé par email dès qu'elle sera prête.",
        },
        _ => ConfirmationCopy {
            title: "Document envoyé !",
            body: "Votre document a été généré et envoyé par email. \
                   Il sera traité par l'administration.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::EmployeeId;
    use crate::pages::documents::types::MSG_SELECT_NAME;

    fn employee() -> Employee {
        Employee {
            id: EmployeeId::Number(3),
            last_name: "Ben Salah".into(),
            first_name: "Sami".into(),
            role: "Chef de projet".into(),
            email: None,
            employee_number: None,
        }
    }

    #[test]
    fn picking_employee_prefills_editable_role() {
        let mut form = DocumentForm::default();
        form.employee_picked(&employee());
        assert_eq!(form.draft.role, "Chef de projet");
        form.draft.role = "Directeur de projet".into();
        assert_eq!(form.draft.role, "Directeur de projet");
    }

    #[test]
    fn submit_without_selection_stays_editing() {
        let mut form = DocumentForm::default();
        let err = form.begin_submit(None).unwrap_err();
        assert_eq!(err.error, MSG_SELECT_NAME);
        assert_eq!(form.phase, SubmissionPhase::Editing);
    }

    #[test]
    fn lifecycle_resets_draft_but_keeps_chosen_flow() {
        let selected = SelectedEmployee::from(&employee());
        let mut form = DocumentForm::default();
        form.select_kind(DocumentFormKind::Generate);
        form.set_document_type(DocumentType::SalaryCertificate);

        assert!(form.begin_submit(Some(&selected)).unwrap().is_some());
        assert!(form.begin_submit(Some(&selected)).unwrap().is_none());
        form.select_kind(DocumentFormKind::Certificate);
        assert_eq!(form.kind, DocumentFormKind::Generate);

        form.finish_submit(&Ok(()));
        assert_eq!(form.phase, SubmissionPhase::Succeeded);
        assert_eq!(form.submitted_kind, Some(DocumentFormKind::Generate));

        form.complete_confirmation();
        assert_eq!(form.phase, SubmissionPhase::Editing);
        assert_eq!(form.draft.document_type, DocumentType::WorkCertificate);
        assert_eq!(form.submitted_kind, None);
    }

    #[test]
    fn failure_returns_to_editing_with_draft() {
        let selected = SelectedEmployee::from(&employee());
        let mut form = DocumentForm::default();
        form.set_document_type(DocumentType::SalaryCertificate);
        form.begin_submit(Some(&selected)).unwrap();
        form.finish_submit(&Err(ApiError::connectivity()));
        assert_eq!(form.phase, SubmissionPhase::Editing);
        assert_eq!(form.draft.document_type, DocumentType::SalaryCertificate);
    }

    #[test]
    fn confirmation_copy_depends_on_flow() {
        assert_eq!(document_confirmation_copy(None).title, "Document envoyé !");
        assert!(document_confirmation_copy(Some(DocumentFormKind::Certificate))
            .body
            .contains("attestation de travail"));
    }
}
