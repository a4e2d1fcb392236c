use crate::api::{
    ApiError, DocumentType, EmployeeId, GenerateDocumentRequest, WorkCertificateRequest,
};
use crate::pages::requests::types::{parse_date, MSG_INVALID_DATE};
use crate::state::directory::SelectedEmployee;

pub const MSG_SELECT_NAME: &str = "Veuillez sélectionner votre nom";
pub const MSG_HIRE_DATE_REQUIRED: &str = "Veuillez saisir votre date d'embauche";
pub const MSG_ROLE_REQUIRED: &str = "Veuillez préciser votre poste";

/// The two document flows offered by the portal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFormKind {
    /// Immediate generation of a work or salary certificate.
    #[default]
    Generate,
    /// Work certificate request reviewed by HR.
    Certificate,
}

impl DocumentFormKind {
    pub const ALL: [DocumentFormKind; 2] = [DocumentFormKind::Generate, DocumentFormKind::Certificate];

    pub fn label(self) -> &'static str {
        match self {
            DocumentFormKind::Generate => "Générer un document",
            DocumentFormKind::Certificate => "Demande d'attestation de travail",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentDraft {
    pub document_type: DocumentType,
    pub hire_date: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentPayload {
    Generate(GenerateDocumentRequest),
    Certificate(WorkCertificateRequest),
}

impl DocumentPayload {
    pub fn employee_id(&self) -> &EmployeeId {
        match self {
            DocumentPayload::Generate(request) => &request.employe_id,
            DocumentPayload::Certificate(request) => &request.employe_id,
        }
    }
}

/// Checks the draft for `kind` and builds the request body. Problems are
/// reported as one form-level message, not per field.
pub fn build_payload(
    kind: DocumentFormKind,
    draft: &DocumentDraft,
    selected: Option<&SelectedEmployee>,
) -> Result<DocumentPayload, ApiError> {
    let employee = selected
        .filter(|employee| !employee.id.is_blank())
        .ok_or_else(|| ApiError::validation(MSG_SELECT_NAME))?;

    match kind {
        DocumentFormKind::Generate => Ok(DocumentPayload::Generate(GenerateDocumentRequest {
            employe_id: employee.id.clone(),
            type_document: draft.document_type,
        })),
        DocumentFormKind::Certificate => {
            let hire_date = parse_date(&draft.hire_date)
                .map_err(|_| ApiError::validation(MSG_INVALID_DATE))?
                .ok_or_else(|| ApiError::validation(MSG_HIRE_DATE_REQUIRED))?;
            let role = draft.role.trim();
            if role.is_empty() {
                return Err(ApiError::validation(MSG_ROLE_REQUIRED));
            }
            Ok(DocumentPayload::Certificate(WorkCertificateRequest {
                employe_id: employee.id.clone(),
                date_embauche: hire_date,
                poste: role.to_string(),
            }))
        }
    }
}
