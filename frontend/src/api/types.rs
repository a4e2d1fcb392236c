use chrono::{NaiveDate, NaiveTime};
use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Employee identifiers are opaque to the portal: they are sent back to the
/// backend in the same JSON representation they were received in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmployeeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeId::Number(id) => write!(f, "{}", id),
            EmployeeId::Text(id) => f.write_str(id),
        }
    }
}

impl EmployeeId {
    pub fn is_blank(&self) -> bool {
        matches!(self, EmployeeId::Text(id) if id.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: EmployeeId,
    pub nom: String,
    pub prenom: String,
    #[serde(default, deserialize_with = "lenient::null_as_empty")]
    pub poste: String,
    #[serde(default, deserialize_with = "lenient::scalar_as_text")]
    pub adresse_mail: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar_as_text")]
    pub matricule: Option<String>,
}

/// Roster fields the backend does not type strictly. One odd record must not
/// make the whole roster unreadable.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn text(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(text),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?.and_then(text))
    }

    pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(scalar_as_text(deserializer)?.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RequestVariant {
    #[serde(rename = "autorisation")]
    Authorization,
    #[serde(rename = "conges")]
    Leave,
    #[serde(rename = "mission")]
    Mission,
    #[serde(rename = "demission")]
    Resignation,
}

impl RequestVariant {
    pub const ALL: [RequestVariant; 4] = [
        RequestVariant::Authorization,
        RequestVariant::Leave,
        RequestVariant::Mission,
        RequestVariant::Resignation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RequestVariant::Authorization => "autorisation",
            RequestVariant::Leave => "conges",
            RequestVariant::Mission => "mission",
            RequestVariant::Resignation => "demission",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            RequestVariant::Authorization => "Autorisation",
            RequestVariant::Leave => "Congés",
            RequestVariant::Mission => "Mission",
            RequestVariant::Resignation => "Démission",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveKind {
    #[serde(rename = "annuel")]
    Annual,
    #[serde(rename = "sans_solde")]
    Unpaid,
    #[serde(rename = "autre")]
    Other,
}

impl LeaveKind {
    pub const ALL: [LeaveKind; 3] = [LeaveKind::Annual, LeaveKind::Unpaid, LeaveKind::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            LeaveKind::Annual => "annuel",
            LeaveKind::Unpaid => "sans_solde",
            LeaveKind::Other => "autre",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            LeaveKind::Annual => "Congé annuel",
            LeaveKind::Unpaid => "Congé sans solde",
            LeaveKind::Other => "Autre",
        }
    }
}

/// Normalized body of `POST /api/demandes`. `None` is transmitted as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateHrRequest {
    pub employe_id: EmployeeId,
    pub type_demande: RequestVariant,
    pub titre: String,
    pub date_depart: Option<NaiveDate>,
    pub date_retour: Option<NaiveDate>,
    #[serde(with = "hour_minute")]
    pub heure_depart: Option<NaiveTime>,
    #[serde(with = "hour_minute")]
    pub heure_retour: Option<NaiveTime>,
    pub demi_journee: bool,
    pub type_conge: Option<LeaveKind>,
    pub type_conge_autre: Option<String>,
    pub frais_deplacement: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    #[default]
    #[serde(rename = "attestation_travail")]
    WorkCertificate,
    #[serde(rename = "attestation_salaire")]
    SalaryCertificate,
}

impl DocumentType {
    pub const ALL: [DocumentType; 2] = [DocumentType::WorkCertificate, DocumentType::SalaryCertificate];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::WorkCertificate => "attestation_travail",
            DocumentType::SalaryCertificate => "attestation_salaire",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentType::WorkCertificate => "Attestation de Travail",
            DocumentType::SalaryCertificate => "Attestation de Salaire",
        }
    }
}

/// Body of `POST /api/generer-attestation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateDocumentRequest {
    pub employe_id: EmployeeId,
    pub type_document: DocumentType,
}

/// Body of `POST /api/demandes/attestation-travail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCertificateRequest {
    pub employe_id: EmployeeId,
    pub date_embauche: NaiveDate,
    pub poste: String,
}

/// Failure body returned by the backend: `{ "error": "..." }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ServerErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const APPLICATION_ERROR: &str = "APPLICATION_ERROR";
pub const CONNECTIVITY_ERROR: &str = "CONNECTIVITY_ERROR";
pub const BACKEND_UNAVAILABLE: &str = "BACKEND_UNAVAILABLE";

pub const CONNECTIVITY_MESSAGE: &str = "Erreur de connexion au serveur";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    #[serde(default)]
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, VALIDATION_ERROR)
    }

    pub fn application(msg: impl Into<String>) -> Self {
        Self::with_code(msg, APPLICATION_ERROR)
    }

    pub fn connectivity() -> Self {
        Self::with_code(CONNECTIVITY_MESSAGE, CONNECTIVITY_ERROR)
    }

    pub fn backend_unavailable(msg: impl Into<String>) -> Self {
        Self::with_code(msg, BACKEND_UNAVAILABLE)
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn is_connectivity(&self) -> bool {
        self.code == CONNECTIVITY_ERROR
    }
}

/// `HH:MM` as produced by `<input type="time">`, `null` when absent.
mod hour_minute {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&time.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|value| {
            NaiveTime::parse_from_str(&value, FORMAT)
                .or_else(|_| NaiveTime::parse_from_str(&value, "%H:%M:%S"))
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}
