use crate::api::{CreateHrRequest, EmployeeId, LeaveKind, RequestVariant};
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;

/// Form fields, keyed by the wire name the backend uses for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestField {
    EmployeeId,
    Variant,
    Reason,
    DepartureDate,
    ReturnDate,
    DepartureTime,
    ReturnTime,
    HalfDay,
    LeaveKind,
    LeaveKindDetail,
    TravelExpense,
}

impl RequestField {
    /// Fields whose presence depends on the selected variant.
    pub const VARIANT_SPECIFIC: [RequestField; 7] = [
        RequestField::ReturnDate,
        RequestField::DepartureTime,
        RequestField::ReturnTime,
        RequestField::HalfDay,
        RequestField::LeaveKind,
        RequestField::LeaveKindDetail,
        RequestField::TravelExpense,
    ];

    pub fn key(self) -> &'static str {
        match self {
            RequestField::EmployeeId => "employe_id",
            RequestField::Variant => "type_demande",
            RequestField::Reason => "titre",
            RequestField::DepartureDate => "date_depart",
            RequestField::ReturnDate => "date_retour",
            RequestField::DepartureTime => "heure_depart",
            RequestField::ReturnTime => "heure_retour",
            RequestField::HalfDay => "demi_journee",
            RequestField::LeaveKind => "type_conge",
            RequestField::LeaveKindDetail => "type_conge_autre",
            RequestField::TravelExpense => "frais_deplacement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    Absent,
}

/// Per-variant field rules. `LeaveKindDetail` is additionally conditioned on
/// the leave kind, see [`validate`].
pub fn field_presence(variant: RequestVariant, field: RequestField) -> Presence {
    use Presence::*;
    use RequestField as F;
    use RequestVariant as V;

    match (variant, field) {
        (_, F::EmployeeId | F::Variant | F::Reason) => Required,
        (V::Resignation, F::DepartureDate) => Absent,
        (_, F::DepartureDate) => Required,
        (V::Leave | V::Mission, F::ReturnDate) => Required,
        (V::Authorization | V::Mission, F::DepartureTime | F::ReturnTime) => Required,
        (V::Leave, F::HalfDay) => Optional,
        (V::Leave, F::LeaveKind) => Required,
        (V::Leave, F::LeaveKindDetail) => Optional,
        (V::Mission, F::TravelExpense) => Optional,
        _ => Absent,
    }
}

pub fn applies(variant: Option<RequestVariant>, field: RequestField) -> bool {
    match variant {
        Some(variant) => field_presence(variant, field) != Presence::Absent,
        None => matches!(
            field,
            RequestField::EmployeeId
                | RequestField::Variant
                | RequestField::Reason
                | RequestField::DepartureDate
        ),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<RequestField, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: RequestField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: RequestField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: RequestField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: RequestField) {
        self.0.remove(&field);
    }

    pub fn fields(&self) -> impl Iterator<Item = RequestField> + '_ {
        self.0.keys().copied()
    }

    /// `{ "titre": "...", ... }`, for logging and error details.
    pub fn to_json(&self) -> serde_json::Value {
        self.0
            .iter()
            .map(|(field, message)| (field.key().to_string(), serde_json::Value::from(message.as_str())))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }
}

/// Raw form input. Text fields hold exactly what the user typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDraft {
    pub employee_id: Option<EmployeeId>,
    pub variant: Option<RequestVariant>,
    pub reason: String,
    pub departure_date: String,
    pub return_date: String,
    pub departure_time: String,
    pub return_time: String,
    pub half_day: bool,
    pub leave_kind: Option<LeaveKind>,
    pub leave_kind_detail: String,
    pub travel_expense: String,
}

/// Switches the variant and drops every variant-specific value.
pub fn apply_variant_change(draft: &RequestDraft, variant: Option<RequestVariant>) -> RequestDraft {
    let mut next = RequestDraft {
        employee_id: draft.employee_id.clone(),
        variant,
        reason: draft.reason.clone(),
        departure_date: draft.departure_date.clone(),
        ..RequestDraft::default()
    };
    if !applies(variant, RequestField::DepartureDate) {
        next.departure_date.clear();
    }
    next
}

/// Clears the errors of the fields reset by [`apply_variant_change`].
pub fn clear_variant_errors(errors: &mut FieldErrors, variant: Option<RequestVariant>) {
    for field in RequestField::VARIANT_SPECIFIC {
        errors.clear(field);
    }
    if !applies(variant, RequestField::DepartureDate) {
        errors.clear(RequestField::DepartureDate);
    }
}

pub const MSG_EMPLOYEE_REQUIRED: &str = "Veuillez sélectionner un employé";
pub const MSG_VARIANT_REQUIRED: &str = "Veuillez sélectionner un type de demande";
pub const MSG_REASON_REQUIRED: &str = "Veuillez saisir le motif de la demande";
pub const MSG_DEPARTURE_DATE_REQUIRED: &str = "Veuillez saisir la date de départ";
pub const MSG_RETURN_DATE_REQUIRED: &str = "Veuillez saisir la date de retour";
pub const MSG_RETURN_DATE_ORDER: &str = "La date de retour doit être après la date de départ";
pub const MSG_LEAVE_KIND_REQUIRED: &str = "Veuillez sélectionner un type de congé";
pub const MSG_LEAVE_DETAIL_REQUIRED: &str = "Veuillez préciser le type de congé";
pub const MSG_ARRIVAL_TIME_ORDER: &str = "L'heure d'arrivée doit être après l'heure de départ";
pub const MSG_INVALID_DATE: &str = "Date invalide (format AAAA-MM-JJ)";
pub const MSG_INVALID_TIME: &str = "Heure invalide (format HH:MM)";
pub const MSG_INVALID_AMOUNT: &str = "Montant invalide";
pub const MSG_NEGATIVE_AMOUNT: &str = "Le montant ne peut pas être négatif";

fn missing_time_message(variant: RequestVariant, field: RequestField) -> &'static str {
    match (variant, field) {
        (RequestVariant::Mission, RequestField::DepartureTime) => "Veuillez saisir l'heure de sortie",
        (RequestVariant::Mission, _) => "Veuillez saisir l'heure de retour",
        (_, RequestField::DepartureTime) => "Veuillez saisir l'heure de départ",
        _ => "Veuillez saisir l'heure d'arrivée",
    }
}

/// Blank input is `Ok(None)`; anything else must be a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| MSG_INVALID_DATE)
}

/// Accepts `HH:MM` and the `HH:MM:SS` some browsers emit.
pub fn parse_time(raw: &str) -> Result<Option<NaiveTime>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map(Some)
        .map_err(|_| MSG_INVALID_TIME)
}

/// Decimal amount, `,` accepted as separator.
pub fn parse_amount(raw: &str) -> Result<Option<f64>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value = raw
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| MSG_INVALID_AMOUNT)?;
    if !value.is_finite() {
        return Err(MSG_INVALID_AMOUNT);
    }
    if value < 0.0 {
        return Err(MSG_NEGATIVE_AMOUNT);
    }
    Ok(Some(value))
}

fn required_date(
    errors: &mut FieldErrors,
    field: RequestField,
    raw: &str,
    missing: &str,
) -> Option<NaiveDate> {
    match parse_date(raw) {
        Ok(Some(date)) => Some(date),
        Ok(None) => {
            errors.insert(field, missing);
            None
        }
        Err(msg) => {
            errors.insert(field, msg);
            None
        }
    }
}

fn required_time(
    errors: &mut FieldErrors,
    field: RequestField,
    raw: &str,
    missing: &str,
) -> Option<NaiveTime> {
    match parse_time(raw) {
        Ok(Some(time)) => Some(time),
        Ok(None) => {
            errors.insert(field, missing);
            None
        }
        Err(msg) => {
            errors.insert(field, msg);
            None
        }
    }
}

/// Returns every problem with the draft; empty iff it can be submitted.
pub fn validate(draft: &RequestDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if draft.employee_id.as_ref().map_or(true, EmployeeId::is_blank) {
        errors.insert(RequestField::EmployeeId, MSG_EMPLOYEE_REQUIRED);
    }
    if draft.reason.trim().is_empty() {
        errors.insert(RequestField::Reason, MSG_REASON_REQUIRED);
    }
    let Some(variant) = draft.variant else {
        errors.insert(RequestField::Variant, MSG_VARIANT_REQUIRED);
        if draft.departure_date.trim().is_empty() {
            errors.insert(RequestField::DepartureDate, MSG_DEPARTURE_DATE_REQUIRED);
        }
        return errors;
    };

    let presence = |field| field_presence(variant, field);

    let departure = if presence(RequestField::DepartureDate) == Presence::Required {
        required_date(
            &mut errors,
            RequestField::DepartureDate,
            &draft.departure_date,
            MSG_DEPARTURE_DATE_REQUIRED,
        )
    } else {
        None
    };

    if presence(RequestField::ReturnDate) == Presence::Required {
        let back = required_date(
            &mut errors,
            RequestField::ReturnDate,
            &draft.return_date,
            MSG_RETURN_DATE_REQUIRED,
        );
        if let (Some(departure), Some(back)) = (departure, back) {
            if back < departure {
                errors.insert(RequestField::ReturnDate, MSG_RETURN_DATE_ORDER);
            }
        }
    }

    if presence(RequestField::DepartureTime) == Presence::Required {
        let start = required_time(
            &mut errors,
            RequestField::DepartureTime,
            &draft.departure_time,
            missing_time_message(variant, RequestField::DepartureTime),
        );
        let end = required_time(
            &mut errors,
            RequestField::ReturnTime,
            &draft.return_time,
            missing_time_message(variant, RequestField::ReturnTime),
        );
        if variant == RequestVariant::Authorization {
            if let (Some(start), Some(end)) = (start, end) {
                if end <= start {
                    errors.insert(RequestField::ReturnTime, MSG_ARRIVAL_TIME_ORDER);
                }
            }
        }
    }

    if presence(RequestField::LeaveKind) == Presence::Required {
        match draft.leave_kind {
            None => errors.insert(RequestField::LeaveKind, MSG_LEAVE_KIND_REQUIRED),
            Some(LeaveKind::Other) if draft.leave_kind_detail.trim().is_empty() => {
                errors.insert(RequestField::LeaveKindDetail, MSG_LEAVE_DETAIL_REQUIRED)
            }
            Some(_) => {}
        }
    }

    if presence(RequestField::TravelExpense) != Presence::Absent {
        if let Err(msg) = parse_amount(&draft.travel_expense) {
            errors.insert(RequestField::TravelExpense, msg);
        }
    }

    errors
}

/// Builds the wire payload from a draft. Fields that do not apply to the
/// variant are sent as `null` whatever the draft holds.
pub fn normalize(draft: &RequestDraft) -> Result<CreateHrRequest, FieldErrors> {
    let errors = validate(draft);
    if !errors.is_empty() {
        return Err(errors);
    }
    let (Some(employee_id), Some(variant)) = (draft.employee_id.clone(), draft.variant) else {
        return Err(errors);
    };
    let kept = |field| field_presence(variant, field) != Presence::Absent;

    let leave_kind = draft.leave_kind.filter(|_| kept(RequestField::LeaveKind));
    let leave_kind_detail = if leave_kind == Some(LeaveKind::Other) {
        Some(draft.leave_kind_detail.trim().to_string()).filter(|detail| !detail.is_empty())
    } else {
        None
    };

    Ok(CreateHrRequest {
        employe_id: employee_id,
        type_demande: variant,
        titre: draft.reason.trim().to_string(),
        date_depart: if kept(RequestField::DepartureDate) {
            parse_date(&draft.departure_date).ok().flatten()
        } else {
            None
        },
        date_retour: if kept(RequestField::ReturnDate) {
            parse_date(&draft.return_date).ok().flatten()
        } else {
            None
        },
        heure_depart: if kept(RequestField::DepartureTime) {
            parse_time(&draft.departure_time).ok().flatten()
        } else {
            None
        },
        heure_retour: if kept(RequestField::ReturnTime) {
            parse_time(&draft.return_time).ok().flatten()
        } else {
            None
        },
        demi_journee: kept(RequestField::HalfDay) && draft.half_day,
        type_conge: leave_kind,
        type_conge_autre: leave_kind_detail,
        frais_deplacement: if kept(RequestField::TravelExpense) {
            parse_amount(&draft.travel_expense).ok().flatten()
        } else {
            None
        },
    })
}
