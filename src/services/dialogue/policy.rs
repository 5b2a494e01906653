use crate::models::{DialogueState, FieldName, Intent};

/// Fields of which an update needs at least one.
pub const UPDATABLE_FIELDS: [FieldName; 5] = [
    FieldName::VisitDate,
    FieldName::VisitTime,
    FieldName::PartySize,
    FieldName::SpecialRequests,
    FieldName::IsLeaveTimeConfirmed,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Required(FieldName),
    UpdateReference,
    UpdateDetails,
}

impl MissingField {
    pub fn prompt(&self) -> String {
        match self {
            MissingField::Required(field) => format!("Please provide {}.", field.label()),
            MissingField::UpdateReference => "What is your booking reference?".to_string(),
            MissingField::UpdateDetails => "What details would you like to update?".to_string(),
        }
    }

    pub fn field(&self) -> Option<FieldName> {
        match self {
            MissingField::Required(field) => Some(*field),
            MissingField::UpdateReference => Some(FieldName::BookingReference),
            MissingField::UpdateDetails => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    Missing(MissingField),
}

/// Required fields per intent, in the order they are asked for.
pub fn required_fields(intent: Intent) -> &'static [FieldName] {
    match intent {
        Intent::CancelBooking => &[FieldName::BookingReference],
        Intent::GetBookingDetails => &[FieldName::BookingReference],
        Intent::CheckAvailability => &[FieldName::VisitDate, FieldName::PartySize],
        Intent::MakeBooking => &[FieldName::VisitDate, FieldName::VisitTime, FieldName::PartySize],
        Intent::UpdateBooking => &[FieldName::BookingReference],
    }
}

pub fn evaluate(intent: Intent, state: &DialogueState) -> Readiness {
    if intent == Intent::UpdateBooking {
        if !state.is_set(FieldName::BookingReference) {
            return Readiness::Missing(MissingField::UpdateReference);
        }
        if !UPDATABLE_FIELDS.iter().any(|f| state.is_set(*f)) {
            return Readiness::Missing(MissingField::UpdateDetails);
        }
        return Readiness::Ready;
    }

    match required_fields(intent).iter().find(|f| !state.is_set(**f)) {
        Some(field) => Readiness::Missing(MissingField::Required(*field)),
        None => Readiness::Ready,
    }
}
