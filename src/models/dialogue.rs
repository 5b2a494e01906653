use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{CancellationReason, CustomerInfo, Intent};

/// Names of the fields a dialogue can collect. The snake_case form is used in
/// extraction JSON and in follow-up prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Intent,
    VisitDate,
    VisitTime,
    PartySize,
    SpecialRequests,
    IsLeaveTimeConfirmed,
    Customer,
    BookingReference,
    CancellationReason,
}

impl FieldName {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Intent => "intent",
            FieldName::VisitDate => "visit_date",
            FieldName::VisitTime => "visit_time",
            FieldName::PartySize => "party_size",
            FieldName::SpecialRequests => "special_requests",
            FieldName::IsLeaveTimeConfirmed => "is_leave_time_confirmed",
            FieldName::Customer => "customer",
            FieldName::BookingReference => "booking_reference",
            FieldName::CancellationReason => "cancellation_reason",
        }
    }

    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

/// One value recognized in a single user message.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Intent(Intent),
    VisitDate(NaiveDate),
    VisitTime(NaiveTime),
    PartySize(u32),
    SpecialRequests(String),
    IsLeaveTimeConfirmed(bool),
    Customer(CustomerInfo),
    BookingReference(String),
    CancellationReason(CancellationReason),
}

impl FieldValue {
    pub fn name(&self) -> FieldName {
        match self {
            FieldValue::Intent(_) => FieldName::Intent,
            FieldValue::VisitDate(_) => FieldName::VisitDate,
            FieldValue::VisitTime(_) => FieldName::VisitTime,
            FieldValue::PartySize(_) => FieldName::PartySize,
            FieldValue::SpecialRequests(_) => FieldName::SpecialRequests,
            FieldValue::IsLeaveTimeConfirmed(_) => FieldName::IsLeaveTimeConfirmed,
            FieldValue::Customer(_) => FieldName::Customer,
            FieldValue::BookingReference(_) => FieldName::BookingReference,
            FieldValue::CancellationReason(_) => FieldName::CancellationReason,
        }
    }
}

/// Sparse set of values extracted from one message, not yet merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialFields {
    values: Vec<FieldValue>,
}

impl PartialFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: FieldValue) {
        self.values.push(value);
    }

    pub fn with(mut self, value: FieldValue) -> Self {
        self.push(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldValue> {
        self.values.iter()
    }
}

impl FromIterator<FieldValue> for PartialFields {
    fn from_iter<I: IntoIterator<Item = FieldValue>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PartialFields {
    type Item = FieldValue;
    type IntoIter = std::vec::IntoIter<FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Everything known about a session's in-progress request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DialogueState {
    pub intent: Option<Intent>,
    pub visit_date: Option<NaiveDate>,
    pub visit_time: Option<NaiveTime>,
    pub party_size: Option<u32>,
    pub special_requests: Option<String>,
    pub is_leave_time_confirmed: Option<bool>,
    pub customer: Option<CustomerInfo>,
    pub booking_reference: Option<String>,
    pub cancellation_reason: Option<CancellationReason>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub last_reply: Option<String>,
}

impl DialogueState {
    /// First-write-wins merge: a value is adopted only when the field is still
    /// empty. Returns the fields that were actually set.
    pub fn merge(&mut self, partial: PartialFields) -> Vec<FieldName> {
        let mut adopted = Vec::new();
        for value in partial {
            let name = value.name();
            let was_set = match value {
                FieldValue::Intent(v) => fill(&mut self.intent, v),
                FieldValue::VisitDate(v) => fill(&mut self.visit_date, v),
                FieldValue::VisitTime(v) => fill(&mut self.visit_time, v),
                FieldValue::PartySize(v) => fill(&mut self.party_size, v),
                FieldValue::SpecialRequests(v) => fill(&mut self.special_requests, v),
                FieldValue::IsLeaveTimeConfirmed(v) => fill(&mut self.is_leave_time_confirmed, v),
                FieldValue::Customer(v) => fill(&mut self.customer, v),
                FieldValue::BookingReference(v) => fill(&mut self.booking_reference, v),
                FieldValue::CancellationReason(v) => fill(&mut self.cancellation_reason, v),
            };
            if was_set {
                adopted.push(name);
            }
        }
        adopted
    }

    pub fn is_set(&self, field: FieldName) -> bool {
        match field {
            FieldName::Intent => self.intent.is_some(),
            FieldName::VisitDate => self.visit_date.is_some(),
            FieldName::VisitTime => self.visit_time.is_some(),
            FieldName::PartySize => self.party_size.is_some(),
            FieldName::SpecialRequests => self.special_requests.is_some(),
            FieldName::IsLeaveTimeConfirmed => self.is_leave_time_confirmed.is_some(),
            FieldName::Customer => self.customer.is_some(),
            FieldName::BookingReference => self.booking_reference.is_some(),
            FieldName::CancellationReason => self.cancellation_reason.is_some(),
        }
    }

    /// Known booking fields as JSON, used as extraction context.
    pub fn known_fields_json(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}));
        if let Some(map) = value.as_object_mut() {
            map.remove("last_message");
            map.remove("last_reply");
            map.retain(|_, v| !v.is_null());
        }
        value
    }
}

fn fill<T>(slot: &mut Option<T>, value: T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}
