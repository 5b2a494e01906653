use chrono::{NaiveDate, NaiveTime};
use serde_json::{Map, Value};

use crate::models::{
    CancellationReason, CustomerInfo, DialogueState, FieldValue, Intent, PartialFields,
};
use crate::services::ai::{LlmProvider, Message};

const SYSTEM_PROMPT: &str = r#"You are the field extraction engine of a restaurant booking assistant. Detect the customer's intent and extract booking fields from their latest message.

Return ONLY valid JSON (no markdown, no explanation) with this exact structure, using null for anything not mentioned:
{
  "intent": "<one of the possible intents>" | null,
  "visit_date": "YYYY-MM-DD" | null,
  "visit_time": "HH:MM:SS" | null,
  "party_size": integer | null,
  "special_requests": string | null,
  "is_leave_time_confirmed": boolean | null,
  "customer": {
    "title": string | null,
    "first_name": string | null,
    "surname": string | null,
    "email": string | null,
    "mobile": string | null,
    "phone": string | null,
    "mobile_country_code": string | null,
    "phone_country_code": string | null,
    "receive_email_marketing": boolean | null,
    "receive_sms_marketing": boolean | null
  } | null,
  "booking_reference": string | null,
  "cancellation_reason": "CUSTOMER_REQUEST|RESTAURANT_CLOSURE|WEATHER|EMERGENCY|NO_SHOW" | null
}

Resolve relative dates ("tomorrow", "next Friday") against today's date.
If the message answers the question in your previous reply, extract the answer into the matching field.
"#;

/// Ask the language model for the fields mentioned in `message`.
///
/// Only a failed call to the provider is an error. Output that does not parse
/// degrades to an empty [`PartialFields`].
pub async fn extract_fields(
    llm: &dyn LlmProvider,
    state: &DialogueState,
    message: &str,
    today: NaiveDate,
) -> anyhow::Result<PartialFields> {
    let system = build_system_prompt(state, today);
    let response = llm.chat(&system, &[Message::user(message)]).await?;
    let fields = parse_extraction(&response);
    if fields.is_empty() {
        tracing::debug!(response = %response, "no usable fields in extraction");
    } else {
        tracing::debug!(count = fields.len(), "extracted fields");
    }
    Ok(fields)
}

fn build_system_prompt(state: &DialogueState, today: NaiveDate) -> String {
    let intents = Intent::ALL
        .iter()
        .map(|i| i.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let previous = state.last_reply.as_deref().unwrap_or("none");

    format!(
        "{SYSTEM_PROMPT}\nToday is {} ({}).\nYour previous reply was: {previous}\nFields already known: {}\n\nPossible intents:\n{intents}",
        today.format("%A %d %B %Y"),
        today.format("%Y-%m-%d"),
        state.known_fields_json(),
    )
}

pub fn parse_extraction(response: &str) -> PartialFields {
    match find_json_object(response) {
        Some(map) => fields_from_object(&map),
        None => {
            tracing::warn!("failed to parse extractor response as JSON, treating as empty");
            PartialFields::new()
        }
    }
}

fn find_json_object(response: &str) -> Option<Map<String, Value>> {
    let trimmed = response.trim();
    if let Ok(Value::Object(map)) = serde_json::from_str(trimmed) {
        return Some(map);
    }

    let cleaned = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let cleaned = cleaned.strip_suffix("```").unwrap_or(cleaned).trim();
    if let Ok(Value::Object(map)) = serde_json::from_str(cleaned) {
        return Some(map);
    }

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str(&cleaned[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn fields_from_object(map: &Map<String, Value>) -> PartialFields {
    let mut fields = PartialFields::new();
    for (key, value) in map {
        if value.is_null() {
            continue;
        }
        let parsed = match key.as_str() {
            "intent" => as_text(value).and_then(Intent::parse).map(FieldValue::Intent),
            "visit_date" => as_text(value).and_then(parse_date).map(FieldValue::VisitDate),
            "visit_time" => as_text(value).and_then(parse_time).map(FieldValue::VisitTime),
            "party_size" => parse_party_size(value).map(FieldValue::PartySize),
            "special_requests" => as_text(value)
                .map(|s| FieldValue::SpecialRequests(s.to_string())),
            "is_leave_time_confirmed" => parse_bool(value).map(FieldValue::IsLeaveTimeConfirmed),
            "customer" => parse_customer(value).map(FieldValue::Customer),
            "booking_reference" => as_text(value)
                .map(|s| FieldValue::BookingReference(s.to_string())),
            "cancellation_reason" => {
                parse_cancellation_reason(value).map(FieldValue::CancellationReason)
            }
            other => {
                tracing::debug!(field = other, "ignoring unknown extracted field");
                continue;
            }
        };
        match parsed {
            Some(field) => fields.push(field),
            None => tracing::debug!(field = %key, value = %value, "dropping unparseable field"),
        }
    }
    fields
}

/// Non-empty trimmed string, with "null"/"none" spelled out treated as absent.
fn as_text(value: &Value) -> Option<&str> {
    let s = value.as_str()?.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("null") || s.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(s)
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

fn parse_party_size(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    u32::try_from(n).ok().filter(|n| *n > 0)
}

fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn parse_customer(value: &Value) -> Option<CustomerInfo> {
    serde_json::from_value::<CustomerInfo>(value.clone())
        .ok()
        .filter(|c| !c.is_empty())
}

fn parse_cancellation_reason(value: &Value) -> Option<CancellationReason> {
    match value {
        Value::Number(n) => n.as_i64().and_then(CancellationReason::from_code),
        Value::String(s) => CancellationReason::parse(s),
        _ => None,
    }
}
