use std::sync::Arc;

use chrono::NaiveDate;

use crate::errors::BookingError;
use crate::models::DialogueState;
use crate::services::ai::extractor::extract_fields;
use crate::services::dialogue::{
    evaluate, route, BookingRequest, MissingField, Operation, Readiness, Route,
};
use crate::state::AppState;

pub const REPROMPT_REPLY: &str = "How can I help? I can check availability, make a booking, or look up, update or cancel an existing booking.";
pub const NOT_FOUND_REPLY: &str = "The booking reference was not found.";
pub const FAILURE_REPLY: &str = "Sorry, something went wrong. Please try again in a moment.";

/// How a turn ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    Reprompt,
    AskFor(MissingField),
    Completed { operation: Operation, reply: String },
    NotFound { operation: Operation },
    Failed,
}

impl TurnOutcome {
    pub fn reply(&self) -> String {
        match self {
            TurnOutcome::Reprompt => REPROMPT_REPLY.to_string(),
            TurnOutcome::AskFor(missing) => missing.prompt(),
            TurnOutcome::Completed { reply, .. } => reply.clone(),
            TurnOutcome::NotFound { .. } => NOT_FOUND_REPLY.to_string(),
            TurnOutcome::Failed => FAILURE_REPLY.to_string(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TurnOutcome::Reprompt => "reprompt",
            TurnOutcome::AskFor(_) => "ask_for_field",
            TurnOutcome::Completed { .. } => "completed",
            TurnOutcome::NotFound { .. } => "not_found",
            TurnOutcome::Failed => "failed",
        }
    }
}

/// Process one inbound message for a session and return the reply.
///
/// Turns of one session are serialized. Every failure is mapped to a reply,
/// so this never errors.
pub async fn handle_turn(state: &Arc<AppState>, session_id: &str, message: &str) -> String {
    let today = chrono::Local::now().date_naive();
    handle_turn_on(state, session_id, message, today).await
}

pub async fn handle_turn_on(
    state: &Arc<AppState>,
    session_id: &str,
    message: &str,
    today: NaiveDate,
) -> String {
    let _turn = state.session_locks.acquire(session_id).await;

    let mut dialogue = match state.sessions.load(session_id) {
        Ok(existing) => existing.unwrap_or_default(),
        Err(e) => {
            tracing::error!(session = session_id, error = %e, "failed to load dialogue state");
            return FAILURE_REPLY.to_string();
        }
    };
    dialogue.last_message = Some(message.to_string());

    let outcome = run_turn(state, &mut dialogue, message, today).await;
    let reply = outcome.reply();

    tracing::info!(
        session = session_id,
        intent = ?dialogue.intent,
        outcome = outcome.label(),
        "turn finished"
    );

    dialogue.last_reply = Some(reply.clone());
    dialogue.last_message = None;
    if let Err(e) = state.sessions.save(session_id, &dialogue) {
        tracing::error!(session = session_id, error = %e, "failed to save dialogue state");
    }

    reply
}

async fn run_turn(
    state: &AppState,
    dialogue: &mut DialogueState,
    message: &str,
    today: NaiveDate,
) -> TurnOutcome {
    // Extract and merge
    let extraction = tokio::time::timeout(
        state.config.extractor_timeout(),
        extract_fields(state.llm.as_ref(), dialogue, message, today),
    )
    .await;
    match extraction {
        Ok(Ok(partial)) => {
            let adopted = dialogue.merge(partial);
            tracing::debug!(fields = ?adopted, "merged extracted fields");
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "field extraction failed");
            return TurnOutcome::Failed;
        }
        Err(_) => {
            tracing::warn!("field extraction timed out");
            return TurnOutcome::Failed;
        }
    }

    // Route
    let operation = match route(dialogue.intent) {
        Route::Reprompt => return TurnOutcome::Reprompt,
        Route::Execute(operation) => operation,
    };

    // Missing-field check
    if let Readiness::Missing(missing) = evaluate(operation.intent(), dialogue) {
        tracing::debug!(operation = operation.as_str(), field = ?missing.field(), "request incomplete");
        return TurnOutcome::AskFor(missing);
    }
    let request = match BookingRequest::from_state(operation, dialogue) {
        Ok(request) => request,
        Err(field) => return TurnOutcome::AskFor(MissingField::Required(field)),
    };

    // Execute
    let result = tokio::time::timeout(
        state.config.booking_timeout(),
        request.execute(state.bookings.as_ref()),
    )
    .await
    .unwrap_or(Err(BookingError::Timeout));

    match result {
        Ok(reply) => TurnOutcome::Completed { operation, reply },
        Err(BookingError::NotFound(reference)) => {
            tracing::info!(operation = operation.as_str(), reference = %reference, "booking not found");
            TurnOutcome::NotFound { operation }
        }
        Err(e) => {
            tracing::error!(operation = operation.as_str(), error = %e, "booking operation failed");
            TurnOutcome::Failed
        }
    }
}
