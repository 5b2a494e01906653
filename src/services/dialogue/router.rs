use chrono::NaiveDate;

use crate::errors::BookingError;
use crate::models::{CancellationReason, DialogueState, FieldName, Intent};
use crate::services::booking::{BookingChanges, BookingOperations, NewBooking};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CheckAvailability,
    CreateBooking,
    GetBookingDetails,
    UpdateBooking,
    CancelBooking,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CheckAvailability => "check_availability",
            Operation::CreateBooking => "create_booking",
            Operation::GetBookingDetails => "get_booking_details",
            Operation::UpdateBooking => "update_booking",
            Operation::CancelBooking => "cancel_booking",
        }
    }

    pub fn intent(&self) -> Intent {
        match self {
            Operation::CheckAvailability => Intent::CheckAvailability,
            Operation::CreateBooking => Intent::MakeBooking,
            Operation::GetBookingDetails => Intent::GetBookingDetails,
            Operation::UpdateBooking => Intent::UpdateBooking,
            Operation::CancelBooking => Intent::CancelBooking,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// No usable intent yet: ask a generic clarifying question.
    Reprompt,
    Execute(Operation),
}

pub fn route(intent: Option<Intent>) -> Route {
    match intent {
        Some(Intent::CheckAvailability) => Route::Execute(Operation::CheckAvailability),
        Some(Intent::MakeBooking) => Route::Execute(Operation::CreateBooking),
        Some(Intent::GetBookingDetails) => Route::Execute(Operation::GetBookingDetails),
        Some(Intent::UpdateBooking) => Route::Execute(Operation::UpdateBooking),
        Some(Intent::CancelBooking) => Route::Execute(Operation::CancelBooking),
        None => Route::Reprompt,
    }
}

/// A fully specified call to the booking provider.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingRequest {
    CheckAvailability {
        visit_date: NaiveDate,
        party_size: u32,
    },
    Create(NewBooking),
    GetDetails {
        reference: String,
    },
    Update {
        reference: String,
        changes: BookingChanges,
    },
    Cancel {
        reference: String,
        reason: CancellationReason,
    },
}

impl BookingRequest {
    /// Picks the subset of the dialogue the operation needs. Fails with the
    /// first required field that is still empty.
    pub fn from_state(operation: Operation, state: &DialogueState) -> Result<Self, FieldName> {
        let request = match operation {
            Operation::CheckAvailability => BookingRequest::CheckAvailability {
                visit_date: require(state.visit_date, FieldName::VisitDate)?,
                party_size: require(state.party_size, FieldName::PartySize)?,
            },
            Operation::CreateBooking => BookingRequest::Create(NewBooking {
                visit_date: require(state.visit_date, FieldName::VisitDate)?,
                visit_time: require(state.visit_time, FieldName::VisitTime)?,
                party_size: require(state.party_size, FieldName::PartySize)?,
                special_requests: state.special_requests.clone(),
                is_leave_time_confirmed: state.is_leave_time_confirmed,
                customer: state.customer.clone(),
            }),
            Operation::GetBookingDetails => BookingRequest::GetDetails {
                reference: reference(state)?,
            },
            Operation::UpdateBooking => BookingRequest::Update {
                reference: reference(state)?,
                changes: BookingChanges {
                    visit_date: state.visit_date,
                    visit_time: state.visit_time,
                    party_size: state.party_size,
                    special_requests: state.special_requests.clone(),
                    is_leave_time_confirmed: state.is_leave_time_confirmed,
                },
            },
            Operation::CancelBooking => BookingRequest::Cancel {
                reference: reference(state)?,
                reason: state.cancellation_reason.unwrap_or_default(),
            },
        };
        Ok(request)
    }

    /// Runs the request and renders the provider's answer as reply text.
    pub async fn execute(&self, bookings: &dyn BookingOperations) -> Result<String, BookingError> {
        let reply = match self {
            BookingRequest::CheckAvailability {
                visit_date,
                party_size,
            } => bookings
                .check_availability(*visit_date, *party_size)
                .await?
                .to_string(),
            BookingRequest::Create(booking) => bookings.create_booking(booking).await?.to_string(),
            BookingRequest::GetDetails { reference } => {
                bookings.get_booking_details(reference).await?.to_string()
            }
            BookingRequest::Update { reference, changes } => {
                bookings.update_booking(reference, changes).await?.to_string()
            }
            BookingRequest::Cancel { reference, reason } => {
                bookings.cancel_booking(reference, *reason).await?.to_string()
            }
        };
        Ok(reply)
    }
}

fn require<T>(value: Option<T>, field: FieldName) -> Result<T, FieldName> {
    value.ok_or(field)
}

fn reference(state: &DialogueState) -> Result<String, FieldName> {
    require(state.booking_reference.clone(), FieldName::BookingReference)
}
