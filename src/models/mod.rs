pub mod booking;
pub mod cancellation;
pub mod customer;
pub mod dialogue;
pub mod intent;

pub use booking::{AvailabilityResult, AvailableSlot, BookedCustomer, BookingResult, CancelResult};
pub use cancellation::CancellationReason;
pub use customer::CustomerInfo;
pub use dialogue::{DialogueState, FieldName, FieldValue, PartialFields};
pub use intent::Intent;
