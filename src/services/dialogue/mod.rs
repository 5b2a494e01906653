//! Pure decision logic for a booking dialogue: which fields an intent still
//! needs, and which provider operation a complete request goes to.

pub mod policy;
pub mod router;

pub use policy::{evaluate, MissingField, Readiness};
pub use router::{route, BookingRequest, Operation, Route};
