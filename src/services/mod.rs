pub mod ai;
pub mod booking;
pub mod conversation;
pub mod dialogue;
pub mod session;
