use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AvailableSlot {
    pub time: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub max_party_size: Option<u32>,
    #[serde(default)]
    pub current_bookings: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityResult {
    #[serde(default)]
    pub restaurant: Option<String>,
    #[serde(default)]
    pub visit_date: Option<String>,
    #[serde(default)]
    pub party_size: Option<u32>,
    #[serde(default)]
    pub available_slots: Vec<AvailableSlot>,
    #[serde(default)]
    pub total_slots: Option<u32>,
}

impl AvailabilityResult {
    pub fn open_times(&self) -> Vec<String> {
        self.available_slots
            .iter()
            .filter(|slot| slot.available)
            .map(|slot| short_time(&slot.time))
            .collect()
    }
}

impl fmt::Display for AvailabilityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.visit_date.as_deref().unwrap_or("that day");
        let party = self
            .party_size
            .map(|n| format!(" for a party of {n}"))
            .unwrap_or_default();
        let times = self.open_times();

        if times.is_empty() {
            write!(f, "Sorry, there are no available times on {date}{party}.")
        } else {
            write!(f, "Available times on {date}{party}: {}.", times.join(", "))
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookedCustomer {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
}

/// Returned by create, fetch and update. Update responses carry `updates`
/// and `message` instead of the full booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingResult {
    #[serde(default)]
    pub booking_reference: Option<String>,
    #[serde(default)]
    pub booking_id: Option<i64>,
    #[serde(default)]
    pub restaurant: Option<String>,
    #[serde(default)]
    pub visit_date: Option<String>,
    #[serde(default)]
    pub visit_time: Option<String>,
    #[serde(default)]
    pub party_size: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub customer: Option<BookedCustomer>,
    #[serde(default)]
    pub updates: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl fmt::Display for BookingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reference = self.booking_reference.as_deref().unwrap_or("(no reference)");

        if self.updates.is_some() || self.status.as_deref() == Some("updated") {
            return match &self.message {
                Some(message) => f.write_str(message),
                None => write!(f, "Booking {reference} has been updated."),
            };
        }

        write!(f, "Booking {reference}")?;
        if let Some(size) = self.party_size {
            write!(f, ": {size} people")?;
        }
        if let Some(date) = &self.visit_date {
            write!(f, " on {date}")?;
        }
        if let Some(time) = &self.visit_time {
            write!(f, " at {}", short_time(time))?;
        }
        if let Some(status) = &self.status {
            write!(f, " ({status})")?;
        }
        f.write_str(".")?;
        if let Some(name) = self.customer.as_ref().and_then(|c| c.first_name.as_ref()) {
            write!(f, " Name: {name}.")?;
        }
        if let Some(requests) = &self.special_requests {
            write!(f, " Special requests: {requests}.")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CancelResult {
    #[serde(default)]
    pub booking_reference: Option<String>,
    #[serde(default)]
    pub cancellation_reason_id: Option<u8>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub cancelled_at: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl fmt::Display for CancelResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = &self.message {
            return f.write_str(message);
        }
        let reference = self.booking_reference.as_deref().unwrap_or("(no reference)");
        write!(f, "Booking {reference} has been cancelled.")?;
        if let Some(reason) = &self.cancellation_reason {
            write!(f, " Reason: {reason}.")?;
        }
        Ok(())
    }
}

/// "12:30:00" -> "12:30"; anything else is passed through.
fn short_time(time: &str) -> String {
    match time.get(..5) {
        Some(hm) if time.len() == 8 && time.ends_with(":00") => hm.to_string(),
        _ => time.to_string(),
    }
}
