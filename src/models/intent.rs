use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    CheckAvailability,
    MakeBooking,
    GetBookingDetails,
    UpdateBooking,
    CancelBooking,
}

impl Intent {
    pub const ALL: [Intent; 5] = [
        Intent::CheckAvailability,
        Intent::MakeBooking,
        Intent::GetBookingDetails,
        Intent::UpdateBooking,
        Intent::CancelBooking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::CheckAvailability => "CHECK_AVAILABILITY",
            Intent::MakeBooking => "MAKE_BOOKING",
            Intent::GetBookingDetails => "GET_BOOKING_DETAILS",
            Intent::UpdateBooking => "UPDATE_BOOKING",
            Intent::CancelBooking => "CANCEL_BOOKING",
        }
    }

    /// Lenient parse of an intent label: case, spaces and dashes are ignored,
    /// so "make booking", "make-booking" and "MakeBooking" all match.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        Self::ALL
            .into_iter()
            .find(|intent| intent.as_str().replace('_', "") == normalized)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_names() {
        for intent in Intent::ALL {
            assert_eq!(Intent::parse(intent.as_str()), Some(intent));
        }
    }

    #[test]
    fn test_parse_lenient_spelling() {
        assert_eq!(Intent::parse("make booking"), Some(Intent::MakeBooking));
        assert_eq!(Intent::parse("cancel-booking"), Some(Intent::CancelBooking));
        assert_eq!(Intent::parse("CheckAvailability"), Some(Intent::CheckAvailability));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Intent::parse("ORDER_PIZZA"), None);
        assert_eq!(Intent::parse(""), None);
    }

    #[test]
    fn test_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&Intent::GetBookingDetails).unwrap();
        assert_eq!(json, "\"GET_BOOKING_DETAILS\"");
    }
}
