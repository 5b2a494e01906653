use serde::{Deserialize, Serialize};

/// Reason sent with a cancellation. The numeric code is what the booking
/// provider expects as `cancellationReasonId`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancellationReason {
    #[default]
    CustomerRequest,
    RestaurantClosure,
    Weather,
    Emergency,
    NoShow,
}

impl CancellationReason {
    pub const ALL: [CancellationReason; 5] = [
        CancellationReason::CustomerRequest,
        CancellationReason::RestaurantClosure,
        CancellationReason::Weather,
        CancellationReason::Emergency,
        CancellationReason::NoShow,
    ];

    pub fn code(&self) -> u8 {
        match self {
            CancellationReason::CustomerRequest => 1,
            CancellationReason::RestaurantClosure => 2,
            CancellationReason::Weather => 3,
            CancellationReason::Emergency => 4,
            CancellationReason::NoShow => 5,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CancellationReason::CustomerRequest => "Customer requested cancellation",
            CancellationReason::RestaurantClosure => "Restaurant temporarily closed",
            CancellationReason::Weather => "Cancelled due to weather conditions",
            CancellationReason::Emergency => "Emergency Cancellation",
            CancellationReason::NoShow => "Customer did not show up",
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|r| i64::from(r.code()) == code)
    }

    /// Accepts the enum name in any case ("no_show", "NoShow", "no show").
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "customerrequest" => Some(CancellationReason::CustomerRequest),
            "restaurantclosure" => Some(CancellationReason::RestaurantClosure),
            "weather" => Some(CancellationReason::Weather),
            "emergency" => Some(CancellationReason::Emergency),
            "noshow" => Some(CancellationReason::NoShow),
            other => other.parse().ok().and_then(Self::from_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        let codes: Vec<u8> = CancellationReason::ALL.iter().map(|r| r.code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(CancellationReason::from_code(3), Some(CancellationReason::Weather));
        assert_eq!(CancellationReason::from_code(0), None);
        assert_eq!(CancellationReason::from_code(6), None);
    }

    #[test]
    fn test_parse_names_and_numeric_strings() {
        assert_eq!(CancellationReason::parse("NO_SHOW"), Some(CancellationReason::NoShow));
        assert_eq!(
            CancellationReason::parse("restaurant closure"),
            Some(CancellationReason::RestaurantClosure)
        );
        assert_eq!(CancellationReason::parse("4"), Some(CancellationReason::Emergency));
        assert_eq!(CancellationReason::parse("changed my mind"), None);
    }

    #[test]
    fn test_default_is_customer_request() {
        assert_eq!(CancellationReason::default(), CancellationReason::CustomerRequest);
        assert_eq!(
            CancellationReason::default().description(),
            "Customer requested cancellation"
        );
    }
}
