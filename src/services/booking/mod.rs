pub mod client;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::errors::BookingError;
use crate::models::{AvailabilityResult, BookingResult, CancelResult, CancellationReason, CustomerInfo};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub visit_date: NaiveDate,
    pub visit_time: NaiveTime,
    pub party_size: u32,
    pub special_requests: Option<String>,
    pub is_leave_time_confirmed: Option<bool>,
    pub customer: Option<CustomerInfo>,
}

impl NewBooking {
    pub fn to_form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("VisitDate", self.visit_date.format(DATE_FORMAT).to_string()),
            ("VisitTime", self.visit_time.format(TIME_FORMAT).to_string()),
            ("PartySize", self.party_size.to_string()),
            ("ChannelCode", "ONLINE".to_string()),
        ];
        if let Some(requests) = &self.special_requests {
            fields.push(("SpecialRequests", requests.clone()));
        }
        if let Some(confirmed) = self.is_leave_time_confirmed {
            fields.push(("IsLeaveTimeConfirmed", confirmed.to_string()));
        }
        if let Some(customer) = &self.customer {
            fields.extend(customer.to_form_fields());
        }
        fields
    }
}

/// Fields to change on an existing booking; `None` leaves a value as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingChanges {
    pub visit_date: Option<NaiveDate>,
    pub visit_time: Option<NaiveTime>,
    pub party_size: Option<u32>,
    pub special_requests: Option<String>,
    pub is_leave_time_confirmed: Option<bool>,
}

impl BookingChanges {
    pub fn to_form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(date) = self.visit_date {
            fields.push(("VisitDate", date.format(DATE_FORMAT).to_string()));
        }
        if let Some(time) = self.visit_time {
            fields.push(("VisitTime", time.format(TIME_FORMAT).to_string()));
        }
        if let Some(size) = self.party_size {
            fields.push(("PartySize", size.to_string()));
        }
        if let Some(requests) = &self.special_requests {
            fields.push(("SpecialRequests", requests.clone()));
        }
        if let Some(confirmed) = self.is_leave_time_confirmed {
            fields.push(("IsLeaveTimeConfirmed", confirmed.to_string()));
        }
        fields
    }
}

/// The five operations offered by the restaurant booking provider.
#[async_trait]
pub trait BookingOperations: Send + Sync {
    async fn check_availability(
        &self,
        visit_date: NaiveDate,
        party_size: u32,
    ) -> Result<AvailabilityResult, BookingError>;

    async fn create_booking(&self, booking: &NewBooking) -> Result<BookingResult, BookingError>;

    async fn get_booking_details(&self, reference: &str) -> Result<BookingResult, BookingError>;

    async fn update_booking(
        &self,
        reference: &str,
        changes: &BookingChanges,
    ) -> Result<BookingResult, BookingError>;

    async fn cancel_booking(
        &self,
        reference: &str,
        reason: CancellationReason,
    ) -> Result<CancelResult, BookingError>;
}
