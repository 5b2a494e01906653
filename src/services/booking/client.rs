use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use super::{BookingChanges, BookingOperations, NewBooking, DATE_FORMAT};
use crate::errors::BookingError;
use crate::models::{AvailabilityResult, BookingResult, CancelResult, CancellationReason};

/// HTTP binding to the restaurant's consumer booking API.
pub struct BookingClient {
    base_url: String,
    restaurant_name: String,
    bearer_token: String,
    client: reqwest::Client,
}

impl BookingClient {
    pub fn new(
        base_url: String,
        bearer_token: String,
        restaurant_name: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build booking HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            restaurant_name,
            bearer_token,
            client,
        })
    }

    pub fn restaurant_name(&self) -> &str {
        &self.restaurant_name
    }

    /// Appends each segment percent-encoded, so a reference can never leave
    /// its own path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, BookingError> {
        let invalid = || BookingError::Request(format!("invalid base URL {}", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["api", "ConsumerApi", "v1", "Restaurant", self.restaurant_name.as_str()])
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        reference: Option<&str>,
    ) -> Result<T, BookingError> {
        let resp = request.bearer_auth(&self.bearer_token).send().await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(reference) = reference {
                return Err(BookingError::NotFound(reference.to_string()));
            }
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BookingError::Http {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<T>().await.map_err(|e| BookingError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BookingOperations for BookingClient {
    async fn check_availability(
        &self,
        visit_date: NaiveDate,
        party_size: u32,
    ) -> Result<AvailabilityResult, BookingError> {
        let form = [
            ("VisitDate", visit_date.format(DATE_FORMAT).to_string()),
            ("PartySize", party_size.to_string()),
            ("ChannelCode", "ONLINE".to_string()),
        ];
        let request = self.client.post(self.url(&["AvailabilitySearch"])?).form(&form);
        self.send(request, None).await
    }

    async fn create_booking(&self, booking: &NewBooking) -> Result<BookingResult, BookingError> {
        let request = self
            .client
            .post(self.url(&["BookingWithStripeToken"])?)
            .form(&booking.to_form_fields());
        self.send(request, None).await
    }

    async fn get_booking_details(&self, reference: &str) -> Result<BookingResult, BookingError> {
        let request = self.client.get(self.url(&["Booking", reference])?);
        self.send(request, Some(reference)).await
    }

    async fn update_booking(
        &self,
        reference: &str,
        changes: &BookingChanges,
    ) -> Result<BookingResult, BookingError> {
        let request = self
            .client
            .patch(self.url(&["Booking", reference])?)
            .form(&changes.to_form_fields());
        self.send(request, Some(reference)).await
    }

    async fn cancel_booking(
        &self,
        reference: &str,
        reason: CancellationReason,
    ) -> Result<CancelResult, BookingError> {
        let form = [
            ("micrositeName", self.restaurant_name.clone()),
            ("bookingReference", reference.to_string()),
            ("cancellationReasonId", reason.code().to_string()),
        ];
        let request = self
            .client
            .post(self.url(&["Booking", reference, "Cancel"])?)
            .form(&form);
        self.send(request, Some(reference)).await
    }
}
