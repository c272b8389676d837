//! Thin JSON client for the external booking REST API.
//!
//! The server is authoritative for all writes: a booking that collides
//! with another client's concurrent reservation comes back as an API
//! error, never something detected locally. The client holds an
//! optional [`Session`] fixed at construction; re-authenticating means
//! building a new client around the new session value.

use crate::api::session::Session;
use crate::config::ApiConfig;
use crate::domain::{Booking, NewBooking, Profile, Venue, VenueSubmission};
use crate::error::{BookerError, Result};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Successful responses arrive wrapped in a `data` envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error responses carry a list of messages.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Option<Session>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            session,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, format!("{}/{}", self.base_url, path));
        if let Some(key) = &self.api_key {
            builder = builder.header("X-Noroff-API-Key", key);
        }
        if let Some(session) = &self.session {
            builder = builder.bearer_auth(&session.access_token);
        }
        builder
    }

    fn session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| BookerError::Auth("this command requires `venue-booker login` first".into()))
    }

    pub fn session_name(&self) -> Result<&str> {
        Ok(&self.session()?.name)
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response.text().await.unwrap_or_default()));
        }
        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    async fn send_no_content(&self, builder: RequestBuilder) -> Result<()> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response.text().await.unwrap_or_default()));
        }
        Ok(())
    }

    fn api_error(status: StatusCode, body: String) -> BookerError {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.errors.into_iter().next())
            .map(|e| e.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        BookerError::Api {
            status: status.as_u16(),
            message,
        }
    }

    // --- auth ---

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        venue_manager: bool,
    ) -> Result<Profile> {
        let body = json!({
            "name": name,
            "email": email,
            "password": password,
            "venueManager": venue_manager,
        });
        let profile: Profile = self
            .send(self.request(Method::POST, "auth/register").json(&body))
            .await?;
        info!("Registered profile {}", profile.name);
        Ok(profile)
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let body = json!({ "email": email, "password": password });
        let session: Session = self
            .send(self.request(Method::POST, "auth/login?_holidaze=true").json(&body))
            .await?;
        info!("Logged in as {}", session.name);
        Ok(session)
    }

    // --- venues ---

    #[instrument(skip(self))]
    pub async fn list_venues(&self, query: Option<&str>) -> Result<Vec<Venue>> {
        let path = match query {
            Some(q) => format!("holidaze/venues/search?q={}", urlencode(q)),
            None => "holidaze/venues".to_string(),
        };
        let venues: Vec<Venue> = self.send(self.request(Method::GET, &path)).await?;
        debug!("Fetched {} venues", venues.len());
        Ok(venues)
    }

    /// Fetches one venue with its bookings and owner expanded, the
    /// input needed to build an availability index.
    #[instrument(skip(self))]
    pub async fn venue_with_bookings(&self, id: Uuid) -> Result<Venue> {
        let path = format!("holidaze/venues/{id}?_bookings=true&_owner=true");
        self.send(self.request(Method::GET, &path)).await
    }

    #[instrument(skip(self, venue))]
    pub async fn create_venue(&self, venue: &VenueSubmission) -> Result<Venue> {
        self.session()?;
        let created: Venue = self
            .send(self.request(Method::POST, "holidaze/venues").json(venue))
            .await?;
        info!("Created venue {} ({})", created.name, created.id);
        Ok(created)
    }

    #[instrument(skip(self, venue))]
    pub async fn update_venue(&self, id: Uuid, venue: &VenueSubmission) -> Result<Venue> {
        self.session()?;
        let path = format!("holidaze/venues/{id}");
        self.send(self.request(Method::PUT, &path).json(venue)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_venue(&self, id: Uuid) -> Result<()> {
        self.session()?;
        let path = format!("holidaze/venues/{id}");
        self.send_no_content(self.request(Method::DELETE, &path)).await
    }

    // --- bookings ---

    #[instrument(skip(self, booking))]
    pub async fn create_booking(&self, booking: &NewBooking) -> Result<Booking> {
        self.session()?;
        let created: Booking = self
            .send(self.request(Method::POST, "holidaze/bookings").json(booking))
            .await?;
        info!(
            "Created booking {} to {} for {} guests",
            created.date_from, created.date_to, created.guests
        );
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn delete_booking(&self, id: Uuid) -> Result<()> {
        self.session()?;
        let path = format!("holidaze/bookings/{id}");
        self.send_no_content(self.request(Method::DELETE, &path)).await
    }

    // --- profiles ---

    #[instrument(skip(self))]
    pub async fn profile_bookings(&self, name: &str) -> Result<Vec<Booking>> {
        self.session()?;
        let path = format!("holidaze/profiles/{name}/bookings?_venue=true");
        self.send(self.request(Method::GET, &path)).await
    }

    #[instrument(skip(self))]
    pub async fn profile_venues(&self, name: &str) -> Result<Vec<Venue>> {
        self.session()?;
        let path = format!("holidaze/profiles/{name}/venues?_bookings=true");
        self.send(self.request(Method::GET, &path)).await
    }
}

/// Minimal query-string escaping for free-text search input.
fn urlencode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
