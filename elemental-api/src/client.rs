use std::fmt;

use chrono::{DateTime, TimeZone};
use serde_json::Value;
use transport::{ClientConfig, HttpTransport, Request, ResponseBody};

use crate::collection::Collection;
use crate::device::Device;
use crate::live_event::LiveEvent;
use crate::resource::Resource;
use crate::{util, Result};

/// Client for one Elemental Live appliance
///
/// Resource handles created from the client share its configuration and
/// connection pool; cloning the client is cheap.
///
/// ```rust,no_run
/// use elemental_api::{ClientConfig, CollectionResource, Credentials, ElementalClient};
///
/// # async fn run() -> elemental_api::Result<()> {
/// let config = ClientConfig::new("http://encoder.local")
///     .with_credentials(Credentials::new("admin", "api-key"));
/// let client = ElementalClient::with_config(config)?;
///
/// let events = client.live_events();
/// events.start_event("12").await?;
/// let presets = client.presets().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ElementalClient {
    transport: HttpTransport,
}

impl ElementalClient {
    /// Create a client without credentials or JSON decoding
    pub fn new(server_url: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(server_url))
    }

    /// Create a client over the default transport, which never follows redirects
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }

    /// Create a client over an existing transport (custom `reqwest::Client`)
    pub fn with_transport(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// Base URL without trailing slashes
    pub fn server_url(&self) -> &str {
        self.config().server_url()
    }

    /// Send a request through the signing and decoding pipeline
    pub async fn send_request(&self, request: Request) -> Result<ResponseBody> {
        self.transport.send(request).await
    }

    /// Generic handle on any collection
    pub fn resource(&self, collection: Collection) -> Resource {
        Resource::new(self.clone(), collection)
    }

    pub fn presets(&self) -> Resource {
        self.resource(Collection::Presets)
    }

    pub fn schedules(&self) -> Resource {
        self.resource(Collection::Schedules)
    }

    pub fn live_event_profiles(&self) -> Resource {
        self.resource(Collection::LiveEventProfiles)
    }

    pub fn preset_categories(&self) -> Resource {
        self.resource(Collection::PresetCategories)
    }

    pub fn live_events(&self) -> LiveEvent {
        LiveEvent::new(self.clone())
    }

    pub fn devices(&self) -> Device {
        Device::new(self.clone())
    }

    /// See [`util::format_date`]
    pub fn format_date<Tz>(date: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        util::format_date(date)
    }

    /// See [`util::extract_id_from_href`]
    pub fn extract_id_from_href(element: &Value) -> String {
        util::extract_id_from_href(element)
    }
}
