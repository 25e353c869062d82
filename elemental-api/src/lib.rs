//! Elemental Live API client
//!
//! Typed handles over the appliance's REST collections. Every call maps to
//! exactly one HTTP request issued through the `elemental-transport` crate,
//! which takes care of signing and response decoding.
//!
//! ```rust,no_run
//! use elemental_api::{CollectionResource, ElementalClient, ResponseBody};
//!
//! # async fn run() -> elemental_api::Result<()> {
//! let client = ElementalClient::new("http://encoder.local")?;
//! let events = client.live_events();
//!
//! if let ResponseBody::Xml(event) = events.retrieve("12").await? {
//!     println!("{}", event["live_event"]["status"]);
//! }
//! events.stop_event("12").await?;
//! println!("{}", events.event_progress_preview("12"));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod collection;
pub mod device;
pub mod live_event;
pub mod resource;
pub mod util;

pub use client::ElementalClient;
pub use collection::{Collection, ResourceOperation, UnknownCollection};
pub use device::Device;
pub use live_event::{EventAction, EventOperation, LiveEvent};
pub use resource::{CollectionResource, Resource};
pub use util::{extract_id_from_href, format_date};

pub use transport::{ClientConfig, Credentials, Error, Request, ResponseBody, Result};
