//! Collections exposed by the appliance and the CRUD operation table
//!
//! Every collection lives under `/api/{name}` and supports the same five
//! operations. The verb and path of each operation are fixed here so the
//! handles only have to supply ids and bodies.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use transport::Method;

/// Named collections of the Elemental Live API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Live events (encoding jobs)
    LiveEvents,
    /// Encoding presets
    Presets,
    /// Scheduled events
    Schedules,
    /// Live event profiles used as templates
    LiveEventProfiles,
    /// Preset categories
    PresetCategories,
    /// Hardware devices (SDI cards, capture devices)
    Devices,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::LiveEvents,
        Collection::Presets,
        Collection::Schedules,
        Collection::LiveEventProfiles,
        Collection::PresetCategories,
        Collection::Devices,
    ];

    /// Path segment of the collection, as used in `/api/{name}`
    pub fn name(&self) -> &'static str {
        match self {
            Collection::LiveEvents => "live_events",
            Collection::Presets => "presets",
            Collection::Schedules => "schedules",
            Collection::LiveEventProfiles => "live_event_profiles",
            Collection::PresetCategories => "preset_categories",
            Collection::Devices => "devices",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string does not name a known collection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown collection '{0}'")]
pub struct UnknownCollection(pub String);

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCollection(s.to_string()))
    }
}

/// CRUD operations shared by every collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    List,
    Retrieve,
    Create,
    Update,
    Delete,
}

impl ResourceOperation {
    pub const ALL: [ResourceOperation; 5] = [
        ResourceOperation::List,
        ResourceOperation::Retrieve,
        ResourceOperation::Create,
        ResourceOperation::Update,
        ResourceOperation::Delete,
    ];

    pub fn method(&self) -> Method {
        match self {
            ResourceOperation::List | ResourceOperation::Retrieve => Method::GET,
            ResourceOperation::Create => Method::POST,
            ResourceOperation::Update => Method::PUT,
            ResourceOperation::Delete => Method::DELETE,
        }
    }

    /// Whether the operation addresses a single member of the collection
    pub fn takes_id(&self) -> bool {
        matches!(
            self,
            ResourceOperation::Retrieve | ResourceOperation::Update | ResourceOperation::Delete
        )
    }

    /// Whether the operation sends a body
    pub fn takes_body(&self) -> bool {
        matches!(self, ResourceOperation::Create | ResourceOperation::Update)
    }

    /// Request path for this operation; `id` is ignored by `List` and `Create`
    pub fn path(&self, collection: Collection, id: Option<&str>) -> String {
        match id {
            Some(id) if self.takes_id() => format!("/api/{}/{}", collection.name(), id),
            _ => format!("/api/{}", collection.name()),
        }
    }
}
