//! Device handle

use crate::client::ElementalClient;
use crate::collection::Collection;
use crate::resource::CollectionResource;

/// Handle on the `devices` collection (capture cards and other hardware)
#[derive(Debug, Clone)]
pub struct Device {
    client: ElementalClient,
}

impl Device {
    pub fn new(client: ElementalClient) -> Self {
        Self { client }
    }
}

impl CollectionResource for Device {
    fn client(&self) -> &ElementalClient {
        &self.client
    }

    fn collection(&self) -> Collection {
        Collection::Devices
    }
}
