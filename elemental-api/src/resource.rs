//! Generic collection handle
//!
//! [`CollectionResource`] carries the CRUD calls shared by every handle;
//! [`Resource`] is the plain implementation used for presets, schedules,
//! live event profiles and preset categories.

use async_trait::async_trait;
use serde_json::Value;
use transport::{Request, ResponseBody};

use crate::client::ElementalClient;
use crate::collection::{Collection, ResourceOperation};
use crate::Result;

/// CRUD calls against one collection
///
/// Implementors only say which client and collection they use; the verbs
/// and paths come from [`ResourceOperation`].
#[async_trait]
pub trait CollectionResource: Send + Sync {
    fn client(&self) -> &ElementalClient;

    fn collection(&self) -> Collection;

    /// Build the request for `operation` without sending it
    fn request_for(&self, operation: ResourceOperation, id: Option<&str>, body: Option<Value>) -> Request {
        let request = Request::new(operation.method(), operation.path(self.collection(), id));
        match body {
            Some(body) if operation.takes_body() => request.body(body),
            _ => request,
        }
    }

    /// GET `/api/{collection}`
    async fn list(&self) -> Result<ResponseBody> {
        self.list_with_query(Vec::new()).await
    }

    /// GET `/api/{collection}` with query parameters such as paging filters
    async fn list_with_query(&self, query: Vec<(String, String)>) -> Result<ResponseBody> {
        let request = self
            .request_for(ResourceOperation::List, None, None)
            .queries(query);
        self.client().send_request(request).await
    }

    /// GET `/api/{collection}/{id}`
    async fn retrieve(&self, id: &str) -> Result<ResponseBody> {
        let request = self.request_for(ResourceOperation::Retrieve, Some(id), None);
        self.client().send_request(request).await
    }

    /// POST `/api/{collection}`
    async fn create(&self, data: Value) -> Result<ResponseBody> {
        let request = self.request_for(ResourceOperation::Create, None, Some(data));
        self.client().send_request(request).await
    }

    /// PUT `/api/{collection}/{id}`
    async fn update(&self, id: &str, data: Value) -> Result<ResponseBody> {
        let request = self.request_for(ResourceOperation::Update, Some(id), Some(data));
        self.client().send_request(request).await
    }

    /// DELETE `/api/{collection}/{id}`
    async fn delete(&self, id: &str) -> Result<ResponseBody> {
        let request = self.request_for(ResourceOperation::Delete, Some(id), None);
        self.client().send_request(request).await
    }
}

/// Handle on a plain collection
#[derive(Debug, Clone)]
pub struct Resource {
    client: ElementalClient,
    collection: Collection,
}

impl Resource {
    pub fn new(client: ElementalClient, collection: Collection) -> Self {
        Self { client, collection }
    }
}

impl CollectionResource for Resource {
    fn client(&self) -> &ElementalClient {
        &self.client
    }

    fn collection(&self) -> Collection {
        self.collection
    }
}
