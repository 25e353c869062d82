//! Live event handle
//!
//! Besides the CRUD calls every collection has, live events accept
//! lifecycle actions, audio controls, priority changes, input switching and
//! output group pausing. Each of those is a single templated request under
//! `/api/live_events/{id}`.

use paste::paste;
use serde_json::{json, Value};
use tracing::debug;
use transport::header::ACCEPT;
use transport::{HeaderValue, Method, Request, ResponseBody};

use crate::client::ElementalClient;
use crate::collection::Collection;
use crate::resource::CollectionResource;
use crate::Result;

/// Generates [`EventAction`] and one `<action>_event` method per action.
///
/// Every action is a body-less POST to `/api/live_events/{id}/{action}`.
macro_rules! lifecycle_actions {
    ($($action:ident),* $(,)?) => {
        paste! {
            /// Lifecycle actions accepted by a live event
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum EventAction {
                $(
                    #[doc = concat!("`POST /api/live_events/{id}/", stringify!($action), "`")]
                    [<$action:camel>],
                )*
            }

            impl EventAction {
                pub const ALL: &'static [EventAction] = &[$(EventAction::[<$action:camel>]),*];

                /// Path segment of the action
                pub fn name(&self) -> &'static str {
                    match self {
                        $(EventAction::[<$action:camel>] => stringify!($action),)*
                    }
                }
            }

            impl LiveEvent {
                $(
                    #[doc = concat!("POST `/api/live_events/{id}/", stringify!($action), "`")]
                    pub async fn [<$action _event>](&self, event_id: &str) -> Result<ResponseBody> {
                        self.perform(event_id, EventAction::[<$action:camel>]).await
                    }
                )*
            }
        }
    };
}

lifecycle_actions!(start, stop, cancel, archive, reset);

/// Event-level operations beyond CRUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventOperation {
    Lifecycle(EventAction),
    Status,
    ListInputs,
    Mute,
    Unmute,
    AdjustAudioGain,
    Priority,
    SetPriority,
    ActivateInput,
    PauseOutputGroup,
    UnpauseOutputGroup,
}

impl EventOperation {
    pub fn method(&self) -> Method {
        match self {
            EventOperation::Status | EventOperation::ListInputs | EventOperation::Priority => {
                Method::GET
            }
            _ => Method::POST,
        }
    }

    /// Last path segment, appended to `/api/live_events/{id}/`
    pub fn segment(&self) -> &'static str {
        match self {
            EventOperation::Lifecycle(action) => action.name(),
            EventOperation::Status => "status",
            EventOperation::ListInputs => "inputs",
            EventOperation::Mute => "mute_audio",
            EventOperation::Unmute => "unmute_audio",
            EventOperation::AdjustAudioGain => "adjust_audio_gain",
            EventOperation::Priority | EventOperation::SetPriority => "priority",
            EventOperation::ActivateInput => "activate_input",
            EventOperation::PauseOutputGroup => "pause_output_group",
            EventOperation::UnpauseOutputGroup => "unpause_output_group",
        }
    }

    pub fn path(&self, event_id: &str) -> String {
        format!(
            "/api/{}/{}/{}",
            Collection::LiveEvents.name(),
            event_id,
            self.segment()
        )
    }

    pub fn request(&self, event_id: &str) -> Request {
        Request::new(self.method(), self.path(event_id))
    }
}

/// Handle on the `live_events` collection
#[derive(Debug, Clone)]
pub struct LiveEvent {
    client: ElementalClient,
}

impl LiveEvent {
    pub fn new(client: ElementalClient) -> Self {
        Self { client }
    }

    /// Run a lifecycle action on an event
    pub async fn perform(&self, event_id: &str, action: EventAction) -> Result<ResponseBody> {
        debug!(event_id, action = action.name(), "Live event action");
        self.send(EventOperation::Lifecycle(action), event_id, None).await
    }

    /// GET `/api/live_events/{id}/status`, asking for JSON
    ///
    /// The body is only decoded when the client was configured with
    /// `parse_json`; otherwise the raw JSON text is returned.
    pub async fn event_status(&self, event_id: &str) -> Result<ResponseBody> {
        let request = EventOperation::Status
            .request(event_id)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        self.client.send_request(request).await
    }

    /// GET `/api/live_events/{id}/inputs`
    pub async fn list_inputs(&self, event_id: &str) -> Result<ResponseBody> {
        self.send(EventOperation::ListInputs, event_id, None).await
    }

    /// POST `/api/live_events/{id}/mute_audio`
    pub async fn mute_event(&self, event_id: &str) -> Result<ResponseBody> {
        self.send(EventOperation::Mute, event_id, None).await
    }

    /// POST `/api/live_events/{id}/unmute_audio`
    pub async fn unmute_event(&self, event_id: &str) -> Result<ResponseBody> {
        self.send(EventOperation::Unmute, event_id, None).await
    }

    /// POST `/api/live_events/{id}/adjust_audio_gain` with `<gain>`
    pub async fn adjust_audio_gain(&self, event_id: &str, gain: i32) -> Result<ResponseBody> {
        self.send(EventOperation::AdjustAudioGain, event_id, Some(json!({ "gain": gain })))
            .await
    }

    /// GET `/api/live_events/{id}/priority`
    pub async fn event_priority(&self, event_id: &str) -> Result<ResponseBody> {
        self.send(EventOperation::Priority, event_id, None).await
    }

    /// POST `/api/live_events/{id}/priority` with `<priority>`
    pub async fn set_event_priority(&self, event_id: &str, priority: u32) -> Result<ResponseBody> {
        self.send(EventOperation::SetPriority, event_id, Some(json!({ "priority": priority })))
            .await
    }

    /// POST `/api/live_events/{id}/activate_input` with `<input_id>`
    pub async fn activate_input(&self, event_id: &str, input_id: &str) -> Result<ResponseBody> {
        self.send(EventOperation::ActivateInput, event_id, Some(json!({ "input_id": input_id })))
            .await
    }

    /// POST `/api/live_events/{id}/pause_output_group` with `<group_id>`
    pub async fn pause_output_group(&self, event_id: &str, group_id: &str) -> Result<ResponseBody> {
        self.send(
            EventOperation::PauseOutputGroup,
            event_id,
            Some(json!({ "group_id": group_id })),
        )
        .await
    }

    /// POST `/api/live_events/{id}/unpause_output_group` with `<group_id>`
    pub async fn unpause_output_group(&self, event_id: &str, group_id: &str) -> Result<ResponseBody> {
        self.send(
            EventOperation::UnpauseOutputGroup,
            event_id,
            Some(json!({ "group_id": group_id })),
        )
        .await
    }

    /// URL of the progress thumbnail for an event. No request is made.
    pub fn event_progress_preview(&self, event_id: &str) -> String {
        format!(
            "{}/images/thumbs/progress_job_{}.jpg",
            self.client.server_url(),
            event_id
        )
    }

    async fn send(
        &self,
        operation: EventOperation,
        event_id: &str,
        body: Option<Value>,
    ) -> Result<ResponseBody> {
        let mut request = operation.request(event_id);
        if let Some(body) = body {
            request = request.body(body);
        }
        self.client.send_request(request).await
    }
}

impl CollectionResource for LiveEvent {
    fn client(&self) -> &ElementalClient {
        &self.client
    }

    fn collection(&self) -> Collection {
        Collection::LiveEvents
    }
}
