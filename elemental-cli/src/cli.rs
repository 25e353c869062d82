//! Argument parsing and command dispatch

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use elemental_api::{
    ClientConfig, Collection, CollectionResource, Credentials, ElementalClient, EventAction,
    ResponseBody,
};
use serde_json::Value;

use crate::logging::LoggingMode;

/// Talk to an Elemental Live appliance over its REST API
#[derive(Parser, Debug)]
#[command(name = "elemental")]
#[command(about = "Elemental Live REST API client")]
#[command(version)]
pub struct Args {
    /// Base URL of the appliance, e.g. http://encoder.local
    #[arg(long, env = "ELEMENTAL_URL")]
    pub url: String,

    /// User name for signed requests
    #[arg(long, env = "ELEMENTAL_USER")]
    pub user: Option<String>,

    /// API key for signed requests
    #[arg(long, env = "ELEMENTAL_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Decode JSON responses instead of printing them verbatim
    #[arg(long, env = "ELEMENTAL_PARSE_JSON")]
    pub parse_json: bool,

    /// Log output mode
    #[arg(long, value_enum, default_value = "development")]
    pub log_mode: LoggingMode,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List a collection
    List {
        collection: Collection,
        /// Query parameter as key=value, repeatable
        #[arg(short, long = "query", value_parser = parse_query_pair)]
        query: Vec<(String, String)>,
    },
    /// Fetch one member of a collection
    Get { collection: Collection, id: String },
    /// Create a member from a JSON body
    Create {
        collection: Collection,
        #[arg(value_parser = parse_body)]
        body: Value,
    },
    /// Replace a member with a JSON body
    Update {
        collection: Collection,
        id: String,
        #[arg(value_parser = parse_body)]
        body: Value,
    },
    /// Delete a member
    Delete { collection: Collection, id: String },
    /// Run a lifecycle action on a live event
    Event {
        #[arg(value_parser = parse_event_action)]
        action: EventAction,
        id: String,
    },
    /// Live event status
    Status { id: String },
    /// Inputs of a live event
    Inputs { id: String },
    /// Mute a live event
    Mute { id: String },
    /// Unmute a live event
    Unmute { id: String },
    /// Adjust the audio gain of a live event
    Gain {
        id: String,
        #[arg(allow_negative_numbers = true)]
        gain: i32,
    },
    /// Show or change the priority of a live event
    Priority {
        id: String,
        #[arg(long)]
        set: Option<u32>,
    },
    /// Switch a live event to another input
    ActivateInput { id: String, input_id: String },
    /// Pause an output group
    PauseOutputGroup { id: String, group_id: String },
    /// Resume a paused output group
    UnpauseOutputGroup { id: String, group_id: String },
    /// Print the progress thumbnail URL of a live event
    Preview { id: String },
}

/// What a command prints
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Value(Value),
    Text(String),
}

impl From<ResponseBody> for Output {
    fn from(body: ResponseBody) -> Self {
        match body {
            ResponseBody::Xml(value) | ResponseBody::Json(value) => Output::Value(value),
            ResponseBody::Raw(text) => Output::Text(text),
        }
    }
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if self.user.is_some() != self.api_key.is_some() {
            return Err(anyhow!("--user and --api-key must be given together"));
        }

        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            _ => Err(anyhow!(
                "Invalid log level '{}'. Valid levels: error, warn, info, debug, trace",
                self.log_level
            )),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.url.as_str()).with_parse_json(self.parse_json);
        if let (Some(user), Some(api_key)) = (&self.user, &self.api_key) {
            config = config.with_credentials(Credentials::new(user.as_str(), api_key.as_str()));
        }
        config
    }
}

/// Execute one command against the appliance
pub async fn run(config: ClientConfig, command: Command) -> Result<Output> {
    let client = ElementalClient::with_config(config)?;
    let events = client.live_events();

    let body = match command {
        Command::List { collection, query } => {
            client.resource(collection).list_with_query(query).await?
        }
        Command::Get { collection, id } => client.resource(collection).retrieve(&id).await?,
        Command::Create { collection, body } => client.resource(collection).create(body).await?,
        Command::Update {
            collection,
            id,
            body,
        } => client.resource(collection).update(&id, body).await?,
        Command::Delete { collection, id } => client.resource(collection).delete(&id).await?,
        Command::Event { action, id } => events.perform(&id, action).await?,
        Command::Status { id } => events.event_status(&id).await?,
        Command::Inputs { id } => events.list_inputs(&id).await?,
        Command::Mute { id } => events.mute_event(&id).await?,
        Command::Unmute { id } => events.unmute_event(&id).await?,
        Command::Gain { id, gain } => events.adjust_audio_gain(&id, gain).await?,
        Command::Priority { id, set: None } => events.event_priority(&id).await?,
        Command::Priority {
            id,
            set: Some(priority),
        } => events.set_event_priority(&id, priority).await?,
        Command::ActivateInput { id, input_id } => events.activate_input(&id, &input_id).await?,
        Command::PauseOutputGroup { id, group_id } => {
            events.pause_output_group(&id, &group_id).await?
        }
        Command::UnpauseOutputGroup { id, group_id } => {
            events.unpause_output_group(&id, &group_id).await?
        }
        Command::Preview { id } => return Ok(Output::Text(events.event_progress_preview(&id))),
    };

    Ok(body.into())
}

fn parse_query_pair(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got '{}'", raw))?;
    Ok((key.to_string(), value.to_string()))
}

fn parse_body(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).context("body must be a JSON document")
}

fn parse_event_action(raw: &str) -> Result<EventAction> {
    EventAction::ALL
        .iter()
        .copied()
        .find(|action| action.name() == raw)
        .ok_or_else(|| {
            let names: Vec<_> = EventAction::ALL.iter().map(|a| a.name()).collect();
            anyhow!("unknown action '{}', expected one of: {}", raw, names.join(", "))
        })
}
