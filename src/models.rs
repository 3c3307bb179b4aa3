use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const DEFAULT_TITLE: &str = "New Conversation";
pub const TITLE_MAX_CHARS: usize = 50;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// True only for an assistant placeholder still waiting on the backend.
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, Value>>,
}

impl Message {
    pub fn user(id: String, content: &str) -> Self {
        Self {
            id,
            role: Role::User,
            content: content.to_string(),
            timestamp: Utc::now(),
            pending: false,
            error: None,
            metadata: None,
        }
    }

    /// The optimistic assistant placeholder appended right after a user
    /// message. Resolved in place, located by id.
    pub fn placeholder(id: String) -> Self {
        Self {
            id,
            role: Role::Assistant,
            content: String::new(),
            timestamp: Utc::now(),
            pending: true,
            error: None,
            metadata: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.messages.iter().any(|m| m.pending)
    }

    pub fn message_mut(&mut self, id: &str) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == id)
    }
}

/// Sidebar label for a fresh conversation: the first user message,
/// capped at 50 characters.
pub fn derive_title(text: &str) -> String {
    let mut title: String = text.chars().take(TITLE_MAX_CHARS).collect();
    if text.chars().count() > TITLE_MAX_CHARS {
        title.push('…');
    }
    title
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

// Container-level default so settings written by an older build merge
// per-field over the current defaults when loaded back.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub api_url: String,
    pub default_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub theme: Theme,
    pub auto_scroll: bool,
    pub show_timestamps: bool,
    pub enable_sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            default_model: "llama3".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            theme: Theme::Light,
            auto_scroll: true,
            show_timestamps: false,
            enable_sound: false,
        }
    }
}

/// Partial settings update: set fields win, unset fields keep their
/// current value.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SettingsPatch {
    pub api_url: Option<String>,
    pub default_model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub theme: Option<Theme>,
    pub auto_scroll: Option<bool>,
    pub show_timestamps: Option<bool>,
    pub enable_sound: Option<bool>,
}

impl Settings {
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.api_url {
            self.api_url = v;
        }
        if let Some(v) = patch.default_model {
            self.default_model = v;
        }
        if let Some(v) = patch.temperature {
            self.temperature = v;
        }
        if let Some(v) = patch.max_tokens {
            self.max_tokens = v;
        }
        if let Some(v) = patch.theme {
            self.theme = v;
        }
        if let Some(v) = patch.auto_scroll {
            self.auto_scroll = v;
        }
        if let Some(v) = patch.show_timestamps {
            self.show_timestamps = v;
        }
        if let Some(v) = patch.enable_sound {
            self.enable_sound = v;
        }
    }
}

/// Backend reachability. Ephemeral: never persisted, starts over as
/// Checking on every launch.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConnectivityStatus {
    Online,
    Offline,
    Checking,
}

// API DTOs

#[derive(Serialize, Debug)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    pub message: String,
    pub conversation_id: String,
    pub model_used: String,
    pub timestamp: String,
    #[serde(default)]
    pub metadata: Option<HashMap<String, Value>>,
}

#[derive(Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub ollama_status: String,
    #[serde(default)]
    pub version: String,
}
