use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use web_sys::window;

use crate::models::{Conversation, Settings};
use crate::state::AppState;

/// Single namespace key for the whole persisted record.
pub const STATE_KEY: &str = "ollamastack-state";

pub struct LocalStorage;

impl LocalStorage {
    pub fn get(key: &str) -> Option<String> {
        let storage = window()?.local_storage().ok()??;
        storage.get_item(key).ok()?
    }

    pub fn set(key: &str, value: &str) {
        if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
            if storage.set_item(key, value).is_err() {
                tracing::warn!(key, "local storage write failed");
            }
        }
    }

    pub fn remove(key: &str) {
        if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(key);
        }
    }
}

/// The durable subset of AppState. Connectivity status and in-flight
/// send bookkeeping are never written.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub conversations: HashMap<String, Conversation>,
    pub current_conversation_id: Option<String>,
    pub settings: Settings,
}

impl PersistedState {
    pub fn snapshot(state: &AppState) -> Self {
        Self {
            conversations: state.conversations.clone(),
            current_conversation_id: state.current_conversation_id.clone(),
            settings: state.settings.clone(),
        }
    }

    pub fn into_app_state(self) -> AppState {
        AppState {
            conversations: self.conversations,
            current_conversation_id: self.current_conversation_id,
            settings: self.settings,
        }
    }

    pub fn encode(&self) -> Option<String> {
        match serde_json::to_string(self) {
            Ok(json) => Some(json),
            Err(err) => {
                tracing::warn!(%err, "could not serialize app state");
                None
            }
        }
    }

    /// An unreadable record is discarded, never propagated: the caller
    /// falls back to defaults.
    pub fn decode(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(state) => Some(state),
            Err(err) => {
                tracing::warn!(%err, "discarding unreadable saved state");
                None
            }
        }
    }

    pub fn load() -> Option<Self> {
        Self::decode(&LocalStorage::get(STATE_KEY)?)
    }

    pub fn save(&self) {
        if let Some(json) = self.encode() {
            LocalStorage::set(STATE_KEY, &json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{new_id, Message};

    #[test]
    fn garbage_decodes_to_none() {
        assert!(PersistedState::decode("not json at all").is_none());
        assert!(PersistedState::decode(r#"{"conversations": 42}"#).is_none());
    }

    #[test]
    fn empty_record_decodes_to_defaults() {
        let state = PersistedState::decode("{}").unwrap();
        assert!(state.conversations.is_empty());
        assert!(state.current_conversation_id.is_none());
        assert_eq!(state.settings, Settings::default());
    }

    #[test]
    fn stored_settings_fields_win_over_defaults() {
        let state =
            PersistedState::decode(r#"{"settings": {"defaultModel": "mistral"}}"#).unwrap();
        assert_eq!(state.settings.default_model, "mistral");
        assert_eq!(state.settings.temperature, 0.7);
        assert_eq!(state.settings.api_url, "http://localhost:8000");
    }

    #[test]
    fn snapshot_round_trips_through_encode_decode() {
        let mut app = AppState::default();
        let id = new_id();
        let mut conv = Conversation::new(id.clone());
        conv.messages.push(Message::user(new_id(), "hello"));
        app.conversations.insert(id.clone(), conv);
        app.current_conversation_id = Some(id);
        app.settings.temperature = 0.3;

        let json = PersistedState::snapshot(&app).encode().unwrap();
        let back = PersistedState::decode(&json).unwrap().into_app_state();
        assert_eq!(back, app);
    }

    #[test]
    fn record_layout_uses_camel_case_keys() {
        let json = PersistedState::default().encode().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("conversations").is_some());
        assert!(value.get("currentConversationId").is_some());
        assert!(value.get("settings").is_some());
    }
}
