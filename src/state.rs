use std::collections::HashMap;
use std::rc::Rc;

use chrono::Utc;
use serde_json::Value;
use yew::functional::Reducible;

use crate::models::{derive_title, Conversation, Message, Settings, SettingsPatch};

/// Fixed reply shown in place of an assistant message when the backend
/// call fails.
pub const FAILURE_REPLY: &str = "Sorry, I encountered an error processing your message.";
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Process-wide state root. Conversations and messages have no lifetime
/// outside of it; connectivity status lives elsewhere and is never part
/// of this value.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct AppState {
    pub conversations: HashMap<String, Conversation>,
    pub current_conversation_id: Option<String>,
    pub settings: Settings,
}

impl AppState {
    /// A dangling current id (selected then deleted, or never created)
    /// reads as "no conversation".
    pub fn current_conversation(&self) -> Option<&Conversation> {
        self.current_conversation_id
            .as_ref()
            .and_then(|id| self.conversations.get(id))
    }

    /// Display order: most recently touched first. Computed here, never
    /// stored.
    pub fn sorted_conversations(&self) -> Vec<&Conversation> {
        let mut list: Vec<&Conversation> = self.conversations.values().collect();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        list
    }
}

pub enum AppAction {
    CreateConversation {
        id: String,
    },
    SelectConversation {
        id: String,
    },
    DeleteConversation {
        id: String,
    },
    /// Optimistic append: user message plus pending assistant
    /// placeholder, both ids generated by the caller so the placeholder
    /// can be resolved later.
    SendMessage {
        conversation_id: String,
        user_message_id: String,
        placeholder_id: String,
        text: String,
    },
    ResolveSend {
        conversation_id: String,
        placeholder_id: String,
        content: String,
        metadata: Option<HashMap<String, Value>>,
    },
    FailSend {
        conversation_id: String,
        placeholder_id: String,
        error: String,
    },
    UpdateSettings(SettingsPatch),
}

impl Reducible for AppState {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: AppAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            AppAction::CreateConversation { id } => {
                // Map entry and selection move in the same snapshot.
                next.conversations.insert(id.clone(), Conversation::new(id.clone()));
                next.current_conversation_id = Some(id);
            }

            AppAction::SelectConversation { id } => {
                // Existence is not validated; reads go through
                // current_conversation() which handles dangling ids.
                next.current_conversation_id = Some(id);
            }

            AppAction::DeleteConversation { id } => {
                next.conversations.remove(&id);
                if next.current_conversation_id.as_deref() == Some(id.as_str()) {
                    next.current_conversation_id = None;
                }
            }

            AppAction::SendMessage {
                conversation_id,
                user_message_id,
                placeholder_id,
                text,
            } => {
                let text = text.trim();
                if text.is_empty() {
                    return self;
                }
                let Some(conv) = next.conversations.get_mut(&conversation_id) else {
                    return self;
                };
                // One outstanding send per conversation: a second attempt
                // is rejected, not queued.
                if conv.has_pending() {
                    return self;
                }
                if conv.messages.is_empty() {
                    conv.title = derive_title(text);
                }
                conv.messages.push(Message::user(user_message_id, text));
                conv.messages.push(Message::placeholder(placeholder_id));
                conv.updated_at = Utc::now();
            }

            AppAction::ResolveSend {
                conversation_id,
                placeholder_id,
                content,
                metadata,
            } => {
                // The conversation or the placeholder may be gone by the
                // time the reply lands; a miss resolves nothing.
                let Some(conv) = next.conversations.get_mut(&conversation_id) else {
                    return self;
                };
                let Some(msg) = conv.message_mut(&placeholder_id) else {
                    return self;
                };
                msg.content = content;
                msg.pending = false;
                msg.metadata = metadata;
                conv.updated_at = Utc::now();
            }

            AppAction::FailSend {
                conversation_id,
                placeholder_id,
                error,
            } => {
                let Some(conv) = next.conversations.get_mut(&conversation_id) else {
                    return self;
                };
                let Some(msg) = conv.message_mut(&placeholder_id) else {
                    return self;
                };
                msg.content = FAILURE_REPLY.to_string();
                msg.pending = false;
                msg.error = Some(if error.is_empty() {
                    UNKNOWN_ERROR.to_string()
                } else {
                    error
                });
                // updated_at stays put: a failed exchange does not count
                // as activity for recency sorting.
            }

            AppAction::UpdateSettings(patch) => {
                next.settings.apply(patch);
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{new_id, Role, Theme};

    fn apply(state: Rc<AppState>, action: AppAction) -> Rc<AppState> {
        state.reduce(action)
    }

    fn state_with_conversation() -> (Rc<AppState>, String) {
        let id = new_id();
        let state = apply(
            Rc::new(AppState::default()),
            AppAction::CreateConversation { id: id.clone() },
        );
        (state, id)
    }

    fn send(
        state: Rc<AppState>,
        conversation_id: &str,
        text: &str,
    ) -> (Rc<AppState>, String) {
        let placeholder_id = new_id();
        let next = apply(
            state,
            AppAction::SendMessage {
                conversation_id: conversation_id.to_string(),
                user_message_id: new_id(),
                placeholder_id: placeholder_id.clone(),
                text: text.to_string(),
            },
        );
        (next, placeholder_id)
    }

    #[test]
    fn create_inserts_and_selects_atomically() {
        let (state, id) = state_with_conversation();
        assert_eq!(state.conversations.len(), 1);
        assert_eq!(state.current_conversation_id.as_deref(), Some(id.as_str()));
        let conv = state.current_conversation().unwrap();
        assert_eq!(conv.title, "New Conversation");
        assert!(conv.messages.is_empty());
    }

    #[test]
    fn select_does_not_validate_existence() {
        let (state, _) = state_with_conversation();
        let state = apply(
            state,
            AppAction::SelectConversation { id: "nope".into() },
        );
        assert_eq!(state.current_conversation_id.as_deref(), Some("nope"));
        assert!(state.current_conversation().is_none());
    }

    #[test]
    fn delete_current_clears_selection() {
        let (state, id) = state_with_conversation();
        let state = apply(state, AppAction::DeleteConversation { id });
        assert!(state.conversations.is_empty());
        assert!(state.current_conversation_id.is_none());
    }

    #[test]
    fn delete_other_keeps_selection() {
        let (state, first) = state_with_conversation();
        let second = new_id();
        let state = apply(
            state,
            AppAction::CreateConversation { id: second.clone() },
        );
        let state = apply(state, AppAction::DeleteConversation { id: first });
        assert_eq!(state.current_conversation_id.as_deref(), Some(second.as_str()));
        assert_eq!(state.conversations.len(), 1);
    }

    #[test]
    fn send_appends_user_then_placeholder() {
        let (state, id) = state_with_conversation();
        let (state, placeholder_id) = send(state, &id, "  Hello world  ");
        let conv = state.current_conversation().unwrap();

        assert_eq!(conv.messages.len(), 2);
        assert_eq!(conv.messages[0].role, Role::User);
        assert_eq!(conv.messages[0].content, "Hello world");
        assert!(!conv.messages[0].pending);
        assert_eq!(conv.messages[1].role, Role::Assistant);
        assert_eq!(conv.messages[1].id, placeholder_id);
        assert_eq!(conv.messages[1].content, "");
        assert!(conv.messages[1].pending);
        assert_eq!(conv.title, "Hello world");
    }

    #[test]
    fn send_empty_text_is_a_noop() {
        let (state, id) = state_with_conversation();
        let (next, _) = send(state.clone(), &id, "   \n\t ");
        assert!(Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn send_into_missing_conversation_is_a_noop() {
        let (state, _) = state_with_conversation();
        let (next, _) = send(state.clone(), "missing", "hi");
        assert!(Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn send_while_pending_is_rejected_not_queued() {
        let (state, id) = state_with_conversation();
        let (state, _) = send(state, &id, "first");
        let (next, _) = send(state.clone(), &id, "second");
        assert!(Rc::ptr_eq(&state, &next));
        assert_eq!(next.current_conversation().unwrap().messages.len(), 2);
    }

    #[test]
    fn at_most_one_pending_message_per_conversation() {
        let (state, id) = state_with_conversation();
        let (state, placeholder_id) = send(state, &id, "one");
        let pending = |s: &AppState| {
            s.conversations[&id]
                .messages
                .iter()
                .filter(|m| m.pending)
                .count()
        };
        assert_eq!(pending(&state), 1);

        let state = apply(
            state,
            AppAction::ResolveSend {
                conversation_id: id.clone(),
                placeholder_id,
                content: "done".into(),
                metadata: None,
            },
        );
        assert_eq!(pending(&state), 0);
    }

    #[test]
    fn sends_in_different_conversations_are_independent() {
        let (state, first) = state_with_conversation();
        let second = new_id();
        let state = apply(
            state,
            AppAction::CreateConversation { id: second.clone() },
        );
        let (state, _) = send(state, &first, "to first");
        let (state, _) = send(state, &second, "to second");
        assert!(state.conversations[&first].has_pending());
        assert!(state.conversations[&second].has_pending());
    }

    #[test]
    fn title_derived_only_from_first_message() {
        let (state, id) = state_with_conversation();
        let (state, placeholder_id) = send(state, &id, "first message");
        let state = apply(
            state,
            AppAction::ResolveSend {
                conversation_id: id.clone(),
                placeholder_id,
                content: "reply".into(),
                metadata: None,
            },
        );
        let (state, _) = send(state, &id, "second message");
        assert_eq!(state.conversations[&id].title, "first message");
    }

    #[test]
    fn long_first_message_gets_truncated_title() {
        let (state, id) = state_with_conversation();
        let text = "a".repeat(60);
        let (state, _) = send(state, &id, &text);
        let title = &state.conversations[&id].title;
        assert_eq!(title.chars().count(), 51);
        assert!(title.ends_with('…'));
    }

    #[test]
    fn resolve_fills_placeholder_in_place() {
        let (state, id) = state_with_conversation();
        let (state, placeholder_id) = send(state, &id, "hi");
        let before = state.conversations[&id].updated_at;

        std::thread::sleep(std::time::Duration::from_millis(2));
        let metadata: HashMap<String, Value> =
            [("model".to_string(), Value::from("llama3"))].into();
        let state = apply(
            state,
            AppAction::ResolveSend {
                conversation_id: id.clone(),
                placeholder_id: placeholder_id.clone(),
                content: "Hello!".into(),
                metadata: Some(metadata),
            },
        );

        let conv = &state.conversations[&id];
        assert_eq!(conv.messages.len(), 2);
        let msg = &conv.messages[1];
        assert_eq!(msg.id, placeholder_id);
        assert!(!msg.pending);
        assert_eq!(msg.content, "Hello!");
        assert!(msg.error.is_none());
        assert_eq!(
            msg.metadata.as_ref().unwrap()["model"],
            Value::from("llama3")
        );
        assert!(conv.updated_at > before);
    }

    #[test]
    fn fail_substitutes_fallback_and_keeps_updated_at() {
        let (state, id) = state_with_conversation();
        let (state, placeholder_id) = send(state, &id, "hi");
        let before = state.conversations[&id].updated_at;

        std::thread::sleep(std::time::Duration::from_millis(2));
        let state = apply(
            state,
            AppAction::FailSend {
                conversation_id: id.clone(),
                placeholder_id: placeholder_id.clone(),
                error: "request timed out".into(),
            },
        );

        let conv = &state.conversations[&id];
        let msg = &conv.messages[1];
        assert_eq!(msg.id, placeholder_id);
        assert!(!msg.pending);
        assert_eq!(msg.content, FAILURE_REPLY);
        assert_eq!(msg.error.as_deref(), Some("request timed out"));
        assert_eq!(conv.updated_at, before);
    }

    #[test]
    fn fail_with_empty_description_reads_unknown_error() {
        let (state, id) = state_with_conversation();
        let (state, placeholder_id) = send(state, &id, "hi");
        let state = apply(
            state,
            AppAction::FailSend {
                conversation_id: id.clone(),
                placeholder_id,
                error: String::new(),
            },
        );
        let msg = &state.conversations[&id].messages[1];
        assert_eq!(msg.error.as_deref(), Some(UNKNOWN_ERROR));
    }

    #[test]
    fn resolve_after_delete_is_a_silent_noop() {
        let (state, id) = state_with_conversation();
        let (state, placeholder_id) = send(state, &id, "hi");
        let state = apply(state, AppAction::DeleteConversation { id: id.clone() });
        let next = apply(
            state.clone(),
            AppAction::ResolveSend {
                conversation_id: id.clone(),
                placeholder_id,
                content: "late reply".into(),
                metadata: None,
            },
        );
        // Never recreated, never a panic.
        assert!(Rc::ptr_eq(&state, &next));
        assert!(next.conversations.is_empty());
    }

    #[test]
    fn fail_against_missing_placeholder_is_a_noop() {
        let (state, id) = state_with_conversation();
        let (state, _) = send(state, &id, "hi");
        let next = apply(
            state.clone(),
            AppAction::FailSend {
                conversation_id: id,
                placeholder_id: "not-there".into(),
                error: "boom".into(),
            },
        );
        assert!(Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn update_settings_merges_patch() {
        let state = Rc::new(AppState::default());
        let state = apply(
            state,
            AppAction::UpdateSettings(SettingsPatch {
                theme: Some(Theme::Dark),
                temperature: Some(0.1),
                ..Default::default()
            }),
        );
        assert_eq!(state.settings.theme, Theme::Dark);
        assert_eq!(state.settings.temperature, 0.1);
        assert_eq!(state.settings.max_tokens, 1000);
    }

    #[test]
    fn conversations_sort_by_recency() {
        let (state, first) = state_with_conversation();
        let second = new_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let state = apply(
            state,
            AppAction::CreateConversation { id: second.clone() },
        );
        let sorted = state.sorted_conversations();
        assert_eq!(sorted[0].id, second);
        assert_eq!(sorted[1].id, first);

        // Touching the older one moves it back to the front.
        std::thread::sleep(std::time::Duration::from_millis(2));
        let (state, _) = send(state, &first, "bump");
        let sorted = state.sorted_conversations();
        assert_eq!(sorted[0].id, first);
    }
}
