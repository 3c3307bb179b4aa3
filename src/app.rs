use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::chat_area::ChatArea;
use crate::components::settings::SettingsModal;
use crate::components::sidebar::Sidebar;
use crate::components::status_bar::StatusBar;
use crate::connectivity::ConnectivityMonitor;
use crate::models::{new_id, ChatRequest, ConnectivityStatus, Conversation, SettingsPatch};
use crate::services::api::ApiClient;
use crate::services::storage::PersistedState;
use crate::state::{AppAction, AppState};

const GLOBAL_STYLES: &str = r#"
    :root {
        --bg-app: #ffffff;
        --bg-sidebar: #f9f9f9;
        --bg-user: #f4f4f4;
        --bg-assistant: #ffffff;
        --border-color: #e5e5e5;
        --text-primary: #333;
        --text-secondary: #666;
        --accent-color: #10a37f;
        --accent-hover: #1a7f64;
        --danger-color: #ef4444;
    }

    * { box-sizing: border-box; }
    body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; color: var(--text-primary); }

    .app-container { display: flex; height: 100vh; overflow: hidden; }
    .main-content { flex-grow: 1; display: flex; flex-direction: column; position: relative; background: var(--bg-app); }
    .header { padding: 10px 20px; border-bottom: 1px solid var(--border-color); display: flex; justify-content: space-between; align-items: center; height: 60px; }
    .header h2 { font-size: 1rem; margin: 0; font-weight: 600; overflow: hidden; white-space: nowrap; text-overflow: ellipsis; max-width: 500px; }

    .btn { cursor: pointer; border: 1px solid var(--border-color); background: white; padding: 8px 12px; border-radius: 6px; font-size: 0.9rem; color: var(--text-primary); }
    .btn:hover { background: #f0f0f0; }
    .btn-primary { background: var(--accent-color); color: white; border-color: transparent; }
    .btn-primary:hover { background: var(--accent-hover); }
    .btn-primary:disabled { opacity: 0.5; cursor: not-allowed; }
    .btn-icon { border: none; background: transparent; font-size: 1.2rem; padding: 5px; color: var(--text-secondary); cursor: pointer; }
    .btn-icon:hover { background: rgba(0,0,0,0.05); color: var(--text-primary); }

    .form-input, .form-select { width: 100%; padding: 8px; border: 1px solid var(--border-color); border-radius: 6px; font-family: inherit; }
"#;

#[function_component(App)]
pub fn app() -> Html {
    let state = use_reducer(|| {
        PersistedState::load()
            .map(PersistedState::into_app_state)
            .unwrap_or_default()
    });
    let api_status = use_state(|| ConnectivityStatus::Checking);
    let sidebar_open = use_state(|| true);
    let show_settings = use_state(|| false);

    // --- EFFECTS ---

    // Write the durable subset back after every committed change.
    {
        let state = state.clone();
        use_effect_with(state, |s| PersistedState::snapshot(s).save());
    }

    // Health polling, restarted when the API URL changes. Moving the
    // monitor into the cleanup closure keeps it alive for the effect's
    // lifetime and guarantees stop() on teardown.
    {
        let api_status = api_status.clone();
        use_effect_with(state.settings.api_url.clone(), move |api_url: &String| {
            let mut monitor = ConnectivityMonitor::new(ApiClient::new(api_url));
            monitor.start(Callback::from(move |status| api_status.set(status)));
            move || monitor.stop()
        });
    }

    // --- INTENTS ---

    let on_new_conversation = {
        let state = state.clone();
        Callback::from(move |_| {
            state.dispatch(AppAction::CreateConversation { id: new_id() });
        })
    };

    let on_select_conversation = {
        let state = state.clone();
        Callback::from(move |id: String| {
            state.dispatch(AppAction::SelectConversation { id });
        })
    };

    let on_delete_conversation = {
        let state = state.clone();
        Callback::from(move |(e, id): (MouseEvent, String)| {
            e.stop_propagation();
            state.dispatch(AppAction::DeleteConversation { id });
        })
    };

    let on_update_settings = {
        let state = state.clone();
        Callback::from(move |patch: SettingsPatch| {
            state.dispatch(AppAction::UpdateSettings(patch));
        })
    };

    // The optimistic send protocol: validate, append user message plus
    // placeholder, fire exactly one request, resolve the placeholder by
    // id with whatever comes back.
    let on_send = {
        let state = state.clone();
        let disabled = *show_settings;
        Callback::from(move |text: String| {
            let text = text.trim().to_string();
            if text.is_empty() || disabled {
                return;
            }

            let conversation_id = match &state.current_conversation_id {
                Some(id) => id.clone(),
                None => {
                    let id = new_id();
                    state.dispatch(AppAction::CreateConversation { id: id.clone() });
                    id
                }
            };

            // One outstanding send per conversation.
            if state
                .conversations
                .get(&conversation_id)
                .is_some_and(Conversation::has_pending)
            {
                return;
            }

            let placeholder_id = new_id();
            state.dispatch(AppAction::SendMessage {
                conversation_id: conversation_id.clone(),
                user_message_id: new_id(),
                placeholder_id: placeholder_id.clone(),
                text: text.clone(),
            });

            let client = ApiClient::new(&state.settings.api_url);
            let request = ChatRequest {
                message: text,
                conversation_id: conversation_id.clone(),
                temperature: state.settings.temperature,
                max_tokens: state.settings.max_tokens,
            };

            let state = state.clone();
            spawn_local(async move {
                match client.chat(&request).await {
                    Ok(resp) => {
                        state.dispatch(AppAction::ResolveSend {
                            conversation_id,
                            placeholder_id,
                            content: resp.message,
                            metadata: resp.metadata,
                        });
                    }
                    Err(err) => {
                        tracing::warn!(%err, "chat request failed");
                        state.dispatch(AppAction::FailSend {
                            conversation_id,
                            placeholder_id,
                            error: err.to_string(),
                        });
                    }
                }
            });
        })
    };

    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(false))
    };

    // --- DERIVED VIEW ---

    let conversations: Vec<Conversation> = state
        .sorted_conversations()
        .into_iter()
        .cloned()
        .collect();
    let current = state.current_conversation().cloned();
    let message_count = current.as_ref().map_or(0, |c| c.messages.len());
    let is_loading = current.as_ref().is_some_and(|c| c.has_pending());
    let title = current
        .as_ref()
        .map_or_else(|| "OllamaStack".to_string(), |c| c.title.clone());

    let toggle_settings = show_settings.clone();
    let toggle_sidebar = sidebar_open.clone();

    html! {
        <>
            <style>{ GLOBAL_STYLES }</style>
            <div class="app-container">
                <Sidebar
                    open={*sidebar_open}
                    conversations={conversations.clone()}
                    current_id={state.current_conversation_id.clone()}
                    on_select={on_select_conversation}
                    on_delete={on_delete_conversation}
                    on_new={on_new_conversation}
                />

                <div class="main-content">
                    <div class="header">
                        <div style="display: flex; gap: 10px; align-items: center; min-width: 0;">
                            <button class="btn-icon" onclick={Callback::from(move |_| toggle_sidebar.set(!*toggle_sidebar))} title="Toggle Menu">{ "☰" }</button>
                            <h2>{ title }</h2>
                        </div>
                        <button class="btn-icon" onclick={Callback::from(move |_| toggle_settings.set(!*toggle_settings))} title="Settings">{ "⚙" }</button>
                    </div>

                    if *show_settings {
                        <SettingsModal
                            settings={state.settings.clone()}
                            on_update={on_update_settings}
                            on_close={close_settings}
                        />
                    }

                    <ChatArea
                        conversation={current}
                        is_loading={is_loading}
                        disabled={*show_settings}
                        show_timestamps={state.settings.show_timestamps}
                        auto_scroll={state.settings.auto_scroll}
                        on_send={on_send}
                    />

                    <StatusBar
                        status={*api_status}
                        conversation_count={conversations.len()}
                        message_count={message_count}
                    />
                </div>
            </div>
        </>
    }
}
