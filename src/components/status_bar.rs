use yew::prelude::*;

use crate::models::ConnectivityStatus;

#[derive(Properties, PartialEq)]
pub struct StatusBarProps {
    pub status: ConnectivityStatus,
    pub conversation_count: usize,
    /// Messages in the current conversation.
    pub message_count: usize,
}

#[function_component(StatusBar)]
pub fn status_bar(props: &StatusBarProps) -> Html {
    let (dot_class, text) = match props.status {
        ConnectivityStatus::Online => ("online", "Connected"),
        ConnectivityStatus::Offline => ("offline", "Disconnected"),
        ConnectivityStatus::Checking => ("checking", "Connecting..."),
    };

    let css = r#"
        .status-bar { display: flex; justify-content: space-between; align-items: center; padding: 6px 20px; border-top: 1px solid var(--border-color); background: var(--bg-sidebar); font-size: 0.8rem; color: var(--text-secondary); }
        .status-bar .left { display: flex; gap: 16px; align-items: center; }
        .status-dot { width: 8px; height: 8px; border-radius: 50%; display: inline-block; margin-right: 6px; }
        .status-dot.online { background: #22c55e; }
        .status-dot.offline { background: #ef4444; }
        .status-dot.checking { background: #eab308; }
    "#;

    html! {
        <>
            <style>{ css }</style>
            <div class="status-bar">
                <div class="left">
                    <span>
                        <span class={format!("status-dot {}", dot_class)}></span>
                        { text }
                    </span>
                    <span>{ format!("Conversations: {}", props.conversation_count) }</span>
                    <span>{ format!("Messages: {}", props.message_count) }</span>
                </div>
                <span>{ format!("OllamaStack v{}", env!("CARGO_PKG_VERSION")) }</span>
            </div>
        </>
    }
}
