use web_sys::{HtmlElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::models::{Conversation, Role};

#[derive(Properties, PartialEq)]
pub struct ChatAreaProps {
    pub conversation: Option<Conversation>,
    pub is_loading: bool,
    pub disabled: bool,
    pub show_timestamps: bool,
    pub auto_scroll: bool,
    pub on_send: Callback<String>,
}

#[function_component(ChatArea)]
pub fn chat_area(props: &ChatAreaProps) -> Html {
    let input_text = use_state(String::new);
    let scroll_ref = use_node_ref();

    let messages = props
        .conversation
        .as_ref()
        .map(|c| c.messages.clone())
        .unwrap_or_default();

    // Keep the newest message visible unless the user turned that off.
    // The last message's length is part of the key so in-place
    // resolution of a placeholder also scrolls.
    {
        let div_ref = scroll_ref.clone();
        let auto_scroll = props.auto_scroll;
        let last_len = messages.last().map_or(0, |m| m.content.len());
        use_effect_with((messages.len(), last_len), move |_| {
            if auto_scroll {
                if let Some(div) = div_ref.cast::<HtmlElement>() {
                    div.set_scroll_top(div.scroll_height());
                }
            }
        });
    }

    let submit = {
        let text = input_text.clone();
        let on_send = props.on_send.clone();
        let blocked = props.is_loading || props.disabled;
        move || {
            if !blocked && !text.trim().is_empty() {
                on_send.emit((*text).clone());
                text.set(String::new());
            }
        }
    };

    let on_submit = {
        let submit = submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit();
        })
    };

    let on_keydown = {
        let submit = submit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" && !e.shift_key() {
                e.prevent_default();
                submit();
            }
        })
    };

    let on_input = {
        let text = input_text.clone();
        Callback::from(move |e: InputEvent| {
            let i: HtmlTextAreaElement = e.target_unchecked_into();
            text.set(i.value());
        })
    };

    let css = r#"
        .chat-area { flex-grow: 1; display: flex; flex-direction: column; min-height: 0; }
        .message-list { flex-grow: 1; overflow-y: auto; padding: 20px; display: flex; flex-direction: column; gap: 12px; }
        .message { max-width: 75%; padding: 10px 14px; border-radius: 10px; font-size: 0.95rem; white-space: pre-wrap; word-break: break-word; }
        .message.user { align-self: flex-end; background: var(--bg-user); }
        .message.assistant { align-self: flex-start; background: var(--bg-assistant); border: 1px solid var(--border-color); }
        .message.failed { border-color: var(--danger-color); }
        .message .meta { font-size: 0.7rem; color: var(--text-secondary); margin-top: 6px; }
        .message .error-detail { font-size: 0.75rem; color: var(--danger-color); margin-top: 6px; }
        .typing { color: var(--text-secondary); letter-spacing: 2px; }
        .empty-chat { flex-grow: 1; display: flex; align-items: center; justify-content: center; color: var(--text-secondary); }
        .input-row { display: flex; gap: 10px; padding: 15px 20px; border-top: 1px solid var(--border-color); }
        .input-row textarea { flex-grow: 1; resize: none; padding: 10px; border: 1px solid var(--border-color); border-radius: 8px; font-family: inherit; font-size: 0.95rem; min-height: 44px; }
        .input-row textarea:disabled { background: #f5f5f5; color: var(--text-secondary); }
    "#;

    let list = if props.conversation.is_some() {
        html! {
            <div class="message-list" ref={scroll_ref}>
                { for messages.iter().map(|msg| {
                    let role_class = match msg.role {
                        Role::User => "user",
                        _ => "assistant",
                    };
                    let failed = if msg.error.is_some() { "failed" } else { "" };
                    let model = msg
                        .metadata
                        .as_ref()
                        .and_then(|m| m.get("model"))
                        .and_then(|v| v.as_str())
                        .map(str::to_string);

                    html! {
                        <div key={msg.id.clone()} class={format!("message {} {}", role_class, failed)}>
                            if msg.pending {
                                <span class="typing">{ "…" }</span>
                            } else {
                                { &msg.content }
                            }
                            if let Some(err) = &msg.error {
                                <div class="error-detail">{ err }</div>
                            }
                            if props.show_timestamps || model.is_some() {
                                <div class="meta">
                                    if props.show_timestamps {
                                        { msg.timestamp.format("%H:%M").to_string() }
                                    }
                                    if let Some(model) = model {
                                        { format!(" {}", model) }
                                    }
                                </div>
                            }
                        </div>
                    }
                })}
            </div>
        }
    } else {
        html! { <div class="empty-chat">{ "Start a new conversation to begin chatting." }</div> }
    };

    html! {
        <>
            <style>{ css }</style>
            <div class="chat-area">
                { list }
                <form class="input-row" onsubmit={on_submit}>
                    <textarea
                        value={(*input_text).clone()}
                        oninput={on_input}
                        onkeydown={on_keydown}
                        placeholder="Type your message..."
                        disabled={props.disabled || props.is_loading}
                        rows="1"
                    />
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled={input_text.trim().is_empty() || props.is_loading || props.disabled}
                    >
                        { if props.is_loading { "Sending..." } else { "Send" } }
                    </button>
                </form>
            </div>
        </>
    }
}
