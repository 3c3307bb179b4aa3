use yew::prelude::*;

use crate::models::Conversation;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub open: bool,
    /// Already sorted by recency.
    pub conversations: Vec<Conversation>,
    pub current_id: Option<String>,
    pub on_select: Callback<String>,
    pub on_delete: Callback<(MouseEvent, String)>,
    pub on_new: Callback<()>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let width = if props.open { "260px" } else { "0px" };

    let css = r#"
        .sidebar { background: var(--bg-sidebar); border-right: 1px solid var(--border-color); display: flex; flex-direction: column; transition: width 0.3s; overflow: hidden; flex-shrink: 0; }
        .sidebar-content { width: 260px; height: 100%; display: flex; flex-direction: column; padding: 10px; }
        .conversation-list { flex-grow: 1; overflow-y: auto; margin-top: 10px; }
        .conversation-item { padding: 10px; border-radius: 6px; cursor: pointer; display: flex; justify-content: space-between; align-items: center; margin-bottom: 2px; font-size: 0.9rem; }
        .conversation-item:hover { background: #eaeaeb; }
        .conversation-item.active { background: #e0e0e0; font-weight: 500; }
        .conversation-item .del-btn { opacity: 0; border: none; background: none; color: #999; cursor: pointer; padding: 2px 6px; border-radius: 4px; }
        .conversation-item:hover .del-btn { opacity: 1; }
        .conversation-item .del-btn:hover { background: #dcdcdc; color: #d32f2f; }
        .new-conversation-btn { width: 100%; padding: 10px; border: 1px solid var(--border-color); background: white; border-radius: 6px; cursor: pointer; text-align: left; display: flex; gap: 10px; }
        .new-conversation-btn:hover { background: #f0f0f0; }
    "#;

    html! {
        <>
            <style>{ css }</style>
            <div class="sidebar" style={format!("width: {};", width)}>
                <div class="sidebar-content">
                    <button class="new-conversation-btn" onclick={props.on_new.reform(|_| ())}>
                        <span>{ "+" }</span>
                        <span>{ "New Conversation" }</span>
                    </button>
                    <div class="conversation-list">
                        { for props.conversations.iter().map(|conv| {
                            let id = conv.id.clone();
                            let is_active = props.current_id.as_deref() == Some(id.as_str());
                            let active_class = if is_active { "active" } else { "" };
                            let on_sel = props.on_select.clone();
                            let on_del = props.on_delete.clone();
                            let id_c = id.clone();

                            html! {
                                <div key={conv.id.clone()} class={format!("conversation-item {}", active_class)} onclick={Callback::from(move |_| on_sel.emit(id.clone()))}>
                                    <span style="overflow: hidden; text-overflow: ellipsis; white-space: nowrap;">{ &conv.title }</span>
                                    <button class="del-btn" onclick={Callback::from(move |e| on_del.emit((e, id_c.clone())))}>{ "×" }</button>
                                </div>
                            }
                        })}
                    </div>
                </div>
            </div>
        </>
    }
}
