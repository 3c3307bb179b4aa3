use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::models::{Settings, SettingsPatch, Theme};

#[derive(Properties, PartialEq)]
pub struct SettingsProps {
    pub settings: Settings,
    /// Each control emits a single-field patch.
    pub on_update: Callback<SettingsPatch>,
    pub on_close: Callback<()>,
}

#[function_component(SettingsModal)]
pub fn settings_modal(props: &SettingsProps) -> Html {
    let on_url_input = {
        let on_update = props.on_update.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_update.emit(SettingsPatch {
                api_url: Some(input.value()),
                ..Default::default()
            });
        })
    };

    let on_model_input = {
        let on_update = props.on_update.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_update.emit(SettingsPatch {
                default_model: Some(input.value()),
                ..Default::default()
            });
        })
    };

    let on_temperature_change = {
        let on_update = props.on_update.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(value) = input.value().parse::<f32>() {
                on_update.emit(SettingsPatch {
                    temperature: Some(value),
                    ..Default::default()
                });
            }
        })
    };

    let on_max_tokens_change = {
        let on_update = props.on_update.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(value) = input.value().parse::<u32>() {
                on_update.emit(SettingsPatch {
                    max_tokens: Some(value),
                    ..Default::default()
                });
            }
        })
    };

    let on_theme_change = {
        let on_update = props.on_update.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let theme = match select.value().as_str() {
                "dark" => Theme::Dark,
                "system" => Theme::System,
                _ => Theme::Light,
            };
            on_update.emit(SettingsPatch {
                theme: Some(theme),
                ..Default::default()
            });
        })
    };

    let toggle = |build: fn(bool) -> SettingsPatch| {
        let on_update = props.on_update.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_update.emit(build(input.checked()));
        })
    };

    let on_auto_scroll = toggle(|v| SettingsPatch {
        auto_scroll: Some(v),
        ..Default::default()
    });
    let on_show_timestamps = toggle(|v| SettingsPatch {
        show_timestamps: Some(v),
        ..Default::default()
    });
    let on_enable_sound = toggle(|v| SettingsPatch {
        enable_sound: Some(v),
        ..Default::default()
    });

    let theme_value = match props.settings.theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
        Theme::System => "system",
    };

    let css = r#"
        .settings-backdrop { position: absolute; top: 0; left: 0; width: 100%; height: 100%; background: rgba(255,255,255,0.6); z-index: 99; cursor: pointer; }
        .settings-panel { position: absolute; top: 60px; right: 20px; width: 340px; background: white; border: 1px solid var(--border-color); border-radius: 8px; box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1); padding: 20px; z-index: 100; display: flex; flex-direction: column; gap: 12px; }
        .settings-header { display: flex; justify-content: space-between; align-items: center; border-bottom: 1px solid var(--border-color); padding-bottom: 10px; }
        .settings-header h3 { margin: 0; font-size: 1.1rem; }
        .close-btn { background: none; border: none; font-size: 1.5rem; line-height: 1; cursor: pointer; color: var(--text-secondary); padding: 0 5px; }
        .close-btn:hover { color: var(--text-primary); }
        .form-label { display: block; font-size: 0.85rem; font-weight: 600; margin-bottom: 5px; color: var(--text-secondary); }
        .toggle-row { display: flex; gap: 8px; align-items: center; cursor: pointer; font-size: 0.9rem; }
    "#;

    html! {
        <>
            <style>{ css }</style>
            <div class="settings-backdrop" onclick={props.on_close.reform(|_| ())}></div>

            <div class="settings-panel">
                <div class="settings-header">
                    <h3>{ "Settings" }</h3>
                    <button class="close-btn" onclick={props.on_close.reform(|_| ())} title="Close">{ "×" }</button>
                </div>

                <div>
                    <label class="form-label">{ "API URL" }</label>
                    <input class="form-input" type="text" value={props.settings.api_url.clone()} oninput={on_url_input} />
                </div>

                <div>
                    <label class="form-label">{ "Default Model" }</label>
                    <input class="form-input" type="text" value={props.settings.default_model.clone()} oninput={on_model_input} />
                </div>

                <div>
                    <label class="form-label">{ "Temperature" }</label>
                    <input class="form-input" type="number" step="0.1" min="0" max="2"
                        value={props.settings.temperature.to_string()} onchange={on_temperature_change} />
                </div>

                <div>
                    <label class="form-label">{ "Max Tokens" }</label>
                    <input class="form-input" type="number" min="1"
                        value={props.settings.max_tokens.to_string()} onchange={on_max_tokens_change} />
                </div>

                <div>
                    <label class="form-label">{ "Theme" }</label>
                    <select class="form-select" onchange={on_theme_change}>
                        <option value="light" selected={theme_value == "light"}>{ "Light" }</option>
                        <option value="dark" selected={theme_value == "dark"}>{ "Dark" }</option>
                        <option value="system" selected={theme_value == "system"}>{ "System" }</option>
                    </select>
                </div>

                <label class="toggle-row">
                    <input type="checkbox" checked={props.settings.auto_scroll} onchange={on_auto_scroll} />
                    { "Auto-scroll to newest message" }
                </label>
                <label class="toggle-row">
                    <input type="checkbox" checked={props.settings.show_timestamps} onchange={on_show_timestamps} />
                    { "Show timestamps" }
                </label>
                <label class="toggle-row">
                    <input type="checkbox" checked={props.settings.enable_sound} onchange={on_enable_sound} />
                    { "Enable sound" }
                </label>
            </div>
        </>
    }
}
