use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn class(self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub muted: bool,
    pub theme: Theme,
    pub on_toggle_mute: Callback<()>,
    pub on_toggle_theme: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let mute_cb = {
        let cb = props.on_toggle_mute.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let theme_cb = {
        let cb = props.on_toggle_theme.clone();
        Callback::from(move |_| cb.emit(()))
    };
    // Icon is derived from the same flag the audio handle uses.
    let volume_icon = if props.muted { "🔇" } else { "🔊" };
    let theme_label = match props.theme {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };
    html! {<div class="panel controls" style="position:absolute; top:12px; right:12px; border-radius:8px; padding:8px; min-width:140px; display:flex; flex-direction:column; gap:6px;">
        <button id="volume" onclick={mute_cb} aria-pressed={props.muted.to_string()}>{ volume_icon }</button>
        <button onclick={theme_cb}>{ theme_label }</button>
    </div>}
}
