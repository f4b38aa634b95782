use web_sys::MouseEvent;
use yew::prelude::*;

use crate::model::{BoxFlag, BoxId};

#[derive(Properties, PartialEq, Clone)]
pub struct PlayfieldProps {
    pub boxes: Vec<BoxFlag>,
    pub running: bool,
    /// Box activated at client coordinates.
    pub on_whack: Callback<(BoxId, f64, f64)>,
}

#[function_component]
pub fn Playfield(props: &PlayfieldProps) -> Html {
    let swinging = use_state(|| false);
    let press = {
        let swinging = swinging.clone();
        Callback::from(move |_: MouseEvent| swinging.set(true))
    };
    let release = {
        let swinging = swinging.clone();
        Callback::from(move |_: MouseEvent| swinging.set(false))
    };
    // square-ish grid
    let cols = ((props.boxes.len() as f64).sqrt().ceil() as usize).max(1);
    let class = classes!(
        "playfield",
        props.running.then_some("hammer"),
        (props.running && *swinging).then_some("swing")
    );
    html! {
        <div id="gameboard" {class}
            style={format!("display:grid; grid-template-columns:repeat({}, 1fr); gap:12px; margin:96px auto 0; max-width:480px;", cols)}
            onmousedown={press} onmouseup={release.clone()} onmouseleave={release}>
            { for props.boxes.iter().enumerate().map(|(i, flag)| {
                let id = BoxId(i);
                let onclick = {
                    let cb = props.on_whack.clone();
                    Callback::from(move |e: MouseEvent| cb.emit((id, e.client_x() as f64, e.client_y() as f64)))
                };
                let state_class = match flag {
                    BoxFlag::Empty => None,
                    BoxFlag::Mole => Some("mole"),
                    BoxFlag::Hit => Some("hit"),
                };
                html! {
                    <div key={i} class={classes!("box", state_class)} {onclick}>
                        if *flag == BoxFlag::Mole {
                            <img class="mole-sprite" src="./mole.png" alt="mole" draggable="false" />
                        }
                    </div>
                }
            }) }
        </div>
    }
}
