use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct IntroOverlayProps {
    pub show: bool,
    /// Countdown number currently shown; `Some` disables the start button.
    pub countdown: Option<u32>,
    pub on_start: Callback<()>,
}

#[function_component(IntroOverlay)]
pub fn intro_overlay(props: &IntroOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let start_btn = {
        let cb = props.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let counting = props.countdown.is_some();
    html! {
        <div class="overlay intro" style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.87); border:2px solid #30363d; padding:28px 36px; border-radius:14px; max-width:420px; width:90%; text-align:center; font-size:14px; line-height:1.4;">
            <h2 style="margin:0 0 12px 0; font-size:22px; color:#58a6ff;">{"Whack-a-Mole"}</h2>
            {
                match props.countdown {
                    Some(n) => html! { <div class="countdown" style="font-size:64px; font-weight:700; margin:8px 0;">{ n }</div> },
                    None => html! {
                        <ul style="margin:0 0 12px 18px; padding:0; list-style:disc; text-align:left; display:flex; flex-direction:column; gap:4px;">
                            <li>{"A mole pops up in a random hole every moment."}</li>
                            <li>{"Click it before it hides to score a point."}</li>
                            <li>{"You have one minute. Good luck!"}</li>
                        </ul>
                    },
                }
            }
            <button onclick={start_btn} disabled={counting}>{"Start"}</button>
        </div>
    }
}
