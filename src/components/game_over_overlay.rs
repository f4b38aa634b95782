use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameOverOverlayProps {
    pub show: bool,
    pub score: u32,
    pub best_score: u32,
    pub restart: Callback<()>,
}

#[function_component]
pub fn GameOverOverlay(props: &GameOverOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let restart_cb = props.restart.clone();
    let restart_btn = Callback::from(move |_| restart_cb.emit(()));
    let new_best = props.score > 0 && props.score >= props.best_score;
    html! {
        <div class="overlay game-over" style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #f85149; padding:24px 32px; border-radius:12px; text-align:center; min-width:280px;">
            <h2 style="margin:0 0 12px 0; color:#f85149;">{"Game Over"}</h2>
            <p id="scoreDisplay" style="margin:4px 0; font-size:20px;">{ format!("Score: {}", props.score) }</p>
            <p style="margin:4px 0; opacity:0.8;">{ format!("Best this session: {}", props.best_score) }</p>
            if new_best {
                <p style="margin:4px 0; color:#d4af37;">{"New best!"}</p>
            }
            <div style="margin-top:16px;">
                <button onclick={restart_btn}>{"Play Again"}</button>
            </div>
        </div>
    }
}
