use yew::prelude::*;

use crate::model::HitFeedback;

#[derive(Properties, PartialEq, Clone)]
pub struct HitFeedbackLayerProps {
    pub feedback: Vec<HitFeedback>,
}

#[function_component]
pub fn HitFeedbackLayer(props: &HitFeedbackLayerProps) -> Html {
    html! {
        <div class="feedback-layer" style="position:fixed; inset:0; pointer-events:none;">
            { for props.feedback.iter().map(|f| html! {
                <span key={f.seq} class="hit-feedback"
                    style={format!("position:fixed; left:{}px; top:{}px; transform:translate(-50%, -100%); font-weight:700;", f.x, f.y)}>
                    {"+1"}
                </span>
            }) }
        </div>
    }
}
