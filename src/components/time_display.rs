use crate::util::format_time;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TimeDisplayProps {
    pub remaining_secs: u32,
    pub running: bool,
}

#[function_component(TimeDisplay)]
pub fn time_display(props: &TimeDisplayProps) -> Html {
    let low = props.running && props.remaining_secs <= 10;
    html! {<div id="time" class={classes!("time", low.then_some("low"))} style="position:absolute; top:12px; left:50%; transform:translateX(-50%); font-size:20px; font-weight:600;">
        <span>{ format_time(props.remaining_secs) }</span>
    </div>}
}
