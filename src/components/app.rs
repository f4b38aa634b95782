use super::{
    controls_panel::{ControlsPanel, Theme},
    game_over_overlay::GameOverOverlay,
    hit_feedback::HitFeedbackLayer,
    intro_overlay::IntroOverlay,
    playfield::Playfield,
    stats_panel::StatsPanel,
    time_display::TimeDisplay,
};
use crate::config::GameConfig;
use crate::model::{BoxId, GameAction, GameState, Phase, PhaseKind};
use crate::state::{AudioCues, Cue, TimerSet};
use crate::util::{clog, cwarn};
use yew::prelude::*;

const TICK_MS: u32 = 1000;

/// The game controller. Owns the reducer, the timer set and the audio cues;
/// timers and audio are created on mount and torn down on unmount.
#[function_component(App)]
pub fn app() -> Html {
    let game = use_reducer(|| GameState::new(GameConfig::load_from_page()));
    let theme = use_state(|| Theme::Light);
    let muted = use_state(|| false);
    let timers = use_mut_ref(|| None::<TimerSet>);
    let audio = use_mut_ref(|| None::<AudioCues>);

    // init / teardown
    {
        let timers = timers.clone();
        let audio = audio.clone();
        let cfg = game.config.clone();
        let muted_at_mount = *muted;
        use_effect_with((), move |_| {
            *timers.borrow_mut() = Some(TimerSet::new());
            *audio.borrow_mut() = Some(AudioCues::new(&cfg, muted_at_mount));
            clog(&format!(
                "controller: init ({} boxes, {}s rounds)",
                cfg.box_count, cfg.duration_secs
            ));
            move || {
                // Drop clears every pending timer and stops the music.
                timers.borrow_mut().take();
                audio.borrow_mut().take();
                clog("controller: teardown");
            }
        });
    }

    // Phase entry / exit: arm the timers of the phase, clear them when it ends.
    {
        let timers = timers.clone();
        let audio = audio.clone();
        let dispatcher = game.dispatcher();
        let cfg = game.config.clone();
        let kind = game.phase.kind();
        let round = game.round;
        let final_score = game.score;
        use_effect_with((kind, round), move |&(kind, round)| {
            clog(&format!("phase: {:?} (round {})", kind, round));
            if let Some(t) = timers.borrow_mut().as_mut() {
                match kind {
                    PhaseKind::Countdown => {
                        t.clear_timeouts();
                        let d = dispatcher.clone();
                        t.arm_interval("countdown", TICK_MS, move || {
                            d.dispatch(GameAction::CountdownTick { round })
                        });
                    }
                    PhaseKind::Running => {
                        let d = dispatcher.clone();
                        t.arm_interval("spawn", cfg.spawn_interval_ms, move || {
                            d.dispatch(GameAction::SpawnTick {
                                round,
                                roll: js_sys::Math::random(),
                            })
                        });
                        let d = dispatcher.clone();
                        t.arm_interval("second", TICK_MS, move || {
                            d.dispatch(GameAction::SecondTick { round })
                        });
                    }
                    PhaseKind::GameOver => t.clear_all(),
                    PhaseKind::Idle => {}
                }
            } else {
                cwarn("phase: timers not initialised; skipping");
            }
            if let Some(a) = audio.borrow_mut().as_mut() {
                match kind {
                    PhaseKind::Running => a.start_music(),
                    PhaseKind::GameOver => {
                        a.play(Cue::GameOver);
                        clog(&format!("game over: final score {}", final_score));
                    }
                    _ => {}
                }
            }
            move || {
                if let Some(t) = timers.borrow_mut().as_mut() {
                    match kind {
                        PhaseKind::Countdown => t.clear("countdown"),
                        PhaseKind::Running => {
                            t.clear("spawn");
                            t.clear("second");
                        }
                        _ => {}
                    }
                }
                if kind == PhaseKind::Running {
                    if let Some(a) = audio.borrow_mut().as_mut() {
                        a.stop_music();
                    }
                }
            }
        });
    }

    // Mole hide-out after each spawn.
    {
        let timers = timers.clone();
        let dispatcher = game.dispatcher();
        let spawned = game.is_running() && game.active_mole.is_some();
        let round = game.round;
        let visible_ms = game.config.mole_visible_ms;
        use_effect_with(game.spawn_seq, move |&seq| {
            if spawned && seq > 0 {
                if let Some(t) = timers.borrow_mut().as_mut() {
                    t.schedule(visible_ms, move || {
                        dispatcher.dispatch(GameAction::MoleExpired { seq, round })
                    });
                }
            }
            || ()
        });
    }

    // Hit: sound, then release the box and the "+1" marker after their delays.
    {
        let timers = timers.clone();
        let audio = audio.clone();
        let dispatcher = game.dispatcher();
        let hit_clear_ms = game.config.hit_clear_ms;
        let feedback_ms = game.config.feedback_ms;
        use_effect_with(game.last_hit, move |last_hit| {
            if let Some(hit) = *last_hit {
                if let Some(a) = audio.borrow().as_ref() {
                    a.play(Cue::Hit);
                }
                if let Some(t) = timers.borrow_mut().as_mut() {
                    let d = dispatcher.clone();
                    t.schedule(hit_clear_ms, move || {
                        d.dispatch(GameAction::ClearHit { id: hit.id, round: hit.round })
                    });
                    t.schedule(feedback_ms, move || {
                        dispatcher.dispatch(GameAction::DismissFeedback { seq: hit.seq })
                    });
                }
            }
            || ()
        });
    }

    // Mute: one flag drives both the icon and the audio elements.
    {
        let audio = audio.clone();
        use_effect_with(*muted, move |&m| {
            if let Some(a) = audio.borrow_mut().as_mut() {
                a.set_muted(m);
            }
            || ()
        });
    }

    let on_start = {
        let dispatcher = game.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(GameAction::Start))
    };
    let on_whack = {
        let dispatcher = game.dispatcher();
        Callback::from(move |(id, x, y): (BoxId, f64, f64)| {
            dispatcher.dispatch(GameAction::Whack { id, x, y })
        })
    };
    let on_toggle_mute = {
        let muted = muted.clone();
        Callback::from(move |_| muted.set(!*muted))
    };
    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_| theme.set(theme.toggled()))
    };

    let countdown = match game.phase {
        Phase::Countdown(n) => Some(n),
        _ => None,
    };
    let kind = game.phase.kind();

    html! {
        <div id="root" class={classes!("whack", theme.class())} style="position:relative; width:100vw; min-height:100vh;">
            <StatsPanel score={game.score} best_score={game.best_score} />
            <TimeDisplay remaining_secs={game.remaining_secs} running={game.is_running()} />
            <ControlsPanel
                muted={*muted}
                theme={*theme}
                on_toggle_mute={on_toggle_mute}
                on_toggle_theme={on_toggle_theme}
            />
            <Playfield boxes={game.boxes.clone()} running={game.is_running()} on_whack={on_whack} />
            <HitFeedbackLayer feedback={game.feedback.clone()} />
            <IntroOverlay
                show={matches!(kind, PhaseKind::Idle | PhaseKind::Countdown)}
                countdown={countdown}
                on_start={on_start.clone()}
            />
            <GameOverOverlay
                show={kind == PhaseKind::GameOver}
                score={game.score}
                best_score={game.best_score}
                restart={on_start}
            />
        </div>
    }
}
