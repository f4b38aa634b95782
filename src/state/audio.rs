// Audio cues. Elements that fail to load are skipped, so the game simply
// runs silent when audio is unavailable.
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlAudioElement;

use crate::config::GameConfig;
use crate::util::{clog, cwarn, js_err};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Music,
    Hit,
    GameOver,
}

pub struct AudioCues {
    music: Option<HtmlAudioElement>,
    hit: Option<HtmlAudioElement>,
    game_over: Option<HtmlAudioElement>,
    muted: bool,
    music_playing: bool,
    // Shared rejection handler for play() promises (autoplay policy etc).
    on_reject: Closure<dyn FnMut(JsValue)>,
}

fn load(src: &str) -> Option<HtmlAudioElement> {
    match HtmlAudioElement::new_with_src(src) {
        Ok(el) => Some(el),
        Err(e) => {
            cwarn(&format!("audio: cannot create element for {}: {}", src, js_err(&e)));
            None
        }
    }
}

impl AudioCues {
    pub fn new(cfg: &GameConfig, muted: bool) -> Self {
        let music = load(&cfg.music_src);
        if let Some(m) = &music {
            m.set_loop(true);
        }
        let cues = Self {
            music,
            hit: load(&cfg.hit_src),
            game_over: load(&cfg.game_over_src),
            muted,
            music_playing: false,
            on_reject: Closure::wrap(Box::new(|e: JsValue| {
                cwarn(&format!("audio: play rejected: {}", js_err(&e)));
            }) as Box<dyn FnMut(JsValue)>),
        };
        cues.apply_muted();
        cues
    }

    fn element(&self, cue: Cue) -> Option<&HtmlAudioElement> {
        match cue {
            Cue::Music => self.music.as_ref(),
            Cue::Hit => self.hit.as_ref(),
            Cue::GameOver => self.game_over.as_ref(),
        }
    }

    fn apply_muted(&self) {
        for el in [&self.music, &self.hit, &self.game_over].into_iter().flatten() {
            el.set_muted(self.muted);
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        if self.muted == muted {
            return;
        }
        self.muted = muted;
        self.apply_muted();
        clog(&format!("audio: muted={}", muted));
    }

    /// Play a cue from the start.
    pub fn play(&self, cue: Cue) {
        let Some(el) = self.element(cue) else {
            cwarn(&format!("audio: {:?} unavailable", cue));
            return;
        };
        el.set_current_time(0.0);
        match el.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.on_reject);
            }
            Err(e) => cwarn(&format!("audio: {:?} play failed: {}", cue, js_err(&e))),
        }
    }

    pub fn start_music(&mut self) {
        if self.music_playing {
            return;
        }
        self.music_playing = true;
        self.play(Cue::Music);
    }

    pub fn stop_music(&mut self) {
        if !self.music_playing {
            return;
        }
        self.music_playing = false;
        if let Some(m) = &self.music {
            if let Err(e) = m.pause() {
                cwarn(&format!("audio: pause failed: {}", js_err(&e)));
            }
            m.set_current_time(0.0);
        }
    }
}

impl Drop for AudioCues {
    fn drop(&mut self) {
        self.stop_music();
    }
}
