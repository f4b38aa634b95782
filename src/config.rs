//! Tunable game constants.
//! Defaults match the classic 3x3 board with a one minute round. A host page can
//! override any subset through an inline JSON element:
//! `<script id="whack-config" type="application/json">{"duration_secs": 30}</script>`

use serde::Deserialize;

use crate::util::{clog, cwarn};

pub const CONFIG_ELEMENT_ID: &str = "whack-config";

pub const MAX_BOX_COUNT: usize = 64;
pub const MAX_DURATION_SECS: u32 = 3600;
pub const MAX_COUNTDOWN: u32 = 10;
/// Upper bound for every `*_ms` delay.
pub const MAX_DELAY_MS: u32 = 60_000;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of playfield boxes.
    pub box_count: usize,
    /// Length of a round in seconds.
    pub duration_secs: u32,
    /// First number shown by the pre-game countdown.
    pub countdown_from: u32,
    pub spawn_interval_ms: u32,
    /// How long an un-hit mole stays up.
    pub mole_visible_ms: u32,
    /// How long a hit box stays flagged (and unselectable).
    pub hit_clear_ms: u32,
    pub feedback_ms: u32,
    pub music_src: String,
    pub hit_src: String,
    pub game_over_src: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            box_count: 9,
            duration_secs: 60,
            countdown_from: 3,
            spawn_interval_ms: 1500,
            mole_visible_ms: 1200,
            hit_clear_ms: 500,
            feedback_ms: 700,
            music_src: "./audio/Monkeys-Spinning-Monkeys.mp3".to_string(),
            hit_src: "./audio/punch.wav".to_string(),
            game_over_src: "./audio/smb_gameover.wav".to_string(),
        }
    }
}

impl GameConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let cfg: GameConfig = serde_json::from_str(raw)?;
        Ok(cfg.sanitized())
    }

    /// Clamp values that would stall or break the state machine.
    pub fn sanitized(mut self) -> Self {
        self.box_count = self.box_count.clamp(1, MAX_BOX_COUNT);
        self.duration_secs = self.duration_secs.clamp(1, MAX_DURATION_SECS);
        self.countdown_from = self.countdown_from.min(MAX_COUNTDOWN);
        // Intervals of 0ms would spin the event loop.
        self.spawn_interval_ms = self.spawn_interval_ms.clamp(100, MAX_DELAY_MS);
        self.mole_visible_ms = self.mole_visible_ms.clamp(100, MAX_DELAY_MS);
        self.hit_clear_ms = self.hit_clear_ms.clamp(50, MAX_DELAY_MS);
        self.feedback_ms = self.feedback_ms.clamp(50, MAX_DELAY_MS);
        self
    }

    /// Read the inline config element if the page has one; fall back to defaults.
    pub fn load_from_page() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) if !raw.trim().is_empty() => match Self::from_json(&raw) {
                Ok(cfg) => {
                    clog(&format!("config loaded from #{}", CONFIG_ELEMENT_ID));
                    cfg
                }
                Err(e) => {
                    cwarn(&format!("invalid #{} ({}); using defaults", CONFIG_ELEMENT_ID, e));
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }
}
