//! Core game model for Whack-a-Mole.
//! `GameState` is driven exclusively through `GameAction`s by the yew reducer.
//! Randomness is supplied by the caller (`roll`) so the reducer stays pure.

use std::rc::Rc;
use yew::Reducible;

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(pub usize);

/// Visual flag of a playfield box. Mole and Hit are mutually exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoxFlag {
    #[default]
    Empty,
    Mole,
    /// Recently whacked; not eligible as a mole until cleared.
    Hit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Start screen.
    Idle,
    /// Pre-game countdown; holds the number currently shown.
    Countdown(u32),
    Running,
    GameOver,
}

/// Phase without the countdown number; effects key on this so a countdown tick
/// does not re-arm timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    Countdown,
    Running,
    GameOver,
}

impl Phase {
    pub fn kind(self) -> PhaseKind {
        match self {
            Phase::Idle => PhaseKind::Idle,
            Phase::Countdown(_) => PhaseKind::Countdown,
            Phase::Running => PhaseKind::Running,
            Phase::GameOver => PhaseKind::GameOver,
        }
    }
}

/// Transient "+1" marker at the pointer position of a successful hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitFeedback {
    pub seq: u64,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitRecord {
    pub seq: u64,
    pub id: BoxId,
    pub round: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub phase: Phase,
    pub score: u32,
    pub remaining_secs: u32,
    pub active_mole: Option<BoxId>,
    /// One flag per playfield box; length = config.box_count.
    pub boxes: Vec<BoxFlag>,
    /// Incremented each time a countdown starts; timer actions carry it.
    pub round: u32,
    /// Best final score of this page session.
    pub best_score: u32,
    /// Bumped on every spawn, so a mole re-spawning in the same box is distinct.
    pub spawn_seq: u64,
    /// Monotonic counter of successful hits, used to key hit effects.
    pub hit_seq: u64,
    pub last_hit: Option<HitRecord>,
    pub feedback: Vec<HitFeedback>,
    pub config: GameConfig,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let config = config.sanitized();
        Self {
            phase: Phase::Idle,
            score: 0,
            remaining_secs: config.duration_secs,
            active_mole: None,
            boxes: vec![BoxFlag::Empty; config.box_count],
            round: 0,
            best_score: 0,
            spawn_seq: 0,
            hit_seq: 0,
            last_hit: None,
            feedback: Vec::new(),
            config,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Boxes a mole may spawn in: every box not currently flagged Hit.
    pub fn eligible_boxes(&self) -> Vec<BoxId> {
        self.boxes
            .iter()
            .enumerate()
            .filter(|(_, f)| **f != BoxFlag::Hit)
            .map(|(i, _)| BoxId(i))
            .collect()
    }

    fn reset_round(&mut self) {
        self.score = 0;
        self.remaining_secs = self.config.duration_secs;
        self.active_mole = None;
        self.boxes = vec![BoxFlag::Empty; self.config.box_count];
        self.last_hit = None;
        self.feedback.clear();
    }

    fn clear_mole(&mut self) {
        if let Some(prev) = self.active_mole.take() {
            if let Some(f) = self.boxes.get_mut(prev.0) {
                if *f == BoxFlag::Mole {
                    *f = BoxFlag::Empty;
                }
            }
        }
    }

    fn enter_running(&mut self) {
        self.reset_round();
        self.phase = Phase::Running;
    }

    fn enter_game_over(&mut self) {
        self.clear_mole();
        self.boxes.iter_mut().for_each(|f| *f = BoxFlag::Empty);
        self.feedback.clear();
        self.phase = Phase::GameOver;
        self.best_score = self.best_score.max(self.score);
    }
}

/// Map a uniform `roll` in [0, 1) onto one of `len` slots.
pub fn pick_index(roll: f64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let r = if roll.is_finite() { roll.clamp(0.0, 1.0) } else { 0.0 };
    Some(((r * len as f64).floor() as usize).min(len - 1))
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum GameAction {
    /// Start or restart click.
    Start,
    CountdownTick { round: u32 },
    /// `roll` is a uniform random number in [0, 1).
    SpawnTick { round: u32, roll: f64 },
    /// Hide-out timer for the mole of spawn number `seq`.
    MoleExpired { seq: u64, round: u32 },
    /// Pointer activation of a box at client coordinates (x, y).
    Whack { id: BoxId, x: f64, y: f64 },
    ClearHit { id: BoxId, round: u32 },
    DismissFeedback { seq: u64 },
    SecondTick { round: u32 },
}

impl GameState {
    /// Apply one action in place. Returns false when the action was a no-op.
    pub fn apply(&mut self, action: GameAction) -> bool {
        use GameAction::*;
        match action {
            Start => {
                if !matches!(self.phase, Phase::Idle | Phase::GameOver) {
                    return false;
                }
                self.round = self.round.wrapping_add(1);
                self.reset_round();
                if self.config.countdown_from == 0 {
                    self.enter_running();
                } else {
                    self.phase = Phase::Countdown(self.config.countdown_from);
                }
            }
            CountdownTick { round } => {
                let Phase::Countdown(n) = self.phase else { return false; };
                if round != self.round {
                    return false;
                }
                if n <= 1 {
                    self.enter_running();
                } else {
                    self.phase = Phase::Countdown(n - 1);
                }
            }
            SpawnTick { round, roll } => {
                if !self.is_running() || round != self.round {
                    return false;
                }
                let eligible = self.eligible_boxes();
                let Some(i) = pick_index(roll, eligible.len()) else { return false; };
                let id = eligible[i];
                self.clear_mole();
                self.boxes[id.0] = BoxFlag::Mole;
                self.active_mole = Some(id);
                self.spawn_seq += 1;
            }
            MoleExpired { seq, round } => {
                if !self.is_running()
                    || round != self.round
                    || seq != self.spawn_seq
                    || self.active_mole.is_none()
                {
                    return false;
                }
                self.clear_mole();
            }
            Whack { id, x, y } => {
                if !self.is_running() || self.active_mole != Some(id) {
                    return false;
                }
                self.active_mole = None;
                self.boxes[id.0] = BoxFlag::Hit;
                self.score = self.score.saturating_add(1);
                self.hit_seq += 1;
                self.last_hit = Some(HitRecord { seq: self.hit_seq, id, round: self.round });
                self.feedback.push(HitFeedback { seq: self.hit_seq, x, y });
            }
            ClearHit { id, round } => {
                if round != self.round {
                    return false;
                }
                match self.boxes.get_mut(id.0) {
                    Some(f) if *f == BoxFlag::Hit => *f = BoxFlag::Empty,
                    _ => return false,
                }
            }
            DismissFeedback { seq } => {
                let before = self.feedback.len();
                self.feedback.retain(|f| f.seq != seq);
                if self.feedback.len() == before {
                    return false;
                }
            }
            SecondTick { round } => {
                if !self.is_running() || round != self.round {
                    return false;
                }
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
                if self.remaining_secs == 0 {
                    self.enter_game_over();
                }
            }
        }
        true
    }
}

impl Reducible for GameState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        if new.apply(action) { Rc::new(new) } else { self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state() -> GameState {
        let mut gs = GameState::new(GameConfig::default());
        gs.apply(GameAction::Start);
        for _ in 0..gs.config.countdown_from {
            gs.apply(GameAction::CountdownTick { round: gs.round });
        }
        assert_eq!(gs.phase, Phase::Running);
        gs
    }

    // roll that lands on box `id` when every box is eligible
    fn roll_for(gs: &GameState, id: usize) -> f64 {
        (id as f64 + 0.5) / gs.boxes.len() as f64
    }

    #[test]
    fn test_countdown_runs_three_ticks_then_running() {
        let mut gs = GameState::new(GameConfig::default());
        assert_eq!(gs.phase, Phase::Idle);
        assert!(gs.apply(GameAction::Start));
        assert_eq!(gs.phase, Phase::Countdown(3));
        let round = gs.round;
        gs.apply(GameAction::CountdownTick { round });
        assert_eq!(gs.phase, Phase::Countdown(2));
        gs.apply(GameAction::CountdownTick { round });
        assert_eq!(gs.phase, Phase::Countdown(1));
        gs.apply(GameAction::CountdownTick { round });
        assert_eq!(gs.phase, Phase::Running);
        assert_eq!(gs.score, 0);
        assert_eq!(gs.remaining_secs, 60);
    }

    #[test]
    fn test_start_ignored_while_counting_down_or_running() {
        let mut gs = GameState::new(GameConfig::default());
        gs.apply(GameAction::Start);
        let round = gs.round;
        assert!(!gs.apply(GameAction::Start));
        assert_eq!(gs.round, round);
        let mut gs = running_state();
        assert!(!gs.apply(GameAction::Start));
        assert!(gs.is_running());
    }

    #[test]
    fn test_spawn_never_picks_hit_box() {
        let mut gs = running_state();
        let round = gs.round;
        gs.apply(GameAction::SpawnTick { round, roll: roll_for(&gs, 3) });
        gs.apply(GameAction::Whack { id: BoxId(3), x: 0.0, y: 0.0 });
        assert_eq!(gs.boxes[3], BoxFlag::Hit);
        let steps = 200;
        for k in 0..steps {
            let roll = k as f64 / steps as f64;
            gs.apply(GameAction::SpawnTick { round, roll });
            assert_ne!(gs.active_mole, Some(BoxId(3)));
            assert_eq!(gs.boxes[3], BoxFlag::Hit);
        }
    }

    #[test]
    fn test_spawn_replaces_previous_mole() {
        let mut gs = running_state();
        let round = gs.round;
        gs.apply(GameAction::SpawnTick { round, roll: roll_for(&gs, 0) });
        gs.apply(GameAction::SpawnTick { round, roll: roll_for(&gs, 5) });
        assert_eq!(gs.active_mole, Some(BoxId(5)));
        let moles = gs.boxes.iter().filter(|f| **f == BoxFlag::Mole).count();
        assert_eq!(moles, 1);
        assert_eq!(gs.boxes[0], BoxFlag::Empty);
    }

    #[test]
    fn test_spawn_skipped_when_every_box_is_hit() {
        let cfg = GameConfig { box_count: 1, ..GameConfig::default() };
        let mut gs = GameState::new(cfg);
        gs.apply(GameAction::Start);
        for _ in 0..3 {
            gs.apply(GameAction::CountdownTick { round: gs.round });
        }
        let round = gs.round;
        gs.apply(GameAction::SpawnTick { round, roll: 0.2 });
        gs.apply(GameAction::Whack { id: BoxId(0), x: 1.0, y: 1.0 });
        assert!(!gs.apply(GameAction::SpawnTick { round, roll: 0.2 }));
        assert_eq!(gs.active_mole, None);
        gs.apply(GameAction::ClearHit { id: BoxId(0), round });
        assert!(gs.apply(GameAction::SpawnTick { round, roll: 0.2 }));
        assert_eq!(gs.active_mole, Some(BoxId(0)));
    }

    #[test]
    fn test_score_only_on_mole_hit() {
        let mut gs = running_state();
        let round = gs.round;
        gs.apply(GameAction::SpawnTick { round, roll: roll_for(&gs, 2) });
        assert!(!gs.apply(GameAction::Whack { id: BoxId(4), x: 0.0, y: 0.0 }));
        assert_eq!(gs.score, 0);
        assert!(gs.apply(GameAction::Whack { id: BoxId(2), x: 10.0, y: 20.0 }));
        assert_eq!(gs.score, 1);
        // same box again: no longer the mole
        assert!(!gs.apply(GameAction::Whack { id: BoxId(2), x: 10.0, y: 20.0 }));
        assert_eq!(gs.score, 1);
        assert_eq!(gs.feedback, vec![HitFeedback { seq: 1, x: 10.0, y: 20.0 }]);
        assert_eq!(gs.last_hit, Some(HitRecord { seq: 1, id: BoxId(2), round }));
    }

    #[test]
    fn test_whack_before_running_is_noop() {
        let mut gs = GameState::new(GameConfig::default());
        assert!(!gs.apply(GameAction::Whack { id: BoxId(0), x: 0.0, y: 0.0 }));
        gs.apply(GameAction::Start);
        assert!(!gs.apply(GameAction::Whack { id: BoxId(0), x: 0.0, y: 0.0 }));
        assert_eq!(gs.score, 0);
    }

    #[test]
    fn test_hit_on_box_three_blocks_reselection_until_cleared() {
        let mut gs = running_state();
        let round = gs.round;
        gs.apply(GameAction::SpawnTick { round, roll: roll_for(&gs, 3) });
        assert_eq!(gs.active_mole, Some(BoxId(3)));
        gs.apply(GameAction::Whack { id: BoxId(3), x: 0.0, y: 0.0 });
        assert_eq!(gs.score, 1);
        assert!(!gs.eligible_boxes().contains(&BoxId(3)));
        assert!(gs.apply(GameAction::ClearHit { id: BoxId(3), round }));
        assert!(gs.eligible_boxes().contains(&BoxId(3)));
    }

    #[test]
    fn test_mole_expires_only_if_still_current() {
        let mut gs = running_state();
        let round = gs.round;
        gs.apply(GameAction::SpawnTick { round, roll: roll_for(&gs, 7) });
        let first = gs.spawn_seq;
        // re-spawn in the same box: the first hide-out timer is stale
        gs.apply(GameAction::SpawnTick { round, roll: roll_for(&gs, 7) });
        assert!(!gs.apply(GameAction::MoleExpired { seq: first, round }));
        assert_eq!(gs.active_mole, Some(BoxId(7)));
        assert!(gs.apply(GameAction::MoleExpired { seq: gs.spawn_seq, round }));
        assert_eq!(gs.active_mole, None);
        assert_eq!(gs.boxes[7], BoxFlag::Empty);
    }

    #[test]
    fn test_sixty_ticks_without_hits_ends_with_zero() {
        let mut gs = running_state();
        let round = gs.round;
        let mut prev = gs.remaining_secs;
        let mut game_over_transitions = 0;
        for _ in 0..60 {
            let was_running = gs.is_running();
            gs.apply(GameAction::SecondTick { round });
            if was_running {
                assert_eq!(gs.remaining_secs, prev - 1);
            }
            prev = gs.remaining_secs;
            if was_running && gs.phase == Phase::GameOver {
                game_over_transitions += 1;
            }
        }
        assert_eq!(gs.phase, Phase::GameOver);
        assert_eq!(gs.remaining_secs, 0);
        assert_eq!(gs.score, 0);
        assert_eq!(game_over_transitions, 1);
        // extra ticks after game over change nothing
        assert!(!gs.apply(GameAction::SecondTick { round }));
        assert_eq!(gs.phase, Phase::GameOver);
    }

    #[test]
    fn test_restart_resets_score_and_time() {
        let mut gs = running_state();
        let round = gs.round;
        gs.apply(GameAction::SpawnTick { round, roll: 0.0 });
        gs.apply(GameAction::Whack { id: BoxId(0), x: 0.0, y: 0.0 });
        for _ in 0..60 {
            gs.apply(GameAction::SecondTick { round });
        }
        assert_eq!(gs.phase, Phase::GameOver);
        assert_eq!(gs.best_score, 1);
        assert!(gs.apply(GameAction::Start));
        assert_eq!(gs.phase, Phase::Countdown(3));
        assert_eq!(gs.score, 0);
        assert_eq!(gs.remaining_secs, 60);
        assert!(gs.boxes.iter().all(|f| *f == BoxFlag::Empty));
        assert_eq!(gs.best_score, 1);
    }

    #[test]
    fn test_stale_round_actions_are_ignored() {
        let mut gs = running_state();
        let old = gs.round;
        gs.apply(GameAction::SpawnTick { round: old, roll: 0.0 });
        gs.apply(GameAction::Whack { id: BoxId(0), x: 0.0, y: 0.0 });
        for _ in 0..60 {
            gs.apply(GameAction::SecondTick { round: old });
        }
        gs.apply(GameAction::Start);
        for _ in 0..3 {
            gs.apply(GameAction::CountdownTick { round: gs.round });
        }
        let before = gs.clone();
        assert!(!gs.apply(GameAction::SecondTick { round: old }));
        assert!(!gs.apply(GameAction::SpawnTick { round: old, roll: 0.5 }));
        assert!(!gs.apply(GameAction::ClearHit { id: BoxId(0), round: old }));
        assert!(!gs.apply(GameAction::CountdownTick { round: old }));
        assert_eq!(gs, before);
    }

    #[test]
    fn test_zero_countdown_starts_running_immediately() {
        let cfg = GameConfig { countdown_from: 0, ..GameConfig::default() };
        let mut gs = GameState::new(cfg);
        gs.apply(GameAction::Start);
        assert_eq!(gs.phase, Phase::Running);
    }

    #[test]
    fn test_dismiss_feedback() {
        let mut gs = running_state();
        let round = gs.round;
        gs.apply(GameAction::SpawnTick { round, roll: 0.0 });
        gs.apply(GameAction::Whack { id: BoxId(0), x: 3.0, y: 4.0 });
        assert!(gs.apply(GameAction::DismissFeedback { seq: 1 }));
        assert!(gs.feedback.is_empty());
        assert!(!gs.apply(GameAction::DismissFeedback { seq: 1 }));
    }

    #[test]
    fn test_pick_index_bounds() {
        assert_eq!(pick_index(0.5, 0), None);
        assert_eq!(pick_index(0.0, 4), Some(0));
        assert_eq!(pick_index(0.999, 4), Some(3));
        assert_eq!(pick_index(1.0, 4), Some(3));
        assert_eq!(pick_index(f64::NAN, 4), Some(0));
    }

    #[test]
    fn test_reducer_returns_same_rc_on_noop() {
        let gs = Rc::new(GameState::new(GameConfig::default()));
        let next = gs.clone().reduce(GameAction::SecondTick { round: 0 });
        assert!(Rc::ptr_eq(&gs, &next));
        let next = gs.clone().reduce(GameAction::Start);
        assert!(!Rc::ptr_eq(&gs, &next));
    }
}
