pub mod audio;
pub mod timers;

pub use audio::{AudioCues, Cue};
pub use timers::TimerSet;
