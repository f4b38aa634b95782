pub mod app;
pub mod controls_panel;
pub mod game_over_overlay;
pub mod hit_feedback;
pub mod intro_overlay;
pub mod playfield;
pub mod stats_panel;
pub mod time_display;

pub use app::App;
