mod common;
mod local;

pub use common::{frame_duration, limit_frame_rate};
pub use local::run_game_local;
