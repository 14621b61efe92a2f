pub mod collision;
pub mod command;
pub mod input;
pub mod physics;
pub mod state;
pub mod step;

pub use command::{command_channel, CommandQueue, CommandSender, Direction, PaddleCommand};
pub use input::{poll_input, Controls, InputAction, KeyTracker};
pub use state::{Ball, MatchPhase, MatchState, Paddle, Playfield, Score, Side, Snapshot};
pub use step::{tick, TickEvents};
