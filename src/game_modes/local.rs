use std::io;
use std::time::{Duration, Instant};

use ratatui::{backend::Backend, Terminal};

use crate::config::{Config, ConfigError};
use crate::game::{self, command_channel, Controls, InputAction, KeyTracker, MatchState};
use crate::ui;

use super::common::{frame_duration, limit_frame_rate};

/// Run a local two-player match until the players quit.
///
/// One simulation tick per frame. `release_events` tells the key tracker
/// whether the terminal reports key releases.
pub fn run_game_local<B: Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    seed: Option<u64>,
    release_events: bool,
) -> io::Result<()> {
    let invalid = |e: ConfigError| io::Error::new(io::ErrorKind::InvalidInput, e);

    let controls = Controls::from_bindings(&config.keybindings).map_err(invalid)?;
    let mut tracker = KeyTracker::new(
        release_events,
        Duration::from_millis(config.display.key_hold_ms),
    );
    let mut state = MatchState::new(config.physics.clone(), seed).map_err(invalid)?;
    let (commands, queue) = command_channel();

    let frame = frame_duration(config.display.target_fps);

    tracing::info!(
        seed = state.seed(),
        release_events,
        fps = config.display.target_fps,
        "local match ready"
    );

    if config.display.fit_playfield_to_terminal {
        let size = terminal.size()?;
        fit_playfield(&mut state, config, size.width, size.height);
    }

    loop {
        let frame_start = Instant::now();

        for action in game::poll_input(&controls, &mut tracker)? {
            match action {
                InputAction::Quit => {
                    tracing::info!(score = ?state.score, "quit");
                    return Ok(());
                }
                InputAction::Start => {
                    if let Err(e) = state.start() {
                        tracing::warn!(error = %e, "match could not start");
                    } else {
                        tracker.clear();
                    }
                }
                InputAction::Stop => state.stop(),
                InputAction::Paddle(command) => {
                    commands.send(command);
                }
                InputAction::Resize(columns, rows) => {
                    if config.display.fit_playfield_to_terminal {
                        fit_playfield(&mut state, config, columns, rows);
                    }
                }
            }
        }

        let events = game::tick(&mut state, queue.drain());
        if events.point.is_some() {
            // Fresh paddles carry no intent; let the next repeat re-press
            tracker.clear();
        }

        let snapshot = state.snapshot();
        terminal.draw(|f| ui::render(f, &snapshot, &config.display, &config.keybindings))?;

        limit_frame_rate(frame_start, frame);
    }
}

/// Request a playfield matching the terminal; applied now or at the next start
fn fit_playfield(state: &mut MatchState, config: &Config, columns: u16, rows: u16) {
    let Some(playfield) = ui::playfield_for_terminal(columns, rows, config.physics.field_width)
    else {
        tracing::warn!(columns, rows, "terminal too small to fit the playfield");
        return;
    };

    if let Err(e) = state.resize(playfield) {
        tracing::warn!(
            error = %e,
            width = playfield.width,
            height = playfield.height,
            "resize rejected"
        );
    }
}
