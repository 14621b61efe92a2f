//! One simulation tick.
//!
//! Order inside a tick: queued commands → win check → collisions (and scoring)
//! → ball integration → paddle movement. Outside `Playing` a tick is a no-op.

use super::collision;
use super::command::PaddleCommand;
use super::physics::{integrate_ball, move_paddle};
use super::state::{MatchState, Side};

/// What happened during a tick, for sound, logging or UI cues
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickEvents {
    pub wall_bounce: bool,
    pub left_paddle_hit: bool,
    pub right_paddle_hit: bool,
    pub point: Option<Side>,
    pub match_over: Option<Side>,
}

impl TickEvents {
    pub fn any(&self) -> bool {
        self.wall_bounce
            || self.left_paddle_hit
            || self.right_paddle_hit
            || self.point.is_some()
            || self.match_over.is_some()
    }
}

/// Advance a running match by one tick.
///
/// Commands are applied in order before anything moves. When the match is
/// not running they are discarded and the state is left untouched.
pub fn tick<I>(state: &mut MatchState, commands: I) -> TickEvents
where
    I: IntoIterator<Item = PaddleCommand>,
{
    let mut events = TickEvents::default();
    if !state.is_playing() {
        return events;
    }

    for command in commands {
        tracing::debug!(?command, "paddle command");
        state
            .paddle_mut(command.side)
            .set_intent(command.direction, command.pressed);
    }

    if let Some(winner) = state.check_win() {
        events.match_over = Some(winner);
        return events;
    }

    let playfield = state.playfield();
    let result = collision::resolve(
        &state.ball,
        &state.left_paddle,
        &state.right_paddle,
        playfield,
        state.physics().symmetric_wall_bounce,
    );

    if let Some(scorer) = result.point {
        state.score_point(scorer);
        events.point = Some(scorer);
    } else {
        state.ball.dir_x = result.dir_x;
        state.ball.dir_y = result.dir_y;
        events.wall_bounce = result.wall_bounce;
        events.left_paddle_hit = result.left_paddle_hit;
        events.right_paddle_hit = result.right_paddle_hit;
        if result.wall_bounce || result.left_paddle_hit || result.right_paddle_hit {
            tracing::debug!(
                x = state.ball.x,
                y = state.ball.y,
                dir_x = state.ball.dir_x,
                dir_y = state.ball.dir_y,
                "ball reflected"
            );
        }
    }

    integrate_ball(&mut state.ball);
    move_paddle(&mut state.left_paddle, playfield.height);
    move_paddle(&mut state.right_paddle, playfield.height);

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;
    use crate::game::command::{command_channel, Direction};
    use crate::game::state::{MatchPhase, Score};
    use proptest::prelude::*;

    fn playing(seed: u64) -> MatchState {
        let mut state = MatchState::new(PhysicsConfig::default(), Some(seed)).unwrap();
        state.start().unwrap();
        state
    }

    fn no_commands() -> Vec<PaddleCommand> {
        Vec::new()
    }

    #[test]
    fn test_idle_tick_does_nothing() {
        let mut state = MatchState::new(PhysicsConfig::default(), Some(1)).unwrap();
        let before = state.snapshot();

        let events = tick(
            &mut state,
            [PaddleCommand::press(Side::Left, Direction::Up)],
        );

        assert!(!events.any());
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_ball_moves_each_tick() {
        let mut state = playing(3);
        let start = state.ball;

        tick(&mut state, no_commands());
        assert_eq!(state.ball.x, start.x + start.dir_x);
        assert_eq!(state.ball.y, start.y + start.dir_y);
    }

    #[test]
    fn test_commands_drive_paddles() {
        let mut state = playing(3);
        let start_y = state.left_paddle.y;

        tick(
            &mut state,
            [PaddleCommand::press(Side::Left, Direction::Up)],
        );
        assert_eq!(state.left_paddle.y, start_y - 7.0);

        // Intent persists until released
        tick(&mut state, no_commands());
        assert_eq!(state.left_paddle.y, start_y - 14.0);

        tick(
            &mut state,
            [PaddleCommand::release(Side::Left, Direction::Up)],
        );
        assert_eq!(state.left_paddle.y, start_y - 14.0);
        assert_eq!(state.right_paddle.y, start_y);
    }

    #[test]
    fn test_simultaneous_intents_leave_paddle_in_place() {
        let mut state = playing(3);
        let start_y = state.right_paddle.y;

        tick(
            &mut state,
            [
                PaddleCommand::press(Side::Right, Direction::Up),
                PaddleCommand::press(Side::Right, Direction::Down),
            ],
        );
        assert_eq!(state.right_paddle.y, start_y);
    }

    #[test]
    fn test_top_wall_bounce_event() {
        let mut state = playing(3);
        state.ball.x = 400.0;
        state.ball.y = 5.0;
        state.ball.dir_x = 3.0;
        state.ball.dir_y = -3.0;

        let events = tick(&mut state, no_commands());
        assert!(events.wall_bounce);
        assert_eq!(state.ball.dir_y, 3.0);
        assert_eq!(state.ball.y, 8.0);
    }

    #[test]
    fn test_left_paddle_hit_sends_ball_back() {
        let mut state = playing(3);
        state.ball.x = 80.0;
        state.ball.y = state.left_paddle.y + 20.0;
        state.ball.dir_x = -3.0;

        let events = tick(&mut state, no_commands());
        assert!(events.left_paddle_hit);
        assert_eq!(state.ball.dir_x, 3.0);
        assert_eq!(state.ball.x, 83.0);
    }

    #[test]
    fn test_right_wall_point_resets_everything() {
        let mut state = playing(3);
        state.ball.x = 800.0 + state.ball.radius;
        state.left_paddle.y = 0.0;
        state.right_paddle.y = 530.0;

        let events = tick(
            &mut state,
            [PaddleCommand::press(Side::Right, Direction::Up)],
        );

        assert_eq!(events.point, Some(Side::Left));
        assert_eq!(state.score, Score { left: 1, right: 0 });

        // Fresh ball from the center, already advanced by this tick's integration
        assert_eq!(state.ball.x, 400.0 + state.ball.dir_x);
        assert_eq!(state.ball.y, 300.0 + state.ball.dir_y);
        assert_eq!(state.ball.dir_x.abs(), 3.0);

        // Fresh paddles, with the pending intent cleared by the reset
        assert_eq!(state.left_paddle.y, 265.0);
        assert_eq!(state.right_paddle.y, 265.0);
        assert!(!state.right_paddle.moving_up);
    }

    #[test]
    fn test_left_wall_point_for_right() {
        let mut state = playing(3);
        state.ball.x = 2.0;

        let events = tick(&mut state, no_commands());
        assert_eq!(events.point, Some(Side::Right));
        assert_eq!(state.score, Score { left: 0, right: 1 });
    }

    #[test]
    fn test_match_ends_after_best_of_points() {
        let mut state = playing(11);

        for expected in 1..=3u8 {
            state.ball.x = 799.0;
            let events = tick(&mut state, no_commands());
            assert_eq!(events.point, Some(Side::Left));
            assert_eq!(state.score.left, expected);
        }
        // The scoring tick itself keeps playing; the next tick ends the match
        assert!(state.is_playing());

        let events = tick(&mut state, no_commands());
        assert_eq!(events.match_over, Some(Side::Left));
        assert_eq!(state.phase(), MatchPhase::Over { winner: Side::Left });

        let frozen = state.snapshot();
        for _ in 0..10 {
            let events = tick(
                &mut state,
                [PaddleCommand::press(Side::Left, Direction::Down)],
            );
            assert!(!events.any());
        }
        assert_eq!(state.snapshot(), frozen);
    }

    #[test]
    fn test_stopped_match_does_not_tick() {
        let mut state = playing(5);
        state.stop();
        let frozen = state.snapshot();

        tick(&mut state, no_commands());
        assert_eq!(state.snapshot(), frozen);
    }

    #[test]
    fn test_replay_is_deterministic() {
        let script: Vec<Vec<PaddleCommand>> = (0..600)
            .map(|i| match i % 90 {
                0 => vec![PaddleCommand::press(Side::Left, Direction::Up)],
                30 => vec![
                    PaddleCommand::release(Side::Left, Direction::Up),
                    PaddleCommand::press(Side::Right, Direction::Down),
                ],
                60 => vec![PaddleCommand::release(Side::Right, Direction::Down)],
                _ => Vec::new(),
            })
            .collect();

        let mut a = playing(99_999);
        let mut b = playing(99_999);
        let (tx, queue) = command_channel();

        for commands in &script {
            tick(&mut a, commands.iter().copied());
            for command in commands {
                tx.send(*command);
            }
            tick(&mut b, queue.drain());
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }

    proptest! {
        /// Property: scores only grow, stay capped, and stop once the match ends
        #[test]
        fn prop_score_monotonic(
            seed in any::<u64>(),
            intents in prop::collection::vec((0usize..4, any::<bool>()), 0..3000)
        ) {
            let mut state = playing(seed);
            let mut last = state.score;

            for (slot, pressed) in intents {
                let side = if slot < 2 { Side::Left } else { Side::Right };
                let direction = if slot % 2 == 0 { Direction::Up } else { Direction::Down };
                let events = tick(&mut state, [PaddleCommand { side, direction, pressed }]);

                prop_assert!(state.score.left >= last.left);
                prop_assert!(state.score.right >= last.right);
                prop_assert!(state.score.left <= state.best_of());
                prop_assert!(state.score.right <= state.best_of());
                if !state.is_playing() {
                    prop_assert_eq!(events.point, None);
                }
                last = state.score;
            }
        }
    }
}
