use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::command::Direction;
use crate::config::{ConfigError, PhysicsConfig};

/// Size of the surface the match is played on, in field units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_physics(physics: &PhysicsConfig) -> Self {
        Self::new(physics.field_width, physics.field_height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Short label shown above each half of the field
    pub fn player_label(self) -> &'static str {
        match self {
            Side::Left => "P1",
            Side::Right => "P2",
        }
    }

    pub fn winner_label(self) -> &'static str {
        match self {
            Side::Left => "PLAYER 1 WINS",
            Side::Right => "PLAYER 2 WINS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub dir_x: f32,
    pub dir_y: f32,
}

impl Ball {
    /// A fresh ball at the center of the field, heading in one of the four
    /// diagonal directions picked at random
    pub fn serve<R: Rng + ?Sized>(playfield: Playfield, physics: &PhysicsConfig, rng: &mut R) -> Self {
        let v = physics.ball_velocity;
        Self {
            x: playfield.width / 2.0,
            y: playfield.height / 2.0,
            radius: physics.ball_radius,
            dir_x: if rng.gen_bool(0.5) { -v } else { v },
            dir_y: if rng.gen_bool(0.5) { v } else { -v },
        }
    }

    #[inline]
    pub fn left_edge(&self) -> f32 {
        self.x - self.radius
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.x + self.radius
    }

    #[inline]
    pub fn top_edge(&self) -> f32 {
        self.y - self.radius
    }

    #[inline]
    pub fn bottom_edge(&self) -> f32 {
        self.y + self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
    pub moving_up: bool,
    pub moving_down: bool,
}

impl Paddle {
    /// A fresh paddle, vertically centered, with no movement intent
    pub fn centered(side: Side, playfield: Playfield, physics: &PhysicsConfig) -> Self {
        let x = match side {
            Side::Left => physics.paddle_offset,
            Side::Right => playfield.width - physics.paddle_offset,
        };
        Self {
            side,
            x,
            y: playfield.height / 2.0 - physics.paddle_height / 2.0,
            width: physics.paddle_width,
            height: physics.paddle_height,
            velocity: physics.paddle_velocity,
            moving_up: false,
            moving_down: false,
        }
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom_edge(&self) -> f32 {
        self.y + self.height
    }

    /// Lowest allowed value for `y` on the given field
    #[inline]
    pub fn max_y(&self, field_height: f32) -> f32 {
        field_height - self.height
    }

    pub fn set_intent(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Up => self.moving_up = pressed,
            Direction::Down => self.moving_down = pressed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u8,
    pub right: u8,
}

impl Score {
    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Add a point for `side` unless it already has `cap` points.
    /// Returns whether the counter changed.
    pub fn increment(&mut self, side: Side, cap: u8) -> bool {
        let counter = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        if *counter >= cap {
            return false;
        }
        *counter += 1;
        true
    }

    /// The side that has reached `best_of`, left checked first
    pub fn winner(&self, best_of: u8) -> Option<Side> {
        if self.left >= best_of {
            Some(Side::Left)
        } else if self.right >= best_of {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// No match running, waiting for a start command
    Idle,
    /// Ticks advance the simulation
    Playing,
    /// A side reached the target; ticks do nothing until the next start
    Over { winner: Side },
}

/// Read-only copy of everything the renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub playfield: Playfield,
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub score: Score,
    pub best_of: u8,
    pub phase: MatchPhase,
}

impl Snapshot {
    /// Text for the win overlay, if the match is over
    pub fn winner_label(&self) -> Option<&'static str> {
        match self.phase {
            MatchPhase::Over { winner } => Some(winner.winner_label()),
            _ => None,
        }
    }
}

/// Complete state of one match: entities, score, phase and serve RNG
#[derive(Debug, Clone)]
pub struct MatchState {
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub score: Score,
    physics: PhysicsConfig,
    playfield: Playfield,
    pending_playfield: Option<Playfield>,
    phase: MatchPhase,
    seed: u64,
    rng: StdRng,
}

impl MatchState {
    /// Create an idle match on the configured field.
    ///
    /// Without a seed the serve directions come from a random seed.
    pub fn new(physics: PhysicsConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        physics.validate()?;

        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let playfield = Playfield::from_physics(&physics);

        Ok(Self {
            ball: Ball::serve(playfield, &physics, &mut rng),
            left_paddle: Paddle::centered(Side::Left, playfield, &physics),
            right_paddle: Paddle::centered(Side::Right, playfield, &physics),
            score: Score::default(),
            physics,
            playfield,
            pending_playfield: None,
            phase: MatchPhase::Idle,
            seed,
            rng,
        })
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == MatchPhase::Playing
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    /// Field size waiting for the next start, if a resize arrived mid-match
    pub fn pending_playfield(&self) -> Option<Playfield> {
        self.pending_playfield
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    pub fn best_of(&self) -> u8 {
        self.physics.best_of
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left_paddle,
            Side::Right => &self.right_paddle,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left_paddle,
            Side::Right => &mut self.right_paddle,
        }
    }

    /// Begin a new match from Idle or Over.
    ///
    /// Applies a pending resize, resets the score and recreates ball and
    /// paddles. Ignored while a match is already running.
    pub fn start(&mut self) -> Result<(), ConfigError> {
        if self.phase == MatchPhase::Playing {
            tracing::debug!("start ignored, match already running");
            return Ok(());
        }

        let playfield = self.pending_playfield.unwrap_or(self.playfield);
        self.physics
            .validate_for_field(playfield.width, playfield.height)?;
        self.playfield = playfield;
        self.pending_playfield = None;

        self.score = Score::default();
        self.reset_positions();
        self.phase = MatchPhase::Playing;

        tracing::info!(
            seed = self.seed,
            width = playfield.width,
            height = playfield.height,
            best_of = self.physics.best_of,
            "match started"
        );
        Ok(())
    }

    /// Abandon the running match. No tick advances the simulation afterwards.
    pub fn stop(&mut self) {
        if self.phase == MatchPhase::Playing {
            self.phase = MatchPhase::Idle;
            tracing::info!(left = self.score.left, right = self.score.right, "match stopped");
        }
    }

    /// Award a point and put ball and both paddles back at their start positions
    pub fn score_point(&mut self, side: Side) {
        if !self.score.increment(side, self.physics.best_of) {
            return;
        }
        tracing::info!(
            scorer = side.player_label(),
            left = self.score.left,
            right = self.score.right,
            "point scored"
        );
        self.reset_positions();
    }

    /// End the match if either side reached the target
    pub fn check_win(&mut self) -> Option<Side> {
        if self.phase != MatchPhase::Playing {
            return None;
        }
        let winner = self.score.winner(self.physics.best_of)?;
        self.phase = MatchPhase::Over { winner };
        tracing::info!(
            winner = winner.player_label(),
            left = self.score.left,
            right = self.score.right,
            "match over"
        );
        Some(winner)
    }

    /// Change the field size. Takes effect now between matches, or at the
    /// next start while a match is running.
    pub fn resize(&mut self, playfield: Playfield) -> Result<(), ConfigError> {
        self.physics
            .validate_for_field(playfield.width, playfield.height)?;

        if self.phase == MatchPhase::Playing {
            tracing::debug!(
                width = playfield.width,
                height = playfield.height,
                "resize deferred until next start"
            );
            self.pending_playfield = Some(playfield);
        } else {
            self.playfield = playfield;
            self.pending_playfield = None;
            self.reset_positions();
        }
        Ok(())
    }

    /// Replace ball and paddles with fresh values
    pub fn reset_positions(&mut self) {
        self.ball = Ball::serve(self.playfield, &self.physics, &mut self.rng);
        self.left_paddle = Paddle::centered(Side::Left, self.playfield, &self.physics);
        self.right_paddle = Paddle::centered(Side::Right, self.playfield, &self.physics);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            playfield: self.playfield,
            ball: self.ball,
            left_paddle: self.left_paddle,
            right_paddle: self.right_paddle,
            score: self.score,
            best_of: self.physics.best_of,
            phase: self.phase,
        }
    }
}
