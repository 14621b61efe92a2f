// duopong configuration types
// Every field has a default so partial config files stay valid

use serde::{Deserialize, Serialize};

use super::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Check every section that can make a match degenerate
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;
        self.display.validate()?;
        crate::game::input::Controls::from_bindings(&self.keybindings).map(|_| ())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Left paddle (player 1)
    pub left_paddle_up: String,
    pub left_paddle_down: String,

    // Right paddle (player 2)
    pub right_paddle_up: String,
    pub right_paddle_down: String,

    // Match controls
    pub start: String,
    pub stop: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_paddle_up: "W".to_string(),
            left_paddle_down: "S".to_string(),
            right_paddle_up: "Up".to_string(),
            right_paddle_down: "Down".to_string(),
            start: "Space".to_string(),
            stop: "Esc".to_string(),
            quit: "Q".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Playfield dimensions in field units
    pub field_width: f32,
    pub field_height: f32,

    // Ball radius
    pub ball_radius: f32,

    // Ball speed per axis, in field units per tick
    pub ball_velocity: f32,

    // Paddle size
    pub paddle_width: f32,
    pub paddle_height: f32,

    // Paddle movement per tick while a direction is held
    pub paddle_velocity: f32,

    // Distance from each side wall to the paddle's x position
    pub paddle_offset: f32,

    // Points needed to win the match
    pub best_of: u8,

    // Test the ball's bottom edge against the bottom wall instead of its top edge
    pub symmetric_wall_bounce: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,
            ball_radius: 6.0,
            ball_velocity: 3.0,
            paddle_width: 8.0,
            paddle_height: 70.0,
            paddle_velocity: 7.0,
            paddle_offset: 70.0,
            best_of: 3,
            symmetric_wall_bounce: false,
        }
    }
}

impl PhysicsConfig {
    /// Validate against the configured field size
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_for_field(self.field_width, self.field_height)
    }

    /// Validate ball and paddle settings against an arbitrary field size.
    ///
    /// Used on resize, where the field no longer matches `field_width` and
    /// `field_height`.
    pub fn validate_for_field(&self, width: f32, height: f32) -> Result<(), ConfigError> {
        positive("field_width", width)?;
        positive("field_height", height)?;
        positive("ball_radius", self.ball_radius)?;
        positive("ball_velocity", self.ball_velocity)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("paddle_velocity", self.paddle_velocity)?;

        if !self.paddle_offset.is_finite() || self.paddle_offset < 0.0 {
            return Err(ConfigError::NegativeOffset(self.paddle_offset));
        }
        if self.paddle_height > height {
            return Err(ConfigError::PaddleTallerThanField {
                paddle_height: self.paddle_height,
                field_height: height,
            });
        }
        let diameter = self.ball_radius * 2.0;
        if diameter >= width || diameter >= height {
            return Err(ConfigError::BallLargerThanField {
                diameter,
                field_width: width,
                field_height: height,
            });
        }
        if self.paddle_offset + self.paddle_width > width / 2.0 {
            return Err(ConfigError::PaddleOutsideField {
                offset: self.paddle_offset,
                paddle_width: self.paddle_width,
                field_width: width,
            });
        }
        if self.best_of == 0 {
            return Err(ConfigError::ZeroBestOf);
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Target frames per second (one simulation tick per frame)
    pub target_fps: u64,

    // Without key release reporting, a key is released after this long
    // without a press or repeat event
    pub key_hold_ms: u64,

    // Follow terminal aspect ratio with the playfield height (applied between matches)
    pub fit_playfield_to_terminal: bool,

    // Score display color (RGB values 0-255)
    pub score_color: [u8; 3],

    // Paddle and ball color
    pub field_color: [u8; 3],

    // Center line color
    pub center_line_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            key_hold_ms: 500,
            fit_playfield_to_terminal: false,
            score_color: [255, 255, 255],       // White
            field_color: [255, 255, 255],       // White
            center_line_color: [100, 100, 100], // Gray
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(())
    }
}
