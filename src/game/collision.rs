//! Ball against walls and paddles.
//!
//! Everything here is a pure comparison on the current positions. The result
//! says what should happen; the step applies it. Reflection is axis-aligned:
//! a hit only flips the sign of one velocity component.

use super::state::{Ball, Paddle, Playfield, Side};

/// Outcome of one collision pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Side that scored; when set, nothing else was evaluated
    pub point: Option<Side>,
    pub wall_bounce: bool,
    pub left_paddle_hit: bool,
    pub right_paddle_hit: bool,
    /// Ball velocity after every reflection that applied
    pub dir_x: f32,
    pub dir_y: f32,
}

impl CollisionResult {
    fn untouched(ball: &Ball) -> Self {
        Self {
            point: None,
            wall_bounce: false,
            left_paddle_hit: false,
            right_paddle_hit: false,
            dir_x: ball.dir_x,
            dir_y: ball.dir_y,
        }
    }

    fn point(ball: &Ball, side: Side) -> Self {
        Self {
            point: Some(side),
            ..Self::untouched(ball)
        }
    }
}

/// Run every wall and paddle check against the ball.
///
/// A scoring wall ends the pass. The horizontal wall and both paddle checks
/// are independent, so a degenerate frame can flip a component twice.
pub fn resolve(
    ball: &Ball,
    left: &Paddle,
    right: &Paddle,
    playfield: Playfield,
    symmetric_walls: bool,
) -> CollisionResult {
    if hits_right_wall(ball, playfield) {
        return CollisionResult::point(ball, Side::Left);
    }
    if hits_left_wall(ball) {
        return CollisionResult::point(ball, Side::Right);
    }

    let mut result = CollisionResult::untouched(ball);

    if hits_horizontal_wall(ball, playfield, symmetric_walls) {
        result.dir_y = -result.dir_y;
        result.wall_bounce = true;
    }
    if hits_left_paddle(ball, left) {
        result.dir_x = -result.dir_x;
        result.left_paddle_hit = true;
    }
    if hits_right_paddle(ball, right) {
        result.dir_x = -result.dir_x;
        result.right_paddle_hit = true;
    }

    result
}

/// Leading edge reached the right wall: a point for the left side
pub fn hits_right_wall(ball: &Ball, playfield: Playfield) -> bool {
    ball.right_edge() >= playfield.width
}

/// Trailing edge reached the left wall: a point for the right side
pub fn hits_left_wall(ball: &Ball) -> bool {
    ball.left_edge() <= 0.0
}

/// Top or bottom wall.
///
/// By default only the ball's top edge is compared with both limits, so the
/// ball sinks one radius into the bottom wall before turning. `symmetric`
/// compares the bottom edge with the bottom wall instead.
pub fn hits_horizontal_wall(ball: &Ball, playfield: Playfield, symmetric: bool) -> bool {
    let bottom_probe = if symmetric {
        ball.bottom_edge()
    } else {
        ball.top_edge()
    };
    ball.top_edge() < 0.0 || bottom_probe > playfield.height
}

fn overlaps_vertically(ball: &Ball, paddle: &Paddle) -> bool {
    ball.bottom_edge() >= paddle.y && ball.top_edge() <= paddle.bottom_edge()
}

/// Ball straddles the left paddle's inner (right) face
pub fn hits_left_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    overlaps_vertically(ball, paddle)
        && ball.left_edge() <= paddle.right_edge()
        && ball.right_edge() >= paddle.right_edge()
}

/// Ball center has reached the right paddle's inner (left) face
pub fn hits_right_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    overlaps_vertically(ball, paddle) && ball.left_edge() <= paddle.right_edge() && ball.x >= paddle.x
}
