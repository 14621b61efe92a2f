use super::state::{Ball, Paddle};

/// Advance the ball by one tick of velocity. No clamping; walls are the
/// collision pass's job.
pub fn integrate_ball(ball: &mut Ball) {
    ball.x += ball.dir_x;
    ball.y += ball.dir_y;
}

/// Apply a paddle's intent flags for one tick.
///
/// Up is evaluated first, then down against the updated position, so holding
/// both keys away from the edges cancels out. Each move is only attempted
/// while the paddle is short of that edge, and stops at the edge instead of
/// overshooting. Returns whether `y` changed.
pub fn move_paddle(paddle: &mut Paddle, field_height: f32) -> bool {
    let start = paddle.y;
    let max_y = paddle.max_y(field_height);

    if paddle.moving_up && paddle.y > 0.0 {
        paddle.y = (paddle.y - paddle.velocity).max(0.0);
    }
    if paddle.moving_down && paddle.y < max_y {
        paddle.y = (paddle.y + paddle.velocity).min(max_y);
    }

    paddle.y != start
}
