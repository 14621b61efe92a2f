//! Frame pacing for the game loop

use std::time::{Duration, Instant};

/// Length of one frame (and one simulation tick) at `target_fps`
pub fn frame_duration(target_fps: u64) -> Duration {
    Duration::from_micros(1_000_000 / target_fps.max(1))
}

/// Sleep for whatever is left of the frame that began at `frame_start`.
///
/// Call at the end of each loop iteration. A frame that already overran is
/// not compensated.
pub fn limit_frame_rate(frame_start: Instant, frame: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame {
        std::thread::sleep(frame - elapsed);
    }
}
