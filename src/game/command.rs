//! Paddle commands and the channel that carries them into the simulation.
//!
//! Input handlers only ever send commands; the tick drains the queue once per
//! frame and turns them into intent flags. Senders are `Send`, so input may
//! come from any thread while the simulation stays single-consumer.

use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use super::state::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

/// Set or clear one intent flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleCommand {
    pub side: Side,
    pub direction: Direction,
    pub pressed: bool,
}

impl PaddleCommand {
    pub fn press(side: Side, direction: Direction) -> Self {
        Self {
            side,
            direction,
            pressed: true,
        }
    }

    pub fn release(side: Side, direction: Direction) -> Self {
        Self {
            side,
            direction,
            pressed: false,
        }
    }
}

/// Create a connected sender/queue pair
pub fn command_channel() -> (CommandSender, CommandQueue) {
    let (tx, rx) = mpsc::channel();
    (CommandSender { tx }, CommandQueue { rx })
}

/// Producer half, cheap to clone
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::Sender<PaddleCommand>,
}

impl CommandSender {
    /// Queue a command. Returns false once the queue has been dropped.
    pub fn send(&self, command: PaddleCommand) -> bool {
        self.tx.send(command).is_ok()
    }
}

/// Consumer half, owned by whoever runs the ticks
#[derive(Debug)]
pub struct CommandQueue {
    rx: mpsc::Receiver<PaddleCommand>,
}

impl CommandQueue {
    /// Take every command queued so far, in arrival order
    pub fn drain(&self) -> Vec<PaddleCommand> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order_and_empties_queue() {
        let (tx, queue) = command_channel();
        tx.send(PaddleCommand::press(Side::Left, Direction::Up));
        tx.send(PaddleCommand::release(Side::Left, Direction::Up));
        tx.send(PaddleCommand::press(Side::Right, Direction::Down));

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                PaddleCommand::press(Side::Left, Direction::Up),
                PaddleCommand::release(Side::Left, Direction::Up),
                PaddleCommand::press(Side::Right, Direction::Down),
            ]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_commands_from_another_thread() {
        let (tx, queue) = command_channel();
        let handle = std::thread::spawn(move || {
            for _ in 0..10 {
                tx.send(PaddleCommand::press(Side::Right, Direction::Up));
            }
        });
        handle.join().unwrap();

        assert_eq!(queue.drain().len(), 10);
    }

    #[test]
    fn test_send_after_queue_dropped() {
        let (tx, queue) = command_channel();
        drop(queue);
        assert!(!tx.send(PaddleCommand::press(Side::Left, Direction::Down)));
    }
}
