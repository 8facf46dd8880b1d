//! Commands collected between two ticks.
//!
//! Terminals deliver key repeats as separate presses, so holding an arrow key
//! would flood the simulation. The queue keeps arrival order but accepts each
//! command at most once until it is drained.

use arrayvec::ArrayVec;

use crate::types::Command;

/// One slot per distinct [`Command`]
pub const QUEUE_CAPACITY: usize = 12;

#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: ArrayVec<Command, QUEUE_CAPACITY>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a command. Returns false if it is already pending.
    pub fn push(&mut self, command: Command) -> bool {
        if self.pending.contains(&command) {
            return false;
        }
        self.pending.try_push(command).is_ok()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Hand out pending commands in arrival order and empty the queue.
    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.pending.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_dropped_until_drain() {
        let mut queue = CommandQueue::new();
        assert!(queue.push(Command::MoveUp));
        assert!(!queue.push(Command::MoveUp));
        assert!(queue.push(Command::PlaceBomb));
        assert_eq!(queue.len(), 2);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained, vec![Command::MoveUp, Command::PlaceBomb]);
        assert!(queue.is_empty());

        assert!(queue.push(Command::MoveUp));
    }

    #[test]
    fn test_every_distinct_command_fits() {
        let all = [
            Command::MoveUp,
            Command::MoveDown,
            Command::MoveLeft,
            Command::MoveRight,
            Command::Pause,
            Command::Resume,
            Command::PlaceBomb,
            Command::StartGame,
            Command::ReturnToMenu,
            Command::CycleDifficulty,
            Command::Restart,
            Command::Quit,
        ];
        let mut queue = CommandQueue::new();
        for cmd in all {
            assert!(queue.push(cmd));
        }
        assert_eq!(queue.len(), QUEUE_CAPACITY);
    }
}
