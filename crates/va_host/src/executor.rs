use std::collections::VecDeque;

use tracing::warn;
use va_protocol::Command;

/// Command queue.
///
/// Queues command execution instead of recursing, so a command whose
/// execution produces further commands cannot overflow the stack and
/// execution order stays predictable.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    /// Safety valve against command cycles.
    const MAX_ITERATIONS: usize = 1000;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        if !matches!(command, Command::None) {
            self.pending.push_back(command);
        }
    }

    pub fn push_batch(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.push(command);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Execute queued commands until the queue drains.
    ///
    /// Commands produced during execution are appended and processed in the
    /// same pass.
    pub fn process_all<E: CommandExecutor + ?Sized>(&mut self, executor: &mut E) {
        let mut iterations = 0;

        while let Some(command) = self.pending.pop_front() {
            let produced = executor.execute_command(command);
            self.push_batch(produced);

            iterations += 1;
            if iterations >= Self::MAX_ITERATIONS {
                warn!("command queue exceeded {} iterations, breaking", Self::MAX_ITERATIONS);
                break;
            }
        }
    }
}

/// Executes host commands (implemented by the embedding page).
pub trait CommandExecutor {
    /// Execute one command, returning any follow-up commands.
    fn execute_command(&mut self, command: Command) -> Vec<Command>;

    /// Queue-execute a batch of commands until nothing is left.
    fn execute_command_chain(&mut self, commands: Vec<Command>) {
        let mut queue = CommandQueue::new();
        queue.push_batch(commands);
        queue.process_all(self);
    }
}
