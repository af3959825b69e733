/*!
 * Command Source
 * Reads input lines on the blocking pool and forwards them over a channel
 */

use super::command::{parse_line, Command, Input};
use std::io::BufRead;
use tokio::task::{self, JoinHandle};
use tracing::{debug, warn};

/// Prompt shown before each line of input
pub const PROMPT: &str = "Enter Q, P, U or T\n$ ";

/// Parsed inputs from one line, in order
pub type Line = Vec<Input>;

pub struct CommandReader<R> {
    reader: R,
}

impl<R: BufRead + Send + 'static> CommandReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Start reading on tokio's blocking pool
    ///
    /// Each input line arrives as one [`Line`]. Nothing after a Stop is
    /// forwarded. The channel closes after a Stop command, at end of input,
    /// or on a read error.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> (flume::Receiver<Line>, JoinHandle<()>) {
        let (tx, rx) = flume::unbounded();
        let handle = task::spawn_blocking(move || self.pump(&tx));
        (rx, handle)
    }

    fn pump(mut self, tx: &flume::Sender<Line>) {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    debug!("Command source exhausted");
                    return;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "Error reading input");
                    return;
                }
            }

            let mut inputs = Line::new();
            let mut stop = false;
            for input in parse_line(&line) {
                stop = input == Input::Command(Command::Stop);
                inputs.push(input);
                if stop {
                    break;
                }
            }

            if tx.send(inputs).is_err() || stop {
                return;
            }
        }
    }
}
