/*!
 * Commands
 * Single-character commands accepted by the simulator
 */

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// `Q`: execute one instruction
    Step,
    /// `U`: move the oldest blocked process to ready
    Unblock,
    /// `P`: print the system state
    Snapshot,
    /// `T`: stop and report average turnaround
    Stop,
}

impl TryFrom<char> for Command {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'Q' => Ok(Self::Step),
            'U' => Ok(Self::Unblock),
            'P' => Ok(Self::Snapshot),
            'T' => Ok(Self::Stop),
            _ => Err(c),
        }
    }
}

/// One unit read from the command source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Invalid(char),
}

impl From<char> for Input {
    fn from(c: char) -> Self {
        match Command::try_from(c) {
            Ok(command) => Self::Command(command),
            Err(c) => Self::Invalid(c),
        }
    }
}

/// Every non-whitespace character of `line`, in order
pub fn parse_line(line: &str) -> impl Iterator<Item = Input> + '_ {
    line.chars().filter(|c| !c.is_whitespace()).map(Input::from)
}
