/*!
 * Program Store
 * Decoded instructions owned by a single process
 */

use crate::core::types::Register;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One decoded instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "arg", rename_all = "snake_case")]
pub enum Instruction {
    /// `S n`: value := n
    SetValue(Register),
    /// `A n`: value += n
    Add(Register),
    /// `D n`: value -= n
    Decrement(Register),
    /// `B`: move the running process to the blocked queue
    Block,
    /// `E`: terminate the running process
    End,
    /// `F n`: create a child, then skip the parent forward by n
    Fork(i32),
    /// `R path`: replace the running program with the one at path
    Replace(String),
}

impl Instruction {
    /// Single-letter operation code as written in program text
    pub fn code(&self) -> char {
        match self {
            Self::SetValue(_) => 'S',
            Self::Add(_) => 'A',
            Self::Decrement(_) => 'D',
            Self::Block => 'B',
            Self::End => 'E',
            Self::Fork(_) => 'F',
            Self::Replace(_) => 'R',
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetValue(n) | Self::Add(n) | Self::Decrement(n) | Self::Fork(n) => {
                write!(f, "{} {}", self.code(), n)
            }
            Self::Replace(path) => write!(f, "{} {}", self.code(), path),
            Self::Block | Self::End => write!(f, "{}", self.code()),
        }
    }
}

/// Ordered instruction sequence
///
/// Owned by exactly one PCB; fork clones it rather than sharing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Instruction at `pc`, or `None` once execution has fallen off the end
    #[inline]
    pub fn fetch(&self, pc: usize) -> Option<&Instruction> {
        self.instructions.get(pc)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions)
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
