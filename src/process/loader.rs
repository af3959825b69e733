/*!
 * Program Loader
 * Decodes program text into instructions
 *
 * Each non-blank line is one instruction. The first non-space character
 * (case-insensitive) selects the operation and the rest of the line,
 * trimmed, is its argument.
 */

use super::program::{Instruction, Program};
use crate::core::errors::{LoadError, LoadResult};
use crate::core::limits::MAX_INSTRUCTIONS;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Source of programs for boot and for `R` instructions
pub trait ProgramLoader {
    /// Decode the program named by `path`
    fn load(&self, path: &str) -> LoadResult<Program>;
}

/// Decode program text
///
/// `origin` names the source in error messages. Line numbers are 1-based
/// and count blank lines.
pub fn decode(source: &str, origin: &str, max_instructions: usize) -> LoadResult<Program> {
    let mut instructions = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        let mut chars = line.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        let code = first.to_ascii_uppercase();
        let arg = chars.as_str().trim();

        let instruction = match code {
            'S' => Instruction::SetValue(parse_int(arg)),
            'A' => Instruction::Add(parse_int(arg)),
            'D' => Instruction::Decrement(parse_int(arg)),
            'F' => Instruction::Fork(parse_int(arg)),
            'B' => Instruction::Block,
            'E' => Instruction::End,
            'R' if arg.is_empty() => {
                return Err(LoadError::MissingArgument {
                    origin: origin.to_string(),
                    line: index + 1,
                })
            }
            'R' => Instruction::Replace(arg.to_string()),
            _ => {
                return Err(LoadError::InvalidOperation {
                    origin: origin.to_string(),
                    line: index + 1,
                    code,
                })
            }
        };

        if instructions.len() == max_instructions {
            return Err(LoadError::TooManyInstructions {
                origin: origin.to_string(),
                limit: max_instructions,
            });
        }
        instructions.push(instruction);
    }

    debug!(origin, instructions = instructions.len(), "Program decoded");
    Ok(Program::new(instructions))
}

/// Leading-integer parse: optional sign, then digits; anything else reads as 0
fn parse_int(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            (acc * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1)
        });

    let signed = if negative { -magnitude } else { magnitude };
    signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Loads programs from the filesystem
#[derive(Debug, Clone)]
pub struct FileLoader {
    max_instructions: usize,
}

impl FileLoader {
    pub fn new(max_instructions: usize) -> Self {
        Self { max_instructions }
    }
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new(MAX_INSTRUCTIONS)
    }
}

impl ProgramLoader for FileLoader {
    fn load(&self, path: &str) -> LoadResult<Program> {
        let source = std::fs::read_to_string(Path::new(path)).map_err(|e| LoadError::Io {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        decode(&source, path, self.max_instructions)
    }
}

/// Loads programs from in-memory sources keyed by path
#[derive(Debug, Clone)]
pub struct MemoryLoader {
    sources: HashMap<String, String>,
    max_instructions: usize,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            max_instructions: MAX_INSTRUCTIONS,
        }
    }

    #[must_use]
    pub fn with_max_instructions(mut self, max_instructions: usize) -> Self {
        self.max_instructions = max_instructions;
        self
    }

    /// Register program text under `path`
    #[must_use]
    pub fn with_source(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(path.into(), source.into());
    }
}

impl Default for MemoryLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramLoader for MemoryLoader {
    fn load(&self, path: &str) -> LoadResult<Program> {
        let source = self.sources.get(path).ok_or_else(|| LoadError::Io {
            path: path.to_string(),
            reason: "no such program".to_string(),
        })?;
        decode(source, path, self.max_instructions)
    }
}
