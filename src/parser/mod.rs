use std::fmt;

use thiserror::Error;

use crate::lexer::lexer::Lexer;

pub mod parser;

/// A single instruction node. Consecutive moves and cell changes are folded
/// by the parser into one node carrying the net signed count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstKind {
    /// Net displacement of the data pointer; positive is right.
    MovePointer(isize),

    /// Net change to the current cell, applied modulo 256.
    ModifyCell(i64),

    /// Write the current cell to the output device.
    Output,

    /// Read one byte from the input device into the current cell.
    Input,

    /// Execute the body while the current cell is non-zero.
    Loop(BasicBlock),
}

/// An ordered sequence of instructions; order is execution order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasicBlock {
    pub instructions: Vec<AstKind>,
}

pub type Program = BasicBlock;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("`]` at byte {position} has no matching `[`")]
    UnexpectedLoopEnd { position: usize },

    #[error("`[` at byte {position} has no matching `]`")]
    UnclosedLoop { position: usize },
}

/// Parse raw source bytes into a program.
pub fn parse(source: &[u8]) -> Result<Program, ParseError> {
    parser::Parser::new(Lexer::new(source)).parse_program()
}

impl fmt::Display for BasicBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_block(self, 0, f)
    }
}

fn fmt_block(block: &BasicBlock, indent: usize, f: &mut fmt::Formatter) -> fmt::Result {
    for instruction in &block.instructions {
        for _ in 0..indent {
            write!(f, "  ")?;
        }

        match instruction {
            AstKind::MovePointer(offset) => writeln!(f, "MOVE_PTR({offset:+})")?,
            AstKind::ModifyCell(delta) => writeln!(f, "MODIFY_CELL({delta:+})")?,
            AstKind::Output => writeln!(f, "OUTPUT")?,
            AstKind::Input => writeln!(f, "INPUT")?,
            AstKind::Loop(body) => {
                writeln!(f, "LOOP")?;
                fmt_block(body, indent + 1, f)?;
            }
        }
    }
    Ok(())
}
