use std::io::{Read, Write};

use crate::parser::{AstKind, BasicBlock, Program};

use super::{Runtime, RuntimeError};

/// Walks the tree directly. This is the canonical executor; the bytecode
/// interpreter covers flat streams and tight loops.
pub struct AstInterpreter {}

impl AstInterpreter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn interpret<R: Read, W: Write>(
        &mut self,
        runtime: &mut Runtime<R, W>,
        program: &Program,
    ) -> Result<(), RuntimeError> {
        self.interpret_block(runtime, program)
    }

    fn interpret_block<R: Read, W: Write>(
        &mut self,
        runtime: &mut Runtime<R, W>,
        block: &BasicBlock,
    ) -> Result<(), RuntimeError> {
        // The upper-most block (the program) runs exactly once; only `Loop`
        // bodies re-check the guard and repeat.
        for instruction in block.instructions.iter() {
            match instruction {
                AstKind::MovePointer(offset) => runtime.move_pointer(*offset),
                AstKind::ModifyCell(delta) => runtime.modify_cell(*delta),
                AstKind::Output => runtime.output()?,
                AstKind::Input => runtime.input()?,
                AstKind::Loop(body) => {
                    while !runtime.cell_is_zero() {
                        self.interpret_block(runtime, body)?;
                    }
                }
            }
        }
        Ok(())
    }
}
