use std::io::{Read, Write};

use crate::bytecode::ByteCode;

use super::{Runtime, RuntimeError};

/// Program-counter loop over a resolved bytecode stream.
///
/// Jump targets must already be patched by `resolve_jumps`; a taken jump
/// lands on the partner bracket and the shared increment steps past it.
pub struct ByteCodeInterpreter {}

impl ByteCodeInterpreter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn run<R: Read, W: Write>(
        &mut self,
        runtime: &mut Runtime<R, W>,
        instructions: &[ByteCode],
    ) -> Result<(), RuntimeError> {
        let mut pc = 0;
        while pc < instructions.len() {
            match instructions[pc] {
                ByteCode::MovePointer(offset) => runtime.move_pointer(offset),
                ByteCode::ModifyCell(delta) => runtime.modify_cell(delta),
                ByteCode::Output => runtime.output()?,
                ByteCode::Input => runtime.input()?,
                ByteCode::JumpIfZero(target) => {
                    if runtime.cell_is_zero() {
                        pc = target;
                    }
                }
                ByteCode::JumpIfNonZero(target) => {
                    if !runtime.cell_is_zero() {
                        pc = target;
                    }
                }
            }
            pc += 1;
        }
        Ok(())
    }
}
