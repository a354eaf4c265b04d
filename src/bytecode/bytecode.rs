use crate::lexer::lexer::Lexer;
use crate::lexer::TokenKind;
use crate::parser::{AstKind, BasicBlock, Program};

use super::{BracketError, ByteCode};

/// Flatten a parsed program into a bytecode stream.
///
/// Loop bodies are bracketed by jump placeholders; run `resolve_jumps` on
/// the result before executing it.
pub fn to_bytecode(program: &Program) -> Vec<ByteCode> {
    let mut instructions = vec![];
    bytecode_write_block(&mut instructions, program);
    instructions
}

fn bytecode_write_block(instructions: &mut Vec<ByteCode>, block: &BasicBlock) {
    for instruction in block.instructions.iter() {
        match instruction {
            AstKind::MovePointer(offset) => instructions.push(ByteCode::MovePointer(*offset)),
            AstKind::ModifyCell(delta) => instructions.push(ByteCode::ModifyCell(*delta)),
            AstKind::Output => instructions.push(ByteCode::Output),
            AstKind::Input => instructions.push(ByteCode::Input),
            AstKind::Loop(body) => {
                instructions.push(ByteCode::JumpIfZero(0));
                bytecode_write_block(instructions, body);
                instructions.push(ByteCode::JumpIfNonZero(0));
            }
        }
    }
}

/// Lower a raw token stream directly, without building an AST.
///
/// One instruction per command token, no run-length folding. This is the
/// entry path for source that never goes through the parser, so bracket
/// errors surface from `resolve_jumps` instead of the parser.
pub fn from_tokens(lexer: Lexer) -> Vec<ByteCode> {
    lexer
        .map(|token| match token.kind {
            TokenKind::MoveRight => ByteCode::MovePointer(1),
            TokenKind::MoveLeft => ByteCode::MovePointer(-1),
            TokenKind::Increment => ByteCode::ModifyCell(1),
            TokenKind::Decrement => ByteCode::ModifyCell(-1),
            TokenKind::Output => ByteCode::Output,
            TokenKind::Input => ByteCode::Input,
            TokenKind::LoopStart => ByteCode::JumpIfZero(0),
            TokenKind::LoopEnd => ByteCode::JumpIfNonZero(0),
            TokenKind::EndOfInput => unreachable!("the iterator stops before the terminal token"),
        })
        .collect()
}

/// Patch every jump pair with its partner's index in one linear pass.
///
/// Openers push their index onto a stack; a closer pops and records the
/// pair in both directions. Closers that find the stack empty and openers
/// still on the stack after the scan are unmatched; their combined count is
/// reported as one diagnostic and the stream must not be executed.
pub fn resolve_jumps(instructions: &mut [ByteCode]) -> Result<(), BracketError> {
    let mut stack = vec![];
    let mut unmatched_close = 0;

    for index in 0..instructions.len() {
        match instructions[index] {
            ByteCode::JumpIfZero(_) => stack.push(index),
            ByteCode::JumpIfNonZero(_) => match stack.pop() {
                Some(open) => {
                    instructions[open] = ByteCode::JumpIfZero(index);
                    instructions[index] = ByteCode::JumpIfNonZero(open);
                }
                None => unmatched_close += 1,
            },
            _ => {}
        }
    }

    let count = stack.len() + unmatched_close;
    if count > 0 {
        return Err(BracketError::Unmatched { count });
    }

    Ok(())
}
