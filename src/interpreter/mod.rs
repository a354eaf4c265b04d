pub mod ast_interpreter;
pub mod bytecode_interpreter;

use std::io::{Read, Write};

use thiserror::Error;

/// Default tape length, in cells.
pub const DEFAULT_TAPE_SIZE: usize = 30_000;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("IO error")]
    Io(#[from] std::io::Error),
}

/// The machine a program runs against: a zero-initialized byte tape, a
/// cursor into it, and the two I/O ends.
///
/// Cell arithmetic wraps modulo 256. The cursor wraps modulo the tape
/// length, so moving left of cell 0 lands on the last cell and moving past
/// the last cell lands on cell 0.
pub struct Runtime<R, W> {
    /// Index of the current cell.
    cursor: usize,

    /// The statically sized tape.
    tape: Vec<u8>,

    input: R,
    output: W,
}

impl<R: Read, W: Write> Runtime<R, W> {
    pub fn new(tape_size: usize, input: R, output: W) -> Self {
        Self {
            cursor: 0,
            tape: vec![0; tape_size],
            input,
            output,
        }
    }

    /// Zero the tape and rewind the cursor, keeping the I/O ends.
    pub fn reset(&mut self) {
        self.tape.fill(0);
        self.cursor = 0;
    }

    pub fn move_pointer(&mut self, offset: isize) {
        let len = self.tape.len() as isize;
        self.cursor = (self.cursor as isize + offset).rem_euclid(len) as usize;
    }

    pub fn modify_cell(&mut self, delta: i64) {
        // Truncating the delta to u8 is exactly the net change modulo 256,
        // so a folded run matches its unit-stepped wraparound result.
        self.tape[self.cursor] = self.tape[self.cursor].wrapping_add(delta as u8);
    }

    /// Write the current cell to the output end.
    pub fn output(&mut self) -> Result<(), RuntimeError> {
        self.output
            .write_all(&self.tape[self.cursor..self.cursor + 1])?;
        Ok(())
    }

    /// Read one byte from the input end into the current cell. At end of
    /// input the cell is set to 0.
    pub fn input(&mut self) -> Result<(), RuntimeError> {
        let mut byte = [0u8];
        let read = self.input.read(&mut byte)?;
        self.tape[self.cursor] = if read == 0 { 0 } else { byte[0] };
        Ok(())
    }

    /// Loop guard: is the current cell zero?
    pub fn cell_is_zero(&self) -> bool {
        self.tape[self.cursor] == 0
    }

    pub fn cell(&self, index: usize) -> u8 {
        self.tape[index]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Give back the output end, consuming the runtime.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use pretty_assertions::assert_eq;

    use super::*;

    fn tape_only(size: usize) -> Runtime<io::Empty, io::Sink> {
        Runtime::new(size, io::empty(), io::sink())
    }

    #[test]
    fn cursor_wraps_left_of_cell_zero() {
        let mut runtime = tape_only(10);
        runtime.move_pointer(-1);
        assert_eq!(runtime.cursor(), 9);
        runtime.move_pointer(-10);
        assert_eq!(runtime.cursor(), 9);
    }

    #[test]
    fn cursor_wraps_past_the_last_cell() {
        let mut runtime = tape_only(10);
        runtime.move_pointer(12);
        assert_eq!(runtime.cursor(), 2);
    }

    #[test]
    fn cell_arithmetic_wraps_modulo_256() {
        let mut runtime = tape_only(1);
        runtime.modify_cell(-1);
        assert_eq!(runtime.cell(0), 255);
        runtime.modify_cell(1);
        assert_eq!(runtime.cell(0), 0);
    }

    #[test]
    fn folded_delta_equals_unit_steps() {
        let mut folded = tape_only(1);
        folded.modify_cell(300);

        let mut stepped = tape_only(1);
        for _ in 0..300 {
            stepped.modify_cell(1);
        }

        assert_eq!(folded.cell(0), stepped.cell(0));
        assert_eq!(folded.cell(0), 44);
    }

    #[test]
    fn input_reads_one_byte_into_the_current_cell() {
        let mut runtime = Runtime::new(4, &b"hi"[..], io::sink());
        runtime.input().unwrap();
        assert_eq!(runtime.cell(0), b'h');
        runtime.input().unwrap();
        assert_eq!(runtime.cell(0), b'i');
    }

    #[test]
    fn input_at_end_of_stream_writes_zero() {
        let mut runtime = Runtime::new(4, io::empty(), io::sink());
        runtime.modify_cell(7);
        runtime.input().unwrap();
        assert_eq!(runtime.cell(0), 0);
    }

    #[test]
    fn output_emits_the_current_cell() {
        let mut runtime = Runtime::new(4, io::empty(), Vec::new());
        runtime.modify_cell(65);
        runtime.output().unwrap();
        runtime.output().unwrap();
        assert_eq!(runtime.into_output(), b"AA");
    }
}
