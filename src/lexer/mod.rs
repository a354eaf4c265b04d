pub mod lexer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // `>`: Move the `data pointer` one cell to the right
    MoveRight,
    // `<`: Move the `data pointer` one cell to the left
    MoveLeft,

    // `+`: Increment the byte at the `data pointer` by one
    Increment,
    // `-`: Decrement the byte at the `data pointer` by one
    Decrement,

    // `.`: Write the byte at the `data pointer` to the `output device`
    Output,
    // `,`: Read the next byte from the `input device` and store it at the `data pointer`
    Input,

    // `[`: If the byte at the `data pointer` is zero, jump the `instruction pointer`
    // forward to the instruction after the matching `]`
    LoopStart,
    // `]`: If the byte at the `data pointer` is non-zero, jump the `instruction pointer`
    // back to the instruction after the matching `[`
    LoopEnd,

    // End of source: no more commands left
    EndOfInput,
}

/// A command together with its byte offset in the raw source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}
