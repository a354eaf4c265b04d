use super::{Token, TokenKind};

/// Single-token-lookahead cursor over raw source bytes.
///
/// Every byte that is not one of the eight commands is a comment and gets
/// skipped during the scan. Running past the end of the buffer yields
/// `EndOfInput`, and every later `peek` keeps yielding it.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a [u8],

    /// Next byte offset the scan will look at.
    position: usize,

    /// Cached lookahead token, cleared when the token is consumed.
    current: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8]) -> Lexer<'a> {
        Lexer {
            source,
            position: 0,
            current: None,
        }
    }

    fn command_kind(byte: u8) -> Option<TokenKind> {
        match byte {
            b'>' => Some(TokenKind::MoveRight),
            b'<' => Some(TokenKind::MoveLeft),
            b'+' => Some(TokenKind::Increment),
            b'-' => Some(TokenKind::Decrement),
            b'.' => Some(TokenKind::Output),
            b',' => Some(TokenKind::Input),
            b'[' => Some(TokenKind::LoopStart),
            b']' => Some(TokenKind::LoopEnd),
            _ => None,
        }
    }

    /// Scan forward to the next command byte and cache it as a token.
    fn fill(&mut self) -> Token {
        if let Some(token) = self.current {
            return token;
        }

        while self.position < self.source.len() {
            if let Some(kind) = Self::command_kind(self.source[self.position]) {
                let token = Token {
                    kind,
                    position: self.position,
                };
                self.current = Some(token);
                return token;
            }
            self.position += 1;
        }

        let token = Token {
            kind: TokenKind::EndOfInput,
            position: self.position,
        };
        self.current = Some(token);
        token
    }

    /// Kind of the next not-yet-consumed token, without consuming it.
    pub fn peek(&mut self) -> TokenKind {
        self.fill().kind
    }

    /// Consume and return the next token.
    ///
    /// At `EndOfInput` the terminal token is returned again; consuming past
    /// the end of the source is a no-op.
    pub fn next_token(&mut self) -> Token {
        let token = self.fill();
        if token.kind != TokenKind::EndOfInput {
            self.current = None;
            self.position = token.position + 1;
        }
        token
    }

    /// Consume the next token, discarding it.
    pub fn advance(&mut self) {
        self.next_token();
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token {
                kind: TokenKind::EndOfInput,
                ..
            } => None,
            token => Some(token),
        }
    }
}
