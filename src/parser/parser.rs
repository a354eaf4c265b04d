use crate::lexer::lexer::Lexer;
use crate::lexer::TokenKind;

use super::{AstKind, BasicBlock, ParseError, Program};

/// Recursive-descent parser over the token stream.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Parser<'a> {
        Parser { lexer }
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut root = BasicBlock::default();

        while self.lexer.peek() != TokenKind::EndOfInput {
            root.instructions.push(self.parse_statement()?);
        }

        Ok(root)
    }

    fn parse_statement(&mut self) -> Result<AstKind, ParseError> {
        match self.lexer.peek() {
            TokenKind::MoveRight => Ok(AstKind::MovePointer(self.take_run(TokenKind::MoveRight))),
            TokenKind::MoveLeft => Ok(AstKind::MovePointer(-self.take_run(TokenKind::MoveLeft))),
            TokenKind::Increment => Ok(AstKind::ModifyCell(
                self.take_run(TokenKind::Increment) as i64
            )),
            TokenKind::Decrement => {
                Ok(AstKind::ModifyCell(-self.take_run(TokenKind::Decrement) as i64))
            }
            TokenKind::Output => {
                self.lexer.advance();
                Ok(AstKind::Output)
            }
            TokenKind::Input => {
                self.lexer.advance();
                Ok(AstKind::Input)
            }
            TokenKind::LoopStart => self.parse_loop(),
            TokenKind::LoopEnd => {
                let token = self.lexer.next_token();
                Err(ParseError::UnexpectedLoopEnd {
                    position: token.position,
                })
            }
            // Both callers stop at the terminal token before dispatching.
            TokenKind::EndOfInput => unreachable!("statement requested at end of input"),
        }
    }

    fn parse_loop(&mut self) -> Result<AstKind, ParseError> {
        // Consume the `[`, keeping its offset for the unclosed-loop error.
        let open = self.lexer.next_token();

        let mut body = BasicBlock::default();
        while self.lexer.peek() != TokenKind::LoopEnd && self.lexer.peek() != TokenKind::EndOfInput
        {
            body.instructions.push(self.parse_statement()?);
        }

        if self.lexer.peek() == TokenKind::LoopEnd {
            self.lexer.advance();
            Ok(AstKind::Loop(body))
        } else {
            Err(ParseError::UnclosedLoop {
                position: open.position,
            })
        }
    }

    /// Consume a maximal run of `kind` tokens, returning the run length.
    ///
    /// Runs never mix directions: a `<` does not continue a run of `>`s.
    fn take_run(&mut self, kind: TokenKind) -> isize {
        let mut count = 0;
        while self.lexer.peek() == kind {
            self.lexer.advance();
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::{parse, AstKind, BasicBlock, ParseError};

    fn block(instructions: Vec<AstKind>) -> BasicBlock {
        BasicBlock { instructions }
    }

    #[test]
    fn empty_source_parses_to_empty_program() {
        assert_eq!(parse(b"").unwrap(), BasicBlock::default());
    }

    #[test]
    fn comment_only_source_parses_to_empty_program() {
        assert_eq!(parse(b"foo! bar\n").unwrap(), BasicBlock::default());
    }

    #[test]
    fn folds_runs_of_moves() {
        assert_eq!(
            parse(b">>>").unwrap(),
            block(vec![AstKind::MovePointer(3)])
        );
        assert_eq!(
            parse(b"<<").unwrap(),
            block(vec![AstKind::MovePointer(-2)])
        );
    }

    #[test]
    fn mixed_directions_are_not_folded_together() {
        assert_eq!(
            parse(b">><").unwrap(),
            block(vec![AstKind::MovePointer(2), AstKind::MovePointer(-1)])
        );
    }

    #[test]
    fn folds_runs_of_cell_changes() {
        assert_eq!(
            parse(b"+++--").unwrap(),
            block(vec![AstKind::ModifyCell(3), AstKind::ModifyCell(-2)])
        );
    }

    #[test]
    fn folds_runs_across_comment_bytes() {
        assert_eq!(
            parse(b"+ add one and another +").unwrap(),
            block(vec![AstKind::ModifyCell(2)])
        );
    }

    #[test]
    fn parses_empty_loop() {
        assert_eq!(
            parse(b"[]").unwrap(),
            block(vec![AstKind::Loop(BasicBlock::default())])
        );
    }

    #[test]
    fn parses_nested_loops() {
        assert_eq!(
            parse(b"[[-]]").unwrap(),
            block(vec![AstKind::Loop(block(vec![AstKind::Loop(block(
                vec![AstKind::ModifyCell(-1)]
            ))]))])
        );
    }

    #[test]
    fn parses_statements_around_a_loop() {
        assert_eq!(
            parse(b".[,+]-").unwrap(),
            block(vec![
                AstKind::Output,
                AstKind::Loop(block(vec![AstKind::Input, AstKind::ModifyCell(1)])),
                AstKind::ModifyCell(-1),
            ])
        );
    }

    #[test]
    fn stray_close_bracket_is_an_error() {
        assert_eq!(
            parse(b"]"),
            Err(ParseError::UnexpectedLoopEnd { position: 0 })
        );
        assert_eq!(
            parse(b"+]"),
            Err(ParseError::UnexpectedLoopEnd { position: 1 })
        );
    }

    #[test]
    fn unclosed_loop_is_an_error() {
        assert_eq!(parse(b"["), Err(ParseError::UnclosedLoop { position: 0 }));
        assert_eq!(parse(b"[+"), Err(ParseError::UnclosedLoop { position: 0 }));
        assert_eq!(
            parse(b"+[>[<]"),
            Err(ParseError::UnclosedLoop { position: 1 })
        );
    }

    #[test]
    fn children_keep_source_order() {
        assert_eq!(
            parse(b"+>.<").unwrap(),
            block(vec![
                AstKind::ModifyCell(1),
                AstKind::MovePointer(1),
                AstKind::Output,
                AstKind::MovePointer(-1),
            ])
        );
    }

    #[test]
    fn display_renders_an_indented_tree() {
        let program = parse(b"++[>-.]").unwrap();
        assert_eq!(
            program.to_string(),
            "MODIFY_CELL(+2)\nLOOP\n  MOVE_PTR(+1)\n  MODIFY_CELL(-1)\n  OUTPUT\n"
        );
    }
}
