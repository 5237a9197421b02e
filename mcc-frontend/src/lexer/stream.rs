//! Pull-based token stream with bounded lookahead
//!
//! The parser never advances the lexer more than two tokens past the
//! current one: `peek1`/`peek2` lazily fill a small deque, `advance`
//! consumes the current token, and `push_back` returns a token to the
//! front of the queue.
//!
//! The stream also remembers the position of the *previous* token, so a
//! syntax diagnostic raised after an `advance` can point at the construct
//! the parser was in the middle of completing.

use super::{Lexer, Token};
use mcc_common::{CompilerError, SourceLocation};
use std::collections::VecDeque;

pub struct TokenStream {
    lexer: Lexer,
    current: Token,
    lookahead: VecDeque<Token>,
    previous_location: SourceLocation,
}

impl TokenStream {
    /// Create a stream positioned at the first token of the input
    pub fn new(mut lexer: Lexer) -> Result<Self, CompilerError> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            lookahead: VecDeque::new(),
            previous_location: SourceLocation::default(),
        })
    }

    /// The token the parser is currently looking at
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Consume the current token and return it; the next token becomes current
    pub fn advance(&mut self) -> Result<Token, CompilerError> {
        self.previous_location = self.current.location;

        let next = match self.lookahead.pop_front() {
            Some(tok) => tok,
            None => self.lexer.next_token()?,
        };

        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Look at the token after the current one without consuming anything
    pub fn peek1(&mut self) -> Result<&Token, CompilerError> {
        self.fill(1)?;
        Ok(&self.lookahead[0])
    }

    /// Look two tokens past the current one without consuming anything
    pub fn peek2(&mut self) -> Result<&Token, CompilerError> {
        self.fill(2)?;
        Ok(&self.lookahead[1])
    }

    /// Return a token to the stream; it will be produced by the next advance
    pub fn push_back(&mut self, token: Token) {
        self.lookahead.push_front(token);
    }

    /// Position of the most recently consumed token, for error reporting
    pub fn error_location(&self) -> SourceLocation {
        self.previous_location
    }

    fn fill(&mut self, n: usize) -> Result<(), CompilerError> {
        while self.lookahead.len() < n {
            let tok = self.lexer.next_token()?;
            self.lookahead.push_back(tok);
        }
        Ok(())
    }
}
