use logos::Logos;

use crate::{
    error::{Error, ParseError},
    interpreter::lexer::{LexerExtras, Position, Token},
};

/// How many tokens the parser can see at once. The grammar is LL(1) plus a
/// single extra token to tell `IDENT =` and `IDENT (` apart, so two slots
/// suffice.
pub const LOOK_AHEAD_COUNT: usize = 2;

/// A token paired with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    /// The token itself.
    pub token: Token,
    /// Position of the token's first character.
    pub pos:   Position,
}

/// A fixed-capacity ring of look-ahead slots.
///
/// `add` overwrites the oldest slot and `get(k)` reads the `k`-th upcoming
/// entry, so a stream that always refills after consuming keeps a sliding
/// window of the next `capacity` items.
#[derive(Debug)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
    pos:   usize,
}

impl<T: Default> RingBuffer<T> {
    /// Creates a ring with `capacity` default-initialized slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, T::default);
        Self { slots, pos: 0 }
    }

    /// Number of slots in the ring.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Overwrites the oldest slot with `value`.
    pub fn add(&mut self, value: T) {
        self.slots[self.pos] = value;
        self.pos = (self.pos + 1) % self.slots.len();
    }

    /// Reads the `k`-th upcoming entry, `k = 0` being the oldest.
    #[must_use]
    pub fn get(&self, k: usize) -> &T {
        &self.slots[(self.pos + k) % self.slots.len()]
    }
}

/// A lazy token source over the lexer.
///
/// The stream pulls tokens on demand and keeps the next
/// [`LOOK_AHEAD_COUNT`] of them in a ring buffer; `None` in a slot is the
/// end-of-input sentinel. Lexer failures surface as positioned syntax
/// errors the moment the offending token would enter the buffer.
pub struct TokenStream<'src> {
    lexer:  logos::Lexer<'src, Token>,
    buffer: RingBuffer<Option<SpannedToken>>,
    end:    Position,
}

impl<'src> TokenStream<'src> {
    /// Creates a stream over `source` and primes the look-ahead buffer.
    ///
    /// # Errors
    /// Returns a syntax error if one of the first tokens is malformed.
    pub fn new(source: &'src str) -> Result<Self, Error> {
        let mut stream = Self { lexer:  Token::lexer_with_extras(source, LexerExtras::default()),
                                buffer: RingBuffer::new(LOOK_AHEAD_COUNT),
                                end:    Position { line: 1, column: 1 }, };
        for _ in 0..LOOK_AHEAD_COUNT {
            stream.fetch()?;
        }
        Ok(stream)
    }

    /// The token the parser is currently looking at, or `None` at the end
    /// of input.
    #[must_use]
    pub fn current(&self) -> Option<&SpannedToken> {
        self.buffer.get(0).as_ref()
    }

    /// The `k`-th token after the current one.
    #[must_use]
    pub fn lookahead(&self, k: usize) -> Option<&SpannedToken> {
        self.buffer.get(k).as_ref()
    }

    /// Consumes the current token, refilling the buffer from the lexer.
    ///
    /// # Errors
    /// Returns a syntax error if the newly fetched token is malformed.
    pub fn advance(&mut self) -> Result<Option<SpannedToken>, Error> {
        let current = self.buffer.get(0).clone();
        self.fetch()?;
        Ok(current)
    }

    /// Position of the current token, or of the end of input once the
    /// stream is exhausted.
    #[must_use]
    pub fn position(&self) -> Position {
        self.current().map_or(self.end, |token| token.pos)
    }

    fn fetch(&mut self) -> Result<(), Error> {
        match self.lexer.next() {
            Some(Ok(Token::BadLiteral)) => {
                Err(ParseError::MalformedLiteral { lexeme: self.lexer.slice().to_string(),
                                                   pos:    self.token_position(), }.into())
            },
            Some(Ok(token)) => {
                let pos = self.token_position();
                self.end = Position { line:   pos.line,
                                      column: pos.column + self.lexer.slice().len(), };
                self.buffer.add(Some(SpannedToken { token, pos }));
                Ok(())
            },
            Some(Err(())) => {
                let lexeme = self.lexer.slice().to_string();
                let pos = self.token_position();
                if lexeme.starts_with(|c: char| c.is_ascii_digit()) {
                    Err(ParseError::MalformedLiteral { lexeme, pos }.into())
                } else {
                    Err(ParseError::UnexpectedCharacter { lexeme, pos }.into())
                }
            },
            None => {
                self.buffer.add(None);
                Ok(())
            },
        }
    }

    fn token_position(&self) -> Position {
        let span = self.lexer.span();
        Position { line:   self.lexer.extras.line,
                   column: span.start - self.lexer.extras.line_start + 1, }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_slides_over_added_values() {
        let mut ring: RingBuffer<Option<u32>> = RingBuffer::new(2);
        assert_eq!(ring.capacity(), 2);

        ring.add(Some(1));
        ring.add(Some(2));
        assert_eq!(ring.get(0), &Some(1));
        assert_eq!(ring.get(1), &Some(2));

        ring.add(Some(3));
        assert_eq!(ring.get(0), &Some(2));
        assert_eq!(ring.get(1), &Some(3));
    }

    #[test]
    fn stream_provides_one_token_of_lookahead() {
        let mut stream = TokenStream::new("int x = 1;").unwrap();
        assert_eq!(stream.current().unwrap().token, Token::Int);
        assert_eq!(stream.lookahead(1).unwrap().token,
                   Token::Identifier("x".to_string()));

        let consumed = stream.advance().unwrap().unwrap();
        assert_eq!(consumed.token, Token::Int);
        assert_eq!(stream.current().unwrap().token,
                   Token::Identifier("x".to_string()));
        assert_eq!(stream.lookahead(1).unwrap().token, Token::Assign);
    }

    #[test]
    fn stream_reports_positions() {
        let stream = TokenStream::new("int\n  x").unwrap();
        let current = stream.current().unwrap();
        assert_eq!(current.pos, Position { line: 1, column: 1 });
        let next = stream.lookahead(1).unwrap();
        assert_eq!(next.pos, Position { line: 2, column: 3 });
    }

    #[test]
    fn stream_ends_with_the_sentinel() {
        let mut stream = TokenStream::new("x").unwrap();
        assert!(stream.current().is_some());
        stream.advance().unwrap();
        assert!(stream.current().is_none());
        assert!(stream.advance().unwrap().is_none());
    }

    #[test]
    fn malformed_literal_is_reported_at_its_position() {
        assert!(TokenStream::new("1.5a").is_err());
        assert!(TokenStream::new("@").is_err());
    }
}
