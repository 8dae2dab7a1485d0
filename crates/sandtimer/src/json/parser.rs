//! Byte-level JSON parser.

use super::value::{Array, Object, Value};

/// Nesting limit for arrays and objects.
pub const MAX_DEPTH: usize = 128;

/// Reasons a document was rejected. Offsets are byte positions in the input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected end of input at byte {offset}")]
    UnexpectedEnd { offset: usize },

    #[error("Unterminated string literal starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("Invalid escape sequence at byte {offset}")]
    InvalidEscape { offset: usize },

    #[error("Invalid character in Unicode escape at byte {offset}")]
    InvalidUnicodeEscape { offset: usize },

    #[error("Invalid Unicode surrogate pair at byte {offset}")]
    InvalidSurrogate { offset: usize },

    #[error("Invalid number format at byte {offset}")]
    InvalidNumber { offset: usize },

    #[error("Number out of range at byte {offset}")]
    NumberOutOfRange { offset: usize },

    #[error("Expected '{expected}' at byte {offset}")]
    ExpectedToken { expected: char, offset: usize },

    #[error("Unexpected character '{found}' at byte {offset}")]
    UnexpectedCharacter { found: char, offset: usize },

    #[error("Unescaped control character in string at byte {offset}")]
    ControlCharacter { offset: usize },

    #[error("Invalid UTF-8 in string at byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("Nesting too deep at byte {offset}")]
    DepthLimitExceeded { offset: usize },

    #[error("Unexpected trailing data at byte {offset}")]
    TrailingData { offset: usize },
}

impl ParseError {
    /// Byte offset the error was detected at.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedEnd { offset }
            | ParseError::UnterminatedString { offset }
            | ParseError::InvalidEscape { offset }
            | ParseError::InvalidUnicodeEscape { offset }
            | ParseError::InvalidSurrogate { offset }
            | ParseError::InvalidNumber { offset }
            | ParseError::NumberOutOfRange { offset }
            | ParseError::ExpectedToken { offset, .. }
            | ParseError::UnexpectedCharacter { offset, .. }
            | ParseError::ControlCharacter { offset }
            | ParseError::InvalidUtf8 { offset }
            | ParseError::DepthLimitExceeded { offset }
            | ParseError::TrailingData { offset } => *offset,
        }
    }
}

/// Parse exactly one JSON document from `input`.
///
/// Whitespace may surround the value; anything else after it is an error.
pub fn parse(input: &[u8]) -> Result<Value, ParseError> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();
    let value = parser.parse_value(0)?;
    parser.skip_whitespace();
    if parser.pos != input.len() {
        return Err(ParseError::TrailingData { offset: parser.pos });
    }
    Ok(value)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Result<u8, ParseError> {
        let byte = self
            .peek()
            .ok_or(ParseError::UnexpectedEnd { offset: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    fn consume(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: u8) -> Result<(), ParseError> {
        match self.peek() {
            Some(byte) if byte == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(ParseError::ExpectedToken {
                expected: expected as char,
                offset: self.pos,
            }),
            None => Err(ParseError::UnexpectedEnd { offset: self.pos }),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek() {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, ParseError> {
        match self.peek() {
            None => Err(ParseError::UnexpectedEnd { offset: self.pos }),
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(b't') => self.parse_literal("true", Value::Bool(true)),
            Some(b'f') => self.parse_literal("false", Value::Bool(false)),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b'{') => self.parse_object(depth + 1),
            Some(b'[') => self.parse_array(depth + 1),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.unexpected_character()),
        }
    }

    fn parse_literal(&mut self, literal: &str, value: Value) -> Result<Value, ParseError> {
        for expected in literal.bytes() {
            match self.peek() {
                None => return Err(ParseError::UnexpectedEnd { offset: self.pos }),
                Some(byte) if byte == expected => self.pos += 1,
                Some(_) => return Err(self.unexpected_character()),
            }
        }
        Ok(value)
    }

    fn unexpected_character(&self) -> ParseError {
        // Decode the full character so multi-byte input is reported legibly.
        let rest = &self.input[self.pos..];
        let end = rest.len().min(4);
        let found = (1..=end)
            .find_map(|len| std::str::from_utf8(&rest[..len]).ok())
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        ParseError::UnexpectedCharacter {
            found,
            offset: self.pos,
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.expect(b'"')?;
        let mut buf: Vec<u8> = Vec::new();

        loop {
            let Some(byte) = self.peek() else {
                return Err(ParseError::UnterminatedString { offset: start });
            };
            match byte {
                b'"' => {
                    self.pos += 1;
                    break;
                }
                b'\\' => {
                    self.pos += 1;
                    self.parse_escape(&mut buf, start)?;
                }
                0x00..=0x1F => return Err(ParseError::ControlCharacter { offset: self.pos }),
                _ => {
                    buf.push(byte);
                    self.pos += 1;
                }
            }
        }

        String::from_utf8(buf).map_err(|e| ParseError::InvalidUtf8 {
            offset: start + 1 + e.utf8_error().valid_up_to(),
        })
    }

    fn parse_escape(&mut self, buf: &mut Vec<u8>, string_start: usize) -> Result<(), ParseError> {
        let offset = self.pos - 1;
        let Some(escape) = self.peek() else {
            return Err(ParseError::UnterminatedString {
                offset: string_start,
            });
        };
        self.pos += 1;

        let simple = match escape {
            b'"' => b'"',
            b'\\' => b'\\',
            b'/' => b'/',
            b'b' => 0x08,
            b'f' => 0x0C,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'u' => {
                let ch = self.parse_unicode_escape(offset)?;
                let mut utf8 = [0u8; 4];
                buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                return Ok(());
            }
            _ => return Err(ParseError::InvalidEscape { offset }),
        };
        buf.push(simple);
        Ok(())
    }

    /// Called with `pos` just past `\u`; combines surrogate pairs.
    fn parse_unicode_escape(&mut self, offset: usize) -> Result<char, ParseError> {
        let first = self.parse_hex4()?;
        let code_point = match first {
            0xD800..=0xDBFF => {
                if !(self.consume(b'\\') && self.consume(b'u')) {
                    return Err(ParseError::InvalidSurrogate { offset });
                }
                let low = self.parse_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(ParseError::InvalidSurrogate { offset });
                }
                0x10000 + ((first - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(ParseError::InvalidSurrogate { offset }),
            _ => first,
        };
        char::from_u32(code_point).ok_or(ParseError::InvalidSurrogate { offset })
    }

    fn parse_hex4(&mut self) -> Result<u32, ParseError> {
        let mut value = 0u32;
        for _ in 0..4 {
            let offset = self.pos;
            let byte = self.next_byte()?;
            let digit = (byte as char)
                .to_digit(16)
                .ok_or(ParseError::InvalidUnicodeEscape { offset })?;
            value = (value << 4) | digit;
        }
        Ok(value)
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        self.consume(b'-');

        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if matches!(self.peek(), Some(b'0'..=b'9')) {
                    return Err(ParseError::InvalidNumber { offset: start });
                }
            }
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(ParseError::InvalidNumber { offset: start }),
        }

        if self.consume(b'.') {
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(ParseError::InvalidNumber { offset: start });
            }
            self.skip_digits();
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(ParseError::InvalidNumber { offset: start });
            }
            self.skip_digits();
        }

        // The slice is pure ASCII by construction.
        let text = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| ParseError::InvalidNumber { offset: start })?;
        let number: f64 = text
            .parse()
            .map_err(|_| ParseError::InvalidNumber { offset: start })?;
        if !number.is_finite() {
            return Err(ParseError::NumberOutOfRange { offset: start });
        }
        Ok(Value::Number(number))
    }

    fn skip_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value, ParseError> {
        if depth > MAX_DEPTH {
            return Err(ParseError::DepthLimitExceeded { offset: self.pos });
        }
        self.expect(b'[')?;
        let mut items = Array::new();

        self.skip_whitespace();
        if self.consume(b']') {
            return Ok(Value::Array(items));
        }

        loop {
            self.skip_whitespace();
            items.push(self.parse_value(depth)?);
            self.skip_whitespace();
            if self.consume(b']') {
                break;
            }
            self.expect(b',')?;
        }
        Ok(Value::Array(items))
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value, ParseError> {
        if depth > MAX_DEPTH {
            return Err(ParseError::DepthLimitExceeded { offset: self.pos });
        }
        self.expect(b'{')?;
        let mut members = Object::new();

        self.skip_whitespace();
        if self.consume(b'}') {
            return Ok(Value::Object(members));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return match self.peek() {
                    None => Err(ParseError::UnexpectedEnd { offset: self.pos }),
                    Some(_) => Err(ParseError::ExpectedToken {
                        expected: '"',
                        offset: self.pos,
                    }),
                };
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            self.expect(b':')?;
            self.skip_whitespace();
            let value = self.parse_value(depth)?;
            // First occurrence of a duplicate key wins.
            members.entry(key).or_insert(value);
            self.skip_whitespace();
            if self.consume(b'}') {
                break;
            }
            self.expect(b',')?;
        }
        Ok(Value::Object(members))
    }
}

impl std::str::FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s.as_bytes())
    }
}
