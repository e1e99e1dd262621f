use crate::error::BzsError;
use crate::pitch::NoteSymbol;

/// Token types for Buzzer Script
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Identifier(String),
    Number(f64),
    /// Raw note symbol text (`R`, `C`, `C#4`, `Db3`)
    Note(String),
    AtTrack, // @track
    Equal,   // =
    BarLine, // | or ||, ...
    NewLine,
}

/// A token with its position in the source
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedToken {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

/// Tokenize a script.
///
/// Whitespace and comments are dropped; newlines are kept because the
/// grammar is line oriented.
pub fn tokenize(input: &str) -> Result<Vec<LocatedToken>, BzsError> {
    Lexer::new(input).tokenize()
}

/// Lexer for tokenizing BZS source
pub struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
            position: 0,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.position += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn advance_by(&mut self, bytes: usize) {
        let end = self.position + bytes;
        while self.position < end && self.advance().is_some() {}
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn identifier_len(text: &str) -> usize {
        let mut len = 0;
        for (i, c) in text.char_indices() {
            let ok = if i == 0 {
                c.is_ascii_alphabetic() || c == '_'
            } else {
                c.is_ascii_alphanumeric() || c == '_' || c == '-'
            };
            if !ok {
                break;
            }
            len = i + c.len_utf8();
        }
        len
    }

    fn number_len(text: &str) -> usize {
        let bytes = text.as_bytes();
        let mut len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
        if bytes.get(len) == Some(&b'.') {
            let fraction = bytes[len + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
            if fraction > 0 {
                len += 1 + fraction;
            }
        }
        len
    }

    /// A note symbol or an identifier, whichever match is longer.
    /// Ties go to the note symbol.
    fn word(&mut self) -> Token {
        let rest = self.remaining();
        let ident_len = Self::identifier_len(rest);
        let note_len = NoteSymbol::scan(rest).map_or(0, |(_, len)| len);

        let (token, len) = if note_len > 0 && note_len >= ident_len {
            (Token::Note(rest[..note_len].to_string()), note_len)
        } else {
            (Token::Identifier(rest[..ident_len].to_string()), ident_len)
        };
        self.advance_by(len);
        token
    }

    pub fn tokenize(&mut self) -> Result<Vec<LocatedToken>, BzsError> {
        let mut tokens = Vec::new();

        while let Some(&c) = self.peek() {
            let line = self.line;
            let column = self.column;

            let token = match c {
                ' ' | '\t' | '\r' => {
                    self.advance();
                    continue;
                }
                '#' => {
                    // Comment runs to end of line; the newline is still emitted
                    while let Some(&ch) = self.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                    continue;
                }
                '\n' => {
                    self.advance();
                    Token::NewLine
                }
                '=' => {
                    self.advance();
                    Token::Equal
                }
                '|' => {
                    while let Some(&'|') = self.peek() {
                        self.advance();
                    }
                    Token::BarLine
                }
                '@' => {
                    if !self.remaining().starts_with("@track") {
                        return Err(BzsError::lex(
                            line,
                            column,
                            "Unexpected '@'. Did you mean '@track'?",
                        ));
                    }
                    self.advance_by("@track".len());
                    Token::AtTrack
                }
                '0'..='9' => {
                    let len = Self::number_len(self.remaining());
                    let text = &self.remaining()[..len];
                    let value = text.parse::<f64>().map_err(|_| {
                        BzsError::lex(line, column, format!("Invalid number: '{}'", text))
                    })?;
                    if !value.is_finite() {
                        return Err(BzsError::lex(
                            line,
                            column,
                            format!("Number out of range: '{}'", text),
                        ));
                    }
                    self.advance_by(len);
                    Token::Number(value)
                }
                c if c.is_ascii_alphabetic() || c == '_' => self.word(),
                _ => {
                    return Err(BzsError::lex(
                        line,
                        column,
                        format!("Unexpected character: '{}'", c),
                    ));
                }
            };

            tokens.push(LocatedToken {
                token,
                line,
                column,
            });
        }

        Ok(tokens)
    }
}
