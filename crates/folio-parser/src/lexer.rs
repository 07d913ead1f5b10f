//! Lexical scanning of markup source into [`Token`]s.
//!
//! The scanner is total: every input, including the empty string, lone
//! control characters, and unbalanced braces, yields a token stream, and
//! concatenating the lexemes of that stream reproduces the input exactly.
//! No character is ever discarded and no error is ever raised.

use cowstr::CowStr;
use serde::{Deserialize, Serialize};
use std::iter::Peekable;
use std::str::Chars;

/// A minimal lexical unit of the markup language.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Token {
    /// A control word: a backslash followed by a maximal run of alphabetic
    /// characters. The name excludes the backslash.
    Command(CowStr),
    /// A run of ordinary characters, or a lone backslash that did not start
    /// a control word.
    Text(CowStr),
    LeftBrace,
    RightBrace,
}

impl Token {
    /// The exact source text this token was scanned from.
    pub fn lexeme(&self) -> String {
        match self {
            Token::Command(name) => format!("\\{name}"),
            Token::Text(content) => content.to_string(),
            Token::LeftBrace => "{".to_string(),
            Token::RightBrace => "}".to_string(),
        }
    }

    /// Byte length of the lexeme. The parser uses this to assign spans
    /// without carrying positions in the tokens themselves.
    pub fn byte_len(&self) -> usize {
        match self {
            Token::Command(name) => 1 + name.len(),
            Token::Text(content) => content.len(),
            Token::LeftBrace | Token::RightBrace => 1,
        }
    }
}

/// Scan a source string into tokens. Total for all inputs.
pub fn scan(source: &str) -> Vec<Token> {
    Scanner::new(source).scan_tokens()
}

struct Scanner<'src> {
    chars: Peekable<Chars<'src>>,
    tokens: Vec<Token>,
    text: String,
}

impl<'src> Scanner<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            chars: source.chars().peekable(),
            tokens: Vec::new(),
            text: String::new(),
        }
    }

    fn scan_tokens(mut self) -> Vec<Token> {
        while let Some(c) = self.chars.next() {
            match c {
                '\\' => match self.chars.peek() {
                    Some(next) if next.is_alphabetic() => self.scan_command(),
                    // Control symbol fallback: the backslash stays in the
                    // stream as literal text rather than becoming an error.
                    _ => {
                        self.flush_text();
                        self.tokens.push(Token::Text("\\".into()));
                    }
                },
                '{' => {
                    self.flush_text();
                    self.tokens.push(Token::LeftBrace);
                }
                '}' => {
                    self.flush_text();
                    self.tokens.push(Token::RightBrace);
                }
                other => self.text.push(other),
            }
        }
        self.flush_text();
        self.tokens
    }

    fn scan_command(&mut self) {
        self.flush_text();
        let mut name = String::new();
        while let Some(&next) = self.chars.peek() {
            if !next.is_alphabetic() {
                break;
            }
            name.push(next);
            self.chars.next();
        }
        self.tokens.push(Token::Command(name.into()));
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let run = std::mem::take(&mut self.text);
            self.tokens.push(Token::Text(run.into()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{scan, Token};
    use Token::{LeftBrace, RightBrace};

    fn command(name: &str) -> Token {
        Token::Command(name.into())
    }

    fn text(content: &str) -> Token {
        Token::Text(content.into())
    }

    macro_rules! scan_tests {
        ($prefix:ident $($name:ident: $value:expr,)*) => {
        $(
            paste::item! {
                #[test]
                fn [<$prefix _ $name>]() {
                    let (input, expected): (&str, Vec<Token>) = $value;
                    let tokens = scan(input);
                    assert_eq!(tokens, expected);
                    let rebuilt: String = tokens.iter().map(Token::lexeme).collect();
                    assert_eq!(rebuilt, input, "lexeme concatenation must reproduce the source");
                }
            }
        )*
        }
    }

    scan_tests! {
        scan
        empty: ("", vec![]),
        plain_text: ("hello world", vec![text("hello world")]),
        command: ("\\emph", vec![command("emph")]),
        command_with_group: (
            "\\emph{x}",
            vec![command("emph"), LeftBrace, text("x"), RightBrace]
        ),
        command_stops_at_nonalpha: (
            "\\emph2",
            vec![command("emph"), text("2")]
        ),
        escaped_brace: ("\\{", vec![text("\\"), LeftBrace]),
        trailing_backslash: ("a\\", vec![text("a"), text("\\")]),
        backslash_digit: ("\\123", vec![text("\\"), text("123")]),
        stray_close: ("}", vec![RightBrace]),
        braces_only: ("{}{", vec![LeftBrace, RightBrace, LeftBrace]),
        accented_command: ("caf\\é", vec![text("caf"), command("é")]),
    }

    #[test]
    fn round_trip_holds_for_malformed_input() {
        let inputs = [
            "{{{", "}}}", "\\", "\\\\", "a{b\\c}d}e{", "\\section{", "%not a comment",
            "mixed \\emph{runs} and {groups} \\& symbols",
        ];
        for input in inputs {
            let rebuilt: String = scan(input).iter().map(Token::lexeme).collect();
            assert_eq!(rebuilt, input);
        }
    }

    #[test]
    fn text_runs_are_maximal() {
        // A run never contains a backslash or brace, and adjacent ordinary
        // characters always coalesce into a single token.
        let tokens = scan("one two three");
        assert_eq!(tokens.len(), 1);
    }
}
