//! Token stream to syntax tree.
//!
//! A single recursive-descent pass, total for every token sequence:
//! unterminated groups close implicitly at end of input, and a closing
//! brace outside any open group is absorbed as literal text instead of
//! being rejected.

use crate::ast::Node;
use crate::common::Span;
use crate::lexer::Token;

/// Parse a token sequence into a tree rooted at a [`Node::Document`].
pub fn parse_tokens(tokens: &[Token]) -> Node {
    Parser::new(tokens).parse_document()
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    /// Running byte offset, advanced by the lexeme length of each consumed
    /// token. Spans derived from it are exact because lexeme concatenation
    /// reproduces the source.
    offset: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            offset: 0,
        }
    }

    fn parse_document(mut self) -> Node {
        let children = self.parse_nodes(false);
        Node::Document {
            children,
            span: Span::new(0, self.offset),
        }
    }

    /// Parse siblings until end of input or, when `in_group` is set, until
    /// the closing brace of the enclosing group (left for the caller to
    /// consume).
    fn parse_nodes(&mut self, in_group: bool) -> Vec<Node> {
        let mut nodes = Vec::new();
        while let Some(token) = self.peek() {
            match token {
                Token::RightBrace if in_group => break,
                Token::RightBrace => {
                    // Unmatched close: absorbed as literal text.
                    let start = self.offset;
                    self.bump();
                    nodes.push(Node::Text {
                        content: "}".into(),
                        span: Span::new(start, self.offset),
                    });
                }
                Token::LeftBrace => nodes.push(self.parse_group()),
                Token::Command(name) => {
                    let name = name.clone();
                    nodes.push(self.parse_command(name));
                }
                Token::Text(content) => {
                    let content = content.clone();
                    let start = self.offset;
                    self.bump();
                    nodes.push(Node::Text {
                        content,
                        span: Span::new(start, self.offset),
                    });
                }
            }
        }
        nodes
    }

    fn parse_group(&mut self) -> Node {
        let start = self.offset;
        self.bump();
        let children = self.parse_nodes(true);
        // Either the matching close brace or, for an unterminated group,
        // end of input; the group closes implicitly in both cases.
        if matches!(self.peek(), Some(Token::RightBrace)) {
            self.bump();
        }
        Node::Group {
            children,
            span: Span::new(start, self.offset),
        }
    }

    fn parse_command(&mut self, name: cowstr::CowStr) -> Node {
        let start = self.offset;
        self.bump();
        // Arguments are only ever immediately following brace groups; any
        // other token ends collection and is parsed as a sibling.
        let mut args = Vec::new();
        while matches!(self.peek(), Some(Token::LeftBrace)) {
            args.push(self.parse_group());
        }
        Node::Command {
            name,
            args,
            span: Span::new(start, self.offset),
        }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.offset += token.byte_len();
            self.pos += 1;
        }
    }
}
