pub mod parser;

pub use parser::parse_tokens;

use crate::common::Span;
use cowstr::CowStr;
use serde::{Deserialize, Serialize};

/// A node of the source-shaped syntax tree.
///
/// `Environment` and `Comment` are never produced by the shipped scanner
/// and parser; they exist for the elaborator and for hand-constructed
/// trees. Parser output is always rooted at exactly one `Document`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Command {
        name: CowStr,
        /// Brace-delimited argument groups immediately following the
        /// command name; each entry is a `Group`.
        args: Vec<Node>,
        span: Span,
    },
    Group {
        children: Vec<Node>,
        span: Span,
    },
    Text {
        content: CowStr,
        span: Span,
    },
    Comment {
        content: CowStr,
        span: Span,
    },
    Environment {
        name: CowStr,
        args: Vec<Node>,
        body: Vec<Node>,
        span: Span,
    },
    Document {
        children: Vec<Node>,
        span: Span,
    },
}

impl Node {
    /// Lowercase noun for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Command { .. } => "command",
            Node::Group { .. } => "group",
            Node::Text { .. } => "text",
            Node::Comment { .. } => "comment",
            Node::Environment { .. } => "environment",
            Node::Document { .. } => "document",
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Node::Command { span, .. }
            | Node::Group { span, .. }
            | Node::Text { span, .. }
            | Node::Comment { span, .. }
            | Node::Environment { span, .. }
            | Node::Document { span, .. } => span,
        }
    }

    /// Best-effort reconstruction of the source text under this node.
    /// Exact for parser output on balanced input; implicitly closed groups
    /// come back with their missing brace.
    pub fn source_text(&self) -> String {
        fn collect(node: &Node, out: &mut String) {
            match node {
                Node::Text { content, .. } | Node::Comment { content, .. } => {
                    out.push_str(content)
                }
                Node::Group { children, .. } => {
                    out.push('{');
                    children.iter().for_each(|c| collect(c, out));
                    out.push('}');
                }
                Node::Command { name, args, .. } => {
                    out.push('\\');
                    out.push_str(name);
                    args.iter().for_each(|a| collect(a, out));
                }
                Node::Environment { args, body, .. } => {
                    args.iter().for_each(|a| collect(a, out));
                    body.iter().for_each(|b| collect(b, out));
                }
                Node::Document { children, .. } => {
                    children.iter().for_each(|c| collect(c, out))
                }
            }
        }

        let mut out = String::new();
        collect(self, &mut out);
        out
    }
}
