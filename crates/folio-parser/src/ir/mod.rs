//! The backend-agnostic document IR.
//!
//! Pure data: any combination of fields is constructible, and invariants
//! such as "section levels are small positive integers" are enforced by
//! elaboration, not here. The plain-text projections are for debugging and
//! tests, not production rendering.

pub mod visitor;

use cowstr::CowStr;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextStyle {
    #[default]
    Plain,
    Emphasis,
    Bold,
    Italic,
    Typewriter,
}

/// Inline-level content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    Text {
        content: CowStr,
        style: TextStyle,
    },
    /// A command the elaborator did not recognize, preserved for backends.
    Command {
        name: CowStr,
        args: Vec<Inline>,
    },
    /// Raw math markup, inline or display.
    Math {
        content: CowStr,
        display: bool,
    },
    Space,
    LineBreak,
}

impl Inline {
    pub fn text(content: impl Into<CowStr>) -> Self {
        Inline::Text {
            content: content.into(),
            style: TextStyle::Plain,
        }
    }

    pub fn styled(content: impl Into<CowStr>, style: TextStyle) -> Self {
        Inline::Text {
            content: content.into(),
            style,
        }
    }

    pub fn to_plain_text(&self) -> String {
        match self {
            Inline::Text { content, .. } => content.to_string(),
            Inline::Command { args, .. } => {
                args.iter().map(Inline::to_plain_text).collect()
            }
            Inline::Math { content, .. } => content.to_string(),
            Inline::Space => " ".to_string(),
            Inline::LineBreak => "\n".to_string(),
        }
    }
}

/// Block-level content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Section {
        level: u8,
        title: Vec<Inline>,
        label: Option<CowStr>,
    },
    /// A named environment with no dedicated representation.
    Environment {
        name: CowStr,
        args: Vec<CowStr>,
        content: Vec<Block>,
    },
    List {
        ordered: bool,
        items: Vec<Vec<Block>>,
    },
    Quote(Vec<Block>),
    Verbatim(CowStr),
    /// Backend-specific content, passed through only by the matching
    /// backend.
    Raw {
        format: CowStr,
        content: CowStr,
    },
}

impl Block {
    pub fn to_plain_text(&self) -> String {
        match self {
            Block::Paragraph(inlines) => inlines_to_text(inlines) + "\n",
            Block::Section { title, .. } => inlines_to_text(title) + "\n",
            Block::Environment { content, .. } | Block::Quote(content) => {
                blocks_to_text(content)
            }
            Block::List { items, .. } => items
                .iter()
                .map(|item| format!("- {}", blocks_to_text(item)))
                .collect(),
            Block::Verbatim(text) => text.to_string() + "\n",
            Block::Raw { .. } => String::new(),
        }
    }
}

fn inlines_to_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::to_plain_text).collect()
}

fn blocks_to_text(blocks: &[Block]) -> String {
    blocks.iter().map(|b| b.to_plain_text()).collect()
}

#[cfg(test)]
mod tests {
    use super::{Block, Inline, TextStyle};

    #[test]
    fn paragraph_projection_preserves_text() {
        let block = Block::Paragraph(vec![
            Inline::text("Hello, "),
            Inline::styled("world", TextStyle::Bold),
            Inline::text("!"),
        ]);
        assert_eq!(block.to_plain_text(), "Hello, world!\n");
    }

    #[test]
    fn command_projection_recurses_into_arguments() {
        let inline = Inline::Command {
            name: "foo".into(),
            args: vec![Inline::text("bar")],
        };
        assert_eq!(inline.to_plain_text(), "bar");
    }

    #[test]
    fn list_projection_marks_items() {
        let block = Block::List {
            ordered: false,
            items: vec![
                vec![Block::Paragraph(vec![Inline::text("one")])],
                vec![Block::Paragraph(vec![Inline::text("two")])],
            ],
        };
        assert_eq!(block.to_plain_text(), "- one\n- two\n");
    }

    #[test]
    fn raw_blocks_do_not_leak_into_plain_text() {
        let block = Block::Raw {
            format: "html".into(),
            content: "<hr>".into(),
        };
        assert_eq!(block.to_plain_text(), "");
    }
}
