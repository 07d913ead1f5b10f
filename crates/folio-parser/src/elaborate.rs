//! Semantic elaboration: AST to document IR.
//!
//! Two mutually recursive passes, block-level and inline-level, resolve
//! command and environment meaning. Elaboration is total: it never panics
//! and never returns an error; anomalies accumulate as advisory
//! diagnostics in source order, and every malformed shape degrades to
//! either a best-effort reinterpretation or no output for that node.

use crate::ast::Node;
use crate::document::{Document, Metadata};
use crate::ir::{Block, Inline, TextStyle};

/// Elaborate a parsed tree into a document plus diagnostics. A root that
/// is not a [`Node::Document`] yields a default empty document and a
/// single diagnostic, not a panic.
pub fn elaborate(root: &Node) -> (Document<Vec<Block>>, Vec<String>) {
    let mut elab = Elaborator::default();
    let content = match root {
        Node::Document { children, .. } => elab.elab_block(children),
        other => {
            elab.report_error(format!(
                "elaboration expects a document root, found {}",
                other.kind_name()
            ));
            Vec::new()
        }
    };
    (
        Document {
            meta: elab.meta,
            content,
            raw: Default::default(),
        },
        elab.errors,
    )
}

/// State threaded through the pass. Diagnostics are pushed in traversal
/// order, which is document order.
#[derive(Default)]
struct Elaborator {
    section_level: u8,
    meta: Metadata,
    errors: Vec<String>,
}

impl Elaborator {
    fn report_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn elab_inline(&mut self, node: &Node) -> Vec<Inline> {
        match node {
            Node::Text { content, .. } => vec![Inline::Text {
                content: content.clone(),
                style: TextStyle::Plain,
            }],
            Node::Command { name, args, .. } => {
                let kind: &str = name;
                if let Some(style) = style_for(kind) {
                    // Re-tag only the text leaves of the flattened argument
                    // list; nested inlines pass through unstyled.
                    restyle_text(self.elab_inline_all(args), style)
                } else if kind == "begin" || kind == "end" {
                    self.report_error(format!("\\{kind} without matching environment parser"));
                    Vec::new()
                } else {
                    vec![Inline::Command {
                        name: name.clone(),
                        args: self.elab_inline_all(args),
                    }]
                }
            }
            // Groups carry no semantics of their own.
            Node::Group { children, .. } => self.elab_inline_all(children),
            other => {
                self.report_error(format!(
                    "cannot elaborate {} node in inline position",
                    other.kind_name()
                ));
                Vec::new()
            }
        }
    }

    fn elab_inline_all(&mut self, nodes: &[Node]) -> Vec<Inline> {
        nodes.iter().flat_map(|n| self.elab_inline(n)).collect()
    }

    fn elab_block(&mut self, nodes: &[Node]) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut paragraph: Vec<Inline> = Vec::new();

        for node in nodes {
            match node {
                Node::Command { name, args, .. } => {
                    if let Some(level) = section_level_for(name) {
                        flush_paragraph(&mut blocks, &mut paragraph);
                        self.section_level = level;
                        blocks.push(Block::Section {
                            level: self.section_level,
                            title: self.elab_inline_all(args),
                            label: None,
                        });
                    } else if is_metadata_command(name) {
                        self.apply_metadata(name, args);
                    } else {
                        paragraph.extend(self.elab_inline(node));
                    }
                }
                // A bare group at block level behaves like inline content.
                Node::Text { .. } | Node::Group { .. } => {
                    paragraph.extend(self.elab_inline(node))
                }
                Node::Environment {
                    name, args, body, ..
                } => {
                    flush_paragraph(&mut blocks, &mut paragraph);
                    self.elab_environment(name, args, body, &mut blocks);
                }
                other => self.report_error(format!(
                    "cannot elaborate {} node in block position",
                    other.kind_name()
                )),
            }
        }

        flush_paragraph(&mut blocks, &mut paragraph);
        blocks
    }

    fn elab_environment(
        &mut self,
        name: &cowstr::CowStr,
        args: &[Node],
        body: &[Node],
        blocks: &mut Vec<Block>,
    ) {
        let kind: &str = name;
        match kind {
            "itemize" | "enumerate" => blocks.push(Block::List {
                ordered: kind == "enumerate",
                items: self.elab_items(body),
            }),
            "quote" => blocks.push(Block::Quote(self.elab_block(body))),
            "verbatim" => blocks.push(Block::Verbatim(
                body.iter()
                    .map(Node::source_text)
                    .collect::<String>()
                    .into(),
            )),
            "abstract" => {
                let inner = self.elab_block(body);
                self.meta.abstract_ = Some(inner);
            }
            _ => {
                let content = self.elab_block(body);
                blocks.push(Block::Environment {
                    name: name.clone(),
                    args: args.iter().map(|a| argument_text(a).into()).collect(),
                    content,
                });
            }
        }
    }

    /// Split an environment body on `\item` commands. Nodes preceding the
    /// first `\item` fold into the first item's chunk; a body with no
    /// `\item` at all produces no items.
    fn elab_items(&mut self, body: &[Node]) -> Vec<Vec<Block>> {
        let mut items = Vec::new();
        let mut chunk: Vec<Node> = Vec::new();
        let mut started = false;

        for node in body {
            if let Node::Command { name, .. } = node {
                let kind: &str = name;
                if kind == "item" {
                    if started {
                        items.push(self.elab_block(&chunk));
                        chunk.clear();
                    }
                    started = true;
                    continue;
                }
            }
            chunk.push(node.clone());
        }
        if started {
            items.push(self.elab_block(&chunk));
        }
        items
    }

    fn apply_metadata(&mut self, name: &str, args: &[Node]) {
        // With no brace argument the command is inert.
        let Some(first) = args.first() else { return };
        let text: String = self
            .elab_inline(first)
            .iter()
            .map(Inline::to_plain_text)
            .collect();
        match name {
            "title" => self.meta.title = Some(text),
            "author" => self.meta.author = Some(text),
            "date" => self.meta.date = Some(text),
            "keywords" => {
                self.meta.keywords = text
                    .split(',')
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
                    .collect()
            }
            _ => {}
        }
    }
}

fn flush_paragraph(blocks: &mut Vec<Block>, paragraph: &mut Vec<Inline>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(paragraph)));
    }
}

fn style_for(name: &str) -> Option<TextStyle> {
    match name {
        "emph" => Some(TextStyle::Emphasis),
        "textbf" => Some(TextStyle::Bold),
        "textit" => Some(TextStyle::Italic),
        "texttt" => Some(TextStyle::Typewriter),
        _ => None,
    }
}

fn section_level_for(name: &str) -> Option<u8> {
    match name {
        "section" => Some(1),
        "subsection" => Some(2),
        "subsubsection" => Some(3),
        "paragraph" => Some(4),
        "subparagraph" => Some(5),
        _ => None,
    }
}

fn is_metadata_command(name: &str) -> bool {
    matches!(name, "title" | "author" | "date" | "keywords")
}

fn restyle_text(inlines: Vec<Inline>, style: TextStyle) -> Vec<Inline> {
    inlines
        .into_iter()
        .map(|inline| match inline {
            Inline::Text { content, .. } => Inline::Text { content, style },
            other => other,
        })
        .collect()
}

/// The string form of an environment argument: the text under the group,
/// without the delimiting braces.
fn argument_text(node: &Node) -> String {
    match node {
        Node::Group { children, .. } => children.iter().map(Node::source_text).collect(),
        other => other.source_text(),
    }
}
