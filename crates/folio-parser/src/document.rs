use crate::ast::parse_tokens;
use crate::elaborate::elaborate;
use crate::ir::Block;
use crate::lexer::scan;
use anyhow::Result;
use cowstr::CowStr;
use serde::{Deserialize, Serialize};

/// A document paired with its metadata and original source. Generic over
/// the content so the same shell carries elaborated IR
/// (`Document<Vec<Block>>`) and rendered output (`Document<RenderResult>`
/// in the backends).
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Document<T: Serialize> {
    pub meta: Metadata,
    pub content: T,
    /// The unmodified source text. Carried for downstream consumers such
    /// as render caches; the pipeline itself never interprets it.
    pub raw: CowStr,
}

/// Document-level fields collected during elaboration. All optional; an
/// absent field is a legal document state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_: Option<Vec<Block>>,
}

impl Document<Vec<Block>> {
    /// Run the whole pipeline on a source string. Total: any input yields
    /// a document plus advisory diagnostics in source order.
    pub fn from_source(source: &str) -> (Self, Vec<String>) {
        let tokens = scan(source);
        let root = parse_tokens(&tokens);
        let (mut doc, diagnostics) = elaborate(&root);
        doc.raw = source.into();
        (doc, diagnostics)
    }
}

impl<T: Serialize> Document<T> {
    pub fn map<O: Serialize, F: Fn(T) -> O>(self, f: F) -> Document<O> {
        Document {
            content: f(self.content),
            meta: self.meta,
            raw: self.raw,
        }
    }

    pub fn try_map<O: Serialize, F: Fn(T) -> Result<O>>(self, f: F) -> Result<Document<O>> {
        Ok(Document {
            content: f(self.content)?,
            meta: self.meta,
            raw: self.raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, Metadata};
    use crate::ir::Block;
    use cowstr::CowStr;

    #[test]
    fn from_source_retains_raw_text() {
        let source = "\\section{Intro} body";
        let (doc, diagnostics) = Document::from_source(source);
        assert_eq!(doc.raw, CowStr::from(source));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn map_preserves_metadata_and_raw() {
        let doc = Document {
            meta: Metadata {
                title: Some("T".to_string()),
                ..Default::default()
            },
            content: Vec::<Block>::new(),
            raw: "x".into(),
        };
        let mapped = doc.map(|blocks| blocks.len());
        assert_eq!(mapped.content, 0);
        assert_eq!(mapped.meta.title.as_deref(), Some("T"));
        assert_eq!(mapped.raw, CowStr::from("x"));
    }
}
