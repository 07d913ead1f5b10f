use anyhow::Result;
use cowstr::CowStr;

use folio_parser::document::Document;
use folio_parser::ir::visitor::IrVisitor;
use folio_parser::ir::{Block, Inline};

/// One heading of a document outline.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub level: u8,
    pub title: String,
}

#[derive(Default)]
struct OutlineVisitor {
    entries: Vec<OutlineEntry>,
}

impl IrVisitor for OutlineVisitor {
    fn visit_section(
        &mut self,
        level: u8,
        title: &mut Vec<Inline>,
        _label: &mut Option<CowStr>,
    ) -> Result<()> {
        self.entries.push(OutlineEntry {
            level,
            title: title.iter().map(Inline::to_plain_text).collect(),
        });
        self.walk_vec_inline(title)
    }
}

/// Collect the section structure of an elaborated document, in document
/// order, descending into environments and quotes.
pub fn document_outline(doc: &Document<Vec<Block>>) -> Result<Vec<OutlineEntry>> {
    let mut visitor = OutlineVisitor::default();
    let mut content = doc.content.clone();
    visitor.walk_content(&mut content)?;
    Ok(visitor.entries)
}
