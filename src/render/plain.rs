use anyhow::Result;

use folio_parser::document::Document;

use crate::render::{DocumentRenderer, Format, RenderContext, RenderResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormat;

impl Format for PlainFormat {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

/// The IR's plain-text projection as an output format; mainly useful for
/// inspecting what the pipeline produced.
#[derive(Default, Debug, Clone)]
pub struct PlainRenderer;

impl DocumentRenderer for PlainRenderer {
    fn render_doc(&mut self, ctx: &RenderContext) -> Result<Document<RenderResult>> {
        let text: String = ctx
            .doc
            .content
            .iter()
            .map(|block| block.to_plain_text())
            .collect();
        Ok(Document {
            meta: ctx.doc.meta.clone(),
            content: text.into(),
            raw: ctx.doc.raw.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{PlainRenderer, RenderContext};
    use crate::render::DocumentRenderer;
    use folio_parser::document::Document;

    #[test]
    fn projection_contains_source_text() {
        let (doc, _) = Document::from_source("Hello, world!");
        let ctx = RenderContext {
            doc: &doc,
            standalone: false,
        };
        let out = PlainRenderer::default()
            .render_doc(&ctx)
            .expect("render failed");
        assert!(out.content.to_string().contains("Hello, world!"));
    }
}
