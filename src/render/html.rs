use anyhow::Result;
use std::io::Write;
use tera::Tera;

use folio_parser::document::Document;
use folio_parser::ir::{Block, Inline, TextStyle};

use crate::render::{
    write_bytes, DocumentRenderer, Format, RenderContext, RenderElement, RenderResult, LAYOUTS,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &'static str {
        "html"
    }

    fn extension(&self) -> &'static str {
        "html"
    }
}

#[derive(Default, Debug, Clone)]
pub struct HtmlRenderer;

impl DocumentRenderer for HtmlRenderer {
    fn render_doc(&mut self, ctx: &RenderContext) -> Result<Document<RenderResult>> {
        let mut buf = Vec::new();
        self.render(&ctx.doc.content, ctx, &mut buf)?;
        let body = String::from_utf8(buf)?;

        let content = if ctx.standalone {
            let meta = &ctx.doc.meta;
            let abstract_body = meta
                .abstract_
                .as_ref()
                .map(|blocks| self.render_inner(blocks, ctx))
                .transpose()?;

            let mut args = tera::Context::new();
            args.insert("title", &meta.title);
            args.insert("author", &meta.author);
            args.insert("date", &meta.date);
            args.insert("keywords", &meta.keywords.join(", "));
            args.insert("abstract", &abstract_body);
            args.insert("body", &body);
            Tera::render(&LAYOUTS, "layout.html", &args)?
        } else {
            body
        };

        Ok(Document {
            meta: ctx.doc.meta.clone(),
            content: content.into(),
            raw: ctx.doc.raw.clone(),
        })
    }
}

impl RenderElement<Inline> for HtmlRenderer {
    fn render(&mut self, elem: &Inline, ctx: &RenderContext, buf: impl Write) -> Result<()> {
        match elem {
            Inline::Text { content, style } => {
                let escaped = escape_html(content);
                match style {
                    TextStyle::Plain => write_bytes(&escaped, buf),
                    TextStyle::Emphasis => write_bytes(&format!("<em>{escaped}</em>"), buf),
                    TextStyle::Bold => write_bytes(&format!("<strong>{escaped}</strong>"), buf),
                    TextStyle::Italic => write_bytes(&format!("<i>{escaped}</i>"), buf),
                    TextStyle::Typewriter => write_bytes(&format!("<code>{escaped}</code>"), buf),
                }
            }
            Inline::Command { name, args } => {
                let inner = self.render_inner(args, ctx)?;
                write_bytes(
                    &format!(
                        "<span class=\"command\" data-command=\"{}\">{inner}</span>",
                        escape_html(name)
                    ),
                    buf,
                )
            }
            Inline::Math { content, display } => {
                let escaped = escape_html(content);
                if *display {
                    write_bytes(
                        &format!("<div class=\"math display\">\\[{escaped}\\]</div>"),
                        buf,
                    )
                } else {
                    write_bytes(&format!("<span class=\"math\">\\({escaped}\\)</span>"), buf)
                }
            }
            Inline::Space => write_bytes(" ", buf),
            Inline::LineBreak => write_bytes("<br />\n", buf),
        }
    }
}

impl RenderElement<Block> for HtmlRenderer {
    fn render(&mut self, elem: &Block, ctx: &RenderContext, mut buf: impl Write) -> Result<()> {
        match elem {
            Block::Paragraph(inlines) => {
                let inner = self.render_inner(inlines, ctx)?;
                write_bytes(&format!("<p>{inner}</p>\n"), buf)
            }
            Block::Section {
                level,
                title,
                label,
            } => {
                let tag = (*level).clamp(1, 6);
                let inner = self.render_inner(title, ctx)?;
                let id = label
                    .as_ref()
                    .map(|l| format!(" id=\"{}\"", escape_html(l)))
                    .unwrap_or_default();
                write_bytes(&format!("<h{tag}{id}>{inner}</h{tag}>\n"), buf)
            }
            Block::Environment { name, content, .. } => {
                let inner = self.render_inner(content, ctx)?;
                write_bytes(
                    &format!(
                        "<div class=\"environment environment-{}\">\n{inner}</div>\n",
                        escape_html(name)
                    ),
                    buf,
                )
            }
            Block::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                write_bytes(&format!("<{tag}>\n"), &mut buf)?;
                for item in items {
                    let inner = self.render_inner(item, ctx)?;
                    write_bytes(&format!("<li>{inner}</li>\n"), &mut buf)?;
                }
                write_bytes(&format!("</{tag}>\n"), buf)
            }
            Block::Quote(content) => {
                let inner = self.render_inner(content, ctx)?;
                write_bytes(&format!("<blockquote>\n{inner}</blockquote>\n"), buf)
            }
            Block::Verbatim(text) => write_bytes(
                &format!("<pre><code>{}</code></pre>\n", escape_html(text)),
                buf,
            ),
            Block::Raw { format, content } => {
                let format: &str = format;
                if format == "html" {
                    write_bytes(content, buf)
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{HtmlRenderer, RenderContext};
    use crate::render::DocumentRenderer;
    use folio_parser::document::Document;
    use folio_parser::ir::{Block, Inline};

    fn render_fragment(source: &str) -> String {
        let (doc, diagnostics) = Document::from_source(source);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let ctx = RenderContext {
            doc: &doc,
            standalone: false,
        };
        HtmlRenderer::default()
            .render_doc(&ctx)
            .expect("render failed")
            .content
            .to_string()
    }

    #[test]
    fn styled_paragraph() {
        assert_eq!(
            render_fragment("This is \\emph{important} text."),
            "<p>This is <em>important</em> text.</p>\n"
        );
    }

    #[test]
    fn section_becomes_heading() {
        assert_eq!(
            render_fragment("\\subsection{Hello}"),
            "<h2>Hello</h2>\n"
        );
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(
            render_fragment("a < b & c"),
            "<p>a &lt; b &amp; c</p>\n"
        );
    }

    #[test]
    fn unknown_command_keeps_its_name() {
        let html = render_fragment("\\foo{bar}");
        assert_eq!(
            html,
            "<p><span class=\"command\" data-command=\"foo\">bar</span></p>\n"
        );
    }

    #[test]
    fn hand_built_list_renders_nested_items() {
        let doc = Document {
            meta: Default::default(),
            content: vec![Block::List {
                ordered: true,
                items: vec![vec![Block::Paragraph(vec![Inline::text("one")])]],
            }],
            raw: "".into(),
        };
        let ctx = RenderContext {
            doc: &doc,
            standalone: false,
        };
        let html = HtmlRenderer::default()
            .render_doc(&ctx)
            .expect("render failed");
        assert_eq!(
            html.content.to_string(),
            "<ol>\n<li><p>one</p>\n</li>\n</ol>\n"
        );
    }

    #[test]
    fn standalone_output_carries_metadata() {
        let (doc, _) = Document::from_source("\\title{T < U}\\section{S}");
        let ctx = RenderContext {
            doc: &doc,
            standalone: true,
        };
        let html = HtmlRenderer::default()
            .render_doc(&ctx)
            .expect("render failed")
            .content
            .to_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>T &lt; U</title>"));
        assert!(html.contains("<h1 class=\"doc-title\">T &lt; U</h1>"));
        assert!(html.contains("<h1>S</h1>"));
    }
}
