use anyhow::Result;
use std::io::Write;
use tera::Tera;

use folio_parser::document::Document;
use folio_parser::ir::{Block, Inline, TextStyle};

use crate::render::{
    write_bytes, DocumentRenderer, Format, RenderContext, RenderElement, RenderResult, LAYOUTS,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LatexFormat;

impl Format for LatexFormat {
    fn name(&self) -> &'static str {
        "latex"
    }

    fn extension(&self) -> &'static str {
        "tex"
    }
}

/// Emits LaTeX source; compilation to PDF is left to an external engine.
#[derive(Default, Debug, Clone)]
pub struct LatexRenderer;

impl DocumentRenderer for LatexRenderer {
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
            args.insert("title", &meta.title.as_deref().map(escape_tex));
            args.insert("author", &meta.author.as_deref().map(escape_tex));
            args.insert("date", &meta.date.as_deref().map(escape_tex));
            args.insert("abstract", &abstract_body);
            args.insert("body", &body);
            Tera::render(&LAYOUTS, "layout.tex", &args)?
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

impl RenderElement<Inline> for LatexRenderer {
    fn render(&mut self, elem: &Inline, ctx: &RenderContext, buf: impl Write) -> Result<()> {
        match elem {
            Inline::Text { content, style } => {
                let escaped = escape_tex(content);
                match style {
                    TextStyle::Plain => write_bytes(&escaped, buf),
                    TextStyle::Emphasis => write_bytes(&format!("\\emph{{{escaped}}}"), buf),
                    TextStyle::Bold => write_bytes(&format!("\\textbf{{{escaped}}}"), buf),
                    TextStyle::Italic => write_bytes(&format!("\\textit{{{escaped}}}"), buf),
                    TextStyle::Typewriter => write_bytes(&format!("\\texttt{{{escaped}}}"), buf),
                }
            }
            // Unknown commands round-trip to command syntax so downstream
            // TeX packages can pick them up.
            Inline::Command { name, args } => {
                let inner = self.render_inner(args, ctx)?;
                write_bytes(&format!("\\{name}{{{inner}}}"), buf)
            }
            Inline::Math { content, display } => {
                // Math content is raw TeX markup already.
                if *display {
                    write_bytes(&format!("\\[{content}\\]"), buf)
                } else {
                    write_bytes(&format!("${content}$"), buf)
                }
            }
            Inline::Space => write_bytes(" ", buf),
            Inline::LineBreak => write_bytes("\\\\\n", buf),
        }
    }
}

impl RenderElement<Block> for LatexRenderer {
    fn render(&mut self, elem: &Block, ctx: &RenderContext, mut buf: impl Write) -> Result<()> {
        match elem {
            Block::Paragraph(inlines) => {
                let inner = self.render_inner(inlines, ctx)?;
                write_bytes(&format!("{inner}\n\n"), buf)
            }
            Block::Section {
                level,
                title,
                label,
            } => {
                let command = section_command(*level);
                let inner = self.render_inner(title, ctx)?;
                write_bytes(&format!("\\{command}{{{inner}}}\n"), &mut buf)?;
                if let Some(label) = label {
                    write_bytes(&format!("\\label{{{label}}}\n"), &mut buf)?;
                }
                write_bytes("\n", buf)
            }
            Block::Environment {
                name,
                args,
                content,
            } => {
                let inner = self.render_inner(content, ctx)?;
                let args: String = args.iter().map(|a| format!("{{{}}}", escape_tex(a))).collect();
                write_bytes(
                    &format!("\\begin{{{name}}}{args}\n{inner}\\end{{{name}}}\n\n"),
                    buf,
                )
            }
            Block::List { ordered, items } => {
                let env = if *ordered { "enumerate" } else { "itemize" };
                write_bytes(&format!("\\begin{{{env}}}\n"), &mut buf)?;
                for item in items {
                    let inner = self.render_inner(item, ctx)?;
                    write_bytes(&format!("\\item {inner}"), &mut buf)?;
                }
                write_bytes(&format!("\\end{{{env}}}\n\n"), buf)
            }
            Block::Quote(content) => {
                let inner = self.render_inner(content, ctx)?;
                write_bytes(&format!("\\begin{{quote}}\n{inner}\\end{{quote}}\n\n"), buf)
            }
            Block::Verbatim(text) => write_bytes(
                &format!("\\begin{{verbatim}}\n{text}\n\\end{{verbatim}}\n\n"),
                buf,
            ),
            Block::Raw { format, content } => {
                let format: &str = format;
                if format == "latex" {
                    write_bytes(content, buf)
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn section_command(level: u8) -> &'static str {
    match level {
        0 | 1 => "section",
        2 => "subsection",
        3 => "subsubsection",
        4 => "paragraph",
        _ => "subparagraph",
    }
}

fn escape_tex(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
