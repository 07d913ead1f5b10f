use anyhow::{anyhow, Result};
use cowstr::CowStr;
use folio_parser::document::Document;
use folio_parser::ir::Block;
use lazy_static::lazy_static;
use std::fmt::Debug;
use std::io::Write;
use tera::Tera;

pub mod html;
pub mod latex;
pub mod plain;

/// Type alias used to specify that the string is a renderer output.
pub type RenderResult = CowStr;

/// An output format. The name keys cache entries; the extension names
/// output files.
pub trait Format: Debug {
    fn name(&self) -> &'static str;
    fn extension(&self) -> &'static str;
}

/// Context that is passed to the render functions.
pub struct RenderContext<'a> {
    /// The document that is being rendered.
    pub doc: &'a Document<Vec<Block>>,
    /// Wrap the rendered body in the format's layout template. Cleared
    /// for fragment output.
    pub standalone: bool,
}

/// Trait used for rendering a whole document.
pub trait DocumentRenderer {
    fn render_doc(&mut self, ctx: &RenderContext) -> Result<Document<RenderResult>>;
}

/// The base trait that renderers implement for each IR type. Backends are
/// total consumers: any legally-typed document renders without error.
pub trait RenderElement<T> {
    /// Render the element to a buffer.
    fn render(&mut self, elem: &T, ctx: &RenderContext, buf: impl Write) -> Result<()>;

    /// Convenience function for creating a buffer, rendering the element
    /// into the buffer, and returning the result as a string. This is
    /// useful when an inner element needs to be rendered first to be used
    /// in an outer element, hence the name.
    fn render_inner(&mut self, elem: &T, ctx: &RenderContext) -> Result<String> {
        let mut buf = Vec::new();
        self.render(elem, ctx, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

/// Implementation for vectors of elements. Automatically implemented for
/// any type that implements the trait.
impl<T: RenderElement<R>, R> RenderElement<Vec<R>> for T {
    fn render(&mut self, elem: &Vec<R>, ctx: &RenderContext, mut buf: impl Write) -> Result<()> {
        elem.iter().try_for_each(|e| self.render(e, ctx, &mut buf))
    }
}

pub(crate) fn write_bytes(source: &str, mut buf: impl Write) -> Result<()> {
    let bytes = source.as_bytes();
    let written = buf.write(bytes)?;
    (written == bytes.len())
        .then_some(())
        .ok_or_else(|| anyhow!("did not write correct number of bytes"))
}

lazy_static! {
    pub(crate) static ref LAYOUTS: Tera = {
        let mut tera = Tera::default();
        tera.add_raw_template(
            "layout.html",
            include_str!("../../templates/layout.html.tera"),
        )
        .expect("invalid html layout template");
        tera.add_raw_template(
            "layout.tex",
            include_str!("../../templates/layout.tex.tera"),
        )
        .expect("invalid latex layout template");
        tera
    };
}
