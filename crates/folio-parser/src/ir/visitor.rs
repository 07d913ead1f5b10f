use crate::ir::{Block, Inline, TextStyle};
use anyhow::Result;
use cowstr::CowStr;

/// Implements the visitor pattern for the document IR. Blanket
/// implementations are provided so implementors only have to implement the
/// methods they need to modify.
pub trait IrVisitor {
    fn walk_content(&mut self, blocks: &mut Vec<Block>) -> Result<()> {
        self.visit_vec_block(blocks)
    }

    fn walk_vec_block(&mut self, blocks: &mut Vec<Block>) -> Result<()> {
        blocks.iter_mut().try_for_each(|b| self.visit_block(b))
    }

    fn walk_block(&mut self, block: &mut Block) -> Result<()> {
        match block {
            Block::Paragraph(inlines) => self.visit_vec_inline(inlines),
            Block::Section {
                level,
                title,
                label,
            } => self.visit_section(*level, title, label),
            Block::Environment { content, .. } | Block::Quote(content) => {
                self.visit_vec_block(content)
            }
            Block::List { items, .. } => items
                .iter_mut()
                .try_for_each(|item| self.visit_vec_block(item)),
            Block::Verbatim(text) => self.visit_verbatim(text),
            Block::Raw { .. } => Ok(()),
        }
    }

    fn walk_vec_inline(&mut self, inlines: &mut Vec<Inline>) -> Result<()> {
        inlines.iter_mut().try_for_each(|i| self.visit_inline(i))
    }

    fn walk_inline(&mut self, inline: &mut Inline) -> Result<()> {
        match inline {
            Inline::Text { content, style } => self.visit_text(content, style),
            Inline::Command { args, .. } => self.visit_vec_inline(args),
            Inline::Math { content, display } => self.visit_math(content, *display),
            Inline::Space | Inline::LineBreak => Ok(()),
        }
    }

    fn visit_vec_block(&mut self, blocks: &mut Vec<Block>) -> Result<()> {
        self.walk_vec_block(blocks)
    }
    fn visit_block(&mut self, block: &mut Block) -> Result<()> {
        self.walk_block(block)
    }
    fn visit_vec_inline(&mut self, inlines: &mut Vec<Inline>) -> Result<()> {
        self.walk_vec_inline(inlines)
    }
    fn visit_inline(&mut self, inline: &mut Inline) -> Result<()> {
        self.walk_inline(inline)
    }

    fn visit_section(
        &mut self,
        _level: u8,
        title: &mut Vec<Inline>,
        _label: &mut Option<CowStr>,
    ) -> Result<()> {
        self.walk_vec_inline(title)
    }

    fn visit_text(&mut self, _content: &mut CowStr, _style: &mut TextStyle) -> Result<()> {
        Ok(())
    }

    fn visit_verbatim(&mut self, _text: &mut CowStr) -> Result<()> {
        Ok(())
    }

    fn visit_math(&mut self, _content: &mut CowStr, _display: bool) -> Result<()> {
        Ok(())
    }
}
