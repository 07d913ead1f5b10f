use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use folio::cache::RenderCache;
use folio::outline::document_outline;
use folio::render::html::{HtmlFormat, HtmlRenderer};
use folio::render::latex::{LatexFormat, LatexRenderer};
use folio::render::plain::{PlainFormat, PlainRenderer};
use folio::render::{DocumentRenderer, Format, RenderContext};
use folio_parser::document::Document;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a source file to an output format
    Render {
        path: PathBuf,
        #[arg(short, long, default_value = "html")]
        format: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit only the document body, without the surrounding layout
        #[arg(long)]
        fragment: bool,
        /// Render even when the cache says the output is current
        #[arg(long)]
        force: bool,
        /// Cache file tracking which sources are already rendered
        #[arg(long)]
        cache: Option<PathBuf>,
    },
    /// Parse and elaborate a file, reporting diagnostics
    Check { path: PathBuf },
    /// Print the section structure of a document
    Outline { path: PathBuf },
}

fn renderer_for(format: &str) -> Option<(Box<dyn DocumentRenderer>, Box<dyn Format>)> {
    match format {
        "html" => Some((Box::new(HtmlRenderer::default()), Box::new(HtmlFormat))),
        "latex" | "tex" => Some((Box::new(LatexRenderer::default()), Box::new(LatexFormat))),
        "plain" | "txt" => Some((Box::new(PlainRenderer::default()), Box::new(PlainFormat))),
        _ => None,
    }
}

fn read_source(path: &PathBuf) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            path,
            format,
            output,
            fragment,
            force,
            cache,
        } => {
            let source = read_source(&path)?;
            let (doc, diagnostics) = Document::from_source(&source);
            for diagnostic in &diagnostics {
                eprintln!("warning: {diagnostic}");
            }

            let (mut renderer, fmt) = renderer_for(&format)
                .with_context(|| format!("unknown output format: {format}"))?;
            let out_path = output.unwrap_or_else(|| path.with_extension(fmt.extension()));

            let key = path.display().to_string();
            let hash = blake3::hash(doc.raw.as_bytes());

            let mut render_cache = match &cache {
                Some(cache_path) => RenderCache::load(cache_path)?,
                None => RenderCache::default(),
            };
            if !force && cache.is_some() && render_cache.up_to_date(&key, hash, fmt.as_ref()) {
                println!("✓ {} is up to date", out_path.display());
                return Ok(());
            }

            let ctx = RenderContext {
                doc: &doc,
                standalone: !fragment,
            };
            let rendered = renderer.render_doc(&ctx)?;
            fs::write(&out_path, rendered.content.as_bytes())
                .with_context(|| format!("could not write {}", out_path.display()))?;

            if let Some(cache_path) = &cache {
                if !render_cache.matches(&key, hash) {
                    render_cache.reset_entry(key.clone(), hash);
                }
                render_cache.update_status(&key, fmt.name(), true)?;
                render_cache.store(cache_path)?;
            }

            println!("✓ wrote {}", out_path.display());
            Ok(())
        }
        Commands::Check { path } => {
            let source = read_source(&path)?;
            let (_, diagnostics) = Document::from_source(&source);
            if diagnostics.is_empty() {
                println!("✓ no issues found in {}", path.display());
                Ok(())
            } else {
                for diagnostic in &diagnostics {
                    println!("warning: {diagnostic}");
                }
                anyhow::bail!("{} issue(s) found in {}", diagnostics.len(), path.display())
            }
        }
        Commands::Outline { path } => {
            let source = read_source(&path)?;
            let (doc, _) = Document::from_source(&source);
            for entry in document_outline(&doc)? {
                let indent = "  ".repeat(entry.level.saturating_sub(1) as usize);
                println!("{indent}{}", entry.title);
            }
            Ok(())
        }
    }
}
