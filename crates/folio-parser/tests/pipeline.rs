use folio_parser::ast::parse_tokens;
use folio_parser::document::Document;
use folio_parser::elaborate::elaborate;
use folio_parser::ir::{Block, Inline};
use folio_parser::lexer::{scan, Token};
use cowstr::CowStr;

const SAMPLE: &str = include_str!("../resources/tests/sample.fol");

fn sections(content: &[Block]) -> Vec<(u8, String)> {
    content
        .iter()
        .filter_map(|block| match block {
            Block::Section { level, title, .. } => Some((
                *level,
                title.iter().map(Inline::to_plain_text).collect::<String>(),
            )),
            _ => None,
        })
        .collect()
}

#[test]
fn pipeline_is_total_on_hostile_input() {
    let inputs = [
        "",
        "\\",
        "{",
        "}",
        "{{{{{{",
        "}}}}}}",
        "\\a\\b\\c",
        "\\section{",
        "a}b{c\\",
        "\\emph{\\emph{\\emph{x}}}",
        "unicode: héllo wörld \\émph{ü}",
    ];
    for input in inputs {
        let (doc, _diagnostics) = Document::from_source(input);
        assert_eq!(doc.raw, CowStr::from(input));
    }
}

#[test]
fn lexical_round_trip_on_sample() {
    let rebuilt: String = scan(SAMPLE).iter().map(Token::lexeme).collect();
    assert_eq!(rebuilt, SAMPLE);
}

#[test]
fn sample_document_elaborates_cleanly() {
    let (doc, diagnostics) = Document::from_source(SAMPLE);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");

    assert_eq!(doc.meta.title.as_deref(), Some("A Short Treatise"));
    assert_eq!(doc.meta.author.as_deref(), Some("F. Olio"));
    assert_eq!(doc.meta.keywords, vec!["markup", "parsing"]);

    assert_eq!(
        sections(&doc.content),
        vec![
            (1, "Introduction".to_string()),
            (2, "Details".to_string()),
        ]
    );

    let plain: String = doc.content.iter().map(|b| b.to_plain_text()).collect();
    assert!(plain.contains("important"));
    assert!(plain.contains("} are absorbed"));

    // The unrecognized command survives as a generic inline command.
    let preserved = doc.content.iter().any(|block| match block {
        Block::Paragraph(inlines) => inlines.iter().any(|inline| {
            matches!(inline, Inline::Command { name, .. } if {
                let name: &str = name;
                name == "undefined"
            })
        }),
        _ => false,
    });
    assert!(preserved);
}

#[test]
fn elaborating_parser_output_never_reports_root_anomaly() {
    for input in ["", SAMPLE, "}{", "\\begin{x}"] {
        let root = parse_tokens(&scan(input));
        let (_, diagnostics) = elaborate(&root);
        assert!(diagnostics.iter().all(|d| !d.contains("document root")));
    }
}
