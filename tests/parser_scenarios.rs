//! Scenario tests for the public parsing API

use etml::etml::document::{Document, Segment};
use etml::etml::error::{MalformedReason, MarkupError, Position};
use etml::etml::modifier::Modifier;
use etml::etml::parser::{
    parse_document, parse_with_diagnostics, parse_with_options, OutsideText, ParseOptions,
};
use etml::etml::validator::is_well_formed_markup;
use rstest::rstest;

fn segment(modifier: Modifier, text: &str) -> Segment {
    Segment::new(modifier, text)
}

#[test]
fn furious_then_calm() {
    let doc = parse_document("[ANG]I am furious[/ANG][REL]but now calm[/REL]").unwrap();
    assert_eq!(
        doc,
        Document::new(vec![
            segment(Modifier::Angry, "I am furious"),
            segment(Modifier::Relieved, "but now calm"),
        ])
    );
}

#[rstest]
#[case("ANG", Modifier::Angry)]
#[case("ECT", Modifier::Ecstatic)]
#[case("CON", Modifier::Confused)]
#[case("DEP", Modifier::Depressed)]
#[case("SCD", Modifier::Scared)]
#[case("TRD", Modifier::Tired)]
#[case("REL", Modifier::Relieved)]
#[case("BRD", Modifier::Bored)]
#[case("XYZ", Modifier::None)]
fn each_code_resolves(#[case] code: &str, #[case] expected: Modifier) {
    let source = format!("[{code}]hello[/{code}]");
    let doc = parse_document(&source).unwrap();
    assert_eq!(doc.segments(), &[segment(expected, "hello")]);
}

#[test]
fn unknown_code_is_reported_but_not_fatal() {
    let parsed =
        parse_with_diagnostics("[ANG]a[/ANG]\n[XYZ]hello[/XYZ]", &ParseOptions::default())
            .unwrap();
    assert_eq!(parsed.document.len(), 2);
    assert_eq!(parsed.warnings.len(), 1);
    assert_eq!(
        parsed.warnings[0].to_string(),
        "Unknown modifier code [XYZ] at 2:1, treated as none"
    );
}

#[test]
fn lowercase_code_is_not_a_tag() {
    let err = parse_document("[ang]hello[/ang]").unwrap_err();
    assert!(matches!(
        err,
        MarkupError::MalformedMarkup {
            reason: MalformedReason::InvalidTagCode,
            ..
        }
    ));
}

#[test]
fn empty_input() {
    assert!(parse_document("").unwrap().is_empty());
}

#[test]
fn plain_text_is_not_markup_and_parses_empty() {
    assert!(!is_well_formed_markup("just plain text"));
    assert!(parse_document("just plain text").unwrap().is_empty());
}

#[test]
fn plain_text_is_rejected_when_asked() {
    let options = ParseOptions {
        outside_text: OutsideText::Reject,
        ..ParseOptions::default()
    };
    let err = parse_with_options("just plain text", &options).unwrap_err();
    assert!(matches!(
        err,
        MarkupError::MalformedMarkup {
            reason: MalformedReason::TextOutsideTag,
            ..
        }
    ));
}

#[rstest]
#[case::unterminated("[ANG]unterminated")]
#[case::unterminated_name("[ANG")]
#[case::unterminated_close("[ANG]a[/ANG")]
#[case::lone_open("[")]
#[case::open_inside_body("[ANG]a [ b[/ANG]")]
#[case::second_tag_open("[ANG]a[/ANG][REL]b")]
#[case::stray_close("a]")]
#[case::stray_close_after_tag("[ANG]a[/ANG]]")]
#[case::closing_without_open("[/ANG]")]
#[case::mismatch("[ANG]a[/REL]")]
#[case::empty_code("[]a[/]")]
#[case::spaced_code("[a b]x[/a b]")]
#[case::code_across_lines("[AN\nG]x[/AN\nG]")]
#[case::lowercase_punctuated_code("[an?]x[/an?]")]
#[case::prose_brackets("He said [quietly] [ANG]no[/ANG]")]
fn malformed_inputs_fail(#[case] source: &str) {
    let err = parse_document(source).unwrap_err();
    assert!(err.is_malformed(), "{source:?} gave {err:?}");
    assert!(!is_well_formed_markup(source));
}

#[rstest]
#[case::single("[ANG]x[/ANG]", 1)]
#[case::with_outside_text("Hello [DEP]sigh[/DEP] bye", 1)]
#[case::across_lines("[SCD]boo[/SCD]\n[REL]phew[/REL]\n", 2)]
#[case::escaped_brackets("[CON]\\[what\\][/CON]", 1)]
#[case::unknown_code("[XYZ]hello[/XYZ]", 1)]
fn well_formed_inputs_parse(#[case] source: &str, #[case] segments: usize) {
    assert!(is_well_formed_markup(source));
    assert_eq!(parse_document(source).unwrap().len(), segments);
}

#[test]
fn segment_text_has_no_markup_brackets() {
    let doc = parse_document("[ANG]a[/ANG] x [BRD]b c[/BRD]").unwrap();
    for segment in &doc {
        assert!(!segment.text().contains('['));
        assert!(!segment.text().contains(']'));
    }
}

#[test]
fn documents_are_not_capped_at_five() {
    let source: String = (0..20).map(|i| format!("[TRD]{i}[/TRD]")).collect();
    let doc = parse_document(&source).unwrap();
    assert_eq!(doc.len(), 20);
    assert_eq!(doc.segments()[19].text(), "19");
}

#[test]
fn bounded_documents_fail_instead_of_truncating() {
    let source: String = (0..6).map(|i| format!("[TRD]{i}[/TRD]")).collect();
    let options = ParseOptions {
        max_segments: Some(5),
        ..ParseOptions::default()
    };
    assert_eq!(
        parse_with_options(&source, &options).unwrap_err(),
        MarkupError::CapacityExceeded { limit: 5, found: 6 }
    );
}

#[test]
fn multibyte_text_survives() {
    let doc = parse_document("[ECT]¡Qué alegría! 🎉[/ECT]").unwrap();
    assert_eq!(doc.segments()[0].text(), "¡Qué alegría! 🎉");
}

#[test]
fn error_positions_use_lines_and_columns() {
    let err = parse_document("[ANG]ok[/ANG]\n  [REL]never closed").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Malformed markup at 2:3: tag [REL] is never closed"
    );
}

#[test]
fn rejected_outside_text_includes_escapes() {
    let options = ParseOptions {
        outside_text: OutsideText::Reject,
        ..ParseOptions::default()
    };
    let err = parse_with_options("[ANG]a[/ANG] \\[ [REL]b[/REL]", &options).unwrap_err();
    assert_eq!(
        err,
        MarkupError::MalformedMarkup {
            position: Position::new(13, 0, 13),
            reason: MalformedReason::TextOutsideTag,
        }
    );
}

#[test]
fn whitespace_between_tags_is_allowed_when_rejecting() {
    let options = ParseOptions {
        outside_text: OutsideText::Reject,
        ..ParseOptions::default()
    };
    let doc = parse_with_options(" \t[ANG]a[/ANG]\n\n  [REL]b[/REL] \n", &options).unwrap();
    assert_eq!(
        doc.segments(),
        &[
            segment(Modifier::Angry, "a"),
            segment(Modifier::Relieved, "b"),
        ]
    );
}
