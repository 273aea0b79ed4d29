//! Treeviz formatter for documents

use super::registry::{FormatError, Formatter};
use crate::etml::document::Document;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Render a document as a one-level tree, one line per segment.
///
/// Newlines in segment text are shown as `⏎` so each segment stays on its line.
pub fn to_treeviz_str(doc: &Document) -> String {
    let mut result = format!("Document ({} segments)\n", doc.len());
    for (i, segment) in doc.iter().enumerate() {
        let is_last = i == doc.len() - 1;
        let connector = if is_last { "└─" } else { "├─" };
        let label = truncate(&segment.text().replace('\n', "⏎"), 30);
        result.push_str(&format!(
            "{} {}: {}\n",
            connector,
            segment.modifier(),
            label
        ));
    }
    result
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn description(&self) -> &str {
        "Tree of segments for quick inspection"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::etml::document::Segment;
    use crate::etml::modifier::Modifier;

    #[test]
    fn test_treeviz() {
        let doc = Document::new(vec![
            Segment::new(Modifier::Scared, "what was\nthat"),
            Segment::new(
                Modifier::Bored,
                "a very long line of text that goes on and on",
            ),
        ]);
        assert_eq!(
            to_treeviz_str(&doc),
            "Document (2 segments)\n├─ scared: what was⏎that\n└─ bored: a very long line of text that ...\n"
        );
    }

    #[test]
    fn test_treeviz_empty() {
        assert_eq!(
            to_treeviz_str(&Document::default()),
            "Document (0 segments)\n"
        );
    }
}
