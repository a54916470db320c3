//! RTF exporter for annotated documents.
//!
//! Produces a self-contained RTF document in which detected links render as
//! blue, underlined spans. Total over any string input: empty text, an empty
//! link list, and a link spanning the whole text all produce valid RTF.

use storylink_domain::DetectedLink;

/// RTF document header: font table, black + blue color table, defaults.
const RTF_HEADER: &str = concat!(
    "{\\rtf1\\ansi\\deff0 {\\fonttbl{\\f0 Times New Roman;}}\n",
    "{\\colortbl;\\red0\\green0\\blue0;\\red0\\green0\\blue255;}\n",
    "\\viewkind4\\uc1\\pard\\lang1033\\f0\\fs24\n",
);

/// Renders a text and its detected links into an RTF document.
#[derive(Debug, Clone, Copy, Default)]
pub struct RtfExporter;

impl RtfExporter {
    pub fn new() -> Self {
        Self
    }

    /// Render `text` with the given links as blue underlined spans.
    ///
    /// Links are consumed in ascending span order regardless of the order
    /// given. A non-empty `title` is emitted as a centered, bold, larger-font
    /// block before the body. Link spans are byte offsets into `text`; a span
    /// that falls outside the text, behind the previous link, or off a
    /// character boundary is dropped rather than corrupting the output.
    pub fn export(&self, text: &str, title: &str, links: &[DetectedLink]) -> String {
        let mut ordered: Vec<&DetectedLink> = links.iter().collect();
        ordered.sort_by_key(|link| link.span.start);

        let mut rtf = String::with_capacity(RTF_HEADER.len() + text.len() * 2);
        rtf.push_str(RTF_HEADER);

        if !title.is_empty() {
            rtf.push_str("\\qc\\b\\fs32 ");
            rtf.push_str(&escape_rtf(title));
            rtf.push_str("\\b0\\fs24\\par\n\\par\n");
        }

        rtf.push_str("\\ql ");

        let mut cursor = 0usize;
        for link in ordered {
            let (start, end) = (link.span.start, link.span.end);
            if start < cursor
                || end < start
                || end > text.len()
                || !text.is_char_boundary(start)
                || !text.is_char_boundary(end)
            {
                continue;
            }
            rtf.push_str(&escape_rtf(&text[cursor..start]));
            rtf.push_str("{\\cf2\\ul ");
            rtf.push_str(&escape_rtf(&text[start..end]));
            rtf.push_str("\\cf0\\ulnone}");
            cursor = end;
        }

        if cursor < text.len() {
            rtf.push_str(&escape_rtf(&text[cursor..]));
        }

        rtf.push_str("\\par}\n");
        rtf
    }
}

/// Escape RTF control characters and normalize line breaks.
///
/// `\`, `{`, and `}` gain a backslash; CRLF, LF, and CR each become a single
/// `\par ` control sequence. Applied to titles, inter-link text, and matched
/// link text alike, since link text is still user content.
fn escape_rtf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\par ");
            }
            '\n' => out.push_str("\\par "),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use storylink_domain::{Entity, EntityId, EntityType, Span};

    fn link(text: &str, start: usize, end: usize) -> DetectedLink {
        let entity = Arc::new(Entity::new(
            EntityId::new(),
            &text[start..end],
            EntityType::Character,
        ));
        DetectedLink::new(entity, Span::new(start, end), &text[start..end])
    }

    /// Structural sanity: braces balance, so the document stays parseable.
    fn assert_balanced_braces(rtf: &str) {
        let mut depth: i32 = 0;
        let mut chars = rtf.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    // Skip the escaped character so \{ and \} don't count.
                    chars.next();
                }
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            assert!(depth >= 0, "unbalanced closing brace");
        }
        assert_eq!(depth, 0, "unbalanced braces in {rtf}");
    }

    #[test]
    fn test_no_links_renders_escaped_text_without_link_markup() {
        let out = RtfExporter::new().export("Elena walked home.", "", &[]);
        assert!(out.contains("Elena walked home."));
        assert!(!out.contains("\\ul"));
        assert!(out.starts_with("{\\rtf1"));
        assert!(out.trim_end().ends_with("\\par}"));
        assert_balanced_braces(&out);
    }

    #[test]
    fn test_link_is_wrapped_in_blue_underline_group() {
        let text = "Elena walked.";
        let out = RtfExporter::new().export(text, "", &[link(text, 0, 5)]);
        assert!(out.contains("{\\cf2\\ul Elena\\cf0\\ulnone}"));
        assert_balanced_braces(&out);
    }

    #[test]
    fn test_links_consumed_in_ascending_order_even_if_given_reversed() {
        let text = "Elena met Marcus.";
        let links = vec![link(text, 10, 16), link(text, 0, 5)];
        let out = RtfExporter::new().export(text, "", &links);
        let elena = out.find("{\\cf2\\ul Elena").expect("elena link");
        let marcus = out.find("{\\cf2\\ul Marcus").expect("marcus link");
        assert!(elena < marcus);
        assert_balanced_braces(&out);
    }

    #[test]
    fn test_title_block_is_centered_bold_and_larger() {
        let out = RtfExporter::new().export("Body.", "Chapter One", &[]);
        assert!(out.contains("\\qc\\b\\fs32 Chapter One\\b0\\fs24\\par"));
    }

    #[test]
    fn test_empty_title_emits_no_title_block() {
        let out = RtfExporter::new().export("Body.", "", &[]);
        assert!(!out.contains("\\fs32"));
    }

    #[test]
    fn test_control_characters_are_escaped_everywhere() {
        let text = "brace { and } and back\\slash";
        let out = RtfExporter::new().export(text, "a {title}", &[]);
        assert!(out.contains("brace \\{ and \\} and back\\\\slash"));
        assert!(out.contains("a \\{title\\}"));
        assert_balanced_braces(&out);
    }

    #[test]
    fn test_link_text_is_escaped_too() {
        let text = "see {Elena}";
        let out = RtfExporter::new().export(text, "", &[link(text, 4, 11)]);
        assert!(out.contains("{\\cf2\\ul \\{Elena\\}\\cf0\\ulnone}"));
        assert_balanced_braces(&out);
    }

    #[test]
    fn test_line_breaks_normalize_to_par() {
        let out = RtfExporter::new().export("a\r\nb\nc\rd", "", &[]);
        assert!(out.contains("a\\par b\\par c\\par d"));
    }

    #[test]
    fn test_empty_text_is_still_valid_rtf() {
        let out = RtfExporter::new().export("", "", &[]);
        assert!(out.starts_with("{\\rtf1"));
        assert!(out.trim_end().ends_with("\\par}"));
        assert_balanced_braces(&out);
    }

    #[test]
    fn test_link_spanning_entire_text() {
        let text = "Elena";
        let out = RtfExporter::new().export(text, "", &[link(text, 0, 5)]);
        assert!(out.contains("{\\cf2\\ul Elena\\cf0\\ulnone}"));
        assert_balanced_braces(&out);
    }

    #[test]
    fn test_out_of_bounds_and_overlapping_spans_are_dropped() {
        let text = "Elena met Marcus.";
        let hostile = vec![link(text, 0, 5), {
            // Overlaps the first link.
            let entity = Arc::new(Entity::new(EntityId::new(), "x", EntityType::Character));
            DetectedLink::new(entity, Span::new(3, 8), "na me")
        }];
        let out = RtfExporter::new().export(text, "", &hostile);
        assert!(out.contains("{\\cf2\\ul Elena\\cf0\\ulnone}"));
        assert_eq!(out.matches("{\\cf2\\ul ").count(), 1);
        assert_balanced_braces(&out);

        let entity = Arc::new(Entity::new(EntityId::new(), "x", EntityType::Character));
        let oob = vec![DetectedLink::new(entity, Span::new(10, 99), "nope")];
        let out = RtfExporter::new().export(text, "", &oob);
        assert!(!out.contains("\\ul"));
        assert!(out.contains("Elena met Marcus."));
    }
}
