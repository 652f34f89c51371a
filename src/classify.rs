use std::collections::HashSet;

use crate::paragraph::{Classification, Paragraph};
use crate::Config;

/// Context-free paragraph classification.
///
/// Computes the derived features on each paragraph and assigns `cf_class`.
/// The rule order is significant: the first matching rule wins.
#[allow(clippy::if_same_then_else)]
pub(crate) fn classify_paragraphs(
    paragraphs: &mut [Paragraph],
    stoplist: &HashSet<String>,
    config: &Config,
) {
    for paragraph in paragraphs.iter_mut() {
        // Character count, not bytes: link density relates linked chars
        // to text chars.
        let length = paragraph.text.chars().count();
        paragraph.stopword_count = paragraph
            .text
            .split_whitespace()
            .filter(|word| stoplist.contains(*word))
            .count();
        if paragraph.word_count == 0 {
            paragraph.stopword_density = 0.0;
            paragraph.link_density = 0.0;
        } else {
            paragraph.stopword_density =
                paragraph.stopword_count as f64 / paragraph.word_count as f64;
            paragraph.link_density = paragraph.linked_char_count as f64 / length as f64;
        }
        paragraph.heading = !config.no_headings && paragraph.is_heading();

        paragraph.cf_class = if paragraph.link_density > config.max_link_density {
            Classification::Bad
        } else if paragraph.text.contains('\u{a9}') || paragraph.text.contains("&copy") {
            // Copyright markers; the literal "&copy" is a backup for
            // input whose entities were never decoded.
            Classification::Bad
        } else if paragraph.in_select() {
            Classification::Bad
        } else if length < config.length_low {
            if paragraph.linked_char_count > 0 {
                Classification::Bad
            } else {
                Classification::Short
            }
        } else if paragraph.stopword_density >= config.stopwords_high {
            if length > config.length_high {
                Classification::Good
            } else {
                Classification::NearGood
            }
        } else if paragraph.stopword_density >= config.stopwords_low {
            Classification::NearGood
        } else {
            Classification::Bad
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::clean_document;
    use crate::segment::segment;

    fn make_paragraph(text: &str, linked_char_count: usize) -> Paragraph {
        let html = format!("<html><body><p>{text}</p></body></html>");
        let doc = clean_document(&html);
        let mut ps = segment(&doc);
        assert!(!ps.is_empty(), "no paragraphs parsed from: {text}");
        ps[0].linked_char_count = linked_char_count;
        ps.remove(0)
    }

    fn empty_stoplist() -> HashSet<String> {
        HashSet::new()
    }

    fn stoplist(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_max_link_density() {
        let mut paragraphs = vec![
            make_paragraph("0123456789".repeat(2).as_str(), 0),
            make_paragraph("0123456789".repeat(2).as_str(), 20),
            make_paragraph("0123456789".repeat(8).as_str(), 40),
            make_paragraph("0123456789".repeat(8).as_str(), 39),
            make_paragraph("0123456789".repeat(8).as_str(), 41),
        ];

        let config = Config {
            max_link_density: 0.5,
            ..Config::default()
        };
        classify_paragraphs(&mut paragraphs, &empty_stoplist(), &config);

        // 20 chars, no links: density 0, length under 70 → short
        assert_eq!(paragraphs[0].cf_class, Classification::Short);
        // 20 chars fully linked: density 1.0 > 0.5 → bad
        assert_eq!(paragraphs[1].cf_class, Classification::Bad);
        // 80 chars, 40 linked: density exactly 0.5, not greater; zero
        // stopword density → bad
        assert_eq!(paragraphs[2].cf_class, Classification::Bad);
        assert_eq!(paragraphs[3].cf_class, Classification::Bad);
        // density 0.5125 > 0.5 → bad
        assert_eq!(paragraphs[4].cf_class, Classification::Bad);
    }

    #[test]
    fn test_length_low_with_links() {
        let mut paragraphs = vec![
            make_paragraph("0 1 2 3 4 5 6 7 8 9".repeat(2).as_str(), 0),
            make_paragraph("0 1 2 3 4 5 6 7 8 9".repeat(2).as_str(), 20),
        ];

        let config = Config {
            max_link_density: 1.0,
            length_low: 1000,
            ..Config::default()
        };
        classify_paragraphs(&mut paragraphs, &empty_stoplist(), &config);

        assert_eq!(paragraphs[0].cf_class, Classification::Short);
        // under length_low with linked chars → bad
        assert_eq!(paragraphs[1].cf_class, Classification::Bad);
    }

    #[test]
    fn test_stopwords_high() {
        let mut paragraphs = vec![
            make_paragraph("0 1 2 3 4 5 6 7 8 9", 0),
            make_paragraph("0 1 2 3 4 5 6 7 8 9".repeat(2).as_str(), 0),
        ];

        let config = Config {
            max_link_density: 1.0,
            length_low: 0,
            stopwords_high: 0.0,
            length_high: 20,
            ..Config::default()
        };
        classify_paragraphs(&mut paragraphs, &stoplist(&["0"]), &config);

        // length 19 is not above length_high → neargood
        assert_eq!(paragraphs[0].cf_class, Classification::NearGood);
        // length 39 exceeds length_high → good
        assert_eq!(paragraphs[1].cf_class, Classification::Good);
    }

    #[test]
    fn test_stopwords_low() {
        let mut paragraphs = vec![
            make_paragraph("0 0 0 0 1 2 3 4 5 6 7 8 9", 0),
            make_paragraph("0 1 2 3 4 5 6 7 8 9", 0),
            make_paragraph("1 2 3 4 5 6 7 8 9", 0),
        ];

        let config = Config {
            max_link_density: 1.0,
            length_low: 0,
            stopwords_high: 2.0,
            stopwords_low: 0.2,
            ..Config::default()
        };
        classify_paragraphs(&mut paragraphs, &stoplist(&["0", "1"]), &config);

        // 5/13 ≈ 0.38 ≥ 0.2 → neargood
        assert_eq!(paragraphs[0].cf_class, Classification::NearGood);
        // 2/10 = 0.2 ≥ 0.2 → neargood
        assert_eq!(paragraphs[1].cf_class, Classification::NearGood);
        // 1/9 ≈ 0.11 < 0.2 → bad
        assert_eq!(paragraphs[2].cf_class, Classification::Bad);
    }

    #[test]
    fn test_stopword_matching_is_case_sensitive() {
        let mut paragraphs = vec![
            make_paragraph("the cat sat on the mat", 0),
            make_paragraph("The cat sat on The mat", 0),
        ];
        let config = Config {
            length_low: 0,
            stopwords_low: 0.2,
            stopwords_high: 2.0,
            ..Config::default()
        };
        classify_paragraphs(&mut paragraphs, &stoplist(&["the", "on"]), &config);

        // "the" twice + "on": 3/6 = 0.5 → neargood
        assert_eq!(paragraphs[0].cf_class, Classification::NearGood);
        // capitalised "The" does not match: 1/6 ≈ 0.17 → bad
        assert_eq!(paragraphs[1].cf_class, Classification::Bad);
    }

    #[test]
    fn test_punctuation_blocks_stopword_match() {
        let mut paragraphs = vec![make_paragraph("end of. line of text", 0)];
        let config = Config {
            length_low: 0,
            stopwords_low: 0.3,
            stopwords_high: 2.0,
            ..Config::default()
        };
        classify_paragraphs(&mut paragraphs, &stoplist(&["of"]), &config);
        // "of." is not "of": 1/5 = 0.2 < 0.3 → bad
        assert_eq!(paragraphs[0].cf_class, Classification::Bad);
    }

    #[test]
    fn test_copyright_symbol() {
        let mut ps = vec![make_paragraph("Copyright \u{a9} 2024 Acme", 0)];
        classify_paragraphs(&mut ps, &empty_stoplist(), &Config::default());
        assert_eq!(ps[0].cf_class, Classification::Bad);
    }

    #[test]
    fn test_copyright_entity_literal() {
        // the un-decoded entity text survives as a literal substring
        let mut ps = vec![make_paragraph("&amp;copy; 2024 Acme Corp", 0)];
        classify_paragraphs(&mut ps, &empty_stoplist(), &Config::default());
        assert_eq!(ps[0].cf_class, Classification::Bad);
    }

    #[test]
    fn test_select_in_dom_path() {
        let html = "<html><body><form><select><option>First choice</option>\
                    <option>Second choice</option></select></form></body></html>";
        let doc = clean_document(html);
        let mut ps = segment(&doc);
        assert!(!ps.is_empty());
        classify_paragraphs(&mut ps, &empty_stoplist(), &Config::default());
        for p in &ps {
            assert!(p.in_select(), "expected select ancestry: {}", p.dom_path);
            assert_eq!(p.cf_class, Classification::Bad);
        }
    }

    #[test]
    fn test_derived_fields_are_stored() {
        let mut ps = vec![make_paragraph("0 1 2 3", 4)];
        let config = Config {
            length_low: 0,
            ..Config::default()
        };
        classify_paragraphs(&mut ps, &stoplist(&["0", "1"]), &config);
        assert_eq!(ps[0].stopword_count, 2);
        assert!((ps[0].stopword_density - 0.5).abs() < 1e-9);
        // 4 linked chars over 7 text chars
        assert!((ps[0].link_density - 4.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_heading_detection() {
        let html = "<html><body><h1>A heading</h1><p>body text here</p></body></html>";
        let doc = clean_document(html);
        let mut ps = segment(&doc);
        classify_paragraphs(&mut ps, &empty_stoplist(), &Config::default());
        assert!(ps[0].heading);
        assert!(!ps[1].heading);
    }

    #[test]
    fn test_no_headings_config() {
        let html = "<html><body><h1>A heading</h1></body></html>";
        let doc = clean_document(html);
        let mut ps = segment(&doc);
        let config = Config {
            no_headings: true,
            ..Config::default()
        };
        classify_paragraphs(&mut ps, &empty_stoplist(), &config);
        assert!(!ps[0].heading);
    }
}
