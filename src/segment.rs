use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;

use crate::clean::is_blank;
use crate::decode::remap_control_entities;
use crate::paragraph::Paragraph;

/// Tags that open or close a paragraph boundary.
pub(crate) const PARAGRAPH_TAGS: &[&str] = &[
    "blockquote",
    "caption",
    "center",
    "col",
    "colgroup",
    "dd",
    "div",
    "dl",
    "dt",
    "fieldset",
    "form",
    "legend",
    "optgroup",
    "option",
    "p",
    "pre",
    "table",
    "td",
    "textarea",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
    "li",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
];

fn is_paragraph_tag(tag: &str) -> bool {
    PARAGRAPH_TAGS.contains(&tag)
}

/// Collapse every whitespace run to a single space.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_ws = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            in_ws = true;
        } else {
            if in_ws {
                out.push(' ');
                in_ws = false;
            }
            out.push(ch);
        }
    }
    if in_ws {
        out.push(' ');
    }
    out
}

/// The paragraph being assembled between boundaries.
struct Buffer {
    dom_path: String,
    text_nodes: Vec<String>,
    linked_char_count: usize,
    tag_count: usize,
}

impl Buffer {
    fn new(dom_path: String) -> Self {
        Self {
            dom_path,
            text_nodes: Vec::new(),
            linked_char_count: 0,
            tag_count: 0,
        }
    }

    fn build(self) -> Option<Paragraph> {
        if self.text_nodes.is_empty() {
            return None;
        }
        let text = normalize_whitespace(self.text_nodes.concat().trim());
        if text.is_empty() {
            return None;
        }
        Some(Paragraph::new(
            self.dom_path,
            text,
            self.linked_char_count,
            self.tag_count,
        ))
    }
}

/// State machine consuming start/end/text events from an in-order DOM
/// traversal and cutting paragraphs at block-tag boundaries.
///
/// Paragraphs are not DOM subtrees: `<br><br>` splits inside a `div` and
/// inline tags nest across paragraph cuts, so the segmenter runs over a
/// linear event stream rather than mapping nodes to paragraphs.
struct Segmenter {
    dom_stack: Vec<String>,
    paragraphs: Vec<Paragraph>,
    buffer: Buffer,
    in_link: bool,
    last_was_br: bool,
}

impl Segmenter {
    fn new() -> Self {
        Self {
            dom_stack: Vec::new(),
            paragraphs: Vec::new(),
            buffer: Buffer::new(String::new()),
            in_link: false,
            last_was_br: false,
        }
    }

    /// Close the open paragraph and start a fresh buffer at the current
    /// DOM position.
    fn flush(&mut self) {
        let fresh = Buffer::new(self.dom_stack.join("."));
        let finished = std::mem::replace(&mut self.buffer, fresh);
        if let Some(paragraph) = finished.build() {
            self.paragraphs.push(paragraph);
        }
    }

    fn start_tag(&mut self, name: &str) {
        self.dom_stack.push(name.to_string());
        if name == "br" {
            if self.last_was_br {
                // <br><br> separates paragraphs; the pair is not counted
                // as a tag of either one.
                self.buffer.tag_count = self.buffer.tag_count.saturating_sub(1);
                self.flush();
            } else {
                self.last_was_br = true;
                self.buffer.tag_count += 1;
            }
            return;
        }
        self.last_was_br = false;
        if is_paragraph_tag(name) {
            self.flush();
        } else {
            if name == "a" {
                self.in_link = true;
            }
            self.buffer.tag_count += 1;
        }
    }

    fn end_tag(&mut self, name: &str) {
        self.dom_stack.pop();
        if is_paragraph_tag(name) {
            self.flush();
        }
        if name == "a" {
            self.in_link = false;
        }
    }

    fn text(&mut self, content: &str) {
        let content = remap_control_entities(content);
        if is_blank(&content) {
            // Whitespace-only runs contribute nothing and do not clear
            // the <br> flag.
            return;
        }
        let normalized = normalize_whitespace(&content);
        if self.in_link {
            self.buffer.linked_char_count += normalized.chars().count();
        }
        self.buffer.text_nodes.push(normalized);
        self.last_was_br = false;
    }

    fn finish(mut self) -> Vec<Paragraph> {
        self.flush();
        self.paragraphs
    }
}

fn walk(segmenter: &mut Segmenter, node: NodeRef<Node>) {
    match node.value() {
        Node::Element(el) => {
            let tag = el.name();
            segmenter.start_tag(tag);
            for child in node.children() {
                walk(segmenter, child);
            }
            segmenter.end_tag(tag);
        }
        Node::Text(text) => segmenter.text(&text.text),
        Node::Document | Node::Fragment => {
            for child in node.children() {
                walk(segmenter, child);
            }
        }
        // Doctypes, processing instructions; comments are already gone.
        _ => {}
    }
}

/// Convert a cleaned document into paragraphs in document order.
pub(crate) fn segment(doc: &Html) -> Vec<Paragraph> {
    let mut segmenter = Segmenter::new();
    walk(&mut segmenter, doc.tree.root());
    segmenter.finish()
}
