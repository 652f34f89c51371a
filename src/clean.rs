use ego_tree::NodeId;
use scraper::node::Node;
use scraper::Html;

/// Tags whose entire subtree carries no body text.
const KILL_TAGS: &[&str] = &["head", "script", "style"];

/// Returns true if the string is empty or all whitespace.
pub(crate) fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c.is_whitespace())
}

/// Parse HTML and strip the parts that can never contribute content:
/// comments, `head`/`script`/`style` subtrees, and whitespace-only text
/// runs.
///
/// Text nodes are first-class siblings in the html5ever tree, so dropping
/// an element subtree can never take unrelated text with it; no sentinel
/// wrapping is needed to protect text runs.
pub(crate) fn clean_document(html: &str) -> Html {
    let mut doc = Html::parse_document(html);
    strip_non_content(&mut doc);
    doc
}

fn strip_non_content(doc: &mut Html) {
    let mut doomed: Vec<NodeId> = Vec::new();
    for node in doc.tree.root().descendants() {
        match node.value() {
            Node::Comment(_) => doomed.push(node.id()),
            Node::Element(el) if KILL_TAGS.contains(&el.name()) => doomed.push(node.id()),
            Node::Text(text) if is_blank(&text.text) => doomed.push(node.id()),
            _ => {}
        }
    }
    // Innermost nodes come last in document order; detaching in reverse
    // never unlinks a node whose ancestor is still being visited.
    for id in doomed.into_iter().rev() {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}
