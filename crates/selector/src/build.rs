//! Structural selectors assembled at capture time.

use crate::canonical::TEST_ID_ATTRIBUTE;
use crate::dom::{DomNode, ElementInfo};

/// Levels walked upwards when a field has no id, test id or class.
const FIELD_PATH_MAX_DEPTH: usize = 3;

/// Render a single path node: `tag[data-testid="…"]` when a test id is
/// present, otherwise `tag.class1.class2#id`.
pub fn render_node(el: &ElementInfo) -> String {
    let mut node = el.tag.clone();
    if let Some(test_id) = el.test_id() {
        node.push_str(&format!("[{}=\"{}\"]", TEST_ID_ATTRIBUTE, test_id));
        return node;
    }
    for class in el.classes.iter().filter(|c| !c.is_empty()) {
        node.push('.');
        node.push_str(class);
    }
    if let Some(id) = el.id() {
        node.push('#');
        node.push_str(id);
    }
    node
}

/// Selector for a click target from its composed event path (target first).
///
/// The chain is emitted from the document root inward and joined with `>`.
/// Document and window entries carry no element data and are skipped.
pub fn click_selector(path: &[DomNode]) -> String {
    let mut parts: Vec<String> = path
        .iter()
        .filter_map(DomNode::as_element)
        .map(render_node)
        .collect();
    parts.reverse();
    parts.join(">")
}

/// Selector for a form field: test id, then id, then classes, then a short
/// `nth-child` path that stops at `body`.
pub fn field_selector(path: &[DomNode]) -> String {
    let mut elements = path.iter().filter_map(DomNode::as_element);
    let Some(target) = elements.next() else {
        return String::new();
    };

    if let Some(test_id) = target.test_id() {
        return format!("[{}=\"{}\"]", TEST_ID_ATTRIBUTE, test_id);
    }
    if let Some(id) = target.id() {
        return format!("#{}", id);
    }
    let classes: String = target
        .classes
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| format!(".{}", c))
        .collect();
    if !classes.is_empty() {
        return classes;
    }

    let mut path_str = String::new();
    let chain = std::iter::once(target).chain(elements);
    for el in chain.take(FIELD_PATH_MAX_DEPTH) {
        if el.is_tag("body") {
            break;
        }
        let mut segment = el.tag.to_ascii_lowercase();
        if el.sibling_count > 1 {
            segment.push_str(&format!(":nth-child({})", el.sibling_index));
        }
        path_str = if path_str.is_empty() {
            segment
        } else {
            format!("{} > {}", segment, path_str)
        };
    }
    path_str
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn path(elements: Vec<ElementInfo>) -> Vec<DomNode> {
        let mut nodes: Vec<DomNode> = elements.into_iter().map(DomNode::Element).collect();
        nodes.push(DomNode::Document);
        nodes.push(DomNode::Window);
        nodes
    }

    #[test]
    fn click_path_runs_root_inward() {
        let nodes = path(vec![
            ElementInfo::new("button")
                .with_classes(["btn", "primary"])
                .with_id("save"),
            ElementInfo::new("div").with_classes(["toolbar"]),
            ElementInfo::new("body"),
            ElementInfo::new("html"),
        ]);
        assert_eq!(
            click_selector(&nodes),
            "html>body>div.toolbar>button.btn.primary#save"
        );
    }

    #[test]
    fn test_id_replaces_class_and_id() {
        let el = ElementInfo::new("a")
            .with_classes(["link"])
            .with_id("home")
            .with_test_id("nav-home");
        assert_eq!(render_node(&el), "a[data-testid=\"nav-home\"]");
    }

    #[test]
    fn field_selector_precedence() {
        let by_test_id = path(vec![ElementInfo::new("input")
            .with_id("email")
            .with_test_id("email-field")]);
        assert_eq!(field_selector(&by_test_id), "[data-testid=\"email-field\"]");

        let by_id = path(vec![ElementInfo::new("input")
            .with_id("email")
            .with_classes(["wide"])]);
        assert_eq!(field_selector(&by_id), "#email");

        let by_class = path(vec![ElementInfo::new("textarea").with_classes(["note", "big"])]);
        assert_eq!(field_selector(&by_class), ".note.big");
    }

    #[test]
    fn field_selector_structural_fallback() {
        let nodes = path(vec![
            ElementInfo::new("input").with_position(2, 3),
            ElementInfo::new("label"),
            ElementInfo::new("form").with_position(1, 2),
            ElementInfo::new("section"),
            ElementInfo::new("body"),
        ]);
        assert_eq!(
            field_selector(&nodes),
            "form:nth-child(1) > label > input:nth-child(2)"
        );
    }

    #[test]
    fn field_selector_stops_at_body() {
        let nodes = path(vec![ElementInfo::new("input"), ElementInfo::new("body")]);
        assert_eq!(field_selector(&nodes), "input");
    }

    #[test]
    fn empty_path_yields_empty_selector() {
        assert_eq!(field_selector(&[DomNode::Window]), "");
        assert_eq!(click_selector(&[]), "");
    }
}
