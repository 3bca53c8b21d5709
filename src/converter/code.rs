use roxmltree::Node as XmlNode;

use crate::converter::xml::{
    attr, children_named, elements, extract_text, find_child, leading_text, tag,
};
use crate::document::{Node, PRE_RENDERED_LANGUAGE};

/// Class marking a container that wraps a captioned literal block
pub const LITERAL_BLOCK_WRAPPER: &str = "literal-block-wrapper";

/// Build a code node from any of the supported code shapes
pub fn code_from_xml(elem: XmlNode<'_, '_>) -> Node {
    match tag(elem) {
        "TabsNode" => from_tabs(elem),
        "container" => from_captioned_container(elem),
        _ => from_literal_block(elem),
    }
}

/// A plain `literal_block`
pub fn from_literal_block(elem: XmlNode<'_, '_>) -> Node {
    Node::code(leading_text(elem), attr(elem, "language"), None)
}

/// A container holding a `caption` and a `literal_block`
fn from_captioned_container(elem: XmlNode<'_, '_>) -> Node {
    let mut caption = String::new();
    let mut content = "";
    let mut language = "";

    for child in elements(elem) {
        match tag(child) {
            "caption" => caption = extract_text(child),
            "literal_block" => {
                content = leading_text(child);
                language = attr(child, "language");
            }
            _ => {}
        }
    }

    Node::code(content, language, (!caption.is_empty()).then_some(caption))
}

/// A tab group; every tab becomes a level-3 heading followed by its fenced code.
///
/// The combined content is already Markdown, so the node is tagged with the
/// pre-rendered language and must not be fenced again.
fn from_tabs(elem: XmlNode<'_, '_>) -> Node {
    let mut combined = String::new();

    for tab in children_named(elem, "TabNode") {
        let Some(container) = find_child(tab, "container") else {
            continue;
        };
        let Some(literal) = find_child(container, "literal_block") else {
            continue;
        };

        let tab_name = attr(tab, "tabname");
        let title = if tab_name.is_empty() {
            find_child(container, "caption")
                .map(extract_text)
                .unwrap_or_default()
        } else {
            tab_name.to_string()
        };

        combined.push_str(&format!("### {}\n\n", title));
        combined.push_str(&format!(
            "```{}\n{}\n```\n\n",
            attr(literal, "language"),
            leading_text(literal)
        ));
    }

    Node::code(combined.trim(), PRE_RENDERED_LANGUAGE, None)
}
