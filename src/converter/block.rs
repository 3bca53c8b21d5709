use roxmltree::Node as XmlNode;
use tracing::trace;

use crate::converter::code::{code_from_xml, from_literal_block, LITERAL_BLOCK_WRAPPER};
use crate::converter::table::table_from_xml;
use crate::converter::xml::{
    attr, children_named, elements, extract_text, find_child, has_class, tag,
};
use crate::document::Node;

/// Classify XML children into nodes, preserving their order
pub fn build_nodes(children: &[XmlNode<'_, '_>]) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(children.len());

    for child in children {
        match tag(*child) {
            "paragraph" | "note" => nodes.push(Node::text(extract_text(*child))),
            "bullet_list" | "enumerated_list" => nodes.push(Node::text(list_text(*child))),
            "literal_block" | "TabsNode" => nodes.push(code_from_xml(*child)),
            "container" if has_class(*child, LITERAL_BLOCK_WRAPPER) => {
                nodes.push(code_from_xml(*child))
            }
            "table" => nodes.push(table_from_xml(*child)),
            "desc" => push_desc_nodes(*child, &mut nodes),
            other => trace!("Ignoring <{}> element", other),
        }
    }

    nodes
}

/// API description: a metadata text node followed by the description body
fn push_desc_nodes(desc: XmlNode<'_, '_>, nodes: &mut Vec<Node>) {
    let mut metadata = format!(
        "Type: {}\nDomain: {}\nSummary: {}\n",
        attr(desc, "desctype"),
        attr(desc, "domain"),
        attr(desc, "summary")
    );
    for signature in children_named(desc, "desc_signature") {
        metadata.push_str(&format!("Signature: {}\n", extract_text(signature)));
    }
    nodes.push(Node::text(metadata));

    let Some(content) = find_child(desc, "desc_content") else {
        return;
    };
    for child in elements(content) {
        match tag(child) {
            "paragraph" => nodes.push(Node::text(extract_text(child))),
            "literal_block" => nodes.push(from_literal_block(child)),
            "field_list" => nodes.push(Node::text(field_list_text(child))),
            other => trace!("Ignoring <{}> inside desc_content", other),
        }
    }
}

fn field_list_text(field_list: XmlNode<'_, '_>) -> String {
    let mut text = String::from("Fields:\n");
    for field in children_named(field_list, "field") {
        if let Some(name) = find_child(field, "field_name") {
            text.push_str(&format!("- {}: ", extract_text(name)));
        }
        if let Some(body) = find_child(field, "field_body") {
            text.push_str(&format!("{}\n", extract_text(body)));
        }
    }
    text
}

/// One Markdown list line per `list_item`
fn list_text(list: XmlNode<'_, '_>) -> String {
    let ordered = tag(list) == "enumerated_list";
    let start: usize = list
        .attribute("start")
        .and_then(|start| start.parse().ok())
        .unwrap_or(1);

    children_named(list, "list_item")
        .enumerate()
        .map(|(i, item)| {
            let text = extract_text(item);
            if ordered {
                format!("{}. {}", start + i, text)
            } else {
                format!("- {}", text)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
