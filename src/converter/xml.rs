//! Element lookup and text extraction over a parsed docutils tree.

use roxmltree::Node as XmlNode;

/// Local tag name of an element, ignoring any namespace
pub fn tag<'a>(elem: XmlNode<'a, '_>) -> &'a str {
    elem.tag_name().name()
}

/// Attribute value, or an empty string when absent
pub fn attr<'a>(elem: XmlNode<'a, '_>, name: &str) -> &'a str {
    elem.attribute(name).unwrap_or_default()
}

/// Text preceding the first child element
pub fn leading_text<'a>(elem: XmlNode<'a, '_>) -> &'a str {
    elem.text().unwrap_or_default()
}

/// Child elements, skipping text, comments and processing instructions
pub fn elements<'a, 'input>(
    elem: XmlNode<'a, 'input>,
) -> impl Iterator<Item = XmlNode<'a, 'input>> {
    elem.children().filter(|child| child.is_element())
}

/// Child elements with the given tag
pub fn children_named<'a, 'input>(
    elem: XmlNode<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = XmlNode<'a, 'input>> {
    elements(elem).filter(move |child| tag(*child) == name)
}

/// First child element with the given tag
pub fn find_child<'a, 'input>(
    elem: XmlNode<'a, 'input>,
    name: &'static str,
) -> Option<XmlNode<'a, 'input>> {
    children_named(elem, name).next()
}

/// Whether the element's `classes` attribute mentions `class`
pub fn has_class(elem: XmlNode<'_, '_>, class: &str) -> bool {
    attr(elem, "classes").contains(class)
}

/// Concatenate all text under `elem` in document order.
///
/// Paragraph-like elements collapse to a single line; field bodies and bullet
/// lists keep their line structure with each line stripped.
pub fn extract_text(elem: XmlNode<'_, '_>) -> String {
    let mut text = String::new();
    for child in elem.children() {
        if child.is_text() {
            text.push_str(child.text().unwrap_or_default());
        } else if child.is_element() {
            text.push_str(&extract_text(child));
        }
    }

    match tag(elem) {
        "paragraph" | "list_item" | "note" => collapse_whitespace(&text),
        "field_body" | "bullet_list" => normalize_lines(&text),
        _ => text,
    }
}

/// Join all non-empty stripped lines with single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip every line and rejoin with newlines
pub fn normalize_lines(text: &str) -> String {
    text.trim()
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}
