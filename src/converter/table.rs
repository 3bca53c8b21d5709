use roxmltree::Node as XmlNode;

use crate::converter::xml::{children_named, extract_text, find_child};
use crate::document::Node;

/// Content of a table node that has no rows to show
pub const EMPTY_TABLE: &str = "[Empty Table]";

/// Render a docutils `table` as a Markdown pipe table
pub fn table_from_xml(elem: XmlNode<'_, '_>) -> Node {
    let Some(tgroup) = find_child(elem, "tgroup") else {
        return Node::table(EMPTY_TABLE);
    };

    // Only the last header row is kept
    let headers = find_child(tgroup, "thead")
        .and_then(|thead| children_named(thead, "row").last())
        .map(row_cells)
        .unwrap_or_default();

    let body: Vec<Vec<String>> = find_child(tgroup, "tbody")
        .map(|tbody| children_named(tbody, "row").map(row_cells).collect())
        .unwrap_or_default();

    let mut lines = Vec::with_capacity(body.len() + 2);
    if !headers.is_empty() {
        lines.push(format_row(&headers));
        lines.push(separator(headers.len()));
    } else if let Some(first) = body.first() {
        lines.push(separator(first.len()));
    }
    lines.extend(body.iter().map(|row| format_row(row)));

    if lines.is_empty() {
        return Node::table(EMPTY_TABLE);
    }
    Node::table(lines.join("\n"))
}

fn row_cells(row: XmlNode<'_, '_>) -> Vec<String> {
    children_named(row, "entry")
        .map(|entry| format_cell(&extract_text(entry)))
        .collect()
}

fn format_cell(text: &str) -> String {
    text.trim().replace('\n', " ").replace('|', "\\|")
}

fn format_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

fn separator(columns: usize) -> String {
    format_row(&vec!["---".to_string(); columns])
}
