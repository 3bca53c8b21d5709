use crate::document::{Document, Node};

const PREVIEW_CHARS: usize = 100;

/// Serialize a document to Markdown
pub fn render_markdown(document: &Document) -> String {
    let mut markdown = format!("# {}\n\n", document.title);

    let mut current_block = document.first_block();
    while let Some(block_ref) = current_block {
        let block = block_ref.block();
        if !block.title.is_empty() {
            markdown.push_str(&format!("## {}\n\n", block.title));
        }

        let mut current_node = block_ref.first_node();
        while let Some(node_ref) = current_node {
            render_node(node_ref.node(), &mut markdown);
            current_node = node_ref.next();
        }

        current_block = block_ref.next();
    }

    markdown
}

fn render_node(node: &Node, markdown: &mut String) {
    match node {
        Node::Text { content } | Node::Table { content } => {
            markdown.push_str(content);
            markdown.push_str("\n\n");
        }
        Node::Code {
            content,
            language,
            caption,
        } => {
            if let Some(caption) = caption {
                markdown.push_str(&format!("*{}*\n\n", caption));
            }
            if node.is_pre_rendered() {
                markdown.push_str(&format!("{}\n\n", content));
            } else {
                markdown.push_str(&format!("```{}\n{}\n```\n\n", language, content));
            }
        }
    }
}

/// Hierarchical outline of a document, one line per document, block and node
pub fn describe_structure(document: &Document, verbose: bool) -> String {
    let mut lines = vec![format!("[document] {}", document.title)];

    for block_ref in document.linked_blocks() {
        lines.push(format!("  [block] {}", block_ref.block().title));

        for node_ref in block_ref.block().linked_nodes() {
            match node_ref.node() {
                Node::Text { content } if verbose => {
                    lines.push(format!("    [text] \"{}\"", preview(content)));
                }
                Node::Code {
                    language, caption, ..
                } if verbose => {
                    lines.push(format!("    [code] language: {}", language));
                    if let Some(caption) = caption {
                        lines.push(format!("      caption: {}", caption));
                    }
                }
                node => lines.push(format!("    [{}]", node.kind())),
            }
        }
    }

    lines.join("\n")
}

fn preview(content: &str) -> String {
    let mut preview: String = content.chars().take(PREVIEW_CHARS).collect();
    if content.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview.replace('\n', " ").trim().to_string()
}
