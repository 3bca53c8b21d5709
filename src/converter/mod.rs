pub mod block;
pub mod code;
pub mod table;
pub mod xml;

use roxmltree::{Node as XmlNode, ParsingOptions};
use std::path::Path;
use tracing::{debug, warn};

use crate::document::{Block, ConvertError, Document};
use block::build_nodes;
use xml::{attr, elements, find_child, leading_text, tag};

/// Result of converting one source tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// The tree had a root section and was converted
    Converted(Document),
    /// The root holds a table instead of a section; nothing to convert
    RootTable,
}

impl Conversion {
    /// The converted document, or an empty one for a skipped tree
    pub fn into_document(self) -> Document {
        match self {
            Conversion::Converted(document) => document,
            Conversion::RootTable => Document::default(),
        }
    }
}

/// Read and convert a docutils XML file
pub fn convert_file(path: &Path) -> Result<Document, ConvertError> {
    let xml = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    convert_document(&xml, path)
}

/// Convert docutils XML into a document; a root table yields an empty document
pub fn convert_document(xml: &str, source_path: &Path) -> Result<Document, ConvertError> {
    convert_source(xml, source_path).map(Conversion::into_document)
}

/// Convert docutils XML, telling a converted document apart from a skipped tree
pub fn convert_source(xml: &str, source_path: &Path) -> Result<Conversion, ConvertError> {
    // Sphinx writes a DOCTYPE declaration at the top of every file
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;

    let tree = roxmltree::Document::parse_with_options(xml, options).map_err(|source| {
        ConvertError::Xml {
            path: source_path.to_path_buf(),
            source,
        }
    })?;
    let root = tree.root_element();

    let Some(section) = find_child(root, "section") else {
        if find_child(root, "table").is_some() {
            warn!("Skipping: table at the root: {}", source_path.display());
            return Ok(Conversion::RootTable);
        }
        return Err(ConvertError::MissingSection(source_path.to_path_buf()));
    };

    let mut document = Document::new(
        section_title(section, source_path)?,
        source_path.display().to_string(),
    );
    collect_section_blocks(section, source_path, &mut document.blocks)?;

    debug!(
        "Converted {} into {} blocks with {} nodes",
        source_path.display(),
        document.blocks.len(),
        document.node_count()
    );
    Ok(Conversion::Converted(document))
}

/// Split the children of the root section into blocks.
///
/// Stray elements between subsections accumulate into an untitled block that
/// is flushed whenever a subsection, `desc` or `table` starts.
fn collect_section_blocks(
    section: XmlNode<'_, '_>,
    source_path: &Path,
    blocks: &mut Vec<Block>,
) -> Result<(), ConvertError> {
    let mut strays = Vec::new();

    for child in elements(section) {
        match tag(child) {
            "title" => {}
            _ if is_explicit_section(child) => {
                flush_strays(&mut strays, blocks);
                push_subsection_blocks(child, source_path, blocks)?;
            }
            "desc" | "table" => {
                flush_strays(&mut strays, blocks);
                blocks.push(Block::new(build_nodes(&[child])));
            }
            _ => strays.push(child),
        }
    }

    flush_strays(&mut strays, blocks);
    Ok(())
}

fn flush_strays(strays: &mut Vec<XmlNode<'_, '_>>, blocks: &mut Vec<Block>) {
    if !strays.is_empty() {
        blocks.push(Block::new(build_nodes(strays.as_slice())));
        strays.clear();
    }
}

/// A `section`, or a `container` marked as a split section
fn is_explicit_section(elem: XmlNode<'_, '_>) -> bool {
    match tag(elem) {
        "section" => true,
        "container" => attr(elem, "split-section") == "True",
        _ => false,
    }
}

/// One block for the subsection itself, then one per nested section
fn push_subsection_blocks(
    elem: XmlNode<'_, '_>,
    source_path: &Path,
    blocks: &mut Vec<Block>,
) -> Result<(), ConvertError> {
    let is_section = tag(elem) == "section";
    let title = if is_section {
        section_title(elem, source_path)?
    } else {
        String::new()
    };

    let children: Vec<_> = elements(elem).collect();
    blocks.push(Block::with_title(title, build_nodes(&children)));

    if is_section {
        for nested in children.iter().filter(|child| tag(**child) == "section") {
            push_subsection_blocks(*nested, source_path, blocks)?;
        }
    }
    Ok(())
}

fn section_title(section: XmlNode<'_, '_>, source_path: &Path) -> Result<String, ConvertError> {
    find_child(section, "title")
        .map(|title| leading_text(title).to_string())
        .ok_or_else(|| ConvertError::MissingTitle {
            element: tag(section).to_string(),
            path: source_path.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Node;

    fn convert(xml: &str) -> Result<Document, ConvertError> {
        convert_document(xml, Path::new("docs/page.xml"))
    }

    #[test]
    fn test_strays_grouped_between_boundaries() {
        let document = convert(
            r#"<document><section>
                <title>Page</title>
                <paragraph>one</paragraph>
                <paragraph>two</paragraph>
                <section><title>Sub</title><paragraph>three</paragraph></section>
                <paragraph>four</paragraph>
                <table><tgroup><tbody><row><entry>t</entry></row></tbody></tgroup></table>
                <desc desctype="data"/>
                <paragraph>five</paragraph>
            </section></document>"#,
        )
        .unwrap();

        assert_eq!(document.title, "Page");
        assert_eq!(document.source_path, "docs/page.xml");
        let shape: Vec<(&str, usize)> = document
            .blocks
            .iter()
            .map(|b| (b.title.as_str(), b.nodes.len()))
            .collect();
        assert_eq!(
            shape,
            vec![("", 2), ("Sub", 1), ("", 1), ("", 1), ("", 1), ("", 1)]
        );
        assert_eq!(document.blocks[5].nodes, vec![Node::text("five")]);
    }

    #[test]
    fn test_split_section_container_has_no_title() {
        let document = convert(
            r#"<document><section><title>Page</title>
                <container split-section="True"><title>Hidden</title><paragraph>inside</paragraph></container>
                <container split-section="False"><paragraph>stray</paragraph></container>
            </section></document>"#,
        )
        .unwrap();

        assert_eq!(document.blocks.len(), 2);
        assert_eq!(document.blocks[0].title, "");
        assert_eq!(document.blocks[0].nodes, vec![Node::text("inside")]);
        // a container without the wrapper class contributes no nodes
        assert!(document.blocks[1].nodes.is_empty());
    }

    #[test]
    fn test_nested_sections_follow_their_parent() {
        let document = convert(
            r#"<document><section><title>Page</title>
                <section><title>A</title><paragraph>a</paragraph>
                    <section><title>A.1</title><paragraph>a1</paragraph></section>
                    <paragraph>a tail</paragraph>
                </section>
                <section><title>B</title></section>
            </section></document>"#,
        )
        .unwrap();

        let titles: Vec<_> = document.blocks.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "A.1", "B"]);
        assert_eq!(
            document.blocks[0].nodes,
            vec![Node::text("a"), Node::text("a tail")]
        );
    }

    #[test]
    fn test_root_table_is_skipped() {
        let xml = "<document><table><tgroup/></table></document>";
        assert_eq!(
            convert_source(xml, Path::new("t.xml")).unwrap(),
            Conversion::RootTable
        );
        let document = convert(xml).unwrap();
        assert_eq!(document, Document::default());
    }

    #[test]
    fn test_missing_section_is_an_error() {
        let err = convert("<document><paragraph>x</paragraph></document>").unwrap_err();
        assert!(matches!(err, ConvertError::MissingSection(_)));
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_missing_title_is_an_error() {
        let err = convert("<document><section><paragraph>x</paragraph></section></document>")
            .unwrap_err();
        assert!(matches!(err, ConvertError::MissingTitle { .. }));

        let err = convert(
            "<document><section><title>T</title><section><paragraph>x</paragraph></section></section></document>",
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::MissingTitle { .. }));
    }

    #[test]
    fn test_malformed_xml() {
        let err = convert("<document><section>").unwrap_err();
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("docs/page.xml"));
    }

    #[test]
    fn test_doctype_is_accepted() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE document PUBLIC "+//IDN docutils.sourceforge.net//DTD Docutils Generic//EN//XML" "http://docutils.sourceforge.net/docs/ref/docutils.dtd">
<document source="/docs/index.rst"><section ids="index" names="index"><title>Index</title></section></document>"#;
        let document = convert(xml).unwrap();
        assert_eq!(document.title, "Index");
        assert!(document.blocks.is_empty());
        assert!(document.first_block().is_none());
    }

    #[test]
    fn test_title_uses_leading_text() {
        let document = convert(
            "<document><section><title>Using <literal>x</literal></title></section></document>",
        )
        .unwrap();
        assert_eq!(document.title, "Using ");
    }
}
