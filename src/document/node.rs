use serde::{Deserialize, Serialize};

/// Language tag marking code content that is already rendered Markdown
pub const PRE_RENDERED_LANGUAGE: &str = "markdown";

/// Smallest content unit of a block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    /// Whitespace-normalized prose
    Text { content: String },
    /// Source code, or pre-rendered Markdown when `language` is `"markdown"`
    Code {
        content: String,
        language: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    /// A Markdown pipe table
    Table { content: String },
}

impl Node {
    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text {
            content: content.into(),
        }
    }

    /// Create a code node
    pub fn code(
        content: impl Into<String>,
        language: impl Into<String>,
        caption: Option<String>,
    ) -> Self {
        Node::Code {
            content: content.into(),
            language: language.into(),
            caption,
        }
    }

    /// Create a table node
    pub fn table(content: impl Into<String>) -> Self {
        Node::Table {
            content: content.into(),
        }
    }

    /// Textual payload of the node, whatever its kind
    pub fn content(&self) -> &str {
        match self {
            Node::Text { content } | Node::Code { content, .. } | Node::Table { content } => {
                content
            }
        }
    }

    /// Short lowercase name of the node kind
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Text { .. } => "text",
            Node::Code { .. } => "code",
            Node::Table { .. } => "table",
        }
    }

    /// Whether this is a code node holding pre-rendered Markdown
    pub fn is_pre_rendered(&self) -> bool {
        matches!(self, Node::Code { language, .. } if language == PRE_RENDERED_LANGUAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = Node::code("print(1)", "python", Some("Example".to_string()));

        assert_eq!(node.kind(), "code");
        assert_eq!(node.content(), "print(1)");
        assert!(!node.is_pre_rendered());
        match node {
            Node::Code {
                language, caption, ..
            } => {
                assert_eq!(language, "python");
                assert_eq!(caption.as_deref(), Some("Example"));
            }
            other => panic!("expected code node, got {:?}", other),
        }
    }

    #[test]
    fn test_pre_rendered_code() {
        let tabs = Node::code("### Python", PRE_RENDERED_LANGUAGE, None);
        assert!(tabs.is_pre_rendered());
        assert!(!Node::text("markdown").is_pre_rendered());
    }

    #[test]
    fn test_serialization_tags_kind() {
        let json = serde_json::to_value(Node::table("| a |")).unwrap();
        assert_eq!(json["kind"], "table");
        assert_eq!(json["content"], "| a |");

        let json = serde_json::to_value(Node::code("x", "", None)).unwrap();
        assert!(json.get("caption").is_none());
    }
}
