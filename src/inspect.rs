use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};
use serde::Serialize;

/// Structural counts of a Markdown text
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MarkdownOutline {
    pub headings_h1: usize,
    pub headings_h2: usize,
    pub headings_h3: usize,
    pub code_blocks: usize,
    pub tables: usize,
}

/// Parse rendered Markdown and count its headings, fenced code blocks and tables
pub fn inspect_markdown(content: &str) -> MarkdownOutline {
    let mut outline = MarkdownOutline::default();

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);

    for event in Parser::new_ext(content, options) {
        match event {
            Event::Start(Tag::Heading(level, ..)) => match level {
                HeadingLevel::H1 => outline.headings_h1 += 1,
                HeadingLevel::H2 => outline.headings_h2 += 1,
                HeadingLevel::H3 => outline.headings_h3 += 1,
                _ => {}
            },
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_))) => outline.code_blocks += 1,
            Event::Start(Tag::Table(_)) => outline.tables += 1,
            _ => {}
        }
    }

    outline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_markdown_basic() {
        let markdown = r#"# Title

intro

## Section 1

```rust
fn main() {}
```

| A | B |
| --- | --- |
| 1 | 2 |

## Section 2

### Python

```python
print(1)
```

    indented code is not counted
"#;

        let outline = inspect_markdown(markdown);

        assert_eq!(
            outline,
            MarkdownOutline {
                headings_h1: 1,
                headings_h2: 2,
                headings_h3: 1,
                code_blocks: 2,
                tables: 1,
            }
        );
    }

    #[test]
    fn test_inspect_empty_title() {
        let outline = inspect_markdown("# \n\n");
        assert_eq!(outline.headings_h1, 1);
        assert_eq!(outline.code_blocks, 0);
    }
}
