use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::converter::{convert_source, Conversion};
use crate::document::{ConvertError, Document};
use crate::inspect::inspect_markdown;
use crate::render::{describe_structure, render_markdown};
use crate::source::XmlSource;

/// What happened to a single input file
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    Converted { title: String, blocks: usize },
    /// The file holds no section; an empty document was written
    Skipped,
}

#[async_trait]
pub trait DocumentProcessor: Send + Sync {
    async fn process_file(&self, input: &Path, output: &Path) -> Result<FileOutcome>;
}

/// Converts docutils XML to Markdown on disk
#[derive(Debug, Clone, Default)]
pub struct MarkdownProcessor {
    print_structure: bool,
    verbose: bool,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also print the outline of every converted document to stdout
    pub fn with_structure(verbose: bool) -> Self {
        Self {
            print_structure: true,
            verbose,
        }
    }

    async fn write_markdown(&self, document: &Document, output: &Path) -> Result<()> {
        let markdown = render_markdown(document);
        debug!(outline = ?inspect_markdown(&markdown), "Rendered {}", document.source_path);

        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(output, markdown)
            .await
            .with_context(|| format!("Failed to write {}", output.display()))?;

        info!("Saved Markdown to: {}", output.display());
        Ok(())
    }
}

#[async_trait]
impl DocumentProcessor for MarkdownProcessor {
    async fn process_file(&self, input: &Path, output: &Path) -> Result<FileOutcome> {
        let xml = tokio::fs::read_to_string(input)
            .await
            .map_err(|source| ConvertError::Io {
                path: input.to_path_buf(),
                source,
            })?;

        let conversion = convert_source(&xml, input)?;
        let outcome = match &conversion {
            Conversion::Converted(document) => FileOutcome::Converted {
                title: document.title.clone(),
                blocks: document.blocks.len(),
            },
            Conversion::RootTable => FileOutcome::Skipped,
        };
        let document = conversion.into_document();

        info!("Found {} blocks in {}", document.blocks.len(), document.title);
        if self.print_structure {
            println!("{}", describe_structure(&document, self.verbose));
        }

        self.write_markdown(&document, output).await?;
        Ok(outcome)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConvertedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub blocks: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FailedFile {
    pub source: PathBuf,
    pub error: String,
}

/// Per-file results of a batch run, each list sorted by source path
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct BatchReport {
    pub converted: Vec<ConvertedFile>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.converted.len() + self.skipped.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Converts every XML file of a source directory, isolating failures per file
pub struct BatchDriver {
    source: XmlSource,
    output_dir: PathBuf,
    processor: Box<dyn DocumentProcessor>,
    concurrency: usize,
}

impl BatchDriver {
    pub fn new(
        source: XmlSource,
        output_dir: impl Into<PathBuf>,
        processor: Box<dyn DocumentProcessor>,
    ) -> Self {
        Self {
            source,
            output_dir: output_dir.into(),
            processor,
            concurrency: 1,
        }
    }

    /// Number of files processed at the same time
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn run(&self) -> Result<BatchReport> {
        let files = self.source.discover()?;
        info!(
            "Found {} XML files in {}",
            files.len(),
            self.source.root().display()
        );

        let results: Vec<(PathBuf, Result<(PathBuf, FileOutcome)>)> = stream::iter(files)
            .map(|file| async move {
                let result = self.process_one(&file).await;
                (file, result)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut report = BatchReport::default();
        for (source, result) in results {
            match result {
                Ok((output, FileOutcome::Converted { title, blocks })) => {
                    report.converted.push(ConvertedFile {
                        source,
                        output,
                        title,
                        blocks,
                    })
                }
                Ok((_, FileOutcome::Skipped)) => report.skipped.push(source),
                Err(e) => report.failed.push(FailedFile {
                    source,
                    error: format!("{:#}", e),
                }),
            }
        }

        report.converted.sort_by(|a, b| a.source.cmp(&b.source));
        report.skipped.sort();
        report.failed.sort_by(|a, b| a.source.cmp(&b.source));
        Ok(report)
    }

    async fn process_one(&self, file: &Path) -> Result<(PathBuf, FileOutcome)> {
        info!("Parsing: {}", file.display());
        let output = self.source.output_path_for(&self.output_dir, file)?;

        match self.processor.process_file(file, &output).await {
            Ok(outcome) => Ok((output, outcome)),
            Err(e) => {
                let is_parse_error = e
                    .downcast_ref::<ConvertError>()
                    .map(ConvertError::is_parse_error)
                    .unwrap_or(false);
                if is_parse_error {
                    error!("Error parsing {}: {:#}", file.display(), e);
                } else {
                    error!("Error processing {}: {:#}", file.display(), e);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PAGE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<document><section><title>Page</title>
<paragraph>Hello
  world.</paragraph>
<section><title>Install</title><literal_block language="bash">pip install x</literal_block></section>
</section></document>"#;

    #[tokio::test]
    async fn test_process_file_writes_markdown() {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("page.xml");
        let output = temp.path().join("out/nested/page.md");
        fs::write(&input, PAGE).unwrap();

        let outcome = MarkdownProcessor::new()
            .process_file(&input, &output)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            FileOutcome::Converted {
                title: "Page".to_string(),
                blocks: 2
            }
        );
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "# Page\n\nHello world.\n\n## Install\n\n```bash\npip install x\n```\n\n"
        );
    }

    #[tokio::test]
    async fn test_root_table_writes_empty_document() {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("table.xml");
        let output = temp.path().join("table.md");
        fs::write(&input, "<document><table/></document>").unwrap();

        let outcome = MarkdownProcessor::new()
            .process_file(&input, &output)
            .await
            .unwrap();

        assert_eq!(outcome, FileOutcome::Skipped);
        assert_eq!(fs::read_to_string(&output).unwrap(), "# \n\n");
    }

    #[tokio::test]
    async fn test_parse_errors_keep_their_type() {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("broken.xml");
        fs::write(&input, "<document><section>").unwrap();

        let err = MarkdownProcessor::new()
            .process_file(&input, &temp.path().join("broken.md"))
            .await
            .unwrap_err();

        let convert_error = err.downcast_ref::<ConvertError>().unwrap();
        assert!(convert_error.is_parse_error());
        assert!(!temp.path().join("broken.md").exists());
    }

    #[test]
    fn test_report_totals() {
        let report = BatchReport {
            converted: vec![],
            skipped: vec![PathBuf::from("a.xml")],
            failed: vec![FailedFile {
                source: PathBuf::from("b.xml"),
                error: "boom".to_string(),
            }],
        };
        assert_eq!(report.total(), 2);
        assert!(report.has_failures());
        assert!(!BatchReport::default().has_failures());
    }
}
