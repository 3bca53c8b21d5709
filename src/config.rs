use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub max_concurrent_files: usize,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathConfig,
    pub processing: ProcessingConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let paths = PathConfig {
            input_dir: env::var("DOCS_XML_DIR")
                .unwrap_or_else(|_| "docs/_build/xml".to_string())
                .into(),
            output_dir: env::var("MD_OUTPUT_DIR")
                .unwrap_or_else(|_| "md_docs".to_string())
                .into(),
        };

        let processing = ProcessingConfig {
            max_concurrent_files: env::var("MAX_CONCURRENT_FILES")
                .unwrap_or_else(|_| "4".to_string())
                .parse::<usize>()
                .unwrap_or(4)
                .max(1),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        Ok(Self { paths, processing })
    }
}
