use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// A directory of docutils XML files produced by a documentation build
pub struct XmlSource {
    root: PathBuf,
}

impl XmlSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_owned(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All `.xml` files below the root, in sorted order
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(anyhow!(
                "Input directory does not exist: {}",
                self.root.display()
            ));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Cannot read directory entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() && Self::is_xml_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Where the Markdown for `file` goes: same relative path under `output_dir`, `.md` extension
    pub fn output_path_for(&self, output_dir: &Path, file: &Path) -> Result<PathBuf> {
        let relative = file.strip_prefix(&self.root)?;
        Ok(output_dir.join(relative).with_extension("md"))
    }

    fn is_xml_file(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("xml"))
            .unwrap_or(false)
    }
}
