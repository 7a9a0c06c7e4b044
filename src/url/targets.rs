use crate::category::Category;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Named bundles of target extensions
///
/// These correspond to the crawl modes a caller can pick without listing
/// extensions explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// PDF files only
    Pdf,
    /// Documents, presentations, spreadsheets and archives
    Documents,
    /// Every extension the category table knows, including images
    Everything,
}

impl Mode {
    /// Builds the target set for this mode
    pub fn target_set(&self) -> TargetSet {
        let categories: &[Category] = match self {
            Mode::Pdf => &[Category::Pdf],
            Mode::Documents => &[Category::Docs, Category::Ppt, Category::Xls, Category::Zip],
            Mode::Everything => Category::ALL,
        };

        let extensions = categories
            .iter()
            .flat_map(|c| c.extensions().iter().copied());
        TargetSet::from_extensions(extensions)
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Mode::Pdf),
            "documents" | "docs" => Ok(Mode::Documents),
            "everything" | "all" => Ok(Mode::Everything),
            other => Err(format!(
                "unknown mode '{}' (expected pdf, documents or everything)",
                other
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Pdf => "pdf",
            Mode::Documents => "documents",
            Mode::Everything => "everything",
        };
        f.write_str(name)
    }
}

/// The set of file extensions a crawl should download
///
/// Extensions are stored lower-cased with their leading dot. Matching is a
/// case-insensitive suffix check against a URL's path, so query strings and
/// fragments never influence the decision.
#[derive(Debug, Clone)]
pub struct TargetSet {
    extensions: Vec<String>,
}

impl TargetSet {
    /// Builds a target set from an iterator of extensions
    ///
    /// Each entry is lower-cased and gets a leading dot if missing, so
    /// "PDF", "pdf" and ".pdf" all normalize to ".pdf". Duplicates are
    /// collapsed.
    pub fn from_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim().to_lowercase();
            if ext.is_empty() || ext == "." {
                continue;
            }
            let ext = if ext.starts_with('.') {
                ext
            } else {
                format!(".{}", ext)
            };
            if !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }
        Self {
            extensions: normalized,
        }
    }

    /// Returns true if the URL's path ends with one of the target extensions
    ///
    /// The comparison is case-insensitive on the path only.
    pub fn matches_url(&self, url: &Url) -> bool {
        let path = url.path().to_lowercase();
        self.extensions.iter().any(|ext| path.ends_with(ext))
    }

    /// Returns true if any target extension classifies as an image
    ///
    /// When this holds, the extractor additionally scans image-source
    /// attributes.
    pub fn includes_images(&self) -> bool {
        self.extensions
            .iter()
            .any(|ext| Category::from_extension(ext) == Category::Images)
    }

    /// The normalized extensions in this set
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}
