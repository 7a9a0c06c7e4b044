//! File category classification
//!
//! Maps a file extension to the storage bucket a downloaded file is routed
//! into. The mapping is a closed table: every extension resolves to exactly
//! one category, with [`Category::Others`] as the exhaustive fallback.

/// Storage bucket for a downloaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// PDF documents
    Pdf,
    /// Text documents (doc, docx, txt, rtf)
    Docs,
    /// Presentations (ppt, pptx)
    Ppt,
    /// Spreadsheets (xls, xlsx, csv)
    Xls,
    /// Archives (zip, rar, 7z, tar, gz)
    Zip,
    /// Images (jpg, jpeg, png, gif, bmp, svg)
    Images,
    /// Anything not matched above
    Others,
}

/// Extensions belonging to each category, lower-cased with leading dot.
///
/// `Others` is intentionally absent: it has no extensions of its own and
/// catches everything the table does not cover.
const EXTENSION_TABLE: &[(Category, &[&str])] = &[
    (Category::Pdf, &[".pdf"]),
    (Category::Docs, &[".doc", ".docx", ".txt", ".rtf"]),
    (Category::Ppt, &[".ppt", ".pptx"]),
    (Category::Xls, &[".xls", ".xlsx", ".csv"]),
    (Category::Zip, &[".zip", ".rar", ".7z", ".tar", ".gz"]),
    (
        Category::Images,
        &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg"],
    ),
];

impl Category {
    /// Every category, in storage-layout order.
    ///
    /// Used to bootstrap the on-disk directory structure.
    pub const ALL: &'static [Category] = &[
        Category::Pdf,
        Category::Docs,
        Category::Ppt,
        Category::Xls,
        Category::Zip,
        Category::Images,
        Category::Others,
    ];

    /// Classifies a file extension into a category
    ///
    /// The input is expected lower-cased with its leading dot (e.g. ".pdf").
    /// This is a total function: any string, including the empty string,
    /// maps to exactly one category.
    ///
    /// # Examples
    ///
    /// ```
    /// use magpie::Category;
    ///
    /// assert_eq!(Category::from_extension(".pdf"), Category::Pdf);
    /// assert_eq!(Category::from_extension(".docx"), Category::Docs);
    /// assert_eq!(Category::from_extension(".xyz"), Category::Others);
    /// ```
    pub fn from_extension(extension: &str) -> Category {
        for (category, extensions) in EXTENSION_TABLE {
            if extensions.contains(&extension) {
                return *category;
            }
        }
        Category::Others
    }

    /// Directory name for this category under the download root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Pdf => "pdf",
            Category::Docs => "docs",
            Category::Ppt => "ppt",
            Category::Xls => "xls",
            Category::Zip => "zip",
            Category::Images => "images",
            Category::Others => "others",
        }
    }

    /// All extensions that classify into this category
    ///
    /// Returns an empty slice for `Others`, which is defined by exclusion.
    pub fn extensions(&self) -> &'static [&'static str] {
        EXTENSION_TABLE
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, extensions)| *extensions)
            .unwrap_or(&[])
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}
