//! Filename derivation and sanitization
//!
//! A destination filename comes from the URL path's final segment,
//! percent-decoded, then stripped down to characters that are safe on
//! every filesystem we care about. Anything that could reconstruct a path
//! (separators, leading dots) does not survive.

use url::Url;

/// Placeholder used when a URL yields no usable filename
pub const FALLBACK_FILENAME: &str = "downloaded_file";

/// Derives a storage filename from a file URL
///
/// Takes the last path segment, percent-decodes it, and sanitizes the
/// result. An empty result (no path, decoding produced nothing printable)
/// falls back to [`FALLBACK_FILENAME`].
///
/// # Examples
///
/// ```
/// use url::Url;
/// use magpie::download::derive_filename;
///
/// let url = Url::parse("https://example.com/files/Annual%20Report.pdf").unwrap();
/// assert_eq!(derive_filename(&url), "Annual Report.pdf");
///
/// let url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(derive_filename(&url), "downloaded_file");
/// ```
pub fn derive_filename(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or("");

    let decoded = match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        // Invalid percent sequences: keep the raw segment.
        Err(_) => segment.to_string(),
    };

    let cleaned = sanitize_filename(&decoded);
    if cleaned.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned
    }
}

/// Strips a candidate filename down to safe characters
///
/// Retains alphanumerics plus space, dot, underscore and hyphen; every
/// other character is dropped, not replaced. Whitespace is trimmed and
/// leading dots are removed afterwards, so relative-path fragments like
/// `..` cannot survive in any form.
pub fn sanitize_filename(name: &str) -> String {
    let filtered: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-'))
        .collect();

    filtered.trim().trim_start_matches('.').to_string()
}

/// Extracts the extension from a filename, lower-cased with leading dot
///
/// A name without a dot, or with a dot only at position zero, has no
/// extension.
pub fn extension_of(name: &str) -> Option<String> {
    name.rfind('.')
        .filter(|&idx| idx > 0)
        .map(|idx| name[idx..].to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_derive_plain_filename() {
        assert_eq!(
            derive_filename(&url("https://example.com/docs/report.pdf")),
            "report.pdf"
        );
    }

    #[test]
    fn test_derive_percent_decoded() {
        assert_eq!(
            derive_filename(&url("https://example.com/My%20Notes%20v2.docx")),
            "My Notes v2.docx"
        );
    }

    #[test]
    fn test_derive_empty_path_falls_back() {
        assert_eq!(derive_filename(&url("https://example.com/")), FALLBACK_FILENAME);
        assert_eq!(derive_filename(&url("https://example.com")), FALLBACK_FILENAME);
    }

    #[test]
    fn test_derive_all_invalid_chars_falls_back() {
        assert_eq!(
            derive_filename(&url("https://example.com/%2F%2F%2F")),
            FALLBACK_FILENAME
        );
    }

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(sanitize_filename("report_v2 final.pdf"), "report_v2 final.pdf");
        assert_eq!(sanitize_filename("notes-2024.txt"), "notes-2024.txt");
    }

    #[test]
    fn test_sanitize_drops_unsafe_characters() {
        assert_eq!(sanitize_filename("a<b>c:d\"e.pdf"), "abcde.pdf");
        assert_eq!(sanitize_filename("file?.pdf"), "file.pdf");
    }

    #[test]
    fn test_sanitize_strips_path_traversal() {
        // Separators are dropped and leading dots removed, so the result
        // can never escape its category directory.
        assert_eq!(sanitize_filename("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
    }

    #[test]
    fn test_sanitize_trims_whitespace() {
        assert_eq!(sanitize_filename("  padded.pdf  "), "padded.pdf");
    }

    #[test]
    fn test_sanitize_interior_dots_kept() {
        assert_eq!(sanitize_filename("archive.tar.gz"), "archive.tar.gz");
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("report.pdf"), Some(".pdf".to_string()));
        assert_eq!(extension_of("Report.PDF"), Some(".pdf".to_string()));
        assert_eq!(extension_of("archive.tar.gz"), Some(".gz".to_string()));
        assert_eq!(extension_of("downloaded_file"), None);
        assert_eq!(extension_of(".bashrc"), None);
        assert_eq!(extension_of(""), None);
    }
}
