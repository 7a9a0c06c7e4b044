use url::Url;

/// Resolves a reference attribute value to an absolute URL
///
/// Applies standard URL-joining rules against `base`, then strips any
/// fragment component, since fragments do not denote distinct resources.
///
/// Returns None if the reference should be excluded:
/// - empty or fragment-only references (same-page anchors)
/// - `javascript:`, `mailto:`, `tel:` schemes and data URIs
/// - references that fail to resolve
/// - non-HTTP(S) URLs after resolution
///
/// # Examples
///
/// ```
/// use url::Url;
/// use magpie::url::resolve_reference;
///
/// let base = Url::parse("https://example.com/dir/page.html").unwrap();
/// let resolved = resolve_reference("../doc.pdf#page=2", &base).unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/doc.pdf");
/// ```
pub fn resolve_reference(reference: &str, base: &Url) -> Option<Url> {
    let reference = reference.trim();

    if reference.is_empty() {
        return None;
    }

    // Skip special schemes
    if reference.starts_with("javascript:")
        || reference.starts_with("mailto:")
        || reference.starts_with("tel:")
        || reference.starts_with("data:")
    {
        return None;
    }

    // Skip fragment-only references (same page anchors)
    if reference.starts_with('#') {
        return None;
    }

    match base.join(reference) {
        Ok(mut absolute) => {
            if absolute.scheme() != "http" && absolute.scheme() != "https" {
                return None;
            }
            absolute.set_fragment(None);
            Some(absolute)
        }
        Err(_) => None,
    }
}
