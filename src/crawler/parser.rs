//! HTML reference extraction
//!
//! Parses a fetched page once and partitions every discovered reference
//! into crawlable internal pages and downloadable target files. The
//! extractor is pure: it holds no visited state and may emit duplicates;
//! the frontier is the single deduplication authority.

use crate::url::{extract_domain, resolve_reference, TargetSet};
use scraper::{Html, Selector};
use url::Url;

/// References extracted from one page
#[derive(Debug, Clone, Default)]
pub struct ExtractedRefs {
    /// Same-domain page URLs, in document order
    pub crawl_links: Vec<Url>,

    /// Target-file URLs, in document order
    pub downloads: Vec<Url>,
}

/// Extracts and classifies references from an HTML document
///
/// Anchor-like tags (`a[href]`, `link[href]`) are scanned first; when the
/// target set contains image extensions, `img[src]` is scanned as well.
/// Each reference is resolved against `current_url` and its fragment is
/// stripped, then classified in priority order:
///
/// 1. Path suffix matches a target extension -> download candidate. This
///    fires before the domain check, so files hosted off-domain are still
///    collected.
/// 2. Host equals `domain` -> crawl candidate.
/// 3. Anything else is discarded.
///
/// Image sources only ever match rule 1; an image URL is never a crawl
/// candidate. Malformed HTML degrades to however much the parser could
/// recover, never to an error.
pub fn extract_references(
    html: &str,
    current_url: &Url,
    targets: &TargetSet,
    domain: &str,
) -> ExtractedRefs {
    let document = Html::parse_document(html);
    let mut refs = ExtractedRefs::default();

    if let Ok(selector) = Selector::parse("a[href], link[href]") {
        for element in document.select(&selector) {
            let href = element
                .value()
                .attr("href")
                .and_then(|href| resolve_reference(href, current_url));

            if let Some(resolved) = href {
                classify(resolved, targets, domain, &mut refs);
            }
        }
    }

    if targets.includes_images() {
        if let Ok(selector) = Selector::parse("img[src]") {
            for element in document.select(&selector) {
                let src = element
                    .value()
                    .attr("src")
                    .and_then(|src| resolve_reference(src, current_url));

                if let Some(resolved) = src {
                    if targets.matches_url(&resolved) {
                        refs.downloads.push(resolved);
                    }
                }
            }
        }
    }

    refs
}

fn classify(resolved: Url, targets: &TargetSet, domain: &str, refs: &mut ExtractedRefs) {
    if targets.matches_url(&resolved) {
        refs.downloads.push(resolved);
    } else if extract_domain(&resolved).as_deref() == Some(domain) {
        refs.crawl_links.push(resolved);
    }
    // else: external page, discarded
}
