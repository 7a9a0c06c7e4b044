//! Crawl frontier: pending queue plus visited set
//!
//! Breadth-first order falls out of FIFO enqueueing; it is a consequence,
//! not a contract. The frontier is the single deduplication authority for
//! the whole crawl: callers may enqueue the same URL any number of times,
//! but it is accepted at most once, so no URL is ever dequeued twice.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// FIFO frontier over fragment-free URLs
///
/// A URL enters `seen` the moment it is accepted, which subsumes the
/// visited marking: once seen, re-discovery can never re-enqueue it, and
/// a dequeued URL is by construction already marked.
#[derive(Debug, Default)]
pub struct Frontier {
    pending: VecDeque<Url>,
    seen: HashSet<Url>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a URL to the frontier
    ///
    /// The fragment is stripped first, so `.../y#a` and `.../y#b` are the
    /// same frontier entry. Returns true if the URL was accepted, false if
    /// it was already seen.
    pub fn enqueue(&mut self, mut url: Url) -> bool {
        url.set_fragment(None);

        if self.seen.contains(&url) {
            return false;
        }

        self.seen.insert(url.clone());
        self.pending.push_back(url);
        true
    }

    /// Takes the next URL to process
    ///
    /// The returned URL is already marked seen; processing failures leave
    /// it consumed, which is exactly the "skip and continue" policy.
    pub fn dequeue(&mut self) -> Option<Url> {
        self.pending.pop_front()
    }

    /// Number of URLs waiting to be processed
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of distinct URLs ever accepted
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        frontier.enqueue(url("https://example.com/1"));
        frontier.enqueue(url("https://example.com/2"));
        frontier.enqueue(url("https://example.com/3"));

        assert_eq!(frontier.dequeue().unwrap().path(), "/1");
        assert_eq!(frontier.dequeue().unwrap().path(), "/2");
        assert_eq!(frontier.dequeue().unwrap().path(), "/3");
        assert!(frontier.dequeue().is_none());
    }

    #[test]
    fn test_duplicate_enqueue_rejected() {
        let mut frontier = Frontier::new();
        assert!(frontier.enqueue(url("https://example.com/page")));
        assert!(!frontier.enqueue(url("https://example.com/page")));

        assert_eq!(frontier.pending_len(), 1);
        assert!(frontier.dequeue().is_some());
        assert!(frontier.dequeue().is_none());
    }

    #[test]
    fn test_no_url_dequeued_twice() {
        let mut frontier = Frontier::new();
        let mut dequeued = HashSet::new();

        // Re-discover URLs aggressively while draining.
        for i in 0..10 {
            frontier.enqueue(url(&format!("https://example.com/{}", i % 3)));
        }
        while let Some(u) = frontier.dequeue() {
            assert!(dequeued.insert(u.clone()), "{} dequeued twice", u);
            frontier.enqueue(u);
        }

        assert_eq!(dequeued.len(), 3);
    }

    #[test]
    fn test_re_enqueue_after_dequeue_rejected() {
        let mut frontier = Frontier::new();
        frontier.enqueue(url("https://example.com/page"));
        let taken = frontier.dequeue().unwrap();

        assert!(!frontier.enqueue(taken));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_fragment_variants_are_one_entry() {
        let mut frontier = Frontier::new();
        assert!(frontier.enqueue(url("https://x.test/y#a")));
        assert!(!frontier.enqueue(url("https://x.test/y#b")));
        assert!(!frontier.enqueue(url("https://x.test/y")));

        let taken = frontier.dequeue().unwrap();
        assert_eq!(taken.as_str(), "https://x.test/y");
        assert_eq!(taken.fragment(), None);
    }

    #[test]
    fn test_counts() {
        let mut frontier = Frontier::new();
        frontier.enqueue(url("https://example.com/a"));
        frontier.enqueue(url("https://example.com/b"));
        frontier.dequeue();

        assert_eq!(frontier.pending_len(), 1);
        assert_eq!(frontier.seen_count(), 2);
        assert!(!frontier.is_empty());
    }
}
