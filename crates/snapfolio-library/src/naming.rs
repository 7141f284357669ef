// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filename allocation for stored images.
//
// Names are `<millisecond-timestamp>.<ext>`.  The allocator never hands out
// the same tag twice within a process: when the clock has not moved past the
// last issued tag, the next tag is `last + 1`.  Tags already on disk are fed
// back through `observe`, so a clock that moved backwards between runs does
// not reuse them.  Collisions with files written by another process are
// caught by the storage layer's create-new open.

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Hands out unique, monotonically increasing filename tags.
#[derive(Debug)]
pub struct NameAllocator {
    extension: String,
    last_tag: AtomicI64,
}

impl NameAllocator {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            last_tag: AtomicI64::new(0),
        }
    }

    /// Record a tag that is already in use; later tags will be greater.
    pub fn observe(&self, tag: u64) {
        let tag = i64::try_from(tag).map_or(i64::MAX - 1, |t| t.min(i64::MAX - 1));
        self.last_tag.fetch_max(tag, Ordering::AcqRel);
    }

    /// Allocate the next filename using the current wall clock.
    pub fn next_name(&self) -> String {
        let tag = self.next_tag(Utc::now().timestamp_millis());
        format!("{tag}.{}", self.extension)
    }

    /// Allocate a tag no smaller than `now_ms` and strictly greater than any
    /// tag issued before.
    fn next_tag(&self, now_ms: i64) -> i64 {
        let mut last = self.last_tag.load(Ordering::Acquire);
        loop {
            let candidate = now_ms.max(last + 1);
            match self.last_tag.compare_exchange_weak(
                last,
                candidate,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

/// Numeric tag of a stored filename, if its stem is one.
pub fn parse_tag(file_name: &str) -> Option<u64> {
    let stem = file_name.split_once('.').map_or(file_name, |(stem, _)| stem);
    stem.parse().ok()
}

/// Listing order: numeric tags ascending, then other names lexicographically.
pub fn compare_names(a: &str, b: &str) -> CmpOrdering {
    match (parse_tag(a), parse_tag(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => CmpOrdering::Less,
        (None, Some(_)) => CmpOrdering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_millisecond_yields_distinct_tags() {
        let alloc = NameAllocator::new("jpg");
        let a = alloc.next_tag(1_000);
        let b = alloc.next_tag(1_000);
        let c = alloc.next_tag(1_000);
        assert_eq!((a, b, c), (1_000, 1_001, 1_002));
    }

    #[test]
    fn clock_going_backwards_stays_monotonic() {
        let alloc = NameAllocator::new("jpg");
        assert_eq!(alloc.next_tag(5_000), 5_000);
        assert_eq!(alloc.next_tag(4_000), 5_001);
        assert_eq!(alloc.next_tag(9_000), 9_000);
    }

    #[test]
    fn observed_tags_are_never_reissued() {
        let alloc = NameAllocator::new("jpg");
        alloc.observe(7_000);
        alloc.observe(3_000);
        assert_eq!(alloc.next_tag(5_000), 7_001);
    }

    #[test]
    fn name_has_timestamp_and_extension() {
        let alloc = NameAllocator::new("jpg");
        let name = alloc.next_name();
        assert!(name.ends_with(".jpg"));
        assert!(parse_tag(&name).is_some_and(|t| t > 1_600_000_000_000));
    }

    #[test]
    fn numeric_names_sort_numerically() {
        let mut names = vec!["notes.txt", "1000.jpg", "999.jpg", "abc.jpg"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["999.jpg", "1000.jpg", "abc.jpg", "notes.txt"]);
    }
}
