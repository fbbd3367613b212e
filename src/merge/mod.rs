//! Record normalization for merged dependency trees
//!
//! Applies the relocation rule in [`rewrite`] to each record of a flat file
//! list. Records are processed independently; kept records stay in their
//! original relative order.

use rayon::prelude::*;

use crate::domain::{Layout, MergeStats, Outcome, PathRecord};
use crate::utils::normalize_separators;

pub mod rewrite;

pub use rewrite::{rewrite_path, PathRewriter};

/// Applies the relocation rule to whole record lists.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    rewriter: PathRewriter,
    normalize_separators: bool,
}

impl Merger {
    pub fn new(layout: &Layout) -> Self {
        Self { rewriter: PathRewriter::new(layout), normalize_separators: false }
    }

    /// Convert `\` separators to `/` before matching.
    pub fn normalize_separators(mut self, enabled: bool) -> Self {
        self.normalize_separators = enabled;
        self
    }

    fn apply<R: PathRecord>(&self, mut record: R) -> (Option<R>, Outcome) {
        if self.normalize_separators && record.path().contains('\\') {
            let fixed = normalize_separators(record.path()).into_owned();
            record.set_path(fixed);
        }

        let outcome = self.rewriter.decide(record.path()).outcome;
        let kept = match &outcome {
            Outcome::Unchanged => Some(record),
            Outcome::Relocated(new_path) => {
                tracing::trace!(from = record.path(), to = new_path.as_str(), "relocated");
                record.set_path(new_path.clone());
                Some(record)
            }
            Outcome::Dropped => {
                tracing::debug!(path = record.path(), "dropping non-dependency sibling file");
                None
            }
        };
        (kept, outcome)
    }

    /// Normalize `records` in order, returning the kept records and counters.
    pub fn normalize<R, I>(&self, records: I) -> (Vec<R>, MergeStats)
    where
        R: PathRecord,
        I: IntoIterator<Item = R>,
    {
        let mut stats = MergeStats::default();
        let mut kept = Vec::new();
        for record in records {
            let (record, outcome) = self.apply(record);
            stats.record(&outcome);
            kept.extend(record);
        }
        tracing::debug!(
            total = stats.total,
            relocated = stats.relocated,
            dropped = stats.dropped,
            "normalized records"
        );
        (kept, stats)
    }

    /// Same as [`Merger::normalize`], spread across the rayon pool.
    pub fn normalize_par<R>(&self, records: Vec<R>) -> (Vec<R>, MergeStats)
    where
        R: PathRecord + Send,
    {
        let applied: Vec<(Option<R>, Outcome)> =
            records.into_par_iter().map(|record| self.apply(record)).collect();

        let mut stats = MergeStats::default();
        let mut kept = Vec::with_capacity(applied.len());
        for (record, outcome) in applied {
            stats.record(&outcome);
            kept.extend(record);
        }
        tracing::debug!(
            total = stats.total,
            relocated = stats.relocated,
            dropped = stats.dropped,
            "normalized records in parallel"
        );
        (kept, stats)
    }
}

/// Normalize `records` under `layout`, dropping sibling non-dependency files.
pub fn normalize<R, I>(records: I, layout: &Layout) -> Vec<R>
where
    R: PathRecord,
    I: IntoIterator<Item = R>,
{
    Merger::new(layout).normalize(records).0
}

pub fn normalize_with_stats<R, I>(records: I, layout: &Layout) -> (Vec<R>, MergeStats)
where
    R: PathRecord,
    I: IntoIterator<Item = R>,
{
    Merger::new(layout).normalize(records)
}

pub fn normalize_par<R>(records: Vec<R>, layout: &Layout) -> Vec<R>
where
    R: PathRecord + Send,
{
    Merger::new(layout).normalize_par(records).0
}
