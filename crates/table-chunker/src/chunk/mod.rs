//! Primary-key window planning.
//!
//! A [`ChunkPlan`] splits the inclusive key range `[start, limit]` into
//! windows of `stride` keys:
//!
//! ```text
//! low(n)  = (n - 1) * stride + start
//! high(n) = min(n * stride + start - 1, limit)
//! ```
//!
//! Windows `1..=count()` are contiguous, never overlap and cover the range
//! exactly; the last window is clamped to `limit`. Arithmetic is carried out
//! in `i128` so ranges touching the ends of `i64` do not overflow.

use std::iter::FusedIterator;

use crate::config::validation::validate_bounds;
use crate::error::{ChunkerError, Result};

/// One primary-key window. `index` is 1-based and `low..=high` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkRange {
    pub index: u64,
    pub low: i64,
    pub high: i64,
}

impl ChunkRange {
    /// Number of keys the window spans.
    pub fn width(&self) -> u64 {
        (self.high as i128 - self.low as i128 + 1) as u64
    }
}

fn window_count(start: i64, limit: i64, stride: i64) -> i128 {
    let span = limit as i128 - start as i128 + 1;
    let stride = stride as i128;
    (span + stride - 1) / stride
}

/// Window layout over an optional key range.
///
/// A plan without bounds (empty origin table) has zero chunks. Plans are
/// `Copy`, so iteration can be restarted at will.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    bounds: Option<(i64, i64)>,
    stride: i64,
    /// Index of the chunk preceding this plan's first chunk.
    offset: u64,
}

impl ChunkPlan {
    /// Plan windows over `[start, limit]`.
    ///
    /// Fails when `stride < 1`, when both bounds are present with
    /// `start > limit`, or when the windows would not fit in a `u64` count
    /// (the whole `i64` range with stride 1). A missing bound yields an empty
    /// plan.
    pub fn new(start: Option<i64>, limit: Option<i64>, stride: i64) -> Result<Self> {
        if stride < 1 {
            return Err(ChunkerError::Config(format!(
                "stride must be at least 1, got {}",
                stride
            )));
        }
        validate_bounds(start, limit)?;
        if let Some((start, limit)) = start.zip(limit) {
            if window_count(start, limit, stride) > u64::MAX as i128 {
                return Err(ChunkerError::Config(format!(
                    "ids {}..={} in windows of {} exceed {} chunks",
                    start,
                    limit,
                    stride,
                    u64::MAX
                )));
            }
        }

        Ok(Self {
            bounds: start.zip(limit),
            stride,
            offset: 0,
        })
    }

    /// Plan the keys after `copied` with a new stride.
    ///
    /// Chunk indices continue from `copied.index`, so the combined sequence
    /// stays strictly increasing.
    pub fn replan(&self, copied: &ChunkRange, stride: i64) -> Result<Self> {
        let limit = self.limit();
        let start = match limit {
            Some(limit) if copied.high < limit => Some(copied.high + 1),
            _ => None,
        };

        let mut plan = Self::new(start, limit.filter(|_| start.is_some()), stride)?;
        plan.offset = copied.index;
        Ok(plan)
    }

    pub fn start(&self) -> Option<i64> {
        self.bounds.map(|(start, _)| start)
    }

    pub fn limit(&self) -> Option<i64> {
        self.bounds.map(|(_, limit)| limit)
    }

    pub fn stride(&self) -> i64 {
        self.stride
    }

    /// Number of windows, `ceil((limit - start + 1) / stride)`, or 0 without bounds.
    pub fn count(&self) -> u64 {
        match self.bounds {
            Some((start, limit)) => window_count(start, limit, self.stride) as u64,
            None => 0,
        }
    }

    /// The `n`th window of this plan (1-based), or `None` past the end.
    pub fn chunk(&self, n: u64) -> Option<ChunkRange> {
        let (start, limit) = self.bounds?;
        if n == 0 || n > self.count() {
            return None;
        }

        let stride = self.stride as i128;
        let low = (n as i128 - 1) * stride + start as i128;
        let high = (n as i128 * stride + start as i128 - 1).min(limit as i128);

        Some(ChunkRange {
            index: self.offset + n,
            low: low as i64,
            high: high as i64,
        })
    }

    /// Iterate the windows in increasing order.
    pub fn iter(&self) -> ChunkIter {
        ChunkIter {
            plan: *self,
            next: 1,
        }
    }
}

impl IntoIterator for &ChunkPlan {
    type Item = ChunkRange;
    type IntoIter = ChunkIter;

    fn into_iter(self) -> ChunkIter {
        self.iter()
    }
}

/// Iterator over the windows of a [`ChunkPlan`].
#[derive(Debug, Clone)]
pub struct ChunkIter {
    plan: ChunkPlan,
    next: u64,
}

impl Iterator for ChunkIter {
    type Item = ChunkRange;

    fn next(&mut self) -> Option<ChunkRange> {
        let chunk = self.plan.chunk(self.next)?;
        self.next += 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.plan.count().saturating_sub(self.next - 1);
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for ChunkIter {}
