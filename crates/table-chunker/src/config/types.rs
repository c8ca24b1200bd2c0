//! Chunker option type definitions.

use serde::{Deserialize, Serialize};

/// Default primary-key window width.
pub const DEFAULT_STRIDE: i64 = 40_000;

/// Default delay between chunks, in milliseconds.
pub const DEFAULT_THROTTLE_MS: u64 = 100;

/// Tunables for one chunked copy run.
///
/// `start` and `limit` are optional: when unset they are resolved from
/// `min(id)` / `max(id)` of the origin table when the chunker is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerOptions {
    /// Width of each primary-key window (default: 40000).
    #[serde(default = "default_stride")]
    pub stride: i64,

    /// Delay after each chunk that copied rows, in milliseconds (default: 100).
    #[serde(default = "default_throttle_ms", alias = "throttle")]
    pub throttle_ms: u64,

    /// First primary key to copy (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,

    /// Last primary key to copy (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl Default for ChunkerOptions {
    fn default() -> Self {
        Self {
            stride: DEFAULT_STRIDE,
            throttle_ms: DEFAULT_THROTTLE_MS,
            start: None,
            limit: None,
        }
    }
}

impl ChunkerOptions {
    pub fn with_stride(mut self, stride: i64) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }

    pub fn with_start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

fn default_stride() -> i64 {
    DEFAULT_STRIDE
}

fn default_throttle_ms() -> u64 {
    DEFAULT_THROTTLE_MS
}
