//! Option validation.

use super::ChunkerOptions;
use crate::error::{ChunkerError, Result};

/// Validate the options.
pub fn validate(options: &ChunkerOptions) -> Result<()> {
    if options.stride < 1 {
        return Err(ChunkerError::Config(format!(
            "stride must be at least 1, got {}",
            options.stride
        )));
    }

    validate_bounds(options.start, options.limit)
}

/// Reject impossible chunk bounds. Absent bounds are always acceptable.
pub(crate) fn validate_bounds(start: Option<i64>, limit: Option<i64>) -> Result<()> {
    if let (Some(start), Some(limit)) = (start, limit) {
        if start > limit {
            return Err(ChunkerError::Config(format!(
                "impossible chunk options (limit must be greater than start): start={}, limit={}",
                start, limit
            )));
        }
    }
    Ok(())
}
