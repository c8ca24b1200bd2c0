//! The origin/destination pair a chunked copy runs against.

use crate::core::identifier::validate_identifier;
use crate::error::{ChunkerError, Result};

/// Origin table, shadow destination table and the columns both share.
///
/// Built once by the surrounding migration and read-only to the chunker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationDescriptor {
    origin: String,
    destination: String,
    columns: Vec<String>,
}

impl MigrationDescriptor {
    /// Create a descriptor from an explicit, ordered list of shared columns.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        columns: Vec<String>,
    ) -> Result<Self> {
        let origin = origin.into();
        let destination = destination.into();

        validate_identifier(&origin)?;
        validate_identifier(&destination)?;
        if origin == destination {
            return Err(ChunkerError::Config(format!(
                "origin and destination must be different tables, got {} for both",
                origin
            )));
        }

        if columns.is_empty() {
            return Err(ChunkerError::Config(format!(
                "{} and {} share no columns",
                origin, destination
            )));
        }
        for column in &columns {
            validate_identifier(column)?;
        }

        Ok(Self {
            origin,
            destination,
            columns,
        })
    }

    /// Create a descriptor from both tables' column lists.
    ///
    /// Shared columns keep the origin table's order; columns dropped from or
    /// added to the destination are left out of the copy.
    pub fn from_intersection(
        origin: impl Into<String>,
        destination: impl Into<String>,
        origin_columns: &[String],
        destination_columns: &[String],
    ) -> Result<Self> {
        let shared = origin_columns
            .iter()
            .filter(|c| destination_columns.contains(c))
            .fold(Vec::new(), |mut acc: Vec<String>, c| {
                if !acc.contains(c) {
                    acc.push(c.clone());
                }
                acc
            });
        Self::new(origin, destination, shared)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Shared columns, in copy order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}
