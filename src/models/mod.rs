use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod configuration;
pub mod document;
pub mod drone;
pub mod greenhouse;
pub mod output;
pub mod plan;
pub mod plant;
pub mod request;
pub mod sequence;

pub use sequence::Sequence;

/// A (row, position) slot in a greenhouse. Rows are 1-based, positions 0-based.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub struct Coordinate {
    pub row: u32,
    pub position: u32,
}

impl Coordinate {
    pub fn new(row: u32, position: u32) -> Self {
        Self { row, position }
    }

    /// Parses a plan reference of the form `H{row}-P{position}`.
    pub fn parse_reference(reference: &str) -> Result<Self, String> {
        let reference = reference.trim();
        let (row_part, position_part) = reference
            .split_once('-')
            .ok_or_else(|| format!("'{reference}' is not of the form H<row>-P<position>"))?;
        let row = row_part
            .trim()
            .strip_prefix(['H', 'h'])
            .and_then(|r| r.parse::<u32>().ok())
            .ok_or_else(|| format!("'{reference}' has an invalid row"))?;
        let position = position_part
            .trim()
            .strip_prefix(['P', 'p'])
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(|| format!("'{reference}' has an invalid position"))?;
        Ok(Self { row, position })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}-P{}", self.row, self.position)
    }
}
