use serde::{Deserialize, Serialize};

use crate::models::{Coordinate, Sequence};

/// A named, globally ordered list of plants to water.
///
/// Entries reference plants of the owning greenhouse by coordinate. The order
/// is the mandatory watering order and may interleave rows freely; repeated
/// coordinates are watered once per occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationPlan {
    pub name: String,
    pub sequence: Sequence<Coordinate>,
}

impl IrrigationPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequence: Sequence::new(),
        }
    }

    pub fn with_sequence(name: impl Into<String>, sequence: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
