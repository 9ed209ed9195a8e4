use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

/// A watering target. Immutable once loaded; identified by its coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub row: u32,
    pub position: u32,
    pub water_liters: f64,
    pub fertilizer_grams: f64,
    pub label: String,
}

impl Plant {
    pub fn new(
        row: u32,
        position: u32,
        water_liters: f64,
        fertilizer_grams: f64,
        label: impl Into<String>,
    ) -> Self {
        Self {
            row,
            position,
            water_liters,
            fertilizer_grams,
            label: label.into(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.row, self.position)
    }

    /// Label used when the configuration leaves a plant unnamed.
    pub fn default_label(row: u32, position: u32) -> String {
        format!("Planta H{row}P{position}")
    }
}
