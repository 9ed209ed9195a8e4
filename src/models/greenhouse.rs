use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    models::{drone::Drone, plan::IrrigationPlan, plant::Plant, Coordinate, Sequence},
};

/// Static topology of one greenhouse: rows, plants, drones and their bindings.
///
/// Drones stored here stay in their zero state; simulation runs work on
/// their own copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Greenhouse {
    pub name: String,
    pub row_count: u32,
    pub positions_per_row: u32,
    pub plants: Sequence<Plant>,
    pub drones: Sequence<Drone>,
    /// Row → drone id. Each row maps to at most one drone.
    pub assignments: BTreeMap<u32, u32>,
    pub plans: Sequence<IrrigationPlan>,
}

impl Greenhouse {
    pub fn new(name: impl Into<String>, row_count: u32, positions_per_row: u32) -> Self {
        Self {
            name: name.into(),
            row_count,
            positions_per_row,
            plants: Sequence::new(),
            drones: Sequence::new(),
            assignments: BTreeMap::new(),
            plans: Sequence::new(),
        }
    }

    pub fn assign_drone_to_row(&mut self, drone_id: u32, row: u32) {
        self.assignments.insert(row, drone_id);
    }

    /// True when `coordinate` lies inside the row/position bounds.
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        (1..=self.row_count).contains(&coordinate.row)
            && coordinate.position < self.positions_per_row
    }

    pub fn plant_at(&self, coordinate: Coordinate) -> Option<&Plant> {
        self.plants.iter().find(|p| p.coordinate() == coordinate)
    }

    pub fn drone_by_id(&self, id: u32) -> Option<&Drone> {
        self.drones.iter().find(|d| d.id == id)
    }

    pub fn plan(&self, index: usize) -> Result<&IrrigationPlan> {
        self.plans.at(index).map_err(|_| {
            Error::not_found(format!("Plan {index} of greenhouse '{}'", self.name))
        })
    }
}
