use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::plant::Plant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub enum DroneStatus {
    #[default]
    Waiting,
    Moving,
    Watering,
    Finished,
}

/// An irrigation drone. Confined to the row it is assigned to for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub id: u32,
    pub name: String,
    pub position: u32,
    pub assigned_row: Option<u32>,
    pub water_liters: f64,
    pub fertilizer_grams: f64,
    pub visited: Vec<Plant>,
    pub status: DroneStatus,
}

impl Drone {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: 0,
            assigned_row: None,
            water_liters: 0.0,
            fertilizer_grams: 0.0,
            visited: Vec::new(),
            status: DroneStatus::Waiting,
        }
    }

    /// Returns the drone to its zero state, including the row binding.
    pub fn reset(&mut self) {
        self.position = 0;
        self.assigned_row = None;
        self.water_liters = 0.0;
        self.fertilizer_grams = 0.0;
        self.visited.clear();
        self.status = DroneStatus::Waiting;
    }

    pub fn step_forward(&mut self) {
        self.position += 1;
        self.status = DroneStatus::Moving;
    }

    pub fn step_back(&mut self) {
        self.position = self.position.saturating_sub(1);
        self.status = DroneStatus::Moving;
    }

    /// Waters `plant`. The caller must have placed the drone on the plant.
    pub fn water(&mut self, plant: &Plant) {
        debug_assert_eq!(self.assigned_row, Some(plant.row));
        debug_assert_eq!(self.position, plant.position);
        self.water_liters += plant.water_liters;
        self.fertilizer_grams += plant.fertilizer_grams;
        self.visited.push(plant.clone());
        self.status = DroneStatus::Watering;
    }

    pub fn finish(&mut self) {
        self.status = DroneStatus::Finished;
    }

    pub fn is_finished(&self) -> bool {
        self.status == DroneStatus::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tomato() -> Plant {
        Plant::new(1, 2, 1.5, 100.0, "tomate")
    }

    #[test]
    fn test_water_accumulates_resources() {
        let mut drone = Drone::new(1, "DR01");
        drone.assigned_row = Some(1);
        drone.position = 2;
        drone.water(&tomato());
        drone.water(&tomato());
        assert_eq!(drone.water_liters, 3.0);
        assert_eq!(drone.fertilizer_grams, 200.0);
        assert_eq!(drone.visited.len(), 2);
        assert_eq!(drone.status, DroneStatus::Watering);
    }

    #[test]
    fn test_reset_returns_to_zero_state() {
        let mut drone = Drone::new(7, "DR07");
        drone.assigned_row = Some(1);
        drone.position = 2;
        drone.water(&tomato());
        drone.finish();

        drone.reset();
        assert_eq!(drone, Drone::new(7, "DR07"));
    }

    #[test]
    fn test_step_back_never_goes_below_zero() {
        let mut drone = Drone::new(1, "DR01");
        drone.step_back();
        assert_eq!(drone.position, 0);
        drone.step_forward();
        drone.step_forward();
        drone.step_back();
        assert_eq!(drone.position, 1);
        assert_eq!(drone.status, DroneStatus::Moving);
    }
}
