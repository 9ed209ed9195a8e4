//! Turn-based irrigation scheduler.
//!
//! Every tick runs the same phases in a fixed order:
//! 1. every unfinished drone steps one position toward its next plant in the plan;
//! 2. the plan's next-due plant is watered if its drone now stands on it, which
//!    turns every other action of the tick into a wait;
//! 3. drones with nothing left in their row head back to position 0 and finish there;
//! 4. the actions and a snapshot of every drone are recorded.
//!
//! Drones move simultaneously but at most one plant is watered per tick.

use std::{cmp::Ordering, collections::BTreeMap, fmt};

use log::{debug, info, warn};
use serde::{Serialize, Serializer};

use crate::{
    error::{Error, Result},
    models::{
        drone::{Drone, DroneStatus},
        greenhouse::Greenhouse,
        plan::IrrigationPlan,
        plant::Plant,
        Coordinate,
    },
};

/// Hard ceiling on the number of ticks of a single run.
pub const MAX_TICKS: u32 = 100;

/// What a drone does during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Wait,
    /// Moved one position up the row, to the given slot.
    Forward(Coordinate),
    /// Moved one position down the row, to the given slot.
    Back(Coordinate),
    Water,
    Finish,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Wait => f.write_str("Esperar"),
            Action::Forward(c) => write!(f, "Adelante(H{}P{})", c.row, c.position),
            Action::Back(c) => write!(f, "Atrás(H{}P{})", c.row, c.position),
            Action::Water => f.write_str("Regar"),
            Action::Finish => f.write_str("FIN"),
        }
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroneAction {
    pub drone: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroneSnapshot {
    pub name: String,
    pub position: u32,
    pub status: DroneStatus,
}

/// One entry of the trace: the action of every drone and where it stood afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickRecord {
    pub tick: u32,
    pub actions: Vec<DroneAction>,
    pub drones: Vec<DroneSnapshot>,
}

impl TickRecord {
    pub fn action_of(&self, drone: &str) -> Option<Action> {
        self.actions
            .iter()
            .find(|a| a.drone == drone)
            .map(|a| a.action)
    }

    pub fn snapshot_of(&self, drone: &str) -> Option<&DroneSnapshot> {
        self.drones.iter().find(|d| d.name == drone)
    }

    pub fn waterings(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| a.action == Action::Water)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroneUsage {
    pub name: String,
    pub water_liters: f64,
    pub fertilizer_grams: f64,
    /// Plants watered by this drone, in watering order.
    pub watered: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub water_liters: f64,
    pub fertilizer_grams: f64,
    pub drones: Vec<DroneUsage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RunOutcome {
    #[serde(rename_all = "camelCase")]
    Completed { total_ticks: u32 },
    LimitExceeded { ceiling: u32 },
}

/// Tick-by-drone grid of action strings, in greenhouse drone order.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionTable {
    pub drones: Vec<String>,
    pub rows: Vec<ActionRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionRow {
    pub tick: u32,
    pub actions: Vec<String>,
}

/// Immutable result of one simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRun {
    pub greenhouse: String,
    pub plan: String,
    pub outcome: RunOutcome,
    pub ticks: Vec<TickRecord>,
    /// Every watered plant, in watering order.
    pub watered: Vec<Coordinate>,
    pub statistics: Statistics,
}

impl SimulationRun {
    /// Total time in ticks, or `LimitExceeded` when the run was cut short.
    pub fn total_time(&self) -> Result<u32> {
        match self.outcome {
            RunOutcome::Completed { total_ticks } => Ok(total_ticks),
            RunOutcome::LimitExceeded { ceiling } => Err(Error::LimitExceeded { ceiling }),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, RunOutcome::Completed { .. })
    }

    /// The record of exactly tick `tick`.
    pub fn tick(&self, tick: u32) -> Result<&TickRecord> {
        self.ticks
            .iter()
            .find(|t| t.tick == tick)
            .ok_or_else(|| Error::not_found(format!("Tick {tick}")))
    }

    pub fn action_table(&self) -> ActionTable {
        let drones: Vec<String> = self
            .statistics
            .drones
            .iter()
            .map(|d| d.name.clone())
            .collect();
        let rows = self
            .ticks
            .iter()
            .map(|record| ActionRow {
                tick: record.tick,
                actions: drones
                    .iter()
                    .map(|name| record.action_of(name).unwrap_or(Action::Wait).to_string())
                    .collect(),
            })
            .collect();
        ActionTable { drones, rows }
    }
}

/// Runs one plan against one greenhouse.
pub struct Simulator<'a> {
    greenhouse: &'a Greenhouse,
    plan: &'a IrrigationPlan,
    max_ticks: u32,
}

impl<'a> Simulator<'a> {
    pub fn new(greenhouse: &'a Greenhouse, plan: &'a IrrigationPlan) -> Self {
        Self {
            greenhouse,
            plan,
            max_ticks: MAX_TICKS,
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: u32) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn run(&self) -> Result<SimulationRun> {
        let greenhouse = self.greenhouse;
        let targets = self.targets()?;
        info!(
            "Simulating plan '{}' on greenhouse '{}' ({} plant(s), {} drone(s))",
            self.plan.name,
            greenhouse.name,
            targets.len(),
            greenhouse.drones.len()
        );

        let mut state = RunState::new(greenhouse, targets);
        let mut ticks = Vec::new();
        let mut tick = 1;
        while !state.is_done() && tick <= self.max_ticks {
            let record = state.step(tick);
            debug!("t{tick}: {}", describe(&record));
            ticks.push(record);
            tick += 1;
        }

        let outcome = if state.is_done() {
            RunOutcome::Completed {
                total_ticks: tick - 1,
            }
        } else {
            warn!(
                "Plan '{}' on greenhouse '{}' hit the {}-tick ceiling; forcing every drone to finish",
                self.plan.name, greenhouse.name, self.max_ticks
            );
            ticks.push(state.force_finish(tick));
            RunOutcome::LimitExceeded {
                ceiling: self.max_ticks,
            }
        };

        let statistics = state.statistics();
        info!(
            "Plan '{}' done: {:?}, {} L water, {} g fertilizer",
            self.plan.name, outcome, statistics.water_liters, statistics.fertilizer_grams
        );
        Ok(SimulationRun {
            greenhouse: greenhouse.name.clone(),
            plan: self.plan.name.clone(),
            outcome,
            ticks,
            watered: state.watered,
            statistics,
        })
    }

    fn targets(&self) -> Result<Vec<&'a Plant>> {
        let greenhouse = self.greenhouse;
        self.plan
            .sequence
            .iter()
            .map(|c| {
                greenhouse.plant_at(*c).ok_or_else(|| {
                    Error::not_found(format!("Plant {c} of greenhouse '{}'", greenhouse.name))
                })
            })
            .collect()
    }
}

/// Mutable state of a single run. Owns its own copy of every drone.
struct RunState<'a> {
    drones: Vec<Drone>,
    row_to_drone: BTreeMap<u32, usize>,
    targets: Vec<&'a Plant>,
    next: usize,
    watered: Vec<Coordinate>,
}

impl<'a> RunState<'a> {
    fn new(greenhouse: &Greenhouse, targets: Vec<&'a Plant>) -> Self {
        let mut drones: Vec<Drone> = greenhouse.drones.iter().cloned().collect();
        drones.iter_mut().for_each(Drone::reset);

        let mut row_to_drone = BTreeMap::new();
        for (&row, &drone_id) in &greenhouse.assignments {
            match drones.iter().position(|d| d.id == drone_id) {
                Some(idx) => {
                    drones[idx].assigned_row = Some(row);
                    row_to_drone.insert(row, idx);
                }
                None => warn!(
                    "Row {row} of '{}' is bound to unknown drone {drone_id}",
                    greenhouse.name
                ),
            }
        }

        Self {
            drones,
            row_to_drone,
            targets,
            next: 0,
            watered: Vec::new(),
        }
    }

    fn is_done(&self) -> bool {
        self.next >= self.targets.len() && self.drones.iter().all(Drone::is_finished)
    }

    /// First plant still due in the drone's row, scanning from the plan cursor.
    fn pending_target(&self, idx: usize) -> Option<&'a Plant> {
        let row = self.drones[idx].assigned_row?;
        self.targets[self.next..]
            .iter()
            .copied()
            .find(|p| p.row == row)
    }

    fn step(&mut self, tick: u32) -> TickRecord {
        let mut actions = vec![Action::Wait; self.drones.len()];

        for idx in 0..self.drones.len() {
            if self.drones[idx].is_finished() {
                continue;
            }
            let target = self.pending_target(idx);
            let drone = &mut self.drones[idx];
            drone.status = DroneStatus::Waiting;
            let Some(target) = target else {
                continue;
            };
            actions[idx] = match drone.position.cmp(&target.position) {
                Ordering::Less => {
                    drone.step_forward();
                    Action::Forward(Coordinate::new(target.row, drone.position))
                }
                Ordering::Greater => {
                    drone.step_back();
                    Action::Back(Coordinate::new(target.row, drone.position))
                }
                Ordering::Equal => continue,
            };
        }

        if let Some(plant) = self.targets.get(self.next).copied() {
            if let Some(&idx) = self.row_to_drone.get(&plant.row) {
                let drone = &mut self.drones[idx];
                if drone.assigned_row == Some(plant.row) && drone.position == plant.position {
                    // Watering is exclusive: positions reached this tick stay,
                    // every other recorded action becomes a wait.
                    actions.fill(Action::Wait);
                    actions[idx] = Action::Water;
                    drone.water(plant);
                    debug!("t{tick}: {} waters {}", drone.name, plant.coordinate());
                    self.watered.push(plant.coordinate());
                    self.next += 1;
                }
            }
        }

        for idx in 0..self.drones.len() {
            // Drones that moved or watered this tick keep their action.
            if self.drones[idx].is_finished() || actions[idx] != Action::Wait {
                continue;
            }
            if self.pending_target(idx).is_some() {
                continue;
            }
            let drone = &mut self.drones[idx];
            if drone.position > 0 {
                drone.step_back();
                if drone.position > 0 {
                    let row = drone.assigned_row.unwrap_or_default();
                    actions[idx] = Action::Back(Coordinate::new(row, drone.position));
                    continue;
                }
            }
            drone.finish();
            actions[idx] = Action::Finish;
            info!("t{tick}: {} finished", drone.name);
        }

        self.record(tick, &actions)
    }

    fn force_finish(&mut self, tick: u32) -> TickRecord {
        let actions: Vec<Action> = self
            .drones
            .iter_mut()
            .map(|drone| {
                if drone.is_finished() {
                    Action::Wait
                } else {
                    drone.finish();
                    Action::Finish
                }
            })
            .collect();
        self.record(tick, &actions)
    }

    fn record(&self, tick: u32, actions: &[Action]) -> TickRecord {
        TickRecord {
            tick,
            actions: self
                .drones
                .iter()
                .zip(actions)
                .map(|(drone, action)| DroneAction {
                    drone: drone.name.clone(),
                    action: *action,
                })
                .collect(),
            drones: self
                .drones
                .iter()
                .map(|drone| DroneSnapshot {
                    name: drone.name.clone(),
                    position: drone.position,
                    status: drone.status,
                })
                .collect(),
        }
    }

    fn statistics(&self) -> Statistics {
        let drones: Vec<DroneUsage> = self
            .drones
            .iter()
            .map(|drone| DroneUsage {
                name: drone.name.clone(),
                water_liters: drone.water_liters,
                fertilizer_grams: drone.fertilizer_grams,
                watered: drone.visited.iter().map(Plant::coordinate).collect(),
            })
            .collect();
        Statistics {
            water_liters: drones.iter().map(|d| d.water_liters).sum(),
            fertilizer_grams: drones.iter().map(|d| d.fertilizer_grams).sum(),
            drones,
        }
    }
}

fn describe(record: &TickRecord) -> String {
    record
        .actions
        .iter()
        .map(|a| format!("{}={}", a.drone, a.action))
        .collect::<Vec<_>>()
        .join(", ")
}
