use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

/// Aggregated results of every plan of every loaded greenhouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutputDocument {
    pub generated_at: DateTime<Utc>,
    pub greenhouses: Vec<GreenhouseOutput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GreenhouseOutput {
    pub name: String,
    pub plans: Vec<PlanOutput>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanOutput {
    pub name: String,
    /// Absent when the run hit the tick ceiling.
    pub optimal_time_seconds: Option<u32>,
    pub limit_exceeded: bool,
    pub water_liters: i64,
    pub fertilizer_grams: i64,
    pub drones: Vec<DroneEfficiency>,
    pub instructions: Vec<InstructionOutput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DroneEfficiency {
    pub name: String,
    pub water_liters: i64,
    pub fertilizer_grams: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructionOutput {
    pub seconds: u32,
    pub drones: Vec<DroneInstruction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DroneInstruction {
    pub name: String,
    pub action: String,
}
