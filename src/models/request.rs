use std::collections::HashMap;

use actix_web::http::Method;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::{
    logic::simulator::{RunOutcome, SimulationRun, TickRecord},
    models::{drone::DroneStatus, greenhouse::Greenhouse},
};

/// Serde adapter for `actix_web::http::Method` (serialises as its uppercase string).
mod method_serde {
    use actix_web::http::Method;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(method.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Method, D::Error> {
        let s = String::deserialize(d)?;
        Method::from_bytes(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// A single HAL-style hyperlink.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub href: String,
    #[serde(with = "method_serde")]
    #[schema(value_type = String, example = "GET")]
    pub method: Method,
}

/// Map of relation name → link, serialised as the `_links` field in responses.
pub type Links = HashMap<String, Link>;

/// Helper to build a `Link` from an href and an HTTP method.
pub fn link(href: impl Into<String>, method: Method) -> Link {
    Link {
        href: href.into(),
        method,
    }
}

/// Pagination metadata included in responses that return lists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Generic single-item response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    ConfigApiResponse = ApiResponse<ConfigSummary>,
    SimulationApiResponse = ApiResponse<SimulationResponse>,
    TickApiResponse = ApiResponse<TickResponse>,
)]
pub struct ApiResponse<T> {
    pub payload: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl<T> ApiResponse<T> {
    pub fn new(payload: T, links: Links) -> Self {
        Self {
            payload,
            errors: vec![],
            links,
        }
    }
}

/// Generic paginated list response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(GreenhouseListResponse = PaginatedResponse<GreenhouseSummary>)]
pub struct PaginatedResponse<T> {
    pub payload: Vec<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    pub fn new(payload: Vec<T>, links: Links, pagination: Pagination) -> Self {
        Self {
            payload,
            errors: vec![],
            links,
            pagination,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Result of a configuration upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub greenhouses: usize,
    pub plans: usize,
    pub drones: usize,
    /// Plan references dropped while loading.
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub index: usize,
    pub name: String,
    pub plants: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GreenhouseSummary {
    pub index: usize,
    pub name: String,
    pub rows: u32,
    pub positions_per_row: u32,
    pub drones: Vec<String>,
    pub plans: Vec<PlanSummary>,
}

impl GreenhouseSummary {
    pub fn new(index: usize, greenhouse: &Greenhouse) -> Self {
        Self {
            index,
            name: greenhouse.name.clone(),
            rows: greenhouse.row_count,
            positions_per_row: greenhouse.positions_per_row,
            drones: greenhouse.drones.iter().map(|d| d.name.clone()).collect(),
            plans: greenhouse
                .plans
                .iter()
                .enumerate()
                .map(|(index, plan)| PlanSummary {
                    index,
                    name: plan.name.clone(),
                    plants: plan.len(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    Completed,
    LimitExceeded,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub greenhouse: String,
    pub plan: String,
    pub status: RunStatus,
    /// Total time in ticks; absent when the run hit the tick ceiling.
    pub total_time: Option<u32>,
    pub ticks_recorded: usize,
    pub water_liters: f64,
    pub fertilizer_grams: f64,
    pub drones: Vec<DroneUsageResponse>,
    pub table: ActionTableResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DroneUsageResponse {
    pub name: String,
    pub water_liters: f64,
    pub fertilizer_grams: f64,
    pub plants_watered: usize,
}

/// One row per tick, one column per drone, action strings verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionTableResponse {
    pub drones: Vec<String>,
    pub ticks: Vec<TickRowResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TickRowResponse {
    pub tick: u32,
    pub actions: Vec<String>,
}

impl From<&SimulationRun> for SimulationResponse {
    fn from(run: &SimulationRun) -> Self {
        let status = match run.outcome {
            RunOutcome::Completed { .. } => RunStatus::Completed,
            RunOutcome::LimitExceeded { .. } => RunStatus::LimitExceeded,
        };
        let table = run.action_table();
        Self {
            greenhouse: run.greenhouse.clone(),
            plan: run.plan.clone(),
            status,
            total_time: run.total_time().ok(),
            ticks_recorded: run.ticks.len(),
            water_liters: run.statistics.water_liters,
            fertilizer_grams: run.statistics.fertilizer_grams,
            drones: run
                .statistics
                .drones
                .iter()
                .map(|d| DroneUsageResponse {
                    name: d.name.clone(),
                    water_liters: d.water_liters,
                    fertilizer_grams: d.fertilizer_grams,
                    plants_watered: d.watered.len(),
                })
                .collect(),
            table: ActionTableResponse {
                drones: table.drones,
                ticks: table
                    .rows
                    .into_iter()
                    .map(|row| TickRowResponse {
                        tick: row.tick,
                        actions: row.actions,
                    })
                    .collect(),
            },
        }
    }
}

/// State of every drone at one tick, as needed to draw the tick diagram.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TickResponse {
    pub tick: u32,
    pub drones: Vec<DroneStateResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DroneStateResponse {
    pub name: String,
    pub position: u32,
    pub status: DroneStatus,
    pub action: String,
}

impl From<&TickRecord> for TickResponse {
    fn from(record: &TickRecord) -> Self {
        Self {
            tick: record.tick,
            drones: record
                .drones
                .iter()
                .map(|snapshot| DroneStateResponse {
                    name: snapshot.name.clone(),
                    position: snapshot.position,
                    status: snapshot.status,
                    action: record
                        .action_of(&snapshot.name)
                        .map(|a| a.to_string())
                        .unwrap_or_default(),
                })
                .collect(),
        }
    }
}
