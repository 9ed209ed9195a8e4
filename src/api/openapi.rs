use utoipa::OpenApi;

use crate::models::{
    document::{
        AssignmentEntry, ConfigDocument, DroneEntry, GreenhouseEntry, PlanEntry, PlanSequence,
        PlantEntry,
    },
    drone::DroneStatus,
    output::{
        DroneEfficiency, DroneInstruction, GreenhouseOutput, InstructionOutput, OutputDocument,
        PlanOutput,
    },
    request::{
        ActionTableResponse, ConfigApiResponse, ConfigSummary, DroneStateResponse,
        DroneUsageResponse, ErrorResponse, GreenhouseListResponse, GreenhouseSummary, Link,
        Pagination, PlanSummary, RunStatus, SimulationApiResponse, SimulationResponse,
        TickApiResponse, TickResponse, TickRowResponse,
    },
    Coordinate,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Greenhouse Irrigation API",
        description = "Load greenhouse configurations, simulate irrigation plans tick by tick and export the aggregated results.",
        version = "1.0.0",
        license(name = "MIT"),
    ),
    paths(
        crate::api::handlers::config::post_config,
        crate::api::handlers::greenhouses::list_greenhouses,
        crate::api::handlers::simulation::get_simulation,
        crate::api::handlers::simulation::get_tick,
        crate::api::handlers::output::get_output,
    ),
    components(
        schemas(
            // Configuration document
            ConfigDocument, DroneEntry, GreenhouseEntry, PlantEntry, AssignmentEntry, PlanEntry,
            PlanSequence,
            // Simulation
            Coordinate, DroneStatus, RunStatus, SimulationResponse, DroneUsageResponse,
            ActionTableResponse, TickRowResponse, TickResponse, DroneStateResponse,
            // Listing
            ConfigSummary, GreenhouseSummary, PlanSummary,
            // Output document
            OutputDocument, GreenhouseOutput, PlanOutput, DroneEfficiency, InstructionOutput,
            DroneInstruction,
            // Shared
            Link, Pagination, ErrorResponse,
            // Concrete response envelopes (via #[aliases])
            ConfigApiResponse,
            SimulationApiResponse,
            TickApiResponse,
            GreenhouseListResponse,
        )
    ),
    tags(
        (name = "config",      description = "Configuration upload"),
        (name = "greenhouses", description = "Loaded greenhouses and their plans"),
        (name = "simulation",  description = "Plan simulation, totals and per-tick drone states"),
        (name = "output",      description = "Aggregated results for every plan"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/config",
            "/api/greenhouses",
            "/api/greenhouses/{greenhouse}/plans/{plan}/simulation",
            "/api/greenhouses/{greenhouse}/plans/{plan}/simulation/ticks/{tick}",
            "/api/output",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }
}
