use std::collections::BTreeMap;

use log::{info, warn};

use crate::{
    error::{Error, Result},
    models::{
        configuration::Configuration,
        document::{ConfigDocument, DroneEntry, GreenhouseEntry, PlanEntry},
        drone::Drone,
        greenhouse::Greenhouse,
        plan::IrrigationPlan,
        plant::Plant,
        Coordinate,
    },
};

/// A validated configuration and the plan references dropped while loading it.
#[derive(Debug, Clone)]
pub struct LoadedConfiguration {
    pub configuration: Configuration,
    pub warnings: Vec<String>,
}

/// Parses and validates a JSON configuration document.
pub fn load_str(json: &str) -> Result<LoadedConfiguration> {
    let document: ConfigDocument = serde_json::from_str(json)
        .map_err(|e| Error::configuration(format!("malformed document: {e}")))?;
    load_document(&document)
}

/// Validates `document` and resolves every plan reference.
///
/// Structural problems are errors. Plan references that are malformed or
/// point at a missing plant are dropped and reported as warnings.
pub fn load_document(document: &ConfigDocument) -> Result<LoadedConfiguration> {
    let mut fleet: BTreeMap<u32, &DroneEntry> = BTreeMap::new();
    for drone in &document.drones {
        if drone.name.trim().is_empty() {
            return Err(Error::configuration(format!("drone {} has no name", drone.id)));
        }
        if fleet.insert(drone.id, drone).is_some() {
            return Err(Error::configuration(format!(
                "drone id {} is defined twice",
                drone.id
            )));
        }
    }

    let mut warnings = Vec::new();
    let greenhouses = document
        .greenhouses
        .iter()
        .map(|entry| load_greenhouse(entry, &fleet, &mut warnings))
        .collect::<Result<_>>()?;
    let configuration = Configuration::new(greenhouses);

    info!(
        "Loaded {} greenhouse(s), {} drone(s), {} warning(s)",
        configuration.greenhouses.len(),
        fleet.len(),
        warnings.len()
    );
    Ok(LoadedConfiguration {
        configuration,
        warnings,
    })
}

fn load_greenhouse(
    entry: &GreenhouseEntry,
    fleet: &BTreeMap<u32, &DroneEntry>,
    warnings: &mut Vec<String>,
) -> Result<Greenhouse> {
    let name = entry.name.trim();
    if name.is_empty() {
        return Err(Error::configuration("greenhouse without a name"));
    }
    if entry.rows == 0 || entry.plants_per_row == 0 {
        return Err(Error::configuration(format!(
            "greenhouse '{name}' needs at least one row and one position per row"
        )));
    }
    let mut greenhouse = Greenhouse::new(name, entry.rows, entry.plants_per_row);

    for plant in &entry.plants {
        let coordinate = Coordinate::new(plant.row, plant.position);
        if !greenhouse.contains(coordinate) {
            return Err(Error::configuration(format!(
                "plant {coordinate} lies outside greenhouse '{name}' ({} rows, {} positions per row)",
                entry.rows, entry.plants_per_row
            )));
        }
        if !is_amount(plant.water_liters) || !is_amount(plant.fertilizer_grams) {
            return Err(Error::configuration(format!(
                "plant {coordinate} of '{name}' has a negative or invalid amount"
            )));
        }
        if greenhouse.plant_at(coordinate).is_some() {
            return Err(Error::configuration(format!(
                "plant {coordinate} is defined twice in '{name}'"
            )));
        }
        let label = plant
            .label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| Plant::default_label(plant.row, plant.position));
        greenhouse.plants.append(Plant::new(
            plant.row,
            plant.position,
            plant.water_liters,
            plant.fertilizer_grams,
            label,
        ));
    }

    for assignment in &entry.assignments {
        let drone = fleet.get(&assignment.drone_id).ok_or_else(|| {
            Error::configuration(format!("drone {} is not defined", assignment.drone_id))
        })?;
        if !(1..=entry.rows).contains(&assignment.row) {
            return Err(Error::configuration(format!(
                "row {} of '{name}' does not exist",
                assignment.row
            )));
        }
        if greenhouse.assignments.contains_key(&assignment.row) {
            return Err(Error::configuration(format!(
                "row {} of '{name}' is assigned twice",
                assignment.row
            )));
        }
        if greenhouse.drone_by_id(drone.id).is_some() {
            return Err(Error::configuration(format!(
                "drone {} is assigned to more than one row of '{name}'",
                drone.id
            )));
        }
        if greenhouse.drones.iter().any(|d| d.name == drone.name) {
            return Err(Error::configuration(format!(
                "drone name '{}' is used twice in '{name}'",
                drone.name
            )));
        }
        greenhouse.assign_drone_to_row(drone.id, assignment.row);
        greenhouse.drones.append(Drone::new(drone.id, drone.name.clone()));
    }

    for plan in &entry.plans {
        let plan = load_plan(&greenhouse, plan, warnings);
        greenhouse.plans.append(plan);
    }
    Ok(greenhouse)
}

fn load_plan(greenhouse: &Greenhouse, entry: &PlanEntry, warnings: &mut Vec<String>) -> IrrigationPlan {
    let mut plan = IrrigationPlan::new(entry.name.trim());
    for reference in entry.sequence.references() {
        match Coordinate::parse_reference(reference) {
            Ok(coordinate) if greenhouse.plant_at(coordinate).is_some() => {
                plan.sequence.append(coordinate)
            }
            Ok(coordinate) => drop_reference(
                warnings,
                format!(
                    "Plant {coordinate} not found in greenhouse '{}', dropped from plan '{}'",
                    greenhouse.name, plan.name
                ),
            ),
            Err(reason) => drop_reference(
                warnings,
                format!("Invalid reference in plan '{}': {reason}", plan.name),
            ),
        }
    }
    plan
}

fn drop_reference(warnings: &mut Vec<String>, message: String) {
    warn!("{message}");
    warnings.push(message);
}

fn is_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "drones": [{"id": 1, "name": "DR01"}, {"id": 2, "name": "DR02"}],
        "greenhouses": [{
            "name": "Norte",
            "rows": 2,
            "plantsPerRow": 3,
            "plants": [
                {"row": 1, "position": 1, "waterLiters": 1.0, "fertilizerGrams": 100.0, "label": "tomate"},
                {"row": 1, "position": 2, "waterLiters": 1.5, "fertilizerGrams": 50.0},
                {"row": 2, "position": 0, "waterLiters": 2.0, "fertilizerGrams": 20.0, "label": "chile"}
            ],
            "assignments": [{"droneId": 2, "row": 2}, {"droneId": 1, "row": 1}],
            "plans": [
                {"name": "Dia 1", "sequence": "H1-P1, H2-P0, H1-P2"},
                {"name": "Dia 2", "sequence": ["H1-P9", "bogus", "H2-P0"]}
            ]
        }]
    }"#;

    fn with_greenhouse(greenhouse: serde_json::Value) -> String {
        serde_json::json!({
            "drones": [{"id": 1, "name": "DR01"}, {"id": 2, "name": "DR02"}],
            "greenhouses": [greenhouse]
        })
        .to_string()
    }

    fn expect_configuration_error(json: &str, fragment: &str) {
        match load_str(json) {
            Err(Error::Configuration(message)) => assert!(
                message.contains(fragment),
                "expected '{fragment}' in '{message}'"
            ),
            other => panic!("expected a configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_valid_document() {
        let loaded = load_str(DOCUMENT).unwrap();
        let gh = loaded.configuration.greenhouse(0).unwrap();
        assert_eq!(gh.name, "Norte");
        assert_eq!(gh.plants.len(), 3);
        // Drones are listed in assignment order.
        let names: Vec<&str> = gh.drones.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["DR02", "DR01"]);
        assert_eq!(gh.assignments.get(&1), Some(&1));
        assert_eq!(gh.assignments.get(&2), Some(&2));
        assert_eq!(gh.plan(0).unwrap().len(), 3);
    }

    #[test]
    fn test_missing_label_gets_default() {
        let loaded = load_str(DOCUMENT).unwrap();
        let gh = loaded.configuration.greenhouse(0).unwrap();
        let plant = gh.plant_at(Coordinate::new(1, 2)).unwrap();
        assert_eq!(plant.label, "Planta H1P2");
    }

    #[test]
    fn test_unresolvable_references_are_dropped_with_warnings() {
        let loaded = load_str(DOCUMENT).unwrap();
        let plan = loaded.configuration.greenhouse(0).unwrap().plan(1).unwrap();
        assert_eq!(plan.sequence.as_slice(), &[Coordinate::new(2, 0)]);
        assert_eq!(loaded.warnings.len(), 2);
        assert!(loaded.warnings[0].contains("H1-P9"));
        assert!(loaded.warnings[1].contains("bogus"));
    }

    #[test]
    fn test_fleet_is_copied_into_each_greenhouse() {
        let json = serde_json::json!({
            "drones": [{"id": 1, "name": "DR01"}],
            "greenhouses": [
                {"name": "A", "rows": 1, "plantsPerRow": 2, "assignments": [{"droneId": 1, "row": 1}]},
                {"name": "B", "rows": 1, "plantsPerRow": 2, "assignments": [{"droneId": 1, "row": 1}]}
            ]
        })
        .to_string();
        let loaded = load_str(&json).unwrap();
        assert_eq!(loaded.configuration.greenhouses.len(), 2);
        for gh in &loaded.configuration.greenhouses {
            assert_eq!(gh.drones.len(), 1);
            assert_eq!(gh.drone_by_id(1).map(|d| d.name.as_str()), Some("DR01"));
        }
    }

    #[test]
    fn test_malformed_json_is_configuration_error() {
        expect_configuration_error("{not json", "malformed document");
    }

    #[test]
    fn test_duplicate_drone_id_is_rejected() {
        let json = r#"{"drones": [{"id": 1, "name": "A"}, {"id": 1, "name": "B"}]}"#;
        expect_configuration_error(json, "defined twice");
    }

    #[test]
    fn test_unnamed_greenhouse_is_rejected() {
        let json = with_greenhouse(serde_json::json!({"name": " ", "rows": 1, "plantsPerRow": 1}));
        expect_configuration_error(&json, "without a name");
    }

    #[test]
    fn test_unknown_drone_is_rejected() {
        let json = with_greenhouse(serde_json::json!({
            "name": "Norte", "rows": 1, "plantsPerRow": 2,
            "assignments": [{"droneId": 7, "row": 1}]
        }));
        expect_configuration_error(&json, "drone 7 is not defined");
    }

    #[test]
    fn test_row_assigned_twice_is_rejected() {
        let json = with_greenhouse(serde_json::json!({
            "name": "Norte", "rows": 1, "plantsPerRow": 2,
            "assignments": [{"droneId": 1, "row": 1}, {"droneId": 2, "row": 1}]
        }));
        expect_configuration_error(&json, "assigned twice");
    }

    #[test]
    fn test_drone_on_two_rows_is_rejected() {
        let json = with_greenhouse(serde_json::json!({
            "name": "Norte", "rows": 2, "plantsPerRow": 2,
            "assignments": [{"droneId": 1, "row": 1}, {"droneId": 1, "row": 2}]
        }));
        expect_configuration_error(&json, "more than one row");
    }

    #[test]
    fn test_assignment_to_missing_row_is_rejected() {
        let json = with_greenhouse(serde_json::json!({
            "name": "Norte", "rows": 1, "plantsPerRow": 2,
            "assignments": [{"droneId": 1, "row": 3}]
        }));
        expect_configuration_error(&json, "does not exist");
    }

    #[test]
    fn test_plant_out_of_bounds_is_rejected() {
        let json = with_greenhouse(serde_json::json!({
            "name": "Norte", "rows": 1, "plantsPerRow": 2,
            "plants": [{"row": 1, "position": 2, "waterLiters": 1.0, "fertilizerGrams": 1.0}]
        }));
        expect_configuration_error(&json, "lies outside");
    }

    #[test]
    fn test_duplicate_plant_is_rejected() {
        let json = with_greenhouse(serde_json::json!({
            "name": "Norte", "rows": 1, "plantsPerRow": 2,
            "plants": [
                {"row": 1, "position": 1, "waterLiters": 1.0, "fertilizerGrams": 1.0},
                {"row": 1, "position": 1, "waterLiters": 2.0, "fertilizerGrams": 2.0}
            ]
        }));
        expect_configuration_error(&json, "defined twice");
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let json = with_greenhouse(serde_json::json!({
            "name": "Norte", "rows": 1, "plantsPerRow": 2,
            "plants": [{"row": 1, "position": 1, "waterLiters": -1.0, "fertilizerGrams": 1.0}]
        }));
        expect_configuration_error(&json, "invalid amount");
    }
}
