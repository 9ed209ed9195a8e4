use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Configuration document uploaded by operators.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    /// Drone fleet shared by every greenhouse of the document.
    #[serde(default)]
    pub drones: Vec<DroneEntry>,
    #[serde(default)]
    pub greenhouses: Vec<GreenhouseEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DroneEntry {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GreenhouseEntry {
    pub name: String,
    pub rows: u32,
    pub plants_per_row: u32,
    #[serde(default)]
    pub plants: Vec<PlantEntry>,
    #[serde(default)]
    pub assignments: Vec<AssignmentEntry>,
    #[serde(default)]
    pub plans: Vec<PlanEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlantEntry {
    pub row: u32,
    pub position: u32,
    pub water_liters: f64,
    pub fertilizer_grams: f64,
    /// Defaults to `Planta H{row}P{position}` when omitted or blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentEntry {
    pub drone_id: u32,
    pub row: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub name: String,
    pub sequence: PlanSequence,
}

/// Plan references as written by operators.
/// - `"H1-P1, H1-P2"` JSON → `Text`, comma-separated references
/// - `["H1-P1", "H1-P2"]` JSON → `List`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PlanSequence {
    Text(String),
    List(Vec<String>),
}

impl PlanSequence {
    /// Non-blank references, in order.
    pub fn references(&self) -> Vec<&str> {
        match self {
            PlanSequence::Text(text) => text.split(',').map(str::trim).filter(|r| !r.is_empty()).collect(),
            PlanSequence::List(items) => items.iter().map(|r| r.trim()).filter(|r| !r.is_empty()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_sequence_accepts_text_and_list() {
        let text: PlanSequence = serde_json::from_str(r#"" H1-P1, ,H2-P3 ""#).unwrap();
        assert_eq!(text.references(), vec!["H1-P1", "H2-P3"]);

        let list: PlanSequence = serde_json::from_str(r#"["H1-P1", " H2-P3"]"#).unwrap();
        assert_eq!(list.references(), vec!["H1-P1", "H2-P3"]);
    }

    #[test]
    fn test_document_defaults_missing_lists() {
        let doc: ConfigDocument = serde_json::from_str(
            r#"{"greenhouses": [{"name": "Norte", "rows": 1, "plantsPerRow": 2}]}"#,
        )
        .unwrap();
        assert!(doc.drones.is_empty());
        assert!(doc.greenhouses[0].plants.is_empty());
        assert!(doc.greenhouses[0].plans.is_empty());
    }
}
