use chrono::{DateTime, Utc};

use crate::{
    error::Result,
    logic::simulator::{SimulationRun, Simulator},
    models::{
        configuration::Configuration,
        output::{
            DroneEfficiency, DroneInstruction, GreenhouseOutput, InstructionOutput,
            OutputDocument, PlanOutput,
        },
    },
};

/// Simulates every (greenhouse, plan) pair and aggregates the results.
/// Amounts are truncated to whole liters and grams.
pub fn build_output(
    configuration: &Configuration,
    generated_at: DateTime<Utc>,
) -> Result<OutputDocument> {
    let mut greenhouses = Vec::with_capacity(configuration.greenhouses.len());
    for greenhouse in &configuration.greenhouses {
        let plans = greenhouse
            .plans
            .iter()
            .map(|plan| Simulator::new(greenhouse, plan).run().map(|run| plan_output(&run)))
            .collect::<Result<Vec<_>>>()?;
        greenhouses.push(GreenhouseOutput {
            name: greenhouse.name.clone(),
            plans,
        });
    }
    Ok(OutputDocument {
        generated_at,
        greenhouses,
    })
}

fn plan_output(run: &SimulationRun) -> PlanOutput {
    PlanOutput {
        name: run.plan.clone(),
        optimal_time_seconds: run.total_time().ok(),
        limit_exceeded: !run.is_complete(),
        water_liters: whole(run.statistics.water_liters),
        fertilizer_grams: whole(run.statistics.fertilizer_grams),
        drones: run
            .statistics
            .drones
            .iter()
            .map(|d| DroneEfficiency {
                name: d.name.clone(),
                water_liters: whole(d.water_liters),
                fertilizer_grams: whole(d.fertilizer_grams),
            })
            .collect(),
        instructions: run
            .ticks
            .iter()
            .map(|record| InstructionOutput {
                seconds: record.tick,
                drones: record
                    .actions
                    .iter()
                    .map(|a| DroneInstruction {
                        name: a.drone.clone(),
                        action: a.action.to_string(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn whole(amount: f64) -> i64 {
    amount.trunc() as i64
}
