use crate::{
    error::{Error, Result},
    logic::simulator::{SimulationRun, Simulator},
    models::{greenhouse::Greenhouse, plan::IrrigationPlan, Sequence},
};

/// The loaded set of greenhouses. Replaced wholesale on every upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    pub greenhouses: Sequence<Greenhouse>,
}

impl Configuration {
    pub fn new(greenhouses: Sequence<Greenhouse>) -> Self {
        Self { greenhouses }
    }

    pub fn greenhouse(&self, index: usize) -> Result<&Greenhouse> {
        self.greenhouses
            .at(index)
            .map_err(|_| Error::not_found(format!("Greenhouse {index}")))
    }

    pub fn plan(&self, greenhouse: usize, plan: usize) -> Result<(&Greenhouse, &IrrigationPlan)> {
        let gh = self.greenhouse(greenhouse)?;
        Ok((gh, gh.plan(plan)?))
    }

    /// Runs plan `plan` of greenhouse `greenhouse` on fresh drone state.
    pub fn simulate(&self, greenhouse: usize, plan: usize) -> Result<SimulationRun> {
        let (gh, plan) = self.plan(greenhouse, plan)?;
        Simulator::new(gh, plan).run()
    }

    pub fn is_empty(&self) -> bool {
        self.greenhouses.is_empty()
    }
}
