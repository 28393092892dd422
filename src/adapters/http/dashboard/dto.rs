use serde::Deserialize;

use crate::application::handlers::CycleRef;
use crate::domain::foundation::{CycleId, ValidationError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CycleParams {
    pub cycle: Option<String>,
}

impl CycleParams {
    pub fn cycle_ref(self) -> Result<Option<CycleRef>, ValidationError> {
        self.cycle.map(|raw| raw.parse()).transpose()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvolutionParams {
    /// Comma separated cycle ids.
    pub cycles: Option<String>,
}

impl EvolutionParams {
    pub fn cycle_ids(self) -> Result<Option<Vec<CycleId>>, ValidationError> {
        let Some(raw) = self.cycles else {
            return Ok(None);
        };
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}
