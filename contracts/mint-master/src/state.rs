use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Map;

use utils::ratio::Ratio;

#[cw_serde]
pub struct RatioParams {
    pub min_ratio: Ratio,
    pub max_ratio: Ratio,
    /// Largest change of `current_ratio` per update, zero locks the ratio
    pub step_size: Ratio,
    pub current_ratio: Ratio,
    /// Oracle valuing the instance token in its index unit
    pub oracle: Addr,
    pub initialized: bool,
}

impl RatioParams {
    /// `min <= current <= max`, and `step < max - min` unless the step is zero.
    pub fn is_valid(&self) -> bool {
        let ordered =
            self.min_ratio <= self.current_ratio && self.current_ratio <= self.max_ratio;
        let step_fits =
            self.step_size.is_zero() || self.step_size < self.max_ratio.abs_diff(self.min_ratio);
        ordered && step_fits
    }
}

/// Parameters of every stablecoin instance, keyed by the instance address
pub const PARAMS: Map<&Addr, RatioParams> = Map::new("params");
