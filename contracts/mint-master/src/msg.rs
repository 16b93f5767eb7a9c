use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Decimal, Uint256};

use utils::module::ModuleTypeResponse;

use crate::state::RatioParams;

#[cw_serde]
pub struct InstantiateMsg {}

/// Every message is sent by the stablecoin instance it configures: `sender` must equal
/// `instance`. The instance contract is the authority over its own parameters, so its
/// governance reconfigures the ratio by routing these messages through the instance.
#[cw_serde]
pub enum ExecuteMsg {
    /// Sets or replaces all parameters of `instance`.
    SetParams {
        instance: String,
        min_ratio: Decimal,
        max_ratio: Decimal,
        step_size: Decimal,
        current_ratio: Decimal,
        oracle: String,
    },
    SetMinRatio {
        instance: String,
        ratio: Decimal,
    },
    SetMaxRatio {
        instance: String,
        ratio: Decimal,
    },
    SetStepSize {
        instance: String,
        step_size: Decimal,
    },
    /// Overrides the current ratio within `[min_ratio, max_ratio]`.
    SetRatio {
        instance: String,
        ratio: Decimal,
    },
    /// Only affects future updates.
    ChangeOracle {
        instance: String,
        oracle: String,
    },
    /// Moves the ratio one step towards restoring the peg of `token`.
    UpdateMintingRatio {
        instance: String,
        token: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(RatioParams)]
    Params { instance: String },
    #[returns(MintingRatioResponse)]
    GetMintingRatio { instance: String, token: String },
    #[returns(ModuleTypeResponse)]
    ModuleType {},
}

#[cw_serde]
pub struct MintingRatioResponse {
    /// Share of a mint that must be backed by collateral
    pub ratio: Decimal,
    pub max_order_size: Uint256,
}
