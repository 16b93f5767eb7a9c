use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

use utils::module::ModuleType;

use crate::state::{Config, ForeignTokenRecord, ModuleRecord};

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
}

/// Every message is restricted to the owner.
#[cw_serde]
pub enum ExecuteMsg {
    /// Admits `module` after checking it reports `module_type`.
    AdmitModule {
        module: String,
        module_type: ModuleType,
        name: String,
        url: String,
    },
    UpdateModule {
        module: String,
        name: String,
        url: String,
    },
    /// Also unassigns the module from every foreign token.
    RemoveModule {
        module: String,
    },
    TransferOwnership {
        owner: String,
    },
    /// Registers `token` (or rewrites its collateral flag) and initializes `oracle` for it.
    AdmitForeignToken {
        token: String,
        is_collateral: bool,
        oracle: String,
    },
    UpdateForeignToken {
        token: String,
        is_collateral: bool,
    },
    RemoveForeignToken {
        token: String,
    },
    /// `oracle` must value in a registered collateral token.
    AssignOracle {
        token: String,
        oracle: String,
    },
    RemoveOracle {
        token: String,
        oracle: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(IsModuleResponse)]
    IsModule { module: String },
    /// Whether `module` is admitted with `module_type`.
    #[returns(IsValidModuleTypeResponse)]
    IsValidModuleType {
        module: String,
        module_type: ModuleType,
    },
    #[returns(CountResponse)]
    ModuleCount {},
    /// Modules are indexed in admission order.
    #[returns(ModuleRecord)]
    ModuleAtIndex { index: u32 },
    #[returns(ModuleRecord)]
    Module { module: String },
    /// Sorted by address.
    #[returns(ListModulesResponse)]
    ListModules {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(ForeignTokenRecord)]
    ForeignToken { token: String },
    #[returns(CountResponse)]
    ForeignTokenCount {},
    /// Foreign tokens are indexed in admission order.
    #[returns(ForeignTokenRecord)]
    ForeignTokenAtIndex { index: u32 },
    #[returns(CountResponse)]
    ForeignTokenOracleCount { token: String },
    #[returns(OracleResponse)]
    ForeignTokenOracleAtIndex { token: String, index: u32 },
    /// False for unknown tokens.
    #[returns(IsCollateralResponse)]
    IsCollateral { token: String },
    /// Sorted by address.
    #[returns(ListForeignTokensResponse)]
    ListForeignTokens {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct IsModuleResponse {
    pub is_module: bool,
}

#[cw_serde]
pub struct IsValidModuleTypeResponse {
    pub is_valid: bool,
}

#[cw_serde]
pub struct IsCollateralResponse {
    pub is_collateral: bool,
}

#[cw_serde]
pub struct CountResponse {
    pub count: u32,
}

#[cw_serde]
pub struct OracleResponse {
    pub oracle: Addr,
}

#[cw_serde]
pub struct ListModulesResponse {
    pub modules: Vec<ModuleRecord>,
}

#[cw_serde]
pub struct ListForeignTokensResponse {
    pub foreign_tokens: Vec<ForeignTokenRecord>,
}
