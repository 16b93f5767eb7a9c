use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, QuerierWrapper, StdResult};

use std::fmt;

/// Kinds of modules the factory can admit.
#[cw_serde]
#[derive(Copy, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleType {
    Version,
    Controller,
    Strategy,
    MintMaster,
    Oracle,
    VoterRoll,
}

impl ModuleType {
    pub const ALL: [ModuleType; 6] = [
        ModuleType::Version,
        ModuleType::Controller,
        ModuleType::Strategy,
        ModuleType::MintMaster,
        ModuleType::Oracle,
        ModuleType::VoterRoll,
    ];

    /// Maps the on-chain enum index (0..=5) to a module type.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ModuleType::Version => "version",
            ModuleType::Controller => "controller",
            ModuleType::Strategy => "strategy",
            ModuleType::MintMaster => "mint_master",
            ModuleType::Oracle => "oracle",
            ModuleType::VoterRoll => "voter_roll",
        };
        f.write_str(name)
    }
}

/// Query every module answers so the factory can verify its declared type.
#[cw_serde]
#[derive(QueryResponses)]
pub enum ModuleQueryMsg {
    #[returns(ModuleTypeResponse)]
    ModuleType {},
}

#[cw_serde]
pub struct ModuleTypeResponse {
    pub module_type: ModuleType,
}

/// Asks `module` which type it implements.
pub fn query_module_type(querier: &QuerierWrapper, module: &Addr) -> StdResult<ModuleType> {
    let response: ModuleTypeResponse =
        querier.query_wasm_smart(module, &ModuleQueryMsg::ModuleType {})?;
    Ok(response.module_type)
}
