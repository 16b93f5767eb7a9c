//! Interface shared by every price oracle module.
//!
//! Each oracle contract embeds these variants in its own `QueryMsg` / `ExecuteMsg`, so the
//! messages below can be sent to any of them.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Addr, Decimal256, QuerierWrapper, StdResult, Uint256, WasmMsg,
};

use crate::module::{ModuleType, ModuleTypeResponse};

/// Maximum nesting of oracles that a single initialization may walk through.
pub const MAX_INIT_DEPTH: u8 = 8;

#[cw_serde]
pub enum OracleExecuteMsg {
    /// Prepares the oracle to value `token`. Calling it again for an already prepared token
    /// is a no-op. `depth` counts how many oracles forwarded this initialization.
    Initialize { token: String, depth: Option<u8> },
    /// Samples price sources that accumulate over time. Never fails for unknown tokens.
    Update { token: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum OracleQueryMsg {
    #[returns(ModuleTypeResponse)]
    ModuleType {},
    /// Unit the oracle values tokens in.
    #[returns(IndexTokenResponse)]
    IndexToken {},
    /// Value of `amount` raw units of `token`, in raw index units.
    #[returns(ValuationResponse)]
    Read { token: String, amount: Uint256 },
    /// Raw units of `token` worth `amount` raw index units.
    #[returns(ValuationResponse)]
    AmountRequired { token: String, amount: Uint256 },
}

#[cw_serde]
pub struct IndexTokenResponse {
    pub index_token: Addr,
    pub decimals: u8,
}

#[cw_serde]
pub struct ValuationResponse {
    pub amount: Uint256,
    /// Relative disagreement between the price sources used; zero for a stable source.
    pub volatility: Decimal256,
}

/// Typed handle to an oracle module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleContract(pub Addr);

impl OracleContract {
    pub fn addr(&self) -> &Addr {
        &self.0
    }

    pub fn module_type(&self, querier: &QuerierWrapper) -> StdResult<ModuleType> {
        let response: ModuleTypeResponse =
            querier.query_wasm_smart(&self.0, &OracleQueryMsg::ModuleType {})?;
        Ok(response.module_type)
    }

    pub fn index_token(&self, querier: &QuerierWrapper) -> StdResult<IndexTokenResponse> {
        querier.query_wasm_smart(&self.0, &OracleQueryMsg::IndexToken {})
    }

    pub fn read(
        &self,
        querier: &QuerierWrapper,
        token: impl Into<String>,
        amount: Uint256,
    ) -> StdResult<ValuationResponse> {
        querier.query_wasm_smart(
            &self.0,
            &OracleQueryMsg::Read {
                token: token.into(),
                amount,
            },
        )
    }

    pub fn amount_required(
        &self,
        querier: &QuerierWrapper,
        token: impl Into<String>,
        amount: Uint256,
    ) -> StdResult<ValuationResponse> {
        querier.query_wasm_smart(
            &self.0,
            &OracleQueryMsg::AmountRequired {
                token: token.into(),
                amount,
            },
        )
    }

    pub fn initialize_msg(&self, token: impl Into<String>, depth: u8) -> StdResult<WasmMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.0.to_string(),
            msg: to_json_binary(&OracleExecuteMsg::Initialize {
                token: token.into(),
                depth: Some(depth),
            })?,
            funds: vec![],
        })
    }

    pub fn update_msg(&self, token: impl Into<String>) -> StdResult<WasmMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.0.to_string(),
            msg: to_json_binary(&OracleExecuteMsg::Update {
                token: token.into(),
            })?,
            funds: vec![],
        })
    }
}
