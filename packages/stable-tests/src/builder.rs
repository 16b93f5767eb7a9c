use anyhow::Result as AnyResult;
use cosmwasm_std::{Addr, Decimal256, Empty, Int256, Uint256};
use cw20::MinterResponse;
use cw20_base::msg::InstantiateMsg as Cw20BaseInstantiateMsg;
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use utils::module::ModuleType;

use crate::{mock_feed, mock_module, mock_oracle, mock_pair, mock_token};

/// Largest precision cw20-base accepts.
const CW20_MAX_DECIMALS: u8 = 18;

// -------------------------------------------------------------------------------------------------
// Contracts
// -------------------------------------------------------------------------------------------------

/// Contract code that manages cw20 tokens.
fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );

    Box::new(contract)
}

fn contract_mock_token() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new_with_empty(
        mock_token::execute,
        mock_token::instantiate,
        mock_token::query,
    );

    Box::new(contract)
}

fn contract_mock_pair() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new_with_empty(
        mock_pair::execute,
        mock_pair::instantiate,
        mock_pair::query,
    );

    Box::new(contract)
}

fn contract_mock_feed() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new_with_empty(
        mock_feed::execute,
        mock_feed::instantiate,
        mock_feed::query,
    );

    Box::new(contract)
}

fn contract_mock_oracle() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new_with_empty(
        mock_oracle::execute,
        mock_oracle::instantiate,
        mock_oracle::query,
    );

    Box::new(contract)
}

fn contract_mock_module() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new_with_empty(
        mock_module::execute,
        mock_module::instantiate,
        mock_module::query,
    );

    Box::new(contract)
}

// -------------------------------------------------------------------------------------------------
// MocksBuilder
// -------------------------------------------------------------------------------------------------

/// Stores the test doubles in a multitest `App`.
pub struct MocksBuilder {
    pub owner: Addr,
}

impl MocksBuilder {
    pub fn init_mocks(self, app: &mut App) -> Mocks {
        Mocks {
            owner: self.owner,
            cw20_code_id: app.store_code(contract_cw20()),
            token_code_id: app.store_code(contract_mock_token()),
            pair_code_id: app.store_code(contract_mock_pair()),
            feed_code_id: app.store_code(contract_mock_feed()),
            oracle_code_id: app.store_code(contract_mock_oracle()),
            module_code_id: app.store_code(contract_mock_module()),
        }
    }
}

/// Code ids of the stored doubles plus helpers to instantiate and drive them.
pub struct Mocks {
    pub owner: Addr,
    pub cw20_code_id: u64,
    pub token_code_id: u64,
    pub pair_code_id: u64,
    pub feed_code_id: u64,
    pub oracle_code_id: u64,
    pub module_code_id: u64,
}

impl Mocks {
    /// A cw20-base token, or a metadata-only double above 18 decimals.
    pub fn instantiate_token(&self, app: &mut App, symbol: &str, decimals: u8) -> Addr {
        if decimals > CW20_MAX_DECIMALS {
            return app
                .instantiate_contract(
                    self.token_code_id,
                    self.owner.clone(),
                    &mock_token::InstantiateMsg {
                        name: symbol.to_owned() + " token",
                        symbol: symbol.to_owned(),
                        decimals,
                    },
                    &[],
                    symbol,
                    None,
                )
                .unwrap();
        }

        app.instantiate_contract(
            self.cw20_code_id,
            self.owner.clone(),
            &Cw20BaseInstantiateMsg {
                name: symbol.to_owned() + " token",
                symbol: symbol.to_owned(),
                decimals,
                initial_balances: vec![],
                mint: Some(MinterResponse {
                    minter: self.owner.to_string(),
                    cap: None,
                }),
                marketing: None,
            },
            &[],
            symbol,
            None,
        )
        .unwrap()
    }

    pub fn instantiate_pair(
        &self,
        app: &mut App,
        token0: &Addr,
        token1: &Addr,
        reserve0: impl Into<Uint256>,
        reserve1: impl Into<Uint256>,
    ) -> Addr {
        app.instantiate_contract(
            self.pair_code_id,
            self.owner.clone(),
            &mock_pair::InstantiateMsg {
                token0: token0.to_string(),
                token1: token1.to_string(),
                reserve0: reserve0.into(),
                reserve1: reserve1.into(),
            },
            &[],
            "Mock Pair",
            None,
        )
        .unwrap()
    }

    pub fn set_reserves(
        &self,
        app: &mut App,
        pair: &Addr,
        reserve0: impl Into<Uint256>,
        reserve1: impl Into<Uint256>,
    ) -> AnyResult<AppResponse> {
        app.execute_contract(
            self.owner.clone(),
            pair.clone(),
            &mock_pair::ExecuteMsg::SetReserves {
                reserve0: reserve0.into(),
                reserve1: reserve1.into(),
            },
            &[],
        )
    }

    pub fn set_cumulatives(
        &self,
        app: &mut App,
        pair: &Addr,
        price0_cumulative: Uint256,
        price1_cumulative: Uint256,
    ) -> AnyResult<AppResponse> {
        app.execute_contract(
            self.owner.clone(),
            pair.clone(),
            &mock_pair::ExecuteMsg::SetCumulatives {
                price0_cumulative,
                price1_cumulative,
            },
            &[],
        )
    }

    pub fn instantiate_feed(
        &self,
        app: &mut App,
        base: &str,
        quote: &str,
        decimals: u8,
        answer: impl Into<Int256>,
    ) -> Addr {
        app.instantiate_contract(
            self.feed_code_id,
            self.owner.clone(),
            &mock_feed::InstantiateMsg {
                base: base.to_owned(),
                quote: quote.to_owned(),
                decimals,
                answer: answer.into(),
            },
            &[],
            format!("{} / {} feed", base, quote),
            None,
        )
        .unwrap()
    }

    pub fn set_feed_answer(
        &self,
        app: &mut App,
        feed: &Addr,
        answer: impl Into<Int256>,
    ) -> AnyResult<AppResponse> {
        app.execute_contract(
            self.owner.clone(),
            feed.clone(),
            &mock_feed::ExecuteMsg::SetAnswer {
                answer: answer.into(),
            },
            &[],
        )
    }

    pub fn instantiate_oracle(&self, app: &mut App, index_token: &Addr, index_decimals: u8) -> Addr {
        app.instantiate_contract(
            self.oracle_code_id,
            self.owner.clone(),
            &mock_oracle::InstantiateMsg {
                index_token: index_token.to_string(),
                index_decimals,
            },
            &[],
            "Mock Oracle",
            None,
        )
        .unwrap()
    }

    pub fn set_oracle_price(
        &self,
        app: &mut App,
        oracle: &Addr,
        token: &Addr,
        decimals: u8,
        price: Decimal256,
        volatility: Decimal256,
    ) -> AnyResult<AppResponse> {
        app.execute_contract(
            self.owner.clone(),
            oracle.clone(),
            &mock_oracle::ExecuteMsg::SetPrice {
                token: token.to_string(),
                decimals,
                price,
                volatility,
            },
            &[],
        )
    }

    /// Depth of the last initialization the mock oracle received for `token`.
    pub fn oracle_initialized_at(&self, app: &App, oracle: &Addr, token: &Addr) -> Option<u8> {
        app.wrap()
            .query_wasm_smart(
                oracle,
                &mock_oracle::QueryMsg::InitializedAt {
                    token: token.to_string(),
                },
            )
            .unwrap()
    }

    pub fn instantiate_module(&self, app: &mut App, module_type: ModuleType) -> Addr {
        app.instantiate_contract(
            self.module_code_id,
            self.owner.clone(),
            &mock_module::InstantiateMsg { module_type },
            &[],
            format!("Mock {} module", module_type),
            None,
        )
        .unwrap()
    }
}
