use anyhow::Result as AnyResult;

use cosmwasm_std::{Addr, StdResult, Uint256};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use stable_tests::builder::{Mocks, MocksBuilder};
use utils::oracle::ValuationResponse;

use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, WindowPricesResponse};
use crate::state::Windows;

pub const OWNER: &str = "owner";
pub const USER: &str = "user";
pub const HOUR: u64 = 3600;

fn store_oracle(app: &mut App) -> u64 {
    let contract = Box::new(ContractWrapper::new_with_empty(
        crate::contract::execute,
        crate::contract::instantiate,
        crate::contract::query,
    ));

    app.store_code(contract)
}

#[derive(Debug)]
pub struct SuiteBuilder {
    short_period: u64,
    long_period: u64,
}

impl SuiteBuilder {
    pub fn new() -> Self {
        Self {
            short_period: HOUR,
            long_period: 4 * HOUR,
        }
    }

    #[track_caller]
    pub fn build(self) -> Suite {
        let mut app = App::default();
        let owner = Addr::unchecked(OWNER);

        let mocks = MocksBuilder {
            owner: owner.clone(),
        }
        .init_mocks(&mut app);
        let index_token = mocks.instantiate_token(&mut app, "INDEX", 18);

        let oracle_id = store_oracle(&mut app);
        let oracle = app
            .instantiate_contract(
                oracle_id,
                owner,
                &InstantiateMsg {
                    owner: OWNER.to_owned(),
                    index_token: index_token.to_string(),
                    short_period: self.short_period,
                    long_period: self.long_period,
                },
                &[],
                "TWAP Compare Oracle",
                None,
            )
            .unwrap();

        Suite {
            app,
            mocks,
            index_token,
            oracle,
        }
    }
}

pub struct Suite {
    pub app: App,
    pub mocks: Mocks,
    pub index_token: Addr,
    pub oracle: Addr,
}

impl Suite {
    pub fn advance_seconds(&mut self, seconds: u64) {
        self.app.update_block(|block| {
            block.time = block.time.plus_seconds(seconds);
            block.height += std::cmp::max(1, seconds / 5); // block time
        });
    }

    pub fn create_token(&mut self, symbol: &str, decimals: u8) -> Addr {
        self.mocks.instantiate_token(&mut self.app, symbol, decimals)
    }

    /// Pair with `token` as token0 and the index token as token1.
    pub fn create_pair(
        &mut self,
        token: &Addr,
        token_reserve: u128,
        index_reserve: u128,
    ) -> Addr {
        let index_token = self.index_token.clone();
        self.mocks.instantiate_pair(
            &mut self.app,
            token,
            &index_token,
            token_reserve,
            index_reserve,
        )
    }

    pub fn set_reserves(&mut self, pair: &Addr, token_reserve: u128, index_reserve: u128) {
        self.mocks
            .set_reserves(&mut self.app, pair, token_reserve, index_reserve)
            .unwrap();
    }

    pub fn register_pair(
        &mut self,
        sender: &str,
        token: &Addr,
        pair: &Addr,
    ) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(sender),
            self.oracle.clone(),
            &ExecuteMsg::RegisterPair {
                token: token.to_string(),
                pair: pair.to_string(),
            },
            &[],
        )
    }

    pub fn initialize(&mut self, token: &Addr) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(USER),
            self.oracle.clone(),
            &ExecuteMsg::Initialize {
                token: token.to_string(),
                depth: None,
            },
            &[],
        )
    }

    pub fn update(&mut self, token: &Addr) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(USER),
            self.oracle.clone(),
            &ExecuteMsg::Update {
                token: token.to_string(),
            },
            &[],
        )
    }

    pub fn query_windows(&self, token: &Addr) -> StdResult<Windows> {
        self.app.wrap().query_wasm_smart(
            self.oracle.clone(),
            &QueryMsg::Windows {
                token: token.to_string(),
            },
        )
    }

    pub fn query_window_prices(&self, token: &Addr) -> StdResult<WindowPricesResponse> {
        self.app.wrap().query_wasm_smart(
            self.oracle.clone(),
            &QueryMsg::WindowPrices {
                token: token.to_string(),
            },
        )
    }

    pub fn read(&self, token: &Addr, amount: impl Into<Uint256>) -> StdResult<ValuationResponse> {
        self.app.wrap().query_wasm_smart(
            self.oracle.clone(),
            &QueryMsg::Read {
                token: token.to_string(),
                amount: amount.into(),
            },
        )
    }

    pub fn amount_required(
        &self,
        token: &Addr,
        amount: impl Into<Uint256>,
    ) -> StdResult<ValuationResponse> {
        self.app.wrap().query_wasm_smart(
            self.oracle.clone(),
            &QueryMsg::AmountRequired {
                token: token.to_string(),
                amount: amount.into(),
            },
        )
    }
}
