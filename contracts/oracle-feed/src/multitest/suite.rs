use anyhow::Result as AnyResult;

use cosmwasm_std::{Addr, Decimal256, StdResult, Uint256};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use stable_tests::builder::{Mocks, MocksBuilder};
use utils::feed::FeedRecord;
use utils::oracle::ValuationResponse;

use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};

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
    index_decimals: u8,
    max_feed_age: Option<u64>,
}

impl SuiteBuilder {
    pub fn new() -> Self {
        Self {
            index_decimals: 18,
            max_feed_age: None,
        }
    }

    pub fn with_index_decimals(mut self, decimals: u8) -> Self {
        self.index_decimals = decimals;
        self
    }

    pub fn with_max_feed_age(mut self, seconds: u64) -> Self {
        self.max_feed_age = Some(seconds);
        self
    }

    #[track_caller]
    pub fn build(self) -> Suite {
        let mut app = App::default();
        let owner = Addr::unchecked(OWNER);

        let mocks = MocksBuilder {
            owner: owner.clone(),
        }
        .init_mocks(&mut app);
        let index_token = mocks.instantiate_token(&mut app, "USDS", self.index_decimals);

        let oracle_id = store_oracle(&mut app);
        let oracle = app
            .instantiate_contract(
                oracle_id,
                owner,
                &InstantiateMsg {
                    owner: OWNER.to_owned(),
                    index_token: index_token.to_string(),
                    max_feed_age: self.max_feed_age,
                },
                &[],
                "Feed Oracle",
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

    /// Feed with 8 decimals answers, like most Chainlink USD feeds.
    pub fn create_feed(&mut self, base: &str, quote: &str, answer: i128) -> Addr {
        self.mocks
            .instantiate_feed(&mut self.app, base, quote, 8, answer)
    }

    pub fn set_answer(&mut self, feed: &Addr, answer: i128) {
        self.mocks
            .set_feed_answer(&mut self.app, feed, answer)
            .unwrap();
    }

    fn execute(&mut self, sender: &str, msg: &ExecuteMsg) -> AnyResult<AppResponse> {
        self.app
            .execute_contract(Addr::unchecked(sender), self.oracle.clone(), msg, &[])
    }

    pub fn register_oracle(
        &mut self,
        sender: &str,
        token: &Addr,
        feed: &Addr,
    ) -> AnyResult<AppResponse> {
        self.execute(
            sender,
            &ExecuteMsg::RegisterOracle {
                token: token.to_string(),
                feed: feed.to_string(),
            },
        )
    }

    pub fn update_oracle(
        &mut self,
        sender: &str,
        token: &Addr,
        feed: &Addr,
    ) -> AnyResult<AppResponse> {
        self.execute(
            sender,
            &ExecuteMsg::UpdateOracle {
                token: token.to_string(),
                feed: feed.to_string(),
            },
        )
    }

    pub fn unregister_oracle(&mut self, sender: &str, token: &Addr) -> AnyResult<AppResponse> {
        self.execute(
            sender,
            &ExecuteMsg::UnregisterOracle {
                token: token.to_string(),
            },
        )
    }

    pub fn update_config(
        &mut self,
        sender: &str,
        max_feed_age: impl Into<Option<u64>>,
    ) -> AnyResult<AppResponse> {
        self.execute(
            sender,
            &ExecuteMsg::UpdateConfig {
                max_feed_age: max_feed_age.into(),
            },
        )
    }

    pub fn initialize(&mut self, token: &Addr) -> AnyResult<AppResponse> {
        self.execute(
            USER,
            &ExecuteMsg::Initialize {
                token: token.to_string(),
                depth: None,
            },
        )
    }

    pub fn update(&mut self, token: &Addr) -> AnyResult<AppResponse> {
        self.execute(
            USER,
            &ExecuteMsg::Update {
                token: token.to_string(),
            },
        )
    }

    pub fn query_feed(&self, token: &Addr) -> StdResult<FeedRecord> {
        self.app.wrap().query_wasm_smart(
            self.oracle.clone(),
            &QueryMsg::Feed {
                token: token.to_string(),
            },
        )
    }

    pub fn query_price(&self, token: &Addr) -> StdResult<Decimal256> {
        self.app.wrap().query_wasm_smart(
            self.oracle.clone(),
            &QueryMsg::Price {
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
