use super::suite::{SuiteBuilder, USER};

use cosmwasm_std::{Addr, Decimal256, Uint256};
use utils::module::ModuleType;

use crate::ContractError;

#[test]
fn reports_oracle_type_and_index() {
    let suite = SuiteBuilder::new().build();

    assert_eq!(suite.query_module_type().unwrap(), ModuleType::Oracle);
    let index = suite.query_index_token().unwrap();
    assert_eq!(index.index_token, suite.index_token);
    assert_eq!(index.decimals, 18);
}

#[test]
fn six_decimal_token_against_eighteen_decimal_index() {
    let mut suite = SuiteBuilder::new().build();
    let usdc = suite.create_token("USDC", 6);
    suite.initialize(USER, &usdc, None::<u8>).unwrap();

    let read = suite.read(&usdc, 1_000_000u128).unwrap();
    assert_eq!(read.amount, Uint256::from(1_000_000_000_000_000_000u128));
    assert_eq!(read.volatility, Decimal256::zero());

    let required = suite
        .amount_required(&usdc, 1_000_000_000_000_000_000u128)
        .unwrap();
    assert_eq!(required.amount, Uint256::from(1_000_000u128));
}

#[test]
fn finer_token_truncates_to_index_resolution() {
    let mut suite = SuiteBuilder::new().with_index_decimals(6).build();
    let dai = suite.create_token("DAI", 18);

    // not initialized, decimals are looked up on the fly
    let read = suite.read(&dai, 2_500_000_000_000_000_999u128).unwrap();
    assert_eq!(read.amount, Uint256::from(2_500_000u128));

    let required = suite.amount_required(&dai, 2_500_000u128).unwrap();
    assert_eq!(required.amount, Uint256::from(2_500_000_000_000_000_000u128));
}

#[test]
fn overflow_boundary() {
    let mut suite = SuiteBuilder::new().build();
    let wide = suite.create_token("WIDE", 24);
    suite.initialize(USER, &wide, 0u8).unwrap();

    let ten = Uint256::from(10u8);
    suite.amount_required(&wide, ten.pow(59)).unwrap_err();

    let required = suite.amount_required(&wide, ten.pow(50)).unwrap();
    assert_eq!(required.amount, ten.pow(56));
}

#[test]
fn initialize_is_idempotent() {
    let mut suite = SuiteBuilder::new().build();
    let usdc = suite.create_token("USDC", 6);

    let response = suite.initialize(USER, &usdc, None::<u8>).unwrap();
    assert!(response.events.iter().any(|event| event
        .attributes
        .iter()
        .any(|attr| attr.key == "decimals" && attr.value == "6")));

    // second call does nothing
    let response = suite.initialize(USER, &usdc, None::<u8>).unwrap();
    assert!(!response.events.iter().any(|event| event
        .attributes
        .iter()
        .any(|attr| attr.key == "decimals")));
}

#[test]
fn initialize_depth_is_bounded() {
    let mut suite = SuiteBuilder::new().build();
    let usdc = suite.create_token("USDC", 6);

    let err = suite.initialize(USER, &usdc, 9u8).unwrap_err();
    assert_eq!(
        ContractError::InitDepthExceeded { depth: 9 },
        err.downcast().unwrap()
    );

    suite.initialize(USER, &usdc, 8u8).unwrap();
}

#[test]
fn non_token_cannot_be_valued() {
    let suite = SuiteBuilder::new().build();

    suite
        .read(&Addr::unchecked("notatoken"), 1_000u128)
        .unwrap_err();
}
