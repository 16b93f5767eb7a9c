use super::suite::SuiteBuilder;

use cosmwasm_std::{Decimal256, Uint256};

use crate::ContractError;

const ONE_BASE: u128 = 100_000_000;
const ONE_USDC: u128 = 1_000_000;

#[test]
fn index_comes_from_last_hop() {
    let suite = SuiteBuilder::new().build();

    let index = suite.query_index_token().unwrap();
    assert_eq!(index.index_token, suite.usdc);
    assert_eq!(index.decimals, 6);
}

#[test]
fn hop_oracle_must_value_in_interim_token() {
    let mut suite = SuiteBuilder::new().build();

    // swapped oracles
    let tokens = [suite.weth.clone(), suite.usdc.clone()];
    let oracles = [suite.usdc_oracle.clone(), suite.weth_oracle.clone()];
    let err = suite.instantiate_composite(&tokens, &oracles).unwrap_err();
    assert_eq!(
        ContractError::HopIndexMismatch {
            hop: 0,
            expected: suite.weth.to_string(),
            actual: suite.usdc.to_string()
        },
        err.downcast().unwrap()
    );

    let oracles = [suite.weth_oracle.clone()];
    let err = suite.instantiate_composite(&tokens, &oracles).unwrap_err();
    assert_eq!(
        ContractError::HopLengthMismatch {
            tokens: 2,
            oracles: 1
        },
        err.downcast().unwrap()
    );
}

#[test]
fn read_chains_forward() {
    let mut suite = SuiteBuilder::new().build();
    // BASE = 0.05 WETH, WETH = 2000 USDC
    suite.set_prices(Decimal256::percent(5), Decimal256::from_ratio(2000u128, 1u128));

    let base = suite.base.clone();
    let read = suite.read(&base, ONE_BASE).unwrap();
    assert_eq!(read.amount, Uint256::from(100 * ONE_USDC));

    let required = suite.amount_required(&base, 100 * ONE_USDC).unwrap();
    assert_eq!(required.amount, Uint256::from(ONE_BASE));
}

#[test]
fn volatility_is_worst_hop() {
    let mut suite = SuiteBuilder::new().build();
    suite.set_prices_with_volatility(
        (Decimal256::percent(5), Decimal256::percent(1)),
        (Decimal256::from_ratio(2000u128, 1u128), Decimal256::percent(3)),
    );

    let base = suite.base.clone();
    let read = suite.read(&base, ONE_BASE).unwrap();
    assert_eq!(read.volatility, Decimal256::percent(3));
    let required = suite.amount_required(&base, ONE_USDC).unwrap();
    assert_eq!(required.volatility, Decimal256::percent(3));
}

#[test]
fn round_trip_loses_at_most_rounding() {
    let mut suite = SuiteBuilder::new().build();
    suite.set_prices(
        Decimal256::from_ratio(1u128, 3u128),
        Decimal256::from_ratio(3000u128, 1u128),
    );

    let base = suite.base.clone();
    let read = suite.read(&base, ONE_BASE).unwrap();
    let back = suite.amount_required(&base, read.amount).unwrap();

    let original = Uint256::from(ONE_BASE);
    assert!(back.amount <= original);
    assert!(original - back.amount <= Uint256::from(10u128));
}

#[test]
fn initialize_reaches_every_hop() {
    let mut suite = SuiteBuilder::new().build();
    let (base, weth) = (suite.base.clone(), suite.weth.clone());

    suite.initialize(&base, None).unwrap();
    assert_eq!(suite.initialized_at(&suite.weth_oracle, &base), Some(1));
    assert_eq!(suite.initialized_at(&suite.usdc_oracle, &weth), Some(1));

    suite.initialize(&base, Some(2)).unwrap();
    assert_eq!(suite.initialized_at(&suite.weth_oracle, &base), Some(3));

    let err = suite.initialize(&base, Some(9)).unwrap_err();
    assert_eq!(
        ContractError::InitDepthExceeded { depth: 9 },
        err.downcast().unwrap()
    );
}

#[test]
fn nested_depth_limit_propagates() {
    let mut suite = SuiteBuilder::new().build();

    // a composite nested in another one
    let (usdc, inner) = (suite.usdc.clone(), suite.oracle.clone());
    let outer = suite.instantiate_composite(&[usdc], &[inner]).unwrap();
    let base = suite.base.clone();
    suite.oracle = outer;

    suite.initialize(&base, None).unwrap();
    assert_eq!(suite.initialized_at(&suite.weth_oracle, &base), Some(2));

    // the inner composite is reached one level too deep
    let err = suite.initialize(&base, Some(8)).unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Initialization nested 9 oracles deep"));
}

#[test]
fn update_reaches_every_hop() {
    let mut suite = SuiteBuilder::new().build();
    let base = suite.base.clone();

    let res = suite.update(&base).unwrap();
    for oracle in [&suite.weth_oracle, &suite.usdc_oracle] {
        assert!(res.events.iter().any(|event| event.ty == "execute"
            && event
                .attributes
                .iter()
                .any(|attr| attr.value == oracle.as_str())));
    }
}
