//! Integration tests for module exports.
//!
//! Verify that the public modules and types are reachable via absolute paths
//! and work together end to end.

use rust_decimal_macros::dec;

/// Types module re-exports.
#[test]
fn test_types_module_exports() {
    use forecast_core::types::error::ConfigurationError;
    use forecast_core::types::input::FlatInput;
    use forecast_core::types::sentiment::{SentimentBounds, SentimentMultipliers};
    use forecast_core::types::units::BasisPoints;

    let bounds = SentimentBounds::default();
    let s = SentimentMultipliers::from_feed(dec!(1.01), dec!(0.99), &bounds).unwrap();
    assert_eq!(s.month1(), dec!(1));

    assert_eq!(BasisPoints::new(dec!(13)).as_fraction(), dec!(0.0013));

    let mut input = FlatInput::default();
    assert!(matches!(
        input.decimal("x"),
        Err(ConfigurationError::MissingField(_))
    ));
}

/// Model module re-exports.
#[test]
fn test_model_module_exports() {
    use forecast_core::model::components::{
        custody_revenue, interest_revenue, other_revenue, staking_revenue,
    };
    use forecast_core::model::{ModelConstants, RevenueAggregator, RevenueComponent};

    let _ = (interest_revenue, staking_revenue, custody_revenue, other_revenue);
    let aggregator = RevenueAggregator::new(ModelConstants::default());
    assert_eq!(aggregator.constants().notional_unit_scale, dec!(1000000000));
    assert_eq!(RevenueComponent::all().len(), 4);
}

/// Q2 drivers read from flat input reproduce the published total exactly.
#[test]
fn test_q2_flat_input_end_to_end() {
    use forecast_core::model::{ModelConstants, RevenueAggregator};
    use forecast_core::types::{FlatInput, ParameterSet};

    let input = FlatInput::from_pairs([
        ("period", "Q2 2025"),
        ("fiat_balance", "26000000000"),
        ("fiat_rate", "0.0530"),
        ("fiat_share", "0.22"),
        ("stable_balance", "30000000000"),
        ("stable_rate", "0.0530"),
        ("stable_share", "0.0035"),
        ("staked_units", "35000000"),
        ("asset_price", "2500"),
        ("staking_reward_rate", "0.038"),
        ("staking_take_rate", "0.115"),
        ("custody_auc", "160000000000"),
        ("custody_fee_bps", "1.3"),
        ("other_adjustment", "-27896550"),
    ]);
    let constants = ModelConstants::default();
    let params = ParameterSet::from_flat(input, &constants.sentiment_bounds).unwrap();
    let summary = RevenueAggregator::new(constants).aggregate(&params);

    assert_eq!(summary.components.interest, dec!(308725000));
    assert_eq!(summary.components.staking, dec!(95593750));
    assert_eq!(summary.components.custody, dec!(20800000));
    assert_eq!(summary.grand_total, dec!(397222200));
}
