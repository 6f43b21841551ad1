use super::{CommissionError, CommissionSchedule};

use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_commission_matches_published_examples() -> Result<()> {
    let schedule = CommissionSchedule::default();
    let test_cases = vec![
        (dec!(0), dec!(0)),
        (dec!(500), dec!(2500)),
        (dec!(1000), dec!(5000)),
        (dec!(1500), dec!(9000)),
        (dec!(2000), dec!(13000)),
        (dec!(3000), dec!(21000)),
        (dec!(5000), dec!(37000)),
        (dec!(10000), dec!(77000))
    ];

    for (quantity, expected) in test_cases {
        assert_eq!(schedule.calculate_commission(quantity)?, expected, "quantity: {quantity}");
    }

    Ok(())
}

#[test]
fn test_average_rate_matches_published_examples() -> Result<()> {
    let schedule = CommissionSchedule::default();

    assert_eq!(schedule.calculate_average_rate(dec!(0))?, Decimal::ZERO);
    assert_eq!(schedule.calculate_average_rate(dec!(500))?, dec!(5.0));
    assert_eq!(schedule.calculate_average_rate(dec!(1000))?, dec!(5));
    assert_eq!(schedule.calculate_average_rate(dec!(1500))?, dec!(6));
    assert_eq!(schedule.calculate_average_rate(dec!(2000))?, dec!(6.5));
    assert_eq!(schedule.calculate_average_rate(dec!(5000))?, dec!(7.4));
    assert_eq!(schedule.calculate_average_rate(dec!(10000))?, dec!(7.7));

    Ok(())
}

#[test]
fn test_tier_boundary_is_continuous() -> Result<()> {
    let schedule = CommissionSchedule::default();

    assert_eq!(schedule.calculate_commission(dec!(999))?, dec!(4995));
    assert_eq!(schedule.calculate_commission(dec!(1000))?, dec!(1000) * dec!(5));
    assert_eq!(schedule.calculate_commission(dec!(1001))?, dec!(5008));
    assert_eq!(schedule.calculate_commission(dec!(1000.5))?, dec!(5004));

    Ok(())
}

#[test]
fn test_commission_is_monotonically_non_decreasing() -> Result<()> {
    let schedule = CommissionSchedule::default();
    let mut previous = schedule.calculate_commission(Decimal::ZERO)?;

    // Quarter-unit steps across both tiers, including the threshold itself.
    for step in 1..=12_000 {
        let quantity = Decimal::new(step, 0) / dec!(4);
        let commission = schedule.calculate_commission(quantity)?;

        assert!(commission >= previous, "commission fell at quantity {quantity}");
        previous = commission;
    }

    Ok(())
}

#[test]
fn test_fractional_quantities_are_not_rounded() -> Result<()> {
    let schedule = CommissionSchedule::default();

    assert_eq!(schedule.calculate_commission(dec!(0.25))?, dec!(1.25));
    assert_eq!(schedule.calculate_commission(dec!(1200.75))?, dec!(6606));

    Ok(())
}

#[test]
fn test_breakdown_splits_units_across_tiers() -> Result<()> {
    let schedule = CommissionSchedule::default();

    let below = schedule.breakdown(dec!(500))?;
    assert_eq!(below.base_units, dec!(500));
    assert_eq!(below.excess_units, Decimal::ZERO);
    assert_eq!(below.excess_amount, Decimal::ZERO);
    assert_eq!(below.commission, dec!(2500));

    let above = schedule.breakdown(dec!(3000))?;
    assert_eq!(above.base_units, dec!(1000));
    assert_eq!(above.excess_units, dec!(2000));
    assert_eq!(above.base_amount, dec!(5000));
    assert_eq!(above.excess_amount, dec!(16000));
    assert_eq!(above.base_amount + above.excess_amount, above.commission);
    assert_eq!(above.average_rate, dec!(7));

    Ok(())
}

#[test]
fn test_custom_schedule_moves_the_threshold() -> Result<()> {
    let schedule: CommissionSchedule = toml::from_str("threshold = 200\nupper_rate = 10")?;

    assert_eq!(schedule.base_rate, dec!(5));
    assert_eq!(schedule.calculate_commission(dec!(200))?, dec!(1000));
    assert_eq!(schedule.calculate_commission(dec!(250))?, dec!(1500));

    Ok(())
}

#[test]
fn test_quantity_too_large_to_price_is_an_overflow_error() {
    let schedule = CommissionSchedule::default();
    let quantity = Decimal::MAX / dec!(4);

    assert_eq!(schedule.calculate_commission(quantity), Err(CommissionError::overflow(quantity)));
    assert_eq!(schedule.calculate_average_rate(quantity), Err(CommissionError::overflow(quantity)));
    assert!(schedule.breakdown(quantity).is_err());
}

#[test]
fn test_large_quantities_are_priced_exactly() -> Result<()> {
    let schedule = CommissionSchedule::default();
    let quantity = dec!(50000000000000000000000);

    assert_eq!(schedule.calculate_commission(quantity)?, dec!(399999999999999999999997000));

    Ok(())
}
