/// debt payoff - snowball vs avalanche with a pinned clock
use calc_engine::{DebtItem, DebtPayoffInput, Money, PayoffStrategy, Rate, SafeTimeProvider, TimeSource};
use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=calc_engine=debug shows each simulation
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    ));

    let mut input = DebtPayoffInput::default();
    input.add_debt(DebtItem::new(
        "Store Card",
        Money::from_major(1_800),
        Rate::from_percent(dec!(24.99)),
        Money::from_major(45),
    ));

    let comparison = input.compare()?;
    for strategy in [PayoffStrategy::Snowball, PayoffStrategy::Avalanche] {
        let result = comparison.result(strategy);
        println!("=== {strategy} ===");
        println!("months:         {}", result.payoff_months);
        println!("total interest: ${}", result.total_interest);
        if let Some(label) = result.payoff_date_label(&time) {
            println!("debt free:      {label}");
        }
        for milestone in &result.payoff_order {
            println!("  {:<14} paid off in month {}", milestone.name, milestone.month);
        }
        println!();
    }

    println!(
        "recommended: {} (saves ${}, {} months)",
        comparison.recommended(),
        comparison.interest_savings(),
        comparison.months_saved()
    );

    // a minimum that never covers the interest
    let stuck = DebtPayoffInput {
        debts: vec![DebtItem::new(
            "Payday Loan",
            Money::from_major(10_000),
            Rate::from_percentage(24),
            Money::from_major(100),
        )],
        extra_payment: Money::ZERO,
        strategy: PayoffStrategy::Avalanche,
    };
    if let Err(err) = stuck.calculate()?.require_paid_off() {
        println!("\n{err}");
    }

    Ok(())
}
