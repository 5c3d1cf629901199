/// quick start - minimal example to get started
use calc_engine::{amortize, compound_growth, CompoundingFrequency, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a $200,000 mortgage at 6% over 30 years
    let loan = amortize(Money::from_major(200_000), Rate::from_percentage(6), 360)?;
    println!("monthly payment: ${}", loan.monthly_payment);
    println!("total interest:  ${}", loan.total_interest);

    // first year of the schedule
    for row in loan.schedule.iter().take(12) {
        println!(
            "{:>3}  principal ${:>9}  interest ${:>9}  balance ${:>11}",
            row.period, row.principal_portion, row.interest_portion, row.remaining_balance
        );
    }

    // $10,000 left to grow at 7% for 10 years
    let growth = compound_growth(
        Money::from_major(10_000),
        Money::ZERO,
        Rate::from_percentage(7),
        10,
        CompoundingFrequency::Monthly,
    )?;
    println!("\nfinal balance after 10 years: ${}", growth.final_balance);

    Ok(())
}
