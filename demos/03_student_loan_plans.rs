/// student loan plans - standard, extended and graduated side by side
use calc_engine::{compare_student_loan_plans, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let plans = compare_student_loan_plans(Money::from_major(35_000), Rate::from_percent(dec!(5.5)))?;

    println!("{:<22} {:>10} {:>12} {:>12}", "plan", "first", "total", "interest");
    for plan in &plans {
        println!(
            "{:<22} {:>10} {:>12} {:>12}",
            plan.plan_label, plan.monthly_payment, plan.total_payment, plan.total_interest
        );
    }

    // payments of the graduated plan at each step
    if let Some(graduated) = plans.last() {
        println!();
        for row in graduated.schedule.iter().step_by(24) {
            println!("month {:>3}: ${}", row.period, row.payment);
        }
        if let Some(last) = graduated.schedule.last() {
            println!("month {:>3}: ${} (closing)", last.period, last.payment);
        }
    }

    Ok(())
}
