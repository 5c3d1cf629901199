/// share links - encode calculator inputs into a url and back
use calc_engine::share::{ShareQuery, Shareable, DEFAULT_SITE_URL};
use calc_engine::{DebtPayoffInput, PayoffStrategy, TipInput};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tip = TipInput {
        tip_percent: dec!(20),
        split_count: 4,
        ..TipInput::default()
    };
    let url = tip.share_url(DEFAULT_SITE_URL)?;
    println!("tip link:  {url}");

    let debts = DebtPayoffInput {
        strategy: PayoffStrategy::Snowball,
        ..DebtPayoffInput::default()
    };
    let url = debts.share_url(DEFAULT_SITE_URL)?;
    println!("debt link: {url}");

    // decoding skips anything it cannot use
    let query = ShareQuery::parse("?b=64.50&t=abc&s=0");
    let decoded = TipInput::from_query_or_default(&query);
    println!("\ndecoded tip input: {decoded:?}");
    println!("per person: ${}", decoded.calculate().per_person);

    Ok(())
}
