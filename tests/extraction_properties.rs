use price_etl::core::amount::{format_amount, parse_amount};
use price_etl::core::scanner::scan_prices;
use price_etl::domain::model::PlanTexts;
use price_etl::PriceExtractor;

fn extractor() -> PriceExtractor {
    PriceExtractor::new("/month")
}

fn plan_list(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_displayed_amounts_round_trip() {
    let text = "£6/month £ 10.50 per month €4,99/mo $1,299.99 a month £12.5/month";
    for token in scan_prices(text) {
        let amount = token
            .amount_text
            .trim_start_matches(|c| matches!(c, '£' | '$' | '€'))
            .trim_end_matches("/month");
        let value = parse_amount(amount).unwrap();
        assert_eq!(value, token.amount_value);
        assert_eq!(format_amount(value), amount);
    }
}

#[test]
fn test_starter_with_term_and_explicit_renewal() {
    let row = extractor()
        .extract_plan("Starter", "Starter £6/month for 6 months Then only £10/month")
        .to_row("src");

    assert_eq!(row.introductory_offer, "£6/month");
    assert_eq!(row.duration, "6 months");
    assert_eq!(row.standard_price, "£10/month");
}

#[test]
fn test_pro_without_term_or_renewal() {
    let row = extractor()
        .extract_plan("Pro", "Pro £8/month £15/month")
        .to_row("src");

    assert_eq!(row.introductory_offer, "£8/month");
    assert_eq!(row.duration, "");
    assert_eq!(row.standard_price, "£15/month");
}

#[test]
fn test_single_token_without_term() {
    let record = extractor().extract_plan("Plus", "Plus only £5 per month, cancel any time");

    assert_eq!(record.introductory_price.as_deref(), Some("£5/month"));
    assert_eq!(record.standard_price, None);
    assert_eq!(record.term_months, None);
}

#[test]
fn test_explicit_renewal_always_wins() {
    let cases = [
        // Backfill would pick £30.
        "£2/month for 3 months, was £30/month. Thereafter £12/month",
        // Magnitude ordering would pick £25.
        "£1/month £25/month Then only £9/month",
        // Same amount as the intro.
        "£4/month for 12 months Then £4/month",
    ];
    for text in cases {
        let expected = price_etl::core::renewal::detect_explicit_renewal(text)
            .unwrap()
            .amount_text;
        let record = extractor().extract_plan("Plan", text);
        assert_eq!(record.standard_price.as_deref(), Some(expected.as_str()), "{text}");
    }
}

#[test]
fn test_casual_then_before_intro_is_not_a_renewal() {
    let record = extractor().extract_plan(
        "Plus",
        "Sign up then pay £1/month for 12 months. Renews at £5/month",
    );

    assert_eq!(record.introductory_price.as_deref(), Some("£1/month"));
    assert_eq!(record.term_months, Some(12));
    assert_eq!(record.standard_price.as_deref(), Some("£5/month"));
}

#[test]
fn test_term_preceding_all_prices_falls_through_to_magnitude() {
    let record = extractor().extract_plan("Expert", "Expert for 24 months £20/month £14/month");

    assert_eq!(record.term_months, Some(24));
    assert_eq!(record.introductory_price.as_deref(), Some("£14/month"));
    assert_eq!(record.standard_price.as_deref(), Some("£20/month"));
}

#[test]
fn test_plan_without_prices_is_excluded() {
    let mut texts = PlanTexts::new();
    texts.insert("Expert".to_string(), "Expert Call us for a quote".to_string());
    texts.insert("Pro".to_string(), "Pro £8/month £15/month".to_string());

    let report = extractor().extract_all(&plan_list(&["Pro", "Expert"]), &texts);

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].plan, "Pro");
    assert_eq!(report.invalid, plan_list(&["Expert"]));
}

#[test]
fn test_extraction_is_idempotent() {
    let mut texts = PlanTexts::new();
    texts.insert(
        "Starter".to_string(),
        "Starter £1/month for 12 months Then only £6/month Add to cart".to_string(),
    );
    texts.insert("Plus".to_string(), "Plus £3/month £3/month £9/month".to_string());
    texts.insert("Pro".to_string(), "Pro €8,50 per month".to_string());
    let plans = plan_list(&["Starter", "Plus", "Pro", "Expert"]);

    let first = serde_json::to_vec(&extractor().extract_all(&plans, &texts).rows("src")).unwrap();
    let second = serde_json::to_vec(&extractor().extract_all(&plans, &texts).rows("src")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_period_is_carried_through() {
    let record = PriceExtractor::new("per month").extract_plan("Plus", "£3/month");
    assert_eq!(record.period, "per month");
}
