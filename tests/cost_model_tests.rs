/// Integration tests for the cost model over the reference catalog
use llm_cost_calculator::{
    error::CostError,
    pricing::{calculate_cost, CostCalculator, PriceCatalog, UsageProfile},
};
use std::sync::Arc;

fn default_usage() -> UsageProfile {
    UsageProfile {
        num_users: 2000,
        requests_per_month: 150.0,
        avg_tokens_input: 500.0,
        avg_tokens_output: 200.0,
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn test_invariants_hold_for_every_catalog_model() {
    let catalog = PriceCatalog::reference();

    for price in catalog.iter() {
        for num_users in [100, 2000, 19_100] {
            let usage = default_usage().with_users(num_users);
            let estimate = calculate_cost(&price.rate, &usage).unwrap();

            assert!(
                approx_eq(
                    estimate.total_monthly_cost,
                    estimate.monthly_input_cost + estimate.monthly_output_cost
                ),
                "{}: total != input + output",
                price.model_name
            );
            assert!(
                approx_eq(
                    estimate.cost_per_user_per_month,
                    estimate.total_monthly_cost / f64::from(num_users)
                ),
                "{}: per-user mismatch",
                price.model_name
            );
            assert!(estimate.total_monthly_cost >= 0.0);
        }
    }
}

#[test]
fn test_default_scenario_totals() {
    let calculator = CostCalculator::new(Arc::new(PriceCatalog::builtin()));
    let usage = default_usage();

    // (model, expected monthly total) for 2000 users, 150 requests, 500 in / 200 out
    let expected = [
        ("Mistral AI", 405.0 + 1440.0),
        ("OpenAPI GPT4", 4500.0 + 3600.0),
        ("OpenAPI GPT3.5-turbo", 75.0 + 90.0),
        ("Claude3 Haiku", 37.5 + 75.0),
        ("Claude3 Sonnet", 450.0 + 900.0),
        ("Claude3 Opus", 2250.0 + 4500.0),
    ];

    for (model, total) in expected {
        let estimate = calculator.estimate(model, &usage).unwrap();
        assert!(
            approx_eq(estimate.total_monthly_cost, total),
            "{}: expected {}, got {}",
            model,
            total,
            estimate.total_monthly_cost
        );
    }
}

#[test]
fn test_zero_users_is_rejected_for_every_model() {
    let usage = default_usage().with_users(0);
    for price in PriceCatalog::reference().iter() {
        let err = calculate_cost(&price.rate, &usage).unwrap_err();
        assert!(matches!(err, CostError::InvalidArgument(_)));
    }
}

#[test]
fn test_per_user_cost_independent_of_user_count() {
    let rate = PriceCatalog::reference().get("Claude3 Sonnet").unwrap().rate;
    let baseline = calculate_cost(&rate, &default_usage()).unwrap();

    for num_users in [1, 7, 100, 20_000, 1_000_000] {
        let estimate = calculate_cost(&rate, &default_usage().with_users(num_users)).unwrap();
        assert!(approx_eq(
            estimate.cost_per_user_per_month,
            baseline.cost_per_user_per_month
        ));
    }
}
