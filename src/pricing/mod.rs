pub mod calculator;
pub mod catalog;
pub mod loader;
pub mod models;
pub mod sweep;

pub use calculator::{calculate_cost, CostCalculator};
pub use catalog::PriceCatalog;
pub use loader::{load_catalog_file, parse_catalog_json, parse_catalog_toml, CatalogEntry};
pub use models::{CostEstimate, ModelPrice, PriceRate, UsageProfile};
pub use sweep::{
    build_dashboard, compare_models, token_breakdown, user_evolution, ComparisonRow,
    DashboardReport, EvolutionPoint, TokenBreakdown, UserRange,
};
