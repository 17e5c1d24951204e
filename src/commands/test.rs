use anyhow::Result;
use colored::Colorize;
use llm_cost_calculator::config::Config;
use tracing::info;

use super::build_calculator;

/// Execute the test command
///
/// The configuration was already loaded and validated by the caller;
/// this also assembles the price catalog and prints a summary.
pub fn execute(cfg: &Config) -> Result<()> {
    println!("{}", "Testing configuration...".bold());
    info!("Building price catalog");

    let calculator = build_calculator(cfg)?;

    println!("{}", "✓ Configuration test successful".green());
    println!();

    println!("{}", "Configuration Summary:".bold());
    println!("  {}: {}:{}", "Server".cyan(), cfg.server.host, cfg.server.port);
    println!("  {}: {}", "Log Level".cyan(), cfg.server.log_level);
    println!("  {}: {}", "Log Format".cyan(), cfg.server.log_format);
    println!();

    let defaults = &cfg.defaults;
    println!("  {}:", "Defaults".cyan());
    println!("    Model: {}", defaults.model);
    println!("    Users: {}", defaults.num_users);
    println!("    Requests per user / month: {}", defaults.requests_per_month);
    println!(
        "    Avg tokens: {} in / {} out",
        defaults.avg_tokens_input, defaults.avg_tokens_output
    );
    if !calculator.catalog().contains(&defaults.model) {
        println!(
            "    {}",
            format!("⚠ default model '{}' is not in the catalog", defaults.model)
                .as_str()
                .yellow()
        );
    }
    println!();

    let limits = &cfg.limits;
    println!(
        "  {}: {}",
        "Input Clamping".cyan(),
        if limits.clamp { "enabled" } else { "disabled" }
    );
    println!(
        "    Users: {}..={}",
        limits.num_users.min, limits.num_users.max
    );
    println!(
        "    Requests: {}..={}",
        limits.requests_per_month.min, limits.requests_per_month.max
    );
    println!(
        "    Input tokens: {}..={}",
        limits.avg_tokens_input.min, limits.avg_tokens_input.max
    );
    println!(
        "    Output tokens: {}..={}",
        limits.avg_tokens_output.min, limits.avg_tokens_output.max
    );
    println!();

    println!(
        "  {}: {}..={} step {}",
        "Sweep".cyan(),
        cfg.sweep.start,
        cfg.sweep.end,
        cfg.sweep.step
    );
    println!();

    println!("  {}: {} models", "Catalog".cyan(), calculator.catalog().len());
    for price in calculator.catalog().iter() {
        println!("    - {} ({})", price.model_name, price.provider);
    }

    info!("Configuration validation completed successfully");
    Ok(())
}
