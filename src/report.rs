//! Terminal rendering of cost estimates and sweeps.

use crate::pricing::{
    ComparisonRow, CostEstimate, DashboardReport, EvolutionPoint, PriceCatalog, TokenBreakdown,
    UsageProfile,
};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Format an amount as `$12 345.67`: two decimals, thousands separated by a space
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${}", amount);
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

fn format_percentage(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

fn amount_cell(amount: f64) -> Cell {
    Cell::new(format_currency(amount)).set_alignment(CellAlignment::Right)
}

pub fn comparison_table(rows: &[ComparisonRow]) -> Table {
    let mut table = new_table(&["Model", "Estimated Monthly Cost", "Cost per User per Month"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.model),
            amount_cell(row.total_monthly_cost),
            amount_cell(row.cost_per_user_per_month),
        ]);
    }
    table
}

pub fn evolution_table(points: &[EvolutionPoint]) -> Table {
    let mut table = new_table(&[
        "Model",
        "Number of users",
        "Monthly cost",
        "Cost per User per Month",
    ]);
    for point in points {
        table.add_row(vec![
            Cell::new(&point.model),
            Cell::new(point.num_users).set_alignment(CellAlignment::Right),
            amount_cell(point.total_monthly_cost),
            amount_cell(point.cost_per_user_per_month),
        ]);
    }
    table
}

pub fn breakdown_table(breakdown: &TokenBreakdown) -> Table {
    let mut table = new_table(&["Cost Type", "Amount", "Share"]);
    table.add_row(vec![
        Cell::new("Input Tokens"),
        amount_cell(breakdown.input_cost),
        Cell::new(format_percentage(breakdown.input_share)),
    ]);
    table.add_row(vec![
        Cell::new("Output Tokens"),
        amount_cell(breakdown.output_cost),
        Cell::new(format_percentage(breakdown.output_share)),
    ]);
    table
}

pub fn catalog_table(catalog: &PriceCatalog) -> Table {
    let mut table = new_table(&[
        "Model",
        "Provider",
        "Input / 1K tokens",
        "Output / 1K tokens",
        "Currency",
    ]);
    for price in catalog.iter() {
        table.add_row(vec![
            Cell::new(&price.model_name),
            Cell::new(&price.provider),
            Cell::new(price.rate.input_rate).set_alignment(CellAlignment::Right),
            Cell::new(price.rate.output_rate).set_alignment(CellAlignment::Right),
            Cell::new(&price.currency),
        ]);
    }
    table
}

/// Labelled headline figures for one model
pub fn metric_lines(model: &str, estimate: &CostEstimate) -> Vec<String> {
    vec![
        format!(
            "Estimated monthly cost for {}: {}",
            model,
            format_currency(estimate.total_monthly_cost)
        ),
        format!(
            "Cost per user per month for {}: {}",
            model,
            format_currency(estimate.cost_per_user_per_month)
        ),
    ]
}

pub fn usage_lines(usage: &UsageProfile) -> Vec<String> {
    vec![
        format!("  Users:                      {}", usage.num_users),
        format!("  Requests per user / month:  {}", usage.requests_per_month),
        format!("  Avg input tokens:           {}", usage.avg_tokens_input),
        format!("  Avg output tokens:          {}", usage.avg_tokens_output),
    ]
}

/// Render the full dashboard as text
pub fn render_dashboard(report: &DashboardReport) -> String {
    let mut out = String::new();

    out.push_str("LLM API Cost Analysis\n");
    out.push_str("=====================\n\n");
    out.push_str("Inputs:\n");
    for line in usage_lines(&report.usage) {
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str("\nModel Cost Comparison:\n");
    out.push_str(&comparison_table(&report.comparison).to_string());

    out.push_str("\n\nEvolution of Cost with Number of Users for All Models:\n");
    out.push_str(&evolution_table(&report.evolution).to_string());

    out.push_str("\n\n");
    for line in metric_lines(&report.selected.model, &report.selected.estimate) {
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str("\nCost Breakdown by Token Type:\n");
    out.push_str(&breakdown_table(&report.breakdown).to_string());
    out.push('\n');

    out
}
