use anyhow::Result;
use colored::Colorize;
use homepro::estimator::{self, AreaBreakdown, PlotSpec};
use homepro::format::{format_area, format_vnd};

/// Execute the estimate command
pub fn execute(spec: &PlotSpec, json: bool) -> Result<()> {
    let breakdown = estimator::estimate_checked(spec)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    print_breakdown(spec, &breakdown);
    Ok(())
}

fn print_breakdown(spec: &PlotSpec, b: &AreaBreakdown) {
    println!("{}", "Construction estimate".bold());
    println!(
        "  {}: {} x {} m, {} floor(s), package {}, quality {}",
        "Plot".cyan(),
        spec.width,
        spec.length,
        spec.floors,
        spec.contract_package,
        spec.quality_tier
    );
    println!();
    println!("  {:<22} {:>14}", "Plot area", format_area(b.plot_area));
    println!(
        "  {:<22} {:>14}",
        format!("Foundation ({})", spec.foundation_type),
        format_area(b.foundation_area)
    );
    println!("  {:<22} {:>14}", "Floors", format_area(b.floors_area));
    if spec.has_basement {
        println!("  {:<22} {:>14}", "Basement", format_area(b.basement_area));
    }
    println!(
        "  {:<22} {:>14}",
        format!("Roof ({})", spec.roof_type),
        format_area(b.roof_area)
    );
    println!(
        "  {:<22} {:>14}",
        "Total converted area".bold(),
        format_area(b.total_converted_area)
    );
    println!();
    println!("  {:<22} {:>14}", "Unit price", format_vnd(b.unit_price));
    println!(
        "  {:<22} {}",
        "Estimated total".bold(),
        format_vnd(b.total_price).yellow().bold()
    );
}
