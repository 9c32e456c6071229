//! `datebot days`: preview the day menu a member would see.

use anyhow::Result;
use console::style;

use datebot_core::calendar;
use datebot_types::month::Month;
use datebot_types::selection::DayOption;

pub fn show_days(month: Month, year: Option<i32>, page: u32, json: bool) -> Result<()> {
    let year = year.unwrap_or_else(calendar::current_year);
    let days = calendar::days_in_month(month, year);
    let last_page = calendar::last_page(days);
    let page = calendar::clamp_page(days, page);
    let options = calendar::day_options(days, page);

    if json {
        let preview = serde_json::json!({
            "month": month.number(),
            "year": year,
            "days_in_month": days,
            "page": page,
            "last_page": last_page,
            "options": options,
        });
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} {} ({} dni), strona {}/{}",
        style("📅").bold(),
        style(month.name()).cyan().bold(),
        year,
        days,
        page,
        last_page
    );
    println!();
    for option in &options {
        println!("  {}", format_option(option));
    }
    println!();

    Ok(())
}

fn format_option(option: &DayOption) -> String {
    if option.value.parse::<u32>().is_ok() {
        format!("{:>3}  {}", option.label, style(&option.description).dim())
    } else {
        format!("{}  {}", style(&option.label).yellow(), style(format!("[{}]", option.value)).dim())
    }
}
