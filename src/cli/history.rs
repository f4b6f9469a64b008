use colored::Colorize;
use comfy_table::{Cell, Table};
use serde::Serialize;

use super::{load_store, FilterArgs, SourceArgs};
use crate::controller::{HistoryViewController, RenderModel, ViewState};
use crate::engine::{show_clear_all, FilterChip};
use crate::error::{LensError, Result};
use crate::fmt::signed_money;
use crate::grouper::{Direction, MonthGroup};
use crate::models::TxnStatus;
use crate::settings::load_settings;

#[derive(Serialize)]
struct HistoryJson<'a> {
    state: ViewState,
    chips: Vec<ChipJson<'a>>,
    #[serde(flatten)]
    render: &'a RenderModel,
}

#[derive(Serialize)]
struct ChipJson<'a> {
    text: String,
    #[serde(flatten)]
    chip: &'a FilterChip,
}

pub fn run(
    source: &SourceArgs,
    filters: &FilterArgs,
    remove_chip: &[usize],
    json: bool,
) -> Result<()> {
    let settings = load_settings();
    let store = load_store(source, &settings)?;

    let mut controller = HistoryViewController::new(store, settings.search_index());
    let mut panel = controller.filter_panel();
    filters.fill_panel(&mut panel);
    let criteria = panel.build()?;
    if let Some(query) = &filters.search {
        controller.set_search_text(query);
        controller.commit_search();
    }
    controller.apply_filter_panel(&criteria);

    // Chip numbers refer to the list before any removal.
    let shown = controller.chips().to_vec();
    for n in remove_chip {
        let chip = n
            .checked_sub(1)
            .and_then(|i| shown.get(i))
            .ok_or_else(|| {
                LensError::Other(format!("No filter chip #{n} ({} active)", shown.len()))
            })?;
        controller.remove_chip(chip);
    }

    if json {
        let view = HistoryJson {
            state: controller.state(),
            chips: controller
                .chips()
                .iter()
                .map(|chip| ChipJson {
                    text: chip.to_string(),
                    chip,
                })
                .collect(),
            render: controller.render_model(),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_chips(controller.chips());
    let model = controller.render_model();
    if let Some(message) = model.empty_state_message() {
        println!("{}", message.bold());
        if model.has_active_filters {
            println!(
                "Try adjusting your search criteria or clearing some filters to see more results."
            );
        }
        return Ok(());
    }
    for group in &model.groups {
        print_group(group);
    }
    Ok(())
}

fn print_chips(chips: &[FilterChip]) {
    if chips.is_empty() {
        return;
    }
    let rendered: Vec<String> = chips
        .iter()
        .enumerate()
        .map(|(i, chip)| format!("[{}] {chip}", i + 1))
        .collect();
    println!("Filters: {}", rendered.join("  "));
    if show_clear_all(chips) {
        println!("{}", "(omit the filter flags to clear all)".dimmed());
    }
    println!();
}

fn status_cell(status: TxnStatus) -> String {
    match status {
        TxnStatus::Completed => status.as_str().green().to_string(),
        TxnStatus::Pending => status.as_str().yellow().to_string(),
        TxnStatus::Failed => status.as_str().red().to_string(),
    }
}

fn print_group(group: &MonthGroup) {
    let noun = if group.count == 1 { "transaction" } else { "transactions" };
    let total = signed_money(group.total_amount);
    let (total, verb) = match group.direction() {
        Direction::Received => (total.green().to_string(), "received"),
        Direction::Spent => (total, "spent"),
    };
    println!(
        "{}  {} {noun}  {total} {verb}",
        group.label().bold(),
        group.count
    );

    let mut table = Table::new();
    table.set_header(vec![
        "Date", "Merchant", "Description", "Category", "Status", "Account", "Amount",
    ]);
    for t in &group.transactions {
        let amount = if t.amount.is_sign_negative() {
            signed_money(t.amount)
        } else {
            signed_money(t.amount).green().to_string()
        };
        table.add_row(vec![
            Cell::new(t.date.format("%b %d, %H:%M")),
            Cell::new(&t.merchant),
            Cell::new(&t.description),
            Cell::new(t.category.as_deref().unwrap_or("\u{2014}")),
            Cell::new(status_cell(t.status)),
            Cell::new(&t.account),
            Cell::new(amount),
        ]);
    }
    println!("{table}\n");
}
