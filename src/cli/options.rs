use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::models::{TxnStatus, TxnType, ACCOUNT_OPTIONS, CATEGORY_OPTIONS};

pub fn run() -> Result<()> {
    let statuses: Vec<&str> = TxnStatus::ALL.iter().map(TxnStatus::as_str).collect();
    let types: Vec<&str> = TxnType::ALL.iter().map(TxnType::as_str).collect();

    let mut table = Table::new();
    table.set_header(vec!["Filter", "Values"]);
    table.add_row(vec![Cell::new("--category"), Cell::new(CATEGORY_OPTIONS.join(", "))]);
    table.add_row(vec![Cell::new("--status"), Cell::new(statuses.join(", "))]);
    table.add_row(vec![Cell::new("--account"), Cell::new(ACCOUNT_OPTIONS.join(", "))]);
    table.add_row(vec![Cell::new("--type"), Cell::new(types.join(", "))]);
    println!("Filter Options\n{table}");
    Ok(())
}
