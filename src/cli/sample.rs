use std::path::PathBuf;

use crate::error::Result;
use crate::sample::sample_transactions;
use crate::settings::shellexpand_path;

pub fn run(output: Option<String>) -> Result<()> {
    let json = serde_json::to_string_pretty(&sample_transactions())?;
    match output {
        Some(path) => {
            let path = PathBuf::from(shellexpand_path(&path));
            std::fs::write(&path, format!("{json}\n"))?;
            println!("Wrote {} transactions to {}", sample_transactions().len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
