use crate::error::{LensError, Result};
use crate::settings::{load_settings, save_settings, settings_path, Settings};

pub fn run(init: bool) -> Result<()> {
    let path = settings_path();
    if init {
        if path.exists() {
            return Err(LensError::Settings(format!(
                "{} already exists; edit it directly",
                path.display()
            )));
        }
        save_settings(&Settings::default())?;
        println!("Wrote default settings to {}", path.display());
        return Ok(());
    }

    let settings = load_settings();
    let index = settings.search_index();
    println!("Settings:   {}", path.display());
    println!(
        "Data file:  {}",
        settings.data_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "Recent:     {} max, seeded with {}",
        index.recent_capacity(),
        index.recent().join(", ")
    );
    println!(
        "Suggest:    {} max from {}",
        settings.max_suggestions,
        index.vocabulary().join(", ")
    );
    Ok(())
}
