use crate::error::Result;
use crate::settings::load_settings;

pub fn run(query: &str, limit: Option<usize>, recent: &[String]) -> Result<()> {
    let settings = load_settings();
    let mut index = settings.search_index();
    for q in recent {
        index.commit(q);
    }

    if query.trim().is_empty() && !index.recent().is_empty() {
        println!("Recent searches:");
        for q in index.recent() {
            println!("  {q}");
        }
        println!();
    }

    let suggestions = index.suggestions(query, limit.unwrap_or(settings.max_suggestions));
    if suggestions.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }
    println!("Suggestions:");
    for s in &suggestions {
        println!("  {s}");
    }
    Ok(())
}
