//! Search history commands.

use anyhow::{Result, anyhow, bail};
use resumatch_core::domain::{HistoryEntry, SearchHistory, SearchQuery};
use resumatch_core::ports::SearchHistoryStore;

use super::Context;
use crate::output;

pub async fn history_list(ctx: &Context) -> Result<()> {
    let history = ctx.history.load().await?;

    if ctx.format.is_json() {
        output::print_json(history.entries());
        return Ok(());
    }

    if history.is_empty() {
        println!("No recent searches.");
        return Ok(());
    }

    for (index, entry) in history.entries().iter().enumerate() {
        let mut line = entry.query.clone();
        if let Some(location) = &entry.location {
            line.push_str(&format!(" [location: {location}]"));
        }
        if let Some(experience) = &entry.experience {
            line.push_str(&format!(" [experience: {experience}]"));
        }
        println!(
            "  {index:>2}  {line}  ({})",
            entry.timestamp.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

/// Run a recorded search again.
pub async fn history_run(ctx: &Context, index: usize) -> Result<()> {
    let history = ctx.history.load().await?;
    let query = entry_query(&history, index)?;
    super::search(ctx, query).await
}

/// The search recorded at `index`, counting from the newest.
fn entry_query(history: &SearchHistory, index: usize) -> Result<SearchQuery> {
    history
        .entries()
        .get(index)
        .map(HistoryEntry::to_query)
        .ok_or_else(|| anyhow!("No search at index {index}"))
}

pub async fn history_remove(ctx: &Context, index: usize) -> Result<()> {
    let mut history = ctx.history.load().await?;
    let Some(entry) = history.remove(index) else {
        bail!("No search at index {index}");
    };
    ctx.history.save(&history).await?;

    output::print_success(&format!("Removed \"{}\"", entry.query), &ctx.format);
    Ok(())
}

pub async fn history_clear(ctx: &Context) -> Result<()> {
    let mut history = ctx.history.load().await?;
    history.clear();
    ctx.history.save(&history).await?;

    output::print_success("Search history cleared", &ctx.format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_query_rebuilds_filters() {
        let mut history = SearchHistory::default();
        history.record(HistoryEntry::from_query(
            &SearchQuery::new("rust").with_location("Berlin").with_experience("5"),
        ));
        history.record(HistoryEntry::from_query(&SearchQuery::new("python")));

        let query = entry_query(&history, 1).unwrap();
        assert_eq!(query.text, "rust");
        assert_eq!(query.location.as_deref(), Some("Berlin"));
        assert_eq!(query.experience.as_deref(), Some("5"));
        assert_eq!(entry_query(&history, 0).unwrap().text, "python");
    }

    #[test]
    fn test_entry_query_out_of_range() {
        let err = entry_query(&SearchHistory::default(), 3).unwrap_err();
        assert_eq!(err.to_string(), "No search at index 3");
    }
}
