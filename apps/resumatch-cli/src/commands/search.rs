//! Search commands.

use anyhow::Result;
use resumatch_core::domain::{ScoredResume, SearchQuery};
use resumatch_core::highlight::Highlighter;
use resumatch_infra::history::record_search;
use tracing::warn;

use super::Context;
use crate::output;

pub async fn ask(ctx: &Context, query: &str, k: usize) -> Result<()> {
    let answers = ctx.api.ask(query, k).await?;

    if ctx.format.is_json() {
        output::print_json(&answers);
        return Ok(());
    }

    let highlighter = Highlighter::from_query(query);
    if answers.is_empty() {
        println!("No matches.");
    }
    for answer in &answers {
        print_scored(&highlighter, answer.resume_id.as_str(), answer);
    }
    Ok(())
}

/// Run a search, show the page and remember it in the history.
pub async fn search(ctx: &Context, query: SearchQuery) -> Result<()> {
    let page = ctx.api.search(&query).await?;

    if let Err(e) = record_search(&ctx.history, &query).await {
        warn!(error = %e, "Failed to record search history");
    }

    if ctx.format.is_json() {
        output::print_json(&page);
        return Ok(());
    }

    if page.hits.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    let highlighter = Highlighter::from_query(&query.text);
    for hit in &page.hits {
        print_scored(&highlighter, &hit.filename, &hit.answer);
    }
    if page.has_more {
        println!("More results available, raise --page-size to see them.");
    }
    Ok(())
}

fn print_scored(highlighter: &Highlighter, label: &str, answer: &ScoredResume) {
    output::print_heading(&format!("{label}  (score {:.3})", answer.score));
    for evidence in &answer.evidence {
        println!("  {}", output::highlight(highlighter, &evidence.text));
    }
}
