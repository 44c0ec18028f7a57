//! Resume commands.

use std::path::Path;

use anyhow::Result;
use resumatch_core::domain::ResourceId;
use resumatch_core::highlight::Highlighter;
use serde_json::Value;

use super::Context;
use crate::output;

pub async fn upload(ctx: &Context, path: &Path) -> Result<()> {
    let record = ctx.api.upload_resume(path).await?;

    if ctx.format.is_json() {
        output::print_json(&record);
    } else {
        let id = match record.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(id) => id.to_string(),
            None => "?".to_string(),
        };
        output::print_success(&format!("Uploaded {} (id {id})", path.display()), &ctx.format);
    }
    Ok(())
}

pub async fn resumes_list(ctx: &Context, q: Option<&str>, limit: usize, offset: usize) -> Result<()> {
    let resumes = ctx.api.list_resumes(q, limit, offset).await?;

    if ctx.format.is_json() {
        output::print_json(&resumes);
        return Ok(());
    }

    if resumes.is_empty() {
        println!("No resumes found.");
        return Ok(());
    }

    output::print_heading("Resumes");
    for resume in &resumes {
        println!(
            "  {:<8} {:<40} {}",
            resume.id.as_str(),
            resume.display_name(),
            resume.status.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

/// Show a resume's chunks, optionally with search terms highlighted.
pub async fn resumes_show(ctx: &Context, id: &str, highlight: Option<&str>) -> Result<()> {
    let resume = ctx.api.get_resume(&ResourceId::from(id)).await?;

    if ctx.format.is_json() {
        output::print_json(&resume);
        return Ok(());
    }

    let highlighter = Highlighter::from_query(highlight.unwrap_or_default());

    output::print_heading(&resume.display_name());
    output::print_row("ID", resume.id.as_str());
    output::print_row("Status", resume.status.as_deref().unwrap_or("-"));
    output::print_divider();
    for chunk in &resume.chunks {
        println!("{}\n", output::highlight(&highlighter, &chunk.chunk_text));
    }
    Ok(())
}
