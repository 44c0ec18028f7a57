//! Job posting commands.

use anyhow::Result;
use resumatch_core::domain::{JobDraft, JobSubmission, ResourceId};

use super::Context;
use crate::output;

pub async fn jobs_create(
    ctx: &Context,
    title: &str,
    description: &str,
    requirements: &str,
) -> Result<()> {
    let submission = JobSubmission::new(JobDraft::from_form(title, description, requirements)?);
    let job = ctx.api.submit_job(&submission).await?;

    if ctx.format.is_json() {
        output::print_json(&job);
    } else {
        output::print_success(&format!("Created job {} ({})", job.id, job.title), &ctx.format);
    }
    Ok(())
}

pub async fn jobs_list(ctx: &Context) -> Result<()> {
    let jobs = ctx.api.list_jobs().await?;

    if ctx.format.is_json() {
        output::print_json(&jobs);
        return Ok(());
    }

    if jobs.is_empty() {
        println!("No jobs found.");
        return Ok(());
    }

    output::print_heading("Jobs");
    for job in &jobs {
        println!("  {:<8} {}", job.id.as_str(), job.title);
        if !job.requirements.is_empty() {
            println!("           requires: {}", job.requirements.join(", "));
        }
    }
    Ok(())
}

pub async fn jobs_match(ctx: &Context, id: &str, top_n: usize) -> Result<()> {
    let matches = ctx.api.match_job(&ResourceId::from(id), top_n).await?;

    if ctx.format.is_json() {
        output::print_json(&matches);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No matching resumes.");
        return Ok(());
    }

    output::print_heading(&format!("Top matches for job {id}"));
    for (rank, m) in matches.iter().enumerate() {
        println!("  {:>2}. resume {:<8} score {:.3}", rank + 1, m.resume_id.as_str(), m.score);
        if let Some(evidence) = m.evidence.first() {
            println!("      {}", evidence.text);
        }
    }
    Ok(())
}
