//! Authentication commands.

use anyhow::{Result, bail};
use resumatch_core::domain::{Registration, Role};
use resumatch_infra::LoginOutcome;

use super::{Context, password_or_prompt, value_or_prompt};
use crate::output::{self, OutputFormat};

/// Log in and store the issued tokens.
pub async fn login(ctx: &Context, username: Option<String>, password: Option<String>) -> Result<()> {
    let username = value_or_prompt(username, "Username")?;
    if username.is_empty() {
        bail!("Username is required");
    }
    let password = password_or_prompt(password)?;
    if password.is_empty() {
        bail!("Password is required");
    }

    let outcome = ctx.api.login(&username, &password).await?;
    report_login(&outcome, &username, &ctx.format)
}

/// Create an account, then log in with it.
pub async fn signup(
    ctx: &Context,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Role,
) -> Result<()> {
    let registration = Registration {
        username: value_or_prompt(username, "Username")?,
        email: value_or_prompt(email, "Email")?,
        password: password_or_prompt(password)?,
        role,
    };
    if registration.username.is_empty()
        || registration.email.is_empty()
        || registration.password.is_empty()
    {
        bail!("Username, email and password are required");
    }

    let outcome = ctx.api.signup_and_login(&registration).await?;
    report_login(&outcome, &registration.username, &ctx.format)
}

fn report_login(outcome: &LoginOutcome, username: &str, format: &OutputFormat) -> Result<()> {
    match outcome.rejection_message() {
        None => {
            output::print_success(&format!("Logged in as {username}"), format);
            Ok(())
        }
        Some(message) => bail!(message),
    }
}

pub async fn logout(ctx: &Context) -> Result<()> {
    ctx.api.logout().await?;
    output::print_success("Logged out", &ctx.format);
    Ok(())
}

/// Report whether a session is stored.
pub async fn status(ctx: &Context) -> Result<()> {
    let authenticated = ctx.api.client().is_authenticated().await?;
    let base_url = &ctx.api.client().config().base_url;

    if ctx.format.is_json() {
        output::print_json(&serde_json::json!({
            "authenticated": authenticated,
            "api_base_url": base_url,
        }));
        return Ok(());
    }

    output::print_row("API", base_url);
    output::print_row(
        "Session",
        if authenticated {
            "logged in"
        } else {
            "not logged in"
        },
    );
    Ok(())
}
