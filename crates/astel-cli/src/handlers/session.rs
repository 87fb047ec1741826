//! Login, logout and whoami handlers.

use anyhow::Result;
use astel_core::Session;
use chrono::{Duration, Local, Utc};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::utils::input;

/// Open a session, prompting for whatever was not given on the command line.
pub async fn login(ctx: &CliContext, user: Option<String>, password: Option<String>) -> Result<()> {
    let user = match user {
        Some(user) => user,
        None => input::prompt_string("User")?,
    };
    let password = match password {
        Some(password) => password,
        None => input::prompt_password("Password")?,
    };

    let session = ctx
        .sessions()
        .login(&user, &password)
        .await
        .map_err(CliError::from)?;

    println!(
        "Logged in as {}. Session closes after {} of inactivity or at {}.",
        session.user,
        format_duration(session.idle_timeout().unwrap_or_else(Duration::zero)),
        session.expires_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    Ok(())
}

pub async fn logout(ctx: &CliContext) -> Result<()> {
    ctx.sessions().logout().await.map_err(CliError::from)?;
    println!("Logged out.");
    Ok(())
}

/// Show the session that was just validated.
pub fn whoami(session: &Session) {
    let now = Utc::now();
    println!("User:          {}", session.user);
    println!(
        "Logged in at:  {}",
        session.issued_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    println!("Time left:     {}", format_duration(session.remaining(now)));
}

/// Human-readable duration with minute resolution.
fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes().max(0);
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}
