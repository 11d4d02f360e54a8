use crate::output::{print_json, print_table};
use anyhow::{anyhow, bail, Result};
use clap::Subcommand;
use lev_core::waitlist::SqliteWaitlist;
use lev_core::Email;
use std::path::{Path, PathBuf};

use super::serve::DEFAULT_DB_FILE;

pub const SUCCESS_MESSAGE: &str = "You're on the waitlist 🎉";
pub const FALLBACK_ERROR: &str = "Something went wrong";

// ---------------------------------------------------------------------------
// Subcommand definition
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug)]
pub enum WaitlistSubcommand {
    /// Sign up through a running server
    Join {
        email: String,
        /// Base URL of the site server
        #[arg(long, env = "LEV_API_URL", default_value = "http://localhost:3000")]
        api: String,
    },
    /// List signups in the local SQLite database
    List {
        #[arg(long, env = "LEV_DB", default_value = DEFAULT_DB_FILE)]
        db: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcommand: WaitlistSubcommand, json: bool) -> Result<()> {
    match subcommand {
        WaitlistSubcommand::Join { email, api } => join(&api, &email, json),
        WaitlistSubcommand::List { db } => {
            let path = if db.is_absolute() { db } else { root.join(db) };
            list(&path, json)
        }
    }
}

// ---------------------------------------------------------------------------
// join
// ---------------------------------------------------------------------------

fn join(api: &str, email: &str, json: bool) -> Result<()> {
    precheck(email)?;
    let url = format!("{}/api/waitlist", api.trim_end_matches('/'));
    tracing::debug!(%url, "submitting waitlist signup");

    let (ok, body) = match ureq::post(&url).send_json(serde_json::json!({ "email": email })) {
        Ok(response) => (true, read_body(response)),
        Err(ureq::Error::Status(_, response)) => (false, read_body(response)),
        Err(ureq::Error::Transport(t)) => return Err(anyhow!("could not reach {url}: {t}")),
    };

    if json {
        print_json(&body)?;
        if !ok {
            bail!(status_message(false, &body));
        }
        return Ok(());
    }

    let message = status_message(ok, &body);
    if !ok {
        bail!(message);
    }
    println!("{message}");
    Ok(())
}

fn read_body(response: ureq::Response) -> serde_json::Value {
    response
        .into_json::<serde_json::Value>()
        .unwrap_or(serde_json::Value::Null)
}

/// The message a signup form shows for a response.
pub fn status_message(ok: bool, body: &serde_json::Value) -> String {
    if ok {
        return SUCCESS_MESSAGE.to_string();
    }
    body.get("error")
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_ERROR)
        .to_string()
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

fn list(path: &Path, json: bool) -> Result<()> {
    if !path.exists() {
        bail!("no waitlist database at {}", path.display());
    }
    let store = SqliteWaitlist::open(path)?;
    let entries = store.list()?;

    if json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("No signups yet.");
        return Ok(());
    }
    let rows = entries
        .iter()
        .map(|e| vec![e.email.clone(), e.created_at.to_rfc3339()])
        .collect();
    print_table(&["EMAIL", "JOINED"], rows);
    Ok(())
}

/// Validate locally before hitting the network, so obvious typos fail fast
/// with the same message the server would return.
pub fn precheck(email: &str) -> Result<()> {
    Email::parse(Some(email))?;
    Ok(())
}
