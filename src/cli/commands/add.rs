//! `securevault add` — store a new password entry.

use crate::cli::{log_audit, open_service, output, resolve_owner, secret_arg_or_prompt, Cli};
use crate::errors::Result;

/// Execute the `add` command.
pub fn execute(cli: &Cli, name: &str, password: Option<&str>, username: Option<&str>) -> Result<()> {
    let (mut service, settings) = open_service(cli)?;
    let owner = resolve_owner(cli, &settings)?;

    let password = secret_arg_or_prompt(password, &format!("Password for '{name}'"))?;

    let summary = service.add_credential(&owner, name, username, &password)?;

    log_audit(cli, &owner, "add", Some("password"), Some(name));
    output::success(&format!("Added password entry '{}' (id {})", summary.name, summary.id));

    Ok(())
}
