//! `securevault remove` — delete a password entry.

use dialoguer::Confirm;

use crate::cli::{log_audit, open_service, output, resolve_owner, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete password entry '{id}'?"))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let (mut service, settings) = open_service(cli)?;
    let owner = resolve_owner(cli, &settings)?;

    service.remove_credential(&owner, id)?;

    log_audit(cli, &owner, "remove", Some("password"), Some(id));
    output::success("Password entry removed.");

    Ok(())
}
