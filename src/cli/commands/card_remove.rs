//! `securevault card remove` — delete a card.

use dialoguer::Confirm;

use crate::cli::{log_audit, open_service, output, resolve_owner, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `card remove` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete card '{id}'?"))
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

    service.remove_card(&owner, id)?;

    log_audit(cli, &owner, "card-remove", Some("card"), Some(id));
    output::success("Card removed.");

    Ok(())
}
