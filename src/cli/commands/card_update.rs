//! `securevault card update` — change selected card fields.

use crate::cli::{log_audit, open_service, output, resolve_owner, Cli};
use crate::errors::{Result, VaultError};
use crate::record::CardUpdate;

/// Execute the `card update` command.
pub fn execute(cli: &Cli, id: &str, update: CardUpdate) -> Result<()> {
    if update.is_empty() {
        output::info("Nothing to update — pass at least one field flag.");
        return Ok(());
    }

    let (mut service, settings) = open_service(cli)?;
    let owner = resolve_owner(cli, &settings)?;

    match service.update_card(&owner, id, update.clone()) {
        Ok(()) => {}
        Err(VaultError::Conflict) => {
            output::warning("Card changed concurrently — retrying.");
            service.update_card(&owner, id, update)?;
        }
        Err(e) => return Err(e),
    }

    log_audit(cli, &owner, "card-update", Some("card"), Some(id));
    output::success("Card updated.");

    Ok(())
}
