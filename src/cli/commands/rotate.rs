//! `securevault rotate` — change an entry's password.

use crate::cli::{log_audit, open_service, output, resolve_owner, secret_arg_or_prompt, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `rotate` command.
///
/// Retries once on a concurrent-modification conflict; after that the
/// error is surfaced so the user can re-run with fresh state.
pub fn execute(cli: &Cli, id: &str, old: Option<&str>, new: Option<&str>) -> Result<()> {
    let (mut service, settings) = open_service(cli)?;
    let owner = resolve_owner(cli, &settings)?;

    let old = secret_arg_or_prompt(old, "Current password")?;
    let new = secret_arg_or_prompt(new, "New password")?;

    match service.rotate_credential(&owner, id, &old, &new) {
        Ok(()) => {}
        // One retry: the conflict means another writer got in between
        // our read and write, so the checks must re-run on fresh state.
        Err(VaultError::Conflict) => {
            output::warning("Entry changed concurrently — retrying.");
            service.rotate_credential(&owner, id, &old, &new)?;
        }
        Err(e) => return Err(e),
    }

    log_audit(cli, &owner, "rotate", Some("password"), Some(id));
    output::success("Password rotated.");

    Ok(())
}
