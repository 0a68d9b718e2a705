//! `securevault list` — display password entries in a table.

use crate::cli::{open_service, output, resolve_owner, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (service, settings) = open_service(cli)?;
    let owner = resolve_owner(cli, &settings)?;

    let entries = service.list_credentials(&owner)?;

    output::info(&format!("{owner} — {} password entr(ies)", entries.len()));
    output::print_credentials_table(&entries);

    Ok(())
}
