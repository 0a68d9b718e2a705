//! `securevault card list` — display cards in a table.

use crate::cli::{open_service, output, resolve_owner, Cli};
use crate::errors::Result;

/// Execute the `card list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (service, settings) = open_service(cli)?;
    let owner = resolve_owner(cli, &settings)?;

    let entries = service.list_cards(&owner)?;

    output::info(&format!("{owner} — {} card(s)", entries.len()));
    output::print_cards_table(&entries);

    Ok(())
}
