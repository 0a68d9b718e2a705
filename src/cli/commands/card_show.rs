//! `securevault card show` — decrypt one card.

use crate::cli::{log_audit, open_service, output, resolve_owner, Cli};
use crate::errors::Result;

/// Execute the `card show` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let (service, settings) = open_service(cli)?;
    let owner = resolve_owner(cli, &settings)?;

    let details = service.card_details(&owner, id)?;

    println!("Label:   {}", details.label);
    println!("Holder:  {}", details.holder_name);
    println!("Number:  {}", details.number);
    println!("CVV:     {}", details.cvv);
    println!("Expiry:  {}", details.expiry);
    println!("Type:    {}", details.card_type);
    if !details.notes.is_empty() {
        println!("Notes:   {}", details.notes);
    }

    log_audit(cli, &owner, "card-show", Some("card"), Some(&details.label));
    output::tip("Card details are shown once and never logged.");

    Ok(())
}
