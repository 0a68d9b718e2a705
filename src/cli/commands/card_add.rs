//! `securevault card add` — store a new payment card.

use crate::cli::{log_audit, open_service, output, resolve_owner, secret_arg_or_prompt, Cli};
use crate::errors::Result;

/// Execute the `card add` command.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    cli: &Cli,
    label: &str,
    holder: &str,
    number: Option<&str>,
    expiry: &str,
    cvv: Option<&str>,
    card_type: Option<&str>,
    notes: Option<&str>,
) -> Result<()> {
    let (mut service, settings) = open_service(cli)?;
    let owner = resolve_owner(cli, &settings)?;

    // The sensitive fields can be prompted so they never hit shell history.
    let number = secret_arg_or_prompt(number, "Card number")?;
    let cvv = secret_arg_or_prompt(cvv, "CVV")?;

    let summary = service.add_card(
        &owner, label, holder, &number, expiry, &cvv, card_type, notes,
    )?;

    log_audit(cli, &owner, "card-add", Some("card"), Some(label));
    output::success(&format!(
        "Added {} card '{}' (id {})",
        summary.card_type, summary.label, summary.id
    ));

    Ok(())
}
