//! `securevault show` — decrypt one password entry.
//!
//! The decrypted password is printed and, unless `--no-clip` is set,
//! handed to the system clipboard.  Clipboard failure is a warning,
//! never an error — the decrypt already succeeded.

use crate::cli::{log_audit, open_service, output, resolve_owner, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: &str, no_clip: bool) -> Result<()> {
    let (service, settings) = open_service(cli)?;
    let owner = resolve_owner(cli, &settings)?;

    let details = service.credential_details(&owner, id)?;

    println!("Name:     {}", details.name);
    if !details.username.is_empty() {
        println!("Username: {}", details.username);
    }
    println!("Password: {}", details.password);

    if !no_clip {
        copy_to_clipboard(&details.password);
    }

    log_audit(cli, &owner, "show", Some("password"), Some(&details.name));

    Ok(())
}

/// Best-effort clipboard sink, invoked only after a successful decrypt.
fn copy_to_clipboard(value: &str) {
    match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(value.to_string())) {
        Ok(()) => output::success("Password copied to clipboard."),
        Err(e) => output::warning(&format!("Clipboard unavailable: {e}")),
    }
}
