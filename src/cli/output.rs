//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::record::{CardSummary, CredentialSummary};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of password entries (never any secret material).
pub fn print_credentials_table(entries: &[CredentialSummary]) {
    if entries.is_empty() {
        info("No password entries in this vault yet.");
        tip("Run `securevault add <NAME>` to add your first entry.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Username", "Updated"]);

    for entry in entries {
        table.add_row(vec![
            entry.id.clone(),
            entry.name.clone(),
            entry.username.clone(),
            entry.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a table of card entries (number and CVV never appear).
pub fn print_cards_table(entries: &[CardSummary]) {
    if entries.is_empty() {
        info("No cards in this vault yet.");
        tip("Run `securevault card add` to add your first card.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Label", "Holder", "Type", "Expiry", "Notes"]);

    for entry in entries {
        table.add_row(vec![
            entry.id.clone(),
            entry.label.clone(),
            entry.holder_name.clone(),
            entry.card_type.clone(),
            entry.expiry.clone(),
            entry.notes.clone(),
        ]);
    }

    println!("{table}");
}
