//! `securevault generate` — print a random password.

use crate::cli::Cli;
use crate::errors::Result;
use crate::generator::{generate_password, GeneratorOptions};

/// Execute the `generate` command.
pub fn execute(
    _cli: &Cli,
    length: usize,
    no_lowercase: bool,
    no_uppercase: bool,
    no_digits: bool,
    no_symbols: bool,
) -> Result<()> {
    let options = GeneratorOptions {
        length,
        lowercase: !no_lowercase,
        uppercase: !no_uppercase,
        digits: !no_digits,
        symbols: !no_symbols,
    };

    let password = generate_password(&options)?;
    println!("{password}");

    Ok(())
}
