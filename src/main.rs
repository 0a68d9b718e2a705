use clap::Parser;
use securevault::cli::{CardAction, Cli, Commands};
use securevault::record::CardUpdate;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => securevault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref name,
            ref password,
            ref username,
        } => securevault::cli::commands::add::execute(
            &cli,
            name,
            password.as_deref(),
            username.as_deref(),
        ),
        Commands::List => securevault::cli::commands::list::execute(&cli),
        Commands::Show { ref id, no_clip } => {
            securevault::cli::commands::show::execute(&cli, id, no_clip)
        }
        Commands::Rotate {
            ref id,
            ref old,
            ref new,
        } => securevault::cli::commands::rotate::execute(&cli, id, old.as_deref(), new.as_deref()),
        Commands::Remove { ref id, force } => {
            securevault::cli::commands::remove::execute(&cli, id, force)
        }
        Commands::Card { ref action } => match action {
            CardAction::Add {
                ref label,
                ref holder,
                ref number,
                ref expiry,
                ref cvv,
                ref card_type,
                ref notes,
            } => securevault::cli::commands::card_add::execute(
                &cli,
                label,
                holder,
                number.as_deref(),
                expiry,
                cvv.as_deref(),
                card_type.as_deref(),
                notes.as_deref(),
            ),
            CardAction::List => securevault::cli::commands::card_list::execute(&cli),
            CardAction::Show { ref id } => {
                securevault::cli::commands::card_show::execute(&cli, id)
            }
            CardAction::Update {
                ref id,
                ref label,
                ref holder,
                ref number,
                ref expiry,
                ref cvv,
                ref card_type,
                ref notes,
            } => {
                let update = CardUpdate {
                    label: label.clone(),
                    holder_name: holder.clone(),
                    number: number.clone(),
                    expiry: expiry.clone(),
                    cvv: cvv.clone(),
                    card_type: card_type.clone(),
                    notes: notes.clone(),
                };
                securevault::cli::commands::card_update::execute(&cli, id, update)
            }
            CardAction::Remove { ref id, force } => {
                securevault::cli::commands::card_remove::execute(&cli, id, *force)
            }
        },
        Commands::Generate {
            length,
            no_lowercase,
            no_uppercase,
            no_digits,
            no_symbols,
        } => securevault::cli::commands::generate::execute(
            &cli,
            length,
            no_lowercase,
            no_uppercase,
            no_digits,
            no_symbols,
        ),
        Commands::Completions { ref shell } => {
            securevault::cli::commands::completions::execute(shell)
        }
        #[cfg(feature = "audit-log")]
        Commands::Audit { last, ref since } => {
            securevault::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
    };

    if let Err(e) = result {
        securevault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
