//! One module per subcommand.

pub mod add;
pub mod card_add;
pub mod card_list;
pub mod card_remove;
pub mod card_show;
pub mod card_update;
pub mod completions;
pub mod generate;
pub mod init;
pub mod list;
pub mod remove;
pub mod rotate;
pub mod show;

#[cfg(feature = "audit-log")]
pub mod audit_cmd;
