// CLI module for administrative operations requiring server access

pub mod admin;

use clap::{Parser, Subcommand};

/// Community Pulse backend CLI
#[derive(Parser)]
#[command(name = "pulse-backend")]
#[command(about = "Community Pulse event registration backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run database migrations and exit
    Migrate,

    /// Admin role management commands
    #[command(subcommand)]
    Admin(AdminCommands),
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Grant the admin role to a user
    Grant {
        /// Username of the account to promote
        username: String,
    },

    /// Revoke the admin role from a user
    Revoke {
        /// Username of the account to demote
        username: String,
    },
}
