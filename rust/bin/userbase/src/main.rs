//! `userbase`: command-line client for the user record server.
//!
//! Reads go straight through the record API. Writes run through the same
//! form and listing state machines the UI uses, so a record is validated
//! locally before anything is sent and a delete needs confirming.

mod commands;
mod output;

use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use userbase_client::{UserApi, UserClient};

use crate::commands::form::Edits;

/// User record CLI.
#[derive(Parser, Debug)]
#[command(name = "userbase", about = "User record CLI client")]
struct Cli {
    /// Base URL of the record server.
    #[arg(
        long = "server",
        global = true,
        env = "USERBASE_API_URL",
        default_value = "http://localhost:3400"
    )]
    server: String,

    /// Output format.
    #[arg(long = "output", short = 'o', global = true, value_enum, default_value_t = Format::Table)]
    output: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all records.
    List,

    /// Show one record.
    Get {
        /// Record id.
        id: String,
    },

    /// Create a record.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Age as typed; checked against the record rules before sending.
        #[arg(long)]
        age: String,
    },

    /// Replace a record. Fields not given keep their stored value.
    Update {
        /// Record id.
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        age: Option<String>,
    },

    /// Delete a record.
    Delete {
        /// Record id.
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let api: Arc<dyn UserApi> = Arc::new(UserClient::new(&cli.server));
    let json = cli.output == Format::Json;

    match cli.command {
        Commands::List => {
            commands::records::list(api.as_ref(), json).await?;
        }

        Commands::Get { id } => {
            commands::records::get(api.as_ref(), &id, json).await?;
        }

        Commands::Create { name, email, age } => {
            let edits = Edits {
                name: Some(name),
                email: Some(email),
                age: Some(age),
            };
            commands::form::run(api, None, &edits, json).await?;
        }

        Commands::Update {
            id,
            name,
            email,
            age,
        } => {
            let edits = Edits { name, email, age };
            commands::form::run(api, Some(id), &edits, json).await?;
        }

        Commands::Delete { id, yes } => {
            commands::delete::run(api, &id, yes).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults_to_local_port() {
        let cli = Cli::try_parse_from(["userbase", "list"]).unwrap();
        assert_eq!(cli.server, "http://localhost:3400");
        assert_eq!(cli.output, Format::Table);
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "userbase",
            "get",
            "abc",
            "-o",
            "json",
            "--server",
            "http://10.0.0.5:3400",
        ])
        .unwrap();
        assert_eq!(cli.output, Format::Json);
        assert_eq!(cli.server, "http://10.0.0.5:3400");
        match cli.command {
            Commands::Get { id } => assert_eq!(id, "abc"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn create_requires_every_field() {
        let err = Cli::try_parse_from(["userbase", "create", "--name", "Ann"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn create_keeps_age_as_text() {
        let cli = Cli::try_parse_from([
            "userbase", "create", "--name", "Ann", "--email", "ann@x.com", "--age", "thirty",
        ])
        .unwrap();
        match cli.command {
            Commands::Create { age, .. } => assert_eq!(age, "thirty"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn update_takes_only_given_fields() {
        let cli = Cli::try_parse_from(["userbase", "update", "abc", "--age", "31"]).unwrap();
        match cli.command {
            Commands::Update {
                id,
                name,
                email,
                age,
            } => {
                assert_eq!(id, "abc");
                assert_eq!(name, None);
                assert_eq!(email, None);
                assert_eq!(age.as_deref(), Some("31"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn delete_yes_flag() {
        let cli = Cli::try_parse_from(["userbase", "delete", "abc", "-y"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete { yes: true, .. }));
    }
}
