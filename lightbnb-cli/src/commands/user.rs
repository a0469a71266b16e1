//! User command - look up or register users

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use lightbnb_db::{NewUser, Store};

use super::print_json;

#[derive(Parser, Debug)]
#[command(about = "Look up or register users")]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Show a single user by email or id
    Show(ShowArgs),
    /// Register a new user
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address (must be unique)
        #[arg(long)]
        email: String,
        /// Password hash to store
        #[arg(long)]
        password: String,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ShowArgs {
    /// Exact email address
    #[arg(long)]
    pub email: Option<String>,
    /// User id
    #[arg(long)]
    pub id: Option<i32>,
}

pub async fn run_user(store: &dyn Store, args: UserArgs) -> Result<()> {
    match args.command {
        UserCommand::Show(show) => {
            let (user, key) = match (show.id, show.email) {
                (Some(id), _) => (store.get_user_with_id(id).await?, id.to_string()),
                (None, Some(email)) => (store.get_user_with_email(&email).await?, email),
                (None, None) => return Err(anyhow!("Pass --email or --id")),
            };
            let user = user.ok_or_else(|| anyhow!("No user found for '{}'", key))?;
            print_json(&user)
        }
        UserCommand::Add {
            name,
            email,
            password,
        } => {
            let user = store.add_user(NewUser::new(name, email, password)?).await?;
            tracing::info!(id = user.id, "registered user");
            print_json(&user)
        }
    }
}
