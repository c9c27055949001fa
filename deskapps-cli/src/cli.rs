use clap::{Args, Parser, Subcommand};
use deskapps_core::Config;

use crate::{accounts, contacts, render, weather};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "deskapps", version, about = "Weather lookup, login check and contact book")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Current weather and 5-day forecast.
    #[command(subcommand)]
    Weather(WeatherCommand),

    /// Check a username and password against the users table.
    Login {
        #[arg(long)]
        username: Option<String>,
    },

    /// Manage login accounts.
    #[command(subcommand)]
    Users(UsersCommand),

    /// Contact book.
    #[command(subcommand)]
    Contacts(ContactsCommand),
}

#[derive(Debug, Subcommand)]
pub enum WeatherCommand {
    /// Show weather for a city.
    Show {
        /// City name, e.g. "Manila".
        city: String,
    },

    /// Show weather for the city of your public IP address.
    Here,

    /// List recently searched cities, optionally filtered.
    History { filter: Option<String> },

    /// Switch to the given theme, or to the next one.
    Theme { name: Option<String> },

    /// Store the OpenWeather API key.
    Configure,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// Add a user; the password is prompted for.
    Add { username: String },
}

#[derive(Debug, Args)]
pub struct ContactFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ContactsCommand {
    /// List contacts, optionally filtered by name.
    List {
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Add a contact.
    Add(ContactFields),

    /// Edit a contact; omitted fields keep their value, an empty value clears it.
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ContactFields,
    },

    /// Delete a contact.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        let palette = *config.ui.theme.palette();

        let result = match self.command {
            Command::Weather(cmd) => weather::run(cmd, &mut config).await,
            Command::Login { username } => accounts::login(username, &config, &palette),
            Command::Users(UsersCommand::Add { username }) => accounts::add_user(&username, &config, &palette),
            Command::Contacts(cmd) => contacts::run(cmd, &config, &palette),
        };

        // One line per failed action, nothing is retried.
        if let Err(e) = result {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{}", render::error(&format!("{e:#}"), &palette));
            std::process::exit(1);
        }

        Ok(())
    }
}
