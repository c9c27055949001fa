use anyhow::Result;
use deskapps_core::{Config, Palette, StoreResult, auth, auth::User, db};

#[cfg(test)]
use deskapps_core::StoreError;

use crate::render;

/// What the login form shows after a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(String),
    Failed,
    InputError,
    DatabaseError,
}

impl LoginOutcome {
    pub fn from_check(result: StoreResult<Option<User>>) -> Self {
        match result {
            Ok(Some(user)) => LoginOutcome::Success(user.username),
            Ok(None) => LoginOutcome::Failed,
            Err(e) if e.is_validation() => LoginOutcome::InputError,
            Err(e) => {
                tracing::error!("Database error: {e}");
                LoginOutcome::DatabaseError
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LoginOutcome::Success(_) => "Login Successful",
            LoginOutcome::Failed => "Login Failed",
            LoginOutcome::InputError => "Input Error",
            LoginOutcome::DatabaseError => "Database Error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            LoginOutcome::Success(name) => format!("Welcome, {name}!"),
            LoginOutcome::Failed => "Invalid username or password".to_string(),
            LoginOutcome::InputError => "Please enter username and password".to_string(),
            LoginOutcome::DatabaseError => "An error occurred while connecting to the database".to_string(),
        }
    }
}

pub fn login(username: Option<String>, config: &Config, palette: &Palette) -> Result<()> {
    let username = match username {
        Some(name) => name,
        None => inquire::Text::new("User name:").with_help_message("This is your unique identifier").prompt()?,
    };
    let password = inquire::Password::new("Password:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()?;

    let outcome = if username.is_empty() || password.is_empty() {
        LoginOutcome::InputError
    } else {
        LoginOutcome::from_check(
            db::open(&config.database_path()?)
                .and_then(|conn| auth::check_credentials(&conn, &username, &password)),
        )
    };

    print!("{}", render::dialog(outcome.title(), &outcome.message(), palette));
    if !matches!(outcome, LoginOutcome::Success(_)) {
        std::process::exit(1);
    }
    Ok(())
}

pub fn add_user(username: &str, config: &Config, palette: &Palette) -> Result<()> {
    let password = inquire::Password::new("Password:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()?;

    let conn = db::open(&config.database_path()?)?;
    let user = auth::add_user(&conn, username, &password)?;
    print!("{}", render::dialog("User Added", &format!("Created user '{}'", user.username), palette));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(username: &str, password: &str) -> LoginOutcome {
        let conn = db::open_in_memory().unwrap();
        auth::add_user(&conn, "admin", "pw").unwrap();
        LoginOutcome::from_check(auth::check_credentials(&conn, username, password))
    }

    #[test]
    fn correct_credentials_welcome_the_user() {
        let outcome = check("admin", "pw");
        assert_eq!(outcome.title(), "Login Successful");
        assert_eq!(outcome.message(), "Welcome, admin!");
    }

    #[test]
    fn wrong_password_fails() {
        let outcome = check("admin", "nope");
        assert_eq!(outcome, LoginOutcome::Failed);
        assert_eq!(outcome.message(), "Invalid username or password");
    }

    #[test]
    fn blank_input_is_an_input_error() {
        assert_eq!(check("", "pw"), LoginOutcome::InputError);
    }

    #[test]
    fn database_failures_map_to_database_error() {
        let conn = db::open_in_memory().unwrap();
        conn.execute_batch("DROP TABLE users").unwrap();

        let result = auth::check_credentials(&conn, "admin", "pw");
        assert!(matches!(result, Err(StoreError::Database(_))));
        assert_eq!(LoginOutcome::from_check(result), LoginOutcome::DatabaseError);
    }
}
