//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `usermgmt_core` wiring end to end: config, logging, seeded
//!   store, list paging.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Without a config path, settings come from `USERMGMT_*` environment
//! variables.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use usermgmt_core::{
    init_from_config, seed_users, AppConfig, InMemoryRepository, User, UserListQuery,
    UserService,
};

#[derive(Parser, Debug)]
#[command(
    name = "usermgmt_cli",
    version,
    about = "Seed an in-memory user store and print one page of the user list"
)]
struct Cli {
    /// TOML config file
    #[arg(env = "USERMGMT_CONFIG")]
    config: Option<PathBuf>,

    /// List inactive users instead of active ones
    #[arg(long)]
    inactive: bool,

    /// Field to sort by (Id, Forename, Surname, Email, IsActive, DateOfBirth)
    #[arg(long, default_value = "Forename")]
    sort: String,

    /// Sort in descending order
    #[arg(long)]
    descending: bool,

    /// 1-based page to print
    #[arg(long, default_value_t = 1)]
    page: usize,
}

impl Cli {
    fn load_config(&self) -> Result<AppConfig, usermgmt_core::ConfigError> {
        match &self.config {
            Some(path) => AppConfig::load(path),
            None => AppConfig::from_env(),
        }
    }

    fn list_query(&self) -> UserListQuery {
        UserListQuery {
            is_active: Some(!self.inactive),
            sort_field: Some(self.sort.clone()),
            descending: self.descending,
            page_index: self.page,
            page_size: None,
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("usermgmt_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.load_config()?;
    init_from_config(&config)?;

    println!("usermgmt_core ping={}", usermgmt_core::ping());
    println!("usermgmt_core version={}", usermgmt_core::core_version());

    let seed = if config.seed_on_start {
        seed_users()
    } else {
        Vec::new()
    };
    let service = UserService::from_config(InMemoryRepository::<User>::with_seed(seed), &config);

    let page = service.list_users(&cli.list_query())?;

    println!(
        "{} users page={}/{} total={}",
        if cli.inactive { "inactive" } else { "active" },
        page.page_index,
        page.total_pages,
        page.total_items
    );
    for user in &page.items {
        println!(
            "{:>3} {:<20} {:<12} {}",
            user.id, user.forename, user.surname, user.email
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_path_is_an_optional_positional() {
        let cli = Cli::try_parse_from(["usermgmt_cli", "/etc/usermgmt.toml"])
            .expect("positional config path should parse");
        assert_eq!(cli.config, Some(PathBuf::from("/etc/usermgmt.toml")));
        assert_eq!(cli.sort, "Forename");
        assert_eq!(cli.page, 1);
    }

    #[test]
    fn list_flags_map_onto_the_query() {
        let cli = Cli::try_parse_from([
            "usermgmt_cli",
            "--inactive",
            "--sort",
            "Surname",
            "--descending",
            "--page",
            "2",
        ])
        .expect("list flags should parse");
        let query = cli.list_query();
        assert_eq!(query.is_active, Some(false));
        assert_eq!(query.sort_field.as_deref(), Some("Surname"));
        assert!(query.descending);
        assert_eq!(query.page_index, 2);
        assert_eq!(query.page_size, None);
    }

    #[test]
    fn non_numeric_page_is_rejected() {
        assert!(Cli::try_parse_from(["usermgmt_cli", "--page", "two"]).is_err());
    }
}
