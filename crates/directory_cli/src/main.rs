//! Command-line driver for the employee directory.
//!
//! Each subcommand maps to one api call; the response body is printed as
//! JSON and non-2xx statuses exit with a failure code.

mod args;

use args::{Cli, Commands, RecordFields};
use clap::Parser;
use directory_api::{health, ApiResponse, DirectoryApi};
use directory_core::{default_log_level, init_logging};
use log::info;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let log_dir = absolute(log_dir);
        if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    info!(
        "event=cli_start module=cli status=ok version={}",
        directory_core::core_version()
    );

    let api = DirectoryApi::new(cli.db);
    let response = dispatch(&api, cli.command);
    print_response(&response)
}

fn dispatch(api: &DirectoryApi, command: Commands) -> ApiResponse {
    match command {
        Commands::List { name, department } => api.list(name.as_deref(), department.as_deref()),
        Commands::Get { id } => api.get(&id),
        Commands::Create(fields) => api.create(&fields_body(fields)),
        Commands::Update { id, fields } => api.update(&id, &fields_body(fields)),
        Commands::Delete { id } => api.delete(&id),
        Commands::Health => health(),
    }
}

fn fields_body(fields: RecordFields) -> Value {
    let mut body = Map::new();
    for (key, value) in [
        ("name", fields.name),
        ("role", fields.role),
        ("department", fields.department),
        ("email", fields.email),
    ] {
        if let Some(value) = value {
            body.insert(key.to_string(), Value::String(value));
        }
    }
    Value::Object(body)
}

fn print_response(response: &ApiResponse) -> ExitCode {
    let rendered = serde_json::to_string_pretty(&response.body)
        .unwrap_or_else(|_| response.body.to_string());
    if response.is_success() {
        println!("{rendered}");
        ExitCode::SUCCESS
    } else {
        eprintln!("{rendered}");
        ExitCode::FAILURE
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::fields_body;
    use crate::args::RecordFields;

    #[test]
    fn fields_body_omits_unset_fields() {
        let body = fields_body(RecordFields {
            name: Some("Anna".to_string()),
            email: Some("a@b.com".to_string()),
            ..RecordFields::default()
        });

        assert_eq!(body["name"], "Anna");
        assert_eq!(body["email"], "a@b.com");
        assert!(body.get("role").is_none());
    }
}
