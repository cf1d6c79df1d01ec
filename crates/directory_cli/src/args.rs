use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "directory")]
#[command(about = "Manage employee directory records", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database file holding the records
    #[arg(long, global = true, env = "DIRECTORY_DB_PATH", default_value = "directory.db")]
    pub db: PathBuf,

    /// Directory for rolling log files (logging is off when unset)
    #[arg(long, global = true, env = "DIRECTORY_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, env = "DIRECTORY_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List records, newest first
    #[command(alias = "ls")]
    List {
        /// Case-insensitive name substring
        #[arg(short, long)]
        name: Option<String>,

        /// Case-insensitive department substring
        #[arg(short, long)]
        department: Option<String>,
    },

    /// Show one record
    Get { id: String },

    /// Create a record
    #[command(alias = "add")]
    Create(RecordFields),

    /// Replace all fields of a record
    Update {
        id: String,

        #[command(flatten)]
        fields: RecordFields,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete { id: String },

    /// Report liveness
    Health,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RecordFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub role: Option<String>,

    #[arg(long)]
    pub department: Option<String>,

    #[arg(long)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn update_takes_id_and_fields() {
        let cli = Cli::parse_from([
            "directory",
            "--db",
            "/tmp/x.db",
            "update",
            "abc",
            "--name",
            "Anna",
            "--email",
            "a@b.com",
        ]);
        match cli.command {
            Commands::Update { id, fields } => {
                assert_eq!(id, "abc");
                assert_eq!(fields.name.as_deref(), Some("Anna"));
                assert_eq!(fields.role, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
