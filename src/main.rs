//! Master Tasklist MCP Server - Main Entry Point
//!
//! This is the main entry point for the server application.
//! The actual implementation is in the `master_tasklist` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use master_tasklist::{Role, Session, TasklistServerHandler, logging};
use mcp_attr::server::serve_stdio;

/// Master Tasklist MCP Server - ranked, hierarchical personal tasks via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the task list data file
    #[arg(env = "MASTER_TASKLIST_FILE")]
    file: String,

    /// User the session acts as
    #[arg(long, env = "MASTER_TASKLIST_USER", default_value = "me")]
    user: String,

    /// Role of the session: user or admin
    #[arg(long, env = "MASTER_TASKLIST_ROLE", default_value = "user")]
    role: Role,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 && std::env::var_os("MASTER_TASKLIST_FILE").is_none() {
        // No arguments provided, show help and exit with error code
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!(); // Add a newline after help
        std::process::exit(2);
    }

    let args = Args::parse();
    logging::init(&args.log_level)?;

    let session = Session {
        user: args.user,
        role: args.role,
    };

    let handler = TasklistServerHandler::new(&args.file, session)?;
    tracing::info!("serving MCP on stdio");
    serve_stdio(handler).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_user() {
        let args = Args::try_parse_from(["master-tasklist", "tasks.toml"]).unwrap();
        assert_eq!(args.role, Role::user);
        assert_eq!(args.user, "me");
    }

    #[test]
    fn test_role_parsed_from_flag() {
        let args =
            Args::try_parse_from(["master-tasklist", "tasks.toml", "--role", "admin"]).unwrap();
        assert_eq!(args.role, Role::admin);
        assert!(Args::try_parse_from(["master-tasklist", "tasks.toml", "--role", "root"]).is_err());
    }
}
