//! Sandtimer MCP server: entry point.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use sandtimer::json::Value;
use sandtimer::object;
use sandtimer_mcp::config::{ConfigOverrides, ServerConfig};
use sandtimer_mcp::logging::{LogDestination, LogSink, DEFAULT_LOG_LEVEL};
use sandtimer_mcp::protocol::ProtocolHandler;
use sandtimer_mcp::tools::ToolRegistry;
use sandtimer_mcp::transport::Session;
use sandtimer_mcp::types::InitializeResult;

#[derive(Parser)]
#[command(
    name = "sandtimer-mcp",
    about = "MCP server that starts, resets and cancels sandtimer countdowns",
    version
)]
struct Cli {
    /// Sandtimer host (env: SANDTIMER_HOST, default 127.0.0.1).
    #[arg(long, global = true)]
    host: Option<String>,

    /// Sandtimer TCP port (env: SANDTIMER_PORT, default 61420).
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Connect and send timeout in seconds; 0 waits forever
    /// (env: SANDTIMER_TIMEOUT, default 5).
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log level or filter directive (trace, debug, info, warn, error).
    #[arg(
        long,
        global = true,
        env = "MCP_SANDTIMER_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    log_level: String,

    /// Append logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve,

    /// Print the tool catalog as JSON.
    Tools,

    /// Print server capabilities as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   sandtimer-mcp completions bash > ~/.local/share/bash-completion/completions/sandtimer-mcp
    ///   sandtimer-mcp completions zsh > ~/.zfunc/_sandtimer-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let destination = match cli.log_file {
                Some(path) => LogDestination::File(path),
                None => LogDestination::Stderr,
            };
            let sink = LogSink::new(&cli.log_level, &destination)
                .with_context(|| format!("Failed to open log destination {destination:?}"))?;

            let config = ServerConfig::resolve(ConfigOverrides {
                host: cli.host,
                port: cli.port,
                timeout_secs: cli.timeout,
            })?;

            sink.in_scope(|| serve(&config))?;
        }

        Commands::Tools => {
            let tools: Value = ToolRegistry::list_tools()
                .iter()
                .map(|t| t.to_value())
                .collect();
            println!("{}", serde_json::to_string_pretty(&tools)?);
        }

        Commands::Info => {
            let init = InitializeResult::default_result();
            let tools = ToolRegistry::list_tools();
            let info = object! {
                "server" => object! {
                    "name" => init.server_info.name.as_str(),
                    "version" => init.server_info.version.as_str(),
                },
                "protocol_version" => init.protocol_version.as_str(),
                "capabilities" => init.capabilities.to_value(),
                "tools" => tools.iter().map(|t| Value::from(t.name.as_str())).collect::<Value>(),
                "tool_count" => tools.len(),
            };
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "sandtimer-mcp", &mut io::stdout());
        }
    }

    Ok(())
}

fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Sandtimer MCP server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Sandtimer: {}:{} (timeout {:?})",
        config.host,
        config.port,
        config.timeout
    );

    let handler = ProtocolHandler::new(Box::new(config.timer_client()));
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(handler, stdin.lock(), stdout.lock());
    session.run().context("Stdio transport failed")?;
    Ok(())
}
