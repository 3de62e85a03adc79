use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

use chorus_gateway::{
    Engine, GeneratorMap, GuildDirectory, GuildMember, Message, discover_bot_configs, load_bots,
};

/// Chorus - multi-persona auto-reply engine
#[derive(Parser)]
#[command(name = "chorus", version, about)]
struct Cli {
    /// Directory of persona YAML files
    #[arg(short, long, env = "CHORUS_BOTS_DIR", default_value = "bots")]
    bots: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Validate persona configs and exit
    Check,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info,chorus_gateway=info",
        1 => "info,chorus_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(Command::Check) = cli.command {
        let configs = discover_bot_configs(&cli.bots)?;
        println!("{} persona config(s) OK", configs.len());
        return Ok(());
    }

    tracing::info!(bots = %cli.bots.display(), "starting chorus");

    let engine = Engine::new(Arc::new(OfflineDirectory));
    for definition in load_bots(&cli.bots, &GeneratorMap::new())? {
        engine.registry().register(definition).await;
    }

    if engine.registry().is_empty().await {
        anyhow::bail!("no personas found in {}", cli.bots.display());
    }

    feed_from_stdin(&engine).await
}

/// Read JSON messages from stdin, one per line, and print the resulting
/// send requests as JSON lines
async fn feed_from_stdin(engine: &Engine) -> anyhow::Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let message: Message = match serde_json::from_str(&line) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unparsable message line");
                continue;
            }
        };

        for request in engine.handle_message(&message).await {
            println!("{}", serde_json::to_string(&request)?);
        }
    }

    Ok(())
}

/// Directory stand-in for transportless runs
///
/// Member-backed identities degrade to their persona fallback, which keeps
/// the demo feed usable without a connected chat platform.
struct OfflineDirectory;

#[async_trait]
impl GuildDirectory for OfflineDirectory {
    async fn member(
        &self,
        _guild_id: &str,
        _user_id: &str,
    ) -> chorus_gateway::Result<Option<GuildMember>> {
        Ok(None)
    }

    async fn members(&self, _guild_id: &str) -> chorus_gateway::Result<Vec<GuildMember>> {
        Ok(vec![])
    }
}
