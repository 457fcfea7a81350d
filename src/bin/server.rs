//! Othello move server
//!
//! Serves moves over HTTP, answers a single position from a file or stdin, or
//! plays a match-server game by relaying it to a running bot.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use othello::config::AppConfig;
use othello::protocol::{decode_position, reply_text};
use othello::reflector::{parse_url, Reflector, ReflectorConfig, DEFAULT_BOT, DEFAULT_MATCH_SERVER};
use othello::{init_logging, server, AIEngine};

/// Othello engine for the match server.
#[derive(Parser)]
#[command(name = "othello-server", about = "Serve Othello moves over HTTP")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "othello.toml")]
    config: PathBuf,

    /// Override the bind address
    #[arg(long)]
    addr: Option<String>,

    /// Override the maximum search depth
    #[arg(long)]
    max_depth: Option<u8>,

    /// Override the time budget per move
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Always search, even when a corner is available
    #[arg(long)]
    no_corner_shortcut: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve,
    /// Print the reply for one JSON position
    Decide {
        /// File holding the position, `-` for stdin
        input: PathBuf,

        /// Also print the board to stderr
        #[arg(long)]
        board: bool,
    },
    /// Play a match-server game by forwarding each turn to a bot
    Reflect(ReflectArgs),
}

#[derive(Args)]
struct ReflectArgs {
    /// Game viewer URL, e.g. "https://host/view?gamekey=foo&whitekey=bar".
    /// Supplies the server and any keys not given as flags.
    view_url: Option<String>,

    /// Game to read state from and send moves to
    #[arg(long)]
    gamekey: Option<String>,

    /// Player key for White; required to move as White
    #[arg(long)]
    whitekey: Option<String>,

    /// Player key for Black; required to move as Black
    #[arg(long)]
    blackkey: Option<String>,

    /// Service asked for moves
    #[arg(long, default_value = DEFAULT_BOT)]
    bot: String,

    /// Match server, when no viewer URL is given
    #[arg(long, default_value = DEFAULT_MATCH_SERVER)]
    server: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(addr) = cli.addr {
        config.server.addr = addr;
    }
    if let Some(depth) = cli.max_depth {
        config.engine.max_depth = depth;
    }
    if let Some(ms) = cli.time_limit_ms {
        config.engine.time_limit_ms = ms;
    }
    if cli.no_corner_shortcut {
        config.engine.corner_shortcut = false;
    }
    config.validate().context("invalid configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Decide { input, board } => decide_once(config, &input, board),
        Command::Reflect(args) => reflect(args).await,
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let app = server::router(AIEngine::from_config(config.engine));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn decide_once(config: AppConfig, input: &Path, show_board: bool) -> Result<()> {
    let body = if input.as_os_str() == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("reading position from stdin")?;
        body
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("reading position from {}", input.display()))?
    };

    let position = decode_position(&body)?;
    if show_board {
        eprintln!("{position}");
    }

    let engine = AIEngine::from_config(config.engine);
    let result = engine.get_move_with_stats(&position);
    println!("{}", reply_text(result.decision));
    Ok(())
}

async fn reflect(args: ReflectArgs) -> Result<()> {
    let mut config = ReflectorConfig::new(parse_url(&args.server)?, parse_url(&args.bot)?);
    if let Some(view) = &args.view_url {
        config.apply_view_url(view)?;
    }
    if let Some(key) = args.gamekey {
        config.game_key = key;
    }
    if args.whitekey.is_some() {
        config.white_key = args.whitekey;
    }
    if args.blackkey.is_some() {
        config.black_key = args.blackkey;
    }

    let reflector = Reflector::new(config)?;
    info!(
        server = %reflector.config().server,
        bot = %reflector.config().bot,
        "reflecting game"
    );
    let outcome = reflector.run().await.context("reflecting game")?;
    println!("{outcome}");
    Ok(())
}
