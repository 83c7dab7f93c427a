use adam_core::config::LlmConfig;
use adam_core::{AdamConfig, Session, SessionStore};
use adam_expression::{Pacer, PARAGRAPH_BREAK};
use adam_gateway::{AppState, GatewayServer};
use adam_reasoning::providers::{MockProvider, OpenAiClient};
use adam_reasoning::{DialogueEngine, LlmClient};
use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "adam.toml", env = "ADAM_CONFIG")]
    config: String,

    /// Bind host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Completion model (overrides config)
    #[arg(short, long)]
    model: Option<String>,

    /// Send replies immediately instead of pacing them
    #[arg(long)]
    no_pacing: bool,

    /// Talk to ADAM in this terminal instead of serving HTTP
    #[arg(long)]
    repl: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Pick the completion provider. The mock is only used when configured.
fn build_llm(config: &LlmConfig) -> Result<Box<dyn LlmClient>> {
    match config.provider.as_str() {
        "mock" => {
            warn!("Using mock completion provider; fallback replies are canned");
            Ok(Box::new(MockProvider::new(&config.model)))
        }
        "openai" => {
            let timeout = config.timeout_secs.map(Duration::from_secs);
            let client = OpenAiClient::new(&config.model, config.base_url.as_deref(), timeout)?;
            Ok(Box::new(client))
        }
        other => anyhow::bail!("Unknown LLM provider: {}", other),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_json);

    let mut config = AdamConfig::load_or_default(&args.config);
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(model) = args.model {
        config.llm.model = model;
    }
    if args.no_pacing {
        config.pacing.enabled = false;
    }

    info!(
        "Starting ADAM with {} provider, model {}",
        config.llm.provider, config.llm.model
    );
    let engine = DialogueEngine::new(build_llm(&config.llm)?, &config);
    let pacer = Pacer::new(&config.pacing);

    if args.repl {
        return repl(engine, pacer).await;
    }

    let state = AppState::new(engine, SessionStore::new(config.sessions.capacity), pacer);
    GatewayServer::new(state, &config.server.host, config.server.port)
        .run()
        .await
}

/// Local conversation through the same engine, as a single terminal session.
async fn repl(engine: DialogueEngine, pacer: Pacer) -> Result<()> {
    let mut session = Session::new(chrono::Utc::now());
    println!("ADAM online. Type 'quit' to exit.");
    print!("> ");
    io::stdout().flush()?;

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let trimmed = input.trim();

        if trimmed == "quit" || trimmed == "exit" {
            break;
        }

        if trimmed.is_empty() {
            print!("> ");
            io::stdout().flush()?;
            continue;
        }

        match engine.respond(&mut session, trimmed, chrono::Utc::now()).await {
            Ok(reply) => {
                pacer.pause(reply.pacing).await;
                println!("\nADAM: {}\n", reply.text.replace(PARAGRAPH_BREAK, "\n\n"));
            }
            Err(e) => {
                error!("Turn failed: {}", e);
                println!("\n[System Error]: {}\n", e);
            }
        }

        print!("> ");
        io::stdout().flush()?;
    }

    Ok(())
}
