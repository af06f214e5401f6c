use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use memcalc::calculator::BUTTON_TOKENS;
use memcalc::{Config, DisplayFields, OutputFormat, Session};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Memory calculator driven by key tokens.
///
/// Tokens: digits 0-9, `.`, `+ - * /`, `=`, `d` (delete), `c` (clear),
/// `mp mm mc mr` (memory), `s` (square root).
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Key tokens to press; reads tokens from stdin when omitted.
    tokens: Vec<String>,

    /// Config file (defaults to the user config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format, overriding the config file.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Print the token before each plain display.
    #[arg(long)]
    echo: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    init_tracing(&config, cli.verbose);

    let format = cli.format.unwrap_or(config.display.format);
    let echo = cli.echo || config.display.echo_tokens;
    let mut session = Session::new();

    if cli.tokens.is_empty() {
        run_interactive(&mut session, format, echo)
    } else {
        session
            .press_all(cli.tokens.iter().map(String::as_str))
            .with_context(|| format!("Valid tokens: {}", BUTTON_TOKENS.join(" ")))?;
        let echoed = cli.tokens.last().filter(|_| echo).map(String::as_str);
        print_display(&mut io::stdout(), &session.display(), format, echoed)
    }
}

fn init_tracing(config: &Config, verbose: u8) {
    let fallback = match verbose {
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read whitespace-separated tokens line by line, redrawing after each line.
fn run_interactive(session: &mut Session, format: OutputFormat, echo: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let mut last_token = None;

        for token in line.split_whitespace() {
            match session.press(token) {
                Ok(_) => last_token = Some(token),
                Err(err) => {
                    warn!(token, "ignoring unknown token");
                    eprintln!("{err}");
                }
            }
        }

        if last_token.is_some() {
            let echoed = if echo { last_token } else { None };
            print_display(&mut stdout, &session.display(), format, echoed)?;
        }
    }

    Ok(())
}

fn print_display(
    out: &mut impl Write,
    display: &DisplayFields,
    format: OutputFormat,
    token: Option<&str>,
) -> Result<()> {
    match format {
        OutputFormat::Plain => match token {
            Some(token) => writeln!(out, "[{token}] {}", display.render_plain())?,
            None => writeln!(out, "{}", display.render_plain())?,
        },
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, display)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
