//! Text front end for a memory-match session.
//!
//! Commands (one per line):
//! - `flip N`   select card N
//! - `pairs N`  deal a new board with N pairs
//! - `reset`    reshuffle the current board
//! - `show`     redraw the board
//! - `quit`     exit
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use memory_match::{CardIndex, CardState, GameSession, Selection, SessionConfig, Snapshot};

const COLUMNS: usize = 5;

/// How often the board clock advances while waiting for input.
const TICK: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(name = "memory-match", about = "Find every pair of matching cards")]
struct Args {
    /// Pairs on the first board (overrides MEMORY_PAIRS)
    #[arg(long)]
    pairs: Option<usize>,
    /// Shuffle seed (overrides MEMORY_SEED)
    #[arg(long)]
    seed: Option<u64>,
    /// Flip-back delay in milliseconds (overrides MEMORY_FLIP_DELAY_MS)
    #[arg(long)]
    delay_ms: Option<u64>,
}

enum Command {
    Flip(u32),
    Pairs(usize),
    Reset,
    Show,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let command = match (words.next(), words.next()) {
            (Some("flip"), Some(n)) => Command::Flip(n.parse().context("card must be a number")?),
            (Some("pairs"), Some(n)) => Command::Pairs(n.parse().context("pairs must be a number")?),
            (Some("reset"), None) => Command::Reset,
            (Some("show"), None) | (None, _) => Command::Show,
            (Some("quit"), None) => Command::Quit,
            _ => bail!("unknown command {line:?}"),
        };
        Ok(command)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = SessionConfig::from_env();
    if let Some(pairs) = args.pairs {
        config.pair_count = pairs;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(millis) = args.delay_ms {
        config.flip_back_delay = Duration::from_millis(millis);
    }

    let mut session = GameSession::new(config).context("invalid configuration")?;
    let mut out = io::stdout().lock();

    let (line_tx, lines) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    render(&mut out, &session.snapshot())?;
    let mut last_tick = Instant::now();

    loop {
        let line = match lines.recv_timeout(TICK) {
            Ok(line) => Some(line),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let now = Instant::now();
        let flipped = session.advance(now.duration_since(last_tick));
        last_tick = now;

        let Some(line) = line else {
            if flipped.is_some() {
                render(&mut out, &session.snapshot())?;
            }
            continue;
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };

        match command {
            Command::Flip(n) => match session.select_card(CardIndex::new(n)) {
                Selection::Ignored(reason) => writeln!(out, "card {n}: {reason}")?,
                Selection::Matched(..) => writeln!(out, "match!")?,
                Selection::Mismatched(ticket) => writeln!(
                    out,
                    "no match; flipping back in {} ms",
                    ticket.remaining(session.clock()).as_millis()
                )?,
                Selection::Revealed(_) | Selection::Concealed(_) => {}
            },
            Command::Pairs(n) if !session.config().is_choice(n) => {
                let choices = session
                    .config()
                    .pair_choices
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(out, "choose one of: {choices}")?;
                continue;
            }
            Command::Pairs(n) => session.configure(n)?,
            Command::Reset => session.reset(),
            Command::Show => {}
            Command::Quit => break,
        }

        render(&mut out, &session.snapshot())?;
        if session.is_complete() {
            let stats = session.stats();
            writeln!(
                out,
                "solved in {} attempts ({} mismatches); `reset` or `pairs N` to play again",
                stats.attempts, stats.mismatches
            )?;
        }
    }

    Ok(())
}

fn render(out: &mut impl Write, snapshot: &Snapshot) -> io::Result<()> {
    for row in snapshot.cards.chunks(COLUMNS) {
        let cells: Vec<String> = row
            .iter()
            .map(|card| match (card.state, card.symbol) {
                (CardState::Matched, _) => format!("{:>3}  {:<7}", "", ""),
                (CardState::FaceUp, Some(symbol)) => {
                    format!("{:>3}: {:<7}", card.index.raw(), symbol.name())
                }
                _ => format!("{:>3}: {:<7}", card.index.raw(), "##"),
            })
            .collect();
        writeln!(out, "{}", cells.join(" "))?;
    }
    out.flush()
}
