use clap::Parser;
use libindic_core::{NgramStore, UserDict};
use libtamil::{InputMethod, KeyEvent, Scheme, TamilConfig};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Instant;

/// Interactive Tamil input test: type Latin keys, see composed Tamil and
/// prediction candidates.
#[derive(Parser)]
#[command(name = "libtamil", about = "Interactive Tamil input test")]
struct Args {
    /// Input scheme
    #[arg(long, value_enum, default_value = "tamil99")]
    scheme: Scheme,

    /// Directory with dictionary artifacts (unigram/ngram fst + bin)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Maximum candidates per prediction
    #[arg(long, default_value_t = 8)]
    limit: usize,
}

fn open_userdict() -> UserDict {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    let path = PathBuf::from(home).join(".libtamil").join("userdict.redb");
    UserDict::new_redb(&path).unwrap_or_else(|e| {
        eprintln!("⚠ Failed to open userdict at {:?}: {}", path, e);
        UserDict::new_in_memory()
    })
}

fn build_engine(args: &Args) -> InputMethod<NgramStore> {
    let mut config = TamilConfig::with_scheme(args.scheme);
    config.base.max_candidates = args.limit;
    // Fire the post-commit refresh on the next poll.
    config.base.predict_refresh_delay_ms = 0;

    let source = match &args.data {
        Some(dir) => match NgramStore::load(dir) {
            Ok(store) => {
                println!("✓ Loaded dictionary artifacts from {:?}", dir);
                Some(store)
            }
            Err(e) => {
                eprintln!("⚠ Failed to load dictionary: {}", e);
                None
            }
        },
        None => None,
    };
    if source.is_none() {
        println!("ℹ No dictionary engine; using built-in fallback words");
    }

    InputMethod::new(config, source, open_userdict())
}

fn feed_line(engine: &mut InputMethod<NgramStore>, line: &str) {
    for c in line.chars() {
        let result = match c {
            '<' => engine.process_key(KeyEvent::Backspace),
            c if c.is_ascii_uppercase() => {
                engine.process_key(KeyEvent::Shifted(c.to_ascii_lowercase()))
            }
            c => engine.process_key(KeyEvent::Char(c)),
        };
        let _ = result;
    }
}

fn show(engine: &InputMethod<NgramStore>) {
    let ctx = engine.context();
    if !ctx.preedit_text.is_empty() {
        println!("  composing: {}", ctx.preedit_text);
    }
    if !ctx.candidates.is_empty() {
        let numbered: Vec<String> = ctx
            .candidates
            .iter()
            .enumerate()
            .map(|(i, w)| format!("{}.{}", i + 1, w))
            .collect();
        println!("  candidates: {}", numbered.join("  "));
    }
    if !ctx.auxiliary_text.is_empty() {
        println!("  {}", ctx.auxiliary_text);
    }
}

fn main() {
    let args = Args::parse();

    println!("═══════════════════════════════════════════════════");
    println!("  libtamil - Interactive Tamil Input Test");
    println!("═══════════════════════════════════════════════════");
    println!();

    let mut engine = build_engine(&args);

    println!("Scheme: {:?}. Type keys and press Enter.", args.scheme);
    println!("'<' = backspace, '1'-'9' = pick candidate, empty line = commit.");
    println!("Press Ctrl+C to exit.");
    println!();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        if line.is_empty() {
            engine.process_key(KeyEvent::Enter);
            let commit = engine.context_mut().take_commit();
            if !commit.is_empty() {
                println!("  committed: {}", commit);
            }
            if engine.poll(Instant::now()) {
                show(&engine);
            }
            continue;
        }

        if line.len() == 1 {
            if let Some(n @ '1'..='9') = line.chars().next() {
                if !engine.context().candidates.is_empty() {
                    engine.process_key(KeyEvent::Number(n as u8 - b'0'));
                    let commit = engine.context_mut().take_commit();
                    if !commit.is_empty() {
                        println!("  accepted: {}", commit);
                    }
                    if engine.poll(Instant::now()) {
                        show(&engine);
                    }
                    continue;
                }
            }
        }

        feed_line(&mut engine, &line);
        show(&engine);
    }
}
