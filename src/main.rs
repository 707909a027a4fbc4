use std::io;

use anyhow::Result;
use rand::thread_rng;
use remark_generator::{write_startup, RemarkMatcher, RemarkSource, RemarkTable, Sentiment, Shell};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    // ---- table ----
    let table = RemarkTable::builtin()?;
    debug!(rows = table.len(), contexts = table.contexts().len(), "remark table loaded");
    for (context, sentiment) in table.missing_sentiments() {
        warn!(context, %sentiment, "context has no remark for this sentiment");
    }

    // ---- fit ----
    let matcher = RemarkMatcher::new(table);
    write_startup(&mut io::stdout().lock(), &matcher)?;

    // ---- samples ----
    println!(
        "\n--- Let's generate some remarks! (Using Top {} Matches) ---",
        matcher.config().top_n
    );
    let mut rng = thread_rng();
    for (context, sentiment) in [
        ("rusty car", Sentiment::Positive),
        ("old vehicle", Sentiment::Positive),
        ("slow loading", Sentiment::Negative),
    ] {
        let generation = matcher.generate(context, sentiment, &mut rng);
        if matcher.show_matches() && !generation.matches.is_empty() {
            println!("\nDEBUG: Input '{}' matched to: {}", context, generation.matches);
        }
        println!("For '{}', {}: {}", context, sentiment, generation.outcome);
    }

    // ---- interactive ----
    let stdin = io::stdin();
    let mut shell = Shell::new(&matcher, stdin.lock(), io::stdout());
    shell.run()?;
    Ok(())
}
