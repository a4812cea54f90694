//! Test runner for the message store contract
//!
//! Usage: `test-runner [scenario.json]`. Without a scenario file the
//! built-in message history is replayed. Set `RUST_LOG=debug` to see the
//! individual storage operations.

mod scenario;

use std::path::PathBuf;

use scenario::Scenario;

fn main() -> anyhow::Result<()> {
    // Initialize simple logger with custom format
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "   {}", record.args())
        })
        .init();

    println!("=== Msgbox - Message Store Test Runner ===\n");

    // 1. Load scenario
    let scenario = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            println!("1. Loading scenario {}...", path.display());
            Scenario::load(&path)?
        }
        None => {
            println!("1. Using built-in message history...");
            Scenario::message_history()
        }
    };
    println!(
        "   ✓ {} steps against contract {}\n",
        scenario.steps.len(),
        scenario.contract
    );

    // 2. Replay
    println!("2. Replaying actions...");
    let outcome = scenario.run()?;
    println!(
        "   ✓ {} applied, {} rejected as expected\n",
        outcome.applied, outcome.rejected
    );

    // 3. Final table
    println!("3. Messages table:");
    if outcome.messages.is_empty() {
        println!("   (empty)");
    }
    for message in &outcome.messages {
        println!("   {:<13} {}", message.user.to_string(), message.text);
    }

    println!("\n✅ Scenario completed");
    Ok(())
}
