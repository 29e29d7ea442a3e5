use clap::Parser;
use itertools::Itertools;
use std::fs;
use std::time::Instant;
use waflow::prelude::*;

/// Validate and re-export persisted WhatsApp flow documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the persisted flow JSON file
    flow_path: String,

    /// Optional path to write the normalized flow back to
    #[arg(short, long)]
    output: Option<String>,

    /// Only validate; do not write anything
    #[arg(short, long)]
    check: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let total_start = Instant::now();
    let text = fs::read_to_string(&cli.flow_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read flow file '{}': {}",
            &cli.flow_path, e
        ))
    });

    let import_start = Instant::now();
    let flow = import_flow_str(&text)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to import flow: {}", e)));
    let import_duration = import_start.elapsed();

    println!(
        "Imported flow '{}' ({:?}, {})",
        flow.name,
        flow.flow_type,
        if flow.is_active { "active" } else { "inactive" }
    );
    println!(
        "  {} node(s), {} edge(s) in {:?}",
        flow.nodes.len(),
        flow.edges.len(),
        import_duration
    );

    let counts = flow.nodes.iter().counts_by(|n| n.kind);
    for (kind, count) in counts.iter().sorted_by_key(|(kind, _)| kind.as_str()) {
        println!("    {:<18} {}", kind.as_str(), count);
    }
    if let Some(trigger) = &flow.trigger_config {
        println!(
            "  Trigger: keywords {:?}, regex '{}', case-sensitive: {}",
            trigger.keywords, trigger.regex, trigger.case_sensitive
        );
    }

    if cli.check {
        println!("\nFlow is valid. Total: {:?}", total_start.elapsed());
        return;
    }

    let exported = export_flow_string(&flow)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to export flow: {}", e)));
    match &cli.output {
        Some(path) => {
            fs::write(path, exported).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", path, e))
            });
            println!("\nNormalized flow written to '{}'", path);
        }
        None => println!("\n{}", exported),
    }
    println!("Total: {:?}", total_start.elapsed());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
