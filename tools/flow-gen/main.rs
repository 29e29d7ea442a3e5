use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use std::fs;
use waflow::prelude::*;

/// A CLI tool to generate random flow fixtures for testing the importer
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// The number of message nodes to generate
    #[arg(long, default_value_t = 8)]
    nodes: usize,
}

const KINDS: [NodeKind; 6] = [
    NodeKind::Text,
    NodeKind::Media,
    NodeKind::TextButton,
    NodeKind::List,
    NodeKind::AskQuestion,
    NodeKind::AddTag,
];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    println!("Generating a flow with {} node(s)...", cli.nodes);

    let mut flow = Flow::new("Generated flow", FlowType::Inbound);
    flow.set_trigger_config(TriggerConfig {
        keywords: vec!["hello".to_string()],
        ..TriggerConfig::default()
    });

    let mut ids = Vec::with_capacity(cli.nodes);
    for index in 0..cli.nodes {
        let kind = *KINDS.choose(&mut rng).unwrap_or(&NodeKind::Text);
        let position = Position::new(
            rng.random_range(80.0..900.0),
            120.0 + 90.0 * index as f64,
        );
        ids.push(flow.add_node(kind, position)?);
    }

    // Chain the default outputs; button/item outputs stay unconnected.
    let start_id = flow
        .start_node()
        .map(|n| n.id.clone())
        .ok_or("generated flow has no start node")?;
    let mut previous = start_id;
    for id in &ids {
        if connectable(&mut rng) {
            flow.connect(&previous, None, id)?;
        }
        previous = id.clone();
    }

    let json_output = export_flow_string(&flow)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved a flow fixture to '{}'",
        cli.output
    );
    Ok(())
}

fn connectable(rng: &mut ThreadRng) -> bool {
    rng.random_range(0..10) < 8
}
