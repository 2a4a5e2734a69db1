use std::env;
use std::fs;
use std::process;

use theory::{Demo, Sequence};
use tracing::info;

fn usage() -> ! {
    eprintln!("Usage: theory <passage.yaml>");
    eprintln!("       theory --demo <birthday|progression|tour>");
    process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage();
    }

    let result = if args[1] == "--demo" {
        let name = args.get(2).unwrap_or_else(|| usage());
        Demo::parse(name).and_then(|demo| {
            info!(demo = %demo, "rendering demo");
            demo.render()
        })
    } else {
        let input_path = &args[1];
        let source = match fs::read_to_string(input_path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error: could not read '{}': {}", input_path, e);
                process::exit(1);
            }
        };
        info!(path = %input_path, "rendering passage");
        theory::render_passage(&source)
    };

    let yaml = match result.and_then(|sequence: Sequence| {
        info!(events = sequence.len(), end_time = sequence.end_time(), "rendered");
        theory::schedule_to_yaml(&sequence)
    }) {
        Ok(yaml) => yaml,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    print!("{}", yaml);
}
