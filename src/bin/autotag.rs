//! Tag an untagged PDF with a logical structure tree.
//!
//! Usage:
//!
//!   autotag <input.pdf> <output.pdf>
//!
//! Writes the tagged document to `<output.pdf>` and the structure-item audit
//! sidecar to `<output.pdf>.json`.

use pdf_autotag::Autotagger;
use std::path::Path;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: autotag <input.pdf> <output.pdf>");
        std::process::exit(1);
    }

    let input = Path::new(&args[1]);
    let output = Path::new(&args[2]);

    if !input.exists() {
        eprintln!("Error: Input file not found: {}", input.display());
        std::process::exit(1);
    }

    println!("Processing: {}", input.display());

    match Autotagger::new().run(input, output) {
        Ok(summary) => {
            println!("Extracted {} items.", summary.item_count);
            println!(
                "Successfully saved tagged PDF to {} ({} pages tagged)",
                output.display(),
                summary.pages_tagged
            );
        },
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        },
    }
}
