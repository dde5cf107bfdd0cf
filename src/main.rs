//! # ttsubset
//!
//! Usage:
//!   ttsubset font.ttf -t "Hello, world" -o subset.ttf
//!   ttsubset font.ttf -t "Hello" --options subset.json --map map.json
//!
//! `RUST_LOG=debug` shows what was kept.

use std::env;
use std::fs;

use truetype_subset::{FontSubsetter, SubsetOptions, TrueTypeFont};

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1].starts_with('-') {
        eprintln!("usage: ttsubset FONT -t TEXT [-o OUT] [--options FILE.json] [--map MAP.json]");
        std::process::exit(2);
    }
    let font_path = &args[1];

    let flag = |name: &str| args.windows(2).find(|w| w[0] == name).map(|w| w[1].clone());
    let text = flag("-t").unwrap_or_default();
    let output_path = flag("-o").unwrap_or_else(|| "subset.ttf".to_string());

    if let Err(e) = run(font_path, &text, &output_path, flag("--options"), flag("--map")) {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

fn run(
    font_path: &str,
    text: &str,
    output_path: &str,
    options_path: Option<String>,
    map_path: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = match options_path {
        Some(path) => SubsetOptions::from_json(&fs::read_to_string(path)?)?,
        None => SubsetOptions::default(),
    };

    let font = TrueTypeFont::load(fs::read(font_path)?)?;
    let result = FontSubsetter::with_options(&font, options).subset_text(text)?;

    fs::write(output_path, &result.font_data)?;
    eprintln!(
        "✓ Written {} glyphs ({} bytes, was {}) to {}",
        result.total_glyphs,
        result.font_data.len(),
        font.data().len(),
        output_path
    );

    if let Some(path) = map_path {
        fs::write(&path, serde_json::to_string_pretty(&result.cid_to_gid)?)?;
        eprintln!("✓ Written CID→GID map to {path}");
    }
    Ok(())
}
