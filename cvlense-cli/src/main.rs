use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use cvlense_core::{rank_candidates, Candidate, ResumeProcessor, ScreeningConfig};

mod export;

#[derive(Parser)]
#[command(name = "cvlense")]
#[command(about = "Screen and rank resume PDFs against a weighted keyword profile")]
struct Args {
    /// Resume PDFs and/or ZIP archives of PDFs to screen
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Comma-separated keywords, optionally weighted (e.g. "python:3, sql, aws:2")
    #[arg(short, long)]
    keywords: Option<String>,

    /// Target role title, counted with a fixed bonus weight
    #[arg(short, long)]
    role: Option<String>,

    /// Drop candidates scoring below this threshold
    #[arg(long)]
    min_score: Option<f64>,

    /// Output file path (if not specified, auto-generated based on input)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format: json or csv
    #[arg(short = 'f', long, default_value = "json")]
    output_format: String,

    /// Directory for the extraction cache
    #[arg(long)]
    cache_dir: Option<String>,

    /// Skip cache and force fresh extraction (useful for development/testing)
    #[arg(long)]
    skip_cache: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("🦀 CV Lense Resume Screener");

    // Drop missing inputs up front instead of failing mid-run
    let inputs: Vec<PathBuf> = args
        .inputs
        .iter()
        .filter(|input| {
            let exists = Path::new(input).exists();
            if !exists {
                println!("⚠️  Input not found, skipping: {input}");
            }
            exists
        })
        .map(PathBuf::from)
        .collect();

    if inputs.is_empty() {
        println!("⚠️  No readable inputs. Please check the file paths.");
        return Ok(());
    }

    let mut config = ScreeningConfig::load_with_fallback(args.config.as_deref());

    if let Some(config_path) = &args.config {
        println!("📋 Loaded config from: {config_path}");
    } else {
        println!("📋 Using default config");
    }

    // Apply CLI overrides to config
    if let Some(keywords) = &args.keywords {
        config.keywords = keywords.clone();
    }
    if let Some(role) = &args.role {
        config.role = role.clone();
    }
    if let Some(min_score) = args.min_score {
        config.min_score = min_score;
    }
    if let Some(cache_dir) = &args.cache_dir {
        config.cache_dir = cache_dir.clone();
    }
    if args.skip_cache {
        config.use_extraction_cache = false;
    }

    let profile = config.profile();
    if profile.is_empty() {
        println!("⚠️  No keywords configured; ranking on role mentions and vocabulary only");
    }

    let processor = if config.use_extraction_cache {
        ResumeProcessor::new_with_cache(&config.cache_dir)?
    } else {
        ResumeProcessor::new_uncached()?
    };

    println!("📄 Screening {} input(s)", inputs.len());

    let mut candidates: Vec<Candidate> = Vec::new();
    match processor.ingest(&inputs, &mut candidates) {
        Ok(added) => {
            println!("✅ Processed {added} document(s)");
        }
        Err(e) => {
            eprintln!("❌ Screening failed: {e}");
            std::process::exit(1);
        }
    }

    rank_candidates(&mut candidates, &profile);

    if config.min_score > 0.0 {
        let before = candidates.len();
        candidates.retain(|c| c.score >= config.min_score);
        let dropped = before - candidates.len();
        if dropped > 0 {
            println!("🔻 Dropped {dropped} candidate(s) below min score {}", config.min_score);
        }
    }

    print_ranking(&candidates);

    let output_path = if let Some(output) = &args.output {
        output.clone()
    } else {
        let input_name = inputs[0]
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let extension = if args.output_format == "csv" { "csv" } else { "json" };
        format!("{input_name}_cvlense.{extension}")
    };

    save_results(&candidates, &output_path, &args.output_format)?;

    Ok(())
}

fn print_ranking(candidates: &[Candidate]) {
    if candidates.is_empty() {
        println!("\n🤷 No candidates to rank");
        return;
    }

    println!("\n📊 Ranked candidates:");
    for (rank, candidate) in candidates.iter().enumerate() {
        let email = candidate.email.as_deref().unwrap_or("-");
        println!(
            "   {:>2}. {:>7.2}  {}  <{}>  [{}]",
            rank + 1,
            candidate.score,
            candidate.name,
            email,
            candidate.file_name()
        );
        if candidate.is_parse_error() {
            println!("       ⚠️  text extraction failed for this document");
        }
    }
}

fn save_results(candidates: &[Candidate], output_path: &str, format: &str) -> Result<()> {
    match format {
        "csv" => {
            export::to_csv(candidates, output_path)?;
            println!("💾 CSV results saved to: {output_path}");
        }
        "json" => {
            export::to_json(candidates, output_path)?;
            println!("💾 JSON results saved to: {output_path}");
        }
        _ => {
            println!("⚠️  Unknown output format '{format}', using json");
            export::to_json(candidates, output_path)?;
            println!("💾 JSON results saved to: {output_path}");
        }
    }
    Ok(())
}
