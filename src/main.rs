mod cli;

use reelscan::{config, scanner};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use reelscan_parser::ParsedFilename;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "reelscan=trace,reelscan_parser=trace".to_string()
        } else {
            "reelscan=info,reelscan_parser=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Parse { names, dir, json } => {
            parse_names(&names, dir, json, cli.config.as_deref())
        }
        Commands::Scan {
            paths,
            json,
            threads,
        } => scan_library(paths, json, threads, cli.config.as_deref()),
        Commands::Languages { json } => list_languages(json, cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("reelscan {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn parse_names(
    names: &[String],
    is_directory: bool,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let parser = config::build_parser(&config)?;

    let entries: Vec<scanner::ScannedEntry> = names
        .iter()
        .map(|name| scanner::ScannedEntry {
            path: PathBuf::from(name),
            is_directory,
            parsed: parser.parse(name, is_directory),
        })
        .collect();

    print_entries(&entries, json)
}

fn scan_library(
    paths: Vec<PathBuf>,
    json: bool,
    threads: Option<usize>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let parser = config::build_parser(&config)?;

    let roots = if paths.is_empty() {
        config.library.paths.clone()
    } else {
        paths
    };
    if roots.is_empty() {
        anyhow::bail!("No paths given and no library paths configured");
    }

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = threads {
        pool = pool.num_threads(threads);
    }
    let pool = pool.build().context("Failed to start parser threads")?;

    let library_scanner = scanner::LibraryScanner::new(parser, config.library);
    let entries = pool.install(|| library_scanner.scan(&roots));

    print_entries(&entries, json)
}

fn print_entries(entries: &[scanner::ScannedEntry], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", entry.path.display());
        print_parsed(&entry.parsed);
    }

    Ok(())
}

fn print_parsed(parsed: &ParsedFilename) {
    println!("  Title: {}", parsed.title);
    if let Some(year) = parsed.year {
        println!("  Year: {}", year);
    }
    if !parsed.container.is_empty() {
        println!("  Container: {}", parsed.container);
    }
    if let Some(season) = parsed.season {
        let episodes: Vec<String> = parsed.episodes.iter().map(|e| e.to_string()).collect();
        println!("  Season: {} Episodes: {}", season, episodes.join(", "));
    }
    if let Some(ref title) = parsed.episode_title {
        println!("  Episode title: {}", title);
    }
    if let Some(part) = parsed.part {
        println!("  Part: {}", part);
    }
    if let Some(ref title) = parsed.part_title {
        println!("  Part title: {}", title);
    }
    if parsed.is_extra {
        println!("  Extra: yes");
    }
    for set in &parsed.sets {
        match set.index {
            Some(index) => println!("  Set: {} #{}", set.title, index),
            None => println!("  Set: {}", set.title),
        }
    }
    if !parsed.languages.is_empty() {
        println!("  Languages: {}", parsed.languages.join(", "));
    }
    if let Some(fps) = parsed.fps {
        println!("  FPS: {}", fps);
    }
    if let Some(ref resolution) = parsed.hd_resolution {
        println!("  Resolution: {}", resolution);
    }
    if let Some(ref source) = parsed.video_source {
        println!("  Source: {}", source);
    }
    if let Some(ref codec) = parsed.video_codec {
        println!("  Video: {}", codec);
    }
    if let Some(ref codec) = parsed.audio_codec {
        println!("  Audio: {}", codec);
    }
    for (provider, id) in &parsed.ids {
        println!("  Id: {}={}", provider, id);
    }
}

fn list_languages(json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let parser = config::build_parser(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config.scanner.languages)?);
        return Ok(());
    }

    if !config.scanner.language_detection {
        println!("Language detection is disabled");
    }
    for language in &config.scanner.languages {
        println!("{}: {}", language.id, parser.language_list(&language.id));
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Library paths: {}", config.library.paths.len());
            println!("  Extensions: {}", config.library.extensions.join(", "));
            println!("  Skip keywords: {}", config.scanner.skip_keywords.len());
            println!(
                "  Skip expressions: {}",
                config.scanner.skip_regex_keywords.len()
            );
            println!("  Video sources: {}", config.scanner.sources.len());
            println!("  Languages: {}", config.scanner.languages.len());
            println!(
                "  Language detection: {}",
                config.scanner.language_detection
            );
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Extensions: {}", config.library.extensions.join(", "));
            println!("  Languages: {}", config.scanner.languages.len());
        }
    }

    Ok(())
}
