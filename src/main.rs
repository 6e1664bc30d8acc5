use std::path::{Path, PathBuf};

use pairfit::cli::{Cli, Commands, ConfigAction};
use pairfit::combos::{ComboAssembler, TierFloor};
use pairfit::config::{Config, ConfigValidator};
use pairfit::confidence::ConfidenceEngine;
use pairfit::error::{PairfitError, Result};
use pairfit::item::{FitPreference, ScannedItem, WardrobeItem};
use pairfit::pipeline::ScanPipeline;
use pairfit::verdict::{self, ClassifyInput};

fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Handle commands
    match cli.command {
        Commands::Evaluate {
            scan,
            wardrobe,
            fit,
            profile,
            json,
        } => {
            cmd_evaluate(cli.config, scan, wardrobe, &fit, profile, json)?;
        }
        Commands::Classify {
            scan,
            fit,
            wardrobe_count,
        } => {
            cmd_classify(&scan, &fit, wardrobe_count)?;
        }
        Commands::Combos {
            scan,
            wardrobe,
            floor,
            json,
        } => {
            cmd_combos(cli.config, &scan, &wardrobe, &floor, json)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pairfit=info"));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn cmd_evaluate(
    config_path: Option<PathBuf>,
    scan_path: PathBuf,
    wardrobe_path: Option<PathBuf>,
    fit: &str,
    profile: Option<String>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path, profile)?;
    let scanned = read_scan(&scan_path)?;
    let wardrobe = match wardrobe_path {
        Some(path) => read_wardrobe(&path)?,
        None => Vec::new(),
    };

    let pipeline = ScanPipeline::new(config);
    let report = pipeline.run(&scanned, &wardrobe, parse_fit(fit), None);

    if json {
        println!("{}", to_json(&report)?);
        return Ok(());
    }

    println!("Verdict: {}", report.verdict.explanation);
    println!();

    if report.render.matches_section.visible {
        println!("Matches ({} strong):", report.confidence.matches.len());
        for pair in &report.confidence.matches {
            let reason = pair.explanation.as_deref().unwrap_or("");
            println!("  {} [{:.2}] {}", pair.category, pair.raw_score, reason);
        }
        if report.confidence.near_match_count > 0 {
            println!("  + {} near matches", report.confidence.near_match_count);
        }
        println!();
    }

    print_outfits("Wear now", &report.tabs.wear_now);
    print_outfits("Worth trying", &report.tabs.worth_trying);

    for combo in &report.tabs.worth_trying {
        for tip in pairfit::combos::weak_link_tips(combo) {
            println!("  note: {}", tip.text);
        }
    }

    for assembly in [&report.wear_now, &report.worth_trying] {
        if let Some(message) = &assembly.missing_message {
            println!("{}", message);
            break;
        }
    }

    if let Some(mode_a) = &report.confidence.mode_a {
        println!("Suggestions:");
        for bullet in &mode_a.bullets {
            println!("  - {}", bullet.text);
        }
    }

    if report.render.show_rescan_cta {
        println!("Try scanning again with a clearer photo.");
    }

    Ok(())
}

fn print_outfits(label: &str, combos: &[pairfit::combos::AssembledCombo]) {
    if combos.is_empty() {
        return;
    }
    println!("{} ({} outfits):", label, combos.len());
    for combo in combos {
        let slots: Vec<String> = combo
            .slots
            .iter()
            .map(|f| format!("{} ({})", f.slot, f.tier))
            .collect();
        println!("  {} -> {}", combo.id, slots.join(" + "));
    }
    println!();
}

fn cmd_classify(scan_path: &Path, fit: &str, wardrobe_count: usize) -> Result<()> {
    let scanned = read_scan(scan_path)?;

    let result = verdict::classify(&ClassifyInput {
        category: scanned.category,
        signals: scanned.signals.clone(),
        fit_preference: parse_fit(fit),
        context_sufficient: scanned.context_sufficient,
        wardrobe_count,
    });

    println!("Outcome: {:?}", result.outcome);
    println!("Surface: {:?}", result.ui_state);
    println!("{}", result.explanation);
    Ok(())
}

fn cmd_combos(
    config_path: Option<PathBuf>,
    scan_path: &Path,
    wardrobe_path: &Path,
    floor: &str,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path, None)?;
    let scanned = read_scan(scan_path)?;
    let wardrobe = read_wardrobe(wardrobe_path)?;

    let floor = match floor {
        "medium" => TierFloor::HighAndMedium,
        _ => TierFloor::High,
    };

    let engine = ConfidenceEngine::new(&config);
    let confidence = engine.evaluate(&scanned, &wardrobe);
    let assembler = ComboAssembler::new(config.combos.clone());
    let result = assembler.assemble(&scanned, &confidence, floor);

    if json {
        println!("{}", to_json(&result)?);
        return Ok(());
    }

    if result.can_form_combos {
        print_outfits("Outfits", &result.combos);
        for combo in &result.combos {
            let items = pairfit::combos::resolve_items(combo, &wardrobe);
            let refs: Vec<&str> = items
                .iter()
                .filter_map(|i| i.image_ref.as_deref())
                .collect();
            if !refs.is_empty() {
                println!("  {} uses {}", combo.id, refs.join(", "));
            }
        }
    } else if let Some(message) = &result.missing_message {
        println!("No complete outfits: {}", message);
    }
    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path, None)?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Validate { file } => {
            let path = resolve_config_path(file)?;
            let config = Config::load(&path)?;
            ConfigValidator::validate(&config)?;
            println!("✓ Configuration is valid: {}", path.display());
        }
        ConfigAction::Init { force } => {
            let path = resolve_config_path(config_path)?;
            if path.exists() && !force {
                return Err(PairfitError::Config(format!(
                    "Config already exists at {} (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| PairfitError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }
            Config::default().save(&path)?;
            println!("✓ Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}

/// Load config from the given or default path, falling back to defaults
/// when no file exists yet
fn load_config(path: Option<PathBuf>, profile: Option<String>) -> Result<Config> {
    let path = resolve_config_path(path)?;

    let config = if path.exists() {
        match profile {
            Some(name) => Config::load_with_profile(&path, &name)?,
            None => Config::load(&path)?,
        }
    } else {
        tracing::debug!("No config file at {:?}, using defaults", path);
        Config::default()
    };

    Ok(config)
}

fn resolve_config_path(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => Config::default_path(),
    }
}

fn read_scan(path: &Path) -> Result<ScannedItem> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|e| PairfitError::Input {
        source: e,
        context: format!("Failed to parse scanned item: {:?}", path),
    })
}

fn read_wardrobe(path: &Path) -> Result<Vec<WardrobeItem>> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|e| PairfitError::Input {
        source: e,
        context: format!("Failed to parse wardrobe snapshot: {:?}", path),
    })
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| PairfitError::Io {
        source: e,
        context: format!("Failed to read file: {:?}", path),
    })
}

fn parse_fit(fit: &str) -> FitPreference {
    match fit {
        "fitted" => FitPreference::Fitted,
        "relaxed" => FitPreference::Relaxed,
        _ => FitPreference::NoPreference,
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| PairfitError::Input {
        source: e,
        context: "Failed to serialize report".to_string(),
    })
}
