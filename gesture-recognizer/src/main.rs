//! Gesture Recognizer - command-line front end
//!
//! Classifies gesture files, replays input scripts through a full session,
//! and manages template files and configuration.

use gesture_recognizer::app::cli::{Cli, Commands, ConfigAction};
use gesture_recognizer::app::config::Config;
use gesture_recognizer::targeting::decision_gate::DecisionGate;
use gesture_recognizer::templates::io::{load_library, TemplateFile};
use gesture_recognizer::templates::library::TemplateLibrary;
use gesture_recognizer::workflow::replay::InputScript;
use gesture_recognizer::workflow::session::{GestureSession, TickOutcome};
use gesture_recognizer::{Gesture, PointCloudClassifier};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Classify {
            templates,
            gesture,
            expected,
            top,
        } => {
            run_classify(templates, &gesture, expected, top, &config)?;
        }
        Commands::Replay {
            templates,
            script,
            seed,
        } => {
            run_replay(templates, &script, seed, &config)?;
        }
        Commands::Script {
            gesture,
            output,
            idle_ticks,
        } => {
            run_script(&gesture, &output, idle_ticks)?;
        }
        Commands::List { templates } => {
            run_list(templates, &config)?;
        }
        Commands::Add {
            gesture,
            name,
            output,
        } => {
            run_add(&gesture, &name, &output)?;
        }
        Commands::Init { force } => {
            run_init(force, cli.config.as_ref())?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

/// Template library from the CLI override or the configured path
fn open_library(templates: Option<PathBuf>, config: &Config) -> anyhow::Result<TemplateLibrary> {
    let path = templates.unwrap_or_else(|| config.templates.path.clone());
    Ok(load_library(&path)?)
}

fn read_gesture(path: &Path) -> anyhow::Result<Gesture> {
    let content = std::fs::read_to_string(path)?;
    let gesture: Gesture = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid gesture file {}: {}", path.display(), e))?;
    Ok(gesture)
}

fn run_classify(
    templates: Option<PathBuf>,
    gesture_path: &Path,
    expected: Option<String>,
    top: usize,
    config: &Config,
) -> anyhow::Result<()> {
    let library = open_library(templates, config)?;
    let gesture = read_gesture(gesture_path)?;
    let classifier = PointCloudClassifier::with_resample_points(config.recognition.resample_points);

    let ranked = classifier.rank(&gesture, library.all())?;
    let best = ranked
        .first()
        .ok_or_else(|| anyhow::anyhow!("No classification result"))?;

    if top > 1 {
        let shown: Vec<_> = ranked.iter().take(top).collect();
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        println!("{}", serde_json::to_string_pretty(best)?);
    }

    if let Some(expected) = expected {
        let gate = DecisionGate::new(config.gate.threshold);
        let decision = gate.decide(best, &expected);
        println!("Decision (expected '{}'): {:?}", expected, decision);
    }

    Ok(())
}

fn run_replay(
    templates: Option<PathBuf>,
    script_path: &Path,
    seed: Option<u64>,
    config: &Config,
) -> anyhow::Result<()> {
    let library = open_library(templates, config)?;
    let script = InputScript::load(script_path)?;

    let mut config = config.clone();
    if seed.is_some() {
        config.queue.seed = seed;
    }

    let mut session = GestureSession::from_config(&config, library)?;
    info!(
        ticks = script.len(),
        expected = session.expected_label().unwrap_or("-"),
        "Replaying input script"
    );

    for (tick, &sample) in script.samples.iter().enumerate() {
        match session.tick(sample) {
            TickOutcome::Pending | TickOutcome::Paused => {}
            TickOutcome::Recognized {
                result,
                expected,
                decision,
            } => {
                println!(
                    "tick {:>5}: {} (score {:.3}, expected {}) -> {:?}",
                    tick, result.label, result.score, expected, decision
                );
            }
            TickOutcome::Discarded(e) => {
                println!("tick {:>5}: discarded ({})", tick, e);
            }
        }
    }

    if !session.capture().points().is_empty() {
        warn!(
            buffered = session.capture().points().len(),
            "Script ended with an unfinished gesture"
        );
    }

    let stats = session.stats();
    println!(
        "\n{} gestures: {} accepted, {} rejected, {} discarded",
        stats.gestures, stats.accepted, stats.rejected, stats.discarded
    );

    let upcoming: Vec<&str> = session
        .queue()
        .slots()
        .filter_map(|slot| session.library().get(slot.template))
        .map(|t| t.name.as_str())
        .collect();
    println!("Upcoming: {}", upcoming.join(", "));

    Ok(())
}

fn run_script(gesture_path: &Path, output: &Path, idle_ticks: u32) -> anyhow::Result<()> {
    let gesture = read_gesture(gesture_path)?;
    let script = InputScript::from_gesture(&gesture, idle_ticks);
    script.save(output)?;

    info!("Wrote {} ticks to {}", script.len(), output.display());
    println!("Script saved: {}", output.display());
    Ok(())
}

fn run_list(templates: Option<PathBuf>, config: &Config) -> anyhow::Result<()> {
    let library = open_library(templates, config)?;

    println!("Templates ({}):\n", library.len());
    for (i, template) in library.iter().enumerate() {
        println!(
            "  {:>3}. {:<20} {:>4} points, {} stroke(s)",
            i,
            template.name,
            template.gesture.len(),
            template.gesture.stroke_count()
        );
    }

    Ok(())
}

fn run_add(gesture_path: &Path, name: &str, output: &Path) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Template name must not be empty");
    }

    let gesture = read_gesture(gesture_path)?;

    let mut file = if output.exists() {
        TemplateFile::load(output)?
    } else {
        TemplateFile::new()
    };
    file.append(name, &gesture);
    file.save(output)?;

    info!(name, templates = file.len(), "Template added");
    println!("Added '{}' to {} ({} templates)", name, output.display(), file.len());
    Ok(())
}

fn run_init(force: bool, path: Option<&PathBuf>) -> anyhow::Result<()> {
    let config_path = path.cloned().unwrap_or_else(Config::default_path);

    if config_path.exists() && !force {
        println!("Config already exists at {:?}", config_path);
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config::default();
    config.save(&config_path)?;

    info!("Created config at {:?}", config_path);
    println!("Configuration initialized at {:?}", config_path);

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("{}", toml_str);
        }
        ConfigAction::Get { key } => {
            let toml_str = config.to_toml()?;
            match find_toml_value(&toml_str, &key) {
                Some(v) => println!("{} = {}", key, v),
                None => {
                    anyhow::bail!("Configuration key '{}' not found", key);
                }
            }
        }
        ConfigAction::Path => {
            println!("{}", Config::default_path().display());
        }
    }

    Ok(())
}

/// Simple TOML value lookup by dotted key; everything before the last dot
/// names the table
fn find_toml_value<'a>(toml_str: &'a str, key: &str) -> Option<&'a str> {
    let (section_name, leaf_key) = match key.rsplit_once('.') {
        Some((section, leaf)) => (section, leaf),
        None => ("", key),
    };
    let mut in_section = section_name.is_empty();

    for line in toml_str.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let section = &trimmed[1..trimmed.len() - 1];
            in_section = section == section_name;
            continue;
        }

        if in_section {
            if let Some(eq_pos) = trimmed.find('=') {
                if trimmed[..eq_pos].trim() == leaf_key {
                    return Some(trimmed[eq_pos + 1..].trim());
                }
            }
        }
    }

    None
}
