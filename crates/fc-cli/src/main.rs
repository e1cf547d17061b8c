mod tracing_init;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use fc_config::CustomizerConfig;
use fc_core::{MemoryRuleStore, Resolver, ScriptBuffer, ShapeCatalog, TargetObject};

use crate::tracing_init::init_tracing;

#[derive(Parser)]
#[command(name = "formcust", about = "Manager form-customization rule engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve field overrides for a manager action
    Resolve {
        /// Path to customizer.toml config file
        #[arg(short, long)]
        config: PathBuf,
        /// Manager action id, e.g. resource/update
        #[arg(short, long)]
        action: String,
        /// Resolve against the parent-context object
        #[arg(long)]
        parent: bool,
        /// Caller user-group ids, comma-separated
        #[arg(long, value_delimiter = ',')]
        groups: Vec<u64>,
        /// JSON file describing the target object
        #[arg(long)]
        object: Option<PathBuf>,
    },
    /// Parse and validate a customizer config
    Check {
        /// Path to customizer.toml config file
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            config,
            action,
            parent,
            groups,
            object,
        } => {
            let (cfg, base_dir) = load_config(&config)?;
            let _guard = init_tracing(&cfg.logging, &base_dir)?;
            run_resolve(&cfg, &action, parent, &groups, object.as_deref())
        }
        Commands::Check { config } => {
            let (cfg, _) = load_config(&config)?;
            let profiles = cfg.profiles.len();
            let sets: usize = cfg.profiles.iter().map(|p| p.sets.len()).sum();
            let rules: usize = cfg
                .profiles
                .iter()
                .flat_map(|p| &p.sets)
                .map(|s| s.rules.len())
                .sum();
            println!(
                "ok: {profiles} profile(s), {sets} set(s), {rules} rule(s), {} shape(s)",
                cfg.shapes.len(),
            );
            Ok(())
        }
    }
}

fn load_config(path: &Path) -> Result<(CustomizerConfig, PathBuf)> {
    let config_path = path
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("config path '{}': {e}", path.display()))?;
    let cfg = CustomizerConfig::load(&config_path)?;
    let base_dir = config_path
        .parent()
        .expect("config path must have a parent directory")
        .to_path_buf();
    Ok((cfg, base_dir))
}

fn run_resolve(
    cfg: &CustomizerConfig,
    action: &str,
    parent: bool,
    groups: &[u64],
    object: Option<&Path>,
) -> Result<()> {
    let shapes = ShapeCatalog::from_config(&cfg.shapes).map_err(|e| anyhow::anyhow!("{e}"))?;
    let store = MemoryRuleStore::from_config(cfg);
    let resolver = Resolver::new(store, shapes);

    let target = match object {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("object file '{}': {e}", path.display()))?;
            Some(TargetObject::from_json(&raw).map_err(|e| anyhow::anyhow!("{e}"))?)
        }
        None => None,
    };

    let caller_groups: HashSet<u64> = groups.iter().copied().collect();
    let mut scripts = ScriptBuffer::new();
    let overrides = resolver.resolve(target.as_ref(), parent, action, &caller_groups, &mut scripts);

    tracing::info!(
        action,
        parent,
        overrides = overrides.len(),
        blocks = scripts.len(),
        "resolution complete"
    );

    let output = serde_json::json!({
        "overrides": overrides,
        "script": scripts.emit(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
