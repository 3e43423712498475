use crate::{
    config::{CreationMethod, DEFAULT_SEED_PACKAGES, Options},
    error::AppResult,
    verbosity::{self, Level},
};
use anyhow::anyhow;
use console::style;
use std::path::PathBuf;

/// Which creation path the downstream creator should take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Creator {
    /// The interpreter's native `venv` module.
    Venv,
    /// The tool's own layout, requested with `--no-venv`.
    Builtin,
}

/// Everything the environment creator and seeder need, resolved from a parsed
/// `Options` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentPlan {
    pub dest_dir: PathBuf,
    pub python: String,
    pub prompt: String,
    pub creator: Creator,
    pub method: CreationMethod,
    pub clear: bool,
    pub system_site: bool,
    pub seed_packages: Vec<String>,
    pub search_dirs: Vec<PathBuf>,
    pub download: bool,
    pub log_level: Level,
}

impl EnvironmentPlan {
    #[tracing::instrument(skip_all)]
    pub fn from_options(options: &Options) -> AppResult<Self> {
        let dest_dir = options
            .dest_dir
            .clone()
            .ok_or_else(|| anyhow!("No destination directory was parsed"))?;

        let prompt = match &options.prompt {
            Some(prompt) => prompt.clone(),
            None => dest_dir
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| dest_dir.display().to_string()),
        };

        let plan = Self {
            python: options.python.clone(),
            prompt,
            creator: if options.no_venv {
                Creator::Builtin
            } else {
                Creator::Venv
            },
            method: options.method,
            clear: options.clear,
            system_site: options.system_site,
            seed_packages: effective_seed_packages(options),
            search_dirs: options.search_dirs.clone(),
            download: options.download,
            log_level: verbosity::resolve(options.verbosity_offset()),
            dest_dir,
        };
        tracing::info!(dest = %plan.dest_dir.display(), seeds = ?plan.seed_packages, "Resolved environment plan");
        Ok(plan)
    }

    /// Human-readable summary printed once parsing succeeds.
    pub fn summary(&self) -> String {
        let yes_no = |flag: bool| if flag { "yes" } else { "no" };
        let seeds = if self.seed_packages.is_empty() {
            "none".to_string()
        } else {
            self.seed_packages.join(", ")
        };

        let mut lines = vec![
            format!(
                "{} Environment destination {}",
                style("✓").green(),
                style(self.dest_dir.display()).cyan()
            ),
            format!("  python:       {}", self.python),
            format!("  prompt:       ({})", self.prompt),
            format!("  creator:      {:?} ({:?})", self.creator, self.method),
            format!("  clear:        {}", yes_no(self.clear)),
            format!("  system site:  {}", yes_no(self.system_site)),
            format!("  seed:         {}", style(seeds).bold()),
        ];
        lines.extend(
            self.search_dirs
                .iter()
                .map(|dir| format!("  search dir:   {}", dir.display())),
        );
        lines.push(format!("  download:     {}", yes_no(self.download)));
        lines.push(format!("  log level:    {}", self.log_level.name));
        lines.join("\n")
    }
}

/// The seed list with `--no-<tool>` exclusions removed. Order is kept and
/// repeated names collapse to their first occurrence.
pub fn effective_seed_packages(options: &Options) -> Vec<String> {
    let excluded: Vec<&str> = DEFAULT_SEED_PACKAGES
        .iter()
        .zip([options.no_pip, options.no_setuptools, options.no_wheel])
        .filter(|(_, excluded)| *excluded)
        .map(|(name, _)| *name)
        .collect();

    let mut seeds: Vec<String> = Vec::new();
    for package in &options.seed_packages {
        if excluded.contains(&package.as_str()) || seeds.contains(package) {
            tracing::trace!(package = %package, "Dropping seed package");
            continue;
        }
        seeds.push(package.clone());
    }
    seeds
}
