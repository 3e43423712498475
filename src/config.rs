use std::path::PathBuf;

/// Seed tools that can be dropped individually with `--no-<tool>`.
pub const DEFAULT_SEED_PACKAGES: [&str; 3] = ["pip", "setuptools", "wheel"];

/// How the downstream creator should materialize interpreter files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationMethod {
    Symlinks,
    Copies,
}

impl CreationMethod {
    /// Symlinks where the platform handles them without elevated rights.
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            CreationMethod::Copies
        } else {
            CreationMethod::Symlinks
        }
    }
}

/// The outcome of the exclusive `--verbose` / `--quiet` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerbosityChoice {
    #[default]
    Unchanged,
    Louder(u8),
    Quieter(u8),
}

impl VerbosityChoice {
    /// Adds the supplied count on top of the baseline counters.
    pub fn apply(self, options: &mut Options) {
        match self {
            VerbosityChoice::Unchanged => {}
            VerbosityChoice::Louder(n) => options.verbose = options.verbose.saturating_add(n),
            VerbosityChoice::Quieter(n) => options.quiet = options.quiet.saturating_add(n),
        }
    }
}

/// Every value the command line can set, with its default before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub verbose: u8,
    pub quiet: u8,
    pub python: String,
    pub prompt: Option<String>,
    pub clear: bool,
    pub system_site: bool,
    pub no_venv: bool,
    pub method: CreationMethod,
    /// Validated destination; only `None` before parsing.
    pub dest_dir: Option<PathBuf>,
    pub seed_packages: Vec<String>,
    pub no_pip: bool,
    pub no_setuptools: bool,
    pub no_wheel: bool,
    pub search_dirs: Vec<PathBuf>,
    pub download: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            verbose: 2,
            quiet: 0,
            python: "python3".to_string(),
            prompt: None,
            clear: false,
            system_site: false,
            no_venv: false,
            method: CreationMethod::platform_default(),
            dest_dir: None,
            seed_packages: DEFAULT_SEED_PACKAGES.iter().map(|s| s.to_string()).collect(),
            no_pip: false,
            no_setuptools: false,
            no_wheel: false,
            search_dirs: Vec::new(),
            download: true,
        }
    }
}

impl Options {
    /// Signed verbosity offset fed to the level table.
    pub fn verbosity_offset(&self) -> i64 {
        i64::from(self.verbose) - i64::from(self.quiet)
    }
}
