use crate::{
    config::{CreationMethod, Options, VerbosityChoice},
    destination::validate_dest_dir,
    error::ArgumentError,
    verbosity,
};
use clap::{Arg, ArgAction, ArgMatches, Command, error::ErrorKind};
use std::ffi::OsString;

pub mod seed;

/// Builds the command line, taking every default from `options`.
pub fn build_command(options: &Options) -> Command {
    let command = Command::new(env!("CARGO_PKG_NAME"))
        .about("Create isolated interpreter environments.")
        .version(env!("CARGO_PKG_VERSION"))
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .long("version")
                .action(ArgAction::Version)
                .help("print the program version and exit"),
        );
    let command = with_verbosity_args(command, options);
    let command = with_interpreter_args(command, options);
    let command = with_creation_args(command, options);
    let command = seed::with_seed_args(command, options);
    with_method_args(command, options)
}

fn with_verbosity_args(command: Command, options: &Options) -> Command {
    let heading = format!(
        "verbosity=verbose-quiet, default {}, map {}",
        verbosity::resolve_counts(options.verbose, options.quiet).name,
        verbosity::level_map()
    );
    command
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .conflicts_with("quiet")
                .help(format!("increase verbosity (baseline {})", options.verbose))
                .help_heading(heading.clone()),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::Count)
                .help(format!("decrease verbosity (baseline {})", options.quiet))
                .help_heading(heading),
        )
}

fn with_interpreter_args(command: Command, options: &Options) -> Command {
    let prompt = Arg::new("prompt")
        .long("prompt")
        .value_name("prompt")
        .help("provides an alternative prompt prefix for this environment");
    let prompt = match &options.prompt {
        Some(default) => prompt.default_value(default.clone()),
        None => prompt,
    };
    command
        .arg(
            Arg::new("python")
                .short('p')
                .long("python")
                .value_name("py")
                .default_value(options.python.clone())
                .help("the interpreter to replicate (--python=python3.12 uses python3.12)"),
        )
        .arg(prompt)
}

fn with_creation_args(command: Command, options: &Options) -> Command {
    command
        .arg(
            Arg::new("clear")
                .long("clear")
                .action(ArgAction::SetTrue)
                .default_value(bool_default(options.clear))
                .help("clear out the destination and start from scratch"),
        )
        .arg(
            Arg::new("system_site")
                .long("system-site-packages")
                .action(ArgAction::SetTrue)
                .default_value(bool_default(options.system_site))
                .help("give the environment access to the system site-packages dir"),
        )
        .arg(
            Arg::new("no_venv")
                .long("no-venv")
                .action(ArgAction::SetTrue)
                .default_value(bool_default(options.no_venv))
                .help("do not use venv to create the environment even if the target supports it"),
        )
        .arg(
            Arg::new("dest_dir")
                .value_name("dest_dir")
                .required(true)
                .help("directory to create the environment at"),
        )
}

fn with_method_args(command: Command, options: &Options) -> Command {
    let heading = "creation method";
    command
        .arg(
            Arg::new("symlinks")
                .long("symlinks")
                .action(ArgAction::SetTrue)
                .conflicts_with("copies")
                .help(format!(
                    "try to use symlinks rather than copies{}",
                    default_marker(options.method == CreationMethod::Symlinks)
                ))
                .help_heading(heading),
        )
        .arg(
            Arg::new("copies")
                .long("copies")
                .action(ArgAction::SetTrue)
                .help(format!(
                    "try to use copies rather than symlinks{}",
                    default_marker(options.method == CreationMethod::Copies)
                ))
                .help_heading(heading),
        )
}

fn bool_default(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn default_marker(is_default: bool) -> &'static str {
    if is_default { " [default]" } else { "" }
}

/// Command line accepted by clap, with the destination still unchecked.
#[derive(Debug, Clone)]
pub struct MatchedArgs {
    pub options: Options,
    pub raw_dest: String,
}

impl MatchedArgs {
    /// Tilde-expands and validates the destination, completing `options`.
    pub fn validate(self) -> Result<Options, ArgumentError> {
        let Self {
            mut options,
            raw_dest,
        } = self;
        let expanded = shellexpand::tilde(&raw_dest);
        options.dest_dir = Some(validate_dest_dir(&expanded)?);
        tracing::debug!(?options, "Parsed command line");
        Ok(options)
    }
}

/// Matches `args` (program name first) and overlays them onto `options`.
///
/// Flag conflicts, unknown flags and a missing destination are reported here;
/// the destination itself is checked later by [`MatchedArgs::validate`], once
/// logging is configured from the verbosity counters.
pub fn match_args<I, T>(options: &Options, args: I) -> Result<MatchedArgs, ArgumentError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = build_command(options);
    let matches = command.try_get_matches_from_mut(args)?;

    let mut parsed = options.clone();
    verbosity_choice(&matches).apply(&mut parsed);
    if let Some(python) = matches.get_one::<String>("python") {
        parsed.python = python.clone();
    }
    if let Some(prompt) = matches.get_one::<String>("prompt") {
        parsed.prompt = Some(prompt.clone());
    }
    parsed.clear = matches.get_flag("clear");
    parsed.system_site = matches.get_flag("system_site");
    parsed.no_venv = matches.get_flag("no_venv");
    parsed.method = creation_method(&matches, options.method);
    seed::read_seed_args(&matches, &mut parsed);

    let raw_dest = matches.get_one::<String>("dest_dir").cloned().ok_or_else(|| {
        command.error(
            ErrorKind::MissingRequiredArgument,
            "the destination directory is required",
        )
    })?;

    Ok(MatchedArgs {
        options: parsed,
        raw_dest,
    })
}

fn verbosity_choice(matches: &ArgMatches) -> VerbosityChoice {
    match (matches.get_count("verbose"), matches.get_count("quiet")) {
        (0, 0) => VerbosityChoice::Unchanged,
        (louder, 0) => VerbosityChoice::Louder(louder),
        // clap rejects both being present
        (_, quieter) => VerbosityChoice::Quieter(quieter),
    }
}

fn creation_method(matches: &ArgMatches, default: CreationMethod) -> CreationMethod {
    if matches.get_flag("symlinks") {
        CreationMethod::Symlinks
    } else if matches.get_flag("copies") {
        CreationMethod::Copies
    } else {
        default
    }
}
