use crate::config::Options;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::path::PathBuf;

const HEADING: &str = "seed packages to be installed after creation";

/// Registers the seed package flags. Interpreting them is left to the seeder.
pub fn with_seed_args(command: Command, options: &Options) -> Command {
    command
        .arg(
            Arg::new("seed_packages")
                .short('s')
                .value_name("package")
                .num_args(1..)
                .action(ArgAction::Set)
                .overrides_with("seed_packages")
                .help("specify the seed packages for the environment (replaces the default list)")
                .default_values(options.seed_packages.clone())
                .help_heading(HEADING),
        )
        .arg(
            Arg::new("no_setuptools")
                .long("no-setuptools")
                .action(ArgAction::SetTrue)
                .help("do not install setuptools (remove from seed list)")
                .help_heading(HEADING),
        )
        .arg(
            Arg::new("no_pip")
                .long("no-pip")
                .action(ArgAction::SetTrue)
                .help("do not install pip (remove from seed list)")
                .help_heading(HEADING),
        )
        .arg(
            Arg::new("no_wheel")
                .long("no-wheel")
                .action(ArgAction::SetTrue)
                .help("do not install wheel (remove from seed list)")
                .help_heading(HEADING),
        )
        .arg(
            Arg::new("search_dirs")
                .long("extra-search-dir")
                .value_name("dirs")
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("directories to look for seed package distributions in (repeatable)")
                .help_heading(HEADING),
        )
        .arg(
            Arg::new("no_download")
                .long("no-download")
                .visible_alias("never-download")
                .action(ArgAction::SetTrue)
                .help("do not download seed packages from the network (pip/setuptools/wheel only)")
                .help_heading(HEADING),
        )
}

/// Copies the seed flags the user supplied onto `options`.
pub fn read_seed_args(matches: &ArgMatches, options: &mut Options) {
    if let Some(packages) = matches.get_many::<String>("seed_packages") {
        options.seed_packages = packages.cloned().collect();
    }
    options.no_setuptools |= matches.get_flag("no_setuptools");
    options.no_pip |= matches.get_flag("no_pip");
    options.no_wheel |= matches.get_flag("no_wheel");
    if let Some(dirs) = matches.get_many::<PathBuf>("search_dirs") {
        options.search_dirs.extend(dirs.cloned());
    }
    if matches.get_flag("no_download") {
        options.download = false;
    }
}
