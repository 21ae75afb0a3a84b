use camino::Utf8PathBuf;
use clap::Parser;

use crate::logging::Verbosity;

#[derive(Debug, Parser)]
#[command(author, name = "corral", about = "A unittest discovery and runner.")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Discover and run unit-tests.
    Test(TestCommand),

    /// Display Corral's version
    Version,
}

#[derive(Debug, Parser)]
pub struct TestCommand {
    /// Directory searched for `_unittests` folders [default: the root path].
    #[clap(value_name = "PATH")]
    pub(crate) path: Option<Utf8PathBuf>,

    /// Directory module names are resolved against [default: the current
    /// working directory].
    #[clap(long, value_name = "PATH")]
    pub(crate) root: Option<Utf8PathBuf>,

    /// Regular expressions selecting modules by dotted name. A module is
    /// selected when any pattern matches from the start of its name.
    #[clap(long, value_name = "PATTERN", num_args = 1.., default_value = ".*")]
    pub(crate) include_modules: Vec<String>,

    /// Regular expressions selecting test-case classes by name.
    #[clap(long, value_name = "PATTERN", num_args = 1.., default_value = ".*")]
    pub(crate) include_classes: Vec<String>,

    /// Regular expressions selecting test methods by name.
    #[clap(long, value_name = "PATTERN", num_args = 1.., default_value = ".*")]
    pub(crate) include_methods: Vec<String>,

    #[clap(flatten)]
    pub(crate) verbosity: Verbosity,
}
