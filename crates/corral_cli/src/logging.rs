use clap::Parser;
use corral_project::verbosity::VerbosityLevel;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Parser)]
pub struct Verbosity {
    #[arg(
        long,
        short = 'v',
        help = "Use verbose output (or `-vv` and `-vvv` for more verbose output)",
        action = clap::ArgAction::Count,
        global = true
    )]
    verbose: u8,
}

impl Verbosity {
    /// Returns the verbosity level based on the number of `-v` flags.
    pub(crate) fn level(&self) -> VerbosityLevel {
        match self.verbose {
            0 => VerbosityLevel::Default,
            1 => VerbosityLevel::Verbose,
            2 => VerbosityLevel::ExtraVerbose,
            _ => VerbosityLevel::Trace,
        }
    }
}

/// Installs the global tracing subscriber, writing to stderr. `RUST_LOG`
/// overrides the level derived from `-v` flags.
pub(crate) fn setup_tracing(level: VerbosityLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.level_filter().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(level.is_extra_verbose())
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag_count_maps_to_levels() {
        let parse = |args: &[&str]| Verbosity::parse_from(args).level();

        assert_eq!(parse(&["corral"]), VerbosityLevel::Default);
        assert_eq!(parse(&["corral", "-v"]), VerbosityLevel::Verbose);
        assert_eq!(parse(&["corral", "-vv"]), VerbosityLevel::ExtraVerbose);
        assert_eq!(parse(&["corral", "-vvvv"]), VerbosityLevel::Trace);
    }
}
