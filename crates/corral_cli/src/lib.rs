use std::{
    io::{self, BufWriter, Write},
    process::{ExitCode, Termination},
    sync::atomic::Ordering,
};

use anyhow::{Context, Result, anyhow};
use camino::Utf8PathBuf;
use clap::Parser;
use colored::Colorize;
use corral_core::{FilterSet, Runner, SuiteCollector, TracingReporter, python};
use corral_project::{project::Project, utils::absolute};

use crate::{
    args::{Args, Command, TestCommand},
    logging::setup_tracing,
};

mod args;
mod logging;
mod version;

#[must_use]
pub fn corral_main() -> ExitStatus {
    run().unwrap_or_else(|error| {
        let mut stderr = std::io::stderr().lock();

        writeln!(stderr, "{}", "Corral failed".red().bold()).ok();
        for cause in error.chain() {
            if let Some(ioerr) = cause.downcast_ref::<io::Error>() {
                if ioerr.kind() == io::ErrorKind::BrokenPipe {
                    return ExitStatus::Success;
                }
            }

            writeln!(stderr, "  {} {cause}", "Cause:".bold()).ok();
        }

        ExitStatus::Error
    })
}

fn run() -> Result<ExitStatus> {
    let args = wild::args_os();
    let args = argfile::expand_args_from(args, argfile::parse_fromfile, argfile::PREFIX)
        .context("Failed to read CLI arguments from file")?;
    let args = Args::parse_from(args);

    match args.command {
        Command::Test(test_args) => test(&test_args),
        Command::Version => version().map(|()| ExitStatus::Success),
    }
}

pub(crate) fn version() -> Result<()> {
    let mut stdout = BufWriter::new(io::stdout().lock());
    writeln!(stdout, "corral {}", crate::version::version())?;
    Ok(())
}

pub(crate) fn test(args: &TestCommand) -> Result<ExitStatus> {
    setup_tracing(args.verbosity.level());

    let cwd = {
        let cwd = std::env::current_dir().context("Failed to get the current working directory")?;
        Utf8PathBuf::from_path_buf(cwd).map_err(|path| {
            anyhow!(
                "The current working directory `{}` contains non-Unicode characters. Corral only supports Unicode paths.",
                path.display()
            )
        })?
    };

    let root_path = args
        .root
        .as_ref()
        .map_or_else(|| cwd.clone(), |root| absolute(root, &cwd));
    let test_path = args
        .path
        .as_ref()
        .map_or_else(|| root_path.clone(), |path| absolute(path, &cwd));

    tracing::debug!("Root path: {}, test path: {}", root_path, test_path);

    let project = Project::new(root_path, test_path)?;
    let filters = FilterSet::new(
        &args.include_modules,
        &args.include_classes,
        &args.include_methods,
    )?;

    python::init();

    let reporter = TracingReporter;
    let (suite, selection) = SuiteCollector::new(&project, &filters, &reporter).collect()?;

    let mut stdout = BufWriter::new(io::stdout().lock());
    selection.display(&mut stdout);
    writeln!(stdout, "{}", format!("{:=<80}", "Running ").bold())?;
    stdout.flush()?;

    let runner = Runner::new(&reporter);

    let interrupt_flag = runner.interrupt_flag();
    ctrlc::set_handler(move || {
        interrupt_flag.store(true, Ordering::SeqCst);
    })
    .context("Failed to install the interrupt handler")?;

    let result = runner.run(&suite);

    let mut stdout = BufWriter::new(io::stdout().lock());
    result.display(&mut stdout);
    stdout.flush()?;

    Ok(if result.is_success() {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    })
}

#[derive(Copy, Clone)]
pub enum ExitStatus {
    /// Every selected test passed.
    Success = 0,

    /// The run completed but there were failures, errors, or an interrupt.
    Failure = 1,

    /// The run could not be carried out.
    Error = 2,
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl ExitStatus {
    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self as i32
    }
}
