use anyhow::Context;
use checksum_generator::{cli, logging, report, run, Error};
use clap::error::ErrorKind;
use clap::CommandFactory;
use std::process;

fn main() {
    process::exit(match try_main() {
        Ok(code) => code,
        Err(e) => {
            // the console itself failed, so stderr is the last resort
            let err = Error::Unexpected(format!("{e:#}"));
            eprintln!("{err}");
            err.exit_code()
        }
    });
}

fn try_main() -> anyhow::Result<i32> {
    let argv = match cli::translate_legacy_args(std::env::args_os()) {
        Ok(argv) => argv,
        Err(e) => return fail_with_help(&e),
    };
    let args = match cli::parse_from(argv) {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::DisplayVersion => {
            e.print().context("printing version")?;
            return Ok(0);
        }
        Err(e) => {
            e.print().context("printing usage")?;
            return Ok(-1);
        }
    };
    logging::init_logging(args.verbose);

    let config = match args.into_config(chrono::Local::now().date_naive()) {
        Ok(config) => config,
        Err(e) => return fail_with_help(&e),
    };
    tracing::debug!(?config, "parsed options");

    let mut reporter = report::ConsoleReporter::new();
    match run(&config, &mut reporter) {
        Ok(_) => Ok(0),
        Err(e) => {
            tracing::error!(error = %e, "checksum run failed");
            report::show_error(&format!("Error computing checksums: {e}"))
                .context("reporting the failed run")?;
            Ok(e.exit_code())
        }
    }
}

fn fail_with_help(err: &Error) -> anyhow::Result<i32> {
    let message = err.to_string();
    if !message.is_empty() {
        report::show_error(&message).context("reporting invalid arguments")?;
    }
    cli::Args::command()
        .print_help()
        .context("printing help")?;
    Ok(err.exit_code())
}
