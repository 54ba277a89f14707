mod cli;
mod render;

use anyhow::Context;
use astro_chart::{
    assemble, julian_day_from_datetime, resolve_house_system, ChartError, ChartRequest,
    EphemerisAdapter, FailurePolicy,
};
use clap::error::ErrorKind;
use clap::Parser;
use cli::Args;
use render::RenderOptions;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            if is_usage_error(&e) {
                eprintln!("run with --help for usage");
            }
            ExitCode::from(1)
        }
    }
}

/// Errors in what the user typed, as opposed to engine or I/O failures
fn is_usage_error(e: &anyhow::Error) -> bool {
    e.downcast_ref::<ChartError>().is_some_and(ChartError::is_input_error)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let settings = astro_config::load_settings(args.config.as_deref())?;

    // Everything the user typed is checked before the engine is touched
    let datetime = cli::parse_datetime(&args.datetime)?;
    let latitude = cli::parse_latitude(&args.latitude)?;
    let longitude = cli::parse_longitude(&args.longitude)?;
    let house_system = match &args.house_system {
        Some(name) => resolve_house_system(name)?,
        None => settings.house_system,
    };
    let bodies = match &args.bodies {
        Some(list) => cli::parse_body_list(list)?,
        None => settings.bodies.clone(),
    };

    let ephe_dir = astro_config::resolve_ephemeris_dir(args.ephe_path.as_deref(), &settings)?;
    if (args.warn_on_fallback || settings.warn_on_fallback)
        && !astro_config::has_ephemeris_files(&ephe_dir)
    {
        log::warn!(
            "no ephemeris data files in {}; using the lower-precision built-in model",
            ephe_dir.display()
        );
    }

    // A partial JSON document is worse than none, so JSON aborts on any body error
    let policy = if args.json {
        FailurePolicy::Abort
    } else {
        FailurePolicy::SkipAndContinue
    };
    let request = ChartRequest::new(julian_day_from_datetime(datetime), latitude, longitude, house_system)
        .with_bodies(bodies)
        .with_failure_policy(policy);

    let adapter = EphemerisAdapter::global();
    adapter.configure(Some(ephe_dir.as_path()));
    let chart = assemble(adapter, &request);
    adapter.shutdown();
    let chart = chart?;

    let options = RenderOptions { verbose: args.verbose };
    if args.json {
        let doc = render::to_json(&chart, options)?;
        println!("{doc}");
        return Ok(());
    }

    for skipped in chart.skipped() {
        eprintln!("error calculating {}: {}", skipped.name, skipped.message);
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::write_text(&mut out, &chart, options).context("writing report")?;
    out.flush().context("writing report")?;
    Ok(())
}
