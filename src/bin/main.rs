use clap::Parser;
use log::LevelFilter;
use propeller_rs::config::JobConfig;
use propeller_rs::errors::ConfigError;
use propeller_rs::propfile::save_prop_file;
use propeller_rs::solver::QpropRunner;
use propeller_rs::ResampledBladeGeometry;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Resamples propeller blade distributions onto a common radial grid."
)]
struct Cli {
    /// JSON job file describing the blade geometry and run options
    job: PathBuf,

    /// Where to write the resampled geometry as JSON
    #[arg(short, long, default_value = "blade.json")]
    output: PathBuf,

    /// Write a QPROP prop file, overriding the path in the job file
    #[arg(long)]
    prop_file: Option<PathBuf>,

    /// Increase logging, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// `RUST_LOG` still applies on top of the level chosen with `-v`
fn init_logger(verbose: u8) {
    let _ = env_logger::Builder::new()
        .filter_level(level_for(verbose))
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let job = JobConfig::load(&cli.job)?;
    let (input, blades) = job.resolve_geometry()?;
    let blade = ResampledBladeGeometry::with_params(&input, job.params)?;
    log::info!("parametrized '{}' onto {} stations", job.name, blade.len());

    blade.write_json(BufWriter::new(File::create(&cli.output)?))?;

    let prop_file = cli.prop_file.or(job.prop_file);
    if let Some(path) = &prop_file {
        save_prop_file(path, &job.name, blades, &blade, &job.aero)?;
        log::info!("prop file written to {}", path.display());
    }

    if let Some(solver) = &job.solver {
        let path = prop_file.ok_or(ConfigError::MissingPropFile)?;
        let runner = QpropRunner::new(solver.qprop.clone(), path, solver.motor_file.clone());
        runner.run_single_point(&solver.point, &solver.output)?;
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
