#[macro_use]
extern crate clap;

use {
    anyhow::{anyhow, Result},
    clap::ArgMatches,
    log::{error, info},
    simplelog::{Config as LogConfig, LevelFilter, TermLogger, TerminalMode},
    sst_box::{
        extractor::{run, Outputs, Request, DEFAULT_DATA_DIR, DEFAULT_FIGURE_DIR},
        locate::{FlatLocator, DEFAULT_DELIMITER},
        parameters::{Overrides, Parameters},
        selection::{AxisSelection, BoxSelection, Extents},
    },
    std::{fmt::Display, path::PathBuf, str::FromStr},
};

#[quit::main]
fn main() {
    let matches = clap_app!(sst_box =>
        (version: crate_version!())
        (about: "Extracts a sub-domain box from a snapshot of the stably stratified turbulence database.")
        (@arg var: --var +takes_value +required "Variable name: 'r' 'u' 'v' 'w'")
        (@arg rawdatadir: --rawdatadir +takes_value +required "Directory of raw data")
        (@arg rawdatasnap: --rawdatasnap +takes_value +required "Snapshot of raw data, e.g. 10.000000")
        (@arg delimiter: --delimiter +takes_value "Separator between variable and snapshot [default: _]")
        (@arg nx: --nx +takes_value +required "Number of grid points in x for the full data, including the two padding points (nx+2)")
        (@arg ny: --ny +takes_value +required "Number of grid points in y for the full data")
        (@arg nz: --nz +takes_value +required "Number of grid points in z for the full data")
        (@arg nxsl: --nxsl +takes_value "Number of sampled points in x [default: 32]")
        (@arg nysl: --nysl +takes_value "Number of sampled points in y [default: 32]")
        (@arg nzsl: --nzsl +takes_value "Number of sampled points in z [default: 32]")
        (@arg nxoffset: --nxoffset +takes_value "First sampled index in x [default: 0]")
        (@arg nyoffset: --nyoffset +takes_value "First sampled index in y [default: 0]")
        (@arg nzoffset: --nzoffset +takes_value "First sampled index in z [default: 0]")
        (@arg nxskip: --nxskip +takes_value "Subsampling rate in x, 1 for full resolution [default: 1]")
        (@arg nyskip: --nyskip +takes_value "Subsampling rate in y, 1 for full resolution [default: 1]")
        (@arg nzskip: --nzskip +takes_value "Subsampling rate in z, 1 for full resolution [default: 1]")
        (@arg method: --method +takes_value "Data loading method: 'seek' 'rows' 'whole' [default: rows]")
        (@arg layout: --layout +takes_value "Path to a YAML file describing the data layout and physical parameters")
        (@arg gravity: --gravity +takes_value "Direction of gravity: 'y' or 'z'")
        (@arg Lh: --Lh +takes_value "Horizontal length of the full box")
        (@arg Lv: --Lv +takes_value "Vertical length of the full box")
        (@arg drhobar: --drhobar +takes_value "Mean density gradient used for the ambient density")
        (@arg saveFig: --saveFig "Save a figure of the top plane of the box")
        (@arg figdir: --figdir +takes_value "Directory to save figures [default: Figs]")
        (@arg saveData: --saveData "Save the extracted box")
        (@arg saveDataDir: --saveDataDir +takes_value "Directory to save data [default: saveData]")
        (@arg verbose: -v --verbose "Log debug output")
    )
    .get_matches();

    let level = if matches.is_present("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    TermLogger::init(level, LogConfig::default(), TerminalMode::Mixed)
        .expect("Failed to initialize logger");

    run_matches(&matches).unwrap_or_else(|e| {
        error!("Error: \"{:#}\"", e);
        quit::with_code(1);
    });
}

fn run_matches(matches: &ArgMatches) -> Result<()> {
    let parameters = load_parameters(matches)?;

    let extents = Extents::new(
        required(matches, "nx")?,
        required(matches, "ny")?,
        required(matches, "nz")?,
    );
    let selection = BoxSelection::new(
        axis_selection(matches, "x")?,
        axis_selection(matches, "y")?,
        axis_selection(matches, "z")?,
    );

    let request = Request {
        var: required(matches, "var")?,
        snapshot: required(matches, "rawdatasnap")?,
        extents,
        selection,
        method: optional(matches, "method")?.unwrap_or_default(),
        parameters,
    };

    let locator = FlatLocator::new(
        required::<String>(matches, "rawdatadir")?,
        optional(matches, "delimiter")?.unwrap_or_else(|| DEFAULT_DELIMITER.to_owned()),
    );

    let outputs = Outputs {
        figure_dir: output_dir(matches, "saveFig", "figdir", DEFAULT_FIGURE_DIR),
        data_dir: output_dir(matches, "saveData", "saveDataDir", DEFAULT_DATA_DIR),
    };

    run(&locator, &request, &outputs)?;

    Ok(())
}

/// Layout and physical parameters from `--layout`, overridden by the command line
fn load_parameters(matches: &ArgMatches) -> Result<Parameters> {
    let params = match matches.value_of("layout") {
        Some(path) => Parameters::from_file(path)?,
        None => Parameters::default(),
    };

    let overrides = Overrides {
        gravity: optional(matches, "gravity")?,
        horizontal_length: optional(matches, "Lh")?,
        vertical_length: optional(matches, "Lv")?,
        drhobar: optional(matches, "drhobar")?,
    };
    let params = params.with_overrides(&overrides);

    info!("Using parameters: \n{:#?}", params);

    Ok(params)
}

fn axis_selection(matches: &ArgMatches, axis: &str) -> Result<AxisSelection> {
    Ok(AxisSelection::from_options(
        optional(matches, &format!("n{}offset", axis))?,
        optional(matches, &format!("n{}sl", axis))?,
        optional(matches, &format!("n{}skip", axis))?,
    ))
}

fn output_dir(matches: &ArgMatches, flag: &str, name: &str, default: &str) -> Option<PathBuf> {
    if matches.is_present(flag) {
        Some(PathBuf::from(matches.value_of(name).unwrap_or(default)))
    } else {
        None
    }
}

fn required<T>(matches: &ArgMatches, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    // Should never fail as clap rejects missing required arguments
    let value = matches
        .value_of(name)
        .ok_or_else(|| anyhow!("Missing argument --{}", name))?;
    parse(name, value)
}

fn optional<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    matches.value_of(name).map(|value| parse(name, value)).transpose()
}

fn parse<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e| anyhow!("Invalid value {:?} for --{}: {}", value, name, e))
}
