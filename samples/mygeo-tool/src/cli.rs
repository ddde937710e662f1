use std::path::PathBuf;

use clap::ValueHint;
use nalgebra::{Scalar, Scale3, Vector3};

use std::str::FromStr;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Coordinate space of exported positions
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum SpaceArg {
    World,
    Object,
}

impl std::fmt::Display for SpaceArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", mygeo::Space::from(*self))
    }
}

impl From<SpaceArg> for mygeo::Space {
    fn from(value: SpaceArg) -> Self {
        match value {
            SpaceArg::World => mygeo::Space::World,
            SpaceArg::Object => mygeo::Space::Object,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum RevisionArg {
    V2,
    V3,
}

impl std::fmt::Display for RevisionArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevisionArg::V2 => f.write_str("v2"),
            RevisionArg::V3 => f.write_str("v3"),
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,mygeo=info,mygeo_scene=info,mygeo_tool=info",
        env = "MYGEO_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Write an object from a Wavefront OBJ file as MYGEO v3
    Export(ExportArgs),
    /// Decode a MYGEO file and print a summary of its contents
    Inspect(InspectArgs),
}

#[derive(Debug, clap::Args)]
pub struct ExportArgs {
    /// OBJ file to read
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,
    /// Destination file; defaults to the input path with a `.mygbin` extension
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// Coordinate space of the written positions
    #[arg(short, long, default_value_t = SpaceArg::World)]
    pub space: SpaceArg,
    /// Name of the OBJ object to export; defaults to the first one
    #[arg(short, long)]
    pub node: Option<String>,
    /// Translation of the object's world transform
    #[arg(short, long, default_value = "0,0,0", value_parser = parse_vec3::<f32>, value_name = "X,Y,Z")]
    pub translate: Vector3<f32>,
    /// Scale of the object's world transform, applied before translation
    #[arg(long, default_value = "1,1,1", value_parser = parse_scale3::<f32>, value_name = "X,Y,Z")]
    pub scale: Scale3<f32>,
}

#[derive(Debug, clap::Args)]
pub struct InspectArgs {
    /// MYGEO file to read
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,
    /// Format revision the file is expected to be in
    #[arg(short, long, default_value_t = RevisionArg::V2)]
    pub revision: RevisionArg,
    /// Fail if any primitive references a point that doesn't exist
    #[arg(long)]
    pub strict: bool,
}

fn parse_vec3<R: FromStr>(
    s: &str,
) -> Result<Vector3<R>, Box<dyn std::error::Error + Send + Sync + 'static>>
where
    <R as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let mut split = s.trim().split(',');
    let mut next = || {
        split
            .next()
            .map(str::trim)
            .ok_or("expected three comma-separated components")
    };
    let x = R::from_str(next()?)?;
    let y = R::from_str(next()?)?;
    let z = R::from_str(next()?)?;
    Ok(nalgebra::vector![x, y, z])
}

fn parse_scale3<R: FromStr + Scalar>(
    s: &str,
) -> Result<Scale3<R>, Box<dyn std::error::Error + Send + Sync + 'static>>
where
    <R as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    parse_vec3::<R>(s).map(Scale3::from)
}

/// Set up pretty log output
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}
