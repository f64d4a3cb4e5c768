mod display;
mod input;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use phoneprice_ai::{Classify, PricePredictor, StartupError, Transform};
use phoneprice_core::{PhoneSpec, default_start_dir};
use tracing_subscriber::EnvFilter;

use crate::display::PredictionOutput;

/// Predict a mobile phone's price tier from its specifications.
#[derive(Parser)]
#[command(name = "phoneprice", version)]
struct Cli {
    /// Directory to start searching for scaler.json and model.json.
    /// Parent directories are searched too. Defaults to the executable's directory.
    #[arg(long, global = true, env = "PHONEPRICE_ARTIFACT_DIR", value_name = "DIR")]
    artifact_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict the price tier of one phone.
    Predict(PredictArgs),
    /// Predict every row of a Parquet file with one column per feature.
    Batch {
        /// Parquet file to read.
        path: PathBuf,
    },
    /// Print the ordered feature schema.
    Schema,
    /// Locate and load the artifacts, then report what was found.
    Check,
}

#[derive(Args)]
struct PredictArgs {
    /// Read the phone spec from a JSON file ("-" for stdin) instead of flags.
    /// Keys left out take their default values.
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(flatten)]
    spec: SpecArgs,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// One flag per feature, defaulting to the schema defaults.
#[derive(Args)]
struct SpecArgs {
    /// Battery power (mAh)
    #[arg(long, default_value_t = 1000)]
    battery_power: i64,
    /// Bluetooth (0 or 1)
    #[arg(long, default_value_t = 0)]
    bluetooth_flag: i64,
    /// Clock speed (GHz)
    #[arg(long, default_value_t = 1.5)]
    clock_speed: f64,
    /// Dual SIM (0 or 1)
    #[arg(long, default_value_t = 0)]
    dual_sim_flag: i64,
    /// Front camera (MP)
    #[arg(long, default_value_t = 5)]
    front_camera_mp: i64,
    /// 4G support (0 or 1)
    #[arg(long, default_value_t = 0)]
    four_g_flag: i64,
    /// Internal memory (GB)
    #[arg(long, default_value_t = 32)]
    internal_memory_gb: i64,
    /// Mobile depth (cm)
    #[arg(long, default_value_t = 0.5)]
    mobile_depth_cm: f64,
    /// Mobile weight (grams)
    #[arg(long, default_value_t = 150)]
    mobile_weight_g: i64,
    /// Number of cores
    #[arg(long, default_value_t = 4)]
    core_count: i64,
    /// Primary camera (MP)
    #[arg(long, default_value_t = 10)]
    primary_camera_mp: i64,
    /// Pixel height
    #[arg(long, default_value_t = 800)]
    pixel_height: i64,
    /// Pixel width
    #[arg(long, default_value_t = 1200)]
    pixel_width: i64,
    /// RAM (MB)
    #[arg(long, default_value_t = 2048)]
    ram_mb: i64,
    /// Screen height (cm)
    #[arg(long, default_value_t = 10)]
    screen_height_cm: i64,
    /// Screen width (cm)
    #[arg(long, default_value_t = 5)]
    screen_width_cm: i64,
    /// Talk time (hours)
    #[arg(long, default_value_t = 10)]
    talk_time_hours: i64,
    /// 3G support (0 or 1)
    #[arg(long, default_value_t = 0)]
    three_g_flag: i64,
    /// Touch screen (0 or 1)
    #[arg(long, default_value_t = 0)]
    touch_screen_flag: i64,
    /// WiFi (0 or 1)
    #[arg(long, default_value_t = 0)]
    wifi_flag: i64,
}

impl From<SpecArgs> for PhoneSpec {
    fn from(a: SpecArgs) -> Self {
        Self {
            battery_power: a.battery_power,
            bluetooth_flag: a.bluetooth_flag,
            clock_speed: a.clock_speed,
            dual_sim_flag: a.dual_sim_flag,
            front_camera_mp: a.front_camera_mp,
            four_g_flag: a.four_g_flag,
            internal_memory_gb: a.internal_memory_gb,
            mobile_depth_cm: a.mobile_depth_cm,
            mobile_weight_g: a.mobile_weight_g,
            core_count: a.core_count,
            primary_camera_mp: a.primary_camera_mp,
            pixel_height: a.pixel_height,
            pixel_width: a.pixel_width,
            ram_mb: a.ram_mb,
            screen_height_cm: a.screen_height_cm,
            screen_width_cm: a.screen_width_cm,
            talk_time_hours: a.talk_time_hours,
            three_g_flag: a.three_g_flag,
            touch_screen_flag: a.touch_screen_flag,
            wifi_flag: a.wifi_flag,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("phoneprice v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Startup failures exit 2, everything else (bad request, unreadable input) exits 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<StartupError>().is_some() {
        2
    } else {
        1
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let start_dir = cli.artifact_dir.unwrap_or_else(default_start_dir);

    match cli.command {
        Command::Schema => {
            print!("{}", display::schema_table());
            Ok(())
        }
        Command::Check => {
            let predictor = PricePredictor::initialize(&start_dir)?;
            println!("scaler    {} features", predictor.transform().n_features());
            println!(
                "model     {} features, classes {:?}",
                predictor.classifier().n_features(),
                predictor.classifier().classes
            );
            Ok(())
        }
        Command::Predict(args) => {
            let predictor = PricePredictor::initialize(&start_dir)?;
            let spec = match &args.json {
                Some(path) => input::read_spec(path)?,
                None => PhoneSpec::from(args.spec),
            };

            let label = predictor.predict_spec(&spec)?;
            match args.format {
                OutputFormat::Text => println!("{label}"),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string(&PredictionOutput::from(label))?)
                }
            }
            Ok(())
        }
        Command::Batch { path } => {
            let predictor = PricePredictor::initialize(&start_dir)?;
            let batches = input::read_parquet(&path)?;
            let results = predictor.predict_batches(&batches)?;

            for (row, result) in results.iter().enumerate() {
                println!("{}", display::batch_line(row, result));
            }
            eprintln!("{} rows", results.len());
            eprint!("{}", display::batch_tally(&results));
            Ok(())
        }
    }
}
