use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use epd7c::error::ConvertError;
use epd7c::models::{
    ConfigOverrides, ConvertConfig, DisplaySpec, OversizePolicy, CONFIG_FILE_ENV,
};
use epd7c::rendering::{palette_table, HeaderTarget};
use epd7c::services::{ConversionPipeline, ConvertRequest};

#[derive(Parser)]
#[command(name = "epd7c")]
#[command(version)]
#[command(about = "Convert images into packed 4-bit headers for 7-color e-paper panels")]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image into a C header
    Convert(ConvertArgs),
    /// Print the palette index table
    Palette {
        /// Palette layout: gxepd2 or waveshare
        #[arg(long)]
        palette: Option<String>,

        /// Calibrated orange as hex (e.g. "#FF8C00")
        #[arg(long)]
        orange: Option<String>,

        /// YAML configuration file (default: $CONFIG_FILE)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ConvertArgs {
    /// Input image (PNG, JPEG, GIF or BMP)
    input: PathBuf,

    /// Output header file
    #[arg(short, long)]
    out: PathBuf,

    /// Target width in pixels
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i64>,

    /// Target height in pixels
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i64>,

    /// Layout mode: fit, crop or stretch
    #[arg(short, long)]
    mode: Option<String>,

    /// Enable Floyd-Steinberg error diffusion
    #[arg(short, long, conflicts_with = "no_dither")]
    dither: bool,

    /// Disable error diffusion even if the configuration enables it
    #[arg(long)]
    no_dither: bool,

    /// Resampling filter: nearest, bilinear, bicubic or lanczos
    #[arg(short, long)]
    resample: Option<String>,

    /// Palette layout: gxepd2 or waveshare
    #[arg(long)]
    palette: Option<String>,

    /// Calibrated orange as hex (e.g. "#FF8C00")
    #[arg(long)]
    orange: Option<String>,

    /// Odd-width packing: row-padded or strict
    #[arg(long)]
    packing: Option<String>,

    /// Header flavour: arduino or plain
    #[arg(long)]
    target: Option<String>,

    /// Name of the byte array in the header
    #[arg(long)]
    array_name: Option<String>,

    /// Panel supplying the maximum size: 7in3f, 5in65f or 4in01f
    #[arg(long)]
    panel: Option<String>,

    /// Oversized dimensions: reject or clamp
    #[arg(long)]
    oversize: Option<String>,

    /// Also write a PNG preview of the quantized image
    #[arg(long)]
    preview: Option<PathBuf>,

    /// YAML configuration file (default: $CONFIG_FILE)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ConvertArgs {
    fn overrides(&self) -> Result<ConfigOverrides, ConvertError> {
        let dither = match (self.dither, self.no_dither) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        let target = self
            .target
            .as_deref()
            .map(str::parse::<HeaderTarget>)
            .transpose()
            .map_err(ConvertError::Config)?;
        let oversize = self
            .oversize
            .as_deref()
            .map(str::parse::<OversizePolicy>)
            .transpose()
            .map_err(ConvertError::Config)?;

        Ok(ConfigOverrides {
            width: self.width,
            height: self.height,
            mode: self.mode.clone(),
            dither,
            resample: self.resample.clone(),
            palette: self.palette.clone(),
            orange: self.orange.clone(),
            packing: self.packing.clone(),
            target,
            array_name: self.array_name.clone(),
            panel: self.panel.clone(),
            oversize,
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let result = match cli.command {
        Some(Commands::Convert(args)) => run_convert_command(&args),
        Some(Commands::Palette {
            palette,
            orange,
            config,
        }) => run_palette_command(palette, orange, config),
        None => {
            run_status_command();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(quiet: bool) {
    let default_filter = if quiet { "epd7c=warn" } else { "epd7c=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Print the terminal failure report.
fn report_failure(err: &anyhow::Error) {
    match err.downcast_ref::<ConvertError>() {
        Some(e) => eprintln!("epd7c: {}: {}", e.kind(), e),
        None => eprintln!("epd7c: {:#}", err),
    }
}

fn run_convert_command(args: &ConvertArgs) -> anyhow::Result<()> {
    let mut config = ConvertConfig::discover(args.config.as_deref())?;
    config.apply(args.overrides()?);
    let settings = config.resolve()?;

    tracing::info!(
        width = settings.width,
        height = settings.height,
        mode = %settings.mode,
        dither = settings.dither,
        palette = %settings.palette.layout(),
        packing = %settings.packing,
        "Converting {}",
        args.input.display()
    );

    let pipeline = ConversionPipeline::new(settings);
    let report = pipeline.run(&ConvertRequest {
        input: args.input.clone(),
        output: args.out.clone(),
        preview: args.preview.clone(),
    })?;

    print!("{report}");
    Ok(())
}

fn run_palette_command(
    palette: Option<String>,
    orange: Option<String>,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = ConvertConfig::discover(config.as_deref())?;
    config.apply(ConfigOverrides {
        palette,
        orange,
        ..Default::default()
    });
    let palette = config.build_palette()?;
    print!("{}", palette_table(&palette));
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var(CONFIG_FILE_ENV).ok();
    let defaults = ConvertConfig::default();

    println!("epd7c v{VERSION}");
    println!("Image to packed-header converter for 7-color e-paper panels\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_FILE_ENV} = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    if let Some(path) = &config_file {
        if !PathBuf::from(path).exists() {
            println!("                (file not found)");
        }
    }

    println!("\nDefaults:");
    println!("  Size:     {}x{}", defaults.width, defaults.height);
    println!("  Mode:     {}", defaults.mode);
    println!("  Dither:   {}", if defaults.dither { "on" } else { "off" });
    println!("  Resample: {}", defaults.resample);
    println!("  Palette:  {}", defaults.palette);
    println!("  Packing:  {}", defaults.packing);
    println!("  Target:   {}", defaults.target);

    println!("\nKnown Panels:");
    for spec in DisplaySpec::ALL {
        println!(
            "  {:<7} {}x{}  ({} bytes per frame)",
            spec.name,
            spec.width,
            spec.height,
            spec.frame_bytes()
        );
    }

    println!("\nCommands:");
    println!("  epd7c convert <INPUT> --out <FILE>   Convert an image into a C header");
    println!("  epd7c palette                         Print the palette index table");
    println!("  epd7c --help                          Show all options");
}
