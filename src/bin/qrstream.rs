use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::{Parser, error::ErrorKind};

#[derive(Parser, Debug)]
#[command(name = "qrstream", version, about = "Render text as a QR code PNG")]
struct Cli {
    /// Text to encode. May start with '-' when it does not spell a known flag.
    #[arg(allow_hyphen_values = true)]
    text: String,

    /// Output PNG path.
    #[arg(short, long, default_value = qrstream::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Pixels per module. Leading digits are used ("5px" is 5); anything that is not a
    /// positive integer falls back to the default.
    #[arg(
        short,
        long,
        default_value_t = qrstream::DEFAULT_SCALE.to_string(),
        allow_hyphen_values = true
    )]
    scale: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
            let _ = e.print();
            return code;
        }
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = qrstream::RasterConfig::from_scale_arg(&cli.scale);
    let code = qrstream::encode_text(&cli.text).context("encode text")?;

    let stats = qrstream::render_to_path(&code, config, &cli.output)
        .with_context(|| format!("write png '{}'", cli.output.display()))?;

    eprintln!(
        "wrote {} ({}x{})",
        cli.output.display(),
        stats.width,
        stats.height
    );
    Ok(())
}
