use clap::{Parser, Subcommand};
use snapfilter::{acquire, config, export, filter, output, session};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "snapfilter")]
#[command(about = "Filter, resize, and export images as PNG")]
#[command(long_about = "\
Filter, resize, and export images as PNG

Acquire an image, apply a filter, retarget the dimensions, write a PNG:

  snapfilter export photo.jpg --filter grayscale --width 800
  snapfilter export photo.jpg --expr \"sepia(60%) blur(2px)\"

Dimensions keep the source aspect ratio by default: give --width or
--height and the other follows. Give both (or --unlocked) to size the
two edges independently.

Accepted inputs: jpg, jpeg, png, tif, tiff, webp. Output is always PNG,
named filtered-image.png unless configured otherwise.

Run 'snapfilter filters' for the filter catalog and
'snapfilter gen-config' for a documented snapfilter.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Path to a snapfilter.toml (default: ./snapfilter.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the filter catalog
    Filters,
    /// Acquire an image and report its dimensions without exporting
    Info(InfoArgs),
    /// Acquire, filter, resize, and export an image as PNG
    Export(ExportArgs),
    /// Print a stock snapfilter.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct InfoArgs {
    /// Image file to inspect
    file: PathBuf,

    /// Print the full session state as JSON instead
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Image file to export
    file: PathBuf,

    /// Catalog filter by name (see 'snapfilter filters')
    #[arg(long, conflicts_with = "expr")]
    filter: Option<String>,

    /// Raw filter expression, e.g. "grayscale(50%) blur(2px)"
    #[arg(long)]
    expr: Option<String>,

    /// Target width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Target height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Size width and height independently (disable the aspect-ratio lock)
    #[arg(long)]
    unlocked: bool,

    /// Output directory
    #[arg(long, default_value = ".")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let tool_config = config::ToolConfig::resolve(cli.config.as_deref())?;
    let backend = snapfilter::imaging::RustBackend::new();

    match cli.command {
        Command::Filters => {
            output::print_filter_list();
        }
        Command::Info(args) => {
            let mut session = session::EditorSession::new();
            acquire::acquire_into(&mut session, &backend, &args.file)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&session)?);
            } else if let (Some(source), Some(resize)) = (session.source(), session.resize()) {
                output::print_info(&args.file, source, resize);
            }
        }
        Command::Export(args) => {
            let mut session = session::EditorSession::new();
            select_filter(&mut session, &args, &tool_config)?;
            acquire::acquire_into(&mut session, &backend, &args.file)?;
            apply_resize(&mut session, &args);

            let outcome = export::export(
                &session,
                &backend,
                &args.output,
                &tool_config.output_filename,
            )?;
            output::print_export(&outcome, session.filter());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Resolve the session's filter from --expr, --filter, or the config default.
fn select_filter(
    session: &mut session::EditorSession,
    args: &ExportArgs,
    tool_config: &config::ToolConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(expr) = &args.expr {
        // Validate up front so a bad expression fails before any decoding
        filter::parse(expr)?;
        session.select_expression(expr);
        return Ok(());
    }

    let label = args.filter.as_deref().unwrap_or(&tool_config.default_filter);
    let preset = filter::find(label).ok_or_else(|| {
        let labels: Vec<&str> = filter::PRESETS.iter().map(|p| p.label).collect();
        format!("unknown filter '{label}'. Available: {labels:?}")
    })?;
    session.select_preset(preset);
    Ok(())
}

/// Apply --width/--height/--unlocked to the freshly initialized target.
///
/// One dimension keeps the lock, so the other follows the source aspect
/// ratio. Both dimensions together mean an exact size and unlock
/// implicitly.
fn apply_resize(session: &mut session::EditorSession, args: &ExportArgs) {
    if args.unlocked || (args.width.is_some() && args.height.is_some()) {
        session.set_locked(false);
    }
    if let Some(width) = args.width {
        session.set_width(width);
    }
    if let Some(height) = args.height {
        session.set_height(height);
    }
}
