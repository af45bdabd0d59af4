//! # padmap
//!
//! Generate per-gamepad configuration files from a template.
//!
//! Every connected joystick is matched against the SDL mapping database by
//! its GUID, and the `<COMMAND>` placeholders of the template are replaced
//! with the evdev events that carry each control.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use padmap::config::{Config, DatabaseConfig};
use padmap::device::source::EvdevSource;
use padmap::device::{discover, probe_all, GuidFilter};
use padmap::error::PadmapError;
use padmap::mapping::database::current_platform;
use padmap::mapping::{MappingDatabase, Priority};
use padmap::resolve::CommandResolver;
use padmap::template::{output_path_for, render_file, select_template};

/// Generate gamepad configuration files from SDL mappings
#[derive(Parser, Debug)]
#[command(name = "padmap")]
#[command(version)]
#[command(about = "Generate gamepad configuration files from SDL mappings", long_about = None)]
struct Cli {
    /// List connected gamepads and exit
    #[arg(short, long)]
    list: bool,

    /// Print the device list as JSON
    #[arg(long, requires = "list")]
    json: bool,

    /// Default template file
    #[arg(short, long, value_name = "FILE", required_unless_present = "list")]
    template: Option<PathBuf>,

    /// Directory with per-device templates named <guid>.tpl
    #[arg(short = 'd', long, value_name = "DIR")]
    template_dir: Option<PathBuf>,

    /// Only use gamepads with this GUID (can be used multiple times)
    #[arg(short, long, value_name = "GUID")]
    guid: Vec<String>,

    /// Skip gamepads with this GUID (can be used multiple times)
    #[arg(short, long, value_name = "GUID")]
    filter_guid: Vec<String>,

    /// Output file; later gamepads get their index inserted before the extension
    #[arg(short, long, value_name = "FILE", required_unless_present = "list")]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,
}

/// Main entry point for padmap
///
/// # Control Flow
///
/// 1. Load the configuration and set up logging
/// 2. Build the mapping database: built-in dataset, configured mapping
///    files, then the user mappings from the environment
/// 3. Discover joysticks and apply the GUID filters
/// 4. Render one output file per gamepad
///
/// # Errors
///
/// Returns error if:
/// - The configuration or a mapping file cannot be read
/// - No gamepad is found
/// - The template or template directory does not exist
/// - An output file cannot be written
fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(log) = &cli.log {
        config.logging.file = Some(log.clone());
    }

    let _guard = init_logging(&config.logging.level, config.logging.file.as_deref())?;
    info!("padmap v{} starting...", env!("CARGO_PKG_VERSION"));

    let source = EvdevSource::new(&config.devices.search_dir, &config.devices.suffix);

    if cli.list {
        return list_devices(&source, cli.json);
    }

    let (Some(template), Some(output)) = (cli.template.as_deref(), cli.output.as_deref()) else {
        bail!("--template and --output are required");
    };
    if !template.is_file() {
        bail!("Template file not found: {}", template.display());
    }
    if let Some(dir) = &cli.template_dir {
        if !dir.is_dir() {
            bail!("Template directory not found: {}", dir.display());
        }
    }

    let db = load_database(&config.database)?;
    info!("Mapping database ready: {} mappings for {}", db.len(), db.platform());

    let filter = GuidFilter {
        allow: cli.guid.clone(),
        deny: cli.filter_guid.clone(),
    };
    let gamepads = discover(&source, &db, &filter)?;
    if gamepads.is_empty() {
        return Err(PadmapError::DeviceNotFound.into());
    }

    for (index, gamepad) in gamepads.iter().enumerate() {
        let guid = gamepad.guid().to_string();
        let device_template = select_template(cli.template_dir.as_deref(), &guid, template);
        let device_output = output_path_for(output, index);
        info!("Gamepad {} ({}) at {}", gamepad.info.name, guid, gamepad.path());

        let resolver = CommandResolver::for_gamepad(gamepad);
        render_file(&resolver, &device_template, &device_output)
            .with_context(|| format!("Failed to generate {}", device_output.display()))?;
    }

    Ok(())
}

/// Installs the tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. The returned guard flushes the
/// log file on drop and must be kept alive until exit.
fn init_logging(level: &str, file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match file {
        Some(path) => {
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));

            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

/// Builds the mapping database from the configured sources.
///
/// Sources load in rank order: built-in dataset, mapping files at
/// [`Priority::Api`], then the environment block at [`Priority::User`].
fn load_database(config: &DatabaseConfig) -> Result<MappingDatabase> {
    let mut db = MappingDatabase::new(current_platform());
    if config.use_builtin {
        db.load_builtin();
    }

    for path in &config.mapping_files {
        db.load_file(path, Priority::Api)
            .with_context(|| format!("Failed to load mapping file {}", path.display()))?;
    }

    if let Ok(block) = std::env::var(&config.env_var) {
        let report = db.bulk_load(&block, Priority::User);
        info!(
            "Loaded {} mappings from ${} ({} rejected)",
            report.accepted, config.env_var, report.rejected
        );
    }

    Ok(db)
}

/// Prints every joystick device, filtered or not.
fn list_devices(source: &EvdevSource, json: bool) -> Result<()> {
    let devices = probe_all(source)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
    } else {
        for device in &devices {
            println!("{}\t{}\t{}", device.guid, device.name, device.path);
        }
    }

    Ok(())
}
