// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod app;
mod config;
mod grid;
mod record;
mod render;
mod summary;
mod ui;

use app::App;
use ui::{run_preview, Preview};

#[derive(Parser, Debug)]
#[command(name = "rackmap")]
#[command(about = "Rack Map - color-coded load diagram of a compute cluster's racks")]
#[command(version)]
struct Args {
    /// Node status files to read (stdin if none, or `-`)
    files: Vec<PathBuf>,

    /// System whose geometry to use (defaults to this host's name)
    #[arg(long)]
    system: Option<String>,

    /// Image to write (defaults to <system>-load.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also show the map in the terminal
    #[arg(long)]
    preview: bool,

    /// Print one JSON summary line per rendered rack to stdout
    #[arg(long)]
    summary: bool,

    /// Logging verbosity (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the summary
    let filter = EnvFilter::try_new(&args.log_level)
        .with_context(|| format!("Invalid log level '{}'", args.log_level))?;
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let identifier = args.system.clone().unwrap_or_else(config::host_identifier);
    let config = config::resolve_config(&identifier);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.output_file_name()));

    let mut app = App::new(config);
    app.load_inputs(&args.files)?;

    if args.summary {
        let mut stdout = io::stdout().lock();
        for summary in &app.summaries {
            writeln!(stdout, "{}", summary.to_json_line()?)?;
        }
        stdout.flush()?;
    }

    render::write_png(&app.scene, &output)?;
    info!(racks = app.summaries.len(), path = %output.display(), "Wrote rack map");

    if args.preview {
        run_preview(&Preview {
            title: format!("rackmap - {} load", app.config.system),
            scene: &app.scene,
            summaries: &app.summaries,
        })?;
    }

    Ok(())
}
