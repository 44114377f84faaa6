// SPDX-License-Identifier: GPL-3.0-only

//! Chromakeys command-line tool
//!
//! Lists the layouts of a device graphic and renders previews with key
//! colours and LED states applied.

use chromakeys::app_settings::{APP_NAME, DEFAULT_CONTAINER_ID, DEFAULT_LOG_DIRECTIVE};
use chromakeys::config::Config;
use chromakeys::keyboard::{KeyboardWidget, Led, LoadError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;

/// Keyboard layout previews for lighting profiles
#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(version, about = "Keyboard layout previews for lighting profiles")]
struct Cli {
    /// Configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the layouts of a device graphic
    Layouts {
        /// Device model name, e.g. "Razer BlackWidow Elite"
        #[arg(long)]
        model: Option<String>,
    },
    /// Render a device graphic with colours and LEDs applied
    Render {
        /// Device model name, e.g. "Razer BlackWidow Elite"
        #[arg(long)]
        model: Option<String>,

        /// Layout to show
        #[arg(long)]
        layout: Option<String>,

        /// Key colour as ROW,COL,COLOUR (repeatable)
        #[arg(long = "key", value_parser = parse_key_colour)]
        keys: Vec<(u32, u32, String)>,

        /// LED state as NAME=on|off (repeatable)
        #[arg(long = "led", value_parser = parse_led_state)]
        leds: Vec<(Led, bool)>,

        /// Output file; standard output when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn parse_key_colour(s: &str) -> Result<(u32, u32, String), String> {
    let mut parts = s.splitn(3, ',');
    let (Some(row), Some(col), Some(colour)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected ROW,COL,COLOUR, got '{}'", s));
    };
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("invalid row '{}'", row))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| format!("invalid column '{}'", col))?;
    Ok((row, col, colour.trim().to_string()))
}

fn parse_led_state(s: &str) -> Result<(Led, bool), String> {
    let (name, state) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=on|off, got '{}'", s))?;
    let led = name.parse::<Led>().map_err(|e| e.to_string())?;
    match state {
        "on" | "true" | "1" => Ok((led, true)),
        "off" | "false" | "0" => Ok((led, false)),
        other => Err(format!("invalid LED state '{}'", other)),
    }
}

async fn load_widget(config: &Config, model: Option<String>) -> Result<KeyboardWidget, LoadError> {
    let model = model
        .or_else(|| config.default_model.clone())
        .unwrap_or_default();
    let mut widget = config.widget(DEFAULT_CONTAINER_ID);
    widget
        .load(&model, |w| {
            tracing::debug!("Keyboard ready in #{}", w.container_id());
        })
        .await?;
    Ok(widget)
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Layouts { model } => {
            let widget = load_widget(&config, model).await?;
            let active = widget.active_layout().unwrap_or_default();
            for layout in widget.available_layouts() {
                let marker = if layout == active { "*" } else { " " };
                println!("{} {}", marker, layout);
            }
        }
        Commands::Render {
            model,
            layout,
            keys,
            leds,
            output,
        } => {
            let mut widget = load_widget(&config, model).await?;
            if let Some(layout) = layout {
                widget.try_set_active_layout(&layout)?;
            }
            for (row, col, colour) in &keys {
                if !widget.has_key(*row, *col) {
                    tracing::warn!("Layout has no key at row {} column {}", row, col);
                }
                widget.set_key_color(*row, *col, colour);
            }
            for (led, enabled) in leds {
                widget.set_led_state(led, enabled);
            }

            let svg = widget.to_svg().unwrap_or_default();
            match output {
                Some(path) => {
                    tokio::fs::write(&path, svg).await?;
                    tracing::info!("Wrote {}", path.display());
                }
                None => print!("{}", svg),
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                DEFAULT_LOG_DIRECTIVE
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            ),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
