//! EyeMech control panel entry point.
//!
//! A headless front-end for the radar: single commands can be sent straight
//! from the command line, and recorded pointer-event scripts can be replayed
//! through the same drag state machine a pointing device would drive.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ PanelConfig            -- built from command-line flags
//!  └─ SerialTransport        -- one connection, opened on demand
//!  └─ ControlPanel           -- radar state machine + command encoder
//! ```
//!
//! Everything runs on the main thread.  Connect errors are reported to the
//! operator and end the process with a non-zero status.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use eyemech_core::domain::interaction::DEFAULT_SEND_INTERVAL;
use eyemech_core::domain::radar::{DEFAULT_CANVAS_SIZE, DEFAULT_MARGIN};
use eyemech_core::EyeCommand;
use eyemech_panel::application::command_encoder::EyeMech;
use eyemech_panel::application::control_panel::ControlPanel;
use eyemech_panel::infrastructure::config::PanelConfig;
use eyemech_panel::infrastructure::event_script::load_script;
use eyemech_panel::infrastructure::serial::transport::DEFAULT_SETTLE_DELAY;
use eyemech_panel::infrastructure::serial::{
    list_available_ports, SerialTransport, SystemPortOpener, TransportSettings, DEFAULT_BAUD_RATE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Control panel for the EyeMech animatronic eye", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Serial baud rate
    #[arg(long, global = true, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Wait after opening the port, in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_SETTLE_DELAY.as_millis() as u64)]
    settle_ms: u64,

    /// Minimum gap between gaze updates while dragging, in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_SEND_INTERVAL.as_millis() as u64)]
    send_interval_ms: u64,

    /// Side of the square radar canvas, in pixels
    #[arg(long, global = true, default_value_t = DEFAULT_CANVAS_SIZE)]
    canvas_size: i32,

    /// Border between the canvas edge and the radar circle, in pixels
    #[arg(long, global = true, default_value_t = DEFAULT_MARGIN)]
    margin: i32,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available serial ports
    Ports,
    /// Point the eye at (x, y), both in [-50, 50]
    Eye {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(short, long)]
        port: String,
    },
    /// Open (positive) or close (negative) the eyelids by DELTA steps
    Lid {
        #[arg(allow_negative_numbers = true)]
        delta: i32,
        #[arg(short, long)]
        port: String,
    },
    /// Blink once
    Blink {
        #[arg(short, long)]
        port: String,
    },
    /// Send a raw protocol line such as "EYE 10.00 -5.00"
    Send {
        line: String,
        #[arg(short, long)]
        port: String,
    },
    /// Replay a TOML pointer-event script through the radar
    Replay {
        script: PathBuf,
        /// Serial port; without it the replay is a dry run
        #[arg(short, long)]
        port: Option<String>,
        /// Sleep between events to reproduce the recorded timing
        #[arg(long)]
        realtime: bool,
    },
}

impl Cli {
    fn panel_config(&self) -> PanelConfig {
        PanelConfig {
            transport: TransportSettings {
                baud_rate: self.baud,
                settle_delay: Duration::from_millis(self.settle_ms),
            },
            send_interval: Duration::from_millis(self.send_interval_ms),
            canvas_size: self.canvas_size,
            margin: self.margin,
            log_level: self.log_level.to_ascii_lowercase(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.panel_config();
    config.validate().context("invalid settings")?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Ports => print_ports(),
        Command::Eye { x, y, port } => {
            let command = EyeCommand::gaze(x, y)?;
            send_one(&config, &port, command)
        }
        Command::Lid { delta, port } => send_one(&config, &port, EyeCommand::Lid(delta)),
        Command::Blink { port } => send_one(&config, &port, EyeCommand::Blink),
        Command::Send { line, port } => {
            let command: EyeCommand = line
                .parse()
                .with_context(|| format!("not a valid command line: {line:?}"))?;
            send_one(&config, &port, command)
        }
        Command::Replay {
            script,
            port,
            realtime,
        } => replay(&config, &script, port.as_deref(), realtime),
    }
}

fn print_ports() -> anyhow::Result<()> {
    let ports = list_available_ports()?;
    if ports.is_empty() {
        info!("no serial ports found");
    }
    for port in ports {
        println!("{port}");
    }
    Ok(())
}

fn connect(
    config: &PanelConfig,
    port: &str,
) -> anyhow::Result<SerialTransport<SystemPortOpener>> {
    let mut transport = SerialTransport::new(SystemPortOpener, config.transport);
    let info = transport.connect(port).context("connection failed")?;
    println!("Connected: {info}");
    Ok(transport)
}

fn send_one(config: &PanelConfig, port: &str, command: EyeCommand) -> anyhow::Result<()> {
    let mut eye = EyeMech::new(connect(config, port)?);
    eye.send(command);
    println!("→ {command}");
    Ok(())
}

fn replay(
    config: &PanelConfig,
    script: &std::path::Path,
    port: Option<&str>,
    realtime: bool,
) -> anyhow::Result<()> {
    let events = load_script(script)?;
    info!("loaded {} events from {}", events.len(), script.display());

    let transport = match port {
        Some(port) => connect(config, port)?,
        None => {
            info!("dry run: no port given, commands are not transmitted");
            SerialTransport::new(SystemPortOpener, config.transport)
        }
    };

    let mut panel = ControlPanel::new(config.surface()?, transport);
    let mut clock_ms = events.first().map_or(0, |e| e.time_ms());

    for event in events {
        if realtime {
            let wait = event.time_ms().saturating_sub(clock_ms);
            if wait > 0 {
                thread::sleep(Duration::from_millis(wait));
            }
        }
        clock_ms = event.time_ms();

        if let Some(command) = panel.handle_event(event) {
            println!("→ {command}");
        }
    }

    let stats = panel.stats();
    let marker = panel.marker();
    println!(
        "{} events, {} commands ({} EYE, {} LID, {} BLINK); marker at ({}, {})",
        stats.events,
        stats.commands(),
        stats.gaze_commands,
        stats.lid_commands,
        stats.blink_commands,
        marker.x,
        marker.y,
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
