use std::fs;
use std::path::PathBuf;
use std::process;

use bzs::{parse_script, timeline, BzsError, PlayerOptions, SoundEvent, Waveform};
use clap::{Parser, ValueEnum};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bzs")]
#[command(about = "Compile a Buzzer Script into a timed list of sound events", long_about = None)]
struct Cli {
    /// Script file (.bzs)
    script: PathBuf,

    /// YAML file with default tempo, waveform, and volume
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Default tempo in BPM (overrides the options file)
    #[arg(short, long)]
    tempo: Option<f64>,

    /// Default waveform: sine, square, sawtooth, or triangle
    #[arg(short, long)]
    waveform: Option<String>,

    /// Default volume 0.0-1.0
    #[arg(short, long)]
    volume: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "yaml")]
    format: Format,

    /// Leave out rests
    #[arg(short, long)]
    audible: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Table,
}

fn load_options(cli: &Cli) -> Result<PlayerOptions, String> {
    let mut options = match &cli.options {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("Error reading options '{}': {}", path.display(), e))?;
            PlayerOptions::from_yaml(&content).map_err(|e| e.to_string())?
        }
        None => PlayerOptions::default(),
    };

    if let Some(tempo) = cli.tempo {
        options.tempo = tempo;
    }
    if let Some(volume) = cli.volume {
        options.volume = volume;
    }
    if let Some(name) = &cli.waveform {
        options.waveform = name
            .parse::<Waveform>()
            .map_err(|e| BzsError::ConfigError(e).to_string())?;
    }
    options.validated().map_err(|e| e.to_string())
}

fn render_table(events: &[SoundEvent]) -> String {
    let mut out = format!(
        "{:>10} {:>10} {:>12} {:>9} {:>7}\n",
        "start", "duration", "frequency", "waveform", "volume"
    );
    for event in events {
        let frequency = event
            .frequency_hz
            .map_or_else(|| "rest".to_string(), |hz| format!("{:.3}", hz));
        out.push_str(&format!(
            "{:>10.4} {:>10.4} {:>12} {:>9} {:>7.3}\n",
            event.start_seconds, event.duration_seconds, frequency, event.waveform, event.volume
        ));
    }
    out
}

fn run(cli: &Cli) -> Result<String, String> {
    let options = load_options(cli)?;
    let source = fs::read_to_string(&cli.script)
        .map_err(|e| format!("Error reading file '{}': {}", cli.script.display(), e))?;

    let script = parse_script(&source).map_err(|e| e.to_string())?;
    for track in &script.tracks {
        debug!(
            track = %track.name,
            tokens = track.tokens.len(),
            beats = track.length_beats(),
            delay_beats = track.delay_beats,
            "parsed track"
        );
    }

    let mut events = timeline::lower(&script, &options);
    if cli.audible {
        events = timeline::audible(&events).copied().collect();
    }

    info!(
        tracks = script.tracks.len(),
        events = events.len(),
        end_seconds = timeline::end_seconds(&events),
        "compiled {}",
        cli.script.display()
    );
    for event in &events {
        debug!(?event);
    }

    match cli.format {
        Format::Yaml => serde_yaml::to_string(&events).map_err(|e| e.to_string()),
        Format::Table => Ok(render_table(&events)),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => print!("{}", output),
        Err(message) => {
            error!("{}", message);
            eprintln!("{}", message);
            process::exit(1);
        }
    }
}
