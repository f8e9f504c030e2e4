use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use typewell::app::{App, Collaborators};
use typewell::catalog::{Level, ParagraphCatalog};
use typewell::config::Config;
use typewell::event::{EventPump, TermEvent};
use typewell::grammar::languagetool::LanguageToolClient;
use typewell::grammar::{DisabledChecker, GrammarChecker};
use typewell::speech::{CommandSpeaker, SilentSpeaker, Speaker};
use typewell::ui;
use typewell::ui::theme::Theme;

const LOG_ENV: &str = "TYPEWELL_LOG";

#[derive(Parser)]
#[command(name = "typewell", version, about = "Terminal paragraph typing trainer")]
struct Cli {
    #[arg(short, long, help = "Paragraph file with `<Level>: <text>` lines")]
    paragraphs: Option<PathBuf>,

    #[arg(short, long, help = "Starting level (easy, medium, hard)")]
    level: Option<Level>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Skip grammar checking")]
    no_grammar: bool,

    #[arg(long, help = "Disable text-to-speech dictation")]
    no_speech: bool,

    #[arg(short, long, help = "Config file path")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = loaded.unwrap_or_else(|err| {
        eprintln!("warning: {err:#}; using default settings");
        Config::default()
    });
    apply_cli(&mut config, &cli);

    tracing::info!(
        config = %config_path.display(),
        log = ?log_path,
        level = %config.start_level,
        "starting typewell"
    );

    let catalog = ParagraphCatalog::load(&config.paragraphs_path);
    let theme = Theme::resolve(&config.theme);
    let parts = Collaborators {
        grammar: build_grammar(&config),
        speaker: build_speaker(&config),
        cue_sink: Box::new(io::stdout()),
    };
    let mut app = App::new(config, catalog, theme, parts, SmallRng::from_entropy());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = EventPump::spawn(app.config.tick_rate())
        .and_then(|events| run_app(&mut terminal, &mut app, &events));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "exiting on error");
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventPump,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| ui::render(frame, app, Instant::now()))?;
        }

        dirty = match events.next()? {
            TermEvent::Key(key) => {
                app.handle_key(key, Instant::now());
                true
            }
            TermEvent::Tick => app.on_tick(Instant::now()),
            TermEvent::Resize => true,
        };

        if app.should_quit {
            return Ok(());
        }
    }
}

fn apply_cli(config: &mut Config, cli: &Cli) {
    if let Some(path) = &cli.paragraphs {
        config.paragraphs_path = path.clone();
    }
    if let Some(level) = cli.level {
        config.start_level = level;
    }
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    if cli.no_grammar {
        config.grammar.enabled = false;
    }
    if cli.no_speech {
        config.speech.enabled = false;
    }
}

fn build_grammar(config: &Config) -> Box<dyn GrammarChecker> {
    if !config.grammar.enabled {
        tracing::info!("grammar checking disabled");
        return Box::new(DisabledChecker);
    }
    match LanguageToolClient::new(
        &config.grammar.server_url,
        &config.grammar.language,
        config.grammar_timeout(),
    ) {
        Ok(client) => {
            tracing::info!(
                endpoint = client.endpoint(),
                language = client.language(),
                "grammar checker ready"
            );
            Box::new(client)
        }
        Err(err) => {
            tracing::warn!(error = %err, "grammar client unavailable, checking disabled");
            Box::new(DisabledChecker)
        }
    }
}

fn build_speaker(config: &Config) -> Arc<dyn Speaker> {
    if !config.speech.enabled {
        return Arc::new(SilentSpeaker);
    }
    let speech = &config.speech;
    Arc::new(CommandSpeaker::new(
        speech.program.clone(),
        speech.args.clone(),
        speech.rate,
    ))
}

/// Log to a file under the data dir; the terminal belongs to the UI.
fn init_logging() -> Option<PathBuf> {
    let dir = dirs::data_dir()?.join("typewell");
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join("typewell.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Some(path)
}
