use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use kanadrill::app::{App, AppScreen, PracticeMode};
use kanadrill::config::Config;
use kanadrill::engine::PracticeOrder;
use kanadrill::event::{AppEvent, EventHandler};
use kanadrill::logging;
use kanadrill::ui::screens;
use kanadrill::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "kanadrill", version, about = "Terminal kana and phrase typing drills")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Interface language (en, zh-CN)")]
    lang: Option<String>,

    #[arg(long, help = "Disable pronunciation playback")]
    no_speech: bool,

    #[arg(long, help = "Directory of <codepoint>.svg stroke diagrams")]
    diagram_dir: Option<String>,

    #[arg(long, help = "Write the config file with defaults filled in and exit")]
    init_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    if cli.init_config {
        let path = config.save()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    if let Err(err) = logging::init(&logging::log_path(), &config.log_level) {
        eprintln!("logging disabled: {err:#}");
    }
    if let Some(err) = config_err {
        tracing::warn!("ignoring unreadable config {}: {err:#}", Config::config_path().display());
    }

    if let Some(theme_name) = cli.theme {
        if Theme::load(&theme_name).is_some() {
            config.theme = theme_name;
        } else {
            tracing::warn!(theme = %theme_name, "unknown theme, keeping {}", config.theme);
        }
    }
    if let Some(lang) = cli.lang {
        config.language = lang;
    }
    if cli.no_speech {
        config.speech_enabled = false;
    }
    if let Some(dir) = cli.diagram_dir {
        config.stroke_diagram_dir = dir;
    }
    config.normalize_language(&kanadrill::available_locales());
    rust_i18n::set_locale(&config.language);

    tracing::info!(
        theme = %config.theme,
        language = %config.language,
        speech = config.speech_enabled,
        "starting"
    );
    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("{err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| screens::render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Paste(text) => {
                app.paste(&text, Instant::now());
            }
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }
        app.tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only process Press events; Repeat would inflate input
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.diagram.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('d')) {
            app.close_stroke_diagram();
        }
        return;
    }

    match app.screen {
        AppScreen::ModeSelect => handle_mode_key(app, key),
        AppScreen::KanaSelect => handle_kana_select_key(app, key),
        AppScreen::PhraseSelect => handle_phrase_select_key(app, key),
        AppScreen::KanaPractice | AppScreen::PhrasePractice => handle_practice_key(app, key),
    }
}

fn handle_mode_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.select_mode(PracticeMode::Kana),
        KeyCode::Char('2') => app.select_mode(PracticeMode::Phrases),
        KeyCode::Char('t') => app.cycle_theme(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => match app.menu.selected {
            0 => app.select_mode(PracticeMode::Kana),
            1 => app.select_mode(PracticeMode::Phrases),
            _ => {}
        },
        _ => {}
    }
}

fn handle_kana_select_key(app: &mut App, key: KeyEvent) {
    if app.kana_range.is_some() {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => app.kana_move_horizontal(-1),
            KeyCode::Right | KeyCode::Char('l') => app.kana_move_horizontal(1),
            KeyCode::Up | KeyCode::Char('k') => app.kana_move_vertical(-1),
            KeyCode::Down | KeyCode::Char('j') => app.kana_move_vertical(1),
            KeyCode::Char('v') | KeyCode::Char('V') | KeyCode::Char(' ') | KeyCode::Enter => {
                app.kana_commit_range()
            }
            KeyCode::Esc => app.kana_cancel_range(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.go_back(),
        KeyCode::Left | KeyCode::Char('h') => app.kana_move_horizontal(-1),
        KeyCode::Right | KeyCode::Char('l') => app.kana_move_horizontal(1),
        KeyCode::Up | KeyCode::Char('k') => app.kana_move_vertical(-1),
        KeyCode::Down | KeyCode::Char('j') => app.kana_move_vertical(1),
        KeyCode::Char(' ') => app.kana_toggle_char(),
        KeyCode::Char('r') => app.kana_toggle_row(),
        KeyCode::Char('v') => app.kana_begin_range(false),
        KeyCode::Char('V') => app.kana_begin_range(true),
        KeyCode::Char('a') => app.kana_select_all(),
        KeyCode::Char('n') => app.kana_select_none(),
        KeyCode::Char('p') => app.speak_at_cursor(),
        KeyCode::Char('d') => {
            app.show_stroke_diagram();
        }
        KeyCode::Enter => {
            app.start_practice(PracticeOrder::Sequential);
        }
        KeyCode::Char('s') => {
            app.start_practice(PracticeOrder::Random);
        }
        _ => {}
    }
}

fn handle_phrase_select_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_back(),
        KeyCode::Up | KeyCode::Char('k') => app.phrase_move(-1),
        KeyCode::Down | KeyCode::Char('j') => app.phrase_move(1),
        KeyCode::PageUp => app.phrase_move(-10),
        KeyCode::PageDown => app.phrase_move(10),
        KeyCode::Char('c') => app.phrase_cycle_category(),
        KeyCode::Char('d') => app.phrase_cycle_difficulty(),
        KeyCode::Char(' ') => app.phrase_toggle(),
        KeyCode::Char('a') => app.phrase_select_all_filtered(),
        KeyCode::Char('n') => app.phrase_clear_picks(),
        KeyCode::Char('p') => app.speak_at_cursor(),
        KeyCode::Enter => {
            app.start_practice(PracticeOrder::Sequential);
        }
        KeyCode::Char('s') => {
            app.start_practice(PracticeOrder::Random);
        }
        _ => {}
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    if app.last_stats.is_some() {
        match key.code {
            KeyCode::Char('r') => app.restart_practice(),
            KeyCode::Char('q') | KeyCode::Esc => app.go_back(),
            _ => {}
        }
        return;
    }

    let now = Instant::now();
    match key.code {
        KeyCode::Esc => app.go_back(),
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.restart_practice()
        }
        KeyCode::Backspace => {
            app.backspace(now);
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.type_char(ch, now);
        }
        _ => {}
    }
}
