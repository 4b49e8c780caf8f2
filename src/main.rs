mod app;
mod event;
mod ui;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tracing::{info, warn};

use hifzdr::config::Config;
use hifzdr::corpus::Corpus;
use hifzdr::engine::Mode;
use hifzdr::engine::filter::RangeSelector;
use hifzdr::logging::{LogConfig, init_logging, log_target};
use hifzdr::session::SessionContext;
use hifzdr::store::json_store::JsonStore;

use app::{App, AppScreen, StatusKind};
use event::{AppEvent, EventHandler};
use ui::components::question_list::{QuestionList, answer_lines};
use ui::components::range_list::RangeList;
use ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use ui::theme::Theme;

#[derive(Parser)]
#[command(name = "hifzdr", version, about = "Terminal Quran recitation drill trainer")]
struct Cli {
    #[arg(short, long, help = "Path to the corpus JSON file")]
    corpus: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Drill mode (study or test)")]
    mode: Option<Mode>,

    #[arg(short, long, help = "Seed for reproducible batches")]
    seed: Option<u64>,

    #[arg(
        short = 'r',
        long = "range",
        value_name = "SELECTOR",
        help = "Range to drill, e.g. juz:30, surah:1,2, ruku:30:1-4, ayah:2:1-20 (repeatable)"
    )]
    ranges: Vec<RangeSelector>,

    #[arg(short, long, help = "Print one batch with answers and exit")]
    print: bool,
}

const QUESTION_HINTS: &[&str] = &[
    "[space/enter] Reveal next",
    "[a] Reveal all",
    "[j/k] Move",
    "[g] New batch",
    "[m] Toggle mode",
    "[i] Ayah info",
    "[r] Ranges",
    "[q] Quit",
];

const RANGE_HINTS: &[&str] = &[
    "[n] New range",
    "[space] Toggle",
    "[d] Delete",
    "[j/k] Move",
    "[esc] Back to questions",
];

const INPUT_HINTS: &[&str] = &[
    "[enter] Add",
    "[tab] Complete kind",
    "[esc] Cancel",
    "surah:1,2  juz:30  quarter:1  ruku:30:1-4  ayah:2:1-20",
];

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    if let Some(path) = cli.corpus {
        config.corpus_path = path.to_string_lossy().to_string();
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(mode) = cli.mode {
        config.default_mode = mode.as_str().to_string();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let store = JsonStore::new();

    let store_log = store.as_ref().ok().map(JsonStore::log_path);
    let log_file = log_target(store_log.as_deref(), cli.print);
    init_logging(&LogConfig::new(&config.log_filter).with_log_file(log_file))
        .context("could not set up logging")?;

    if let Some(err) = config_err {
        warn!(error = %err, path = %Config::config_path().display(), "using default config");
    }
    let store = store
        .inspect_err(|err| warn!(error = %err, "saved ranges are unavailable"))
        .ok();

    let corpus = Corpus::load(Path::new(&config.corpus_path))
        .with_context(|| format!("could not load the corpus from {}", config.corpus_path))?;
    let corpus = Arc::new(corpus);

    let mut session = if cli.ranges.is_empty() {
        let saved = store.as_ref().map(|s| s.load_ranges()).unwrap_or_default();
        SessionContext::new(corpus, saved, config.mode())
    } else {
        let mut session = SessionContext::new(corpus, Vec::new(), config.mode());
        for selector in cli.ranges {
            let text = selector.to_string();
            session
                .add_range(selector)
                .with_context(|| format!("invalid range {text}"))?;
        }
        session
    };

    if cli.print {
        return print_batch(&mut session, &config);
    }

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        warn!(
            theme = %config.theme,
            available = ?Theme::available_themes(),
            "unknown theme, using the default"
        );
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));
    let mut app = App::new(&config, session, theme, store);
    if app.session.subset().is_empty() {
        app.go_to_ranges();
    } else {
        app.regenerate();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let mode = app.session.mode();
    if mode != config.mode() || app.show_info != config.show_ayah_info {
        let path = Config::config_path();
        if let Err(err) = Config::save_preferences(&path, mode, app.show_info) {
            warn!(error = %err, path = %path.display(), "could not save preferences");
        }
    }

    info!("session ended");
    result
}

/// Generates one batch and writes every prompt with all answers to stdout.
fn print_batch(session: &mut SessionContext, config: &Config) -> Result<()> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let batch = session.generate(seed)?;

    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} mode | {} questions from {} ayahs | seed {}",
        batch.mode,
        batch.questions.len(),
        batch.selection_size,
        batch.seed
    )?;
    for (i, question) in batch.questions.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "Question {} - {}", i + 1, question.kind.label())?;
        writeln!(out, "{}", question.prompt)?;
        for ayah in &question.answers {
            for line in answer_lines(ayah, config.show_ayah_info) {
                writeln!(out, "    {line}")?;
            }
        }
    }
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Redraw => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Questions => handle_questions_key(app, key),
        AppScreen::Ranges => handle_ranges_key(app, key),
    }
}

fn handle_questions_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char(' ') | KeyCode::Enter => app.advance(),
        KeyCode::Char('a') => app.reveal_all(),
        KeyCode::Char('g') => app.regenerate(),
        KeyCode::Char('m') => app.toggle_mode(),
        KeyCode::Char('i') => app.toggle_info(),
        KeyCode::Char('r') => app.go_to_ranges(),
        KeyCode::Down | KeyCode::Char('j') => app.next_question(),
        KeyCode::Up | KeyCode::Char('k') => app.prev_question(),
        _ => {}
    }
}

fn handle_ranges_key(app: &mut App, key: KeyEvent) {
    // The input line takes every key while open
    if app.range_input.is_some() {
        app.handle_range_input(key);
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('r') => app.go_to_questions(),
        KeyCode::Char('n') | KeyCode::Char('+') => app.start_range_input(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected_range(),
        KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => app.delete_selected_range(),
        KeyCode::Down | KeyCode::Char('j') => app.range_next(),
        KeyCode::Up | KeyCode::Char('k') => app.range_prev(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Questions => render_questions(frame, app),
        AppScreen::Ranges => render_ranges(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect, with_ranges: bool) {
    let colors = &app.theme.colors;

    let mut info = format!(
        " {} mode | {} ayahs selected",
        app.session.mode(),
        app.session.subset().len()
    );
    if with_ranges {
        let active: Vec<String> = app
            .session
            .ranges()
            .iter()
            .filter(|r| r.active)
            .map(|r| r.selector.to_string())
            .collect();
        if !active.is_empty() {
            info.push_str(&format!(" | {}", active.join(" ")));
        }
    }

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " hifzdr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(info, Style::default().fg(colors.muted()).bg(colors.header_bg())),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

/// Status message on the first row, packed key hints below it.
fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect, hints: &[String]) {
    let colors = &app.theme.colors;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    if let Some((kind, text)) = &app.status {
        let color = match kind {
            StatusKind::Info => colors.success(),
            StatusKind::Error => colors.error(),
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {text}"), Style::default().fg(color))),
            rows[0],
        );
    }

    let lines: Vec<Line> = hints
        .iter()
        .map(|h| Line::from(Span::styled(h.as_str(), Style::default().fg(colors.accent()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), rows[1]);
}

fn render_questions(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let hints = pack_hint_lines(QUESTION_HINTS, area.width as usize);
    let layout = AppLayout::new(area, hints.len() as u16);
    render_header(frame, app, layout.header, !layout.tier.show_sidebar());

    match app.session.batch() {
        Some(batch) => {
            let list = QuestionList::new(
                batch,
                app.session.reveal(),
                app.selected,
                app.show_info,
                app.theme,
            );
            frame.render_widget(list, layout.main);
        }
        None => {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No questions yet.",
                    Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Press [r] to choose ranges, then [g] to generate a batch.",
                    Style::default().fg(colors.muted()),
                )),
            ])
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_style(Style::default().fg(colors.border()))
                    .style(Style::default().bg(colors.bg())),
            );
            frame.render_widget(empty, layout.main);
        }
    }

    if let Some(sidebar) = layout.sidebar {
        let summary = RangeList::new(
            app.session.ranges(),
            app.session.subset().len(),
            app.theme,
        )
        .compact(true);
        frame.render_widget(summary, sidebar);
    }

    render_footer(frame, app, layout.footer, &hints);
}

fn render_ranges(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let hint_set = if app.range_input.is_some() {
        INPUT_HINTS
    } else {
        RANGE_HINTS
    };
    let hints = pack_hint_lines(hint_set, area.width as usize);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(hints.len() as u16 + 1),
        ])
        .split(area);
    render_header(frame, app, layout[0], false);

    let list = RangeList::new(
        app.session.ranges(),
        app.session.subset().len(),
        app.theme,
    )
    .selected(app.range_selected)
    .input(app.range_input.as_ref());
    frame.render_widget(list, centered_rect(70, 90, layout[1]));

    render_footer(frame, app, layout[2], &hints);
}
