use crossterm::event::KeyEvent;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use hifzdr::config::Config;
use hifzdr::engine::filter::RangeSelector;
use hifzdr::session::SessionContext;
use hifzdr::store::json_store::JsonStore;

use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Questions,
    Ranges,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

pub struct App {
    pub screen: AppScreen,
    pub session: SessionContext,
    pub theme: &'static Theme,
    pub store: Option<JsonStore>,
    pub should_quit: bool,
    pub show_info: bool,
    /// Question under the cursor on the question screen.
    pub selected: usize,
    pub range_selected: usize,
    pub range_input: Option<LineInput>,
    pub status: Option<(StatusKind, String)>,
    ranges_changed: bool,
    pending_seed: Option<u64>,
    rng: SmallRng,
}

impl App {
    /// A configured seed is used for the first batch and also seeds every
    /// later batch seed, so a whole session can be replayed.
    pub fn new(
        config: &Config,
        session: SessionContext,
        theme: &'static Theme,
        store: Option<JsonStore>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            screen: AppScreen::Questions,
            session,
            theme,
            show_info: config.show_ayah_info,
            pending_seed: config.seed,
            store,
            should_quit: false,
            selected: 0,
            range_selected: 0,
            range_input: None,
            status: None,
            ranges_changed: false,
            rng,
        }
    }

    fn next_seed(&mut self) -> u64 {
        self.pending_seed.take().unwrap_or_else(|| self.rng.r#gen())
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some((kind, text.into()));
    }

    pub fn regenerate(&mut self) {
        let seed = self.next_seed();
        match self.session.generate(seed) {
            Ok(batch) => {
                let text = format!(
                    "{} questions from {} ayahs (seed {seed})",
                    batch.questions.len(),
                    batch.selection_size
                );
                self.selected = 0;
                self.set_status(StatusKind::Info, text);
            }
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }

    pub fn toggle_mode(&mut self) {
        let mode = self.session.mode().toggled();
        self.session.set_mode(mode);
        info!(%mode, "mode changed");
        self.regenerate();
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    fn question_count(&self) -> usize {
        self.session.batch().map_or(0, |b| b.questions.len())
    }

    pub fn next_question(&mut self) {
        let count = self.question_count();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn prev_question(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Reveals the next answer of the selected question, moving on to the
    /// following question once it is fully shown.
    pub fn advance(&mut self) {
        if self.session.reveal().is_complete(self.selected) {
            self.next_question();
        }
        self.session.advance(self.selected);
    }

    pub fn reveal_all(&mut self) {
        self.session.reveal_all(self.selected);
    }

    pub fn go_to_ranges(&mut self) {
        self.range_selected = self
            .range_selected
            .min(self.session.ranges().len().saturating_sub(1));
        self.range_input = None;
        self.screen = AppScreen::Ranges;
    }

    /// Leaving the range screen regenerates when the selection changed.
    pub fn go_to_questions(&mut self) {
        self.range_input = None;
        self.screen = AppScreen::Questions;
        if std::mem::take(&mut self.ranges_changed) {
            self.regenerate();
        }
    }

    pub fn range_next(&mut self) {
        let count = self.session.ranges().len();
        if count > 0 {
            self.range_selected = (self.range_selected + 1).min(count - 1);
        }
    }

    pub fn range_prev(&mut self) {
        self.range_selected = self.range_selected.saturating_sub(1);
    }

    pub fn toggle_selected_range(&mut self) {
        if self.range_selected < self.session.ranges().len() {
            self.session.toggle_range(self.range_selected);
            self.ranges_updated();
        }
    }

    pub fn delete_selected_range(&mut self) {
        if self.range_selected < self.session.ranges().len() {
            self.session.remove_range(self.range_selected);
            self.range_selected = self
                .range_selected
                .min(self.session.ranges().len().saturating_sub(1));
            self.ranges_updated();
        }
    }

    pub fn start_range_input(&mut self) {
        self.range_input = Some(LineInput::new(""));
    }

    pub fn handle_range_input(&mut self, key: KeyEvent) {
        let Some(input) = self.range_input.as_mut() else {
            return;
        };
        match input.handle(key) {
            InputResult::Continue => {}
            InputResult::Cancel => self.range_input = None,
            InputResult::Submit => {
                let text = input.value().to_string();
                if text.trim().is_empty() {
                    self.range_input = None;
                    return;
                }
                match self.add_range(&text) {
                    Ok(()) => self.range_input = None,
                    Err(msg) => self.set_status(StatusKind::Error, msg),
                }
            }
        }
    }

    fn add_range(&mut self, text: &str) -> Result<(), String> {
        let selector: RangeSelector = text.parse().map_err(|e| format!("{e}"))?;
        self.session
            .add_range(selector.clone())
            .map_err(|e| format!("{e}"))?;
        if let Some(idx) = self.session.ranges().iter().position(|r| r.selector == selector) {
            self.range_selected = idx;
        }
        self.set_status(StatusKind::Info, format!("Added {selector}"));
        self.ranges_updated();
        Ok(())
    }

    fn ranges_updated(&mut self) {
        self.ranges_changed = true;
        if let Some(ref store) = self.store {
            if let Err(err) = store.save_ranges(self.session.ranges()) {
                warn!(error = %err, "could not save ranges");
                self.set_status(StatusKind::Error, format!("Could not save ranges: {err}"));
            }
        }
    }
}
