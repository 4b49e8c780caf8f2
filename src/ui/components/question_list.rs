use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use hifzdr::corpus::Ayah;
use hifzdr::generator::Batch;
use hifzdr::session::RevealTracker;

use crate::ui::layout::wrapped_line_count;
use crate::ui::theme::Theme;

/// Text lines for one answer. With metadata the location goes on its own
/// line above the ayah text; otherwise the key trails the text.
pub fn answer_lines(ayah: &Ayah, show_info: bool) -> Vec<String> {
    if show_info {
        vec![
            format!("Juz {}, Ruku {}, Ayah {}", ayah.juz, ayah.ruku, ayah.key),
            ayah.text.clone(),
        ]
    } else {
        vec![format!("{} - ({})", ayah.text, ayah.key)]
    }
}

/// Every question of a batch as a scrollable list of cards. Answers show up
/// only as far as the reveal tracker allows.
pub struct QuestionList<'a> {
    batch: &'a Batch,
    reveal: &'a RevealTracker,
    selected: usize,
    show_info: bool,
    theme: &'a Theme,
}

impl<'a> QuestionList<'a> {
    pub fn new(
        batch: &'a Batch,
        reveal: &'a RevealTracker,
        selected: usize,
        show_info: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            batch,
            reveal,
            selected,
            show_info,
            theme,
        }
    }

    /// Builds all lines plus the index of each question's header line.
    fn build_lines(&self) -> (Vec<Line<'a>>, Vec<usize>) {
        let colors = &self.theme.colors;
        let mut lines: Vec<Line> = Vec::new();
        let mut starts = Vec::with_capacity(self.batch.questions.len());

        for (i, question) in self.batch.questions.iter().enumerate() {
            let is_selected = i == self.selected;
            starts.push(lines.len());

            let marker = if is_selected { "> " } else { "  " };
            let header_style = Style::default()
                .fg(if is_selected { colors.accent() } else { colors.fg() })
                .add_modifier(Modifier::BOLD);
            lines.push(Line::from(vec![
                Span::styled(marker, header_style),
                Span::styled(format!("Question {} ", i + 1), header_style),
                Span::styled(
                    format!("- {}", question.kind.label()),
                    Style::default().fg(colors.muted()),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  {}", question.prompt),
                Style::default().fg(colors.prompt()),
            )));

            let shown = self.reveal.revealed(i);
            for ayah in question.answers.iter().take(shown) {
                for (n, text) in answer_lines(ayah, self.show_info).into_iter().enumerate() {
                    let style = if self.show_info && n == 0 {
                        Style::default().fg(colors.ayah_key()).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(colors.answer())
                    };
                    lines.push(Line::from(Span::styled(format!("    {text}"), style)));
                }
            }

            let hidden = question.answers.len().saturating_sub(shown);
            if hidden > 0 {
                let noun = if hidden == 1 { "answer" } else { "answers" };
                lines.push(Line::from(Span::styled(
                    format!("    ... {hidden} {noun} hidden"),
                    Style::default().fg(colors.muted()).add_modifier(Modifier::ITALIC),
                )));
            }
            lines.push(Line::from(""));
        }

        (lines, starts)
    }
}

/// Wrapped row offset of `line_idx`, given the plain text of every line.
fn wrapped_offset(texts: &[String], line_idx: usize, width: usize) -> usize {
    texts
        .iter()
        .take(line_idx)
        .map(|t| wrapped_line_count(t, width))
        .sum()
}

impl Widget for QuestionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let title = format!(
            " {} mode | {} questions | seed {} ",
            self.batch.mode, self.batch.questions.len(), self.batch.seed
        );
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let (lines, starts) = self.build_lines();
        let width = inner.width as usize;
        let texts: Vec<String> = lines.iter().map(|l| l.to_string()).collect();

        // Keep the selected card's header on screen, biased toward the top.
        let scroll = starts
            .get(self.selected)
            .map(|&start| wrapped_offset(&texts, start, width))
            .unwrap_or(0);
        let total = wrapped_offset(&texts, texts.len(), width);
        let max_scroll = total.saturating_sub(inner.height as usize);
        let scroll = scroll.min(max_scroll).min(u16::MAX as usize) as u16;

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(inner, buf);
    }
}
