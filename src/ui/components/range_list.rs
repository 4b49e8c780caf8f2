use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use hifzdr::engine::filter::SavedRange;

use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

/// Saved range selectors with their active flags, the number of ayahs the
/// active ones select, and an optional input line for a new selector.
pub struct RangeList<'a> {
    ranges: &'a [SavedRange],
    matching: usize,
    selected: Option<usize>,
    input: Option<&'a LineInput>,
    compact: bool,
    theme: &'a Theme,
}

impl<'a> RangeList<'a> {
    pub fn new(ranges: &'a [SavedRange], matching: usize, theme: &'a Theme) -> Self {
        Self {
            ranges,
            matching,
            selected: None,
            input: None,
            compact: false,
            theme,
        }
    }

    pub fn selected(mut self, idx: usize) -> Self {
        self.selected = Some(idx);
        self
    }

    pub fn input(mut self, input: Option<&'a LineInput>) -> Self {
        self.input = input;
        self
    }

    /// Sidebar rendering: active ranges only, no selection marker.
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    fn range_lines(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;

        if self.ranges.is_empty() {
            let hint = if self.compact {
                "No ranges saved"
            } else {
                "No ranges saved. Press [n] and type e.g. juz:30 or ayah:2:1-20"
            };
            return vec![Line::from(Span::styled(
                hint,
                Style::default().fg(colors.muted()),
            ))];
        }

        self.ranges
            .iter()
            .enumerate()
            .filter(|(_, r)| !self.compact || r.active)
            .map(|(i, range)| {
                let is_selected = self.selected == Some(i);
                let marker = if is_selected { "> " } else { "  " };
                let check = if range.active { "[x] " } else { "[ ] " };
                let mut style = Style::default().fg(if range.active {
                    colors.fg()
                } else {
                    colors.muted()
                });
                if is_selected {
                    style = style
                        .fg(colors.accent())
                        .bg(colors.selected_bg())
                        .add_modifier(Modifier::BOLD);
                }
                if self.compact {
                    Line::from(Span::styled(format!(" {}", range.selector), style))
                } else {
                    Line::from(vec![
                        Span::styled(marker, style),
                        Span::styled(check, style),
                        Span::styled(range.selector.to_string(), style),
                    ])
                }
            })
            .collect()
    }

    fn input_line(&self, input: &'a LineInput) -> Line<'a> {
        let colors = &self.theme.colors;
        let (before, cursor, after) = input.render_parts();
        let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());
        let text_style = Style::default().fg(colors.fg());
        let cursor_text = cursor.map(String::from).unwrap_or_else(|| " ".to_string());
        Line::from(vec![
            Span::styled(" New range: ", Style::default().fg(colors.accent())),
            Span::styled(before, text_style),
            Span::styled(cursor_text, cursor_style),
            Span::styled(after, text_style),
        ])
    }
}

impl Widget for RangeList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = if self.compact { " Selection " } else { " Ranges " };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(if self.compact {
                colors.border()
            } else {
                colors.border_focused()
            }))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let input_height = if self.input.is_some() { 2 } else { 0 };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(input_height),
            ])
            .split(inner);

        let count_style = if self.matching == 0 {
            Style::default().fg(colors.warning())
        } else {
            Style::default().fg(colors.success())
        };
        let noun = if self.matching == 1 { "ayah" } else { "ayahs" };
        Paragraph::new(Line::from(Span::styled(
            format!(" {} {noun} selected", self.matching),
            count_style.add_modifier(Modifier::BOLD),
        )))
        .render(layout[0], buf);

        // Scroll the list so the selected row stays visible.
        let visible = layout[1].height as usize;
        let scroll = match self.selected {
            Some(idx) if visible > 0 && idx >= visible => idx + 1 - visible,
            _ => 0,
        };
        Paragraph::new(self.range_lines())
            .wrap(Wrap { trim: false })
            .scroll((scroll.min(u16::MAX as usize) as u16, 0))
            .render(layout[1], buf);

        if let Some(input) = self.input {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Length(1)])
                .split(layout[2]);
            Paragraph::new(self.input_line(input)).render(rows[1], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hifzdr::engine::filter::RangeSelector;

    fn ranges() -> Vec<SavedRange> {
        let mut off = SavedRange::new(RangeSelector::Surahs(vec![1]));
        off.active = false;
        vec![SavedRange::new(RangeSelector::Juz(vec![30])), off]
    }

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn full_list_marks_active_and_selected() {
        let theme = Theme::default();
        let ranges = ranges();
        let list = RangeList::new(&ranges, 564, &theme).selected(1);
        assert_eq!(
            text(&list.range_lines()),
            vec!["  [x] juz:30", "> [ ] surah:1"]
        );
    }

    #[test]
    fn compact_list_hides_inactive() {
        let theme = Theme::default();
        let ranges = ranges();
        let list = RangeList::new(&ranges, 564, &theme).compact(true);
        assert_eq!(text(&list.range_lines()), vec![" juz:30"]);
    }

    #[test]
    fn input_line_shows_cursor_cell() {
        let theme = Theme::default();
        let input = LineInput::new("juz:1");
        let list = RangeList::new(&[], 0, &theme);
        assert_eq!(list.input_line(&input).to_string(), " New range: juz:1 ");
    }
}
