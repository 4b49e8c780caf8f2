use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥100 cols: question list + selection sidebar
    Narrow, // <100 cols: question list only, selection summary in header
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 100 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_sidebar(&self) -> bool {
        *self == LayoutTier::Wide
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub sidebar: Option<Rect>,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    /// `footer_lines` is the number of packed hint lines below the main area.
    pub fn new(area: Rect, footer_lines: u16) -> Self {
        let tier = LayoutTier::from_area(area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(footer_lines.max(1) + 1),
            ])
            .split(area);

        if tier.show_sidebar() {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
                .split(vertical[1]);

            Self {
                header: vertical[0],
                main: horizontal[0],
                sidebar: Some(horizontal[1]),
                footer: vertical[2],
                tier,
            }
        } else {
            Self {
                header: vertical[0],
                main: vertical[1],
                sidebar: None,
                footer: vertical[2],
                tier,
            }
        }
    }
}

/// Lines `text` occupies when soft-wrapped at `width` columns.
pub fn wrapped_line_count(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let chars = text.chars().count().max(1);
    chars.div_ceil(width)
}

/// Greedily packs key hints into as few lines as fit in `width`.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width || !has_hint {
            current = candidate;
        } else {
            out.push(current);
            current = format!("{prefix}{hint}");
        }
        has_hint = true;
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 48;
    const MIN_POPUP_HEIGHT: u16 = 7;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_pack_into_width() {
        let lines = pack_hint_lines(&["[space] Next", "[a] All", "[g] New batch"], 24);
        assert_eq!(lines, vec![" [space] Next  [a] All", " [g] New batch"]);
    }

    #[test]
    fn oversized_hint_gets_its_own_line() {
        let lines = pack_hint_lines(&["[x] a very long hint indeed", "[q] Quit"], 10);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], " [q] Quit");
    }

    #[test]
    fn zero_width_packs_nothing() {
        assert!(pack_hint_lines(&["[q] Quit"], 0).is_empty());
        assert_eq!(wrapped_line_count("abc", 0), 0);
        assert_eq!(wrapped_line_count("", 10), 1);
        assert_eq!(wrapped_line_count("abcdefghij", 4), 3);
    }

    #[test]
    fn sidebar_only_when_wide() {
        assert!(AppLayout::new(Rect::new(0, 0, 120, 40), 1).sidebar.is_some());
        assert!(AppLayout::new(Rect::new(0, 0, 80, 40), 1).sidebar.is_none());
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 5);
        let r = centered_rect(50, 50, area);
        assert_eq!((r.width, r.height), (40, 5));
    }
}
