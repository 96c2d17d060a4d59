use std::ops::Range;

use ratatui::style::Style;
use ratatui::text::Span;

use crate::util::unicode;

/// Push spans for `text` with the byte `ranges` styled as matches. Ranges
/// that fall outside the text or off a char boundary are skipped.
pub(super) fn push_highlighted_ranges<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    ranges: &[Range<usize>],
    base_style: Style,
    highlight_style: Style,
) {
    let mut last = 0;
    for range in ranges {
        let valid = range.start >= last
            && range.end <= text.len()
            && range.start < range.end
            && text.is_char_boundary(range.start)
            && text.is_char_boundary(range.end);
        if !valid {
            continue;
        }
        if range.start > last {
            spans.push(Span::styled(text[last..range.start].to_string(), base_style));
        }
        spans.push(Span::styled(
            text[range.clone()].to_string(),
            highlight_style,
        ));
        last = range.end;
    }
    if last < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last..].to_string(), base_style));
    }
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Pad `spans` with `style` out to `width` cells.
pub(super) fn pad_spans(spans: &mut Vec<Span<'_>>, width: usize, style: Style) {
    let used = spans_width(spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
}

/// Ten-cell progress bar, e.g. `██████░░░░`
pub(super) fn progress_bar(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) + 5) / 10;
    format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(10 - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn contents(spans: &[Span]) -> Vec<String> {
        spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn highlighted_ranges_split_text() {
        let hl = Style::default().fg(Color::Red);
        let mut spans = Vec::new();
        push_highlighted_ranges(&mut spans, "Design homepage", &[0..6], Style::default(), hl);
        assert_eq!(contents(&spans), vec!["Design", " homepage"]);
        assert_eq!(spans[0].style, hl);
    }

    #[test]
    fn bad_ranges_are_skipped() {
        let mut spans = Vec::new();
        push_highlighted_ranges(
            &mut spans,
            "café",
            &[4..5, 10..12],
            Style::default(),
            Style::default(),
        );
        assert_eq!(contents(&spans), vec!["café"]);
    }

    #[test]
    fn progress_bar_rounds() {
        assert_eq!(progress_bar(0), "░░░░░░░░░░");
        assert_eq!(progress_bar(65), "███████░░░");
        assert_eq!(progress_bar(100), "██████████");
        assert_eq!(spans_width(&[Span::raw(progress_bar(40))]), 10);
    }
}
