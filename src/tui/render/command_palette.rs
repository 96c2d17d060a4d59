use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::helpers::{pad_spans, push_highlighted_ranges, spans_width};
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

const MAX_VISIBLE: usize = 10;
const MAX_INNER_WIDTH: u16 = 60;

/// Render the search palette overlay
pub fn render_command_palette(frame: &mut Frame, app: &App, area: Rect) {
    let Some(palette) = &app.palette else {
        return;
    };

    let bg = app.theme.background;
    let highlight = app.theme.highlight;
    let dim = app.theme.dim;

    let prompt_style = Style::default()
        .fg(highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let input_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let normal_style = Style::default().fg(app.theme.text).bg(bg);
    let footer_style = Style::default().fg(dim).bg(bg);
    let blank_style = Style::default().bg(bg);

    let content_width = area.width.saturating_sub(4); // 2 chars padding each side
    let inner_w = content_width.min(MAX_INNER_WIDTH) as usize;
    let popup_w = (inner_w as u16) + 2; // +2 for borders

    let mut lines: Vec<Line> = Vec::new();

    // Input line: " > query▌"
    let mut input_spans = vec![
        Span::styled(" > ", prompt_style),
        Span::styled(palette.input.before_cursor().to_string(), input_style),
        Span::styled("\u{258C}", Style::default().fg(highlight).bg(bg)),
        Span::styled(
            palette.input.text()[palette.input.before_cursor().len()..].to_string(),
            input_style,
        ),
    ];
    pad_spans(&mut input_spans, inner_w, blank_style);
    lines.push(Line::from(input_spans));

    lines.push(Line::from(Span::styled(
        "\u{2500}".repeat(inner_w),
        Style::default().fg(dim).bg(bg),
    )));

    if palette.results.is_empty() {
        let msg = if palette.debounce.is_pending() {
            "Searching\u{2026}"
        } else if palette.input.text().trim().is_empty() {
            "Search projects, tasks and people"
        } else {
            "No results"
        };
        let msg_len = msg.chars().count();
        let left_pad = inner_w.saturating_sub(msg_len) / 2;
        lines.push(Line::from(Span::styled(" ".repeat(inner_w), blank_style)));
        let mut spans = vec![
            Span::styled(" ".repeat(left_pad), blank_style),
            Span::styled(msg, normal_style),
        ];
        pad_spans(&mut spans, inner_w, blank_style);
        lines.push(Line::from(spans));
        lines.push(Line::from(Span::styled(" ".repeat(inner_w), blank_style)));
    } else {
        let visible_count = palette.results.len().min(MAX_VISIBLE);
        let scroll_offset = (palette.selected + 1).saturating_sub(visible_count);

        for (idx, result) in palette
            .results
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(visible_count)
        {
            let is_selected = idx == palette.selected;
            let row_bg = if is_selected { app.theme.selection_bg } else { bg };
            let row_pad = Style::default().bg(row_bg);
            let label_style = if is_selected {
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(row_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                normal_style
            };
            let hl_style = Style::default()
                .fg(app.theme.search_match_fg)
                .bg(app.theme.search_match_bg);

            let indicator = if is_selected { " \u{25B6} " } else { "   " };
            let mut spans: Vec<Span> = vec![Span::styled(
                indicator,
                Style::default().fg(highlight).bg(row_bg),
            )];

            // Right-aligned kind label
            let kind = result.kind.as_str();
            let title_room = inner_w.saturating_sub(3 + kind.len() + 2);
            if result.title.chars().count() <= title_room {
                push_highlighted_ranges(
                    &mut spans,
                    &result.title,
                    &result.spans,
                    label_style,
                    hl_style,
                );
            } else {
                spans.push(Span::styled(
                    truncate_to_width(&result.title, title_room),
                    label_style,
                ));
            }
            let used = spans_width(&spans);
            if used + kind.len() + 1 < inner_w {
                spans.push(Span::styled(
                    " ".repeat(inner_w - used - kind.len() - 1),
                    row_pad,
                ));
                spans.push(Span::styled(kind, Style::default().fg(dim).bg(row_bg)));
            }
            pad_spans(&mut spans, inner_w, row_pad);
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::from(Span::styled(" ".repeat(inner_w), blank_style)));

    let footer_text = match palette.results.len() {
        1 => "   1 result".to_string(),
        n => format!("   {} results", n),
    };
    let mut footer_spans = vec![Span::styled(footer_text, footer_style)];
    pad_spans(&mut footer_spans, inner_w, blank_style);
    lines.push(Line::from(footer_spans));

    let popup_h = (lines.len() as u16 + 2).min(area.height.saturating_sub(2)); // +2 for borders

    // Position: centered horizontally, top at row 3 of content area
    let x = area.x + area.width.saturating_sub(popup_w) / 2;
    let y = area.y + 3.min(area.height.saturating_sub(popup_h));
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, popup_area);
}
