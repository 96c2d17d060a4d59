use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::helpers::pad_spans;
use crate::model::{Project, Task};
use crate::ops::kanban::{COLUMNS, Column};
use crate::tui::app::{App, BoardView, Mode};
use crate::util::unicode::truncate_to_width;

/// Rows each card takes: title and meta line
const CARD_HEIGHT: usize = 2;

/// Render the kanban board of the open project
pub fn render_board_view(frame: &mut Frame, app: &App, area: Rect) {
    let (Some(board), Some(project)) = (&app.board, app.board_project()) else {
        return;
    };
    let bg = app.theme.background;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let summary = Line::from(vec![
        Span::styled(
            format!(" {}", project.name),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {}%  {}/{} done",
                project.progress,
                project.completed_tasks(),
                project.tasks.len()
            ),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ]);
    frame.render_widget(Paragraph::new(summary), chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[1]);
    for (i, column) in COLUMNS.iter().enumerate() {
        render_column(frame, app, board, project, column, i == board.column, columns[i]);
    }
}

fn render_column(
    frame: &mut Frame,
    app: &App,
    board: &BoardView,
    project: &Project,
    column: &Column,
    focused: bool,
    area: Rect,
) {
    let bg = app.theme.background;
    let color = app.theme.column_color(column.color);
    let cards = board.layout.cards(column.status, &project.tasks);
    let inner_w = area.width.saturating_sub(2) as usize;
    let inner_h = area.height.saturating_sub(2) as usize;

    let adding = focused && app.mode == Mode::AddCard;
    let slots = (inner_h.saturating_sub(usize::from(adding)) / CARD_HEIGHT).max(1);
    let selected = focused.then_some(board.row);
    let offset = selected.map_or(0, |row| (row + 1).saturating_sub(slots));

    let mut lines: Vec<Line> = Vec::new();
    for (i, task) in cards.iter().enumerate().skip(offset).take(slots) {
        let is_selected = selected == Some(i);
        lines.extend(card_lines(app, task, is_selected, inner_w));
    }
    if cards.is_empty() && !adding {
        lines.push(Line::from(Span::styled(
            " (empty)",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }
    if adding {
        let text = format!("+ {}", app.new_card.text());
        lines.push(Line::from(vec![
            Span::styled(
                truncate_to_width(&text, inner_w.saturating_sub(1)),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ),
            Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
        ]));
    }

    let border_color = if focused { app.theme.highlight } else { app.theme.dim };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ({}) ", column.title, cards.len()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Title line with a checkbox, then priority and assignee
fn card_lines<'a>(app: &App, task: &Task, selected: bool, width: usize) -> Vec<Line<'a>> {
    let row_bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let check = if task.completed() { "[x] " } else { "[ ] " };
    let title_style = if selected {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(row_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(row_bg)
    };

    let mut title = vec![
        Span::styled(check, Style::default().fg(app.theme.dim).bg(row_bg)),
        Span::styled(truncate_to_width(&task.title, width.saturating_sub(4)), title_style),
    ];
    pad_spans(&mut title, width, Style::default().bg(row_bg));

    let mut meta = vec![Span::styled("    ", Style::default().bg(row_bg))];
    if let Some(priority) = task.priority {
        meta.push(Span::styled(
            format!("!{} ", priority.as_str()),
            Style::default().fg(app.theme.priority_color(priority)).bg(row_bg),
        ));
    }
    if let Some(member_id) = &task.assigned_to {
        let name = app
            .ws
            .store
            .member(member_id)
            .and_then(|m| m.name.split_whitespace().next())
            .unwrap_or(member_id.as_str());
        meta.push(Span::styled(
            truncate_to_width(&format!("@{}", name), width.saturating_sub(4)),
            Style::default().fg(app.theme.cyan).bg(row_bg),
        ));
    }
    pad_spans(&mut meta, width, Style::default().bg(row_bg));

    vec![Line::from(title), Line::from(meta)]
}
