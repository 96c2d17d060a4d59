use chrono::{Local, NaiveDate};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::helpers::{pad_spans, progress_bar};
use crate::model::Project;
use crate::ops::filter::ProjectFilter;
use crate::tui::app::App;
use crate::util::unicode::pad_to_width;

const NAME_WIDTH: usize = 24;

/// Render the filtered project list
pub fn render_projects_view(frame: &mut Frame, app: &App, area: Rect) {
    render_projects_view_on(frame, app, area, Local::now().date_naive());
}

fn render_projects_view_on(frame: &mut Frame, app: &App, area: Rect, today: NaiveDate) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let projects = app.visible_projects();

    let mut lines: Vec<Line> = vec![
        filter_summary(app, &app.projects.filter),
        Line::from(Span::styled("", Style::default().bg(bg))),
    ];

    if projects.is_empty() {
        lines.push(Line::from(Span::styled(
            "   No projects match",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    let rows = (area.height as usize).saturating_sub(lines.len()).max(1);
    let cursor = app.projects.cursor;
    let offset = (cursor + 1).saturating_sub(rows);
    for (i, project) in projects.iter().enumerate().skip(offset).take(rows) {
        lines.push(project_row(app, project, i == cursor, width, today));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn filter_summary<'a>(app: &App, filter: &ProjectFilter) -> Line<'a> {
    let bg = app.theme.background;
    let label = Style::default().fg(app.theme.dim).bg(bg);
    let value = Style::default().fg(app.theme.text).bg(bg);

    let status = filter.status.map_or("all", |s| s.as_str());
    let sort = match filter.sort_by {
        Some(field) => format!("{} {}", field.as_str(), filter.sort_order.as_str()),
        None => "none".to_string(),
    };
    let mut spans = vec![
        Span::styled(" status: ", label),
        Span::styled(status, value),
        Span::styled("   sort: ", label),
        Span::styled(sort, value),
    ];
    if let Some(search) = &filter.search {
        spans.push(Span::styled("   search: ", label));
        spans.push(Span::styled(
            search.clone(),
            Style::default().fg(app.theme.search_match_fg).bg(app.theme.search_match_bg),
        ));
    }
    Line::from(spans)
}

fn project_row<'a>(
    app: &App,
    project: &Project,
    selected: bool,
    width: usize,
    today: NaiveDate,
) -> Line<'a> {
    let row_bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let base = Style::default().fg(app.theme.text).bg(row_bg);
    let name_style = if selected {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(row_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        base
    };
    let due_style = if project.is_overdue(today) {
        Style::default().fg(app.theme.red).bg(row_bg)
    } else {
        Style::default().fg(app.theme.dim).bg(row_bg)
    };
    let indicator = if selected { " \u{25B6} " } else { "   " };

    let mut spans = vec![
        Span::styled(indicator, Style::default().fg(app.theme.highlight).bg(row_bg)),
        Span::styled(pad_to_width(&project.name, NAME_WIDTH), name_style),
        Span::styled(" ", base),
        Span::styled(
            format!("{:<9}", project.status.as_str()),
            Style::default()
                .fg(app.theme.project_status_color(project.status))
                .bg(row_bg),
        ),
        Span::styled(" ", base),
        Span::styled(
            progress_bar(project.progress),
            Style::default().fg(app.theme.cyan).bg(row_bg),
        ),
        Span::styled(format!(" {:>3}%", project.progress), base),
        Span::styled(format!("  due {}", project.due_date), due_style),
        Span::styled(
            format!("  {}/{}", project.completed_tasks(), project.tasks.len()),
            Style::default().fg(app.theme.dim).bg(row_bg),
        ),
    ];
    pad_spans(&mut spans, width, Style::default().bg(row_bg));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;
    use crate::model::ProjectStatus;

    fn render(app: &App) -> String {
        let today = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        render_to_string(TERM_W, 10, |frame, area| {
            render_projects_view_on(frame, app, area, today)
        })
    }

    #[test]
    fn lists_projects_with_progress() {
        let app = logged_in_app();
        let out = render(&app);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], " status: all   sort: none");
        assert_eq!(
            lines[2],
            " \u{25B6} Website Redesign         active    \u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\u{2591}\u{2591}\u{2591}  65%  due 2025-03-31  1/5"
        );
        assert!(lines[3].starts_with("   Mobile App Launch"));
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn filter_summary_reflects_state() {
        let mut app = logged_in_app();
        app.projects.filter.status = Some(ProjectStatus::OnHold);
        app.projects.filter.search = Some("api".into());
        let out = render(&app);
        assert!(out.starts_with(" status: on-hold   sort: none   search: api"));
        assert!(out.contains("API v2 Migration"));
        assert!(!out.contains("Website Redesign"));
    }

    #[test]
    fn empty_result_message() {
        let mut app = logged_in_app();
        app.projects.filter.search = Some("zzz".into());
        assert!(render(&app).contains("No projects match"));
    }

    #[test]
    fn list_scrolls_to_cursor() {
        let mut app = logged_in_app();
        app.projects.cursor = 4;
        let out = render_to_string(TERM_W, 4, |frame, area| {
            render_projects_view_on(frame, &app, area, NaiveDate::MIN)
        });
        let last = out.lines().last().unwrap();
        assert!(last.starts_with(" \u{25B6} "));
        assert!(!out.contains("Website Redesign"));
    }
}
