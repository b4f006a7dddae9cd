use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Tabs};
use ratatui::Frame;

use crate::db::data_comparator::{RowComparison, RowStatus};
use crate::db::schema::Row;
use crate::report::format_cell;
use crate::tui::app::{App, PathField, ResultsView, Screen, TableView};

/// Which pane of the two-pane view a line is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Row tint for this side: removals red on the left, additions green
    /// on the right.
    fn line_style(self) -> Style {
        match self {
            Side::Left => Style::new().fg(Color::Red),
            Side::Right => Style::new().fg(Color::Green),
        }
    }
}

pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::PathEntry => draw_path_entry(frame, app),
        Screen::Results => {
            if let Some(view) = &app.results {
                draw_results(frame, view);
            }
        }
    }
}

fn draw_path_entry(frame: &mut Frame, app: &App) {
    let [title, left_box, right_box, help, status] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new("DB Compare").style(Style::new().add_modifier(Modifier::BOLD)),
        title,
    );

    render_input(
        frame,
        left_box,
        "Database 1",
        &app.left_input,
        app.focus == PathField::Left,
    );
    render_input(
        frame,
        right_box,
        "Database 2",
        &app.right_input,
        app.focus == PathField::Right,
    );

    frame.render_widget(
        Paragraph::new("Enter: compare · Tab: switch field · Esc: quit")
            .style(Style::new().fg(Color::DarkGray)),
        help,
    );

    if let Some(message) = &app.status {
        frame.render_widget(
            Paragraph::new(message.as_str()).style(Style::new().fg(Color::Red)),
            status,
        );
    }
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::new().fg(Color::Yellow)
    } else {
        Style::new()
    };
    let text = if focused {
        format!("{value}\u{2588}")
    } else {
        value.to_string()
    };
    frame.render_widget(
        Paragraph::new(text).block(Block::bordered().title(title).border_style(border_style)),
        area,
    );
}

fn draw_results(frame: &mut Frame, view: &ResultsView) {
    let [tab_bar, content, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let mut titles = vec!["Summary".to_string()];
    titles.extend(view.tables.iter().map(|t| format!("Table: {}", t.table)));
    frame.render_widget(
        Tabs::new(titles)
            .select(view.active_tab)
            .highlight_style(Style::new().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)),
        tab_bar,
    );

    match view.active_tab {
        0 => draw_summary(frame, content, view),
        n => {
            if let Some(table) = view.tables.get(n - 1) {
                draw_table_diff(frame, content, view, table);
            }
        }
    }

    frame.render_widget(
        Paragraph::new("Tab: next table · ↑/↓ ←/→: scroll · Esc: new comparison · q: quit")
            .style(Style::new().fg(Color::DarkGray)),
        help,
    );
}

fn draw_summary(frame: &mut Frame, area: Rect, view: &ResultsView) {
    let result = &view.result;
    let mut lines: Vec<Line> = Vec::new();

    if result.is_identical() {
        lines.push(Line::from("No differences found. The databases are identical."));
    } else {
        if !result.only_in_left.is_empty() {
            lines.push(Line::from(format!(
                "Tables only in DB1: {}",
                result.only_in_left.join(", ")
            )));
        }
        if !result.only_in_right.is_empty() {
            lines.push(Line::from(format!(
                "Tables only in DB2: {}",
                result.only_in_right.join(", ")
            )));
        }
        if result.differences.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from("No differences found in common tables."));
        } else {
            lines.push(Line::from(""));
            lines.push(Line::from("Differences found in the following tables:"));
            for diff in &result.differences {
                lines.push(Line::from(format!("- {}", diff.table)));
            }
            let s = &result.summary;
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "Rows: {} added, {} removed, {} changed, {} unchanged",
                s.additions, s.removals, s.modifications, s.unchanged
            )));
        }
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(format!(
            "{}  vs  {}",
            result.left_database, result.right_database
        ))),
        area,
    );
}

fn draw_table_diff(frame: &mut Frame, area: Rect, view: &ResultsView, table: &TableView) {
    let [left_area, right_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    let mut left_title = format!("Database 1: {}", view.result.left_database);
    if table.schema_changed {
        left_title.push_str("  (schema differs)");
    }
    let right_title = format!("Database 2: {}", view.result.right_database);

    frame.render_widget(
        Paragraph::new(pane_lines(&table.rows, Side::Left))
            .block(Block::bordered().title(left_title))
            .scroll((table.scroll_y, table.scroll_x)),
        left_area,
    );
    frame.render_widget(
        Paragraph::new(pane_lines(&table.rows, Side::Right))
            .block(Block::bordered().title(right_title))
            .scroll((table.scroll_y, table.scroll_x)),
        right_area,
    );
}

/// Build one pane's lines from the aligned comparison records.
///
/// Both panes are generated from the same record list, so line N always
/// refers to the same key on both sides and a single scroll offset keeps
/// them aligned. One-sided rows render as an empty line on the absent side.
pub fn pane_lines(rows: &[RowComparison], side: Side) -> Vec<Line<'static>> {
    rows.iter()
        .map(|comparison| {
            let row = match side {
                Side::Left => &comparison.left,
                Side::Right => &comparison.right,
            };
            let Some(row) = row else {
                return Line::from("");
            };

            match comparison.status {
                RowStatus::Unchanged => row_line(row, &[], Style::new(), Style::new()),
                RowStatus::LeftOnly | RowStatus::RightOnly => {
                    let style = side.line_style();
                    row_line(row, &[], style, style)
                }
                RowStatus::Changed => row_line(
                    row,
                    &comparison.changed_columns,
                    side.line_style(),
                    side.line_style().add_modifier(Modifier::REVERSED),
                ),
            }
        })
        .collect()
}

/// Render one row as a tuple line, giving the changed cell positions the
/// highlight style.
fn row_line(row: &Row, changed: &[usize], base: Style, highlight: Style) -> Line<'static> {
    let mut spans = vec![Span::styled("(", base)];
    for (i, value) in row.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(", ", base));
        }
        let style = if changed.contains(&i) { highlight } else { base };
        spans.push(Span::styled(format_cell(value), style));
    }
    spans.push(Span::styled(")", base));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn comparison(
        left: Option<Row>,
        right: Option<Row>,
        status: RowStatus,
        changed: Vec<usize>,
    ) -> RowComparison {
        RowComparison {
            key: json!(1),
            left,
            right,
            status,
            changed_columns: changed,
        }
    }

    #[test]
    fn test_absent_side_renders_empty_line() {
        let rows = vec![comparison(
            Some(vec![json!(1), json!("x")]),
            None,
            RowStatus::LeftOnly,
            vec![],
        )];

        let left = pane_lines(&rows, Side::Left);
        let right = pane_lines(&rows, Side::Right);
        assert_eq!(left[0].to_string(), "(1, 'x')");
        assert_eq!(right[0].to_string(), "");
    }

    #[test]
    fn test_panes_stay_aligned_line_for_line() {
        let rows = vec![
            comparison(Some(vec![json!(1)]), Some(vec![json!(1)]), RowStatus::Unchanged, vec![]),
            comparison(None, Some(vec![json!(2)]), RowStatus::RightOnly, vec![]),
            comparison(Some(vec![json!(3)]), Some(vec![json!(3)]), RowStatus::Unchanged, vec![]),
        ];

        let left = pane_lines(&rows, Side::Left);
        let right = pane_lines(&rows, Side::Right);
        assert_eq!(left.len(), right.len());
        assert_eq!(left[1].to_string(), "");
        assert_eq!(right[1].to_string(), "(2)");
    }

    #[test]
    fn test_changed_cells_get_highlight_style() {
        let rows = vec![comparison(
            Some(vec![json!(1), json!("x")]),
            Some(vec![json!(1), json!("y")]),
            RowStatus::Changed,
            vec![1],
        )];

        let left = pane_lines(&rows, Side::Left);
        // Spans: "(", "1", ", ", "'x'", ")". Only 'x' carries REVERSED.
        let spans = &left[0].spans;
        assert_eq!(spans[3].content, "'x'");
        assert!(spans[3].style.add_modifier.contains(Modifier::REVERSED));
        assert!(!spans[1].style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_unchanged_rows_have_no_tint() {
        let rows = vec![comparison(
            Some(vec![json!(1)]),
            Some(vec![json!(1)]),
            RowStatus::Unchanged,
            vec![],
        )];

        let left = pane_lines(&rows, Side::Left);
        assert_eq!(left[0].spans[1].style, Style::new());
    }
}
