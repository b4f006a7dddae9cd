use std::path::Path;

use ratatui::crossterm::event::KeyCode;

use crate::db::comparator::{compare_databases, ComparisonResult};
use crate::db::data_comparator::{diff_rows, RowComparison};
use crate::security::validate_db_path;

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    PathEntry,
    Results,
}

/// Input focus on the path-entry screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathField {
    Left,
    Right,
}

/// Scroll/selection state for one differing table's two-pane view.
///
/// Both panes share the same offsets, which is what keeps their scrolling
/// synchronized.
#[derive(Debug)]
pub struct TableView {
    pub table: String,
    pub schema_changed: bool,
    pub rows: Vec<RowComparison>,
    pub scroll_y: u16,
    pub scroll_x: u16,
}

/// Comparison output prepared for display: the raw result plus one
/// key-aligned view per differing table.
#[derive(Debug)]
pub struct ResultsView {
    pub result: ComparisonResult,
    pub tables: Vec<TableView>,
    /// 0 is the summary tab; `1..=tables.len()` are table tabs.
    pub active_tab: usize,
}

impl ResultsView {
    pub fn new(result: ComparisonResult) -> Self {
        let tables = result
            .differences
            .iter()
            .map(|diff| TableView {
                table: diff.table.clone(),
                schema_changed: diff.schema_changed,
                rows: diff_rows(&diff.left_rows, &diff.right_rows),
                scroll_y: 0,
                scroll_x: 0,
            })
            .collect();
        Self {
            result,
            tables,
            active_tab: 0,
        }
    }

    pub fn tab_count(&self) -> usize {
        self.tables.len() + 1
    }

    fn active_table_mut(&mut self) -> Option<&mut TableView> {
        match self.active_tab {
            0 => None,
            n => self.tables.get_mut(n - 1),
        }
    }
}

/// Application state for the viewer. One explicit object, passed to the
/// render and input handlers; no module-level globals.
pub struct App {
    pub screen: Screen,
    pub left_input: String,
    pub right_input: String,
    pub focus: PathField,
    pub status: Option<String>,
    pub results: Option<ResultsView>,
    pub should_quit: bool,
}

const SCROLL_PAGE: u16 = 20;

impl App {
    /// Start on the path-entry screen with empty inputs.
    pub fn new() -> Self {
        Self {
            screen: Screen::PathEntry,
            left_input: String::new(),
            right_input: String::new(),
            focus: PathField::Left,
            status: None,
            results: None,
            should_quit: false,
        }
    }

    /// Start with both paths prefilled (from the command line) and the
    /// comparison already run.
    pub fn with_paths(left: &Path, right: &Path) -> Self {
        let mut app = Self::new();
        app.left_input = left.display().to_string();
        app.right_input = right.display().to_string();
        app.run_compare();
        app
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match self.screen {
            Screen::PathEntry => self.handle_path_entry_key(code),
            Screen::Results => self.handle_results_key(code),
        }
    }

    fn focused_input_mut(&mut self) -> &mut String {
        match self.focus {
            PathField::Left => &mut self.left_input,
            PathField::Right => &mut self.right_input,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PathField::Left => PathField::Right,
            PathField::Right => PathField::Left,
        };
    }

    fn handle_path_entry_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) => self.focused_input_mut().push(c),
            KeyCode::Backspace => {
                self.focused_input_mut().pop();
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.toggle_focus(),
            KeyCode::Enter => match self.focus {
                PathField::Left => self.focus = PathField::Right,
                PathField::Right => self.run_compare(),
            },
            _ => {}
        }
    }

    fn handle_results_key(&mut self, code: KeyCode) {
        let Some(view) = self.results.as_mut() else {
            self.screen = Screen::PathEntry;
            return;
        };

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                // Back to path entry for another comparison.
                self.results = None;
                self.status = None;
                self.screen = Screen::PathEntry;
            }
            KeyCode::Tab => view.active_tab = (view.active_tab + 1) % view.tab_count(),
            KeyCode::BackTab => {
                view.active_tab = (view.active_tab + view.tab_count() - 1) % view.tab_count()
            }
            KeyCode::Up => {
                if let Some(table) = view.active_table_mut() {
                    table.scroll_y = table.scroll_y.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if let Some(table) = view.active_table_mut() {
                    let max = table.rows.len().saturating_sub(1) as u16;
                    table.scroll_y = (table.scroll_y + 1).min(max);
                }
            }
            KeyCode::PageUp => {
                if let Some(table) = view.active_table_mut() {
                    table.scroll_y = table.scroll_y.saturating_sub(SCROLL_PAGE);
                }
            }
            KeyCode::PageDown => {
                if let Some(table) = view.active_table_mut() {
                    let max = table.rows.len().saturating_sub(1) as u16;
                    table.scroll_y = (table.scroll_y + SCROLL_PAGE).min(max);
                }
            }
            KeyCode::Left => {
                if let Some(table) = view.active_table_mut() {
                    table.scroll_x = table.scroll_x.saturating_sub(4);
                }
            }
            KeyCode::Right => {
                if let Some(table) = view.active_table_mut() {
                    table.scroll_x = table.scroll_x.saturating_add(4);
                }
            }
            KeyCode::Home => {
                if let Some(table) = view.active_table_mut() {
                    table.scroll_y = 0;
                    table.scroll_x = 0;
                }
            }
            _ => {}
        }
    }

    /// Validate both paths and run the one-shot comparison. Errors land in
    /// the status line; success switches to the results screen.
    pub fn run_compare(&mut self) {
        for input in [&self.left_input, &self.right_input] {
            if let Err(err) = validate_db_path(input) {
                self.status = Some(err.to_string());
                return;
            }
        }

        match compare_databases(Path::new(&self.left_input), Path::new(&self.right_input)) {
            Ok(result) => {
                self.status = None;
                self.results = Some(ResultsView::new(result));
                self.screen = Screen::Results;
            }
            Err(err) => {
                log::error!("comparison failed: {err}");
                self.status = Some(format!("An error occurred: {err}"));
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
