use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::warn;

use crate::entry::template::{FieldView, InputKind};
use crate::entry::{FieldKind, FieldName, RowManager, Submission, MAX_ROWS};
use crate::fmt::truncate;
use crate::models::ReferenceLists;
use crate::tui::{
    self, View, ViewAction, DISABLED_STYLE, FOCUS_STYLE, FOOTER_STYLE, HEADER_STYLE,
    SELECTED_STYLE, WARNING_STYLE,
};

/// What the user left the form with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Submitted(Submission),
    Cancelled,
}

enum Mode {
    Navigate,
    Edit,
}

/// Terminal rendering of a [`RowManager`]: one table row per expense, a
/// cursor cell, and the add/select/delete/submit controls.
pub struct EntryForm {
    manager: RowManager,
    lists: ReferenceLists,
    mode: Mode,
    table_state: TableState,
    status_message: Option<String>,
    /// Remaining keypresses before the status message is cleared.
    status_ttl: u8,
    greeting: String,
    outcome: Option<EntryOutcome>,
}

impl EntryForm {
    pub fn new(manager: RowManager, lists: ReferenceLists, greeting: &str) -> Self {
        Self {
            manager,
            lists,
            mode: Mode::Navigate,
            table_state: TableState::default(),
            status_message: None,
            status_ttl: 0,
            greeting: greeting.to_string(),
            outcome: None,
        }
    }

    #[cfg(test)]
    pub fn manager(&self) -> &RowManager {
        &self.manager
    }

    pub fn into_outcome(self) -> EntryOutcome {
        self.outcome.unwrap_or(EntryOutcome::Cancelled)
    }

    /// The cursor is the manager's focus; an unfocused form sits on the
    /// first description.
    fn focus(&self) -> FieldName {
        self.manager
            .focus()
            .unwrap_or(FieldName::new(FieldKind::Description, 1))
    }

    fn position(&self) -> usize {
        self.focus().position
    }

    fn column(&self) -> FieldKind {
        self.focus().kind
    }

    fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Edit)
    }

    fn set_status(&mut self, msg: String) {
        self.status_message = Some(msg);
        self.status_ttl = 3;
    }

    fn move_focus(&mut self, position: usize, kind: FieldKind) {
        if let Err(e) = self.manager.set_focus(position, kind) {
            self.set_status(e.to_string());
        }
    }

    fn add_row(&mut self) {
        if !self.manager.controls().add_enabled {
            self.set_status(format!("At most {MAX_ROWS} expenses per batch"));
            return;
        }
        self.manager.add_row();
        self.mode = Mode::Edit;
    }

    fn toggle_selection(&mut self) {
        if let Err(e) = self.manager.select(self.position()) {
            self.set_status(e.to_string());
        }
    }

    fn remove_row(&mut self) {
        match self.manager.remove_selected() {
            Ok(removed) => {
                self.set_status(format!("Removed row {}", removed.position));
            }
            Err(_) => {
                self.set_status("Select a row to delete; one row must remain".into());
            }
        }
    }

    fn submit(&mut self) -> ViewAction {
        let submission = self.manager.submission();
        match submission.decode(Some(&self.lists)) {
            Ok(_) => {
                self.outcome = Some(EntryOutcome::Submitted(submission));
                ViewAction::Close
            }
            Err(e) => {
                warn!(error = %e, "submission rejected");
                self.set_status(e.to_string());
                ViewAction::Continue
            }
        }
    }

    fn current_value(&self) -> String {
        self.manager
            .row(self.position())
            .map(|row| row.value(self.column()).to_string())
            .unwrap_or_default()
    }

    fn write_value(&mut self, value: &str) {
        if let Err(e) = self.manager.set_field(self.position(), self.column(), value) {
            self.set_status(e.to_string());
        }
    }

    fn cycle_option(&mut self, forward: bool) {
        let options = self.focused_field().map(|f| f.options).unwrap_or_default();
        if options.is_empty() {
            return;
        }
        let current = self.current_value();
        let next = match options.iter().position(|o| *o == current) {
            Some(i) if forward => (i + 1) % options.len(),
            Some(i) => (i + options.len() - 1) % options.len(),
            None => 0,
        };
        self.write_value(&options[next]);
    }

    /// View of the cell under the cursor, numbered as it will be submitted.
    fn focused_field(&self) -> Option<FieldView> {
        self.manager
            .views()
            .get(self.position() - 1)
            .map(|view| view.field(self.column()).clone())
    }

    fn handle_navigate_key(&mut self, code: KeyCode) -> ViewAction {
        match code {
            KeyCode::Up if self.position() > 1 => {
                self.move_focus(self.position() - 1, self.column());
            }
            KeyCode::Down if self.position() < self.manager.row_count() => {
                self.move_focus(self.position() + 1, self.column());
            }
            KeyCode::Left | KeyCode::BackTab => {
                self.move_focus(self.position(), self.column().prev());
            }
            KeyCode::Right | KeyCode::Tab => {
                self.move_focus(self.position(), self.column().next());
            }
            KeyCode::Enter => self.mode = Mode::Edit,
            KeyCode::Char(' ') | KeyCode::Char('x') => self.toggle_selection(),
            KeyCode::Char('a') => self.add_row(),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_row(),
            KeyCode::Char('s') => return self.submit(),
            KeyCode::Char('q') | KeyCode::Esc => {
                self.outcome = Some(EntryOutcome::Cancelled);
                return ViewAction::Close;
            }
            _ => {}
        }
        ViewAction::Continue
    }

    fn handle_edit_key(&mut self, code: KeyCode) -> ViewAction {
        match code {
            KeyCode::Enter | KeyCode::Esc => self.mode = Mode::Navigate,
            KeyCode::Tab => self.move_focus(self.position(), self.column().next()),
            KeyCode::BackTab => self.move_focus(self.position(), self.column().prev()),
            KeyCode::Left if self.column().is_selector() => self.cycle_option(false),
            KeyCode::Right if self.column().is_selector() => self.cycle_option(true),
            KeyCode::Char(c) if !self.column().is_selector() => {
                let max_len = self
                    .focused_field()
                    .and_then(|f| f.max_len)
                    .unwrap_or(usize::MAX);
                let mut value = self.current_value();
                if value.chars().count() < max_len {
                    value.push(c);
                    self.write_value(&value);
                }
            }
            KeyCode::Backspace if !self.column().is_selector() => {
                let mut value = self.current_value();
                value.pop();
                self.write_value(&value);
            }
            _ => {}
        }
        ViewAction::Continue
    }

    fn cell_text(&self, field: &FieldView, is_cursor: bool) -> String {
        let value = &field.value;
        if is_cursor && self.is_editing() {
            if field.input == InputKind::Select {
                format!("< {value} >")
            } else {
                format!("{value}_")
            }
        } else {
            value.clone()
        }
    }

    fn draw_table(&mut self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let views = self.manager.views();
        let focus = self.manager.focused_cell();
        let desc_width = area.width.saturating_sub(4 + 16 + 12 + 12 + 12 + 5 + 3).max(10) as usize;

        let rows: Vec<Row> = views
            .iter()
            .map(|view| {
                let mut height = 1;
                let mut cells = vec![Cell::from(view.ordinal.clone())];
                for field in &view.fields {
                    let is_cursor = focus == Some((view.row_id, field.kind));
                    let text = if field.kind == FieldKind::Description {
                        let (wrapped, lines) =
                            tui::wrap_text(&self.cell_text(field, is_cursor), desc_width);
                        height = lines;
                        wrapped
                    } else {
                        truncate(&self.cell_text(field, is_cursor), 16)
                    };
                    let cell = Cell::from(text);
                    cells.push(if is_cursor { cell.style(FOCUS_STYLE) } else { cell });
                }
                let row = Row::new(cells).height(height);
                if view.selected {
                    row.style(SELECTED_STYLE)
                } else {
                    row
                }
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
        ];
        let header = std::iter::once("#").chain(FieldKind::ALL.into_iter().map(FieldKind::label));

        self.table_state.select(Some(self.position() - 1));
        let table = Table::new(rows, widths)
            .header(
                Row::new(header.collect::<Vec<_>>())
                    .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD))
                    .bottom_margin(1),
            )
            .column_spacing(1)
            .highlight_symbol(" > ")
            .row_highlight_style(Style::default().add_modifier(Modifier::BOLD));

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn hint_spans(&self) -> Vec<Span<'static>> {
        if self.is_editing() {
            let text = if self.column().is_selector() {
                " Left/Right=choose  Tab=next field  Enter/Esc=done"
            } else {
                " Type to edit  Tab=next field  Enter/Esc=done"
            };
            return vec![Span::styled(text, FOOTER_STYLE)];
        }
        let controls = self.manager.controls();
        let gated = |label: &'static str, enabled: bool| {
            Span::styled(label, if enabled { FOOTER_STYLE } else { DISABLED_STYLE })
        };
        vec![
            Span::styled(" ", FOOTER_STYLE),
            gated("a=add", controls.add_enabled),
            Span::styled("  space=select  ", FOOTER_STYLE),
            gated("d=delete", controls.remove_enabled),
            Span::styled("  Enter=edit  s=submit  Esc=cancel", FOOTER_STYLE),
        ]
    }
}

impl View for EntryForm {
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let border_style = Style::default().fg(Color::DarkGray);

        let [header_area, sep, title_area, table_area, detail_area, hints_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Fill(1),
                Constraint::Length(4),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(format!(" {}", self.greeting)).style(HEADER_STYLE),
            header_area,
        );

        let sep_line = "\u{2501}".repeat(area.width as usize);
        frame.render_widget(Paragraph::new(sep_line.as_str()).style(border_style), sep);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" Add Expenses ({}/{MAX_ROWS})", self.manager.row_count()),
                Style::default().add_modifier(Modifier::BOLD),
            ))),
            title_area,
        );

        self.draw_table(frame, table_area);

        // Field name under the cursor, plus the format hint for patterned inputs
        let mut details = Vec::new();
        if let Some(field) = self.focused_field() {
            let required = if field.required { " (required)" } else { "" };
            details.push(Line::from(Span::styled(
                format!(" Field: {}{required}", field.name),
                FOOTER_STYLE,
            )));
            if let (Some(_), Some(hint)) = (field.pattern, field.hint) {
                details.push(Line::from(Span::styled(format!(" {hint}"), FOOTER_STYLE)));
            }
        }
        if let Some(msg) = &self.status_message {
            let (wrapped, _) = tui::wrap_text(msg, area.width.saturating_sub(2) as usize);
            for line in wrapped.lines() {
                details.push(Line::from(Span::styled(format!(" {line}"), WARNING_STYLE)));
            }
        }
        frame.render_widget(Paragraph::new(details), detail_area);

        frame.render_widget(Paragraph::new(Line::from(self.hint_spans())), hints_area);
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        if self.status_ttl > 0 {
            self.status_ttl -= 1;
            if self.status_ttl == 0 {
                self.status_message = None;
            }
        }

        match self.mode {
            Mode::Navigate => self.handle_navigate_key(code),
            Mode::Edit => self.handle_edit_key(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::selection::Selection;
    use crate::entry::RowTemplate;
    use crate::models::ReferenceItem;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn lists() -> ReferenceLists {
        ReferenceLists::new(
            vec![ReferenceItem::new("Food"), ReferenceItem::new("Rent")],
            vec![ReferenceItem::new("Alice")],
        )
    }

    fn form() -> EntryForm {
        let lists = lists();
        let template = RowTemplate::new(&lists, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        EntryForm::new(RowManager::open(template), lists, "Tendie Tracker")
    }

    fn type_text(form: &mut EntryForm, text: &str) {
        for c in text.chars() {
            form.handle_key(KeyCode::Char(c));
        }
    }

    fn render(form: &mut EntryForm) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| form.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_add_moves_into_description_of_new_row() {
        let mut f = form();
        f.handle_key(KeyCode::Char('a'));
        assert_eq!(f.manager().row_count(), 2);
        assert!(f.is_editing());
        type_text(&mut f, "Lunch");
        assert_eq!(f.manager().row(2).unwrap().description, "Lunch");
        assert_eq!(f.manager().focus().unwrap().to_string(), "description.2");
    }

    #[test]
    fn test_add_stops_at_max_rows() {
        let mut f = form();
        for _ in 0..15 {
            f.handle_key(KeyCode::Char('a'));
            if f.is_editing() {
                f.handle_key(KeyCode::Esc);
            }
        }
        assert_eq!(f.manager().row_count(), MAX_ROWS);
        assert!(f.status_message.is_some());
    }

    #[test]
    fn test_select_and_delete_row() {
        let mut f = form();
        f.handle_key(KeyCode::Char('a'));
        f.handle_key(KeyCode::Esc);
        f.handle_key(KeyCode::Up);
        f.handle_key(KeyCode::Char(' '));
        assert_eq!(f.manager().selected_position(), Some(1));
        f.handle_key(KeyCode::Char('d'));
        assert_eq!(f.manager().row_count(), 1);
        assert_eq!(f.manager().selection(), Selection::Unselected);
    }

    #[test]
    fn test_cursor_is_manager_focus() {
        let mut f = form();
        f.handle_key(KeyCode::Char('a'));
        f.handle_key(KeyCode::Esc);
        f.handle_key(KeyCode::Right);
        assert_eq!(f.manager().focus().unwrap().to_string(), "category.2");
        f.handle_key(KeyCode::Up);
        assert_eq!(f.manager().focus().unwrap().to_string(), "category.1");
        f.handle_key(KeyCode::Up);
        assert_eq!(f.position(), 1);
    }

    #[test]
    fn test_delete_moves_cursor_to_remaining_row() {
        let mut f = form();
        f.handle_key(KeyCode::Char('a'));
        f.handle_key(KeyCode::Esc);
        f.handle_key(KeyCode::Char(' '));
        f.handle_key(KeyCode::Char('d'));
        assert_eq!(f.manager().row_count(), 1);
        assert_eq!(f.manager().focus().unwrap().to_string(), "description.1");
        let screen = render(&mut f);
        assert!(screen.contains("Field: description.1"));
    }

    #[test]
    fn test_focus_errors_reach_status_line() {
        let lists = lists();
        let template = RowTemplate::new(&lists, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        let mut f = EntryForm::new(RowManager::new(template), lists, "Tendie Tracker");
        f.handle_key(KeyCode::Right);
        assert_eq!(f.status_message.as_deref(), Some("No row at position 1"));

        f.status_message = None;
        f.handle_key(KeyCode::Enter);
        f.handle_key(KeyCode::Char('x'));
        assert_eq!(f.status_message.as_deref(), Some("No row at position 1"));
    }

    #[test]
    fn test_delete_refused_for_last_row() {
        let mut f = form();
        f.handle_key(KeyCode::Char(' '));
        f.handle_key(KeyCode::Char('d'));
        assert_eq!(f.manager().row_count(), 1);
        assert!(f.status_message.is_some());
    }

    #[test]
    fn test_selector_cycles_options() {
        let mut f = form();
        f.handle_key(KeyCode::Right);
        assert_eq!(f.column(), FieldKind::Category);
        f.handle_key(KeyCode::Enter);
        f.handle_key(KeyCode::Right);
        assert_eq!(f.manager().row(1).unwrap().category, "Rent");
        f.handle_key(KeyCode::Right);
        assert_eq!(f.manager().row(1).unwrap().category, "Food");
        f.handle_key(KeyCode::Tab);
        f.handle_key(KeyCode::Tab);
        assert_eq!(f.column(), FieldKind::Payer);
        f.handle_key(KeyCode::Left);
        assert_eq!(f.manager().row(1).unwrap().payer, "Alice");
    }

    #[test]
    fn test_submit_rejects_invalid_rows() {
        let mut f = form();
        assert!(matches!(f.handle_key(KeyCode::Char('s')), ViewAction::Continue));
        assert!(f.status_message.is_some());
        assert_eq!(f.into_outcome(), EntryOutcome::Cancelled);
    }

    #[test]
    fn test_submit_valid_rows() {
        let mut f = form();
        f.handle_key(KeyCode::Enter);
        type_text(&mut f, "Groceries");
        f.handle_key(KeyCode::BackTab);
        type_text(&mut f, "42.10");
        f.handle_key(KeyCode::Enter);
        assert!(matches!(f.handle_key(KeyCode::Char('s')), ViewAction::Close));
        match f.into_outcome() {
            EntryOutcome::Submitted(sub) => {
                let records = sub.decode(None).unwrap();
                assert_eq!(records[0].description, "Groceries");
                assert_eq!(records[0].amount, 42.1);
            }
            EntryOutcome::Cancelled => panic!("expected a submission"),
        }
    }

    #[test]
    fn test_amount_input_is_capped() {
        let mut f = form();
        f.handle_key(KeyCode::Left);
        f.handle_key(KeyCode::Enter);
        type_text(&mut f, "123456789012");
        assert_eq!(f.manager().row(1).unwrap().amount, "1234567890");
        f.handle_key(KeyCode::Backspace);
        assert_eq!(f.manager().row(1).unwrap().amount, "123456789");
    }

    #[test]
    fn test_escape_cancels() {
        let mut f = form();
        assert!(matches!(f.handle_key(KeyCode::Esc), ViewAction::Close));
        assert_eq!(f.into_outcome(), EntryOutcome::Cancelled);
    }

    #[test]
    fn test_draw_shows_rows_and_field_name() {
        let mut f = form();
        f.handle_key(KeyCode::Char('a'));
        f.handle_key(KeyCode::Esc);
        let screen = render(&mut f);
        assert!(screen.contains("Add Expenses (2/10)"));
        assert!(screen.contains("Description"));
        assert!(screen.contains("Field: description.2"));
        assert!(screen.contains("2026-10-18"));
    }
}
