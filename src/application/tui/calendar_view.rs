use super::theme::Theme;
use crate::application::CalendarWidget;
use crate::domain::calendar_math::WEEKDAY_SHORT;
use crate::domain::{MacroKind, MonthKey, Slot};
use crate::infrastructure::ControlValue;
use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, poll};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::{Stdout, stdout};

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarViewResult {
    /// User closed the picker without submitting
    Closed,
    /// User submitted a complete selection
    Submitted(ControlValue),
}

/// Keyboard action, decoupled from crossterm so it can be tested without a
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Close,
    MoveDays(i64),
    PreviousMonth,
    NextMonth,
    Today,
    Select,
    Submit,
    Macro(MacroKind),
    ToggleHelp,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        let action = match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::Close,
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Action::Close,

            (KeyCode::Left, _) | (KeyCode::Char('h'), _) => Action::MoveDays(-1),
            (KeyCode::Right, _) | (KeyCode::Char('l'), _) => Action::MoveDays(1),
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => Action::MoveDays(-7),
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::MoveDays(7),

            (KeyCode::PageUp, _) | (KeyCode::Char('['), _) => Action::PreviousMonth,
            (KeyCode::PageDown, _) | (KeyCode::Char(']'), _) => Action::NextMonth,
            (KeyCode::Char('t'), _) => Action::Today,

            (KeyCode::Char(' '), _) | (KeyCode::Enter, _) => Action::Select,
            (KeyCode::Char('s'), _) => Action::Submit,
            (KeyCode::Char('?'), _) => Action::ToggleHelp,

            (KeyCode::Char(c), _) => {
                let index = c.to_digit(10)?.checked_sub(1)? as usize;
                Action::Macro(*MacroKind::ALL.get(index)?)
            }
            _ => return None,
        };
        Some(action)
    }
}

/// Cursor-driven month grid over any [`CalendarWidget`].
pub struct CalendarState<'a> {
    widget: &'a mut dyn CalendarWidget,
    cursor: NaiveDate,
    show_help: bool,
    status: Option<String>,
    result: Option<CalendarViewResult>,
}

impl<'a> CalendarState<'a> {
    pub fn new(widget: &'a mut dyn CalendarWidget) -> Self {
        let view = widget.view();
        let today = widget.today();
        let cursor = if MonthKey::containing(today) == Some(view) {
            today
        } else {
            view.first_day()
        };

        Self {
            widget,
            cursor,
            show_help: false,
            status: None,
            result: None,
        }
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn result(&self) -> Option<&CalendarViewResult> {
        self.result.as_ref()
    }

    pub fn widget(&self) -> &dyn CalendarWidget {
        &*self.widget
    }

    pub fn apply(&mut self, action: Action) -> Result<()> {
        self.status = None;

        match action {
            Action::Close => {
                self.widget.close();
                self.result = Some(CalendarViewResult::Closed);
            }
            Action::MoveDays(days) => {
                if let Some(date) = self.cursor.checked_add_signed(Duration::days(days)) {
                    self.cursor = date;
                    self.follow_cursor();
                }
            }
            Action::PreviousMonth => {
                self.widget.load_previous_month();
                self.cursor = self.widget.view().first_day();
            }
            Action::NextMonth => {
                self.widget.load_next_month();
                self.cursor = self.widget.view().first_day();
            }
            Action::Today => {
                self.widget.go_to_current_month();
                self.cursor = self.widget.today();
            }
            Action::Select => {
                if let Some(id) = self.widget.day_id(self.cursor) {
                    self.widget.select_day(id);
                }
            }
            Action::Submit => match self.widget.submit()? {
                Some(value) => self.result = Some(CalendarViewResult::Submitted(value)),
                None => self.status = Some("Selection incomplete".to_string()),
            },
            Action::Macro(kind) => {
                if self.widget.supports_macros() {
                    self.widget.run_macro(kind);
                    self.status = Some(kind.label().to_string());
                }
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
        }

        Ok(())
    }

    /// Page the widget until the month on display holds the cursor.
    fn follow_cursor(&mut self) {
        while self.cursor < self.widget.view().first_day() {
            let before = self.widget.view();
            self.widget.load_previous_month();
            if self.widget.view() == before {
                break;
            }
        }
        while self.cursor > self.widget.view().last_day() {
            let before = self.widget.view();
            self.widget.load_next_month();
            if self.widget.view() == before {
                break;
            }
        }
    }

    fn day_style(&self, slot: Slot, column: usize, theme: &Theme) -> (String, Style) {
        let Some(cell) = slot.id().and_then(|id| self.widget.cell(id)) else {
            return (String::new(), Style::default());
        };

        let colors = &theme.colors;
        let date = cell.date();
        let mut style = if cell.selected {
            colors.anchor.to_ratatui_with_modifier(Modifier::BOLD)
        } else if cell.in_range {
            colors.in_range.to_ratatui()
        } else if date == self.widget.today() {
            colors.today.to_ratatui_with_modifier(Modifier::BOLD)
        } else if column == 0 || column == 6 {
            colors.weekend.to_ratatui()
        } else {
            colors.day.to_ratatui()
        };

        if date == self.cursor {
            style = style.patch(colors.cursor.to_ratatui_with_modifier(Modifier::UNDERLINED));
        }

        let mut label = format!("{:>2}", cell.day_number());
        if self.widget.check_end_date(cell.id()) {
            label.push('<');
        }
        (label, style)
    }

    fn table(&self, theme: &Theme) -> Table<'static> {
        let header = Row::new(WEEKDAY_SHORT.iter().enumerate().map(|(i, name)| {
            let color = if i == 0 || i == 6 {
                &theme.colors.weekend
            } else {
                &theme.colors.header
            };
            Cell::from(*name).style(color.to_ratatui())
        }))
        .height(1);

        let rows: Vec<Row> = self
            .widget
            .days()
            .into_iter()
            .map(|week| {
                let cells: Vec<Cell> = week
                    .into_iter()
                    .enumerate()
                    .map(|(column, slot)| {
                        let (label, style) = self.day_style(slot, column, theme);
                        Cell::from(label).style(style)
                    })
                    .collect();
                Row::new(cells).height(1)
            })
            .collect();

        Table::new(rows, [Constraint::Length(4); 7])
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.colors.dimmed.to_ratatui())
                    .title(self.widget.title())
                    .title_style(theme.colors.title.to_ratatui())
                    .title_alignment(Alignment::Center),
            )
            .column_spacing(1)
    }

    fn footer(&self, theme: &Theme) -> Paragraph<'static> {
        let mut lines = vec![Line::from(Span::styled(
            self.status.clone().unwrap_or_else(|| self.widget.summary()),
            theme.colors.status_text.to_ratatui(),
        ))];

        if self.show_help {
            let help = theme.colors.help_text.to_ratatui();
            lines.push(Line::from(Span::styled(
                "←→↑↓/hjkl=Move • [ ]=Month • t=Today • Space=Pick • s=Submit • q=Close",
                help,
            )));
            if self.widget.supports_macros() {
                let macros: Vec<String> = MacroKind::ALL
                    .iter()
                    .enumerate()
                    .map(|(i, kind)| format!("{}={}", i + 1, kind.label()))
                    .collect();
                lines.push(Line::from(Span::styled(macros.join(" • "), help)));
            }
        } else {
            lines.push(Line::from(Span::styled(
                "?=Help",
                theme.colors.help_text.to_ratatui(),
            )));
        }

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::NONE))
            .alignment(Alignment::Center)
    }
}

/// Runs a terminal restore at most once, whether from `run` or `Drop`.
#[derive(Debug, Default)]
struct RestoreOnce {
    done: bool,
}

impl RestoreOnce {
    fn run(&mut self, restore: impl FnOnce() -> Result<()>) -> Result<()> {
        if self.done {
            return Ok(());
        }
        self.done = true;
        restore()
    }
}

/// Terminal front-end for a [`CalendarState`].
pub struct CalendarView<'a> {
    state: CalendarState<'a>,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    theme: Theme,
    restored: RestoreOnce,
}

impl<'a> CalendarView<'a> {
    pub fn new(widget: &'a mut dyn CalendarWidget, theme: Theme) -> Result<Self> {
        if !IsTty::is_tty(&stdout()) {
            anyhow::bail!("Not running in a TTY, cannot initialize terminal interface");
        }

        enable_raw_mode().context("Failed to enable raw mode")?;

        if let Err(e) = stdout().execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout())) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = stdout().execute(LeaveAlternateScreen);
                return Err(e).context("Failed to create terminal");
            }
        };

        Ok(Self {
            state: CalendarState::new(widget),
            terminal,
            theme,
            restored: RestoreOnce::default(),
        })
    }

    fn centered(available: Rect, width: u16, height: u16) -> Rect {
        let width = available.width.min(width);
        let height = available.height.min(height);
        Rect {
            x: available.x + (available.width - width) / 2,
            y: available.y + (available.height - height) / 2,
            width,
            height,
        }
    }

    pub fn run(&mut self) -> Result<CalendarViewResult> {
        const GRID_WIDTH: u16 = 7 * 5 + 2;
        const GRID_HEIGHT: u16 = 6 + 1 + 2;
        const FOOTER_HEIGHT: u16 = 4;

        let result = loop {
            if let Some(result) = self.state.result() {
                break result.clone();
            }

            let table = self.state.table(&self.theme);
            let footer = self.state.footer(&self.theme);

            self.terminal.draw(|frame| {
                let area = Self::centered(frame.area(), 90, GRID_HEIGHT + FOOTER_HEIGHT);
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(GRID_HEIGHT),
                        Constraint::Length(FOOTER_HEIGHT),
                    ])
                    .split(area);

                let grid_area = Self::centered(chunks[0], GRID_WIDTH, GRID_HEIGHT);
                frame.render_widget(table, grid_area);
                frame.render_widget(footer, chunks[1]);
            })?;

            if !poll(std::time::Duration::from_millis(100))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if let Some(action) = Action::from_key(key) {
                    self.state.apply(action)?;
                }
            }
        };

        self.cleanup()?;
        Ok(result)
    }

    fn cleanup(&mut self) -> Result<()> {
        let terminal = &mut self.terminal;
        self.restored.run(|| {
            disable_raw_mode()?;
            terminal.backend_mut().execute(LeaveAlternateScreen)?;
            Ok(())
        })
    }
}

impl<'a> Drop for CalendarView<'a> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::RangePicker;
    use crate::domain::SelectionPhase;
    use crate::infrastructure::test_utils::test_harness::{month, ymd};
    use crate::infrastructure::{HookRegistry, MemoryControl};

    fn range_picker(today: NaiveDate) -> RangePicker {
        RangePicker::new(today, Box::new(MemoryControl::new()), HookRegistry::new()).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_key(key(KeyCode::Char('q'))), Some(Action::Close));
        assert_eq!(Action::from_key(key(KeyCode::Up)), Some(Action::MoveDays(-7)));
        assert_eq!(
            Action::from_key(key(KeyCode::Char('7'))),
            Some(Action::Macro(MacroKind::Last15Days))
        );
        assert_eq!(Action::from_key(key(KeyCode::Char('0'))), None);
        assert_eq!(
            Action::from_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Close)
        );
    }

    #[test]
    fn test_cursor_pages_months() {
        let mut picker = range_picker(ymd(2024, 1, 30));
        let mut state = CalendarState::new(&mut picker);

        state.apply(Action::MoveDays(7)).unwrap();
        assert_eq!(state.cursor(), ymd(2024, 2, 6));
        assert_eq!(state.widget().view(), month(2024, 1));

        state.apply(Action::MoveDays(-60)).unwrap();
        assert_eq!(state.widget().view(), month(2023, 11));
    }

    #[test]
    fn test_select_and_submit_through_keys() {
        let mut picker = range_picker(ymd(2024, 3, 13));
        {
            let mut state = CalendarState::new(&mut picker);
            state.apply(Action::Select).unwrap();
            state.apply(Action::Submit).unwrap();
            assert!(state.result().is_none());

            state.apply(Action::MoveDays(2)).unwrap();
            state.apply(Action::Select).unwrap();
            state.apply(Action::Submit).unwrap();
            assert_eq!(
                state.result(),
                Some(&CalendarViewResult::Submitted(ControlValue::Range {
                    start_date: ymd(2024, 3, 13),
                    end_date: ymd(2024, 3, 15),
                }))
            );
        }
        assert_eq!(picker.phase(), SelectionPhase::RangeSet);
        assert_eq!(picker.range_count(), 3);
    }

    #[test]
    fn test_macro_key_applies_preset() {
        let mut picker = range_picker(ymd(2024, 4, 10));
        {
            let mut state = CalendarState::new(&mut picker);
            state.apply(Action::Macro(MacroKind::ThisMonth)).unwrap();
        }
        assert_eq!(picker.range_count(), 30);
    }

    #[test]
    fn test_terminal_restored_once() {
        let mut restored = RestoreOnce::default();
        let mut calls = 0;

        restored
            .run(|| {
                calls += 1;
                Ok(())
            })
            .unwrap();
        restored
            .run(|| {
                calls += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(calls, 1);

        let mut failing = RestoreOnce::default();
        assert!(failing.run(|| anyhow::bail!("no tty")).is_err());
        assert!(failing.run(|| anyhow::bail!("no tty")).is_ok());
    }

    #[test]
    fn test_table_builds_for_every_row() {
        let theme = Theme::default();
        let mut picker = range_picker(ymd(2024, 3, 13));
        let state = CalendarState::new(&mut picker);
        let _table = state.table(&theme);
        let _footer = state.footer(&theme);
        assert_eq!(state.widget().days().len(), 6);
    }
}
