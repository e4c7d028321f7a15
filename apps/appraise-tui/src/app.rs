//! Application state and main render loop

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use appraise_core::{Appraisal, Appraiser, RawInput, PROMPT_MESSAGE};

use crate::mode::Mode;
use crate::views::{form_rows, DetailView, FormRow, FormView};
use crate::widgets::ModeIndicator;

/// Large step for H/L on numeric rows
const BIG_STEP: i64 = 100;

/// Main application state
pub struct App {
    /// Current mode (NORMAL, EDIT)
    pub mode: Mode,
    /// Form, model, and expected columns
    pub appraiser: Appraiser,
    /// Values currently entered
    pub input: RawInput,
    /// Text typed in edit mode
    pub edit_buffer: String,
    /// Status message
    pub status_message: Option<String>,
    /// Last prediction; cleared whenever an input changes
    pub result: Option<Appraisal>,
    /// Whether to show the help overlay
    pub show_help: bool,
    pub form_view: FormView,
}

impl App {
    pub fn new(appraiser: Appraiser) -> Self {
        let input = appraiser.form().default_input();
        Self {
            mode: Mode::Normal,
            appraiser,
            input,
            edit_buffer: String::new(),
            status_message: None,
            result: None,
            show_help: false,
            form_view: FormView::new(),
        }
    }

    fn rows(&self) -> Vec<FormRow> {
        form_rows(self.appraiser.form())
    }

    /// Row under the cursor
    pub fn current_row(&self) -> FormRow {
        self.rows()
            .get(self.form_view.selected)
            .copied()
            .unwrap_or(FormRow::Predict)
    }

    /// Render the application
    pub fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Status bar
                Constraint::Min(0),    // Form and details
                Constraint::Length(3), // Result
                Constraint::Length(1), // Message line
            ])
            .split(size);

        self.render_status_bar(frame, chunks[0]);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        let editing = (self.mode == Mode::Edit).then_some(self.edit_buffer.as_str());
        self.form_view.render(
            frame,
            content_chunks[0],
            self.appraiser.form(),
            &self.input,
            editing,
        );
        DetailView.render(
            frame,
            content_chunks[1],
            self.appraiser.form(),
            &self.input,
            self.current_row(),
        );

        self.render_result(frame, chunks[2]);
        self.render_message_line(frame, chunks[3]);

        if self.show_help {
            self.render_help_overlay(frame, size);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let model = self.appraiser.model();
        let line = Line::from(vec![
            ModeIndicator::new(self.mode).as_span(),
            Span::raw(format!(
                " appraise | {} model, {} features | Press ? for help",
                model.kind(),
                model.feature_names().len()
            )),
        ]);
        let status_bar = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
        frame.render_widget(status_bar, area);
    }

    fn render_result(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.result {
            Some(appraisal) => Line::from(Span::styled(
                appraisal.to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            None => Line::from(PROMPT_MESSAGE),
        };
        let paragraph =
            Paragraph::new(line).block(Block::default().title("Result").borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn render_message_line(&self, frame: &mut Frame, area: Rect) {
        let content = self.status_message.clone().unwrap_or_else(|| {
            "j/k move | h/l adjust | Enter edit/predict | p predict | r reset | q quit".to_string()
        });
        frame.render_widget(Paragraph::new(content), area);
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_text = r#"
appraise - Help

Navigation:
  j/k     - Move down/up between fields
  h/l     - Decrease/increase a number, or previous/next option
  H/L     - Decrease/increase a number by 100
  Enter/i - Type a number into the selected field
  Enter   - On "Predict!", run the prediction
  p       - Predict from anywhere
  r       - Reset every field to its default

Edit mode:
  0-9, -  - Type the value
  Enter   - Accept (clamped to the field's range)
  Esc     - Cancel

Other:
  ?       - Toggle this help
  q       - Quit
"#;

        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black));

        let help_area = centered_rect(60, 70, area);
        frame.render_widget(ratatui::widgets::Clear, help_area);
        frame.render_widget(Paragraph::new(help_text).block(block), help_area);
    }

    /// Handle a key press, returns true if app should quit
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match self.mode {
            Mode::Normal => self.handle_normal_key(code, modifiers),
            Mode::Edit => self.handle_edit_key(code),
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> bool {
        let row_count = self.rows().len();
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
            }
            KeyCode::Esc => {
                self.show_help = false;
            }
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.form_view.next_row(row_count);
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                self.form_view.prev_row(row_count);
            }
            KeyCode::Char('h') | KeyCode::Left => self.adjust(-1),
            KeyCode::Char('l') | KeyCode::Right => self.adjust(1),
            KeyCode::Char('H') => self.adjust(-BIG_STEP),
            KeyCode::Char('L') => self.adjust(BIG_STEP),
            KeyCode::Char('i') => self.start_edit(),
            KeyCode::Enter => match self.current_row() {
                FormRow::Predict => self.predict(),
                FormRow::Numeric(_) => self.start_edit(),
                FormRow::Categorical(_) => self.adjust(1),
            },
            KeyCode::Char('p') => self.predict(),
            KeyCode::Char('r') => {
                self.input = self.appraiser.form().default_input();
                self.result = None;
                self.status_message = Some("Reset to defaults".to_string());
            }
            _ => {}
        }
        false
    }

    fn handle_edit_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.edit_buffer.clear();
                self.status_message = Some("Edit cancelled".to_string());
            }
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Backspace => {
                self.edit_buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || (c == '-' && self.edit_buffer.is_empty()) => {
                self.edit_buffer.push(c);
            }
            _ => {}
        }
        false
    }

    /// Step a number or cycle an option on the current row.
    fn adjust(&mut self, delta: i64) {
        let form = self.appraiser.form();
        let outcome = match self.current_row() {
            FormRow::Numeric(idx) => {
                let name = &form.numeric[idx].name;
                self.input
                    .step_numeric(form, name, delta)
                    .map(|v| format!("{name} = {v}"))
            }
            FormRow::Categorical(idx) => {
                let name = &form.categorical[idx].name;
                self.input
                    .cycle_selection(form, name, delta.signum() as isize)
                    .map(|label| format!("{name} = {label}"))
            }
            FormRow::Predict => return,
        };
        self.input_changed(outcome);
    }

    fn start_edit(&mut self) {
        if let FormRow::Numeric(idx) = self.current_row() {
            let name = &self.appraiser.form().numeric[idx].name;
            self.edit_buffer = self
                .input
                .numeric(name)
                .map(|v| v.to_string())
                .unwrap_or_default();
            self.mode = Mode::Edit;
            self.status_message = Some(format!("Editing {name} - Enter to accept, Esc to cancel"));
        }
    }

    fn commit_edit(&mut self) {
        self.mode = Mode::Normal;
        let buffer = std::mem::take(&mut self.edit_buffer);
        if let FormRow::Numeric(idx) = self.current_row() {
            let form = self.appraiser.form();
            let field = &form.numeric[idx];
            let outcome = self
                .input
                .set_numeric_text(form, &field.name, &buffer)
                .map(|v| {
                    if v.to_string() == buffer.trim() {
                        format!("{} = {v}", field.name)
                    } else {
                        format!("{} = {v} (range {} to {})", field.name, field.min, field.max)
                    }
                });
            self.input_changed(outcome);
        }
    }

    fn input_changed(&mut self, outcome: appraise_core::Result<String>) {
        match outcome {
            Ok(message) => {
                self.result = None;
                self.status_message = Some(message);
            }
            Err(err) => {
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Encode the form and run the model.
    pub fn predict(&mut self) {
        match self.appraiser.appraise(&self.input) {
            Ok(appraisal) => {
                self.status_message = Some(format!(
                    "Predicted with {} model",
                    self.appraiser.model().kind()
                ));
                self.result = Some(appraisal);
            }
            Err(err) => {
                tracing::error!("Prediction failed: {}", err);
                self.result = None;
                self.status_message = Some(format!("Prediction failed: {err}"));
            }
        }
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
