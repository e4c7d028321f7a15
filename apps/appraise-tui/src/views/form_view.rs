//! Form view: one line per input control plus the predict trigger.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use appraise_core::{FormSchema, RawInput};

use super::{form_rows, FormRow};

/// Width of the label column
const LABEL_WIDTH: usize = 34;

/// Form view state
pub struct FormView {
    /// Currently selected row
    pub selected: usize,
}

impl FormView {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn next_row(&mut self, count: usize) {
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn prev_row(&mut self, count: usize) {
        if count > 0 {
            self.selected = if self.selected == 0 {
                count - 1
            } else {
                self.selected - 1
            };
        }
    }

    /// Render the form. `edit_buffer` is the text being typed into the
    /// selected numeric row, if any.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        form: &FormSchema,
        input: &RawInput,
        edit_buffer: Option<&str>,
    ) {
        let items: Vec<ListItem> = form_rows(form)
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let is_selected = i == self.selected;
                let line = match row {
                    FormRow::Numeric(idx) => {
                        let field = &form.numeric[idx];
                        let value = match edit_buffer {
                            Some(buffer) if is_selected => format!("{buffer}_"),
                            _ => input
                                .numeric(&field.name)
                                .map(|v| v.to_string())
                                .unwrap_or_default(),
                        };
                        Line::from(vec![
                            Span::raw(format!("{:<LABEL_WIDTH$}", field.label)),
                            Span::styled(format!("{value:>10}"), Style::default().fg(Color::Cyan)),
                        ])
                    }
                    FormRow::Categorical(idx) => {
                        let field = &form.categorical[idx];
                        let value = input.selection(&field.name).unwrap_or_default();
                        Line::from(vec![
                            Span::raw(format!("{:<LABEL_WIDTH$}", field.label)),
                            Span::styled(format!("< {value} >"), Style::default().fg(Color::Yellow)),
                        ])
                    }
                    FormRow::Predict => Line::from(Span::styled(
                        "[ Predict! ]",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                };

                let style = if is_selected {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                ListItem::new(line).style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title("House Features Selection")
                .borders(Borders::ALL),
        );
        frame.render_widget(list, area);
    }
}

impl Default for FormView {
    fn default() -> Self {
        Self::new()
    }
}
