//! Detail panel for the selected row: bounds or option descriptions.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use appraise_core::{FormSchema, RawInput};

use super::FormRow;

pub struct DetailView;

impl DetailView {
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        form: &FormSchema,
        input: &RawInput,
        row: FormRow,
    ) {
        let (title, lines) = match row {
            FormRow::Numeric(idx) => {
                let field = &form.numeric[idx];
                let lines = vec![
                    Line::from(Span::styled(
                        field.label.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!("Column:  {}", field.name)),
                    Line::from(format!("Range:   {} to {}", field.min, field.max)),
                    Line::from(format!("Default: {}", field.default)),
                    Line::from(""),
                    Line::from("h/l adjust by 1, H/L by 100, Enter to type a value"),
                ];
                (field.name.clone(), lines)
            }
            FormRow::Categorical(idx) => {
                let field = &form.categorical[idx];
                let selected = input.selection(&field.name).unwrap_or_default();
                let mut lines = vec![
                    Line::from(Span::styled(
                        format!("{}: {}", field.name, field.summary),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                ];
                lines.extend(field.options.iter().map(|option| {
                    let marker = if option.label == selected { "> " } else { "  " };
                    let style = if option.label == selected {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default()
                    };
                    Line::from(vec![
                        Span::styled(format!("{marker}{:<9}", option.label), style),
                        Span::raw(option.description.clone()),
                    ])
                }));
                (field.name.clone(), lines)
            }
            FormRow::Predict => (
                "Predict".to_string(),
                vec![Line::from(
                    "Press Enter (or p anywhere) to encode the form and predict a price.",
                )],
            ),
        };

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title(title).borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
