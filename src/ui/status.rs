use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Full-screen one-line message: connecting, disconnected, and so on.
pub struct Status<'a> {
    pub message: &'a str,
    pub is_error: bool,
}

impl Status<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [_, middle, _] = Layout::vertical([
            Constraint::Percentage(40),
            Constraint::Length(8),
            Constraint::Percentage(40),
        ])
        .areas(area);

        let color = if self.is_error {
            Color::Red
        } else {
            Color::Yellow
        };

        let mut content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "EM QUIZ",
                Style::default().fg(Color::Cyan).bold(),
            )),
            Line::from(""),
            Line::from(Span::styled(self.message, Style::default().fg(color).bold())),
            Line::from(""),
        ];

        if self.is_error {
            content.push(Line::from(Span::styled(
                "Press [Q] to exit",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let widget = Paragraph::new(content).alignment(Alignment::Center);
        frame.render_widget(widget, middle);
    }
}
