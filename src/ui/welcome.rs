use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::models::QuizInfo;

const TIPS: [&str; 4] = [
    "Read every question carefully",
    "Use hints if you need help",
    "You can go back to previous questions",
    "Detailed explanations at the end",
];

pub fn render(frame: &mut Frame, area: Rect, info: &QuizInfo) {
    let height = content_height(info.topics.len());
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Max(80),
        Constraint::Fill(1),
    ])
    .areas(middle);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            info.title.to_uppercase(),
            Style::default().fg(Color::Cyan).bold(),
        ))
        .centered(),
        Line::from(Span::styled(
            format!("{} Questions", info.total_questions),
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
        Line::from(""),
        Line::from(info.description.as_str().fg(Color::Gray)),
        Line::from(""),
    ];

    if !info.topics.is_empty() {
        content.push(Line::from("Topics".fg(Color::Cyan)));
        content.extend(info.topics.iter().map(String::as_str).map(bullet));
        content.push(Line::from(""));
    }

    content.push(Line::from("Tips".fg(Color::Cyan)));
    content.extend(TIPS.iter().copied().map(bullet));
    content.push(Line::from(""));
    content.push(
        Line::from(vec![
            Span::styled("ENTER", Style::default().fg(Color::Green).bold()),
            Span::styled(" to start  ·  q to quit", Style::default().fg(Color::DarkGray)),
        ])
        .centered(),
    );

    let widget = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(2)),
    );

    frame.render_widget(widget, center);
}

/// Rows needed for the welcome box: fixed chrome plus one per topic and tip.
fn content_height(topics: usize) -> u16 {
    let listed = u16::try_from(topics.saturating_add(TIPS.len())).unwrap_or(u16::MAX);
    listed.saturating_add(12)
}

fn bullet(text: &str) -> Line<'_> {
    Line::from(vec![
        Span::styled("  · ", Style::default().fg(Color::DarkGray)),
        Span::styled(text, Style::default().fg(Color::Gray)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tips_wording() {
        assert_eq!(
            TIPS,
            [
                "Read every question carefully",
                "Use hints if you need help",
                "You can go back to previous questions",
                "Detailed explanations at the end",
            ]
        );
    }

    #[test]
    fn test_content_height_saturates() {
        assert_eq!(content_height(0), 16);
        assert_eq!(content_height(5), 21);
        assert_eq!(content_height(70_000), u16::MAX);
        assert_eq!(content_height(usize::MAX), u16::MAX);
    }
}
