use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::models::{ReviewItem, Score, Tier};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    score: Score,
    tier: Tier,
    review: &[ReviewItem],
    scroll: usize,
) {
    let [summary, breakdown, controls] = Layout::vertical([
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .areas(area);

    render_score_summary(frame, summary, score, tier);
    render_review(frame, breakdown, review, scroll);
    render_controls(frame, controls);
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Excellent => Color::Green,
        Tier::Good => Color::Yellow,
        Tier::KeepPracticing => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, score: Score, tier: Tier) {
    let color = tier_color(tier);
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ COMPLETED",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({:.1}%)",
                score.correct,
                score.total,
                score.percentage()
            ),
            Style::default().fg(color).bold(),
        )),
        Line::from(Span::styled(tier.message(), Style::default().fg(color))),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn review_lines(item: &ReviewItem) -> Vec<Line<'_>> {
    let dim = Style::default().fg(Color::DarkGray);
    let text = Style::default().fg(Color::Gray);

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("Question {}: ", item.id), dim),
        Span::styled(item.prompt.as_str(), Style::default().fg(Color::White).bold()),
    ])];

    let (verdict, color) = if item.is_correct {
        ("+ Correct!", Color::Green)
    } else {
        ("- Incorrect", Color::Red)
    };
    lines.push(Line::from(Span::styled(
        verdict,
        Style::default().fg(color).bold(),
    )));

    lines.push(Line::from(vec![
        Span::styled("  Your answer: ", dim),
        Span::styled(item.chosen_text().unwrap_or("No answer"), text),
    ]));

    if !item.is_correct {
        lines.push(Line::from(vec![
            Span::styled("  Correct answer: ", dim),
            Span::styled(item.correct_text(), Style::default().fg(Color::Green)),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("  Explanation: ", dim),
        Span::styled(item.explanation.as_str(), text),
    ]));
    lines.push(Line::from(""));
    lines
}

fn render_review(frame: &mut Frame, area: Rect, review: &[ReviewItem], scroll: usize) {
    let lines: Vec<Line> = review
        .iter()
        .skip(scroll)
        .flat_map(review_lines)
        .collect();

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Answer Review ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r restart  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
