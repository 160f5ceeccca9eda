use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::models::{QuestionView, SessionView};

use super::{option_label, Cursor};

const SIDEBAR_WIDTH: u16 = 24;

pub fn render(frame: &mut Frame, area: Rect, title: &str, view: &SessionView, cursor: &Cursor) {
    let SessionView::InProgress {
        position,
        total,
        progress,
        answered,
        question,
        ..
    } = view
    else {
        return;
    };

    let [main, sidebar] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(SIDEBAR_WIDTH)])
            .margin(1)
            .areas(area);

    let [header, gauge, prompt, options, hint, controls] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(if cursor.show_hint { 4 } else { 1 }),
        Constraint::Length(1),
    ])
    .spacing(1)
    .areas(main);

    render_header(frame, header, title, *position, *total);
    render_progress(frame, gauge, *progress);
    render_prompt(frame, prompt, &question.prompt);
    render_options(frame, options, question, cursor.selected);
    render_hint(frame, hint, &question.hint, cursor.show_hint);
    render_controls(frame, controls, *position > 0);
    render_sidebar(frame, sidebar, *position, *total, *answered);
}

fn render_header(frame: &mut Frame, area: Rect, title: &str, position: usize, total: usize) {
    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(24)]).areas(area);

    frame.render_widget(Paragraph::new(title).fg(Color::Cyan).bold(), left);
    frame.render_widget(
        Paragraph::new(format!("Question {} of {}", position + 1, total))
            .alignment(Alignment::Right)
            .fg(Color::DarkGray),
        right,
    );
}

fn render_progress(frame: &mut Frame, area: Rect, progress: f64) {
    let widget = Gauge::default()
        .ratio(progress.clamp(0.0, 1.0))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .label("");
    frame.render_widget(widget, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, question: &QuestionView, selected: Option<usize>) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_selected = selected == Some(index);
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", option_label(index)), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_hint(frame: &mut Frame, area: Rect, hint: &str, visible: bool) {
    let widget = if visible {
        Paragraph::new(Line::from(vec![
            Span::styled("Hint: ", Style::default().fg(Color::Cyan).bold()),
            Span::styled(hint, Style::default().fg(Color::LightBlue).italic()),
        ]))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::LEFT)
                .border_style(Color::Cyan)
                .padding(Padding::horizontal(1)),
        )
    } else {
        Paragraph::new("h show hint").fg(Color::DarkGray)
    };
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, can_go_back: bool) {
    let text = if can_go_back {
        "j/k choose  ·  enter next  ·  backspace previous  ·  h hint  ·  q quit"
    } else {
        "j/k choose  ·  enter next  ·  h hint  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_sidebar(frame: &mut Frame, area: Rect, position: usize, total: usize, answered: usize) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).bold();

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("Progress", label)),
        Line::from(Span::styled(format!("{}/{}", position + 1, total), value)),
        Line::from(""),
        Line::from(Span::styled("Saved answers", label)),
        Line::from(Span::styled(answered.to_string(), value)),
    ];

    let widget = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(Color::DarkGray)
            .title(" Stats ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(widget, area);
}
