//! Terminal screens shared by the local and the remote front-ends.
//!
//! Rendering is a pure function of a [`Screen`]: a session snapshot plus the
//! UI-local [`Cursor`]. Nothing here touches a `QuizSession`.

mod quiz;
mod review;
mod status;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::models::{QuizInfo, SessionView};

pub use status::Status;

/// UI-only state that never leaves the front-end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Highlighted option; `None` until the user picks one.
    pub selected: Option<usize>,
    pub show_hint: bool,
    /// First review entry shown.
    pub scroll: usize,
}

impl Cursor {
    pub fn at(selected: Option<usize>) -> Self {
        Self {
            selected,
            ..Self::default()
        }
    }

    pub fn select_next(&mut self, options: usize) {
        if options == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(current) => (current + 1) % options,
            None => 0,
        });
    }

    pub fn select_previous(&mut self, options: usize) {
        if options == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(current) => (current + options - 1) % options,
            None => options - 1,
        });
    }

    pub fn toggle_hint(&mut self) {
        self.show_hint = !self.show_hint;
    }

    pub fn scroll_down(&mut self, entries: usize) {
        let max_scroll = entries.saturating_sub(1);
        self.scroll = (self.scroll + 1).min(max_scroll);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

pub enum Screen<'a> {
    Welcome(&'a QuizInfo),
    Session {
        title: &'a str,
        view: &'a SessionView,
        cursor: &'a Cursor,
    },
    Status(Status<'a>),
}

pub fn render(frame: &mut Frame, screen: &Screen<'_>) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match screen {
        Screen::Welcome(info) => welcome::render(frame, area, info),
        Screen::Session {
            title,
            view,
            cursor,
        } => match view {
            SessionView::InProgress { .. } => quiz::render(frame, area, title, view, cursor),
            SessionView::Completed { score, tier, review: items } => {
                review::render(frame, area, *score, *tier, items, cursor.scroll)
            }
        },
        Screen::Status(status) => status.render(frame, area),
    }
}

fn option_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .map(char::from)
        .unwrap_or('?')
}
