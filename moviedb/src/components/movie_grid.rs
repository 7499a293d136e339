use crossterm::event::KeyCode;
use moviedb_api::MovieSummary;
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;

/// Grid of movie cards with a cursor.
///
/// The column count depends on the last rendered width, so keyboard
/// navigation before the first frame moves one card at a time.
pub struct MovieGrid {
    columns: usize,
    visible_rows: usize,
    row_offset: usize,
}

pub struct MovieGridProps<'a> {
    pub movies: &'a [MovieSummary],
    pub selected: usize,
    pub is_focused: bool,
}

impl Default for MovieGrid {
    fn default() -> Self {
        Self {
            columns: 1,
            visible_rows: 1,
            row_offset: 0,
        }
    }
}

impl MovieGrid {
    pub const CARD_WIDTH: u16 = 24;
    pub const CARD_HEIGHT: u16 = 5;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    fn layout_for(&mut self, area: Rect) {
        self.columns = (area.width / Self::CARD_WIDTH).max(1) as usize;
        self.visible_rows = (area.height / Self::CARD_HEIGHT).max(1) as usize;
    }

    fn scroll_to(&mut self, selected: usize) {
        let row = selected / self.columns;
        if row < self.row_offset {
            self.row_offset = row;
        } else if row >= self.row_offset + self.visible_rows {
            self.row_offset = row + 1 - self.visible_rows;
        }
    }

    fn target(&self, code: KeyCode, selected: usize, len: usize) -> Option<usize> {
        let last = len - 1;
        let page = self.columns * self.visible_rows;
        match code {
            KeyCode::Left | KeyCode::Char('h') => selected.checked_sub(1),
            KeyCode::Right | KeyCode::Char('l') => (selected < last).then_some(selected + 1),
            KeyCode::Up | KeyCode::Char('k') => selected.checked_sub(self.columns),
            KeyCode::Down | KeyCode::Char('j') => {
                let next = selected + self.columns;
                (next <= last).then_some(next)
            }
            KeyCode::PageUp => Some(selected.saturating_sub(page)),
            KeyCode::PageDown => Some((selected + page).min(last)),
            KeyCode::Home | KeyCode::Char('g') => Some(0),
            KeyCode::End | KeyCode::Char('G') => Some(last),
            _ => None,
        }
    }

    fn card(movie: &MovieSummary, is_selected: bool) -> Paragraph<'static> {
        let border_style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title_style = if is_selected {
            Style::default().fg(Color::White).bold()
        } else {
            Style::default().fg(Color::White)
        };

        let poster = match movie.poster_url() {
            Some(url) => Span::styled(url, Style::default().fg(Color::Blue).underlined()),
            None => Span::styled("no poster", Style::default().fg(Color::DarkGray).italic()),
        };

        let lines = vec![
            Line::from(Span::styled(
                format!("Rating: {:.1}", movie.vote_average),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(poster),
        ];

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(movie.title.clone(), title_style)),
        )
    }
}

impl Component for MovieGrid {
    type Props<'a> = MovieGridProps<'a>;

    #[allow(refining_impl_trait)]
    fn handle_event<'p>(&mut self, event: &EventKind, props: Self::Props<'p>) -> Vec<Action>
    where
        'p: 'p,
    {
        if !props.is_focused || props.movies.is_empty() {
            return vec![];
        }
        let selected = props.selected.min(props.movies.len() - 1);

        let target = match event {
            EventKind::Key(key) => self.target(key.code, selected, props.movies.len()),
            EventKind::Scroll { delta, .. } => {
                let step = self.columns as isize * delta;
                let next = (selected as isize + step).clamp(0, props.movies.len() as isize - 1);
                Some(next as usize)
            }
            _ => None,
        };

        match target {
            Some(index) if index != selected => vec![Action::UiSelect(index)],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.layout_for(area);
        if props.movies.is_empty() {
            self.row_offset = 0;
            return;
        }
        let selected = props.selected.min(props.movies.len() - 1);
        self.scroll_to(selected);

        let card_width = area.width / self.columns as u16;
        let start = self.row_offset * self.columns;
        let end = (start + self.columns * self.visible_rows).min(props.movies.len());

        for (index, movie) in props.movies[start..end].iter().enumerate() {
            let row = (index / self.columns) as u16;
            let col = (index % self.columns) as u16;
            let card_area = Rect {
                x: area.x + col * card_width,
                y: area.y + row * Self::CARD_HEIGHT,
                width: card_width,
                height: Self::CARD_HEIGHT.min(area.height),
            };
            let is_selected = start + index == selected;
            frame.render_widget(Self::card(movie, is_selected), card_area);
        }
    }
}
