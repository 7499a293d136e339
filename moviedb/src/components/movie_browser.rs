//! Top-level screen: header, search bar, category tabs, content, status bar

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;

use super::content_view::{EMPTY_MESSAGE, ERROR_MESSAGE, LOADING_MESSAGE};
use super::{
    spinner, CategoryTabs, CategoryTabsProps, Component, ContentView, MovieGrid, MovieGridProps,
    SearchBar, SearchBarProps, StatusBar, StatusBarProps,
};
use crate::action::Action;
use crate::state::ViewState;

pub const HEADER_TITLE: &str = "movieDB";

#[derive(Default)]
pub struct MovieBrowser {
    search_bar: SearchBar,
    tabs: CategoryTabs,
    grid: MovieGrid,
}

pub struct MovieBrowserProps<'a> {
    pub state: &'a ViewState,
}

impl MovieBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    fn render_header(frame: &mut Frame, area: Rect) {
        let header = Line::from(vec![Span::styled(
            HEADER_TITLE,
            Style::default().fg(Color::Cyan).bold(),
        )])
        .centered();
        frame.render_widget(Paragraph::new(header), area);
    }

    fn render_message(frame: &mut Frame, area: Rect, line: Line<'static>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(area);
        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center),
            chunks[1],
        );
    }
}

impl Component for MovieBrowser {
    type Props<'a> = MovieBrowserProps<'a>;

    #[allow(refining_impl_trait)]
    fn handle_event<'p>(&mut self, event: &EventKind, props: Self::Props<'p>) -> Vec<Action>
    where
        'p: 'p,
    {
        let state = props.state;

        if state.search_mode {
            return self.search_bar.handle_event(
                event,
                SearchBarProps {
                    query: &state.search_query,
                    is_focused: true,
                },
            );
        }

        if let EventKind::Key(key) = event {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return vec![Action::Quit];
            }
        }

        let actions = self.search_bar.handle_event(
            event,
            SearchBarProps {
                query: &state.search_query,
                is_focused: false,
            },
        );
        if !actions.is_empty() {
            return actions;
        }

        let actions = self.tabs.handle_event(
            event,
            CategoryTabsProps {
                state,
                is_focused: true,
            },
        );
        if !actions.is_empty() {
            return actions;
        }

        self.grid.handle_event(
            event,
            MovieGridProps {
                movies: state.active_list(),
                selected: state.selected,
                is_focused: true,
            },
        )
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(SearchBar::HEIGHT),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        Self::render_header(frame, chunks[0]);
        self.search_bar.render(
            frame,
            chunks[1],
            SearchBarProps {
                query: &state.search_query,
                is_focused: state.search_mode,
            },
        );
        self.tabs.render(
            frame,
            chunks[2],
            CategoryTabsProps {
                state,
                is_focused: !state.search_mode,
            },
        );

        let content = chunks[3];
        match ContentView::of(state) {
            ContentView::Movies(movies) => self.grid.render(
                frame,
                content,
                MovieGridProps {
                    movies,
                    selected: state.selected,
                    is_focused: !state.search_mode,
                },
            ),
            ContentView::Loading => Self::render_message(
                frame,
                content,
                Line::from(vec![
                    Span::styled(spinner(state.tick_count), Style::default().fg(Color::Cyan)),
                    Span::raw(" "),
                    Span::styled(LOADING_MESSAGE, Style::default().fg(Color::Cyan)),
                ]),
            ),
            ContentView::Error => Self::render_message(
                frame,
                content,
                Line::from(Span::styled(ERROR_MESSAGE, Style::default().fg(Color::Red))),
            ),
            ContentView::Empty => Self::render_message(
                frame,
                content,
                Line::from(Span::styled(EMPTY_MESSAGE, Style::default().fg(Color::DarkGray))),
            ),
            ContentView::Idle => {}
        }

        let mut status_bar = StatusBar;
        status_bar.render(frame, chunks[4], StatusBarProps { state });
    }
}
