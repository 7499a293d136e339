use crossterm::event::{KeyCode, KeyModifiers};
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
use crate::state::Category;

pub const SEARCH_PLACEHOLDER: &str = "Search for a movie...";

#[derive(Default)]
pub struct SearchBar;

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
}

impl SearchBar {
    pub const HEIGHT: u16 = 3;
}

impl Component for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    #[allow(refining_impl_trait)]
    fn handle_event<'p>(&mut self, event: &EventKind, props: Self::Props<'p>) -> Vec<Action>
    where
        'p: 'p,
    {
        let EventKind::Key(key) = event else {
            return vec![];
        };

        if !props.is_focused {
            return match key.code {
                KeyCode::Char('/') => vec![Action::SearchFocus],
                _ => vec![],
            };
        }

        match key.code {
            KeyCode::Esc => vec![Action::SearchBlur],
            KeyCode::Enter => {
                if props.query.trim().is_empty() {
                    return vec![Action::SearchBlur];
                }
                vec![
                    Action::SearchSubmit,
                    Action::CategorySelect(Category::SearchResults),
                    Action::SearchBlur,
                ]
            }
            KeyCode::Backspace => {
                let mut query = props.query.to_string();
                if query.pop().is_none() {
                    return vec![];
                }
                vec![Action::SearchQueryChange(query)]
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if props.query.is_empty() {
                    return vec![];
                }
                vec![Action::SearchQueryChange(String::new())]
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut query = props.query.to_string();
                query.push(c);
                vec![Action::SearchQueryChange(query)]
            }
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border_color = if props.is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };

        let content = if props.query.is_empty() {
            Line::from(Span::styled(
                SEARCH_PLACEHOLDER,
                Style::default().fg(Color::DarkGray).italic(),
            ))
        } else {
            Line::from(Span::raw(props.query.to_string()))
        };

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
        frame.render_widget(paragraph, area);

        if props.is_focused {
            let cursor_x = area
                .x
                .saturating_add(1)
                .saturating_add(props.query.chars().count() as u16)
                .min(area.right().saturating_sub(2));
            frame.set_cursor_position((cursor_x, area.y + 1));
        }
    }
}
