use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Tabs,
    Frame,
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::state::{Category, ViewState};

#[derive(Default)]
pub struct CategoryTabs;

pub struct CategoryTabsProps<'a> {
    pub state: &'a ViewState,
    pub is_focused: bool,
}

impl CategoryTabs {
    fn title(state: &ViewState, category: Category) -> Line<'static> {
        let count = state.list(category).len();
        let label = format!(" {} {} ({}) ", category.index() + 1, category.label(), count);
        Line::from(label)
    }
}

impl Component for CategoryTabs {
    type Props<'a> = CategoryTabsProps<'a>;

    #[allow(refining_impl_trait)]
    fn handle_event<'p>(&mut self, event: &EventKind, props: Self::Props<'p>) -> Vec<Action>
    where
        'p: 'p,
    {
        if !props.is_focused {
            return vec![];
        }
        let EventKind::Key(key) = event else {
            return vec![];
        };
        let active = props.state.active_category;
        let target = match key.code {
            KeyCode::Char('1') => Category::Popular,
            KeyCode::Char('2') => Category::TopRated,
            KeyCode::Char('3') => Category::Upcoming,
            KeyCode::Char('4') => Category::SearchResults,
            KeyCode::Tab => active.next(),
            KeyCode::BackTab => active.prev(),
            _ => return vec![],
        };
        vec![Action::CategorySelect(target)]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let titles: Vec<Line> = Category::ALL
            .into_iter()
            .map(|category| Self::title(props.state, category))
            .collect();

        let tabs = Tabs::new(titles)
            .select(props.state.active_category.index())
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(Style::default().fg(Color::Cyan).bold().reversed())
            .divider("│");
        frame.render_widget(tabs, area);
    }
}
