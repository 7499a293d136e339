use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use tui_dispatch::EventKind;

use super::{spinner, Component};
use crate::action::Action;
use crate::state::{RequestStatus, ViewState};

pub struct StatusBar;

pub struct StatusBarProps<'a> {
    pub state: &'a ViewState,
}

fn status_color(status: RequestStatus) -> Color {
    match status {
        RequestStatus::Initial => Color::DarkGray,
        RequestStatus::InProgress => Color::Yellow,
        RequestStatus::Success => Color::Green,
        RequestStatus::Failure => Color::Red,
    }
}

impl Component for StatusBar {
    type Props<'a> = StatusBarProps<'a>;

    // Display only
    #[allow(refining_impl_trait)]
    fn handle_event<'p>(&mut self, _event: &EventKind, _props: Self::Props<'p>) -> Vec<Action>
    where
        'p: 'p,
    {
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let chunks = Layout::horizontal([Constraint::Min(30), Constraint::Length(44)]).split(area);

        let mut spans = Vec::new();
        let marker = if state.status == RequestStatus::InProgress {
            spinner(state.tick_count)
        } else {
            "●"
        };
        spans.push(Span::styled(
            format!(" {marker} {}", state.status.label()),
            Style::default().fg(status_color(state.status)).bold(),
        ));
        for (category, status) in state.category_status.iter() {
            spans.push(Span::styled("  ", Style::default()));
            spans.push(Span::styled(
                format!("{}:", category.label()),
                Style::default().fg(Color::DarkGray),
            ));
            spans.push(Span::styled(
                status.label(),
                Style::default().fg(status_color(*status)),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

        let help = Line::from(vec![
            Span::styled("/", Style::default().fg(Color::Cyan).bold()),
            Span::styled(" search  ", Style::default().fg(Color::DarkGray)),
            Span::styled("1-4", Style::default().fg(Color::Cyan).bold()),
            Span::styled(" category  ", Style::default().fg(Color::DarkGray)),
            Span::styled("hjkl", Style::default().fg(Color::Cyan).bold()),
            Span::styled(" move  ", Style::default().fg(Color::DarkGray)),
            Span::styled("q", Style::default().fg(Color::Cyan).bold()),
            Span::styled(" quit ", Style::default().fg(Color::DarkGray)),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(help), chunks[1]);
    }
}
