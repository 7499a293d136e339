//! Terminal event loop
//!
//! Single writer of the view state: terminal events, fetch completions and
//! spinner ticks are all funnelled through one `tokio::select!` loop that
//! dispatches into the [`ViewController`].

use std::io;
use std::time::Duration;

use crossterm::event::KeyEventKind;
use moviedb_api::MovieSource;
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tui_dispatch::{process_raw_event, spawn_event_poller, EventKind, Middleware, RawEvent};

use crate::action::Action;
use crate::components::{Component, MovieBrowser, MovieBrowserProps};
use crate::controller::ViewController;

/// Timeout passed to each `crossterm::event::poll` call
const POLL_TIMEOUT: Duration = Duration::from_millis(10);
/// Sleep between poll cycles
const LOOP_SLEEP: Duration = Duration::from_millis(16);

/// Whether the loop keeps going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Runtime<S, M: Middleware<Action>> {
    controller: ViewController<S, M>,
    browser: MovieBrowser,
    tick: Duration,
    should_render: bool,
}

impl<S, M> Runtime<S, M>
where
    S: MovieSource + Send + Sync + 'static,
    M: Middleware<Action>,
{
    pub fn new(controller: ViewController<S, M>, tick: Duration) -> Self {
        Self {
            controller,
            browser: MovieBrowser::new(),
            tick,
            should_render: true,
        }
    }

    pub fn controller(&self) -> &ViewController<S, M> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ViewController<S, M> {
        &mut self.controller
    }

    /// A frame is due
    pub fn needs_render(&self) -> bool {
        self.should_render
    }

    /// Draw the current state if anything changed since the last frame.
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        if !self.should_render {
            return Ok(());
        }
        let browser = &mut self.browser;
        let state = self.controller.state();
        terminal.draw(|frame| {
            browser.render(frame, frame.area(), MovieBrowserProps { state });
        })?;
        self.should_render = false;
        Ok(())
    }

    /// Route a terminal event through the components and dispatch the
    /// resulting actions.
    pub fn handle_event(&mut self, event: &EventKind) -> Control {
        // some terminals report key releases too
        if matches!(event, EventKind::Key(key) if key.kind == KeyEventKind::Release) {
            return Control::Continue;
        }
        if let EventKind::Resize(width, height) = event {
            debug!(width, height, "terminal resized");
            self.should_render = true;
        }

        let actions = self.browser.handle_event(
            event,
            MovieBrowserProps {
                state: self.controller.state(),
            },
        );
        for action in actions {
            if action == Action::Quit {
                self.controller.dispatch(action);
                return Control::Quit;
            }
            if self.controller.dispatch(action) {
                self.should_render = true;
            }
        }
        Control::Continue
    }

    /// Apply a fetch completion or any other queued action.
    pub fn handle_action(&mut self, action: Action) {
        if self.controller.dispatch(action) {
            self.should_render = true;
        }
    }

    /// Run until the user quits. Outstanding fetches are aborted on exit,
    /// whether the loop ended normally or with a terminal error.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(event_tx, POLL_TIMEOUT, LOOP_SLEEP, cancel_token.clone());

        let result = self.event_loop(terminal, event_rx).await;

        cancel_token.cancel();
        self.controller.shutdown();
        info!("event loop finished");
        result
    }

    async fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut event_rx: mpsc::UnboundedReceiver<RawEvent>,
    ) -> io::Result<()> {
        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            self.draw(terminal)?;

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let event = process_raw_event(raw_event);
                    if self.handle_event(&event) == Control::Quit {
                        break;
                    }
                }

                Some(action) = self.controller.next_completion() => {
                    self.handle_action(action);
                }

                _ = ticker.tick() => {
                    self.handle_action(Action::Tick);
                }
            }
        }
        Ok(())
    }
}
