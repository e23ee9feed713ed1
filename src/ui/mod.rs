mod bottom_bar;
mod dashboard_pane;
mod dispatcher;
mod fid_prompt;
mod header_bar;
pub mod keymap;
mod lines;
pub mod overview;
pub mod placeholder;
mod theme;

use crate::analytics_client::Fid;
use crate::host::ReadySignal;
use crate::store::{Slices, Store};
use crate::ui::bottom_bar::BottomBar;
use crate::ui::dashboard_pane::DashboardPane;
use crate::ui::dispatcher::Dispatcher;
use crate::ui::fid_prompt::FidPrompt;
use crate::ui::header_bar::{HeaderBar, HEADER_HEIGHT};
use crate::ui::keymap::Action;
use crate::ui_framework::bounding_box::BoundingBox;
use crate::ui_framework::{Component, Input, Render};
use anyhow::Result;
use crossterm::cursor;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal;
use crossterm::{
    execute, queue,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::stream::FuturesUnordered;
use futures_util::{FutureExt, StreamExt};
use std::io::{stdout, Stdout, Write};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
enum Focus {
    #[default]
    Dashboard,
    FidPrompt,
}

/// NB: keep this limited to things fetch tasks need to tell the UI; component-to-component
/// traffic goes through direct calls.
#[derive(Debug)]
pub enum InternalEvent {
    SliceUpdated(Slices),
}

pub struct UI {
    stdout: Stdout,
    events: UnboundedReceiver<InternalEvent>,
    tasks: FuturesUnordered<JoinHandle<()>>,
    dispatcher: Dispatcher,
    focus: Focus,
    ready_signal: ReadySignal,
    should_quit: bool,
    header_bar: Component<HeaderBar>,
    dashboard_pane: Component<DashboardPane>,
    bottom_bar: Component<BottomBar>,
    fid_prompt: Component<FidPrompt>,
}

impl UI {
    pub fn new(store: Arc<Store>, ready_signal: ReadySignal) -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let header_bar = HeaderBar::new(&store);
        let dashboard_pane = DashboardPane::new(&store);
        let bottom_bar = BottomBar::new(&store.fid());

        let mut this = Self {
            stdout: stdout(),
            events: events_rx,
            tasks: FuturesUnordered::new(),
            dispatcher: Dispatcher::new(store, events_tx),
            focus: Focus::Dashboard,
            ready_signal,
            should_quit: false,
            header_bar: Component::new(header_bar),
            dashboard_pane: Component::new(dashboard_pane),
            bottom_bar: Component::new(bottom_bar),
            fid_prompt: Component::new(FidPrompt::new()),
        };

        this.resize(cols, rows);
        Ok(this)
    }

    /// Takes over the terminal and starts the first fetch cycle.
    pub fn initialize(&mut self, fid: Fid) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        self.apply(Action::SetFid(fid));
        Ok(())
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        let screen = BoundingBox::new(0, 0, cols, rows);
        let (header, rest) = screen.split_top(HEADER_HEIGHT);
        let (body, status) = rest.split_top(rest.height.saturating_sub(1));

        self.header_bar.set_bounding_box(header);
        self.dashboard_pane.set_bounding_box(body);
        self.bottom_bar.set_bounding_box(status);
        self.fid_prompt.set_bounding_box(status);
    }

    fn render(&mut self) -> Result<()> {
        self.header_bar.render_if_necessary(&mut self.stdout)?;
        self.dashboard_pane.render_if_necessary(&mut self.stdout)?;

        match self.focus {
            Focus::Dashboard => {
                self.bottom_bar.render_if_necessary(&mut self.stdout)?;
                queue!(self.stdout, cursor::Hide)?;
            }
            Focus::FidPrompt => {
                self.fid_prompt.render_if_necessary(&mut self.stdout)?;
                let (x, y) = self.fid_prompt.get_cursor();
                queue!(self.stdout, cursor::MoveTo(x, y), cursor::Show)?;
            }
        }

        self.stdout.flush()?;
        Ok(())
    }

    fn apply(&mut self, action: Action) {
        debug!(?action, "apply");
        match action {
            Action::OpenFidPrompt => {
                self.focus = Focus::FidPrompt;
                self.fid_prompt.component.clear();
            }
            Action::Quit => self.should_quit = true,
            action => {
                let loads = self.dispatcher.apply(action);
                if !loads.is_empty() {
                    self.tasks.extend(loads);
                    self.bottom_bar.component.set_fid(&self.dispatcher.fid());
                    self.bottom_bar
                        .component
                        .set_num_tasks_in_flight(self.tasks.len());
                    self.header_bar.component.invalidate();
                    self.dashboard_pane.component.invalidate();
                }
            }
        }

        let selection = self.dispatcher.selection();
        self.header_bar.component.set_tab(selection.tab);
        self.dashboard_pane.component.set_selection(selection);
    }

    fn close_fid_prompt(&mut self) {
        self.focus = Focus::Dashboard;
        self.bottom_bar.component.invalidate();
    }

    fn handle_key_event(&mut self, key_event: &KeyEvent) {
        if let Some(action) = keymap::global_action(key_event) {
            self.apply(action);
            return;
        }

        match self.focus {
            Focus::FidPrompt => match key_event.code {
                KeyCode::Enter => {
                    let text = self.fid_prompt.component.take_text();
                    self.close_fid_prompt();
                    self.apply(Action::SetFid(Fid::parse_or_default(Some(&text))));
                }
                KeyCode::Esc => self.close_fid_prompt(),
                _ => {
                    self.fid_prompt.component.handle_key_event(key_event);
                }
            },
            Focus::Dashboard => match keymap::dashboard_action(key_event) {
                Some(action) => self.apply(action),
                None => {
                    self.dashboard_pane.component.handle_key_event(key_event);
                }
            },
        }
    }

    fn handle_internal_event(&mut self, event: InternalEvent) {
        match event {
            InternalEvent::SliceUpdated(slices) => {
                if slices.contains(Slices::SUMMARY) {
                    self.header_bar.component.invalidate();
                }
                self.dashboard_pane.component.invalidate();
            }
        }
    }

    fn handle_terminal_event(&mut self, event: &Event) {
        match event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            Event::Resize(cols, rows) => self.resize(*cols, *rows),
            _ => (),
        }
    }

    pub async fn event_loop(&mut self) -> Result<()> {
        let mut terminal_event_stream = EventStream::new();

        self.render()?;
        // NB: detached; the host reports back through the log only
        let _ = self.ready_signal.notify();

        while !self.should_quit {
            let terminal_event = terminal_event_stream.next().fuse();
            let internal_event = self.events.recv();
            let there_are_tasks = !self.tasks.is_empty();
            let task_event = self.tasks.next().fuse();

            tokio::select! {
                event = terminal_event => {
                    match event {
                        Some(Ok(event)) => self.handle_terminal_event(&event),
                        Some(Err(err)) => warn!(error = %err, "terminal event error"),
                        None => self.should_quit = true,
                    }
                },
                event = internal_event => {
                    if let Some(event) = event {
                        self.handle_internal_event(event);
                    }
                },
                // NB: FuturesUnordered yields None immediately when empty, so only poll with work
                event = task_event, if there_are_tasks => {
                    if let Some(Err(err)) = event {
                        warn!(error = %err, "fetch task failed");
                    }
                    self.bottom_bar.component.set_num_tasks_in_flight(self.tasks.len());
                }
            }

            self.render()?;
        }

        info!("quitting");
        Ok(())
    }
}

pub fn reset() -> Result<()> {
    execute!(stdout(), cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    Ok(())
}
