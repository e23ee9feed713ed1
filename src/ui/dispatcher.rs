use crate::analytics_client::Fid;
use crate::selection::Selection;
use crate::store::{FetchCycle, Slices, Store};
use crate::ui::keymap::Action;
use crate::ui::InternalEvent;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Applies dashboard actions. Owns the selection and is the only place a fetch cycle starts; the
/// UI just keeps track of the tasks it hands back.
pub struct Dispatcher {
    store: Arc<Store>,
    selection: Selection,
    events: UnboundedSender<InternalEvent>,
}

impl Dispatcher {
    pub fn new(store: Arc<Store>, events: UnboundedSender<InternalEvent>) -> Self {
        Self {
            store,
            selection: Selection::default(),
            events,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn fid(&self) -> Fid {
        self.store.fid()
    }

    /// Returns the loads it spawned; empty for anything that only changes the view.
    pub fn apply(&mut self, action: Action) -> Vec<JoinHandle<()>> {
        let cycle = match action {
            Action::SelectTab(tab) => {
                self.selection.set_tab(tab);
                None
            }
            Action::NextTab => {
                self.selection.next_tab();
                None
            }
            Action::PreviousTab => {
                self.selection.previous_tab();
                None
            }
            Action::SelectMetric(metric) => {
                self.selection.set_metric(metric);
                None
            }
            Action::ToggleMetric => {
                self.selection.toggle_metric();
                None
            }
            Action::Refresh => Some(self.store.refresh()),
            Action::SetFid(fid) => Some(self.store.start_cycle(fid)),
            // NB: focus and shutdown belong to the UI
            Action::OpenFidPrompt | Action::Quit => None,
        };

        match cycle {
            Some(cycle) => self.spawn_loads(cycle),
            None => Vec::new(),
        }
    }

    /// One task per slice; they don't wait on each other and each reports back on its own.
    fn spawn_loads(&self, cycle: FetchCycle) -> Vec<JoinHandle<()>> {
        Slices::all()
            .each()
            .map(|slice| {
                let store = self.store.clone();
                let events = self.events.clone();
                let cycle = cycle.clone();

                tokio::spawn(async move {
                    if store.load(slice, &cycle).await {
                        // NB: the receiver only goes away on shutdown
                        let _ = events.send(InternalEvent::SliceUpdated(slice));
                    }
                })
            })
            .collect()
    }
}
