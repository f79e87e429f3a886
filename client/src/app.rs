//! Top-level annotation controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AnnotationApp` owns one session: the logical [`AppState`], the diagram
//! renderer, the sync client, and the host's map surface and info panel.
//! Hosts feed it [`InputEvent`]s and await the returned persistence work;
//! every mutation that changes the point set is followed by a
//! persist-then-refresh cycle, and every refresh rebuilds the diagram layer
//! from scratch.
//!
//! DESIGN
//! ======
//! `dispatch` is synchronous and returns the follow-up [`Effect`]; `handle`
//! is the convenience that also awaits the sync. Hosts that want overlapping
//! cycles use `begin_persist` + [`SyncTicket::run`] + `apply_sync` directly;
//! `apply_sync` discards results from superseded tickets.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here fails loudly. A failed save keeps the last diagram on
//! screen; a failed fetch clears it. Both are logged and the session stays
//! interactive.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::rc::Rc;

use tracing::{debug, info, warn};
use wire::{Bounds, Category, LatLng, PointRecord};

use crate::consts::FIT_BOUNDS_PADDING;
use crate::input::{Command, InputController, InputEvent, Propagation, Translation};
use crate::palette::CategoryPalette;
use crate::render::DiagramRenderer;
use crate::selection::Shift;
use crate::state::AppState;
use crate::surface::{InfoPanel, MapSurface, MarkerStyle};
use crate::sync::{Backend, SyncClient, SyncOutcome, SyncTicket};

/// Follow-up work a dispatched event requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Idle,
    /// The point set changed: persist it, then refresh the diagram.
    PersistAndRefresh,
}

/// Result of [`AnnotationApp::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub propagation: Propagation,
    pub effect: Effect,
}

/// What a sync cycle did to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncReport {
    /// A new diagram layer with this many shapes is on the map.
    Rendered { shapes: usize },
    /// The backend had no diagram; the previous layer was removed.
    NoDiagram,
    /// Save failed; the previous diagram was left untouched.
    PersistFailed,
    /// Fetch failed; the previous layer was removed.
    FetchFailed,
    /// A newer cycle was issued; this result was discarded.
    Superseded,
}

pub struct AnnotationApp<M, P, B> {
    state: AppState,
    renderer: DiagramRenderer,
    input: InputController,
    sync: SyncClient<B>,
    surface: M,
    panel: P,
}

impl<M: MapSurface, P: InfoPanel, B: Backend> AnnotationApp<M, P, B> {
    #[must_use]
    pub fn new(surface: M, panel: P, backend: B) -> Self {
        Self::with_sync(surface, panel, SyncClient::new(backend), CategoryPalette::STANDARD)
    }

    #[must_use]
    pub fn with_sync(surface: M, panel: P, sync: SyncClient<B>, palette: CategoryPalette) -> Self {
        Self {
            state: AppState::new(palette),
            renderer: DiagramRenderer::new(palette),
            input: InputController,
            sync,
            surface,
            panel,
        }
    }

    // --- Startup ---

    /// Seed the initial points without persisting them and fit the view.
    pub fn seed(&mut self, initial: &[PointRecord]) {
        for record in initial {
            self.place_point(record.position(), record.category);
        }
        let positions = self.state.points().iter().map(|p| p.position);
        if let Some(bounds) = Bounds::from_positions(positions) {
            self.surface.fit_bounds(bounds.pad(FIT_BOUNDS_PADDING));
        }
        self.panel.set_point_count(self.state.points().count());
        info!(count = initial.len(), "seeded initial points");
    }

    /// Seed, then fetch the initial diagram once.
    pub async fn load(&mut self, initial: &[PointRecord]) -> SyncReport {
        self.seed(initial);
        self.refresh().await
    }

    // --- Input ---

    /// Apply one input event and report the follow-up work.
    pub fn dispatch(&mut self, event: &InputEvent) -> Dispatch {
        let Translation { command, propagation } = self.translate(event);
        let effect = match command {
            Command::AddPoint(position) => {
                self.add_point(position, None);
                Effect::PersistAndRefresh
            }
            Command::RemovePoint(id) => match self.state.points().index_of(id) {
                Some(index) if self.remove_point(index) => Effect::PersistAndRefresh,
                _ => {
                    debug!(id = id.raw(), "marker click for unknown point; ignoring");
                    Effect::Idle
                }
            },
            Command::Select(index) => {
                self.select(index);
                Effect::Idle
            }
            Command::Deselect => {
                self.deselect();
                Effect::Idle
            }
            Command::SetCategory(category) => {
                if self.categorize_selected(category) {
                    Effect::PersistAndRefresh
                } else {
                    Effect::Idle
                }
            }
            Command::Ignore => Effect::Idle,
        };
        Dispatch { propagation, effect }
    }

    /// Translate `event`, first mapping shape clicks to the point each cell
    /// stands for now.
    fn translate(&self, event: &InputEvent) -> Translation {
        let selection = self.state.selection();
        let InputEvent::ShapeClick { handler, modifiers, position } = event else {
            return self.input.translate(event, selection);
        };
        match self.renderer.resolve(*handler) {
            Some(live) => self.input.translate(
                &InputEvent::ShapeClick { handler: live, modifiers: *modifiers, position: *position },
                selection,
            ),
            None if modifiers.shift => {
                debug!(point_index = handler.point_index, "shift-click on a cell whose point is gone; ignoring");
                Translation { command: Command::Ignore, propagation: Propagation::Stop }
            }
            None => self.input.translate(event, selection),
        }
    }

    /// Dispatch an event and run any resulting persist-and-refresh cycle.
    pub async fn handle(&mut self, event: &InputEvent) -> Propagation {
        let dispatch = self.dispatch(event);
        if dispatch.effect == Effect::PersistAndRefresh {
            self.persist_and_refresh().await;
        }
        dispatch.propagation
    }

    // --- Operations ---

    /// Add a point and its marker. The caller owns the follow-up persist.
    pub fn add_point(&mut self, position: LatLng, category: Option<Category>) -> usize {
        let index = self.place_point(position, category);
        self.panel.set_point_count(self.state.points().count());
        index
    }

    /// Remove the point at `index`, its marker, and renormalize the selection.
    ///
    /// Returns `false` when `index` is out of range.
    pub fn remove_point(&mut self, index: usize) -> bool {
        let Some((point, shift)) = self.state.remove_point(index) else {
            debug!(index, "remove out of range; ignoring");
            return false;
        };
        self.surface.remove_marker(point.id);
        if shift == Shift::Cleared {
            self.renderer.unhighlight(&mut self.surface);
        }
        self.renderer.shift_down(index);
        self.panel.set_point_count(self.state.points().count());
        self.refresh_info();
        true
    }

    /// Select the cell for point `index` and restyle the visible shapes.
    pub fn select(&mut self, index: usize) {
        self.state.select(index);
        if self.renderer.highlight(&mut self.surface, index).is_none() {
            debug!(index, "selected point has no rendered cell");
        }
        self.refresh_info();
    }

    pub fn deselect(&mut self) {
        self.state.deselect();
        self.renderer.unhighlight(&mut self.surface);
        self.refresh_info();
    }

    /// Set `category` on the selected point. Returns whether a point changed.
    pub fn categorize_selected(&mut self, category: Category) -> bool {
        let changed = self.state.categorize_selected(category);
        self.refresh_info();
        changed.is_some()
    }

    fn place_point(&mut self, position: LatLng, category: Option<Category>) -> usize {
        let (index, id) = self.state.add_point(position, category);
        self.surface.add_marker(id, position, &MarkerStyle::default());
        self.surface.bring_marker_to_front(id);
        index
    }

    fn refresh_info(&mut self) {
        self.panel.show_selection(&self.state.selection_info());
    }

    // --- Sync ---

    /// Snapshot the point set into a new persist-then-refresh ticket.
    pub fn begin_persist(&mut self) -> SyncTicket {
        self.sync.persist(self.state.points().records())
    }

    /// Issue a fetch-only ticket.
    pub fn begin_refresh(&mut self) -> SyncTicket {
        self.sync.refresh()
    }

    /// Apply the outcome of a ticket, unless a newer ticket has been issued.
    pub fn apply_sync(&mut self, ticket: &SyncTicket, outcome: SyncOutcome) -> SyncReport {
        if !self.sync.is_current(ticket) {
            debug!(
                generation = ticket.generation(),
                latest = self.sync.latest_generation(),
                "discarding superseded sync result"
            );
            return SyncReport::Superseded;
        }

        let report = match outcome {
            SyncOutcome::PersistFailed(e) => {
                warn!(error = %e, "persist failed; keeping current diagram");
                return SyncReport::PersistFailed;
            }
            SyncOutcome::FetchFailed(e) => {
                warn!(error = %e, "diagram fetch failed; clearing diagram");
                self.renderer.teardown(&mut self.surface);
                SyncReport::FetchFailed
            }
            SyncOutcome::Diagram(diagram) => {
                let selection = self.state.selection().index();
                match self.renderer.render(&mut self.surface, diagram.as_ref(), selection) {
                    Some(summary) => SyncReport::Rendered { shapes: summary.shapes },
                    None => SyncReport::NoDiagram,
                }
            }
        };
        // Category data may have changed even when the selection did not.
        self.refresh_info();
        report
    }

    /// Persist the current point set, then refresh the diagram.
    pub async fn persist_and_refresh(&mut self) -> SyncReport {
        let ticket = self.begin_persist();
        self.run(ticket).await
    }

    /// Fetch and render the diagram without persisting.
    pub async fn refresh(&mut self) -> SyncReport {
        let ticket = self.begin_refresh();
        self.run(ticket).await
    }

    async fn run(&mut self, ticket: SyncTicket) -> SyncReport {
        let backend = self.sync.backend();
        let outcome = ticket.run(&*backend).await;
        self.apply_sync(&ticket, outcome)
    }

    // --- Accessors ---

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn renderer(&self) -> &DiagramRenderer {
        &self.renderer
    }

    #[must_use]
    pub fn surface(&self) -> &M {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut M {
        &mut self.surface
    }

    #[must_use]
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Shared backend handle for running tickets outside a borrow of the app.
    #[must_use]
    pub fn backend(&self) -> Rc<B> {
        self.sync.backend()
    }
}
