//! The editor facade: one session driving one synced scene.
//!
//! Input goes in, outbound requests come out. The caller owns transport
//! and hands each reply back through [`Editor::apply_reply`].

use crate::input::InputEvent;
use crate::remote::{RemoteRequest, Reply, SyncError, decode};
use crate::sync::SyncEngine;
use crate::tools::{EditorSession, Mode, SceneMutation, ToolbarAction};
use pn_core::{Direction, EditorConfig, NodeId, Point, transform_point};
use pn_render::{RenderSurface, render_document, resolve_target};

pub struct Editor<S: RenderSurface> {
    pub session: EditorSession,
    pub engine: SyncEngine<S>,
}

impl<S: RenderSurface> Editor<S> {
    pub fn new(surface: S, config: EditorConfig) -> Self {
        let mut engine = SyncEngine::new(surface, config.clone());
        let session = EditorSession::new(config);
        engine.set_view(&session.view);
        engine.surface.show_mode(session.mode.name());
        Self { session, engine }
    }

    /// Requests that populate the scene on mount. Nodes must land before
    /// edges, since an edge cannot be stored without both endpoints.
    pub fn initial_load() -> [RemoteRequest; 2] {
        [RemoteRequest::LoadNodes, RemoteRequest::LoadEdges]
    }

    pub fn mode(&self) -> Mode {
        self.session.mode
    }

    /// Pointer pressed at client `(x, y)` on an element whose `data-id`
    /// annotation is `annotation` (if any).
    pub fn pointer_down(&mut self, x: f64, y: f64, annotation: Option<&str>) -> Vec<RemoteRequest> {
        let hit = self.hit(x, y, annotation);
        log::trace!("down at ({x}, {y}) hit {hit:?} in {}", self.session.mode.name());
        self.handle(InputEvent::from_pointer_down(x, y), hit)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Vec<RemoteRequest> {
        self.handle(InputEvent::from_pointer_move(x, y), None)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> Vec<RemoteRequest> {
        self.handle(InputEvent::from_pointer_up(x, y), None)
    }

    pub fn pointer_leave(&mut self) -> Vec<RemoteRequest> {
        self.handle(InputEvent::PointerLeave, None)
    }

    pub fn wheel(&mut self, delta_y: f64) -> Vec<RemoteRequest> {
        self.handle(InputEvent::Wheel { delta_y }, None)
    }

    pub fn toolbar(&mut self, action: ToolbarAction) -> Vec<RemoteRequest> {
        let mutations = self.session.toolbar(action);
        self.dispatch(mutations)
    }

    /// Feed back the outcome of `request`. Failures are logged and dropped;
    /// nothing was applied before the round-trip, so nothing is rolled back.
    pub fn apply_reply(&mut self, request: &RemoteRequest, reply: Result<Reply, SyncError>) {
        match reply.and_then(|reply| decode(request, &reply)) {
            Ok(confirmed) => self.engine.apply_confirmed(confirmed),
            Err(e) => log::debug!("{} {} dropped: {e}", request.method().as_str(), request.path()),
        }
    }

    /// Standalone SVG of the current scene and view.
    pub fn export_svg(&self) -> String {
        render_document(&self.engine.scene, &self.session.view, &self.engine.config)
    }

    fn hit(&self, x: f64, y: f64, annotation: Option<&str>) -> Option<NodeId> {
        let graph_point = transform_point(
            &self.session.view,
            self.engine.surface.origin(),
            Point::new(x, y),
            Direction::ScreenToGraph,
        );
        resolve_target(
            &self.engine.scene,
            annotation,
            graph_point,
            self.engine.config.half_extent(),
        )
    }

    fn handle(&mut self, event: InputEvent, hit: Option<NodeId>) -> Vec<RemoteRequest> {
        let origin = self.engine.surface.origin();
        let mutations = self
            .session
            .handle(&event, hit, &self.engine.scene, origin);
        self.dispatch(mutations)
    }

    /// Apply local mutations now; pass requests through to the caller.
    fn dispatch(&mut self, mutations: Vec<SceneMutation>) -> Vec<RemoteRequest> {
        let mut requests = Vec::new();
        for mutation in mutations {
            match mutation {
                SceneMutation::MoveNode { id, position } => {
                    if let Err(e) = self.engine.move_node(id, position) {
                        log::debug!("drag skipped: {e}");
                    }
                }
                SceneMutation::View(view) => self.engine.set_view(&view),
                SceneMutation::Mode(mode) => self.engine.surface.show_mode(mode.name()),
                SceneMutation::Request(request) => requests.push(request),
            }
        }
        requests
    }
}
