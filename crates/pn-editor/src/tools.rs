//! Interaction state machine.
//!
//! The session reads normalized input plus the node under the pointer and
//! decides which editing intent it is: move a node, pan or zoom the view,
//! create a node, connect two nodes, or delete one. It returns
//! `SceneMutation`s for the `SyncEngine` to apply; it never touches the
//! display or the network itself.
//!
//! | Mode    | Pointer down on node     | Pointer down on canvas | Move / up          |
//! |---------|--------------------------|------------------------|--------------------|
//! | Drag    | start node drag          | start pan              | drag / finish      |
//! | Create  | create armed type here   | create armed type here | —                  |
//! | Connect | pick first / connect     | —                      | —                  |
//! | Delete  | delete node              | —                      | —                  |
//!
//! Wheel zoom works in every mode.

use crate::input::InputEvent;
use crate::remote::RemoteRequest;
use pn_core::{
    Direction, EditorConfig, NodeId, NodeType, Point, Position, SceneStore, Vec2, ViewTransform,
    transform_point,
};

/// Top-level mode, switched only by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Drag,
    Create,
    Connect,
    Delete,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Drag => "drag",
            Mode::Create => "create",
            Mode::Connect => "connect",
            Mode::Delete => "delete",
        }
    }
}

/// What a press in Drag mode grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    None,
    DraggingNode,
    DraggingGraph,
}

/// Toolbar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    CreatePlace,
    CreateTransition,
    Connect,
    Delete,
    Clear,
}

impl ToolbarAction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "create-place" => Some(Self::CreatePlace),
            "create-transition" => Some(Self::CreateTransition),
            "connect" => Some(Self::Connect),
            "delete" => Some(Self::Delete),
            "clear" => Some(Self::Clear),
            _ => None,
        }
    }
}

/// A change the session wants applied.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneMutation {
    /// Local-only node move during a drag.
    MoveNode { id: NodeId, position: Position },
    /// The view transform changed; re-apply it to the graph group.
    View(ViewTransform),
    /// The mode changed; refresh the status display.
    Mode(Mode),
    /// Ask the store; the scene changes only once it confirms.
    Request(RemoteRequest),
}

/// All interaction state for one editing session.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub mode: Mode,
    pub drag_state: DragState,
    /// Node grabbed for a drag, or first pick of a pending connect.
    pub selected: Option<NodeId>,
    /// Node type the next Create click will request.
    pub armed: NodeType,
    pub view: ViewTransform,
    pub config: EditorConfig,
    /// Pointer minus node origin, screen space, while dragging a node.
    grab_offset: Vec2,
    /// Last pointer position while panning.
    last_pointer: Point,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            mode: Mode::Drag,
            drag_state: DragState::None,
            selected: None,
            armed: NodeType::Place,
            view: ViewTransform::default(),
            config,
            grab_offset: Vec2::ZERO,
            last_pointer: Point::ZERO,
        }
    }

    /// Switch mode. Always drops the selection and any drag in progress.
    pub fn set_mode(&mut self, mode: Mode) -> SceneMutation {
        log::debug!("mode {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
        self.selected = None;
        self.drag_state = DragState::None;
        SceneMutation::Mode(mode)
    }

    pub fn toolbar(&mut self, action: ToolbarAction) -> Vec<SceneMutation> {
        match action {
            ToolbarAction::CreatePlace => {
                let m = self.set_mode(Mode::Create);
                self.armed = NodeType::Place;
                vec![m]
            }
            ToolbarAction::CreateTransition => {
                let m = self.set_mode(Mode::Create);
                self.armed = NodeType::Transition;
                vec![m]
            }
            ToolbarAction::Connect => vec![self.set_mode(Mode::Connect)],
            ToolbarAction::Delete => vec![self.set_mode(Mode::Delete)],
            ToolbarAction::Clear => vec![SceneMutation::Request(RemoteRequest::Clear)],
        }
    }

    /// Handle one input event. `hit` is the node under the pointer, if any;
    /// `origin` is the surface's client offset (`None` when detached).
    pub fn handle(
        &mut self,
        event: &InputEvent,
        hit: Option<NodeId>,
        scene: &SceneStore,
        origin: Option<Vec2>,
    ) -> Vec<SceneMutation> {
        if let InputEvent::Wheel { delta_y } = event {
            self.view.zoom_by_wheel(*delta_y, &self.config);
            return vec![SceneMutation::View(self.view)];
        }
        match self.mode {
            Mode::Drag => self.handle_drag(event, hit, scene, origin),
            Mode::Create => self.handle_create(event, origin),
            Mode::Connect => self.handle_connect(event, hit),
            Mode::Delete => self.handle_delete(event, hit),
        }
    }

    fn to_graph(&self, p: Point, origin: Option<Vec2>) -> Point {
        transform_point(&self.view, origin, p, Direction::ScreenToGraph)
    }

    fn to_screen(&self, p: Point, origin: Option<Vec2>) -> Point {
        transform_point(&self.view, origin, p, Direction::GraphToScreen)
    }

    // ─── Drag ────────────────────────────────────────────────────────────

    fn handle_drag(
        &mut self,
        event: &InputEvent,
        hit: Option<NodeId>,
        scene: &SceneStore,
        origin: Option<Vec2>,
    ) -> Vec<SceneMutation> {
        match *event {
            InputEvent::PointerDown { x, y } => {
                let pointer = Point::new(x, y);
                match hit.and_then(|id| scene.node_by_id(id)) {
                    Some(node) => {
                        let node_screen = self.to_screen(node.position.into(), origin);
                        self.selected = Some(node.id);
                        self.grab_offset = pointer - node_screen;
                        self.drag_state = DragState::DraggingNode;
                    }
                    None => {
                        self.selected = None;
                        self.last_pointer = pointer;
                        self.drag_state = DragState::DraggingGraph;
                    }
                }
                vec![]
            }
            InputEvent::PointerMove { x, y } => {
                let pointer = Point::new(x, y);
                match (self.drag_state, self.selected) {
                    (DragState::DraggingNode, Some(id)) => {
                        let position = self.to_graph(pointer - self.grab_offset, origin);
                        vec![SceneMutation::MoveNode {
                            id,
                            position: position.into(),
                        }]
                    }
                    (DragState::DraggingGraph, _) => {
                        self.view.pan_by(pointer - self.last_pointer);
                        self.last_pointer = pointer;
                        vec![SceneMutation::View(self.view)]
                    }
                    _ => vec![],
                }
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => {
                let finished = match (self.drag_state, self.selected) {
                    (DragState::DraggingNode, Some(id)) => scene.node_by_id(id).map(|node| {
                        let (x, y) = node.position.rounded();
                        SceneMutation::Request(RemoteRequest::Move { id, x, y })
                    }),
                    _ => None,
                };
                if self.drag_state == DragState::DraggingNode {
                    self.selected = None;
                }
                self.drag_state = DragState::None;
                finished.into_iter().collect()
            }
            InputEvent::Wheel { .. } => vec![],
        }
    }

    // ─── Create ──────────────────────────────────────────────────────────

    fn handle_create(&mut self, event: &InputEvent, origin: Option<Vec2>) -> Vec<SceneMutation> {
        let InputEvent::PointerDown { x, y } = *event else {
            return vec![];
        };
        let position = self.to_graph(Point::new(x, y), origin).into();
        let request = RemoteRequest::Create {
            position,
            node_type: self.armed,
        };
        vec![SceneMutation::Request(request), self.set_mode(Mode::Drag)]
    }

    // ─── Connect ─────────────────────────────────────────────────────────

    fn handle_connect(&mut self, event: &InputEvent, hit: Option<NodeId>) -> Vec<SceneMutation> {
        let (InputEvent::PointerDown { .. }, Some(clicked)) = (event, hit) else {
            return vec![];
        };
        match self.selected {
            None => {
                self.selected = Some(clicked);
                vec![]
            }
            Some(start) if start == clicked => vec![],
            Some(start) => {
                let request = RemoteRequest::Connect {
                    start,
                    end: clicked,
                };
                vec![SceneMutation::Request(request), self.set_mode(Mode::Drag)]
            }
        }
    }

    // ─── Delete ──────────────────────────────────────────────────────────

    fn handle_delete(&mut self, event: &InputEvent, hit: Option<NodeId>) -> Vec<SceneMutation> {
        let (InputEvent::PointerDown { .. }, Some(id)) = (event, hit) else {
            return vec![];
        };
        vec![
            SceneMutation::Request(RemoteRequest::Delete { id }),
            self.set_mode(Mode::Drag),
        ]
    }
}
