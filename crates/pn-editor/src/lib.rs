pub mod editor;
pub mod input;
pub mod remote;
pub mod sync;
pub mod tools;

pub use editor::Editor;
pub use remote::{Confirmed, RemoteRequest, Reply, SyncError};
pub use sync::SyncEngine;
pub use tools::{DragState, EditorSession, Mode, SceneMutation, ToolbarAction};
