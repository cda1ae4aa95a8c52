//! Drag, resize and edge-navigation interaction.
//!
//! [`DragSession`] owns the session state; the other modules are the pieces it
//! is assembled from and are usable on their own.

pub mod apply;
pub mod edge;
pub mod geometry;
pub mod highlight;
pub mod notifier;
pub mod session;
pub mod timer;

pub use apply::{apply_drop, apply_range, apply_resize};
pub use edge::{EdgeNavigator, NavigationCallbacks, PageNavigator};
pub use geometry::{GridGeometry, UniformGridGeometry};
pub use highlight::{build_highlight_cells, column_at, drop_start_cell_index};
pub use notifier::{ChangeNotifier, ListenerId};
pub use session::{DragSession, DropValidator, ResizeValidator};
pub use timer::{DelayedTask, TimerHandle};
