// Month Grid Core Library
// Month-grid event layout and drag/resize interaction, independent of any UI toolkit

pub mod models;
pub mod services;
pub mod utils;

pub use models::event::{CalendarEvent, EventError, EventId};
pub use models::interaction::{DragSessionState, HighlightCellInfo, NavigationEdge, ResizeEdge};
pub use models::layout::{EventSegment, LayoutAssignment, WeekLayoutFrame};
pub use models::settings::{InteractionSettings, LayoutSettings, Settings};
pub use services::interaction::DragSession;
pub use services::layout::{MonthGrid, MonthLayout, RowPacker};
