// Terminal frontend: rendering surface and user controls for the game core.

pub mod controls;
pub mod view;

pub use controls::Command;
pub use view::{BoardView, CellPosition};
