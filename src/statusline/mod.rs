//! Rendering core: snapshot in, one styled line out.

pub mod capability;
pub mod compose;
pub mod format;
pub mod icons;
pub mod sample;
pub mod snapshot;
pub mod style;
pub mod theme;
pub mod widgets;

pub use compose::{compose, RESET};
pub use snapshot::parse;
