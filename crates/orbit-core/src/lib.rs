pub mod disclosure;
pub mod icon;
pub mod ipc;
pub mod item;
pub mod launch;
pub mod macros;
pub mod orbit;
pub mod polar;
pub mod presentation;

pub use disclosure::{Disclosure, DisclosureState, Effect, Intent, Transition};
pub use item::{ItemId, Label, LinkTarget, MenuItem};
pub use polar::{Point, RingLayout, SectorPath, SectorSpan};
pub use presentation::Presentation;
