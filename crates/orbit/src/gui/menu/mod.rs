pub mod model;
pub mod view;

pub use model::{Body, Hit, Menu, Ring};
pub use view::draw;

pub const REFERENCE_HEIGHT: f64 = 1440.0;
pub const ICON_SIZE: i32 = 128;
pub const ICON_FILL: f64 = 0.55; // icon edge relative to ring thickness
pub const ICON_INACTIVE_ALPHA: f64 = 0.7;
pub const LABEL_FONT_SIZE: f64 = 13.0;

// Orbital scene, in world units
pub const ORBITAL_VIEWPORT_HEIGHT: f64 = 720.0;
pub const INNER_ORBIT_RADIUS: f64 = 8.0;
pub const OUTER_ORBIT_RADIUS: f64 = 13.0;
pub const PLANET_RADIUS: f64 = 1.5;
pub const SUN_RADIUS: f64 = 2.0;
pub const ORBIT_SEGMENTS: usize = 96;
