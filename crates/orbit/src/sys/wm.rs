use derive_more::{AsRef, Deref, Display, From, Into};
use hyprland::data::{CursorPosition, Monitors};
use hyprland::prelude::*;
use orbit_core::Point;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct MonitorName(String);

orbit_core::impl_string_newtype!(MonitorName);

pub fn get_active_monitor() -> Option<MonitorName> {
    Monitors::get()
        .ok()?
        .into_iter()
        .find(|m| m.focused)
        .map(|m| MonitorName(m.name))
}

/// Cursor position relative to the focused monitor, for when GTK has no
/// pointer position yet (the overlay was just mapped).
pub fn get_cursor_pos_on_active_monitor() -> Option<Point> {
    let cursor = CursorPosition::get().ok()?;
    let focused = Monitors::get().ok()?.into_iter().find(|m| m.focused)?;

    Some(Point::new(
        cursor.x as f64 - focused.x as f64,
        cursor.y as f64 - focused.y as f64,
    ))
}
