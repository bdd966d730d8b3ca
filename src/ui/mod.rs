//! UI module - menus, overlays and the in-game HUD.

mod hud;
mod plugin;

pub use hud::{HudField, HudRoot};
pub use plugin::UiPlugin;
