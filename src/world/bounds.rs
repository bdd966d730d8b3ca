//! Playfield boundaries derived from the visible area.

use bevy::prelude::*;

/// Screen-space limits of the playfield, in world units.
///
/// The raw edges clamp the player; the padded values place spawns above
/// the top edge and despawn lines below the bottom edge.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayfieldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub padded_min_x: f32,
    pub padded_max_x: f32,
    pub padded_min_y: f32,
    pub padded_max_y: f32,
}

impl PlayfieldBounds {
    /// Bounds for a view of `width` x `height` centred on the origin.
    pub fn from_extent(width: f32, height: f32, horizontal_padding: f32, vertical_padding: f32) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;

        Self {
            min_x: -half_w,
            max_x: half_w,
            min_y: -half_h,
            max_y: half_h,
            padded_min_x: -half_w + horizontal_padding,
            padded_max_x: half_w - horizontal_padding,
            padded_min_y: -half_h - vertical_padding,
            padded_max_y: half_h + vertical_padding,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Clamp a position to the raw screen edges.
    pub fn clamp(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            position.x.clamp(self.min_x, self.max_x),
            position.y.clamp(self.min_y, self.max_y),
        )
    }

    /// Whether a point has left the padded area entirely.
    pub fn is_outside_padded(&self, position: Vec2) -> bool {
        position.y > self.padded_max_y
            || position.y < self.padded_min_y
            || position.x < self.min_x - (self.max_x - self.padded_max_x)
            || position.x > self.max_x + (self.max_x - self.padded_max_x)
    }

    /// X coordinate `percent` of the way across the screen.
    pub fn x_at_percent(&self, percent: f32) -> f32 {
        self.min_x + self.width() * percent * 0.01
    }

    /// Y coordinate `percent` of the way up the screen.
    pub fn y_at_percent(&self, percent: f32) -> f32 {
        self.min_y + self.height() * percent * 0.01
    }
}

impl Default for PlayfieldBounds {
    fn default() -> Self {
        Self::from_extent(600.0, 900.0, 24.0, 120.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_bounds_extend_vertically_and_shrink_horizontally() {
        let bounds = PlayfieldBounds::from_extent(600.0, 900.0, 24.0, 120.0);

        assert_eq!(bounds.min_x, -300.0);
        assert_eq!(bounds.max_y, 450.0);
        assert_eq!(bounds.padded_min_x, -276.0);
        assert_eq!(bounds.padded_max_x, 276.0);
        assert_eq!(bounds.padded_max_y, 570.0);
        assert_eq!(bounds.padded_min_y, -570.0);
    }

    #[test]
    fn clamp_keeps_positions_on_screen() {
        let bounds = PlayfieldBounds::from_extent(600.0, 900.0, 24.0, 120.0);
        let clamped = bounds.clamp(Vec2::new(1000.0, -1000.0));
        assert_eq!(clamped, Vec2::new(300.0, -450.0));
    }

    #[test]
    fn percent_helpers_span_the_screen() {
        let bounds = PlayfieldBounds::from_extent(600.0, 900.0, 24.0, 120.0);
        assert_eq!(bounds.x_at_percent(25.0), -150.0);
        assert_eq!(bounds.y_at_percent(80.0), 270.0);
    }

    #[test]
    fn outside_padded_detects_escaped_projectiles() {
        let bounds = PlayfieldBounds::from_extent(600.0, 900.0, 24.0, 120.0);
        assert!(!bounds.is_outside_padded(Vec2::new(0.0, 500.0)));
        assert!(bounds.is_outside_padded(Vec2::new(0.0, 600.0)));
        assert!(bounds.is_outside_padded(Vec2::new(-400.0, 0.0)));
    }
}
