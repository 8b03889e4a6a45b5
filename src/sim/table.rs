//! Table geometry
//!
//! An axis-aligned playing area bounded by four rails. Each rail may carry
//! pocket zones: intervals along the rail where a ball drops instead of
//! bouncing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::settings::TableSettings;

/// One of the four table edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rail {
    Top,
    Bottom,
    Left,
    Right,
}

/// Axis a pocket interval is measured along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Rail {
    pub const ALL: [Rail; 4] = [Rail::Top, Rail::Bottom, Rail::Left, Rail::Right];

    /// Axis that runs along this rail
    pub fn axis(self) -> Axis {
        match self {
            Rail::Top | Rail::Bottom => Axis::X,
            Rail::Left | Rail::Right => Axis::Y,
        }
    }

    /// Unit normal pointing from the rail into the table
    pub fn inward_normal(self) -> Vec2 {
        match self {
            Rail::Top => Vec2::Y,
            Rail::Bottom => Vec2::NEG_Y,
            Rail::Left => Vec2::X,
            Rail::Right => Vec2::NEG_X,
        }
    }

    pub fn is_side(self) -> bool {
        self.axis() == Axis::Y
    }
}

/// A pocket interval on a rail
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PocketZone {
    pub rail: Rail,
    pub start: f32,
    pub end: f32,
}

impl PocketZone {
    pub fn new(rail: Rail, start: f32, end: f32) -> Self {
        Self { rail, start, end }
    }

    pub fn axis(&self) -> Axis {
        self.rail.axis()
    }

    /// Inclusive on both ends
    #[inline]
    pub fn contains(&self, along: f32) -> bool {
        self.start <= along && along <= self.end
    }
}

/// Static table geometry, read-only once built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub top_y: f32,
    pub bottom_y: f32,
    pub left_x: f32,
    pub right_x: f32,
    pockets: Vec<PocketZone>,
    side_rail_pockets: bool,
}

impl Default for Table {
    fn default() -> Self {
        let settings = TableSettings::default();
        Self {
            top_y: settings.top_y,
            bottom_y: settings.bottom_y,
            left_x: settings.left_x,
            right_x: settings.right_x,
            pockets: standard_pockets(&settings),
            side_rail_pockets: settings.side_rail_pockets,
        }
    }
}

/// Corner pockets on every rail plus middle pockets on the long rails
fn standard_pockets(s: &TableSettings) -> Vec<PocketZone> {
    let w = s.corner_pocket_width;
    let mut pockets = Vec::with_capacity(10);
    for rail in [Rail::Top, Rail::Bottom] {
        pockets.push(PocketZone::new(rail, s.left_x, s.left_x + w));
        pockets.push(PocketZone::new(rail, s.middle_pocket_start, s.middle_pocket_end));
        pockets.push(PocketZone::new(rail, s.right_x - w, s.right_x));
    }
    for rail in [Rail::Left, Rail::Right] {
        pockets.push(PocketZone::new(rail, s.top_y, s.top_y + w));
        pockets.push(PocketZone::new(rail, s.bottom_y - w, s.bottom_y));
    }
    pockets
}

impl Table {
    /// Build a table, rejecting inverted bounds and misplaced or overlapping
    /// pocket zones.
    pub fn new(
        top_y: f32,
        bottom_y: f32,
        left_x: f32,
        right_x: f32,
        pockets: Vec<PocketZone>,
        side_rail_pockets: bool,
    ) -> Result<Self, ConfigError> {
        let bounds = [top_y, bottom_y, left_x, right_x];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid("table bounds must be finite".into()));
        }
        if top_y >= bottom_y || left_x >= right_x {
            return Err(ConfigError::Invalid(format!(
                "table bounds are inverted: top {top_y} bottom {bottom_y} left {left_x} right {right_x}"
            )));
        }

        let table = Self {
            top_y,
            bottom_y,
            left_x,
            right_x,
            pockets,
            side_rail_pockets,
        };

        for rail in Rail::ALL {
            let (lo, hi) = table.rail_extent(rail);
            let mut zones: Vec<PocketZone> = table.zones_on(rail).copied().collect();
            zones.sort_by(|a, b| a.start.total_cmp(&b.start));

            for zone in &zones {
                if !(zone.start < zone.end) {
                    return Err(ConfigError::Invalid(format!(
                        "empty pocket zone {:?} {}..{}",
                        rail, zone.start, zone.end
                    )));
                }
                if zone.start < lo || zone.end > hi {
                    return Err(ConfigError::Invalid(format!(
                        "pocket zone {:?} {}..{} lies outside rail {}..{}",
                        rail, zone.start, zone.end, lo, hi
                    )));
                }
            }
            for pair in zones.windows(2) {
                if pair[0].end >= pair[1].start {
                    return Err(ConfigError::Invalid(format!(
                        "pocket zones overlap on {:?} rail: {}..{} and {}..{}",
                        rail, pair[0].start, pair[0].end, pair[1].start, pair[1].end
                    )));
                }
            }
        }

        Ok(table)
    }

    pub fn from_settings(settings: &TableSettings) -> Result<Self, ConfigError> {
        Self::new(
            settings.top_y,
            settings.bottom_y,
            settings.left_x,
            settings.right_x,
            standard_pockets(settings),
            settings.side_rail_pockets,
        )
    }

    pub fn pockets(&self) -> &[PocketZone] {
        &self.pockets
    }

    pub fn zones_on(&self, rail: Rail) -> impl Iterator<Item = &PocketZone> + '_ {
        self.pockets.iter().filter(move |z| z.rail == rail)
    }

    /// Whether pocket zones on this rail swallow balls
    pub fn pockets_active(&self, rail: Rail) -> bool {
        !rail.is_side() || self.side_rail_pockets
    }

    /// Fixed coordinate of a rail (y for top/bottom, x for left/right)
    pub fn rail_coordinate(&self, rail: Rail) -> f32 {
        match rail {
            Rail::Top => self.top_y,
            Rail::Bottom => self.bottom_y,
            Rail::Left => self.left_x,
            Rail::Right => self.right_x,
        }
    }

    /// Range a rail spans along its own axis
    pub fn rail_extent(&self, rail: Rail) -> (f32, f32) {
        match rail.axis() {
            Axis::X => (self.left_x, self.right_x),
            Axis::Y => (self.top_y, self.bottom_y),
        }
    }

    /// Component of `pos` measured along the rail
    #[inline]
    pub fn along_rail(rail: Rail, pos: Vec2) -> f32 {
        match rail.axis() {
            Axis::X => pos.x,
            Axis::Y => pos.y,
        }
    }

    /// True if `pos` projects onto an active pocket zone of `rail`
    pub fn in_pocket(&self, rail: Rail, pos: Vec2) -> bool {
        if !self.pockets_active(rail) {
            return false;
        }
        let along = Self::along_rail(rail, pos);
        self.zones_on(rail).any(|z| z.contains(along))
    }

    /// Signed distance from `pos` to the rail, positive on the table side
    pub fn depth_from_rail(&self, rail: Rail, pos: Vec2) -> f32 {
        match rail {
            Rail::Top => pos.y - self.top_y,
            Rail::Bottom => self.bottom_y - pos.y,
            Rail::Left => pos.x - self.left_x,
            Rail::Right => self.right_x - pos.x,
        }
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.left_x && pos.x <= self.right_x && pos.y >= self.top_y && pos.y <= self.bottom_y
    }

    pub fn width(&self) -> f32 {
        self.right_x - self.left_x
    }

    pub fn height(&self) -> f32 {
        self.bottom_y - self.top_y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left_x + self.right_x) / 2.0,
            (self.top_y + self.bottom_y) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_layout() {
        let table = Table::default();
        assert_eq!(table.zones_on(Rail::Top).count(), 3);
        assert_eq!(table.zones_on(Rail::Bottom).count(), 3);
        assert_eq!(table.zones_on(Rail::Left).count(), 2);
        assert!(Table::from_settings(&TableSettings::default()).is_ok());
        assert_eq!(Table::from_settings(&TableSettings::default()).unwrap(), table);
    }

    #[test]
    fn test_in_pocket_top_rail() {
        let table = Table::default();
        assert!(table.in_pocket(Rail::Top, Vec2::new(750.0, 60.0)));
        assert!(table.in_pocket(Rail::Top, Vec2::new(60.0, 60.0)));
        assert!(table.in_pocket(Rail::Bottom, Vec2::new(1440.0, 760.0)));
        assert!(!table.in_pocket(Rail::Top, Vec2::new(400.0, 60.0)));
    }

    #[test]
    fn test_side_rail_pockets_gated() {
        let table = Table::default();
        assert!(!table.in_pocket(Rail::Left, Vec2::new(60.0, 60.0)));

        let settings = TableSettings {
            side_rail_pockets: true,
            ..Default::default()
        };
        let table = Table::from_settings(&settings).unwrap();
        assert!(table.in_pocket(Rail::Left, Vec2::new(60.0, 60.0)));
        assert!(!table.in_pocket(Rail::Left, Vec2::new(60.0, 400.0)));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        assert!(Table::new(100.0, 50.0, 0.0, 10.0, Vec::new(), false).is_err());
        assert!(Table::new(0.0, 10.0, 5.0, 5.0, Vec::new(), false).is_err());
        assert!(Table::new(f32::NAN, 10.0, 0.0, 10.0, Vec::new(), false).is_err());
    }

    #[test]
    fn test_rejects_bad_zones() {
        let overlapping = vec![
            PocketZone::new(Rail::Top, 0.0, 50.0),
            PocketZone::new(Rail::Top, 40.0, 80.0),
        ];
        assert!(Table::new(0.0, 100.0, 0.0, 200.0, overlapping, false).is_err());

        let outside = vec![PocketZone::new(Rail::Left, 90.0, 120.0)];
        assert!(Table::new(0.0, 100.0, 0.0, 200.0, outside, false).is_err());

        let empty = vec![PocketZone::new(Rail::Bottom, 30.0, 30.0)];
        assert!(Table::new(0.0, 100.0, 0.0, 200.0, empty, false).is_err());

        // Same interval on different rails is fine
        let ok = vec![
            PocketZone::new(Rail::Top, 0.0, 50.0),
            PocketZone::new(Rail::Bottom, 0.0, 50.0),
        ];
        assert!(Table::new(0.0, 100.0, 0.0, 200.0, ok, false).is_ok());
    }

    #[test]
    fn test_depth_from_rail() {
        let table = Table::default();
        let p = Vec2::new(100.0, 100.0);
        assert_eq!(table.depth_from_rail(Rail::Top, p), 43.0);
        assert_eq!(table.depth_from_rail(Rail::Left, p), 43.0);
        assert!(table.contains(p));
        assert!(!table.contains(Vec2::new(-100.0, -100.0)));
    }
}
