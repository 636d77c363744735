/// Typed point records shared by the loader, the placers and the exporter.
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Animation frame a point belongs to.
/// Tree, snow and ornaments are always shown; each light blinks in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FrameTag {
    Always = 0,
    First = 1,
    Second = 2,
}

impl FrameTag {
    /// Whether a point with this tag is drawn in exported frame `frame` (0 or 1).
    pub fn visible_in(self, frame: usize) -> bool {
        match self {
            FrameTag::Always => true,
            FrameTag::First => frame == 0,
            FrameTag::Second => frame == 1,
        }
    }
}

/// Single coloured point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: DVec3,
    pub colour: [u8; 3],
    pub frame: FrameTag,
}

impl Point {
    pub fn new(position: DVec3, colour: [u8; 3]) -> Self {
        Self {
            position,
            colour,
            frame: FrameTag::Always,
        }
    }

    pub fn with_frame(mut self, frame: FrameTag) -> Self {
        self.frame = frame;
        self
    }
}

/// Centre, colour and frame of one stamped ornament or light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub centre: DVec3,
    pub colour: [u8; 3],
    pub frame: FrameTag,
}

/// Point cloud as loaded from disk.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    pub points: Vec<Point>,
    /// True when the source file carried colour channels.
    pub has_colour: bool,
}

impl PointCloud {
    pub fn new(points: Vec<Point>, has_colour: bool) -> Self {
        Self { points, has_colour }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Overwrite every point's colour, used for the bark-brown repaint.
    pub fn paint(&mut self, colour: [u8; 3]) {
        for point in &mut self.points {
            point.colour = colour;
        }
        self.has_colour = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_visibility() {
        assert!(FrameTag::Always.visible_in(0));
        assert!(FrameTag::Always.visible_in(1));
        assert!(FrameTag::First.visible_in(0));
        assert!(!FrameTag::First.visible_in(1));
        assert!(!FrameTag::Second.visible_in(0));
        assert!(FrameTag::Second.visible_in(1));
    }

    #[test]
    fn test_paint_marks_colour() {
        let mut cloud = PointCloud::new(vec![Point::new(DVec3::ZERO, [1, 2, 3])], false);
        cloud.paint([160, 82, 45]);
        assert!(cloud.has_colour);
        assert_eq!(cloud.points[0].colour, [160, 82, 45]);
    }
}
