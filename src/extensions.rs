use embedded_graphics::prelude::{Point, Size};

use crate::geometry::Geometry;
use crate::point::TouchPoint;

impl From<TouchPoint> for Point {
    fn from(value: TouchPoint) -> Self {
        Point::new(value.x() as i32, value.y() as i32)
    }
}

impl Geometry {
    /// Effective panel size for the current rotation
    pub fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}
