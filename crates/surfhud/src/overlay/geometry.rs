/// Screen-space point in window client coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Decode the packed client coordinates of a mouse message.
    ///
    /// Both halves are signed 16-bit values; coordinates left of or above a
    /// monitor's origin are negative.
    pub fn from_lparam(lparam: isize) -> Self {
        let x = (lparam & 0xFFFF) as u16 as i16;
        let y = ((lparam >> 16) & 0xFFFF) as u16 as i16;
        Self::new(i32::from(x), i32::from(y))
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(origin: Point, width: i32, height: i32) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Hit test, inclusive of the right and bottom edges
    pub fn contains(&self, p: Point) -> bool {
        (self.x..=self.right()).contains(&p.x) && (self.y..=self.bottom()).contains(&p.y)
    }
}

/// 24-bit colour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Pack as a GDI `COLORREF` (0x00BBGGRR)
    pub fn to_colorref(self) -> u32 {
        u32::from(self.0) | (u32::from(self.1) << 8) | (u32::from(self.2) << 16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lparam_positive() {
        let lparam = (400isize << 16) | 120;
        assert_eq!(Point::from_lparam(lparam), Point::new(120, 400));
    }

    #[test]
    fn test_from_lparam_negative() {
        // x = -5, y = -1
        let lparam = (0xFFFFisize << 16) | 0xFFFB;
        assert_eq!(Point::from_lparam(lparam), Point::new(-5, -1));
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(100, 400, 240, 72);
        assert!(rect.contains(Point::new(100, 400)));
        assert!(rect.contains(Point::new(340, 472)));
        assert!(!rect.contains(Point::new(341, 472)));
        assert!(!rect.contains(Point::new(99, 410)));
    }

    #[test]
    fn test_colorref_layout() {
        assert_eq!(Rgb(0x11, 0x22, 0x33).to_colorref(), 0x0033_2211);
        assert_eq!(Rgb::BLACK.to_colorref(), 0);
    }
}
