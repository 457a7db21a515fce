//! Exports [`Rect`].
use bytemuck::{Pod, Zeroable};

/// Integer rectangle, laid out like the `int[4]` GL takes for
/// viewports and scissor boxes.
///
/// Width and height may be zero or negative; such a rect is empty.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rect {
    values: [i32; 4],
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            values: [x, y, width, height],
        }
    }

    /// A rect at the origin.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub const fn x(&self) -> i32 {
        self.values[0]
    }
    #[inline]
    pub const fn y(&self) -> i32 {
        self.values[1]
    }
    #[inline]
    pub const fn width(&self) -> i32 {
        self.values[2]
    }
    #[inline]
    pub const fn height(&self) -> i32 {
        self.values[3]
    }

    #[inline]
    pub fn set_x(&mut self, value: i32) {
        self.values[0] = value;
    }
    #[inline]
    pub fn set_y(&mut self, value: i32) {
        self.values[1] = value;
    }
    #[inline]
    pub fn set_width(&mut self, value: i32) {
        self.values[2] = value;
    }
    #[inline]
    pub fn set_height(&mut self, value: i32) {
        self.values[3] = value;
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// `width / height`, or `0.0` when the height is zero.
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        if self.height() != 0 {
            self.width() as f32 / self.height() as f32
        } else {
            0.0
        }
    }

    /// `x + width / 2`, saturating at the `i32` bounds.
    #[inline]
    pub const fn center_x(&self) -> i32 {
        self.x().saturating_add(self.width() / 2)
    }
    /// `y + height / 2`, saturating at the `i32` bounds.
    #[inline]
    pub const fn center_y(&self) -> i32 {
        self.y().saturating_add(self.height() / 2)
    }

    /// `[x, y, width, height]`.
    #[inline]
    pub const fn as_array(&self) -> &[i32; 4] {
        &self.values
    }
    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [i32; 4] {
        &mut self.values
    }
}

impl From<[i32; 4]> for Rect {
    fn from(values: [i32; 4]) -> Self {
        Self { values }
    }
}

impl From<Rect> for [i32; 4] {
    fn from(rect: Rect) -> Self {
        rect.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_size_as_four_ints() {
        assert_eq!(size_of::<Rect>(), size_of::<i32>() * 4);
    }

    #[test]
    fn from_size_is_at_origin() {
        for (w, h) in [(0, 0), (640, 480), (-3, 7), (i32::MAX, i32::MIN)] {
            let rect = Rect::from_size(w, h);
            assert_eq!((rect.x(), rect.y()), (0, 0));
            assert_eq!((rect.width(), rect.height()), (w, h));
        }
    }

    #[test]
    fn empty_iff_non_positive_dimension() {
        assert!(!Rect::new(5, 5, 1, 1).is_empty());
        assert!(Rect::new(5, 5, 0, 1).is_empty());
        assert!(Rect::new(5, 5, 1, 0).is_empty());
        assert!(Rect::new(5, 5, -1, 10).is_empty());
        assert!(Rect::new(5, 5, 10, -1).is_empty());
        assert!(Rect::default().is_empty());
    }

    #[test]
    fn aspect_ratio_of_zero_height_is_zero() {
        assert_eq!(Rect::from_size(100, 0).aspect_ratio(), 0.0);
        assert_eq!(Rect::from_size(0, 0).aspect_ratio(), 0.0);
        assert_eq!(Rect::from_size(1920, 1080).aspect_ratio(), 1920.0 / 1080.0);
        assert_eq!(Rect::from_size(-4, 2).aspect_ratio(), -2.0);
    }

    #[test]
    fn center_uses_integer_division() {
        let rect = Rect::new(10, 20, 5, 7);
        assert_eq!(rect.center_x(), 12);
        assert_eq!(rect.center_y(), 23);
    }

    #[test]
    fn center_saturates_at_the_edges() {
        let rect = Rect::new(i32::MAX - 1, i32::MIN + 1, 10, -10);
        assert_eq!(rect.center_x(), i32::MAX);
        assert_eq!(rect.center_y(), i32::MIN);
        assert_eq!(Rect::new(-4, 0, i32::MAX, 0).center_x(), i32::MAX / 2 - 4);
    }

    #[test]
    fn setters_write_the_right_slot() {
        let mut rect = Rect::default();
        rect.set_x(1);
        rect.set_y(2);
        rect.set_width(3);
        rect.set_height(4);
        assert_eq!(rect.as_array(), &[1, 2, 3, 4]);
        rect.as_mut_array()[2] = 30;
        assert_eq!(rect, Rect::from([1, 2, 30, 4]));
        assert_eq!(<[i32; 4]>::from(rect), [1, 2, 30, 4]);
    }
}
