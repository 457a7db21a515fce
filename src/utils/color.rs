//! Exports [`ColorRgba`].
use bytemuck::{Pod, Zeroable};

/// RGBA color with `f32` components, laid out like `float[4]`.
///
/// Components are expected in `[0, 1]` but this is not enforced; see
/// [`is_normalized`](Self::is_normalized) and [`normalize`](Self::normalize).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorRgba {
    values: [f32; 4],
}

impl Default for ColorRgba {
    /// Opaque white.
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            values: [r, g, b, a],
        }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Color from 8-bit channels.
    pub fn from_uints(r: u8, g: u8, b: u8, a: u8) -> Self {
        const SCALE: f32 = 1.0 / 255.0;
        Self::new(
            SCALE * f32::from(r),
            SCALE * f32::from(g),
            SCALE * f32::from(b),
            SCALE * f32::from(a),
        )
    }

    /// Color from a packed `u32` whose bytes, in memory order, are R, G, B, A.
    pub fn from_uint(color: u32) -> Self {
        let [r, g, b, a] = color.to_ne_bytes();
        Self::from_uints(r, g, b, a)
    }

    /// Same RGB, different alpha.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r(), self.g(), self.b(), a)
    }

    #[inline]
    pub const fn r(&self) -> f32 {
        self.values[0]
    }
    #[inline]
    pub const fn g(&self) -> f32 {
        self.values[1]
    }
    #[inline]
    pub const fn b(&self) -> f32 {
        self.values[2]
    }
    #[inline]
    pub const fn a(&self) -> f32 {
        self.values[3]
    }

    #[inline]
    pub fn set_r(&mut self, value: f32) {
        self.values[0] = value;
    }
    #[inline]
    pub fn set_g(&mut self, value: f32) {
        self.values[1] = value;
    }
    #[inline]
    pub fn set_b(&mut self, value: f32) {
        self.values[2] = value;
    }
    #[inline]
    pub fn set_a(&mut self, value: f32) {
        self.values[3] = value;
    }

    pub fn is_transparent(&self) -> bool {
        self.a() <= 0.0
    }

    pub fn is_semi_transparent(&self) -> bool {
        self.a() > 0.0 && self.a() < 1.0
    }

    pub fn is_opaque(&self) -> bool {
        self.a() >= 1.0
    }

    pub fn is_same_rgb(&self, other: &Self) -> bool {
        self.values[..3] == other.values[..3]
    }

    /// Every component is in `[0, 1]`. NaN components are not.
    pub fn is_normalized(&self) -> bool {
        self.values.iter().all(|c| (0.0..=1.0).contains(c))
    }

    /// Clamp each component to `[0, 1]`, turning NaN into `0`.
    pub fn normalize(&mut self) {
        for component in &mut self.values {
            if component.is_nan() || *component < 0.0 {
                *component = 0.0;
            } else if *component > 1.0 {
                *component = 1.0;
            }
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// 8-bit channels of the normalized color, truncated.
    pub fn as_uints(&self) -> [u8; 4] {
        self.normalized().values.map(|c| (c * 255.0) as u8)
    }

    /// Inverse of [`from_uint`](Self::from_uint).
    pub fn as_uint(&self) -> u32 {
        u32::from_ne_bytes(self.as_uints())
    }

    /// `[r, g, b, a]`.
    #[inline]
    pub const fn as_array(&self) -> &[f32; 4] {
        &self.values
    }
    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [f32; 4] {
        &mut self.values
    }
}

impl From<[f32; 4]> for ColorRgba {
    fn from(values: [f32; 4]) -> Self {
        Self { values }
    }
}

impl From<ColorRgba> for [f32; 4] {
    fn from(color: ColorRgba) -> Self {
        color.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_opaque_white() {
        let color = ColorRgba::default();
        assert_eq!(color, ColorRgba::new(1.0, 1.0, 1.0, 1.0));
        assert!(color.is_opaque());
    }

    #[test]
    fn same_size_as_four_floats() {
        assert_eq!(size_of::<ColorRgba>(), size_of::<f32>() * 4);
    }

    #[test]
    fn from_uints_hits_exact_bounds() {
        assert_eq!(
            ColorRgba::from_uints(255, 0, 255, 0),
            ColorRgba::new(1.0, 0.0, 1.0, 0.0)
        );
    }

    #[test]
    fn normalize_clamps_each_component() {
        let mut color = ColorRgba::new(f32::NAN, -0.5, 7.0, 0.25);
        assert!(!color.is_normalized());
        color.normalize();
        assert_eq!(color, ColorRgba::new(0.0, 0.0, 1.0, 0.25));
        assert!(color.is_normalized());
    }

    #[test]
    fn normalized_leaves_valid_colors_alone() {
        let color = ColorRgba::new(0.0, 0.3, 1.0, 0.999);
        assert!(color.is_normalized());
        assert_eq!(color.normalized(), color);
    }

    #[test]
    fn alpha_classes() {
        assert!(ColorRgba::transparent().is_transparent());
        assert!(ColorRgba::rgb(0.1, 0.2, 0.3).with_alpha(0.5).is_semi_transparent());
        assert!(!ColorRgba::rgb(0.1, 0.2, 0.3).is_semi_transparent());
        assert!(ColorRgba::new(0.0, 0.0, 0.0, 2.0).is_opaque());
    }

    #[test]
    fn same_rgb_ignores_alpha() {
        let a = ColorRgba::new(0.1, 0.2, 0.3, 1.0);
        assert!(a.is_same_rgb(&a.with_alpha(0.0)));
        assert!(!a.is_same_rgb(&ColorRgba::new(0.1, 0.2, 0.4, 1.0)));
    }

    #[test]
    fn as_uints_clamps_first() {
        let color = ColorRgba::new(2.0, -1.0, f32::NAN, 1.0);
        assert_eq!(color.as_uints(), [255, 0, 0, 255]);
    }

    #[test]
    fn packed_round_trip_on_boundary_bytes() {
        for bits in 0u32..16 {
            let bytes = [0, 1, 2, 3].map(|i| if bits & (1 << i) != 0 { 255 } else { 0 });
            let packed = u32::from_ne_bytes(bytes);
            assert_eq!(ColorRgba::from_uint(packed).as_uint(), packed, "{bytes:?}");
        }
    }

    #[test]
    fn packed_round_trip_on_every_channel_value() {
        for value in 0..=255u8 {
            let packed = u32::from_ne_bytes([value, 255 - value, value / 2, 255]);
            assert_eq!(ColorRgba::from_uint(packed).as_uint(), packed);
        }
    }

    #[test]
    fn from_uint_reads_memory_order() {
        let packed = u32::from_ne_bytes([255, 0, 0, 255]);
        assert_eq!(ColorRgba::from_uint(packed), ColorRgba::rgb(1.0, 0.0, 0.0));
    }
}
