//! Vector and matrix primitives for the camera and pose algebra.
//!
//! The scene works on `glam::Vec4` homogeneous coordinates and column-major
//! `glam::Mat4` matrices. Composition reads right to left: in `a * b * v`,
//! `b` is applied to `v` first.
//!
//! The camera only ever builds pure translations, pure axis scales, quarter
//! turns and products of those, so [`Mat4Ext::inv`] uses the closed form for
//! scale-plus-translation matrices and only falls back to a general inverse
//! for rotated poses.

pub use glam::{Mat4, Vec4};

/// Matrix whose action on homogeneous coordinates adds `v.x`, `v.y`, `v.z`.
pub fn translation(v: Vec4) -> Mat4 {
    Mat4::from_translation(v.truncate())
}

/// Diagonal matrix with `v` on the diagonal.
pub fn scale(v: Vec4) -> Mat4 {
    Mat4::from_diagonal(v)
}

/// Symmetric orthographic projection.
///
/// Maps `[-half_width, half_width]` and `[-half_height, half_height]` onto
/// `[-1, 1]`, and the depth range `[near, far]` onto `[-1, 1]`.
pub fn ortho(half_width: f32, half_height: f32, near: f32, far: f32) -> Mat4 {
    let depth = far - near;
    Mat4::from_cols(
        Vec4::new(1.0 / half_width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0 / half_height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, -2.0 / depth, 0.0),
        Vec4::new(0.0, 0.0, -(far + near) / depth, 1.0),
    )
}

/// Counter-clockwise rotation about z by `turns` quarter turns.
///
/// Built from exact 0/±1 entries so that rotated extents stay integral.
pub fn quarter_turn(turns: i32) -> Mat4 {
    let (x_axis, y_axis) = match turns.rem_euclid(4) {
        0 => (Vec4::X, Vec4::Y),
        1 => (Vec4::Y, -Vec4::X),
        2 => (-Vec4::X, -Vec4::Y),
        _ => (-Vec4::Y, Vec4::X),
    };
    Mat4::from_cols(x_axis, y_axis, Vec4::Z, Vec4::W)
}

/// Row/column access and the restricted inverse used by the camera.
pub trait Mat4Ext {
    /// Element at `(row, col)`.
    fn at(&self, row: usize, col: usize) -> f32;

    /// Overwrite the element at `(row, col)`.
    fn set_at(&mut self, row: usize, col: usize, value: f32);

    /// Whether the matrix is an axis scale followed by a translation.
    fn is_scale_translation(&self) -> bool;

    /// Inverse of the matrix. The caller guarantees invertibility.
    fn inv(&self) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn at(&self, row: usize, col: usize) -> f32 {
        self.col(col)[row]
    }

    fn set_at(&mut self, row: usize, col: usize, value: f32) {
        self.col_mut(col)[row] = value;
    }

    fn is_scale_translation(&self) -> bool {
        let (x, y, z, w) = (self.x_axis, self.y_axis, self.z_axis, self.w_axis);
        x.y == 0.0
            && x.z == 0.0
            && x.w == 0.0
            && y.x == 0.0
            && y.z == 0.0
            && y.w == 0.0
            && z.x == 0.0
            && z.y == 0.0
            && z.w == 0.0
            && w.w == 1.0
    }

    fn inv(&self) -> Mat4 {
        if !self.is_scale_translation() {
            return self.inverse();
        }

        let inv_scale = Vec4::new(
            1.0 / self.x_axis.x,
            1.0 / self.y_axis.y,
            1.0 / self.z_axis.z,
            1.0,
        );
        let t = self.w_axis;
        Mat4::from_cols(
            Vec4::new(inv_scale.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, inv_scale.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, inv_scale.z, 0.0),
            Vec4::new(-t.x * inv_scale.x, -t.y * inv_scale.y, -t.z * inv_scale.z, 1.0),
        )
    }
}
