//! Column-major 4x4 matrix algebra.
//!
//! Matrices are stored in OpenGL order: 16 scalars, column-major, so element
//! `(row, col)` lives at `data[col * 4 + row]`:
//!
//! ```text
//! data[0]  data[4]  data[8]   data[12]
//! data[1]  data[5]  data[9]   data[13]
//! data[2]  data[6]  data[10]  data[14]
//! data[3]  data[7]  data[11]  data[15]
//! ```
//!
//! Vectors are treated as 4x1 column vectors and multiply on the right.

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat3, Quat, Vec3, Vec4};

use crate::error::{Error, Result};

const ROW_SIZE: usize = 4;
const SIZE: usize = 16;

/// A column-major 4x4 real matrix.
///
/// Value type: copied by value, no heap allocation. "Affine" (bottom row
/// `[0, 0, 0, 1]`) is a derived property reported by [`Matrix4x4::is_affine`],
/// checked where required but never enforced.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Matrix4x4 {
    data: [f32; SIZE],
}

/// The result of [`Matrix4x4::decompose`].
///
/// `shear` holds the off-diagonal components of the upper-triangular factor
/// (xy, xz, yz). [`Matrix4x4::compose`] does not consume it, so a matrix with
/// shear does not round-trip through decompose/compose.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Decomposed {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub shear: Vec3,
}

impl Matrix4x4 {
    pub const IDENTITY: Matrix4x4 = Matrix4x4 {
        data: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub fn from_array(data: [f32; SIZE]) -> Matrix4x4 {
        Matrix4x4 { data }
    }

    /// Raw column-major storage.
    pub fn as_slice(&self) -> &[f32; SIZE] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[col * ROW_SIZE + row]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[col * ROW_SIZE + row] = value;
    }

    pub fn set_identity(&mut self) {
        *self = Matrix4x4::IDENTITY;
    }

    /// Reads the upper 3x3 column `col` as a vector.
    fn column3(&self, col: usize) -> Vec3 {
        let base = col * ROW_SIZE;
        Vec3::new(self.data[base], self.data[base + 1], self.data[base + 2])
    }

    fn set_column3(&mut self, col: usize, v: Vec3) {
        let base = col * ROW_SIZE;
        self.data[base] = v.x;
        self.data[base + 1] = v.y;
        self.data[base + 2] = v.z;
    }

    /// True when the bottom row is exactly `[0, 0, 0, 1]`, i.e. the matrix has
    /// no projective component.
    pub fn is_affine(&self) -> bool {
        self.data[3] == 0.0 && self.data[7] == 0.0 && self.data[11] == 0.0 && self.data[15] == 1.0
    }

    pub fn transposed(&self) -> Matrix4x4 {
        let source = &self.data;
        let mut dest = [0.0; SIZE];
        for i in 0..ROW_SIZE {
            let base = i * ROW_SIZE;
            dest[i] = source[base];
            dest[i + ROW_SIZE] = source[base + 1];
            dest[i + ROW_SIZE * 2] = source[base + 2];
            dest[i + ROW_SIZE * 3] = source[base + 3];
        }
        Matrix4x4 { data: dest }
    }

    pub fn transpose(&mut self) {
        *self = self.transposed();
    }

    /// Determinant via cofactor expansion. When `adjoint_out` is provided, the
    /// full adjoint (cofactor) matrix is written into it as a side output;
    /// `invert` builds the inverse from it.
    pub fn determinant_with_adjoint(&self, adjoint_out: Option<&mut [f32; SIZE]>) -> f32 {
        let transpose = self.transposed().data;

        let mut scratch = [0.0; SIZE];
        let dst: &mut [f32; SIZE] = match adjoint_out {
            Some(out) => out,
            None => &mut scratch,
        };

        // cofactor pairs for the first eight elements
        let mut temp = [0.0f32; 12];
        temp[0] = transpose[10] * transpose[15];
        temp[1] = transpose[11] * transpose[14];
        temp[2] = transpose[9] * transpose[15];
        temp[3] = transpose[11] * transpose[13];
        temp[4] = transpose[9] * transpose[14];
        temp[5] = transpose[10] * transpose[13];
        temp[6] = transpose[8] * transpose[15];
        temp[7] = transpose[11] * transpose[12];
        temp[8] = transpose[8] * transpose[14];
        temp[9] = transpose[10] * transpose[12];
        temp[10] = transpose[8] * transpose[13];
        temp[11] = transpose[9] * transpose[12];

        dst[0] = temp[0] * transpose[5] + temp[3] * transpose[6] + temp[4] * transpose[7];
        dst[0] -= temp[1] * transpose[5] + temp[2] * transpose[6] + temp[5] * transpose[7];
        dst[1] = temp[1] * transpose[4] + temp[6] * transpose[6] + temp[9] * transpose[7];
        dst[1] -= temp[0] * transpose[4] + temp[7] * transpose[6] + temp[8] * transpose[7];
        dst[2] = temp[2] * transpose[4] + temp[7] * transpose[5] + temp[10] * transpose[7];
        dst[2] -= temp[3] * transpose[4] + temp[6] * transpose[5] + temp[11] * transpose[7];
        dst[3] = temp[5] * transpose[4] + temp[8] * transpose[5] + temp[11] * transpose[6];
        dst[3] -= temp[4] * transpose[4] + temp[9] * transpose[5] + temp[10] * transpose[6];
        dst[4] = temp[1] * transpose[1] + temp[2] * transpose[2] + temp[5] * transpose[3];
        dst[4] -= temp[0] * transpose[1] + temp[3] * transpose[2] + temp[4] * transpose[3];
        dst[5] = temp[0] * transpose[0] + temp[7] * transpose[2] + temp[8] * transpose[3];
        dst[5] -= temp[1] * transpose[0] + temp[6] * transpose[2] + temp[9] * transpose[3];
        dst[6] = temp[3] * transpose[0] + temp[6] * transpose[1] + temp[11] * transpose[3];
        dst[6] -= temp[2] * transpose[0] + temp[7] * transpose[1] + temp[10] * transpose[3];
        dst[7] = temp[4] * transpose[0] + temp[9] * transpose[1] + temp[10] * transpose[2];
        dst[7] -= temp[5] * transpose[0] + temp[8] * transpose[1] + temp[11] * transpose[2];

        // cofactor pairs for the second eight elements
        temp[0] = transpose[2] * transpose[7];
        temp[1] = transpose[3] * transpose[6];
        temp[2] = transpose[1] * transpose[7];
        temp[3] = transpose[3] * transpose[5];
        temp[4] = transpose[1] * transpose[6];
        temp[5] = transpose[2] * transpose[5];
        temp[6] = transpose[0] * transpose[7];
        temp[7] = transpose[3] * transpose[4];
        temp[8] = transpose[0] * transpose[6];
        temp[9] = transpose[2] * transpose[4];
        temp[10] = transpose[0] * transpose[5];
        temp[11] = transpose[1] * transpose[4];

        dst[8] = temp[0] * transpose[13] + temp[3] * transpose[14] + temp[4] * transpose[15];
        dst[8] -= temp[1] * transpose[13] + temp[2] * transpose[14] + temp[5] * transpose[15];
        dst[9] = temp[1] * transpose[12] + temp[6] * transpose[14] + temp[9] * transpose[15];
        dst[9] -= temp[0] * transpose[12] + temp[7] * transpose[14] + temp[8] * transpose[15];
        dst[10] = temp[2] * transpose[12] + temp[7] * transpose[13] + temp[10] * transpose[15];
        dst[10] -= temp[3] * transpose[12] + temp[6] * transpose[13] + temp[11] * transpose[15];
        dst[11] = temp[5] * transpose[12] + temp[8] * transpose[13] + temp[11] * transpose[14];
        dst[11] -= temp[4] * transpose[12] + temp[9] * transpose[13] + temp[10] * transpose[14];
        dst[12] = temp[2] * transpose[10] + temp[5] * transpose[11] + temp[1] * transpose[9];
        dst[12] -= temp[4] * transpose[11] + temp[0] * transpose[9] + temp[3] * transpose[10];
        dst[13] = temp[8] * transpose[11] + temp[0] * transpose[8] + temp[7] * transpose[10];
        dst[13] -= temp[6] * transpose[10] + temp[9] * transpose[11] + temp[1] * transpose[8];
        dst[14] = temp[6] * transpose[9] + temp[11] * transpose[11] + temp[3] * transpose[8];
        dst[14] -= temp[10] * transpose[11] + temp[2] * transpose[8] + temp[7] * transpose[9];
        dst[15] = temp[10] * transpose[10] + temp[4] * transpose[8] + temp[9] * transpose[9];
        dst[15] -= temp[8] * transpose[9] + temp[11] * transpose[10] + temp[5] * transpose[8];

        transpose[0] * dst[0] + transpose[1] * dst[1] + transpose[2] * dst[2] + transpose[3] * dst[3]
    }

    pub fn determinant(&self) -> f32 {
        self.determinant_with_adjoint(None)
    }

    /// Inverts this matrix in place.
    ///
    /// Returns `false` (leaving the matrix untouched) when the determinant is
    /// exactly zero. If the input was affine, the bottom row of the result is
    /// re-snapped to `[0, 0, 0, 1]` to keep inversion round-trips from
    /// accumulating drift there.
    pub fn invert(&mut self) -> bool {
        let was_affine = self.is_affine();

        let mut adjoint = [0.0; SIZE];
        let det = self.determinant_with_adjoint(Some(&mut adjoint));
        if det == 0.0 {
            return false;
        }

        let inv_det = 1.0 / det;
        for (slot, cofactor) in self.data.iter_mut().zip(adjoint.iter()) {
            *slot = cofactor * inv_det;
        }

        if was_affine {
            self.data[3] = 0.0;
            self.data[7] = 0.0;
            self.data[11] = 0.0;
            self.data[15] = 1.0;
        }

        true
    }

    /// Non-mutating inverse; `None` when the matrix is singular.
    pub fn inverse(&self) -> Option<Matrix4x4> {
        let mut out = *self;
        if out.invert() {
            Some(out)
        } else {
            None
        }
    }

    /// Builds the matrix `T * R * S` from translation, rotation, and scale.
    pub fn compose(translation: Vec3, rotation: Quat, scale: Vec3) -> Matrix4x4 {
        let basis = Mat3::from_quat(rotation);
        let mut out = Matrix4x4::IDENTITY;
        out.set_column3(0, basis.x_axis * scale.x);
        out.set_column3(1, basis.y_axis * scale.y);
        out.set_column3(2, basis.z_axis * scale.z);
        out.set_column3(3, translation);
        out.data[3] = 0.0;
        out.data[7] = 0.0;
        out.data[11] = 0.0;
        out.data[15] = 1.0;
        out
    }

    /// Splits an affine matrix back into translation, rotation, scale, and
    /// shear components.
    ///
    /// The upper 3x3 columns are Gram-Schmidt orthogonalized into a pure
    /// rotation basis; the remaining upper-triangular factor yields the scale
    /// on its diagonal and the shear off it. A left-handed basis is negated so
    /// the rotation always has determinant +1, with the reflection absorbed
    /// into the scale sign.
    pub fn decompose(&self) -> Result<Decomposed> {
        if !self.is_affine() {
            return Err(Error::NotAffine);
        }

        let c0 = self.column3(0);
        let c1 = self.column3(1);
        let c2 = self.column3(2);

        let mut q0 = c0 * inverse_sqrt(c0.dot(c0));

        let mut q1 = c1 - q0.dot(c1) * q0;
        q1 *= inverse_sqrt(q1.dot(q1));

        let mut q2 = c2 - q0.dot(c2) * q0;
        q2 -= q1.dot(c2) * q1;
        q2 *= inverse_sqrt(q2.dot(q2));

        // guarantee a right-handed basis (determinant +1, no reflection)
        let det = q0.dot(q1.cross(q2));
        if det < 0.0 {
            q0 = -q0;
            q1 = -q1;
            q2 = -q2;
        }

        // upper-triangular "right" factor: R^T * M
        let r00 = q0.dot(c0);
        let r01 = q0.dot(c1);
        let r11 = q1.dot(c1);
        let r02 = q0.dot(c2);
        let r12 = q1.dot(c2);
        let r22 = q2.dot(c2);

        let scale = Vec3::new(r00, r11, r22);

        let inv_r00 = 1.0 / r00;
        let shear = Vec3::new(r01 * inv_r00, r02 * inv_r00, r12 / r11);

        let rotation = Quat::from_mat3(&Mat3::from_cols(q0, q1, q2));
        let translation = self.column3(3);

        Ok(Decomposed {
            translation,
            rotation,
            scale,
            shear,
        })
    }

    /// `out = lhs * rhs`.
    pub fn multiply_mm(lhs: &Matrix4x4, rhs: &Matrix4x4) -> Matrix4x4 {
        let l = &lhs.data;
        let r = &rhs.data;
        let mut out = [0.0; SIZE];
        for i in 0..ROW_SIZE {
            let rhs_i0 = r[ROW_SIZE * i];
            let mut ri0 = l[0] * rhs_i0;
            let mut ri1 = l[1] * rhs_i0;
            let mut ri2 = l[2] * rhs_i0;
            let mut ri3 = l[3] * rhs_i0;
            for j in 1..ROW_SIZE {
                let rhs_ij = r[ROW_SIZE * i + j];
                ri0 += l[ROW_SIZE * j] * rhs_ij;
                ri1 += l[ROW_SIZE * j + 1] * rhs_ij;
                ri2 += l[ROW_SIZE * j + 2] * rhs_ij;
                ri3 += l[ROW_SIZE * j + 3] * rhs_ij;
            }
            out[ROW_SIZE * i] = ri0;
            out[ROW_SIZE * i + 1] = ri1;
            out[ROW_SIZE * i + 2] = ri2;
            out[ROW_SIZE * i + 3] = ri3;
        }
        Matrix4x4 { data: out }
    }

    /// Post-multiplies: `self = self * matrix`.
    pub fn multiply(&mut self, matrix: &Matrix4x4) {
        *self = Matrix4x4::multiply_mm(self, matrix);
    }

    /// Pre-multiplies: `self = matrix * self`.
    pub fn pre_multiply(&mut self, matrix: &Matrix4x4) {
        *self = Matrix4x4::multiply_mm(matrix, self);
    }

    pub fn add(&mut self, matrix: &Matrix4x4) {
        for (slot, value) in self.data.iter_mut().zip(matrix.data.iter()) {
            *slot += value;
        }
    }

    pub fn multiply_scalar(&mut self, scalar: f32) {
        for slot in self.data.iter_mut() {
            *slot *= scalar;
        }
    }

    /// Transforms a homogeneous 4-vector.
    pub fn transform_vector4(&self, v: Vec4) -> Vec4 {
        let m = &self.data;
        Vec4::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z + m[12] * v.w,
            m[1] * v.x + m[5] * v.y + m[9] * v.z + m[13] * v.w,
            m[2] * v.x + m[6] * v.y + m[10] * v.z + m[14] * v.w,
            m[3] * v.x + m[7] * v.y + m[11] * v.z + m[15] * v.w,
        )
    }

    /// Transforms a point (w = 1). If the resulting homogeneous w is neither
    /// exactly 0 nor exactly 1 the result is perspective-divided; the exact
    /// comparison keeps direction vectors and already-normalized points from
    /// being divided.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        let out = self.transform_vector4(point.extend(1.0));
        let mut result = Vec3::new(out.x, out.y, out.z);
        if out.w != 1.0 && out.w != 0.0 {
            result /= out.w;
        }
        result
    }

    /// Transforms a direction vector (w = 0); translation does not apply.
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        let out = self.transform_vector4(direction.extend(0.0));
        let mut result = Vec3::new(out.x, out.y, out.z);
        if out.w != 1.0 && out.w != 0.0 {
            result /= out.w;
        }
        result
    }

    /// Post-translation: equivalent to `self = self * T(x, y, z)`.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        let source = self.data;
        for i in 0..ROW_SIZE {
            self.data[12 + i] =
                source[i] * x + source[4 + i] * y + source[8 + i] * z + source[12 + i];
        }
    }

    pub fn translate_vec(&mut self, v: Vec3) {
        self.translate(v.x, v.y, v.z);
    }

    /// Pre-translation: equivalent to `self = T(x, y, z) * self`.
    pub fn pre_translate(&mut self, x: f32, y: f32, z: f32) {
        self.data[12] += x;
        self.data[13] += y;
        self.data[14] += z;
    }

    pub fn pre_translate_vec(&mut self, v: Vec3) {
        self.pre_translate(v.x, v.y, v.z);
    }

    pub fn set_translation(&mut self, x: f32, y: f32, z: f32) {
        self.data[12] = x;
        self.data[13] = y;
        self.data[14] = z;
    }

    pub fn translation(&self) -> Vec3 {
        self.column3(3)
    }

    /// Post-rotation around `axis` by `angle` radians.
    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        self.multiply(&Matrix4x4::from_axis_angle(axis, angle));
    }

    /// Pre-rotation around `axis` by `angle` radians.
    pub fn pre_rotate(&mut self, axis: Vec3, angle: f32) {
        self.pre_multiply(&Matrix4x4::from_axis_angle(axis, angle));
    }

    /// Post-scale: equivalent to `self = self * S(x, y, z)`.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        for i in 0..ROW_SIZE {
            self.data[i] *= x;
            self.data[4 + i] *= y;
            self.data[8 + i] *= z;
        }
    }

    /// Pre-scale: equivalent to `self = S(x, y, z) * self`, i.e. each row of
    /// the upper three is scaled by the matching factor.
    pub fn pre_scale(&mut self, x: f32, y: f32, z: f32) {
        for col in 0..ROW_SIZE {
            let base = col * ROW_SIZE;
            self.data[base] *= x;
            self.data[base + 1] *= y;
            self.data[base + 2] *= z;
        }
    }

    /// Per-axis scale magnitudes, read from the column lengths.
    pub fn scale_factors(&self) -> Vec3 {
        Vec3::new(
            self.column3(0).length(),
            self.column3(1).length(),
            self.column3(2).length(),
        )
    }

    pub fn from_translation(v: Vec3) -> Matrix4x4 {
        let mut out = Matrix4x4::IDENTITY;
        out.set_translation(v.x, v.y, v.z);
        out
    }

    pub fn from_scale(x: f32, y: f32, z: f32) -> Matrix4x4 {
        let mut out = Matrix4x4::IDENTITY;
        out.data[0] = x;
        out.data[5] = y;
        out.data[10] = z;
        out
    }

    /// Rotation around `axis` by `angle` radians (Rodrigues' formula), with
    /// fast paths when the axis is exactly a cardinal unit axis. A non-unit
    /// general axis is normalized first.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Matrix4x4 {
        let (mut x, mut y, mut z) = (axis.x, axis.y, axis.z);
        let mut rm = [0.0f32; SIZE];
        rm[15] = 1.0;

        let s = angle.sin();
        let c = angle.cos();

        if x == 1.0 && y == 0.0 && z == 0.0 {
            rm[0] = 1.0;
            rm[5] = c;
            rm[10] = c;
            rm[6] = s;
            rm[9] = -s;
        } else if x == 0.0 && y == 1.0 && z == 0.0 {
            rm[0] = c;
            rm[10] = c;
            rm[8] = s;
            rm[2] = -s;
            rm[5] = 1.0;
        } else if x == 0.0 && y == 0.0 && z == 1.0 {
            rm[0] = c;
            rm[5] = c;
            rm[1] = s;
            rm[4] = -s;
            rm[10] = 1.0;
        } else {
            let len = (x * x + y * y + z * z).sqrt();
            if len != 1.0 {
                let recip_len = 1.0 / len;
                x *= recip_len;
                y *= recip_len;
                z *= recip_len;
            }
            let nc = 1.0 - c;
            let xy = x * y;
            let yz = y * z;
            let zx = z * x;
            let xs = x * s;
            let ys = y * s;
            let zs = z * s;
            rm[0] = x * x * nc + c;
            rm[4] = xy * nc - zs;
            rm[8] = zx * nc + ys;
            rm[1] = xy * nc + zs;
            rm[5] = y * y * nc + c;
            rm[9] = yz * nc - xs;
            rm[2] = zx * nc - ys;
            rm[6] = yz * nc + xs;
            rm[10] = z * z * nc + c;
        }

        Matrix4x4 { data: rm }
    }

    /// Rotation from Euler angles in radians, applied in XYZ order.
    pub fn from_euler(x: f32, y: f32, z: f32) -> Matrix4x4 {
        let (a, b) = (x.cos(), x.sin());
        let (c, d) = (y.cos(), y.sin());
        let (e, f) = (z.cos(), z.sin());

        let ae = a * e;
        let af = a * f;
        let be = b * e;
        let bf = b * f;

        let mut rm = [0.0f32; SIZE];

        rm[0] = c * e;
        rm[4] = -c * f;
        rm[8] = d;

        rm[1] = af + be * d;
        rm[5] = ae - bf * d;
        rm[9] = -b * c;

        rm[2] = bf - ae * d;
        rm[6] = be + af * d;
        rm[10] = a * c;

        rm[15] = 1.0;

        Matrix4x4 { data: rm }
    }

    /// Extracts the rotation as XYZ Euler angles, dividing out per-axis
    /// scale first. A negative determinant flips the sign of the x scale to
    /// account for an odd number of reflections.
    pub fn rotation_as_euler(&self) -> Vec3 {
        let column0 = self.column3(0);
        let column1 = self.column3(1);
        let column2 = self.column3(2);

        let mut sx = column0.length();
        let sy = column1.length();
        let sz = column2.length();

        // if determinant is negative, one scale axis carries the reflection
        if self.determinant() < 0.0 {
            sx = -sx;
        }

        let basis = Mat3::from_cols(column0 / sx, column1 / sy, column2 / sz);
        let quat = Quat::from_mat3(&basis);
        let (x, y, z) = quat.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    /// Replaces the rotation block with one built from XYZ Euler angles while
    /// preserving the current scale.
    pub fn set_rotation_from_euler(&mut self, x: f32, y: f32, z: f32) {
        let scale = self.scale_factors();
        let mut full = Matrix4x4::from_euler(x, y, z);
        full.multiply(&Matrix4x4::from_scale(scale.x, scale.y, scale.z));
        self.copy_rotation_scale_block(&full);
    }

    pub fn set_rotation_from_quaternion(&mut self, rotation: Quat) {
        *self = Matrix4x4::compose(Vec3::ZERO, rotation, Vec3::ONE);
    }

    /// Replaces the scale while preserving the current rotation.
    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) {
        let euler = self.rotation_as_euler();
        let mut full = Matrix4x4::from_scale(x, y, z);
        full.multiply(&Matrix4x4::from_euler(euler.x, euler.y, euler.z));
        self.copy_rotation_scale_block(&full);
    }

    fn copy_rotation_scale_block(&mut self, source: &Matrix4x4) {
        self.set_column3(0, source.column3(0));
        self.set_column3(1, source.column3(1));
        self.set_column3(2, source.column3(2));
    }

    /// Builds a right-handed orientation+translation matrix positioned at
    /// `src`, facing `target`. Columns are right / up / -forward /
    /// translation; the up hint is re-orthogonalized against the forward
    /// direction.
    pub fn look_at(src: Vec3, target: Vec3, up: Vec3) -> Matrix4x4 {
        let to_target = (target - src).normalize();
        let right = to_target.cross(up).normalize();
        let up = right.cross(to_target).normalize();

        let mut out = Matrix4x4::IDENTITY;
        out.set_column3(0, right);
        out.set_column3(1, up);
        out.set_column3(2, -to_target);
        out.set_column3(3, src);
        out
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Matrix4x4::IDENTITY
    }
}

impl std::ops::Mul for Matrix4x4 {
    type Output = Matrix4x4;

    fn mul(self, rhs: Matrix4x4) -> Matrix4x4 {
        Matrix4x4::multiply_mm(&self, &rhs)
    }
}

fn inverse_sqrt(value: f32) -> f32 {
    1.0 / value.sqrt()
}
