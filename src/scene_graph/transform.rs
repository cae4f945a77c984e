use glam::{Vec3, Vec4};

use crate::math::matrix4x4::Matrix4x4;

/// Coordinate space for a transform mutation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransformationSpace {
    /// Right-multiply the local matrix: the operation applies in the node's
    /// current local frame.
    Local,
    /// Left-multiply the local matrix: the operation applies before all
    /// accumulated local transformation.
    PreLocal,
    /// Apply the operation as if at the scene root, back-solved into an
    /// equivalent local operation so no ancestor is touched.
    World,
}

/// Per-node transform component: a local matrix plus a cached world matrix.
///
/// There is no dirty tracking. The world matrix is a cache that is only
/// trustworthy immediately after [`crate::Scene::update_world_matrix`] (or one
/// of the scene operations that recomputes it) has run; any consumer that may
/// have observed an ancestor mutation must trigger a recompute before reading
/// it.
#[derive(Debug, Clone)]
pub struct Transform {
    local_matrix: Matrix4x4,
    world_matrix: Matrix4x4,
}

impl Transform {
    pub fn new() -> Transform {
        Transform {
            local_matrix: Matrix4x4::IDENTITY,
            world_matrix: Matrix4x4::IDENTITY,
        }
    }

    pub fn from_matrix(matrix: Matrix4x4) -> Transform {
        Transform {
            local_matrix: matrix,
            world_matrix: Matrix4x4::IDENTITY,
        }
    }

    pub fn local_matrix(&self) -> &Matrix4x4 {
        &self.local_matrix
    }

    pub fn local_matrix_mut(&mut self) -> &mut Matrix4x4 {
        &mut self.local_matrix
    }

    pub fn set_local_matrix(&mut self, matrix: Matrix4x4) {
        self.local_matrix = matrix;
    }

    /// The cached world matrix. See the type docs for the staleness contract.
    pub fn world_matrix(&self) -> &Matrix4x4 {
        &self.world_matrix
    }

    pub(crate) fn set_world_matrix(&mut self, matrix: Matrix4x4) {
        self.world_matrix = matrix;
    }

    /// Writes the translation column of the local matrix.
    pub fn set_local_position(&mut self, x: f32, y: f32, z: f32) {
        self.local_matrix.set_translation(x, y, z);
    }

    pub fn local_position(&self) -> Vec3 {
        self.local_matrix.transform_point(Vec3::ZERO)
    }

    /// Transforms `point` by the cached world matrix.
    pub fn apply_to_point(&self, point: Vec3) -> Vec3 {
        self.world_matrix.transform_point(point)
    }

    /// Transforms a homogeneous 4-vector by the cached world matrix.
    pub fn apply_to_vector4(&self, vector: Vec4) -> Vec4 {
        self.world_matrix.transform_vector4(vector)
    }

    /// Solves for the local-space equivalent of a world-space transformation.
    ///
    /// Pre-multiplying at the scene root would perturb every ancestor, so the
    /// equivalent local operation is derived instead. With `F` the node's full
    /// transform (ancestors times local) and `nWorld` the desired world-space
    /// operation:
    ///
    /// ```text
    ///        nWorld * F = F * nLocal
    /// F⁻¹ * nWorld * F = nLocal
    /// ```
    ///
    /// Returns `None` when `F` is singular and cannot be inverted.
    pub fn local_from_world(
        new_world_transformation: &Matrix4x4,
        current_full_transformation: &Matrix4x4,
    ) -> Option<Matrix4x4> {
        let full_inverse = current_full_transformation.inverse()?;
        let mut local = *current_full_transformation;
        local.pre_multiply(new_world_transformation);
        local.pre_multiply(&full_inverse);
        Some(local)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::new()
    }
}
