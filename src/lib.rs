//! Scene-graph transform core.
//!
//! A column-major 4x4 matrix library ([`Matrix4x4`]) and a hierarchical
//! scene graph ([`Scene`], [`Object3D`], [`Transform`]) where local and
//! world-space mutation, reparenting, and world-matrix computation live.
//! Renderers and other consumers read world matrices through [`Transform`]
//! after recomputing them; see the staleness contract on that type.

pub mod error;
pub mod math;
pub mod scene_graph;

pub use error::{Error, Result};
pub use math::matrix4x4::{Decomposed, Matrix4x4};
pub use scene_graph::component::{Component, ComponentId, ComponentKind};
pub use scene_graph::object3d::{Object3D, ObjectId};
pub use scene_graph::scene::Scene;
pub use scene_graph::transform::{Transform, TransformationSpace};
