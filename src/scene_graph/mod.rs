pub mod component;
pub mod object3d;
pub mod scene;
pub mod transform;

pub use component::{Component, ComponentId, ComponentKind};
pub use object3d::{Object3D, ObjectId};
pub use scene::Scene;
pub use transform::{Transform, TransformationSpace};
