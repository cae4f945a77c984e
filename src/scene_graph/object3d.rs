use thunderdome::Index;

use crate::scene_graph::component::{ComponentId, ComponentKind};
use crate::scene_graph::scene::Scene;
use crate::scene_graph::transform::Transform;

pub type ObjectId = Index;

/// A scene-graph node.
///
/// Parent and child links are kept mutually consistent by
/// [`Scene::add_child`] and [`Scene::remove_child`] only; they are never
/// mutated directly.
pub struct Object3D {
    /// Monotonically increasing identifier assigned by the [`Scene`] factory.
    id: u64,
    pub name: String,
    pub transform: Transform,
    active: bool,
    is_static: bool,
    layer: i32,
    pub(crate) parent_id: Option<ObjectId>,
    pub(crate) child_ids: Vec<ObjectId>,
    pub(crate) component_ids: Vec<ComponentId>,
    /// First-attach-wins singleton slot per component kind.
    pub(crate) component_slots: [Option<ComponentId>; ComponentKind::ALL.len()],
}

impl Object3D {
    pub(crate) fn new(id: u64, name: String) -> Object3D {
        Object3D {
            id,
            name,
            transform: Transform::new(),
            active: true,
            is_static: false,
            layer: 0,
            parent_id: None,
            child_ids: Vec::new(),
            component_ids: Vec::new(),
            component_slots: [None; ComponentKind::ALL.len()],
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn parent_id(&self) -> Option<ObjectId> {
        self.parent_id
    }

    pub fn child_ids(&self) -> &[ObjectId] {
        &self.child_ids
    }

    pub fn child_count(&self) -> usize {
        self.child_ids.len()
    }

    pub fn child_at(&self, index: usize) -> Option<ObjectId> {
        self.child_ids.get(index).copied()
    }

    pub fn parent<'a>(&self, scene: &'a Scene) -> Option<&'a Object3D> {
        self.parent_id.and_then(|id| scene.get_object(id))
    }

    pub fn children<'a, 'b>(&'a self, scene: &'b Scene) -> impl Iterator<Item = &'b Object3D> + 'b
    where
        'a: 'b,
    {
        self.child_ids
            .iter()
            .filter_map(move |id| scene.get_object(*id))
    }

    pub fn component_ids(&self) -> &[ComponentId] {
        &self.component_ids
    }

    /// The component occupying the singleton slot for `kind`, if any.
    pub fn component_of_kind(&self, kind: ComponentKind) -> Option<ComponentId> {
        self.component_slots[kind.slot_index()]
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    pub fn set_layer(&mut self, layer: i32) {
        self.layer = layer;
    }
}
