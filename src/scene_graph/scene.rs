use glam::Vec3;
use thunderdome::Arena;

use crate::error::{Error, Result};
use crate::math::matrix4x4::Matrix4x4;
use crate::scene_graph::component::{Component, ComponentId, ComponentKind};
use crate::scene_graph::object3d::{Object3D, ObjectId};
use crate::scene_graph::transform::{Transform, TransformationSpace};

/// The scene graph: an arena of nodes plus the hierarchy and transform
/// operations that mediate it.
///
/// World matrices follow an explicit-recompute contract (see [`Transform`]):
/// graph or transform mutation does not refresh any cached world matrix
/// except where documented. Callers recompute before trusting a read,
/// typically once per frame after the update phase.
pub struct Scene {
    objects: Arena<Object3D>,
    components: Arena<Box<dyn Component>>,
    next_object_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Arena::new(),
            components: Arena::new(),
            next_object_id: 0,
        }
    }

    /// Creates a node with an identity transform and no parent. The node's
    /// `u64` identifier is assigned here, monotonically.
    pub fn create_object(&mut self, name: impl Into<String>) -> ObjectId {
        let id = self.next_object_id;
        self.next_object_id += 1;
        self.objects.insert(Object3D::new(id, name.into()))
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.get_mut(id)
    }

    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object3D)> {
        self.objects.iter()
    }

    /// Destroys a node, all of its descendants, and every component attached
    /// to them. All releases funnel through this single path.
    pub fn destroy_object(&mut self, id: ObjectId) -> Result<()> {
        let parent_id = self
            .objects
            .get(id)
            .ok_or(Error::UnknownObject)?
            .parent_id;

        if let Some(parent_id) = parent_id {
            if let Some(parent) = self.objects.get_mut(parent_id) {
                parent.child_ids.retain(|&child| child != id);
            }
        }

        self.release_recursive(id);
        Ok(())
    }

    fn release_recursive(&mut self, id: ObjectId) {
        if let Some(object) = self.objects.remove(id) {
            for component_id in object.component_ids {
                self.components.remove(component_id);
            }
            for child_id in object.child_ids {
                self.release_recursive(child_id);
            }
        }
    }

    // ---- hierarchy ----

    /// Makes `child_id` a child of `parent_id`, preserving the child's
    /// world-space placement.
    ///
    /// A node already parented elsewhere is detached there first (which bakes
    /// its world matrix into its local matrix); the local matrix is then
    /// pre-multiplied by the inverse of the new parent's world matrix so the
    /// node does not jump when it changes coordinate frames.
    ///
    /// No-op when the node is already a child of `parent_id`. Fails with
    /// [`Error::HierarchyCycle`] when `child_id` is an ancestor of
    /// `parent_id` (or the parent itself).
    pub fn add_child(&mut self, parent_id: ObjectId, child_id: ObjectId) -> Result<()> {
        if !self.objects.contains(parent_id) || !self.objects.contains(child_id) {
            return Err(Error::UnknownObject);
        }

        if self.objects[child_id].parent_id == Some(parent_id) {
            return Ok(());
        }

        if self.is_ancestor_or_self(child_id, parent_id) {
            return Err(Error::HierarchyCycle);
        }

        if let Some(old_parent_id) = self.objects[child_id].parent_id {
            self.remove_child(old_parent_id, child_id)?;
        }

        let parent_world = self.calculate_world_matrix(parent_id);
        if let Some(object) = self.objects.get_mut(parent_id) {
            object.transform.set_world_matrix(parent_world);
        }

        let mut world_inverse = parent_world;
        if world_inverse.invert() {
            self.objects[child_id]
                .transform
                .local_matrix_mut()
                .pre_multiply(&world_inverse);
        } else {
            log::warn!(
                "add_child: parent world matrix is singular, child placement not preserved"
            );
        }

        self.objects[parent_id].child_ids.push(child_id);
        self.objects[child_id].parent_id = Some(parent_id);
        Ok(())
    }

    /// Detaches `child_id` from `parent_id`, baking the child's world matrix
    /// into its local matrix so it keeps its world placement as a root node.
    ///
    /// Returns `Ok(false)` when the node was not a child of `parent_id`.
    pub fn remove_child(&mut self, parent_id: ObjectId, child_id: ObjectId) -> Result<bool> {
        if !self.objects.contains(parent_id) || !self.objects.contains(child_id) {
            return Err(Error::UnknownObject);
        }

        if !self.objects[parent_id].child_ids.contains(&child_id) {
            return Ok(false);
        }

        let world = self.calculate_world_matrix(child_id);
        let child = &mut self.objects[child_id];
        child.transform.set_local_matrix(world);
        child.transform.set_world_matrix(world);
        child.parent_id = None;

        self.objects[parent_id]
            .child_ids
            .retain(|&id| id != child_id);
        Ok(true)
    }

    /// True when `candidate` is `node` or one of `node`'s ancestors.
    fn is_ancestor_or_self(&self, candidate: ObjectId, node: ObjectId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.objects.get(id).and_then(|object| object.parent_id);
        }
        false
    }

    // ---- components ----

    /// Stores a component in the scene, unattached.
    pub fn add_component(&mut self, component: Box<dyn Component>) -> ComponentId {
        self.components.insert(component)
    }

    pub fn get_component(&self, id: ComponentId) -> Option<&dyn Component> {
        self.components.get(id).map(|component| component.as_ref())
    }

    /// Attaches a component to a node.
    ///
    /// Returns the kind slot that was populated, or `None` when the slot for
    /// that kind was already taken (the component is still appended to the
    /// node's list, first attach wins the slot) or the exact same component
    /// was already attached (a no-op).
    pub fn attach_component(
        &mut self,
        object_id: ObjectId,
        component_id: ComponentId,
    ) -> Result<Option<ComponentKind>> {
        let kind = self
            .components
            .get(component_id)
            .ok_or(Error::UnknownComponent)?
            .kind();
        let object = self
            .objects
            .get_mut(object_id)
            .ok_or(Error::UnknownObject)?;

        if object.component_ids.contains(&component_id) {
            return Ok(None);
        }

        object.component_ids.push(component_id);

        let slot = &mut object.component_slots[kind.slot_index()];
        if slot.is_none() {
            *slot = Some(component_id);
            Ok(Some(kind))
        } else {
            log::warn!(
                "attach_component: node {:?} already has a {:?} component, slot unchanged",
                object.name,
                kind
            );
            Ok(None)
        }
    }

    // ---- world matrices ----

    /// Computes the node's world matrix with a full root-to-node walk:
    /// the node's local matrix pre-multiplied by each ancestor's local matrix
    /// in turn. O(depth), no intermediate caching. Does not write any cache.
    pub fn calculate_world_matrix(&self, id: ObjectId) -> Matrix4x4 {
        let mut result = Matrix4x4::IDENTITY;
        let Some(object) = self.objects.get(id) else {
            return result;
        };
        result = *object.transform.local_matrix();

        let mut parent = object.parent_id;
        while let Some(parent_id) = parent {
            let Some(ancestor) = self.objects.get(parent_id) else {
                break;
            };
            result.pre_multiply(ancestor.transform.local_matrix());
            parent = ancestor.parent_id;
        }
        result
    }

    /// The product of all ancestor local matrices, identity for a root node.
    pub fn ancestor_world_matrix(&self, id: ObjectId) -> Matrix4x4 {
        match self.objects.get(id).and_then(|object| object.parent_id) {
            Some(parent_id) => self.calculate_world_matrix(parent_id),
            None => Matrix4x4::IDENTITY,
        }
    }

    /// Recomputes and caches the node's world matrix.
    pub fn update_world_matrix(&mut self, id: ObjectId) {
        let world = self.calculate_world_matrix(id);
        if let Some(object) = self.objects.get_mut(id) {
            object.transform.set_world_matrix(world);
        }
    }

    /// Recomputes cached world matrices for every node, parents before
    /// children. Typically called once per frame before the render phase.
    pub fn update_all_world_matrices(&mut self) {
        let roots: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|(_, object)| object.parent_id.is_none())
            .map(|(id, _)| id)
            .collect();

        for root_id in roots {
            self.update_world_matrices_recursive(root_id, Matrix4x4::IDENTITY);
        }
    }

    fn update_world_matrices_recursive(&mut self, id: ObjectId, parent_world: Matrix4x4) {
        let Some(object) = self.objects.get_mut(id) else {
            return;
        };
        let mut world = parent_world;
        world.multiply(object.transform.local_matrix());
        object.transform.set_world_matrix(world);

        let child_ids = object.child_ids.clone();
        for child_id in child_ids {
            self.update_world_matrices_recursive(child_id, world);
        }
    }

    // ---- transform operations ----

    /// Applies `matrix` to the node's transform in the given space. In world
    /// space the operation is back-solved into the equivalent local operation
    /// (see [`Transform::local_from_world`]); a node whose full transform is
    /// singular is left unchanged.
    pub fn transform_by(&mut self, id: ObjectId, matrix: &Matrix4x4, space: TransformationSpace) {
        match space {
            TransformationSpace::Local => {
                if let Some(object) = self.objects.get_mut(id) {
                    object.transform.local_matrix_mut().multiply(matrix);
                }
            }
            TransformationSpace::PreLocal => {
                if let Some(object) = self.objects.get_mut(id) {
                    object.transform.local_matrix_mut().pre_multiply(matrix);
                }
            }
            TransformationSpace::World => self.transform_by_world(id, matrix),
        }
    }

    fn transform_by_world(&mut self, id: ObjectId, world_transformation: &Matrix4x4) {
        let full = self.calculate_world_matrix(id);
        match Transform::local_from_world(world_transformation, &full) {
            Some(local_transformation) => {
                if let Some(object) = self.objects.get_mut(id) {
                    object
                        .transform
                        .local_matrix_mut()
                        .multiply(&local_transformation);
                }
            }
            None => {
                log::warn!("world-space transform skipped: full transform is singular");
            }
        }
    }

    pub fn translate(&mut self, id: ObjectId, delta: Vec3, space: TransformationSpace) {
        match space {
            TransformationSpace::Local => {
                if let Some(object) = self.objects.get_mut(id) {
                    object.transform.local_matrix_mut().translate_vec(delta);
                }
            }
            TransformationSpace::PreLocal => {
                if let Some(object) = self.objects.get_mut(id) {
                    object.transform.local_matrix_mut().pre_translate_vec(delta);
                }
            }
            TransformationSpace::World => {
                let mut world_transformation = Matrix4x4::IDENTITY;
                world_transformation.translate_vec(delta);
                self.transform_by_world(id, &world_transformation);
            }
        }
    }

    pub fn rotate(&mut self, id: ObjectId, axis: Vec3, angle: f32, space: TransformationSpace) {
        match space {
            TransformationSpace::Local => {
                if let Some(object) = self.objects.get_mut(id) {
                    object.transform.local_matrix_mut().rotate(axis, angle);
                }
            }
            TransformationSpace::PreLocal => {
                if let Some(object) = self.objects.get_mut(id) {
                    object.transform.local_matrix_mut().pre_rotate(axis, angle);
                }
            }
            TransformationSpace::World => {
                let mut world_transformation = Matrix4x4::IDENTITY;
                world_transformation.rotate(axis, angle);
                self.transform_by_world(id, &world_transformation);
            }
        }
    }

    /// Rotates the node around `axis` through the world-space point `pivot`:
    /// translate(-pivot), rotate, translate(+pivot), composed as one
    /// world-space operation and back-solved to local space.
    pub fn rotate_around(&mut self, id: ObjectId, axis: Vec3, pivot: Vec3, angle: f32) {
        let mut world_transformation = Matrix4x4::IDENTITY;
        world_transformation.translate(-pivot.x, -pivot.y, -pivot.z);
        world_transformation.pre_rotate(axis, angle);
        world_transformation.pre_translate(pivot.x, pivot.y, pivot.z);
        self.transform_by_world(id, &world_transformation);
    }

    /// Re-orients the node to face the world-space point `target`.
    ///
    /// The look-at matrix is built in world space at the node's current world
    /// position, converted into the parent's frame by the inverse of the
    /// parent's world matrix, and assigned as the local matrix directly: the
    /// back-solve is unnecessary here since the orientation is rebuilt from
    /// scratch rather than applied incrementally.
    pub fn look_at(&mut self, id: ObjectId, target: Vec3, up: Vec3) {
        self.update_world_matrix(id);
        let Some(object) = self.objects.get(id) else {
            return;
        };
        let src = object.transform.world_matrix().transform_point(Vec3::ZERO);
        let parent_id = object.parent_id;

        let mut look = Matrix4x4::look_at(src, target, up);

        if let Some(parent_id) = parent_id {
            let mut parent_world = self.calculate_world_matrix(parent_id);
            if let Some(parent) = self.objects.get_mut(parent_id) {
                parent.transform.set_world_matrix(parent_world);
            }
            if parent_world.invert() {
                look.pre_multiply(&parent_world);
            } else {
                log::warn!("look_at: parent world matrix is singular, using world-space result");
            }
        }

        if let Some(object) = self.objects.get_mut(id) {
            object.transform.set_local_matrix(look);
        }
    }

    /// Moves the node so its world-space position becomes exactly `position`,
    /// regardless of ancestor transforms. The world matrix cache is refreshed
    /// from the already-computed ancestor product rather than a second tree
    /// walk.
    pub fn set_world_position(&mut self, id: ObjectId, position: Vec3) {
        if !self.objects.contains(id) {
            return;
        }

        let ancestor = self.ancestor_world_matrix(id);
        let mut full = ancestor;
        full.multiply(self.objects[id].transform.local_matrix());

        let old_position = full.transform_point(Vec3::ZERO);
        let to_new_position = position - old_position;

        let mut world_translate = Matrix4x4::IDENTITY;
        world_translate.pre_translate_vec(to_new_position);

        match Transform::local_from_world(&world_translate, &full) {
            Some(local_translate) => {
                let object = &mut self.objects[id];
                object.transform.local_matrix_mut().multiply(&local_translate);

                let mut world = ancestor;
                world.multiply(object.transform.local_matrix());
                object.transform.set_world_matrix(world);
            }
            None => {
                log::warn!("set_world_position skipped: full transform is singular");
            }
        }
    }

    /// The node's current world-space position (recomputes the world matrix).
    pub fn world_position(&mut self, id: ObjectId) -> Vec3 {
        self.update_world_matrix(id);
        self.objects
            .get(id)
            .map(|object| object.transform.world_matrix().transform_point(Vec3::ZERO))
            .unwrap_or(Vec3::ZERO)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tag(ComponentKind);

    impl Component for Tag {
        fn kind(&self) -> ComponentKind {
            self.0
        }
    }

    #[test]
    fn create_object_assigns_monotonic_ids() {
        let mut scene = Scene::new();
        let a = scene.create_object("a");
        let b = scene.create_object("b");
        assert_eq!(scene.get_object(a).unwrap().id(), 0);
        assert_eq!(scene.get_object(b).unwrap().id(), 1);
    }

    #[test]
    fn add_child_twice_is_a_no_op() {
        let mut scene = Scene::new();
        let parent = scene.create_object("parent");
        let child = scene.create_object("child");
        scene.add_child(parent, child).unwrap();
        scene.add_child(parent, child).unwrap();
        assert_eq!(scene.get_object(parent).unwrap().child_count(), 1);
    }

    #[test]
    fn add_child_rejects_cycles() {
        let mut scene = Scene::new();
        let a = scene.create_object("a");
        let b = scene.create_object("b");
        let c = scene.create_object("c");
        scene.add_child(a, b).unwrap();
        scene.add_child(b, c).unwrap();

        assert_eq!(scene.add_child(c, a), Err(Error::HierarchyCycle));
        assert_eq!(scene.add_child(a, a), Err(Error::HierarchyCycle));
    }

    #[test]
    fn reparenting_moves_between_parents() {
        let mut scene = Scene::new();
        let p1 = scene.create_object("p1");
        let p2 = scene.create_object("p2");
        let child = scene.create_object("child");

        scene.add_child(p1, child).unwrap();
        scene.add_child(p2, child).unwrap();

        assert_eq!(scene.get_object(p1).unwrap().child_count(), 0);
        assert_eq!(scene.get_object(p2).unwrap().child_count(), 1);
        assert_eq!(scene.get_object(child).unwrap().parent_id(), Some(p2));
    }

    #[test]
    fn destroy_object_releases_descendants_and_components() {
        let mut scene = Scene::new();
        let root = scene.create_object("root");
        let child = scene.create_object("child");
        scene.add_child(root, child).unwrap();

        let light = scene.add_component(Box::new(Tag(ComponentKind::Light)));
        scene.attach_component(child, light).unwrap();

        scene.destroy_object(root).unwrap();
        assert!(scene.get_object(root).is_none());
        assert!(scene.get_object(child).is_none());
        assert!(scene.get_component(light).is_none());
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn destroy_object_unlinks_from_parent() {
        let mut scene = Scene::new();
        let root = scene.create_object("root");
        let child = scene.create_object("child");
        scene.add_child(root, child).unwrap();

        scene.destroy_object(child).unwrap();
        assert_eq!(scene.get_object(root).unwrap().child_count(), 0);
    }

    #[test]
    fn first_component_of_a_kind_wins_the_slot() {
        let mut scene = Scene::new();
        let node = scene.create_object("node");

        let first = scene.add_component(Box::new(Tag(ComponentKind::Camera)));
        let second = scene.add_component(Box::new(Tag(ComponentKind::Camera)));

        assert_eq!(
            scene.attach_component(node, first).unwrap(),
            Some(ComponentKind::Camera)
        );
        // second camera is appended but does not take the slot
        assert_eq!(scene.attach_component(node, second).unwrap(), None);

        let object = scene.get_object(node).unwrap();
        assert_eq!(object.component_ids().len(), 2);
        assert_eq!(object.component_of_kind(ComponentKind::Camera), Some(first));
    }

    #[test]
    fn attaching_same_component_instance_is_a_no_op() {
        let mut scene = Scene::new();
        let node = scene.create_object("node");
        let light = scene.add_component(Box::new(Tag(ComponentKind::Light)));

        assert_eq!(
            scene.attach_component(node, light).unwrap(),
            Some(ComponentKind::Light)
        );
        assert_eq!(scene.attach_component(node, light).unwrap(), None);
        assert_eq!(scene.get_object(node).unwrap().component_ids().len(), 1);
    }

    #[test]
    fn get_object_by_name_finds_nodes() {
        let mut scene = Scene::new();
        scene.create_object("a");
        let b = scene.create_object("b");
        assert_eq!(scene.get_object_by_name("b"), Some(b));
        assert_eq!(scene.get_object_by_name("missing"), None);
    }
}
