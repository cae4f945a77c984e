use approx::assert_relative_eq;
use armature::{Matrix4x4, Scene, TransformationSpace};
use glam::{vec3, Vec3};

const EPSILON: f32 = 1e-5;

fn assert_vec3_eq(a: Vec3, b: Vec3) {
    assert_relative_eq!(a.x, b.x, epsilon = EPSILON);
    assert_relative_eq!(a.y, b.y, epsilon = EPSILON);
    assert_relative_eq!(a.z, b.z, epsilon = EPSILON);
}

#[test]
fn three_level_chain_accumulates_translations() {
    let mut scene = Scene::new();
    let a = scene.create_object("a");
    let b = scene.create_object("b");
    let c = scene.create_object("c");
    scene.add_child(a, b).unwrap();
    scene.add_child(b, c).unwrap();

    scene.translate(a, vec3(1.0, 0.0, 0.0), TransformationSpace::Local);
    scene.translate(b, vec3(0.0, 1.0, 0.0), TransformationSpace::Local);
    scene.translate(c, vec3(0.0, 0.0, 1.0), TransformationSpace::Local);

    assert_vec3_eq(scene.world_position(c), vec3(1.0, 1.0, 1.0));
}

#[test]
fn add_child_preserves_world_placement() {
    let mut scene = Scene::new();
    let p = scene.create_object("p");
    let q = scene.create_object("q");

    scene.set_world_position(p, vec3(5.0, 0.0, 0.0));
    scene.set_world_position(q, vec3(5.0, 5.0, 0.0));

    scene.add_child(p, q).unwrap();

    assert_vec3_eq(scene.world_position(q), vec3(5.0, 5.0, 0.0));
    // and the local matrix now carries only the difference
    let local = scene
        .get_object(q)
        .unwrap()
        .transform
        .local_position();
    assert_vec3_eq(local, vec3(0.0, 5.0, 0.0));
}

#[test]
fn add_child_preserves_placement_under_rotated_parent() {
    let mut scene = Scene::new();
    let p = scene.create_object("p");
    let q = scene.create_object("q");

    scene.rotate(
        p,
        Vec3::Z,
        std::f32::consts::FRAC_PI_2,
        TransformationSpace::Local,
    );
    scene.set_world_position(p, vec3(2.0, 0.0, 0.0));
    scene.set_world_position(q, vec3(-1.0, 4.0, 0.5));

    scene.add_child(p, q).unwrap();
    assert_vec3_eq(scene.world_position(q), vec3(-1.0, 4.0, 0.5));
}

#[test]
fn remove_child_bakes_world_into_local() {
    let mut scene = Scene::new();
    let p = scene.create_object("p");
    let q = scene.create_object("q");

    scene.set_world_position(p, vec3(5.0, 0.0, 0.0));
    scene.set_world_position(q, vec3(5.0, 5.0, 0.0));
    scene.add_child(p, q).unwrap();

    assert!(scene.remove_child(p, q).unwrap());

    let q_obj = scene.get_object(q).unwrap();
    assert_eq!(q_obj.parent_id(), None);
    assert_vec3_eq(q_obj.transform.local_position(), vec3(5.0, 5.0, 0.0));
    assert_vec3_eq(scene.world_position(q), vec3(5.0, 5.0, 0.0));
}

#[test]
fn set_world_position_is_exact_under_ancestor_transforms() {
    let mut scene = Scene::new();
    let root = scene.create_object("root");
    let mid = scene.create_object("mid");
    let leaf = scene.create_object("leaf");
    scene.add_child(root, mid).unwrap();
    scene.add_child(mid, leaf).unwrap();

    scene.rotate(root, Vec3::Y, 0.9, TransformationSpace::Local);
    scene.translate(root, vec3(3.0, -2.0, 1.0), TransformationSpace::Local);
    scene.rotate(mid, Vec3::X, -0.4, TransformationSpace::Local);
    scene.translate(mid, vec3(0.0, 1.0, 0.0), TransformationSpace::Local);

    let target = vec3(7.0, 8.0, 9.0);
    scene.set_world_position(leaf, target);
    assert_vec3_eq(scene.world_position(leaf), target);

    // the cached world matrix is already fresh after set_world_position
    let cached = scene
        .get_object(leaf)
        .unwrap()
        .transform
        .world_matrix()
        .transform_point(Vec3::ZERO);
    assert_vec3_eq(cached, target);
}

#[test]
fn world_space_rotation_matches_root_level_rotation() {
    // conjugation law: rotating a child in world space must land on the same
    // world orientation as applying the rotation to an equivalent root node
    let axis = vec3(0.3, 1.0, -0.2);
    let angle = 0.8;

    let mut scene = Scene::new();
    let parent = scene.create_object("parent");
    let child = scene.create_object("child");
    scene.add_child(parent, child).unwrap();

    scene.rotate(parent, Vec3::Z, 0.6, TransformationSpace::Local);
    scene.translate(parent, vec3(1.0, 2.0, 0.0), TransformationSpace::Local);
    scene.rotate(child, Vec3::X, 0.25, TransformationSpace::Local);

    // root-level reference with an identical starting world transform
    let mut reference = Scene::new();
    let lone = reference.create_object("lone");
    let world_before = scene.calculate_world_matrix(child);
    reference
        .get_object_mut(lone)
        .unwrap()
        .transform
        .set_local_matrix(world_before);

    scene.rotate(child, axis, angle, TransformationSpace::World);
    reference.rotate(lone, axis, angle, TransformationSpace::World);

    let world_child = scene.calculate_world_matrix(child);
    let world_lone = reference.calculate_world_matrix(lone);
    for (a, b) in world_child
        .as_slice()
        .iter()
        .zip(world_lone.as_slice().iter())
    {
        assert!((a - b).abs() < 1e-4, "{} vs {}", a, b);
    }
}

#[test]
fn rotate_around_world_pivot_orbits_the_node() {
    let mut scene = Scene::new();
    let parent = scene.create_object("parent");
    let node = scene.create_object("node");
    scene.add_child(parent, node).unwrap();

    scene.translate(parent, vec3(0.0, 0.0, 2.0), TransformationSpace::Local);
    scene.set_world_position(node, vec3(2.0, 0.0, 0.0));

    // half turn around the world y axis through the origin
    scene.rotate_around(node, Vec3::Y, Vec3::ZERO, std::f32::consts::PI);
    assert_vec3_eq(scene.world_position(node), vec3(-2.0, 0.0, 0.0));

    // quarter turn around a pivot offset from the node
    scene.set_world_position(node, vec3(1.0, 0.0, 0.0));
    scene.rotate_around(
        node,
        Vec3::Z,
        vec3(1.0, 1.0, 0.0),
        std::f32::consts::FRAC_PI_2,
    );
    assert_vec3_eq(scene.world_position(node), vec3(2.0, 1.0, 0.0));
}

#[test]
fn look_at_faces_target_from_inside_a_hierarchy() {
    let mut scene = Scene::new();
    let parent = scene.create_object("parent");
    let node = scene.create_object("node");
    scene.add_child(parent, node).unwrap();

    scene.rotate(parent, Vec3::Y, 1.2, TransformationSpace::Local);
    scene.translate(parent, vec3(0.0, 3.0, 0.0), TransformationSpace::Local);
    scene.set_world_position(node, vec3(0.0, 0.0, 5.0));

    let target = vec3(0.0, 0.0, -1.0);
    scene.look_at(node, target, Vec3::Y);

    scene.update_world_matrix(node);
    let world = *scene.get_object(node).unwrap().transform.world_matrix();

    // world position is unchanged by a pure re-orientation
    assert_vec3_eq(world.transform_point(Vec3::ZERO), vec3(0.0, 0.0, 5.0));

    // the world -z axis of the node points at the target
    let forward = world.transform_direction(vec3(0.0, 0.0, -1.0)).normalize();
    let expected = (target - vec3(0.0, 0.0, 5.0)).normalize();
    assert_vec3_eq(forward, expected);
}

#[test]
fn world_matrix_cache_is_stale_until_recomputed() {
    let mut scene = Scene::new();
    let parent = scene.create_object("parent");
    let child = scene.create_object("child");
    scene.add_child(parent, child).unwrap();

    scene.update_world_matrix(child);
    scene.translate(parent, vec3(1.0, 0.0, 0.0), TransformationSpace::Local);

    // no dirty propagation: the cached world matrix still reads the old value
    let cached = scene
        .get_object(child)
        .unwrap()
        .transform
        .world_matrix()
        .transform_point(Vec3::ZERO);
    assert_vec3_eq(cached, Vec3::ZERO);

    scene.update_world_matrix(child);
    let cached = scene
        .get_object(child)
        .unwrap()
        .transform
        .world_matrix()
        .transform_point(Vec3::ZERO);
    assert_vec3_eq(cached, vec3(1.0, 0.0, 0.0));
}

#[test]
fn update_all_world_matrices_refreshes_whole_tree() {
    let mut scene = Scene::new();
    let a = scene.create_object("a");
    let b = scene.create_object("b");
    let c = scene.create_object("c");
    scene.add_child(a, b).unwrap();
    scene.add_child(b, c).unwrap();

    scene.translate(a, vec3(1.0, 0.0, 0.0), TransformationSpace::Local);
    scene.translate(b, vec3(0.0, 1.0, 0.0), TransformationSpace::Local);
    scene.translate(c, vec3(0.0, 0.0, 1.0), TransformationSpace::Local);

    scene.update_all_world_matrices();

    let read = |scene: &Scene, id| {
        scene
            .get_object(id)
            .unwrap()
            .transform
            .world_matrix()
            .transform_point(Vec3::ZERO)
    };
    assert_vec3_eq(read(&scene, a), vec3(1.0, 0.0, 0.0));
    assert_vec3_eq(read(&scene, b), vec3(1.0, 1.0, 0.0));
    assert_vec3_eq(read(&scene, c), vec3(1.0, 1.0, 1.0));
}

#[test]
fn transform_by_matches_manual_multiplication() {
    let mut scene = Scene::new();
    let node = scene.create_object("node");

    let mut op = Matrix4x4::from_axis_angle(Vec3::Z, 0.5);
    op.translate(1.0, 0.0, 0.0);

    scene.transform_by(node, &op, TransformationSpace::Local);
    let local = *scene.get_object(node).unwrap().transform.local_matrix();
    for (a, b) in local.as_slice().iter().zip(op.as_slice().iter()) {
        assert!((a - b).abs() < EPSILON);
    }
}
