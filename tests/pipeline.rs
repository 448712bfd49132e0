use std::f32::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use glam::{Mat3, Mat4, Vec3};
use rig_deform::collision::{
    CollisionMaskFilter, CollisionPairBuffer, MaskKind, SphereField, VertexMask,
};
use rig_deform::config::FilterConfig;
use rig_deform::kinematics::{ForwardKinematics, PoseBatch};
use rig_deform::mesh::Mesh;
use rig_deform::rig::JointHierarchy;
use rig_deform::skinning::{SkinnedRig, SkinningWeights};

fn chain() -> JointHierarchy {
    JointHierarchy::builder()
        .root("root", Vec3::Y)
        .joint("mid", "root", Vec3::Y)
        .joint("tip", "mid", Vec3::Y)
        .build()
        .unwrap()
}

fn six_d(m: Mat3) -> [f32; 6] {
    [
        m.x_axis.x, m.x_axis.y, m.x_axis.z, m.y_axis.x, m.y_axis.y, m.y_axis.z,
    ]
}

fn assert_vec3(a: Vec3, b: Vec3) {
    assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
    assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
    assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
}

#[test]
fn identity_pose_is_cumulative_translation() {
    let h = chain();
    let pose = PoseBatch::from_euler(vec![vec![Vec3::ZERO; 3]]).unwrap();
    let globals = ForwardKinematics::evaluate(&pose, &h).unwrap();

    let positions = globals.joint_positions(0);
    assert_vec3(positions[0], Vec3::ZERO);
    assert_vec3(positions[1], Vec3::new(0.0, 1.0, 0.0));
    assert_vec3(positions[2], Vec3::new(0.0, 2.0, 0.0));
}

#[test]
fn both_encodings_bend_the_chain_identically() {
    let h = chain();
    let euler = PoseBatch::from_euler(vec![vec![
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, FRAC_PI_2),
        Vec3::ZERO,
    ]])
    .unwrap();
    let sixd = PoseBatch::from_six_d(vec![vec![
        six_d(Mat3::IDENTITY),
        six_d(Mat3::from_rotation_z(FRAC_PI_2)),
        six_d(Mat3::IDENTITY),
    ]])
    .unwrap();

    let a = ForwardKinematics::evaluate(&euler, &h).unwrap();
    let b = ForwardKinematics::evaluate(&sixd, &h).unwrap();

    for (pa, pb) in a.joint_positions(0).into_iter().zip(b.joint_positions(0)) {
        assert_vec3(pa, pb);
    }
    assert_vec3(a.joint_positions(0)[0], Vec3::ZERO);
    assert_vec3(a.joint_positions(0)[2], Vec3::new(-1.0, 1.0, 0.0));
}

#[test]
fn skinned_chain_follows_its_joints() {
    let h = chain();
    let rest = ForwardKinematics::rest_pose(&h).unwrap();

    let weights = SkinningWeights::from_rows(
        vec!["mid", "tip"],
        vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]],
    )
    .unwrap();
    let bind = vec![
        Vec3::new(0.2, 1.5, 0.0),
        Vec3::new(0.0, 2.5, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
    ];
    let binds = h.select(weights.labels()).unwrap().gather(&rest).unwrap();
    let rig = SkinnedRig::new(h, weights, bind.clone(), binds).unwrap();

    let still = PoseBatch::from_euler(vec![vec![Vec3::ZERO; 3]]).unwrap();
    for (posed, expected) in rig.animate(&still).unwrap()[0].iter().zip(&bind) {
        assert_vec3(*posed, *expected);
    }

    let bent = PoseBatch::from_euler(vec![vec![
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, FRAC_PI_2),
        Vec3::ZERO,
    ]])
    .unwrap();
    let globals = ForwardKinematics::evaluate(&bent, rig.hierarchy()).unwrap();
    let selected = globals.select(0, rig.selection()).unwrap();
    let skin = rig.skin_matrices(&selected).unwrap();
    let posed = rig.deform(globals.frame(0)).unwrap();

    // one-hot vertices take exactly their joint's skin matrix
    assert_vec3(posed[0], skin[0].transform_point3(bind[0]));
    assert_vec3(posed[1], skin[1].transform_point3(bind[1]));
    assert_vec3(posed[0], Vec3::new(-0.5, 1.2, 0.0));
    assert_vec3(posed[1], Vec3::new(-1.5, 1.0, 0.0));

    // the 50/50 vertex blends the two matrices entry-wise
    let blended = skin[0] * 0.5 + skin[1] * 0.5;
    assert_vec3(posed[2], blended.transform_point3(bind[2]));
}

#[test]
fn aligned_binds_reproduce_rest_vertices() {
    let h = chain();
    let weights =
        SkinningWeights::from_rows(vec!["root", "tip"], vec![vec![0.3, 0.7]]).unwrap();
    let twisted = vec![
        Mat4::from_rotation_x(0.4),
        Mat4::from_rotation_translation(
            glam::Quat::from_rotation_y(1.1),
            Vec3::new(0.0, 2.0, 0.0),
        ),
    ];
    let rig = SkinnedRig::new(h, weights, vec![Vec3::new(0.1, 1.0, 0.3)], twisted).unwrap();

    let rest = ForwardKinematics::rest_pose(rig.hierarchy()).unwrap();
    let posed = rig.deform(&rest).unwrap();
    assert_vec3(posed[0], Vec3::new(0.1, 1.0, 0.3));
}

/// Two triangles far apart, each its own component, with equal weights.
fn twin_triangles() -> (Mesh, SkinningWeights) {
    let left = Mesh::from_polygons(
        vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        &[[0u32, 1, 2]],
    )
    .unwrap();
    let right = Mesh::from_polygons(
        vec![
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(6.0, 0.0, 0.0),
            Vec3::new(6.0, 1.0, 0.0),
            Vec3::new(5.0, 1.0, 0.0),
        ],
        &[[0u32, 1, 2, 3]],
    )
    .unwrap();
    let mesh = Mesh::merge(&[left, right]);
    let weights =
        SkinningWeights::from_rows(vec!["Spine", "LeftHand"], vec![vec![1.0, 0.0]; 7]).unwrap();
    (mesh, weights)
}

#[test]
fn merged_mesh_splits_quads_in_order() {
    let (mesh, _) = twin_triangles();
    assert_eq!(mesh.faces(), &[[0, 1, 2], [3, 4, 5], [5, 6, 3]]);
    assert_eq!(VertexMask::components(&mesh).values(), &[1, 1, 1, 2, 2, 2, 2]);
}

#[test]
fn component_rule_keeps_distinct_parts_weight_rule_drops_correlated() {
    let (mesh, weights) = twin_triangles();
    let filter = CollisionMaskFilter::new(FilterConfig::default());

    // frame 0: one real candidate and one padding slot
    let mut buffer = CollisionPairBuffer::from_flat(2, 2, &[0, 1, -1, -1, 1, 2, 0, 2]).unwrap();

    let components = VertexMask::components(&mesh);
    assert_eq!(components.kind(), MaskKind::Component);
    let report = filter
        .apply_component_rule(&mut buffer, &mesh, &components)
        .unwrap();
    // 0/1 and 0/2 cross parts, 1/2 lies inside the second part
    assert_eq!(report.examined, 3);
    assert_eq!(report.discarded, 1);
    assert_eq!(buffer.as_flat(), &[0, 1, -1, -1, -1, -1, 0, 2]);

    let report = filter.apply_weight_rule(&mut buffer, &mesh, &weights).unwrap();
    assert_eq!(report.examined, 2);
    assert_eq!(report.discarded, 2);
    assert_eq!(buffer.active_count(), 0);
    assert!(buffer.as_flat().iter().all(|&v| v == -1));
}

#[test]
fn hand_vertices_never_count_as_surface() {
    let (mesh, _) = twin_triangles();
    let mut rows = vec![vec![1.0, 0.0]; 7];
    rows[4] = vec![0.95, 0.05];
    let weights = SkinningWeights::from_rows(vec!["Spine", "LeftHand"], rows).unwrap();

    // everything sits far outside the field, so every vertex reads as surface
    let field = SphereField::new(Vec3::new(0.0, 0.0, -100.0), 1.0);
    let mask = CollisionMaskFilter::default()
        .surface_mask(&field, &mesh, &weights)
        .unwrap();

    assert_eq!(mask.kind(), MaskKind::Surface);
    assert_eq!(mask.values(), &[1, 1, 1, 1, -1, 1, 1]);
}
