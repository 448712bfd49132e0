use std::f32::consts::PI;
use std::fs::File;
use std::io::BufWriter;

use glam::{Mat3, Vec3};
use rig_deform::collision::{
    CollisionMaskFilter, CollisionPair, CollisionPairBuffer, SphereField, VertexMask,
};
use rig_deform::config::{Config, PipelineConfig};
use rig_deform::export;
use rig_deform::kinematics::{ForwardKinematics, PoseBatch, RotationEncoding};
use rig_deform::math::translation;
use rig_deform::mesh::Mesh;
use rig_deform::rig::JointHierarchy;
use rig_deform::skinning::{SkinnedRig, SkinningWeights};

const FRAMES: usize = 8;
const RING: usize = 4;
const RADIUS: f32 = 0.2;
/// Face centroids closer than this become candidate pairs.
const CONTACT_DISTANCE: f32 = 0.35;

type DemoResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Square tube along +X with one ring of vertices per unit, plus a loose
/// panel under the elbow so the mesh has two components.
fn arm_mesh() -> DemoResult<Mesh> {
    let rings = 4;
    let mut vertices = Vec::with_capacity(rings * RING);
    for r in 0..rings {
        for k in 0..RING {
            let a = k as f32 * PI * 0.5;
            vertices.push(Vec3::new(r as f32, RADIUS * a.cos(), RADIUS * a.sin()));
        }
    }

    let mut quads = Vec::new();
    for r in 0..rings - 1 {
        for k in 0..RING {
            let a = (r * RING + k) as u32;
            let b = (r * RING + (k + 1) % RING) as u32;
            quads.push([a, b, b + RING as u32, a + RING as u32]);
        }
    }
    let tube = Mesh::from_polygons(vertices, &quads)?;

    let panel = Mesh::from_polygons(
        vec![
            Vec3::new(0.8, -0.5, -0.5),
            Vec3::new(1.2, -0.5, -0.5),
            Vec3::new(1.2, -0.5, 0.5),
            Vec3::new(0.8, -0.5, 0.5),
        ],
        &[[0u32, 1, 2, 3]],
    )?;

    Ok(Mesh::merge(&[tube, panel]))
}

fn arm_weights(mesh: &Mesh) -> DemoResult<SkinningWeights> {
    let rows = mesh
        .vertices()
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if i >= 4 * RING {
                return vec![1.0, 0.0, 0.0];
            }
            match v.x.round() as i32 {
                0 => vec![1.0, 0.0, 0.0],
                1 => vec![0.5, 0.5, 0.0],
                2 => vec![0.0, 0.5, 0.5],
                _ => vec![0.0, 0.0, 1.0],
            }
        })
        .collect();
    Ok(SkinningWeights::from_rows(vec!["Root", "LeftArm", "LeftHand"], rows)?)
}

/// Elbow bending from straight to almost folded about +Z.
fn bend(encoding: RotationEncoding) -> DemoResult<PoseBatch> {
    let angles: Vec<f32> = (0..FRAMES)
        .map(|f| 0.9 * PI * f as f32 / (FRAMES - 1) as f32)
        .collect();

    let pose = match encoding {
        RotationEncoding::Euler => PoseBatch::from_euler(
            angles
                .iter()
                .map(|&a| vec![Vec3::ZERO, Vec3::new(0.0, 0.0, a), Vec3::ZERO])
                .collect(),
        )?,
        RotationEncoding::SixD => {
            let six_d = |m: Mat3| {
                let [x0, x1, x2] = m.x_axis.to_array();
                let [y0, y1, y2] = m.y_axis.to_array();
                [x0, x1, x2, y0, y1, y2]
            };
            PoseBatch::from_six_d(
                angles
                    .iter()
                    .map(|&a| {
                        vec![
                            six_d(Mat3::IDENTITY),
                            six_d(Mat3::from_rotation_z(a)),
                            six_d(Mat3::IDENTITY),
                        ]
                    })
                    .collect(),
            )?
        }
    };
    Ok(pose)
}

/// Brute-force centroid proximity, standing in for a real detector.
fn candidate_pairs(mesh: &Mesh, frames: &[Vec<Vec3>]) -> DemoResult<CollisionPairBuffer> {
    let mut per_frame = Vec::with_capacity(frames.len());
    for vertices in frames {
        let posed = mesh.with_vertices(vertices.clone())?;
        let mut pairs = Vec::new();
        for i in 0..posed.face_count() {
            for j in i + 1..posed.face_count() {
                let (fi, fj) = (posed.faces()[i], posed.faces()[j]);
                if fi.iter().any(|v| fj.contains(v)) {
                    continue;
                }
                let (Some(ci), Some(cj)) = (posed.face_centroid(i), posed.face_centroid(j)) else {
                    continue;
                };
                if ci.distance(cj) < CONTACT_DISTANCE {
                    pairs.push(CollisionPair::new(i as i32, j as i32));
                }
            }
        }
        per_frame.push(pairs);
    }

    let width = per_frame.iter().map(Vec::len).max().unwrap_or(0);
    let mut buffer = CollisionPairBuffer::empty(frames.len(), width);
    for (f, pairs) in per_frame.into_iter().enumerate() {
        for (slot, pair) in pairs.into_iter().enumerate() {
            buffer.set(f, slot, pair)?;
        }
    }
    Ok(buffer)
}

fn run() -> DemoResult<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => PipelineConfig::load_from_file(&path)?,
        None => PipelineConfig::default(),
    };
    let output = args.next();
    log::info!("encoding {:?}, filter {:?}", config.encoding, config.filter);

    let hierarchy = JointHierarchy::builder()
        .root("Root", Vec3::ZERO)
        .joint("LeftArm", "Root", Vec3::X)
        .joint("LeftHand", "LeftArm", Vec3::X)
        .build()?;

    let mesh = arm_mesh()?;
    let weights = arm_weights(&mesh)?;
    let rest = ForwardKinematics::rest_pose(&hierarchy)?;
    let binds = hierarchy.select(weights.labels())?.gather(&rest)?;
    let rig = SkinnedRig::new(hierarchy, weights, mesh.vertices().to_vec(), binds)?;

    let pose = bend(config.encoding)?;
    let frames = rig.animate(&pose)?;

    let mut buffer = candidate_pairs(&mesh, &frames)?;
    log::info!(
        "{} candidate pairs over {} frames",
        buffer.active_count(),
        buffer.frame_count()
    );

    let filter = CollisionMaskFilter::new(config.filter.clone());
    let components = VertexMask::components(&mesh);
    let report = filter.apply_component_rule(&mut buffer, &mesh, &components)?;
    log::info!("component rule kept {} of {}", report.kept(), report.examined);

    let report = filter.apply_weight_rule(&mut buffer, &mesh, rig.weights())?;
    log::info!("weight rule kept {} of {}", report.kept(), report.examined);

    let body = SphereField::new(Vec3::new(1.0, 0.0, 0.0), 0.25);
    let surface = filter.surface_mask(&body, &mesh, rig.weights())?;
    let report = filter.apply_component_rule(&mut buffer, &mesh, &surface)?;
    log::info!("surface rule kept {} of {}", report.kept(), report.examined);

    if let Some(prefix) = output {
        let last = frames.last().map(Vec::as_slice).unwrap_or(mesh.vertices());
        let mut off = BufWriter::new(File::create(format!("{prefix}.off"))?);
        export::write_off(&mut off, &mesh, last)?;

        let positions: Vec<Vec3> = rest.iter().map(translation).collect();
        let mut skel = BufWriter::new(File::create(format!("{prefix}.skel"))?);
        export::write_skel(&mut skel, rig.hierarchy(), &positions)?;

        let mut anim = BufWriter::new(File::create(format!("{prefix}.anim"))?);
        export::write_anim(&mut anim, &pose)?;
        log::info!("wrote {prefix}.off, {prefix}.skel, {prefix}.anim");
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
