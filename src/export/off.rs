use std::io::Write;

use glam::Vec3;

use crate::error::Result;
use crate::mesh::Mesh;

/// Writes `mesh` as OFF with its faces over `vertices`.
///
/// `vertices` is usually one deformed frame; it must match the mesh vertex
/// count so face indices stay valid.
pub fn write_off<W: Write>(out: &mut W, mesh: &Mesh, vertices: &[Vec3]) -> Result<()> {
    let mesh = mesh.with_vertices(vertices.to_vec())?;

    writeln!(out, "OFF")?;
    writeln!(out, "{} {} 0", mesh.vertex_count(), mesh.face_count())?;
    for v in mesh.vertices() {
        writeln!(out, "{:.10} {:.10} {:.10}", v.x, v.y, v.z)?;
    }
    for [a, b, c] in mesh.faces() {
        writeln!(out, "3 {} {} {}", a, b, c)?;
    }
    Ok(())
}
