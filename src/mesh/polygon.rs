use crate::error::{Result, RigError};

/// Splits one polygon into triangles. A quad `[a, b, c, d]` always becomes
/// `[a, b, c]` followed by `[c, d, a]`.
pub fn triangulate_polygon(face: usize, polygon: &[u32]) -> Result<Vec<[u32; 3]>> {
    match *polygon {
        [a, b, c] => Ok(vec![[a, b, c]]),
        [a, b, c, d] => Ok(vec![[a, b, c], [c, d, a]]),
        _ => Err(RigError::InvalidMeshFace {
            face,
            vertex_count: polygon.len(),
        }),
    }
}

pub fn triangulate<P: AsRef<[u32]>>(polygons: &[P]) -> Result<Vec<[u32; 3]>> {
    let mut triangles = Vec::with_capacity(polygons.len() * 2);
    for (f, polygon) in polygons.iter().enumerate() {
        triangles.extend(triangulate_polygon(f, polygon.as_ref())?);
    }
    Ok(triangles)
}
