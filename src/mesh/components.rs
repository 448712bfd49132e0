use std::collections::HashMap;

use super::Mesh;

/// Labels each vertex with the 1-based id of its connected component.
///
/// Faces are connected when they share an edge; a single shared vertex does
/// not join two parts. Components are numbered by their lowest vertex index.
/// A vertex on several components (a pinch point) takes the smallest id.
/// Vertices used by no face are labelled 0.
pub fn connected_components(mesh: &Mesh) -> Vec<i32> {
    let faces = mesh.faces();
    let mut parent: Vec<usize> = (0..faces.len()).collect();
    let mut edge_owner: HashMap<(u32, u32), usize> = HashMap::new();

    for (f, &[a, b, c]) in faces.iter().enumerate() {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            let key = (u.min(v), u.max(v));
            match edge_owner.get(&key) {
                Some(&other) => union(&mut parent, f, other),
                None => {
                    edge_owner.insert(key, f);
                }
            }
        }
    }

    // lowest vertex of every face component
    let mut lowest: HashMap<usize, u32> = HashMap::new();
    for (f, face) in faces.iter().enumerate() {
        let root = find(&mut parent, f);
        let min = face.iter().copied().min().unwrap_or(u32::MAX);
        lowest
            .entry(root)
            .and_modify(|m| *m = (*m).min(min))
            .or_insert(min);
    }

    let mut roots: Vec<(u32, usize)> = lowest.into_iter().map(|(r, m)| (m, r)).collect();
    roots.sort_unstable();
    let ids: HashMap<usize, i32> = roots
        .into_iter()
        .enumerate()
        .map(|(i, (_, root))| (root, i as i32 + 1))
        .collect();

    let mut labels = vec![0; mesh.vertex_count()];
    for (f, face) in faces.iter().enumerate() {
        let id = ids[&find(&mut parent, f)];
        for &v in face {
            let label = &mut labels[v as usize];
            if *label == 0 || id < *label {
                *label = id;
            }
        }
    }

    labels
}

fn find(parent: &mut [usize], mut v: usize) -> usize {
    while parent[v] != v {
        parent[v] = parent[parent[v]];
        v = parent[v];
    }
    v
}

fn union(parent: &mut [usize], a: usize, b: usize) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[hi] = lo;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn disjoint_parts_get_distinct_ids() {
        let mesh = Mesh::new(
            vec![Vec3::ZERO; 8],
            vec![[4, 5, 6], [0, 1, 2], [2, 1, 7]],
        )
        .unwrap();

        assert_eq!(connected_components(&mesh), vec![1, 1, 1, 0, 2, 2, 2, 1]);
    }

    #[test]
    fn faces_sharing_only_a_vertex_stay_apart() {
        let mesh = Mesh::new(vec![Vec3::ZERO; 5], vec![[2, 3, 4], [0, 1, 2]]).unwrap();
        assert_eq!(connected_components(&mesh), vec![1, 1, 1, 2, 2]);
    }

    #[test]
    fn edge_chain_is_one_component() {
        // strip of three triangles, each sharing one edge with the next
        let mesh = Mesh::new(
            vec![Vec3::ZERO; 5],
            vec![[3, 4, 2], [0, 1, 2], [1, 3, 2]],
        )
        .unwrap();
        assert_eq!(connected_components(&mesh), vec![1; 5]);
    }
}
