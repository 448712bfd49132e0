use crate::error::{Result, RigError};

const ROW_SUM_TOLERANCE: f32 = 1e-3;

/// Dense `V x J` influence matrix, row-major, with one label per column.
///
/// Values are stored exactly as given; rows are neither clamped nor
/// renormalized.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinningWeights {
    labels: Vec<String>,
    vertices: usize,
    values: Vec<f32>,
}

impl SkinningWeights {
    pub fn new(labels: Vec<String>, vertices: usize, values: Vec<f32>) -> Result<Self> {
        let expected = vertices * labels.len();
        if values.len() != expected {
            return Err(RigError::InvalidWeights(format!(
                "{} values for {vertices} vertices x {} joints",
                values.len(),
                labels.len()
            )));
        }

        let weights = Self {
            labels,
            vertices,
            values,
        };

        let off = (0..vertices)
            .filter(|&v| (weights.row(v).iter().sum::<f32>() - 1.0).abs() > ROW_SUM_TOLERANCE)
            .count();
        if off > 0 {
            log::warn!("{off} of {vertices} weight rows do not sum to 1");
        }

        Ok(weights)
    }

    pub fn from_rows<S: Into<String>>(labels: Vec<S>, rows: Vec<Vec<f32>>) -> Result<Self> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let vertices = rows.len();
        let mut values = Vec::with_capacity(vertices * labels.len());

        for (v, row) in rows.into_iter().enumerate() {
            if row.len() != labels.len() {
                return Err(RigError::InvalidWeights(format!(
                    "row {v} has {} entries, expected {}",
                    row.len(),
                    labels.len()
                )));
            }
            values.extend(row);
        }

        Self::new(labels, vertices, values)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices
    }

    pub fn joint_count(&self) -> usize {
        self.labels.len()
    }

    pub fn row(&self, vertex: usize) -> &[f32] {
        let j = self.labels.len();
        &self.values[vertex * j..(vertex + 1) * j]
    }

    /// Non-zero `(column, weight)` entries of a row.
    pub fn nonzero(&self, vertex: usize) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.row(vertex)
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, w)| w != 0.0)
    }

    /// Element-wise sum of the rows of `vertices`.
    pub fn summed_rows(&self, vertices: &[u32]) -> Vec<f32> {
        let mut sum = vec![0.0; self.labels.len()];
        for &v in vertices {
            for (acc, w) in sum.iter_mut().zip(self.row(v as usize)) {
                *acc += w;
            }
        }
        sum
    }

    /// Total weight of each vertex on the columns whose label satisfies
    /// `predicate`.
    pub fn weight_on(&self, predicate: impl Fn(&str) -> bool) -> Vec<f32> {
        let columns: Vec<usize> = self
            .labels
            .iter()
            .enumerate()
            .filter(|(_, l)| predicate(l.as_str()))
            .map(|(i, _)| i)
            .collect();

        (0..self.vertices)
            .map(|v| {
                let row = self.row(v);
                columns.iter().map(|&c| row[c]).sum()
            })
            .collect()
    }
}
