use glam::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub name: String,
    pub parent: Option<usize>,
    /// Bind-pose translation relative to the parent joint.
    pub offset: Vec3,
}

impl Joint {
    pub fn root(name: impl Into<String>, offset: Vec3) -> Self {
        Self {
            name: name.into(),
            parent: None,
            offset,
        }
    }

    pub fn new(name: impl Into<String>, parent: usize, offset: Vec3) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
            offset,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Parent as a signed index, `-1` for roots.
    pub fn parent_index(&self) -> i32 {
        self.parent.map_or(-1, |p| p as i32)
    }
}
