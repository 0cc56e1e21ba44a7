//! Armature (bone set) types.

/// A named bone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bone {
    /// Bone name; matches vertex group names on the skin mesh.
    pub name: String,
    /// Whether the bone deforms geometry. Non-deform bones (control
    /// or mechanism bones) are never exported.
    pub deform: bool,
}

impl Bone {
    /// Create a deform bone.
    #[must_use]
    pub fn deform(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deform: true,
        }
    }
}

/// The armature driving the skin mesh.
///
/// Bone order is the authoring tool's order and is preserved; it is the
/// tie-break order for equal-weight influences, so it matters for
/// deterministic output.
#[derive(Debug, Clone, Default)]
pub struct Armature {
    /// Bones in authoring order.
    pub bones: Vec<Bone>,
}

impl Armature {
    /// Create an armature from a bone list.
    #[must_use]
    pub fn new(bones: Vec<Bone>) -> Self {
        Self { bones }
    }

    /// Number of bones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Whether the armature has no bones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}
