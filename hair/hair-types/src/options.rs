//! Export configuration.

use hashbrown::HashSet;

use crate::error::ConfigError;

/// Valid vertices-per-strand counts. The simulation engine only handles
/// these strand widths.
pub const VALID_VERTEX_COUNTS: [usize; 4] = [4, 8, 16, 32];

/// How bones are selected for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoneExportMode {
    /// Every deform bone with a non-empty vertex group on the skin mesh.
    #[default]
    AllWithWeight,
    /// Only bones named in the export set.
    Whitelist,
    /// All qualifying bones except those named in the export set.
    Blacklist,
}

/// Immutable export options, validated once at pipeline entry.
///
/// Defaults: 8 vertices per strand, a small minimum length, axis flips
/// on (the target engine uses a left-handed convention), LOD
/// randomization on.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Vertices per strand after resampling; must be 4, 8, 16 or 32.
    pub vertices_per_strand: usize,

    /// Strands with arc length below this are discarded; 0 disables the
    /// filter.
    pub minimum_curve_length: f64,

    /// Pin the last two vertices of each strand in addition to the
    /// always-pinned first two.
    pub both_ends_immovable: bool,

    /// Negate the Z component of exported positions.
    pub invert_z_axis: bool,

    /// Flip the V axis of exported UVs (v -> 1 - v).
    pub invert_uv_y_axis: bool,

    /// Shuffle surviving strands with a fixed seed so prefix truncation
    /// yields a spatially uniform LOD subsample.
    pub randomize_for_lod: bool,

    /// Bone selection mode.
    pub bone_export_mode: BoneExportMode,

    /// Bone-name set for whitelist/blacklist modes.
    pub export_bones: HashSet<String>,

    /// Add provenance fields to the output and disable shuffling.
    pub debug_mode: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            vertices_per_strand: 8,
            minimum_curve_length: 0.001,
            both_ends_immovable: false,
            invert_z_axis: true,
            invert_uv_y_axis: true,
            randomize_for_lod: true,
            bone_export_mode: BoneExportMode::AllWithWeight,
            export_bones: HashSet::new(),
            debug_mode: false,
        }
    }
}

impl ExportOptions {
    /// Set the vertices-per-strand count.
    #[must_use]
    pub fn with_vertices_per_strand(mut self, count: usize) -> Self {
        self.vertices_per_strand = count;
        self
    }

    /// Set the minimum strand arc length (0 disables the filter).
    #[must_use]
    pub fn with_minimum_curve_length(mut self, length: f64) -> Self {
        self.minimum_curve_length = length;
        self
    }

    /// Set the bone export mode and its bone-name set.
    #[must_use]
    pub fn with_bone_mode(
        mut self,
        mode: BoneExportMode,
        bones: impl IntoIterator<Item = String>,
    ) -> Self {
        self.bone_export_mode = mode;
        self.export_bones = bones.into_iter().collect();
        self
    }

    /// Validate field values.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an invalid vertices-per-strand
    /// count, a negative or non-finite minimum length, or an empty bone
    /// set under whitelist/blacklist mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_VERTEX_COUNTS.contains(&self.vertices_per_strand) {
            return Err(ConfigError::InvalidVerticesPerStrand {
                got: self.vertices_per_strand,
            });
        }
        if !self.minimum_curve_length.is_finite() || self.minimum_curve_length < 0.0 {
            return Err(ConfigError::InvalidMinimumCurveLength {
                got: self.minimum_curve_length,
            });
        }
        if self.bone_export_mode != BoneExportMode::AllWithWeight && self.export_bones.is_empty() {
            return Err(ConfigError::EmptyBoneSet {
                mode: self.bone_export_mode,
            });
        }
        Ok(())
    }
}
