//! Path translation for the versioned KV engine.
//!
//! Logical paths such as `secret/app/db` are split by the engine into a data plane
//! (`secret/data/app/db`, used for read/write/delete) and a metadata plane
//! (`secret/metadata/app/db`, used for list). Paths outside the `secret/` mount, or
//! already carrying the target plane segment, pass through unchanged.

use super::constants::{KV_DATA_PREFIX, KV_METADATA_PREFIX, KV_MOUNT_PREFIX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Data,
    Metadata,
}

impl Plane {
    fn prefix(self) -> &'static str {
        match self {
            Plane::Data => KV_DATA_PREFIX,
            Plane::Metadata => KV_METADATA_PREFIX,
        }
    }
}

/// Rewrites the mount prefix of `path` into the prefix of `plane`, once.
pub fn to_plane(path: &str, plane: Plane) -> String {
    let target = plane.prefix();
    if path.starts_with(target) || !path.starts_with(KV_MOUNT_PREFIX) {
        return path.to_string();
    }
    path.replacen(KV_MOUNT_PREFIX, target, 1)
}

pub fn data_path(path: &str) -> String {
    to_plane(path, Plane::Data)
}

pub fn metadata_path(path: &str) -> String {
    to_plane(path, Plane::Metadata)
}

/// Whether `path` addresses a versioned engine's data plane, whose reads wrap the
/// fields in a `data` envelope.
pub fn is_data_plane(path: &str) -> bool {
    path.contains("/data/")
}
