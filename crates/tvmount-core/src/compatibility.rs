use crate::catalog::{Catalog, MountKind, WallMountType};

const FIXED_MAX_INCHES: u32 = 43;
const TILTING_MAX_INCHES: u32 = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountResolution {
    Keep(MountKind),
    Replace { previous: Option<MountKind>, next: MountKind },
    ForceCustom,
}

pub fn is_compatible(mount: &WallMountType, inches: u32) -> bool {
    mount.max_size >= inches
}

/// Mounts able to carry a TV of `inches`, in catalog order. Empty means the
/// customer has to bring their own mount.
pub fn compatible_mounts(catalog: &Catalog, inches: u32) -> Vec<&WallMountType> {
    catalog
        .mount_types()
        .iter()
        .filter(|mount| is_compatible(mount, inches))
        .collect()
}

/// Advisory only. Lower bucket is inclusive: 43 is fixed, 65 is tilting.
pub fn recommended_mount(inches: u32) -> MountKind {
    if inches <= FIXED_MAX_INCHES {
        MountKind::Fixed
    } else if inches <= TILTING_MAX_INCHES {
        MountKind::Tilting
    } else {
        MountKind::Articulating
    }
}

/// Decides what mount selection survives a size change.
pub fn resolve_mount_for_size(
    catalog: &Catalog,
    inches: u32,
    current: Option<MountKind>,
) -> MountResolution {
    let candidates = compatible_mounts(catalog, inches);

    if let Some(kind) = current {
        if candidates.iter().any(|mount| mount.kind == kind) {
            return MountResolution::Keep(kind);
        }
    }

    let recommended = recommended_mount(inches);
    let next = candidates
        .iter()
        .find(|mount| mount.kind == recommended)
        .or_else(|| candidates.first())
        .map(|mount| mount.kind);

    match next {
        Some(next) => MountResolution::Replace {
            previous: current,
            next,
        },
        None => MountResolution::ForceCustom,
    }
}
