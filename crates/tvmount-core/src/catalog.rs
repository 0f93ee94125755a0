use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountKind {
    Fixed,
    Tilting,
    Articulating,
}

impl MountKind {
    pub const ALL: [MountKind; 3] = [Self::Fixed, Self::Tilting, Self::Articulating];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Tilting => "tilting",
            Self::Articulating => "articulating",
        }
    }
}

impl fmt::Display for MountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MountKind {
    type Err = ParseKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_kind(value, "wall mount", &Self::ALL, |kind| kind.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Drywall,
    Brick,
    Concrete,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 3] = [Self::Drywall, Self::Brick, Self::Concrete];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drywall => "drywall",
            Self::Brick => "brick",
            Self::Concrete => "concrete",
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurfaceKind {
    type Err = ParseKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_kind(value, "wall surface", &Self::ALL, |kind| kind.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what} '{value}'; expected one of: {expected}")]
pub struct ParseKindError {
    pub what: &'static str,
    pub value: String,
    pub expected: String,
}

fn parse_kind<K: Copy>(
    value: &str,
    what: &'static str,
    all: &[K],
    name: impl Fn(K) -> &'static str,
) -> Result<K, ParseKindError> {
    let wanted = value.trim();
    all.iter()
        .copied()
        .find(|kind| name(*kind).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ParseKindError {
            what,
            value: value.to_string(),
            expected: all
                .iter()
                .map(|kind| name(*kind))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TvSizeClass {
    pub inches: u32,
    pub base_price: Money,
    pub weight_range: String,
}

impl TvSizeClass {
    pub fn label(&self) -> String {
        format!("{}\"", self.inches)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallMountType {
    pub kind: MountKind,
    pub name: String,
    pub price: Money,
    pub max_size: u32,
    pub max_weight_lbs: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSurfaceType {
    pub kind: SurfaceKind,
    pub additional_fee: Money,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("TV size {inches}\" is not in the catalog")]
    SizeNotFound { inches: u32 },
    #[error("wall mount '{kind}' is not in the catalog")]
    MountNotFound { kind: MountKind },
    #[error("wall surface '{kind}' is not in the catalog")]
    SurfaceNotFound { kind: SurfaceKind },
}

/// Reference tables shared by every pricing and compatibility decision.
///
/// Built once per process and handed out by reference; nothing mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    sizes: Vec<TvSizeClass>,
    mounts: Vec<WallMountType>,
    surfaces: Vec<WallSurfaceType>,
}

impl Catalog {
    pub fn standard() -> Self {
        let sizes = [
            (32, 99, "15-20 lbs"),
            (43, 129, "20-30 lbs"),
            (55, 149, "30-40 lbs"),
            (65, 179, "40-55 lbs"),
            (75, 199, "55-70 lbs"),
            (85, 249, "70-90 lbs"),
        ]
        .into_iter()
        .map(|(inches, price, weight)| TvSizeClass {
            inches,
            base_price: Money::new(price),
            weight_range: weight.to_string(),
        })
        .collect();

        let mounts = vec![
            WallMountType {
                kind: MountKind::Fixed,
                name: "Fixed Mount".to_string(),
                price: Money::new(49),
                max_size: 85,
                max_weight_lbs: 100,
                description: "Keeps TV flat against wall".to_string(),
            },
            WallMountType {
                kind: MountKind::Tilting,
                name: "Tilting Mount".to_string(),
                price: Money::new(79),
                max_size: 75,
                max_weight_lbs: 80,
                description: "Allows up/down angle adjustment".to_string(),
            },
            WallMountType {
                kind: MountKind::Articulating,
                name: "Full Motion Mount".to_string(),
                price: Money::new(119),
                max_size: 65,
                max_weight_lbs: 60,
                description: "Complete movement and rotation".to_string(),
            },
        ];

        let surfaces = vec![
            WallSurfaceType {
                kind: SurfaceKind::Drywall,
                additional_fee: Money::ZERO,
                note: "Standard anchors and stud mounting".to_string(),
            },
            WallSurfaceType {
                kind: SurfaceKind::Brick,
                additional_fee: Money::new(50),
                note: "Masonry drilling required".to_string(),
            },
            WallSurfaceType {
                kind: SurfaceKind::Concrete,
                additional_fee: Money::new(75),
                note: "Masonry drilling with concrete anchors".to_string(),
            },
        ];

        Self::from_tables(sizes, mounts, surfaces)
    }

    /// Sizes are kept in ascending order; mounts and surfaces keep the given order.
    pub fn from_tables(
        mut sizes: Vec<TvSizeClass>,
        mounts: Vec<WallMountType>,
        surfaces: Vec<WallSurfaceType>,
    ) -> Self {
        sizes.sort_by_key(|size| size.inches);
        Self {
            sizes,
            mounts,
            surfaces,
        }
    }

    pub fn size_classes(&self) -> &[TvSizeClass] {
        &self.sizes
    }

    pub fn mount_types(&self) -> &[WallMountType] {
        &self.mounts
    }

    pub fn surface_types(&self) -> &[WallSurfaceType] {
        &self.surfaces
    }

    pub fn find_size(&self, inches: u32) -> Result<&TvSizeClass, CatalogError> {
        self.sizes
            .iter()
            .find(|size| size.inches == inches)
            .ok_or(CatalogError::SizeNotFound { inches })
    }

    pub fn find_mount(&self, kind: MountKind) -> Result<&WallMountType, CatalogError> {
        self.mounts
            .iter()
            .find(|mount| mount.kind == kind)
            .ok_or(CatalogError::MountNotFound { kind })
    }

    pub fn find_surface(&self, kind: SurfaceKind) -> Result<&WallSurfaceType, CatalogError> {
        self.surfaces
            .iter()
            .find(|surface| surface.kind == kind)
            .ok_or(CatalogError::SurfaceNotFound { kind })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
