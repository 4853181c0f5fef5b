//! Material geometries and composition tags.
//!
//! The geometry key is written on its own line ahead of the parameter array,
//! so this catalog does not render its discriminator and parameters start at
//! slot 1.

use super::{ModelCatalog, ModelKind, ModelVariant, ParameterSlot, ordinal_of};
use phf::{Map, Set, phf_map, phf_set};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Geometry {
    None = 1,
    CBlock,
    Aspw,
    Asrw,
    HWin,
    Nia,
    Wedge,
    Ring,
}

static KEYS: Map<&'static str, Geometry> = phf_map! {
    "none" => Geometry::None,
    "cblock" => Geometry::CBlock,
    "aspw" => Geometry::Aspw,
    "asrw" => Geometry::Asrw,
    "hwin" => Geometry::HWin,
    "nia" => Geometry::Nia,
    "wedge" => Geometry::Wedge,
    "ring" => Geometry::Ring,
};

/// Material composition tags understood by ICOOL, upper case.
pub static MATERIAL_TAGS: Set<&'static str> = phf_set! {
    "VAC", "GH", "GHE", "LH", "LHE", "LI", "BE", "B", "C", "AL",
    "TI", "FE", "CU", "W", "HG", "PB", "LIH", "CH2", "SS",
};

/// Normalises a composition tag to upper case if ICOOL knows it.
pub fn material_tag(tag: &str) -> Option<&'static str> {
    MATERIAL_TAGS
        .get_key(tag.to_ascii_uppercase().as_str())
        .copied()
}

impl ModelKind for Geometry {
    const ALL: &'static [Self] = &[
        Geometry::None,
        Geometry::CBlock,
        Geometry::Aspw,
        Geometry::Asrw,
        Geometry::HWin,
        Geometry::Nia,
        Geometry::Wedge,
        Geometry::Ring,
    ];

    fn catalog() -> &'static ModelCatalog {
        &CATALOG
    }

    fn from_key(key: &str) -> Option<Self> {
        KEYS.get(key.to_ascii_lowercase().as_str()).copied()
    }

    fn ordinal(self) -> usize {
        self as usize
    }
}

const ASPHERIC: &[ParameterSlot] = &[
    ParameterSlot::real("zpos", 1, "Axial position of the window center [m]"),
    ParameterSlot::real("zoff", 2, "z offset from the center of the window to the edge [m]"),
    ParameterSlot::real("a0", 3, "Polynomial coefficient A0 of the window profile"),
    ParameterSlot::real("a1", 4, "Polynomial coefficient A1 of the window profile"),
    ParameterSlot::real("a2", 5, "Polynomial coefficient A2 of the window profile"),
    ParameterSlot::real("a3", 6, "Polynomial coefficient A3 of the window profile"),
];

pub static CATALOG: ModelCatalog = ModelCatalog {
    family: "MATERIAL",
    discriminator: "geom",
    discriminator_position: None,
    width: 10,
    line_splits: &[10],
    index: ordinal_of::<Geometry>,
    variants: &[
        ModelVariant {
            key: "none",
            ordinal: 1,
            description: "No geometry; the material fills the subregion",
            doc: "",
            parameters: &[],
        },
        ModelVariant {
            key: "cblock",
            ordinal: 2,
            description: "Cylindrical block",
            doc: "",
            parameters: &[],
        },
        ModelVariant {
            key: "aspw",
            ordinal: 3,
            description: "Azimuthally symmetric polynomial window (z-profile)",
            doc: "",
            parameters: ASPHERIC,
        },
        ModelVariant {
            key: "asrw",
            ordinal: 4,
            description: "Azimuthally symmetric polynomial window (r-profile)",
            doc: "",
            parameters: ASPHERIC,
        },
        ModelVariant {
            key: "hwin",
            ordinal: 5,
            description: "Hemispherical window",
            doc: "",
            parameters: &[
                ParameterSlot::integer(
                    "end_flag",
                    1,
                    "1: window at the upstream end, -1: at the downstream end",
                )
                .bounded(-1.0, 1.0),
                ParameterSlot::real("r", 2, "Inner radius of the window [m]"),
                ParameterSlot::real("t", 3, "Thickness of the window [m]"),
                ParameterSlot::real("offset", 4, "Axial offset of the window [m]"),
            ],
        },
        ModelVariant {
            key: "nia",
            ordinal: 6,
            description: "Non-isosceles absorber",
            doc: "",
            parameters: &[
                ParameterSlot::real("zv", 1, "Axial position of the vertex [m]"),
                ParameterSlot::real("z0", 2, "Starting axial offset [m]"),
                ParameterSlot::real("z1", 3, "Ending axial offset [m]"),
                ParameterSlot::real("theta0", 4, "Polar angle of the entrance face [deg]"),
                ParameterSlot::real("phi0", 5, "Azimuthal angle of the entrance face [deg]"),
                ParameterSlot::real("theta1", 6, "Polar angle of the exit face [deg]"),
                ParameterSlot::real("phi1", 7, "Azimuthal angle of the exit face [deg]"),
            ],
        },
        ModelVariant {
            key: "wedge",
            ordinal: 7,
            description: "Asymmetric wedge absorber",
            doc: "",
            parameters: &[
                ParameterSlot::real("vert_ang", 1, "Full opening angle of the wedge [deg]"),
                ParameterSlot::real("vert_x", 2, "Horizontal position of the vertex [m]"),
                ParameterSlot::real("zpos", 3, "Axial position of the vertex [m]"),
                ParameterSlot::real("az_ang", 4, "Azimuthal rotation of the wedge [deg]"),
                ParameterSlot::real("width", 5, "Total width of the wedge [m]"),
                ParameterSlot::real("height", 6, "Total height of the wedge [m]"),
            ],
        },
        ModelVariant {
            key: "ring",
            ordinal: 8,
            description: "Annular ring with linearly varying radii",
            doc: "",
            parameters: &[
                ParameterSlot::real("inner_start", 1, "Inner radius at the start [m]"),
                ParameterSlot::real("outer_start", 2, "Outer radius at the start [m]"),
                ParameterSlot::real("inner_end", 3, "Inner radius at the end [m]"),
                ParameterSlot::real("outer_end", 4, "Outer radius at the end [m]"),
            ],
        },
    ],
};
