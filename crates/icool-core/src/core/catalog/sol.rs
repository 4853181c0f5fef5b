//! Solenoid (`SOL`) field models.

use super::{ModelCatalog, ModelKind, ModelVariant, ParameterSlot, ordinal_of};
use phf::{Map, phf_map};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum SolModel {
    Bz = 1,
    Dtanh,
    Circ,
    Sheet,
    Block,
    Interp,
    Tapered,
    Edge,
    Fourier,
    OnAxis,
}

static KEYS: Map<&'static str, SolModel> = phf_map! {
    "bz" => SolModel::Bz,
    "dtanh" => SolModel::Dtanh,
    "circ" => SolModel::Circ,
    "sheet" => SolModel::Sheet,
    "block" => SolModel::Block,
    "interp" => SolModel::Interp,
    "tapered" => SolModel::Tapered,
    "edge" => SolModel::Edge,
    "fourier" => SolModel::Fourier,
    "on_axis" => SolModel::OnAxis,
};

impl ModelKind for SolModel {
    const ALL: &'static [Self] = &[
        SolModel::Bz,
        SolModel::Dtanh,
        SolModel::Circ,
        SolModel::Sheet,
        SolModel::Block,
        SolModel::Interp,
        SolModel::Tapered,
        SolModel::Edge,
        SolModel::Fourier,
        SolModel::OnAxis,
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

const STRENGTH: ParameterSlot = ParameterSlot::real("strength", 2, "Field strength [T]");

pub static CATALOG: ModelCatalog = ModelCatalog {
    family: "SOL",
    discriminator: "model",
    discriminator_position: Some(1),
    width: 15,
    line_splits: &[15],
    index: ordinal_of::<SolModel>,
    variants: &[
        ModelVariant {
            key: "bz",
            ordinal: 1,
            description: "Bz with constant central region + linear ends",
            doc: "",
            parameters: &[
                STRENGTH,
                ParameterSlot::real(
                    "clen",
                    3,
                    "Length of central region, CLEN [m] (can be used to get a tapered field profile)",
                ),
                ParameterSlot::real(
                    "elen1",
                    4,
                    "Length of entrance end region, ELEN1 [m]; displacement of the upstream end of the solenoid from the start of the region",
                ),
                ParameterSlot::real(
                    "offset",
                    5,
                    "Constant offset for Bz [T]; gives an indefinitely long, constant solenoidal field",
                ),
                ParameterSlot::real(
                    "elen2",
                    6,
                    "Length of exit end region, ELEN2 [m]. For a symmetric field set SLEN = CLEN + ELEN1 + ELEN2",
                ),
            ],
        },
        ModelVariant {
            key: "dtanh",
            ordinal: 2,
            description: "dTANH(z) Bz dependence",
            doc: "",
            parameters: &[
                STRENGTH,
                ParameterSlot::real("clen", 3, "Length of central region, CLEN [m]"),
                ParameterSlot::real(
                    "elen",
                    4,
                    "Length for end region, ELEN [m]; for a symmetric field set SLEN = CLEN + 2*ELEN",
                ),
                ParameterSlot::real("order", 5, "Order of vector potential expansion {1, 3, 5, 7}"),
                ParameterSlot::real(
                    "att_len",
                    6,
                    "End attenuation length [m] (set larger than maximum beam size)",
                ),
                ParameterSlot::real("offset", 7, "Constant offset for Bs [T]"),
            ],
        },
        ModelVariant {
            key: "circ",
            ordinal: 3,
            description: "Field from sum of circular current loops",
            doc: "For a symmetric field with 1 loop, set ELEN = 0.5 SLEN.",
            parameters: &[
                STRENGTH,
                ParameterSlot::real(
                    "clen",
                    3,
                    "Length of central region, CLEN [m] (the region over which the coils are distributed)",
                ),
                ParameterSlot::real("elen", 4, "Length for end region, ELEN [m]"),
                ParameterSlot::real("loops", 5, "Number of coil loops (equi-spaced over CLEN)"),
                ParameterSlot::real("radius", 6, "Radius of coils [m]"),
            ],
        },
        ModelVariant {
            key: "sheet",
            ordinal: 4,
            description: "Field from annular current sheet",
            doc: "",
            parameters: &[
                STRENGTH,
                ParameterSlot::real("length", 3, "Length of sheet [m]"),
                ParameterSlot::real(
                    "z_offset",
                    4,
                    "z offset of center of sheet from start of region [m]",
                ),
                ParameterSlot::real("radius", 5, "Radius of sheet [m]"),
            ],
        },
        ModelVariant {
            key: "block",
            ordinal: 5,
            description: "Field from thick annular current block",
            doc: "",
            parameters: &[
                STRENGTH,
                ParameterSlot::real("length", 3, "Length of block [m]"),
                ParameterSlot::real(
                    "z_offset",
                    4,
                    "z offset of center of block from start of region [m]",
                ),
                ParameterSlot::real("inner", 5, "Inner radius of block [m]"),
                ParameterSlot::real("outer", 6, "Outer radius of block [m]"),
            ],
        },
        ModelVariant {
            key: "interp",
            ordinal: 6,
            description: "Interpolate field from predefined USER r-z grid",
            doc: "The field map holds a title (A80), the number of z grid points {1-5000}, \
                  the number of r grid points {1-100}, then rows of i, j, zi, rj, BZ, BR.",
            parameters: &[
                ParameterSlot::real("grid", 2, "Grid number of user-supplied field {1-4}"),
                ParameterSlot::integer(
                    "level",
                    3,
                    "Interpolation level: 1 bi-linear, 2 bi-quadratic, 3 bi-cubic",
                )
                .bounded(1.0, 3.0),
            ],
        },
        ModelVariant {
            key: "tapered",
            ordinal: 7,
            description: "Tapered radius",
            doc: "Applies a geometry cut on particles whose radius exceeds the specified radial taper.",
            parameters: &[
                ParameterSlot::real("bc", 2, "Bc [T] (flat central field strength)"),
                ParameterSlot::real("rc", 3, "Rc [m] (flat central coil radius)"),
                ParameterSlot::real("lc", 4, "Lc [m] (central field length)"),
                ParameterSlot::real("b1", 5, "B1 [T] (starting field strength)"),
                ParameterSlot::real("r1", 6, "R1 [m] (starting coil radius)"),
                ParameterSlot::real("l1", 7, "L1 [m] (length of entrance transition region)"),
                ParameterSlot::real("b2", 8, "B2 [T] (ending field strength)"),
                ParameterSlot::real("r2", 9, "R2 [m] (ending coil radius)"),
                ParameterSlot::real("l2", 10, "L2 [m] (length of exit transition region)"),
            ],
        },
        ModelVariant {
            key: "edge",
            ordinal: 8,
            description: "Hard-edge with adjustable end fields",
            doc: "The focusing deficit is B^2 L - integral of B^2 ds, independent of the focusing flag.",
            parameters: &[
                ParameterSlot::real("bs", 2, "Bs [T] (flat central field strength)"),
                ParameterSlot::integer(
                    "foc_flag",
                    3,
                    "End focusing: 0 both, 1 exit only, 2 entrance only, 3 none",
                )
                .bounded(0.0, 3.0),
                ParameterSlot::real("ent_def", 4, "Focusing deficit at entrance [T^2 m]"),
                ParameterSlot::real("ex_def", 5, "Focusing deficit at exit [T^2 m]"),
            ],
        },
        ModelVariant {
            key: "fourier",
            ordinal: 9,
            description: "Determine field from file of Fourier coefficients",
            doc: "The on-axis field is f(s) = S * sum(cm cos(u) + dm sin(u)) with u = 2 pi m s / lambda.",
            parameters: &[
                ParameterSlot::integer("order", 2, "Order of off-axis expansion {1, 3, 5, 7}"),
                ParameterSlot::real("scale", 3, "Multiplies field strength"),
            ],
        },
        ModelVariant {
            key: "on_axis",
            ordinal: 10,
            description: "Determine field from file of on-axis field",
            doc: "",
            parameters: &[
                ParameterSlot::integer(
                    "file_num",
                    2,
                    "File number JK for input data; the file name is for0JK.dat",
                ),
                ParameterSlot::integer("order", 3, "Order of off-axis expansion {1, 3, 5, 7}"),
                ParameterSlot::real("scale", 4, "Multiplies field strength"),
            ],
        },
    ],
};
