//! Accelerating cavity (`ACCEL`) field models.

use super::{ModelCatalog, ModelKind, ModelVariant, ParameterSlot, ordinal_of};
use phf::{Map, phf_map};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum AccelModel {
    Ez = 1,
    CynPill,
    Trav,
    CircNose,
    AzTm,
    IlPoly,
    IlGen,
    IlFile,
    SecPillCirc,
    VarPill,
    StraightPill,
    SecPillRec,
    OpenCellStand,
}

static KEYS: Map<&'static str, AccelModel> = phf_map! {
    "ez" => AccelModel::Ez,
    "cyn_pill" => AccelModel::CynPill,
    "trav" => AccelModel::Trav,
    "circ_nose" => AccelModel::CircNose,
    "az_tm" => AccelModel::AzTm,
    "ilpoly" => AccelModel::IlPoly,
    "ilgen" => AccelModel::IlGen,
    "ilfile" => AccelModel::IlFile,
    "sec_pill_circ" => AccelModel::SecPillCirc,
    "var_pill" => AccelModel::VarPill,
    "straight_pill" => AccelModel::StraightPill,
    "sec_pill_rec" => AccelModel::SecPillRec,
    "open_cell_stand" => AccelModel::OpenCellStand,
};

impl ModelKind for AccelModel {
    const ALL: &'static [Self] = &[
        AccelModel::Ez,
        AccelModel::CynPill,
        AccelModel::Trav,
        AccelModel::CircNose,
        AccelModel::AzTm,
        AccelModel::IlPoly,
        AccelModel::IlGen,
        AccelModel::IlFile,
        AccelModel::SecPillCirc,
        AccelModel::VarPill,
        AccelModel::StraightPill,
        AccelModel::SecPillRec,
        AccelModel::OpenCellStand,
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

const FREQ: ParameterSlot = ParameterSlot::real("freq", 2, "Frequency [MHz]");
const GRAD: ParameterSlot =
    ParameterSlot::real("grad", 3, "Gradient on-axis at center of gap [MV/m]");
const PHASE: ParameterSlot = ParameterSlot::real("phase", 4, "Phase shift [deg] {0-360}");
const RECT_CYN: ParameterSlot = ParameterSlot::real(
    "rect_cyn",
    5,
    "Radius of curvature used to approximate a rectangular cavity in cylindrical geometry",
);

pub static CATALOG: ModelCatalog = ModelCatalog {
    family: "ACCEL",
    discriminator: "model",
    discriminator_position: Some(1),
    width: 15,
    line_splits: &[15],
    index: ordinal_of::<AccelModel>,
    variants: &[
        ModelVariant {
            key: "ez",
            ordinal: 1,
            description: "Ez only with no transverse variation",
            doc: "",
            parameters: &[
                FREQ,
                GRAD,
                PHASE,
                RECT_CYN,
                ParameterSlot::integer(
                    "mode",
                    8,
                    "0: time-independent, 1: sinusoidal time variation",
                )
                .bounded(0.0, 1.0),
            ],
        },
        ModelVariant {
            key: "cyn_pill",
            ordinal: 2,
            description: "Cylindrical TM01p pillbox",
            doc: "",
            parameters: &[
                FREQ,
                GRAD,
                PHASE,
                RECT_CYN,
                ParameterSlot::real("longitudinal_mode", 8, "Longitudinal mode p {0, 1}"),
            ],
        },
        ModelVariant {
            key: "trav",
            ordinal: 3,
            description: "Traveling wave cavity",
            doc: "",
            parameters: &[
                FREQ,
                GRAD,
                PHASE,
                RECT_CYN,
                ParameterSlot::real("x_offset", 6, "x offset of reference orbit [m]"),
                ParameterSlot::real("y_offset", 7, "y offset of reference orbit [m]"),
                ParameterSlot::real("phase_velocity", 8, "Phase velocity of RF wave B_omega"),
            ],
        },
        ModelVariant {
            key: "circ_nose",
            ordinal: 4,
            description: "Approximate fields for symmetric circular-nosed cavity",
            doc: "",
            parameters: &[
                FREQ,
                GRAD,
                PHASE,
                ParameterSlot::real("length", 8, "Length of cavity [m]"),
                ParameterSlot::real("gap", 9, "Gap [m]"),
                ParameterSlot::real("drift_tube_radius", 10, "Drift tube radius [m]"),
                ParameterSlot::real("nose_radius", 11, "Nose radius [m]"),
            ],
        },
        ModelVariant {
            key: "az_tm",
            ordinal: 5,
            description: "User-supplied azimuthally-symmetric TM mode (SuperFish)",
            doc: "",
            parameters: &[
                FREQ,
                PHASE,
                ParameterSlot::real("file_no", 8, "File number of SuperFish field map"),
                ParameterSlot::real(
                    "field_strength_norm",
                    9,
                    "Field strength normalization factor",
                ),
                ParameterSlot::real("rad_cut", 10, "Radial cutoff for cavity [m]"),
                ParameterSlot::real(
                    "axial_dist",
                    11,
                    "Axial displacement of field map from start of region [m]",
                ),
                ParameterSlot::real("daxial_sym", 12, "Axial symmetry flag of the field map"),
            ],
        },
        ModelVariant {
            key: "ilpoly",
            ordinal: 6,
            description: "Induction linac model - waveform from user-supplied polynomial coefficients",
            doc: "",
            parameters: &[
                ParameterSlot::real("time_offset", 2, "Time offset [s]"),
                ParameterSlot::real("gap", 3, "Accelerator gap [m]"),
                ParameterSlot::real("time_reset", 4, "Time reset parameter"),
                ParameterSlot::real("v0", 5, "Polynomial coefficient V0"),
                ParameterSlot::real("v1", 6, "Polynomial coefficient V1"),
                ParameterSlot::real("v2", 7, "Polynomial coefficient V2"),
                ParameterSlot::real("v3", 8, "Polynomial coefficient V3"),
                ParameterSlot::real("v4", 9, "Polynomial coefficient V4"),
                ParameterSlot::real("v5", 10, "Polynomial coefficient V5"),
                ParameterSlot::real("v6", 11, "Polynomial coefficient V6"),
                ParameterSlot::real("v7", 12, "Polynomial coefficient V7"),
                ParameterSlot::real("v8", 13, "Polynomial coefficient V8"),
            ],
        },
        ModelVariant {
            key: "ilgen",
            ordinal: 7,
            description: "Induction linac model - waveform from internally generated waveform",
            doc: "",
            parameters: &[
                ParameterSlot::real("num_gaps", 2, "Number of gaps"),
                ParameterSlot::real("start_volt", 3, "Starting voltage [GV]"),
                ParameterSlot::real("volt_swing", 4, "Voltage swing [GV]"),
                ParameterSlot::real("time_offset", 5, "Time offset [s]"),
                ParameterSlot::real("kin", 6, "Target kinetic energy [GeV]"),
                ParameterSlot::real("pulse_dur", 7, "Pulse duration [s]"),
                ParameterSlot::real("slope", 8, "Parameter to adjust slope at end of waveform"),
                ParameterSlot::real("bins", 9, "Number of bins in waveform"),
                ParameterSlot::real("gap_len", 10, "Gap length [m]"),
                ParameterSlot::real("file_num", 11, "File number for output of waveform"),
                ParameterSlot::real("kill", 12, "Kill particles with insufficient energy"),
                ParameterSlot::real("restart", 13, "Restart after kill"),
            ],
        },
        ModelVariant {
            key: "ilfile",
            ordinal: 8,
            description: "Induction linac model - Waveform from user-supplied file",
            doc: "",
            parameters: &[
                ParameterSlot::real("time_offset", 2, "Time offset [s]"),
                ParameterSlot::real("gap", 3, "Accelerator gap [m]"),
                ParameterSlot::real("time_reset", 4, "Time reset parameter"),
                ParameterSlot::real("file_num_wav", 5, "File number of waveform input"),
                ParameterSlot::real("poly_order", 6, "Polynomial order of fit to waveform"),
                ParameterSlot::real("file_num_out", 7, "File number of output"),
                ParameterSlot::real("time_inc", 8, "Time increment [s]"),
            ],
        },
        ModelVariant {
            key: "sec_pill_circ",
            ordinal: 9,
            description: "Sector-shaped pillbox cavity (circular cross section)",
            doc: "",
            parameters: &[FREQ, GRAD, PHASE],
        },
        ModelVariant {
            key: "var_pill",
            ordinal: 10,
            description: "Variable {frequency gradient} pillbox cavity",
            doc: "",
            parameters: &[
                ParameterSlot::real("phase", 2, "Phase shift [deg] {0-360}"),
                ParameterSlot::real("num_wavelengths", 3, "Number of wavelengths"),
                ParameterSlot::real("reset_parms", 4, "Reset parameter"),
                ParameterSlot::real("buncher_len", 5, "Buncher length [m]"),
                ParameterSlot::real("g0", 6, "Gradient polynomial coefficient G0"),
                ParameterSlot::real("g1", 7, "Gradient polynomial coefficient G1"),
                ParameterSlot::real("g2", 8, "Gradient polynomial coefficient G2"),
                ParameterSlot::real("phase_model", 9, "Phase model"),
            ],
        },
        ModelVariant {
            key: "straight_pill",
            ordinal: 11,
            description: "Straight pillbox or SuperFish cavity in dipole region",
            doc: "",
            parameters: &[
                FREQ,
                GRAD,
                PHASE,
                ParameterSlot::real("radial_offset", 5, "Radial offset of center of cavity [m]"),
                ParameterSlot::real("axial_length", 6, "Axial length of cavity [m]"),
                ParameterSlot::real("cavity_type", 7, "0: pillbox, 1: SuperFish"),
                ParameterSlot::real("file_num", 8, "SuperFish file number"),
                ParameterSlot::real("sf_field_norm", 9, "SuperFish field normalization"),
                ParameterSlot::real("sf_rad_cut", 10, "SuperFish radial cut off [m]"),
                ParameterSlot::real("sf_axial_disp", 11, "SuperFish axial displacement [m]"),
                ParameterSlot::real("sf_axial_sym", 12, "SuperFish axial symmetry"),
            ],
        },
        ModelVariant {
            key: "sec_pill_rec",
            ordinal: 12,
            description: "Sector-shaped pillbox cavity (rectangular cross section)",
            doc: "",
            parameters: &[
                FREQ,
                GRAD,
                PHASE,
                ParameterSlot::real("rad_offset", 5, "Radial offset of center of cavity [m]"),
                ParameterSlot::real("width", 6, "Width of cavity [m]"),
                ParameterSlot::real("height", 7, "Height of cavity [m]"),
            ],
        },
        ModelVariant {
            key: "open_cell_stand",
            ordinal: 13,
            description: "Open cell standing wave cavity",
            doc: "",
            parameters: &[
                FREQ,
                GRAD,
                PHASE,
                ParameterSlot::real("focus_flag", 5, "Flag whether to include focusing"),
            ],
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::assert_catalog_consistent;

    #[test]
    fn catalog_is_consistent() {
        assert_catalog_consistent::<AccelModel>();
    }

    #[test]
    fn az_tm_position_twelve_is_axial_symmetry() {
        let slot = AccelModel::AzTm.variant().slot("daxial_sym").unwrap();
        assert_eq!(slot.position, 12);
    }

    #[test]
    fn ez_mode_is_an_integer() {
        let slot = AccelModel::Ez.variant().slot("mode").unwrap();
        assert_eq!(slot.kind, crate::core::value::ParamType::Integer);
        assert_eq!(slot.position, 8);
    }
}
