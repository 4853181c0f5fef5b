//! Beam correlation (`corrtyp`) models.

use super::{ModelCatalog, ModelKind, ModelVariant, ParameterSlot, ordinal_of};
use phf::{Map, phf_map};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum CorrelationModel {
    AngMom = 1,
    Palmer,
    RfBucketEllipse,
    RfBucketSeparatrix,
    TwissPx,
    TwissPy,
    EqualTime,
    Dispersion,
}

static KEYS: Map<&'static str, CorrelationModel> = phf_map! {
    "ang_mom" => CorrelationModel::AngMom,
    "palmer" => CorrelationModel::Palmer,
    "rf_bucket_ellipse" => CorrelationModel::RfBucketEllipse,
    "rf_bucket_separatrix" => CorrelationModel::RfBucketSeparatrix,
    "twiss_px" => CorrelationModel::TwissPx,
    "twiss_py" => CorrelationModel::TwissPy,
    "equal_time" => CorrelationModel::EqualTime,
    "dispersion" => CorrelationModel::Dispersion,
};

impl ModelKind for CorrelationModel {
    const ALL: &'static [Self] = &[
        CorrelationModel::AngMom,
        CorrelationModel::Palmer,
        CorrelationModel::RfBucketEllipse,
        CorrelationModel::RfBucketSeparatrix,
        CorrelationModel::TwissPx,
        CorrelationModel::TwissPy,
        CorrelationModel::EqualTime,
        CorrelationModel::Dispersion,
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

const TWISS: &[ParameterSlot] = &[
    ParameterSlot::real("alpha", 2, "Twiss alpha"),
    ParameterSlot::real("beta", 3, "Twiss beta [m]"),
    ParameterSlot::real("epsilon", 4, "Normalized emittance [m rad]"),
];

const RF_BUCKET: &[ParameterSlot] = &[
    ParameterSlot::real("e_peak", 2, "Peak electric field [MV/m]"),
    ParameterSlot::real("phase", 3, "RF phase [deg]"),
    ParameterSlot::real("freq", 4, "RF frequency [MHz]"),
];

pub static CATALOG: ModelCatalog = ModelCatalog {
    family: "CORRELATION",
    discriminator: "corrtyp",
    discriminator_position: Some(1),
    width: 4,
    line_splits: &[4],
    index: ordinal_of::<CorrelationModel>,
    variants: &[
        ModelVariant {
            key: "ang_mom",
            ordinal: 1,
            description: "Angular momentum appropriate for constant solenoid field",
            doc: "",
            parameters: &[ParameterSlot::real("sol_field", 2, "Solenoid field strength [T]")],
        },
        ModelVariant {
            key: "palmer",
            ordinal: 2,
            description: "Palmer amplitude correlation",
            doc: "",
            parameters: &[
                ParameterSlot::real("strength", 2, "Correlation strength"),
                ParameterSlot::real("beta_eff", 3, "Effective beta function [m]"),
            ],
        },
        ModelVariant {
            key: "rf_bucket_ellipse",
            ordinal: 3,
            description: "RF bucket, small amplitude ellipse",
            doc: "",
            parameters: RF_BUCKET,
        },
        ModelVariant {
            key: "rf_bucket_separatrix",
            ordinal: 4,
            description: "RF bucket, small amplitude separatrix",
            doc: "",
            parameters: RF_BUCKET,
        },
        ModelVariant {
            key: "twiss_px",
            ordinal: 5,
            description: "Twiss parameters in x-Px",
            doc: "",
            parameters: TWISS,
        },
        ModelVariant {
            key: "twiss_py",
            ordinal: 6,
            description: "Twiss parameters in y-Py",
            doc: "",
            parameters: TWISS,
        },
        ModelVariant {
            key: "equal_time",
            ordinal: 7,
            description: "Equal time",
            doc: "",
            parameters: &[],
        },
        ModelVariant {
            key: "dispersion",
            ordinal: 8,
            description: "Dispersion",
            doc: "",
            parameters: &[
                ParameterSlot::real("value", 2, "Dispersion value [m]"),
                ParameterSlot::integer("var", 3, "1: x, 2: y, 3: x', 4: y'").bounded(1.0, 4.0),
            ],
        },
    ],
};
