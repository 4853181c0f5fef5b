//! Beam distribution (`bdistyp`) models.

use super::{ModelCatalog, ModelKind, ModelVariant, ParameterSlot, ordinal_of};
use phf::{Map, phf_map};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum DistributionModel {
    Gaussian = 1,
}

static KEYS: Map<&'static str, DistributionModel> = phf_map! {
    "gaussian" => DistributionModel::Gaussian,
};

impl ModelKind for DistributionModel {
    const ALL: &'static [Self] = &[DistributionModel::Gaussian];

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

pub static CATALOG: ModelCatalog = ModelCatalog {
    family: "DISTRIBUTION",
    discriminator: "bdistyp",
    discriminator_position: Some(1),
    width: 13,
    line_splits: &[1, 6, 6],
    index: ordinal_of::<DistributionModel>,
    variants: &[ModelVariant {
        key: "gaussian",
        ordinal: 1,
        description: "Gaussian beam distribution",
        doc: "Means occupy the second output line and standard deviations the third.",
        parameters: &[
            ParameterSlot::real("x_mean", 2, "Mean of x [m]"),
            ParameterSlot::real("y_mean", 3, "Mean of y [m]"),
            ParameterSlot::real("z_mean", 4, "Mean of z [m]"),
            ParameterSlot::real("px_mean", 5, "Mean of Px [GeV/c]"),
            ParameterSlot::real("py_mean", 6, "Mean of Py [GeV/c]"),
            ParameterSlot::real("pz_mean", 7, "Mean of Pz [GeV/c]"),
            ParameterSlot::real("x_std", 8, "Standard deviation of x [m]"),
            ParameterSlot::real("y_std", 9, "Standard deviation of y [m]"),
            ParameterSlot::real("z_std", 10, "Standard deviation of z [m]"),
            ParameterSlot::real("px_std", 11, "Standard deviation of Px [GeV/c]"),
            ParameterSlot::real("py_std", 12, "Standard deviation of Py [GeV/c]"),
            ParameterSlot::real("pz_std", 13, "Standard deviation of Pz [GeV/c]"),
        ],
    }],
};
