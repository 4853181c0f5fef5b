//! Static model catalogs.
//!
//! Every modeled family (accelerator fields, solenoids, material geometries,
//! beam distributions and correlations) is described by a [`ModelCatalog`]: a
//! fixed output width, the name of the discriminator attribute, and an ordered
//! table of [`ModelVariant`]s. Each family also has an enum implementing
//! [`ModelKind`] whose discriminant is the variant's ICOOL ordinal and indexes
//! straight into the table.

use super::error::InputError;
use super::value::ParamType;
use std::fmt::Debug;
use std::hash::Hash;

pub mod accel;
pub mod correlation;
pub mod distribution;
pub mod material;
pub mod sol;

/// One named parameter of a model and the output slot it occupies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSlot {
    pub name: &'static str,
    /// 1-based index into the rendered array.
    pub position: usize,
    pub kind: ParamType,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub doc: &'static str,
}

impl ParameterSlot {
    pub const fn real(name: &'static str, position: usize, doc: &'static str) -> Self {
        Self {
            name,
            position,
            kind: ParamType::Real,
            min: None,
            max: None,
            doc,
        }
    }

    pub const fn integer(name: &'static str, position: usize, doc: &'static str) -> Self {
        Self {
            name,
            position,
            kind: ParamType::Integer,
            min: None,
            max: None,
            doc,
        }
    }

    pub const fn bounded(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// One selectable configuration of a modeled family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelVariant {
    /// Lower-case key used as the discriminator value.
    pub key: &'static str,
    /// Model number written to the deck in the discriminator slot.
    pub ordinal: usize,
    pub description: &'static str,
    pub doc: &'static str,
    /// Value parameters; the discriminator itself is not listed.
    pub parameters: &'static [ParameterSlot],
}

impl ModelVariant {
    pub fn slot(&self, name: &str) -> Option<&'static ParameterSlot> {
        let parameters: &'static [ParameterSlot] = self.parameters;
        parameters.iter().find(|p| p.name == name)
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &'static str> + use<> {
        let parameters: &'static [ParameterSlot] = self.parameters;
        parameters.iter().map(|p| p.name)
    }
}

/// Description of a modeled family and its fixed output layout.
#[derive(Debug)]
pub struct ModelCatalog {
    pub family: &'static str,
    pub discriminator: &'static str,
    /// Slot holding the variant ordinal, if the family renders it.
    pub discriminator_position: Option<usize>,
    /// Number of values written for every variant.
    pub width: usize,
    /// Number of values on each output line; sums to `width`.
    pub line_splits: &'static [usize],
    /// Variants in ordinal order (entry `i` has ordinal `i + 1`).
    pub variants: &'static [ModelVariant],
    /// Key to ordinal, backed by the family's `phf` map.
    pub index: fn(&str) -> Option<usize>,
}

impl ModelCatalog {
    pub fn discriminator_name(&self) -> &'static str {
        self.discriminator
    }

    /// Looks a variant up by key, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnknownModel`] if no variant has that key.
    pub fn variant_for(&self, key: &str) -> Result<&'static ModelVariant, InputError> {
        let variants: &'static [ModelVariant] = self.variants;
        (self.index)(key)
            .and_then(|ordinal| variants.get(ordinal - 1))
            .ok_or_else(|| InputError::UnknownModel {
                family: self.family,
                key: key.to_string(),
            })
    }

    /// The full key set a constructor must supply for `variant`, sorted.
    pub fn expected_keys(&self, variant: &ModelVariant) -> Vec<String> {
        let mut keys: Vec<String> = variant
            .parameter_names()
            .chain(std::iter::once(self.discriminator))
            .map(str::to_string)
            .collect();
        keys.sort();
        keys
    }
}

/// A family's model enum, tied to its static catalog.
pub trait ModelKind: Copy + Eq + Hash + Debug + 'static {
    /// Every model of the family, in ordinal order.
    const ALL: &'static [Self];

    fn catalog() -> &'static ModelCatalog;

    /// Case-insensitive key lookup.
    fn from_key(key: &str) -> Option<Self>;

    fn ordinal(self) -> usize;

    fn variant(self) -> &'static ModelVariant {
        &Self::catalog().variants[self.ordinal() - 1]
    }

    fn key(self) -> &'static str {
        self.variant().key
    }
}

/// Every catalog, for listing and help output.
/// The `index` of every family catalog.
pub(crate) fn ordinal_of<M: ModelKind>(key: &str) -> Option<usize> {
    M::from_key(key).map(M::ordinal)
}

pub fn catalogs() -> [&'static ModelCatalog; 5] {
    [
        &accel::CATALOG,
        &sol::CATALOG,
        &material::CATALOG,
        &distribution::CATALOG,
        &correlation::CATALOG,
    ]
}

/// Finds a catalog by family name, ignoring ASCII case.
pub fn catalog_for(family: &str) -> Option<&'static ModelCatalog> {
    catalogs()
        .into_iter()
        .find(|c| c.family.eq_ignore_ascii_case(family))
}

#[cfg(test)]
pub(crate) fn assert_catalog_consistent<M: ModelKind>() {
    use std::collections::HashSet;

    let catalog = M::catalog();
    assert_eq!(
        catalog.line_splits.iter().sum::<usize>(),
        catalog.width,
        "{}: line splits must cover the width",
        catalog.family
    );
    assert_eq!(M::ALL.len(), catalog.variants.len());

    let mut keys = HashSet::new();
    for (i, model) in M::ALL.iter().enumerate() {
        let variant = model.variant();
        assert_eq!(model.ordinal(), i + 1);
        assert_eq!(variant.ordinal, i + 1, "{}: ordinal order", variant.key);
        assert_eq!(M::from_key(variant.key), Some(*model));
        assert_eq!(M::from_key(&variant.key.to_ascii_uppercase()), Some(*model));
        assert_eq!((catalog.index)(variant.key), Some(i + 1));
        assert_eq!(catalog.variant_for(variant.key).ok(), Some(variant));
        assert!(keys.insert(variant.key), "duplicate key {}", variant.key);

        let mut positions = HashSet::new();
        if let Some(p) = catalog.discriminator_position {
            positions.insert(p);
        }
        for slot in variant.parameters {
            assert!(
                (1..=catalog.width).contains(&slot.position),
                "{}.{} position {} out of range",
                variant.key,
                slot.name,
                slot.position
            );
            assert!(
                positions.insert(slot.position),
                "{}.{} reuses position {}",
                variant.key,
                slot.name,
                slot.position
            );
            assert_ne!(slot.name, catalog.discriminator);
            assert!(matches!(
                slot.kind,
                ParamType::Real | ParamType::Integer | ParamType::Logical | ParamType::String
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_for_ignores_case() {
        let v = material::CATALOG.variant_for("CBLOCK").unwrap();
        assert_eq!(v.key, "cblock");
    }

    #[test]
    fn variant_for_rejects_unknown_keys() {
        let err = sol::CATALOG.variant_for("helix").unwrap_err();
        assert!(matches!(
            err,
            InputError::UnknownModel { family: "SOL", ref key } if key == "helix"
        ));
    }

    #[test]
    fn expected_keys_include_the_discriminator() {
        let v = sol::CATALOG.variant_for("bz").unwrap();
        assert_eq!(
            sol::CATALOG.expected_keys(v),
            vec!["clen", "elen1", "elen2", "model", "offset", "strength"]
        );
    }

    #[test]
    fn catalog_for_finds_every_family() {
        for catalog in catalogs() {
            let found = catalog_for(&catalog.family.to_ascii_lowercase()).unwrap();
            assert_eq!(found.family, catalog.family);
        }
        assert!(catalog_for("wiggler").is_none());
    }
}
