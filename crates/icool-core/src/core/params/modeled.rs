use crate::core::catalog::{ModelKind, ModelVariant};
use crate::core::error::InputError;
use crate::core::io::format::write_tokens;
use crate::core::value::{ParamType, Value, coerce, duplicate_key, warn_if_out_of_bounds};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use tracing::debug;

/// A parameter group whose valid attribute set and output layout are chosen
/// by a discriminator such as `model`.
///
/// The object is never partially valid: construction demands the exact key set
/// of the chosen variant, and every mutation is checked in full before any of
/// it is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeledParameter<M: ModelKind> {
    model: Option<M>,
    attributes: BTreeMap<&'static str, Value>,
}

impl<M: ModelKind> Default for ModeledParameter<M> {
    fn default() -> Self {
        Self::undetermined()
    }
}

impl<M: ModelKind> ModeledParameter<M> {
    /// A parameter group with no model selected yet.
    pub fn undetermined() -> Self {
        Self {
            model: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Builds a parameter group from the discriminator and the complete
    /// parameter set of the selected variant.
    ///
    /// # Errors
    ///
    /// - [`InputError::ModelNotSpecified`] if the discriminator is absent.
    /// - [`InputError::UnknownModel`] if it names no variant.
    /// - [`InputError::ParameterSetMismatch`] if the supplied keys differ from
    ///   the variant's key set.
    /// - [`InputError::DuplicateKey`] if a key is given twice.
    /// - [`InputError::IncorrectType`] if any value fails its type check, or
    ///   [`InputError::NonFiniteReal`] for a NaN or infinite real.
    pub fn new<I>(attrs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let catalog = M::catalog();
        let attrs: Vec<(String, Value)> = attrs.into_iter().collect();
        reject_duplicates::<M>(&attrs)?;

        let selector = attrs
            .iter()
            .find(|(k, _)| k == catalog.discriminator)
            .map(|(_, v)| v)
            .ok_or(InputError::ModelNotSpecified {
                family: catalog.family,
                discriminator: catalog.discriminator,
            })?;
        let model = resolve_model::<M>(selector)?;
        let variant = model.variant();

        let received = sorted_keys(&attrs);
        let expected = catalog.expected_keys(variant);
        if received != expected {
            return Err(InputError::ParameterSetMismatch { received, expected });
        }

        let attributes = stage(variant, without_discriminator::<M>(attrs), BTreeMap::new())?;
        debug!(
            family = catalog.family,
            model = variant.key,
            "Created modeled parameter"
        );
        Ok(Self {
            model: Some(model),
            attributes,
        })
    }

    /// Applies a call-style update.
    ///
    /// With the discriminator present the model is switched: every parameter
    /// of the new variant starts from its typed zero and the supplied values
    /// are then assigned. Without it, the supplied values replace those of the
    /// current variant and everything else is kept.
    ///
    /// # Errors
    ///
    /// - [`InputError::NoModelSelected`] for a partial update before any model
    ///   was chosen.
    /// - [`InputError::UnknownModel`], [`InputError::ParameterSetMismatch`] or
    ///   [`InputError::IncorrectType`] as for construction, except that a
    ///   subset of the key set is accepted.
    /// - [`InputError::DuplicateKey`] if a key, the discriminator included,
    ///   is given twice.
    ///
    /// On error the object is left exactly as it was.
    pub fn update<I>(&mut self, attrs: I) -> Result<(), InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let catalog = M::catalog();
        let attrs: Vec<(String, Value)> = attrs.into_iter().collect();
        if attrs.is_empty() {
            return Ok(());
        }
        reject_duplicates::<M>(&attrs)?;

        let switch = attrs
            .iter()
            .find(|(k, _)| k == catalog.discriminator)
            .map(|(_, v)| resolve_model::<M>(v))
            .transpose()?;

        let (model, base) = match switch {
            Some(model) => {
                let zeroed = model
                    .variant()
                    .parameters
                    .iter()
                    .map(|slot| (slot.name, slot.kind.zero()))
                    .collect();
                (model, zeroed)
            }
            None => {
                let model = self.model.ok_or(InputError::NoModelSelected {
                    family: catalog.family,
                })?;
                (model, self.attributes.clone())
            }
        };
        let variant = model.variant();

        let received = sorted_keys(&attrs);
        let expected = catalog.expected_keys(variant);
        if !received.iter().all(|k| expected.contains(k)) {
            return Err(InputError::ParameterSetMismatch { received, expected });
        }

        let staged = stage(variant, without_discriminator::<M>(attrs), base)?;
        if switch.is_some() {
            debug!(
                family = catalog.family,
                model = variant.key,
                "Switched model"
            );
        }
        self.model = Some(model);
        self.attributes = staged;
        Ok(())
    }

    pub fn model(&self) -> Option<M> {
        self.model
    }

    pub fn variant(&self) -> Option<&'static ModelVariant> {
        self.model.map(M::variant)
    }

    pub fn is_determined(&self) -> bool {
        self.model.is_some()
    }

    /// Value of a parameter of the current variant.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Current parameters in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.attributes.iter().map(|(k, v)| (*k, v))
    }

    /// Lays the parameters out in their output slots.
    ///
    /// The array has the catalog's fixed width; unused slots hold integer
    /// zero and the discriminator slot, when rendered, holds the model number.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NoModelSelected`] if no model has been chosen.
    pub fn render_positions(&self) -> Result<Vec<Value>, InputError> {
        let catalog = M::catalog();
        let model = self.model.ok_or(InputError::NoModelSelected {
            family: catalog.family,
        })?;

        let mut values = vec![Value::Int(0); catalog.width];
        if let Some(position) = catalog.discriminator_position {
            values[position - 1] = Value::Int(model.ordinal() as i64);
        }
        for slot in model.variant().parameters {
            if let Some(value) = self.attributes.get(slot.name) {
                values[slot.position - 1] = value.clone();
            }
        }
        Ok(values)
    }

    /// Writes the rendered array, broken into the catalog's output lines.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NoModelSelected`] if no model has been chosen, or
    /// [`InputError::Io`] if the writer fails.
    pub fn write_positions(&self, writer: &mut impl Write) -> Result<(), InputError> {
        let catalog = M::catalog();
        let values = self.render_positions()?;
        debug!(
            family = catalog.family,
            model = self.variant().map_or("", |v| v.key),
            "Writing positional parameters"
        );

        let mut rest = values.as_slice();
        for &count in catalog.line_splits {
            let (line, tail) = rest.split_at(count.min(rest.len()));
            write_tokens(writer, line)?;
            rest = tail;
        }
        Ok(())
    }
}

fn resolve_model<M: ModelKind>(selector: &Value) -> Result<M, InputError> {
    let catalog = M::catalog();
    let key = match selector {
        Value::Str(s) => s.clone(),
        Value::Int(i) => i.to_string(),
        other => {
            return Err(InputError::IncorrectType {
                name: catalog.discriminator.to_string(),
                expected: ParamType::String,
                actual: other.type_name(),
            });
        }
    };
    M::from_key(&key).ok_or(InputError::UnknownModel {
        family: catalog.family,
        key,
    })
}

fn reject_duplicates<M: ModelKind>(attrs: &[(String, Value)]) -> Result<(), InputError> {
    match duplicate_key(attrs.iter().map(|(k, _)| k.as_str())) {
        Some(key) => Err(InputError::DuplicateKey {
            owner: M::catalog().family,
            key: key.to_string(),
        }),
        None => Ok(()),
    }
}

fn sorted_keys(attrs: &[(String, Value)]) -> Vec<String> {
    attrs
        .iter()
        .map(|(k, _)| k.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn without_discriminator<M: ModelKind>(
    attrs: Vec<(String, Value)>,
) -> impl Iterator<Item = (String, Value)> {
    let discriminator = M::catalog().discriminator;
    attrs.into_iter().filter(move |(k, _)| k != discriminator)
}

/// Type-checks `pairs` against `variant` on top of `base`. Callers have
/// already verified the key set.
fn stage(
    variant: &'static ModelVariant,
    pairs: impl Iterator<Item = (String, Value)>,
    mut base: BTreeMap<&'static str, Value>,
) -> Result<BTreeMap<&'static str, Value>, InputError> {
    for (name, value) in pairs {
        let Some(slot) = variant.slot(&name) else {
            continue;
        };
        let value = coerce(slot.name, slot.kind, value)?;
        warn_if_out_of_bounds(variant.key, slot.name, &value, slot.min, slot.max);
        base.insert(slot.name, value);
    }
    Ok(base)
}
