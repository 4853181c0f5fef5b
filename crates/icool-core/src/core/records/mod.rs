//! Validated records: namelists, beam types and the region tree.
//!
//! Every record is composed from a [`CommandParams`] component, which checks
//! named values against a static [`CommandSchema`], and containers add an
//! [`Enclosed`] component holding their ordered, whitelisted children.

use super::error::InputError;
use super::params::{Distribution, Field, Material};
use super::value::{ParamType, Value, check_single_line, coerce, warn_if_out_of_bounds};
use std::collections::{BTreeMap, BTreeSet};

pub mod beam;
pub mod command;
pub mod namelist;
pub mod region;

pub use beam::{BeamType, Bmt};
pub use command::{Command, CommandKind, Enclosed};
pub use namelist::{Cont, Ints};
pub use region::{Cell, Comment, Repeat, SRegion, Section, SubRegion};

/// Declaration of one named record parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandParam {
    pub name: &'static str,
    pub kind: ParamType,
    pub required: bool,
    /// ICOOL's own default, for help output. Unset values are never written.
    pub default: Option<&'static str>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub desc: &'static str,
}

impl CommandParam {
    pub const fn required(name: &'static str, kind: ParamType, desc: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            min: None,
            max: None,
            desc,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamType, desc: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, desc)
        }
    }

    pub const fn default_value(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    pub const fn bounded(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// The parameter table of one record type.
#[derive(Debug, PartialEq)]
pub struct CommandSchema {
    pub name: &'static str,
    pub params: &'static [CommandParam],
}

impl CommandSchema {
    /// Looks a parameter up by name, ignoring ASCII case as Fortran does.
    pub fn param(&self, name: &str) -> Option<&'static CommandParam> {
        let params: &'static [CommandParam] = self.params;
        params.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Schema-validated parameter values of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandParams {
    schema: &'static CommandSchema,
    values: BTreeMap<&'static str, Value>,
}

impl CommandParams {
    /// # Errors
    ///
    /// - [`InputError::UnknownField`] for a name the schema does not declare.
    /// - [`InputError::IncorrectType`] for a value of the wrong type.
    /// - [`InputError::MissingRequiredField`] if a required parameter is absent.
    pub fn new<I>(schema: &'static CommandSchema, attrs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let values = stage(schema, attrs, BTreeMap::new())?;
        if let Some(missing) = schema
            .params
            .iter()
            .find(|p| p.required && !values.contains_key(p.name))
        {
            return Err(InputError::MissingRequiredField {
                command: schema.name,
                field: missing.name,
            });
        }
        Ok(Self { schema, values })
    }

    /// Parameters with nothing set; only valid for schemas without required
    /// parameters.
    pub(crate) fn empty(schema: &'static CommandSchema) -> Self {
        Self {
            schema,
            values: BTreeMap::new(),
        }
    }

    /// Assigns the given values, all or nothing.
    pub fn update<I>(&mut self, attrs: I) -> Result<(), InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.values = stage(self.schema, attrs, self.values.clone())?;
        Ok(())
    }

    pub fn schema(&self) -> &'static CommandSchema {
        self.schema
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema
            .param(name)
            .and_then(|p| self.values.get(p.name))
    }

    /// Explicitly set values in schema order.
    pub fn set_values(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        let params: &'static [CommandParam] = self.schema.params;
        params
            .iter()
            .filter_map(|p| self.values.get(p.name).map(|v| (p.name, v)))
    }

    /// # Errors
    ///
    /// Returns [`InputError::MissingRequiredField`] if `name` is unset.
    pub fn require(&self, name: &'static str) -> Result<&Value, InputError> {
        self.values
            .get(name)
            .ok_or(InputError::MissingRequiredField {
                command: self.schema.name,
                field: name,
            })
    }

    pub fn integer(&self, name: &'static str) -> Result<i64, InputError> {
        self.typed(name, ParamType::Integer, |v| v.as_i64())
    }

    pub fn field(&self, name: &'static str) -> Result<&Field, InputError> {
        self.typed(name, ParamType::Field, Value::as_field)
    }

    pub fn material(&self, name: &'static str) -> Result<&Material, InputError> {
        self.typed(name, ParamType::Material, Value::as_material)
    }

    pub fn distribution(&self, name: &'static str) -> Result<&Distribution, InputError> {
        self.typed(name, ParamType::Distribution, Value::as_distribution)
    }

    fn typed<'a, T>(
        &'a self,
        name: &'static str,
        kind: ParamType,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, InputError> {
        let value = self.require(name)?;
        extract(value).ok_or(InputError::IncorrectType {
            name: name.to_string(),
            expected: kind,
            actual: value.type_name(),
        })
    }
}

fn stage<I>(
    schema: &'static CommandSchema,
    attrs: I,
    mut base: BTreeMap<&'static str, Value>,
) -> Result<BTreeMap<&'static str, Value>, InputError>
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut seen = BTreeSet::new();
    for (name, value) in attrs {
        let param = schema.param(&name).ok_or(InputError::UnknownField {
            command: schema.name,
            field: name,
        })?;
        if !seen.insert(param.name) {
            return Err(InputError::DuplicateKey {
                owner: schema.name,
                key: param.name.to_string(),
            });
        }
        let value = coerce(param.name, param.kind, value)?;
        if let Value::Str(text) = &value {
            check_single_line(schema.name, param.name, text)?;
        }
        warn_if_out_of_bounds(schema.name, param.name, &value, param.min, param.max);
        base.insert(param.name, value);
    }
    Ok(base)
}

/// A record backed by a [`CommandParams`] component.
pub trait Record {
    fn params(&self) -> &CommandParams;

    fn params_mut(&mut self) -> &mut CommandParams;

    fn get(&self, name: &str) -> Option<&Value> {
        self.params().get(name)
    }

    /// Call-style update; on error nothing changes.
    fn update<I>(&mut self, attrs: I) -> Result<(), InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
        Self: Sized,
    {
        self.params_mut().update(attrs)
    }
}

/// A record that owns an ordered list of child commands.
pub trait Container {
    fn enclosed(&self) -> &Enclosed;

    fn enclosed_mut(&mut self) -> &mut Enclosed;

    fn enclosed_commands(&self) -> &[Command] {
        self.enclosed().commands()
    }

    /// # Errors
    ///
    /// Returns [`InputError::DisallowedChild`] if this container does not
    /// accept commands of that kind.
    fn add_enclosed_command(&mut self, command: impl Into<Command>) -> Result<(), InputError>
    where
        Self: Sized,
    {
        self.enclosed_mut().add(command.into())
    }

    /// # Errors
    ///
    /// Returns [`InputError::DisallowedChild`] as for
    /// [`Container::add_enclosed_command`], or [`InputError::InsertOutOfRange`]
    /// if `index` is past the end of the list.
    fn insert_enclosed_command(
        &mut self,
        index: usize,
        command: impl Into<Command>,
    ) -> Result<(), InputError>
    where
        Self: Sized,
    {
        self.enclosed_mut().insert(index, command.into())
    }

    fn remove_enclosed_command(&mut self, index: usize) -> Option<Command> {
        self.enclosed_mut().remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;

    static SCHEMA: CommandSchema = CommandSchema {
        name: "Drift",
        params: &[
            CommandParam::required("slen", ParamType::Real, "Length [m]"),
            CommandParam::required("nrreg", ParamType::Integer, "Subregions").bounded(1.0, 4.0),
            CommandParam::optional("flip", ParamType::Logical, "Flip").default_value(".false."),
        ],
    };

    #[test]
    fn new_stores_integers_given_for_reals_as_reals() {
        let p = CommandParams::new(&SCHEMA, attrs! { "slen" => 1, "nrreg" => 2 }).unwrap();
        assert_eq!(p.get("slen"), Some(&Value::Real(1.0)));
        assert_eq!(p.integer("nrreg").unwrap(), 2);
        assert_eq!(p.get("flip"), None);
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = CommandParams::new(&SCHEMA, attrs! { "slen" => 1.0, "nrreg" => 1, "zstep" => 0.1 })
            .unwrap_err();
        assert!(matches!(
            err,
            InputError::UnknownField { command: "Drift", ref field } if field == "zstep"
        ));
    }

    #[test]
    fn names_given_twice_are_rejected_in_any_case() {
        let err = CommandParams::new(&SCHEMA, attrs! { "slen" => 1.0, "nrreg" => 1, "SLEN" => 2.0 })
            .unwrap_err();
        assert!(matches!(
            err,
            InputError::DuplicateKey { owner: "Drift", ref key } if key == "slen"
        ));
    }

    #[test]
    fn missing_required_parameters_are_rejected() {
        let err = CommandParams::new(&SCHEMA, attrs! { "slen" => 1.0 }).unwrap_err();
        assert!(matches!(
            err,
            InputError::MissingRequiredField {
                command: "Drift",
                field: "nrreg"
            }
        ));
    }

    #[test]
    fn wrong_types_are_rejected() {
        let err = CommandParams::new(&SCHEMA, attrs! { "slen" => 1.0, "nrreg" => 1.5 }).unwrap_err();
        assert!(matches!(
            err,
            InputError::IncorrectType {
                expected: ParamType::Integer,
                ..
            }
        ));
    }

    #[test]
    fn names_are_matched_without_case() {
        let p = CommandParams::new(&SCHEMA, attrs! { "SLEN" => 1.0, "NrReg" => 1 }).unwrap();
        assert_eq!(p.get("slen"), Some(&Value::Real(1.0)));
        assert_eq!(p.get("NRREG"), Some(&Value::Int(1)));
    }

    #[test]
    fn failed_update_changes_nothing() {
        let mut p = CommandParams::new(&SCHEMA, attrs! { "slen" => 1.0, "nrreg" => 1 }).unwrap();
        let before = p.clone();
        assert!(p.update(attrs! { "flip" => true, "bogus" => 1 }).is_err());
        assert_eq!(p, before);
        p.update(attrs! { "flip" => true }).unwrap();
        assert_eq!(p.get("flip"), Some(&Value::Bool(true)));
    }

    #[test]
    fn out_of_range_values_are_kept() {
        let p = CommandParams::new(&SCHEMA, attrs! { "slen" => 1.0, "nrreg" => 9 }).unwrap();
        assert_eq!(p.integer("nrreg").unwrap(), 9);
    }

    #[test]
    fn set_values_follow_schema_order() {
        let p = CommandParams::new(&SCHEMA, attrs! { "flip" => false, "nrreg" => 1, "slen" => 2.0 })
            .unwrap();
        let names: Vec<_> = p.set_values().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["slen", "nrreg", "flip"]);
    }
}
