use super::catalog::ModelKind;
use super::error::InputError;
use super::params::beam::Distribution;
use super::params::field::{Accel, Field, Sol};
use super::params::material::Material;
use std::fmt;
use tracing::warn;

/// Semantic type declared for a catalog slot or a record parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Real,
    Integer,
    Logical,
    String,
    Field,
    Material,
    Distribution,
}

impl ParamType {
    /// The value a slot of this type takes when a model is selected without
    /// supplying it.
    pub fn zero(self) -> Value {
        match self {
            ParamType::Real => Value::Real(0.0),
            ParamType::Integer => Value::Int(0),
            ParamType::Logical => Value::Bool(false),
            ParamType::String => Value::Str(String::new()),
            // Reference kinds never appear in a catalog slot.
            ParamType::Field | ParamType::Material | ParamType::Distribution => Value::Int(0),
        }
    }

    /// The one-letter code ICOOL's manual uses for scalar types.
    pub fn code(self) -> &'static str {
        match self {
            ParamType::Real => "R",
            ParamType::Integer => "I",
            ParamType::Logical => "L",
            ParamType::String => "A",
            ParamType::Field => "F",
            ParamType::Material => "M",
            ParamType::Distribution => "D",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamType::Real => "Real",
            ParamType::Integer => "Integer",
            ParamType::Logical => "Logical",
            ParamType::String => "String",
            ParamType::Field => "Field",
            ParamType::Material => "Material",
            ParamType::Distribution => "Distribution",
        };
        f.write_str(name)
    }
}

/// A dynamically typed parameter value.
///
/// Scalars cover everything a catalog slot can hold; the boxed variants let
/// records such as `SubRegion` or `BeamType` carry nested modeled parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Real(f64),
    Int(i64),
    Bool(bool),
    Str(String),
    Field(Box<Field>),
    Material(Box<Material>),
    Distribution(Box<Distribution>),
}

impl Value {
    /// Name of the runtime type, used in `IncorrectType` diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Real(_) => "real",
            Value::Int(_) => "integer",
            Value::Bool(_) => "logical",
            Value::Str(_) => "string",
            Value::Field(_) => "Field",
            Value::Material(_) => "Material",
            Value::Distribution(_) => "Distribution",
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Value::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_material(&self) -> Option<&Material> {
        match self {
            Value::Material(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_distribution(&self) -> Option<&Distribution> {
        match self {
            Value::Distribution(d) => Some(d),
            _ => None,
        }
    }

    /// True for the numeric zero of either kind, `.false.` and the empty string.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Real(x) => *x == 0.0,
            Value::Int(i) => *i == 0,
            Value::Bool(b) => !b,
            Value::Str(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// Formats a value as a `for001.dat` token.
///
/// Reals always keep a decimal point or an exponent so the simulator reads
/// them as floating point; logicals use Fortran's `.true.`/`.false.`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Real(x) => write!(f, "{:?}", x),
            Value::Int(i) => write!(f, "{}", i),
            Value::Bool(true) => f.write_str(".true."),
            Value::Bool(false) => f.write_str(".false."),
            Value::Str(s) => f.write_str(s),
            Value::Field(field) => f.write_str(field.tag()),
            Value::Material(m) => f.write_str(m.mtag()),
            Value::Distribution(d) => write!(f, "{}", d.model().map_or(0, |m| m.ordinal())),
        }
    }
}

/// Returns whether `value` may be stored in a slot declared as `kind`.
///
/// Real slots accept integers too; every other kind demands an exact match.
pub fn check_type(kind: ParamType, value: &Value) -> bool {
    matches!(
        (kind, value),
        (ParamType::Real, Value::Real(_) | Value::Int(_))
            | (ParamType::Integer, Value::Int(_))
            | (ParamType::Logical, Value::Bool(_))
            | (ParamType::String, Value::Str(_))
            | (ParamType::Field, Value::Field(_))
            | (ParamType::Material, Value::Material(_))
            | (ParamType::Distribution, Value::Distribution(_))
    )
}

/// Type-checks `value` against `kind` and normalises integers given for Real
/// slots into reals.
pub(crate) fn coerce(name: &str, kind: ParamType, value: Value) -> Result<Value, InputError> {
    if !check_type(kind, &value) {
        return Err(InputError::IncorrectType {
            name: name.to_string(),
            expected: kind,
            actual: value.type_name(),
        });
    }
    let value = match (kind, value) {
        (ParamType::Real, Value::Int(i)) => Value::Real(i as f64),
        (_, v) => v,
    };
    if let Value::Real(x) = value {
        if !x.is_finite() {
            return Err(InputError::NonFiniteReal {
                name: name.to_string(),
                value: x,
            });
        }
    }
    Ok(value)
}

/// Rejects strings that would spill onto the next line of the deck.
pub(crate) fn check_single_line(
    command: &'static str,
    field: &'static str,
    text: &str,
) -> Result<(), InputError> {
    if text.contains(['\n', '\r']) {
        Err(InputError::LineBreak { command, field })
    } else {
        Ok(())
    }
}

/// Returns the first key that occurs more than once.
pub(crate) fn duplicate_key<'a, I>(keys: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    keys.into_iter().find(|k| !seen.insert(*k))
}

/// Bounds are advisory: ICOOL itself is the final judge, so an out-of-range
/// value is logged and kept.
pub(crate) fn warn_if_out_of_bounds(
    owner: &str,
    name: &str,
    value: &Value,
    min: Option<f64>,
    max: Option<f64>,
) {
    let Some(x) = value.as_f64() else {
        return;
    };
    let below = min.is_some_and(|lo| x < lo);
    let above = max.is_some_and(|hi| x > hi);
    if below || above {
        warn!(
            "{}: value {} for '{}' is outside the documented range [{}, {}]",
            owner,
            value,
            name,
            min.map_or("-inf".to_string(), |v| v.to_string()),
            max.map_or("inf".to_string(), |v| v.to_string()),
        );
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Field> for Value {
    fn from(f: Field) -> Self {
        Value::Field(Box::new(f))
    }
}

impl From<Accel> for Value {
    fn from(a: Accel) -> Self {
        Value::Field(Box::new(Field::Accel(a)))
    }
}

impl From<Sol> for Value {
    fn from(s: Sol) -> Self {
        Value::Field(Box::new(Field::Sol(s)))
    }
}

impl From<Material> for Value {
    fn from(m: Material) -> Self {
        Value::Material(Box::new(m))
    }
}

impl From<Distribution> for Value {
    fn from(d: Distribution) -> Self {
        Value::Distribution(Box::new(d))
    }
}

/// Builds a list of named values, the keyword-argument form accepted by every
/// constructor and `update` in this crate.
///
/// ```
/// use icoolgen::attrs;
/// use icoolgen::core::value::Value;
///
/// let a = attrs! { "model" => "bz", "strength" => 1.5 };
/// assert_eq!(a[1], ("strength".to_string(), Value::Real(1.5)));
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        ::std::vec::Vec::<(::std::string::String, $crate::core::value::Value)>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$((
            ::std::string::String::from($key),
            $crate::core::value::Value::from($value),
        )),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_accepts_integers_and_floats_only() {
        assert!(check_type(ParamType::Real, &Value::Int(3)));
        assert!(check_type(ParamType::Real, &Value::Real(3.14)));
        assert!(!check_type(ParamType::Real, &Value::Str("3".into())));
        assert!(!check_type(ParamType::Real, &Value::Bool(true)));
    }

    #[test]
    fn integer_rejects_reals() {
        assert!(check_type(ParamType::Integer, &Value::Int(3)));
        assert!(!check_type(ParamType::Integer, &Value::Real(3.0)));
    }

    #[test]
    fn logical_and_string_demand_exact_types() {
        assert!(check_type(ParamType::Logical, &Value::Bool(false)));
        assert!(!check_type(ParamType::Logical, &Value::Int(0)));
        assert!(check_type(ParamType::String, &Value::Str("bz".into())));
        assert!(!check_type(ParamType::String, &Value::Int(1)));
    }

    #[test]
    fn coerce_converts_integers_for_real_slots() {
        assert_eq!(
            coerce("clen", ParamType::Real, Value::Int(2)).unwrap(),
            Value::Real(2.0)
        );
        assert_eq!(
            coerce("mode", ParamType::Integer, Value::Int(1)).unwrap(),
            Value::Int(1)
        );
    }

    #[test]
    fn coerce_reports_incorrect_type() {
        let err = coerce("mode", ParamType::Integer, Value::Real(1.0)).unwrap_err();
        assert!(matches!(
            err,
            InputError::IncorrectType {
                expected: ParamType::Integer,
                actual: "real",
                ..
            }
        ));
    }

    #[test]
    fn coerce_rejects_non_finite_reals() {
        for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                coerce("strength", ParamType::Real, Value::Real(x)),
                Err(InputError::NonFiniteReal { ref name, .. }) if name == "strength"
            ));
        }
        assert!(coerce("strength", ParamType::Real, Value::Real(-1e300)).is_ok());
    }

    #[test]
    fn single_line_check_catches_both_line_endings() {
        assert!(check_single_line("Comment", "text", "absorber 1").is_ok());
        for text in ["a\nb", "a\rb", "a\r\n"] {
            assert!(matches!(
                check_single_line("Comment", "text", text),
                Err(InputError::LineBreak {
                    command: "Comment",
                    field: "text"
                })
            ));
        }
    }

    #[test]
    fn duplicate_key_finds_the_repeated_name() {
        assert_eq!(duplicate_key(["model", "bs", "model"]), Some("model"));
        assert_eq!(duplicate_key(["model", "bs"]), None);
    }

    #[test]
    fn tokens_follow_fortran_conventions() {
        assert_eq!(Value::Real(2.0).to_string(), "2.0");
        assert_eq!(Value::Real(0.1).to_string(), "0.1");
        assert_eq!(Value::Real(1e-5).to_string(), "1e-5");
        assert_eq!(Value::Int(0).to_string(), "0");
        assert_eq!(Value::Bool(true).to_string(), ".true.");
        assert_eq!(Value::Bool(false).to_string(), ".false.");
        assert_eq!(Value::Str("CBLOCK".into()).to_string(), "CBLOCK");
    }

    #[test]
    fn typed_zeroes_are_zero() {
        for kind in [
            ParamType::Real,
            ParamType::Integer,
            ParamType::Logical,
            ParamType::String,
        ] {
            assert!(kind.zero().is_zero(), "{kind} zero should be zero");
            assert!(check_type(kind, &kind.zero()));
        }
    }

    #[test]
    fn attrs_macro_builds_named_values() {
        let a = crate::attrs! { "model" => "bz", "mode" => 1, "flip" => true };
        assert_eq!(
            a,
            vec![
                ("model".to_string(), Value::Str("bz".into())),
                ("mode".to_string(), Value::Int(1)),
                ("flip".to_string(), Value::Bool(true)),
            ]
        );
        assert!(crate::attrs! {}.is_empty());
    }
}
