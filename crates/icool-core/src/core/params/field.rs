use super::modeled::ModeledParameter;
use crate::core::catalog::accel::AccelModel;
use crate::core::catalog::sol::SolModel;
use crate::core::error::InputError;
use crate::core::io::traits::For001;
use crate::core::value::Value;
use std::io::Write;
use std::ops::Deref;

/// An accelerating cavity field (`ACCEL`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Accel(ModeledParameter<AccelModel>);

impl Accel {
    pub const TAG: &'static str = "ACCEL";

    pub fn new<I>(attrs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        ModeledParameter::new(attrs).map(Self)
    }

    pub fn undetermined() -> Self {
        Self(ModeledParameter::undetermined())
    }

    pub fn update<I>(&mut self, attrs: I) -> Result<(), InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.0.update(attrs)
    }
}

impl Deref for Accel {
    type Target = ModeledParameter<AccelModel>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl For001 for Accel {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        writeln!(writer, "{}", Self::TAG)?;
        self.0.write_positions(writer)
    }
}

/// A solenoid field (`SOL`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sol(ModeledParameter<SolModel>);

impl Sol {
    pub const TAG: &'static str = "SOL";

    pub fn new<I>(attrs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        ModeledParameter::new(attrs).map(Self)
    }

    pub fn undetermined() -> Self {
        Self(ModeledParameter::undetermined())
    }

    pub fn update<I>(&mut self, attrs: I) -> Result<(), InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.0.update(attrs)
    }
}

impl Deref for Sol {
    type Target = ModeledParameter<SolModel>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl For001 for Sol {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        writeln!(writer, "{}", Self::TAG)?;
        self.0.write_positions(writer)
    }
}

/// Any field a region or cell can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Accel(Accel),
    Sol(Sol),
}

impl Field {
    /// Builds a field from its tag (`accel` or `sol`, any case) and the
    /// attributes of the selected model.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnknownModel`] for an unknown tag, or any error of
    /// the underlying constructor.
    pub fn new<I>(ftag: &str, attrs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if ftag.eq_ignore_ascii_case(Accel::TAG) {
            Accel::new(attrs).map(Field::Accel)
        } else if ftag.eq_ignore_ascii_case(Sol::TAG) {
            Sol::new(attrs).map(Field::Sol)
        } else {
            Err(InputError::UnknownModel {
                family: "FIELD",
                key: ftag.to_string(),
            })
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Field::Accel(_) => Accel::TAG,
            Field::Sol(_) => Sol::TAG,
        }
    }

    pub fn update<I>(&mut self, attrs: I) -> Result<(), InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        match self {
            Field::Accel(a) => a.update(attrs),
            Field::Sol(s) => s.update(attrs),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Field::Accel(a) => a.get(name),
            Field::Sol(s) => s.get(name),
        }
    }

    pub fn render_positions(&self) -> Result<Vec<Value>, InputError> {
        match self {
            Field::Accel(a) => a.render_positions(),
            Field::Sol(s) => s.render_positions(),
        }
    }
}

impl From<Accel> for Field {
    fn from(a: Accel) -> Self {
        Field::Accel(a)
    }
}

impl From<Sol> for Field {
    fn from(s: Sol) -> Self {
        Field::Sol(s)
    }
}

impl For001 for Field {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        match self {
            Field::Accel(a) => a.write_for001(writer),
            Field::Sol(s) => s.write_for001(writer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;

    fn edge() -> Sol {
        Sol::new(attrs! {
            "model" => "edge",
            "ent_def" => 0,
            "ex_def" => 0,
            "foc_flag" => 0,
            "bs" => -40,
        })
        .unwrap()
    }

    #[test]
    fn sol_writes_tag_then_fifteen_tokens() {
        assert_eq!(
            edge().to_for001_string().unwrap(),
            "SOL\n8 -40.0 0 0.0 0.0 0 0 0 0 0 0 0 0 0 0\n"
        );
    }

    #[test]
    fn accel_writes_tag_then_fifteen_tokens() {
        let ac = Accel::new(attrs! {
            "model" => "sec_pill_rec",
            "freq" => 1,
            "grad" => 2,
            "height" => 3,
            "phase" => 4,
            "rad_offset" => 5,
            "width" => 6,
        })
        .unwrap();
        assert_eq!(
            ac.to_for001_string().unwrap(),
            "ACCEL\n12 1.0 2.0 4.0 5.0 6.0 3.0 0 0 0 0 0 0 0 0\n"
        );
    }

    #[test]
    fn writing_twice_is_byte_identical() {
        let field = Field::from(edge());
        assert_eq!(
            field.to_for001_string().unwrap(),
            field.to_for001_string().unwrap()
        );
    }

    #[test]
    fn field_tags_are_case_insensitive() {
        let f = Field::new("Sol", attrs! { "model" => "interp", "grid" => 1, "level" => 3 })
            .unwrap();
        assert_eq!(f.tag(), "SOL");
        assert_eq!(f.get("level"), Some(&Value::Int(3)));
        assert!(matches!(
            Field::new("wiggler", attrs! {}),
            Err(InputError::UnknownModel { family: "FIELD", .. })
        ));
    }

    #[test]
    fn undetermined_field_cannot_be_written() {
        let f = Field::from(Accel::undetermined());
        assert!(matches!(
            f.to_for001_string(),
            Err(InputError::NoModelSelected { family: "ACCEL" })
        ));
    }

    #[test]
    fn update_through_the_field_enum() {
        let mut f = Field::from(edge());
        f.update(attrs! { "bs" => 3.0 }).unwrap();
        assert_eq!(f.get("bs"), Some(&Value::Real(3.0)));
        assert_eq!(f.render_positions().unwrap()[1], Value::Real(3.0));
    }
}
