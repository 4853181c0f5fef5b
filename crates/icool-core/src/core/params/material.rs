use super::modeled::ModeledParameter;
use crate::core::catalog::material::{Geometry, material_tag};
use crate::core::error::InputError;
use crate::core::io::traits::For001;
use crate::core::value::{ParamType, Value};
use std::io::Write;
use std::ops::Deref;

/// A material composition (`mtag`) placed in a geometry (`geom`).
///
/// Written as the composition tag, the upper-case geometry key and the ten
/// geometry parameters, each on its own line.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    mtag: &'static str,
    geometry: ModeledParameter<Geometry>,
}

impl Material {
    pub const TAG_KEY: &'static str = "mtag";

    /// # Errors
    ///
    /// Returns [`InputError::MissingRequiredField`] without `mtag`,
    /// [`InputError::UnknownMaterialTag`] for a composition ICOOL does not
    /// know, or any error of the geometry engine.
    pub fn new<I>(attrs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let (mtag, rest) = split_mtag(attrs)?;
        let mtag = mtag.ok_or(InputError::MissingRequiredField {
            command: "MATERIAL",
            field: Self::TAG_KEY,
        })?;
        let geometry = ModeledParameter::new(rest)?;
        Ok(Self { mtag, geometry })
    }

    /// Updates the composition and/or the geometry. Nothing changes unless
    /// both parts validate.
    pub fn update<I>(&mut self, attrs: I) -> Result<(), InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let (mtag, rest) = split_mtag(attrs)?;
        self.geometry.update(rest)?;
        if let Some(mtag) = mtag {
            self.mtag = mtag;
        }
        Ok(())
    }

    pub fn mtag(&self) -> &'static str {
        self.mtag
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry.model()
    }
}

impl Deref for Material {
    type Target = ModeledParameter<Geometry>;

    fn deref(&self) -> &Self::Target {
        &self.geometry
    }
}

fn split_mtag<I>(attrs: I) -> Result<(Option<&'static str>, Vec<(String, Value)>), InputError>
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut mtag = None;
    let mut rest = Vec::new();
    for (name, value) in attrs {
        if name != Material::TAG_KEY {
            rest.push((name, value));
            continue;
        }
        match value {
            Value::Str(tag) => {
                mtag = Some(material_tag(&tag).ok_or(InputError::UnknownMaterialTag(tag))?);
            }
            other => {
                return Err(InputError::IncorrectType {
                    name,
                    expected: ParamType::String,
                    actual: other.type_name(),
                });
            }
        }
    }
    Ok((mtag, rest))
}

impl For001 for Material {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        let geometry = self.geometry.variant().ok_or(InputError::NoModelSelected {
            family: "MATERIAL",
        })?;
        writeln!(writer, "{}", self.mtag)?;
        writeln!(writer, "{}", geometry.key.to_ascii_uppercase())?;
        self.geometry.write_positions(writer)
    }
}
