use super::modeled::ModeledParameter;
use crate::core::catalog::correlation::CorrelationModel;
use crate::core::catalog::distribution::DistributionModel;
use crate::core::error::InputError;
use crate::core::io::traits::For001;
use crate::core::value::Value;
use std::io::Write;
use std::ops::Deref;

/// Initial phase-space distribution of a beam type (`bdistyp`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Distribution(ModeledParameter<DistributionModel>);

impl Distribution {
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

impl Deref for Distribution {
    type Target = ModeledParameter<DistributionModel>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl For001 for Distribution {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        self.0.write_positions(writer)
    }
}

/// A correlation applied to a beam type after generation (`corrtyp`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Correlation(ModeledParameter<CorrelationModel>);

impl Correlation {
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

impl Deref for Correlation {
    type Target = ModeledParameter<CorrelationModel>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl For001 for Correlation {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        self.0.write_positions(writer)
    }
}
