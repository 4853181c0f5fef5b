use super::command::{CommandKind, Enclosed};
use super::region::check_count;
use super::{CommandParam, CommandParams, CommandSchema, Container, Record};
use crate::core::error::InputError;
use crate::core::io::format::{write_namelist, write_tokens};
use crate::core::io::traits::For001;
use crate::core::value::{ParamType, Value};
use std::io::Write;

static BEAMTYPE: CommandSchema = CommandSchema {
    name: "BeamType",
    params: &[
        CommandParam::required("partnum", ParamType::Integer, "Particle number"),
        CommandParam::required(
            "bmtype",
            ParamType::Integer,
            "Beam type {magnitude = mass code; sign = charge}: 1 e, 2 mu, 3 pi, 4 K, 5 p, 6 d, 7 He3, 8 Li7",
        ),
        CommandParam::required(
            "fractbt",
            ParamType::Real,
            "Fraction of beam of this type {0-1}. The sum of all fracbt(i) should be 1.0",
        )
        .bounded(0.0, 1.0),
        CommandParam::required(
            "distribution",
            ParamType::Distribution,
            "Beam distribution object",
        ),
        CommandParam::required("nbcorr", ParamType::Integer, "# of beam correlations {0-10}")
            .bounded(0.0, 10.0),
    ],
};

static BMT: CommandSchema = CommandSchema {
    name: "Bmt",
    params: &[
        CommandParam::required(
            "nbeamtyp",
            ParamType::Integer,
            "# of beam types, e.g., particles of different masses",
        )
        .default_value("1"),
        CommandParam::optional(
            "bmalt",
            ParamType::Logical,
            "if true => flip sign of alternate particles when BGEN = true",
        )
        .default_value(".false."),
    ],
};

/// One species of the generated beam with its distribution and correlations.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamType {
    params: CommandParams,
    enclosed: Enclosed,
}

impl BeamType {
    pub const ALLOWED: &'static [CommandKind] = &[CommandKind::Correlation];

    pub fn new<I>(attrs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Ok(Self {
            params: CommandParams::new(&BEAMTYPE, attrs)?,
            enclosed: Enclosed::new(BEAMTYPE.name, Self::ALLOWED),
        })
    }
}

impl Record for BeamType {
    fn params(&self) -> &CommandParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut CommandParams {
        &mut self.params
    }
}

impl Container for BeamType {
    fn enclosed(&self) -> &Enclosed {
        &self.enclosed
    }

    fn enclosed_mut(&mut self) -> &mut Enclosed {
        &mut self.enclosed
    }
}

impl For001 for BeamType {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        let p = &self.params;
        check_count(BEAMTYPE.name, "nbcorr", p.integer("nbcorr")?, self.enclosed.len())?;
        write_tokens(
            writer,
            [
                p.require("partnum")?,
                p.require("bmtype")?,
                p.require("fractbt")?,
            ],
        )?;
        p.distribution("distribution")?.write_for001(writer)?;
        writeln!(writer, "{}", p.require("nbcorr")?)?;
        self.enclosed.write_all(writer)
    }
}

/// The `&bmt` namelist followed by its beam types.
#[derive(Debug, Clone, PartialEq)]
pub struct Bmt {
    params: CommandParams,
    enclosed: Enclosed,
}

impl Bmt {
    pub const ALLOWED: &'static [CommandKind] = &[CommandKind::BeamType];

    pub fn new<I>(attrs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Ok(Self {
            params: CommandParams::new(&BMT, attrs)?,
            enclosed: Enclosed::new(BMT.name, Self::ALLOWED),
        })
    }
}

impl Record for Bmt {
    fn params(&self) -> &CommandParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut CommandParams {
        &mut self.params
    }
}

impl Container for Bmt {
    fn enclosed(&self) -> &Enclosed {
        &self.enclosed
    }

    fn enclosed_mut(&mut self) -> &mut Enclosed {
        &mut self.enclosed
    }
}

impl For001 for Bmt {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        check_count(
            BMT.name,
            "nbeamtyp",
            self.params.integer("nbeamtyp")?,
            self.enclosed.len(),
        )?;
        write_namelist(writer, "bmt", self.params.set_values())?;
        self.enclosed.write_all(writer)
    }
}
