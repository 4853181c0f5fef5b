//! The region tree: sections, repeats, cells and s-regions.

use super::command::{CommandKind, Enclosed};
use super::{CommandParam, CommandParams, CommandSchema, Container, Record};
use crate::core::error::InputError;
use crate::core::io::format::write_tokens;
use crate::core::io::traits::For001;
use crate::core::value::{ParamType, Value};
use std::io::Write;

static SUBREGION: CommandSchema = CommandSchema {
    name: "SubRegion",
    params: &[
        CommandParam::required("irreg", ParamType::Integer, "Subregion number {1-4}")
            .bounded(1.0, 4.0),
        CommandParam::required("rlow", ParamType::Real, "Innermost radius of this subregion [m]"),
        CommandParam::required("rhigh", ParamType::Real, "Outermost radius of this subregion [m]"),
        CommandParam::required("field", ParamType::Field, "Field in this subregion"),
        CommandParam::required("material", ParamType::Material, "Material in this subregion"),
    ],
};

static SREGION: CommandSchema = CommandSchema {
    name: "SRegion",
    params: &[
        CommandParam::required("slen", ParamType::Real, "Length of this s region [m]"),
        CommandParam::required(
            "nrreg",
            ParamType::Integer,
            "# of radial subregions of this s region {1-4}",
        )
        .bounded(1.0, 4.0),
        CommandParam::required("zstep", ParamType::Real, "Step for tracking particles [m]"),
    ],
};

static REPEAT: CommandSchema = CommandSchema {
    name: "Repeat",
    params: &[CommandParam::required(
        "nrep",
        ParamType::Integer,
        "# of times to repeat the enclosed commands",
    )],
};

static CELL: CommandSchema = CommandSchema {
    name: "Cell",
    params: &[
        CommandParam::required("ncells", ParamType::Integer, "Number of times to repeat this cell"),
        CommandParam::required(
            "flip",
            ParamType::Logical,
            "if .true. => flip the cell field for alternate cells",
        ),
        CommandParam::required("field", ParamType::Field, "Field applied across the whole cell"),
    ],
};

static COMMENT: CommandSchema = CommandSchema {
    name: "Comment",
    params: &[CommandParam::required("text", ParamType::String, "Comment text")],
};

/// A radial slice of an s-region with its own field and material.
#[derive(Debug, Clone, PartialEq)]
pub struct SubRegion {
    params: CommandParams,
}

impl SubRegion {
    pub fn new<I>(attrs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        CommandParams::new(&SUBREGION, attrs).map(|params| Self { params })
    }
}

impl Record for SubRegion {
    fn params(&self) -> &CommandParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut CommandParams {
        &mut self.params
    }
}

impl For001 for SubRegion {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        let p = &self.params;
        write_tokens(
            writer,
            [p.require("irreg")?, p.require("rlow")?, p.require("rhigh")?],
        )?;
        p.field("field")?.write_for001(writer)?;
        p.material("material")?.write_for001(writer)
    }
}

/// A longitudinal region of fixed length divided into radial subregions.
#[derive(Debug, Clone, PartialEq)]
pub struct SRegion {
    params: CommandParams,
    enclosed: Enclosed,
}

impl SRegion {
    pub const ALLOWED: &'static [CommandKind] = &[CommandKind::SubRegion];

    pub fn new<I>(attrs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Ok(Self {
            params: CommandParams::new(&SREGION, attrs)?,
            enclosed: Enclosed::new(SREGION.name, Self::ALLOWED),
        })
    }
}

impl Record for SRegion {
    fn params(&self) -> &CommandParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut CommandParams {
        &mut self.params
    }
}

impl Container for SRegion {
    fn enclosed(&self) -> &Enclosed {
        &self.enclosed
    }

    fn enclosed_mut(&mut self) -> &mut Enclosed {
        &mut self.enclosed
    }
}

impl For001 for SRegion {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        let p = &self.params;
        check_count(SREGION.name, "nrreg", p.integer("nrreg")?, self.enclosed.len())?;
        writeln!(writer, "SREGION")?;
        write_tokens(
            writer,
            [p.require("slen")?, p.require("nrreg")?, p.require("zstep")?],
        )?;
        self.enclosed.write_all(writer)
    }
}

/// Repeats its enclosed s-regions `nrep` times.
#[derive(Debug, Clone, PartialEq)]
pub struct Repeat {
    params: CommandParams,
    enclosed: Enclosed,
}

impl Repeat {
    pub const ALLOWED: &'static [CommandKind] = &[CommandKind::SRegion, CommandKind::Comment];

    pub fn new<I>(attrs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Ok(Self {
            params: CommandParams::new(&REPEAT, attrs)?,
            enclosed: Enclosed::new(REPEAT.name, Self::ALLOWED),
        })
    }
}

impl Record for Repeat {
    fn params(&self) -> &CommandParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut CommandParams {
        &mut self.params
    }
}

impl Container for Repeat {
    fn enclosed(&self) -> &Enclosed {
        &self.enclosed
    }

    fn enclosed_mut(&mut self) -> &mut Enclosed {
        &mut self.enclosed
    }
}

impl For001 for Repeat {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        writeln!(writer, "REPEAT")?;
        writeln!(writer, "{}", self.params.require("nrep")?)?;
        self.enclosed.write_all(writer)?;
        writeln!(writer, "ENDREPEAT")?;
        Ok(())
    }
}

/// A group of regions repeated `ncells` times under a common cell field.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    params: CommandParams,
    enclosed: Enclosed,
}

impl Cell {
    pub const ALLOWED: &'static [CommandKind] = &[
        CommandKind::SRegion,
        CommandKind::Repeat,
        CommandKind::Comment,
    ];

    pub fn new<I>(attrs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Ok(Self {
            params: CommandParams::new(&CELL, attrs)?,
            enclosed: Enclosed::new(CELL.name, Self::ALLOWED),
        })
    }
}

impl Record for Cell {
    fn params(&self) -> &CommandParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut CommandParams {
        &mut self.params
    }
}

impl Container for Cell {
    fn enclosed(&self) -> &Enclosed {
        &self.enclosed
    }

    fn enclosed_mut(&mut self) -> &mut Enclosed {
        &mut self.enclosed
    }
}

impl For001 for Cell {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        let p = &self.params;
        writeln!(writer, "CELL")?;
        writeln!(writer, "{}", p.require("ncells")?)?;
        writeln!(writer, "{}", p.require("flip")?)?;
        p.field("field")?.write_for001(writer)?;
        self.enclosed.write_all(writer)?;
        writeln!(writer, "ENDCELL")?;
        Ok(())
    }
}

/// The outermost region block of a problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    enclosed: Enclosed,
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

impl Section {
    pub const ALLOWED: &'static [CommandKind] = &[
        CommandKind::Cell,
        CommandKind::Repeat,
        CommandKind::SRegion,
        CommandKind::Comment,
    ];

    pub fn new() -> Self {
        Self {
            enclosed: Enclosed::new("Section", Self::ALLOWED),
        }
    }
}

impl Container for Section {
    fn enclosed(&self) -> &Enclosed {
        &self.enclosed
    }

    fn enclosed_mut(&mut self) -> &mut Enclosed {
        &mut self.enclosed
    }
}

impl For001 for Section {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        writeln!(writer, "SECTION")?;
        self.enclosed.write_all(writer)?;
        writeln!(writer, "ENDSECTION")?;
        Ok(())
    }
}

/// A `!` comment line in the region block.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    params: CommandParams,
}

impl Comment {
    /// # Errors
    ///
    /// Returns [`InputError::LineBreak`] if `text` spans more than one line.
    pub fn new(text: impl Into<String>) -> Result<Self, InputError> {
        CommandParams::new(&COMMENT, [("text".to_string(), Value::Str(text.into()))])
            .map(|params| Self { params })
    }

    pub fn text(&self) -> &str {
        self.params
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

impl Record for Comment {
    fn params(&self) -> &CommandParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut CommandParams {
        &mut self.params
    }
}

impl For001 for Comment {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        writeln!(writer, "! {}", self.text())?;
        Ok(())
    }
}

pub(crate) fn check_count(
    command: &'static str,
    param: &'static str,
    declared: i64,
    actual: usize,
) -> Result<(), InputError> {
    if usize::try_from(declared).ok() == Some(actual) {
        Ok(())
    } else {
        Err(InputError::CountMismatch {
            command,
            param,
            declared,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use crate::core::params::{Accel, Material, Sol};
    use crate::core::records::Command;

    fn vacuum() -> Material {
        Material::new(attrs! { "geom" => "CBLOCK", "mtag" => "VAC" }).unwrap()
    }

    fn sol_edge() -> Sol {
        Sol::new(attrs! {
            "model" => "edge",
            "ent_def" => 0,
            "ex_def" => 0,
            "foc_flag" => 0,
            "bs" => -40,
        })
        .unwrap()
    }

    fn sregion() -> SRegion {
        let mut sreg = SRegion::new(attrs! { "zstep" => 0.001, "nrreg" => 1, "slen" => 1 }).unwrap();
        let subr = SubRegion::new(attrs! {
            "material" => vacuum(),
            "rlow" => 0,
            "rhigh" => 0.5,
            "irreg" => 1,
            "field" => sol_edge(),
        })
        .unwrap();
        sreg.add_enclosed_command(subr).unwrap();
        sreg
    }

    const SREGION_TEXT: &str = "SREGION\n\
                                1.0 1 0.001\n\
                                1 0.0 0.5\n\
                                SOL\n\
                                8 -40.0 0 0.0 0.0 0 0 0 0 0 0 0 0 0 0\n\
                                VAC\n\
                                CBLOCK\n\
                                0 0 0 0 0 0 0 0 0 0\n";

    #[test]
    fn sregion_writes_its_subregions() {
        assert_eq!(sregion().to_for001_string().unwrap(), SREGION_TEXT);
    }

    #[test]
    fn sregion_into_repeat_is_allowed() {
        let mut rep = Repeat::new(attrs! { "nrep" => 10 }).unwrap();
        rep.add_enclosed_command(sregion()).unwrap();
        assert_eq!(rep.enclosed_commands().len(), 1);
        assert_eq!(
            rep.to_for001_string().unwrap(),
            format!("REPEAT\n10\n{SREGION_TEXT}ENDREPEAT\n")
        );
    }

    #[test]
    fn cell_into_repeat_is_rejected() {
        let ac = Accel::new(attrs! {
            "model" => "sec_pill_rec",
            "freq" => 1, "grad" => 2, "height" => 3,
            "phase" => 4, "rad_offset" => 5, "width" => 6,
        })
        .unwrap();
        let cell = Cell::new(attrs! { "ncells" => 10, "field" => ac, "flip" => false }).unwrap();
        let mut rep = Repeat::new(attrs! { "nrep" => 10 }).unwrap();
        let err = rep.add_enclosed_command(cell).unwrap_err();
        assert!(matches!(
            err,
            InputError::DisallowedChild {
                container: "Repeat",
                child: "Cell"
            }
        ));
        assert!(rep.enclosed_commands().is_empty());
    }

    #[test]
    fn cell_writes_its_field_before_children() {
        let mut cell = Cell::new(attrs! { "ncells" => 2, "field" => sol_edge(), "flip" => false })
            .unwrap();
        cell.add_enclosed_command(Comment::new("absorber").unwrap()).unwrap();
        assert_eq!(
            cell.to_for001_string().unwrap(),
            "CELL\n2\n.false.\nSOL\n8 -40.0 0 0.0 0.0 0 0 0 0 0 0 0 0 0 0\n! absorber\nENDCELL\n"
        );
    }

    #[test]
    fn section_brackets_its_children() {
        let mut s = Section::new();
        s.add_enclosed_command(Comment::new("start").unwrap()).unwrap();
        s.add_enclosed_command(sregion()).unwrap();
        assert_eq!(
            s.to_for001_string().unwrap(),
            format!("SECTION\n! start\n{SREGION_TEXT}ENDSECTION\n")
        );
    }

    #[test]
    fn section_rejects_bare_subregions() {
        let subr = SubRegion::new(attrs! {
            "material" => vacuum(),
            "rlow" => 0,
            "rhigh" => 0.5,
            "irreg" => 1,
            "field" => sol_edge(),
        })
        .unwrap();
        let mut s = Section::new();
        assert!(matches!(
            s.add_enclosed_command(subr),
            Err(InputError::DisallowedChild {
                container: "Section",
                child: "SubRegion"
            })
        ));
    }

    #[test]
    fn subregion_count_must_match_nrreg() {
        let mut sreg = sregion();
        sreg.update(attrs! { "nrreg" => 2 }).unwrap();
        assert!(matches!(
            sreg.to_for001_string(),
            Err(InputError::CountMismatch {
                command: "SRegion",
                param: "nrreg",
                declared: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn subregion_requires_every_parameter() {
        let err = SubRegion::new(attrs! { "irreg" => 1, "rlow" => 0.0, "rhigh" => 0.5 }).unwrap_err();
        assert!(matches!(
            err,
            InputError::MissingRequiredField {
                command: "SubRegion",
                field: "field"
            }
        ));
    }

    #[test]
    fn subregion_rejects_a_material_in_the_field_slot() {
        let err = SubRegion::new(attrs! {
            "material" => vacuum(),
            "rlow" => 0,
            "rhigh" => 0.5,
            "irreg" => 1,
            "field" => vacuum(),
        })
        .unwrap_err();
        assert!(matches!(
            err,
            InputError::IncorrectType {
                expected: ParamType::Field,
                actual: "Material",
                ..
            }
        ));
    }

    #[test]
    fn comments_must_stay_on_one_line() {
        assert!(matches!(
            Comment::new("note\nENDSECTION"),
            Err(InputError::LineBreak {
                command: "Comment",
                field: "text"
            })
        ));
        assert!(Comment::new("note\r").is_err());
    }

    #[test]
    fn comment_update_rejects_line_breaks_and_keeps_the_text() {
        let mut c = Comment::new("absorber").unwrap();
        let err = c.update(attrs! { "text" => "a\nb" }).unwrap_err();
        assert!(matches!(err, InputError::LineBreak { .. }));
        assert_eq!(c.text(), "absorber");

        c.update(attrs! { "text" => "window" }).unwrap();
        assert_eq!(c.to_for001_string().unwrap(), "! window\n");
    }

    #[test]
    fn insert_and_remove_through_the_container_trait() {
        let mut s = Section::new();
        s.add_enclosed_command(Comment::new("b").unwrap()).unwrap();
        s.insert_enclosed_command(0, Comment::new("a").unwrap()).unwrap();
        assert!(matches!(
            s.insert_enclosed_command(7, Comment::new("z").unwrap()),
            Err(InputError::InsertOutOfRange { .. })
        ));
        let removed = s.remove_enclosed_command(0).unwrap();
        assert_eq!(removed, Command::from(Comment::new("a").unwrap()));
        assert_eq!(s.enclosed_commands(), &[Command::from(Comment::new("b").unwrap())]);
    }
}
