//! TOML problem definitions.
//!
//! A problem file names the same records and parameters the object model
//! uses, so every value goes through the same validation as a hand-built
//! tree:
//!
//! ```toml
//! title = "Solenoid channel"
//!
//! [cont]
//! npart = 1000
//!
//! [[section]]
//! type = "sregion"
//! slen = 1.0
//! nrreg = 1
//! zstep = 0.001
//!
//! [[section.subregions]]
//! irreg = 1
//! rlow = 0.0
//! rhigh = 0.5
//! field = { ftag = "sol", model = "edge", bs = -40.0, foc_flag = 0, ent_def = 0.0, ex_def = 0.0 }
//! material = { mtag = "VAC", geom = "cblock" }
//! ```

use super::input::IcoolInput;
use crate::core::error::InputError;
use crate::core::params::{Correlation, Distribution, Field, Material};
use crate::core::records::{
    BeamType, Bmt, Cell, Command, Comment, Cont, Container, Ints, Repeat, SRegion, Section,
    SubRegion,
};
use crate::core::value::Value;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProblemLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Unsupported value for '{key}': expected a number, boolean or string but found {kind}")]
    UnsupportedValue { key: String, kind: &'static str },
    #[error(transparent)]
    Input(#[from] InputError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemFile {
    pub title: String,
    #[serde(default)]
    pub cont: toml::Table,
    #[serde(default)]
    pub bmt: Option<BmtTable>,
    #[serde(default)]
    pub ints: toml::Table,
    #[serde(default)]
    pub section: Vec<SectionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct BmtTable {
    #[serde(default, rename = "beamtype")]
    pub beamtypes: Vec<BeamTypeTable>,
    #[serde(flatten)]
    pub params: toml::Table,
}

#[derive(Debug, Deserialize)]
pub struct BeamTypeTable {
    pub distribution: toml::Table,
    #[serde(default)]
    pub correlations: Vec<toml::Table>,
    #[serde(flatten)]
    pub params: toml::Table,
}

/// One command of the region block, tagged by `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SectionEntry {
    SRegion(SRegionTable),
    Repeat(RepeatTable),
    Cell(CellTable),
    Comment { text: String },
}

#[derive(Debug, Deserialize)]
pub struct SRegionTable {
    #[serde(default)]
    pub subregions: Vec<SubRegionTable>,
    #[serde(flatten)]
    pub params: toml::Table,
}

#[derive(Debug, Deserialize)]
pub struct SubRegionTable {
    pub field: toml::Table,
    pub material: toml::Table,
    #[serde(flatten)]
    pub params: toml::Table,
}

#[derive(Debug, Deserialize)]
pub struct RepeatTable {
    #[serde(default)]
    pub commands: Vec<SectionEntry>,
    #[serde(flatten)]
    pub params: toml::Table,
}

#[derive(Debug, Deserialize)]
pub struct CellTable {
    pub field: toml::Table,
    #[serde(default)]
    pub commands: Vec<SectionEntry>,
    #[serde(flatten)]
    pub params: toml::Table,
}

impl ProblemFile {
    /// Reads and parses a problem file.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemLoadError::Io`] if the file cannot be read or
    /// [`ProblemLoadError::Toml`] if it is not a valid problem definition.
    pub fn load(path: &Path) -> Result<Self, ProblemLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProblemLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ProblemLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Builds and validates the object tree.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemLoadError::UnsupportedValue`] for arrays, tables or
    /// dates in scalar positions and [`ProblemLoadError::Input`] for any
    /// validation failure of the tree.
    pub fn build(self) -> Result<IcoolInput, ProblemLoadError> {
        let cont = Cont::new(to_attrs(self.cont)?)?;
        let bmt = self.bmt.map(BmtTable::build).transpose()?;
        let ints = Ints::new(to_attrs(self.ints)?)?;

        let mut section = Section::new();
        for entry in self.section {
            section.add_enclosed_command(entry.build()?)?;
        }
        debug!(
            commands = section.enclosed_commands().len(),
            "Built problem tree"
        );

        Ok(IcoolInput {
            title: self.title,
            cont,
            bmt,
            ints,
            section,
        })
    }
}

impl BmtTable {
    fn build(self) -> Result<Bmt, ProblemLoadError> {
        let mut bmt = Bmt::new(to_attrs(self.params)?)?;
        for def in self.beamtypes {
            bmt.add_enclosed_command(def.build()?)?;
        }
        Ok(bmt)
    }
}

impl BeamTypeTable {
    fn build(self) -> Result<BeamType, ProblemLoadError> {
        let distribution = Distribution::new(to_attrs(self.distribution)?)?;
        let mut attrs = to_attrs(self.params)?;
        attrs.push(("distribution".to_string(), distribution.into()));
        let mut beamtype = BeamType::new(attrs)?;
        for table in self.correlations {
            beamtype.add_enclosed_command(Correlation::new(to_attrs(table)?)?)?;
        }
        Ok(beamtype)
    }
}

impl SectionEntry {
    fn build(self) -> Result<Command, ProblemLoadError> {
        Ok(match self {
            SectionEntry::SRegion(def) => {
                let mut sregion = SRegion::new(to_attrs(def.params)?)?;
                for sub in def.subregions {
                    sregion.add_enclosed_command(sub.build()?)?;
                }
                sregion.into()
            }
            SectionEntry::Repeat(def) => {
                let mut repeat = Repeat::new(to_attrs(def.params)?)?;
                for entry in def.commands {
                    repeat.add_enclosed_command(entry.build()?)?;
                }
                repeat.into()
            }
            SectionEntry::Cell(def) => {
                let mut attrs = to_attrs(def.params)?;
                attrs.push(("field".to_string(), build_field(def.field)?.into()));
                let mut cell = Cell::new(attrs)?;
                for entry in def.commands {
                    cell.add_enclosed_command(entry.build()?)?;
                }
                cell.into()
            }
            SectionEntry::Comment { text } => Comment::new(text)?.into(),
        })
    }
}

impl SubRegionTable {
    fn build(self) -> Result<SubRegion, ProblemLoadError> {
        let mut attrs = to_attrs(self.params)?;
        attrs.push(("field".to_string(), build_field(self.field)?.into()));
        attrs.push(("material".to_string(), Material::new(to_attrs(self.material)?)?.into()));
        Ok(SubRegion::new(attrs)?)
    }
}

fn build_field(mut table: toml::Table) -> Result<Field, ProblemLoadError> {
    let ftag = match table.remove("ftag") {
        Some(toml::Value::String(tag)) => tag,
        Some(other) => {
            return Err(ProblemLoadError::UnsupportedValue {
                key: "ftag".to_string(),
                kind: other.type_str(),
            });
        }
        None => {
            return Err(InputError::MissingRequiredField {
                command: "Field",
                field: "ftag",
            }
            .into());
        }
    };
    Ok(Field::new(&ftag, to_attrs(table)?)?)
}

fn to_attrs(table: toml::Table) -> Result<Vec<(String, Value)>, ProblemLoadError> {
    table
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                toml::Value::Integer(i) => Value::Int(i),
                toml::Value::Float(x) => Value::Real(x),
                toml::Value::Boolean(b) => Value::Bool(b),
                toml::Value::String(s) => Value::Str(s),
                other => {
                    return Err(ProblemLoadError::UnsupportedValue {
                        key,
                        kind: other.type_str(),
                    });
                }
            };
            Ok((key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::traits::For001;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const PROBLEM: &str = r#"
title = "Solenoid channel"

[cont]
npart = 10000

[bmt]
nbeamtyp = 1

[[bmt.beamtype]]
partnum = 1
bmtype = 2
fractbt = 1.0
nbcorr = 1
distribution = { bdistyp = "gaussian", x_mean = 0.0, y_mean = 0.0, z_mean = 0.0, px_mean = 0.0, py_mean = 0.0, pz_mean = 0.2, x_std = 0.00486, y_std = 0.00486, z_std = 0.86, px_std = 0.000935, py_std = 0.000935, pz_std = 0.002 }
correlations = [{ corrtyp = "ang_mom", sol_field = 1.29 }]

[ints]
ldecay = false

[[section]]
type = "comment"
text = "matching"

[[section]]
type = "repeat"
nrep = 2

[[section.commands]]
type = "sregion"
slen = 1.0
nrreg = 1
zstep = 0.001

[[section.commands.subregions]]
irreg = 1
rlow = 0.0
rhigh = 0.5
field = { ftag = "sol", model = "bz", strength = 1.5, clen = 2.0, elen1 = 0.1, offset = 0.0, elen2 = 0.1 }
material = { mtag = "lh", geom = "cblock" }
"#;

    fn parse(text: &str) -> ProblemFile {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn problem_builds_a_complete_deck() {
        let input = parse(PROBLEM).build().unwrap();
        assert_eq!(input.title, "Solenoid channel");
        let text = input.to_for001_string().unwrap();
        assert!(text.starts_with("Solenoid channel\n&cont npart=10000 /\n&bmt nbeamtyp=1 /\n"));
        assert!(text.contains("1 1.29 0 0\n&ints ldecay=.false. /\n"));
        assert!(text.contains(
            "SECTION\n! matching\nREPEAT\n2\nSREGION\n1.0 1 0.001\n1 0.0 0.5\nSOL\n\
             1 1.5 2.0 0.1 0.0 0.1 0 0 0 0 0 0 0 0 0\nLH\nCBLOCK\n"
        ));
        assert!(text.ends_with("ENDREPEAT\nENDSECTION\n"));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("problem.toml");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", PROBLEM).unwrap();

        let problem = ProblemFile::load(&path).unwrap();
        assert_eq!(problem.section.len(), 2);
    }

    #[test]
    fn load_reports_missing_files() {
        let dir = tempdir().unwrap();
        let err = ProblemFile::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ProblemLoadError::Io { .. }));
    }

    #[test]
    fn load_reports_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "title = ").unwrap();
        assert!(matches!(
            ProblemFile::load(&path),
            Err(ProblemLoadError::Toml { .. })
        ));
    }

    #[test]
    fn arrays_in_scalar_positions_are_unsupported() {
        let err = parse("title = \"t\"\n[cont]\nnpart = [1, 2]\n")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ProblemLoadError::UnsupportedValue { ref key, kind: "array" } if key == "npart"
        ));
    }

    #[test]
    fn validation_errors_are_surfaced() {
        let err = parse("title = \"t\"\n[cont]\nnpart = 1.5\n").build().unwrap_err();
        assert!(matches!(
            err,
            ProblemLoadError::Input(InputError::IncorrectType { .. })
        ));
    }

    #[test]
    fn fields_need_a_tag() {
        let text = r#"
title = "t"

[[section]]
type = "cell"
ncells = 2
flip = false
field = { model = "bz" }
"#;
        let err = parse(text).build().unwrap_err();
        assert!(matches!(
            err,
            ProblemLoadError::Input(InputError::MissingRequiredField { field: "ftag", .. })
        ));
    }

    #[test]
    fn multi_line_comments_are_rejected() {
        let text = "title = \"t\"\n[[section]]\ntype = \"comment\"\ntext = \"\"\"\nnote\nENDSECTION\"\"\"\n";
        let err = parse(text).build().unwrap_err();
        assert!(matches!(
            err,
            ProblemLoadError::Input(InputError::LineBreak {
                command: "Comment",
                field: "text"
            })
        ));
    }

    #[test]
    fn nan_and_inf_are_rejected() {
        let text = r#"
title = "t"

[[section]]
type = "cell"
ncells = 1
flip = false
field = { ftag = "sol", model = "bz", strength = nan, clen = inf, elen1 = 0.1, offset = 0.0, elen2 = 0.1 }
"#;
        let err = parse(text).build().unwrap_err();
        assert!(matches!(
            err,
            ProblemLoadError::Input(InputError::NonFiniteReal { .. })
        ));
    }

    #[test]
    fn unknown_section_types_fail_to_parse() {
        let text = "title = \"t\"\n[[section]]\ntype = \"wiggler\"\n";
        assert!(toml::from_str::<ProblemFile>(text).is_err());
    }

    #[test]
    fn cells_may_hold_repeats() {
        let text = r#"
title = "cells"

[[section]]
type = "cell"
ncells = 3
flip = true
field = { ftag = "accel", model = "sec_pill_circ", freq = 201.0, grad = 16.0, phase = 30.0 }

[[section.commands]]
type = "repeat"
nrep = 4
"#;
        let input = parse(text).build().unwrap();
        let text = input.to_for001_string().unwrap();
        assert!(text.contains(
            "CELL\n3\n.true.\nACCEL\n9 201.0 16.0 30.0 0 0 0 0 0 0 0 0 0 0 0\nREPEAT\n4\nENDREPEAT\nENDCELL\n"
        ));
    }
}
