use super::traits::For001;
use crate::core::error::InputError;
use crate::core::records::namelist::{HISTOGRAM_NAMELISTS, write_empty_namelist};
use crate::core::records::{Bmt, Cont, Ints, Section};
use crate::core::value::check_single_line;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// File name ICOOL reads its input deck from.
pub const DEFAULT_FILE_NAME: &str = "for001.dat";

/// Longest title line ICOOL reads in full.
pub const MAX_TITLE_LEN: usize = 79;

/// A complete ICOOL problem: title, namelists and the region block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IcoolInput {
    pub title: String,
    pub cont: Cont,
    /// Written as an empty `&bmt` group when absent.
    pub bmt: Option<Bmt>,
    pub ints: Ints,
    pub section: Section,
}

impl IcoolInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Renders the whole deck, then writes it to `path`.
    ///
    /// If `path` is an existing directory the deck is written to
    /// `for001.dat` inside it. The text is staged in a temporary file next to
    /// the target and renamed into place, so an existing deck is either fully
    /// replaced or left untouched. Nothing is created when rendering fails.
    ///
    /// # Return
    ///
    /// The path of the written file.
    ///
    /// # Errors
    ///
    /// Returns any rendering error of the tree, or [`InputError::Io`] if the
    /// file cannot be written.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<PathBuf, InputError> {
        let mut path = path.as_ref().to_path_buf();
        if path.is_dir() {
            path.push(DEFAULT_FILE_NAME);
        }

        let text = self.to_for001_string()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staged = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(staged.as_file());
            writer.write_all(text.as_bytes())?;
            writer.flush()?;
        }
        staged.persist(&path).map_err(|e| e.error)?;

        debug!(path = %path.display(), bytes = text.len(), "Wrote input deck");
        Ok(path)
    }

    /// # Errors
    ///
    /// Returns [`InputError::LineBreak`] if the title spans more than one line.
    fn check_title(&self) -> Result<(), InputError> {
        check_single_line("IcoolInput", "title", &self.title)?;
        if self.title.chars().count() > MAX_TITLE_LEN {
            warn!(
                "Title is longer than {} characters and will be truncated by ICOOL",
                MAX_TITLE_LEN
            );
        }
        Ok(())
    }
}

impl For001 for IcoolInput {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        self.check_title()?;
        writeln!(writer, "{}", self.title)?;

        self.cont.write_for001(writer)?;
        match &self.bmt {
            Some(bmt) => bmt.write_for001(writer)?,
            None => write_empty_namelist(writer, "bmt")?,
        }
        self.ints.write_for001(writer)?;
        for name in HISTOGRAM_NAMELISTS {
            write_empty_namelist(writer, name)?;
        }
        self.section.write_for001(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use crate::core::params::{Correlation, Distribution, Material, Sol};
    use crate::core::records::{BeamType, Container, Repeat, SRegion, SubRegion};
    use tempfile::tempdir;

    fn solenoid_channel() -> IcoolInput {
        let d = Distribution::new(attrs! {
            "bdistyp" => "gaussian",
            "px_mean" => 0, "px_std" => 0.000935,
            "py_mean" => 0, "py_std" => 0.000935,
            "pz_mean" => 0.2, "pz_std" => 0.002,
            "x_mean" => 0, "x_std" => 0.00486,
            "y_mean" => 0, "y_std" => 0.00486,
            "z_mean" => 0, "z_std" => 0.86,
        })
        .unwrap();
        let c = Correlation::new(attrs! { "corrtyp" => "ang_mom", "sol_field" => 1.29 }).unwrap();
        let mut bm = BeamType::new(attrs! {
            "nbcorr" => 1, "fractbt" => 1, "distribution" => d, "bmtype" => 2, "partnum" => 1,
        })
        .unwrap();
        bm.add_enclosed_command(c).unwrap();
        let mut bmt = Bmt::new(attrs! { "nbeamtyp" => 1 }).unwrap();
        bmt.add_enclosed_command(bm).unwrap();

        let sol = Sol::new(attrs! {
            "model" => "edge", "ent_def" => 0, "ex_def" => 0, "foc_flag" => 0, "bs" => -40,
        })
        .unwrap();
        let mat = Material::new(attrs! { "geom" => "CBLOCK", "mtag" => "VAC" }).unwrap();
        let mut sreg = SRegion::new(attrs! { "zstep" => 0.001, "nrreg" => 1, "slen" => 1 }).unwrap();
        sreg.add_enclosed_command(
            SubRegion::new(attrs! {
                "material" => mat, "rlow" => 0, "rhigh" => 0.5, "irreg" => 1, "field" => sol,
            })
            .unwrap(),
        )
        .unwrap();
        let mut rep = Repeat::new(attrs! { "nrep" => 2 }).unwrap();
        rep.add_enclosed_command(sreg).unwrap();
        let mut section = Section::new();
        section.add_enclosed_command(rep).unwrap();

        IcoolInput {
            title: "Test IPYCOOL".to_string(),
            cont: Cont::new(attrs! { "npart" => 10000 }).unwrap(),
            bmt: Some(bmt),
            ints: Ints::default(),
            section,
        }
    }

    const EXPECTED: &str = "Test IPYCOOL\n\
                            &cont npart=10000 /\n\
                            &bmt nbeamtyp=1 /\n\
                            1 2 1.0\n\
                            1\n\
                            0.0 0.0 0.0 0.0 0.0 0.2\n\
                            0.00486 0.00486 0.86 0.000935 0.000935 0.002\n\
                            1\n\
                            1 1.29 0 0\n\
                            &ints /\n\
                            &nhs /\n\
                            &nsc /\n\
                            &nzh /\n\
                            &nrh /\n\
                            &nem /\n\
                            &ncv /\n\
                            SECTION\n\
                            REPEAT\n\
                            2\n\
                            SREGION\n\
                            1.0 1 0.001\n\
                            1 0.0 0.5\n\
                            SOL\n\
                            8 -40.0 0 0.0 0.0 0 0 0 0 0 0 0 0 0 0\n\
                            VAC\n\
                            CBLOCK\n\
                            0 0 0 0 0 0 0 0 0 0\n\
                            ENDREPEAT\n\
                            ENDSECTION\n";

    #[test]
    fn full_deck_layout() {
        assert_eq!(solenoid_channel().to_for001_string().unwrap(), EXPECTED);
    }

    #[test]
    fn missing_bmt_is_written_empty() {
        let input = IcoolInput::new("empty");
        assert_eq!(
            input.to_for001_string().unwrap(),
            "empty\n&cont /\n&bmt /\n&ints /\n&nhs /\n&nsc /\n&nzh /\n&nrh /\n&nem /\n&ncv /\n\
             SECTION\nENDSECTION\n"
        );
    }

    #[test]
    fn write_to_directory_appends_the_default_name() {
        let dir = tempdir().unwrap();
        let written = solenoid_channel().write_to_path(dir.path()).unwrap();
        assert_eq!(written, dir.path().join(DEFAULT_FILE_NAME));
        assert_eq!(std::fs::read_to_string(written).unwrap(), EXPECTED);
    }

    #[test]
    fn write_to_explicit_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("deck.dat");
        let written = solenoid_channel().write_to_path(&target).unwrap();
        assert_eq!(written, target);
        assert!(target.exists());
    }

    #[test]
    fn failed_render_leaves_no_file() {
        let mut input = solenoid_channel();
        input.bmt = Some(Bmt::new(attrs! { "nbeamtyp" => 3 }).unwrap());
        let dir = tempdir().unwrap();
        let err = input.write_to_path(dir.path()).unwrap_err();
        assert!(matches!(err, InputError::CountMismatch { .. }));
        assert!(!dir.path().join(DEFAULT_FILE_NAME).exists());
    }

    #[test]
    fn failed_render_keeps_an_existing_deck() {
        let dir = tempdir().unwrap();
        let target = dir.path().join(DEFAULT_FILE_NAME);
        std::fs::write(&target, "previous deck\n").unwrap();

        let mut input = solenoid_channel();
        input.bmt = Some(Bmt::new(attrs! { "nbeamtyp" => 3 }).unwrap());
        assert!(input.write_to_path(dir.path()).is_err());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "previous deck\n");
    }

    #[test]
    fn rewrite_replaces_the_deck_and_leaves_no_staging_files() {
        let dir = tempdir().unwrap();
        let target = dir.path().join(DEFAULT_FILE_NAME);
        std::fs::write(&target, "x".repeat(4096)).unwrap();

        solenoid_channel().write_to_path(&target).unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), EXPECTED);
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn titles_must_stay_on_one_line() {
        let input = IcoolInput::new("t1\n&cont npart=5 /");
        assert!(matches!(
            input.to_for001_string(),
            Err(InputError::LineBreak {
                command: "IcoolInput",
                field: "title"
            })
        ));

        let dir = tempdir().unwrap();
        assert!(IcoolInput::new("t1\r").write_to_path(dir.path()).is_err());
        assert!(!dir.path().join(DEFAULT_FILE_NAME).exists());
    }

    #[test]
    fn long_titles_are_written_unchanged() {
        let title = "x".repeat(MAX_TITLE_LEN + 5);
        let text = IcoolInput::new(title.clone()).to_for001_string().unwrap();
        assert!(text.starts_with(&format!("{title}\n")));
    }
}
