use crate::core::io::input::IcoolInput;
use crate::core::io::problem::{ProblemFile, ProblemLoadError};
use crate::core::io::traits::For001;
use crate::core::records::Container;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Where the rendered deck goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A file, or a directory that receives `for001.dat`.
    Path(PathBuf),
    /// Return the text without touching the filesystem.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    pub problem_path: PathBuf,
    pub output: OutputTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateResult {
    Written { path: PathBuf, commands: usize },
    Rendered { text: String, commands: usize },
}

#[instrument(skip_all, name = "generate_workflow", fields(problem = %config.problem_path.display()))]
pub fn run(config: &GenerateConfig) -> Result<GenerateResult, ProblemLoadError> {
    info!("Loading problem definition.");
    let input = load(&config.problem_path)?;
    let commands = count_commands(&input);

    let result = match &config.output {
        OutputTarget::Path(path) => {
            let path = input.write_to_path(path)?;
            info!("Wrote {} region command(s) to {}.", commands, path.display());
            GenerateResult::Written { path, commands }
        }
        OutputTarget::Memory => {
            let text = input.to_for001_string()?;
            info!("Rendered {} region command(s).", commands);
            GenerateResult::Rendered { text, commands }
        }
    };
    Ok(result)
}

/// Loads a problem file and builds its validated tree.
pub fn load(path: &Path) -> Result<IcoolInput, ProblemLoadError> {
    ProblemFile::load(path)?.build()
}

fn count_commands(input: &IcoolInput) -> usize {
    input.section.enclosed_commands().len()
}
