use super::beam::BeamType;
use super::region::{Cell, Comment, Repeat, SRegion, SubRegion};
use crate::core::error::InputError;
use crate::core::io::traits::For001;
use crate::core::params::Correlation;
use std::fmt;
use std::io::Write;
use tracing::debug;

/// Kinds of command that may appear inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    SRegion,
    SubRegion,
    Repeat,
    Cell,
    Comment,
    BeamType,
    Correlation,
}

impl CommandKind {
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::SRegion => "SRegion",
            CommandKind::SubRegion => "SubRegion",
            CommandKind::Repeat => "Repeat",
            CommandKind::Cell => "Cell",
            CommandKind::Comment => "Comment",
            CommandKind::BeamType => "BeamType",
            CommandKind::Correlation => "Correlation",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A child command owned by a container.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SRegion(SRegion),
    SubRegion(SubRegion),
    Repeat(Repeat),
    Cell(Cell),
    Comment(Comment),
    BeamType(BeamType),
    Correlation(Correlation),
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::SRegion(_) => CommandKind::SRegion,
            Command::SubRegion(_) => CommandKind::SubRegion,
            Command::Repeat(_) => CommandKind::Repeat,
            Command::Cell(_) => CommandKind::Cell,
            Command::Comment(_) => CommandKind::Comment,
            Command::BeamType(_) => CommandKind::BeamType,
            Command::Correlation(_) => CommandKind::Correlation,
        }
    }
}

impl For001 for Command {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        match self {
            Command::SRegion(c) => c.write_for001(writer),
            Command::SubRegion(c) => c.write_for001(writer),
            Command::Repeat(c) => c.write_for001(writer),
            Command::Cell(c) => c.write_for001(writer),
            Command::Comment(c) => c.write_for001(writer),
            Command::BeamType(c) => c.write_for001(writer),
            Command::Correlation(c) => c.write_for001(writer),
        }
    }
}

macro_rules! impl_from_for_command {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Command {
                fn from(c: $variant) -> Self {
                    Command::$variant(c)
                }
            }
        )+
    };
}

impl_from_for_command!(SRegion, SubRegion, Repeat, Cell, Comment, BeamType, Correlation);

/// Ordered child commands of a container, restricted to a whitelist.
#[derive(Debug, Clone, PartialEq)]
pub struct Enclosed {
    container: &'static str,
    allowed: &'static [CommandKind],
    commands: Vec<Command>,
}

impl Enclosed {
    pub fn new(container: &'static str, allowed: &'static [CommandKind]) -> Self {
        Self {
            container,
            allowed,
            commands: Vec::new(),
        }
    }

    pub fn allows(&self, kind: CommandKind) -> bool {
        self.allowed.contains(&kind)
    }

    fn check(&self, command: &Command) -> Result<(), InputError> {
        let kind = command.kind();
        if self.allows(kind) {
            Ok(())
        } else {
            Err(InputError::DisallowedChild {
                container: self.container,
                child: kind.name(),
            })
        }
    }

    pub fn add(&mut self, command: Command) -> Result<(), InputError> {
        self.check(&command)?;
        debug!(
            container = self.container,
            child = command.kind().name(),
            "Enclosed command"
        );
        self.commands.push(command);
        Ok(())
    }

    pub fn insert(&mut self, index: usize, command: Command) -> Result<(), InputError> {
        self.check(&command)?;
        if index > self.commands.len() {
            return Err(InputError::InsertOutOfRange {
                container: self.container,
                index,
                len: self.commands.len(),
            });
        }
        self.commands.insert(index, command);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Command> {
        (index < self.commands.len()).then(|| self.commands.remove(index))
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of children of one kind.
    pub fn count(&self, kind: CommandKind) -> usize {
        self.commands.iter().filter(|c| c.kind() == kind).count()
    }

    pub fn write_all(&self, writer: &mut impl Write) -> Result<(), InputError> {
        for command in &self.commands {
            command.write_for001(writer)?;
        }
        Ok(())
    }
}
