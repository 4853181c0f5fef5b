use crate::core::error::InputError;
use std::io::Write;

/// Defines the interface for objects that can be written into a `for001.dat`
/// input deck.
///
/// Implementors write their own lines, including any tag or wrapper lines,
/// and recurse into the objects they own.
pub trait For001 {
    /// Writes this object in the deck's fixed format.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NoModelSelected`] or [`InputError::CountMismatch`]
    /// when the object cannot be rendered, or [`InputError::Io`] if the writer
    /// fails.
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError>;

    /// Renders this object into a string.
    ///
    /// # Errors
    ///
    /// Same as [`For001::write_for001`].
    fn to_for001_string(&self) -> Result<String, InputError> {
        let mut buf = Vec::new();
        self.write_for001(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
