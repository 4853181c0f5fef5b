use itertools::Itertools;
use std::fmt::Display;
use std::io::{self, Write};

/// Number of `key=value` pairs written on one namelist line.
pub const NAMELIST_PAIRS_PER_LINE: usize = 5;

/// Joins tokens with single spaces.
pub fn token_line<I>(tokens: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    tokens.into_iter().join(" ")
}

/// Writes one line of space-separated tokens.
pub fn write_tokens<W, I>(writer: &mut W, tokens: I) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator,
    I::Item: Display,
{
    writeln!(writer, "{}", token_line(tokens))
}

/// Writes a Fortran namelist group: `&name k=v k=v ... /`.
///
/// A line break follows every fifth pair. An empty group is written as
/// `&name /`.
pub fn write_namelist<W, I, K, V>(writer: &mut W, name: &str, pairs: I) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    write!(writer, "&{} ", name)?;
    for (i, (key, value)) in pairs.into_iter().enumerate() {
        write!(writer, "{}={} ", key, value)?;
        if (i + 1) % NAMELIST_PAIRS_PER_LINE == 0 {
            writeln!(writer)?;
        }
    }
    writeln!(writer, "/")
}
