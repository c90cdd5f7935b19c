use crate::core::models::chain::Chain;
use crate::core::models::point::Point;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for point-list file formats.
///
/// Implementors parse a file into an unordered list of points and write an
/// assembled chain back out in chain order.
pub trait PointFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads every point record from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if a record is malformed or the reader fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Point>, Self::Error>;

    /// Writes the points of `chain`, first to last.
    fn write_chain_to(chain: &Chain, writer: &mut impl Write) -> Result<(), Self::Error>;

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    fn write_chain_to_path<P: AsRef<Path>>(chain: &Chain, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_chain_to(chain, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
