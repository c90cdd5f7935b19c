use crate::core::io::traits::PointFile;
use crate::core::models::chain::Chain;
use crate::core::models::ids::PointId;
use crate::core::models::point::{Point, PointError};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: PointError,
    },
    #[error("Duplicate point id {id} on line {line} (first seen on line {first_line})")]
    DuplicateId {
        line: usize,
        first_line: usize,
        id: PointId,
    },
}

/// Plain-text point records: one point per line, whitespace-separated
/// `id x y z [label]`.
///
/// Blank lines and lines starting with `#` are ignored.
pub struct RecordFile;

impl PointFile for RecordFile {
    type Error = RecordError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Point>, Self::Error> {
        let mut points = Vec::new();
        let mut first_seen: HashMap<PointId, usize> = HashMap::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let content = line.trim();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = content.split_whitespace().collect();
            let point = Point::from_fields(&fields).map_err(|source| RecordError::Parse {
                line: line_num,
                source,
            })?;

            if let Some(&first_line) = first_seen.get(&point.id()) {
                return Err(RecordError::DuplicateId {
                    line: line_num,
                    first_line,
                    id: point.id(),
                });
            }
            first_seen.insert(point.id(), line_num);
            points.push(point);
        }

        Ok(points)
    }

    fn write_chain_to(chain: &Chain, writer: &mut impl Write) -> Result<(), Self::Error> {
        for point in chain.iter() {
            let p = point.position();
            writeln!(
                writer,
                "{} {:.3} {:.3} {:.3} {}",
                point.id(),
                p.x,
                p.y,
                p.z,
                point.label()
            )?;
        }
        Ok(())
    }
}
