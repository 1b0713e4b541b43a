use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::io::network::buffered_reader;
use crate::routing::alt_landmark_data::{AltLandmarkData, ForwardBackwardTravelTime};

/// Raised when a landmark table file cannot be decoded. Only the table load
/// fails; callers may fall back to running the preprocessing again.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to read landmark table: {0}")]
    Io(#[from] std::io::Error),
    #[error("landmark table ends unexpectedly at line {line}")]
    Truncated { line: usize },
    #[error("line {line}: could not parse landmark table record {content:?}")]
    Malformed { line: usize, content: String },
    #[error("line {line}: expected an entry for landmark {expected}, got {got}")]
    LandmarkMismatch {
        line: usize,
        expected: usize,
        got: usize,
    },
    #[error("line {line}: node index {index} is outside of [0, {len})")]
    IndexOutOfRange {
        line: usize,
        index: usize,
        len: usize,
    },
    #[error("line {line}: expected a blank separator line")]
    MissingSeparator { line: usize },
    #[error("landmark {landmark} table has {len} entries, expected {expected}")]
    LengthMismatch {
        landmark: usize,
        len: usize,
        expected: usize,
    },
    #[error("declared {declared} landmarks but the file continues at line {line}")]
    TrailingData { declared: usize, line: usize },
}

/// Writes the tables as flat text: the landmark count, then per landmark a
/// `landmarkId arrayLength` header, the forward records
/// `landmarkId nodeIndex travelTime`, the backward records
/// `nodeIndex landmarkId travelTime` and a blank separator line. Unreachable
/// entries keep their `u32::MAX` sentinel verbatim.
pub fn write(data: &AltLandmarkData, mut writer: impl Write) -> std::io::Result<()> {
    writeln!(writer, "{}", data.landmarks().len())?;
    for (landmark_index, &landmark) in data.landmarks().iter().enumerate() {
        let travel_times = &data.travel_times_to_all()[landmark_index];
        writeln!(writer, "{} {}", landmark, travel_times.len())?;
        for (node, (from_landmark, _)) in travel_times.iter().enumerate() {
            writeln!(writer, "{} {} {}", landmark, node, from_landmark)?;
        }
        for (node, (_, to_landmark)) in travel_times.iter().enumerate() {
            writeln!(writer, "{} {} {}", node, landmark, to_landmark)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn write_to_file(data: &AltLandmarkData, path: &Path) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write(data, &mut writer)?;
    writer.flush()?;
    info!(
        "Wrote landmark table for {} landmarks to {:?}.",
        data.landmarks().len(),
        path
    );
    Ok(())
}

pub fn from_file(path: &Path) -> Result<AltLandmarkData, FormatError> {
    let data = read(buffered_reader(path).map_err(io_error)?)?;
    info!(
        "Read landmark table for {} landmarks covering {} nodes from {:?}.",
        data.landmarks().len(),
        data.number_of_nodes(),
        path
    );
    Ok(data)
}

fn io_error(error: crate::io::network::LoadError) -> FormatError {
    match error {
        crate::io::network::LoadError::Io(e) => FormatError::Io(e),
        // buffered_reader only produces io failures
        _ => unreachable!(),
    }
}

pub fn read(reader: impl BufRead) -> Result<AltLandmarkData, FormatError> {
    let mut lines = reader.lines().enumerate();

    let (index, line) = lines.next().ok_or(FormatError::Truncated { line: 1 })?;
    let content = line?;
    let declared = parse_fields::<1>(index, &content)?[0];

    let mut landmarks = Vec::with_capacity(declared);
    let mut travel_times_to_all: Vec<Vec<ForwardBackwardTravelTime>> =
        Vec::with_capacity(declared);

    for _ in 0..declared {
        let (index, line) = next_line(&mut lines)?;
        let [landmark, len] = parse_fields::<2>(index, &line)?;
        if let Some(first) = travel_times_to_all.first() {
            if len != first.len() {
                return Err(FormatError::LengthMismatch {
                    landmark,
                    len,
                    expected: first.len(),
                });
            }
        }

        let from_landmark = read_block(&mut lines, landmark, len, true)?;
        let to_landmark = read_block(&mut lines, landmark, len, false)?;

        // the blank separator line; missing only at the very end of the file
        if let Some((index, line)) = lines.next() {
            if !line?.trim().is_empty() {
                return Err(FormatError::MissingSeparator { line: index + 1 });
            }
        }

        landmarks.push(landmark);
        travel_times_to_all.push(from_landmark.into_iter().zip(to_landmark).collect());
    }

    for (index, line) in lines {
        if !line?.trim().is_empty() {
            return Err(FormatError::TrailingData {
                declared,
                line: index + 1,
            });
        }
    }

    Ok(AltLandmarkData::from_parts(landmarks, travel_times_to_all))
}

/// One record block of a landmark. Forward blocks carry the landmark id
/// first, backward blocks the node index first.
fn read_block(
    lines: &mut impl Iterator<Item = (usize, std::io::Result<String>)>,
    landmark: usize,
    len: usize,
    landmark_first: bool,
) -> Result<Vec<u32>, FormatError> {
    let mut travel_times = vec![u32::MAX; len];
    for _ in 0..len {
        let (index, line) = next_line(lines)?;
        let fields = parse_fields::<3>(index, &line)?;
        let (got_landmark, node) = if landmark_first {
            (fields[0], fields[1])
        } else {
            (fields[1], fields[0])
        };
        if got_landmark != landmark {
            return Err(FormatError::LandmarkMismatch {
                line: index + 1,
                expected: landmark,
                got: got_landmark,
            });
        }
        if node >= len {
            return Err(FormatError::IndexOutOfRange {
                line: index + 1,
                index: node,
                len,
            });
        }
        travel_times[node] = u32::try_from(fields[2]).map_err(|_| FormatError::Malformed {
            line: index + 1,
            content: line.clone(),
        })?;
    }
    Ok(travel_times)
}

fn next_line(
    lines: &mut impl Iterator<Item = (usize, std::io::Result<String>)>,
) -> Result<(usize, String), FormatError> {
    let mut last_index = 0;
    for (index, line) in lines {
        last_index = index;
        let content = line?;
        if !content.trim().is_empty() {
            return Ok((index, content));
        }
    }
    Err(FormatError::Truncated {
        line: last_index + 2,
    })
}

fn parse_fields<const N: usize>(index: usize, content: &str) -> Result<[usize; N], FormatError> {
    let mut result = [0usize; N];
    let mut fields = content.split_whitespace();
    for slot in result.iter_mut() {
        *slot = fields
            .next()
            .and_then(|field| field.parse::<usize>().ok())
            .ok_or_else(|| FormatError::Malformed {
                line: index + 1,
                content: content.to_string(),
            })?;
    }
    Ok(result)
}
