use std::io::BufRead;
use std::path::Path;

use nohash_hasher::IntMap;
use tracing::info;

use crate::io::network::{LoadError, buffered_reader};

#[derive(Clone, Debug, PartialEq)]
pub struct PointOfInterest {
    pub node: usize,
    pub type_mask: u32,
    pub name: String,
}

/// Lookup set of the nodes carrying a wanted point-of-interest category. The
/// nearest search only asks for membership; the payload is kept around for
/// reporting.
#[derive(Debug, Default)]
pub struct PoiIndex {
    by_node: IntMap<usize, PointOfInterest>,
}

impl PoiIndex {
    pub fn contains(&self, node: usize) -> bool {
        self.by_node.contains_key(&node)
    }

    pub fn get(&self, node: usize) -> Option<&PointOfInterest> {
        self.by_node.get(&node)
    }

    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }
}

pub fn from_file(path: &Path, node_count: usize, poi_type: u32) -> Result<PoiIndex, LoadError> {
    let index = read_pois(buffered_reader(path)?, node_count, poi_type)?;
    info!(
        "Loaded {} points of interest for type {:#b} from {:?}.",
        index.len(),
        poi_type,
        path
    );
    Ok(index)
}

/// Point-of-interest file: first line is the record count, then one
/// `nodeId typeBitmask name` record per line. A node qualifies when its
/// bitmask contains every bit of `poi_type`.
pub fn read_pois(
    reader: impl BufRead,
    node_count: usize,
    poi_type: u32,
) -> Result<PoiIndex, LoadError> {
    let mut lines = reader.lines().enumerate();
    let (index, line) = lines.next().ok_or(LoadError::Truncated { line: 1 })?;
    let content = line?;
    let declared: usize = parse(content.split_whitespace().next(), index, &content)?;

    let mut by_node = IntMap::default();
    for found in 0..declared {
        let (index, line) = lines.next().ok_or(LoadError::CountMismatch { declared, found })?;
        let content = line?;
        let mut fields = content.splitn(3, char::is_whitespace);
        let node: usize = parse(fields.next(), index, &content)?;
        let type_mask: u32 = parse(fields.next(), index, &content)?;
        let name = fields
            .next()
            .map(|name| name.trim().trim_matches('"').to_string())
            .unwrap_or_default();

        if node >= node_count {
            return Err(LoadError::IdOutOfRange {
                line: index + 1,
                id: node,
                node_count,
            });
        }
        if (type_mask & poi_type) == poi_type {
            by_node.insert(
                node,
                PointOfInterest {
                    node,
                    type_mask,
                    name,
                },
            );
        }
    }

    for (index, line) in lines {
        if !line?.trim().is_empty() {
            return Err(LoadError::TrailingRecords {
                declared,
                line: index + 1,
            });
        }
    }

    Ok(PoiIndex { by_node })
}

fn parse<T: std::str::FromStr>(
    field: Option<&str>,
    index: usize,
    content: &str,
) -> Result<T, LoadError> {
    field
        .and_then(|f| f.parse::<T>().ok())
        .ok_or_else(|| LoadError::Malformed {
            line: index + 1,
            content: content.to_string(),
        })
}
