//! Plain-text edge list loading.
//!
//! Each line holds one undirected edge as two labels separated by a
//! delimiter. Blank lines and lines starting with `#` are skipped.

use std::collections::HashMap;
use std::io::{self, BufRead};

use thiserror::Error;
use tracing::{debug, info};

/// Parsing options for edge lists.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EdgeListOptions {
    /// Field separator. Any whitespace delimiter splits on runs of whitespace.
    pub delimiter: char,
    /// When set, labels are replaced by `{prefix}{index:04}` in order of first
    /// appearance, starting at 1.
    pub relabel_prefix: Option<String>,
}

impl Default for EdgeListOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            relabel_prefix: None,
        }
    }
}

/// Edges read from an edge list, with self-loops already removed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EdgeList {
    /// Edges in file order.
    pub edges: Vec<(String, String)>,
    /// Number of self-loop lines that were skipped.
    pub self_loops: usize,
}

/// Errors raised while parsing an edge list.
#[derive(Debug, Error)]
pub enum EdgeListError {
    /// Reading from the underlying source failed.
    #[error("failed to read edge list: {source}")]
    Read {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A line did not contain exactly two non-empty labels.
    #[error("line {line}: expected two labels separated by `{delimiter}`, found `{content}`")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// Delimiter in effect.
        delimiter: char,
        /// Offending line, trimmed.
        content: String,
    },
    /// The source contained no usable edge.
    #[error("edge list contains no edges")]
    Empty,
}

/// Parses an edge list from `reader`.
///
/// # Errors
/// Returns [`EdgeListError`] when reading fails, a line is malformed, or no
/// edge remains.
///
/// # Examples
/// ```
/// use nullnet_cli::cli::{EdgeListOptions, parse_edge_list};
///
/// let input = "# friendships\nann,bob\nbob,cy\n\ncy,cy\n";
/// let options = EdgeListOptions {
///     delimiter: ',',
///     relabel_prefix: Some("household".to_owned()),
/// };
/// let list = parse_edge_list(input.as_bytes(), &options)?;
/// assert_eq!(list.edges[1], ("household0002".to_owned(), "household0003".to_owned()));
/// assert_eq!(list.self_loops, 1);
/// # Ok::<(), nullnet_cli::cli::EdgeListError>(())
/// ```
pub fn parse_edge_list<R: BufRead>(
    reader: R,
    options: &EdgeListOptions,
) -> Result<EdgeList, EdgeListError> {
    let mut labeller = Labeller::new(options.relabel_prefix.as_deref());
    let mut list = EdgeList::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| EdgeListError::Read { source })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((left, right)) = split_pair(trimmed, options.delimiter) else {
            return Err(EdgeListError::Malformed {
                line: index + 1,
                delimiter: options.delimiter,
                content: trimmed.to_owned(),
            });
        };
        let left = labeller.label(left);
        let right = labeller.label(right);
        if left == right {
            debug!(line = index + 1, node = %left, "skipping self-loop");
            list.self_loops += 1;
            continue;
        }
        list.edges.push((left, right));
    }
    if list.edges.is_empty() {
        return Err(EdgeListError::Empty);
    }
    if list.self_loops > 0 {
        info!(self_loops = list.self_loops, "skipped self-loops in edge list");
    }
    Ok(list)
}

fn split_pair(line: &str, delimiter: char) -> Option<(&str, &str)> {
    let mut fields: Vec<&str> = if delimiter.is_whitespace() {
        line.split_whitespace().collect()
    } else {
        line.split(delimiter).map(str::trim).collect()
    };
    let right = fields.pop()?;
    let left = fields.pop()?;
    if !fields.is_empty() || left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left, right))
}

struct Labeller<'a> {
    prefix: Option<&'a str>,
    assigned: HashMap<String, String>,
}

impl<'a> Labeller<'a> {
    fn new(prefix: Option<&'a str>) -> Self {
        Self {
            prefix,
            assigned: HashMap::new(),
        }
    }

    fn label(&mut self, raw: &str) -> String {
        let Some(prefix) = self.prefix else {
            return raw.to_owned();
        };
        if let Some(existing) = self.assigned.get(raw) {
            return existing.clone();
        }
        let label = format!("{prefix}{:04}", self.assigned.len() + 1);
        self.assigned.insert(raw.to_owned(), label.clone());
        label
    }
}
