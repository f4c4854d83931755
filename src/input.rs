use crate::UnGraph;
use crate::Weight;
use petgraph::graph::NodeIndex;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use thiserror::Error;

/// Errors reported by the graph parsers.
///
/// A parse error means nothing was committed downstream; the caller
/// gets either a complete graph or one of these.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The underlying reader failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Missing or malformed `p sp N M` header.
    #[error("invalid or unsupported DIMACS file")]
    InvalidDimacsHeader,
    /// Truncated or malformed `a U V W` line.
    #[error("invalid DIMACS data")]
    InvalidDimacsData,
    /// The first line does not declare a coordinate matrix.
    #[error("invalid MatrixMarket header")]
    InvalidMtxHeader,
    /// Truncated or malformed coordinate entry.
    #[error("invalid MatrixMarket data")]
    InvalidMtxData,
    /// An edge endpoint outside `1..=N`.
    #[error("node id {id} out of range 1..={n}")]
    NodeIdOutOfRange {
        /// The offending 1-based id.
        id: usize,
        /// Declared node count.
        n: usize,
    },
}

/// This is equivalent to [`dimacs_from_str`], but takes file path as an input.
pub fn dimacs_from_file(path: &str) -> Result<UnGraph, ParseError> {
    let file = File::open(path)?;
    parse_dimacs(BufReader::new(file))
}

/// Reads a graph in DIMACS shortest-path format.
///
/// - Lines starting with `c` before the header are comments.
/// - The header `p sp N M` declares N nodes and M edges.
/// - Each of the next M lines is `a U V W`: an edge between 1-based
///   node ids U and V with integer weight W.
///
/// Warning:
/// <div class="warning">
///
/// - Self-loops and parallel edges are kept as given; run the
///   preprocessor before handing the graph to the builders.
///
/// </div>
pub fn dimacs_from_str(input: &str) -> Result<UnGraph, ParseError> {
    parse_dimacs(BufReader::new(Cursor::new(input)))
}

fn parse_dimacs<R: BufRead>(reader: R) -> Result<UnGraph, ParseError> {
    let mut lines = reader.lines();

    // Skip comments; the first non-comment line must be the header.
    let header = loop {
        match lines.next() {
            None => return Err(ParseError::InvalidDimacsHeader),
            Some(line) => {
                let line = line?;
                if !line.starts_with('c') {
                    break line;
                }
            }
        }
    };

    if !header.starts_with("p sp") {
        return Err(ParseError::InvalidDimacsHeader);
    }
    let mut fields = header[4..].split_whitespace();
    let n: usize = next_number(&mut fields).ok_or(ParseError::InvalidDimacsHeader)?;
    let m: usize = next_number(&mut fields).ok_or(ParseError::InvalidDimacsHeader)?;

    let mut graph = UnGraph::new_undirected();
    for id in 1..=n {
        graph.add_node(id as u32);
    }

    for _ in 0..m {
        let line = lines.next().ok_or(ParseError::InvalidDimacsData)??;
        if !line.starts_with('a') {
            return Err(ParseError::InvalidDimacsData);
        }
        let mut fields = line[1..].split_whitespace();
        let u: usize = next_number(&mut fields).ok_or(ParseError::InvalidDimacsData)?;
        let v: usize = next_number(&mut fields).ok_or(ParseError::InvalidDimacsData)?;
        let w: Weight = next_number(&mut fields).ok_or(ParseError::InvalidDimacsData)?;
        graph.add_edge(node_index(u, n)?, node_index(v, n)?, w);
    }

    Ok(graph)
}

/// This is equivalent to [`mtx_from_str`], but takes file path as an input.
pub fn mtx_from_file(path: &str) -> Result<UnGraph, ParseError> {
    let file = File::open(path)?;
    parse_mtx(BufReader::new(file))
}

/// Reads a graph in Matrix Market coordinate format.
///
/// - The first line must begin with `%%MatrixMarket matrix coordinate`.
/// - `%`-prefixed comment lines follow.
/// - The size line is `N N M` for a square matrix; the second N is the
///   one used.
/// - Each of the next M lines is `U V [W]` with 1-based ids; a missing
///   or non-numeric weight defaults to 1.
pub fn mtx_from_str(input: &str) -> Result<UnGraph, ParseError> {
    parse_mtx(BufReader::new(Cursor::new(input)))
}

fn parse_mtx<R: BufRead>(reader: R) -> Result<UnGraph, ParseError> {
    let mut lines = reader.lines();

    let banner = lines.next().ok_or(ParseError::InvalidMtxHeader)??;
    if !banner.starts_with("%%MatrixMarket matrix coordinate") {
        return Err(ParseError::InvalidMtxHeader);
    }

    // Skip comments; the first non-comment line is the size line.
    let header = loop {
        match lines.next() {
            None => return Err(ParseError::InvalidMtxHeader),
            Some(line) => {
                let line = line?;
                if !line.starts_with('%') {
                    break line;
                }
            }
        }
    };

    let mut fields = header.split_whitespace();
    let _rows: usize = next_number(&mut fields).ok_or(ParseError::InvalidMtxHeader)?;
    let n: usize = next_number(&mut fields).ok_or(ParseError::InvalidMtxHeader)?;
    let m: usize = next_number(&mut fields).ok_or(ParseError::InvalidMtxHeader)?;

    let mut graph = UnGraph::new_undirected();
    for id in 1..=n {
        graph.add_node(id as u32);
    }

    for _ in 0..m {
        let line = lines.next().ok_or(ParseError::InvalidMtxData)??;
        let mut fields = line.split_whitespace();
        let u: usize = next_number(&mut fields).ok_or(ParseError::InvalidMtxData)?;
        let v: usize = next_number(&mut fields).ok_or(ParseError::InvalidMtxData)?;
        let w: Weight = next_number(&mut fields).unwrap_or(1);
        graph.add_edge(node_index(u, n)?, node_index(v, n)?, w);
    }

    Ok(graph)
}

fn next_number<'a, T: std::str::FromStr>(
    fields: &mut impl Iterator<Item = &'a str>,
) -> Option<T> {
    fields.next().and_then(|f| f.parse().ok())
}

fn node_index(id: usize, n: usize) -> Result<NodeIndex, ParseError> {
    if id == 0 || id > n {
        return Err(ParseError::NodeIdOutOfRange { id, n });
    }
    Ok(NodeIndex::new(id - 1))
}
