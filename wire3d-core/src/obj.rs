//! Wireframe import from the vertex/face subset of Wavefront OBJ.
//!
//! ```text
//! # comment
//! v x y z          vertex, appended in file order
//! f i j k          triangle, 1-based vertex references
//! f i j k l        quadrilateral
//! ```
//!
//! Every face contributes the closed cycle of its edges; an edge shared
//! with an earlier face is stored once. Face references may carry texture
//! and normal references (`i/t/n`), which are ignored. Lines may end in
//! `\n`, `\r` or `\r\n`. Groups, objects, materials, smoothing and the
//! other OBJ statements are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use nom::{
    bytes::complete::is_not,
    character::complete::{char, digit1, one_of, space0, space1},
    combinator::{all_consuming, opt, recognize, rest},
    multi::many0,
    number::complete::float,
    sequence::{pair, preceded, terminated},
    IResult,
};
use tracing::{debug, trace, warn};

use crate::error::{MeshError, MeshResult};
use crate::geometry::{Mesh, VertexIndex};

/// Statements that are recognised and deliberately skipped
const IGNORED_KEYWORDS: &[&str] = &[
    "o", "g", "s", "l", "p", "vt", "vn", "vp", "mtllib", "usemtl",
];

/// Options controlling how forgiving the importer is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Reject malformed `v` and `f` lines instead of recovering from them.
    ///
    /// When unset, unreadable vertex coordinates become `0.0` and faces
    /// with the wrong number of references are skipped, with a warning.
    pub strict: bool,
}

/// Load a wireframe mesh from a face file
pub fn parse_mesh_file<P: AsRef<Path>>(path: P) -> MeshResult<Mesh> {
    parse_mesh_file_with(path, ImportOptions::default())
}

/// Load a wireframe mesh from a face file with explicit options.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or read
/// - A face references a vertex that is not defined before it
/// - Storage cannot be grown
/// - A line is malformed and `options.strict` is set
pub fn parse_mesh_file_with<P: AsRef<Path>>(path: P, options: ImportOptions) -> MeshResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            MeshError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MeshError::Io(e)
        }
    })?;

    let mesh = parse_mesh_reader(file, options)?;
    debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        edges = mesh.edge_count(),
        "loaded mesh file"
    );
    Ok(mesh)
}

/// Parse a face file held in memory
pub fn parse_mesh_str(input: &str) -> MeshResult<Mesh> {
    parse_mesh_str_with(input, ImportOptions::default())
}

pub fn parse_mesh_str_with(input: &str, options: ImportOptions) -> MeshResult<Mesh> {
    parse_mesh_reader(input.as_bytes(), options)
}

/// Parse a face file from any sequential byte source.
///
/// The source is read to exhaustion; on error the partially built mesh is
/// dropped.
pub fn parse_mesh_reader<R: Read>(reader: R, options: ImportOptions) -> MeshResult<Mesh> {
    let mut reader = BufReader::new(reader);
    let mut importer = Importer::new(options);
    let mut chunk = Vec::new();

    loop {
        chunk.clear();
        if reader.read_until(b'\n', &mut chunk)? == 0 {
            break;
        }

        // A lone '\r' also ends a line
        for line in strip_terminator(&chunk).split(|&b| b == b'\r') {
            importer.feed(line)?;
        }
    }

    Ok(importer.mesh)
}

fn strip_terminator(chunk: &[u8]) -> &[u8] {
    let chunk = chunk.strip_suffix(b"\n").unwrap_or(chunk);
    chunk.strip_suffix(b"\r").unwrap_or(chunk)
}

struct Importer {
    mesh: Mesh,
    options: ImportOptions,
    line: usize,
}

impl Importer {
    fn new(options: ImportOptions) -> Self {
        Self {
            mesh: Mesh::new(),
            options,
            line: 0,
        }
    }

    fn feed(&mut self, bytes: &[u8]) -> MeshResult<()> {
        self.line += 1;
        match std::str::from_utf8(bytes) {
            Ok(text) => self.parse_line(text),
            Err(_) => self.recover("line is not valid UTF-8".to_string()),
        }
    }

    fn parse_line(&mut self, text: &str) -> MeshResult<()> {
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(());
        }

        let (keyword, fields) = match statement(text) {
            Ok((_, statement)) => statement,
            Err(_) => return Ok(()),
        };

        match keyword {
            "v" => self.vertex(&fields),
            "f" => self.face(&fields),
            k if IGNORED_KEYWORDS.contains(&k) => {
                trace!(line = self.line, keyword = k, "ignored statement");
                Ok(())
            }
            k => {
                trace!(line = self.line, keyword = k, "unrecognized statement skipped");
                Ok(())
            }
        }
    }

    fn vertex(&mut self, fields: &[&str]) -> MeshResult<()> {
        let mut coords = [0.0f32; 3];

        for (axis, coord) in coords.iter_mut().enumerate() {
            match fields.get(axis).and_then(|field| number(field).ok()) {
                Some((_, value)) => *coord = value,
                None if self.options.strict => {
                    return Err(MeshError::malformed(
                        self.line,
                        format!("vertex coordinate {} is missing or not a number", axis + 1),
                    ));
                }
                None => warn!(line = self.line, axis, "unreadable vertex coordinate, using 0"),
            }
        }

        self.mesh.append_vertex(coords[0], coords[1], coords[2])?;
        Ok(())
    }

    fn face(&mut self, fields: &[&str]) -> MeshResult<()> {
        if !(3..=4).contains(&fields.len()) {
            return self.recover(format!(
                "face has {} vertex references, expected 3 or 4",
                fields.len()
            ));
        }

        let mut corners: [VertexIndex; 4] = [0; 4];
        for (corner, field) in corners.iter_mut().zip(fields) {
            let reference = match vertex_reference(field) {
                Ok((_, reference)) => reference,
                Err(_) => {
                    return self.recover(format!("face reference `{field}` is not an integer"))
                }
            };
            *corner = self.resolve(reference)?;
        }

        let corners = &corners[..fields.len()];
        for (i, &a) in corners.iter().enumerate() {
            let b = corners[(i + 1) % corners.len()];
            if a == b {
                trace!(line = self.line, vertex = a, "degenerate face edge skipped");
                continue;
            }
            self.mesh.append_edge_if_absent(a, b)?;
        }
        Ok(())
    }

    /// Turn a 1-based reference into an index of an already defined vertex.
    ///
    /// Negative references and ones too large for any integer type are out
    /// of range like any other.
    fn resolve(&self, reference: &str) -> MeshResult<VertexIndex> {
        let vertex_count = self.mesh.vertex_count();
        let unsigned = reference.strip_prefix('+').unwrap_or(reference);

        match unsigned.parse::<u64>() {
            // vertex_count never exceeds the VertexIndex range
            Ok(index) if index >= 1 && index <= vertex_count as u64 => {
                Ok((index - 1) as VertexIndex)
            }
            _ => Err(MeshError::VertexOutOfRange {
                line: self.line,
                index: reference.to_string(),
                vertex_count,
            }),
        }
    }

    fn recover(&self, message: String) -> MeshResult<()> {
        if self.options.strict {
            return Err(MeshError::malformed(self.line, message));
        }
        warn!(line = self.line, "{message}; line skipped");
        Ok(())
    }
}

/// A keyword followed by whitespace separated fields
fn statement(input: &str) -> IResult<&str, (&str, Vec<&str>)> {
    let (input, keyword) = is_not(" \t")(input)?;
    let (input, fields) = many0(preceded(space1, is_not(" \t")))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, (keyword, fields)))
}

fn number(input: &str) -> IResult<&str, f32> {
    all_consuming(float)(input)
}

/// The signed vertex part of `i`, `i/t`, `i//n` or `i/t/n`, as written
fn vertex_reference(input: &str) -> IResult<&str, &str> {
    all_consuming(terminated(
        recognize(pair(opt(one_of("+-")), digit1)),
        opt(pair(char('/'), rest)),
    ))(input)
}
