/// Mesh file parser
///
/// The format is a flat stream of whitespace separated numbers: a mesh
/// count, then for each mesh a vertex count followed by that many
/// `x y z` triples.
use nom::{
    branch::alt,
    character::complete::{i64 as signed, multispace0, multispace1, u64 as unsigned},
    combinator::{eof, peek, value},
    number::complete::float,
    sequence::{preceded, terminated},
    IResult,
};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::LoadError;
use crate::geometry::{Mesh, MeshStore, Vertex};

/// How much the parser trusts the mesh file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Best-effort: unparsable tokens read as zero and missing tokens are
    /// zero-filled. Declared counts are always honored.
    #[default]
    Lenient,
    /// Every token must be a complete number of the expected kind.
    Strict,
}

/// Load every mesh from the file at `path`
pub fn load(path: impl AsRef<Path>, mode: ParseMode) -> Result<MeshStore, LoadError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let text = String::from_utf8_lossy(&data);

    let store = parse(&text, mode)?;
    log::info!(
        "loaded {} meshes ({} vertices) from {}",
        store.len(),
        store.vertex_count(),
        path.display()
    );
    Ok(store)
}

/// Parse mesh file contents held in memory
pub fn parse(text: &str, mode: ParseMode) -> Result<MeshStore, LoadError> {
    match mode {
        ParseMode::Lenient => parse_lenient(text),
        ParseMode::Strict => parse_strict(text),
    }
}

fn parse_lenient(text: &str) -> Result<MeshStore, LoadError> {
    let mut tokens = text.split_ascii_whitespace();

    let mesh_count = lenient_count(tokens.next());
    let mut store = MeshStore::try_with_capacity(mesh_count)?;

    for _ in 0..mesh_count {
        let vertex_count = lenient_count(tokens.next());
        let mut mesh = Mesh::try_with_capacity(vertex_count)?;
        for _ in 0..vertex_count {
            let x = lenient_coord(tokens.next());
            let y = lenient_coord(tokens.next());
            let z = lenient_coord(tokens.next());
            mesh.push(Vertex::new(x, y, z));
        }
        store.push(mesh);
    }

    Ok(store)
}

/// Leading integer of the token; negative or missing counts read as zero
fn lenient_count(token: Option<&str>) -> usize {
    let Some(token) = token else { return 0 };
    match signed::<&str, nom::error::Error<&str>>(token) {
        Ok((_, n)) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
        _ => 0,
    }
}

/// Leading float of the token, or zero
fn lenient_coord(token: Option<&str>) -> f32 {
    token
        .and_then(|token| float::<&str, nom::error::Error<&str>>(token).ok())
        .map_or(0.0, |(_, v)| v)
}

fn parse_strict(text: &str) -> Result<MeshStore, LoadError> {
    let (mut input, mesh_count) = expect(text, text, count_token, || "mesh count".to_string())?;
    let mut store = MeshStore::try_with_capacity(mesh_count)?;

    for m in 0..mesh_count {
        let (rest, vertex_count) = expect(text, input, count_token, || {
            format!("vertex count for mesh {}", m + 1)
        })?;
        input = rest;

        let mut mesh = Mesh::try_with_capacity(vertex_count)?;
        for v in 0..vertex_count {
            let mut coords = [0.0f32; 3];
            for (axis, coord) in ["x", "y", "z"].iter().zip(coords.iter_mut()) {
                let (rest, value) = expect(text, input, coord_token, || {
                    format!("{} coordinate of vertex {} in mesh {}", axis, v + 1, m + 1)
                })?;
                input = rest;
                *coord = value;
            }
            mesh.push(Vertex::new(coords[0], coords[1], coords[2]));
        }
        store.push(mesh);
    }

    let (rest, _) = multispace0::<&str, nom::error::Error<&str>>(input)
        .unwrap_or((input, ""));
    if !rest.is_empty() {
        return Err(parse_error(text, rest, "end of file"));
    }

    Ok(store)
}

/// Run `parser` and turn a failure into a positioned `LoadError::Parse`
fn expect<'a, T>(
    text: &'a str,
    input: &'a str,
    mut parser: impl FnMut(&'a str) -> IResult<&'a str, T>,
    what: impl FnOnce() -> String,
) -> Result<(&'a str, T), LoadError> {
    parser(input).map_err(|_| parse_error(text, input.trim_start(), &what()))
}

fn parse_error(text: &str, at: &str, expected: &str) -> LoadError {
    let offset = text.len() - at.len();
    let consumed = &text[..offset];
    let line = consumed.matches('\n').count() + 1;
    let column = consumed
        .rfind('\n')
        .map_or(consumed, |nl| &consumed[nl + 1..])
        .chars()
        .count()
        + 1;
    let found = at
        .split_ascii_whitespace()
        .next()
        .map_or_else(|| "end of file".to_string(), |t| format!("\"{}\"", t));

    LoadError::Parse {
        line,
        column,
        message: format!("expected {}, found {}", expected, found),
    }
}

/// A token must be followed by whitespace or the end of input
fn token_end(input: &str) -> IResult<&str, ()> {
    value((), peek(alt((multispace1, eof))))(input)
}

fn count_token(input: &str) -> IResult<&str, usize> {
    let (input, n) = preceded(multispace0, terminated(unsigned, token_end))(input)?;
    let n = usize::try_from(n).unwrap_or(usize::MAX);
    Ok((input, n))
}

fn coord_token(input: &str) -> IResult<&str, f32> {
    preceded(multispace0, terminated(float, token_end))(input)
}
