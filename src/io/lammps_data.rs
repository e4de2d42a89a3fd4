// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of a reader of LAMMPS data files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;

use crate::config::{AtomStyle, ColumnIndices, ColumnLayout};
use crate::errors::ParseDataError;
use crate::store::general::AtomStore;
use crate::structures::{atom::Atom, simbox::SimBox};

/// First words of section headers that terminate the `Atoms` section.
const SECTION_KEYWORDS: [&str; 16] = [
    "velocities",
    "masses",
    "bonds",
    "angles",
    "dihedrals",
    "impropers",
    "pair",
    "pairij",
    "bond",
    "angle",
    "dihedral",
    "improper",
    "ellipsoids",
    "lines",
    "triangles",
    "bodies",
];

/// Read a LAMMPS data file and construct an AtomStore.
///
/// ## Notes
/// - Only orthogonal boxes are supported. Tilt factors are ignored.
/// - `zlo zhi` may be missing in which case the z-dimension of the box is set to zero.
/// - The `Atoms` section may be followed by a comment naming the atom style (`Atoms # full`).
///   With `ColumnLayout::Auto`, a known style determines the columns holding the coordinates.
pub fn read_lammps_data(
    filename: impl AsRef<Path>,
    layout: &ColumnLayout,
) -> Result<AtomStore, ParseDataError> {
    let file = match File::open(filename.as_ref()) {
        Ok(x) => x,
        Err(_) => return Err(ParseDataError::FileNotFound(Box::from(filename.as_ref()))),
    };

    let lines = BufReader::new(file)
        .lines()
        .collect::<Result<Vec<String>, _>>()
        .map_err(|_| ParseDataError::LineNotFound(Box::from(filename.as_ref())))?;

    let (start, hint) = find_atoms_section(&lines)
        .ok_or_else(|| ParseDataError::MissingAtomsSection(Box::from(filename.as_ref())))?;

    let simulation_box = parse_box(&lines[..start], filename.as_ref())?;
    let columns = resolve_columns(layout, hint);

    let mut atoms = Vec::new();
    for line in lines[start + 1..].iter() {
        let content = strip_comment(line);
        if content.is_empty() {
            continue;
        }

        if is_section_header(content) {
            break;
        }

        atoms.push(line_as_atom(content, columns, line)?);
    }

    if atoms.is_empty() {
        return Err(ParseDataError::NoAtoms(Box::from(filename.as_ref())));
    }

    let store = AtomStore::new(atoms, simulation_box)?;
    log::info!(
        "Read {} atoms from '{}'.",
        store.get_n_atoms(),
        filename.as_ref().display()
    );

    Ok(store)
}

/// Remove comment from the line and trim it.
#[inline]
fn strip_comment(line: &str) -> &str {
    line.split('#').next().unwrap_or("").trim()
}

/// Check whether the line starts a section other than `Atoms`.
fn is_section_header(content: &str) -> bool {
    match content.split_whitespace().next() {
        Some(word) => SECTION_KEYWORDS.contains(&word.to_lowercase().as_str()),
        None => false,
    }
}

/// Find the line starting the `Atoms` section and the atom style hint, if provided.
fn find_atoms_section(lines: &[String]) -> Option<(usize, Option<AtomStyle>)> {
    let re = Regex::new(r"^\s*Atoms\b[^#]*(?:#\s*(\w+))?").expect(
        "FATAL BREATHER ERROR | lammps_data::find_atoms_section | Could not construct regular expression.",
    );

    lines.iter().enumerate().find_map(|(i, line)| {
        let caps = re.captures(line)?;
        let hint = caps
            .get(1)
            .and_then(|style| AtomStyle::from_hint(style.as_str()));
        Some((i, hint))
    })
}

/// Parse the box bounds from the header of the data file.
fn parse_box(header: &[String], filename: &Path) -> Result<SimBox, ParseDataError> {
    let mut x = None;
    let mut y = None;
    let mut z = None;

    for line in header {
        let words: Vec<&str> = strip_comment(line).split_whitespace().collect();
        if words.len() < 4 {
            continue;
        }

        let target = match (words[words.len() - 2], words[words.len() - 1]) {
            ("xlo", "xhi") => &mut x,
            ("ylo", "yhi") => &mut y,
            ("zlo", "zhi") => &mut z,
            _ => continue,
        };

        *target = Some(parse_bounds(words[0], words[1])?);
    }

    match (x, y) {
        (Some((xlo, xhi)), Some((ylo, yhi))) => {
            let (zlo, zhi) = z.unwrap_or((0.0, 0.0));
            Ok(SimBox::from([xlo, xhi, ylo, yhi, zlo, zhi]))
        }
        _ => Err(ParseDataError::MissingBox(Box::from(filename))),
    }
}

/// Parse a pair of box bounds.
fn parse_bounds(lo: &str, hi: &str) -> Result<(f64, f64), ParseDataError> {
    let error = || ParseDataError::InvalidBox(lo.to_owned(), hi.to_owned());

    let low = lo.parse::<f64>().map_err(|_| error())?;
    let high = hi.parse::<f64>().map_err(|_| error())?;

    if !low.is_finite() || !high.is_finite() || low > high {
        return Err(error());
    }

    Ok((low, high))
}

/// Select the columns holding the id and the coordinates.
/// Returns `None` if the coordinates are the last three columns of each line.
fn resolve_columns(layout: &ColumnLayout, hint: Option<AtomStyle>) -> Option<ColumnIndices> {
    match layout {
        ColumnLayout::Auto => hint.map(|style| style.columns()),
        ColumnLayout::Style(style) => Some(style.columns()),
        ColumnLayout::Columns(indices) => Some(*indices),
    }
}

/// Parse a line of the `Atoms` section as an atom.
fn line_as_atom(
    content: &str,
    columns: Option<ColumnIndices>,
    line: &str,
) -> Result<Atom, ParseDataError> {
    let error = || ParseDataError::ParseAtomLineErr(line.to_owned());
    let words: Vec<&str> = content.split_whitespace().collect();

    let columns = match columns {
        Some(x) => x,
        None if words.len() >= 4 => ColumnIndices {
            id: 0,
            x: words.len() - 3,
            y: words.len() - 2,
            z: words.len() - 1,
        },
        None => return Err(error()),
    };

    let id = words
        .get(columns.id)
        .and_then(|word| word.parse::<u64>().ok())
        .filter(|&id| id > 0)
        .ok_or_else(error)?;

    let mut position = [0.0; 3];
    for (item, index) in position.iter_mut().zip([columns.x, columns.y, columns.z]) {
        *item = words
            .get(index)
            .and_then(|word| word.parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .ok_or_else(error)?;
    }

    Ok(Atom::new(id, position.into()))
}

/******************************/
/*         UNIT TESTS         */
/******************************/
