//! Two-level minimization backed by the `quine-mc_cluskey` crate

use super::cube::{Cube, CubeValue};
use crate::truth_table::TruthTable;
use quine_mc_cluskey::Bool;

/// Minimized cover of the table, if the minimizer produced a sum of products
/// that reproduces every row.
///
/// The caller handles the constant tables; `table` must contain both true and
/// false rows.
pub(crate) fn minimize(table: &TruthTable, width: usize) -> Option<Vec<Cube>> {
    let minterms: Vec<Bool> = table
        .rows()
        .iter()
        .filter(|row| row.output)
        .map(|row| {
            Bool::And(
                row.values
                    .iter()
                    .enumerate()
                    .map(|(j, &bit)| {
                        let term = Bool::Term(j as u8);
                        if bit {
                            term
                        } else {
                            Bool::Not(Box::new(term))
                        }
                    })
                    .collect(),
            )
        })
        .collect();

    let candidate = Bool::Or(minterms).simplify().into_iter().next()?;
    let cover = to_cover(&candidate, width)?;
    reproduces(&cover, table).then_some(cover)
}

fn to_cover(value: &Bool, width: usize) -> Option<Vec<Cube>> {
    match value {
        Bool::Or(items) => items.iter().map(|item| to_cube(item, width)).collect(),
        other => to_cube(other, width).map(|cube| vec![cube]),
    }
}

fn to_cube(value: &Bool, width: usize) -> Option<Cube> {
    let mut cube = Cube::universal(width);
    match value {
        Bool::And(items) => {
            for item in items {
                literal(item, &mut cube)?;
            }
        }
        other => literal(other, &mut cube)?,
    }
    Some(cube)
}

fn literal(value: &Bool, cube: &mut Cube) -> Option<()> {
    let (index, polarity) = match value {
        Bool::Term(index) => (*index as usize, CubeValue::One),
        Bool::Not(inner) => match inner.as_ref() {
            Bool::Term(index) => (*index as usize, CubeValue::Zero),
            _ => return None,
        },
        _ => return None,
    };
    if index >= cube.inputs().len() {
        return None;
    }
    cube.set(index, polarity);
    Some(())
}

fn reproduces(cover: &[Cube], table: &TruthTable) -> bool {
    table
        .rows()
        .iter()
        .all(|row| cover.iter().any(|cube| cube.covers(&row.values)) == row.output)
}
