//! IO for input stimulus files

use std::io::{BufRead, BufReader, Read};

use crate::circuit::Signal;
use crate::error::NetlistError;

/// Read a stimulus file, one line per simulated cycle
///
/// Each line carries one character per declared primary input, in
/// declaration order, from `0`, `1`, `X` and `Z`. An optional `n:` cycle
/// prefix and whitespace between characters are tolerated:
/// ```text
///     # a b
///     1: 11
///     2: 1X
/// ```
pub fn read_stimuli<R: Read>(r: R, nb_inputs: usize) -> Result<Vec<Vec<Signal>>, NetlistError> {
    let mut ret = Vec::new();
    for (i, l) in BufReader::new(r).lines().enumerate() {
        let line = (i + 1) as u32;
        let l = l?;
        let t = l.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        let values = match t.split_once(':') {
            Some((_, v)) => v,
            None => t,
        };
        let mut cycle = Vec::new();
        for c in values.chars().filter(|c| !c.is_whitespace()) {
            match Signal::from_char(c) {
                Some(s) => cycle.push(s),
                None => {
                    return Err(NetlistError::Syntax {
                        line,
                        message: format!("invalid signal character '{c}'"),
                    });
                }
            }
        }
        if cycle.len() != nb_inputs {
            return Err(NetlistError::Syntax {
                line,
                message: format!("expected {} input values, got {}", nb_inputs, cycle.len()),
            });
        }
        ret.push(cycle);
    }
    Ok(ret)
}
