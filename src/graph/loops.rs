//! Combinational loop detection

use crate::circuit::{Circuit, ComponentId};
use crate::error::CombinationalLoopError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Check that the combinational subgraph is a directed acyclic graph
///
/// Runs a colored depth-first search over the component graph, where an edge
/// goes from a component to each combinational component reading its output.
/// Flip-flops are neither visited nor traversed: a Dff output is a fresh
/// source within a cycle, so feedback through a flip-flop is not a loop.
///
/// Returns the first loop found as the sequence of component names along it,
/// starting in declaration order. Runs in O(V+E).
pub fn check_cycles(circuit: &Circuit) -> Result<(), CombinationalLoopError> {
    let mut color = vec![Color::White; circuit.nb_components()];

    for start in circuit.component_ids() {
        if color[start.index()] != Color::White || !circuit.component(start).is_comb() {
            continue;
        }
        // Stack of (component, next reader index to explore)
        let mut stack: Vec<(ComponentId, usize)> = vec![(start, 0)];
        color[start.index()] = Color::Gray;

        while let Some((cid, child)) = stack.last().copied() {
            let readers = &circuit.wire(circuit.component(cid).output).readers;
            if child >= readers.len() {
                color[cid.index()] = Color::Black;
                stack.pop();
                continue;
            }
            stack.last_mut().unwrap().1 += 1;
            let next = readers[child];
            if !circuit.component(next).is_comb() {
                continue;
            }
            match color[next.index()] {
                Color::White => {
                    color[next.index()] = Color::Gray;
                    stack.push((next, 0));
                }
                Color::Gray => {
                    // Back edge: the gray nodes from `next` onwards form the loop
                    let pos = stack
                        .iter()
                        .position(|(c, _)| *c == next)
                        .expect("gray node must be on the stack");
                    let mut path: Vec<String> = stack[pos..]
                        .iter()
                        .map(|(c, _)| circuit.component(*c).name.clone())
                        .collect();
                    path.push(circuit.component(next).name.clone());
                    return Err(CombinationalLoopError { path });
                }
                Color::Black => (),
            }
        }
    }
    Ok(())
}
