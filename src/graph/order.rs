//! Topological evaluation order of combinational components

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::circuit::{Circuit, ComponentId};

/// Linear evaluation order over the combinational components of a circuit
///
/// Every component appears after all combinational components driving its
/// inputs. Flip-flop outputs are treated as sources: a Dff never appears in
/// the order and contributes no edges, since its output only changes on the
/// clock edge.
///
/// When the combinational subgraph contains a cycle, Kahn's algorithm cannot
/// drain its queue. The order then degrades to the drained prefix, followed
/// by the un-orderable residual in declaration order, and [`EvalOrder::is_complete`]
/// returns false; the simulator falls back to iterate-until-stable.
#[derive(Debug, Clone)]
pub struct EvalOrder {
    ordered: Vec<ComponentId>,
    nb_sorted: usize,
}

impl EvalOrder {
    /// All combinational components: the sorted prefix, then the residual
    pub fn components(&self) -> &[ComponentId] {
        &self.ordered
    }

    /// Returns whether every combinational component could be ordered
    pub fn is_complete(&self) -> bool {
        self.nb_sorted == self.ordered.len()
    }

    /// The components that could not be ordered (members of loops)
    pub fn residual(&self) -> &[ComponentId] {
        &self.ordered[self.nb_sorted..]
    }
}

/// Compute the evaluation order of a circuit with Kahn's algorithm
///
/// Ties among ready components are broken by declaration order, so the
/// result is deterministic across runs.
pub fn eval_order(circuit: &Circuit) -> EvalOrder {
    // In-degree of each component, counting only combinational drivers
    let mut in_degree = vec![0u32; circuit.nb_components()];
    for cid in circuit.component_ids() {
        let c = circuit.component(cid);
        if !c.is_comb() {
            continue;
        }
        for wid in &c.inputs {
            if let Some(driver) = circuit.wire(*wid).driver {
                if circuit.component(driver).is_comb() {
                    in_degree[cid.index()] += 1;
                }
            }
        }
    }

    // Smallest declaration index first for a stable, reproducible order
    let mut ready = BinaryHeap::new();
    for cid in circuit.component_ids() {
        if circuit.component(cid).is_comb() && in_degree[cid.index()] == 0 {
            ready.push(Reverse(cid));
        }
    }

    let mut ordered = Vec::new();
    let mut placed = vec![false; circuit.nb_components()];
    while let Some(Reverse(cid)) = ready.pop() {
        ordered.push(cid);
        placed[cid.index()] = true;
        let out = circuit.component(cid).output;
        for reader in &circuit.wire(out).readers {
            if !circuit.component(*reader).is_comb() {
                continue;
            }
            in_degree[reader.index()] -= 1;
            if in_degree[reader.index()] == 0 {
                ready.push(Reverse(*reader));
            }
        }
    }

    let nb_sorted = ordered.len();
    for cid in circuit.component_ids() {
        if circuit.component(cid).is_comb() && !placed[cid.index()] {
            ordered.push(cid);
        }
    }
    EvalOrder { ordered, nb_sorted }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{ComponentDesc, ComponentKind};

    fn desc(kind: ComponentKind, name: &str, inputs: &[&str], output: &str) -> ComponentDesc {
        ComponentDesc {
            kind,
            name: name.to_string(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            output: output.to_string(),
            line: 0,
        }
    }

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    /// Check that every combinational driver precedes its readers
    fn check_topological(circuit: &Circuit, order: &EvalOrder) {
        let mut position = vec![usize::MAX; circuit.nb_components()];
        for (pos, cid) in order.components().iter().enumerate() {
            position[cid.index()] = pos;
        }
        for cid in circuit.component_ids() {
            let c = circuit.component(cid);
            if !c.is_comb() {
                continue;
            }
            for wid in &c.inputs {
                if let Some(driver) = circuit.wire(*wid).driver {
                    if circuit.component(driver).is_comb() {
                        assert!(position[driver.index()] < position[cid.index()]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_chain_reversed_declaration() {
        // Declared sink-first so the sort has actual work to do
        let c = Circuit::build(
            &names(&["a"]),
            &names(&["y"]),
            &[
                desc(ComponentKind::Not, "n2", &["w1"], "y"),
                desc(ComponentKind::Not, "n1", &["w0"], "w1"),
                desc(ComponentKind::Not, "n0", &["a"], "w0"),
            ],
        )
        .unwrap();
        let order = eval_order(&c);
        assert!(order.is_complete());
        assert_eq!(order.components().len(), 3);
        check_topological(&c, &order);
    }

    #[test]
    fn test_declaration_order_ties() {
        // Independent gates stay in declaration order
        let c = Circuit::build(
            &names(&["a", "b"]),
            &names(&["x", "y", "z"]),
            &[
                desc(ComponentKind::And, "g0", &["a", "b"], "x"),
                desc(ComponentKind::Or, "g1", &["a", "b"], "y"),
                desc(ComponentKind::Xor, "g2", &["a", "b"], "z"),
            ],
        )
        .unwrap();
        let order = eval_order(&c);
        assert!(order.is_complete());
        let idx: Vec<usize> = order.components().iter().map(|c| c.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn test_dff_breaks_order_dependency() {
        // q feeds back through the flip-flop: still a complete order
        let c = Circuit::build(
            &names(&["clk", "rst"]),
            &names(&["q"]),
            &[
                desc(ComponentKind::Not, "inv", &["q"], "d"),
                desc(ComponentKind::Dff, "dff0", &["d", "clk", "rst"], "q"),
            ],
        )
        .unwrap();
        let order = eval_order(&c);
        assert!(order.is_complete());
        // Only the inverter is ordered; the Dff is not part of settling
        assert_eq!(order.components().len(), 1);
    }

    #[test]
    fn test_partial_order_on_loop() {
        let c = Circuit::build(
            &names(&["a"]),
            &names(&["y"]),
            &[
                desc(ComponentKind::Not, "pre", &["a"], "w"),
                desc(ComponentKind::And, "g0", &["w", "fb"], "y"),
                desc(ComponentKind::Not, "g1", &["y"], "fb"),
            ],
        )
        .unwrap();
        let order = eval_order(&c);
        assert!(!order.is_complete());
        // The loop members remain in the residual, the prefix is usable
        assert_eq!(order.components().len(), 3);
        assert_eq!(order.residual().len(), 2);
        assert_eq!(order.components()[0].index(), 0);
    }

    #[test]
    fn test_determinism() {
        let build = || {
            Circuit::build(
                &names(&["a", "b", "c"]),
                &names(&["y"]),
                &[
                    desc(ComponentKind::And, "g0", &["a", "b"], "t0"),
                    desc(ComponentKind::Or, "g1", &["t0", "c"], "t1"),
                    desc(ComponentKind::Xor, "g2", &["t1", "a"], "y"),
                    desc(ComponentKind::Not, "g3", &["b"], "t2"),
                    desc(ComponentKind::And, "g4", &["t2", "c"], "t3"),
                ],
            )
            .unwrap()
        };
        let o1 = eval_order(&build());
        let o2 = eval_order(&build());
        assert_eq!(o1.components(), o2.components());
    }
}
