use core::fmt;

use fxhash::FxHashMap;

use crate::circuit::component::{Component, ComponentKind};
use crate::circuit::signal::Signal;
use crate::error::BuildError;

/// Index of a wire in its owning circuit
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct WireId(pub(crate) u32);

/// Index of a component in its owning circuit
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct ComponentId(pub(crate) u32);

impl WireId {
    /// Position in the circuit's wire arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ComponentId {
    /// Position in the circuit's component arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named carrier of one signal value
///
/// A wire has at most one driver; wires with no driver are either primary
/// inputs or float at Z.
#[derive(Debug, Clone)]
pub struct Wire {
    /// Unique wire name
    pub name: String,
    /// Current signal value
    pub value: Signal,
    /// The component driving the wire, if any
    pub driver: Option<ComponentId>,
    /// Components reading the wire
    pub readers: Vec<ComponentId>,
}

/// Parser-facing description of one component
///
/// The line number is kept so structural errors can be reported against the
/// source file.
#[derive(Debug, Clone)]
pub struct ComponentDesc {
    /// Kind of the component
    pub kind: ComponentKind,
    /// Unique component name
    pub name: String,
    /// Input wire names, in order
    pub inputs: Vec<String>,
    /// Output wire name
    pub output: String,
    /// Source line of the description
    pub line: u32,
}

/// A complete circuit: the wire and component arenas plus the declared
/// primary inputs and outputs
///
/// The circuit is the single owner of the whole graph. Components reference
/// wires by index; connectivity (drivers and readers) is derived once at
/// build time. Structure is immutable after [`Circuit::build`] succeeds;
/// only wire values and flip-flop state change during simulation.
#[derive(Debug, Clone)]
pub struct Circuit {
    wires: Vec<Wire>,
    components: Vec<Component>,
    wire_names: FxHashMap<String, WireId>,
    inputs: Vec<WireId>,
    outputs: Vec<WireId>,
}

impl Circuit {
    /// Build a circuit from declared inputs, declared outputs and component
    /// descriptions
    ///
    /// Wires are created on first reference by name. Rejects arity
    /// mismatches, duplicate drivers, duplicate component names, repeated
    /// input or output declarations, and declared outputs that no component
    /// generates.
    pub fn build(
        inputs: &[String],
        outputs: &[String],
        components: &[ComponentDesc],
    ) -> Result<Circuit, BuildError> {
        let mut ret = Circuit {
            wires: Vec::new(),
            components: Vec::new(),
            wire_names: FxHashMap::default(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        };

        for name in inputs {
            let id = ret.wire_or_create(name);
            if ret.inputs.contains(&id) {
                return Err(BuildError::DuplicateInput { name: name.clone() });
            }
            ret.inputs.push(id);
        }

        let mut component_names = FxHashMap::default();
        for desc in components {
            if !desc.kind.accepts_arity(desc.inputs.len()) {
                return Err(BuildError::Arity {
                    component: desc.name.clone(),
                    kind: desc.kind,
                    expected: desc.kind.expected_arity(),
                    got: desc.inputs.len(),
                    line: desc.line,
                });
            }
            let cid = ComponentId(ret.components.len() as u32);
            if component_names.insert(desc.name.clone(), cid).is_some() {
                return Err(BuildError::DuplicateComponent {
                    component: desc.name.clone(),
                    line: desc.line,
                });
            }

            let input_ids: Vec<WireId> = desc.inputs.iter().map(|n| ret.wire_or_create(n)).collect();
            let output_id = ret.wire_or_create(&desc.output);
            if ret.wires[output_id.index()].driver.is_some() || ret.inputs.contains(&output_id) {
                return Err(BuildError::DuplicateDriver {
                    wire: desc.output.clone(),
                    line: desc.line,
                });
            }
            ret.wires[output_id.index()].driver = Some(cid);
            for id in &input_ids {
                ret.wires[id.index()].readers.push(cid);
            }
            ret.components.push(Component {
                name: desc.name.clone(),
                kind: desc.kind,
                inputs: input_ids,
                output: output_id,
            });
        }

        for name in outputs {
            match ret.wire_names.get(name) {
                Some(id) => {
                    if ret.outputs.contains(id) {
                        return Err(BuildError::DuplicateOutput { name: name.clone() });
                    }
                    ret.outputs.push(*id);
                }
                None => {
                    return Err(BuildError::UndeclaredSignal { name: name.clone() });
                }
            }
        }

        ret.reset_values();
        Ok(ret)
    }

    fn wire_or_create(&mut self, name: &str) -> WireId {
        if let Some(id) = self.wire_names.get(name) {
            return *id;
        }
        let id = WireId(self.wires.len() as u32);
        self.wires.push(Wire {
            name: name.to_string(),
            value: Signal::Unknown,
            driver: None,
            readers: Vec::new(),
        });
        self.wire_names.insert(name.to_string(), id);
        id
    }

    /// Restore all wires to their initial values
    ///
    /// Primary inputs and flip-flop outputs start at X, undriven wires at Z.
    /// Combinationally driven wires are seeded at 0 so that circuits with
    /// feedback start from a decisive state; the seed is overwritten by the
    /// first settling pass everywhere else.
    pub fn reset_values(&mut self) {
        for i in 0..self.wires.len() {
            let value = match self.wires[i].driver {
                None => {
                    if self.inputs.contains(&WireId(i as u32)) {
                        Signal::Unknown
                    } else {
                        Signal::HighZ
                    }
                }
                Some(cid) => {
                    if self.components[cid.index()].is_comb() {
                        Signal::Low
                    } else {
                        Signal::Unknown
                    }
                }
            };
            self.wires[i].value = value;
        }
    }

    /// Return the number of wires
    pub fn nb_wires(&self) -> usize {
        self.wires.len()
    }

    /// Return the number of components
    pub fn nb_components(&self) -> usize {
        self.components.len()
    }

    /// Return the number of declared primary inputs
    pub fn nb_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Return the number of declared primary outputs
    pub fn nb_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Get the wire at index i
    pub fn wire(&self, id: WireId) -> &Wire {
        &self.wires[id.index()]
    }

    /// Get the component at index i
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.index()]
    }

    /// Look a wire up by name
    pub fn wire_id(&self, name: &str) -> Option<WireId> {
        self.wire_names.get(name).copied()
    }

    /// Get the declared primary input at index i
    pub fn input(&self, i: usize) -> WireId {
        self.inputs[i]
    }

    /// Get the declared primary output at index i
    pub fn output(&self, i: usize) -> WireId {
        self.outputs[i]
    }

    /// Returns whether a wire is a declared primary input
    pub fn is_input(&self, id: WireId) -> bool {
        self.inputs.contains(&id)
    }

    /// Current value of a wire
    pub fn value(&self, id: WireId) -> Signal {
        self.wires[id.index()].value
    }

    /// Set the value of a wire
    ///
    /// Returns whether the value changed, for fixed-point detection.
    pub(crate) fn set_value(&mut self, id: WireId, value: Signal) -> bool {
        let w = &mut self.wires[id.index()];
        let changed = w.value != value;
        w.value = value;
        changed
    }

    /// Iterate over all wire indices in creation order
    pub fn wire_ids(&self) -> impl Iterator<Item = WireId> {
        (0..self.wires.len() as u32).map(WireId)
    }

    /// Iterate over all component indices in declaration order
    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> {
        (0..self.components.len() as u32).map(ComponentId)
    }

    /// Return the number of flip-flops
    pub fn nb_dff(&self) -> usize {
        self.components.iter().filter(|c| !c.is_comb()).count()
    }

    /// Return whether the circuit is purely combinational
    pub fn is_comb(&self) -> bool {
        self.components.iter().all(|c| c.is_comb())
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit with {} inputs, {} outputs, {} components:",
            self.nb_inputs(),
            self.nb_outputs(),
            self.nb_components()
        )?;
        for c in &self.components {
            let ins: Vec<&str> = c.inputs.iter().map(|i| self.wire(*i).name.as_str()).collect();
            writeln!(
                f,
                "\t{} {} {} -> {}",
                c.kind,
                c.name,
                ins.join(" "),
                self.wire(c.output).name
            )?;
        }
        Ok(())
    }
}
