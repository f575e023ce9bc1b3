//! Composite instructions under construction.

use tracing::debug;

use crate::container::{GateContainer, Scope};
use crate::instruction::Instruction;
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;
use crate::view::QuantumView;

/// A composite instruction being built.
///
/// A composite recognises the registers of the container it was created
/// from, so its children may address any qubit of the enclosing circuit.
/// Children are attached through the [`GateContainer`] verbs; [`build`]
/// seals the composite into an [`Instruction`] ready to be attached to its
/// parent.
///
/// [`build`]: CompositeGate::build
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeGate {
    name: String,
    params: Vec<ParameterExpression>,
    qubits: Vec<QubitId>,
    scope: Scope,
}

impl CompositeGate {
    /// Start a composite named `name` acting on the qubits of `operands`.
    pub fn new<C>(parent: &C, name: impl Into<String>, operands: &QuantumView) -> Self
    where
        C: GateContainer + ?Sized,
    {
        Self::with_qubits(parent, name, operands.qubits())
    }

    /// Start a composite acting on an explicit operand list.
    pub fn with_qubits<C>(
        parent: &C,
        name: impl Into<String>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> Self
    where
        C: GateContainer + ?Sized,
    {
        Self {
            name: name.into(),
            params: vec![],
            qubits: qubits.into_iter().collect(),
            scope: Scope::new(parent.registers().clone()),
        }
    }

    /// Record the parameters the composite is built from.
    #[must_use]
    pub fn with_params(mut self, params: Vec<ParameterExpression>) -> Self {
        self.params = params;
        self
    }

    /// Get the composite name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared operands.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Seal the composite into an instruction.
    pub fn build(self) -> Instruction {
        let children = self.scope.into_instructions();
        debug!(
            name = %self.name,
            qubits = self.qubits.len(),
            children = children.len(),
            "built composite"
        );
        Instruction::composite(self.name, self.params, self.qubits, children)
    }
}

impl GateContainer for CompositeGate {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Circuit;
    use crate::error::IrError;

    #[test]
    fn test_composite_children_in_order() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 2);

        let mut bell = CompositeGate::new(&circuit, "bell", &q);
        bell.h(q.get(0).unwrap())
            .unwrap()
            .cx(q.get(0).unwrap(), q.get(1).unwrap())
            .unwrap();
        let instruction = bell.build();

        assert_eq!(instruction.name(), "bell");
        assert_eq!(instruction.qubits, q.qubits());
        let names: Vec<_> = instruction.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["h", "cx"]);

        circuit.attach(instruction).unwrap();
        assert_eq!(circuit.num_ops(), 1);
    }

    #[test]
    fn test_composite_rejects_foreign_qubits() {
        let circuit = Circuit::new("a");
        let mut other = Circuit::new("b");
        let foreign = other.add_qreg("f", 1);

        let mut composite = CompositeGate::with_qubits(&circuit, "empty", []);
        let err = composite.x(foreign.get(0).unwrap()).unwrap_err();
        assert!(matches!(err, IrError::UnknownRegister { .. }));
        assert!(composite.instructions().is_empty());
    }

    #[test]
    fn test_nested_composites() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 3);

        let mut inner = CompositeGate::new(&circuit, "inner", &q);
        inner.layer(crate::gate::StandardGate::H, &q).unwrap();
        let mut outer = CompositeGate::new(&circuit, "outer", &q);
        outer.attach(inner.build()).unwrap();
        let outer = outer.build();

        assert_eq!(outer.children().len(), 1);
        assert_eq!(outer.children()[0].children().len(), 1);
        assert_eq!(outer.leaves().count(), 3);
    }
}
