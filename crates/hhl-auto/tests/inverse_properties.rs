//! Property-based tests for structural inversion.

use hhl_auto::{controlled_instruction, inverse_instruction};
use hhl_ir::{Circuit, GateContainer, Instruction, ParameterExpression, QubitId, StandardGate};
use proptest::prelude::*;

const WIDTH: usize = 4;

fn arb_angle() -> impl Strategy<Value = ParameterExpression> {
    prop_oneof![
        (-10.0_f64..10.0).prop_map(ParameterExpression::constant),
        (0_u32..6).prop_map(ParameterExpression::pi_over_power_of_two),
        (0_u32..6).prop_map(|k| -ParameterExpression::pi_over_power_of_two(k)),
    ]
}

fn arb_leaf(qubits: Vec<QubitId>) -> impl Strategy<Value = Instruction> {
    let single = qubits.clone();
    let pair = qubits.clone();
    prop_oneof![
        (0..WIDTH, prop_oneof![
            Just(StandardGate::H),
            Just(StandardGate::S),
            Just(StandardGate::Tdg),
            Just(StandardGate::SX),
        ])
        .prop_map(move |(i, g)| Instruction::single_qubit_gate(g, single[i])),
        (0..WIDTH, 1..WIDTH, arb_angle()).prop_map(move |(i, shift, theta)| {
            let j = (i + shift) % WIDTH;
            Instruction::two_qubit_gate(StandardGate::CP(theta), pair[i], pair[j])
        }),
        (0..WIDTH, arb_angle(), arb_angle(), arb_angle()).prop_map(
            move |(i, a, b, c)| Instruction::single_qubit_gate(StandardGate::U(a, b, c), qubits[i])
        ),
        "[a-z]{1,8}".prop_map(Instruction::annotation),
    ]
}

fn arb_tree(qubits: Vec<QubitId>) -> impl Strategy<Value = Instruction> {
    let operands = qubits.clone();
    arb_leaf(qubits).prop_recursive(3, 24, 5, move |inner| {
        let operands = operands.clone();
        (prop::collection::vec(inner, 0..5), "[A-Z]{1,4}").prop_map(move |(children, name)| {
            Instruction::composite(name, vec![], operands.clone(), children)
        })
    })
}

fn circuit_and_tree() -> impl Strategy<Value = (Circuit, Vec<QubitId>, Instruction)> {
    Just(()).prop_flat_map(|()| {
        let mut circuit = Circuit::new("props");
        let qubits = circuit.add_qreg("q", WIDTH).qubits();
        (Just(circuit), Just(qubits.clone()), arb_tree(qubits))
    })
}

fn operand_lists(instruction: &Instruction) -> Vec<Vec<QubitId>> {
    let mut lists = vec![instruction.qubits.clone()];
    for child in instruction.children() {
        lists.extend(operand_lists(child));
    }
    lists
}

proptest! {
    #[test]
    fn double_inversion_reproduces_tree((_, _, tree) in circuit_and_tree()) {
        let twice = inverse_instruction(&inverse_instruction(&tree).unwrap()).unwrap();
        prop_assert_eq!(operand_lists(&twice), operand_lists(&tree));
        prop_assert_eq!(twice, tree);
    }

    #[test]
    fn inversion_reverses_children((_, _, tree) in circuit_and_tree()) {
        let inverse = inverse_instruction(&tree).unwrap();
        let expected: Vec<_> = tree
            .children()
            .iter()
            .rev()
            .map(|c| inverse_instruction(c).unwrap())
            .collect();
        prop_assert_eq!(inverse.children(), expected.as_slice());
        prop_assert_eq!(&inverse.qubits, &tree.qubits);
    }

    #[test]
    fn inverted_tree_attaches((mut circuit, _, tree) in circuit_and_tree()) {
        let inverse = inverse_instruction(&tree).unwrap();
        prop_assert!(circuit.attach(tree).is_ok());
        prop_assert!(circuit.attach(inverse).is_ok());
    }
}

#[test]
fn test_controlled_then_inverted_keeps_control_first() {
    let mut circuit = Circuit::new("test");
    let q = circuit.add_qreg("q", 3);
    let (c, a, b) = (q.get(0).unwrap(), q.get(1).unwrap(), q.get(2).unwrap());

    let body = Instruction::composite(
        "body",
        vec![],
        [a, b],
        vec![
            Instruction::annotation("body"),
            Instruction::single_qubit_gate(StandardGate::T, a),
            Instruction::two_qubit_gate(StandardGate::CX, a, b),
        ],
    );

    let controlled = controlled_instruction(&body, c).unwrap();
    let inverse = inverse_instruction(&controlled).unwrap();

    assert_eq!(inverse.name(), "c_body_dg");
    let names: Vec<_> = inverse.children().iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["ccx", "cp", "comment"]);
    assert_eq!(inverse.children()[0].qubits, vec![c, a, b]);
    assert_eq!(inverse.children()[2].annotation_text(), Some("c-body"));

    circuit.attach(controlled).unwrap();
    circuit.attach(inverse).unwrap();
    assert_eq!(circuit.num_ops(), 2);
}
