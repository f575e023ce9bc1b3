//! OpenQASM rendering of the HHL 4x4 circuit.

use hhl_algo::{HhlConfig, build_hhl4x4};
use hhl_ir::GateContainer;
use hhl_qasm::emit;

fn render(config: &HhlConfig) -> String {
    let hhl = build_hhl4x4(config).unwrap();
    emit(&hhl.circuit).unwrap()
}

#[test]
fn test_header_and_declarations() {
    let qasm = render(&HhlConfig::default());
    let head: Vec<_> = qasm.lines().take(8).collect();

    assert_eq!(
        head,
        vec![
            "OPENQASM 2.0;",
            "include \"qelib1.inc\";",
            "gate ccz a,b,c { h c; ccx a,b,c; h c; }",
            "gate csxdg a,b { h b; cu1(-pi/2) a,b; h b; }",
            "qreg ancilla[1];",
            "qreg clock[4];",
            "qreg b[2];",
            "creg result[1];",
        ]
    );
}

#[test]
fn test_section_annotations_in_order() {
    let qasm = render(&HhlConfig::default());
    let sections: Vec<_> = qasm
        .lines()
        .filter(|l| l.starts_with("// [4x4]"))
        .collect();

    assert_eq!(
        sections,
        vec![
            "// [4x4] Initialising b.",
            "// [4x4] Initialisation done!",
            "// [4x4] 1. Quantum phase estimation.",
            "// [4x4] Inverting computed eigenvalues.",
            "// [4x4] 2. Phase rotation.",
            "// [4x4] 3. Inverting quantum phase estimation.",
            "// [4x4] 4. Measurement.",
        ]
    );
    assert!(qasm.ends_with("measure ancilla[0] -> result[0];\n"));
}

#[test]
fn test_one_line_per_leaf() {
    let hhl = build_hhl4x4(&HhlConfig::default()).unwrap();
    let qasm = emit(&hhl.circuit).unwrap();
    let body_start = qasm.lines().position(|l| l.starts_with("creg")).unwrap() + 1;

    assert_eq!(qasm.lines().count() - body_start, hhl.circuit.num_leaves());
}

#[test]
fn test_rotations_and_hamiltonian_lines() {
    let qasm = render(&HhlConfig::default());

    assert!(qasm.contains("// CRY\ncu3(pi/4,0,0) clock[0],ancilla[0];"));
    assert!(qasm.contains("cu3(pi/32,0,0) clock[3],ancilla[0];"));
    assert!(qasm.contains("swap clock[2],clock[1];"));
    assert_eq!(qasm.matches("// [HS] Start.").count(), 8);
    assert_eq!(qasm.matches("// [QPE] Starting block.").count(), 2);
    assert!(qasm.contains("// c-RX"));
    assert!(qasm.contains("csxdg clock["));
    assert!(qasm.contains("cu3(0.19634953,pi/2,(3 * pi/2)) clock[3],b[1];"));
}

#[test]
fn test_approximate_clock_transform() {
    let exact = render(&HhlConfig::default());
    let approximate = render(&HhlConfig {
        qft_order: Some(2),
        ..HhlConfig::default()
    });

    assert!(approximate.lines().count() < exact.lines().count());
}

#[test]
fn test_instructions_serialize() {
    let hhl = build_hhl4x4(&HhlConfig::default()).unwrap();
    let data = hhl.circuit.to_data();
    assert_eq!(data.instructions.len(), hhl.circuit.instructions().len());
}
