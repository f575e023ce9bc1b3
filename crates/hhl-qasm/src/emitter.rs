//! OpenQASM 2.0 emitter for instruction trees.

use rustc_hash::{FxHashMap, FxHashSet};

use hhl_ir::{
    Circuit, ClbitId, GateContainer, GateKind, Instruction, InstructionKind, ParameterExpression,
    QubitId, RegisterId, RegisterSet, StandardGate,
};

use crate::error::{QasmError, QasmResult};

/// `ccz` is not part of `qelib1.inc`.
const CCZ_DEFINITION: &str = "gate ccz a,b,c { h c; ccx a,b,c; h c; }";

/// `csxdg` is not part of `qelib1.inc`.
const CSXDG_DEFINITION: &str = "gate csxdg a,b { h b; cu1(-pi/2) a,b; h b; }";

/// Emit a circuit as OpenQASM 2.0 source code.
///
/// Every base register becomes a `qreg`/`creg` declaration named after the
/// register. Leaves are emitted depth-first, one line each: composites only
/// contribute their children and annotations become `// text` lines.
/// Gates missing from `qelib1.inc` get an inline `gate` definition.
pub fn emit(circuit: &Circuit) -> QasmResult<String> {
    let mut emitter = Emitter::new(circuit.registers())?;
    emitter.emit_circuit(circuit.registers(), circuit.instructions())
}

/// Emit the leaves of a single instruction tree, without header or
/// declarations.
pub fn emit_body(registers: &RegisterSet, instruction: &Instruction) -> QasmResult<String> {
    let mut emitter = Emitter::new(registers)?;
    emitter.emit_instruction(instruction)?;
    Ok(emitter.output)
}

/// OpenQASM 2.0 emitter.
struct Emitter<'a> {
    output: String,
    qregs: FxHashMap<RegisterId, &'a str>,
    cregs: FxHashMap<RegisterId, &'a str>,
}

impl<'a> Emitter<'a> {
    fn new(registers: &'a RegisterSet) -> QasmResult<Self> {
        let mut names = FxHashSet::default();
        let mut qregs = FxHashMap::default();
        let mut cregs = FxHashMap::default();

        for reg in registers.quantum() {
            if !names.insert(reg.name()) {
                return Err(QasmError::DuplicateRegisterName(reg.name().to_string()));
            }
            qregs.insert(reg.id(), reg.name());
        }
        for reg in registers.classical() {
            if !names.insert(reg.name()) {
                return Err(QasmError::DuplicateRegisterName(reg.name().to_string()));
            }
            cregs.insert(reg.id(), reg.name());
        }

        Ok(Self {
            output: String::new(),
            qregs,
            cregs,
        })
    }

    fn emit_circuit(
        &mut self,
        registers: &RegisterSet,
        instructions: &[Instruction],
    ) -> QasmResult<String> {
        // First pass: detect gates that need definitions.
        let mut needs_ccz = false;
        let mut needs_csxdg = false;
        for leaf in instructions.iter().flat_map(Instruction::leaves) {
            match leaf.as_gate().and_then(|g| g.as_standard()) {
                Some(StandardGate::CCZ) => needs_ccz = true,
                Some(StandardGate::CSXdg) => needs_csxdg = true,
                _ => {}
            }
        }

        // Header
        self.writeln("OPENQASM 2.0;");
        self.writeln("include \"qelib1.inc\";");

        if needs_ccz {
            self.writeln(CCZ_DEFINITION);
        }
        if needs_csxdg {
            self.writeln(CSXDG_DEFINITION);
        }

        // Register declarations
        for reg in registers.quantum() {
            self.writeln(&format!("qreg {}[{}];", reg.name(), reg.len()));
        }
        for reg in registers.classical() {
            self.writeln(&format!("creg {}[{}];", reg.name(), reg.len()));
        }

        // Instructions
        for instruction in instructions {
            self.emit_instruction(instruction)?;
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> QasmResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let name = emit_gate_name(&gate.kind);
                let params = emit_gate_params(&gate.kind);
                let qubits = self.emit_qubits(&instruction.qubits)?;

                if params.is_empty() {
                    self.writeln(&format!("{name} {qubits};"));
                } else {
                    self.writeln(&format!("{name}({params}) {qubits};"));
                }
            }

            InstructionKind::Composite(composite) => {
                for child in &composite.children {
                    self.emit_instruction(child)?;
                }
            }

            InstructionKind::Annotation(text) => {
                self.writeln(&format!("// {text}"));
            }

            InstructionKind::Measure => {
                for (&q, &c) in instruction.qubits.iter().zip(&instruction.clbits) {
                    let q = self.emit_qubit(q)?;
                    let c = self.emit_clbit(c)?;
                    self.writeln(&format!("measure {q} -> {c};"));
                }
            }

            InstructionKind::Reset => {
                let qubits = self.emit_qubits(&instruction.qubits)?;
                self.writeln(&format!("reset {qubits};"));
            }

            InstructionKind::Barrier => {
                let qubits = self.emit_qubits(&instruction.qubits)?;
                self.writeln(&format!("barrier {qubits};"));
            }
        }

        Ok(())
    }

    fn emit_qubit(&self, qubit: QubitId) -> QasmResult<String> {
        let name = self
            .qregs
            .get(&qubit.register)
            .ok_or(QasmError::UndeclaredQubit(qubit))?;
        Ok(format!("{name}[{}]", qubit.offset))
    }

    fn emit_clbit(&self, clbit: ClbitId) -> QasmResult<String> {
        let name = self
            .cregs
            .get(&clbit.register)
            .ok_or(QasmError::UndeclaredClbit(clbit))?;
        Ok(format!("{name}[{}]", clbit.offset))
    }

    fn emit_qubits(&self, qubits: &[QubitId]) -> QasmResult<String> {
        Ok(qubits
            .iter()
            .map(|&q| self.emit_qubit(q))
            .collect::<QasmResult<Vec<_>>>()?
            .join(","))
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

fn emit_gate_name(kind: &GateKind) -> String {
    // qelib1.inc spells phase and universal gates with their legacy names.
    match kind {
        GateKind::Standard(std) => match std {
            StandardGate::P(_) => "u1".into(),
            StandardGate::U(_, _, _) => "u3".into(),
            StandardGate::CP(_) => "cu1".into(),
            StandardGate::CU(_, _, _) => "cu3".into(),
            other => other.name().into(),
        },
        GateKind::Custom(custom) => custom.name.clone(),
    }
}

fn emit_gate_params(kind: &GateKind) -> String {
    kind.parameters()
        .into_iter()
        .map(emit_param)
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a parameter expression with `pi` kept symbolic.
pub fn emit_param(param: &ParameterExpression) -> String {
    match param {
        ParameterExpression::Constant(v) => {
            let pi = std::f64::consts::PI;
            if (*v - pi).abs() < 1e-10 {
                "pi".into()
            } else if (*v - pi / 2.0).abs() < 1e-10 {
                "pi/2".into()
            } else if (*v - pi / 4.0).abs() < 1e-10 {
                "pi/4".into()
            } else if (*v + pi / 2.0).abs() < 1e-10 {
                "-pi/2".into()
            } else if (*v + pi / 4.0).abs() < 1e-10 {
                "-pi/4".into()
            } else {
                format!("{v}")
            }
        }
        ParameterExpression::Pi => "pi".into(),
        ParameterExpression::Neg(e) => format!("-({})", emit_param(e)),
        ParameterExpression::Add(a, b) => format!("({} + {})", emit_param(a), emit_param(b)),
        ParameterExpression::Sub(a, b) => format!("({} - {})", emit_param(a), emit_param(b)),
        ParameterExpression::Mul(a, b) => format!("({} * {})", emit_param(a), emit_param(b)),
        // π / 2^k is by far the most common shape; keep it compact.
        ParameterExpression::Div(a, b) => match (&**a, &**b) {
            (ParameterExpression::Pi, ParameterExpression::Constant(d)) => format!("pi/{d}"),
            _ => format!("({} / {})", emit_param(a), emit_param(b)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hhl_ir::CompositeGate;

    #[test]
    fn test_emit_bell_state() {
        let mut circuit = Circuit::new("bell");
        let q = circuit.add_qreg("q", 2);
        let c = circuit.add_creg("c", 2);
        circuit.h(q.get(0).unwrap()).unwrap();
        circuit.cx(q.get(0).unwrap(), q.get(1).unwrap()).unwrap();
        circuit.measure(q.get(1).unwrap(), c.clbit(1).unwrap()).unwrap();

        let qasm = emit(&circuit).unwrap();
        assert_eq!(
            qasm,
            "OPENQASM 2.0;\n\
             include \"qelib1.inc\";\n\
             qreg q[2];\n\
             creg c[2];\n\
             h q[0];\n\
             cx q[0],q[1];\n\
             measure q[1] -> c[1];\n"
        );
    }

    #[test]
    fn test_emit_legacy_names_and_params() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("clock", 2);
        let (a, b) = (q.get(0).unwrap(), q.get(1).unwrap());
        circuit.cp(ParameterExpression::pi_over_power_of_two(2), a, b).unwrap();
        circuit.p(-ParameterExpression::pi_over_power_of_two(1), a).unwrap();
        circuit.cu(0.25, 0, 0, a, b).unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("cu1(pi/4) clock[0],clock[1];"));
        assert!(qasm.contains("u1(-(pi/2)) clock[0];"));
        assert!(qasm.contains("cu3(0.25,0,0) clock[0],clock[1];"));
    }

    #[test]
    fn test_composites_are_flattened() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 2);

        let mut stage = CompositeGate::new(&circuit, "stage", &q);
        stage.comment("[demo] Start.").unwrap();
        stage.layer(StandardGate::H, &q).unwrap();
        circuit.attach(stage.build()).unwrap();

        let body = emit_body(circuit.registers(), &circuit.instructions()[0]).unwrap();
        assert_eq!(body, "// [demo] Start.\nh q[0];\nh q[1];\n");
    }

    #[test]
    fn test_gate_definitions_emitted_when_used() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 3);
        circuit
            .ccz(q.get(0).unwrap(), q.get(1).unwrap(), q.get(2).unwrap())
            .unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains(CCZ_DEFINITION));
        assert!(!qasm.contains(CSXDG_DEFINITION));
        assert!(qasm.contains("ccz q[0],q[1],q[2];"));
    }

    #[test]
    fn test_duplicate_register_names_rejected() {
        let mut circuit = Circuit::new("test");
        circuit.add_qreg("q", 1);
        circuit.add_creg("q", 1);

        assert_eq!(
            emit(&circuit),
            Err(QasmError::DuplicateRegisterName("q".into()))
        );
    }

    #[test]
    fn test_emit_param_constants() {
        assert_eq!(emit_param(&ParameterExpression::constant(std::f64::consts::PI)), "pi");
        assert_eq!(emit_param(&ParameterExpression::constant(-std::f64::consts::FRAC_PI_4)), "-pi/4");
        assert_eq!(emit_param(&ParameterExpression::constant(0.19634953)), "0.19634953");
        assert_eq!(emit_param(&ParameterExpression::pi_over_power_of_two(3)), "pi/8");
    }
}
