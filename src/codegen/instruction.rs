//! Three-address intermediate instructions.
//!
//! An [`Instruction`] is an opcode plus up to three operand slots. The
//! printable form is the classic `(OP, a, b, c)` triple with empty slots
//! left blank, one instruction per line in the emitted listing.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    Add,
    Sub,
    Mult,
    Eq,
    Lt,
    Assign,
    Jpf,
    Jp,
    Print,
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Op::Add => "ADD",
            Op::Sub => "SUB",
            Op::Mult => "MULT",
            Op::Eq => "EQ",
            Op::Lt => "LT",
            Op::Assign => "ASSIGN",
            Op::Jpf => "JPF",
            Op::Jp => "JP",
            Op::Print => "PRINT",
        };
        f.write_str(name)
    }
}

/// An operand of a three-address instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    /// A literal value, printed with a `#` prefix.
    Immediate(i64),
    /// The word at a data-area address.
    Direct(usize),
    /// The word whose address is stored at a data-area address.
    Indirect(usize),
    /// An instruction index used as a jump target.
    Label(usize),
    /// A raw token spelling: operator tokens and the names/types consumed by
    /// the declaration actions. Never emitted into instructions.
    Lexeme(String),
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Immediate(value) => f.write_fmt(format_args!("#{value}")),
            Operand::Direct(address) => f.write_fmt(format_args!("{address}")),
            Operand::Indirect(address) => f.write_fmt(format_args!("@{address}")),
            Operand::Label(index) => f.write_fmt(format_args!("{index}")),
            Operand::Lexeme(lexeme) => f.write_str(lexeme),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub op: Op,
    pub args: [Option<Operand>; 3],
}

impl Instruction {
    pub fn new(op: Op, args: impl IntoIterator<Item = Operand>) -> Self {
        let mut slots: [Option<Operand>; 3] = [None, None, None];
        for (slot, arg) in slots.iter_mut().zip(args) {
            *slot = Some(arg);
        }
        Self { op, args: slots }
    }

    /// A reserved slot waiting to be back-patched.
    pub fn placeholder() -> Self {
        Self::new(Op::Jp, [])
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let render = |slot: &Option<Operand>| match slot {
            Some(operand) => operand.to_string(),
            None => String::new(),
        };

        f.write_fmt(format_args!(
            "({}, {}, {}, {})",
            self.op,
            render(&self.args[0]),
            render(&self.args[1]),
            render(&self.args[2]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_display() {
        assert_eq!(Operand::Immediate(2).to_string(), "#2");
        assert_eq!(Operand::Direct(104).to_string(), "104");
        assert_eq!(Operand::Indirect(500).to_string(), "@500");
        assert_eq!(Operand::Label(7).to_string(), "7");
    }

    #[test]
    fn test_instruction_display() {
        let instruction = Instruction::new(
            Op::Assign,
            [Operand::Immediate(2), Operand::Direct(100)],
        );
        assert_eq!(instruction.to_string(), "(ASSIGN, #2, 100, )");

        let instruction = Instruction::new(
            Op::Lt,
            [
                Operand::Immediate(1),
                Operand::Immediate(2),
                Operand::Direct(500),
            ],
        );
        assert_eq!(instruction.to_string(), "(LT, #1, #2, 500)");
    }

    #[test]
    fn test_placeholder_display() {
        assert_eq!(Instruction::placeholder().to_string(), "(JP, , , )");
    }
}
