//! # Code generator
//!
//! Syntax-directed translation into three-address code. The parser invokes
//! one [`Action`] at a time as it walks production paths; every action
//! mutates the generator's private state: the semantic stack of operands,
//! the stack of saved instruction slots awaiting a back-patch, the scope
//! stack, and the growing instruction vector.
//!
//! Semantic trouble (unresolved names, arity mismatches, `break` without a
//! loop) is recorded and never aborts emission; the resulting stream may be
//! malformed, which is why consumers are expected to look at the error list
//! first.

mod instruction;
mod scope;

pub use instruction::*;
pub use scope::*;

use std::error::Error;
use std::fmt::Display;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::parser::Action;
use crate::scanner::Token;

pub const WORD_SIZE: usize = 4;
const DATA_BASE: usize = 100;
const TEMP_BASE: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticError {
    pub message: String,
    pub lineno: usize,
}

impl Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "#{} : semantic error, {}",
            self.lineno, self.message
        ))
    }
}

impl Error for SemanticError {}

#[derive(Debug)]
struct LoopFrame {
    top: usize,
    breaks: Vec<usize>,
}

#[derive(Debug)]
struct CallFrame {
    name: String,
    args: Vec<Operand>,
}

pub struct CodeGen {
    instructions: Vec<Instruction>,
    stack: Vec<Operand>,
    saves: Vec<usize>,
    loops: Vec<LoopFrame>,
    calls: Vec<CallFrame>,
    pending_params: Vec<ParamInfo>,
    scopes: ScopeStack,
    current_function: Option<FunctionInfo>,
    function_base: usize,
    entry_slot: Option<usize>,
    data_ptr: usize,
    temp_ptr: usize,
    lineno: usize,
    markers: Vec<(usize, usize)>,
    errors: Vec<SemanticError>,
}

impl Default for CodeGen {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGen {
    pub fn new() -> Self {
        let mut codegen = Self {
            instructions: vec![],
            stack: vec![],
            saves: vec![],
            loops: vec![],
            calls: vec![],
            pending_params: vec![],
            scopes: ScopeStack::new(),
            current_function: None,
            function_base: DATA_BASE,
            entry_slot: None,
            data_ptr: DATA_BASE,
            temp_ptr: TEMP_BASE,
            lineno: 1,
            markers: vec![],
            errors: vec![],
        };

        codegen.declare_output();
        codegen
    }

    /// The built-in `output` function: one parameter, compiled to PRINT.
    fn declare_output(&mut self) {
        let return_value = self.alloc_data();
        let return_address = self.alloc_data();
        let parameter = self.alloc_data();

        self.scopes.define(
            "output",
            Binding::Function(FunctionInfo {
                name: "output".into(),
                return_value,
                return_address,
                frame_size: 0,
                entry: 0,
                params: vec![ParamInfo {
                    name: "a".into(),
                    address: parameter,
                    array: false,
                }],
                builtin: true,
            }),
        );
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Line markers recorded by [`CodeGen::semantic_refresh`]: pairs of
    /// (line, index of the first instruction attributed to that line).
    pub fn markers(&self) -> &[(usize, usize)] {
        &self.markers
    }

    /// Checkpoint fired by the parser whenever the token stream crosses a
    /// source-line boundary.
    pub fn semantic_refresh(&mut self, lineno: usize) {
        self.markers.push((lineno, self.instructions.len()));
        self.lineno = lineno;
    }

    /// Run one semantic action. `token` is the most recently consumed token
    /// at the action's position in the production path.
    pub fn apply(&mut self, action: Action, token: Option<&Token>) {
        if let Some(token) = token {
            self.lineno = token.lineno;
        }

        match action {
            Action::Push => self.push(token),
            Action::Pid => self.pid(token),
            Action::Pnum => self.pnum(token),
            Action::Declare => self.declare(),
            Action::DecArr => self.dec_arr(),
            Action::DecFun => self.dec_fun(),
            Action::DecPvar => self.dec_pvar(),
            Action::DecParr => self.dec_parr(),
            Action::StartScope => self.start_scope(),
            Action::FinishScope => self.scopes.exit_scope(),
            Action::EndFunc => self.end_func(),
            Action::Assign => self.assign(),
            Action::Opera => self.opera(),
            Action::Parr => self.parr(),
            Action::Save => self.save(),
            Action::FillJpf => self.fill_jpf(),
            Action::FillJp => self.fill_jp(),
            Action::IfcAction => self.ifc_action(),
            Action::Loop => self.loop_top(),
            Action::Until => self.until(),
            Action::ScopeBreak => self.scope_break(),
            Action::Call => self.call(),
            Action::FunReturn => self.fun_return(),
            Action::FunctionReturn => self.function_return(),
            Action::AddArgs => self.add_args(),
            Action::Pop => self.pop(),
            Action::StartProgram => self.start_program(),
            Action::EndProgram => self.end_program(),
        }
    }

    fn push(&mut self, token: Option<&Token>) {
        match token {
            Some(token) => self.stack.push(Operand::Lexeme(token.lexeme.clone())),
            None => self.error("missing token for push"),
        }
    }

    fn pid(&mut self, token: Option<&Token>) {
        let Some(token) = token else {
            self.error("missing token for identifier lookup");
            return;
        };
        let name = token.lexeme.clone();

        match self.scopes.resolve(&name).cloned() {
            Some(Binding::Variable { address })
            | Some(Binding::ParamVariable { address })
            | Some(Binding::ParamArray { address }) => self.stack.push(Operand::Direct(address)),
            Some(Binding::Array { address }) => {
                self.stack.push(Operand::Immediate(address as i64))
            }
            Some(Binding::Function(info)) => {
                self.stack.push(Operand::Direct(info.return_value));
                self.calls.push(CallFrame { name, args: vec![] });
            }
            None => {
                self.error(format!("'{name}' is not defined"));
                let address = self.alloc_data();
                self.scopes.define(&name, Binding::Variable { address });
                self.stack.push(Operand::Direct(address));
            }
        }
    }

    fn pnum(&mut self, token: Option<&Token>) {
        let Some(token) = token else {
            self.error("missing token for number literal");
            return;
        };

        match token.lexeme.parse::<i64>() {
            Ok(value) => self.stack.push(Operand::Immediate(value)),
            Err(_) => {
                self.error(format!("'{}' is not a number", token.lexeme));
                self.stack.push(Operand::Immediate(0));
            }
        }
    }

    fn declare(&mut self) {
        let name = self.pop_lexeme();
        let _type_specifier = self.pop_lexeme();
        let address = self.alloc_data();
        self.scopes.define(&name, Binding::Variable { address });
    }

    fn dec_arr(&mut self) {
        let length = self.pop_operand();
        let name = self.pop_lexeme();
        let _type_specifier = self.pop_lexeme();

        let words = match length {
            Operand::Immediate(count) if count >= 0 => count as usize,
            _ => {
                self.error(format!("'{name}' has no valid array length"));
                1
            }
        };

        let address = self.data_ptr;
        self.data_ptr += words * WORD_SIZE;
        self.scopes.define(&name, Binding::Array { address });
    }

    fn dec_fun(&mut self) {
        let name = self.pop_lexeme();
        let _type_specifier = self.pop_lexeme();

        let return_value = self.alloc_data();
        let return_address = self.alloc_data();
        let frame_size = self.alloc_data();
        let entry = self.emit(Instruction::placeholder());

        let info = FunctionInfo {
            name: name.clone(),
            return_value,
            return_address,
            frame_size,
            entry,
            params: vec![],
            builtin: false,
        };

        self.scopes.define(&name, Binding::Function(info.clone()));
        self.pending_params.clear();
        self.function_base = self.data_ptr;
        self.current_function = Some(info);
    }

    fn dec_pvar(&mut self) {
        let name = self.pop_lexeme();
        let _type_specifier = self.pop_lexeme();
        let address = self.alloc_data();
        self.pending_params.push(ParamInfo {
            name,
            address,
            array: false,
        });
    }

    fn dec_parr(&mut self) {
        match self.pending_params.last_mut() {
            Some(param) => param.array = true,
            None => self.error("no parameter to mark as an array"),
        }
    }

    /// Open a scope frame; a parameter list collected since `dec_fun` is
    /// drained into it.
    fn start_scope(&mut self) {
        self.scopes.enter_scope();

        if self.pending_params.is_empty() {
            return;
        }

        let params = std::mem::take(&mut self.pending_params);
        for param in &params {
            let binding = if param.array {
                Binding::ParamArray {
                    address: param.address,
                }
            } else {
                Binding::ParamVariable {
                    address: param.address,
                }
            };
            self.scopes.define(&param.name, binding);
        }

        if let Some(function) = self.current_function.as_mut() {
            function.params = params.clone();
        }
        if let Some(name) = self.current_function.as_ref().map(|f| f.name.clone()) {
            self.scopes.set_function_params(&name, params);
        }
    }

    /// Patch the prologue with the function's word count and emit the
    /// epilogue jump through the return-address word.
    fn end_func(&mut self) {
        match self.current_function.take() {
            Some(function) => {
                let words = (self.data_ptr - self.function_base) / WORD_SIZE;
                self.patch(
                    function.entry,
                    Instruction::new(
                        Op::Assign,
                        [
                            Operand::Immediate(words as i64),
                            Operand::Direct(function.frame_size),
                        ],
                    ),
                );
                self.emit(Instruction::new(
                    Op::Jp,
                    [Operand::Indirect(function.return_address)],
                ));
            }
            None => self.error("function end without a function"),
        }
    }

    fn assign(&mut self) {
        let rhs = self.pop_operand();
        let eq = self.pop_operand();
        let lhs = self.pop_operand();

        if !matches!(eq, Operand::Lexeme(ref op) if op == "=") {
            self.error("malformed assignment");
        }

        self.emit(Instruction::new(Op::Assign, [rhs, lhs.clone()]));
        self.stack.push(lhs);
    }

    fn opera(&mut self) {
        let rhs = self.pop_operand();
        let operator = self.pop_operand();
        let lhs = self.pop_operand();

        let op = match operator {
            Operand::Lexeme(ref spelling) => match spelling.as_str() {
                "+" => Op::Add,
                "-" => Op::Sub,
                "*" => Op::Mult,
                "<" => Op::Lt,
                "==" => Op::Eq,
                other => {
                    self.error(format!("'{other}' is not an operator"));
                    Op::Add
                }
            },
            _ => {
                self.error("missing operator on the semantic stack");
                Op::Add
            }
        };

        let temp = self.alloc_temp();
        self.emit(Instruction::new(op, [lhs, rhs, Operand::Direct(temp)]));
        self.stack.push(Operand::Direct(temp));
    }

    /// Element address of an array access: `base + index * word size`,
    /// pushed as an indirect operand.
    fn parr(&mut self) {
        let index = self.pop_operand();
        let base = self.pop_operand();

        let temp = self.alloc_temp();
        self.emit(Instruction::new(
            Op::Mult,
            [
                index,
                Operand::Immediate(WORD_SIZE as i64),
                Operand::Direct(temp),
            ],
        ));
        self.emit(Instruction::new(
            Op::Add,
            [base, Operand::Direct(temp), Operand::Direct(temp)],
        ));
        self.stack.push(Operand::Indirect(temp));
    }

    fn save(&mut self) {
        let slot = self.emit(Instruction::placeholder());
        self.saves.push(slot);
    }

    fn fill_jpf(&mut self) {
        let condition = self.pop_operand();
        let Some(slot) = self.saves.pop() else {
            self.error("no saved instruction to patch");
            return;
        };

        let target = self.instructions.len();
        self.patch(
            slot,
            Instruction::new(Op::Jpf, [condition, Operand::Label(target)]),
        );
    }

    fn fill_jp(&mut self) {
        let Some(slot) = self.saves.pop() else {
            self.error("no saved instruction to patch");
            return;
        };

        let target = self.instructions.len();
        self.patch(slot, Instruction::new(Op::Jp, [Operand::Label(target)]));
    }

    /// At `else`: route the false edge past the jump reserved for skipping
    /// the else branch.
    fn ifc_action(&mut self) {
        let condition = self.pop_operand();
        let Some(slot) = self.saves.pop() else {
            self.error("no saved instruction to patch");
            return;
        };

        let over_else = self.emit(Instruction::placeholder());
        self.saves.push(over_else);
        self.patch(
            slot,
            Instruction::new(Op::Jpf, [condition, Operand::Label(over_else + 1)]),
        );
    }

    fn loop_top(&mut self) {
        self.loops.push(LoopFrame {
            top: self.instructions.len(),
            breaks: vec![],
        });
    }

    /// `repeat ... until (guard)`: jump back to the loop top while the guard
    /// is false, then resolve pending breaks to the exit.
    fn until(&mut self) {
        let guard = self.pop_operand();
        let Some(frame) = self.loops.pop() else {
            self.error("'until' without a matching 'repeat'");
            return;
        };

        self.emit(Instruction::new(
            Op::Jpf,
            [guard, Operand::Label(frame.top)],
        ));

        let exit = self.instructions.len();
        for slot in frame.breaks {
            self.patch(slot, Instruction::new(Op::Jp, [Operand::Label(exit)]));
        }
    }

    fn scope_break(&mut self) {
        if self.loops.is_empty() {
            self.error("no enclosing loop found for 'break'");
            return;
        }

        let slot = self.emit(Instruction::placeholder());
        if let Some(frame) = self.loops.last_mut() {
            frame.breaks.push(slot);
        }
    }

    /// Complete the innermost pending call: move the arguments into the
    /// parameter words, store the resume index and jump to the callee. The
    /// callee's return-value word was pushed by `pid` and stays on the stack
    /// as the call's value.
    fn call(&mut self) {
        let Some(frame) = self.calls.pop() else {
            self.error("no open call to complete");
            return;
        };

        let Some(info) = self.scopes.resolve_function(&frame.name).cloned() else {
            self.error(format!("'{}' is not callable", frame.name));
            return;
        };

        if frame.args.len() != info.params.len() {
            self.error(format!("mismatched arguments in call of '{}'", frame.name));
        }

        if info.builtin {
            if let Some(argument) = frame.args.into_iter().next() {
                self.emit(Instruction::new(Op::Print, [argument]));
            }
            return;
        }

        for (param, argument) in info.params.iter().zip(frame.args) {
            self.emit(Instruction::new(
                Op::Assign,
                [argument, Operand::Direct(param.address)],
            ));
        }

        let resume = self.instructions.len() + 2;
        self.emit(Instruction::new(
            Op::Assign,
            [
                Operand::Immediate(resume as i64),
                Operand::Direct(info.return_address),
            ],
        ));
        self.emit(Instruction::new(Op::Jp, [Operand::Label(info.entry)]));
    }

    fn fun_return(&mut self) {
        let value = self.pop_operand();
        let Some(function) = self.current_function.clone() else {
            self.error("'return' outside of any function");
            return;
        };

        self.emit(Instruction::new(
            Op::Assign,
            [value, Operand::Direct(function.return_value)],
        ));
        self.emit(Instruction::new(
            Op::Jp,
            [Operand::Indirect(function.return_address)],
        ));
    }

    fn function_return(&mut self) {
        let Some(function) = self.current_function.clone() else {
            self.error("'return' outside of any function");
            return;
        };

        self.emit(Instruction::new(
            Op::Jp,
            [Operand::Indirect(function.return_address)],
        ));
    }

    fn add_args(&mut self) {
        let value = self.pop_operand();
        match self.calls.last_mut() {
            Some(frame) => frame.args.push(value),
            None => self.error("argument outside of any call"),
        }
    }

    /// Drop the unused value of an expression statement.
    fn pop(&mut self) {
        if self.stack.pop().is_none() {
            self.error("missing operand on the semantic stack");
        }
    }

    fn start_program(&mut self) {
        self.entry_slot = Some(self.emit(Instruction::placeholder()));
    }

    fn end_program(&mut self) {
        let main = self.scopes.resolve_function("main").map(|info| info.entry);
        match (main, self.entry_slot) {
            (Some(entry), Some(slot)) => {
                self.patch(slot, Instruction::new(Op::Jp, [Operand::Label(entry)]));
            }
            (None, _) => self.error("'main' is not defined"),
            _ => {}
        }
    }

    fn pop_operand(&mut self) -> Operand {
        self.stack.pop().unwrap_or_else(|| {
            self.error("missing operand on the semantic stack");
            Operand::Immediate(0)
        })
    }

    fn pop_lexeme(&mut self) -> String {
        match self.stack.pop() {
            Some(Operand::Lexeme(lexeme)) => lexeme,
            Some(_) => {
                self.error("expected a name on the semantic stack");
                String::new()
            }
            None => {
                self.error("missing operand on the semantic stack");
                String::new()
            }
        }
    }

    fn alloc_data(&mut self) -> usize {
        let address = self.data_ptr;
        self.data_ptr += WORD_SIZE;
        address
    }

    fn alloc_temp(&mut self) -> usize {
        let address = self.temp_ptr;
        self.temp_ptr += WORD_SIZE;
        address
    }

    fn emit(&mut self, instruction: Instruction) -> usize {
        trace!("{} <- {instruction}", self.instructions.len());
        self.instructions.push(instruction);
        self.instructions.len() - 1
    }

    fn patch(&mut self, index: usize, instruction: Instruction) {
        match self.instructions.get_mut(index) {
            Some(slot) => *slot = instruction,
            None => self.error(format!("patch target {index} out of range")),
        }
    }

    fn error(&mut self, message: impl ToString) {
        self.errors.push(SemanticError {
            message: message.to_string(),
            lineno: self.lineno,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn generate(source: &str) -> Parser {
        let mut parser = Parser::new(source);
        parser.parse();
        parser
    }

    fn listing(parser: &Parser) -> Vec<String> {
        parser
            .codegen()
            .instructions()
            .iter()
            .map(|instruction| instruction.to_string())
            .collect()
    }

    #[test]
    fn test_assignment_with_addition() {
        let parser = generate("void main(void){ int x; x = 2 + 3; }");

        assert!(parser.codegen().errors().is_empty());
        assert_eq!(
            listing(&parser),
            vec![
                "(JP, 1, , )",
                "(ASSIGN, #1, 120, )",
                "(ADD, #2, #3, 500)",
                "(ASSIGN, 500, 124, )",
                "(JP, @116, , )",
            ]
        );
    }

    #[test]
    fn test_if_else_patches_both_jumps() {
        let parser = generate("int main(void){ int x; if (1<2) x=1; else x=2; }");

        assert!(parser.codegen().errors().is_empty());
        assert_eq!(
            listing(&parser),
            vec![
                "(JP, 1, , )",
                "(ASSIGN, #1, 120, )",
                "(LT, #1, #2, 500)",
                "(JPF, 500, 6, )",
                "(ASSIGN, #1, 124, )",
                "(JP, 7, , )",
                "(ASSIGN, #2, 124, )",
                "(JP, @116, , )",
            ]
        );
    }

    #[test]
    fn test_if_without_else_falls_through() {
        let parser = generate("void main(void){ int x; if (1<2) x=1; }");

        assert_eq!(
            listing(&parser),
            vec![
                "(JP, 1, , )",
                "(ASSIGN, #1, 120, )",
                "(LT, #1, #2, 500)",
                "(JPF, 500, 5, )",
                "(ASSIGN, #1, 124, )",
                "(JP, @116, , )",
            ]
        );
    }

    #[test]
    fn test_repeat_until_jumps_back_to_loop_top() {
        let parser =
            generate("void main(void){ int i; i = 0; repeat i = i + 1; until (10 < i) }");

        assert!(parser.codegen().errors().is_empty());
        assert_eq!(
            listing(&parser),
            vec![
                "(JP, 1, , )",
                "(ASSIGN, #1, 120, )",
                "(ASSIGN, #0, 124, )",
                "(ADD, 124, #1, 500)",
                "(ASSIGN, 500, 124, )",
                "(LT, #10, 124, 504)",
                "(JPF, 504, 3, )",
                "(JP, @116, , )",
            ]
        );
    }

    #[test]
    fn test_break_jumps_to_loop_exit() {
        let parser = generate("void main(void){ repeat break; until (1<2) }");

        assert!(parser.codegen().errors().is_empty());
        assert_eq!(
            listing(&parser),
            vec![
                "(JP, 1, , )",
                "(ASSIGN, #0, 120, )",
                "(JP, 5, , )",
                "(LT, #1, #2, 500)",
                "(JPF, 500, 2, )",
                "(JP, @116, , )",
            ]
        );
    }

    #[test]
    fn test_output_compiles_to_print() {
        let parser = generate("void main(void){ output(7); }");

        assert!(parser.codegen().errors().is_empty());
        assert!(listing(&parser).contains(&"(PRINT, #7, , )".to_string()));
    }

    #[test]
    fn test_call_moves_arguments_and_stores_resume_index() {
        let parser = generate("void print(int a){ output(a); } void main(void){ print(7); }");

        assert!(parser.codegen().errors().is_empty());
        assert_eq!(
            listing(&parser),
            vec![
                "(JP, 4, , )",
                "(ASSIGN, #1, 120, )",
                "(PRINT, 124, , )",
                "(JP, @116, , )",
                "(ASSIGN, #0, 136, )",
                "(ASSIGN, #7, 124, )",
                "(ASSIGN, #8, 116, )",
                "(JP, 1, , )",
                "(JP, @132, , )",
            ]
        );
    }

    #[test]
    fn test_array_access_computes_element_address() {
        let parser = generate("void main(void){ int a[3]; a[2] = 5; }");

        assert!(parser.codegen().errors().is_empty());
        assert_eq!(
            listing(&parser),
            vec![
                "(JP, 1, , )",
                "(ASSIGN, #3, 120, )",
                "(MULT, #2, #4, 500)",
                "(ADD, #124, 500, 500)",
                "(ASSIGN, #5, @500, )",
                "(JP, @116, , )",
            ]
        );
    }

    #[test]
    fn test_return_with_value() {
        let parser = generate("int one(void){ return 1; } void main(void){ int x; x = one(); }");

        let listing = listing(&parser);
        assert!(parser.codegen().errors().is_empty());
        // the value lands in the return-value word, then control jumps back
        assert!(listing.contains(&"(ASSIGN, #1, 112, )".to_string()));
        assert!(listing.contains(&"(JP, @116, , )".to_string()));
    }

    #[test]
    fn test_undeclared_identifier_is_reported_once() {
        let parser = generate("void main(void){ x = 1; x = 2; }");

        let errors = parser.codegen().errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "'x' is not defined");
        assert_eq!(errors[0].lineno, 1);
    }

    #[test]
    fn test_break_outside_loop_is_reported() {
        let parser = generate("void main(void){ break; }");

        let errors = parser.codegen().errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "no enclosing loop found for 'break'");
    }

    #[test]
    fn test_missing_main_is_reported() {
        let parser = generate("int x;");

        let errors = parser.codegen().errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "'main' is not defined");
        // the reserved entry slot stays an unpatched placeholder
        assert_eq!(parser.codegen().instructions()[0], Instruction::placeholder());
    }

    #[test]
    fn test_arity_mismatch_is_reported() {
        let parser = generate("void f(int a){ } void main(void){ f(); }");

        let messages: Vec<&str> = parser
            .codegen()
            .errors()
            .iter()
            .map(|error| error.message.as_str())
            .collect();
        assert!(messages.contains(&"mismatched arguments in call of 'f'"));
    }

    #[test]
    fn test_scope_shadowing_uses_innermost_address() {
        let parser = generate(
            "void main(void){ int x; x = 1; { int x; x = 2; } x = 3; }",
        );

        let listing = listing(&parser);
        assert!(parser.codegen().errors().is_empty());
        // outer x at 124, inner x at 128, outer again after the block
        assert!(listing.contains(&"(ASSIGN, #1, 124, )".to_string()));
        assert!(listing.contains(&"(ASSIGN, #2, 128, )".to_string()));
        assert!(listing.contains(&"(ASSIGN, #3, 124, )".to_string()));
    }

    #[test]
    fn test_line_markers_track_instruction_ranges() {
        let parser = generate("void main(void){\nint x;\nx = 1;\n}");

        let markers = parser.codegen().markers();
        assert!(markers.iter().any(|(lineno, _)| *lineno == 3));
        assert!(markers.windows(2).all(|pair| pair[0].1 <= pair[1].1));
    }

    #[test]
    fn test_halted_parser_stops_emitting() {
        let parser = generate("void main(void){ x =");

        let codegen = parser.codegen();
        // recovery gave up at end-of-input; nothing after the halt got emitted
        assert!(codegen.instructions().len() <= 2);
    }
}
