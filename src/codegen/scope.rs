//! Scoped symbol table of the code generator.
//!
//! Frames form a stack with the global scope at the bottom. Lookups walk
//! from the innermost frame backwards; leaving a scope discards all of its
//! bindings.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: String,
    pub address: usize,
    pub array: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    /// Data word the function's result is assigned into.
    pub return_value: usize,
    /// Data word holding the index to jump back to.
    pub return_address: usize,
    /// Data word the prologue patch writes the frame word count into.
    pub frame_size: usize,
    /// Instruction index of the reserved prologue slot; also the call target.
    pub entry: usize,
    pub params: Vec<ParamInfo>,
    pub builtin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Variable { address: usize },
    Array { address: usize },
    ParamVariable { address: usize },
    ParamArray { address: usize },
    Function(FunctionInfo),
}

#[derive(Debug, Clone, Default)]
struct Frame {
    bindings: HashMap<String, Binding>,
}

/// Stack of lexical frames; the bottom frame is the global scope.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_scope(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Drop the innermost frame. The global frame always stays.
    pub fn exit_scope(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind `name` in the innermost frame, shadowing any outer binding.
    pub fn define(&mut self, name: impl ToString, binding: Binding) {
        if let Some(frame) = self.frames.last_mut() {
            frame.bindings.insert(name.to_string(), binding);
        }
    }

    /// Find `name` walking the scope chain innermost first.
    pub fn resolve(&self, name: &str) -> Option<&Binding> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.bindings.get(name))
    }

    pub fn resolve_function(&self, name: &str) -> Option<&FunctionInfo> {
        match self.resolve(name) {
            Some(Binding::Function(info)) => Some(info),
            _ => None,
        }
    }

    /// Attach the collected parameter list to an already registered function.
    pub fn set_function_params(&mut self, name: &str, params: Vec<ParamInfo>) {
        for frame in self.frames.iter_mut().rev() {
            if let Some(Binding::Function(info)) = frame.bindings.get_mut(name) {
                info.params = params;
                return;
            }
        }
    }
}
