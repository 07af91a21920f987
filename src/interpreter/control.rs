//! Non-local control flow, modeled as an out-of-band signal rather than
//! Rust panics or exceptions (§4.4).

use crate::interpreter::value::Value;

pub enum ControlFlow {
    /// Normal fall-through; keep executing the enclosing block.
    Continue,
    /// `give back [expr] .` inside a function or method body.
    Return(Value),
    /// `stop .` inside a loop body.
    Break,
    /// `skip .` inside a loop body.
    Skip,
}
