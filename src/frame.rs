//! Per-invocation activation record (spec §3 "Frame"): the class object
//! providing constant-pool context, the instruction pointer, the code
//! bytes, the local-variable array, and the operand stack. Frames do not
//! escape their invocation — they live on the Rust call stack.

use std::rc::Rc;

use crate::error::VmError;
use crate::object::ClassObject;
use crate::value::Value;

pub struct Frame {
    pub class: Rc<ClassObject>,
    pub code: Rc<[u8]>,
    pub ip: usize,
    pub locals: Vec<Value>,
    pub operand_stack: Vec<Value>,
}

impl Frame {
    pub fn push(&mut self, value: Value) {
        self.operand_stack.push(value);
    }

    pub fn pop(&mut self) -> Result<Value, VmError> {
        self.operand_stack.pop().ok_or_else(|| VmError::runtime("operand stack underflow"))
    }

    pub fn local(&self, slot: usize) -> Result<Value, VmError> {
        self.locals
            .get(slot)
            .cloned()
            .ok_or_else(|| VmError::runtime(format!("local slot {slot} out of bounds")))
    }

    pub fn set_local(&mut self, slot: usize, value: Value) -> Result<(), VmError> {
        let cell = self
            .locals
            .get_mut(slot)
            .ok_or_else(|| VmError::runtime(format!("local slot {slot} out of bounds")))?;
        *cell = value;
        Ok(())
    }
}
