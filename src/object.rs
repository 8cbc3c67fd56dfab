//! Runtime object model (spec §4.E). A class object is a per-class
//! singleton carrying the immutable parsed `ClassFile`, a link to its
//! super class object, and a mutable static-field map. An instance carries
//! a back-reference to its class object and a mutable instance-field map.
//! Both field maps are sparse: an unread field resolves to `Value::Null`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use classfile::ClassFile;

use crate::value::Value;

#[derive(Debug)]
pub struct ClassObject {
    pub class: ClassFile,
    pub super_class: Option<Rc<ClassObject>>,
    pub statics: RefCell<HashMap<String, Value>>,
}

impl ClassObject {
    /// Walks the super chain; a static inherited but never written on this
    /// class object still resolves through its declaring ancestor.
    pub fn get_static(&self, name: &str) -> Value {
        if let Some(value) = self.statics.borrow().get(name) {
            return value.clone();
        }
        match &self.super_class {
            Some(parent) => parent.get_static(name),
            None => Value::Null,
        }
    }

    pub fn set_static(&self, name: &str, value: Value) {
        self.statics.borrow_mut().insert(name.to_string(), value);
    }
}

#[derive(Debug)]
pub struct Instance {
    pub class: Rc<ClassObject>,
    pub fields: RefCell<HashMap<String, Value>>,
}

impl Instance {
    pub fn get_field(&self, name: &str) -> Value {
        self.fields.borrow().get(name).cloned().unwrap_or(Value::Null)
    }

    pub fn set_field(&self, name: &str, value: Value) {
        self.fields.borrow_mut().insert(name.to_string(), value);
    }
}
