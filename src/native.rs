//! Native-method registry (spec §4.F): `"{class}.{method}"` → a host-side
//! callable, consulted as the fallback when a method has no `Code`
//! attribute. The descriptor is accepted for documentation/future overload
//! resolution but dispatch keys on name alone, per spec's embedding API.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::VmError;
use crate::value::Value;

type NativeFn = dyn Fn(&[Value]) -> Result<Option<Value>, VmError>;

pub struct NativeRegistry {
    natives: RefCell<HashMap<String, Box<NativeFn>>>,
}

impl Default for NativeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeRegistry {
    pub fn new() -> NativeRegistry {
        NativeRegistry { natives: RefCell::new(HashMap::new()) }
    }

    /// Registration is idempotent: binding the same `(class, method)` twice
    /// keeps the last writer.
    pub fn register(
        &self,
        class: &str,
        method: &str,
        f: impl Fn(&[Value]) -> Result<Option<Value>, VmError> + 'static,
    ) {
        self.natives.borrow_mut().insert(format!("{class}.{method}"), Box::new(f));
    }

    pub fn is_bound(&self, class: &str, method: &str) -> bool {
        self.natives.borrow().contains_key(&format!("{class}.{method}"))
    }

    pub fn call(&self, class: &str, method: &str, args: &[Value]) -> Option<Result<Option<Value>, VmError>> {
        let key = format!("{class}.{method}");
        let natives = self.natives.borrow();
        natives.get(&key).map(|f| f(args))
    }
}
