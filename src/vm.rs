//! The embedding surface (spec §6): `VM::new`, `VM::register_native`,
//! `VM::call`, `VM::call_method`, `VM::class`. Internally: the class
//! registry (spec §4.D) — two-stage lookup, recursive super resolution,
//! and running `<clinit>` exactly once, before the triggering lookup
//! returns.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use classfile::access_flags::{ClassAccessFlags, MethodAccessFlags};
use classfile::class_file::MethodInfo;
use classfile::ClassFile;
use tracing::{debug, warn};

use crate::error::VmError;
use crate::frame::Frame;
use crate::interpreter;
use crate::native::NativeRegistry;
use crate::object::ClassObject;
use crate::value::Value;

pub struct VM {
    search_path: Vec<PathBuf>,
    classes: RefCell<HashMap<String, Rc<ClassObject>>>,
    natives: NativeRegistry,
}

impl VM {
    /// Constructs a VM with the root class (`java/lang/Object`)
    /// pre-registered, a single no-op `<init>()V` bound through the same
    /// native-registry fallback every other native uses, so constructor
    /// chains terminate (spec §4.D).
    pub fn new(search_path: impl IntoIterator<Item = impl Into<PathBuf>>) -> VM {
        let vm = VM {
            search_path: search_path.into_iter().map(Into::into).collect(),
            classes: RefCell::new(HashMap::new()),
            natives: NativeRegistry::new(),
        };
        vm.register_native("java/lang/Object", "<init>", "()V", |_args| Ok(None));
        vm
    }

    /// `registerNative(className, methodName, descriptor, fn)` (spec §6):
    /// binds a host callable. If `className` has no backing class file
    /// (a purely host-provided class, such as the pre-registered root or
    /// a logging bridge), this also declares the method signature on a
    /// synthetic class object so dispatch can find it — the same fallback
    /// `java/lang/Object`'s `<init>` uses. A class already loaded from a
    /// real file, or one that already declares this exact signature, is
    /// left untouched.
    pub fn register_native(
        &self,
        class: &str,
        method: &str,
        descriptor: &str,
        f: impl Fn(&[Value]) -> Result<Option<Value>, VmError> + 'static,
    ) {
        self.natives.register(class, method, f);

        let mut classes = self.classes.borrow_mut();
        let already_declared = classes
            .get(class)
            .is_some_and(|c| c.class.method(method, descriptor).is_some());
        if already_declared {
            return;
        }

        let (mut methods, super_class) = classes
            .get(class)
            .map(|c| (c.class.methods.clone(), c.super_class.clone()))
            .unwrap_or_default();
        methods.push(MethodInfo {
            access_flags: MethodAccessFlags::PUBLIC | MethodAccessFlags::NATIVE,
            name: method.to_string(),
            descriptor: descriptor.to_string(),
            attributes: Vec::new(),
        });
        let class_file = ClassFile {
            minor_version: 0,
            major_version: 52,
            constant_pool: Vec::new(),
            access_flags: ClassAccessFlags::PUBLIC,
            name: class.to_string(),
            super_name: String::new(),
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods,
            attributes: Vec::new(),
        };
        classes.insert(
            class.to_string(),
            Rc::new(ClassObject { class: class_file, super_class, statics: RefCell::new(HashMap::new()) }),
        );
    }

    /// `class(name) -> classObject or error` (spec §6): exposes resolution
    /// directly, running `<clinit>` as a side effect on first call.
    pub fn class(&self, name: &str) -> Result<Rc<ClassObject>, VmError> {
        self.resolve(name)
    }

    pub fn classes(&self) -> Vec<Rc<ClassObject>> {
        self.classes.borrow().values().cloned().collect()
    }

    /// `call(className, methodName, args…)` (spec §6): resolves the class
    /// and picks the first method with that name (descriptor ignored).
    pub fn call(&self, class_name: &str, method_name: &str, args: &[Value]) -> Result<Option<Value>, VmError> {
        let class = self.resolve(class_name)?;
        self.call_method(&class, method_name, "", args)
    }

    /// `callMethod(classObject, methodName, descriptor, args…)` (spec §6):
    /// as `call`, but on an already-resolved class, with descriptor
    /// discrimination.
    pub fn call_method(
        &self,
        class: &Rc<ClassObject>,
        method_name: &str,
        descriptor: &str,
        args: &[Value],
    ) -> Result<Option<Value>, VmError> {
        let (owner, method) = find_method(class, method_name, descriptor).ok_or_else(|| {
            VmError::dispatch(class.class.name.clone(), method_name, "no such method")
        })?;
        self.invoke(&owner, &method, args)
    }

    pub(crate) fn resolve(&self, name: &str) -> Result<Rc<ClassObject>, VmError> {
        if let Some(existing) = self.classes.borrow().get(name) {
            return Ok(existing.clone());
        }

        for dir in &self.search_path {
            let path = dir.join(format!("{name}.class"));
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(_) => continue,
            };
            let class_file = match ClassFile::parse(&bytes) {
                Ok(class_file) => class_file,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unparsable class, trying next search path entry");
                    continue;
                }
            };

            let super_class = if class_file.super_name.is_empty() {
                None
            } else {
                Some(self.resolve(&class_file.super_name)?)
            };

            let class_object = Rc::new(ClassObject {
                class: class_file,
                super_class,
                statics: RefCell::new(HashMap::new()),
            });
            // Registered before <clinit> runs so a class that references
            // itself during static initialization observes a (partially
            // initialized) class object instead of recursing forever.
            self.classes.borrow_mut().insert(name.to_string(), class_object.clone());
            debug!(class = name, path = %path.display(), "loaded class");

            if let Some(clinit) = class_object.class.method("<clinit>", "()V") {
                let clinit = clinit.clone();
                self.invoke(&class_object, &clinit, &[])?;
            }
            return Ok(class_object);
        }

        Err(VmError::resolution(name, "not found on any search path entry"))
    }

    pub(crate) fn invoke(
        &self,
        owner: &Rc<ClassObject>,
        method: &MethodInfo,
        args: &[Value],
    ) -> Result<Option<Value>, VmError> {
        match method.code() {
            Some(code) => {
                let mut locals = vec![Value::Null; code.max_locals as usize];
                for (slot, arg) in args.iter().enumerate() {
                    if let Some(cell) = locals.get_mut(slot) {
                        *cell = arg.clone();
                    }
                }
                let mut frame = Frame {
                    class: owner.clone(),
                    code: Rc::from(code.code.as_slice()),
                    ip: 0,
                    locals,
                    operand_stack: Vec::with_capacity(code.max_stack as usize),
                };
                interpreter::run(self, &mut frame)
            }
            None => self
                .natives
                .call(&owner.class.name, &method.name, args)
                .unwrap_or_else(|| {
                    Err(VmError::dispatch(
                        owner.class.name.clone(),
                        method.name.clone(),
                        "no Code attribute and no native binding",
                    ))
                }),
        }
    }
}

/// Climbs the super chain looking for a method by name (and, when
/// non-empty, descriptor) — needed for inherited methods such as
/// `java/lang/Object`'s `<init>`.
fn find_method(class: &Rc<ClassObject>, name: &str, descriptor: &str) -> Option<(Rc<ClassObject>, MethodInfo)> {
    let mut current = Some(class.clone());
    while let Some(candidate) = current {
        if let Some(method) = candidate.class.method(name, descriptor) {
            return Some((candidate.clone(), method.clone()));
        }
        current = candidate.super_class.clone();
    }
    None
}
