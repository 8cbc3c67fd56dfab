//! A minimal class-file assembler, the mirror image of [`crate::class_file`].
//! Exists only so tests (in this crate and in `mini_jvm`) can construct a
//! synthetic class artifact in-process instead of shipping a binary
//! `.class` fixture — no Java/Kotlin toolchain is available in this
//! environment to produce one (spec §8 "End-to-end scenarios").

enum PoolEntry {
    Utf8(String),
    Integer(i32),
    Class { name_index: u16 },
    String { string_index: u16 },
    FieldRef { class_index: u16, nat_index: u16 },
    MethodRef { class_index: u16, nat_index: u16 },
    NameAndType { name_index: u16, descriptor_index: u16 },
}

pub struct MethodSpec {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    pub code: Option<CodeSpec>,
}

pub struct CodeSpec {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code: Vec<u8>,
}

pub struct FieldSpec {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
}

pub struct ClassWriter {
    entries: Vec<PoolEntry>,
    fields: Vec<FieldSpec>,
    methods: Vec<MethodSpec>,
}

impl Default for ClassWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassWriter {
    pub fn new() -> ClassWriter {
        ClassWriter { entries: Vec::new(), fields: Vec::new(), methods: Vec::new() }
    }

    fn push(&mut self, entry: PoolEntry) -> u16 {
        self.entries.push(entry);
        self.entries.len() as u16 // index 1 .. n, placeholder occupies index 0 implicitly
    }

    pub fn utf8(&mut self, s: &str) -> u16 {
        if let Some(i) = self.entries.iter().position(|e| matches!(e, PoolEntry::Utf8(v) if v == s))
        {
            return (i + 1) as u16;
        }
        self.push(PoolEntry::Utf8(s.to_string()))
    }

    pub fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        self.push(PoolEntry::Class { name_index })
    }

    pub fn string(&mut self, s: &str) -> u16 {
        let string_index = self.utf8(s);
        self.push(PoolEntry::String { string_index })
    }

    pub fn integer(&mut self, v: i32) -> u16 {
        self.push(PoolEntry::Integer(v))
    }

    pub fn name_and_type(&mut self, name: &str, descriptor: &str) -> u16 {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);
        self.push(PoolEntry::NameAndType { name_index, descriptor_index })
    }

    pub fn field_ref(&mut self, class: &str, name: &str, descriptor: &str) -> u16 {
        let class_index = self.class(class);
        let nat_index = self.name_and_type(name, descriptor);
        self.push(PoolEntry::FieldRef { class_index, nat_index })
    }

    pub fn method_ref(&mut self, class: &str, name: &str, descriptor: &str) -> u16 {
        let class_index = self.class(class);
        let nat_index = self.name_and_type(name, descriptor);
        self.push(PoolEntry::MethodRef { class_index, nat_index })
    }

    pub fn add_field(&mut self, field: FieldSpec) {
        self.fields.push(field);
    }

    pub fn add_method(&mut self, method: MethodSpec) {
        self.methods.push(method);
    }

    pub fn finish(mut self, access_flags: u16, this_name: &str, super_name: &str) -> Vec<u8> {
        let this_index = self.class(this_name);
        let super_index = if super_name.is_empty() { 0 } else { self.class(super_name) };

        // Intern every field/method name, descriptor, and (if needed) the
        // "Code" attribute name before the constant pool is serialized —
        // the field/method tables below only ever look these up. Collected
        // into owned copies first since `utf8` needs `&mut self` and can't
        // run while `self.fields`/`self.methods` are borrowed.
        let field_strings: Vec<(String, String)> =
            self.fields.iter().map(|f| (f.name.clone(), f.descriptor.clone())).collect();
        for (name, descriptor) in &field_strings {
            self.utf8(name);
            self.utf8(descriptor);
        }
        let method_strings: Vec<(String, String, bool)> = self
            .methods
            .iter()
            .map(|m| (m.name.clone(), m.descriptor.clone(), m.code.is_some()))
            .collect();
        for (name, descriptor, has_code) in &method_strings {
            self.utf8(name);
            self.utf8(descriptor);
            if *has_code {
                self.utf8("Code");
            }
        }

        let mut out = Vec::new();
        out.extend_from_slice(&0xCAFEBABEu32.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes()); // minor
        out.extend_from_slice(&52u16.to_be_bytes()); // major

        out.extend_from_slice(&((self.entries.len() + 1) as u16).to_be_bytes());
        for entry in &self.entries {
            match entry {
                PoolEntry::Utf8(s) => {
                    out.push(1);
                    out.extend_from_slice(&(s.len() as u16).to_be_bytes());
                    out.extend_from_slice(s.as_bytes());
                }
                PoolEntry::Integer(v) => {
                    out.push(3);
                    out.extend_from_slice(&v.to_be_bytes());
                }
                PoolEntry::Class { name_index } => {
                    out.push(7);
                    out.extend_from_slice(&name_index.to_be_bytes());
                }
                PoolEntry::String { string_index } => {
                    out.push(8);
                    out.extend_from_slice(&string_index.to_be_bytes());
                }
                PoolEntry::FieldRef { class_index, nat_index } => {
                    out.push(9);
                    out.extend_from_slice(&class_index.to_be_bytes());
                    out.extend_from_slice(&nat_index.to_be_bytes());
                }
                PoolEntry::MethodRef { class_index, nat_index } => {
                    out.push(10);
                    out.extend_from_slice(&class_index.to_be_bytes());
                    out.extend_from_slice(&nat_index.to_be_bytes());
                }
                PoolEntry::NameAndType { name_index, descriptor_index } => {
                    out.push(12);
                    out.extend_from_slice(&name_index.to_be_bytes());
                    out.extend_from_slice(&descriptor_index.to_be_bytes());
                }
            }
        }

        out.extend_from_slice(&access_flags.to_be_bytes());
        out.extend_from_slice(&this_index.to_be_bytes());
        out.extend_from_slice(&super_index.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes()); // interfaces_count

        out.extend_from_slice(&(self.fields.len() as u16).to_be_bytes());
        for field in &self.fields {
            let name_index = self.utf8_existing(&field.name);
            let descriptor_index = self.utf8_existing(&field.descriptor);
            out.extend_from_slice(&field.access_flags.to_be_bytes());
            out.extend_from_slice(&name_index.to_be_bytes());
            out.extend_from_slice(&descriptor_index.to_be_bytes());
            out.extend_from_slice(&0u16.to_be_bytes()); // attributes_count
        }

        out.extend_from_slice(&(self.methods.len() as u16).to_be_bytes());
        for method in &self.methods {
            let name_index = self.utf8_existing(&method.name);
            let descriptor_index = self.utf8_existing(&method.descriptor);
            out.extend_from_slice(&method.access_flags.to_be_bytes());
            out.extend_from_slice(&name_index.to_be_bytes());
            out.extend_from_slice(&descriptor_index.to_be_bytes());
            match &method.code {
                Some(code) => {
                    out.extend_from_slice(&1u16.to_be_bytes()); // attributes_count
                    let code_name_index = self.utf8_existing("Code");
                    out.extend_from_slice(&code_name_index.to_be_bytes());
                    let mut body = Vec::new();
                    body.extend_from_slice(&code.max_stack.to_be_bytes());
                    body.extend_from_slice(&code.max_locals.to_be_bytes());
                    body.extend_from_slice(&(code.code.len() as u32).to_be_bytes());
                    body.extend_from_slice(&code.code);
                    body.extend_from_slice(&0u16.to_be_bytes()); // exception_table_length
                    body.extend_from_slice(&0u16.to_be_bytes()); // attributes_count
                    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
                    out.extend_from_slice(&body);
                }
                None => {
                    out.extend_from_slice(&0u16.to_be_bytes());
                }
            }
        }

        out.extend_from_slice(&0u16.to_be_bytes()); // class attributes_count
        out
    }

    /// Looks up a Utf8 constant that `finish` has already interned (either
    /// because it was passed to `utf8`/`class`/`string`/`*_ref` earlier, or
    /// by the interning pass just above). Read-only: by this point in
    /// assembly the pool is done growing.
    fn utf8_existing(&self, s: &str) -> u16 {
        self.entries
            .iter()
            .position(|e| matches!(e, PoolEntry::Utf8(v) if v == s))
            .map(|i| (i + 1) as u16)
            .unwrap_or(0)
    }
}
