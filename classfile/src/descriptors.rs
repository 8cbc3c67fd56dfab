//! [Descriptors](https://docs.oracle.com/javase/specs/jvms/se17/jvms17.pdf#%5B%7B%22num%22%3A677%2C%22gen%22%3A0%7D%2C%7B%22name%22%3A%22XYZ%22%7D%2C72%2C448%2Cnull%5D)
//!
//! A descriptor is a compact textual type signature, e.g. `(II)I` or
//! `(Ljava/lang/String;)V`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDescriptor {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    Object(String),
    Array(Box<FieldDescriptor>),
}

/// Parses a single field descriptor starting at `bytes[*pos]`, advancing
/// `pos` past it. Returns `None` on an unrecognized leading byte.
fn parse_field_descriptor(bytes: &[u8], pos: &mut usize) -> Option<FieldDescriptor> {
    let c = *bytes.get(*pos)?;
    *pos += 1;
    Some(match c {
        b'B' => FieldDescriptor::Byte,
        b'C' => FieldDescriptor::Char,
        b'D' => FieldDescriptor::Double,
        b'F' => FieldDescriptor::Float,
        b'I' => FieldDescriptor::Int,
        b'J' => FieldDescriptor::Long,
        b'S' => FieldDescriptor::Short,
        b'Z' => FieldDescriptor::Boolean,
        b'[' => FieldDescriptor::Array(Box::new(parse_field_descriptor(bytes, pos)?)),
        b'L' => {
            let start = *pos;
            while bytes.get(*pos).is_some_and(|b| *b != b';') {
                *pos += 1;
            }
            let name = String::from_utf8_lossy(&bytes[start..*pos]).into_owned();
            *pos += 1; // consume ';'
            FieldDescriptor::Object(name)
        }
        _ => return None,
    })
}

pub fn parse_field_type(descriptor: &str) -> Option<FieldDescriptor> {
    let bytes = descriptor.as_bytes();
    let mut pos = 0;
    let parsed = parse_field_descriptor(bytes, &mut pos)?;
    if pos == bytes.len() {
        Some(parsed)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub parameters: Vec<FieldDescriptor>,
    pub return_type: Option<FieldDescriptor>, // None means void
}

pub fn parse_method_descriptor(descriptor: &str) -> Option<MethodDescriptor> {
    let bytes = descriptor.as_bytes();
    if bytes.first() != Some(&b'(') {
        return None;
    }
    let mut pos = 1;
    let mut parameters = Vec::new();
    while bytes.get(pos) != Some(&b')') {
        parameters.push(parse_field_descriptor(bytes, &mut pos)?);
    }
    pos += 1; // consume ')'
    let return_type = if bytes.get(pos) == Some(&b'V') {
        None
    } else {
        Some(parse_field_descriptor(bytes, &mut pos)?)
    };
    Some(MethodDescriptor { parameters, return_type })
}

/// Descriptor argument counting (spec §4.G): scans from just after `(`;
/// every character counts one argument slot, except `L...;` counts one
/// slot for the whole run up to the matching `;`, and a run of `[` is
/// absorbed into the following argument without incrementing on its own.
/// Stops at `)`.
pub fn count_parameter_slots(descriptor: &str) -> usize {
    let bytes = descriptor.as_bytes();
    let Some(open) = bytes.iter().position(|b| *b == b'(') else {
        return 0;
    };
    let mut i = open + 1;
    let mut count = 0;
    while let Some(&c) = bytes.get(i) {
        match c {
            b')' => break,
            b'[' => {
                i += 1;
            }
            b'L' => {
                count += 1;
                i += 1;
                while bytes.get(i).is_some_and(|b| *b != b';') {
                    i += 1;
                }
                i += 1; // consume ';'
            }
            _ => {
                count += 1;
                i += 1;
            }
        }
    }
    count
}

/// Whether a method descriptor declares a `void` return type.
pub fn is_void_return(descriptor: &str) -> bool {
    descriptor.rsplit(')').next() == Some("V")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_simple_int_params() {
        assert_eq!(count_parameter_slots("(II)I"), 2);
    }

    #[test]
    fn counts_object_and_array_params_as_one_slot_each() {
        assert_eq!(count_parameter_slots("(Ljava/lang/String;I[I)V"), 3);
    }

    #[test]
    fn counts_no_params() {
        assert_eq!(count_parameter_slots("()V"), 0);
    }

    #[test]
    fn detects_void_return() {
        assert!(is_void_return("(I)V"));
        assert!(!is_void_return("(I)I"));
    }

    #[test]
    fn parses_method_descriptor() {
        let desc = parse_method_descriptor("(ILjava/lang/String;)[I").unwrap();
        assert_eq!(desc.parameters.len(), 2);
        assert_eq!(desc.parameters[0], FieldDescriptor::Int);
        assert_eq!(
            desc.parameters[1],
            FieldDescriptor::Object("java/lang/String".into())
        );
        assert_eq!(
            desc.return_type,
            Some(FieldDescriptor::Array(Box::new(FieldDescriptor::Int)))
        );
    }
}
