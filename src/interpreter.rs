//! The dispatch loop (spec §4.G): reads `opcode = code[ip]`, executes it
//! against the frame's operand stack and locals, and advances `ip` to the
//! next instruction. Control-transfer opcodes set `ip` to the resolved
//! target directly rather than replicating the reference loop's
//! "subtract the operand width, let the trailing increment cancel it"
//! bias arithmetic — the net effect on `ip` is identical, this is just the
//! same computation written so the target address is visible at the call
//! site instead of folded into an off-by-one trick.

use std::cell::RefCell;
use std::rc::Rc;

use classfile::descriptors::{count_parameter_slots, is_void_return};
use classfile::ConstantPool;
use tracing::trace;

use crate::error::VmError;
use crate::frame::Frame;
use crate::object::Instance;
use crate::value::Value;
use crate::vm::VM;

mod op {
    pub const NOP: u8 = 0x00;
    pub const ACONST_NULL: u8 = 0x01;
    pub const ICONST_M1: u8 = 0x02;
    pub const ICONST_0: u8 = 0x03;
    pub const ICONST_5: u8 = 0x08;
    pub const LCONST_0: u8 = 0x09;
    pub const LCONST_1: u8 = 0x0A;
    pub const FCONST_0: u8 = 0x0B;
    pub const FCONST_1: u8 = 0x0C;
    pub const FCONST_2: u8 = 0x0D;
    pub const DCONST_0: u8 = 0x0E;
    pub const DCONST_1: u8 = 0x0F;
    pub const BIPUSH: u8 = 0x10;
    pub const SIPUSH: u8 = 0x11;
    pub const LDC: u8 = 0x12;
    pub const LDC_W: u8 = 0x13;
    pub const LDC2_W: u8 = 0x14;
    pub const ILOAD: u8 = 0x15;
    pub const ALOAD: u8 = 0x19;
    pub const ILOAD_0: u8 = 0x1A;
    pub const ALOAD_3: u8 = 0x2D;
    pub const IALOAD: u8 = 0x2E;
    pub const SALOAD: u8 = 0x35;
    pub const ISTORE: u8 = 0x36;
    pub const ASTORE: u8 = 0x3A;
    pub const ISTORE_0: u8 = 0x3B;
    pub const ASTORE_3: u8 = 0x4E;
    pub const IASTORE: u8 = 0x4F;
    pub const SASTORE: u8 = 0x56;
    pub const POP: u8 = 0x57;
    pub const DUP: u8 = 0x59;
    pub const SWAP: u8 = 0x5F;
    pub const IADD: u8 = 0x60;
    pub const LADD: u8 = 0x61;
    pub const FADD: u8 = 0x62;
    pub const DADD: u8 = 0x63;
    pub const ISUB: u8 = 0x64;
    pub const LSUB: u8 = 0x65;
    pub const FSUB: u8 = 0x66;
    pub const DSUB: u8 = 0x67;
    pub const IMUL: u8 = 0x68;
    pub const LMUL: u8 = 0x69;
    pub const FMUL: u8 = 0x6A;
    pub const DMUL: u8 = 0x6B;
    pub const IDIV: u8 = 0x6C;
    pub const LDIV: u8 = 0x6D;
    pub const FDIV: u8 = 0x6E;
    pub const DDIV: u8 = 0x6F;
    pub const IREM: u8 = 0x70;
    pub const LREM: u8 = 0x71;
    pub const FREM: u8 = 0x72;
    pub const DREM: u8 = 0x73;
    pub const IINC: u8 = 0x84;
    pub const I2L: u8 = 0x85;
    pub const I2F: u8 = 0x86;
    pub const I2D: u8 = 0x87;
    pub const L2I: u8 = 0x88;
    pub const L2F: u8 = 0x89;
    pub const L2D: u8 = 0x8A;
    pub const F2I: u8 = 0x8B;
    pub const F2L: u8 = 0x8C;
    pub const F2D: u8 = 0x8D;
    pub const D2I: u8 = 0x8E;
    pub const D2L: u8 = 0x8F;
    pub const D2F: u8 = 0x90;
    pub const I2B: u8 = 0x91;
    pub const I2C: u8 = 0x92;
    pub const I2S: u8 = 0x93;
    pub const LCMP: u8 = 0x94;
    pub const FCMPL: u8 = 0x95;
    pub const FCMPG: u8 = 0x96;
    pub const DCMPL: u8 = 0x97;
    pub const DCMPG: u8 = 0x98;
    pub const IFEQ: u8 = 0x99;
    pub const IFNE: u8 = 0x9A;
    pub const IFLT: u8 = 0x9B;
    pub const IFGE: u8 = 0x9C;
    pub const IFGT: u8 = 0x9D;
    pub const IFLE: u8 = 0x9E;
    pub const IF_ICMPEQ: u8 = 0x9F;
    pub const IF_ICMPNE: u8 = 0xA0;
    pub const IF_ICMPLT: u8 = 0xA1;
    pub const IF_ICMPGE: u8 = 0xA2;
    pub const IF_ICMPGT: u8 = 0xA3;
    pub const IF_ICMPLE: u8 = 0xA4;
    pub const IF_ACMPEQ: u8 = 0xA5;
    pub const IF_ACMPNE: u8 = 0xA6;
    pub const GOTO: u8 = 0xA7;
    pub const IRETURN: u8 = 0xAC;
    pub const LRETURN: u8 = 0xAD;
    pub const FRETURN: u8 = 0xAE;
    pub const DRETURN: u8 = 0xAF;
    pub const ARETURN: u8 = 0xB0;
    pub const RETURN: u8 = 0xB1;
    pub const GETSTATIC: u8 = 0xB2;
    pub const PUTSTATIC: u8 = 0xB3;
    pub const GETFIELD: u8 = 0xB4;
    pub const PUTFIELD: u8 = 0xB5;
    pub const INVOKEVIRTUAL: u8 = 0xB6;
    pub const INVOKESPECIAL: u8 = 0xB7;
    pub const INVOKESTATIC: u8 = 0xB8;
    pub const NEW: u8 = 0xBB;
    pub const NEWARRAY: u8 = 0xBC;
    pub const ANEWARRAY: u8 = 0xBD;
    pub const ARRAYLENGTH: u8 = 0xBE;
    pub const IFNULL: u8 = 0xC6;
    pub const IFNONNULL: u8 = 0xC7;
}

fn read_u8(code: &[u8], at: usize) -> u8 {
    code.get(at).copied().unwrap_or(0)
}

fn read_u16(code: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([read_u8(code, at), read_u8(code, at + 1)])
}

fn read_i16(code: &[u8], at: usize) -> i16 {
    read_u16(code, at) as i16
}

/// Resolves `(class-index, name-and-type-index)` behind a `FieldRef` or
/// `MethodRef` pool entry into `(class name, member name, descriptor)`
/// (spec §4.G "Field/method references" common prologue).
fn resolve_member_ref(
    pool: &[ConstantPool],
    index: u16,
    opcode: u8,
) -> Result<(String, String, String), VmError> {
    let (class_index, nat_index) = match pool.get(index as usize) {
        Some(
            ConstantPool::FieldRef { class_index, name_and_type_index }
            | ConstantPool::MethodRef { class_index, name_and_type_index }
            | ConstantPool::InterfaceMethodRef { class_index, name_and_type_index },
        ) => (*class_index, *name_and_type_index),
        _ => {
            return Err(VmError::runtime_at(opcode, format!("pool index {index} is not a member reference")))
        }
    };
    let class_name = ConstantPool::resolve_string(pool, class_index);
    let (name_index, descriptor_index) = match pool.get(nat_index as usize) {
        Some(ConstantPool::NameAndType { name_index, descriptor_index }) => {
            (*name_index, *descriptor_index)
        }
        _ => {
            return Err(VmError::runtime_at(opcode, format!("pool index {nat_index} is not a NameAndType")))
        }
    };
    let member_name = ConstantPool::resolve_string(pool, name_index);
    let descriptor = ConstantPool::resolve_string(pool, descriptor_index);
    Ok((class_name, member_name, descriptor))
}

fn load_constant(frame: &mut Frame, index: u16, opcode: u8) -> Result<(), VmError> {
    let pool = &frame.class.class.constant_pool;
    let value = match pool.get(index as usize) {
        Some(ConstantPool::Integer(v)) => Value::Int(*v),
        Some(ConstantPool::Float(v)) => Value::Float(*v),
        Some(ConstantPool::String { .. }) | Some(ConstantPool::Class { .. }) => {
            Value::Str(Rc::from(ConstantPool::resolve_string(pool, index)))
        }
        _ => return Err(VmError::runtime_at(opcode, format!("pool index {index} is not loadable"))),
    };
    frame.push(value);
    Ok(())
}

fn load_constant_wide(frame: &mut Frame, index: u16, opcode: u8) -> Result<(), VmError> {
    let pool = &frame.class.class.constant_pool;
    let value = match pool.get(index as usize) {
        Some(ConstantPool::Long(v)) => Value::Long(*v),
        Some(ConstantPool::Double(v)) => Value::Double(*v),
        _ => return Err(VmError::runtime_at(opcode, format!("pool index {index} is not a wide constant"))),
    };
    frame.push(value);
    Ok(())
}

/// Runs `frame` to completion: a `Returned` terminal state (spec §4.G
/// "State machine") maps to `Ok(value)`; a dispatch/runtime fault maps to
/// `Err`.
pub fn run(vm: &VM, frame: &mut Frame) -> Result<Option<Value>, VmError> {
    use op::*;

    loop {
        let code = frame.code.clone();
        let Some(&opcode) = code.get(frame.ip) else {
            return Err(VmError::runtime("instruction pointer ran past the end of code"));
        };
        let start = frame.ip;
        trace!(ip = start, opcode, "dispatch");

        match opcode {
            NOP => frame.ip += 1,
            ACONST_NULL => {
                frame.push(Value::Null);
                frame.ip += 1;
            }
            ICONST_M1 => {
                frame.push(Value::Int(-1));
                frame.ip += 1;
            }
            ICONST_0..=ICONST_5 => {
                frame.push(Value::Int((opcode - ICONST_0) as i32));
                frame.ip += 1;
            }
            LCONST_0 => {
                frame.push(Value::Long(0));
                frame.ip += 1;
            }
            LCONST_1 => {
                frame.push(Value::Long(1));
                frame.ip += 1;
            }
            FCONST_0 => {
                frame.push(Value::Float(0.0));
                frame.ip += 1;
            }
            FCONST_1 => {
                frame.push(Value::Float(1.0));
                frame.ip += 1;
            }
            FCONST_2 => {
                frame.push(Value::Float(2.0));
                frame.ip += 1;
            }
            DCONST_0 => {
                frame.push(Value::Double(0.0));
                frame.ip += 1;
            }
            DCONST_1 => {
                frame.push(Value::Double(1.0));
                frame.ip += 1;
            }
            BIPUSH => {
                let v = read_u8(&code, start + 1) as i8;
                frame.push(Value::Int(v as i32));
                frame.ip += 2;
            }
            SIPUSH => {
                let v = read_i16(&code, start + 1);
                frame.push(Value::Int(v as i32));
                frame.ip += 3;
            }
            LDC => {
                let index = read_u8(&code, start + 1) as u16;
                load_constant(frame, index, opcode)?;
                frame.ip += 2;
            }
            LDC_W => {
                let index = read_u16(&code, start + 1);
                load_constant(frame, index, opcode)?;
                frame.ip += 3;
            }
            LDC2_W => {
                let index = read_u16(&code, start + 1);
                load_constant_wide(frame, index, opcode)?;
                frame.ip += 3;
            }
            ILOAD..=ALOAD => {
                let slot = read_u8(&code, start + 1) as usize;
                frame.push(frame.local(slot)?);
                frame.ip += 2;
            }
            ILOAD_0..=ALOAD_3 => {
                let slot = ((opcode - ILOAD_0) % 4) as usize;
                frame.push(frame.local(slot)?);
                frame.ip += 1;
            }
            IALOAD..=SALOAD => {
                let index = frame.pop()?.as_int()?;
                let array = frame.pop()?.as_array()?;
                let element = array
                    .borrow()
                    .get(index as usize)
                    .cloned()
                    .ok_or_else(|| VmError::runtime_at(opcode, format!("array index {index} out of bounds")))?;
                frame.push(element);
                frame.ip += 1;
            }
            ISTORE..=ASTORE => {
                let slot = read_u8(&code, start + 1) as usize;
                let value = frame.pop()?;
                frame.set_local(slot, value)?;
                frame.ip += 2;
            }
            ISTORE_0..=ASTORE_3 => {
                let slot = ((opcode - ISTORE_0) % 4) as usize;
                let value = frame.pop()?;
                frame.set_local(slot, value)?;
                frame.ip += 1;
            }
            IASTORE..=SASTORE => {
                let value = frame.pop()?;
                let index = frame.pop()?.as_int()?;
                let array = frame.pop()?.as_array()?;
                let mut array = array.borrow_mut();
                if index < 0 || index as usize >= array.len() {
                    return Err(VmError::runtime_at(opcode, format!("array index {index} out of bounds")));
                }
                array[index as usize] = value;
                frame.ip += 1;
            }
            POP => {
                frame.pop()?;
                frame.ip += 1;
            }
            DUP => {
                let top = frame.pop()?;
                frame.push(top.clone());
                frame.push(top);
                frame.ip += 1;
            }
            SWAP => {
                let b = frame.pop()?;
                let a = frame.pop()?;
                frame.push(b);
                frame.push(a);
                frame.ip += 1;
            }
            IADD => binop_int(frame, |a, b| a.wrapping_add(b))?,
            ISUB => binop_int(frame, |a, b| a.wrapping_sub(b))?,
            IMUL => binop_int(frame, |a, b| a.wrapping_mul(b))?,
            IDIV => {
                let b = frame.pop()?.as_int()?;
                let a = frame.pop()?.as_int()?;
                if b == 0 {
                    return Err(VmError::runtime_at(opcode, "division by zero"));
                }
                frame.push(Value::Int(a.wrapping_div(b)));
                frame.ip += 1;
            }
            IREM => {
                let b = frame.pop()?.as_int()?;
                let a = frame.pop()?.as_int()?;
                if b == 0 {
                    return Err(VmError::runtime_at(opcode, "division by zero"));
                }
                frame.push(Value::Int(a.wrapping_rem(b)));
                frame.ip += 1;
            }
            LADD => binop_long(frame, |a, b| a.wrapping_add(b))?,
            LSUB => binop_long(frame, |a, b| a.wrapping_sub(b))?,
            LMUL => binop_long(frame, |a, b| a.wrapping_mul(b))?,
            LDIV => {
                let b = frame.pop()?.as_long()?;
                let a = frame.pop()?.as_long()?;
                if b == 0 {
                    return Err(VmError::runtime_at(opcode, "division by zero"));
                }
                frame.push(Value::Long(a.wrapping_div(b)));
                frame.ip += 1;
            }
            LREM => {
                let b = frame.pop()?.as_long()?;
                let a = frame.pop()?.as_long()?;
                if b == 0 {
                    return Err(VmError::runtime_at(opcode, "division by zero"));
                }
                frame.push(Value::Long(a.wrapping_rem(b)));
                frame.ip += 1;
            }
            FADD => binop_float(frame, |a, b| a + b)?,
            FSUB => binop_float(frame, |a, b| a - b)?,
            FMUL => binop_float(frame, |a, b| a * b)?,
            FDIV => binop_float(frame, |a, b| a / b)?,
            FREM => binop_float(frame, |a, b| a % b)?,
            DADD => binop_double(frame, |a, b| a + b)?,
            DSUB => binop_double(frame, |a, b| a - b)?,
            DMUL => binop_double(frame, |a, b| a * b)?,
            DDIV => binop_double(frame, |a, b| a / b)?,
            DREM => binop_double(frame, |a, b| a % b)?,
            IINC => {
                let slot = read_u8(&code, start + 1) as usize;
                let delta = read_u8(&code, start + 2) as i8 as i32;
                let current = frame.local(slot)?.as_int()?;
                frame.set_local(slot, Value::Int(current.wrapping_add(delta)))?;
                frame.ip += 3;
            }
            I2L => {
                let v = frame.pop()?.as_int()?;
                frame.push(Value::Long(v as i64));
                frame.ip += 1;
            }
            I2F => {
                let v = frame.pop()?.as_int()?;
                frame.push(Value::Float(v as f32));
                frame.ip += 1;
            }
            I2D => {
                let v = frame.pop()?.as_int()?;
                frame.push(Value::Double(v as f64));
                frame.ip += 1;
            }
            L2I => {
                let v = frame.pop()?.as_long()?;
                frame.push(Value::Int(v as i32));
                frame.ip += 1;
            }
            L2F => {
                let v = frame.pop()?.as_long()?;
                frame.push(Value::Float(v as f32));
                frame.ip += 1;
            }
            L2D => {
                let v = frame.pop()?.as_long()?;
                frame.push(Value::Double(v as f64));
                frame.ip += 1;
            }
            F2I => {
                let v = frame.pop()?.as_float()?;
                frame.push(Value::Int(v as i32));
                frame.ip += 1;
            }
            F2L => {
                let v = frame.pop()?.as_float()?;
                frame.push(Value::Long(v as i64));
                frame.ip += 1;
            }
            F2D => {
                let v = frame.pop()?.as_float()?;
                frame.push(Value::Double(v as f64));
                frame.ip += 1;
            }
            D2I => {
                let v = frame.pop()?.as_double()?;
                frame.push(Value::Int(v as i32));
                frame.ip += 1;
            }
            D2L => {
                let v = frame.pop()?.as_double()?;
                frame.push(Value::Long(v as i64));
                frame.ip += 1;
            }
            D2F => {
                let v = frame.pop()?.as_double()?;
                frame.push(Value::Float(v as f32));
                frame.ip += 1;
            }
            I2B => {
                let v = frame.pop()?.as_int()?;
                frame.push(Value::Int(v as i8 as i32));
                frame.ip += 1;
            }
            I2C => {
                let v = frame.pop()?.as_int()?;
                frame.push(Value::Int((v as u16) as i32));
                frame.ip += 1;
            }
            I2S => {
                let v = frame.pop()?.as_int()?;
                frame.push(Value::Int(v as i16 as i32));
                frame.ip += 1;
            }
            LCMP => {
                let b = frame.pop()?.as_long()?;
                let a = frame.pop()?.as_long()?;
                frame.push(Value::Int(a.cmp(&b) as i32));
                frame.ip += 1;
            }
            FCMPL | FCMPG => {
                let b = frame.pop()?.as_float()?;
                let a = frame.pop()?.as_float()?;
                frame.push(Value::Int(float_cmp(a as f64, b as f64, opcode == FCMPG)));
                frame.ip += 1;
            }
            DCMPL | DCMPG => {
                let b = frame.pop()?.as_double()?;
                let a = frame.pop()?.as_double()?;
                frame.push(Value::Int(float_cmp(a, b, opcode == DCMPG)));
                frame.ip += 1;
            }
            IFEQ | IFNE | IFLT | IFGE | IFGT | IFLE => {
                let v = frame.pop()?.as_int()?;
                let taken = match opcode {
                    IFEQ => v == 0,
                    IFNE => v != 0,
                    IFLT => v < 0,
                    IFGE => v >= 0,
                    IFGT => v > 0,
                    _ => v <= 0,
                };
                branch(frame, &code, start, taken)?;
            }
            IF_ICMPEQ..=IF_ICMPLE => {
                let b = frame.pop()?.as_int()?;
                let a = frame.pop()?.as_int()?;
                let taken = match opcode {
                    IF_ICMPEQ => a == b,
                    IF_ICMPNE => a != b,
                    IF_ICMPLT => a < b,
                    IF_ICMPGE => a >= b,
                    IF_ICMPGT => a > b,
                    _ => a <= b,
                };
                branch(frame, &code, start, taken)?;
            }
            IF_ACMPEQ | IF_ACMPNE => {
                let b = frame.pop()?;
                let a = frame.pop()?;
                let taken = if opcode == IF_ACMPEQ { a.reference_eq(&b) } else { !a.reference_eq(&b) };
                branch(frame, &code, start, taken)?;
            }
            IFNULL | IFNONNULL => {
                let v = frame.pop()?;
                let taken = if opcode == IFNULL { v.is_null() } else { !v.is_null() };
                branch(frame, &code, start, taken)?;
            }
            GOTO => {
                let offset = read_i16(&code, start + 1);
                frame.ip = (start as i64 + offset as i64) as usize;
            }
            IRETURN | FRETURN | LRETURN | DRETURN | ARETURN => {
                return Ok(Some(frame.pop()?));
            }
            RETURN => return Ok(None),
            GETSTATIC | PUTSTATIC | GETFIELD | PUTFIELD => {
                let index = read_u16(&code, start + 1);
                let (class_name, member_name, _descriptor) =
                    resolve_member_ref(&frame.class.class.constant_pool, index, opcode)?;
                let target = vm.resolve(&class_name)?;
                match opcode {
                    GETSTATIC => frame.push(target.get_static(&member_name)),
                    PUTSTATIC => {
                        let value = frame.pop()?;
                        target.set_static(&member_name, value);
                    }
                    GETFIELD => {
                        let instance = frame.pop()?.as_instance()?;
                        frame.push(instance.get_field(&member_name));
                    }
                    _ => {
                        let value = frame.pop()?;
                        let instance = frame.pop()?.as_instance()?;
                        instance.set_field(&member_name, value);
                    }
                }
                frame.ip = start + 3;
            }
            INVOKEVIRTUAL | INVOKESPECIAL | INVOKESTATIC => {
                let index = read_u16(&code, start + 1);
                let (class_name, member_name, descriptor) =
                    resolve_member_ref(&frame.class.class.constant_pool, index, opcode)?;
                let argc = count_parameter_slots(&descriptor);
                let mut args = Vec::with_capacity(argc + 1);
                let mut positional = Vec::with_capacity(argc);
                for _ in 0..argc {
                    positional.push(frame.pop()?);
                }
                positional.reverse();
                if opcode != INVOKESTATIC {
                    args.push(frame.pop()?);
                }
                args.extend(positional);

                let target = vm.resolve(&class_name)?;
                let result = vm.call_method(&target, &member_name, &descriptor, &args)?;
                if !is_void_return(&descriptor) {
                    if let Some(value) = result {
                        frame.push(value);
                    }
                }
                frame.ip = start + 3;
            }
            NEW => {
                let index = read_u16(&code, start + 1);
                let class_name = match frame.class.class.constant_pool.get(index as usize) {
                    Some(ConstantPool::Class { name_index }) => {
                        ConstantPool::resolve_string(&frame.class.class.constant_pool, *name_index)
                    }
                    _ => return Err(VmError::runtime_at(opcode, format!("pool index {index} is not a class"))),
                };
                let class = vm.resolve(&class_name)?;
                let instance = Instance { class, fields: RefCell::new(Default::default()) };
                frame.push(Value::Instance(Rc::new(instance)));
                frame.ip = start + 3;
            }
            NEWARRAY => {
                let count = frame.pop()?.as_int()?;
                frame.push(Value::Array(Rc::new(RefCell::new(vec![Value::Null; count.max(0) as usize]))));
                frame.ip = start + 2;
            }
            ANEWARRAY => {
                let count = frame.pop()?.as_int()?;
                frame.push(Value::Array(Rc::new(RefCell::new(vec![Value::Null; count.max(0) as usize]))));
                frame.ip = start + 3;
            }
            ARRAYLENGTH => {
                let array = frame.pop()?.as_array()?;
                let len = array.borrow().len() as i32;
                frame.push(Value::Int(len));
                frame.ip += 1;
            }
            other => {
                return Err(VmError::runtime_at(other, "unhandled opcode"));
            }
        }
    }
}

fn branch(frame: &mut Frame, code: &[u8], start: usize, taken: bool) -> Result<(), VmError> {
    if taken {
        let offset = read_i16(code, start + 1);
        frame.ip = (start as i64 + offset as i64) as usize;
    } else {
        frame.ip = start + 3;
    }
    Ok(())
}

fn binop_int(frame: &mut Frame, f: impl Fn(i32, i32) -> i32) -> Result<(), VmError> {
    let b = frame.pop()?.as_int()?;
    let a = frame.pop()?.as_int()?;
    frame.push(Value::Int(f(a, b)));
    frame.ip += 1;
    Ok(())
}

fn binop_long(frame: &mut Frame, f: impl Fn(i64, i64) -> i64) -> Result<(), VmError> {
    let b = frame.pop()?.as_long()?;
    let a = frame.pop()?.as_long()?;
    frame.push(Value::Long(f(a, b)));
    frame.ip += 1;
    Ok(())
}

fn binop_float(frame: &mut Frame, f: impl Fn(f32, f32) -> f32) -> Result<(), VmError> {
    let b = frame.pop()?.as_float()?;
    let a = frame.pop()?.as_float()?;
    frame.push(Value::Float(f(a, b)));
    frame.ip += 1;
    Ok(())
}

fn binop_double(frame: &mut Frame, f: impl Fn(f64, f64) -> f64) -> Result<(), VmError> {
    let b = frame.pop()?.as_double()?;
    let a = frame.pop()?.as_double()?;
    frame.push(Value::Double(f(a, b)));
    frame.ip += 1;
    Ok(())
}

/// `FCMPL`/`DCMPL` push `-1` when either operand is NaN; `FCMPG`/`DCMPG`
/// push `+1`. Otherwise both push the ordinary three-way comparison.
fn float_cmp(a: f64, b: f64, nan_is_greater: bool) -> i32 {
    match a.partial_cmp(&b) {
        Some(std::cmp::Ordering::Less) => -1,
        Some(std::cmp::Ordering::Equal) => 0,
        Some(std::cmp::Ordering::Greater) => 1,
        None => {
            if nan_is_greater {
                1
            } else {
                -1
            }
        }
    }
}
