//! A small `javap`-style dumper: loads a class file and prints its
//! constant pool, fields, methods, and each method's raw `Code` bytes.
//! Ambient developer tooling only — not part of the embedding API.

use std::path::PathBuf;
use std::process::ExitCode;

use classfile::class_file::FieldInfo;
use classfile::{ClassFile, ConstantPool};
use clap::Parser;
use tracing::error;

#[derive(Parser)]
#[command(name = "jvmtool", about = "Inspect a JVM class file")]
struct Args {
    /// Path to a `.class` file.
    path: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let bytes = match std::fs::read(&args.path) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(path = %args.path.display(), %err, "could not read class file");
            return ExitCode::FAILURE;
        }
    };

    let class = match ClassFile::parse(&bytes) {
        Ok(class) => class,
        Err(err) => {
            error!(path = %args.path.display(), %err, "could not parse class file");
            return ExitCode::FAILURE;
        }
    };

    print_class(&class);
    ExitCode::SUCCESS
}

fn print_class(class: &ClassFile) {
    println!("class {} extends {}", class.name, class.super_name);
    println!("  minor/major: {}/{}", class.minor_version, class.major_version);
    println!("  access flags: {:?}", class.access_flags);
    println!("  constant pool: {} entries", class.constant_pool.len());

    println!("  fields ({}):", class.fields.len());
    for field in &class.fields {
        print_field(field);
    }

    println!("  methods ({}):", class.methods.len());
    for method in &class.methods {
        println!("    {:?} {} {}", method.access_flags, method.name, method.descriptor);
        match method.code() {
            Some(code) => {
                println!(
                    "      Code: max_stack={} max_locals={} bytes={}",
                    code.max_stack,
                    code.max_locals,
                    code.code.len()
                );
                print_disassembly(&code.code);
            }
            None => println!("      (native — no Code attribute)"),
        }
    }
}

fn print_field(field: &FieldInfo) {
    println!("    {:?} {} {}", field.access_flags, field.name, field.descriptor);
}

/// A readable but intentionally partial mnemonic table — just enough to
/// make a dumped method recognizable at a glance. The authoritative
/// opcode semantics live in the interpreter, not here.
fn mnemonic(opcode: u8) -> &'static str {
    match opcode {
        0x00 => "nop",
        0x01 => "aconst_null",
        0x02..=0x08 => "iconst",
        0x10 => "bipush",
        0x11 => "sipush",
        0x12 => "ldc",
        0x13 => "ldc_w",
        0x14 => "ldc2_w",
        0x15..=0x19 => "Xload",
        0x1A..=0x2D => "Xload_n",
        0x36..=0x3A => "Xstore",
        0x3B..=0x4E => "Xstore_n",
        0x57 => "pop",
        0x59 => "dup",
        0x5F => "swap",
        0x60..=0x73 => "arithmetic",
        0x84 => "iinc",
        0x99..=0xA6 => "comparison",
        0xA7 => "goto",
        0xAC..=0xB1 => "return",
        0xB2 => "getstatic",
        0xB3 => "putstatic",
        0xB4 => "getfield",
        0xB5 => "putfield",
        0xB6 => "invokevirtual",
        0xB7 => "invokespecial",
        0xB8 => "invokestatic",
        0xBB => "new",
        0xBC => "newarray",
        0xBD => "anewarray",
        0xBE => "arraylength",
        _ => "?",
    }
}

fn print_disassembly(code: &[u8]) {
    let mut offset = 0;
    while offset < code.len() {
        let opcode = code[offset];
        println!("        {offset:>4}: {:#04x}  {}", opcode, mnemonic(opcode));
        offset += 1;
    }
}

/// Resolves a pool entry to its textual form, for commands that want to
/// show a human-readable operand instead of a bare index.
#[allow(dead_code)]
fn resolve(class: &ClassFile, index: u16) -> String {
    ConstantPool::resolve_string(&class.constant_pool, index)
}
