use std::env;
use std::process::ExitCode;

use mini_jvm::VM;

/// Thin command-line driver over the embedding API: `mini_jvm <search-dir>
/// <class> <method>` resolves `class`, runs `<clinit>` as a side effect,
/// and invokes `method` with no arguments.
fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let (Some(search_dir), Some(class_name), Some(method_name)) =
        (args.next(), args.next(), args.next())
    else {
        eprintln!("usage: mini_jvm <search-dir> <class> <method>");
        return ExitCode::FAILURE;
    };

    let vm = VM::new([search_dir]);
    match vm.call(&class_name, &method_name, &[]) {
        Ok(Some(value)) => {
            println!("{value:?}");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
