use std::io;
use std::process::Command;

/// Invokes the system C compiler on a generated source file. Returns the
/// compiler's exit code; the caller decides what a bad status means.
pub fn compile(c_name: &str, out_name: &str) -> io::Result<Option<i32>> {
    Ok(Command::new("cc")
        .arg(c_name)
        .arg("-o")
        .arg(out_name)
        .spawn()?
        .wait()?
        .code())
}

/// Runs an executable produced by `compile`, inheriting stdio.
pub fn run(exe_name: &str) -> io::Result<Option<i32>> {
    let path = if exe_name.contains('/') {
        exe_name.to_string()
    } else {
        format!("./{}", exe_name)
    };

    Ok(Command::new(path).spawn()?.wait()?.code())
}
