use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;

use clap::{App, Arg};

use solfc::{cc, check, to_solfege, translate};

enum Action {
    /// Transpile, compile with the system C compiler, run the result.
    Build,
    /// Transpile and write the C file only.
    EmitC,
    /// Reverse mode: Brainfuck in, Solfege token text out.
    FromBf,
}

struct Options {
    action: Action,
    output: Option<String>,
    input: String,
    tape_size: i32,
    check: bool,
}

impl Options {
    fn match_options() -> Self {
        let matches = App::new("solfc")
            .version("0.1.0")
            .about("Solfege to C transpiler")
            .arg(
                Arg::with_name("emit_c")
                    .short("S")
                    .long("emit-c")
                    .help("Write the generated C file but do not compile or run it"),
            )
            .arg(
                Arg::with_name("from_bf")
                    .short("r")
                    .long("from-bf")
                    .help("Translate Brainfuck source to Solfege tokens")
                    .takes_value(true)
                    .empty_values(false)
                    .value_name("file"),
            )
            .arg(
                Arg::with_name("check")
                    .long("check")
                    .help("Validate block and print-statement balance before emitting"),
            )
            .arg(
                Arg::with_name("out_name")
                    .short("o")
                    .help("Output file name")
                    .takes_value(true)
                    .empty_values(false)
                    .value_name("file"),
            )
            .arg(
                Arg::with_name("tape_size")
                    .long("tape-size")
                    .help("Size of tape allocated by the generated program")
                    .takes_value(true)
                    .empty_values(false)
                    .default_value("30000")
                    .value_name("bytes"),
            )
            .arg(
                Arg::with_name("FILENAME")
                    .help("Solfege source file to translate")
                    .required_unless("from_bf")
                    .conflicts_with("from_bf")
                    .index(1),
            )
            .get_matches();

        let (action, input) = if let Some(bf_name) = matches.value_of("from_bf") {
            (Action::FromBf, bf_name.to_string())
        } else {
            let name = matches.value_of("FILENAME").unwrap().to_string();
            if matches.is_present("emit_c") {
                (Action::EmitC, name)
            } else {
                (Action::Build, name)
            }
        };

        Options {
            action,
            input,
            output: matches.value_of("out_name").map(str::to_string),
            tape_size: matches
                .value_of("tape_size")
                .unwrap()
                .parse::<i32>()
                .unwrap(),
            check: matches.is_present("check"),
        }
    }

    fn get_output<'a>(&'a self, default: &'a str) -> &'a str {
        match self.output.as_ref() {
            Some(output) => output,
            None => default,
        }
    }
}

fn main() -> io::Result<()> {
    let options = Options::match_options();

    let name = options.input.rsplitn(2, '.').last().unwrap();
    let mut file = File::open(&options.input)?;
    let mut source = String::new();
    file.read_to_string(&mut source)?;

    match options.action {
        Action::FromBf => {
            let output = to_solfege(&source);
            let def_name = format!("{}.sol", name);
            write_output(options.get_output(&def_name), &output)?;
        }
        Action::EmitC => {
            let output = translate_checked(&options, &source);
            let def_name = format!("{}.c", name);
            write_output(options.get_output(&def_name), &output)?;
        }
        Action::Build => {
            let output = translate_checked(&options, &source);
            let c_name = format!("{}.c", name);
            write_output(&c_name, &output)?;
            build_and_run(&c_name, options.get_output(name))?;
        }
    }

    Ok(())
}

fn translate_checked(options: &Options, source: &str) -> String {
    if options.check {
        if let Err(err) = check(source) {
            println!("Check error: {}", err);
            process::exit(1);
        }
    }
    translate(source, options.tape_size)
}

fn write_output(name: &str, data: &str) -> io::Result<()> {
    if Path::new(name).exists() {
        fs::remove_file(name)?;
    }

    let mut file = File::create(name)?;
    file.write_all(data.as_bytes())?;
    println!("Successfully wrote to {}", name);
    Ok(())
}

fn build_and_run(c_name: &str, out_name: &str) -> io::Result<()> {
    println!("Compiling...");
    if cc::compile(c_name, out_name)? != Some(0) {
        eprintln!("Error: C compiler failed on {}", c_name);
        process::exit(1);
    }

    println!("Running...");
    if let Some(code) = cc::run(out_name)? {
        if code != 0 {
            process::exit(code);
        }
    }

    Ok(())
}
