use clap::{arg, crate_version, Command};
use dafsa_compiler::{compile, format, gperf};
use std::io::{Read, Write};

const RCH: &str = "unreachable was reached";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let long_help =
"Examples:
---------
Compile a dictionary to a raw byte array:    `dafsa-compiler -i suffixes.gperf -o suffixes.dafsa`
Compile a reversed dictionary to Rust source: `dafsa-compiler --reverse --format rust -i suffixes.gperf -o suffixes.rs`
Read from stdin, write to stdout:            `dafsa-compiler < suffixes.gperf > suffixes.dafsa`";

    let formats = ["raw", "rust"];

    let matches = Command::new("dafsa-compiler")
        .about("Compile a gperf-format dictionary into a DAFSA byte array")
        .after_long_help(long_help)
        .version(crate_version!())
        .arg(arg!(--reverse "reverse each name before compiling, for suffix dictionaries"))
        .arg(arg!(--format <FORMAT> "output shape").value_parser(formats).default_value("raw"))
        .arg(arg!(-i --input <PATH> "input gperf file, defaults to stdin").required(false))
        .arg(arg!(-o --output <PATH> "output path, defaults to stdout").required(false))
        .get_matches();

    let reverse = matches.get_flag("reverse");
    let format_kind = matches.get_one::<String>("format").expect(RCH);

    let mut text = String::new();
    match matches.get_one::<String>("input") {
        Some(path) => {
            text = std::fs::read_to_string(path)?;
        }
        None => {
            std::io::stdin().read_to_string(&mut text)?;
        }
    }

    let words = gperf::parse(&text, reverse)?;
    let bytes = compile(&words)?;
    let output = match format_kind.as_str() {
        "raw" => format::raw(&bytes),
        "rust" => format::rust_source(&bytes, "DAFSA").into_bytes(),
        _ => unreachable!("{}", RCH),
    };

    match matches.get_one::<String>("output") {
        Some(path) => std::fs::write(path, output)?,
        None => std::io::stdout().write_all(&output)?,
    }

    Ok(())
}
