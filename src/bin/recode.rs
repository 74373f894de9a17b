//! iconv-style character encoding converter.
//!
//! Usage:
//!   recode -f <from-encoding> -t <to-encoding> [file...]
//!   recode -l

use std::env;
use std::fs::File;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use recode::registry;

struct Options {
    from: Option<String>,
    to: Option<String>,
    output: Option<String>,
    inputs: Vec<String>,
    list: bool,
}

fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut opts = Options {
        from: None,
        to: None,
        output: None,
        inputs: Vec::new(),
        list: false,
    };
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-f" | "--from-code" => {
                opts.from = Some(
                    iter.next()
                        .ok_or("-f requires an encoding name")?
                        .clone(),
                );
            }
            "-t" | "--to-code" => {
                opts.to = Some(
                    iter.next()
                        .ok_or("-t requires an encoding name")?
                        .clone(),
                );
            }
            "-o" | "--output" => {
                opts.output = Some(iter.next().ok_or("-o requires a filename")?.clone());
            }
            "-l" | "--list" => opts.list = true,
            "-h" | "--help" => return Ok(None),
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {}", other));
            }
            file => opts.inputs.push(file.to_string()),
        }
    }
    Ok(Some(opts))
}

fn read_input(inputs: &[String]) -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    if inputs.is_empty() {
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| format!("reading stdin: {}", e))?;
    } else {
        for path in inputs {
            File::open(path)
                .and_then(|mut f| f.read_to_end(&mut buf))
                .map_err(|e| format!("reading {}: {}", path, e))?;
        }
    }
    Ok(buf)
}

fn write_output(output: Option<&str>, bytes: &[u8]) -> Result<(), String> {
    match output {
        Some(path) => File::create(path)
            .and_then(|mut f| f.write_all(bytes))
            .map_err(|e| format!("writing {}: {}", path, e)),
        None => io::stdout()
            .write_all(bytes)
            .map_err(|e| format!("writing stdout: {}", e)),
    }
}

fn run(opts: Options) -> Result<(), String> {
    if opts.list {
        let mut pairs: Vec<_> = registry::registry().pairs().collect();
        pairs.sort_unstable();
        println!("Supported conversions:");
        for (from, to) in pairs {
            println!("  {} -> {}", from, to);
        }
        return Ok(());
    }

    let from = opts.from.ok_or("Source encoding (-f) is required")?;
    let to = opts.to.ok_or("Target encoding (-t) is required")?;

    let input = read_input(&opts.inputs)?;
    let converted = registry::transcode(&input, &from, &to).map_err(|e| e.to_string())?;
    write_output(opts.output.as_deref(), &converted)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage(&args[0]);
        return ExitCode::from(1);
    }

    let opts = match parse_args(&args) {
        Ok(Some(opts)) => opts,
        Ok(None) => {
            print_usage(&args[0]);
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return ExitCode::from(1);
        }
    };

    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            ExitCode::from(1)
        }
    }
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} -f <from-encoding> -t <to-encoding> [file...]",
        program
    );
    eprintln!("       {} -l", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -f, --from-code <encoding>  Source encoding");
    eprintln!("  -t, --to-code <encoding>    Target encoding");
    eprintln!("  -o, --output <file>         Output file (default: stdout)");
    eprintln!("  -l, --list                  List supported conversion pairs");
    eprintln!("  -h, --help                  Show this help");
}
