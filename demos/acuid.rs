//! Simple command that prints one or '-n count' unique identifiers

use std::{env, io, io::Write, net::Ipv4Addr, process::ExitCode};

use acuid::{Alphabet, Config, Generator};

#[derive(Debug, Default)]
struct Options {
    count: Option<usize>,
    config: Config,
    show_addr: bool,
}

fn main() -> io::Result<ExitCode> {
    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {message}");
                eprintln!(
                    "Usage: {} [-n count] [-l length] [-u] [-a]",
                    program.as_deref().unwrap_or("acuid")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let g = match Generator::new(&opts.config) {
        Ok(g) => g,
        Err(err) => {
            eprintln!("Error: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    if opts.show_addr {
        if let Ok(addr) = acuid::check_addr() {
            writeln!(buf, "host {}", Ipv4Addr::from(addr))?;
        }
    }
    for _ in 0..opts.count.unwrap_or(1) {
        writeln!(buf, "{}", g.unique())?;
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-u" => opts.config.alphabet = Alphabet::Mixed,
            "-a" => opts.show_addr = true,
            "-n" => {
                if opts.count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                opts.count = Some(parse_value(&mut args, 'n')?);
            }
            "-l" => opts.config.length = parse_value(&mut args, 'l')?,
            _ => return Err(format!("unrecognized argument '{arg}'")),
        }
    }
    Ok(opts)
}

fn parse_value(args: &mut impl Iterator<Item = String>, name: char) -> Result<usize, String> {
    let Some(value) = args.next() else {
        return Err(format!("argument to option '{name}' missing"));
    };
    let Ok(n) = value.parse() else {
        return Err(format!("invalid argument to option '{name}': '{value}'"));
    };
    Ok(n)
}
