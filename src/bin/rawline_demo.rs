//! Rawline Demo
//!
//! Reads lines from the terminal with rawline and echoes them back.
//! Used for trying the editor by hand without embedding it anywhere.
//!
//! Set `RAWLINE_TRACE=/tmp/rawline.log` to capture the editor's trace.

use std::io::{self, Read};
use std::process::ExitCode;

use rawline::terminal::{self, FdWriter, RawTerminal};
use rawline::{EditorConfig, Feed, Input, Session};

/// Command-line arguments
struct Args {
    /// Prompt shown before each line
    prompt: String,
    /// Terminal width; probed when not given
    columns: Option<usize>,
    /// JSON configuration file
    config: Option<String>,
    /// Use the kernel's idea of the width instead of probing
    ioctl_width: bool,
    /// Show help
    help: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            columns: None,
            config: None,
            ioctl_width: false,
            help: false,
        }
    }
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "-p" | "--prompt" => {
                i += 1;
                if i < argv.len() {
                    args.prompt = argv[i].clone();
                }
            },
            "-c" | "--columns" => {
                i += 1;
                if i < argv.len() {
                    args.columns = argv[i].parse().ok();
                }
            },
            "--config" => {
                i += 1;
                if i < argv.len() {
                    args.config = Some(argv[i].clone());
                }
            },
            "-w" | "--ioctl-width" => {
                args.ioctl_width = true;
            },
            "-h" | "--help" => {
                args.help = true;
            },
            _ => {},
        }
        i += 1;
    }

    args
}

fn print_help() {
    println!("rawline-demo - read lines with the rawline editor");
    println!();
    println!("USAGE:");
    println!("    rawline-demo [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -p, --prompt <TEXT>     Prompt to show (default: \"> \")");
    println!("    -c, --columns <N>       Terminal width (skips probing)");
    println!("    -w, --ioctl-width       Ask the kernel for the width (skips probing)");
    println!("        --config <FILE>     JSON editor configuration");
    println!("    -h, --help              Show this help");
    println!();
    println!("Ctrl-C or Ctrl-D on an empty line exits.");
}

fn read_line(args: &Args, config: &EditorConfig) -> rawline::Result<Feed> {
    let mut tty = RawTerminal::new(io::stdin());
    let mut out = FdWriter::new(io::stdout());

    let columns = args.columns.or_else(|| {
        if args.ioctl_width {
            terminal::window_columns(io::stdout())
        } else {
            None
        }
    });

    terminal::wrap(&mut tty, &mut out, |out| {
        let mut session = Session::with_config(out, config.clone());
        match columns {
            Some(columns) => session.start_with_columns(&args.prompt, columns)?,
            None => session.start(&args.prompt)?,
        }

        for byte in io::stdin().lock().bytes() {
            match session.feed(Input::Byte(byte?))? {
                Feed::Pending => {},
                feed => return Ok(feed),
            }
        }
        session.feed(Input::Eof)
    })
}

fn main() -> ExitCode {
    rawline::trace::init_from_env();

    let args = parse_args();
    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let config = match &args.config {
        Some(path) => match EditorConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            },
        },
        None => EditorConfig::default(),
    };

    loop {
        match read_line(&args, &config) {
            Ok(Feed::Done(line)) => println!("\r\nread: {:?}", line),
            Ok(Feed::Interrupted(line)) => {
                println!("\r\ninterrupted: {:?}", line);
                return ExitCode::from(130);
            },
            Ok(Feed::EndOfInput) | Ok(Feed::Pending) => {
                println!();
                return ExitCode::SUCCESS;
            },
            Err(e) => {
                tracing::error!("read failed: {}", e);
                eprintln!("\r\nError: {}", e);
                return ExitCode::FAILURE;
            },
        }
    }
}
