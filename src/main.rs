use go6502_core::config::{CpuConfig, RtsMode, UnknownOpcodePolicy};
use go6502_core::cpu::disasm::disassemble_range;
use go6502_core::cpu::opcodes::{JSR, RTS};
use go6502_core::cpu::{Cpu, RunExit, RESET_VECTOR};
use std::env;
use std::process;

const DEFAULT_CYCLES: i64 = 7;

struct Options {
    cycles: i64,
    image: Option<String>,
    org: Option<u16>,
    trace: bool,
    save_state: Option<String>,
    config: CpuConfig,
}

fn parse_u16_hex_or_dec(s: &str) -> Option<u16> {
    let s = s.trim();
    if let Some(stripped) = s.strip_prefix("0x").or_else(|| s.strip_prefix('$')) {
        u16::from_str_radix(stripped, 16).ok()
    } else {
        s.parse::<u16>().ok()
    }
}

fn usage(program: &str) {
    eprintln!(
        "Usage: {} [--cycles N] [--image FILE [--org ADDR]] [--strict] [--corrected-rts] [--trace] [--save-state FILE]",
        program
    );
    eprintln!("Without --image the JSR/RTS demo program is seeded at $FFFC.");
}

fn program_name(args: &[String]) -> &str {
    args.first().map_or("go6502", String::as_str)
}

fn value_for<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i + 1) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("{} requires a value", flag);
            process::exit(2);
        }
    }
}

/// The demo program always lives at the reset vector, so a custom origin
/// only makes sense with an image to put there.
fn check_options(opts: &Options) -> Result<(), String> {
    if opts.org.is_some() && opts.image.is_none() {
        return Err("--org requires --image".to_string());
    }
    Ok(())
}

fn parse_args() -> Options {
    let args: Vec<String> = env::args().collect();
    let program = program_name(&args);
    if args.iter().any(|a| a == "--help" || a == "-h") {
        usage(program);
        process::exit(0);
    }

    let mut opts = Options {
        cycles: DEFAULT_CYCLES,
        image: None,
        org: None,
        trace: false,
        save_state: None,
        config: CpuConfig::from_env(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--cycles" => {
                let v = value_for(&args, i, "--cycles");
                opts.cycles = v.parse().unwrap_or_else(|_| {
                    eprintln!("--cycles: not a number: {}", v);
                    process::exit(2);
                });
                i += 2;
            }
            "--image" => {
                opts.image = Some(value_for(&args, i, "--image").to_string());
                i += 2;
            }
            "--org" => {
                let v = value_for(&args, i, "--org");
                opts.org = Some(parse_u16_hex_or_dec(v).unwrap_or_else(|| {
                    eprintln!("--org: not a 16-bit address: {}", v);
                    process::exit(2);
                }));
                i += 2;
            }
            "--save-state" => {
                opts.save_state = Some(value_for(&args, i, "--save-state").to_string());
                i += 2;
            }
            "--strict" => {
                opts.config.unknown_opcode = UnknownOpcodePolicy::Halt;
                i += 1;
            }
            "--corrected-rts" => {
                opts.config.rts = RtsMode::Corrected;
                i += 1;
            }
            "--trace" => {
                opts.trace = true;
                i += 1;
            }
            s => {
                eprintln!("Unknown option: {}", s);
                usage(program);
                process::exit(2);
            }
        }
    }

    if let Err(msg) = check_options(&opts) {
        eprintln!("{}", msg);
        process::exit(2);
    }

    opts
}

fn run(opts: Options) -> Result<(), Box<dyn std::error::Error>> {
    let mut cpu = Cpu::with_config(opts.config);
    let start = opts.org.unwrap_or(RESET_VECTOR);
    cpu.reset_to_vector(start);

    match &opts.image {
        Some(path) => {
            let image = std::fs::read(path)?;
            log::info!("Loaded {} bytes from {} at ${:04X}", image.len(), path, start);
            cpu.memory.load(start, &image);
        }
        None => {
            cpu.memory.load(RESET_VECTOR, &[JSR, 0x42, 0x42]);
            cpu.memory.write(0x4242, RTS);
        }
    }

    if opts.trace {
        for line in disassemble_range(&cpu.memory, start, 32) {
            println!("{}", line);
        }
        println!();
    }

    match cpu.run(opts.cycles) {
        RunExit::BudgetExhausted => {}
        RunExit::Halted { opcode, address } => {
            println!("Halted on opcode ${:02X} at ${:04X}", opcode, address);
        }
    }

    println!("{}", cpu.register_dump());
    println!("Cycles left: {}", cpu.cycles());

    if let Some(path) = &opts.save_state {
        cpu.snapshot().save_to_file(path)?;
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let opts = parse_args();
    if let Err(e) = run(opts) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
