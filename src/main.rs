use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use chip8vm::{disassemble, Cadence, Chip8, Chip8Error, Config, Framebuffer, Quirks, PROGRAM_START};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Runs a CHIP-8 program in the terminal")]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions per second
    #[arg(long, default_value_t = 700.0)]
    ips: f64,

    /// Timer and display updates per second
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// 8XY6/8XYE copy VY into VX before shifting
    #[arg(long)]
    legacy_shift: bool,

    /// BNNN jumps to NNN + VX instead of NNN + V0
    #[arg(long)]
    modern_jump: bool,

    /// FX55/FX65 leave I unchanged
    #[arg(long)]
    modern_memory: bool,

    /// FX1E never touches VF
    #[arg(long)]
    no_index_overflow: bool,

    /// Seed for CXNN, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print the program listing and exit
    #[arg(long)]
    disassemble: bool,
}

#[derive(Debug, thiserror::Error)]
enum DriverError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Chip8(#[from] Chip8Error),
    #[error("rates must be finite, positive and give a period of at least 1ns")]
    Rate,
}

impl Args {
    fn config(&self) -> Config {
        let defaults = Quirks::default();
        Config {
            quirks: Quirks {
                shift_copies_vy: self.legacy_shift || defaults.shift_copies_vy,
                jump_uses_v0: !self.modern_jump && defaults.jump_uses_v0,
                memory_advances_index: !self.modern_memory && defaults.memory_advances_index,
                index_overflow_sets_vf: !self.no_index_overflow && defaults.index_overflow_sets_vf,
            },
            rng_seed: self.seed,
            ..Config::default()
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), DriverError> {
    let rom = std::fs::read(&args.rom)?;

    if args.disassemble {
        print_program(&rom)?;
        return Ok(());
    }

    let mut chip8 = Chip8::with_config(args.config())?;
    chip8.load_program(&rom)?;

    let mut processor_clock = Cadence::new(args.ips).ok_or(DriverError::Rate)?;
    let mut render_clock = Cadence::new(args.fps).ok_or(DriverError::Rate)?;
    let mut beeping = false;
    let mut last = Instant::now();

    loop {
        let now = Instant::now();
        let elapsed = now - last;
        last = now;

        for _ in 0..processor_clock.advance(elapsed) {
            chip8.tick()?;
        }

        let frames = render_clock.advance(elapsed);
        for _ in 0..frames {
            chip8.advance_timers();
        }
        if frames > 0 && chip8.display_changed() {
            render(chip8.framebuffer())?;
            chip8.reset_display_changed();
        }

        if chip8.sound_active() != beeping {
            beeping = chip8.sound_active();
            if beeping {
                print!("\x07");
                io::stdout().flush()?;
            }
        }

        std::thread::sleep(processor_clock.until_next().min(render_clock.until_next()));
    }
}

fn print_program(rom: &[u8]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (address, instruction) in disassemble(rom, PROGRAM_START) {
        match instruction {
            Ok(instruction) => writeln!(out, "{:#05x}  {}", address, instruction)?,
            Err(error) => writeln!(out, "{:#05x}  .word {:#06x}", address, error.opcode())?,
        }
    }
    Ok(())
}

fn render(framebuffer: &Framebuffer) -> io::Result<()> {
    let mut frame = String::with_capacity((framebuffer.width() + 1) * framebuffer.height() + 8);
    // clear terminal, cursor home
    frame.push_str("\x1B[2J\x1B[H");
    for row in framebuffer.rows() {
        frame.extend(row.iter().map(|&on| if on { '█' } else { ' ' }));
        frame.push('\n');
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(frame.as_bytes())?;
    out.flush()
}
