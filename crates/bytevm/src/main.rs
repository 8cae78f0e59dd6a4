use anyhow::{Context, Result};
use bytevm::bytevm_core::{Flag, Registers, Width};
use bytevm::VmConfig;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!(
            "Usage: bytevm <program.bin> [max_steps]\n\
             The program is loaded at address 0 and runs until HLT (0xF4)."
        );
        std::process::exit(1);
    };

    let mut config = VmConfig::default();
    if let Some(max_steps) = args.next() {
        config.max_steps = max_steps
            .parse()
            .with_context(|| format!("invalid step budget '{max_steps}'"))?;
    }

    log::info!("Running program: '{}'", path);
    let program = std::fs::read(&path).with_context(|| format!("failed to read '{path}'"))?;
    let vm = bytevm::run(config, &program)?;

    println!("halted after {} instructions, eip=0x{:08X}", vm.steps(), vm.cpu.eip());
    for (index, value) in vm.cpu.regs.gpr.iter().enumerate() {
        println!("{:>3} = 0x{:08X}", Registers::name(index as u8, Width::Dword), value);
    }
    let flags: Vec<String> = [Flag::Carry, Flag::Zero, Flag::Sign, Flag::Overflow]
        .iter()
        .map(|flag| format!("{}={}", flag.name(), vm.cpu.get_flag(*flag) as u8))
        .collect();
    println!("{}", flags.join(" "));
    Ok(())
}
