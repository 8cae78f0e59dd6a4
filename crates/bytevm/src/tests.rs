use crate::{run, DecodeError, Step, Vm, VmConfig, DEFAULT_MEMORY_SIZE};
use bytevm_core::cpu::{EAX, EBX, ECX, ESP};
use bytevm_core::{Flag, Memory, Mnemonic, Width};

fn small_config() -> VmConfig {
    VmConfig::builder().memory_size(0x1000).build()
}

fn vm_with(program: &[u8]) -> Vm {
    Vm::new(small_config(), program).unwrap()
}

#[test]
fn runs_a_mixed_program_to_hlt() {
    #[rustfmt::skip]
    let program = [
        0xB8, 0x05, 0x00, 0x00, 0x00, // mov eax, 5
        0xBB, 0x03, 0x00, 0x00, 0x00, // mov ebx, 3
        0x01, 0xD8,                   // add eax, ebx
        0x83, 0xE8, 0x02,             // sub eax, 2
        0x83, 0xE0, 0xFE,             // and eax, 0xFE
        0xB1, 0xF0,                   // mov cl, 0xF0
        0x80, 0xF1, 0x0F,             // xor cl, 0x0F
        0xF7, 0xD8,                   // neg eax
        0xF7, 0xD3,                   // not ebx
        0xA3, 0x00, 0x01, 0x00, 0x00, // mov [0x100], eax
        0x66, 0xB8, 0x34, 0x12,       // mov ax, 0x1234
        0xEB, 0x01,                   // jmp +1
        0xFF,                         // skipped
        0xF4,                         // hlt
    ];

    let mut vm = run(small_config(), &program).unwrap();

    assert!(vm.is_halted());
    assert_eq!(vm.steps(), 12);
    assert_eq!(vm.cpu.eip(), 40);
    assert_eq!(vm.cpu.regs.read(EAX, Width::Dword), 0xFFFF_1234);
    assert_eq!(vm.cpu.regs.read(EBX, Width::Dword), 0xFFFF_FFFC);
    assert_eq!(vm.cpu.regs.read(ECX, Width::Byte), 0xFF);
    assert_eq!(vm.mem.read(0x100, Width::Dword), 0xFFFF_FFFA);
    // neg of a non-zero operand clears CF
    assert!(!vm.cpu.get_flag(Flag::Carry));
}

#[test]
fn shared_opcode_resolves_to_the_encoded_mnemonic() {
    // 80 /4: and al, 0x0F, after SUB/ADD/OR candidates declined it
    let mut vm = vm_with(&[0xB0, 0xF3, 0x80, 0xE0, 0x0F, 0xF4]);
    assert_eq!(vm.step().unwrap(), Step::Executed(Mnemonic::Mov));
    assert_eq!(vm.step().unwrap(), Step::Executed(Mnemonic::And));
    assert_eq!(vm.cpu.regs.read(EAX, Width::Byte), 0x03);
    assert_eq!(vm.cpu.eip(), 5);

    // F6 /0: test cl, 0x80; F7 /3: neg ecx
    let mut vm = vm_with(&[0xF6, 0xC1, 0x80, 0xF7, 0xD9, 0xF4]);
    vm.cpu.regs.write(ECX, Width::Dword, 0x80);
    assert_eq!(vm.step().unwrap(), Step::Executed(Mnemonic::Test));
    assert!(vm.cpu.get_flag(Flag::Sign));
    assert_eq!(vm.step().unwrap(), Step::Executed(Mnemonic::Neg));
    assert_eq!(vm.cpu.regs.read(ECX, Width::Dword), 0xFFFF_FF80);
    assert_eq!(vm.step().unwrap(), Step::Halted);
}

#[test]
fn unsupported_extension_exhausts_candidates() {
    // 80 /2 is ADC, which has no handler.
    let mut vm = vm_with(&[0x80, 0xD0, 0x01]);
    let before = vm.cpu.clone();

    let err = vm.step().unwrap_err();

    assert_eq!(
        err.downcast_ref::<DecodeError>(),
        Some(&DecodeError::NoMatchingHandler {
            opcode: 0x80,
            extension: 2,
            eip: 0
        })
    );
    assert_eq!(vm.cpu, before);
}

#[test]
fn unknown_opcode_leaves_eip_on_the_instruction() {
    let mut vm = vm_with(&[0x66, 0x0F, 0x05]);
    let err = vm.step().unwrap_err();
    assert_eq!(
        err.downcast_ref::<DecodeError>(),
        Some(&DecodeError::UnknownOpcode { opcode: 0x0F, eip: 0 })
    );
    assert_eq!(vm.cpu.eip(), 0);
}

#[test]
fn operand_size_prefix_selects_word_operands() {
    #[rustfmt::skip]
    let program = [
        0xB8, 0xFF, 0xFF, 0x00, 0x00, // mov eax, 0xFFFF
        0x66, 0x05, 0x01, 0x00,       // add ax, 1
        0xF4,
    ];
    let vm = run(small_config(), &program).unwrap();
    assert_eq!(vm.cpu.regs.read(EAX, Width::Dword), 0x0000_0000);
    assert!(vm.cpu.get_flag(Flag::Zero));
    assert!(vm.cpu.get_flag(Flag::Overflow));
}

#[test]
fn memory_operands_through_modrm() {
    #[rustfmt::skip]
    let program = [
        0xC7, 0x05, 0x00, 0x02, 0x00, 0x00, 0x78, 0x56, 0x34, 0x12, // mov dword [0x200], 0x12345678
        0xBB, 0x00, 0x02, 0x00, 0x00,                               // mov ebx, 0x200
        0x81, 0x03, 0x01, 0x00, 0x00, 0x00,                         // add dword [ebx], 1
        0x8A, 0x4B, 0x03,                                           // mov cl, [ebx+3]
        0xF4,
    ];
    let mut vm = run(small_config(), &program).unwrap();
    assert_eq!(vm.mem.read(0x200, Width::Dword), 0x1234_5679);
    assert_eq!(vm.cpu.regs.read(ECX, Width::Byte), 0x12);
}

#[test]
fn step_budget_is_enforced() {
    // jmp $
    let config = VmConfig::builder()
        .memory_size(0x100)
        .max_steps(10)
        .build();
    let mut vm = Vm::new(config, &[0xEB, 0xFE]).unwrap();

    assert!(vm.run().is_err());
    assert_eq!(vm.steps(), 10);
    assert_eq!(vm.cpu.eip(), 0);
}

#[test]
fn config_controls_layout() {
    let config = VmConfig::builder()
        .memory_size(0x2000)
        .load_address(0x400)
        .build();
    let vm = Vm::new(config, &[0xF4]).unwrap();
    assert_eq!(vm.cpu.eip(), 0x400);
    assert_eq!(vm.cpu.regs.read(ESP, Width::Dword), 0x2000);

    let config = VmConfig::builder().stack_pointer(0x800).build();
    assert_eq!(config.initial_esp(), 0x800);
    assert_eq!(config.memory_size, DEFAULT_MEMORY_SIZE);

    let config = VmConfig::builder().memory_size(0x10).build();
    assert!(Vm::new(config, &[0; 0x20]).is_err());
}

#[test]
fn register_destination_sub_keeps_operand_order() {
    #[rustfmt::skip]
    let program = [
        0xB8, 0x0A, 0x00, 0x00, 0x00, // mov eax, 10
        0xB9, 0x03, 0x00, 0x00, 0x00, // mov ecx, 3
        0x2B, 0xC1,                   // sub eax, ecx (eax = ecx - eax)
        0x83, 0xE1, 0xFF,             // and ecx, 0xFF (zero-extended)
        0xF4,
    ];
    let vm = run(small_config(), &program).unwrap();
    assert_eq!(vm.cpu.regs.read(EAX, Width::Dword), 0xFFFF_FFF9);
    assert_eq!(vm.cpu.regs.read(ECX, Width::Dword), 0x03);
    assert!(!vm.cpu.get_flag(Flag::Sign));
}
