use super::*;
use crate::config::UnknownOpcodePolicy;

#[cfg(test)]
mod additional_cpu_tests {
    use super::*;

    #[test]
    fn test_status_flag_bit_positions() {
        assert_eq!(StatusFlags::CARRY.bits(), 1 << 0);
        assert_eq!(StatusFlags::ZERO.bits(), 1 << 1);
        assert_eq!(StatusFlags::INTERRUPT_DISABLE.bits(), 1 << 2);
        assert_eq!(StatusFlags::DECIMAL.bits(), 1 << 3);
        assert_eq!(StatusFlags::BREAK.bits(), 1 << 4);
        assert_eq!(StatusFlags::UNUSED.bits(), 1 << 5);
        assert_eq!(StatusFlags::OVERFLOW.bits(), 1 << 6);
        assert_eq!(StatusFlags::NEGATIVE.bits(), 1 << 7);
    }

    #[test]
    fn test_set_if_never_clears() {
        let mut flags = StatusFlags::ZERO;

        flags.set_if(false, StatusFlags::ZERO);
        assert!(flags.contains(StatusFlags::ZERO));

        flags.set_if(false, StatusFlags::CARRY);
        assert!(!flags.contains(StatusFlags::CARRY));

        flags.set_if(true, StatusFlags::CARRY);
        assert_eq!(flags, StatusFlags::ZERO | StatusFlags::CARRY);
    }

    #[test]
    fn test_insert_remove_toggle() {
        let mut flags = StatusFlags::empty();

        flags.insert(StatusFlags::OVERFLOW);
        flags.insert(StatusFlags::DECIMAL);
        flags.remove(StatusFlags::OVERFLOW);
        assert_eq!(flags, StatusFlags::DECIMAL);

        // Removing an unset bit leaves the rest alone
        flags.remove(StatusFlags::CARRY);
        assert_eq!(flags, StatusFlags::DECIMAL);

        flags.toggle(StatusFlags::DECIMAL | StatusFlags::NEGATIVE);
        assert_eq!(flags, StatusFlags::NEGATIVE);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(StatusFlags::empty().to_string(), "--------");
        assert_eq!((StatusFlags::NEGATIVE | StatusFlags::ZERO).to_string(), "N-----Z-");
        assert_eq!(StatusFlags::all().to_string(), "NVUBDIZC");
    }

    #[test]
    fn test_lda_does_not_clear_stale_flags() {
        let mut cpu = setup_cpu();
        cpu.memory.load(RESET_VECTOR, &[LDA_IMMEDIATE, 0x00]);
        cpu.memory.load(0xFFFE, &[LDA_IMMEDIATE, 0x80]);
        cpu.memory.load(0x0000, &[LDA_IMMEDIATE, 0x01]);

        cpu.run(2);
        assert!(cpu.status.contains(StatusFlags::ZERO));

        cpu.run(2);
        assert_eq!(cpu.a, 0x80);
        assert!(cpu.status.contains(StatusFlags::ZERO));
        assert!(cpu.status.contains(StatusFlags::NEGATIVE));

        cpu.run(2);
        assert_eq!(cpu.a, 0x01);
        assert_eq!(cpu.status, StatusFlags::ZERO | StatusFlags::NEGATIVE);

        cpu.reset();
        assert!(cpu.status.is_empty());
    }

    #[test]
    fn test_halt_policy_stops_on_unknown_opcode() {
        let config = CpuConfig {
            unknown_opcode: UnknownOpcodePolicy::Halt,
            ..CpuConfig::default()
        };
        let mut cpu = setup_cpu_with(config);
        cpu.reset_to_vector(0x8000);
        cpu.memory.load(0x8000, &[LDA_IMMEDIATE, 0x05, 0xEA, LDA_IMMEDIATE, 0x06]);

        let exit = cpu.run(100);

        assert_eq!(exit, RunExit::Halted { opcode: 0xEA, address: 0x8002 });
        assert_eq!(cpu.a, 0x05);
        assert_eq!(cpu.pc, 0x8003);
        assert_eq!(cpu.cycles(), 97);
        assert!(logged("Halting on unknown opcode: 0xEA at PC: 0x8002"));
    }

    #[test]
    fn test_log_policy_runs_through_unknown_bytes() {
        let mut cpu = setup_cpu();
        cpu.reset_to_vector(0x8000);
        // Memory is zero past the program; $00 is unmapped here
        cpu.memory.load(0x8000, &[LDA_IMMEDIATE, 0x05]);

        let exit = cpu.run(10);

        assert_eq!(exit, RunExit::BudgetExhausted);
        assert_eq!(cpu.a, 0x05);
        assert_eq!(cpu.pc, 0x800A);
        assert_eq!(cpu.cycles(), 0);
    }

    #[test]
    fn test_corrected_rts_nested_subroutines() {
        let mut cpu = setup_cpu_with(CpuConfig::corrected());
        cpu.reset_to_vector(0x0600);
        // main: JSR $0700 ; LDA #$01
        cpu.memory.load(0x0600, &[JSR, 0x00, 0x07, LDA_IMMEDIATE, 0x01]);
        // $0700: JSR $0800 ; RTS
        cpu.memory.load(0x0700, &[JSR, 0x00, 0x08, RTS]);
        // $0800: LDA #$AA ; RTS
        cpu.memory.load(0x0800, &[LDA_IMMEDIATE, 0xAA, RTS]);

        // 4 + 4 + 2 + 3 + 3 + 2
        let exit = cpu.run(18);

        assert_eq!(exit, RunExit::BudgetExhausted);
        assert_eq!(cpu.a, 0x01);
        assert_eq!(cpu.pc, 0x0605);
        assert_eq!(cpu.sp, 0xFF);
        assert_eq!(cpu.cycles(), 0);
    }

    #[test]
    fn test_register_dump() {
        let mut cpu = setup_cpu();
        cpu.a = 0x42;
        cpu.status.insert(StatusFlags::NEGATIVE);

        let dump = cpu.register_dump();

        assert_eq!(
            dump,
            "A: 42\nX: 00\nY: 00\nP: 80 N-------\nSP: FF\nPC: FFFC"
        );
    }

    #[test]
    fn test_default_cpu_starts_reset() {
        let cpu = Cpu::default();

        assert_eq!(cpu.pc, RESET_VECTOR);
        assert_eq!(cpu.sp, 0xFF);
        assert_eq!(cpu.cycles(), 0);
        assert_eq!(cpu.config(), CpuConfig::default());
    }
}
