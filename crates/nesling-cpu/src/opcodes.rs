//! Opcode decode tables.
//!
//! A single 256-entry table drives decode: each entry carries the
//! mnemonic, operation, addressing mode, base cycle cost and whether a
//! page crossing adds a cycle. Undocumented opcodes all collapse to a
//! two-cycle NOP and never halt execution.

/// Addressing modes of the 6502.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No operand.
    Imp,
    /// Operates on the accumulator.
    Acc,
    /// 8-bit constant follows the opcode.
    Imm,
    /// 8-bit zero-page address.
    Zp,
    /// Zero-page address + X, wrapping within the zero page.
    Zpx,
    /// Zero-page address + Y, wrapping within the zero page.
    Zpy,
    /// Signed 8-bit branch offset.
    Rel,
    /// 16-bit absolute address.
    Abs,
    /// Absolute + X.
    Abx,
    /// Absolute + Y.
    Aby,
    /// 16-bit pointer with the page-wrap bug (JMP only).
    Ind,
    /// (zp,X): pointer fetched from the zero page after adding X.
    Izx,
    /// (zp),Y: pointer fetched from the zero page, then Y added.
    Izy,
}

impl Mode {
    /// Operand bytes following the opcode.
    #[must_use]
    pub const fn operand_len(self) -> u16 {
        match self {
            Self::Imp | Self::Acc => 0,
            Self::Imm | Self::Zp | Self::Zpx | Self::Zpy | Self::Rel | Self::Izx | Self::Izy => 1,
            Self::Abs | Self::Abx | Self::Aby | Self::Ind => 2,
        }
    }
}

/// Executable operations (official instruction set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)] // Mnemonics are self-describing
pub enum Op {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx,
    Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp,
    Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay,
    Tsx, Txa, Txs, Tya,
}

/// One decode-table entry.
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    /// Mnemonic, for traces and disassembly.
    pub name: &'static str,
    /// Operation to execute.
    pub op: Op,
    /// Addressing mode.
    pub mode: Mode,
    /// Base cycle cost.
    pub cycles: u8,
    /// Whether an indexed read crossing a page costs one extra cycle.
    pub page_penalty: bool,
}

const fn op(name: &'static str, op: Op, mode: Mode, cycles: u8, page_penalty: bool) -> Opcode {
    Opcode {
        name,
        op,
        mode,
        cycles,
        page_penalty,
    }
}

/// Undocumented opcodes: observable two-cycle no-ops.
const ILLEGAL: Opcode = op("NOP", Op::Nop, Mode::Imp, 2, false);

/// The 256-entry decode table, indexed by opcode byte.
pub static OPCODES: [Opcode; 256] = {
    let mut t = [ILLEGAL; 256];

    // Flow control
    t[0x00] = op("BRK", Op::Brk, Mode::Imp, 7, false);
    t[0x20] = op("JSR", Op::Jsr, Mode::Abs, 6, false);
    t[0x40] = op("RTI", Op::Rti, Mode::Imp, 6, false);
    t[0x60] = op("RTS", Op::Rts, Mode::Imp, 6, false);
    t[0x4C] = op("JMP", Op::Jmp, Mode::Abs, 3, false);
    t[0x6C] = op("JMP", Op::Jmp, Mode::Ind, 5, false);

    // Branches: +1 when taken, +1 more when the target crosses a page.
    // Both penalties are applied by the branch handler itself.
    t[0x10] = op("BPL", Op::Bpl, Mode::Rel, 2, false);
    t[0x30] = op("BMI", Op::Bmi, Mode::Rel, 2, false);
    t[0x50] = op("BVC", Op::Bvc, Mode::Rel, 2, false);
    t[0x70] = op("BVS", Op::Bvs, Mode::Rel, 2, false);
    t[0x90] = op("BCC", Op::Bcc, Mode::Rel, 2, false);
    t[0xB0] = op("BCS", Op::Bcs, Mode::Rel, 2, false);
    t[0xD0] = op("BNE", Op::Bne, Mode::Rel, 2, false);
    t[0xF0] = op("BEQ", Op::Beq, Mode::Rel, 2, false);

    // Loads
    t[0xA9] = op("LDA", Op::Lda, Mode::Imm, 2, false);
    t[0xA5] = op("LDA", Op::Lda, Mode::Zp, 3, false);
    t[0xB5] = op("LDA", Op::Lda, Mode::Zpx, 4, false);
    t[0xAD] = op("LDA", Op::Lda, Mode::Abs, 4, false);
    t[0xBD] = op("LDA", Op::Lda, Mode::Abx, 4, true);
    t[0xB9] = op("LDA", Op::Lda, Mode::Aby, 4, true);
    t[0xA1] = op("LDA", Op::Lda, Mode::Izx, 6, false);
    t[0xB1] = op("LDA", Op::Lda, Mode::Izy, 5, true);
    t[0xA2] = op("LDX", Op::Ldx, Mode::Imm, 2, false);
    t[0xA6] = op("LDX", Op::Ldx, Mode::Zp, 3, false);
    t[0xB6] = op("LDX", Op::Ldx, Mode::Zpy, 4, false);
    t[0xAE] = op("LDX", Op::Ldx, Mode::Abs, 4, false);
    t[0xBE] = op("LDX", Op::Ldx, Mode::Aby, 4, true);
    t[0xA0] = op("LDY", Op::Ldy, Mode::Imm, 2, false);
    t[0xA4] = op("LDY", Op::Ldy, Mode::Zp, 3, false);
    t[0xB4] = op("LDY", Op::Ldy, Mode::Zpx, 4, false);
    t[0xAC] = op("LDY", Op::Ldy, Mode::Abs, 4, false);
    t[0xBC] = op("LDY", Op::Ldy, Mode::Abx, 4, true);

    // Stores (no page penalty: the dummy read is always paid)
    t[0x85] = op("STA", Op::Sta, Mode::Zp, 3, false);
    t[0x95] = op("STA", Op::Sta, Mode::Zpx, 4, false);
    t[0x8D] = op("STA", Op::Sta, Mode::Abs, 4, false);
    t[0x9D] = op("STA", Op::Sta, Mode::Abx, 5, false);
    t[0x99] = op("STA", Op::Sta, Mode::Aby, 5, false);
    t[0x81] = op("STA", Op::Sta, Mode::Izx, 6, false);
    t[0x91] = op("STA", Op::Sta, Mode::Izy, 6, false);
    t[0x86] = op("STX", Op::Stx, Mode::Zp, 3, false);
    t[0x96] = op("STX", Op::Stx, Mode::Zpy, 4, false);
    t[0x8E] = op("STX", Op::Stx, Mode::Abs, 4, false);
    t[0x84] = op("STY", Op::Sty, Mode::Zp, 3, false);
    t[0x94] = op("STY", Op::Sty, Mode::Zpx, 4, false);
    t[0x8C] = op("STY", Op::Sty, Mode::Abs, 4, false);

    // Register transfers
    t[0xAA] = op("TAX", Op::Tax, Mode::Imp, 2, false);
    t[0xA8] = op("TAY", Op::Tay, Mode::Imp, 2, false);
    t[0x8A] = op("TXA", Op::Txa, Mode::Imp, 2, false);
    t[0x98] = op("TYA", Op::Tya, Mode::Imp, 2, false);
    t[0xBA] = op("TSX", Op::Tsx, Mode::Imp, 2, false);
    t[0x9A] = op("TXS", Op::Txs, Mode::Imp, 2, false);

    // Stack
    t[0x48] = op("PHA", Op::Pha, Mode::Imp, 3, false);
    t[0x08] = op("PHP", Op::Php, Mode::Imp, 3, false);
    t[0x68] = op("PLA", Op::Pla, Mode::Imp, 4, false);
    t[0x28] = op("PLP", Op::Plp, Mode::Imp, 4, false);

    // Logic
    t[0x29] = op("AND", Op::And, Mode::Imm, 2, false);
    t[0x25] = op("AND", Op::And, Mode::Zp, 3, false);
    t[0x35] = op("AND", Op::And, Mode::Zpx, 4, false);
    t[0x2D] = op("AND", Op::And, Mode::Abs, 4, false);
    t[0x3D] = op("AND", Op::And, Mode::Abx, 4, true);
    t[0x39] = op("AND", Op::And, Mode::Aby, 4, true);
    t[0x21] = op("AND", Op::And, Mode::Izx, 6, false);
    t[0x31] = op("AND", Op::And, Mode::Izy, 5, true);
    t[0x09] = op("ORA", Op::Ora, Mode::Imm, 2, false);
    t[0x05] = op("ORA", Op::Ora, Mode::Zp, 3, false);
    t[0x15] = op("ORA", Op::Ora, Mode::Zpx, 4, false);
    t[0x0D] = op("ORA", Op::Ora, Mode::Abs, 4, false);
    t[0x1D] = op("ORA", Op::Ora, Mode::Abx, 4, true);
    t[0x19] = op("ORA", Op::Ora, Mode::Aby, 4, true);
    t[0x01] = op("ORA", Op::Ora, Mode::Izx, 6, false);
    t[0x11] = op("ORA", Op::Ora, Mode::Izy, 5, true);
    t[0x49] = op("EOR", Op::Eor, Mode::Imm, 2, false);
    t[0x45] = op("EOR", Op::Eor, Mode::Zp, 3, false);
    t[0x55] = op("EOR", Op::Eor, Mode::Zpx, 4, false);
    t[0x4D] = op("EOR", Op::Eor, Mode::Abs, 4, false);
    t[0x5D] = op("EOR", Op::Eor, Mode::Abx, 4, true);
    t[0x59] = op("EOR", Op::Eor, Mode::Aby, 4, true);
    t[0x41] = op("EOR", Op::Eor, Mode::Izx, 6, false);
    t[0x51] = op("EOR", Op::Eor, Mode::Izy, 5, true);
    t[0x24] = op("BIT", Op::Bit, Mode::Zp, 3, false);
    t[0x2C] = op("BIT", Op::Bit, Mode::Abs, 4, false);

    // Arithmetic
    t[0x69] = op("ADC", Op::Adc, Mode::Imm, 2, false);
    t[0x65] = op("ADC", Op::Adc, Mode::Zp, 3, false);
    t[0x75] = op("ADC", Op::Adc, Mode::Zpx, 4, false);
    t[0x6D] = op("ADC", Op::Adc, Mode::Abs, 4, false);
    t[0x7D] = op("ADC", Op::Adc, Mode::Abx, 4, true);
    t[0x79] = op("ADC", Op::Adc, Mode::Aby, 4, true);
    t[0x61] = op("ADC", Op::Adc, Mode::Izx, 6, false);
    t[0x71] = op("ADC", Op::Adc, Mode::Izy, 5, true);
    t[0xE9] = op("SBC", Op::Sbc, Mode::Imm, 2, false);
    t[0xE5] = op("SBC", Op::Sbc, Mode::Zp, 3, false);
    t[0xF5] = op("SBC", Op::Sbc, Mode::Zpx, 4, false);
    t[0xED] = op("SBC", Op::Sbc, Mode::Abs, 4, false);
    t[0xFD] = op("SBC", Op::Sbc, Mode::Abx, 4, true);
    t[0xF9] = op("SBC", Op::Sbc, Mode::Aby, 4, true);
    t[0xE1] = op("SBC", Op::Sbc, Mode::Izx, 6, false);
    t[0xF1] = op("SBC", Op::Sbc, Mode::Izy, 5, true);

    // Compares
    t[0xC9] = op("CMP", Op::Cmp, Mode::Imm, 2, false);
    t[0xC5] = op("CMP", Op::Cmp, Mode::Zp, 3, false);
    t[0xD5] = op("CMP", Op::Cmp, Mode::Zpx, 4, false);
    t[0xCD] = op("CMP", Op::Cmp, Mode::Abs, 4, false);
    t[0xDD] = op("CMP", Op::Cmp, Mode::Abx, 4, true);
    t[0xD9] = op("CMP", Op::Cmp, Mode::Aby, 4, true);
    t[0xC1] = op("CMP", Op::Cmp, Mode::Izx, 6, false);
    t[0xD1] = op("CMP", Op::Cmp, Mode::Izy, 5, true);
    t[0xE0] = op("CPX", Op::Cpx, Mode::Imm, 2, false);
    t[0xE4] = op("CPX", Op::Cpx, Mode::Zp, 3, false);
    t[0xEC] = op("CPX", Op::Cpx, Mode::Abs, 4, false);
    t[0xC0] = op("CPY", Op::Cpy, Mode::Imm, 2, false);
    t[0xC4] = op("CPY", Op::Cpy, Mode::Zp, 3, false);
    t[0xCC] = op("CPY", Op::Cpy, Mode::Abs, 4, false);

    // Increments / decrements
    t[0xE6] = op("INC", Op::Inc, Mode::Zp, 5, false);
    t[0xF6] = op("INC", Op::Inc, Mode::Zpx, 6, false);
    t[0xEE] = op("INC", Op::Inc, Mode::Abs, 6, false);
    t[0xFE] = op("INC", Op::Inc, Mode::Abx, 7, false);
    t[0xC6] = op("DEC", Op::Dec, Mode::Zp, 5, false);
    t[0xD6] = op("DEC", Op::Dec, Mode::Zpx, 6, false);
    t[0xCE] = op("DEC", Op::Dec, Mode::Abs, 6, false);
    t[0xDE] = op("DEC", Op::Dec, Mode::Abx, 7, false);
    t[0xE8] = op("INX", Op::Inx, Mode::Imp, 2, false);
    t[0xC8] = op("INY", Op::Iny, Mode::Imp, 2, false);
    t[0xCA] = op("DEX", Op::Dex, Mode::Imp, 2, false);
    t[0x88] = op("DEY", Op::Dey, Mode::Imp, 2, false);

    // Shifts and rotates
    t[0x0A] = op("ASL", Op::Asl, Mode::Acc, 2, false);
    t[0x06] = op("ASL", Op::Asl, Mode::Zp, 5, false);
    t[0x16] = op("ASL", Op::Asl, Mode::Zpx, 6, false);
    t[0x0E] = op("ASL", Op::Asl, Mode::Abs, 6, false);
    t[0x1E] = op("ASL", Op::Asl, Mode::Abx, 7, false);
    t[0x4A] = op("LSR", Op::Lsr, Mode::Acc, 2, false);
    t[0x46] = op("LSR", Op::Lsr, Mode::Zp, 5, false);
    t[0x56] = op("LSR", Op::Lsr, Mode::Zpx, 6, false);
    t[0x4E] = op("LSR", Op::Lsr, Mode::Abs, 6, false);
    t[0x5E] = op("LSR", Op::Lsr, Mode::Abx, 7, false);
    t[0x2A] = op("ROL", Op::Rol, Mode::Acc, 2, false);
    t[0x26] = op("ROL", Op::Rol, Mode::Zp, 5, false);
    t[0x36] = op("ROL", Op::Rol, Mode::Zpx, 6, false);
    t[0x2E] = op("ROL", Op::Rol, Mode::Abs, 6, false);
    t[0x3E] = op("ROL", Op::Rol, Mode::Abx, 7, false);
    t[0x6A] = op("ROR", Op::Ror, Mode::Acc, 2, false);
    t[0x66] = op("ROR", Op::Ror, Mode::Zp, 5, false);
    t[0x76] = op("ROR", Op::Ror, Mode::Zpx, 6, false);
    t[0x6E] = op("ROR", Op::Ror, Mode::Abs, 6, false);
    t[0x7E] = op("ROR", Op::Ror, Mode::Abx, 7, false);

    // Flag operations
    t[0x18] = op("CLC", Op::Clc, Mode::Imp, 2, false);
    t[0x38] = op("SEC", Op::Sec, Mode::Imp, 2, false);
    t[0x58] = op("CLI", Op::Cli, Mode::Imp, 2, false);
    t[0x78] = op("SEI", Op::Sei, Mode::Imp, 2, false);
    t[0xB8] = op("CLV", Op::Clv, Mode::Imp, 2, false);
    t[0xD8] = op("CLD", Op::Cld, Mode::Imp, 2, false);
    t[0xF8] = op("SED", Op::Sed, Mode::Imp, 2, false);

    t[0xEA] = op("NOP", Op::Nop, Mode::Imp, 2, false);

    t
};
