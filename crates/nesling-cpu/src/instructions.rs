//! Instruction semantics for the official 6502 set.
//!
//! Dispatch arrives from [`Cpu::step`] with the operand already
//! resolved; each arm only performs the data movement and flag updates.
//! Branch and page-cross penalties for branches live here because only
//! the branch knows whether it was taken.

use crate::bus::CpuBus;
use crate::cpu::{Cpu, Operand, IRQ_VECTOR};
use crate::opcodes::Op;
use crate::status::Status;

impl Cpu {
    pub(crate) fn execute(&mut self, bus: &mut impl CpuBus, op: Op, operand: Operand) {
        match op {
            // Loads and stores
            Op::Lda => {
                self.a = self.load(bus, operand);
                self.status.set_zn(self.a);
            }
            Op::Ldx => {
                self.x = self.load(bus, operand);
                self.status.set_zn(self.x);
            }
            Op::Ldy => {
                self.y = self.load(bus, operand);
                self.status.set_zn(self.y);
            }
            Op::Sta => self.store(bus, operand, self.a),
            Op::Stx => self.store(bus, operand, self.x),
            Op::Sty => self.store(bus, operand, self.y),

            // Register transfers
            Op::Tax => {
                self.x = self.a;
                self.status.set_zn(self.x);
            }
            Op::Tay => {
                self.y = self.a;
                self.status.set_zn(self.y);
            }
            Op::Txa => {
                self.a = self.x;
                self.status.set_zn(self.a);
            }
            Op::Tya => {
                self.a = self.y;
                self.status.set_zn(self.a);
            }
            Op::Tsx => {
                self.x = self.sp;
                self.status.set_zn(self.x);
            }
            // TXS does not touch flags.
            Op::Txs => self.sp = self.x,

            // Stack
            Op::Pha => self.push(bus, self.a),
            Op::Php => self.push(bus, self.status.to_pushed_byte(true)),
            Op::Pla => {
                self.a = self.pull(bus);
                self.status.set_zn(self.a);
            }
            Op::Plp => {
                let value = self.pull(bus);
                self.status = Status::from_pulled_byte(value);
            }

            // Logic
            Op::And => {
                self.a &= self.load(bus, operand);
                self.status.set_zn(self.a);
            }
            Op::Ora => {
                self.a |= self.load(bus, operand);
                self.status.set_zn(self.a);
            }
            Op::Eor => {
                self.a ^= self.load(bus, operand);
                self.status.set_zn(self.a);
            }
            Op::Bit => {
                let value = self.load(bus, operand);
                self.status.set(Status::Z, self.a & value == 0);
                self.status.set(Status::V, value & 0x40 != 0);
                self.status.set(Status::N, value & 0x80 != 0);
            }

            // Arithmetic
            Op::Adc => {
                let value = self.load(bus, operand);
                self.adc(value);
            }
            Op::Sbc => {
                let value = self.load(bus, operand);
                self.adc(value ^ 0xFF);
            }
            Op::Cmp => {
                let value = self.load(bus, operand);
                self.compare(self.a, value);
            }
            Op::Cpx => {
                let value = self.load(bus, operand);
                self.compare(self.x, value);
            }
            Op::Cpy => {
                let value = self.load(bus, operand);
                self.compare(self.y, value);
            }

            // Increments / decrements
            Op::Inc => {
                let addr = operand.addr.unwrap_or_default();
                let value = bus.read(addr).wrapping_add(1);
                bus.write(addr, value);
                self.status.set_zn(value);
            }
            Op::Dec => {
                let addr = operand.addr.unwrap_or_default();
                let value = bus.read(addr).wrapping_sub(1);
                bus.write(addr, value);
                self.status.set_zn(value);
            }
            Op::Inx => {
                self.x = self.x.wrapping_add(1);
                self.status.set_zn(self.x);
            }
            Op::Iny => {
                self.y = self.y.wrapping_add(1);
                self.status.set_zn(self.y);
            }
            Op::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.status.set_zn(self.x);
            }
            Op::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.status.set_zn(self.y);
            }

            // Shifts and rotates
            Op::Asl => self.read_modify_write(bus, operand, |status, value| {
                status.set(Status::C, value & 0x80 != 0);
                value << 1
            }),
            Op::Lsr => self.read_modify_write(bus, operand, |status, value| {
                status.set(Status::C, value & 0x01 != 0);
                value >> 1
            }),
            Op::Rol => self.read_modify_write(bus, operand, |status, value| {
                let carry_in = u8::from(status.contains(Status::C));
                status.set(Status::C, value & 0x80 != 0);
                value << 1 | carry_in
            }),
            Op::Ror => self.read_modify_write(bus, operand, |status, value| {
                let carry_in = u8::from(status.contains(Status::C)) << 7;
                status.set(Status::C, value & 0x01 != 0);
                value >> 1 | carry_in
            }),

            // Jumps and subroutines
            Op::Jmp => self.pc = operand.addr.unwrap_or_default(),
            Op::Jsr => {
                // Push the address of the JSR's last byte; RTS adds one.
                let ret = self.pc.wrapping_sub(1);
                self.push(bus, (ret >> 8) as u8);
                self.push(bus, (ret & 0xFF) as u8);
                self.pc = operand.addr.unwrap_or_default();
            }
            Op::Rts => {
                let lo = u16::from(self.pull(bus));
                let hi = u16::from(self.pull(bus));
                self.pc = (hi << 8 | lo).wrapping_add(1);
            }
            Op::Rti => {
                let flags = self.pull(bus);
                self.status = Status::from_pulled_byte(flags);
                let lo = u16::from(self.pull(bus));
                let hi = u16::from(self.pull(bus));
                self.pc = hi << 8 | lo;
            }
            Op::Brk => {
                // BRK pushes PC+1 past the opcode's padding byte.
                self.pc = self.pc.wrapping_add(1);
                self.interrupt(bus, IRQ_VECTOR, true);
                // interrupt() accounts 7 cycles; the table already paid them.
                self.cycles -= 7;
            }

            // Branches
            Op::Bpl => self.branch(operand, !self.status.contains(Status::N)),
            Op::Bmi => self.branch(operand, self.status.contains(Status::N)),
            Op::Bvc => self.branch(operand, !self.status.contains(Status::V)),
            Op::Bvs => self.branch(operand, self.status.contains(Status::V)),
            Op::Bcc => self.branch(operand, !self.status.contains(Status::C)),
            Op::Bcs => self.branch(operand, self.status.contains(Status::C)),
            Op::Bne => self.branch(operand, !self.status.contains(Status::Z)),
            Op::Beq => self.branch(operand, self.status.contains(Status::Z)),

            // Flag operations
            Op::Clc => self.status.remove(Status::C),
            Op::Sec => self.status.insert(Status::C),
            Op::Cli => self.status.remove(Status::I),
            Op::Sei => self.status.insert(Status::I),
            Op::Clv => self.status.remove(Status::V),
            Op::Cld => self.status.remove(Status::D),
            Op::Sed => self.status.insert(Status::D),

            Op::Nop => {}
        }
    }

    /// A + M + C with the NES's binary-only arithmetic.
    fn adc(&mut self, value: u8) {
        let carry = u16::from(self.status.contains(Status::C));
        let sum = u16::from(self.a) + u16::from(value) + carry;
        let result = (sum & 0xFF) as u8;
        self.status.set(Status::C, sum > 0xFF);
        self.status
            .set(Status::V, (!(self.a ^ value) & (self.a ^ result)) & 0x80 != 0);
        self.a = result;
        self.status.set_zn(self.a);
    }

    fn compare(&mut self, register: u8, value: u8) {
        let result = register.wrapping_sub(value);
        self.status.set(Status::C, register >= value);
        self.status.set_zn(result);
    }

    /// Taken branches cost one extra cycle, two when the target lies on
    /// a different page than the instruction's fall-through address.
    fn branch(&mut self, operand: Operand, taken: bool) {
        if taken {
            self.cycles += 1;
            if operand.crossed {
                self.cycles += 1;
            }
            self.pc = operand.addr.unwrap_or(self.pc);
        }
    }

    #[inline]
    fn load(&mut self, bus: &mut impl CpuBus, operand: Operand) -> u8 {
        match operand.addr {
            Some(addr) => bus.read(addr),
            None => self.a,
        }
    }

    #[inline]
    fn store(&mut self, bus: &mut impl CpuBus, operand: Operand, value: u8) {
        if let Some(addr) = operand.addr {
            bus.write(addr, value);
        }
    }

    /// Shifts and rotates targeting either memory or the accumulator.
    fn read_modify_write(
        &mut self,
        bus: &mut impl CpuBus,
        operand: Operand,
        f: impl FnOnce(&mut Status, u8) -> u8,
    ) {
        match operand.addr {
            Some(addr) => {
                let value = bus.read(addr);
                let result = f(&mut self.status, value);
                bus.write(addr, result);
                self.status.set_zn(result);
            }
            None => {
                self.a = f(&mut self.status, self.a);
                self.status.set_zn(self.a);
            }
        }
    }
}
