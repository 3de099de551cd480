// Run whole programs on the CPU with a small ROM/RAM bench.

use hack::{parse_hack, Addr15, Cpu, Word16};

/// Instruction and data memory wired to a CPU the way the Hack computer does.
struct Bench {
    cpu: Cpu,
    rom: Vec<Word16>,
    ram: Vec<Word16>,
}

impl Bench {
    fn new(rom: Vec<Word16>) -> Self {
        Self {
            cpu: Cpu::new(),
            rom,
            ram: vec![Word16::ZERO; 0x8000],
        }
    }

    fn tick(&mut self, reset: bool) {
        let instruction = self.rom.get(self.cpu.pc().index()).copied().unwrap_or(Word16::ZERO);
        let in_m = self.ram[self.cpu.address_m().index()];
        let out = self.cpu.step(instruction, in_m, reset);
        if out.write_m {
            self.ram[out.address_m.index()] = out.out_m;
        }
    }

    fn run_until(&mut self, pc: u16, max_cycles: u64) -> u64 {
        let start = self.cpu.cycles();
        while self.cpu.pc() != Addr15::new(pc) {
            assert!(self.cpu.cycles() - start < max_cycles, "no halt after {} cycles", max_cycles);
            self.tick(false);
        }
        self.cpu.cycles() - start
    }

    fn poke(&mut self, addr: usize, value: i16) {
        self.ram[addr] = Word16::from_i16(value);
    }

    fn peek(&self, addr: usize) -> i16 {
        self.ram[addr].to_i16()
    }
}

// R2 = R0 * R1 by repeated addition. Ends in a tight loop at address 18.
const MULT: &str = "\
0000000000000010 // @R2
1110101010001000 // M=0
0000000000000000 // @R0
1111110000010000 // D=M
0000000000010000 // @i
1110001100001000 // M=D
0000000000010000 // (LOOP) @i
1111110000010000 // D=M
0000000000010010 // @END
1110001100000110 // D;JLE
0000000000000001 // @R1
1111110000010000 // D=M
0000000000000010 // @R2
1111000010001000 // M=D+M
0000000000010000 // @i
1111110010001000 // M=M-1
0000000000000110 // @LOOP
1110101010000111 // 0;JMP
0000000000010010 // (END) @END
1110101010000111 // 0;JMP
";

const END: u16 = 18;

fn mult_bench(r0: i16, r1: i16) -> Bench {
    let program = parse_hack(MULT).unwrap();
    assert_eq!(program.len(), 20);

    let mut bench = Bench::new(program.words);
    bench.poke(0, r0);
    bench.poke(1, r1);
    bench.poke(2, -1);
    bench
}

#[test]
fn test_mult_small() {
    let mut bench = mult_bench(6, 7);
    bench.run_until(END, 1_000);
    assert_eq!(bench.peek(2), 42);
    assert_eq!(bench.peek(0), 6);
    assert_eq!(bench.peek(1), 7);
}

#[test]
fn test_mult_by_zero() {
    let mut bench = mult_bench(0, 123);
    let cycles = bench.run_until(END, 1_000);
    assert_eq!(bench.peek(2), 0);
    // Setup (6) plus one pass through the loop test (4).
    assert_eq!(cycles, 10);
}

#[test]
fn test_mult_negative_multiplicand() {
    let mut bench = mult_bench(3, -5);
    bench.run_until(END, 1_000);
    assert_eq!(bench.peek(2), -15);
}

#[test]
fn test_mult_wraps() {
    let mut bench = mult_bench(2, 20_000);
    bench.run_until(END, 1_000);
    assert_eq!(bench.peek(2), 40_000u16 as i16);
}

#[test]
fn test_end_loop_is_stable() {
    let mut bench = mult_bench(2, 2);
    bench.run_until(END, 1_000);
    for _ in 0..10 {
        bench.tick(false);
        assert!(bench.cpu.pc() == Addr15::new(END) || bench.cpu.pc() == Addr15::new(END + 1));
    }
    assert_eq!(bench.peek(2), 4);
}

#[test]
fn test_reset_restarts_program() {
    let mut bench = mult_bench(4, 4);
    for _ in 0..15 {
        bench.tick(false);
    }
    assert_ne!(bench.cpu.pc(), Addr15::ZERO);

    bench.tick(true);
    assert_eq!(bench.cpu.pc(), Addr15::ZERO);

    bench.run_until(END, 1_000);
    assert_eq!(bench.peek(2), 16);
}
