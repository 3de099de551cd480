//! Hack CPU - CLI Entry Point
//!
//! Commands:
//! - `hack-cpu decode <word>` - Show how a word decodes
//! - `hack-cpu step <instruction>` - Clock one cycle from a given state
//! - `hack-cpu alu <x> <y>` - Print the ALU table for two operands
//! - `hack-cpu disasm <file>` - Disassemble a .hack file
//! - `hack-cpu test` - Built-in self-test

use clap::{Parser, Subcommand};
use hack::{Addr15, Cpu, RegisterState, Word16};

#[derive(Parser)]
#[command(name = "hack-cpu")]
#[command(version)]
#[command(about = "A cycle-accurate behavioral model of the 16-bit Hack CPU")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an instruction word
    Decode {
        /// Word as decimal, 0x hex, 0b binary or 16 bare binary digits
        #[arg(allow_hyphen_values = true)]
        word: String,
    },
    /// Clock one cycle from an explicit register state
    Step {
        /// Instruction word
        #[arg(allow_hyphen_values = true)]
        instruction: String,
        /// Memory word at addressM
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        in_m: String,
        /// Assert reset for this cycle
        #[arg(long)]
        reset: bool,
        /// Initial A register
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        a: String,
        /// Initial D register
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        d: String,
        /// Initial program counter
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        pc: String,
        /// Print the cycle record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print every canonical ALU computation for D=x and A=y
    Alu {
        #[arg(allow_hyphen_values = true)]
        x: String,
        #[arg(allow_hyphen_values = true)]
        y: String,
    },
    /// Disassemble a .hack file
    Disasm {
        /// Path to the .hack file
        program: String,
    },
    /// Run the built-in self-test
    Test,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Some(Commands::Decode { word }) => {
            decode_word(&word);
        }
        Some(Commands::Step { instruction, in_m, reset, a, d, pc, json }) => {
            step_once(&instruction, &in_m, reset, &a, &d, &pc, json);
        }
        Some(Commands::Alu { x, y }) => {
            print_alu_table(&x, &y);
        }
        Some(Commands::Disasm { program }) => {
            disassemble_file(&program);
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("Hack CPU v{}", env!("CARGO_PKG_VERSION"));
            println!("A cycle-accurate model of the nand2tetris Hack CPU");
            println!();
            println!("Use --help for available commands");
        }
    }
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_word(label: &str, text: &str) -> Word16 {
    match Word16::parse(text) {
        Ok(word) => word,
        Err(e) => {
            eprintln!("❌ Invalid {}: {}", label, e);
            std::process::exit(1);
        }
    }
}

fn parse_addr(label: &str, text: &str) -> Addr15 {
    let word = parse_word(label, text);
    match Addr15::try_from(word.get()) {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("❌ Invalid {}: {}", label, e);
            std::process::exit(1);
        }
    }
}

fn decode_word(text: &str) {
    use hack::cpu::AluOp;

    let word = parse_word("word", text);
    let instr = hack::decode(word);
    let signals = instr.signals();

    println!("Word:        {} ({:#06x})", word, word.get());
    println!("Assembly:    {}", hack::disassemble_word(word));
    println!("Class:       {}", if signals.is_compute { "compute" } else { "address" });

    if signals.is_compute {
        let op = AluOp::from_control(signals.control)
            .map(|op| op.mnemonic().to_string())
            .unwrap_or_else(|| "non-canonical".to_string());
        println!("ALU control: {:06b} ({})", signals.control.bits(), op);
        println!("y operand:   {}", if signals.use_memory { "M" } else { "A" });
    } else {
        println!("Literal:     {}", word.low15());
    }

    println!("load A:      {}", signals.load_a);
    println!("load D:      {}", signals.load_d);
    println!("writeM:      {}", signals.write_m);
    println!("Jump:        {}", signals.jump.mnemonic().unwrap_or("none"));
}

fn step_once(instruction: &str, in_m: &str, reset: bool, a: &str, d: &str, pc: &str, json: bool) {
    let instruction = parse_word("instruction", instruction);
    let in_m = parse_word("inM", in_m);
    let state = RegisterState::with_values(
        parse_word("A", a),
        parse_word("D", d),
        parse_addr("PC", pc),
    );

    let mut cpu = Cpu::with_state(state);
    let record = cpu.step_traced(instruction, in_m, reset);

    if json {
        match serde_json::to_string_pretty(&record) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to serialize cycle: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("━━━ Cycle ━━━");
    println!("{}", record.summary());
    println!();
    println!("outM:     {} ({})", record.outputs.out_m, record.outputs.out_m.to_i16());
    println!("writeM:   {}", record.outputs.write_m);
    println!("addressM: {}", record.outputs.address_m);
    println!("zr={} ng={} jump={}", record.flags.zr, record.flags.ng, record.jump);
    println!();
    println!("━━━ After clock edge ━━━");
    println!("A:  {}", cpu.a().to_i16());
    println!("D:  {}", cpu.d().to_i16());
    println!("PC: {}", cpu.pc());
}

fn print_alu_table(x: &str, y: &str) {
    use hack::cpu::{alu, AluOp};

    let x = parse_word("x", x);
    let y = parse_word("y", y);

    println!("D = {}, A = {}", x.to_i16(), y.to_i16());
    println!();
    println!("{:<5} {:<8} {:>7}  zr ng", "comp", "control", "out");
    for op in AluOp::ALL {
        let result = alu::compute(x, y, op.control());
        println!(
            "{:<5} {:06b}   {:>7}  {}  {}",
            op.mnemonic(),
            op.bits(),
            result.out.to_i16(),
            result.flags.zr as u8,
            result.flags.ng as u8,
        );
    }
}

fn disassemble_file(path: &str) {
    println!("📖 Disassembling: {}", path);
    println!();

    let file = match hack::load_hack(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("❌ Failed to load program: {}", e);
            std::process::exit(1);
        }
    };

    print!("{}", hack::disassemble(&file.words));
}

fn run_self_test() {
    use hack::cpu::{alu, AluOp, Dest, Instruction, JumpCode};

    println!("━━━ Hack CPU Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    // Test 1: ALU constants
    print!("ALU constant rows... ");
    let x = Word16::from_i16(1234);
    let y = Word16::from_i16(-77);
    let ok = alu::compute(x, y, AluOp::Zero.control()).out.to_i16() == 0
        && alu::compute(x, y, AluOp::One.control()).out.to_i16() == 1
        && alu::compute(x, y, AluOp::MinusOne.control()).out.to_i16() == -1;
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 2: ALU arithmetic
    print!("ALU add/subtract... ");
    let sum = alu::compute(x, y, AluOp::DPlusA.control()).out.to_i16();
    let diff = alu::compute(x, y, AluOp::DMinusA.control()).out.to_i16();
    if sum == 1157 && diff == 1311 {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {} and {})", sum, diff);
        failed += 1;
    }

    // Test 3: address-instruction
    print!("Address-instruction loads A... ");
    let mut cpu = Cpu::new();
    let out = cpu.step(Word16::new(100), Word16::ZERO, false);
    if cpu.a().get() == 100 && !out.write_m && cpu.pc().get() == 1 {
        println!("✓");
        passed += 1;
    } else {
        println!("✗");
        failed += 1;
    }

    // Test 4: memory write with one-cycle address latency
    print!("M=D writes to the old A... ");
    let m_eq_d = hack::encode(&Instruction::compute(AluOp::D, false, Dest::from_bits(0b001), JumpCode::Never));
    let mut cpu = Cpu::with_state(RegisterState::with_values(Word16::new(300), Word16::new(7), Addr15::ZERO));
    let out = cpu.step(m_eq_d, Word16::ZERO, false);
    if out.write_m && out.out_m.get() == 7 && out.address_m.get() == 300 {
        println!("✓");
        passed += 1;
    } else {
        println!("✗");
        failed += 1;
    }

    // Test 5: reset priority
    print!("Reset overrides jump... ");
    let jmp = hack::encode(&Instruction::compute(AluOp::Zero, false, Dest::NONE, JumpCode::Always));
    let mut cpu = Cpu::with_state(RegisterState::with_values(Word16::new(42), Word16::ZERO, Addr15::new(9)));
    cpu.step(jmp, Word16::ZERO, true);
    if cpu.pc() == Addr15::ZERO {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (PC = {})", cpu.pc());
        failed += 1;
    }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
