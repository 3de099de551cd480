//! WebAssembly bindings for the Hack CPU.
//!
//! This module provides JavaScript-friendly wrappers around the core model.

use wasm_bindgen::prelude::*;
use crate::{Cpu, Word16};
use crate::listing::disasm::disassemble_word;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly CPU wrapper.
#[wasm_bindgen]
pub struct WasmCpu {
    cpu: Cpu,
}

#[wasm_bindgen]
impl WasmCpu {
    /// Create a new CPU instance.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { cpu: Cpu::new() }
    }

    /// Run one cycle. Returns `{ outM, writeM, addressM }`.
    ///
    /// Throws if `instruction` or `inM` does not fit in 16 bits.
    #[wasm_bindgen]
    pub fn step(&mut self, instruction: u32, in_m: u32, reset: bool) -> Result<js_sys::Object, JsError> {
        let out = self.cpu.try_step(instruction, in_m, reset)
            .map_err(|e| JsError::new(&e.to_string()))?;

        let obj = js_sys::Object::new();
        set(&obj, "outM", JsValue::from(out.out_m.get()))?;
        set(&obj, "writeM", JsValue::from(out.write_m))?;
        set(&obj, "addressM", JsValue::from(out.address_m.get()))?;
        Ok(obj)
    }

    /// Zero A, D and PC.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Address of the next instruction to fetch.
    #[wasm_bindgen]
    pub fn pc(&self) -> u16 {
        self.cpu.pc().get()
    }

    /// `addressM` for the coming cycle.
    #[wasm_bindgen]
    pub fn address_m(&self) -> u16 {
        self.cpu.address_m().get()
    }

    /// A register, as a signed value.
    #[wasm_bindgen]
    pub fn a(&self) -> i16 {
        self.cpu.a().to_i16()
    }

    /// D register, as a signed value.
    #[wasm_bindgen]
    pub fn d(&self) -> i16 {
        self.cpu.d().to_i16()
    }

    /// Get cycle count.
    #[wasm_bindgen]
    pub fn cycles(&self) -> u64 {
        self.cpu.cycles()
    }

    /// Get registers as JSON string.
    #[wasm_bindgen]
    pub fn state_json(&self) -> Result<String, JsError> {
        serde_json::to_string(self.cpu.state())
            .map_err(|e| JsError::new(&e.to_string()))
    }
}

impl Default for WasmCpu {
    fn default() -> Self {
        Self::new()
    }
}

fn set(obj: &js_sys::Object, key: &str, value: JsValue) -> Result<(), JsError> {
    js_sys::Reflect::set(obj, &JsValue::from_str(key), &value)
        .map_err(|_| JsError::new(&format!("failed to set {}", key)))?;
    Ok(())
}

/// Disassemble a single 16-bit instruction.
#[wasm_bindgen]
pub fn wasm_disassemble(value: u32) -> Result<String, JsError> {
    let word = Word16::try_from(value)
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(disassemble_word(word))
}
