use anyhow::Result;
use itertools::Itertools;
use std::io::{BufRead, Write};
#[cfg(target_family="wasm")]
use wasm_bindgen::prelude::*;

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

mod input;
mod ops;
mod util;

pub use input::Console;
pub use ops::{MathError, Op};
use util::is_quit_word;

pub const MENU_TITLE: &str = "--- Scientific Calculator ---";

fn render_menu() -> String {
    let items = Op::ALL
        .iter()
        .enumerate()
        .map(|(i, op)| format!("{}) {}", i + 1, op.label()))
        .join("\n");
    format!(
        "\n{}\nChoose an operation (enter the number):\n{}",
        MENU_TITLE, items
    )
}

// Whether the menu loop should keep going after an operation.
enum Flow {
    Continue,
    Quit,
}

pub struct Session<R, W> {
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Session {
            console: Console::new(input, output),
        }
    }

    // The interactive loop: menu, selection, operands, result, repeat.
    // Only stream-level I/O failures escape; everything the user can cause
    // is reported on the console and the loop continues.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.console.print(&render_menu())?;
            let choice = match self.console.prompt("Enter choice: ")? {
                Some(text) => text,
                None => {
                    self.console.print("Exiting...")?;
                    break;
                }
            };
            if is_quit_word(&choice) {
                self.console.print("Goodbye!")?;
                break;
            }
            let op = match Op::from_choice(&choice) {
                Some(op) => op,
                None => {
                    self.console
                        .print("Invalid choice. Please select a number from the menu.")?;
                    continue;
                }
            };
            if let Op::Quit = op {
                self.console.print("Goodbye!")?;
                break;
            }
            if let Flow::Quit = self.run_operation(op)? {
                self.console.print("Exiting...")?;
                break;
            }
        }
        Ok(())
    }

    fn run_operation(&mut self, op: Op) -> Result<Flow> {
        let mut operands = Vec::with_capacity(op.arity());
        for prompt in op.prompts() {
            // A quit keyword mid-collection abandons the whole program, not
            // just the current operation.
            let value = if let Op::Factorial = op {
                match self.console.read_integer(prompt)? {
                    Some(n) => n as f64,
                    None => return Ok(Flow::Quit),
                }
            } else {
                match self.console.read_number(prompt)? {
                    Some(v) => v,
                    None => return Ok(Flow::Quit),
                }
            };
            operands.push(value);
        }
        match op.apply(&operands) {
            Ok(result) => self.console.print(&format!("Result: {}", result))?,
            Err(e) => match e.downcast_ref::<MathError>() {
                Some(math) => self.console.print(&format!("Error: {}", math))?,
                None => self
                    .console
                    .print(&format!("An unexpected error occurred: {}", e))?,
            },
        }
        Ok(Flow::Continue)
    }
}

// Run a whole scripted session against in-memory streams and return the
// transcript. Writes to a byte buffer cannot fail, so a session error here
// is rendered the same way the binary would render it.
pub fn run_script(script: &str) -> String {
    let mut out = Vec::new();
    if let Err(e) = Session::new(script.as_bytes(), &mut out).run() {
        return format!("Error: {:?}", e);
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(target_family="wasm")]
#[wasm_bindgen]
pub fn run_session(script: &str) -> String {
    run_script(script)
}
