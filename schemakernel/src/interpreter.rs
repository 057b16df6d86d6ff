//! Executes parsed instructions against an injected engine.

use crate::error::ScriptError;
use crate::script::{parse_script, Instruction, Statement};
use log::{debug, warn};
use schemakernel_layout::{DrawingSink, Schematic};

/// What a run did. Skipped connections were logged and drew nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub placed: usize,
    pub connected: usize,
    pub skipped: usize,
    pub resets: usize,
}

/// Drives one engine through instruction sequences.
///
/// The interpreter holds nothing but the engine it was lent; the engine's
/// state is the only place a run's effects land.
pub struct Interpreter<'e, S: DrawingSink> {
    engine: &'e mut Schematic<S>,
    summary: RunSummary,
}

impl<'e, S: DrawingSink> Interpreter<'e, S> {
    pub fn new(engine: &'e mut Schematic<S>) -> Self {
        Self {
            engine,
            summary: RunSummary::default(),
        }
    }

    /// Execute `instructions` in order.
    ///
    /// Stops at the first fatal error; effects of earlier instructions stay
    /// in the engine.
    pub fn run(&mut self, instructions: &[Instruction]) -> Result<RunSummary, ScriptError> {
        for instruction in instructions {
            self.execute(instruction)?;
        }
        Ok(self.summary)
    }

    pub fn execute(&mut self, instruction: &Instruction) -> Result<(), ScriptError> {
        let line = instruction.line;
        match &instruction.statement {
            Statement::Add { tag, id, config } => {
                self.engine
                    .try_add(tag, id, config.clone())
                    .map_err(|source| ScriptError::Placement { line, source })?;
                self.summary.placed += 1;
            }
            Statement::Connect { from, to } => {
                match self
                    .engine
                    .try_connect(&from.component, &from.pin, &to.component, &to.pin)
                {
                    Ok(()) => self.summary.connected += 1,
                    Err(e) => {
                        warn!("line {line}: skipping connection {from} -> {to}: {e}");
                        self.summary.skipped += 1;
                    }
                }
            }
            Statement::Reset => {
                self.engine.reset();
                self.summary.resets += 1;
            }
        }
        debug!("line {line}: {:?}", instruction.statement);
        Ok(())
    }

    /// Totals so far, including a run that stopped on an error.
    pub fn summary(&self) -> RunSummary {
        self.summary
    }
}

/// Parse `src` and run it against `engine`. A parse error runs nothing.
pub fn run_script<S: DrawingSink>(
    engine: &mut Schematic<S>,
    src: &str,
) -> Result<RunSummary, ScriptError> {
    let instructions = parse_script(src)?;
    Interpreter::new(engine).run(&instructions)
}
