//! SchemaKernel: instruction scripts for the schematic layout engine.
//!
//! ```
//! use schemakernel::run_script;
//! use schemakernel_layout::{Canvas, Schematic};
//!
//! let mut sch = Schematic::new(Canvas::default());
//! let summary = run_script(
//!     &mut sch,
//!     r#"
//!     add("voltage_source", "v1", { x: -120, label: "9V" });
//!     add("resistor", "r1", { x: 0, y: -80 });
//!     connect("v1", "top", "r1", "left");
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(summary.connected, 1);
//! ```

pub mod error;
pub mod interpreter;
pub mod script;

pub use error::ScriptError;
pub use interpreter::{run_script, Interpreter, RunSummary};
pub use script::{parse_script, Instruction, Statement};
