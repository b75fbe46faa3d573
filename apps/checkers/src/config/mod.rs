pub mod params;

pub use params::{GasSchedule, ModuleParams, TerminalRecordPolicy};
