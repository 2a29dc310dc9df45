//! Chat-message side of the pipeline: intent, parameters, prompt lines.

pub mod extractor;
pub mod format;
pub mod intent;
pub mod memory;

pub use extractor::{extract_parameters, ParamValue, ParameterMap, TestType};
pub use format::format_parameter_text;
pub use intent::is_sequence_request;
pub use memory::ParameterMemory;
