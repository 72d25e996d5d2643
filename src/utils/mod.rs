/// Utility modules
///
/// Input inspection for the --check flag and output formatting.

pub mod input_summary;
pub mod output_formatter;
