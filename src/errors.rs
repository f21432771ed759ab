// Error types for paintrisk

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum PaintRiskError {
    // Vehicle dataset errors
    #[snafu(display("Error reading vehicle dataset"))]
    DatasetIOError { source: io::Error },
    #[snafu(display("Error parsing vehicle dataset"))]
    DatasetParseError { source: serde_json::Error },
    #[snafu(display("Unsupported vehicle dataset format: {path}"))]
    UnsupportedDatasetFormat { path: String },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },

    // Output errors
    #[snafu(display("Error serializing analysis output"))]
    OutputSerializeError { source: serde_json::Error },
    #[snafu(display("Could not open the wizard window: {description}"))]
    WindowError { description: String },

    // User input validation errors
    #[snafu(display("Invalid user input: {field} - {reason}"))]
    InvalidUserInput { field: String, reason: String },
}
