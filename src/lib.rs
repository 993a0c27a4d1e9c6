pub mod binary;
pub mod config;
pub mod expression;
pub mod location;
pub mod logging;
pub mod scopes;

use miette::Diagnostic;

pub use binary::{
    build_function_index, extract_part, Disassembler, Disassembly, FunctionRange,
    LineNumberFormatter, PartSelector, WasmStateCache, WatDisassembler,
};
pub use expression::{decode_expression, decode_hex_expression, substitute_frame_base};
pub use location::{original_location, GeneratedLocation, OriginalLocation, SourceLocation};
pub use scopes::{DebugInfoBundle, DebugInfoCache, MappedScope, SourceMapProvider};

/// Result type alias for the debug-info core
pub type Result<T> = miette::Result<T>;

/// Error types for debug-info resolution
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum DebugInfoError {
    #[error("Failed to fetch source map for {0}")]
    #[diagnostic(
        code(wasm_scope::source_map_fetch),
        help("The source-map collaborator rejected the request. Check that the source id is still valid for the current debuggee session.")
    )]
    SourceMapFetch(String),

    #[error("Malformed debug info: {0}")]
    #[diagnostic(
        code(wasm_scope::malformed_debug_info),
        help("The scope tree attached to the source map could not be deserialized. Rebuild the module with a toolchain that emits well-formed debug data.")
    )]
    MalformedDebugInfo(String),

    #[error("File operation failed: {0}")]
    #[diagnostic(
        code(wasm_scope::file_error),
        help("Check if you have necessary permissions and that the path exists.")
    )]
    FileError(String),
}
