/// Root of the shared provider namespace (`<root>.<category>.<name>`)
pub const NAMESPACE_ROOT: &str = "flepimop2";
/// Key every component fragment must carry
pub const MODULE_KEY: &str = "module";
/// Maximum length of a module or section identifier
pub const IDENTIFIER_MAX_LEN: usize = 255;
/// Action recorded in run metadata when none is given
pub const DEFAULT_ACTION: &str = "simulate";
/// Output directory used by file backends when `root` is omitted
pub const DEFAULT_OUTPUT_DIR: &str = "model_output";
/// `strftime` format for timestamps embedded in artifact names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
/// Key assigned to a section written as a list instead of a mapping
pub const DEFAULT_SECTION_KEY: &str = "default";
