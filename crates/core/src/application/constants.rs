// Environment constants (no magic values)

/// Reserved variable naming the environment kind ("cli" / "testing")
///
/// Name kept stable for programs that already introspect it.
pub const KIND_VARIABLE: &str = "FLARGS_EXE_ENVIRONMENT";

/// Default `tracing` filter for binaries when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "cmdenv=info";

/// Environment variable selecting the log format ("json" or "pretty")
pub const LOG_FORMAT_VARIABLE: &str = "CMDENV_LOG_FORMAT";
