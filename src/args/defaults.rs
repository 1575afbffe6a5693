pub(crate) const STDIN: &str = "stdin";
pub(crate) const STDOUT: &str = "stdout";
pub(crate) const DEFAULT_ORDERING: &str = "random";
pub(crate) const DEFAULT_DURATION: &str = "10s";
pub(crate) const DEFAULT_TIMEOUT: &str = "30s";
pub(crate) const DEFAULT_LADDR: &str = "0.0.0.0";
pub(crate) const DEFAULT_NUMBER: u64 = 1000;
pub(crate) const DEFAULT_REPORTER: &str = "text";
