//! Target lines and the request blueprints they describe.
mod file_spec;
mod headers;
mod model;
mod parser;


pub use file_spec::{BodySource, CHECKSUM_HEX_LEN, Checksum, FileSpec};
pub use headers::Headers;
pub use model::{STRESS_USER_AGENT, Target};
pub use parser::Targets;
