pub mod config;
pub mod error;
pub mod pools;
pub mod shares;

pub use config::{ConfigSource, CredentialsConfig, SharedConfig, SubPoolConfig, SubPoolParameters};
pub use error::{ConfigError, NormalizeError};
pub use pools::{PoolBackend, PoolSnapshot};
pub use shares::{NormalizedSnapshot, ShareNormalizer, WorkerShare};
