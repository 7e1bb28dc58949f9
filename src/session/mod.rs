pub mod console;
pub mod credentials;
pub mod supervisor;

pub use credentials::CredentialPool;
pub use supervisor::{SessionDriver, SessionEnd, SessionError, SessionSupervisor};
