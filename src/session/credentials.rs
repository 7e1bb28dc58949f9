use crate::errors::{VdResult, VoiceDeskError};

/// Highest numbered suffix probed when collecting keys from the environment.
const MAX_SUFFIX: u32 = 8;

/// Ordered set of realtime-session API keys with a rotation cursor. Built
/// from one base env var plus numbered variants (`FOO`, `FOO_1`, `FOO_2`, …)
/// so users can drop in backup keys without config changes.
pub struct CredentialPool {
    keys: Vec<String>,
    cursor: usize,
}

impl CredentialPool {
    pub fn from_env(base: &str) -> VdResult<Self> {
        let mut keys = Vec::new();
        if let Ok(value) = std::env::var(base) {
            if !value.trim().is_empty() {
                keys.push(value);
            }
        }
        for n in 1..=MAX_SUFFIX {
            if let Ok(value) = std::env::var(format!("{base}_{n}")) {
                if !value.trim().is_empty() {
                    keys.push(value);
                }
            }
        }
        tracing::info!(base, count = keys.len(), "credential pool collected");
        Self::from_keys(keys)
    }

    pub fn from_keys(keys: Vec<String>) -> VdResult<Self> {
        if keys.is_empty() {
            return Err(VoiceDeskError::Config(
                "no session credentials configured".into(),
            ));
        }
        Ok(Self { keys, cursor: 0 })
    }

    pub fn current(&self) -> &str {
        &self.keys[self.cursor]
    }

    /// Rotates to the next key, wrapping back to the first after the last.
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.keys.len();
        tracing::info!(slot = self.cursor + 1, total = self.keys.len(), "rotated credential");
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
