// Copyright 2023 rust-dns-sdk authors
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Client configuration, either explicit or resolved from environment variables.
//!
//! Resolving from the process environment writes every missing default back
//! into the environment, so later lookups in the same process agree with the
//! resolved configuration. Resolution is meant to happen once, at startup.
//! Callers that want no global side effects can resolve against a
//! [`MemoryEnv`] instead.

use std::collections::HashMap;
use std::env::{self, VarError};
use std::fmt;
use tracing::debug;
use crate::error::{Error, Result};
use crate::VERSION;

pub const ACCESS_KEY_VAR: &str = "VINYLDNS_ACCESS_KEY";
pub const SECRET_KEY_VAR: &str = "VINYLDNS_SECRET_KEY";
pub const HOST_VAR: &str = "VINYLDNS_HOST";
pub const USER_AGENT_VAR: &str = "VINYLDNS_USER_AGENT";

pub const DEFAULT_ACCESS_KEY: &str = "accesskey123";
pub const DEFAULT_SECRET_KEY: &str = "secretkey123";
pub const DEFAULT_HOST: &str = "host.name.com";

/// Product name sent in the default user agent.
pub const USER_AGENT_PRODUCT: &str = "go-vinyldns";

/// A key/value store of environment variables.
pub trait EnvSource {
    /// `Ok(None)` when `key` is unset.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str);
}

/// The environment of the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    /// Values that are not valid unicode are rejected rather than converted
    /// lossily, so credentials are never silently altered.
    fn get(&self, key: &str) -> Result<Option<String>> {
        match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(Error::EnvNotUnicode { var: key.to_string() }),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        // SAFETY: configuration is resolved at startup, before other threads
        // touch the environment.
        unsafe { env::set_var(key, value) }
    }
}

/// An owned set of variables, isolated from the process environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }
}

impl EnvSource for MemoryEnv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.vars.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Returns the value of `var`, first storing `default` in `source` if unset.
///
/// The value is re-read exactly once after the write. A source that does not
/// keep the write yields [`Error::EnvNotPersisted`].
pub fn env_or_default<E: EnvSource + ?Sized>(source: &mut E, var: &str, default: &str) -> Result<String> {
    if let Some(value) = source.get(var)? {
        return Ok(value);
    }

    debug!(var, "environment variable unset, applying default");
    source.set(var, default);

    source.get(var)?.ok_or_else(|| Error::EnvNotPersisted { var: var.to_string() })
}

/// The user agent sent when none is configured: `go-vinyldns/<version>`.
pub fn default_user_agent() -> String {
    format!("{}/{}", USER_AGENT_PRODUCT, VERSION)
}

/// Settings a [`Client`](crate::client::Client) is built from.
///
/// Fields are taken as given; nothing is validated here.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfiguration {
    pub access_key: String,
    pub secret_key: String,
    /// Base url of the VinylDNS API, e.g. `https://vinyldns.example.com`
    pub host: String,
    pub user_agent: String,
}

impl ClientConfiguration {
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        host: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            host: host.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Resolves the configuration from the process environment.
    ///
    /// Unset `VINYLDNS_ACCESS_KEY`, `VINYLDNS_SECRET_KEY` and `VINYLDNS_HOST`
    /// are set to their defaults for the rest of the process. `VINYLDNS_USER_AGENT`
    /// is only read.
    pub fn from_env() -> Result<Self> {
        Self::from_source(&mut ProcessEnv)
    }

    /// Resolves the configuration from any [`EnvSource`].
    pub fn from_source<E: EnvSource + ?Sized>(source: &mut E) -> Result<Self> {
        let access_key = env_or_default(source, ACCESS_KEY_VAR, DEFAULT_ACCESS_KEY)?;
        let secret_key = env_or_default(source, SECRET_KEY_VAR, DEFAULT_SECRET_KEY)?;
        let host = env_or_default(source, HOST_VAR, DEFAULT_HOST)?;
        let user_agent = source.get(USER_AGENT_VAR)?.unwrap_or_else(default_user_agent);

        Ok(Self {
            access_key,
            secret_key,
            host,
            user_agent,
        })
    }
}

impl fmt::Debug for ClientConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfiguration")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("host", &self.host)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Gives a test exclusive use of the `VINYLDNS_*` process variables.
///
/// The variables are cleared on acquire and again on drop, so a failing test
/// does not leak its values into the next one.
#[cfg(test)]
pub(crate) struct ProcessEnvGuard {
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ProcessEnvGuard {
    pub(crate) const VARS: [&'static str; 4] = [ACCESS_KEY_VAR, SECRET_KEY_VAR, HOST_VAR, USER_AGENT_VAR];

    pub(crate) fn acquire() -> Self {
        let guard = Self {
            _lock: ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner()),
        };
        guard.clear();
        guard
    }

    pub(crate) fn set(&self, key: &str, value: impl AsRef<std::ffi::OsStr>) {
        unsafe { env::set_var(key, value) }
    }

    fn clear(&self) {
        for var in Self::VARS {
            unsafe { env::remove_var(var) }
        }
    }
}

#[cfg(test)]
impl Drop for ProcessEnvGuard {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Accepts writes but never stores them.
    #[derive(Default)]
    struct ForgetfulEnv {
        writes: Cell<usize>,
    }

    impl EnvSource for ForgetfulEnv {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) {
            self.writes.set(self.writes.get() + 1);
        }
    }

    #[test]
    fn test_from_env_applies_defaults() {
        let _vars = ProcessEnvGuard::acquire();

        let config = ClientConfiguration::from_env().unwrap();

        assert_eq!(config.access_key, "accesskey123");
        assert_eq!(config.secret_key, "secretkey123");
        assert_eq!(config.host, "host.name.com");
        assert_eq!(config.user_agent, format!("go-vinyldns/{}", VERSION));

        assert_eq!(env::var(ACCESS_KEY_VAR).unwrap(), "accesskey123");
        assert_eq!(env::var(SECRET_KEY_VAR).unwrap(), "secretkey123");
        assert_eq!(env::var(HOST_VAR).unwrap(), "host.name.com");
        assert!(env::var(USER_AGENT_VAR).is_err());
    }

    #[test]
    fn test_from_env_with_explicit_user_agent() {
        let vars = ProcessEnvGuard::acquire();
        vars.set(USER_AGENT_VAR, "some customer UA");

        let config = ClientConfiguration::from_env().unwrap();

        assert_eq!(config.user_agent, "some customer UA");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_value_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let vars = ProcessEnvGuard::acquire();
        vars.set(SECRET_KEY_VAR, OsStr::from_bytes(b"secret\xff"));

        let err = ClientConfiguration::from_env().unwrap_err();

        assert!(matches!(err, Error::EnvNotUnicode { ref var } if var == SECRET_KEY_VAR));
        assert_eq!(env::var_os(SECRET_KEY_VAR).unwrap().as_bytes(), b"secret\xff");
    }

    #[test]
    fn test_guard_clears_variables_on_drop() {
        {
            let vars = ProcessEnvGuard::acquire();
            vars.set(HOST_VAR, "leaky.host");
        }
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        assert!(env::var_os(HOST_VAR).is_none());
    }

    #[test]
    fn test_existing_values_win_over_defaults() {
        let mut source = MemoryEnv::new()
            .with_var(ACCESS_KEY_VAR, "ak")
            .with_var(SECRET_KEY_VAR, "sk")
            .with_var(HOST_VAR, "https://vinyldns.example.com");

        let config = ClientConfiguration::from_source(&mut source).unwrap();

        assert_eq!(
            config,
            ClientConfiguration::new("ak", "sk", "https://vinyldns.example.com", default_user_agent())
        );
    }

    #[test]
    fn test_empty_value_counts_as_set() {
        let mut source = MemoryEnv::new().with_var(HOST_VAR, "");

        let config = ClientConfiguration::from_source(&mut source).unwrap();

        assert_eq!(config.host, "");
    }

    #[test]
    fn test_defaults_written_to_source() {
        let mut source = MemoryEnv::new();

        ClientConfiguration::from_source(&mut source).unwrap();

        assert_eq!(source.get(ACCESS_KEY_VAR).unwrap().as_deref(), Some("accesskey123"));
        assert_eq!(source.get(SECRET_KEY_VAR).unwrap().as_deref(), Some("secretkey123"));
        assert_eq!(source.get(HOST_VAR).unwrap().as_deref(), Some("host.name.com"));
        assert!(!source.contains(USER_AGENT_VAR));
    }

    #[test]
    fn test_unpersisted_default_fails_after_one_write() {
        let mut source = ForgetfulEnv::default();

        let err = env_or_default(&mut source, HOST_VAR, DEFAULT_HOST).unwrap_err();

        assert!(matches!(err, Error::EnvNotPersisted { ref var } if var == HOST_VAR));
        assert_eq!(source.writes.get(), 1);
    }

    #[test]
    fn test_from_source_propagates_write_failure() {
        let mut source = ForgetfulEnv::default();

        assert!(ClientConfiguration::from_source(&mut source).is_err());
        assert_eq!(source.writes.get(), 1);
    }

    #[test]
    fn test_default_user_agent_format() {
        assert_eq!(default_user_agent(), format!("go-vinyldns/{}", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ClientConfiguration::new("ak", "hunter2", "host", "ua");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_memory_env_from_iter() {
        let source: MemoryEnv = [(HOST_VAR, "h")].into_iter().collect();
        assert_eq!(source.get(HOST_VAR).unwrap().as_deref(), Some("h"));
    }
}
