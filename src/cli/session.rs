//! Resolution of the acting user for a CLI invocation.

use anyhow::{Result, anyhow};

use super::config::Config;
use crate::access::{Identity, IdentitySource};
use crate::domain::Username;

/// The identity a single CLI invocation acts as.
///
/// Precedence: `--user` flag, then `NOTESHARE_USER` (both handled by clap),
/// then the config file `user`. With none of them the session is anonymous.
#[derive(Debug, Clone)]
pub struct Session {
    identity: Identity,
}

impl Session {
    pub fn new(cli_user: Option<&Username>, config: &Config) -> Self {
        let user = cli_user.or(config.user.as_ref()).cloned();
        Self {
            identity: Identity::from(user),
        }
    }

    /// Returns the signed-in user, failing for anonymous sessions.
    pub fn require_user(&self) -> Result<Username> {
        self.current_user().user().cloned().ok_or_else(|| {
            anyhow!("not signed in: pass --user, set NOTESHARE_USER, or set `user` in the config file")
        })
    }
}

impl IdentitySource for Session {
    fn current_user(&self) -> Identity {
        self.identity.clone()
    }
}
