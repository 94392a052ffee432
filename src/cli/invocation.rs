//! Per-invocation resolution from parsed global flags.
use crate::{
    config::{self, ConfigView, InvocationInputs, Profile, ProfileStore, Resolution},
    lib::errors::{ProfileStoreError, ResolveError},
};

use super::GlobalArgs;

impl GlobalArgs {
    /// Gather the raw inputs, reading the config file and environment.
    pub fn invocation_inputs(&self) -> Result<InvocationInputs, ResolveError> {
        let view = ConfigView::load(self.config.clone())?;
        Ok(InvocationInputs::new(view)
            .with_address(self.address.clone())
            .with_token(self.token.clone())
            .with_profile(self.profile.clone())
            .with_token_file(self.token_file.clone()))
    }

    /// Resolve the address and token for this invocation.
    ///
    /// Only commands that need an API client call this.
    pub fn resolve(&self) -> Result<Resolution, ResolveError> {
        resolve_inputs(&self.invocation_inputs()?)
    }
}

/// Resolve against the per-user profile store, opened only when `--profile` was given.
pub fn resolve_inputs(inputs: &InvocationInputs) -> Result<Resolution, ResolveError> {
    let lookup = |name: &str| -> Result<Profile, ProfileStoreError> {
        ProfileStore::open_default()?.load(name)
    };
    config::resolve(inputs, &lookup)
}
