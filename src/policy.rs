//! Validation policy: the configurable toggles of the pipeline.
//!
//! A [`Policy`] is a plain value passed to each validator. For applications
//! that want one policy everywhere, [`install_default`] sets a process-wide
//! default once at startup; [`Policy::global`] reads it afterwards. The
//! installed policy is never mutated.
//!
//! # Example
//!
//! ```
//! use cardcheck::Policy;
//!
//! let policy = Policy::default()
//!     .require_verification_value(false)
//!     .with_supported_providers(["master", "visa", "gaga"]);
//!
//! // Catalog order, unknown names dropped.
//! assert_eq!(policy.supported_provider_names(), vec!["visa", "master"]);
//! assert!(policy.supports("VISA"));
//! assert!(!policy.supports("american_express"));
//! ```

use std::sync::OnceLock;

use crate::error::PolicyError;
use crate::provider::Provider;

/// Options controlling which rules run and what they accept.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Policy {
    require_verification_value: bool,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::provider_names"))]
    supported_providers: Vec<Provider>,
    auto_derive_provider_name: bool,
}

impl Default for Policy {
    /// Verification value required, every catalog provider supported,
    /// provider name derived from the number.
    fn default() -> Self {
        Self {
            require_verification_value: true,
            supported_providers: Provider::ALL.to_vec(),
            auto_derive_provider_name: true,
        }
    }
}

impl Policy {
    /// Creates the default policy.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether a blank verification value is an error.
    #[must_use]
    pub fn require_verification_value(mut self, required: bool) -> Self {
        self.require_verification_value = required;
        self
    }

    /// Sets whether the provider name is derived from the number before validation.
    #[must_use]
    pub fn auto_derive_provider_name(mut self, enabled: bool) -> Self {
        self.auto_derive_provider_name = enabled;
        self
    }

    /// Narrows the supported providers to the catalog entries named in `names`.
    ///
    /// Names are matched case-insensitively. Names outside the catalog are
    /// dropped, so the result may be empty. The catalog order is kept.
    #[must_use]
    pub fn with_supported_providers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.supported_providers = narrow(names);
        self
    }

    /// Whether a blank verification value is an error.
    #[inline]
    pub fn requires_verification_value(&self) -> bool {
        self.require_verification_value
    }

    /// Whether the provider name is derived from the number.
    #[inline]
    pub fn derives_provider_name(&self) -> bool {
        self.auto_derive_provider_name
    }

    /// The supported providers, in catalog order.
    #[inline]
    pub fn supported_providers(&self) -> &[Provider] {
        &self.supported_providers
    }

    /// Names of the supported providers, in catalog order.
    pub fn supported_provider_names(&self) -> Vec<&'static str> {
        self.supported_providers.iter().map(Provider::name).collect()
    }

    /// Whether `name` (case-insensitive) is a supported provider.
    pub fn supports(&self, name: &str) -> bool {
        Provider::from_name(name).is_some_and(|provider| self.supported_providers.contains(&provider))
    }

    /// The process-wide default policy.
    ///
    /// Returns the policy given to [`install_default`], or the built-in
    /// default if none was installed. Once read, the built-in default is
    /// locked in and later installs fail.
    pub fn global() -> &'static Policy {
        GLOBAL.get_or_init(Policy::default)
    }

    /// Parses a policy from JSON. Missing keys take their default values.
    ///
    /// ```
    /// use cardcheck::Policy;
    ///
    /// let policy = Policy::from_json(r#"{"supported_providers": ["master"]}"#).unwrap();
    /// assert_eq!(policy.supported_provider_names(), vec!["master"]);
    /// assert!(policy.requires_verification_value());
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Policy, PolicyError> {
        let policy = serde_json::from_str(json)?;
        tracing::debug!(?policy, "loaded policy");
        Ok(policy)
    }

    /// Reads a JSON policy file.
    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Policy, PolicyError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

static GLOBAL: OnceLock<Policy> = OnceLock::new();

/// Installs the process-wide default policy.
///
/// Meant to be called once during startup, before any validation runs.
/// Fails with [`PolicyError::AlreadyInstalled`] if a policy was installed
/// earlier or [`Policy::global`] has already been read.
pub fn install_default(policy: Policy) -> Result<(), PolicyError> {
    GLOBAL.set(policy).map_err(|_| PolicyError::AlreadyInstalled)?;
    tracing::debug!("installed default policy");
    Ok(())
}

/// Intersection of `names` with the catalog, in catalog order.
fn narrow<I, S>(names: I) -> Vec<Provider>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let requested: Vec<Provider> = names
        .into_iter()
        .filter_map(|name| Provider::from_name(name.as_ref()))
        .collect();

    Provider::ALL
        .into_iter()
        .filter(|provider| requested.contains(provider))
        .collect()
}

#[cfg(feature = "serde")]
mod de {
    use serde::{Deserialize, Deserializer};

    use crate::provider::Provider;

    pub(super) fn provider_names<'de, D>(deserializer: D) -> Result<Vec<Provider>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(super::narrow(names))
    }
}
