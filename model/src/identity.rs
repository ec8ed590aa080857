use crate::constants::{MAX_NAMESPACE_LEN, MAX_NAME_LEN};
use crate::error::{self, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DNS_1123_LABEL_REGEX: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";
const DNS_1123_SUBDOMAIN_REGEX: &str =
    r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$";

lazy_static! {
    static ref LABEL: Regex = {
        #[allow(clippy::unwrap_used)]
        Regex::new(DNS_1123_LABEL_REGEX).unwrap()
    };
    static ref SUBDOMAIN: Regex = {
        #[allow(clippy::unwrap_used)]
        Regex::new(DNS_1123_SUBDOMAIN_REGEX).unwrap()
    };
}

/// Identifies a namespaced Kubernetes object. The string form, which is also the id accepted when
/// importing an existing object, is `namespace/name`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ResourceIdentity {
    pub namespace: String,
    pub name: String,
}

impl ResourceIdentity {
    pub fn new<S1, S2>(namespace: S1, name: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parse an id of the form `namespace/name` and validate both parts.
    pub fn parse(id: &str) -> Result<Self> {
        let mut parts = id.split('/');
        let (namespace, name) = match (parts.next(), parts.next(), parts.next()) {
            (Some(namespace), Some(name), None) if !namespace.is_empty() && !name.is_empty() => {
                (namespace, name)
            }
            _ => return error::IdentityFormatSnafu { id }.fail().map_err(Into::into),
        };
        let identity = Self::new(namespace, name);
        identity.validate()?;
        Ok(identity)
    }

    /// Check the namespace against the DNS-1123 label rules and the name against the DNS-1123
    /// subdomain rules.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.namespace.is_empty() && self.namespace.len() <= MAX_NAMESPACE_LEN,
            error::InvalidNamespaceSnafu {
                namespace: &self.namespace,
                reason: format!("must be between 1 and {} characters", MAX_NAMESPACE_LEN),
            }
        );
        ensure!(
            LABEL.is_match(&self.namespace),
            error::InvalidNamespaceSnafu {
                namespace: &self.namespace,
                reason: "must consist of lower case alphanumeric characters or '-', and must \
                    start and end with an alphanumeric character",
            }
        );
        ensure!(
            !self.name.is_empty() && self.name.len() <= MAX_NAME_LEN,
            error::InvalidNameSnafu {
                name: &self.name,
                reason: format!("must be between 1 and {} characters", MAX_NAME_LEN),
            }
        );
        ensure!(
            SUBDOMAIN.is_match(&self.name),
            error::InvalidNameSnafu {
                name: &self.name,
                reason: "must consist of lower case alphanumeric characters, '-' or '.', and \
                    must start and end with an alphanumeric character",
            }
        );
        Ok(())
    }
}

impl Display for ResourceIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

impl FromStr for ResourceIdentity {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}
