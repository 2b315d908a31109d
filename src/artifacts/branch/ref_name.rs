use crate::artifacts::branch::{HEADS_PREFIX, INVALID_REF_NAME_REGEX, TAGS_PREFIX};
use anyhow::Context;
use derive_new::new;

/// Full reference path relative to the git directory (`HEAD`, `refs/heads/main`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn as_ref_path(&self) -> &str {
        &self.0
    }

    /// Name with `refs/heads/` or `refs/tags/` stripped
    pub fn short_name(&self) -> &str {
        self.0
            .strip_prefix(HEADS_PREFIX)
            .or_else(|| self.0.strip_prefix(TAGS_PREFIX))
            .unwrap_or(&self.0)
    }
}

impl std::fmt::Display for SymRefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user supplied reference name, short (`main`, `v1.0`) or qualified
/// (`refs/tags/v1.0`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct RefName(String);

impl RefName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            anyhow::bail!("ref name cannot be empty");
        }

        let re = regex::Regex::new(INVALID_REF_NAME_REGEX)
            .with_context(|| format!("invalid ref name regex: {INVALID_REF_NAME_REGEX}"))?;

        if re.is_match(&name) {
            anyhow::bail!("invalid ref name: {}", name);
        } else {
            Ok(Self(name))
        }
    }

    pub fn branch(name: &str) -> anyhow::Result<Self> {
        Self::try_parse(format!("{HEADS_PREFIX}{name}"))
    }

    pub fn tag(name: &str) -> anyhow::Result<Self> {
        Self::try_parse(format!("{TAGS_PREFIX}{name}"))
    }

    /// Paths (relative to the git directory) this name may live at, in
    /// lookup order
    pub fn candidates(&self) -> Vec<SymRefName> {
        if self.0.starts_with("refs/") || self.0 == "HEAD" {
            return vec![SymRefName::new(self.0.clone())];
        }

        vec![
            SymRefName::new(self.0.clone()),
            SymRefName::new(format!("refs/{}", self.0)),
            SymRefName::new(format!("{TAGS_PREFIX}{}", self.0)),
            SymRefName::new(format!("{HEADS_PREFIX}{}", self.0)),
        ]
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
