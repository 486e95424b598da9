use serde::Deserialize;

/// How the reader reacts to a line it cannot decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParsePolicy {
    /// Record the failure with its line number and keep going.
    #[default]
    Accumulate,
    /// Abort the parse at the first failing line.
    FailFast,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReaderConfig {
    pub policy: ParsePolicy,
    /// Convert HETATM records into atoms instead of warning about them.
    pub include_hetatm: bool,
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: ParsePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_include_hetatm(mut self, include: bool) -> Self {
        self.include_hetatm = include;
        self
    }

    pub fn strict() -> Self {
        Self::default().with_policy(ParsePolicy::FailFast)
    }
}
