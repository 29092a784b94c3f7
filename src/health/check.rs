use std::fmt;

/// Outcome of a single health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Green,
    Red {
        /// What is wrong.
        message: String,
        /// How to fix it.
        suggestion: String,
    },
}

impl CheckResult {
    pub fn is_green(&self) -> bool {
        matches!(self, Self::Green)
    }
}

#[mutants::skip]
impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Green => f.write_str("Passed"),
            Self::Red {
                message,
                suggestion,
            } => write!(f, "Failed: {message}. Fix: {suggestion}"),
        }
    }
}

/// A user-facing health check and its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub title: String,
    /// The information the check was conducted on.
    pub info: String,
    pub result: CheckResult,
    /// Failures of non-required checks are not critical.
    pub required: bool,
}

/// A [`Check`] with a stable identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCheck {
    pub name: String,
    pub check: Check,
}

impl NamedCheck {
    pub fn new(name: impl Into<String>, check: Check) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

/// Aggregate verdict over a list of checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every check passed.
    Pass,
    /// Required checks passed, some optional ones failed.
    PassSomeFail,
    /// At least one required check failed.
    Fail,
}

impl Verdict {
    pub fn evaluate(checks: &[NamedCheck]) -> Self {
        checks
            .iter()
            .filter(|nc| !nc.check.result.is_green())
            .fold(Self::Pass, |verdict, nc| match (verdict, nc.check.required) {
                (_, true) | (Self::Fail, _) => Self::Fail,
                _ => Self::PassSomeFail,
            })
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::Pass => "All checks passed",
            Self::PassSomeFail => "Required checks passed, but some non-required checks failed",
            Self::Fail => "Some required checks failed",
        }
    }

    pub fn is_pass(self) -> bool {
        !matches!(self, Self::Fail)
    }
}
