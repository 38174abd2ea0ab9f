use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

///
/// What a subiterator does with a candidate that is colocated with its container when the
/// priority table declares no order between their types (or they share a type).
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SameSpanPolicy {
    /// Leave the candidate out.
    #[default]
    Exclude,
    /// Yield the candidate.
    Include,
    /// Yield the candidate iff it sorts after the container in the index.
    IndexOrder,
}

impl FromStr for SameSpanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exclude" => Ok(SameSpanPolicy::Exclude),
            "include" => Ok(SameSpanPolicy::Include),
            "index-order" => Ok(SameSpanPolicy::IndexOrder),
            _ => Err(format!(
                "Invalid same span policy: {} (expected exclude, include or index-order)",
                s
            )),
        }
    }
}

impl Display for SameSpanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SameSpanPolicy::Exclude => "exclude",
            SameSpanPolicy::Include => "include",
            SameSpanPolicy::IndexOrder => "index-order",
        };
        write!(f, "{}", name)
    }
}

/// Behavior switches of an [`AnnotationIndex`](crate::AnnotationIndex).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexOptions {
    #[serde(default)]
    pub same_span_policy: SameSpanPolicy,
}

impl IndexOptions {
    pub fn with_same_span_policy(mut self, policy: SameSpanPolicy) -> Self {
        self.same_span_policy = policy;
        self
    }
}
