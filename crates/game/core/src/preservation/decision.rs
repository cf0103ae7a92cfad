/// Verdict of a preservation rule for a whole stack.
///
/// Verdicts fold with `Drop` > `Preserve` > `Ignore` precedence, so the
/// outcome never depends on the order rules are evaluated in.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Decision {
    /// Always drop the stack.
    Drop,
    /// Always keep the stack.
    Preserve,
    /// No opinion; later tiers decide.
    #[default]
    Ignore,
}

impl Decision {
    const fn rank(self) -> u8 {
        match self {
            Self::Drop => 2,
            Self::Preserve => 1,
            Self::Ignore => 0,
        }
    }

    /// Combines two verdicts with drop > preserve > ignore precedence.
    #[must_use]
    pub const fn combine(self, other: Decision) -> Decision {
        if other.rank() > self.rank() { other } else { self }
    }

    /// Folds any number of verdicts, `Ignore` when empty.
    pub fn fold<I>(decisions: I) -> Decision
    where
        I: IntoIterator<Item = Decision>,
    {
        decisions
            .into_iter()
            .fold(Decision::Ignore, Decision::combine)
    }

    /// `Some(true)` keep-all, `Some(false)` drop-all, `None` no opinion.
    pub const fn as_verdict(self) -> Option<bool> {
        match self {
            Self::Drop => Some(false),
            Self::Preserve => Some(true),
            Self::Ignore => None,
        }
    }
}
