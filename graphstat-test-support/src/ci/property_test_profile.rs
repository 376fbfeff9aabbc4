//! Property-test run profile read from the environment.
//!
//! Suites pass their own defaults; CI raises or lowers the case count and
//! toggles forking without touching code.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable toggling forked proptest execution.
pub const GRAPHSTAT_PBT_FORK_ENV_KEY: &str = "GRAPHSTAT_PBT_FORK";

/// Case count and fork mode for one property suite.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads overrides from the environment, falling back to the supplied
    /// defaults when a variable is unset or malformed.
    ///
    /// # Examples
    /// ```
    /// use graphstat_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PROGTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(GRAPHSTAT_PBT_FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Number of cases each property should run.
    #[must_use]
    #[rustfmt::skip]
    pub fn cases(&self) -> u32 { self.cases }

    /// Whether proptest should fork per case.
    #[must_use]
    #[rustfmt::skip]
    pub fn fork(&self) -> bool { self.fork }
}

fn override_or<T: Copy>(key: &'static str, default: T, parse: fn(&str) -> Option<T>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|| {
        tracing::warn!(env = key, raw = %raw, "ignoring malformed property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|&cases| cases > 0)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("7", Some(7))]
    #[case(" 1200 ", Some(1200))]
    #[case("0", None)]
    #[case("-3", None)]
    #[case("many", None)]
    fn parses_case_counts(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_cases(raw), expected);
    }

    #[rstest]
    #[case("TRUE", Some(true))]
    #[case("on", Some(true))]
    #[case("0", Some(false))]
    #[case("No", Some(false))]
    #[case("", None)]
    #[case("2", None)]
    fn parses_fork_flags(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_flag(raw), expected);
    }
}
