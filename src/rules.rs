use std::fmt::{self, Display};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::types::Rgb;

#[derive(Copy, Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Warning,
    Error,
    Default,
}

impl AlertKind {
    pub const ALL: [Self; 4] = [Self::Success, Self::Warning, Self::Error, Self::Default];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Default => "default",
        }
    }
}

impl Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertRule {
    /// Keyword searched for in the message body
    #[serde(default)]
    pub text: Option<String>,
    pub color: Rgb,
}

impl AlertRule {
    #[must_use]
    pub fn matches(&self, message: &str) -> bool {
        self.text
            .as_deref()
            .is_some_and(|text| !text.is_empty() && message.contains(text))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlertStates {
    pub success: AlertRule,
    pub warning: AlertRule,
    pub error: AlertRule,
    pub default: AlertRule,
}

impl AlertStates {
    #[must_use]
    pub const fn get(&self, kind: AlertKind) -> &AlertRule {
        match kind {
            AlertKind::Success => &self.success,
            AlertKind::Warning => &self.warning,
            AlertKind::Error => &self.error,
            AlertKind::Default => &self.default,
        }
    }

    /// Pick the first keyword rule (success, warning, error) found in
    /// `message`, falling back to the default rule.
    #[must_use]
    pub fn classify(&self, message: &str) -> (AlertKind, &AlertRule) {
        [AlertKind::Success, AlertKind::Warning, AlertKind::Error]
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .find(|(_, rule)| rule.matches(message))
            .unwrap_or((AlertKind::Default, &self.default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(text: &str, color: [u8; 3]) -> AlertRule {
        AlertRule {
            text: Some(text.to_string()),
            color: color.into(),
        }
    }

    fn states() -> AlertStates {
        AlertStates {
            success: rule("Build succeeded", [0, 255, 0]),
            warning: rule("unstable", [255, 160, 0]),
            error: rule("FAILED", [255, 0, 0]),
            default: AlertRule {
                text: None,
                color: Rgb::new(0, 0, 255),
            },
        }
    }

    #[test]
    fn keyword_match() {
        let states = states();
        assert_eq!(
            states.classify("Build succeeded in 3m").0,
            AlertKind::Success
        );
        assert_eq!(states.classify("tests unstable").0, AlertKind::Warning);

        let (kind, rule) = states.classify("Deploy FAILED on prod");
        assert_eq!(kind, AlertKind::Error);
        assert_eq!(rule.color, Rgb::new(255, 0, 0));
    }

    #[test]
    fn match_is_case_sensitive_substring() {
        assert_eq!(states().classify("deploy failed").0, AlertKind::Default);
    }

    #[test]
    fn first_rule_wins() {
        let kind = states().classify("Build succeeded, but tests unstable").0;
        assert_eq!(kind, AlertKind::Success);
    }

    #[test]
    fn fallback_to_default() {
        let states = states();
        let (kind, rule) = states.classify("lunch is ready");
        assert_eq!(kind, AlertKind::Default);
        assert_eq!(rule.color, Rgb::new(0, 0, 255));
    }

    #[test]
    fn empty_keyword_never_matches() {
        let mut states = states();
        states.success.text = Some(String::new());
        assert_eq!(states.classify("anything").0, AlertKind::Default);
    }

    #[test]
    fn kind_names() {
        let kind: AlertKind = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(kind, AlertKind::Warning);
        assert_eq!(AlertKind::Default.to_string(), "default");
    }
}
