use thiserror::Error;

/// Cleanup aggressiveness tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupLevel {
    /// No cleanup at all; input passes through verbatim.
    Disabled,
    /// Only obvious interjections (um, uh, ah).
    Light,
    /// Fillers, repetitions, and false starts.
    Standard,
    /// Language-model rewrite with rule-based fallback.
    Aggressive,
}

/// Returned at construction when the configured level string is not one of
/// the supported literals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cleanup level '{0}'. Supported levels: off, light, standard, aggressive")]
pub struct UnknownLevelError(pub String);

impl CleanupLevel {
    /// Parse a configured level literal.
    pub fn from_name(name: &str) -> Result<Self, UnknownLevelError> {
        match name {
            "off" => Ok(CleanupLevel::Disabled),
            "light" => Ok(CleanupLevel::Light),
            "standard" => Ok(CleanupLevel::Standard),
            "aggressive" => Ok(CleanupLevel::Aggressive),
            other => Err(UnknownLevelError(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CleanupLevel::Disabled => "off",
            CleanupLevel::Light => "light",
            CleanupLevel::Standard => "standard",
            CleanupLevel::Aggressive => "aggressive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_all_levels() {
        assert_eq!(CleanupLevel::from_name("off"), Ok(CleanupLevel::Disabled));
        assert_eq!(CleanupLevel::from_name("light"), Ok(CleanupLevel::Light));
        assert_eq!(
            CleanupLevel::from_name("standard"),
            Ok(CleanupLevel::Standard)
        );
        assert_eq!(
            CleanupLevel::from_name("aggressive"),
            Ok(CleanupLevel::Aggressive)
        );
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        let err = CleanupLevel::from_name("maximum").unwrap_err();
        assert!(err.to_string().contains("unknown cleanup level 'maximum'"));
        assert!(err.to_string().contains("off, light, standard, aggressive"));
    }

    #[test]
    fn test_as_str_round_trips() {
        for name in ["off", "light", "standard", "aggressive"] {
            assert_eq!(CleanupLevel::from_name(name).unwrap().as_str(), name);
        }
    }
}
