use std::fmt;

/// Fatal errors. Recoverable conditions (a full projectile pool, a clamped
/// move) are never reported through this type.
#[derive(Debug)]
pub enum SimError {
    /// A configuration value is out of range.
    InvalidConfig(String),
    /// A JSON configuration could not be parsed.
    Config(serde_json::Error),
    /// A per-frame query referenced a body the world no longer holds.
    MissingBody(&'static str),
    /// A frame was requested before the simulation was built.
    NotInitialized,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
            SimError::Config(err) => write!(f, "failed to parse configuration: {err}"),
            SimError::MissingBody(which) => write!(f, "{which} body is not in the physics world"),
            SimError::NotInitialized => write!(f, "simulation has not been initialized"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_problem() {
        let err = SimError::InvalidConfig("pool_capacity must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: pool_capacity must be at least 1"
        );
        assert_eq!(
            SimError::MissingBody("control").to_string(),
            "control body is not in the physics world"
        );
    }

    #[test]
    fn json_errors_keep_their_source() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = SimError::from(parse);
        assert!(std::error::Error::source(&err).is_some());
    }
}
