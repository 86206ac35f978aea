use super::AwsCredentials;

/// Credentials attached to every object store request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Auth {
    /// Use a bearer token via the Authorization header
    Bearer(String),
    /// Use username and password authentication via Basic Auth headers
    Basic(String, String),
    /// Sign each request with AWS Signature Version 4
    Aws(AwsCredentials),
    /// Don't use any authentication
    None,
}

impl Auth {
    /// Pick an auth mode from optional credentials
    ///
    /// A token wins over a username/password pair; a pair with a missing half is ignored.
    pub fn new(token: Option<String>, username: Option<String>, password: Option<String>) -> Self {
        match (token, username, password) {
            (Some(token), _, _) => Self::Bearer(token),
            (None, Some(username), Some(password)) => Self::Basic(username, password),
            _ => Self::None,
        }
    }
}

impl std::fmt::Display for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => write!(f, "Bearer"),
            Self::Basic(_, _) => write!(f, "Basic"),
            Self::Aws(credentials) => write!(f, "AWS SigV4 ({})", credentials.region),
            Self::None => write!(f, "None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_wins() {
        let auth = Auth::new(
            Some("t0ken".to_string()),
            Some("user".to_string()),
            Some("pass".to_string()),
        );
        assert_eq!(auth, Auth::Bearer("t0ken".to_string()));
    }

    #[test]
    fn test_basic_needs_both_halves() {
        assert_eq!(Auth::new(None, Some("user".to_string()), None), Auth::None);
        assert_eq!(
            Auth::new(None, Some("user".to_string()), Some("pass".to_string())),
            Auth::Basic("user".to_string(), "pass".to_string())
        );
    }

    #[test]
    fn test_display_hides_secrets() {
        let auth = Auth::Basic("user".to_string(), "secret".to_string());
        assert_eq!(auth.to_string(), "Basic");

        let auth = Auth::Aws(AwsCredentials {
            access_key_id: "AKID".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: None,
            region: "eu-west-1".to_string(),
        });
        assert_eq!(auth.to_string(), "AWS SigV4 (eu-west-1)");
    }
}
