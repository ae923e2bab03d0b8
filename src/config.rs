use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Populate the catalog and the demo account at startup.
    pub seed_demo_data: bool,
    /// Account every request acts as; there is no real session.
    pub session_username: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let seed_demo_data = match env::var("SEED_DEMO_DATA") {
            Ok(value) => parse_flag(&value)?,
            Err(_) => true,
        };
        let session_username =
            env::var("DEMO_USERNAME").unwrap_or_else(|_| crate::seed::DEMO_USERNAME.to_string());
        Ok(Self {
            host,
            port,
            seed_demo_data,
            session_username,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            seed_demo_data: true,
            session_username: crate::seed::DEMO_USERNAME.to_string(),
        }
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("SEED_DEMO_DATA must be a boolean, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn parses_common_boolean_spellings() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag(" YES ").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
