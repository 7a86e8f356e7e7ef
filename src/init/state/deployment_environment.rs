#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeploymentEnvironment {
    Local,
    Dev,
    Staging,
    Prod,
}

impl DeploymentEnvironment {
    pub fn from_env() -> Self {
        Self::from_value(std::env::var("CURR_ENV").ok().as_deref())
    }

    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(s) => match s.trim().to_ascii_lowercase().as_str() {
                // Local
                "local" | "localhost" => DeploymentEnvironment::Local,
                // Dev
                "dev" | "develop" | "development" => DeploymentEnvironment::Dev,
                // Staging
                "staging" | "stage" | "stg" => DeploymentEnvironment::Staging,
                // Prod
                "prd" | "prod" | "production" => DeploymentEnvironment::Prod,
                // Default fallback: push _ to Local
                _ => DeploymentEnvironment::Local,
            },
            None => DeploymentEnvironment::Prod,
        }
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, DeploymentEnvironment::Prod)
    }
}
