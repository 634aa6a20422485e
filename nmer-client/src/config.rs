use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct SkinServerConfiguration {
    /// The base URL bare skin names are resolved against.
    /// A name `n` downloads from `{skin_server}n.png`.
    #[serde(default = "default_skin_server")]
    pub skin_server: String,

    /// Upper bound, in bytes, for a downloaded skin image.
    #[serde(default = "default_max_skin_size")]
    pub max_skin_size: u64,
}

impl Default for SkinServerConfiguration {
    fn default() -> Self {
        Self {
            skin_server: default_skin_server(),
            max_skin_size: default_max_skin_size(),
        }
    }
}

fn default_skin_server() -> String {
    "http://s3.amazonaws.com/MinecraftSkins/".to_string()
}

#[inline]
const fn default_max_skin_size() -> u64 {
    262_144
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_public_skin_server() {
        let config = SkinServerConfiguration::default();
        assert!(config.skin_server.ends_with('/'));
        assert_eq!(config.max_skin_size, 262_144);
    }
}
