use figment::providers::{Data, Format, Json, Toml, Yaml};
use std::path::Path;

/// Configuration file loader that chooses the format from the file extension.
/// Files without a known extension are sniffed, falling back to TOML.
pub fn provider<P: AsRef<Path>>(path: P) -> impl figment::Provider {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "toml" => FileProvider::Toml(Toml::file(path)),
        "json" => FileProvider::Json(Json::file(path)),
        "yaml" | "yml" => FileProvider::Yaml(Yaml::file(path)),
        _ => {
            let detected = std::fs::read_to_string(path)
                .ok()
                .and_then(|content| detect_format_from_content(&content));
            tracing::debug!(
                "config {} has no known extension, reading as {}",
                path.display(),
                detected.unwrap_or("toml")
            );
            match detected {
                Some("json") => FileProvider::Json(Json::file(path)),
                Some("yaml") => FileProvider::Yaml(Yaml::file(path)),
                _ => FileProvider::Toml(Toml::file(path)),
            }
        }
    }
}

enum FileProvider {
    Toml(Data<Toml>),
    Json(Data<Json>),
    Yaml(Data<Yaml>),
}

impl figment::Provider for FileProvider {
    fn metadata(&self) -> figment::Metadata {
        match self {
            FileProvider::Toml(p) => p.metadata(),
            FileProvider::Json(p) => p.metadata(),
            FileProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(
        &self,
    ) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, figment::Error> {
        match self {
            FileProvider::Toml(p) => p.data(),
            FileProvider::Json(p) => p.data(),
            FileProvider::Yaml(p) => p.data(),
        }
    }
}

fn detect_format_from_content(content: &str) -> Option<&'static str> {
    let trimmed = content.trim();

    if (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']') && !trimmed.contains('\n'))
    {
        return Some("json");
    }

    // TOML first: "[[repos]]" and "key = value" lines are unambiguous
    if trimmed.lines().any(|line| {
        let line = line.trim();
        (line.starts_with('[') && line.ends_with(']')) || (line.contains('=') && !line.contains(':'))
    }) {
        return Some("toml");
    }

    if trimmed.starts_with("---")
        || trimmed.lines().any(|line| {
            let line = line.trim();
            line.starts_with("- ") || (line.contains(':') && !line.starts_with('['))
        })
    {
        return Some("yaml");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            detect_format_from_content(r#"{"repos": [{"path": "/tmp"}]}"#),
            Some("json")
        );
        assert_eq!(
            detect_format_from_content("repos:\n  - path: /tmp\n"),
            Some("yaml")
        );
        assert_eq!(
            detect_format_from_content("[[repos]]\npath = \"/tmp\"\n"),
            Some("toml")
        );
        assert_eq!(detect_format_from_content(""), None);
    }
}
