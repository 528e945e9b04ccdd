use std::fmt;

use super::parsing::ModelInfo;

// ===== API VERSION =====

/// Endpoint surface version a model is certified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V1Beta,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V1Beta => "v1beta",
        }
    }

    /// The other surface version (v1 ↔ v1beta).
    pub fn toggled(self) -> Self {
        match self {
            ApiVersion::V1 => ApiVersion::V1Beta,
            ApiVersion::V1Beta => ApiVersion::V1,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "v1" => Some(ApiVersion::V1),
            "v1beta" => Some(ApiVersion::V1Beta),
            _ => None,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== MODEL SPEC =====

/// Concrete model-name/API-version pair for a single generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub model: String,
    pub version: ApiVersion,
}

impl ModelSpec {
    pub fn new(model: impl Into<String>, version: ApiVersion) -> Self {
        Self {
            model: model.into(),
            version,
        }
    }
}

impl fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.model, self.version)
    }
}

// ===== DEFAULT VERSION RULES =====

enum Pattern {
    Exact(&'static str),
    Prefix(&'static str),
}

struct VersionRule {
    pattern: Pattern,
    rename_to: Option<&'static str>,
    version: ApiVersion,
}

// Different model families were certified against different surface versions
// by the provider at different times. First matching rule wins; add new
// families here instead of branching at call sites.
const VERSION_RULES: &[VersionRule] = &[
    VersionRule {
        pattern: Pattern::Exact("gemini-pro"),
        rename_to: Some("gemini-1.0-pro"),
        version: ApiVersion::V1Beta,
    },
    VersionRule {
        pattern: Pattern::Prefix("gemini-1.5"),
        rename_to: None,
        version: ApiVersion::V1,
    },
    VersionRule {
        pattern: Pattern::Prefix("gemini-1.0"),
        rename_to: None,
        version: ApiVersion::V1Beta,
    },
];

/// Resolve the requested logical model identifier to the spec for the primary
/// attempt. An explicit version override keeps the name unchanged and skips
/// the rule table; unmatched identifiers default to v1.
pub fn resolve_default_spec(requested: &str, version_override: Option<ApiVersion>) -> ModelSpec {
    if let Some(version) = version_override {
        return ModelSpec::new(requested, version);
    }

    for rule in VERSION_RULES {
        let matched = match rule.pattern {
            Pattern::Exact(name) => requested == name,
            Pattern::Prefix(prefix) => requested.starts_with(prefix),
        };
        if matched {
            return ModelSpec::new(rule.rename_to.unwrap_or(requested), rule.version);
        }
    }

    ModelSpec::new(requested, ApiVersion::V1)
}

// ===== FALLBACK CANDIDATES =====

const LATEST_SUFFIX: &str = "-latest";

/// Model name with `-latest` appended, or `None` when it already carries the
/// suffix (never double-appended).
pub fn with_latest_suffix(model: &str) -> Option<String> {
    if model.ends_with(LATEST_SUFFIX) {
        None
    } else {
        Some(format!("{}{}", model, LATEST_SUFFIX))
    }
}

/// First three hyphen-delimited segments of a model name, used for
/// approximate matching against the listing endpoint.
pub fn family_prefix(model: &str) -> String {
    model.split('-').take(3).collect::<Vec<_>>().join("-")
}

/// Select a fallback model from a listing result. Precedence: exact name with
/// generateContent support, then that name with `-latest`, then any model in
/// the same family, then the first model supporting generateContent at all.
pub fn pick_fallback_model(target: &str, models: &[ModelInfo]) -> Option<String> {
    if let Some(model) = models
        .iter()
        .find(|m| m.short_name() == target && m.supports_generate_content())
    {
        return Some(model.short_name().to_string());
    }

    if let Some(latest) = with_latest_suffix(target) {
        if let Some(model) = models
            .iter()
            .find(|m| m.short_name() == latest && m.supports_generate_content())
        {
            return Some(model.short_name().to_string());
        }
    }

    let family = family_prefix(target);
    if let Some(model) = models
        .iter()
        .find(|m| family_prefix(m.short_name()) == family)
    {
        return Some(model.short_name().to_string());
    }

    models
        .iter()
        .find(|m| m.supports_generate_content())
        .map(|m| m.short_name().to_string())
}
