use serde::Deserialize;

/// What to do when the same state field is declared more than once in a
/// component (for example a class field followed by a constructor override).
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DuplicateStatePolicy {
    /// Fail the component with `TransformError::DuplicateStateField`.
    #[default]
    Reject,
    /// Keep the most recent declaration at its own position, drop the others.
    LastWins,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct Config {
    /// Callee used for hook declarations: `const [a, setA] = useState(init)`.
    pub state_hook: String,
    /// Callee used for effect registrations: `useEffect(() => { ... })`.
    pub effect_hook: String,
    /// Superclass names recognized as component base classes.
    pub base_components: Vec<String>,
    pub duplicate_state: DuplicateStatePolicy,
    // Render is always stripped; this extends stripping to the other members
    pub strip_this_in_methods: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_hook: "useState".to_string(),
            effect_hook: "useEffect".to_string(),
            base_components: vec!["Component".to_string(), "PureComponent".to_string()],
            duplicate_state: DuplicateStatePolicy::Reject,
            strip_this_in_methods: true,
        }
    }
}

impl Config {
    /// Parse plugin options as passed by the host, e.g. `{"stateHook": "React.useState"}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_camel_case_fields() {
        let config = Config::from_json(
            r#"{
                "stateHook": "React.useState",
                "effectHook": "React.useEffect",
                "baseComponents": ["Component", "Base"],
                "duplicateState": "lastWins",
                "stripThisInMethods": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.state_hook, "React.useState");
        assert_eq!(config.effect_hook, "React.useEffect");
        assert_eq!(config.base_components, vec!["Component", "Base"]);
        assert_eq!(config.duplicate_state, DuplicateStatePolicy::LastWins);
        assert!(!config.strip_this_in_methods);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(Config::from_json(r#"{"useHooks": true}"#).is_err());
    }

    #[test]
    fn test_unknown_duplicate_policy_is_rejected() {
        assert!(Config::from_json(r#"{"duplicateState": "merge"}"#).is_err());
    }
}
