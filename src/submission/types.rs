use serde::Serialize;

/// A validated (repository URL, feature description) pair.
/// Serialized as-is into the request body sent to the analysis API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    /// Trimmed repository URL (e.g., "https://github.com/org/repo")
    pub repo_url: String,
    /// Trimmed free-text description of the feature to implement
    pub feature_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_serializes_with_api_field_names() {
        let submission = Submission {
            repo_url: "https://github.com/a/b".to_string(),
            feature_description: "add dark mode".to_string(),
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["repo_url"], "https://github.com/a/b");
        assert_eq!(json["feature_description"], "add dark mode");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }
}
