use serde::{Deserialize, Deserializer};

/// Structured reply from the analysis API describing how to implement a
/// feature in a repository. Consumed read-only by the document formatter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisResult {
    pub repository_name: String,
    pub feature_summary: String,
    pub implementation_steps: Vec<ImplementationStep>,
    pub setup_instructions: Vec<SetupInstruction>,
    pub potential_challenges: Vec<String>,
    pub relevant_files: Vec<RelevantFile>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImplementationStep {
    pub step_number: Scalar,
    pub description: String,
    /// Source snippet, rendered as a TypeScript block
    #[serde(default, deserialize_with = "non_empty")]
    pub code_snippet: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SetupInstruction {
    pub step_number: Scalar,
    pub description: String,
    /// Shell command(s), rendered as a shell block
    #[serde(default, deserialize_with = "non_empty")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelevantFile {
    pub path: String,
    pub importance: Scalar,
    pub reason: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub content_preview: Option<String>,
}

/// Loosely typed value printed verbatim: step numbers and file importance.
/// The API has sent numbers ("3", "0.9"), labels ("high", "2a") and `null`
/// for these; none of them should sink the whole reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
    Null,
}

impl From<u32> for Scalar {
    fn from(n: u32) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Null => write!(f, "null"),
        }
    }
}

/// Optional text fields: `null`, a missing key and `""` all mean "absent".
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
