use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the practice runner can submit to the judge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
    C,
    Cpp,
    Java,
    Js,
}

/// Static description of a language: judge code, editor mode, label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageDescriptor {
    pub language: Language,
    /// Numeric language id understood by the judge service
    pub judge_id: u32,
    pub label: &'static str,
    /// Syntax mode an editor should highlight the code with
    pub editor_mode: &'static str,
}

/// Language table, in the order a picker should list them.
/// Judge ids must stay as they are for compatibility with the judge service.
pub const LANGUAGES: &[LanguageDescriptor] = &[
    LanguageDescriptor {
        language: Language::Python,
        judge_id: 71,
        label: "Python 3",
        editor_mode: "python",
    },
    LanguageDescriptor {
        language: Language::C,
        judge_id: 50,
        label: "C (GCC)",
        editor_mode: "cpp",
    },
    LanguageDescriptor {
        language: Language::Cpp,
        judge_id: 54,
        label: "C++ (GCC)",
        editor_mode: "cpp",
    },
    LanguageDescriptor {
        language: Language::Java,
        judge_id: 62,
        label: "Java",
        editor_mode: "java",
    },
    LanguageDescriptor {
        language: Language::Js,
        judge_id: 63,
        label: "JavaScript (Node)",
        editor_mode: "javascript",
    },
];

impl Language {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "python" => Some(Language::Python),
            "c" => Some(Language::C),
            "cpp" => Some(Language::Cpp),
            "java" => Some(Language::Java),
            "js" => Some(Language::Js),
            _ => None,
        }
    }

    pub fn descriptor(&self) -> &'static LanguageDescriptor {
        // LANGUAGES holds one entry per variant, in declaration order
        &LANGUAGES[*self as usize]
    }

    pub fn judge_id(&self) -> u32 {
        self.descriptor().judge_id
    }

    pub fn label(&self) -> &'static str {
        self.descriptor().label
    }

    pub fn all() -> impl Iterator<Item = Language> {
        LANGUAGES.iter().map(|d| d.language)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Python => write!(f, "python"),
            Language::C => write!(f, "c"),
            Language::Cpp => write!(f, "cpp"),
            Language::Java => write!(f, "java"),
            Language::Js => write!(f, "js"),
        }
    }
}

/// A practice question. Identity is its position in the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub title: &'static str,
    pub description: &'static str,
    /// Sample stdin
    pub input: &'static str,
    /// Expected stdout for the sample input
    pub output: &'static str,
}

/// Body of `POST /api/run`, forwarded to the judge verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub source_code: String,
    pub language_id: u32,
    pub stdin: String,
}

impl SubmissionRequest {
    pub fn new(language: Language, source_code: impl Into<String>, stdin: impl Into<String>) -> Self {
        Self {
            source_code: source_code.into(),
            language_id: language.judge_id(),
            stdin: stdin.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeStatus {
    pub id: u32,
    pub description: String,
}

/// Judge response as seen by the client. Every field is optional: the judge
/// omits or nulls them depending on how far the submission got.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub status: Option<JudgeStatus>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub memory: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of comparing the displayed output with the expected output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    Correct,
    Incorrect,
    #[default]
    Unset,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "✅ Correct Output!"),
            Verdict::Incorrect => write!(f, "❌ Incorrect Output."),
            Verdict::Unset => Ok(()),
        }
    }
}
