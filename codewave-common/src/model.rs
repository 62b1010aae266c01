//! Article and segment data model
//!
//! An article is an ordered list of narration segments. Segments are either
//! plain prose or a code block carrying the raw source plus the two spoken
//! renditions of it (a short label and a denser summary). The engine never
//! mutates an article; it holds a shared reference for the duration of one
//! playback session.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// One atomic unit of article content
///
/// Closed sum type: the pace policy matches exhaustively on the segment
/// kind, so adding a variant forces a pacing decision at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    /// Plain prose, narrated at the base rate
    Text {
        content: String,
    },

    /// Code block with spoken renditions
    Code {
        /// Source language, e.g. "rust", "javascript"
        language: String,
        /// Raw code body (rendered, never narrated verbatim)
        raw_code: String,
        /// Prose summary of what the code does
        summary: String,
        /// Short announcement, e.g. "Rust code block: ticker setup"
        spoken_label: String,
    },
}

impl Segment {
    pub fn is_code(&self) -> bool {
        matches!(self, Segment::Code { .. })
    }

    /// Kind name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Segment::Text { .. } => "text",
            Segment::Code { .. } => "code",
        }
    }
}

/// A segmented article selected for narration
///
/// `author` and `category` are pass-through display metadata; the engine
/// only reads `segments`. Articles with zero segments are tolerated (the
/// session refuses to start playback on them).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub category: String,
    pub segments: Vec<Segment>,
}

impl Article {
    /// Parse an article from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load an article from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Built-in sample article
    ///
    /// Used by the binary when no article file is given, and by tests.
    pub fn demo() -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            title: "A Field Guide to React Re-renders".to_string(),
            author: "Dan A.".to_string(),
            category: "Frontend".to_string(),
            segments: vec![
                Segment::Text {
                    content: "In modern React development, useMemo and useCallback are the \
                              two main levers for render performance. They are also the two \
                              most commonly misused."
                        .to_string(),
                },
                Segment::Code {
                    language: "javascript".to_string(),
                    raw_code: "const Parent = () => {\n  const [count, setCount] = useState(0);\n  const handleClick = () => console.log('Clicked');\n\n  return <ExpensiveChild onClick={handleClick} />;\n};"
                        .to_string(),
                    summary: "An anti-pattern: the parent defines a plain arrow function, so \
                              the callback reference changes on every render and forces \
                              ExpensiveChild to re-render for nothing."
                        .to_string(),
                    spoken_label: "JavaScript code block: unstable callback reference"
                        .to_string(),
                },
                Segment::Text {
                    content: "Wrapping the handler in useCallback keeps the reference stable \
                              across renders, and the child's memoization starts doing its job."
                        .to_string(),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_json_is_tagged_by_type() {
        let text = Segment::Text {
            content: "hello".to_string(),
        };
        let json = serde_json::to_string(&text).unwrap();
        assert!(json.contains("\"type\":\"text\""));

        let code = Segment::Code {
            language: "rust".to_string(),
            raw_code: "fn main() {}".to_string(),
            summary: "An empty entry point.".to_string(),
            spoken_label: "Rust code block: empty main".to_string(),
        };
        let json = serde_json::to_string(&code).unwrap();
        assert!(json.contains("\"type\":\"code\""));

        let back: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
    }

    #[test]
    fn article_parses_from_json() {
        let json = r#"{
            "id": "7f2c0a4e-1fd8-4b3b-9a3e-3a0a4cb4d111",
            "title": "Title",
            "author": "Author",
            "category": "Backend",
            "segments": [
                { "type": "text", "content": "Intro." },
                {
                    "type": "code",
                    "language": "rust",
                    "raw_code": "let x = 1;",
                    "summary": "Binds one to x.",
                    "spoken_label": "Rust code block: a binding"
                }
            ]
        }"#;

        let article = Article::from_json_str(json).unwrap();
        assert_eq!(article.segment_count(), 2);
        assert!(article.segments[1].is_code());
    }

    #[test]
    fn malformed_article_is_an_error() {
        let result = Article::from_json_str("{ not json");
        assert!(result.is_err());
    }

    #[test]
    fn empty_segment_list_is_tolerated() {
        let json = r#"{
            "id": "7f2c0a4e-1fd8-4b3b-9a3e-3a0a4cb4d111",
            "title": "Empty",
            "author": "Nobody",
            "category": "Misc",
            "segments": []
        }"#;
        let article = Article::from_json_str(json).unwrap();
        assert_eq!(article.segment_count(), 0);
    }

    #[test]
    fn demo_article_mixes_text_and_code() {
        let article = Article::demo();
        assert!(article.segments.iter().any(|s| s.is_code()));
        assert!(article.segments.iter().any(|s| !s.is_code()));
    }
}
