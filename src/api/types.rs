//! Wire types exchanged with the sentiment backend.

use serde::{Deserialize, Serialize};

/// Body of `POST /analyze`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Body of `POST /batch-analyze`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct BatchAnalyzeRequest {
    pub texts: Vec<String>,
}

/// Sentiment label as delivered by the server.
///
/// The backend promises one of `positive`, `negative` or `neutral`, but the label is kept
/// verbatim so the page can show exactly what was returned.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SentimentLabel(pub String);

/// Known sentiment classes, used for icons and style modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SentimentClass {
    Positive,
    Negative,
    Neutral,
}

impl SentimentClass {
    /// CSS modifier class for this sentiment.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Positive => "😊",
            Self::Negative => "😞",
            Self::Neutral => "😐",
        }
    }
}

impl SentimentLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Map the raw label onto a known class; anything unrecognised styles as neutral.
    pub fn class(&self) -> SentimentClass {
        match self.0.as_str() {
            "positive" => SentimentClass::Positive,
            "negative" => SentimentClass::Negative,
            _ => SentimentClass::Neutral,
        }
    }
}

/// Component scores of a single analysis.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SentimentScores {
    pub pos: f64,
    pub neg: f64,
    pub neu: f64,
    pub compound: f64,
}

/// Success body of `POST /analyze`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SingleAnalysis {
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub scores: SentimentScores,
}

/// One row of a batch response.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BatchItem {
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    #[serde(default)]
    pub processed_text: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct SentimentDistribution {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BatchSummary {
    pub total_texts: u64,
    pub sentiment_distribution: SentimentDistribution,
    pub average_confidence: f64,
}

/// Success body of `POST /batch-analyze`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BatchAnalysis {
    pub results: Vec<BatchItem>,
    pub summary: BatchSummary,
}

/// Optional body carried by non-2xx responses.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_analysis_parses_backend_shape() {
        let body = r#"{"sentiment":"positive","confidence":0.92,
            "scores":{"pos":0.8,"neg":0.0,"neu":0.2,"compound":0.876}}"#;
        let parsed: SingleAnalysis = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.sentiment.as_str(), "positive");
        assert_eq!(parsed.sentiment.class(), SentimentClass::Positive);
        assert_eq!(parsed.scores.compound, 0.876);
    }

    #[test]
    fn batch_item_tolerates_missing_processed_text_and_extra_fields() {
        let body = r#"{"sentiment":"negative","confidence":0.4,"text":"raw","scores":{}}"#;
        let parsed: BatchItem = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.processed_text, None);
        assert_eq!(parsed.sentiment.class(), SentimentClass::Negative);
    }

    #[test]
    fn unknown_label_maps_to_neutral_class() {
        let label = SentimentLabel::new("mixed");
        assert_eq!(label.class(), SentimentClass::Neutral);
        assert_eq!(label.class().icon(), "😐");
        assert_eq!(label.as_str(), "mixed");
    }

    #[test]
    fn requests_serialize_to_backend_contract() {
        let single = serde_json::to_string(&AnalyzeRequest {
            text: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(single, r#"{"text":"hi"}"#);
        let batch = serde_json::to_string(&BatchAnalyzeRequest {
            texts: vec!["a".into(), "b".into()],
        })
        .unwrap();
        assert_eq!(batch, r#"{"texts":["a","b"]}"#);
    }
}
