use crate::api::{BatchAnalysis, BatchItem, BatchSummary};
use crate::dom::{Element, Node, ids};

use super::{capitalize, format_percent};

/// Rebuild the whole batch panel: summary block then one row per result.
pub fn render_batch(result: &BatchAnalysis) -> Vec<Node> {
    vec![
        render_summary(&result.summary),
        render_details(&result.results),
    ]
}

fn render_summary(summary: &BatchSummary) -> Node {
    let distribution = &summary.sentiment_distribution;
    Element::div()
        .with_id(ids::BATCH_SUMMARY)
        .child(Element::new("h4").child("Summary"))
        .child(Element::div().class("summary-stats").children([
            stat_item(summary.total_texts.to_string(), "Total Texts"),
            stat_item(distribution.positive.to_string(), "Positive"),
            stat_item(distribution.negative.to_string(), "Negative"),
            stat_item(distribution.neutral.to_string(), "Neutral"),
            stat_item(format_percent(summary.average_confidence), "Avg Confidence"),
        ]))
        .into()
}

fn stat_item(value: String, label: &str) -> Node {
    Element::div()
        .class("stat-item")
        .child(Element::div().class("stat-value").child(value))
        .child(Element::div().class("stat-label").child(label))
        .into()
}

fn render_details(results: &[BatchItem]) -> Node {
    Element::div()
        .with_id(ids::BATCH_DETAILS)
        .child(Element::new("h4").child("Individual Results"))
        .children(results.iter().map(render_item))
        .into()
}

fn render_item(item: &BatchItem) -> Node {
    let class = item.sentiment.class();
    let text = item
        .processed_text
        .as_deref()
        .filter(|text| !text.is_empty())
        .unwrap_or("No text");
    Element::div()
        .class("batch-item")
        .class(class.css_class())
        .child(Element::div().class("batch-text").child(format!("\"{text}\"")))
        .child(
            Element::div()
                .child(
                    Element::span()
                        .class("batch-sentiment")
                        .class(class.css_class())
                        .child(format!(
                            "{} {}",
                            class.icon(),
                            capitalize(item.sentiment.as_str())
                        )),
                )
                .child(
                    Element::span()
                        .attr("style", "margin-left: 10px; color: #666;")
                        .child(format!("Confidence: {}", format_percent(item.confidence))),
                ),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{SentimentDistribution, SentimentLabel};

    fn item(label: &str, confidence: f64, text: Option<&str>) -> BatchItem {
        BatchItem {
            sentiment: SentimentLabel::new(label),
            confidence,
            processed_text: text.map(str::to_string),
        }
    }

    fn mixed() -> BatchAnalysis {
        BatchAnalysis {
            results: vec![
                item("positive", 0.9, Some("great")),
                item("negative", 0.35, Some("awful")),
                item("neutral", 0.25, None),
            ],
            summary: BatchSummary {
                total_texts: 3,
                sentiment_distribution: SentimentDistribution {
                    positive: 1,
                    negative: 1,
                    neutral: 1,
                },
                average_confidence: 0.5,
            },
        }
    }

    fn rows(nodes: &[Node]) -> Vec<&Element> {
        let mut found = Vec::new();
        for node in nodes {
            node.as_element().unwrap().find_by_class("batch-item", &mut found);
        }
        found
    }

    #[test]
    fn summary_reports_totals_and_average() {
        let nodes = render_batch(&mixed());
        let summary = nodes[0].as_element().unwrap();
        assert_eq!(summary.id.as_deref(), Some(ids::BATCH_SUMMARY));
        let text = nodes[0].text_content();
        assert!(text.contains("Total Texts"));
        assert!(text.contains("50.0%"));
        let mut values = Vec::new();
        summary.find_by_class("stat-value", &mut values);
        let values: Vec<String> = values
            .iter()
            .map(|value| Node::from((*value).clone()).text_content())
            .collect();
        assert_eq!(values, vec!["3", "1", "1", "1", "50.0%"]);
    }

    #[test]
    fn rows_follow_delivered_order_with_icons_and_classes() {
        let nodes = render_batch(&mixed());
        assert_eq!(nodes[1].as_element().unwrap().id.as_deref(), Some(ids::BATCH_DETAILS));
        let rows = rows(&nodes);
        assert_eq!(rows.len(), 3);
        let expected = [
            ("positive", "😊 Positive", "\"great\"", "90.0%"),
            ("negative", "😞 Negative", "\"awful\"", "35.0%"),
            ("neutral", "😐 Neutral", "\"No text\"", "25.0%"),
        ];
        for (row, (class, sentiment, text, confidence)) in rows.iter().zip(expected) {
            assert!(row.has_class(class));
            let content = Node::from((*row).clone()).text_content();
            assert!(content.contains(sentiment), "{content}");
            assert!(content.contains(text), "{content}");
            assert!(content.contains(confidence), "{content}");
        }
    }

    #[test]
    fn empty_processed_text_reads_no_text() {
        let analysis = BatchAnalysis {
            results: vec![item("positive", 1.0, Some(""))],
            ..mixed()
        };
        let nodes = render_batch(&analysis);
        assert!(nodes[1].text_content().contains("\"No text\""));
    }

    #[test]
    fn unknown_label_row_is_styled_neutral() {
        let analysis = BatchAnalysis {
            results: vec![item("sarcastic", 0.6, Some("sure"))],
            ..mixed()
        };
        let nodes = render_batch(&analysis);
        let rows = rows(&nodes);
        assert!(rows[0].has_class("neutral"));
        assert!(Node::from(rows[0].clone()).text_content().contains("😐 Sarcastic"));
    }
}
