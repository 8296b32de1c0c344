use crate::api::SingleAnalysis;
use crate::dom::{Element, Node};

use super::{bar_width_style, capitalize, format_compound, format_percent};

/// Fragments for the two single-mode sub-containers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleFragments {
    /// Children for `single-sentiment-display`.
    pub display: Vec<Node>,
    /// Children for `single-scores`.
    pub scores: Vec<Node>,
}

pub fn render_single(result: &SingleAnalysis) -> SingleFragments {
    let class = result.sentiment.class();
    let modifier = class.css_class();
    let label = capitalize(result.sentiment.as_str());

    let summary = Element::div()
        .child(
            Element::div()
                .child("Sentiment: ")
                .child(Element::new("strong").child(label)),
        )
        .child(Element::div().child(format!(
            "Confidence: {}",
            format_percent(result.confidence)
        )))
        .child(
            Element::div().class("confidence-bar").child(
                Element::div()
                    .class("confidence-fill")
                    .class(modifier)
                    .attr("style", bar_width_style(result.confidence)),
            ),
        );
    let display = Element::div()
        .class("sentiment-display")
        .class(modifier)
        .child(Element::span().class("sentiment-icon").child(class.icon()))
        .child(summary);

    let scores = &result.scores;
    let grid = Element::div().class("scores-grid").children([
        score_item("Positive Score", format_percent(scores.pos)),
        score_item("Negative Score", format_percent(scores.neg)),
        score_item("Neutral Score", format_percent(scores.neu)),
        score_item("Compound Score", format_compound(scores.compound)),
    ]);

    SingleFragments {
        display: vec![display.into()],
        scores: vec![grid.into()],
    }
}

fn score_item(label: &str, value: String) -> Node {
    Element::div()
        .class("score-item")
        .child(Element::div().class("score-label").child(label))
        .child(Element::div().class("score-value").child(value))
        .into()
}
