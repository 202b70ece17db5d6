//! Normalisation of extracted assessments.
//!
//! Both extraction paths produce [`AssessmentDraft`]s; [`finalize`] turns them into
//! [`Assessment`]s with ids `assessment-1..N` and renormalised weights.

use crate::types::Assessment;
use crate::utilities::rounding::round2;
use serde_json::Value;

pub const DEFAULT_CATEGORY: &str = "Assignments";
pub const DEFAULT_MAX: f64 = 100.0;

/// An assessment before ids are assigned and weights rescaled.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentDraft {
    pub name: String,
    pub category: String,
    pub max: f64,
    pub weight: f64,
}

impl AssessmentDraft {
    pub fn new(name: impl Into<String>, category: impl Into<String>, max: f64, weight: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            max,
            weight,
        }
    }
}

/// Reads a number or a numeric string (a trailing `%` is tolerated).
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn coerce_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Coerces one raw element of a completion response. `index` is 0-based.
///
/// Non-object elements are treated as empty objects, so every field takes its default.
pub fn draft_from_value(index: usize, value: &Value) -> AssessmentDraft {
    let field = |key: &str| value.as_object().and_then(|obj| obj.get(key));

    AssessmentDraft {
        name: coerce_text(field("name")).unwrap_or_else(|| format!("Assessment {}", index + 1)),
        category: coerce_text(field("category")).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        max: coerce_number(field("max"))
            .filter(|m| *m > 0.0)
            .unwrap_or(DEFAULT_MAX),
        weight: coerce_number(field("weight"))
            .filter(|w| *w >= 0.0)
            .unwrap_or(0.0),
    }
}

/// Largest drift from 100 that per-item rounding may leave behind.
const WEIGHT_TOLERANCE: f64 = 0.01;

/// Rescales weights so they sum to 100, each rounded to two decimals.
///
/// Rounding each item on its own can drift further than [`WEIGHT_TOLERANCE`] from 100;
/// the leftover is then moved onto the heaviest item. A list whose weights sum to zero
/// is left untouched.
pub fn renormalize_weights(assessments: &mut [Assessment]) {
    let total: f64 = assessments.iter().map(|a| a.weight).sum();
    if total <= 0.0 {
        return;
    }
    for assessment in assessments.iter_mut() {
        assessment.weight = round2(assessment.weight / total * 100.0);
    }

    let rounded: f64 = assessments.iter().map(|a| a.weight).sum();
    let residual = round2(100.0 - rounded);
    if residual.abs() <= WEIGHT_TOLERANCE + 1e-9 {
        return;
    }
    if let Some(heaviest) = assessments
        .iter_mut()
        .max_by(|a, b| a.weight.total_cmp(&b.weight))
    {
        heaviest.weight = round2(heaviest.weight + residual).max(0.0);
    }
}

/// Assigns ids `assessment-{index + 1}` and renormalises weights.
pub fn finalize(drafts: Vec<AssessmentDraft>) -> Vec<Assessment> {
    let mut assessments: Vec<Assessment> = drafts
        .into_iter()
        .enumerate()
        .map(|(i, d)| Assessment {
            id: format!("assessment-{}", i + 1),
            name: d.name,
            category: d.category,
            max: d.max,
            weight: d.weight,
        })
        .collect();
    renormalize_weights(&mut assessments);
    assessments
}

/// Normalises the raw elements of a completion response.
pub fn normalize_assessments(values: &[Value]) -> Vec<Assessment> {
    finalize(
        values
            .iter()
            .enumerate()
            .map(|(i, v)| draft_from_value(i, v))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn total(assessments: &[Assessment]) -> f64 {
        assessments.iter().map(|a| a.weight).sum()
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let out = normalize_assessments(&[json!({}), json!({"name": "  ", "weight": 10})]);
        assert_eq!(out[0].id, "assessment-1");
        assert_eq!(out[0].name, "Assessment 1");
        assert_eq!(out[0].category, "Assignments");
        assert_eq!(out[0].max, 100.0);
        assert_eq!(out[0].weight, 0.0);
        assert_eq!(out[1].name, "Assessment 2");
        assert_eq!(out[1].weight, 100.0);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let draft = draft_from_value(0, &json!({"max": "50", "weight": "12.5%"}));
        assert_eq!(draft.max, 50.0);
        assert_eq!(draft.weight, 12.5);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let draft = draft_from_value(3, &json!({"max": -10, "weight": "lots"}));
        assert_eq!(draft.max, 100.0);
        assert_eq!(draft.weight, 0.0);

        let draft = draft_from_value(0, &json!({"max": 0, "weight": -5}));
        assert_eq!(draft.max, 100.0);
        assert_eq!(draft.weight, 0.0);
    }

    #[test]
    fn test_non_object_element_uses_defaults() {
        let draft = draft_from_value(4, &json!("Quiz 1"));
        assert_eq!(draft.name, "Assessment 5");
        assert_eq!(draft.category, "Assignments");
    }

    #[test]
    fn test_renormalization_hits_100() {
        let out = normalize_assessments(&[
            json!({"name": "A", "weight": 20}),
            json!({"name": "B", "weight": 20}),
            json!({"name": "C", "weight": 30}),
        ]);
        assert!((total(&out) - 100.0).abs() <= 0.01 + 1e-9);
        assert_eq!(out[0].weight, 28.57);
        assert_eq!(out[2].weight, 42.86);
    }

    #[test]
    fn test_equal_weights_sum_to_100_for_any_count() {
        for n in 1..=40 {
            let values = vec![json!({"weight": 1}); n];
            let out = normalize_assessments(&values);
            assert!(
                (total(&out) - 100.0).abs() <= 0.01 + 1e-9,
                "{n} items summed to {}",
                total(&out)
            );
            assert!(out.iter().all(|a| a.weight == round2(a.weight)));
        }
    }

    #[test]
    fn test_rounding_drift_goes_to_heaviest_item() {
        let out = normalize_assessments(&vec![json!({"weight": 1}); 7]);
        // 100 / 7 rounds to 14.29; seven of those overshoot by 0.03.
        // Among equal weights the last one absorbs the difference.
        assert!(out[..6].iter().all(|a| a.weight == 14.29));
        assert_eq!(out[6].weight, 14.26);
        assert!((total(&out) - 100.0).abs() <= 0.01 + 1e-9);
    }

    #[test]
    fn test_zero_total_is_left_alone() {
        let out = normalize_assessments(&[json!({"name": "A"}), json!({"name": "B"})]);
        assert!(out.iter().all(|a| a.weight == 0.0));
    }

    #[test]
    fn test_renormalization_is_idempotent() {
        let mut once = normalize_assessments(&[
            json!({"weight": 7}),
            json!({"weight": 11}),
            json!({"weight": 13}),
        ]);
        let snapshot = once.clone();
        renormalize_weights(&mut once);
        for (a, b) in once.iter().zip(snapshot.iter()) {
            assert!((a.weight - b.weight).abs() <= 0.01);
        }
    }
}
