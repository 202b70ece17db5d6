//! # Scorer Module
//!
//! The grade aggregator: a pure function from `(assessments, scores, categories)` to the
//! derived figures the calculator displays.
//!
//! An assessment is **completed** when its score entry has an `earned` value that is not
//! NaN and its effective maximum (the entry's `max` override, else the assessment's own
//! `max`) is a finite positive number. Only completed assessments contribute; everything
//! else counts toward `total_count` and nothing more.
//!
//! Values are returned unrounded. Rounding for display is the caller's concern.

use crate::types::{Assessment, ScoreMap};
use serde::Serialize;
use std::collections::HashMap;

/// Per-assessment breakdown produced by [`score_assessment`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssessmentScore {
    pub completed: bool,
    /// Earned points after clamping to `[0, effective_max]`; 0 when not completed.
    pub earned: f64,
    pub effective_max: f64,
    /// `earned / effective_max`; 0 when not completed.
    pub fraction: f64,
    /// `fraction * weight`; 0 when not completed.
    pub weighted: f64,
}

/// Weighted points earned within one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryContribution {
    pub category: String,
    pub points: f64,
}

/// Derived grade figures for one course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeSummary {
    /// Sum of weighted contributions: the grade if all ungraded work scored zero.
    pub overall_grade: f64,
    /// `overall_grade / total_weight_of_completed`, or 0 when nothing is graded.
    /// A ratio; multiply by 100 for a percentage.
    pub standing: f64,
    /// One entry per requested category, in request order.
    pub contributions: Vec<CategoryContribution>,
    pub completed_count: usize,
    pub total_count: usize,
    pub total_weight_of_completed: f64,
    /// Sum of all declared weights, graded or not.
    pub total_weight: f64,
}

impl GradeSummary {
    /// Weighted points earned in `category`, 0 if the category is unknown.
    pub fn contribution(&self, category: &str) -> f64 {
        self.contributions
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.points)
            .unwrap_or(0.0)
    }

    pub fn standing_percent(&self) -> f64 {
        self.standing * 100.0
    }

    /// Whether the declared weights add up to 100 (within 0.01).
    pub fn weights_balanced(&self) -> bool {
        (self.total_weight - 100.0).abs() <= 0.01
    }
}

/// Scores a single assessment against the score map.
pub fn score_assessment(assessment: &Assessment, scores: &ScoreMap) -> AssessmentScore {
    let entry = scores.get(&assessment.id);
    let effective_max = entry.and_then(|e| e.max).unwrap_or(assessment.max);

    match entry.and_then(|e| e.earned) {
        Some(raw) if !raw.is_nan() && effective_max > 0.0 && effective_max.is_finite() => {
            let earned = raw.clamp(0.0, effective_max);
            let fraction = earned / effective_max;
            AssessmentScore {
                completed: true,
                earned,
                effective_max,
                fraction,
                weighted: fraction * assessment.weight,
            }
        }
        _ => AssessmentScore {
            completed: false,
            earned: 0.0,
            effective_max,
            fraction: 0.0,
            weighted: 0.0,
        },
    }
}

/// Computes the grade summary for a course.
///
/// `categories` fixes the order of [`GradeSummary::contributions`] and guarantees an
/// entry (possibly 0) for each listed category. Categories that appear on assessments
/// but not in `categories` are appended after them.
///
/// # Example
///
/// ```
/// use grader::scorer::compute_grade_summary;
/// use grader::types::{Assessment, ScoreEntry, ScoreMap};
///
/// let assessments = vec![
///     Assessment { id: "a1".into(), name: "Quiz".into(), category: "Q".into(), max: 100.0, weight: 50.0 },
///     Assessment { id: "a2".into(), name: "Exam".into(), category: "E".into(), max: 100.0, weight: 50.0 },
/// ];
/// let mut scores = ScoreMap::new();
/// scores.insert("a1".into(), ScoreEntry::earned(80.0));
///
/// let summary = compute_grade_summary(&assessments, &scores, &["Q".into(), "E".into()]);
/// assert_eq!(summary.overall_grade, 40.0);
/// assert_eq!(summary.standing, 0.8);
/// assert_eq!(summary.contribution("E"), 0.0);
/// ```
pub fn compute_grade_summary(
    assessments: &[Assessment],
    scores: &ScoreMap,
    categories: &[String],
) -> GradeSummary {
    let mut contributions: Vec<CategoryContribution> = Vec::with_capacity(categories.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    for category in categories {
        if !positions.contains_key(category) {
            positions.insert(category.clone(), contributions.len());
            contributions.push(CategoryContribution {
                category: category.clone(),
                points: 0.0,
            });
        }
    }

    let mut total_weighted_score = 0.0;
    let mut total_weight_of_completed = 0.0;
    let mut total_weight = 0.0;
    let mut completed_count = 0;

    for assessment in assessments {
        total_weight += assessment.weight;

        let score = score_assessment(assessment, scores);
        if !score.completed {
            continue;
        }

        total_weighted_score += score.weighted;
        total_weight_of_completed += assessment.weight;
        completed_count += 1;

        let idx = *positions
            .entry(assessment.category.clone())
            .or_insert_with(|| {
                contributions.push(CategoryContribution {
                    category: assessment.category.clone(),
                    points: 0.0,
                });
                contributions.len() - 1
            });
        contributions[idx].points += score.weighted;
    }

    let standing = if total_weight_of_completed > 0.0 {
        total_weighted_score / total_weight_of_completed
    } else {
        0.0
    };

    GradeSummary {
        overall_grade: total_weighted_score,
        standing,
        contributions,
        completed_count,
        total_count: assessments.len(),
        total_weight_of_completed,
        total_weight,
    }
}

/// Distinct categories in order of first occurrence.
pub fn distinct_categories(assessments: &[Assessment]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for assessment in assessments {
        if !seen.iter().any(|c| c == &assessment.category) {
            seen.push(assessment.category.clone());
        }
    }
    seen
}
