//! Deterministic outline parser used when the completion path is unavailable.
//!
//! Numbered families (`quiz N`, `assignment N` / `homework N` / `hw N`, `project N`,
//! `lab N`) expand to `N` items sharing `100 / (N + 2)` each. Exam keywords become one
//! item per distinct spelling, weighted 40 for finals and 30 otherwise. The combined
//! list is renormalised to 100. Item numbers above [`MAX_FAMILY_INDEX`] are ignored.

use super::normalize::{AssessmentDraft, DEFAULT_MAX, finalize};
use crate::types::{Assessment, SourceKind};
use crate::utilities::rounding::round2;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static QUIZ_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)quiz\s*(\d+)").expect("quiz pattern"));
static EXAM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(midterm|final|exam)\s*(?:exam)?").expect("exam pattern"));
static ASSIGNMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)assignment\s*(\d+)|homework\s*(\d+)|hw\s*(\d+)").expect("assignment pattern")
});
static PROJECT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)project\s*(\d+)").expect("project pattern"));
static LAB_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)lab\s*(\d+)").expect("lab pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

const FINAL_EXAM_WEIGHT: f64 = 40.0;
const OTHER_EXAM_WEIGHT: f64 = 30.0;

/// A numbered assessment family such as `Quiz 1..N`.
struct Family {
    pattern: &'static Lazy<Regex>,
    label: &'static str,
    category: &'static str,
}

static QUIZZES: Family = Family {
    pattern: &QUIZ_PATTERN,
    label: "Quiz",
    category: "Quizzes",
};
static ASSIGNMENTS: Family = Family {
    pattern: &ASSIGNMENT_PATTERN,
    label: "Assignment",
    category: "Assignments",
};
static PROJECTS: Family = Family {
    pattern: &PROJECT_PATTERN,
    label: "Project",
    category: "Projects",
};
static LABS: Family = Family {
    pattern: &LAB_PATTERN,
    label: "Lab",
    category: "Labs",
};

/// Item numbers above this are read as years, codes or noise, not as family sizes.
pub const MAX_FAMILY_INDEX: u32 = 100;

/// Highest plausible item number mentioned for a family, 0 when none is.
fn highest_index(pattern: &Regex, text: &str) -> u32 {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.iter().skip(1).flatten().next())
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .filter(|n| *n <= MAX_FAMILY_INDEX)
        .max()
        .unwrap_or(0)
}

/// Per-item weight of a family with `count` items.
pub fn family_weight(count: u32) -> f64 {
    round2(100.0 / (f64::from(count) + 2.0))
}

fn push_unique(drafts: &mut Vec<AssessmentDraft>, seen: &mut HashSet<String>, draft: AssessmentDraft) {
    if seen.insert(draft.name.clone()) {
        drafts.push(draft);
    }
}

fn push_family(
    family: &Family,
    text: &str,
    drafts: &mut Vec<AssessmentDraft>,
    seen: &mut HashSet<String>,
) {
    let count = highest_index(family.pattern, text);
    if count == 0 {
        return;
    }
    let weight = family_weight(count);
    for i in 1..=count {
        push_unique(
            drafts,
            seen,
            AssessmentDraft::new(format!("{} {i}", family.label), family.category, DEFAULT_MAX, weight),
        );
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn push_exams(text: &str, drafts: &mut Vec<AssessmentDraft>, seen: &mut HashSet<String>) {
    let mut kinds: Vec<String> = Vec::new();
    for m in EXAM_PATTERN.find_iter(text) {
        let kind = WHITESPACE
            .replace_all(m.as_str().trim(), " ")
            .to_lowercase();
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    for kind in kinds {
        let weight = if kind.contains("final") {
            FINAL_EXAM_WEIGHT
        } else {
            OTHER_EXAM_WEIGHT
        };
        push_unique(
            drafts,
            seen,
            AssessmentDraft::new(capitalize(&kind), "Exams", DEFAULT_MAX, weight),
        );
    }
}

/// The curriculum used when nothing recognisable is found.
pub fn default_drafts() -> Vec<AssessmentDraft> {
    vec![
        AssessmentDraft::new("Quiz 1", "Quizzes", DEFAULT_MAX, 10.0),
        AssessmentDraft::new("Quiz 2", "Quizzes", DEFAULT_MAX, 10.0),
        AssessmentDraft::new("Quiz 3", "Quizzes", DEFAULT_MAX, 10.0),
        AssessmentDraft::new("Midterm Exam", "Exams", DEFAULT_MAX, 30.0),
        AssessmentDraft::new("Final Exam", "Exams", DEFAULT_MAX, 40.0),
    ]
}

/// The default curriculum, normalised.
pub fn default_assessments() -> Vec<Assessment> {
    finalize(default_drafts())
}

/// Pattern matches over `text`, without defaults or normalisation.
pub fn detect_drafts(text: &str) -> Vec<AssessmentDraft> {
    let mut drafts = Vec::new();
    let mut seen = HashSet::new();

    push_family(&QUIZZES, text, &mut drafts, &mut seen);
    push_exams(text, &mut drafts, &mut seen);
    push_family(&ASSIGNMENTS, text, &mut drafts, &mut seen);
    push_family(&PROJECTS, text, &mut drafts, &mut seen);
    push_family(&LABS, text, &mut drafts, &mut seen);

    drafts
}

/// Regex-based extraction. Never returns an empty list.
///
/// Non-text source kinds and blank text yield [`default_assessments`].
pub fn fallback_assessments(raw_text: &str, kind: &SourceKind) -> Vec<Assessment> {
    if !kind.is_text_bearing() || raw_text.trim().is_empty() {
        return default_assessments();
    }

    let drafts = detect_drafts(raw_text);
    if drafts.is_empty() {
        tracing::info!("no assessment patterns found, using the default curriculum");
        return default_assessments();
    }
    finalize(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(assessments: &[Assessment]) -> Vec<&str> {
        assessments.iter().map(|a| a.name.as_str()).collect()
    }

    fn total(assessments: &[Assessment]) -> f64 {
        assessments.iter().map(|a| a.weight).sum()
    }

    #[test]
    fn test_quizzes_and_exams() {
        let out = fallback_assessments("Quiz 1, Quiz 2, Quiz 3, Midterm, Final", &SourceKind::Pdf);
        assert_eq!(names(&out), vec!["Quiz 1", "Quiz 2", "Quiz 3", "Midterm", "Final"]);

        // Raw weights 20/20/20/30/40 over a total of 130.
        assert_eq!(out[0].weight, 15.38);
        assert_eq!(out[1].weight, 15.38);
        assert_eq!(out[3].weight, 23.08);
        assert_eq!(out[4].weight, 30.77);
        assert!((total(&out) - 100.0).abs() <= 0.01 + 1e-9);
    }

    #[test]
    fn test_family_count_uses_highest_index() {
        let drafts = detect_drafts("Lab 4 is due after lab 2. See LAB 1.");
        assert_eq!(drafts.len(), 4);
        assert_eq!(drafts[3].name, "Lab 4");
        assert_eq!(drafts[0].weight, family_weight(4));
        assert_eq!(family_weight(4), 16.67);
    }

    #[test]
    fn test_homework_and_hw_count_as_assignments() {
        let drafts = detect_drafts("Homework 2 and HW3 are optional; Assignment 1 is not.");
        let names: Vec<&str> = drafts.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Assignment 1", "Assignment 2", "Assignment 3"]);
        assert!(drafts.iter().all(|d| d.category == "Assignments"));
    }

    #[test]
    fn test_exam_spellings_are_deduplicated_case_insensitively() {
        let drafts = detect_drafts("MIDTERM EXAM in week 6. The midterm exam covers units 1-3. Final Exam TBA.");
        let exams: Vec<(&str, f64)> = drafts
            .iter()
            .map(|d| (d.name.as_str(), d.weight))
            .collect();
        assert_eq!(exams, vec![("Midterm exam", 30.0), ("Final exam", 40.0)]);
    }

    #[test]
    fn test_family_order_is_stable() {
        let out = fallback_assessments("Project 1, Lab 1, Assignment 1, Quiz 1, Final", &SourceKind::Html);
        let categories: Vec<&str> = out.iter().map(|a| a.category.as_str()).collect();
        assert_eq!(
            categories,
            vec!["Quizzes", "Exams", "Assignments", "Projects", "Labs"]
        );
        assert_eq!(out[0].id, "assessment-1");
        assert_eq!(out[4].id, "assessment-5");
    }

    #[test]
    fn test_unrecognised_text_uses_defaults() {
        let out = fallback_assessments("Office hours are Tuesdays at 3pm.", &SourceKind::PlainText);
        assert_eq!(
            names(&out),
            vec!["Quiz 1", "Quiz 2", "Quiz 3", "Midterm Exam", "Final Exam"]
        );
        assert_eq!(total(&out), 100.0);
    }

    #[test]
    fn test_image_kind_uses_defaults() {
        let out = fallback_assessments("Quiz 7", &SourceKind::Image);
        assert_eq!(out.len(), 5);
        assert_eq!(out[3].weight, 30.0);
        assert_eq!(out[4].weight, 40.0);
    }

    #[test]
    fn test_quiz_zero_adds_nothing() {
        assert!(detect_drafts("quiz 0").is_empty());
    }

    #[test]
    fn test_implausible_indices_are_ignored() {
        assert!(detect_drafts("Quiz 4000000000").is_empty());
        assert!(detect_drafts("Project 2025 kickoff").is_empty());

        let drafts = detect_drafts("Project 2025: Project 1 and Project 2");
        assert_eq!(drafts.len(), 2);

        let out = fallback_assessments("Quiz 4000000000", &SourceKind::Pdf);
        assert_eq!(
            names(&out),
            vec!["Quiz 1", "Quiz 2", "Quiz 3", "Midterm Exam", "Final Exam"]
        );
    }

    #[test]
    fn test_ceiling_index_is_still_accepted() {
        let drafts = detect_drafts("Lab 100");
        assert_eq!(drafts.len(), 100);
        assert!(detect_drafts("Lab 101").is_empty());
    }

    #[test]
    fn test_mixed_families_sum_to_100() {
        let out = fallback_assessments("Quiz 1, Quiz 2, Quiz 3, Quiz 4, Quiz 5, Midterm", &SourceKind::Pdf);
        assert!((total(&out) - 100.0).abs() <= 0.01 + 1e-9, "total {}", total(&out));

        for quizzes in 1..=30 {
            for labs in 0..=6 {
                let mut text = format!("Quiz {quizzes}, Midterm, Final exam, Assignment 3");
                if labs > 0 {
                    text.push_str(&format!(", Lab {labs}"));
                }
                let out = fallback_assessments(&text, &SourceKind::PlainText);
                assert!(
                    (total(&out) - 100.0).abs() <= 0.01 + 1e-9,
                    "{text}: total {}",
                    total(&out)
                );
            }
        }
    }
}
