use crate::models::{CvAnalysis, ExperienceLevel, JobAnalysis, RefinementResult, Sentiment};

/// Share of job requirements covered by résumé skills, as a percentage
///
/// Rounded to two decimals. Zero when either side has nothing to compare.
pub fn compatibility_score(cv: &CvAnalysis, job: &JobAnalysis) -> f64 {
    let skills = cv.skills();
    if skills.is_empty() || job.requirements.is_empty() {
        return 0.0;
    }

    let matched = job
        .requirements
        .keys()
        .filter(|label| skills.contains_key(*label))
        .count();
    let score = matched as f64 / job.requirements.len() as f64 * 100.0;
    (score * 100.0).round() / 100.0
}

/// Requirement labels the résumé does not cover, in label order
pub fn missing_requirements(cv: &CvAnalysis, job: &JobAnalysis) -> Vec<String> {
    job.requirements
        .keys()
        .filter(|label| !cv.skills().contains_key(*label))
        .cloned()
        .collect()
}

/// Fixed, ordered advice derived from which analyses are present
pub fn recommendations(
    refinement: &RefinementResult,
    cv: Option<&CvAnalysis>,
    job: Option<&JobAnalysis>,
) -> Vec<String> {
    let mut advice = Vec::new();

    match refinement.sentiment {
        Sentiment::Negative => advice.push(
            "The interview tone reads as negative; review the answers for signs of stress or disengagement."
                .to_string(),
        ),
        Sentiment::Positive => {
            advice.push("The interview tone reads as positive and confident.".to_string())
        }
        Sentiment::Neutral => {}
    }

    if refinement.summary.is_empty() {
        advice.push("No summary could be generated; read the cleaned transcript in full.".to_string());
    }
    if refinement.key_points.is_empty() {
        advice.push(
            "No clear key points were found; the candidate's answers may need follow-up questions."
                .to_string(),
        );
    }

    match (cv, job) {
        (None, _) => advice.push("Provide a résumé to enable skill matching.".to_string()),
        (Some(_), None) => {
            advice.push("Provide a job description to enable compatibility scoring.".to_string())
        }
        (Some(cv), Some(job)) => {
            let missing = missing_requirements(cv, job);
            if !missing.is_empty() {
                advice.push(format!(
                    "Probe these requirements not evidenced in the résumé: {}.",
                    missing.join(", ")
                ));
            }

            let (cv_level, job_level) = (cv.record.derived_level, job.record.derived_level);
            if cv_level != ExperienceLevel::Unknown
                && job_level != ExperienceLevel::Unknown
                && cv_level != job_level
            {
                advice.push(format!(
                    "Experience level mismatch: résumé reads as {}, the role asks for {}.",
                    cv_level.as_str(),
                    job_level.as_str()
                ));
            }
        }
    }

    advice
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::AnalysisRecord;

    fn cv(skills: &[(&str, f64)]) -> CvAnalysis {
        CvAnalysis {
            record: AnalysisRecord {
                label_scores: skills.iter().map(|(l, s)| (l.to_string(), *s)).collect(),
                ..Default::default()
            },
        }
    }

    fn job(requirements: &[(&str, f64)]) -> JobAnalysis {
        let requirements: BTreeMap<String, f64> =
            requirements.iter().map(|(l, s)| (l.to_string(), *s)).collect();
        JobAnalysis {
            record: AnalysisRecord {
                label_scores: requirements.clone(),
                ..Default::default()
            },
            requirements,
        }
    }

    #[test]
    fn test_half_of_requirements_covered() {
        let score = compatibility_score(
            &cv(&[("technical_skills", 0.9)]),
            &job(&[("technical_skills", 0.8), ("soft_skills", 0.4)]),
        );
        assert_eq!(score, 50.0);
    }

    #[test]
    fn test_superset_scores_full() {
        let score = compatibility_score(
            &cv(&[("technical_skills", 0.9), ("soft_skills", 0.1), ("languages", 0.2)]),
            &job(&[("technical_skills", 0.8), ("soft_skills", 0.4)]),
        );
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_empty_sides_score_zero() {
        assert_eq!(compatibility_score(&cv(&[]), &job(&[("education", 0.5)])), 0.0);
        assert_eq!(compatibility_score(&cv(&[("education", 0.5)]), &job(&[])), 0.0);
    }

    #[test]
    fn test_score_rounds_to_two_decimals() {
        let score = compatibility_score(
            &cv(&[("a", 0.9)]),
            &job(&[("a", 0.5), ("b", 0.5), ("c", 0.5)]),
        );
        assert_eq!(score, 33.33);
    }

    #[test]
    fn test_recommendations_without_documents() {
        let refinement = RefinementResult::degraded("text".to_string());
        let advice = recommendations(&refinement, None, None);
        assert_eq!(advice.len(), 3);
        assert!(advice[0].starts_with("No summary"));
        assert!(advice[1].starts_with("No clear key points"));
        assert!(advice[2].contains("résumé"));
    }

    #[test]
    fn test_recommendations_with_gaps_and_level_mismatch() {
        let refinement = RefinementResult::new(
            "text".to_string(),
            Sentiment::Negative,
            "summary".to_string(),
            vec!["point".to_string()],
        );
        let mut cv = cv(&[("technical_skills", 0.9)]);
        cv.record.derived_level = ExperienceLevel::Junior;
        let mut job = job(&[("technical_skills", 0.8), ("soft_skills", 0.4)]);
        job.record.derived_level = ExperienceLevel::Senior;

        let advice = recommendations(&refinement, Some(&cv), Some(&job));
        assert_eq!(advice.len(), 3);
        assert!(advice[0].contains("negative"));
        assert!(advice[1].contains("soft_skills"));
        assert!(advice[2].contains("junior") && advice[2].contains("senior"));
    }

    #[test]
    fn test_recommendations_are_deterministic() {
        let refinement = RefinementResult::new(
            "text".to_string(),
            Sentiment::Positive,
            String::new(),
            Vec::new(),
        );
        let cv = cv(&[("technical_skills", 0.9)]);
        assert_eq!(
            recommendations(&refinement, Some(&cv), None),
            recommendations(&refinement, Some(&cv), None)
        );
        assert_eq!(recommendations(&refinement, Some(&cv), None).len(), 4);
    }
}
