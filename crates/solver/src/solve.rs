//! Per-payload solve loop.
//!
//! Presents a task payload to the scenario cache first; only a miss spends
//! search work. The computed answers are stored before they are handed
//! back, so a repeat of the same payload content is answered from memory.

use roadcheck_protocol::{Answer, TaskPayload};

use crate::cache::ScenarioCache;
use crate::ranker::rank_worst_edge;

/// Outcome of solving one payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    /// One verdict per question, aligned with payload question order.
    pub answers: Vec<Answer>,
    /// True when the answers came from the cache instead of fresh searches.
    pub cache_hit: bool,
}

/// Solves every question of `payload`, consulting `cache` first and
/// storing the computed answers on a miss.
pub fn solve_task(cache: &mut ScenarioCache, payload: &TaskPayload) -> SolveReport {
    if let Some(cached) = cache.lookup(payload) {
        log::info!(
            "payload {} seen before, reusing {} cached answers",
            payload.id,
            cached.len()
        );
        return SolveReport {
            answers: cached.to_vec(),
            cache_hit: true,
        };
    }

    log::info!(
        "payload {} not seen before, solving {} questions",
        payload.id,
        payload.questions.len()
    );

    let answers: Vec<Answer> = payload
        .questions
        .iter()
        .map(|question| {
            let verdict = rank_worst_edge(&question.params.map.cities)
                .map(|(from, to)| (from.name.clone(), to.name.clone()));
            match &verdict {
                Some((from, to)) => {
                    log::info!("question {}: worst road {} -> {}", question.id, from, to);
                }
                None => log::info!("question {}: no deviating road", question.id),
            }
            verdict
        })
        .collect();

    cache.store(payload.clone(), answers.clone());

    SolveReport {
        answers,
        cache_hit: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn payload(json: serde_json::Value) -> TaskPayload {
        serde_json::from_value(json).expect("payload")
    }

    fn two_question_payload() -> TaskPayload {
        payload(serde_json::json!({
            "ID": 9,
            "questions": [
                {
                    "ID": 1,
                    "params": { "map": { "cities": [
                        { "name": "A", "position": { "x": 0, "y": 0 },
                          "distances": { "B": 10, "C": 1 } },
                        { "name": "B", "position": { "x": 3, "y": 0 }, "distances": {} },
                        { "name": "C", "position": { "x": 0, "y": 3 }, "distances": {} }
                    ] } }
                },
                {
                    "ID": 2,
                    "params": { "map": { "cities": [
                        { "name": "A", "position": { "x": 0, "y": 0 },
                          "distances": { "B": 3 } },
                        { "name": "B", "position": { "x": 3, "y": 0 }, "distances": {} }
                    ] } }
                }
            ]
        }))
    }

    #[test]
    fn answers_align_one_to_one_with_questions() {
        let mut cache = ScenarioCache::new();
        let report = solve_task(&mut cache, &two_question_payload());

        assert!(!report.cache_hit);
        assert_eq!(
            report.answers,
            vec![Some(("A".to_string(), "B".to_string())), None]
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn second_solve_of_the_same_payload_hits_the_cache() {
        let mut cache = ScenarioCache::new();
        let first = solve_task(&mut cache, &two_question_payload());
        let second = solve_task(&mut cache, &two_question_payload());

        assert!(!first.cache_hit);
        assert!(second.cache_hit);
        assert_eq!(second.answers, first.answers);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn a_reordered_fetch_of_the_same_content_hits_the_cache() {
        let mut cache = ScenarioCache::new();
        solve_task(&mut cache, &two_question_payload());

        let reordered = payload(serde_json::json!({
            "questions": [
                {
                    "params": { "map": { "cities": [
                        { "distances": { "C": 1, "B": 10 },
                          "position": { "y": 0, "x": 0 }, "name": "A" },
                        { "name": "B", "position": { "x": 3, "y": 0 }, "distances": {} },
                        { "name": "C", "position": { "x": 0, "y": 3 }, "distances": {} }
                    ] } },
                    "ID": 1
                },
                {
                    "ID": 2,
                    "params": { "map": { "cities": [
                        { "name": "A", "position": { "x": 0, "y": 0 },
                          "distances": { "B": 3 } },
                        { "name": "B", "position": { "x": 3, "y": 0 }, "distances": {} }
                    ] } }
                }
            ],
            "ID": 9
        }));

        let report = solve_task(&mut cache, &reordered);
        assert!(report.cache_hit);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn a_payload_without_questions_solves_to_nothing() {
        let mut cache = ScenarioCache::new();
        let report = solve_task(
            &mut cache,
            &payload(serde_json::json!({ "ID": 0, "questions": [] })),
        );

        assert!(!report.cache_hit);
        assert!(report.answers.is_empty());
        assert_eq!(cache.len(), 1);
    }
}
