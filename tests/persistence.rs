use crisp_interview_lib::dashboard::SortBy;
use crisp_interview_lib::interview::{InterviewEngine, QuestionBank, RandomEvaluator, RandomSelector};
use crisp_interview_lib::session::{CandidateStatus, CandidateUpdate, JsonFileStore, StateStore};

fn engine_at(path: &std::path::Path) -> InterviewEngine {
    InterviewEngine::new(QuestionBank::default())
        .with_selector(RandomSelector::with_seed(9))
        .with_evaluator(RandomEvaluator::with_seed(9))
        .with_store(JsonFileStore::new(path))
}

#[test]
fn missing_file_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = engine_at(&dir.path().join("state.json"));
    assert!(!engine.restore().unwrap());
    assert_eq!(engine.candidates().count(), 0);
    assert!(!engine.show_welcome_back());
}

#[test]
fn state_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");

    let (done, paused) = {
        let mut engine = engine_at(&path);
        let done = engine.create_candidate(Some("resume".to_string()));
        engine
            .update_candidate(
                &done,
                CandidateUpdate {
                    name: Some("Linus".to_string()),
                    email: Some("linus@example.org".to_string()),
                    phone: Some("555-0123".to_string()),
                },
            )
            .unwrap();
        engine.start_interview(&done).unwrap();
        for _ in 0..6 {
            engine.submit_answer("answer").unwrap();
        }

        let paused = engine.create_candidate(None);
        engine.start_interview(&paused).unwrap();
        engine.submit_answer("first").unwrap();
        engine.set_search_query("lin");
        engine.set_sort_by(SortBy::Name);
        (done, paused)
    };

    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["currentCandidateId"], paused.as_str());
    assert_eq!(raw["sortBy"], "name");
    assert_eq!(raw["candidates"][1]["status"], "in-progress");
    assert!(raw.get("chatMessages").is_none());

    let mut engine = engine_at(&path);
    assert!(engine.restore().unwrap());
    assert_eq!(engine.search_query(), "lin");
    assert_eq!(engine.sort_by(), SortBy::Name);
    assert!(engine.show_welcome_back());
    assert!(engine.transcript().is_empty());

    let finished = engine.candidate(&done).unwrap();
    assert_eq!(finished.status, CandidateStatus::Completed);
    assert_eq!(finished.answers.len(), 6);
    assert!(finished.final_score.is_some());

    let interrupted = engine.current_candidate().unwrap();
    assert_eq!(interrupted.id, paused);
    assert_eq!(interrupted.status, CandidateStatus::Paused);

    let listed: Vec<&str> = engine.filtered_candidates().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(listed, vec![done.as_str()]);

    engine.resume_interview().unwrap();
    engine.submit_answer("second").unwrap();
    let reloaded = JsonFileStore::new(&path).load().unwrap().unwrap();
    let saved = reloaded.candidates.iter().find(|c| c.id == paused).unwrap();
    assert_eq!(saved.answers.len(), 2);
    assert_eq!(saved.status, CandidateStatus::InProgress);
}
