use chrono::Utc;
use log::{debug, info, warn};

use super::{
    score_questions, Answer, AnswerEvaluator, CountdownTimer, ManualTicks, QuestionBank, QuestionSelector,
    RandomEvaluator, RandomSelector, TickOutcome, TickScheduler, TimerState,
};
use crate::dashboard::{self, DashboardStats, SortBy};
use crate::error::{InterviewError, Result};
use crate::session::{
    Candidate, CandidateRegistry, CandidateStatus, CandidateUpdate, ChatMessage, MessageKind, MemoryStore,
    PersistedState, StateStore,
};

const COMPLETION_MESSAGE: &str =
    "Congratulations! You have completed the interview. Your responses are being evaluated.";

/// Session controller: the only writer of candidate records.
///
/// Commands mutate state and save the persisted document; queries borrow.
/// The countdown is driven from outside through [`InterviewEngine::tick`],
/// which the injected [`TickScheduler`] calls once per second.
pub struct InterviewEngine {
    registry: CandidateRegistry,
    current_candidate_id: Option<String>,
    transcript: Vec<ChatMessage>,
    is_interview_active: bool,
    show_welcome_back: bool,
    search_query: String,
    sort_by: SortBy,
    timer: CountdownTimer,
    bank: QuestionBank,
    selector: Box<dyn QuestionSelector>,
    evaluator: Box<dyn AnswerEvaluator>,
    scheduler: Box<dyn TickScheduler>,
    store: Box<dyn StateStore>,
}

impl InterviewEngine {
    pub fn new(bank: QuestionBank) -> Self {
        InterviewEngine {
            registry: CandidateRegistry::new(),
            current_candidate_id: None,
            transcript: Vec::new(),
            is_interview_active: false,
            show_welcome_back: false,
            search_query: String::new(),
            sort_by: SortBy::default(),
            timer: CountdownTimer::new(),
            bank,
            selector: Box::new(RandomSelector::new()),
            evaluator: Box::new(RandomEvaluator::new()),
            scheduler: Box::new(ManualTicks),
            store: Box::new(MemoryStore::new()),
        }
    }

    pub fn with_selector(mut self, selector: impl QuestionSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub fn with_evaluator(mut self, evaluator: impl AnswerEvaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    pub fn with_scheduler(mut self, scheduler: Box<dyn TickScheduler>) -> Self {
        self.scheduler.cancel();
        self.scheduler = scheduler;
        self
    }

    pub fn with_store(mut self, store: impl StateStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    /// Loads the persisted document, if any. Returns whether anything was loaded.
    ///
    /// No countdown survives a reload, so an `in-progress` session comes back
    /// `paused` and the welcome-back prompt is raised for any unfinished one.
    pub fn restore(&mut self) -> Result<bool> {
        let Some(state) = self.store.load()? else {
            return Ok(false);
        };

        let mut registry = CandidateRegistry::from_candidates(state.candidates);
        let interrupted: Vec<String> = registry
            .iter()
            .filter(|c| c.status == CandidateStatus::InProgress)
            .map(|c| c.id.clone())
            .collect();
        for id in &interrupted {
            registry.modify(id, |c| c.status = CandidateStatus::Paused)?;
            info!("⏸️ Session {} was interrupted, restored as paused", id);
        }

        self.show_welcome_back = registry.iter().any(|c| c.status.is_unfinished());
        self.current_candidate_id = state.current_candidate_id.filter(|id| registry.contains(id));
        self.registry = registry;
        self.search_query = state.search_query;
        self.sort_by = state.sort_by;
        self.transcript.clear();
        self.is_interview_active = false;
        self.stop_timer();

        info!("✅ Restored {} candidates", self.registry.len());
        Ok(true)
    }

    // Commands

    pub fn create_candidate(&mut self, resume_text: Option<String>) -> String {
        let id = self.registry.create(resume_text);
        self.switch_current(&id);
        self.persist();
        id
    }

    pub fn update_candidate(&mut self, id: &str, update: CandidateUpdate) -> Result<Candidate> {
        let candidate = self.registry.update(id, update)?.clone();
        self.persist();
        Ok(candidate)
    }

    pub fn set_current_candidate(&mut self, id: &str) -> Result<()> {
        let status = self
            .registry
            .get(id)
            .map(|c| c.status)
            .ok_or_else(|| InterviewError::CandidateNotFound(id.to_string()))?;

        self.switch_current(id);
        if !matches!(status, CandidateStatus::NotStarted | CandidateStatus::Completed) {
            self.show_welcome_back = true;
        }
        self.persist();
        Ok(())
    }

    pub fn add_chat_message(&mut self, kind: MessageKind, content: impl Into<String>) -> ChatMessage {
        let message = ChatMessage::new(kind, content);
        self.transcript.push(message.clone());
        message
    }

    pub fn start_interview(&mut self, candidate_id: &str) -> Result<()> {
        let candidate = self
            .registry
            .get(candidate_id)
            .ok_or_else(|| InterviewError::CandidateNotFound(candidate_id.to_string()))?;
        if candidate.status != CandidateStatus::NotStarted {
            return Err(InterviewError::InvalidState {
                id: candidate_id.to_string(),
                status: candidate.status,
                operation: "start",
            });
        }

        let questions = self.bank.build_question_set(self.selector.as_mut())?;
        let first = questions[0].clone();

        self.switch_current(candidate_id);
        self.registry.modify(candidate_id, |c| {
            c.questions = questions;
            c.answers.clear();
            c.current_question_index = 0;
            c.status = CandidateStatus::InProgress;
        })?;
        self.is_interview_active = true;

        info!("🎬 Interview started for {}", candidate_id);
        self.add_chat_message(
            MessageKind::Ai,
            format!(
                "Let's begin the interview! Here's your first question ({} - {}s):\n\n{}",
                first.difficulty, first.time_limit, first.text
            ),
        );
        self.start_timer(first.time_limit);
        self.persist();
        Ok(())
    }

    /// Records an answer for the current question and moves on.
    /// An empty `text` is what the countdown submits when it runs out.
    pub fn submit_answer(&mut self, text: &str) -> Result<()> {
        let id = self.current_candidate_id.clone().ok_or(InterviewError::NoCurrentCandidate)?;
        let candidate = self
            .registry
            .get(&id)
            .ok_or_else(|| InterviewError::CandidateNotFound(id.clone()))?;
        if candidate.status != CandidateStatus::InProgress {
            return Err(InterviewError::InvalidState {
                id,
                status: candidate.status,
                operation: "submit an answer for",
            });
        }
        let index = candidate.current_question_index;
        let question = candidate
            .current_question()
            .cloned()
            .ok_or_else(|| InterviewError::NoCurrentQuestion(id.clone()))?;
        let last_questions = (index + 1 >= candidate.questions.len()).then(|| candidate.questions.clone());

        let answer = Answer {
            question_id: question.id.clone(),
            text: text.to_string(),
            time_spent: question.time_limit.saturating_sub(self.timer.remaining()),
            timestamp: Utc::now(),
        };
        let evaluation = self.evaluator.evaluate(&question, &answer);
        let score = evaluation.score.min(10);

        // The final answer must leave a scoreable set, checked before anything is recorded.
        if let Some(mut questions) = last_questions {
            if let Some(q) = questions.get_mut(index) {
                q.score = Some(score);
            }
            score_questions(&questions)?;
        }

        info!(
            "📝 Answer for {} ({}s spent, scored {}/10)",
            question.id, answer.time_spent, score
        );
        self.registry.modify(&id, |c| {
            c.answers.push(answer);
            if let Some(q) = c.questions.get_mut(index) {
                q.score = Some(score);
                q.feedback = evaluation.feedback;
            }
        })?;

        self.add_chat_message(MessageKind::User, text);
        self.stop_timer();
        let advanced = self.next_question(&id);
        self.persist();
        advanced
    }

    pub fn pause_interview(&mut self) -> Result<()> {
        let id = self.current_candidate_id.clone().ok_or(InterviewError::NoCurrentCandidate)?;
        let status = self.status_of(&id)?;
        if status != CandidateStatus::InProgress {
            return Err(InterviewError::InvalidState {
                id,
                status,
                operation: "pause",
            });
        }

        self.pause_candidate(&id)?;
        self.persist();
        Ok(())
    }

    /// Restarts the current question's countdown at its full limit; time
    /// elapsed before the pause is not carried over.
    pub fn resume_interview(&mut self) -> Result<()> {
        let id = self.current_candidate_id.clone().ok_or(InterviewError::NoCurrentCandidate)?;
        let candidate = self
            .registry
            .get(&id)
            .ok_or_else(|| InterviewError::CandidateNotFound(id.clone()))?;
        if candidate.status != CandidateStatus::Paused {
            return Err(InterviewError::InvalidState {
                id,
                status: candidate.status,
                operation: "resume",
            });
        }
        let time_limit = candidate
            .current_question()
            .map(|q| q.time_limit)
            .ok_or_else(|| InterviewError::NoCurrentQuestion(id.clone()))?;

        self.registry.modify(&id, |c| c.status = CandidateStatus::InProgress)?;
        self.is_interview_active = true;
        self.show_welcome_back = false;
        info!("▶️ Interview resumed for {}", id);

        self.start_timer(time_limit);
        self.persist();
        Ok(())
    }

    /// One-second tick for countdown `generation`. On expiry the countdown
    /// has already stopped when the empty answer is submitted.
    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        let outcome = self.timer.tick(generation);
        match outcome {
            TickOutcome::Expired => {
                info!("⌛ Time is up, submitting an empty answer");
                if let Err(e) = self.submit_answer("") {
                    warn!("Auto-submit after timeout failed: {}", e);
                }
            }
            TickOutcome::Running(remaining) => debug!("⏱️ {}s left", remaining),
            TickOutcome::Stale => {}
        }
        outcome
    }

    pub fn set_show_welcome_back(&mut self, show: bool) {
        self.show_welcome_back = show;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.persist();
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
        self.persist();
    }

    // Queries

    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.registry.iter()
    }

    pub fn candidate(&self, id: &str) -> Option<&Candidate> {
        self.registry.get(id)
    }

    pub fn current_candidate_id(&self) -> Option<&str> {
        self.current_candidate_id.as_deref()
    }

    pub fn current_candidate(&self) -> Option<&Candidate> {
        self.current_candidate_id.as_deref().and_then(|id| self.registry.get(id))
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_interview_active(&self) -> bool {
        self.is_interview_active
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn show_welcome_back(&self) -> bool {
        self.show_welcome_back
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    /// Candidates matching the saved search, in the saved order.
    pub fn filtered_candidates(&self) -> Vec<&Candidate> {
        dashboard::filter_candidates(self.registry.iter(), &self.search_query, self.sort_by)
    }

    pub fn stats(&self) -> DashboardStats {
        dashboard::dashboard_stats(self.registry.iter())
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            candidates: self.registry.to_vec(),
            current_candidate_id: self.current_candidate_id.clone(),
            search_query: self.search_query.clone(),
            sort_by: self.sort_by,
        }
    }

    // Internals

    fn next_question(&mut self, id: &str) -> Result<()> {
        let candidate = self
            .registry
            .get(id)
            .ok_or_else(|| InterviewError::CandidateNotFound(id.to_string()))?;
        let next_index = candidate.current_question_index + 1;
        let total = candidate.questions.len();

        if next_index >= total {
            let report = self.calculate_score(id)?;
            self.registry.modify(id, |c| {
                c.status = CandidateStatus::Completed;
                c.current_question_index = next_index;
                c.final_score = Some(report.final_score);
                c.summary = Some(report.summary.clone());
            })?;
            self.is_interview_active = false;

            info!("🏁 Interview completed for {} with {}/100", id, report.final_score);
            self.add_chat_message(
                MessageKind::System,
                format!(
                    "Interview completed! Final score: {}/100\n\n{}",
                    report.final_score, report.summary
                ),
            );
            self.add_chat_message(MessageKind::Ai, COMPLETION_MESSAGE);
            return Ok(());
        }

        let next = candidate.questions[next_index].clone();
        self.registry.modify(id, |c| c.current_question_index = next_index)?;
        self.add_chat_message(
            MessageKind::Ai,
            format!(
                "Question {} of {} ({} - {}s):\n\n{}",
                next_index + 1,
                total,
                next.difficulty,
                next.time_limit,
                next.text
            ),
        );
        self.start_timer(next.time_limit);
        Ok(())
    }

    fn calculate_score(&self, id: &str) -> Result<super::ScoreReport> {
        let candidate = self
            .registry
            .get(id)
            .ok_or_else(|| InterviewError::CandidateNotFound(id.to_string()))?;
        score_questions(&candidate.questions)
    }

    fn status_of(&self, id: &str) -> Result<CandidateStatus> {
        self.registry
            .get(id)
            .map(|c| c.status)
            .ok_or_else(|| InterviewError::CandidateNotFound(id.to_string()))
    }

    fn pause_candidate(&mut self, id: &str) -> Result<()> {
        self.registry.modify(id, |c| c.status = CandidateStatus::Paused)?;
        self.stop_timer();
        self.is_interview_active = false;
        info!("⏸️ Interview paused for {}", id);
        Ok(())
    }

    /// Makes `id` current. A running session of the previous candidate is
    /// paused and the transcript starts over.
    fn switch_current(&mut self, id: &str) {
        if self.current_candidate_id.as_deref() == Some(id) {
            return;
        }

        if let Some(previous) = self.current_candidate_id.take() {
            if self.status_of(&previous).ok() == Some(CandidateStatus::InProgress) {
                if let Err(e) = self.pause_candidate(&previous) {
                    warn!("Could not pause {} while switching: {}", previous, e);
                }
            }
        }

        self.transcript.clear();
        self.current_candidate_id = Some(id.to_string());
    }

    fn start_timer(&mut self, limit_seconds: u32) {
        let generation = self.timer.start(limit_seconds);
        self.scheduler.schedule(generation);
    }

    fn stop_timer(&mut self) {
        self.timer.stop();
        self.scheduler.cancel();
    }

    fn persist(&mut self) {
        let state = self.snapshot();
        if let Err(e) = self.store.save(&state) {
            warn!("Failed to save interview state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::{Difficulty, Evaluation, Question};

    struct FirstN;

    impl QuestionSelector for FirstN {
        fn select(&mut self, _difficulty: Difficulty, pool: &[String], count: usize) -> Vec<String> {
            pool.iter().take(count).cloned().collect()
        }
    }

    struct FixedScore(u8);

    impl AnswerEvaluator for FixedScore {
        fn evaluate(&mut self, _question: &Question, _answer: &Answer) -> Evaluation {
            Evaluation {
                score: self.0,
                feedback: Some("Noted.".to_string()),
            }
        }
    }

    fn engine(score: u8) -> InterviewEngine {
        InterviewEngine::new(QuestionBank::default())
            .with_selector(FirstN)
            .with_evaluator(FixedScore(score))
    }

    fn started(score: u8) -> (InterviewEngine, String) {
        let mut engine = engine(score);
        let id = engine.create_candidate(None);
        engine.start_interview(&id).unwrap();
        (engine, id)
    }

    fn tick_n(engine: &mut InterviewEngine, n: u32) {
        for _ in 0..n {
            let generation = engine.timer_state().generation;
            engine.tick(generation);
        }
    }

    #[test]
    fn test_start_interview() {
        let (engine, id) = started(8);
        let candidate = engine.candidate(&id).unwrap();

        assert_eq!(candidate.status, CandidateStatus::InProgress);
        assert_eq!(candidate.questions.len(), 6);
        assert_eq!(candidate.current_question_index, 0);
        assert!(engine.is_interview_active());
        assert_eq!(engine.remaining_seconds(), 20);
        assert_eq!(engine.transcript().len(), 1);
        assert_eq!(engine.transcript()[0].kind, MessageKind::Ai);
        assert!(engine.transcript()[0]
            .content
            .starts_with("Let's begin the interview! Here's your first question (easy - 20s):"));
    }

    #[test]
    fn test_start_requires_not_started() {
        let mut engine = engine(8);
        let id = engine.create_candidate(Some("resume".to_string()));
        let err = engine.start_interview(&id).unwrap_err();
        assert!(matches!(
            err,
            InterviewError::InvalidState { status: CandidateStatus::CollectingInfo, .. }
        ));
        assert!(matches!(
            engine.start_interview("nobody").unwrap_err(),
            InterviewError::CandidateNotFound(_)
        ));
    }

    #[test]
    fn test_submit_records_time_spent() {
        let (mut engine, id) = started(7);
        tick_n(&mut engine, 5);
        engine.submit_answer("let is block scoped").unwrap();

        let candidate = engine.candidate(&id).unwrap();
        assert_eq!(candidate.answers.len(), 1);
        assert_eq!(candidate.answers[0].time_spent, 5);
        assert_eq!(candidate.answers[0].question_id, "q-easy-0");
        assert_eq!(candidate.questions[0].score, Some(7));
        assert_eq!(candidate.questions[0].feedback.as_deref(), Some("Noted."));
        assert_eq!(candidate.current_question_index, 1);
        assert_eq!(engine.remaining_seconds(), 20);

        let contents: Vec<&str> = engine.transcript().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents[1], "let is block scoped");
        assert!(contents[2].starts_with("Question 2 of 6 (easy - 20s):"));
    }

    #[test]
    fn test_timeout_auto_submits_once() {
        let (mut engine, id) = started(6);
        tick_n(&mut engine, 19);
        assert_eq!(engine.remaining_seconds(), 1);

        let generation = engine.timer_state().generation;
        assert_eq!(engine.tick(generation), TickOutcome::Expired);

        let candidate = engine.candidate(&id).unwrap();
        assert_eq!(candidate.answers.len(), 1);
        assert_eq!(candidate.answers[0].text, "");
        assert_eq!(candidate.answers[0].time_spent, 20);

        // A late tick for the expired countdown changes nothing.
        assert_eq!(engine.tick(generation), TickOutcome::Stale);
        assert_eq!(engine.candidate(&id).unwrap().answers.len(), 1);
    }

    #[test]
    fn test_pause_and_resume_restart_full_limit() {
        let (mut engine, id) = started(6);
        tick_n(&mut engine, 12);
        engine.pause_interview().unwrap();

        assert_eq!(engine.candidate(&id).unwrap().status, CandidateStatus::Paused);
        assert!(!engine.timer_state().is_running);
        assert!(!engine.is_interview_active());

        tick_n(&mut engine, 3);
        assert_eq!(engine.remaining_seconds(), 0);
        assert!(matches!(
            engine.submit_answer("too late").unwrap_err(),
            InterviewError::InvalidState { .. }
        ));

        engine.resume_interview().unwrap();
        assert_eq!(engine.candidate(&id).unwrap().status, CandidateStatus::InProgress);
        assert_eq!(engine.remaining_seconds(), 20);
        assert!(engine.timer_state().is_running);
        assert!(matches!(
            engine.resume_interview().unwrap_err(),
            InterviewError::InvalidState { .. }
        ));
    }

    #[test]
    fn test_completion_scores_once() {
        let (mut engine, id) = started(10);
        for _ in 0..6 {
            engine.submit_answer("answer").unwrap();
        }

        let candidate = engine.candidate(&id).unwrap();
        assert_eq!(candidate.status, CandidateStatus::Completed);
        assert_eq!(candidate.final_score, Some(100));
        assert_eq!(candidate.current_question_index, 6);
        assert!(candidate.summary.as_deref().unwrap().contains("Performance: Excellent."));
        assert!(!engine.is_interview_active());
        assert!(!engine.timer_state().is_running);

        let system: Vec<_> = engine
            .transcript()
            .iter()
            .filter(|m| m.kind == MessageKind::System)
            .collect();
        assert_eq!(system.len(), 1);
        assert!(system[0].content.starts_with("Interview completed! Final score: 100/100"));
        assert_eq!(engine.transcript().last().unwrap().content, COMPLETION_MESSAGE);

        let err = engine.submit_answer("again").unwrap_err();
        assert!(matches!(err, InterviewError::InvalidState { status: CandidateStatus::Completed, .. }));
        assert_eq!(engine.candidate(&id).unwrap().answers.len(), 6);
    }

    #[test]
    fn test_commands_without_candidate() {
        let mut engine = engine(5);
        assert!(matches!(engine.submit_answer("x").unwrap_err(), InterviewError::NoCurrentCandidate));
        assert!(matches!(engine.pause_interview().unwrap_err(), InterviewError::NoCurrentCandidate));
        assert!(matches!(engine.resume_interview().unwrap_err(), InterviewError::NoCurrentCandidate));
        assert!(engine.transcript().is_empty());
    }

    #[test]
    fn test_switching_candidate_pauses_running_session() {
        let (mut engine, first) = started(5);
        let second = engine.create_candidate(None);

        assert_eq!(engine.current_candidate_id(), Some(second.as_str()));
        assert_eq!(engine.candidate(&first).unwrap().status, CandidateStatus::Paused);
        assert!(!engine.timer_state().is_running);
        assert!(engine.transcript().is_empty());

        engine.set_current_candidate(&first).unwrap();
        assert!(engine.show_welcome_back());
        engine.resume_interview().unwrap();
        assert!(!engine.show_welcome_back());

        assert!(matches!(
            engine.set_current_candidate("candidate-unknown").unwrap_err(),
            InterviewError::CandidateNotFound(_)
        ));
    }

    #[test]
    fn test_every_command_is_saved() {
        let store = MemoryStore::new();
        let mut engine = engine(9).with_store(store.clone());
        let id = engine.create_candidate(None);
        engine.start_interview(&id).unwrap();
        engine.submit_answer("first").unwrap();
        engine.set_sort_by(SortBy::Score);

        assert_eq!(store.save_count(), 4);
        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.current_candidate_id.as_deref(), Some(id.as_str()));
        assert_eq!(saved.sort_by, SortBy::Score);
        assert_eq!(saved.candidates[0].answers.len(), 1);
    }

    #[test]
    fn test_restore_pauses_interrupted_session() {
        let store = MemoryStore::new();
        let mut engine = engine(9).with_store(store.clone());
        let id = engine.create_candidate(None);
        engine.start_interview(&id).unwrap();
        engine.submit_answer("first").unwrap();
        drop(engine);

        let mut restored = InterviewEngine::new(QuestionBank::default()).with_store(store);
        assert!(restored.restore().unwrap());

        let candidate = restored.current_candidate().unwrap();
        assert_eq!(candidate.id, id);
        assert_eq!(candidate.status, CandidateStatus::Paused);
        assert_eq!(candidate.current_question_index, 1);
        assert!(restored.show_welcome_back());
        assert!(restored.transcript().is_empty());

        restored.resume_interview().unwrap();
        assert_eq!(restored.remaining_seconds(), 20);
    }

    #[test]
    fn test_unscoreable_final_answer_leaves_candidate_untouched() {
        let mut questions = QuestionBank::default().build_question_set(&mut FirstN).unwrap();
        for question in questions.iter_mut().take(4) {
            question.score = Some(7);
        }
        let last = questions.len() - 1;
        let mut candidate = Candidate::new(None);
        candidate.status = CandidateStatus::InProgress;
        candidate.current_question_index = last;
        candidate.questions = questions;
        let id = candidate.id.clone();

        let store = MemoryStore::with_state(&PersistedState {
            current_candidate_id: Some(id.clone()),
            candidates: vec![candidate],
            ..Default::default()
        })
        .unwrap();
        let mut engine = engine(8).with_store(store.clone());
        engine.restore().unwrap();
        engine.resume_interview().unwrap();
        let saved = store.document();

        let err = engine.submit_answer("last answer").unwrap_err();
        assert!(matches!(err, InterviewError::UnscoredQuestion(_)));

        let candidate = engine.candidate(&id).unwrap();
        assert_eq!(candidate.status, CandidateStatus::InProgress);
        assert_eq!(candidate.current_question_index, last);
        assert!(candidate.answers.is_empty());
        assert!(candidate.questions[last].score.is_none());
        assert!(candidate.final_score.is_none());
        assert_eq!(store.document(), saved);
    }
}
