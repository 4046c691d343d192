//! Terminal front-end: the interviewee chat and the reviewer dashboard.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::dashboard::SortBy;
use crate::session::{Candidate, CandidateStatus, CandidateUpdate, MessageKind, SharedEngine};

const REFRESH_EVERY: Duration = Duration::from_millis(200);

type InputLines = Lines<BufReader<Stdin>>;

enum LineAction {
    Continue,
    Quit,
}

pub async fn run_interview(engine: SharedEngine, resume: Option<&Path>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let candidate_id = match (resume, find_unfinished(&engine)) {
        (None, Some(id)) => {
            welcome_back(&engine, &id)?;
            id
        }
        _ => {
            let resume_text = match resume {
                Some(path) => Some(
                    std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read resume {}", path.display()))?,
                ),
                None => None,
            };
            engine.lock().create_candidate(resume_text)
        }
    };

    collect_contact_info(&engine, &candidate_id, &mut lines).await?;

    let status = engine.lock().candidate(&candidate_id).map(|c| c.status);
    if status == Some(CandidateStatus::NotStarted) {
        engine.lock().start_interview(&candidate_id)?;
        println!("Type your answer and press Enter. Commands: /pause, /resume, /quit\n");
    }

    chat_loop(&engine, &mut lines).await?;

    if let Some(candidate) = engine.lock().candidate(&candidate_id) {
        if candidate.status == CandidateStatus::Completed {
            print_candidate(candidate);
        }
    }
    Ok(())
}

fn find_unfinished(engine: &SharedEngine) -> Option<String> {
    let guard = engine.lock();
    if !guard.show_welcome_back() {
        return None;
    }
    let current = guard.current_candidate().filter(|c| c.status.is_unfinished());
    current
        .or_else(|| guard.candidates().find(|c| c.status.is_unfinished()))
        .map(|c| c.id.clone())
}

fn welcome_back(engine: &SharedEngine, id: &str) -> Result<()> {
    let mut guard = engine.lock();
    guard.set_current_candidate(id)?;

    if let Some(candidate) = guard.candidate(id) {
        println!(
            "👋 Welcome back, {}! Picking up at question {} of {}.",
            candidate.display_name(),
            candidate.current_question_index + 1,
            candidate.questions.len()
        );
        if let Some(question) = candidate.current_question() {
            println!(
                "\n({} - {}s, the clock restarts):\n\n{}\n",
                question.difficulty, question.time_limit, question.text
            );
        }
    }

    guard.resume_interview()?;
    guard.set_show_welcome_back(false);
    Ok(())
}

async fn collect_contact_info(engine: &SharedEngine, id: &str, lines: &mut InputLines) -> Result<()> {
    let missing = {
        let guard = engine.lock();
        match guard.candidate(id) {
            Some(c) if c.status == CandidateStatus::CollectingInfo => [
                ("name", is_blank(&c.name)),
                ("email", is_blank(&c.email)),
                ("phone", is_blank(&c.phone)),
            ],
            _ => return Ok(()),
        }
    };

    println!("📄 Resume received. A few details before we begin:");
    let mut update = CandidateUpdate::default();
    for (field, is_missing) in missing {
        if !is_missing {
            continue;
        }
        let value = prompt(lines, &format!("Your {}: ", field)).await?;
        match field {
            "name" => update.name = Some(value),
            "email" => update.email = Some(value),
            _ => update.phone = Some(value),
        }
    }

    let candidate = engine.lock().update_candidate(id, update)?;
    if candidate.status == CandidateStatus::CollectingInfo {
        anyhow::bail!("name, email and phone are all required to start");
    }
    Ok(())
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}

async fn prompt(lines: &mut InputLines, label: &str) -> Result<String> {
    loop {
        print!("{}", label);
        std::io::Write::flush(&mut std::io::stdout())?;
        let line = lines.next_line().await?.context("input closed")?;
        let value = line.trim();
        if !value.is_empty() {
            return Ok(value.to_string());
        }
    }
}

async fn chat_loop(engine: &SharedEngine, lines: &mut InputLines) -> Result<()> {
    let mut printed = 0usize;
    let mut last_remaining = None;
    let mut refresh = tokio::time::interval(REFRESH_EVERY);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if let LineAction::Quit = handle_line(engine, line.trim()) {
                            break;
                        }
                    }
                    None => break,
                }
            }
            _ = refresh.tick() => {}
        }

        let (fresh, timer, status) = {
            let guard = engine.lock();
            let transcript = guard.transcript();
            if printed > transcript.len() {
                printed = 0;
            }
            let fresh = transcript[printed..].to_vec();
            printed = transcript.len();
            (fresh, guard.timer_state(), guard.current_candidate().map(|c| c.status))
        };

        for message in fresh {
            match message.kind {
                MessageKind::Ai => println!("\n🤖 {}\n", message.content),
                MessageKind::System => println!("\n📊 {}\n", message.content),
                MessageKind::User if message.content.is_empty() => println!("⌛ Time's up, moving on."),
                MessageKind::User => {}
            }
        }

        if timer.is_running && last_remaining != Some(timer.remaining_seconds) {
            let remaining = timer.remaining_seconds;
            if remaining % 10 == 0 || remaining <= 5 {
                println!("⏳ {}s left", remaining);
            }
            last_remaining = Some(remaining);
        }

        if status == Some(CandidateStatus::Completed) {
            break;
        }
    }
    Ok(())
}

fn handle_line(engine: &SharedEngine, line: &str) -> LineAction {
    let mut guard = engine.lock();
    let result = match line {
        "/pause" => guard.pause_interview().map(|_| println!("⏸️ Paused. Type /resume to continue.")),
        "/resume" => guard.resume_interview(),
        "/quit" => {
            if guard.current_candidate().map(|c| c.status) == Some(CandidateStatus::InProgress) {
                if let Err(e) = guard.pause_interview() {
                    warn!("Could not pause before quitting: {}", e);
                }
            }
            println!("👋 Progress saved. Run again to pick up where you left off.");
            return LineAction::Quit;
        }
        "" => Ok(()),
        "/help" => {
            println!("Commands: /pause, /resume, /quit. Anything else is your answer.");
            Ok(())
        }
        answer => guard.submit_answer(answer),
    };

    if let Err(e) = result {
        println!("⚠️ {}", e);
    }
    LineAction::Continue
}

pub fn show_dashboard(engine: &SharedEngine, search: Option<String>, sort: Option<SortBy>) {
    let mut guard = engine.lock();
    if let Some(query) = search {
        guard.set_search_query(query);
    }
    if let Some(sort_by) = sort {
        guard.set_sort_by(sort_by);
    }

    let stats = guard.stats();
    println!(
        "📋 {} candidates | {} completed | {} in progress | average score {}",
        stats.total,
        stats.completed,
        stats.in_progress,
        stats
            .average_score
            .map(|s| format!("{}/100", s))
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "   search: '{}'  sort: {}\n",
        guard.search_query(),
        guard.sort_by()
    );

    let listed = guard.filtered_candidates();
    if listed.is_empty() {
        if guard.search_query().is_empty() {
            println!("No candidates yet. They appear here after they start interviews.");
        } else {
            println!("No candidates match. Try adjusting your search.");
        }
        return;
    }

    for candidate in listed {
        println!(
            "{:<24} {:<28} {:<16} {:>7}  {}",
            candidate.display_name(),
            candidate.email.as_deref().unwrap_or("-"),
            candidate.status,
            candidate
                .final_score
                .map(|s| format!("{}/100", s))
                .unwrap_or_else(|| "-".to_string()),
            candidate.id
        );
    }
    info!("Dashboard listed with sort {}", guard.sort_by());
}

pub fn show_candidate(engine: &SharedEngine, id: &str) -> Result<()> {
    let guard = engine.lock();
    let candidate = guard
        .candidate(id)
        .with_context(|| format!("no candidate with id {}", id))?;
    print_candidate(candidate);
    Ok(())
}

fn print_candidate(candidate: &Candidate) {
    println!("👤 {} ({})", candidate.display_name(), candidate.id);
    if let Some(email) = &candidate.email {
        println!("   email: {}", email);
    }
    if let Some(phone) = &candidate.phone {
        println!("   phone: {}", phone);
    }
    println!("   status: {}", candidate.status);

    for (number, question) in candidate.questions.iter().enumerate() {
        println!(
            "\nQ{} [{} - {}s] {}",
            number + 1,
            question.difficulty,
            question.time_limit,
            question.text
        );
        match candidate.answers.iter().find(|a| a.question_id == question.id) {
            Some(answer) if answer.text.is_empty() => {
                println!("   (no answer, time expired after {}s)", answer.time_spent)
            }
            Some(answer) => println!("   A ({}s): {}", answer.time_spent, answer.text),
            None => println!("   (not answered yet)"),
        }
        if let Some(score) = question.score {
            println!("   score: {}/10", score);
        }
        if let Some(feedback) = &question.feedback {
            println!("   feedback: {}", feedback);
        }
    }

    if let (Some(score), Some(summary)) = (candidate.final_score, &candidate.summary) {
        println!("\n🏆 Final score: {}/100\n{}", score, summary);
    }
}
