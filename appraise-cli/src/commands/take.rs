//! Interactive assessment flow

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use dialoguer::{Confirm, Editor, Input, MultiSelect, Select};

use appraise_core::{
    AnswerValue, ApiError, AssessmentEngine, Attachment, Question, Role, SessionError,
    SessionLoader, SessionPhase, WidgetSpec, render_input,
};

use crate::commands::guard;
use crate::context::AppContext;

#[derive(Debug, Args)]
pub struct TakeArgs {
    /// Id of the test to take
    pub test_id: i64,
}

#[derive(Clone, Copy)]
enum Action {
    Next,
    Previous,
    Attach,
    Submit,
    Quit,
}

enum SubmitOutcome {
    /// The response was completed server-side
    Completed,
    /// Submission failed and the user declined to retry
    Abandoned,
    /// A required answer is still missing
    BackToQuestions,
}

pub async fn run(args: TakeArgs, ctx: &AppContext) -> Result<()> {
    if !guard(&ctx.store, Role::User) {
        return Ok(());
    }

    let loader = SessionLoader::new(Arc::clone(&ctx.api));
    let mut engine = match loader.start(args.test_id).await {
        Ok(engine) => engine,
        Err(e @ SessionError::Api(ApiError::Unauthorized)) => return Err(e.into()),
        Err(e) => {
            // Loader failure is terminal for the flow; back to the dashboard
            println!("Could not start the test: {e}");
            println!("See available tests with: appraise tests");
            return Ok(());
        }
    };

    println!("{}", engine.test().title);
    if let Some(description) = &engine.test().description {
        println!("{description}");
    }

    loop {
        println!();
        let question = engine.current_question().clone();
        println!(
            "Question {} of {}{}",
            engine.index() + 1,
            engine.question_count(),
            if question.required { " (required)" } else { "" }
        );
        if let Some(section) = &question.section {
            println!("[{section}]");
        }

        if let Some(value) = prompt_answer(&question, engine.answer(question.id))? {
            engine.set_answer(question.id, value)?;
        }

        match choose_action(&engine)? {
            Action::Next => {
                if let Err(e) = engine.go_next() {
                    report_refusal(e)?;
                }
            }
            Action::Previous => {
                if let Err(e) = engine.go_previous() {
                    report_refusal(e)?;
                }
            }
            Action::Attach => stage_attachment(&mut engine)?,
            Action::Submit => {
                if engine.attachment().is_none()
                    && Confirm::new()
                        .with_prompt("Attach an image before submitting?")
                        .default(false)
                        .interact()?
                {
                    stage_attachment(&mut engine)?;
                }
                match submit(&mut engine).await? {
                    SubmitOutcome::Completed => break,
                    SubmitOutcome::Abandoned => {
                        println!(
                            "Your answers are saved. Resume with: appraise take {}",
                            engine.test().id
                        );
                        return Ok(());
                    }
                    SubmitOutcome::BackToQuestions => {}
                }
            }
            Action::Quit => {
                println!(
                    "Progress saved. Resume with: appraise take {}",
                    engine.test().id
                );
                return Ok(());
            }
        }
    }

    if let Some(line) = closing_line(engine.phase()) {
        println!("{line}");
    }
    Ok(())
}

/// Finalize, looping on failure while the user asks to retry
async fn submit(engine: &mut AssessmentEngine) -> Result<SubmitOutcome> {
    loop {
        match engine.finalize().await {
            Ok(()) => return Ok(SubmitOutcome::Completed),
            Err(SessionError::Validation(v)) => {
                println!("Cannot submit yet: {v}.");
                return Ok(SubmitOutcome::BackToQuestions);
            }
            Err(e @ SessionError::Api(ApiError::Unauthorized)) => return Err(e.into()),
            Err(e) => {
                println!("Submission failed: {e}");
                if Confirm::new()
                    .with_prompt("Retry submission?")
                    .default(true)
                    .interact()?
                {
                    engine.retry()?;
                } else {
                    return Ok(SubmitOutcome::Abandoned);
                }
            }
        }
    }
}

/// Line printed when the question loop ends. Success is claimed only
/// for a session the backend completed.
fn closing_line(phase: &SessionPhase) -> Option<&'static str> {
    match phase {
        SessionPhase::Completed => Some("Test submitted successfully."),
        _ => None,
    }
}

fn report_refusal(error: SessionError) -> Result<()> {
    match error {
        SessionError::Validation(v) => {
            println!("Cannot move on: {v}.");
            Ok(())
        }
        other => Err(other.into()),
    }
}

/// Prompt for the question using the widget its kind maps to.
///
/// Returns None when the user left the answer unchanged.
fn prompt_answer(
    question: &Question,
    current: Option<&AnswerValue>,
) -> Result<Option<AnswerValue>> {
    let value = match render_input(question, current) {
        WidgetSpec::TextInput { value, placeholder } => {
            let prompt = match placeholder {
                Some(hint) if value.is_empty() => format!("{} ({hint})", question.text),
                _ => question.text.clone(),
            };
            let answer: String = Input::new()
                .with_prompt(prompt)
                .with_initial_text(value)
                .allow_empty(true)
                .interact_text()?;
            AnswerValue::from(answer)
        }
        WidgetSpec::TextArea { value, .. } => {
            println!("{}", question.text);
            match Editor::new().edit(&value)? {
                Some(text) => AnswerValue::from(text.trim_end().to_string()),
                // Editor aborted: keep the current answer
                None => return Ok(None),
            }
        }
        WidgetSpec::RadioGroup { options, selected } => {
            if options.is_empty() {
                return Ok(None);
            }
            let default = selected
                .as_deref()
                .and_then(|s| options.iter().position(|o| o == s))
                .unwrap_or(0);
            let pick = Select::new()
                .with_prompt(&question.text)
                .items(&options)
                .default(default)
                .interact()?;
            AnswerValue::from(options[pick].clone())
        }
        WidgetSpec::CheckboxGroup { options, selected } => {
            if options.is_empty() {
                return Ok(None);
            }
            let defaults: Vec<bool> = options.iter().map(|o| selected.contains(o)).collect();
            let picks = MultiSelect::new()
                .with_prompt(&question.text)
                .items(&options)
                .defaults(&defaults)
                .interact()?;
            let chosen: Vec<String> = picks.into_iter().map(|i| options[i].clone()).collect();
            AnswerValue::from(chosen)
        }
        WidgetSpec::Slider { min, max, value } => {
            let picked: u32 = Input::new()
                .with_prompt(format!("{} ({min}-{max})", question.text))
                .default(value)
                .validate_with(move |v: &u32| -> Result<(), String> {
                    if *v >= min && *v <= max {
                        Ok(())
                    } else {
                        Err(format!("enter a value between {min} and {max}"))
                    }
                })
                .interact_text()?;
            // Range values travel as numeric strings
            AnswerValue::from(picked.to_string())
        }
    };

    Ok(Some(value))
}

fn choose_action(engine: &AssessmentEngine) -> Result<Action> {
    let actions: &[(&str, Action)] = if engine.is_last_question() {
        &[
            ("Submit", Action::Submit),
            ("Attach image", Action::Attach),
            ("Previous question", Action::Previous),
            ("Save and exit", Action::Quit),
        ]
    } else {
        &[
            ("Next question", Action::Next),
            ("Previous question", Action::Previous),
            ("Save and exit", Action::Quit),
        ]
    };

    let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();
    let pick = Select::new().items(&labels).default(0).interact()?;
    Ok(actions[pick].1)
}

/// Read an image from disk and stage it on the engine, replacing any
/// previously staged attachment.
fn stage_attachment(engine: &mut AssessmentEngine) -> Result<()> {
    let raw: String = Input::new().with_prompt("Image path").interact_text()?;
    let path = PathBuf::from(raw.trim());

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("Could not read {}: {e}", path.display());
            return Ok(());
        }
    };
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment")
        .to_string();

    let attachment = Attachment::new(bytes, file_name, mime_for(&path));
    println!(
        "Staged {} ({} bytes); it will be uploaded on submit.",
        attachment.file_name,
        attachment.size()
    );
    engine.attach_image(attachment)?;
    Ok(())
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}
