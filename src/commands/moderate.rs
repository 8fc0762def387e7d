use console::{style, Term};
use spinners::{Spinner, Spinners};

use crate::api::{flagged, ModerationClient, RunError, RunSummary};
use crate::core::config::Settings;
use crate::core::prompts::load_prompts;
use crate::core::storage::{save_result, setup, ResultEntry};
use crate::core::utils::{local_timestamp, prompt_id};

/// Moderate every prompt in the configured file, one call at a time.
///
/// Each result is appended to the results file before the next prompt is
/// sent, so a failure part-way leaves the earlier entries on disk.
pub async fn run(settings: &Settings, client: &ModerationClient) -> Result<RunSummary, RunError> {
    setup(&settings.results_dir)?;
    let prompts = load_prompts(&settings.prompts_file)?;
    let results_path = settings.results_path();
    log::info!(
        "moderating {} prompts from {} with {}",
        prompts.len(),
        settings.prompts_file.display(),
        client.model()
    );

    let interactive = Term::stdout().is_term();
    let mut summary = RunSummary::default();

    for (idx, prompt) in prompts.iter().enumerate() {
        let id = prompt_id(idx + 1);
        let timestamp = local_timestamp();

        let mut sp = interactive
            .then(|| Spinner::new(Spinners::Dots9, format!("Moderating {}...", id)));
        let response = match client.moderate(&prompt.content).await {
            Ok(response) => response,
            Err(source) => {
                if let Some(sp) = sp.as_mut() {
                    sp.stop_with_message(format!("{} {} failed", style("✗").red().bold(), id));
                }
                return Err(RunError::Moderation { id, source });
            }
        };

        let is_flagged = flagged(&response);
        log::debug!("{} flagged={:?}", id, is_flagged);
        if is_flagged == Some(true) {
            summary.flagged += 1;
        }

        let label_info = prompt
            .display_label()
            .map(|l| format!(" (Label: {})", l))
            .unwrap_or_default();
        let done = format!("{} Moderated {}{}", style("✓").green().bold(), id, label_info);

        let entry = ResultEntry {
            id,
            timestamp,
            label: prompt.label.clone(),
            input: prompt.content.clone(),
            response,
        };
        let saved = save_result(&entry, &results_path);
        match sp.as_mut() {
            Some(sp) if saved.is_ok() => sp.stop_with_message(done),
            Some(sp) => sp.stop_with_message(format!("{} {} not saved", style("✗").red().bold(), entry.id)),
            None if saved.is_ok() => println!("{}", done),
            None => {}
        }
        saved?;
        summary.moderated += 1;
    }

    println!("Completed moderation of {} prompts", prompts.len());
    log::info!(
        "{} of {} prompts flagged, results in {}",
        summary.flagged,
        summary.moderated,
        results_path.display()
    );
    Ok(summary)
}
