//! Spinner feedback for pipeline steps

use crate::error::{ScaffoldError, ToolError};
use crate::executor::{StepObserver, StepOutcome};
use std::sync::Mutex;
use std::time::Duration;

/// Shows one spinner per running step
#[derive(Default)]
pub(crate) struct SpinnerObserver {
    active: Mutex<Option<cliclack::ProgressBar>>,
}

impl SpinnerObserver {
    fn take(&self) -> Option<cliclack::ProgressBar> {
        self.active.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl StepObserver for SpinnerObserver {
    fn step_started(&self, name: &str) {
        let spinner = cliclack::spinner();
        spinner.start(capitalize(name));
        if let Ok(mut slot) = self.active.lock() {
            *slot = Some(spinner);
        }
    }

    fn step_retrying(&self, name: &str, attempt: u32, delay: Duration, error: &ToolError) {
        if let Ok(slot) = self.active.lock() {
            if let Some(spinner) = slot.as_ref() {
                spinner.set_message(format!(
                    "{} (attempt {} failed: {}, retrying in {}s)",
                    capitalize(name),
                    attempt,
                    first_line(&error.to_string()),
                    delay.as_secs()
                ));
            }
        }
    }

    fn step_finished(&self, name: &str, outcome: &StepOutcome) {
        let Some(spinner) = self.take() else {
            return;
        };
        match outcome {
            StepOutcome::Succeeded { attempts: 1 } => spinner.stop(capitalize(name)),
            StepOutcome::Succeeded { attempts } => {
                spinner.stop(format!("{} (after {} attempts)", capitalize(name), attempts))
            }
            StepOutcome::SoftFailed { error } => spinner.error(format!(
                "{} skipped: {}",
                capitalize(name),
                first_line(&error.to_string())
            )),
        }
    }

    fn step_failed(&self, name: &str, _error: &ScaffoldError) {
        if let Some(spinner) = self.take() {
            spinner.error(format!("{} failed", capitalize(name)));
        }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or(message)
}
