//! Kiosk event loop.
//!
//! One task owns the questionnaire. Operator lines and completions of
//! background work (auto-advance timers, position requests, scoring) are
//! handled one at a time in arrival order. Background work only ever
//! reports back through the event channel and carries the step token it
//! was started for, so late completions are dropped by the engine.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use kiosque_core::models::submission::QuestionnaireResult;
use kiosque_core::models::triage::TriageResult;
use kiosque_questionnaire::error::QuestionnaireError;
use kiosque_questionnaire::{InputSource, Questionnaire, Step, StepToken};
use kiosque_report::{ReportContext, ReportFormat, render_report};
use kiosque_triage::error::TriageError;
use kiosque_triage::{FAILURE_ALERT, Scorer};

use crate::commands::{Action, MenuAction, interpret, interpret_menu};
use crate::config::KiosqueConfig;
use crate::location::{LocationProvider, acquire};
use crate::screen::{self, FAILURE_MENU, REPORT_MENU, SUBMITTING};
use crate::state::{Control, Event, Phase};

#[derive(Debug, Clone, Copy)]
pub struct Timings {
    pub auto_advance: Duration,
    pub location_timeout: Duration,
}

impl From<&KiosqueConfig> for Timings {
    fn from(config: &KiosqueConfig) -> Self {
        Self {
            auto_advance: config.auto_advance_delay(),
            location_timeout: config.location_timeout(),
        }
    }
}

pub struct Kiosk<'c, W: Write> {
    flow: Questionnaire<'c>,
    phase: Phase,
    timings: Timings,
    scorer: Arc<dyn Scorer>,
    locator: Arc<dyn LocationProvider>,
    reports_dir: Option<PathBuf>,
    events: mpsc::UnboundedSender<Event>,
    inbox: mpsc::UnboundedReceiver<Event>,
    timer: Option<JoinHandle<()>>,
    locating: Option<JoinHandle<()>>,
    out: W,
}

impl<'c, W: Write> Kiosk<'c, W> {
    pub fn new(
        flow: Questionnaire<'c>,
        timings: Timings,
        scorer: Arc<dyn Scorer>,
        locator: Arc<dyn LocationProvider>,
        out: W,
    ) -> Self {
        let (events, inbox) = mpsc::unbounded_channel();
        Self {
            flow,
            phase: Phase::Asking,
            timings,
            scorer,
            locator,
            reports_dir: None,
            events,
            inbox,
            timer: None,
            locating: None,
            out,
        }
    }

    /// Archive an HTML copy of every report under `dir`.
    pub fn with_reports_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.reports_dir = dir;
        self
    }

    pub fn flow(&self) -> &Questionnaire<'c> {
        &self.flow
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Wait for the next background completion.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.inbox.recv().await
    }

    /// Serve the operator until they quit or input closes.
    pub async fn run<R>(mut self, mut lines: Lines<R>) -> eyre::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.show()?;
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        info!("operator input closed");
                        break;
                    };
                    if self.handle_line(&line)? == Control::Quit {
                        break;
                    }
                }
                Some(event) = self.inbox.recv() => self.handle_event(event)?,
            }
        }
        self.cancel_pending();
        info!(nurse = %self.flow.session().nurse_name, "kiosk session ended");
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> eyre::Result<Control> {
        match &self.phase {
            Phase::Asking => self.handle_answer(line),
            Phase::Submitting(_) => {
                if interpret_menu(line) == MenuAction::Quit {
                    return Ok(Control::Quit);
                }
                writeln!(self.out, "{SUBMITTING}")?;
                Ok(Control::Continue)
            }
            Phase::Report { .. } => match interpret_menu(line) {
                MenuAction::NewTest => {
                    self.cancel_pending();
                    self.flow.restart();
                    self.phase = Phase::Asking;
                    self.show()?;
                    Ok(Control::Continue)
                }
                MenuAction::Quit => Ok(Control::Quit),
                _ => {
                    writeln!(self.out, "{REPORT_MENU}")?;
                    Ok(Control::Continue)
                }
            },
            Phase::Failed(submission) => match interpret_menu(line) {
                MenuAction::Resubmit => {
                    let submission = submission.clone();
                    self.submit(submission)?;
                    Ok(Control::Continue)
                }
                MenuAction::Back => {
                    self.flow.retreat();
                    self.phase = Phase::Asking;
                    self.show()?;
                    Ok(Control::Continue)
                }
                MenuAction::Quit => Ok(Control::Quit),
                _ => {
                    writeln!(self.out, "{FAILURE_MENU}")?;
                    Ok(Control::Continue)
                }
            },
        }
    }

    pub fn handle_event(&mut self, event: Event) -> eyre::Result<()> {
        match event {
            Event::AutoAdvance(token) => {
                self.timer = None;
                if self.phase != Phase::Asking {
                    return Ok(());
                }
                match self.flow.advance_from(token) {
                    Ok(Some(step)) => self.after_step(step),
                    Ok(None) => Ok(()),
                    Err(e) => self.after_error(e),
                }
            }
            Event::Location(token, Ok(coordinates)) => {
                self.locating = None;
                match self.flow.complete_location(token, coordinates) {
                    Ok(Some(step)) => self.after_step(step),
                    Ok(None) => Ok(()),
                    Err(e) => self.after_error(e),
                }
            }
            Event::Location(token, Err(e)) => {
                self.locating = None;
                if self.flow.fail_location(token, e.to_string()) {
                    self.show()?;
                }
                Ok(())
            }
            Event::Triage(outcome) => self.after_triage(outcome),
        }
    }

    fn handle_answer(&mut self, line: &str) -> eyre::Result<Control> {
        let Some(question) = self.flow.current() else {
            return Ok(Control::Continue);
        };
        let options = self.flow.options().unwrap_or_default();

        match interpret(question, &options, line) {
            Action::Quit => return Ok(Control::Quit),
            Action::Back => {
                self.cancel_pending();
                self.flow.retreat();
                self.show()?;
            }
            Action::Advance => self.advance()?,
            Action::Record {
                field,
                value,
                source,
                then_advance,
            } => {
                self.cancel_timer();
                match self.flow.record(&field, value, source) {
                    Ok(_) if then_advance => self.advance()?,
                    Ok(recorded) => {
                        if recorded.auto_advance {
                            self.schedule_advance(recorded.token);
                        }
                        self.show()?;
                    }
                    Err(e) => self.after_error(e)?,
                }
            }
            Action::Toggle(fields) => {
                self.cancel_timer();
                for field in fields {
                    let ticked = self.flow.answers().flag(&field);
                    if let Err(e) = self.flow.record(&field, !ticked, InputSource::Typed) {
                        warn!(field = %field, error = %e, "checkbox toggle refused");
                    }
                }
                self.show()?;
            }
            Action::Locate => match self.flow.begin_location() {
                Ok(token) => {
                    writeln!(self.out, "  Recherche de la position...")?;
                    self.out.flush()?;
                    self.spawn_locate(token);
                }
                Err(e) => self.after_error(e)?,
            },
            Action::Invalid(message) => {
                writeln!(self.out, "  ! {message}")?;
                self.show()?;
            }
        }
        Ok(Control::Continue)
    }

    fn advance(&mut self) -> eyre::Result<()> {
        self.cancel_pending();
        match self.flow.advance() {
            Ok(step) => self.after_step(step),
            Err(e) => self.after_error(e),
        }
    }

    fn after_step(&mut self, step: Step) -> eyre::Result<()> {
        match step {
            Step::Question(_) => self.show(),
            Step::Complete(result) => self.submit(result),
        }
    }

    /// Rejections and location lookup failures are already on screen as
    /// the inline message; anything else is printed above the question.
    fn after_error(&mut self, error: QuestionnaireError) -> eyre::Result<()> {
        match error {
            QuestionnaireError::Rejected(_)
            | QuestionnaireError::UnknownOption { .. }
            | QuestionnaireError::MissingParent { .. } => {}
            other => {
                warn!(error = %other, "input refused");
                writeln!(self.out, "  ! {other}")?;
            }
        }
        self.show()
    }

    fn submit(&mut self, submission: Box<QuestionnaireResult>) -> eyre::Result<()> {
        writeln!(self.out, "\n{SUBMITTING}")?;
        self.out.flush()?;

        let scorer = Arc::clone(&self.scorer);
        let payload = (*submission).clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = tokio::task::spawn_blocking(move || scorer.evaluate(&payload))
                .await
                .unwrap_or_else(|e| Err(TriageError::Transport(format!("scoring task failed: {e}"))));
            let _ = events.send(Event::Triage(outcome));
        });

        self.phase = Phase::Submitting(submission);
        Ok(())
    }

    fn after_triage(&mut self, outcome: Result<TriageResult, TriageError>) -> eyre::Result<()> {
        if !matches!(self.phase, Phase::Submitting(_)) {
            debug!("dropping triage result outside of a submission");
            return Ok(());
        }
        let Phase::Submitting(submission) = std::mem::replace(&mut self.phase, Phase::Asking) else {
            return Ok(());
        };

        match outcome {
            Ok(triage) => {
                let report = ReportContext::new(&submission, &triage);
                writeln!(self.out, "\n{}", render_report(&report, ReportFormat::Text)?)?;
                self.archive(&report);
                writeln!(self.out, "{REPORT_MENU}")?;
                self.phase = Phase::Report {
                    submission,
                    triage: Box::new(triage),
                };
            }
            Err(e) => {
                warn!(consultation_id = %submission.consultation_id, error = %e, "triage failed");
                writeln!(self.out, "\n{FAILURE_ALERT}")?;
                writeln!(self.out, "{FAILURE_MENU}")?;
                self.phase = Phase::Failed(submission);
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Best effort: a report that cannot be archived is still on screen.
    fn archive(&mut self, report: &ReportContext) {
        let Some(dir) = &self.reports_dir else {
            return;
        };
        let path = dir.join(format!("{}.{}", report.consultation_id, ReportFormat::Html.extension()));
        let written = render_report(report, ReportFormat::Html)
            .map_err(|e| eyre::eyre!(e))
            .and_then(|html| {
                std::fs::create_dir_all(dir)?;
                std::fs::write(&path, html)?;
                Ok(())
            });
        match written {
            Ok(()) => {
                info!(path = %path.display(), "report archived");
                let _ = writeln!(self.out, "Rapport enregistré : {}", path.display());
            }
            Err(e) => warn!(path = %path.display(), error = %e, "failed to archive report"),
        }
    }

    fn schedule_advance(&mut self, token: StepToken) {
        self.cancel_timer();
        let events = self.events.clone();
        let delay = self.timings.auto_advance;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(Event::AutoAdvance(token));
        }));
    }

    fn spawn_locate(&mut self, token: StepToken) {
        if let Some(task) = self.locating.take() {
            task.abort();
        }
        let events = self.events.clone();
        let locator = Arc::clone(&self.locator);
        let timeout = self.timings.location_timeout;
        self.locating = Some(tokio::spawn(async move {
            let outcome = acquire(locator.as_ref(), timeout).await;
            let _ = events.send(Event::Location(token, outcome));
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(task) = self.timer.take() {
            task.abort();
        }
    }

    fn cancel_pending(&mut self) {
        self.cancel_timer();
        if let Some(task) = self.locating.take() {
            debug!("cancelling position request");
            task.abort();
        }
    }

    fn show(&mut self) -> eyre::Result<()> {
        if self.phase == Phase::Asking {
            let options = match self.flow.options() {
                Ok(options) => options,
                Err(QuestionnaireError::Completed) => Vec::new(),
                Err(e) => {
                    writeln!(self.out, "  ! {e}")?;
                    Vec::new()
                }
            };
            write!(self.out, "{}", screen::question(&self.flow, &options))?;
        }
        self.out.flush()?;
        Ok(())
    }
}
