//! Line-oriented front-end for the admission enquiry form.
//!
//! Plays the part of the admissions page: asks for each field (re-asking
//! while a required value is empty), shows `Submitting...` while the
//! request is on the wire, then renders the success or failure view. A
//! failure offers "try again", which resubmits the retained record.

use admissions_core::messages::{contact_note, FAILURE_HEADING, SUCCESS_BODY, SUCCESS_HEADING};
use admissions_core::status::SubmissionStatus;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::submitter::EnquirySubmitter;
use crate::transport::EnquiryTransport;

pub const FORM_HEADING: &str = "Apply Now For Admissions 2025-26";

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The enquiry was accepted by the intake endpoint.
    Accepted,
    /// Input ended, or the visitor declined to retry.
    Abandoned,
}

/// Text shown for a given status.
pub fn render_status(status: &SubmissionStatus) -> String {
    match status {
        SubmissionStatus::Idle => String::new(),
        SubmissionStatus::Submitting => "Submitting...".to_string(),
        SubmissionStatus::Success => format!("{SUCCESS_HEADING}\n{SUCCESS_BODY}"),
        SubmissionStatus::Error(message) => {
            format!("{FAILURE_HEADING}\n{message}\n{}", contact_note())
        }
    }
}

/// Prompt/response loop over any async line source and sink.
pub struct Terminal<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Fill the form, submit, and offer retries until accepted or abandoned.
    pub async fn run<T>(
        &mut self,
        submitter: &mut EnquirySubmitter<T>,
    ) -> anyhow::Result<SessionOutcome>
    where
        T: EnquiryTransport + 'static,
    {
        self.say(FORM_HEADING).await?;

        if !self.collect_fields(submitter).await? {
            return Ok(SessionOutcome::Abandoned);
        }
        submitter.record().ensure_complete()?;

        submitter.submit()?;
        loop {
            self.say(&render_status(submitter.status())).await?;
            let status = submitter.settle().await.clone();
            self.say(&render_status(&status)).await?;

            match status {
                SubmissionStatus::Success => return Ok(SessionOutcome::Accepted),
                SubmissionStatus::Error(_) => {
                    if !self.confirm("Try again? [Y/n]: ").await? {
                        return Ok(SessionOutcome::Abandoned);
                    }
                    submitter.retry()?;
                }
                SubmissionStatus::Idle | SubmissionStatus::Submitting => {
                    return Ok(SessionOutcome::Abandoned);
                }
            }
        }
    }

    /// Ask for every field the record is still missing, in form order.
    /// Returns `false` if input ends.
    async fn collect_fields<T>(
        &mut self,
        submitter: &mut EnquirySubmitter<T>,
    ) -> anyhow::Result<bool>
    where
        T: EnquiryTransport + 'static,
    {
        let missing = submitter.record().missing_fields();
        for field in missing {
            let prompt = format!("{} ({}): ", field.label(), field.placeholder());
            loop {
                let Some(answer) = self.ask(&prompt).await? else {
                    return Ok(false);
                };
                submitter.update_field(field, answer.trim())?;
                if !submitter.record().missing_fields().contains(&field) {
                    break;
                }
                self.say(&format!("{} is required.", field.label())).await?;
            }
        }
        Ok(true)
    }

    /// Yes/no question; an empty answer means yes, end of input means no.
    async fn confirm(&mut self, prompt: &str) -> std::io::Result<bool> {
        Ok(match self.ask(prompt).await? {
            Some(answer) => !matches!(answer.trim().to_ascii_lowercase().as_str(), "n" | "no"),
            None => false,
        })
    }

    async fn ask(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        self.out.write_all(prompt.as_bytes()).await?;
        self.out.flush().await?;
        self.lines.next_line().await
    }

    async fn say(&mut self, text: &str) -> std::io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await
    }
}
