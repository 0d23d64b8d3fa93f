use std::time::Duration;

use hemobank_core::{BloodGroup, DomainError, SubmissionId};
use hemobank_events::{EventBus, EventEnvelope};
use hemobank_forms::{DonationForm, FormData, RequestForm, ValidationReport};
use hemobank_inventory::{StockAdjusted, StockEntry};
use hemobank_storage::{InventoryService, ServiceError, StorageSlot};

use crate::collaborators::{Notifier, NoticeKind, Pause};

/// Where a submission attempt currently stands.
///
/// `Rejected` and `Settled` are both terminal for one attempt; the next
/// submit starts over from `Validating`. The submit control is disabled
/// exactly while [`SubmissionEngine::is_busy`] holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Rejected,
    Applying,
    Settled,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Rejected => "rejected",
            SubmissionState::Applying => "applying",
            SubmissionState::Settled => "settled",
        }
    }
}

/// How a submission attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Validation failed: no notification, the per-field errors stay
    /// visible, the form keeps its values.
    Rejected(ValidationReport),
    /// The mutation was applied and persisted; a success notice was sent
    /// and the form should be reset.
    Completed {
        group: BloodGroup,
        entry: StockEntry,
    },
    /// The request exceeded available stock: an error notice was sent,
    /// inventory is unchanged, the form keeps its values.
    Unavailable {
        group: BloodGroup,
        requested: u32,
        available: u32,
    },
}

impl SubmissionOutcome {
    /// Whether the caller should clear the form fields.
    pub fn resets_form(&self) -> bool {
        matches!(self, SubmissionOutcome::Completed { .. })
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionConfig {
    /// Simulated processing latency before a mutation is applied.
    pub processing_delay: Duration,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(1500),
        }
    }
}

/// Drives form submissions against the inventory service.
///
/// Holds the store exclusively: mutations go through `&mut self`, so at
/// most one submission is in flight and no mutex is needed. The busy state
/// mirrors the disabled submit control.
pub struct SubmissionEngine<S, B, N, P> {
    service: InventoryService<S, B>,
    notifier: N,
    pause: P,
    config: SubmissionConfig,
    state: SubmissionState,
}

impl<S, B, N, P> SubmissionEngine<S, B, N, P>
where
    S: StorageSlot,
    B: EventBus<EventEnvelope<StockAdjusted>>,
    N: Notifier,
    P: Pause,
{
    pub fn new(
        service: InventoryService<S, B>,
        notifier: N,
        pause: P,
        config: SubmissionConfig,
    ) -> Self {
        Self {
            service,
            notifier,
            pause,
            config,
            state: SubmissionState::Idle,
        }
    }

    /// The wrapped service, for wiring read models and startup rendering.
    pub fn service(&self) -> &InventoryService<S, B> {
        &self.service
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// True while a submission is between `Validating` and `Settled`.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            SubmissionState::Validating | SubmissionState::Applying
        )
    }

    /// Submit a donation: +1 unit for the donor's group. Always succeeds
    /// once validation passes (adding stock cannot go negative).
    pub fn submit_donation(
        &mut self,
        data: &FormData,
    ) -> Result<SubmissionOutcome, ServiceError> {
        let submission_id = SubmissionId::new();
        let span = tracing::info_span!("submission", kind = "donation", id = %submission_id);
        let _guard = span.enter();

        self.transition(SubmissionState::Validating);
        let report = DonationForm::validate(data);
        if !report.is_valid() {
            self.transition(SubmissionState::Rejected);
            return Ok(SubmissionOutcome::Rejected(report));
        }
        let form = match DonationForm::parse(data) {
            Ok(form) => form,
            Err(err) => return self.settle_err(err.into()),
        };

        self.transition(SubmissionState::Applying);
        self.pause.pause(self.config.processing_delay);

        let entry = match self.service.apply_delta(form.blood_group, 1) {
            Ok(entry) => entry,
            Err(err) => return self.settle_err(err),
        };

        self.notifier.notify(
            "Thank you for your donation request! We will contact you shortly.",
            NoticeKind::Success,
        );
        self.transition(SubmissionState::Settled);
        Ok(SubmissionOutcome::Completed {
            group: form.blood_group,
            entry,
        })
    }

    /// Submit a blood request: −N units, contingent on availability.
    pub fn submit_request(
        &mut self,
        data: &FormData,
    ) -> Result<SubmissionOutcome, ServiceError> {
        let submission_id = SubmissionId::new();
        let span = tracing::info_span!("submission", kind = "request", id = %submission_id);
        let _guard = span.enter();

        self.transition(SubmissionState::Validating);
        let report = RequestForm::validate(data);
        if !report.is_valid() {
            self.transition(SubmissionState::Rejected);
            return Ok(SubmissionOutcome::Rejected(report));
        }
        let form = match RequestForm::parse(data) {
            Ok(form) => form,
            Err(err) => return self.settle_err(err.into()),
        };

        self.transition(SubmissionState::Applying);
        self.pause.pause(self.config.processing_delay);

        let entry = match self.service.apply_delta(form.blood_group, -i64::from(form.units)) {
            Ok(entry) => entry,
            Err(ServiceError::Domain(DomainError::InsufficientStock {
                group,
                requested,
                available,
            })) => {
                // Recovered into a user notification; inventory and the
                // form's values are left as they were.
                self.notifier.notify(
                    "Sorry, we currently don't have enough blood units available.",
                    NoticeKind::Error,
                );
                self.transition(SubmissionState::Settled);
                return Ok(SubmissionOutcome::Unavailable {
                    group,
                    requested,
                    available,
                });
            }
            Err(err) => return self.settle_err(err),
        };

        self.notifier.notify(
            "Your blood request has been approved and will be processed immediately.",
            NoticeKind::Success,
        );
        self.transition(SubmissionState::Settled);
        Ok(SubmissionOutcome::Completed {
            group: form.blood_group,
            entry,
        })
    }

    fn transition(&mut self, next: SubmissionState) {
        tracing::debug!(from = self.state.as_str(), to = next.as_str(), "submission state");
        self.state = next;
    }

    /// Settle before surfacing an internal error: the control is re-enabled
    /// and the engine stays re-submittable.
    fn settle_err(&mut self, err: ServiceError) -> Result<SubmissionOutcome, ServiceError> {
        tracing::error!(error = %err, "submission failed");
        self.transition(SubmissionState::Settled);
        Err(err)
    }
}
