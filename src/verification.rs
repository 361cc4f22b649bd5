//! One-time code delivery and confirmation capabilities
//!
//! The contact-form state machine never talks to a capability directly. It
//! hands out [`VerificationRequest`]s tagged with a generation number; this
//! module executes them one at a time (on a background thread for the
//! interactive UI, or inline for headless runs) and reports [`VerificationMessage`]s back.
//!
//! # Supersession
//!
//! Every request carries the generation current when it was issued. The state
//! machine only accepts a response whose generation matches the request it
//! is still waiting on, so a late answer to a superseded or abandoned request
//! is dropped.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Code-delivery capability failure. Never fatal: the form falls back to
/// manual code entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Code delivery unavailable: {0}")]
    Unavailable(String),

    #[error("Code delivery rejected the number: {0}")]
    Rejected(String),
}

/// Code-confirmation capability failure. Treated like a mismatch by the UI
/// but logged separately.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationError {
    #[error("Code confirmation unavailable: {0}")]
    Unavailable(String),

    #[error("Code confirmation failed: {0}")]
    Backend(String),
}

/// Sends a one-time code to a mobile number.
pub trait CodeDelivery: Send + Sync {
    fn send_code(&self, mobile: &str) -> Result<(), DeliveryError>;
}

/// Checks an entered one-time code.
pub trait CodeConfirmation: Send + Sync {
    fn confirm_code(&self, code: &str) -> Result<bool, ConfirmationError>;
}

/// What a request asks the capabilities to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    Deliver { mobile: String },
    Confirm { code: String },
}

/// A capability call issued by the contact-form state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub generation: u64,
    pub kind: RequestKind,
}

/// Completion reported back to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationMessage {
    Delivered {
        generation: u64,
        result: Result<(), DeliveryError>,
    },
    Confirmed {
        generation: u64,
        result: Result<bool, ConfirmationError>,
    },
}

impl VerificationMessage {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Delivered { generation, .. } | Self::Confirmed { generation, .. } => *generation,
        }
    }
}

/// Execute a request against the capabilities on the current thread.
pub fn execute(
    request: &VerificationRequest,
    delivery: &dyn CodeDelivery,
    confirmation: &dyn CodeConfirmation,
) -> VerificationMessage {
    let generation = request.generation;
    match &request.kind {
        RequestKind::Deliver { mobile } => {
            debug!("Delivering code (generation {})", generation);
            VerificationMessage::Delivered {
                generation,
                result: delivery.send_code(mobile),
            }
        }
        RequestKind::Confirm { code } => {
            debug!("Confirming code (generation {})", generation);
            VerificationMessage::Confirmed {
                generation,
                result: confirmation.confirm_code(code),
            }
        }
    }
}

/// Runs capability calls off the interaction thread.
///
/// A single long-lived thread takes requests from a channel and executes
/// them one at a time, so a resend never overlaps the delivery it replaces.
/// Results are queued on a second channel which the event loop drains with
/// [`VerificationWorker::try_recv`] between frames.
pub struct VerificationWorker {
    delivery: Arc<dyn CodeDelivery>,
    confirmation: Arc<dyn CodeConfirmation>,
    /// Held for the duration of every capability call
    call_lock: Arc<Mutex<()>>,
    request_tx: Sender<VerificationRequest>,
    rx: Receiver<VerificationMessage>,
}

impl VerificationWorker {
    pub fn new(delivery: Arc<dyn CodeDelivery>, confirmation: Arc<dyn CodeConfirmation>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<VerificationRequest>();
        let (tx, rx) = mpsc::channel();
        let call_lock = Arc::new(Mutex::new(()));

        let thread_delivery = Arc::clone(&delivery);
        let thread_confirmation = Arc::clone(&confirmation);
        let thread_lock = Arc::clone(&call_lock);
        thread::spawn(move || {
            debug!("Verification worker started");
            for request in request_rx {
                let message = {
                    let _guard = thread_lock.lock().unwrap_or_else(PoisonError::into_inner);
                    execute(&request, thread_delivery.as_ref(), thread_confirmation.as_ref())
                };
                // Receiver gone means the app is shutting down
                if tx.send(message).is_err() {
                    debug!("Verification result dropped: worker receiver closed");
                    break;
                }
            }
            debug!("Verification worker stopped");
        });

        Self {
            delivery,
            confirmation,
            call_lock,
            request_tx,
            rx,
        }
    }

    /// Queue a request for the background thread.
    pub fn dispatch(&self, request: VerificationRequest) {
        let generation = request.generation;
        if self.request_tx.send(request).is_err() {
            warn!("Verification worker is gone, request {} dropped", generation);
        }
    }

    /// Run a request inline and return its completion (headless mode).
    ///
    /// Waits for any call the background thread is making first.
    pub fn run_blocking(&self, request: &VerificationRequest) -> VerificationMessage {
        let _guard = self.call_lock.lock().unwrap_or_else(PoisonError::into_inner);
        execute(request, self.delivery.as_ref(), self.confirmation.as_ref())
    }

    /// Next finished request, if any. Never blocks.
    pub fn try_recv(&self) -> Option<VerificationMessage> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next finished request.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<VerificationMessage> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Capability pair that accepts one fixed code and never sends anything.
///
/// Only used when selected explicitly in the application config.
#[derive(Debug, Clone)]
pub struct DemoVerifier {
    code: String,
}

impl DemoVerifier {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl CodeDelivery for DemoVerifier {
    fn send_code(&self, mobile: &str) -> Result<(), DeliveryError> {
        info!("Demo delivery: no SMS sent to {}", mask_mobile(mobile));
        Ok(())
    }
}

impl CodeConfirmation for DemoVerifier {
    fn confirm_code(&self, code: &str) -> Result<bool, ConfirmationError> {
        Ok(code == self.code)
    }
}

/// Delivery that always fails, forcing the degraded manual-entry path.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineDelivery;

impl CodeDelivery for OfflineDelivery {
    fn send_code(&self, mobile: &str) -> Result<(), DeliveryError> {
        warn!("Offline delivery: cannot send code to {}", mask_mobile(mobile));
        Err(DeliveryError::Unavailable("offline mode".to_string()))
    }
}

/// Hide all but the last four digits of a number for logs.
pub fn mask_mobile(mobile: &str) -> String {
    let len = mobile.chars().count();
    mobile
        .chars()
        .enumerate()
        .map(|(i, c)| if i + 4 < len { '*' } else { c })
        .collect()
}
