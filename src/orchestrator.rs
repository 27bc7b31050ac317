//! Recalculates whenever the roster or the selection changes.
//!
//! Each pass gets a sequence number. Only the response to the most recently
//! issued pass is applied; responses to superseded passes are dropped when
//! they arrive, so out-of-order completions never overwrite newer data.

use crate::engine::CalculationEngine;
use crate::error::WcResult;
use crate::mapper::to_payload;
use crate::protocol::{CalcResult, CalculationRequest};
use crate::reactive::{Subscriber, Subscribers, Subscription};
use crate::roster::{RosterSnapshot, RosterStore};
use std::cell::RefCell;
use std::rc::Rc;
use strum_macros::Display;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    /// Nothing to calculate; no result.
    IdleEmpty,
    Loading,
    Ready,
    /// Last pass failed. Any earlier result is still held.
    Failed,
}

#[derive(Debug)]
struct OrchestratorState {
    phase: Phase,
    result: Option<Rc<CalcResult>>,
    last_error: Option<String>,
    issued: u64,
}

/// A pass that passed the empty check and must be sent to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPass {
    pub seq: u64,
    pub requests: Vec<CalculationRequest>,
}

pub struct Orchestrator {
    engine: Rc<dyn CalculationEngine>,
    state: RefCell<OrchestratorState>,
    subscribers: Subscribers,
}

impl Orchestrator {
    pub fn new(engine: Rc<dyn CalculationEngine>) -> Self {
        Self {
            engine,
            state: RefCell::new(OrchestratorState {
                phase: Phase::IdleEmpty,
                result: None,
                last_error: None,
                issued: 0,
            }),
            subscribers: Subscribers::new(),
        }
    }

    pub fn subscribe(&self, subscriber: Subscriber) -> Subscription {
        self.subscribers.subscribe(subscriber)
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == Phase::Loading
    }

    pub fn result(&self) -> Option<Rc<CalcResult>> {
        self.state.borrow().result.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    /// Starts a pass for `snapshot`. An empty unit list settles to
    /// [`Phase::IdleEmpty`] immediately and returns `None`.
    pub fn begin_pass(&self, snapshot: &RosterSnapshot) -> Option<PendingPass> {
        let units = snapshot.calculation_units();
        let pending = {
            let mut state = self.state.borrow_mut();
            state.issued += 1;
            let seq = state.issued;

            if units.is_empty() {
                state.phase = Phase::IdleEmpty;
                state.result = None;
                state.last_error = None;
                debug!("Pass #{} skipped: no units", seq);
                None
            } else {
                state.phase = Phase::Loading;
                let scope = match &snapshot.selected {
                    Some(unit) => format!("unit '{}'", unit.name),
                    None => format!("army of {}", units.len()),
                };
                debug!("Pass #{} issued for {}", seq, scope);
                Some(PendingPass {
                    seq,
                    requests: to_payload(&units),
                })
            }
        };

        self.subscribers.notify();
        pending
    }

    /// Applies the engine's answer for pass `seq`, unless a newer pass has
    /// been issued since.
    pub fn complete_pass(&self, seq: u64, outcome: WcResult<CalcResult>) {
        {
            let mut state = self.state.borrow_mut();
            if seq != state.issued {
                debug!("Pass #{} superseded by #{}; response dropped", seq, state.issued);
                return;
            }

            match outcome {
                Ok(result) => {
                    info!("✅ Pass #{} complete", seq);
                    state.result = Some(Rc::new(result));
                    state.last_error = None;
                    state.phase = Phase::Ready;
                }
                Err(e) => {
                    error!("❌ Calculation pass #{} failed: {}", seq, e);
                    state.last_error = Some(e.to_string());
                    state.phase = Phase::Failed;
                }
            }
        }

        self.subscribers.notify();
    }

    /// Runs one pass to completion on the current task.
    pub async fn run_pass(&self, snapshot: &RosterSnapshot) {
        let Some(pass) = self.begin_pass(snapshot) else {
            return;
        };
        let engine = Rc::clone(&self.engine);
        let outcome = engine.calculate(&pass.requests).await;
        self.complete_pass(pass.seq, outcome);
    }

    /// Starts a pass and sends it in the background.
    ///
    /// Must be called from inside a `tokio::task::LocalSet`.
    pub fn spawn_pass(self: &Rc<Self>, snapshot: &RosterSnapshot) {
        let Some(pass) = self.begin_pass(snapshot) else {
            return;
        };
        let this = Rc::clone(self);
        tokio::task::spawn_local(async move {
            let engine = Rc::clone(&this.engine);
            let outcome = engine.calculate(&pass.requests).await;
            this.complete_pass(pass.seq, outcome);
        });
    }

    /// Recalculates now and after every change to `store`. Dropping the
    /// returned subscription stops the automatic passes.
    ///
    /// Must be called from inside a `tokio::task::LocalSet`.
    pub fn attach(self: &Rc<Self>, store: &Rc<RosterStore>) -> Subscription {
        let weak_self = Rc::downgrade(self);
        let weak_store = Rc::downgrade(store);

        let subscription = store.subscribe(Rc::new(move || {
            if let (Some(this), Some(store)) = (weak_self.upgrade(), weak_store.upgrade()) {
                this.spawn_pass(&store.snapshot());
            }
        }));

        self.spawn_pass(&store.snapshot());
        subscription
    }
}
