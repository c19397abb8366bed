//! Letter → reply → plant lifecycle.
//!
//! [`Garden`] is the single owner of the profile, letters, replies and
//! plants. Every mutation is a read-modify-write under one lock: the new
//! collection is saved first and only replaces the in-memory copy once the
//! save succeeded, so a failed write leaves state untouched.
//!
//! ```text
//! submit_letter ──► letter saved, pending_reply + processing set
//!                     │ (spawned)
//!                     ▼
//!                 generator ──ok──► reply saved ──► flags cleared, unread
//!                     └──err──► flags cleared, no reply
//! plant_seed(reply) ──► plant saved in `seed`
//! tick_growth ──► stages advanced, saved only on change
//! ```

use crate::clock::{Clock, SystemClock};
use crate::error::{GardenError, Result};
use crate::generator::{ReplyGenerator, ReplyRequest};
use crate::growth::{advance_all, GrowthThresholds};
use crate::letter::{intensity_in_range, Letter};
use crate::plant::Plant;
use crate::profile::UserProfile;
use crate::reply::Reply;
use crate::store::{self, Slot, Store};
use crate::types::{Context, Emotion, GrowthStage, PlantType, Status};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A letter as composed by the user, before it is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterDraft {
    pub content: String,
    pub emotion: Emotion,
    pub intensity: u8,
    pub contexts: BTreeSet<Context>,
    pub statuses: BTreeSet<Status>,
}

impl LetterDraft {
    pub fn new(content: impl Into<String>, emotion: Emotion, intensity: u8) -> Self {
        Self {
            content: content.into(),
            emotion,
            intensity,
            contexts: BTreeSet::new(),
            statuses: BTreeSet::new(),
        }
    }

    pub fn with_contexts(mut self, contexts: impl IntoIterator<Item = Context>) -> Self {
        self.contexts.extend(contexts);
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = Status>) -> Self {
        self.statuses.extend(statuses);
        self
    }

    fn is_valid(&self) -> bool {
        !self.content.trim().is_empty() && intensity_in_range(self.intensity)
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub profile: Option<UserProfile>,
    pub letters: Vec<Letter>,
    pub replies: Vec<Reply>,
    pub plants: Vec<Plant>,
    pub pending_reply: bool,
    pub processing: bool,
    pub has_unread_reply: bool,
}

/// One plant moving to a later stage during a growth tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageChange {
    pub plant_id: String,
    pub kind: PlantType,
    pub from: GrowthStage,
    pub to: GrowthStage,
}

/// Knobs for [`Garden::open`].
pub struct GardenOptions {
    pub thresholds: GrowthThresholds,
    /// Minimum turnaround between a successful generation and delivery.
    pub reply_delay: Duration,
    pub clock: Arc<dyn Clock>,
}

impl Default for GardenOptions {
    fn default() -> Self {
        Self {
            thresholds: GrowthThresholds::default(),
            reply_delay: Duration::ZERO,
            clock: Arc::new(SystemClock),
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct GardenState {
    profile: Option<UserProfile>,
    letters: Vec<Letter>,
    replies: Vec<Reply>,
    plants: Vec<Plant>,
    pending_reply: bool,
    processing: bool,
}

impl GardenState {
    fn is_planted(&self, reply_id: &str) -> bool {
        self.plants.iter().any(|p| p.reply_id == reply_id)
    }

    fn unread(&self) -> impl Iterator<Item = &Reply> {
        self.replies.iter().filter(|r| !self.is_planted(&r.id))
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            profile: self.profile.clone(),
            letters: self.letters.clone(),
            replies: self.replies.clone(),
            plants: self.plants.clone(),
            pending_reply: self.pending_reply,
            processing: self.processing,
            has_unread_reply: self.unread().next().is_some(),
        }
    }
}

/// `item` followed by `rest`: collections are kept most-recent-first.
fn prepend<T: Clone>(item: T, rest: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(rest.len() + 1);
    out.push(item);
    out.extend_from_slice(rest);
    out
}

struct Inner {
    store: Arc<dyn Store>,
    generator: Arc<dyn ReplyGenerator>,
    clock: Arc<dyn Clock>,
    thresholds: GrowthThresholds,
    reply_delay: Duration,
    state: Mutex<GardenState>,
    snapshots: watch::Sender<Snapshot>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, GardenState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Publish while still holding the lock so observers see changes in order.
    fn publish(&self, state: &GardenState) {
        self.snapshots.send_replace(state.snapshot());
    }

    /// Clear the in-flight flags without recording a reply.
    fn end_cycle(&self) {
        let mut state = self.lock();
        state.pending_reply = false;
        state.processing = false;
        self.publish(&state);
    }

    async fn deliver_reply(self: Arc<Self>, letter_id: String, request: ReplyRequest) {
        let outcome = self.generator.generate(&request).await;

        let payload = match outcome {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(letter = %letter_id, error = %e, "no reply for letter");
                self.end_cycle();
                return;
            }
        };

        if !self.reply_delay.is_zero() {
            tokio::time::sleep(self.reply_delay).await;
        }

        let mut state = self.lock();
        let reply = Reply::from_payload(&letter_id, payload, self.clock.now());
        let replies = prepend(reply.clone(), &state.replies);
        match store::save(self.store.as_ref(), Slot::Replies, &replies) {
            Ok(()) => {
                tracing::info!(
                    letter = %letter_id,
                    reply = %reply.id,
                    seed = %reply.gift_seed,
                    fallback = reply.fallback,
                    "reply delivered"
                );
                state.replies = replies;
            }
            Err(e) => {
                tracing::error!(letter = %letter_id, error = %e, "failed to save reply");
            }
        }
        state.pending_reply = false;
        state.processing = false;
        self.publish(&state);
    }
}

// ---------------------------------------------------------------------------
// Garden
// ---------------------------------------------------------------------------

/// Cloneable handle to the garden state container.
#[derive(Clone)]
pub struct Garden {
    inner: Arc<Inner>,
}

impl Garden {
    /// Load every slot from `store` and build the state container.
    pub fn open(
        store: Arc<dyn Store>,
        generator: Arc<dyn ReplyGenerator>,
        options: GardenOptions,
    ) -> Result<Self> {
        let state = GardenState {
            profile: store::load(store.as_ref(), Slot::User)?,
            letters: store::load_list(store.as_ref(), Slot::Letters)?,
            replies: store::load_list(store.as_ref(), Slot::Replies)?,
            plants: store::load_list(store.as_ref(), Slot::Garden)?,
            pending_reply: false,
            processing: false,
        };
        tracing::debug!(
            letters = state.letters.len(),
            replies = state.replies.len(),
            plants = state.plants.len(),
            "garden loaded"
        );
        let (snapshots, _) = watch::channel(state.snapshot());
        Ok(Self {
            inner: Arc::new(Inner {
                store,
                generator,
                clock: options.clock,
                thresholds: options.thresholds,
                reply_delay: options.reply_delay,
                state: Mutex::new(state),
                snapshots,
            }),
        })
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock().snapshot()
    }

    /// Receiver notified with a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.snapshots.subscribe()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.inner.lock().profile.clone()
    }

    pub fn letters(&self) -> Vec<Letter> {
        self.inner.lock().letters.clone()
    }

    pub fn replies(&self) -> Vec<Reply> {
        self.inner.lock().replies.clone()
    }

    pub fn plants(&self) -> Vec<Plant> {
        self.inner.lock().plants.clone()
    }

    pub fn pending_reply(&self) -> bool {
        self.inner.lock().pending_reply
    }

    pub fn is_processing(&self) -> bool {
        self.inner.lock().processing
    }

    /// True while some reply has not been planted yet.
    pub fn has_unread_reply(&self) -> bool {
        self.inner.lock().unread().next().is_some()
    }

    pub fn thresholds(&self) -> &GrowthThresholds {
        &self.inner.thresholds
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.inner.clock.now()
    }

    // -----------------------------------------------------------------------
    // Intents
    // -----------------------------------------------------------------------

    /// Create or replace the user profile.
    pub fn onboard(&self, name: &str) -> Result<UserProfile> {
        let profile = UserProfile::new(name)?;
        let mut state = self.inner.lock();
        store::save(self.inner.store.as_ref(), Slot::User, &profile)?;
        state.profile = Some(profile.clone());
        self.inner.publish(&state);
        tracing::info!(name = %profile.name, "profile saved");
        Ok(profile)
    }

    /// Record a letter and start generating its reply in the background.
    ///
    /// Returns as soon as the letter is durably saved. An invalid draft
    /// (blank content, intensity outside 1..=5) is ignored and yields
    /// `Ok(None)`. Only one reply may be in flight: a second submission while
    /// one is processing fails with [`GardenError::ReplyInFlight`] and records
    /// nothing. Must be called from inside a Tokio runtime.
    pub fn submit_letter(&self, draft: LetterDraft) -> Result<Option<Letter>> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| GardenError::NoRuntime)?;

        let mut state = self.inner.lock();
        let user_name = match &state.profile {
            Some(p) => p.name.clone(),
            None => return Err(GardenError::NotOnboarded),
        };
        if state.processing {
            return Err(GardenError::ReplyInFlight);
        }
        if !draft.is_valid() {
            tracing::warn!(
                intensity = draft.intensity,
                "ignoring letter with blank content or out-of-range intensity"
            );
            return Ok(None);
        }

        let letter = Letter::new(
            draft.content,
            draft.emotion,
            draft.intensity,
            draft.contexts,
            draft.statuses,
            self.inner.clock.now(),
        );
        let letters = prepend(letter.clone(), &state.letters);
        store::save(self.inner.store.as_ref(), Slot::Letters, &letters)?;
        state.letters = letters;
        state.pending_reply = true;
        state.processing = true;
        self.inner.publish(&state);
        drop(state);

        tracing::info!(letter = %letter.id, emotion = %letter.emotion, "letter sent");
        let request = ReplyRequest::for_letter(&user_name, &letter);
        let inner = self.inner.clone();
        let letter_id = letter.id.clone();
        let delivery = runtime.spawn(inner.clone().deliver_reply(letter_id.clone(), request));
        // A panicking generator must not leave the garden stuck in flight.
        runtime.spawn(async move {
            if let Err(e) = delivery.await {
                if e.is_panic() {
                    tracing::error!(letter = %letter_id, "reply generation panicked");
                    inner.end_cycle();
                }
            }
        });
        Ok(Some(letter))
    }

    /// The most recent reply that has not been planted yet.
    pub fn acknowledge_reply(&self) -> Option<Reply> {
        self.inner.lock().unread().next().cloned()
    }

    /// Plant the gift seed of `reply_id`. Each reply can be planted once.
    pub fn plant_seed(&self, reply_id: &str) -> Result<Plant> {
        let mut state = self.inner.lock();
        let reply = state
            .replies
            .iter()
            .find(|r| r.id == reply_id)
            .ok_or_else(|| GardenError::ReplyNotFound(reply_id.to_string()))?;
        if state.is_planted(reply_id) {
            return Err(GardenError::AlreadyPlanted(reply_id.to_string()));
        }

        let plant = Plant::from_reply(reply, self.inner.clock.now());
        let plants = prepend(plant.clone(), &state.plants);
        store::save(self.inner.store.as_ref(), Slot::Garden, &plants)?;
        state.plants = plants;
        self.inner.publish(&state);

        tracing::info!(plant = %plant.id, kind = %plant.kind, reply = %reply_id, "seed planted");
        Ok(plant)
    }

    /// Re-evaluate every plant's stage at the current clock time.
    ///
    /// Persists and notifies only when at least one stage moved.
    pub fn tick_growth(&self) -> Result<Vec<StageChange>> {
        let now = self.inner.clock.now();
        let mut state = self.inner.lock();
        let (updated, changed) = advance_all(&state.plants, now, &self.inner.thresholds);
        if !changed {
            return Ok(Vec::new());
        }

        store::save(self.inner.store.as_ref(), Slot::Garden, &updated)?;
        let changes: Vec<StageChange> = state
            .plants
            .iter()
            .zip(&updated)
            .filter(|(old, new)| old.stage != new.stage)
            .map(|(old, new)| StageChange {
                plant_id: new.id.clone(),
                kind: new.kind,
                from: old.stage,
                to: new.stage,
            })
            .collect();
        state.plants = updated;
        self.inner.publish(&state);

        tracing::debug!(changed = changes.len(), "garden grew");
        Ok(changes)
    }

    /// Wait until no reply is being generated.
    pub async fn wait_idle(&self) {
        let mut rx = self.subscribe();
        if !rx.borrow().processing {
            return;
        }
        // Every delivery ends by clearing `processing`, panics included, and
        // the sender lives as long as `self`.
        let _ = rx.wait_for(|s| !s.processing).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
