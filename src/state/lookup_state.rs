use crate::error::Result;
use crate::playerdb::dto::player_profile::PlayerProfile;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// What the presentation layer should currently show.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupView {
    #[default]
    Idle,
    Loaded(PlayerProfile),
    Failed(String),
}

/// Identifies one lookup attempt. Only the newest ticket may update the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket(u64);

/// Last-write-wins holder for the displayed lookup result.
///
/// Lookups may overlap; a response that finishes after a newer lookup was
/// started is dropped instead of replacing the newer one's result.
#[derive(Debug, Default)]
pub struct LookupState {
    generation: AtomicU64,
    view: RwLock<LookupView>,
}

impl LookupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> LookupTicket {
        LookupTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: LookupTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Records the outcome of `ticket`'s lookup. Returns `false` when a newer
    /// lookup has started since, in which case the view is left untouched.
    /// An error clears any profile that was shown.
    pub async fn complete(&self, ticket: LookupTicket, outcome: &Result<PlayerProfile>) -> bool {
        let mut view = self.view.write().await;
        // Checked under the write lock so two completions cannot interleave.
        if !self.is_current(ticket) {
            debug!("Discarding stale lookup result (ticket {})", ticket.0);
            return false;
        }
        *view = match outcome {
            Ok(profile) => LookupView::Loaded(profile.clone()),
            Err(e) => LookupView::Failed(e.to_string()),
        };
        true
    }

    pub async fn view(&self) -> LookupView {
        self.view.read().await.clone()
    }
}
