//! Single-slot session store for the latest completed assessment.
//!
//! Key properties:
//! - Holds at most one `RiskAssessment`; each store replaces the previous one
//! - The slot swaps whole `Arc`s, so readers see the old or the new
//!   assessment, never a mix
//! - Lives in memory only and is dropped with the session

use std::sync::{Arc, RwLock};

use crate::models::RiskAssessment;

/// Latest-result slot shared by every view of one session.
pub struct SessionState {
    latest: RwLock<Option<Arc<RiskAssessment>>>,
}

impl SessionState {
    /// Create an empty session.
    pub fn new() -> Self {
        Self {
            latest: RwLock::new(None),
        }
    }

    /// Replace the stored assessment (last write wins).
    pub fn store(&self, assessment: RiskAssessment) -> Result<Arc<RiskAssessment>, SessionStateError> {
        let assessment = Arc::new(assessment);
        let mut slot = self
            .latest
            .write()
            .map_err(|_| SessionStateError::LockPoisoned)?;
        *slot = Some(Arc::clone(&assessment));
        Ok(assessment)
    }

    /// The latest assessment, if any.
    pub fn get(&self) -> Result<Option<Arc<RiskAssessment>>, SessionStateError> {
        let slot = self
            .latest
            .read()
            .map_err(|_| SessionStateError::LockPoisoned)?;
        Ok(slot.clone())
    }

    /// Whether an assessment has been stored this session.
    pub fn has_assessment(&self) -> Result<bool, SessionStateError> {
        let slot = self
            .latest
            .read()
            .map_err(|_| SessionStateError::LockPoisoned)?;
        Ok(slot.is_some())
    }

    /// Empty the slot (session reset).
    pub fn clear(&self) -> Result<(), SessionStateError> {
        let mut slot = self
            .latest
            .write()
            .map_err(|_| SessionStateError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStateError {
    #[error("Internal lock error")]
    LockPoisoned,
}
