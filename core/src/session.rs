//! Profile book — a caller-owned, append-only list of named profiles.
//!
//! The book lives exactly as long as its owner (typically one runner
//! session). Nothing in the engine reads it implicitly.

use crate::{
    error::{AbsenceError, AbsenceResult},
    profile::AbsenceProfile,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileBook {
    profiles: Vec<AbsenceProfile>,
}

impl ProfileBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a profile. Returns its index. Duplicate names are allowed.
    pub fn add(&mut self, profile: AbsenceProfile) -> usize {
        log::debug!("profile book: added '{}'", profile.name);
        self.profiles.push(profile);
        self.profiles.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&AbsenceProfile> {
        self.profiles.get(index)
    }

    /// Like `get`, but an out-of-range index is an error.
    pub fn select(&self, index: usize) -> AbsenceResult<&AbsenceProfile> {
        self.profiles.get(index).ok_or(AbsenceError::ProfileNotFound {
            index,
            len: self.profiles.len(),
        })
    }

    /// First profile with this name.
    pub fn find(&self, name: &str) -> Option<&AbsenceProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbsenceProfile> {
        self.profiles.iter()
    }

    pub fn as_slice(&self) -> &[AbsenceProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
