//! The in-memory catalogue store.
//!
//! Process-lifetime, no persistence. Both gateways share one [`Catalog`];
//! a single `RwLock` guards the sequence so concurrent handlers cannot race
//! on mutation. Every lookup is a linear scan with first-match-wins, which is
//! acceptable for a catalogue this small.

use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::section::{standard_sections, Beam};

/// The shared catalogue of beam sections.
///
/// Thread-safe via `RwLock`. Insertion order is preserved and is the order
/// returned by [`Catalog::list`].
#[derive(Debug, Default)]
pub struct Catalog {
    beams: RwLock<Vec<Beam>>,
}

impl Catalog {
    /// Creates an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalogue pre-populated with the standard seed sections.
    #[must_use]
    pub fn with_standard_sections() -> Self {
        Self {
            beams: RwLock::new(standard_sections()),
        }
    }

    /// Returns all beams in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `Error::Internal` if the store lock is poisoned.
    pub fn list(&self) -> Result<Vec<Beam>> {
        Ok(self.read()?.clone())
    }

    /// Returns the first beam with the given designation, if any.
    ///
    /// Designation comparison is exact-string and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns `Error::Internal` if the store lock is poisoned.
    pub fn get(&self, designation: &str) -> Result<Option<Beam>> {
        Ok(self
            .read()?
            .iter()
            .find(|beam| beam.section_designation == designation)
            .cloned())
    }

    /// Appends a beam unconditionally. Duplicate designations are not checked.
    ///
    /// # Errors
    ///
    /// Returns `Error::Internal` if the store lock is poisoned.
    pub fn insert(&self, beam: Beam) -> Result<()> {
        self.write()?.push(beam);
        Ok(())
    }

    /// Overwrites the entire record of the first beam matching `designation`.
    ///
    /// Returns the replacement on success, or `None` (store untouched) when
    /// no beam matches.
    ///
    /// # Errors
    ///
    /// Returns `Error::Internal` if the store lock is poisoned.
    pub fn replace(&self, designation: &str, beam: Beam) -> Result<Option<Beam>> {
        let mut beams = self.write()?;
        match beams
            .iter_mut()
            .find(|existing| existing.section_designation == designation)
        {
            Some(existing) => {
                *existing = beam.clone();
                Ok(Some(beam))
            }
            None => Ok(None),
        }
    }

    /// Removes the first beam matching `designation`, preserving the order of
    /// the remaining entries. Returns `true` if a beam was removed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Internal` if the store lock is poisoned.
    pub fn remove(&self, designation: &str) -> Result<bool> {
        let mut beams = self.write()?;
        match beams
            .iter()
            .position(|beam| beam.section_designation == designation)
        {
            Some(index) => {
                beams.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns the number of beams in the catalogue.
    ///
    /// # Errors
    ///
    /// Returns `Error::Internal` if the store lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Returns `true` when the catalogue is empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::Internal` if the store lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Beam>>> {
        self.beams.read().map_err(|_| Error::Internal {
            message: "catalogue lock poisoned".into(),
        })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Beam>>> {
        self.beams.write().map_err(|_| Error::Internal {
            message: "catalogue lock poisoned".into(),
        })
    }
}
