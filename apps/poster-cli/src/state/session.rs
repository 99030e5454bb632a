//! # Session State
//!
//! The single current settings + image pair that watch mode edits.
//!
//! ## Generations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Updates                                      │
//! │                                                                         │
//! │  stdin edit          SessionState                 generation            │
//! │  ──────────          ────────────                 ──────────            │
//! │                                                                         │
//! │  cols=4 ──────────► try_update_settings() ──────► 1                     │
//! │  margin=8 ────────► try_update_settings() ──────► 2                     │
//! │  (new image) ─────► set_image() ────────────────► 3                     │
//! │  cols=1 + rows=1 ─► rejected, unchanged ────────► 3                     │
//! │                                                                         │
//! │  A layout computed at generation 2 is stale once the session is at 3.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use image::RgbaImage;
use poster_core::validation::{is_grid_allowed, validate_settings};
use poster_core::{ImageDescriptor, LayoutSettings, PageGeometry, ValidationError};

use crate::error::{CliError, CliResult};

/// Current settings and decoded image.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub settings: LayoutSettings,
    pub image: Option<Arc<RgbaImage>>,

    /// Bumped on every accepted change.
    pub generation: u64,
}

impl Session {
    pub fn image_descriptor(&self) -> Option<ImageDescriptor> {
        self.image
            .as_ref()
            .map(|img| ImageDescriptor::new(img.width(), img.height()))
    }
}

fn ensure_poster_grid(settings: &LayoutSettings) -> CliResult<()> {
    if is_grid_allowed(settings.grid_cols, settings.grid_rows) {
        return Ok(());
    }
    Err(CliError::from(ValidationError::InvalidFormat {
        field: "grid".to_string(),
        reason: format!(
            "{}x{} is a single page, not a poster",
            settings.grid_cols, settings.grid_rows
        ),
    }))
}

/// Thread-safe wrapper for the session.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
    page: PageGeometry,
}

impl SessionState {
    pub fn new(settings: LayoutSettings, page: PageGeometry) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(Session {
                settings,
                ..Session::default()
            })),
            page,
        }
    }

    /// Creates a session whose starting settings already obey the edit
    /// rules, so later edits are never rejected for a state they inherited.
    pub fn try_new(settings: LayoutSettings, page: PageGeometry) -> CliResult<Self> {
        validate_settings(&settings, &page)?;
        ensure_poster_grid(&settings)?;
        Ok(Self::new(settings, page))
    }

    pub fn page(&self) -> &PageGeometry {
        &self.page
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }

    /// Applies `edit` to a copy of the settings and keeps it if it validates.
    ///
    /// Returns the new generation.
    pub fn try_update_settings<F>(&self, edit: F) -> CliResult<u64>
    where
        F: FnOnce(&mut LayoutSettings),
    {
        self.with_session_mut(|session| {
            let mut candidate = session.settings.clone();
            edit(&mut candidate);

            validate_settings(&candidate, &self.page)?;
            ensure_poster_grid(&candidate)?;

            session.settings = candidate;
            session.generation += 1;
            tracing::debug!(generation = session.generation, "Settings updated");
            Ok(session.generation)
        })
    }

    /// Replaces the image. Returns the new generation.
    pub fn set_image(&self, image: Arc<RgbaImage>) -> u64 {
        self.with_session_mut(|session| {
            session.image = Some(image);
            session.generation += 1;
            session.generation
        })
    }

    /// Clone of the current session.
    pub fn snapshot(&self) -> Session {
        self.with_session(Session::clone)
    }

    pub fn generation(&self) -> u64 {
        self.with_session(|session| session.generation)
    }

    /// Whether a result computed at `generation` is still the latest.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
