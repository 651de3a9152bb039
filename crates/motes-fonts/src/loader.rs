//! Asynchronous font loading with a fallback deadline.
//!
//! Each configured face is read on its own thread and reported back over a
//! channel. [`FontLoader::poll`] drains the channel and runs a single
//! coordinating check: any failure or an expired deadline substitutes the
//! built-in faces for every role; otherwise, once all faces arrive, the
//! loaded set is used. The result never changes after it settles.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{FontError, Result};
use crate::face::{Face, OutlineFace};
use crate::{FontRole, FontSet};

/// File paths for each role; `None` means not configured.
#[derive(Debug, Clone, Default)]
pub struct FontSources {
    pub display_bold: Option<PathBuf>,
    pub display_medium: Option<PathBuf>,
    pub body: Option<PathBuf>,
}

impl FontSources {
    fn path(&self, role: FontRole) -> Option<PathBuf> {
        match role {
            FontRole::DisplayBold => self.display_bold.clone(),
            FontRole::DisplayMedium => self.display_medium.clone(),
            FontRole::Body => self.body.clone(),
        }
    }
}

/// Progress of a single face.
#[derive(Debug)]
pub enum AssetState {
    Pending,
    Loaded(Face),
    Failed(FontError),
}

impl AssetState {
    pub fn is_pending(&self) -> bool {
        matches!(self, AssetState::Pending)
    }
}

/// Overall outcome of loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Still waiting on at least one face.
    Pending,
    /// Every face loaded.
    Ready,
    /// The built-in faces were substituted.
    FallbackApplied,
}

type Report = (FontRole, Result<Face>);

/// Loads the clock's faces without blocking the caller.
#[derive(Debug)]
pub struct FontLoader {
    receiver: Receiver<Report>,
    assets: [AssetState; 3],
    started: Instant,
    timeout: Duration,
    status: LoadStatus,
    fonts: Option<FontSet>,
}

impl FontLoader {
    /// Start one loading thread per role.
    pub fn spawn(sources: FontSources, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        for role in FontRole::ALL {
            let tx = tx.clone();
            let path = sources.path(role);
            thread::spawn(move || {
                let result = match path {
                    Some(path) => OutlineFace::load(&path).map(Face::Outline),
                    None => Err(FontError::NotConfigured(role)),
                };
                // The loader may already have settled and been dropped
                let _ = tx.send((role, result));
            });
        }

        Self::with_receiver(rx, timeout, Instant::now())
    }

    /// Build a loader fed by an existing channel.
    pub fn with_receiver(receiver: Receiver<Report>, timeout: Duration, started: Instant) -> Self {
        Self {
            receiver,
            assets: [AssetState::Pending, AssetState::Pending, AssetState::Pending],
            started,
            timeout,
            status: LoadStatus::Pending,
            fonts: None,
        }
    }

    /// Collect finished loads and settle the outcome if possible.
    pub fn poll(&mut self, now: Instant) -> LoadStatus {
        if self.status != LoadStatus::Pending {
            return self.status;
        }

        loop {
            match self.receiver.try_recv() {
                Ok((role, result)) => self.record(role, result),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    for role in FontRole::ALL {
                        if self.assets[role.index()].is_pending() {
                            self.record(role, Err(FontError::Abandoned(role)));
                        }
                    }
                    break;
                }
            }
        }

        self.settle(now);
        self.status
    }

    fn record(&mut self, role: FontRole, result: Result<Face>) {
        let slot = &mut self.assets[role.index()];
        if !slot.is_pending() {
            return;
        }
        *slot = match result {
            Ok(face) => {
                log::debug!("loaded {role} face '{}'", face.name());
                AssetState::Loaded(face)
            }
            Err(e) => AssetState::Failed(e),
        };
    }

    fn settle(&mut self, now: Instant) {
        let failure = self.assets.iter().find_map(|state| match state {
            AssetState::Failed(e) => Some(e.to_string()),
            _ => None,
        });

        if let Some(reason) = failure {
            log::warn!("font engine: {reason}; using built-in faces");
            self.apply_fallback();
            return;
        }

        let loaded: Vec<Face> = self
            .assets
            .iter()
            .filter_map(|state| match state {
                AssetState::Loaded(face) => Some(face.clone()),
                _ => None,
            })
            .collect();

        if let Ok(faces) = <[Face; 3]>::try_from(loaded) {
            log::info!("font engine: all faces loaded");
            self.fonts = Some(FontSet::new(faces));
            self.status = LoadStatus::Ready;
        } else if now.saturating_duration_since(self.started) >= self.timeout {
            log::warn!(
                "font engine: faces not ready after {:?}; using built-in faces",
                self.timeout
            );
            self.apply_fallback();
        }
    }

    fn apply_fallback(&mut self) {
        self.fonts = Some(FontSet::fallback());
        self.status = LoadStatus::FallbackApplied;
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// The settled face set, once loading has finished either way.
    pub fn fonts(&self) -> Option<&FontSet> {
        self.fonts.as_ref()
    }

    pub fn asset(&self, role: FontRole) -> &AssetState {
        &self.assets[role.index()]
    }
}
