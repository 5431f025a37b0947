// src/page_state.rs
//! The detail-page lifecycle as an explicit state machine.
//!
//! A page navigation moves through `NotRequested -> Loading` and then to
//! exactly one of `Ready`, `Fallback` or `Error`. `Fallback` is the
//! transient "this page is being produced right now" state and resolves
//! to `Ready` or `Error`; `Ready` and `Error` are terminal for the
//! navigation (a retry is a new navigation with a fresh machine).
//!
//! The machine is decoupled from any rendering framework: a renderer
//! either polls [`PageLifecycle::state`] or registers a
//! [`StateObserver`] and is pushed every transition.
//!
//! # Laws
//!
//! All sequences of transition calls satisfy:
//!
//! - **L1 (Forward motion)**: states are only ever reached in the order
//!   `NotRequested`, `Loading`, (`Fallback`,) `Ready`/`Error` — no
//!   transition moves backwards.
//! - **L2 (Fallback transience)**: `Fallback` can only be left for
//!   `Ready` or `Error`.
//! - **L3 (Terminality)**: once `Ready` or `Error`, every further
//!   transition attempt fails and the state is unchanged.

use std::fmt;
use thiserror::Error;

/// Where a page navigation currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    /// Nothing has asked for this page yet.
    NotRequested,
    /// The fetch is in flight.
    Loading,
    /// The page is being produced on first request; content will follow.
    Fallback,
    /// The page resolved with its content.
    Ready(T),
    /// The navigation failed. Terminal; retried only via a new navigation.
    Error(String),
}

impl<T> PageState<T> {
    /// The state's name, for logs and transition errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotRequested => "not_requested",
            Self::Loading => "loading",
            Self::Fallback => "fallback",
            Self::Ready(_) => "ready",
            Self::Error(_) => "error",
        }
    }

    /// Whether this state ends the navigation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::Error(_))
    }
}

impl<T> fmt::Display for PageState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A transition the machine refuses to make.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("illegal page state transition: {from} -> {to}")]
pub struct StateError {
    pub from: &'static str,
    pub to: &'static str,
}

/// Receives every state transition as it happens.
pub trait StateObserver<T>: Send + Sync {
    fn on_transition(&self, state: &PageState<T>);
}

/// Drives one page navigation through its states.
pub struct PageLifecycle<T> {
    state: PageState<T>,
    observers: Vec<Box<dyn StateObserver<T>>>,
}

impl<T> Default for PageLifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PageLifecycle<T> {
    pub fn new() -> Self {
        Self {
            state: PageState::NotRequested,
            observers: Vec::new(),
        }
    }

    /// The current state, for polling renderers.
    pub fn state(&self) -> &PageState<T> {
        &self.state
    }

    /// Registers an observer pushed on every subsequent transition.
    pub fn observe(&mut self, observer: Box<dyn StateObserver<T>>) {
        self.observers.push(observer);
    }

    /// `NotRequested -> Loading`: the navigation has started.
    pub fn begin_loading(&mut self) -> Result<(), StateError> {
        match self.state {
            PageState::NotRequested => self.set(PageState::Loading),
            _ => Err(self.refuse("loading")),
        }
    }

    /// `Loading -> Fallback`: the page is being produced; keep waiting.
    pub fn enter_fallback(&mut self) -> Result<(), StateError> {
        match self.state {
            PageState::Loading => self.set(PageState::Fallback),
            _ => Err(self.refuse("fallback")),
        }
    }

    /// `Loading | Fallback -> Ready`: content arrived.
    pub fn resolve_ready(&mut self, content: T) -> Result<(), StateError> {
        match self.state {
            PageState::Loading | PageState::Fallback => self.set(PageState::Ready(content)),
            _ => Err(self.refuse("ready")),
        }
    }

    /// `Loading | Fallback -> Error`: the navigation failed, terminally.
    pub fn fail(&mut self, message: String) -> Result<(), StateError> {
        match self.state {
            PageState::Loading | PageState::Fallback => self.set(PageState::Error(message)),
            _ => Err(self.refuse("error")),
        }
    }

    fn set(&mut self, next: PageState<T>) -> Result<(), StateError> {
        log::debug!("Page state: {} -> {}", self.state, next);
        self.state = next;
        for observer in &self.observers {
            observer.on_transition(&self.state);
        }
        Ok(())
    }

    fn refuse(&self, to: &'static str) -> StateError {
        StateError {
            from: self.state.name(),
            to,
        }
    }
}
