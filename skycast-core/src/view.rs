//! UI state machine and rendering contract.
//!
//! The state logic lives in [`ViewController`] as a pure reducer over
//! [`UiState`]; a [`DisplaySurface`] implementation is the thin adapter that
//! translates transitions into concrete display updates. The controller is
//! the only mutator of displayed content.

use crate::{
    error::LookupError,
    model::{ResolvedLocation, Units, WeatherReading},
    render::{self, ResultCard},
};

/// The single active display mode. Idle only exists before the first
/// submission; afterwards the system oscillates between Loading and
/// Result/Error.
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Idle,
    Loading,
    Result(ResolvedLocation, WeatherReading),
    Error(String),
}

/// Identifies one submission. Completions carrying a token older than the
/// latest submission are discarded, so the latest submission always wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitToken(u64);

/// The four independently controllable display regions: loading indicator,
/// result surface, error surface and the submit control's enabled flag.
pub trait DisplaySurface {
    fn set_loading_visible(&mut self, visible: bool);
    fn render_result(&mut self, card: &ResultCard);
    fn set_result_visible(&mut self, visible: bool);
    fn render_error(&mut self, message: &str);
    fn set_error_visible(&mut self, visible: bool);
    fn set_submit_enabled(&mut self, enabled: bool);
}

/// Owns the finite UI state and renders each transition into the surface.
///
/// Surfaces are mutually exclusive: entering any state hides the other two
/// before showing its own. The submit control is disabled exactly while
/// loading; that flag is the only guard against overlapping submissions.
#[derive(Debug)]
pub struct ViewController<S> {
    state: UiState,
    latest: u64,
    units: Units,
    surface: S,
}

impl<S: DisplaySurface> ViewController<S> {
    pub fn new(surface: S, units: Units) -> Self {
        let mut controller = Self { state: UiState::Idle, latest: 0, units, surface };
        controller.surface.set_loading_visible(false);
        controller.surface.set_result_visible(false);
        controller.surface.set_error_visible(false);
        controller.surface.set_submit_enabled(true);
        controller
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Enter Loading from any state: clear the previous result/error surface,
    /// show the loading indicator and disable the submit control. Returns the
    /// token the eventual completion must present.
    pub fn submit(&mut self) -> SubmitToken {
        self.latest += 1;
        self.state = UiState::Loading;

        self.surface.set_result_visible(false);
        self.surface.set_error_visible(false);
        self.surface.set_loading_visible(true);
        self.surface.set_submit_enabled(false);

        SubmitToken(self.latest)
    }

    /// Enter Result from Loading. A stale token (an older submission's
    /// completion arriving after a newer submit) is discarded without
    /// touching the display.
    pub fn on_success(
        &mut self,
        token: SubmitToken,
        location: ResolvedLocation,
        reading: WeatherReading,
    ) {
        if token.0 != self.latest {
            tracing::debug!(token = token.0, latest = self.latest, "discarding stale result");
            return;
        }

        let card = render::result_card(&location, &reading, self.units);

        self.surface.set_loading_visible(false);
        self.surface.set_error_visible(false);
        self.surface.render_result(&card);
        self.surface.set_result_visible(true);
        self.surface.set_submit_enabled(true);

        self.state = UiState::Result(location, reading);
    }

    /// Enter Error from Loading, rendering the error message verbatim. Stale
    /// tokens are discarded as in [`Self::on_success`].
    pub fn on_failure(&mut self, token: SubmitToken, error: &LookupError) {
        if token.0 != self.latest {
            tracing::debug!(token = token.0, latest = self.latest, "discarding stale failure");
            return;
        }

        let message = error.to_string();

        self.surface.set_loading_visible(false);
        self.surface.set_result_visible(false);
        self.surface.render_error(&message);
        self.surface.set_error_visible(true);
        self.surface.set_submit_enabled(true);

        self.state = UiState::Error(message);
    }
}
