use crate::player::time::{format_time, progress_percent, seek_fraction};

/// Host media element the controller drives.
///
/// In a browser this is an `HTMLVideoElement`; tests use an in-memory fake.
/// Play requests are fire-and-forget: a refusal comes back later as
/// [`MediaEvent::PlayRejected`].
pub trait MediaElement {
    fn current_time(&self) -> f64;
    /// Move the playback cursor. This is an immediate jump.
    fn set_current_time(&mut self, seconds: f64);
    fn play(&mut self);
    fn pause(&mut self);

    /// Whether the document currently has a fullscreen element.
    /// Hosts without fullscreen support keep the defaults, making the toggle a no-op.
    fn fullscreen_active(&self) -> bool {
        false
    }
    fn request_fullscreen(&mut self) {}
    fn exit_fullscreen(&mut self) {}
}

/// Native media events, applied in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Metadata decoded; duration is known.
    LoadedMetadata { duration: f64 },
    TimeUpdate { current_time: f64 },
    /// The element failed to load or decode. `detail` is the element's own message.
    Error { detail: Option<String> },
    /// The asynchronous outcome of a play request was a refusal (e.g. autoplay policy).
    PlayRejected { reason: String },
}

/// User-visible playback failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    #[error("Failed to load video: {detail}")]
    Resource { detail: String },
    #[error("Failed to play video. Please try again.")]
    Refused { reason: String },
}

impl PlaybackError {
    pub fn resource(detail: Option<String>) -> Self {
        PlaybackError::Resource {
            detail: detail
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "Unknown error".to_string()),
        }
    }
}

/// Only recovery path offered to the viewer once an error is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    ReloadPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPhase {
    Loading,
    Playing,
    Paused,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub loading: bool,
    pub error: Option<PlaybackError>,
    pub is_playing: bool,
    pub progress_percent: f64,
    pub duration_seconds: f64,
    pub current_seconds: f64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            is_playing: false,
            progress_percent: 0.0,
            duration_seconds: 0.0,
            current_seconds: 0.0,
        }
    }
}

impl PlayerState {
    pub fn phase(&self) -> PlayerPhase {
        if self.error.is_some() {
            PlayerPhase::Error
        } else if self.loading {
            PlayerPhase::Loading
        } else if self.is_playing {
            PlayerPhase::Playing
        } else {
            PlayerPhase::Paused
        }
    }

    /// `"elapsed / duration"`, e.g. `"1:05 / 10:00"`.
    pub fn elapsed_label(&self) -> String {
        format!(
            "{} / {}",
            format_time(self.current_seconds),
            format_time(self.duration_seconds)
        )
    }
}

/// Playback controller for the detail-page player.
pub struct PlaybackController<E: MediaElement> {
    element: E,
    state: PlayerState,
}

impl<E: MediaElement> PlaybackController<E> {
    pub fn new(element: E) -> Self {
        Self {
            element,
            state: PlayerState::default(),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn handle(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadedMetadata { duration } => {
                self.state.duration_seconds = duration;
                self.state.loading = false;
            }
            MediaEvent::TimeUpdate { current_time } => {
                self.state.current_seconds = current_time;
                self.state.progress_percent =
                    progress_percent(current_time, self.state.duration_seconds);
            }
            MediaEvent::Error { detail } => {
                tracing::error!("Video error: {}", detail.as_deref().unwrap_or("unknown"));
                self.state.error = Some(PlaybackError::resource(detail));
                self.state.loading = false;
            }
            MediaEvent::PlayRejected { reason } => {
                tracing::error!("Error attempting to play: {}", reason);
                self.state.error = Some(PlaybackError::Refused { reason });
            }
        }
    }

    /// Toggle between playing and paused.
    ///
    /// The playing flag flips immediately; a later `PlayRejected` event moves
    /// the controller to the error state. Ignored once an error is shown.
    pub fn toggle_play(&mut self) {
        if self.state.error.is_some() {
            return;
        }
        if self.state.is_playing {
            self.element.pause();
        } else {
            self.element.play();
        }
        self.state.is_playing = !self.state.is_playing;
    }

    /// Seek to the position under a click at `offset_x` within a scrub bar
    /// `bar_width` wide. Returns the new playback time, or `None` if the bar
    /// has no width.
    pub fn seek(&mut self, offset_x: f64, bar_width: f64) -> Option<f64> {
        let fraction = seek_fraction(offset_x, bar_width)?;
        let time = fraction * self.state.duration_seconds;
        self.element.set_current_time(time);
        self.state.current_seconds = time;
        self.state.progress_percent = fraction * 100.0;
        Some(time)
    }

    pub fn toggle_fullscreen(&mut self) {
        if self.element.fullscreen_active() {
            self.element.exit_fullscreen();
        } else {
            self.element.request_fullscreen();
        }
    }

    /// Recovery offered alongside the current error, if any.
    pub fn recovery(&self) -> Option<RecoveryAction> {
        self.state.error.as_ref().map(|_| RecoveryAction::ReloadPage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeVideo {
        current: f64,
        playing: bool,
        fullscreen: bool,
        play_calls: usize,
    }

    impl MediaElement for FakeVideo {
        fn current_time(&self) -> f64 {
            self.current
        }
        fn set_current_time(&mut self, seconds: f64) {
            self.current = seconds;
        }
        fn play(&mut self) {
            self.play_calls += 1;
            self.playing = true;
        }
        fn pause(&mut self) {
            self.playing = false;
        }
        fn fullscreen_active(&self) -> bool {
            self.fullscreen
        }
        fn request_fullscreen(&mut self) {
            self.fullscreen = true;
        }
        fn exit_fullscreen(&mut self) {
            self.fullscreen = false;
        }
    }

    struct NoFullscreen;

    impl MediaElement for NoFullscreen {
        fn current_time(&self) -> f64 {
            0.0
        }
        fn set_current_time(&mut self, _seconds: f64) {}
        fn play(&mut self) {}
        fn pause(&mut self) {}
    }

    fn ready(duration: f64) -> PlaybackController<FakeVideo> {
        let mut player = PlaybackController::new(FakeVideo::default());
        player.handle(MediaEvent::LoadedMetadata { duration });
        player
    }

    #[test]
    fn starts_loading_and_becomes_ready_on_metadata() {
        let mut player = PlaybackController::new(FakeVideo::default());
        assert_eq!(player.state().phase(), PlayerPhase::Loading);
        assert_eq!(player.state().elapsed_label(), "0:00 / 0:00");

        player.handle(MediaEvent::LoadedMetadata { duration: 120.0 });
        assert_eq!(player.state().phase(), PlayerPhase::Paused);
        assert_eq!(player.state().duration_seconds, 120.0);
    }

    #[test]
    fn toggle_switches_between_playing_and_paused() {
        let mut player = ready(60.0);
        player.toggle_play();
        assert_eq!(player.state().phase(), PlayerPhase::Playing);
        assert!(player.element().playing);
        player.toggle_play();
        assert_eq!(player.state().phase(), PlayerPhase::Paused);
        assert!(!player.element().playing);
    }

    #[test]
    fn refused_play_surfaces_error() {
        let mut player = ready(60.0);
        player.toggle_play();
        player.handle(MediaEvent::PlayRejected { reason: "NotAllowedError".into() });
        assert_eq!(player.state().phase(), PlayerPhase::Error);
        assert_eq!(
            player.state().error.as_ref().unwrap().to_string(),
            "Failed to play video. Please try again."
        );
        assert_eq!(player.recovery(), Some(RecoveryAction::ReloadPage));

        // No further play requests once the error is showing.
        player.toggle_play();
        assert_eq!(player.element().play_calls, 1);
    }

    #[test]
    fn media_error_from_any_state_clears_loading() {
        let mut player = PlaybackController::new(FakeVideo::default());
        player.handle(MediaEvent::Error { detail: None });
        let state = player.state();
        assert!(!state.loading);
        assert_eq!(
            state.error.as_ref().unwrap().to_string(),
            "Failed to load video: Unknown error"
        );

        let mut player = ready(10.0);
        player.handle(MediaEvent::Error { detail: Some("MEDIA_ERR_SRC_NOT_SUPPORTED".into()) });
        assert_eq!(
            player.state().error.as_ref().unwrap().to_string(),
            "Failed to load video: MEDIA_ERR_SRC_NOT_SUPPORTED"
        );
    }

    #[test]
    fn time_updates_recompute_progress_in_arrival_order() {
        let mut player = ready(120.0);
        player.handle(MediaEvent::TimeUpdate { current_time: 30.0 });
        assert_eq!(player.state().progress_percent, 25.0);
        player.handle(MediaEvent::TimeUpdate { current_time: 60.0 });
        assert_eq!(player.state().progress_percent, 50.0);
        assert_eq!(player.state().elapsed_label(), "1:00 / 2:00");
    }

    #[test]
    fn time_update_with_unknown_duration_does_not_panic() {
        let mut player = PlaybackController::new(FakeVideo::default());
        player.handle(MediaEvent::TimeUpdate { current_time: 0.0 });
        assert!(player.state().progress_percent.is_nan());
        assert_eq!(player.state().elapsed_label(), "0:00 / 0:00");
    }

    #[test]
    fn seek_at_half_width_jumps_to_half_duration() {
        let mut player = ready(90.0);
        assert_eq!(player.seek(150.0, 300.0), Some(45.0));
        assert_eq!(player.element().current_time(), 45.0);
        assert_eq!(player.state().progress_percent, 50.0);
        assert_eq!(player.seek(10.0, 0.0), None);
    }

    #[test]
    fn fullscreen_toggles_on_and_off() {
        let mut player = ready(10.0);
        player.toggle_fullscreen();
        assert!(player.element().fullscreen);
        player.toggle_fullscreen();
        assert!(!player.element().fullscreen);
    }

    #[test]
    fn fullscreen_without_capability_is_noop() {
        let mut player = PlaybackController::new(NoFullscreen);
        player.toggle_fullscreen();
        assert_eq!(player.state().phase(), PlayerPhase::Loading);
    }
}
