/// Format a playback position as `m:ss`.
///
/// Seconds are zero-padded to two digits; minutes are unbounded (no hour
/// rollover), so ten minutes renders as `10:00`. Non-finite or negative input
/// renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Playback progress as a percentage of `duration`.
///
/// Returns NaN when `duration` is zero and `current` is zero; callers render
/// non-finite progress as an empty bar (see [`bar_width_percent`]).
pub fn progress_percent(current: f64, duration: f64) -> f64 {
    current / duration * 100.0
}

/// Map a horizontal click inside the scrub bar to a fraction in `[0, 1]`.
///
/// Returns `None` for a zero-width (or non-finite) bar.
pub fn seek_fraction(offset_x: f64, bar_width: f64) -> Option<f64> {
    if !(bar_width.is_finite() && bar_width > 0.0 && offset_x.is_finite()) {
        return None;
    }
    Some((offset_x / bar_width).clamp(0.0, 1.0))
}

/// Clamp a progress percentage to something safe to put in a CSS width.
pub fn bar_width_percent(progress: f64) -> f64 {
    if progress.is_finite() {
        progress.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
