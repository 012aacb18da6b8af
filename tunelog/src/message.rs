use tunelog_core::Gesture;

/// Messages for the TuneLog application.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Pointer or keyboard gesture on the plot surface.
    Gesture(Gesture),

    /// Return to the unzoomed view.
    ResetZoom,

    /// User toggled a field (by field name) in the field panel.
    ToggleField(String),

    /// Generate a fresh demo log.
    Regenerate,
}
