//! Sidebar collapse and mobile drawer state.
//!
//! On wide screens the sidebar is either expanded or collapsed to icons, and
//! the content column is offset by the sidebar width. On narrow screens the
//! sidebar is a drawer that opens over a backdrop and closes on navigation.

/// Sidebar width in pixels when collapsed to icons.
pub const COLLAPSED_SIDEBAR_WIDTH_PX: u16 = 80;

/// Sidebar width in pixels when expanded, and the drawer width on mobile.
pub const EXPANDED_SIDEBAR_WIDTH_PX: u16 = 256;

/// Transient view flags owned by the layout shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellLayout {
    /// Sidebar collapsed to icons (wide screens only).
    pub collapsed: bool,
    /// Mobile drawer open.
    pub mobile_open: bool,
}

impl ShellLayout {
    /// Creates an expanded layout with the drawer closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips between expanded and collapsed. Returns the new `collapsed` value.
    pub fn toggle_collapse(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        tracing::trace!(collapsed = self.collapsed, "Sidebar collapse toggled");
        self.collapsed
    }

    /// Opens the mobile drawer.
    pub fn open_mobile(&mut self) {
        self.mobile_open = true;
    }

    /// Closes the mobile drawer.
    pub fn close_mobile(&mut self) {
        self.mobile_open = false;
    }

    /// Called when a navigation link is followed; closes the drawer.
    pub fn navigate(&mut self) {
        self.close_mobile();
    }

    /// Whether the dimmed backdrop behind the drawer is shown.
    pub fn show_backdrop(&self) -> bool {
        self.mobile_open
    }

    /// Sidebar width on wide screens.
    pub fn sidebar_width_px(&self) -> u16 {
        if self.collapsed {
            COLLAPSED_SIDEBAR_WIDTH_PX
        } else {
            EXPANDED_SIDEBAR_WIDTH_PX
        }
    }

    /// Left offset of the content column on wide screens.
    pub fn content_offset_px(&self) -> u16 {
        self.sidebar_width_px()
    }

    /// Whether nav labels and the brand block are rendered (wide screens).
    pub fn show_labels(&self) -> bool {
        !self.collapsed
    }
}
