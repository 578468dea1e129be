/// UI layer: sidebar filter widgets, status bar, and the four dashboard
/// charts drawn over the filtered view.

pub mod charts;
pub mod panels;
