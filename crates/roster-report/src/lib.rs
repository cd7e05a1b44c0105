//! roster-report — Rendering of roster contents for display.

pub mod html;
