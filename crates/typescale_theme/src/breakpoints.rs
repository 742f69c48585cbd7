//! Breakpoints and viewport resolution

use crate::error::ControlError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use typescale_core::events::{event_types, EventData, EventDispatcher, HandlerId, VIEWPORT_TARGET};

/// Named viewport-width threshold, narrowest first
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    pub fn all() -> &'static [Breakpoint] {
        const BREAKPOINTS: [Breakpoint; 5] = [
            Breakpoint::Xs,
            Breakpoint::Sm,
            Breakpoint::Md,
            Breakpoint::Lg,
            Breakpoint::Xl,
        ];
        &BREAKPOINTS
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

impl Display for Breakpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Breakpoint {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Breakpoint::all()
            .iter()
            .copied()
            .find(|bp| bp.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ControlError::UnknownBreakpoint(s.to_string()))
    }
}

/// Minimum viewport width in logical pixels for each breakpoint
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreakpointTable {
    pub xs: f32,
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
    pub xl: f32,
}

impl BreakpointTable {
    /// xs=0, sm=600, md=960, lg=1280, xl=1920
    pub const DEFAULT: Self = Self {
        xs: 0.0,
        sm: 600.0,
        md: 960.0,
        lg: 1280.0,
        xl: 1920.0,
    };

    pub fn min_width(&self, breakpoint: Breakpoint) -> f32 {
        match breakpoint {
            Breakpoint::Xs => self.xs,
            Breakpoint::Sm => self.sm,
            Breakpoint::Md => self.md,
            Breakpoint::Lg => self.lg,
            Breakpoint::Xl => self.xl,
        }
    }

    /// Threshold of the widest breakpoint
    pub fn widest(&self) -> f32 {
        self.xl
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Widest breakpoint whose minimum width is `<= width`
pub fn resolve(width: f32, table: &BreakpointTable) -> Breakpoint {
    Breakpoint::all()
        .iter()
        .rev()
        .copied()
        .find(|bp| width >= table.min_width(*bp))
        .unwrap_or(Breakpoint::Xs)
}

/// Tracks the current viewport width and the breakpoint it resolves to.
///
/// Only the latest width is kept; every resize re-resolves from scratch.
pub struct ViewportTracker {
    table: BreakpointTable,
    current: Mutex<(f32, Breakpoint)>,
}

impl ViewportTracker {
    pub fn new(table: BreakpointTable, width: f32) -> Self {
        Self {
            table,
            current: Mutex::new((width, resolve(width, &table))),
        }
    }

    /// Record a new viewport width and return the resolved breakpoint
    pub fn update(&self, width: f32) -> Breakpoint {
        let breakpoint = resolve(width, &self.table);
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if current.1 != breakpoint {
            tracing::debug!(from = %current.1, to = %breakpoint, width, "breakpoint changed");
        }
        *current = (width, breakpoint);
        breakpoint
    }

    pub fn width(&self) -> f32 {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).0
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).1
    }

    pub fn table(&self) -> &BreakpointTable {
        &self.table
    }

    /// Re-resolve on every viewport resize event routed through `dispatcher`
    pub fn watch(self: &Arc<Self>, dispatcher: &mut EventDispatcher) -> HandlerId {
        let tracker = Arc::clone(self);
        dispatcher.register(VIEWPORT_TARGET, event_types::RESIZE, move |event| {
            if let EventData::Resize { width, .. } = event.data {
                tracker.update(width as f32);
            }
        })
    }
}
