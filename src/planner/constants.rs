/// Default half-width of the tolerance band, as a fraction of the target.
pub const DEFAULT_TOLERANCE: f64 = 0.15;

/// Default upper bound on the per-dish quantity searched by the finder.
pub const DEFAULT_MAX_QUANTITY: u32 = 2;

/// Largest quantity a single dish may be repeated to on its own.
pub const MAX_REPEAT_QUANTITY: u32 = 12;

/// Number of combinations shown per slot.
pub const SUGGESTIONS_PER_SLOT: usize = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Sensitivity sweep grid
// ─────────────────────────────────────────────────────────────────────────────

/// Tolerances evaluated by the sweep.
pub const SWEEP_TOLERANCES: [f64; 6] = [0.05, 0.10, 0.15, 0.20, 0.25, 0.30];

/// Max quantities evaluated by the sweep.
pub const SWEEP_MAX_QUANTITIES: [u32; 3] = [1, 2, 3];

/// Per-slot targets evaluated by the sweep before any random ones are added.
pub const SWEEP_TARGETS: [f64; 6] = [150.0, 250.0, 400.0, 550.0, 700.0, 900.0];
