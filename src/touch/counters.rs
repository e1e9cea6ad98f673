/// Diagnostic counters accumulated over the engine's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureCounters {
    pub inputs: u32,
    pub cancels: u32,
    pub ignored_contacts: u32,
    pub stale_timer_fires: u32,
    pub timers_fired: u32,
    pub gestures_dispatched: u32,
    pub missing_capabilities: u32,
    pub host_faults: u32,
}
