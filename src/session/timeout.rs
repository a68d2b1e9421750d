/// Terminal policy shared by both watches: every countdown tick is ignored
/// except the final one.
#[derive(Debug, Clone, Copy)]
pub struct IdleEvaluator {
    final_tick: u32,
}

impl IdleEvaluator {
    pub fn from_seconds(timeout_s: u32) -> Self {
        Self {
            final_tick: timeout_s.saturating_sub(1),
        }
    }

    pub fn is_expired(&self, tick: u32) -> bool {
        tick == self.final_tick
    }
}
