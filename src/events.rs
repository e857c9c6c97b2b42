/// Commands the widget accepts from outside the UI thread. Spins are
/// requested here; results come back as a component output.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Spin with a random fling; lands wherever the physics (or the
    /// configured rig) says.
    Spin,
    /// Spin with a random fling, forced to land on the given sector.
    SpinTo(usize),
    ConfigReload,
}
