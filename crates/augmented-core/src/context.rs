/// Per-call carrier of the dependency bundle handed to tools and validators.
///
/// Created by [`Agent::run_sync`](crate::Agent::run_sync) and dropped when the
/// call returns.
#[derive(Debug, Clone)]
pub struct RunContext<D> {
    pub deps: D,
}

impl<D> RunContext<D> {
    pub fn new(deps: D) -> Self {
        Self { deps }
    }

    pub fn deps(&self) -> &D {
        &self.deps
    }

    pub fn into_deps(self) -> D {
        self.deps
    }
}
