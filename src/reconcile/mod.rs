pub mod asset;
pub mod graph;
pub mod salary;

use crate::errors::Result;
use crate::events::EventStore;

pub use asset::AssetPurchaseReconciler;
pub use graph::DependencyGraph;
pub use salary::SalaryReconciler;

/// recomputes the fields that depend on an edited one
pub trait FieldReconciler {
    type Field: Copy;
    type State;
    type Value;

    fn graph(&self) -> &DependencyGraph<Self::Field>;

    /// apply an edit; events are recorded only when the edit succeeds
    fn reconcile_with_events(
        &self,
        state: &Self::State,
        field: Self::Field,
        value: Self::Value,
        events: &mut EventStore,
    ) -> Result<Self::State>;

    fn reconcile(&self, state: &Self::State, field: Self::Field, value: Self::Value) -> Result<Self::State> {
        let mut discarded = EventStore::new();
        self.reconcile_with_events(state, field, value, &mut discarded)
    }
}
