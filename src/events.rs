use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{FieldId, FinancialYear};

/// all events emitted while reconciling linked fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// the host wrote a field directly
    FieldEdited {
        field: FieldId,
        old_value: Decimal,
        new_value: Decimal,
    },
    /// a field was recomputed from its dependencies and changed
    FieldDerived {
        field: FieldId,
        old_value: Decimal,
        new_value: Decimal,
    },
    OverrideApplied {
        field: FieldId,
        value: Money,
    },
    /// a derived default replaced a manual value
    OverrideCleared {
        field: FieldId,
        previous: Money,
        restored: Money,
    },
    FinancialYearChanged {
        from: FinancialYear,
        to: FinancialYear,
    },
}

/// event store for collecting events
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events.extend(events);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
