//! Alignment matrix command and query handlers.

mod add_action;
mod add_metric;
mod add_objective;
mod queries;
mod toggle_link;

pub use add_action::{
    ActionAddedEvent, AddActionCommand, AddActionError, AddActionHandler, AddActionResult,
};
pub use add_metric::{
    AddMetricCommand, AddMetricError, AddMetricHandler, AddMetricResult, MetricAddedEvent,
};
pub use add_objective::{
    AddObjectiveCommand, AddObjectiveError, AddObjectiveHandler, AddObjectiveResult,
    ObjectiveAddedEvent,
};
pub use queries::{GetStrengthHandler, GetStrengthQuery, ListLinksHandler};
pub use toggle_link::{
    LinkToggledEvent, ToggleLinkCommand, ToggleLinkError, ToggleLinkHandler, ToggleLinkResult,
};
