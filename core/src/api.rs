//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `harvester_core::api` instead of reaching into
//! internal modules.

pub use crate::bus::{AppEvent, EventBus, StatusLevel, StatusMessage};
pub use crate::client::{
    BrokersRest, ConnectorsRest, ProcessesRest, RestContext, TasksRest, TriggersRest,
};
pub use crate::config::{load_default, AppConfig, HttpConfig, LoggingConfig, ServerConfig};
pub use crate::error::{ClientError, ConsoleError, FormError};
pub use crate::forms::{Control, Form, ValueMap};
pub use crate::model::{
    ArgumentDescriptor, ArgumentType, BrokerCategory, BrokerInfo, Choice, ConnectorTemplate,
    EntityDefinition, HistoryEvent, LinkDefinition, ProcessInfo, ProcessStatistics, ProcessStatus,
    TaskDefinition, TaskInfo, TriggerDefinition, TriggerInfo, TriggerType, PERIOD_TOKENS,
};
pub use crate::poll::{ProcessWatch, WatchHandle};
pub use crate::schedule::replace_schedule;
pub use crate::scramble::{decode, decode_or_raw, encode};
