mod argument;
mod broker;
mod process;
mod task;
mod trigger;

pub use argument::{ArgumentDescriptor, ArgumentType, Choice, ConnectorTemplate};
pub use broker::{BrokerCategory, BrokerInfo, EntityDefinition};
pub use process::{HistoryEvent, ProcessInfo, ProcessStatistics, ProcessStatus};
pub use task::{LinkDefinition, TaskDefinition, TaskInfo};
pub use trigger::{TriggerDefinition, TriggerInfo, TriggerType, PERIOD_TOKENS};
