use crate::runtime::scheduler::SchedulerCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Schedule(SchedulerCommand),
    RequestRender,
}
