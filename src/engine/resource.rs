// src/engine/resource.rs

use tracing::info;

use crate::commands::CommandBuilder;
use crate::errors::Result;
use crate::exec::CommandExecutor;
use crate::types::ResourceState;

use super::poller::StatePoller;

/// Starts or stops managed resources and waits for the transition.
pub struct ResourceController<'a> {
    executor: &'a CommandExecutor,
    commands: &'a CommandBuilder,
    poller: StatePoller<'a>,
    console_name: &'a str,
}

impl<'a> ResourceController<'a> {
    pub fn new(
        executor: &'a CommandExecutor,
        commands: &'a CommandBuilder,
        poller: StatePoller<'a>,
        console_name: &'a str,
    ) -> Self {
        Self {
            executor,
            commands,
            poller,
            console_name,
        }
    }

    /// Move `resource_id` to `state` (`"UP"` or `"DOWN"`).
    ///
    /// The state is validated before anything is dispatched. When
    /// `apf_dataset` is given it is APF-authorized once the resource has
    /// reached the requested state.
    pub async fn change_state(
        &self,
        resource_id: &str,
        state: &str,
        apf_dataset: Option<&str>,
    ) -> Result<()> {
        let target: ResourceState = state.parse()?;

        let request = match target {
            ResourceState::Up => self.commands.start_resource(resource_id),
            ResourceState::Down => self.commands.stop_resource(resource_id),
        };
        info!(resource = resource_id, state = %target, "requesting resource state change");
        self.executor.execute(&request).await?;

        self.poller.await_state(resource_id, target.as_str()).await?;

        if let Some(dataset) = apf_dataset {
            info!(resource = resource_id, dataset, "APF authorizing after state change");
            let apf = self.commands.apf_authorize(dataset, self.console_name);
            self.executor.execute(&apf).await?;
        }

        Ok(())
    }
}
