use crate::core::guest_list::{emit_guest_list, GuestListOutput};
use crate::core::invite::InviteContext;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub invited: usize,
    pub output: GuestListOutput,
}

/// Load, filter and emit in one pass.
pub struct InviteRun<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> InviteRun<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    pub fn context(&self) -> InviteContext {
        InviteContext::from_coordinate(self.config.office(), self.config.limit_distance_km())
            .with_earth_radius(self.config.earth_radius_km())
    }

    pub fn output(&self) -> GuestListOutput {
        GuestListOutput::from_flags(
            self.config.save_to_file(),
            Some(self.config.guest_list_path().to_path_buf()),
        )
    }

    pub fn run(&self) -> Result<RunSummary> {
        let office = self.config.office();
        tracing::info!(
            "Inviting customers within {} km of ({}, {})",
            self.config.limit_distance_km(),
            office.latitude,
            office.longitude
        );

        let guests = self.context().load_customers(self.config.customers_path())?;

        let output = self.output();
        emit_guest_list(&guests, &output)?;
        tracing::debug!("Guest list written to {}", output);

        Ok(RunSummary {
            invited: guests.len(),
            output,
        })
    }
}
