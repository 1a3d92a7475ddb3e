pub mod config;
pub mod settlement;
pub mod system;
pub mod trip;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(trip::definitions())
        .chain(settlement::definitions())
        .chain(config::definitions())
    {
        registry.register(entry);
    }
}
