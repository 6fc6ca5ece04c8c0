pub mod directors;
pub mod genres;
pub mod movies;

use cinema_kernel::ModuleRegistry;

/// Register every resource module with the registry
pub fn register_all(registry: &mut ModuleRegistry) -> anyhow::Result<()> {
    registry.register(movies::create_module())?;
    registry.register(directors::create_module())?;
    registry.register(genres::create_module())?;
    Ok(())
}
