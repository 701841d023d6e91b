pub mod catalog;

use std::sync::Arc;

use library_db::DocumentStore;
use library_kernel::ModuleRegistry;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, store: Arc<dyn DocumentStore>) {
    registry.register_custom(catalog::create_module(store));
}
