pub mod authors;
pub mod books;

use authorbook_db::StoreSet;
use authorbook_kernel::ModuleRegistry;

/// Register all feature modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, stores: &StoreSet) -> anyhow::Result<()> {
    registry.register(authors::create_module(stores.authors.clone()))?;
    registry.register(books::create_module(
        stores.books.clone(),
        stores.authors.clone(),
    ))?;
    Ok(())
}
