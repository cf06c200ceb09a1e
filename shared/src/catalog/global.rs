use std::cell::Cell;

use once_cell::sync::OnceCell;

use crate::catalog::{
    command_catalog::{CatalogBuilder, CommandCatalog},
    error::CatalogError,
};

static GLOBAL_CATALOG: OnceCell<CommandCatalog> = OnceCell::new();

thread_local! {
    static BUILDING: Cell<bool> = const { Cell::new(false) };
}

struct BuildGuard;

impl Drop for BuildGuard {
    fn drop(&mut self) {
        BUILDING.with(|building| building.set(false));
    }
}

/// Returns the process-wide catalog, building it with `init` on first use.
/// Later calls ignore `init`. Calling this from inside `init` returns
/// `CatalogError::ReentrantBuild`.
pub fn global_catalog<F>(init: F) -> Result<&'static CommandCatalog, CatalogError>
where
    F: FnOnce(&mut CatalogBuilder),
{
    if let Some(catalog) = GLOBAL_CATALOG.get() {
        return Ok(catalog);
    }
    if BUILDING.with(|building| building.get()) {
        return Err(CatalogError::ReentrantBuild);
    }

    BUILDING.with(|building| building.set(true));
    let _guard = BuildGuard;

    GLOBAL_CATALOG.get_or_try_init(|| {
        let mut builder = CommandCatalog::builder();
        init(&mut builder);
        builder.build()
    })
}

/// The process-wide catalog, if it has been built
pub fn try_global_catalog() -> Option<&'static CommandCatalog> {
    GLOBAL_CATALOG.get()
}
