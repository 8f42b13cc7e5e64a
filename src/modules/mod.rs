pub mod books;

use std::sync::Arc;

use bookshelf_kernel::{settings::Settings, ModuleRegistry};

use books::images::ImageStore;
use books::repository::BookRepository;

/// Register all project-specific modules with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    repository: Arc<dyn BookRepository>,
    settings: &Settings,
) {
    let images = ImageStore::from_settings(&settings.storage);
    registry.register_custom(books::create_module(repository, images));
}
